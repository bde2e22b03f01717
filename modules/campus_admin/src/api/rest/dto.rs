//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

// ===== Registration DTOs =====

/// Enrollment response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentDto {
    #[schema(example = "S001")]
    pub member_id: String,

    #[schema(example = "LHP-A")]
    pub section_id: String,

    /// Course of the section at registration time
    #[schema(example = "MH-101")]
    pub course_id: String,

    pub is_active: bool,

    pub enrolled_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Register a member into a section
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterEnrollmentRequest {
    pub member_id: String,
    pub section_id: String,
}

/// Move a member between two sections of the same course
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TransferEnrollmentRequest {
    pub member_id: String,
    pub from_section_id: String,
    pub to_section_id: String,
}

/// Member summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberDto {
    pub id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    pub is_active: bool,
}

/// Assignment response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentDto {
    pub id: i64,
    #[schema(example = "HD01")]
    pub activity_id: String,
    pub activity_name: String,
    #[schema(example = "BCH01")]
    pub member_id: String,
    pub member_name: String,
    /// `CHINH` or `PHU`
    #[schema(example = "CHINH")]
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Assign duty members to an activity
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignMembersRequest {
    pub member_ids: Vec<String>,

    /// `CHINH` (default) or `PHU`
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub note: Option<String>,
}

// ===== Organizational DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacultyDto {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateFacultyRequest {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BoardDto {
    pub id: String,
    pub name: String,
    /// `DOAN`, `HOI` or `DOI_CLB_BAN`
    #[schema(example = "DOAN")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_name: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBoardRequest {
    pub id: String,
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub faculty_id: Option<String>,
}

/// Partial board update; absent fields are kept
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBoardRequest {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub faculty_id: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BoardStatisticsDto {
    pub total: u64,
    /// Active boards per kind code
    pub by_kind: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PositionDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePositionRequest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePositionRequest {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PositionStatisticsDto {
    pub total: u64,
    pub by_unit: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpecialistDto {
    pub id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSpecialistRequest {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub faculty_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSpecialistRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub faculty_id: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpecialistStatisticsDto {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    pub by_faculty: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LecturerDto {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub faculty_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLecturerRequest {
    pub id: String,
    pub full_name: String,
    #[schema(example = "gv_nguyenvana@vnkgu.edu.vn")]
    pub email: String,
    pub faculty_id: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateLecturerRequest {
    pub full_name: String,
    pub email: String,
    pub faculty_id: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseTermDto {
    #[schema(example = "K2021")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    pub is_current: bool,
    pub is_active: bool,
}

/// Create or replace a course term
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CourseTermRequest {
    /// Ignored on update, the path id wins
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClassDto {
    pub id: String,
    pub name: String,
    pub major_id: String,
    pub course_term_id: String,
    pub is_active: bool,
}

/// Create or replace a class
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClassRequest {
    /// Ignored on update, the path id wins
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub major_id: String,
    pub course_term_id: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MajorDto {
    pub id: String,
    pub name: String,
    pub faculty_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_name: Option<String>,
    pub is_active: bool,
    pub student_count: u64,
}

/// Create or replace a major
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MajorRequest {
    /// Ignored on update, the path id wins
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub faculty_id: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MajorStatisticsDto {
    pub major: MajorDto,
    pub active_students: u64,
    pub total_students: u64,
    pub active_classes: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub active: u64,
    pub inactive: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct CountDto {
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct EmailTakenDto {
    pub taken: bool,
}

// ===== Helper DTOs =====

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ValidateEmailRequest {
    #[schema(example = "sv_12345@vnkgu.edu.vn")]
    pub email: String,
}

/// Breakdown of an email address against the institution rules
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmailCheckDto {
    pub email: String,
    pub valid: bool,
    /// Human-readable reason when `valid` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    pub domain: String,
    pub username: String,
    pub is_institution_email: bool,
    pub is_student_email: bool,
    pub is_teacher_email: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecognitionSettingsDto {
    pub recognition_threshold: f64,
    pub detection_threshold: f64,
    pub min_face_size: u32,
    pub max_face_size: u32,
    pub enable_age_gender_detection: bool,
    pub tracking_buffer_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CameraStatusDto {
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SystemStatusDto {
    /// `HEALTHY` or `DEGRADED`
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub cameras: BTreeMap<String, CameraStatusDto>,
    pub services: BTreeMap<String, String>,
    pub total_active_students: u64,
}

/// Configuration consumed by the face-recognition client
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecognitionConfigDto {
    #[schema(example = "http://localhost:8080/api")]
    pub backend_api_url: String,
    #[schema(example = "ws://localhost:8080/ws")]
    pub websocket_url: String,
    pub settings: RecognitionSettingsDto,
    pub system_status: SystemStatusDto,
    pub max_concurrent_streams: u32,
    pub frame_processing_interval: u32,
}

// ===== List Response DTOs =====

/// List envelope used by every collection endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

fn default_true() -> bool {
    true
}
