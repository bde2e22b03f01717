//! Contract models for the campus admin module
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use std::fmt;

// ===== Registration core =====

/// Enrollable identity (a student)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Student code (e.g. "S001")
    pub id: String,
    /// Display name
    pub full_name: String,
    /// Institution email, if known
    pub email: Option<String>,
    /// Administrative class the student belongs to
    pub class_id: Option<String>,
    /// Inactive members are left out of eligibility listings
    pub is_active: bool,
}

/// Subject grouping one or more sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub name: String,
}

/// One schedulable offering of a course
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section code (e.g. "LHP-A")
    pub id: String,
    /// Owning course
    pub course_id: String,
    /// Owning course display name
    pub course_name: String,
    /// Group label shown to users (e.g. "01")
    pub group: Option<String>,
}

/// Composite identity of an enrollment
///
/// Ordering is member first, then section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnrollmentKey {
    pub member_id: String,
    pub section_id: String,
}

impl EnrollmentKey {
    pub fn new(member_id: impl Into<String>, section_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            section_id: section_id.into(),
        }
    }
}

impl fmt::Display for EnrollmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.member_id, self.section_id)
    }
}

/// Link between one member and one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub key: EnrollmentKey,
    /// Course of the section at registration time; the one-per-course rule reads it
    pub course_id: String,
    /// Soft-delete marker
    pub is_active: bool,
    pub enrolled_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn member_id(&self) -> &str {
        &self.key.member_id
    }

    pub fn section_id(&self) -> &str {
        &self.key.section_id
    }
}

/// Event that requires duty-assigned attendance monitors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

/// Union committee member who can be assigned to monitor attendance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyMember {
    pub id: String,
    pub full_name: String,
    pub is_active: bool,
}

/// Role of an assigned monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DutyRole {
    /// Main monitor ("CHINH")
    #[default]
    Primary,
    /// Supporting monitor ("PHU")
    Assistant,
}

impl DutyRole {
    pub fn code(self) -> &'static str {
        match self {
            Self::Primary => "CHINH",
            Self::Assistant => "PHU",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "CHINH" => Some(Self::Primary),
            "PHU" => Some(Self::Assistant),
            _ => None,
        }
    }
}

/// Link between an activity and a duty member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Storage identifier, 0 until persisted
    pub id: i64,
    pub activity_id: String,
    pub activity_name: String,
    pub member_id: String,
    pub member_name: String,
    pub role: DutyRole,
    pub note: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub is_active: bool,
}

// ===== Organizational records =====

/// Faculty (parent unit of majors, lecturers, specialists)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faculty {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

/// Board category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoardKind {
    /// Youth union board
    Union,
    /// Student association board
    Association,
    /// Teams, clubs and working groups
    ClubOrTeam,
}

impl BoardKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::Union => "DOAN",
            Self::Association => "HOI",
            Self::ClubOrTeam => "DOI_CLB_BAN",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "DOAN" => Some(Self::Union),
            "HOI" => Some(Self::Association),
            "DOI_CLB_BAN" => Some(Self::ClubOrTeam),
            _ => None,
        }
    }
}

/// Board (Ban) of the union / association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub kind: BoardKind,
    pub description: Option<String>,
    pub faculty_id: Option<String>,
    /// Resolved faculty name, for display
    pub faculty_name: Option<String>,
    pub is_active: bool,
}

/// Partial update for a board; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardPatch {
    pub name: Option<String>,
    pub kind: Option<BoardKind>,
    pub description: Option<String>,
    pub faculty_id: Option<String>,
    pub is_active: Option<bool>,
}

/// Staff position (ChucVu)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub id: String,
    pub name: String,
    /// Organization unit the position belongs to (e.g. "DOAN", "HOI")
    pub unit: Option<String>,
    pub description: Option<String>,
    /// Display order, lowest first
    pub display_order: Option<i32>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionPatch {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Administrative specialist (ChuyenVien)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specialist {
    pub id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub faculty_id: Option<String>,
    pub faculty_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialistPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub faculty_id: Option<String>,
    pub is_active: Option<bool>,
}

/// Lecturer (GiangVien)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lecturer {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub faculty_id: String,
    pub is_active: bool,
}

/// Intake cohort (KhoaHoc), e.g. "K2021" running 2021..2025
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseTerm {
    pub id: String,
    pub name: String,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub is_current: bool,
    pub is_active: bool,
}

/// Administrative class (Lop)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub id: String,
    pub name: String,
    pub major_id: String,
    pub course_term_id: String,
    pub is_active: bool,
}

/// Major (Nganh)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Major {
    pub id: String,
    pub name: String,
    pub faculty_id: String,
    pub faculty_name: Option<String>,
    pub is_active: bool,
    /// Active students in classes of this major
    pub student_count: u64,
}

/// Aggregated figures for a single major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorStatistics {
    pub major: Major,
    pub active_students: u64,
    pub total_students: u64,
    pub active_classes: u64,
}

/// Active/inactive split of a record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCount {
    pub active: u64,
    pub inactive: u64,
}

impl StatusCount {
    pub fn total(&self) -> u64 {
        self.active + self.inactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_key_orders_by_member_then_section() {
        let mut keys = vec![
            EnrollmentKey::new("S002", "LHP-A"),
            EnrollmentKey::new("S001", "LHP-B"),
            EnrollmentKey::new("S001", "LHP-A"),
        ];
        keys.sort();

        assert_eq!(keys[0], EnrollmentKey::new("S001", "LHP-A"));
        assert_eq!(keys[1], EnrollmentKey::new("S001", "LHP-B"));
        assert_eq!(keys[2], EnrollmentKey::new("S002", "LHP-A"));
        assert_eq!(keys[0].to_string(), "S001/LHP-A");
    }

    #[test]
    fn test_duty_role_codes() {
        assert_eq!(DutyRole::default(), DutyRole::Primary);
        assert_eq!(DutyRole::from_code("phu"), Some(DutyRole::Assistant));
        assert_eq!(DutyRole::from_code(" CHINH "), Some(DutyRole::Primary));
        assert_eq!(DutyRole::from_code("LEAD"), None);
        assert_eq!(DutyRole::Assistant.code(), "PHU");
    }

    #[test]
    fn test_board_kind_codes() {
        for kind in [BoardKind::Union, BoardKind::Association, BoardKind::ClubOrTeam] {
            assert_eq!(BoardKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(BoardKind::from_code("CLB"), None);
    }
}
