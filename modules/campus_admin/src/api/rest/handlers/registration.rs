//! Enrollment and duty-assignment handlers

use super::list_of;
use crate::api::rest::{
    dto::*,
    error::Problem,
    mapper::parse_duty_role,
};
use crate::module::CampusServices;
use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

// ===== Enrollments =====

pub async fn register_enrollment(
    Extension(services): Extension<Arc<CampusServices>>,
    body: Result<Json<RegisterEnrollmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EnrollmentDto>), Problem> {
    let Json(req) = body?;
    let enrollment = services
        .enrollments
        .register(&req.member_id, &req.section_id)
        .await?;
    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

pub async fn get_enrollment(
    Extension(services): Extension<Arc<CampusServices>>,
    Path((member_id, section_id)): Path<(String, String)>,
) -> Result<Json<EnrollmentDto>, Problem> {
    let enrollment = services.enrollments.get(&member_id, &section_id).await?;
    Ok(Json(enrollment.into()))
}

pub async fn unenroll(
    Extension(services): Extension<Arc<CampusServices>>,
    Path((member_id, section_id)): Path<(String, String)>,
) -> Result<StatusCode, Problem> {
    services.enrollments.unenroll(&member_id, &section_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn transfer_enrollment(
    Extension(services): Extension<Arc<CampusServices>>,
    body: Result<Json<TransferEnrollmentRequest>, JsonRejection>,
) -> Result<Json<EnrollmentDto>, Problem> {
    let Json(req) = body?;
    let enrollment = services
        .enrollments
        .transfer(&req.member_id, &req.from_section_id, &req.to_section_id)
        .await?;
    Ok(Json(enrollment.into()))
}

pub async fn list_member_enrollments(
    Extension(services): Extension<Arc<CampusServices>>,
    Path(member_id): Path<String>,
) -> Result<Json<ListResponse<EnrollmentDto>>, Problem> {
    let items = services.enrollments.list_by_member(&member_id).await?;
    Ok(Json(list_of(items)))
}

pub async fn list_section_enrollments(
    Extension(services): Extension<Arc<CampusServices>>,
    Path(section_id): Path<String>,
) -> Result<Json<ListResponse<EnrollmentDto>>, Problem> {
    let items = services.enrollments.list_by_section(&section_id).await?;
    Ok(Json(list_of(items)))
}

pub async fn list_eligible_members(
    Extension(services): Extension<Arc<CampusServices>>,
    Path(section_id): Path<String>,
) -> Result<Json<ListResponse<MemberDto>>, Problem> {
    let items = services.enrollments.list_eligible_members(&section_id).await?;
    Ok(Json(list_of(items)))
}

// ===== Duty assignments =====

pub async fn assign_members(
    Extension(services): Extension<Arc<CampusServices>>,
    Path(activity_id): Path<String>,
    body: Result<Json<AssignMembersRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ListResponse<AssignmentDto>>), Problem> {
    let Json(req) = body?;
    let role = parse_duty_role(req.role.as_deref())?;
    let saved = services
        .assignments
        .assign(&activity_id, &req.member_ids, role, req.note)
        .await?;
    Ok((StatusCode::CREATED, Json(list_of(saved))))
}

pub async fn list_activity_assignments(
    Extension(services): Extension<Arc<CampusServices>>,
    Path(activity_id): Path<String>,
) -> Result<Json<ListResponse<AssignmentDto>>, Problem> {
    let items = services.assignments.list_by_activity(&activity_id).await?;
    Ok(Json(list_of(items)))
}

pub async fn unassign_member(
    Extension(services): Extension<Arc<CampusServices>>,
    Path((activity_id, member_id)): Path<(String, String)>,
) -> Result<StatusCode, Problem> {
    services.assignments.unassign(&activity_id, &member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_duty_member_assignments(
    Extension(services): Extension<Arc<CampusServices>>,
    Path(member_id): Path<String>,
) -> Result<Json<ListResponse<AssignmentDto>>, Problem> {
    let items = services.assignments.list_by_member(&member_id).await?;
    Ok(Json(list_of(items)))
}
