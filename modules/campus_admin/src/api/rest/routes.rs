//! Route registration and OpenAPI document

use super::{dto::*, error::Problem, handlers};
use crate::module::CampusServices;
use axum::{
    routing::{delete, get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// Schema document served at `/openapi.json`
#[derive(OpenApi)]
#[openapi(
    info(title = "Campus Admin API", description = "Campus attendance administration"),
    components(schemas(
        Problem,
        EnrollmentDto,
        RegisterEnrollmentRequest,
        TransferEnrollmentRequest,
        MemberDto,
        AssignmentDto,
        AssignMembersRequest,
        FacultyDto,
        CreateFacultyRequest,
        BoardDto,
        CreateBoardRequest,
        UpdateBoardRequest,
        BoardStatisticsDto,
        PositionDto,
        CreatePositionRequest,
        UpdatePositionRequest,
        PositionStatisticsDto,
        SpecialistDto,
        CreateSpecialistRequest,
        UpdateSpecialistRequest,
        SpecialistStatisticsDto,
        LecturerDto,
        CreateLecturerRequest,
        UpdateLecturerRequest,
        CourseTermDto,
        CourseTermRequest,
        ClassDto,
        ClassRequest,
        MajorDto,
        MajorRequest,
        MajorStatisticsDto,
        StatusCountDto,
        CountDto,
        EmailTakenDto,
        ValidateEmailRequest,
        EmailCheckDto,
        RecognitionConfigDto,
        RecognitionSettingsDto,
        SystemStatusDto,
        CameraStatusDto,
    ))
)]
pub struct ApiDoc;

/// Build the module router with every endpoint
pub fn router(services: Arc<CampusServices>) -> Router {
    Router::new()
        // Registration
        .route("/enrollments", post(handlers::register_enrollment))
        .route("/enrollments/transfer", post(handlers::transfer_enrollment))
        .route(
            "/enrollments/{member_id}/{section_id}",
            get(handlers::get_enrollment).delete(handlers::unenroll),
        )
        .route("/members/{id}/enrollments", get(handlers::list_member_enrollments))
        .route("/sections/{id}/enrollments", get(handlers::list_section_enrollments))
        .route("/sections/{id}/eligible-members", get(handlers::list_eligible_members))
        .route(
            "/activities/{id}/assignments",
            get(handlers::list_activity_assignments).post(handlers::assign_members),
        )
        .route(
            "/activities/{id}/assignments/{member_id}",
            delete(handlers::unassign_member),
        )
        .route(
            "/duty-members/{id}/assignments",
            get(handlers::list_duty_member_assignments),
        )
        // Faculties
        .route(
            "/faculties",
            get(handlers::list_faculties).post(handlers::create_faculty),
        )
        .route("/faculties/{id}", get(handlers::get_faculty))
        // Boards
        .route("/boards", get(handlers::list_boards).post(handlers::create_board))
        .route("/boards/statistics", get(handlers::board_statistics))
        .route(
            "/boards/{id}",
            get(handlers::get_board)
                .put(handlers::update_board)
                .delete(handlers::delete_board),
        )
        // Positions
        .route(
            "/positions",
            get(handlers::list_positions).post(handlers::create_position),
        )
        .route("/positions/statistics", get(handlers::position_statistics))
        .route(
            "/positions/{id}",
            get(handlers::get_position)
                .put(handlers::update_position)
                .delete(handlers::delete_position),
        )
        // Specialists
        .route(
            "/specialists",
            get(handlers::list_specialists).post(handlers::create_specialist),
        )
        .route("/specialists/count", get(handlers::count_active_specialists))
        .route("/specialists/statistics", get(handlers::specialist_statistics))
        .route(
            "/specialists/{id}",
            get(handlers::get_specialist)
                .put(handlers::update_specialist)
                .delete(handlers::delete_specialist),
        )
        // Lecturers
        .route(
            "/lecturers",
            get(handlers::list_lecturers).post(handlers::create_lecturer),
        )
        .route("/lecturers/count", get(handlers::count_lecturers))
        .route("/lecturers/email-taken", get(handlers::lecturer_email_taken))
        .route(
            "/lecturers/{id}",
            get(handlers::get_lecturer)
                .put(handlers::update_lecturer)
                .delete(handlers::delete_lecturer),
        )
        .route("/lecturers/{id}/restore", post(handlers::restore_lecturer))
        // Course terms
        .route(
            "/course-terms",
            get(handlers::list_course_terms).post(handlers::create_course_term),
        )
        .route("/course-terms/current", get(handlers::current_course_term))
        .route(
            "/course-terms/{id}",
            get(handlers::get_course_term)
                .put(handlers::update_course_term)
                .delete(handlers::delete_course_term),
        )
        // Classes
        .route("/classes", get(handlers::list_classes).post(handlers::create_class))
        .route("/classes/count", get(handlers::count_classes))
        .route(
            "/classes/{id}",
            get(handlers::get_class)
                .put(handlers::update_class)
                .delete(handlers::delete_class),
        )
        .route("/classes/{id}/restore", post(handlers::restore_class))
        .route("/classes/{id}/permanent", delete(handlers::purge_class))
        .route("/classes/{id}/student-count", get(handlers::class_student_count))
        // Majors
        .route("/majors", get(handlers::list_majors).post(handlers::create_major))
        .route(
            "/majors/{id}",
            get(handlers::get_major)
                .put(handlers::update_major)
                .delete(handlers::delete_major),
        )
        .route("/majors/{id}/restore", post(handlers::restore_major))
        .route("/majors/{id}/permanent", delete(handlers::purge_major))
        .route("/majors/{id}/statistics", get(handlers::major_statistics))
        // Helpers
        .route("/email/validate", post(handlers::validate_email))
        .route("/recognition/config", get(handlers::recognition_config))
        .route("/recognition/status", get(handlers::recognition_status))
        .route("/openapi.json", get(openapi_json))
        // Add services as extension for handlers
        .layer(Extension(services))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
