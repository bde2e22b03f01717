//! Organizational record handlers

use super::{list_of, ListQuery, StatusFilter};
use crate::api::rest::{
    dto::*,
    error::Problem,
    mapper::{lecturer_from_update, parse_board_kind},
};
use crate::contract::{Board, BoardPatch};
use crate::module::CampusServices;
use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

type Services = Extension<Arc<CampusServices>>;
type Body<T> = Result<Json<T>, JsonRejection>;

// ===== Faculties =====

pub async fn list_faculties(
    Extension(services): Services,
) -> Result<Json<ListResponse<FacultyDto>>, Problem> {
    Ok(Json(list_of(services.faculties.list().await?)))
}

pub async fn get_faculty(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<FacultyDto>, Problem> {
    Ok(Json(services.faculties.get(&id).await?.into()))
}

pub async fn create_faculty(
    Extension(services): Services,
    body: Body<CreateFacultyRequest>,
) -> Result<(StatusCode, Json<FacultyDto>), Problem> {
    let Json(req) = body?;
    let faculty = services.faculties.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(faculty.into())))
}

// ===== Boards =====

#[derive(Debug, Default, Deserialize)]
pub struct BoardListQuery {
    /// Kind code, e.g. `DOAN`
    pub kind: Option<String>,
    pub faculty_id: Option<String>,
}

pub async fn list_boards(
    Extension(services): Services,
    Query(query): Query<BoardListQuery>,
) -> Result<Json<ListResponse<BoardDto>>, Problem> {
    let boards = match (query.kind.as_deref(), query.faculty_id.as_deref()) {
        (Some(kind), _) => services.boards.list_by_kind(parse_board_kind(kind)?).await?,
        (None, Some(faculty_id)) => services.boards.list_by_faculty(faculty_id).await?,
        (None, None) => services.boards.list_active().await?,
    };
    Ok(Json(list_of(boards)))
}

pub async fn get_board(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<BoardDto>, Problem> {
    Ok(Json(services.boards.get(&id).await?.into()))
}

pub async fn create_board(
    Extension(services): Services,
    body: Body<CreateBoardRequest>,
) -> Result<(StatusCode, Json<BoardDto>), Problem> {
    let Json(req) = body?;
    let board = services.boards.create(Board::try_from(req)?).await?;
    Ok((StatusCode::CREATED, Json(board.into())))
}

pub async fn update_board(
    Extension(services): Services,
    Path(id): Path<String>,
    body: Body<UpdateBoardRequest>,
) -> Result<Json<BoardDto>, Problem> {
    let Json(req) = body?;
    let board = services.boards.update(&id, BoardPatch::try_from(req)?).await?;
    Ok(Json(board.into()))
}

pub async fn delete_board(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    services.boards.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn board_statistics(
    Extension(services): Services,
) -> Result<Json<BoardStatisticsDto>, Problem> {
    Ok(Json(services.boards.statistics().await?.into()))
}

// ===== Positions =====

#[derive(Debug, Default, Deserialize)]
pub struct PositionListQuery {
    pub unit: Option<String>,
}

pub async fn list_positions(
    Extension(services): Services,
    Query(query): Query<PositionListQuery>,
) -> Result<Json<ListResponse<PositionDto>>, Problem> {
    let positions = match query.unit.as_deref() {
        Some(unit) => services.positions.list_by_unit(unit).await?,
        None => services.positions.list_active().await?,
    };
    Ok(Json(list_of(positions)))
}

pub async fn get_position(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<PositionDto>, Problem> {
    Ok(Json(services.positions.get(&id).await?.into()))
}

pub async fn create_position(
    Extension(services): Services,
    body: Body<CreatePositionRequest>,
) -> Result<(StatusCode, Json<PositionDto>), Problem> {
    let Json(req) = body?;
    let position = services.positions.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(position.into())))
}

pub async fn update_position(
    Extension(services): Services,
    Path(id): Path<String>,
    body: Body<UpdatePositionRequest>,
) -> Result<Json<PositionDto>, Problem> {
    let Json(req) = body?;
    Ok(Json(services.positions.update(&id, req.into()).await?.into()))
}

pub async fn delete_position(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    services.positions.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn position_statistics(
    Extension(services): Services,
) -> Result<Json<PositionStatisticsDto>, Problem> {
    Ok(Json(services.positions.statistics().await?.into()))
}

// ===== Specialists =====

pub async fn list_specialists(
    Extension(services): Services,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<SpecialistDto>>, Problem> {
    let specialists = match (query.keyword.as_deref(), query.faculty_id.as_deref()) {
        (Some(keyword), _) => services.specialists.search(keyword).await?,
        (None, Some(faculty_id)) => services.specialists.list_by_faculty(faculty_id).await?,
        (None, None) => services.specialists.list_active().await?,
    };
    Ok(Json(list_of(specialists)))
}

pub async fn get_specialist(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<SpecialistDto>, Problem> {
    Ok(Json(services.specialists.get(&id).await?.into()))
}

pub async fn create_specialist(
    Extension(services): Services,
    body: Body<CreateSpecialistRequest>,
) -> Result<(StatusCode, Json<SpecialistDto>), Problem> {
    let Json(req) = body?;
    let specialist = services.specialists.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(specialist.into())))
}

pub async fn update_specialist(
    Extension(services): Services,
    Path(id): Path<String>,
    body: Body<UpdateSpecialistRequest>,
) -> Result<Json<SpecialistDto>, Problem> {
    let Json(req) = body?;
    Ok(Json(services.specialists.update(&id, req.into()).await?.into()))
}

pub async fn delete_specialist(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    services.specialists.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn count_active_specialists(
    Extension(services): Services,
) -> Result<Json<CountDto>, Problem> {
    Ok(Json(CountDto {
        count: services.specialists.count_active().await?,
    }))
}

pub async fn specialist_statistics(
    Extension(services): Services,
) -> Result<Json<SpecialistStatisticsDto>, Problem> {
    Ok(Json(services.specialists.statistics().await?.into()))
}

// ===== Lecturers =====

pub async fn list_lecturers(
    Extension(services): Services,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<LecturerDto>>, Problem> {
    let lecturers = match (query.keyword.as_deref(), query.status) {
        (Some(keyword), _) => services.lecturers.search(keyword).await?,
        (None, StatusFilter::All) => services.lecturers.list_all().await?,
        (None, StatusFilter::Active) => services.lecturers.list_active().await?,
        (None, StatusFilter::Inactive) => services.lecturers.list_inactive().await?,
    };
    Ok(Json(list_of(lecturers)))
}

pub async fn get_lecturer(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<LecturerDto>, Problem> {
    Ok(Json(services.lecturers.get(&id).await?.into()))
}

pub async fn create_lecturer(
    Extension(services): Services,
    body: Body<CreateLecturerRequest>,
) -> Result<(StatusCode, Json<LecturerDto>), Problem> {
    let Json(req) = body?;
    let lecturer = services.lecturers.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(lecturer.into())))
}

pub async fn update_lecturer(
    Extension(services): Services,
    Path(id): Path<String>,
    body: Body<UpdateLecturerRequest>,
) -> Result<Json<LecturerDto>, Problem> {
    let Json(req) = body?;
    let lecturer = services
        .lecturers
        .update(&id, lecturer_from_update(&id, req))
        .await?;
    Ok(Json(lecturer.into()))
}

pub async fn delete_lecturer(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    services.lecturers.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_lecturer(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<LecturerDto>, Problem> {
    Ok(Json(services.lecturers.restore(&id).await?.into()))
}

pub async fn count_lecturers(
    Extension(services): Services,
) -> Result<Json<StatusCountDto>, Problem> {
    Ok(Json(services.lecturers.count_by_status().await?.into()))
}

#[derive(Debug, Deserialize)]
pub struct EmailTakenQuery {
    pub email: String,
    /// Lecturer allowed to hold the address (the one being edited)
    pub exclude_id: Option<String>,
}

pub async fn lecturer_email_taken(
    Extension(services): Services,
    Query(query): Query<EmailTakenQuery>,
) -> Result<Json<EmailTakenDto>, Problem> {
    let taken = services
        .lecturers
        .is_email_taken(&query.email, query.exclude_id.as_deref())
        .await?;
    Ok(Json(EmailTakenDto { taken }))
}

// ===== Course terms =====

pub async fn list_course_terms(
    Extension(services): Services,
) -> Result<Json<ListResponse<CourseTermDto>>, Problem> {
    Ok(Json(list_of(services.course_terms.list().await?)))
}

pub async fn get_course_term(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<CourseTermDto>, Problem> {
    Ok(Json(services.course_terms.get(&id).await?.into()))
}

pub async fn current_course_term(
    Extension(services): Services,
) -> Result<Json<Option<CourseTermDto>>, Problem> {
    Ok(Json(services.course_terms.current().await?.map(Into::into)))
}

pub async fn create_course_term(
    Extension(services): Services,
    body: Body<CourseTermRequest>,
) -> Result<(StatusCode, Json<CourseTermDto>), Problem> {
    let Json(req) = body?;
    let term = services.course_terms.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(term.into())))
}

pub async fn update_course_term(
    Extension(services): Services,
    Path(id): Path<String>,
    body: Body<CourseTermRequest>,
) -> Result<Json<CourseTermDto>, Problem> {
    let Json(req) = body?;
    Ok(Json(services.course_terms.update(&id, req.into()).await?.into()))
}

pub async fn delete_course_term(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    services.course_terms.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Classes =====

pub async fn list_classes(
    Extension(services): Services,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<ClassDto>>, Problem> {
    let classes = match query.status {
        StatusFilter::All => services.classes.list_all().await?,
        StatusFilter::Active => services.classes.list_active().await?,
        StatusFilter::Inactive => services.classes.list_deleted().await?,
    };
    Ok(Json(list_of(classes)))
}

pub async fn get_class(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<ClassDto>, Problem> {
    Ok(Json(services.classes.get(&id).await?.into()))
}

pub async fn create_class(
    Extension(services): Services,
    body: Body<ClassRequest>,
) -> Result<(StatusCode, Json<ClassDto>), Problem> {
    let Json(req) = body?;
    let class = services.classes.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(class.into())))
}

pub async fn update_class(
    Extension(services): Services,
    Path(id): Path<String>,
    body: Body<ClassRequest>,
) -> Result<Json<ClassDto>, Problem> {
    let Json(req) = body?;
    Ok(Json(services.classes.update(&id, req.into()).await?.into()))
}

pub async fn delete_class(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    services.classes.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_class(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<ClassDto>, Problem> {
    Ok(Json(services.classes.restore(&id).await?.into()))
}

pub async fn purge_class(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    services.classes.hard_delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn count_classes(
    Extension(services): Services,
) -> Result<Json<StatusCountDto>, Problem> {
    Ok(Json(services.classes.count_by_status().await?.into()))
}

pub async fn class_student_count(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<CountDto>, Problem> {
    Ok(Json(CountDto {
        count: services.classes.count_students(&id).await?,
    }))
}

// ===== Majors =====

pub async fn list_majors(
    Extension(services): Services,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<MajorDto>>, Problem> {
    let majors = match (query.faculty_id.as_deref(), query.status) {
        (Some(faculty_id), _) => services.majors.list_by_faculty(faculty_id).await?,
        (None, StatusFilter::All) => services.majors.list_all().await?,
        (None, StatusFilter::Active) => services.majors.list_active().await?,
        (None, StatusFilter::Inactive) => services.majors.list_deleted().await?,
    };
    Ok(Json(list_of(majors)))
}

pub async fn get_major(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<MajorDto>, Problem> {
    Ok(Json(services.majors.get(&id).await?.into()))
}

pub async fn create_major(
    Extension(services): Services,
    body: Body<MajorRequest>,
) -> Result<(StatusCode, Json<MajorDto>), Problem> {
    let Json(req) = body?;
    let major = services.majors.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(major.into())))
}

pub async fn update_major(
    Extension(services): Services,
    Path(id): Path<String>,
    body: Body<MajorRequest>,
) -> Result<Json<MajorDto>, Problem> {
    let Json(req) = body?;
    Ok(Json(services.majors.update(&id, req.into()).await?.into()))
}

pub async fn delete_major(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    services.majors.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_major(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<MajorDto>, Problem> {
    Ok(Json(services.majors.restore(&id).await?.into()))
}

pub async fn purge_major(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    services.majors.hard_delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn major_statistics(
    Extension(services): Services,
    Path(id): Path<String>,
) -> Result<Json<MajorStatisticsDto>, Problem> {
    Ok(Json(services.majors.statistics(&id).await?.into()))
}
