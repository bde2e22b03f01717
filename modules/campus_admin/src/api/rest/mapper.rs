//! Conversions between contract models and REST DTOs

use super::dto::*;
use crate::contract::{
    Assignment, Board, BoardKind, BoardPatch, CampusError, Class, CourseTerm, DutyRole, Enrollment,
    Faculty, Lecturer, Major, MajorStatistics, Member, Position, PositionPatch, Specialist,
    SpecialistPatch, StatusCount,
};
use crate::domain::catalog::{BoardStatistics, PositionStatistics, SpecialistStatistics};
use crate::domain::recognition::{RecognitionClientConfig, SystemStatus};
use chrono::Utc;

// ===== Contract -> DTO =====

impl From<Enrollment> for EnrollmentDto {
    fn from(e: Enrollment) -> Self {
        Self {
            member_id: e.key.member_id,
            section_id: e.key.section_id,
            course_id: e.course_id,
            is_active: e.is_active,
            enrolled_at: e.enrolled_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<Member> for MemberDto {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            email: m.email,
            class_id: m.class_id,
            is_active: m.is_active,
        }
    }
}

impl From<Assignment> for AssignmentDto {
    fn from(a: Assignment) -> Self {
        Self {
            id: a.id,
            activity_id: a.activity_id,
            activity_name: a.activity_name,
            member_id: a.member_id,
            member_name: a.member_name,
            role: a.role.code().to_string(),
            note: a.note,
            assigned_at: a.assigned_at,
            is_active: a.is_active,
        }
    }
}

impl From<Faculty> for FacultyDto {
    fn from(f: Faculty) -> Self {
        Self {
            id: f.id,
            name: f.name,
            is_active: f.is_active,
        }
    }
}

impl From<Board> for BoardDto {
    fn from(b: Board) -> Self {
        Self {
            id: b.id,
            name: b.name,
            kind: b.kind.code().to_string(),
            description: b.description,
            faculty_id: b.faculty_id,
            faculty_name: b.faculty_name,
            is_active: b.is_active,
        }
    }
}

impl From<BoardStatistics> for BoardStatisticsDto {
    fn from(s: BoardStatistics) -> Self {
        Self {
            total: s.total,
            by_kind: s
                .by_kind
                .into_iter()
                .map(|(kind, count)| (kind.code().to_string(), count))
                .collect(),
        }
    }
}

impl From<Position> for PositionDto {
    fn from(p: Position) -> Self {
        Self {
            id: p.id,
            name: p.name,
            unit: p.unit,
            description: p.description,
            display_order: p.display_order,
            is_active: p.is_active,
        }
    }
}

impl From<PositionStatistics> for PositionStatisticsDto {
    fn from(s: PositionStatistics) -> Self {
        Self {
            total: s.total,
            by_unit: s.by_unit,
        }
    }
}

impl From<Specialist> for SpecialistDto {
    fn from(s: Specialist) -> Self {
        Self {
            id: s.id,
            full_name: s.full_name,
            email: s.email,
            phone: s.phone,
            title: s.title,
            faculty_id: s.faculty_id,
            faculty_name: s.faculty_name,
            is_active: s.is_active,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<SpecialistStatistics> for SpecialistStatisticsDto {
    fn from(s: SpecialistStatistics) -> Self {
        Self {
            total: s.total,
            active: s.active,
            inactive: s.inactive,
            by_faculty: s.by_faculty,
        }
    }
}

impl From<Lecturer> for LecturerDto {
    fn from(l: Lecturer) -> Self {
        Self {
            id: l.id,
            full_name: l.full_name,
            email: l.email,
            faculty_id: l.faculty_id,
            is_active: l.is_active,
        }
    }
}

impl From<CourseTerm> for CourseTermDto {
    fn from(t: CourseTerm) -> Self {
        Self {
            id: t.id,
            name: t.name,
            start_year: t.start_year,
            end_year: t.end_year,
            is_current: t.is_current,
            is_active: t.is_active,
        }
    }
}

impl From<Class> for ClassDto {
    fn from(c: Class) -> Self {
        Self {
            id: c.id,
            name: c.name,
            major_id: c.major_id,
            course_term_id: c.course_term_id,
            is_active: c.is_active,
        }
    }
}

impl From<Major> for MajorDto {
    fn from(m: Major) -> Self {
        Self {
            id: m.id,
            name: m.name,
            faculty_id: m.faculty_id,
            faculty_name: m.faculty_name,
            is_active: m.is_active,
            student_count: m.student_count,
        }
    }
}

impl From<MajorStatistics> for MajorStatisticsDto {
    fn from(s: MajorStatistics) -> Self {
        Self {
            major: s.major.into(),
            active_students: s.active_students,
            total_students: s.total_students,
            active_classes: s.active_classes,
        }
    }
}

impl From<StatusCount> for StatusCountDto {
    fn from(c: StatusCount) -> Self {
        Self {
            active: c.active,
            inactive: c.inactive,
            total: c.total(),
        }
    }
}

impl From<SystemStatus> for SystemStatusDto {
    fn from(s: SystemStatus) -> Self {
        Self {
            status: s.status.code().to_string(),
            timestamp: s.timestamp,
            cameras: s
                .cameras
                .into_iter()
                .map(|(key, cam)| {
                    (
                        key,
                        CameraStatusDto {
                            name: cam.name,
                            active: cam.active,
                        },
                    )
                })
                .collect(),
            services: s
                .services
                .into_iter()
                .map(|(name, state)| (name, state.code().to_string()))
                .collect(),
            total_active_students: s.total_active_students,
        }
    }
}

impl From<RecognitionClientConfig> for RecognitionConfigDto {
    fn from(c: RecognitionClientConfig) -> Self {
        Self {
            backend_api_url: c.backend_api_url,
            websocket_url: c.websocket_url,
            settings: RecognitionSettingsDto {
                recognition_threshold: c.settings.recognition_threshold,
                detection_threshold: c.settings.detection_threshold,
                min_face_size: c.settings.min_face_size,
                max_face_size: c.settings.max_face_size,
                enable_age_gender_detection: c.settings.enable_age_gender_detection,
                tracking_buffer_size: c.settings.tracking_buffer_size,
            },
            system_status: c.system_status.into(),
            max_concurrent_streams: c.max_concurrent_streams,
            frame_processing_interval: c.frame_processing_interval,
        }
    }
}

// ===== DTO -> Contract =====

pub fn parse_board_kind(code: &str) -> Result<BoardKind, CampusError> {
    BoardKind::from_code(code)
        .ok_or_else(|| CampusError::invalid_input(format!("unknown board kind: {}", code)))
}

pub fn parse_duty_role(code: Option<&str>) -> Result<Option<DutyRole>, CampusError> {
    code.map(|c| {
        DutyRole::from_code(c)
            .ok_or_else(|| CampusError::invalid_input(format!("unknown duty role: {}", c)))
    })
    .transpose()
}

impl From<CreateFacultyRequest> for Faculty {
    fn from(req: CreateFacultyRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            is_active: true,
        }
    }
}

impl TryFrom<CreateBoardRequest> for Board {
    type Error = CampusError;

    fn try_from(req: CreateBoardRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: parse_board_kind(&req.kind)?,
            id: req.id,
            name: req.name,
            description: req.description,
            faculty_id: req.faculty_id,
            faculty_name: None,
            is_active: true,
        })
    }
}

impl TryFrom<UpdateBoardRequest> for BoardPatch {
    type Error = CampusError;

    fn try_from(req: UpdateBoardRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: req.kind.as_deref().map(parse_board_kind).transpose()?,
            name: req.name,
            description: req.description,
            faculty_id: req.faculty_id,
            is_active: req.is_active,
        })
    }
}

impl From<CreatePositionRequest> for Position {
    fn from(req: CreatePositionRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            unit: req.unit,
            description: req.description,
            display_order: req.display_order,
            is_active: true,
        }
    }
}

impl From<UpdatePositionRequest> for PositionPatch {
    fn from(req: UpdatePositionRequest) -> Self {
        Self {
            name: req.name,
            unit: req.unit,
            description: req.description,
            display_order: req.display_order,
            is_active: req.is_active,
        }
    }
}

impl From<CreateSpecialistRequest> for Specialist {
    fn from(req: CreateSpecialistRequest) -> Self {
        let now = Utc::now();
        Self {
            id: req.id,
            full_name: req.full_name,
            email: req.email,
            phone: req.phone,
            title: req.title,
            faculty_id: req.faculty_id,
            faculty_name: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<UpdateSpecialistRequest> for SpecialistPatch {
    fn from(req: UpdateSpecialistRequest) -> Self {
        Self {
            full_name: req.full_name,
            email: req.email,
            phone: req.phone,
            title: req.title,
            faculty_id: req.faculty_id,
            is_active: req.is_active,
        }
    }
}

impl From<CreateLecturerRequest> for Lecturer {
    fn from(req: CreateLecturerRequest) -> Self {
        Self {
            id: req.id,
            full_name: req.full_name,
            email: req.email,
            faculty_id: req.faculty_id,
            is_active: true,
        }
    }
}

/// Path id wins over any body id on updates
pub fn lecturer_from_update(id: &str, req: UpdateLecturerRequest) -> Lecturer {
    Lecturer {
        id: id.to_string(),
        full_name: req.full_name,
        email: req.email,
        faculty_id: req.faculty_id,
        is_active: req.is_active,
    }
}

impl From<CourseTermRequest> for CourseTerm {
    fn from(req: CourseTermRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            start_year: req.start_year,
            end_year: req.end_year,
            is_current: req.is_current,
            is_active: req.is_active,
        }
    }
}

impl From<ClassRequest> for Class {
    fn from(req: ClassRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            major_id: req.major_id,
            course_term_id: req.course_term_id,
            is_active: req.is_active,
        }
    }
}

impl From<MajorRequest> for Major {
    fn from(req: MajorRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            faculty_id: req.faculty_id,
            faculty_name: None,
            is_active: req.is_active,
            student_count: 0,
        }
    }
}
