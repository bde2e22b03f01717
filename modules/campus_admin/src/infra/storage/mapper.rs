//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity;
use crate::contract::{
    Activity, Assignment, Board, BoardKind, Class, Course, CourseTerm, DutyMember, DutyRole,
    Enrollment, EnrollmentKey, Faculty, Lecturer, Major, Member, Position, Section, Specialist,
};
use anyhow::anyhow;
use sea_orm::ActiveValue::Set;

// ===== Registration core =====

impl From<entity::enrollment::Model> for Enrollment {
    fn from(entity: entity::enrollment::Model) -> Self {
        Self {
            key: EnrollmentKey::new(entity.member_id, entity.section_id),
            course_id: entity.course_id,
            is_active: entity.is_active,
            enrolled_at: entity.enrolled_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Enrollment> for entity::enrollment::ActiveModel {
    fn from(model: &Enrollment) -> Self {
        Self {
            member_id: Set(model.key.member_id.clone()),
            section_id: Set(model.key.section_id.clone()),
            course_id: Set(model.course_id.clone()),
            is_active: Set(model.is_active),
            enrolled_at: Set(model.enrolled_at),
            updated_at: Set(model.updated_at),
        }
    }
}

/// Assignment rows carry ids only; display names come from the lookup tables
pub(crate) fn assignment_from_row(
    row: entity::assignment::Model,
    activity_name: Option<&str>,
    member_name: Option<&str>,
) -> anyhow::Result<Assignment> {
    let role = DutyRole::from_code(&row.role)
        .ok_or_else(|| anyhow!("unknown duty role '{}' on assignment {}", row.role, row.id))?;
    Ok(Assignment {
        id: row.id,
        activity_name: activity_name.unwrap_or(&row.activity_id).to_string(),
        member_name: member_name.unwrap_or(&row.member_id).to_string(),
        activity_id: row.activity_id,
        member_id: row.member_id,
        role,
        note: row.note,
        assigned_at: row.assigned_at,
        is_active: row.is_active,
    })
}

impl From<&Assignment> for entity::assignment::ActiveModel {
    fn from(model: &Assignment) -> Self {
        use sea_orm::ActiveValue::NotSet;

        Self {
            // Storage assigns ids for new rows
            id: if model.id == 0 { NotSet } else { Set(model.id) },
            activity_id: Set(model.activity_id.clone()),
            member_id: Set(model.member_id.clone()),
            role: Set(model.role.code().to_string()),
            note: Set(model.note.clone()),
            assigned_at: Set(model.assigned_at),
            is_active: Set(model.is_active),
        }
    }
}

// ===== Lookup tables =====

impl From<entity::member::Model> for Member {
    fn from(entity: entity::member::Model) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            email: entity.email,
            class_id: entity.class_id,
            is_active: entity.is_active,
        }
    }
}

impl From<&Member> for entity::member::ActiveModel {
    fn from(model: &Member) -> Self {
        Self {
            id: Set(model.id.clone()),
            full_name: Set(model.full_name.clone()),
            email: Set(model.email.clone()),
            class_id: Set(model.class_id.clone()),
            is_active: Set(model.is_active),
        }
    }
}

impl From<&Course> for entity::course::ActiveModel {
    fn from(model: &Course) -> Self {
        Self {
            id: Set(model.id.clone()),
            name: Set(model.name.clone()),
        }
    }
}

impl From<(entity::section::Model, Option<entity::course::Model>)> for Section {
    fn from((section, course): (entity::section::Model, Option<entity::course::Model>)) -> Self {
        Self {
            course_name: course.map(|c| c.name).unwrap_or_default(),
            id: section.id,
            course_id: section.course_id,
            group: section.group_label,
        }
    }
}

impl From<&Section> for entity::section::ActiveModel {
    fn from(model: &Section) -> Self {
        Self {
            id: Set(model.id.clone()),
            course_id: Set(model.course_id.clone()),
            group_label: Set(model.group.clone()),
        }
    }
}

impl From<entity::activity::Model> for Activity {
    fn from(entity: entity::activity::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            is_active: entity.is_active,
        }
    }
}

impl From<&Activity> for entity::activity::ActiveModel {
    fn from(model: &Activity) -> Self {
        Self {
            id: Set(model.id.clone()),
            name: Set(model.name.clone()),
            is_active: Set(model.is_active),
        }
    }
}

impl From<entity::duty_member::Model> for DutyMember {
    fn from(entity: entity::duty_member::Model) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            is_active: entity.is_active,
        }
    }
}

impl From<&DutyMember> for entity::duty_member::ActiveModel {
    fn from(model: &DutyMember) -> Self {
        Self {
            id: Set(model.id.clone()),
            full_name: Set(model.full_name.clone()),
            is_active: Set(model.is_active),
        }
    }
}

// ===== Organizational records =====

impl From<entity::faculty::Model> for Faculty {
    fn from(entity: entity::faculty::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            is_active: entity.is_active,
        }
    }
}

impl From<&Faculty> for entity::faculty::ActiveModel {
    fn from(model: &Faculty) -> Self {
        Self {
            id: Set(model.id.clone()),
            name: Set(model.name.clone()),
            is_active: Set(model.is_active),
        }
    }
}

impl TryFrom<entity::board::Model> for Board {
    type Error = anyhow::Error;

    fn try_from(entity: entity::board::Model) -> Result<Self, Self::Error> {
        let kind = BoardKind::from_code(&entity.kind)
            .ok_or_else(|| anyhow!("unknown board kind '{}' on board {}", entity.kind, entity.id))?;
        Ok(Self {
            id: entity.id,
            name: entity.name,
            kind,
            description: entity.description,
            faculty_id: entity.faculty_id,
            faculty_name: None,
            is_active: entity.is_active,
        })
    }
}

impl From<&Board> for entity::board::ActiveModel {
    fn from(model: &Board) -> Self {
        Self {
            id: Set(model.id.clone()),
            name: Set(model.name.clone()),
            kind: Set(model.kind.code().to_string()),
            description: Set(model.description.clone()),
            faculty_id: Set(model.faculty_id.clone()),
            is_active: Set(model.is_active),
        }
    }
}

impl From<entity::position::Model> for Position {
    fn from(entity: entity::position::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            unit: entity.unit,
            description: entity.description,
            display_order: entity.display_order,
            is_active: entity.is_active,
        }
    }
}

impl From<&Position> for entity::position::ActiveModel {
    fn from(model: &Position) -> Self {
        Self {
            id: Set(model.id.clone()),
            name: Set(model.name.clone()),
            unit: Set(model.unit.clone()),
            description: Set(model.description.clone()),
            display_order: Set(model.display_order),
            is_active: Set(model.is_active),
        }
    }
}

impl From<entity::specialist::Model> for Specialist {
    fn from(entity: entity::specialist::Model) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            email: entity.email,
            phone: entity.phone,
            title: entity.title,
            faculty_id: entity.faculty_id,
            faculty_name: None,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Specialist> for entity::specialist::ActiveModel {
    fn from(model: &Specialist) -> Self {
        Self {
            id: Set(model.id.clone()),
            full_name: Set(model.full_name.clone()),
            email: Set(model.email.clone()),
            phone: Set(model.phone.clone()),
            title: Set(model.title.clone()),
            faculty_id: Set(model.faculty_id.clone()),
            is_active: Set(model.is_active),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        }
    }
}

impl From<entity::lecturer::Model> for Lecturer {
    fn from(entity: entity::lecturer::Model) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            email: entity.email,
            faculty_id: entity.faculty_id,
            is_active: entity.is_active,
        }
    }
}

impl From<&Lecturer> for entity::lecturer::ActiveModel {
    fn from(model: &Lecturer) -> Self {
        Self {
            id: Set(model.id.clone()),
            full_name: Set(model.full_name.clone()),
            email: Set(model.email.clone()),
            faculty_id: Set(model.faculty_id.clone()),
            is_active: Set(model.is_active),
        }
    }
}

impl From<entity::course_term::Model> for CourseTerm {
    fn from(entity: entity::course_term::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            start_year: entity.start_year,
            end_year: entity.end_year,
            is_current: entity.is_current,
            is_active: entity.is_active,
        }
    }
}

impl From<&CourseTerm> for entity::course_term::ActiveModel {
    fn from(model: &CourseTerm) -> Self {
        Self {
            id: Set(model.id.clone()),
            name: Set(model.name.clone()),
            start_year: Set(model.start_year),
            end_year: Set(model.end_year),
            is_current: Set(model.is_current),
            is_active: Set(model.is_active),
        }
    }
}

impl From<entity::class::Model> for Class {
    fn from(entity: entity::class::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            major_id: entity.major_id,
            course_term_id: entity.course_term_id,
            is_active: entity.is_active,
        }
    }
}

impl From<&Class> for entity::class::ActiveModel {
    fn from(model: &Class) -> Self {
        Self {
            id: Set(model.id.clone()),
            name: Set(model.name.clone()),
            major_id: Set(model.major_id.clone()),
            course_term_id: Set(model.course_term_id.clone()),
            is_active: Set(model.is_active),
        }
    }
}

impl From<entity::major::Model> for Major {
    fn from(entity: entity::major::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            faculty_id: entity.faculty_id,
            faculty_name: None,
            is_active: entity.is_active,
            student_count: 0,
        }
    }
}

impl From<&Major> for entity::major::ActiveModel {
    fn from(model: &Major) -> Self {
        Self {
            id: Set(model.id.clone()),
            name: Set(model.name.clone()),
            faculty_id: Set(model.faculty_id.clone()),
            is_active: Set(model.is_active),
        }
    }
}
