//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Activity, Assignment, Board, Class, CourseTerm, DutyMember, Enrollment, EnrollmentKey,
    Faculty, Lecturer, Major, Member, Position, Section, Specialist,
};
use anyhow::Result;
use async_trait::async_trait;

// ===== Lookup stores (populated elsewhere, read-only here) =====

/// Members, sections and courses referenced by the enrollment registry
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Find a member by id
    async fn find_member(&self, member_id: &str) -> Result<Option<Member>>;

    /// List every member, active or not
    async fn list_members(&self) -> Result<Vec<Member>>;

    /// Find a section by id, with its course resolved
    async fn find_section(&self, section_id: &str) -> Result<Option<Section>>;
}

/// Activities and duty members referenced by the assignment registrar
#[async_trait]
pub trait DutyDirectory: Send + Sync {
    /// Find an activity by id
    async fn find_activity(&self, activity_id: &str) -> Result<Option<Activity>>;

    /// Find a duty member by id
    async fn find_duty_member(&self, member_id: &str) -> Result<Option<DutyMember>>;
}

// ===== Registration core =====

/// Repository for member/section links
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Find a link by composite key, active or not
    async fn find(&self, key: &EnrollmentKey) -> Result<Option<Enrollment>>;

    /// All links of a member
    async fn list_by_member(&self, member_id: &str) -> Result<Vec<Enrollment>>;

    /// All links of a section
    async fn list_by_section(&self, section_id: &str) -> Result<Vec<Enrollment>>;

    /// The active link of a member inside a course, if any
    ///
    /// Matches on the course stored with the link when it was registered.
    /// Sections are read-only here, so that course cannot drift from the
    /// section's; a section moved between courses externally needs its links
    /// rewritten too.
    async fn find_active_in_course(
        &self,
        member_id: &str,
        course_id: &str,
    ) -> Result<Option<Enrollment>>;

    /// Ids of members holding an active link in a course
    async fn active_member_ids_in_course(&self, course_id: &str) -> Result<Vec<String>>;

    /// Insert the link or reactivate an existing row with the same key
    async fn activate(&self, enrollment: &Enrollment) -> Result<Enrollment>;

    /// Deactivate an active link; returns false when no active link matched
    async fn deactivate(&self, key: &EnrollmentKey) -> Result<bool>;

    /// Deactivate `from` and activate `to` in one atomic unit
    ///
    /// Either both changes are committed or neither is.
    async fn transfer(&self, from: &EnrollmentKey, to: &Enrollment) -> Result<Enrollment>;
}

/// Repository for activity/duty member links
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Active assignments of an activity
    async fn list_active_by_activity(&self, activity_id: &str) -> Result<Vec<Assignment>>;

    /// Active assignments of a duty member
    async fn list_active_by_member(&self, member_id: &str) -> Result<Vec<Assignment>>;

    /// Whether the member currently holds an active assignment for the activity
    async fn exists_active(&self, activity_id: &str, member_id: &str) -> Result<bool>;

    /// Insert every assignment in one atomic unit, returning rows with ids set
    async fn insert_batch(&self, assignments: &[Assignment]) -> Result<Vec<Assignment>>;

    /// Deactivate the active assignment; returns false when none matched
    async fn deactivate(&self, activity_id: &str, member_id: &str) -> Result<bool>;
}

// ===== Organizational records =====

#[async_trait]
pub trait FacultyRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Faculty>>;
    async fn find(&self, id: &str) -> Result<Option<Faculty>>;
    async fn save(&self, faculty: &Faculty) -> Result<Faculty>;
}

#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// All boards, active or not; faculty names are left unresolved
    async fn list(&self) -> Result<Vec<Board>>;
    async fn find(&self, id: &str) -> Result<Option<Board>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Board>>;
    /// Insert or update by id
    async fn save(&self, board: &Board) -> Result<Board>;
}

#[async_trait]
pub trait PositionRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Position>>;
    async fn find(&self, id: &str) -> Result<Option<Position>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Position>>;
    async fn save(&self, position: &Position) -> Result<Position>;
}

#[async_trait]
pub trait SpecialistRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Specialist>>;
    async fn find(&self, id: &str) -> Result<Option<Specialist>>;
    /// Case-insensitive email lookup
    async fn find_by_email(&self, email: &str) -> Result<Option<Specialist>>;
    async fn save(&self, specialist: &Specialist) -> Result<Specialist>;
}

#[async_trait]
pub trait LecturerRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Lecturer>>;
    async fn find(&self, id: &str) -> Result<Option<Lecturer>>;
    /// Case-insensitive email lookup
    async fn find_by_email(&self, email: &str) -> Result<Option<Lecturer>>;
    async fn save(&self, lecturer: &Lecturer) -> Result<Lecturer>;
}

#[async_trait]
pub trait CourseTermRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<CourseTerm>>;
    async fn find(&self, id: &str) -> Result<Option<CourseTerm>>;
    async fn save(&self, term: &CourseTerm) -> Result<CourseTerm>;
    /// Remove the row; returns false when nothing was deleted
    async fn delete(&self, id: &str) -> Result<bool>;
}

#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Class>>;
    async fn find(&self, id: &str) -> Result<Option<Class>>;
    async fn save(&self, class: &Class) -> Result<Class>;
    /// Remove the row; returns false when nothing was deleted
    async fn delete(&self, id: &str) -> Result<bool>;
}

#[async_trait]
pub trait MajorRepository: Send + Sync {
    /// All majors; faculty name and student count are filled by the service
    async fn list(&self) -> Result<Vec<Major>>;
    async fn find(&self, id: &str) -> Result<Option<Major>>;
    async fn save(&self, major: &Major) -> Result<Major>;
    /// Remove the row; returns false when nothing was deleted
    async fn delete(&self, id: &str) -> Result<bool>;
}
