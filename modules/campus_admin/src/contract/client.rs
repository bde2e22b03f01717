//! Native client traits for inter-module communication
//!
//! These traits define the API that other modules use to drive the
//! registration core. NO HTTP - direct function calls.

use super::{
    error::CampusError,
    model::{Assignment, DutyRole, Enrollment, Member},
};
use async_trait::async_trait;

/// Enrollment registry API
#[async_trait]
pub trait EnrollmentApi: Send + Sync {
    /// All enrollments of a member, ordered by section id
    async fn list_by_member(&self, member_id: &str) -> Result<Vec<Enrollment>, CampusError>;

    /// All enrollments of a section, ordered by member display name
    async fn list_by_section(&self, section_id: &str) -> Result<Vec<Enrollment>, CampusError>;

    /// Enroll a member into a section
    async fn register(&self, member_id: &str, section_id: &str) -> Result<Enrollment, CampusError>;

    /// Deactivate an active enrollment
    async fn unenroll(&self, member_id: &str, section_id: &str) -> Result<(), CampusError>;

    /// Move a member between two sections of the same course, atomically
    async fn transfer(
        &self,
        member_id: &str,
        from_section_id: &str,
        to_section_id: &str,
    ) -> Result<Enrollment, CampusError>;

    /// Active members not yet enrolled in the section's course
    async fn list_eligible_members(&self, section_id: &str) -> Result<Vec<Member>, CampusError>;
}

/// Duty-assignment API
#[async_trait]
pub trait AssignmentApi: Send + Sync {
    /// Assign a set of duty members to an activity, all or nothing
    async fn assign(
        &self,
        activity_id: &str,
        member_ids: &[String],
        role: Option<DutyRole>,
        note: Option<String>,
    ) -> Result<Vec<Assignment>, CampusError>;

    /// Deactivate one assignment
    async fn unassign(&self, activity_id: &str, member_id: &str) -> Result<(), CampusError>;

    /// Active assignments of an activity
    async fn list_by_activity(&self, activity_id: &str) -> Result<Vec<Assignment>, CampusError>;

    /// Active assignments of a duty member
    async fn list_by_member(&self, member_id: &str) -> Result<Vec<Assignment>, CampusError>;
}
