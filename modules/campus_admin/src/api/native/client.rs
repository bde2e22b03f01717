//! Native client implementation - wraps domain services for in-process calls

use crate::contract::{
    Assignment, AssignmentApi, CampusError, DutyRole, Enrollment, EnrollmentApi, Member,
};
use crate::domain::{AssignmentRegistrar, EnrollmentRegistry};
use async_trait::async_trait;
use std::sync::Arc;

/// Native client that calls the registration services directly
#[derive(Clone)]
pub struct NativeClient {
    registry: Arc<EnrollmentRegistry>,
    registrar: Arc<AssignmentRegistrar>,
}

impl NativeClient {
    pub fn new(registry: Arc<EnrollmentRegistry>, registrar: Arc<AssignmentRegistrar>) -> Self {
        Self {
            registry,
            registrar,
        }
    }
}

#[async_trait]
impl EnrollmentApi for NativeClient {
    async fn list_by_member(&self, member_id: &str) -> Result<Vec<Enrollment>, CampusError> {
        self.registry.list_by_member(member_id).await
    }

    async fn list_by_section(&self, section_id: &str) -> Result<Vec<Enrollment>, CampusError> {
        self.registry.list_by_section(section_id).await
    }

    async fn register(&self, member_id: &str, section_id: &str) -> Result<Enrollment, CampusError> {
        self.registry.register(member_id, section_id).await
    }

    async fn unenroll(&self, member_id: &str, section_id: &str) -> Result<(), CampusError> {
        self.registry.unenroll(member_id, section_id).await
    }

    async fn transfer(
        &self,
        member_id: &str,
        from_section_id: &str,
        to_section_id: &str,
    ) -> Result<Enrollment, CampusError> {
        self.registry
            .transfer(member_id, from_section_id, to_section_id)
            .await
    }

    async fn list_eligible_members(&self, section_id: &str) -> Result<Vec<Member>, CampusError> {
        self.registry.list_eligible_members(section_id).await
    }
}

#[async_trait]
impl AssignmentApi for NativeClient {
    async fn assign(
        &self,
        activity_id: &str,
        member_ids: &[String],
        role: Option<DutyRole>,
        note: Option<String>,
    ) -> Result<Vec<Assignment>, CampusError> {
        self.registrar.assign(activity_id, member_ids, role, note).await
    }

    async fn unassign(&self, activity_id: &str, member_id: &str) -> Result<(), CampusError> {
        self.registrar.unassign(activity_id, member_id).await
    }

    async fn list_by_activity(&self, activity_id: &str) -> Result<Vec<Assignment>, CampusError> {
        self.registrar.list_by_activity(activity_id).await
    }

    async fn list_by_member(&self, member_id: &str) -> Result<Vec<Assignment>, CampusError> {
        self.registrar.list_by_member(member_id).await
    }
}
