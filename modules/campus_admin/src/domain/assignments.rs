//! Duty-assignment registrar - batch assignment of monitors to activities

use super::events::{publish_best_effort, ChangeEvent, EventPublisher};
use super::locks::KeyedLocks;
use super::repository::{AssignmentRepository, DutyDirectory};
use crate::contract::{Activity, Assignment, CampusError, DutyRole};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

/// Domain service assigning duty members to activities
///
/// A batch is all-or-nothing: every member id is validated before a single
/// transactional insert, so a rejected call leaves no assignment behind.
pub struct AssignmentRegistrar {
    directory: Arc<dyn DutyDirectory>,
    assignments: Arc<dyn AssignmentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    activity_locks: KeyedLocks,
}

impl AssignmentRegistrar {
    pub fn new(
        directory: Arc<dyn DutyDirectory>,
        assignments: Arc<dyn AssignmentRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            directory,
            assignments,
            event_publisher,
            activity_locks: KeyedLocks::new(),
        }
    }

    /// Assign every member in `member_ids` to the activity
    ///
    /// Repeated ids count once. `role` defaults to [`DutyRole::Primary`].
    pub async fn assign(
        &self,
        activity_id: &str,
        member_ids: &[String],
        role: Option<DutyRole>,
        note: Option<String>,
    ) -> Result<Vec<Assignment>, CampusError> {
        let _guard = self.activity_locks.acquire(activity_id).await;

        let activity = self.require_activity(activity_id).await?;

        let mut seen = HashSet::new();
        let ids: Vec<&str> = member_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty() && seen.insert(*id))
            .collect();
        if ids.is_empty() {
            return Err(CampusError::invalid_input("member list must not be empty"));
        }

        let role = role.unwrap_or_default();
        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let now = Utc::now();

        let mut batch = Vec::with_capacity(ids.len());
        for member_id in ids {
            let member = self
                .directory
                .find_duty_member(member_id)
                .await
                .map_err(CampusError::storage)?
                .ok_or_else(|| CampusError::not_found("duty member", member_id))?;

            if self
                .assignments
                .exists_active(activity_id, member_id)
                .await
                .map_err(CampusError::storage)?
            {
                return Err(CampusError::conflict(format!(
                    "duty member {} is already assigned to activity {}",
                    member_id, activity_id
                )));
            }

            batch.push(Assignment {
                id: 0,
                activity_id: activity.id.clone(),
                activity_name: activity.name.clone(),
                member_id: member.id,
                member_name: member.full_name,
                role,
                note: note.clone(),
                assigned_at: now,
                is_active: true,
            });
        }

        let saved = self
            .assignments
            .insert_batch(&batch)
            .await
            .map_err(CampusError::storage)?;

        tracing::info!(
            activity_id,
            count = saved.len(),
            role = role.code(),
            "duty members assigned"
        );
        for assignment in &saved {
            publish_best_effort(
                self.event_publisher.as_ref(),
                ChangeEvent::assignment(&assignment.member_id, activity_id),
            )
            .await;
        }
        Ok(saved)
    }

    /// Deactivate the assignment of one member
    pub async fn unassign(&self, activity_id: &str, member_id: &str) -> Result<(), CampusError> {
        let _guard = self.activity_locks.acquire(activity_id).await;

        let removed = self
            .assignments
            .deactivate(activity_id, member_id)
            .await
            .map_err(CampusError::storage)?;
        if !removed {
            return Err(CampusError::not_found(
                "assignment",
                format!("{}/{}", activity_id, member_id),
            ));
        }

        tracing::info!(activity_id, member_id, "duty member unassigned");
        publish_best_effort(
            self.event_publisher.as_ref(),
            ChangeEvent::assignment(member_id, activity_id),
        )
        .await;
        Ok(())
    }

    /// Active assignments of an activity, ordered by member display name
    pub async fn list_by_activity(&self, activity_id: &str) -> Result<Vec<Assignment>, CampusError> {
        let mut items = self
            .assignments
            .list_active_by_activity(activity_id)
            .await
            .map_err(CampusError::storage)?;
        items.sort_by(|a, b| {
            a.member_name
                .cmp(&b.member_name)
                .then_with(|| a.member_id.cmp(&b.member_id))
        });
        Ok(items)
    }

    /// Active assignments of a duty member, ordered by activity id
    pub async fn list_by_member(&self, member_id: &str) -> Result<Vec<Assignment>, CampusError> {
        let mut items = self
            .assignments
            .list_active_by_member(member_id)
            .await
            .map_err(CampusError::storage)?;
        items.sort_by(|a, b| a.activity_id.cmp(&b.activity_id).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn require_activity(&self, activity_id: &str) -> Result<Activity, CampusError> {
        self.directory
            .find_activity(activity_id)
            .await
            .map_err(CampusError::storage)?
            .ok_or_else(|| CampusError::not_found("activity", activity_id))
    }
}
