//! Domain events for the registration core
//!
//! Events are emitted after a successful registry or registrar write:
//! - Enrollment changes go to the `enrollments` channel
//! - Assignment changes go to the `assignments` channel
//!
//! Delivery is best-effort. A publisher failure is logged by the caller and
//! never fails the write that produced the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of change carried by a [`ChangeEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A member/section link was created, reactivated or deactivated
    EnrollmentChanged,
    /// An activity/duty member link was created or deactivated
    AssignmentChanged,
}

/// Change notification payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Change kind
    pub kind: ChangeKind,
    /// Member (student or duty member) affected by the change
    pub member_id: String,
    /// Section id for enrollment changes, activity id for assignment changes
    pub section_or_activity_id: String,
    /// Time of the change
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    /// Create an enrollment change event
    pub fn enrollment(member_id: &str, section_id: &str) -> Self {
        Self {
            kind: ChangeKind::EnrollmentChanged,
            member_id: member_id.to_string(),
            section_or_activity_id: section_id.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Create an assignment change event
    pub fn assignment(member_id: &str, activity_id: &str) -> Self {
        Self {
            kind: ChangeKind::AssignmentChanged,
            member_id: member_id.to_string(),
            section_or_activity_id: activity_id.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Event publisher trait for publishing change notifications
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one change event
    async fn publish(&self, event: ChangeEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ChangeEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Publish and swallow the error, logging it
pub(crate) async fn publish_best_effort(publisher: &dyn EventPublisher, event: ChangeEvent) {
    let kind = event.kind;
    if let Err(e) = publisher.publish(event).await {
        tracing::warn!(?kind, error = %e, "failed to publish change event");
    }
}
