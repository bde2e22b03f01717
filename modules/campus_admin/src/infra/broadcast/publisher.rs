use super::hub::TopicHub;
use crate::domain::events::{ChangeEvent, ChangeKind, EventPublisher};

pub const ENROLLMENTS_TOPIC: &str = "/topic/enrollments";
pub const ASSIGNMENTS_TOPIC: &str = "/topic/assignments";

/// Domain event publisher backed by the topic hub
#[derive(Debug, Clone)]
pub struct BroadcastEventPublisher {
    hub: TopicHub,
}

impl BroadcastEventPublisher {
    pub fn new(hub: TopicHub) -> Self {
        Self { hub }
    }
}

#[async_trait::async_trait]
impl EventPublisher for BroadcastEventPublisher {
    async fn publish(&self, event: ChangeEvent) -> anyhow::Result<()> {
        let topic = match event.kind {
            ChangeKind::EnrollmentChanged => ENROLLMENTS_TOPIC,
            ChangeKind::AssignmentChanged => ASSIGNMENTS_TOPIC,
        };
        self.hub.publish(topic, &event);
        Ok(())
    }
}
