//! Room-scoped and recognition-client broadcasts

use super::hub::TopicHub;
use super::payload::{
    AttendanceUpdate, CameraStatusEvent, FaceDetection, NotificationLevel, SystemNotification,
};
use chrono::Utc;
use serde_json::{Map, Value};

pub const RECOGNITION_CAMERA_STATUS_TOPIC: &str = "/topic/flask/camera-status";
pub const SYSTEM_NOTIFICATIONS_TOPIC: &str = "/topic/system/notifications";

fn room_topic(room_id: &str, channel: &str) -> String {
    format!("/topic/room/{}/{}", room_id, channel)
}

/// Sends events to the subscribers of a single room
#[derive(Debug, Clone)]
pub struct RoomEventDispatcher {
    hub: TopicHub,
}

impl RoomEventDispatcher {
    pub fn new(hub: TopicHub) -> Self {
        Self { hub }
    }

    pub fn send_face_detection(&self, room_id: &str, detection: &FaceDetection) {
        self.hub
            .publish(&room_topic(room_id, "face-detections"), detection);
        tracing::debug!(room_id, "face detection sent to room");
    }

    pub fn send_attendance(&self, room_id: &str, update: &AttendanceUpdate) {
        self.hub.publish(&room_topic(room_id, "attendance"), update);
        tracing::debug!(room_id, "attendance sent to room");
    }

    /// Free-form counters for the room dashboard
    pub fn send_live_statistics(&self, room_id: &str, stats: &Map<String, Value>) {
        self.hub.publish(&room_topic(room_id, "statistics"), stats);
        tracing::debug!(room_id, "live statistics sent to room");
    }

    /// Camera status for the recognition client processes
    pub fn send_camera_status_to_recognizer(&self, event: &CameraStatusEvent) {
        self.hub.publish(RECOGNITION_CAMERA_STATUS_TOPIC, event);
        tracing::debug!(camera_id = event.camera_id, "camera status sent to recognizer");
    }

    pub fn send_system_notification(&self, message: &str, level: NotificationLevel) {
        let notification = SystemNotification {
            message: message.to_string(),
            level,
            source: Some("SYSTEM".to_string()),
            related_entity_id: None,
            timestamp: Utc::now(),
        };
        self.hub.publish(SYSTEM_NOTIFICATIONS_TOPIC, &notification);
        tracing::debug!(?level, message, "system notification sent");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_statistics_go_to_room_topic() {
        let hub = TopicHub::new(8);
        let mut room_a = hub.subscribe("/topic/room/A101/statistics");
        let mut room_b = hub.subscribe("/topic/room/B202/statistics");

        let mut stats = Map::new();
        stats.insert("present".to_string(), json!(12));
        RoomEventDispatcher::new(hub).send_live_statistics("A101", &stats);

        assert_eq!(room_a.recv().await.expect("room A").payload["present"], 12);
        assert!(room_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_notification_level_is_uppercase() {
        let hub = TopicHub::new(8);
        let mut rx = hub.subscribe(SYSTEM_NOTIFICATIONS_TOPIC);
        RoomEventDispatcher::new(hub).send_system_notification("camera 2 offline", NotificationLevel::Warning);

        let msg = rx.recv().await.expect("notification");
        assert_eq!(msg.payload["level"], "WARNING");
        assert_eq!(msg.payload["message"], "camera 2 offline");
    }
}
