//! Live-view broadcasts on the fixed global topics

use super::hub::TopicHub;
use super::payload::{
    AttendanceUpdate, CameraStatusEvent, FaceDetection, RoiPolygon, RoiUpdateEvent,
    SystemStatusPayload,
};
use crate::domain::recognition::SystemStatus;
use chrono::Utc;

pub const FACE_DETECTIONS_TOPIC: &str = "/topic/face-detections";
pub const ATTENDANCE_UPDATES_TOPIC: &str = "/topic/attendance-updates";
pub const CAMERA_STATUS_TOPIC: &str = "/topic/camera-status";
pub const ROI_UPDATES_TOPIC: &str = "/topic/roi-updates";
pub const SYSTEM_STATUS_TOPIC: &str = "/topic/system-status";

/// Pushes recognition results and camera state to every live-view client
#[derive(Debug, Clone)]
pub struct LiveBroadcaster {
    hub: TopicHub,
}

impl LiveBroadcaster {
    pub fn new(hub: TopicHub) -> Self {
        Self { hub }
    }

    pub fn broadcast_face_detection(&self, detection: &FaceDetection) {
        self.hub.publish(FACE_DETECTIONS_TOPIC, detection);
        tracing::debug!(member_id = ?detection.member_id, "face detection broadcast");
    }

    pub fn broadcast_attendance_update(&self, update: &AttendanceUpdate) {
        self.hub.publish(ATTENDANCE_UPDATES_TOPIC, update);
        tracing::debug!(member_id = %update.member_id, "attendance update broadcast");
    }

    pub fn broadcast_camera_status(&self, camera_id: i64, status: &str) {
        self.hub
            .publish(CAMERA_STATUS_TOPIC, &CameraStatusEvent::new(camera_id, status));
        tracing::debug!(camera_id, status, "camera status broadcast");
    }

    pub fn broadcast_roi_update(&self, camera_id: i64, roi: RoiPolygon) {
        let event = RoiUpdateEvent {
            camera_id,
            roi,
            timestamp: Utc::now(),
        };
        self.hub.publish(ROI_UPDATES_TOPIC, &event);
        tracing::debug!(camera_id, "ROI update broadcast");
    }

    pub fn broadcast_system_status(&self, status: &SystemStatus) {
        self.hub
            .publish(SYSTEM_STATUS_TOPIC, &SystemStatusPayload::from(status));
        tracing::debug!(status = status.status.code(), "system status broadcast");
    }
}
