//! Serializable payloads pushed to live-view subscribers

use crate::domain::recognition::SystemStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A face seen by a camera, recognized or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    pub camera_id: i64,
    /// Recognized member, `None` for unknown faces
    pub member_id: Option<String>,
    pub full_name: Option<String>,
    pub confidence: f64,
    pub bounding_box: Option<BoundingBox>,
    /// `IN` or `OUT`
    pub roi_type: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl FaceDetection {
    pub fn is_recognized(&self) -> bool {
        self.member_id.is_some()
    }
}

/// Attendance mark produced from a recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceUpdate {
    pub attendance_id: Option<i64>,
    pub member_id: String,
    pub full_name: Option<String>,
    pub section_id: Option<String>,
    pub room_id: Option<String>,
    /// `CO_MAT`, `VANG_MAT` or `DI_TRE`
    pub status: String,
    pub confidence: Option<f64>,
    pub camera_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraStatusEvent {
    pub camera_id: i64,
    /// `ONLINE`, `OFFLINE`, `ERROR` or `STREAMING`
    pub status: String,
    pub message: Option<String>,
    pub camera_name: Option<String>,
    pub room_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl CameraStatusEvent {
    pub fn new(camera_id: i64, status: impl Into<String>) -> Self {
        Self {
            camera_id,
            status: status.into(),
            message: None,
            camera_name: None,
            room_id: None,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiPoint {
    pub x: f64,
    pub y: f64,
}

/// Region of interest drawn over a camera frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiPolygon {
    pub points: Vec<RoiPoint>,
    /// `IN` or `OUT`
    pub kind: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiUpdateEvent {
    pub camera_id: i64,
    pub roi: RoiPolygon,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemNotification {
    pub message: String,
    pub level: NotificationLevel,
    /// `SYSTEM`, `RECOGNITION`, `CAMERA` or `USER`
    pub source: Option<String>,
    pub related_entity_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Wire form of [`SystemStatus`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatusPayload {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub cameras: BTreeMap<String, CameraStatusEntry>,
    pub services: BTreeMap<String, String>,
    pub total_active_students: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraStatusEntry {
    pub name: String,
    pub active: bool,
}

impl From<&SystemStatus> for SystemStatusPayload {
    fn from(status: &SystemStatus) -> Self {
        Self {
            status: status.status.code().to_string(),
            timestamp: status.timestamp,
            cameras: status
                .cameras
                .iter()
                .map(|(key, cam)| {
                    (
                        key.clone(),
                        CameraStatusEntry {
                            name: cam.name.clone(),
                            active: cam.active,
                        },
                    )
                })
                .collect(),
            services: status
                .services
                .iter()
                .map(|(name, state)| (name.clone(), state.code().to_string()))
                .collect(),
            total_active_students: status.total_active_students,
        }
    }
}
