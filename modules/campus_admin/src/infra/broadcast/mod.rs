//! In-process topic broadcasting
//!
//! Payloads are serialized to JSON once and fanned out to every subscriber of
//! the topic. A topic without subscribers silently drops messages.

mod hub;
mod live;
mod payload;
mod publisher;
mod rooms;

pub use hub::{TopicHub, TopicMessage};
pub use live::{
    LiveBroadcaster, ATTENDANCE_UPDATES_TOPIC, CAMERA_STATUS_TOPIC, FACE_DETECTIONS_TOPIC,
    ROI_UPDATES_TOPIC, SYSTEM_STATUS_TOPIC,
};
pub use payload::{
    AttendanceUpdate, BoundingBox, CameraStatusEntry, CameraStatusEvent, FaceDetection, NotificationLevel, RoiPoint,
    RoiPolygon, RoiUpdateEvent, SystemNotification, SystemStatusPayload,
};
pub use publisher::{BroadcastEventPublisher, ASSIGNMENTS_TOPIC, ENROLLMENTS_TOPIC};
pub use rooms::{
    RoomEventDispatcher, RECOGNITION_CAMERA_STATUS_TOPIC, SYSTEM_NOTIFICATIONS_TOPIC,
};
