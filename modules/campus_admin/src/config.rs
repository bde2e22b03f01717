//! Configuration for the campus admin module

use crate::domain::validation::DEFAULT_EMAIL_DOMAIN;
use serde::{Deserialize, Serialize};

/// Campus admin module configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Institution email domain
    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    /// Reject lecturer and specialist emails outside `email_domain`
    #[serde(default)]
    pub enforce_email_domain: bool,

    /// Per-topic buffer of the broadcast hub
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,

    /// Settings handed to the face-recognition client
    #[serde(default)]
    pub recognition: RecognitionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            email_domain: default_email_domain(),
            enforce_email_domain: false,
            broadcast_capacity: default_broadcast_capacity(),
            recognition: RecognitionConfig::default(),
        }
    }
}

/// Recognition client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecognitionConfig {
    /// Host the recognition client uses to reach this server
    #[serde(default = "default_public_host")]
    pub public_host: String,

    /// Port the recognition client uses to reach this server
    #[serde(default = "default_public_port")]
    pub public_port: u16,

    /// WebSocket endpoint path
    #[serde(default = "default_websocket_endpoint")]
    pub websocket_endpoint: String,

    #[serde(default = "default_recognition_threshold")]
    pub recognition_threshold: f64,

    #[serde(default = "default_detection_threshold")]
    pub detection_threshold: f64,

    /// Smallest face edge in pixels
    #[serde(default = "default_min_face_size")]
    pub min_face_size: u32,

    /// Largest face edge in pixels
    #[serde(default = "default_max_face_size")]
    pub max_face_size: u32,

    #[serde(default = "default_true")]
    pub enable_age_gender_detection: bool,

    /// Frames kept per tracked face
    #[serde(default = "default_tracking_buffer_size")]
    pub tracking_buffer_size: u32,

    #[serde(default = "default_max_concurrent_streams")]
    pub max_concurrent_streams: u32,

    /// Process every n-th frame
    #[serde(default = "default_frame_processing_interval")]
    pub frame_processing_interval: u32,

    /// Cameras reported in the system status
    #[serde(default)]
    pub cameras: Vec<CameraConfig>,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            public_host: default_public_host(),
            public_port: default_public_port(),
            websocket_endpoint: default_websocket_endpoint(),
            recognition_threshold: default_recognition_threshold(),
            detection_threshold: default_detection_threshold(),
            min_face_size: default_min_face_size(),
            max_face_size: default_max_face_size(),
            enable_age_gender_detection: true,
            tracking_buffer_size: default_tracking_buffer_size(),
            max_concurrent_streams: default_max_concurrent_streams(),
            frame_processing_interval: default_frame_processing_interval(),
            cameras: Vec::new(),
        }
    }
}

/// Camera known to the recognition client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_email_domain() -> String {
    DEFAULT_EMAIL_DOMAIN.to_string()
}

fn default_broadcast_capacity() -> usize {
    256
}

fn default_public_host() -> String {
    "localhost".to_string()
}

fn default_public_port() -> u16 {
    8080
}

fn default_websocket_endpoint() -> String {
    "/ws".to_string()
}

fn default_recognition_threshold() -> f64 {
    0.6
}

fn default_detection_threshold() -> f64 {
    0.5
}

fn default_min_face_size() -> u32 {
    40
}

fn default_max_face_size() -> u32 {
    1920
}

fn default_tracking_buffer_size() -> u32 {
    30
}

fn default_max_concurrent_streams() -> u32 {
    4
}

fn default_frame_processing_interval() -> u32 {
    3
}

fn default_true() -> bool {
    true
}
