//! Configuration and status handed to the external face-recognition client

use super::repository::MemberDirectory;
use crate::config::RecognitionConfig;
use crate::contract::CampusError;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use url::Url;

/// Overall health reported to the recognition client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Healthy,
    Degraded,
}

impl HealthState {
    pub fn code(self) -> &'static str {
        match self {
            Self::Healthy => "HEALTHY",
            Self::Degraded => "DEGRADED",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionSettings {
    pub recognition_threshold: f64,
    pub detection_threshold: f64,
    pub min_face_size: u32,
    pub max_face_size: u32,
    pub enable_age_gender_detection: bool,
    pub tracking_buffer_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraStatus {
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemStatus {
    pub status: HealthState,
    pub timestamp: DateTime<Utc>,
    /// Keyed `camera_<id>`
    pub cameras: BTreeMap<String, CameraStatus>,
    pub services: BTreeMap<String, HealthState>,
    pub total_active_students: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionClientConfig {
    pub backend_api_url: String,
    pub websocket_url: String,
    pub settings: RecognitionSettings,
    pub system_status: SystemStatus,
    pub max_concurrent_streams: u32,
    pub frame_processing_interval: u32,
}

/// Builds the recognition client configuration from module settings
pub struct RecognitionConfigService {
    config: RecognitionConfig,
    members: Arc<dyn MemberDirectory>,
}

impl RecognitionConfigService {
    pub fn new(config: RecognitionConfig, members: Arc<dyn MemberDirectory>) -> Self {
        Self { config, members }
    }

    /// Full client configuration, including a fresh status snapshot
    pub async fn client_config(&self) -> Result<RecognitionClientConfig, CampusError> {
        let (backend_api_url, websocket_url) = self.endpoints().map_err(|e| {
            tracing::error!(error = %e, host = %self.config.public_host, "invalid recognition endpoint");
            CampusError::Internal
        })?;

        let c = &self.config;
        Ok(RecognitionClientConfig {
            backend_api_url,
            websocket_url,
            settings: RecognitionSettings {
                recognition_threshold: c.recognition_threshold,
                detection_threshold: c.detection_threshold,
                min_face_size: c.min_face_size,
                max_face_size: c.max_face_size,
                enable_age_gender_detection: c.enable_age_gender_detection,
                tracking_buffer_size: c.tracking_buffer_size,
            },
            system_status: self.system_status().await,
            max_concurrent_streams: c.max_concurrent_streams,
            frame_processing_interval: c.frame_processing_interval,
        })
    }

    /// Status snapshot; a failing student count degrades the status
    pub async fn system_status(&self) -> SystemStatus {
        let cameras = self
            .config
            .cameras
            .iter()
            .map(|cam| {
                (
                    format!("camera_{}", cam.id),
                    CameraStatus {
                        name: cam.name.clone(),
                        active: cam.active,
                    },
                )
            })
            .collect();

        match self.members.list_members().await {
            Ok(members) => SystemStatus {
                status: HealthState::Healthy,
                timestamp: Utc::now(),
                cameras,
                services: ["database", "face_recognition", "websocket"]
                    .into_iter()
                    .map(|s| (s.to_string(), HealthState::Healthy))
                    .collect(),
                total_active_students: members.iter().filter(|m| m.is_active).count() as u64,
            },
            Err(e) => {
                tracing::error!(error = ?e, "failed to count students for system status");
                SystemStatus {
                    status: HealthState::Degraded,
                    timestamp: Utc::now(),
                    cameras,
                    services: BTreeMap::from([("database".to_string(), HealthState::Degraded)]),
                    total_active_students: 0,
                }
            }
        }
    }

    fn endpoints(&self) -> Result<(String, String), url::ParseError> {
        let base = format!("{}:{}", self.config.public_host, self.config.public_port);
        let api = Url::parse(&format!("http://{}", base))?.join("api")?;

        let endpoint = self.config.websocket_endpoint.trim_start_matches('/');
        let ws = Url::parse(&format!("ws://{}", base))?.join(endpoint)?;
        Ok((api.to_string(), ws.to_string()))
    }
}
