//! Infrastructure layer - persistence and live broadcasting

pub mod broadcast;
pub mod storage;
