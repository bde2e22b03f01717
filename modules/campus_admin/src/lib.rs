//! Campus Admin Module
//!
//! Administrative backend of the campus attendance system: organizational
//! records, course registration with guarded transfers, batch duty
//! assignment, institution email checks and live broadcasts for the
//! face-recognition client.

// Public exports
pub mod contract;
pub use contract::{
    client::{AssignmentApi, EnrollmentApi},
    error::CampusError,
    Assignment, DutyRole, Enrollment, EnrollmentKey, Member, Section,
};

pub mod module;
pub use module::{CampusAdminModule, CampusServices, Repositories};

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
