//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client traits.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::{AssignmentApi, EnrollmentApi};
pub use error::CampusError;
pub use model::{
    Activity, Assignment, Board, BoardKind, BoardPatch, Class, Course, CourseTerm, DutyMember,
    DutyRole, Enrollment, EnrollmentKey, Faculty, Lecturer, Major, MajorStatistics, Member,
    Position, PositionPatch, Section, Specialist, SpecialistPatch, StatusCount,
};
