//! Domain layer - business logic and repository interfaces

pub mod assignments;
pub mod catalog;
pub mod events;
pub mod locks;
pub mod recognition;
pub mod registry;
pub mod repository;
pub mod validation;

pub use assignments::AssignmentRegistrar;
pub use events::{ChangeEvent, ChangeKind, EventPublisher, NoOpEventPublisher};
pub use recognition::RecognitionConfigService;
pub use registry::EnrollmentRegistry;
pub use validation::{EmailIssue, EmailValidator};
