//! Organizational record services
//!
//! One service per record kind. Each validates input, resolves references
//! and delegates persistence to its repository.

mod board;
mod class;
mod course_term;
mod faculty;
mod lecturer;
mod major;
mod position;
mod specialist;

pub use board::{BoardService, BoardStatistics};
pub use class::ClassService;
pub use course_term::CourseTermService;
pub use faculty::FacultyService;
pub use lecturer::LecturerService;
pub use major::MajorService;
pub use position::{PositionService, PositionStatistics};
pub use specialist::{SpecialistService, SpecialistStatistics};

use crate::contract::CampusError;
use crate::domain::validation::EmailValidator;

/// Email policy applied when lecturers and specialists are created
#[derive(Debug, Clone)]
pub struct EmailPolicy {
    pub validator: EmailValidator,
    /// Reject addresses outside the institution domain
    pub enforce_domain: bool,
}

impl EmailPolicy {
    pub fn new(validator: EmailValidator, enforce_domain: bool) -> Self {
        Self {
            validator,
            enforce_domain,
        }
    }

    /// Normalize an address and apply the domain rule when enforced
    pub(crate) fn check(&self, email: &str) -> Result<String, CampusError> {
        let email = email.trim().to_lowercase();
        if self.enforce_domain {
            self.validator
                .validate(&email)
                .map_err(|issue| CampusError::invalid_input(issue.to_string()))?;
        }
        Ok(email)
    }
}

/// Case-insensitive keyword match used by the search operations
pub(crate) fn matches_keyword(keyword: &str, fields: &[&str]) -> bool {
    let keyword = keyword.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&keyword))
}
