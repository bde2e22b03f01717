//! Input validation: institution email rules and common field checks

use crate::contract::CampusError;
use regex::Regex;
use std::fmt;

/// Institution domain used when the configuration does not name one
pub const DEFAULT_EMAIL_DOMAIN: &str = "vnkgu.edu.vn";

/// Reason an email was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailIssue {
    /// Blank input
    Empty,
    /// No `@` separator
    MissingAt,
    /// Domain differs from the institution domain
    WrongDomain { domain: String },
    /// Right domain, but the local part has forbidden characters
    Malformed,
}

impl fmt::Display for EmailIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email must not be empty"),
            Self::MissingAt => write!(f, "email must contain '@'"),
            Self::WrongDomain { domain } => write!(f, "email must use the @{} domain", domain),
            Self::Malformed => write!(f, "email format is invalid"),
        }
    }
}

/// Institution email checker
///
/// All checks lowercase the input first, so `SV_1@VNKGU.EDU.VN` is accepted.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    domain: String,
    pattern: Regex,
}

impl EmailValidator {
    /// Build a validator for `domain` (e.g. `vnkgu.edu.vn`)
    pub fn new(domain: &str) -> Result<Self, regex::Error> {
        let domain = domain.trim().trim_start_matches('@').to_lowercase();
        let pattern = Regex::new(&format!(r"^[A-Za-z0-9+_.-]+@{}$", regex::escape(&domain)))?;
        Ok(Self { domain, pattern })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Full format check against the institution domain
    pub fn is_valid(&self, email: &str) -> bool {
        let email = email.trim();
        if email.is_empty() {
            return false;
        }
        let ok = self.pattern.is_match(&email.to_lowercase());
        if !ok {
            tracing::debug!(email, "email rejected");
        }
        ok
    }

    /// Domain-only check; the local part is not inspected
    pub fn is_institution_email(&self, email: &str) -> bool {
        !email.trim().is_empty() && extract_domain(email) == self.domain
    }

    /// Valid institution email whose username starts with `sv_` or `sv+`
    pub fn is_student_email(&self, email: &str) -> bool {
        self.is_valid(email) && {
            let user = extract_username(email);
            user.starts_with("sv_") || user.starts_with("sv+")
        }
    }

    /// Valid institution email whose username starts with `gv_` or `gv+`
    pub fn is_teacher_email(&self, email: &str) -> bool {
        self.is_valid(email) && {
            let user = extract_username(email);
            user.starts_with("gv_") || user.starts_with("gv+")
        }
    }

    /// Digits of the username, e.g. `12345` for `sv_12345@vnkgu.edu.vn`
    ///
    /// Empty when the email is not valid or carries no digits.
    pub fn extract_student_id(&self, email: &str) -> String {
        if !self.is_valid(email) {
            return String::new();
        }
        extract_username(email)
            .chars()
            .filter(char::is_ascii_digit)
            .collect()
    }

    /// Check an email and report the first problem found
    pub fn validate(&self, email: &str) -> Result<(), EmailIssue> {
        if email.trim().is_empty() {
            return Err(EmailIssue::Empty);
        }
        if !email.contains('@') {
            return Err(EmailIssue::MissingAt);
        }
        if extract_domain(email) != self.domain {
            return Err(EmailIssue::WrongDomain {
                domain: self.domain.clone(),
            });
        }
        if !self.pattern.is_match(&email.trim().to_lowercase()) {
            return Err(EmailIssue::Malformed);
        }
        Ok(())
    }
}

/// Lowercased part after the first `@`; empty without one
pub fn extract_domain(email: &str) -> String {
    email
        .trim()
        .split_once('@')
        .map(|(_, domain)| domain.to_lowercase())
        .unwrap_or_default()
}

/// Lowercased part before the first `@`; empty without one
pub fn extract_username(email: &str) -> String {
    email
        .trim()
        .split_once('@')
        .map(|(user, _)| user.to_lowercase())
        .unwrap_or_default()
}

// ===== Field checks shared by the services =====

/// Trimmed value, or `InvalidInput` naming the field when blank
pub fn require_text(field: &str, value: &str) -> Result<String, CampusError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CampusError::invalid_input(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim optional text, turning blank values into `None`
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Cohort years must be increasing when both are present
pub fn validate_year_range(start: Option<i32>, end: Option<i32>) -> Result<(), CampusError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            return Err(CampusError::invalid_input(format!(
                "end year ({}) must be after start year ({})",
                end, start
            )));
        }
    }
    Ok(())
}
