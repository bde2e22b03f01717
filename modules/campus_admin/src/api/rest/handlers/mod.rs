//! HTTP request handlers - thin layer that delegates to the domain services

mod helpers;
mod organization;
mod registration;

pub use helpers::*;
pub use organization::*;
pub use registration::*;

use serde::Deserialize;

/// Record status filter for list endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: StatusFilter,
    /// Case-insensitive search keyword
    pub keyword: Option<String>,
    pub faculty_id: Option<String>,
}

fn list_of<T, D: From<T>>(items: Vec<T>) -> super::dto::ListResponse<D> {
    items.into_iter().map(D::from).collect::<Vec<_>>().into()
}
