use crate::contract::{CampusError, Faculty};
use crate::domain::repository::FacultyRepository;
use crate::domain::validation::require_text;
use std::collections::HashMap;
use std::sync::Arc;

/// Faculty lookup and registration
pub struct FacultyService {
    repo: Arc<dyn FacultyRepository>,
}

impl FacultyService {
    pub fn new(repo: Arc<dyn FacultyRepository>) -> Self {
        Self { repo }
    }

    /// All faculties ordered by name
    pub async fn list(&self) -> Result<Vec<Faculty>, CampusError> {
        let mut items = self.repo.list().await.map_err(CampusError::storage)?;
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    pub async fn get(&self, id: &str) -> Result<Faculty, CampusError> {
        self.repo
            .find(id)
            .await
            .map_err(CampusError::storage)?
            .ok_or_else(|| CampusError::not_found("faculty", id))
    }

    pub async fn create(&self, faculty: Faculty) -> Result<Faculty, CampusError> {
        let id = require_text("faculty id", &faculty.id)?;
        let name = require_text("faculty name", &faculty.name)?;

        if self.repo.find(&id).await.map_err(CampusError::storage)?.is_some() {
            return Err(CampusError::conflict(format!("faculty id already exists: {}", id)));
        }

        let saved = self
            .repo
            .save(&Faculty {
                id,
                name,
                is_active: faculty.is_active,
            })
            .await
            .map_err(CampusError::storage)?;
        tracing::info!(faculty_id = %saved.id, "faculty created");
        Ok(saved)
    }

    /// Id to display name, for records that show their faculty
    pub(crate) async fn names(&self) -> Result<HashMap<String, String>, CampusError> {
        Ok(self
            .repo
            .list()
            .await
            .map_err(CampusError::storage)?
            .into_iter()
            .map(|f| (f.id, f.name))
            .collect())
    }

    /// Resolve an optional faculty reference, failing when it points nowhere
    pub(crate) async fn resolve(&self, id: Option<&str>) -> Result<Option<Faculty>, CampusError> {
        match id {
            Some(id) => self.get(id).await.map(Some),
            None => Ok(None),
        }
    }
}
