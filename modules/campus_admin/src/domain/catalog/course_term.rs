use crate::contract::{CampusError, CourseTerm};
use crate::domain::repository::{ClassRepository, CourseTermRepository};
use crate::domain::validation::{require_text, validate_year_range};
use std::sync::Arc;

/// Intake cohorts; deletion removes the row
pub struct CourseTermService {
    repo: Arc<dyn CourseTermRepository>,
    classes: Arc<dyn ClassRepository>,
}

impl CourseTermService {
    pub fn new(repo: Arc<dyn CourseTermRepository>, classes: Arc<dyn ClassRepository>) -> Self {
        Self { repo, classes }
    }

    /// All terms ordered by id
    pub async fn list(&self) -> Result<Vec<CourseTerm>, CampusError> {
        let mut items = self.repo.list().await.map_err(CampusError::storage)?;
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    pub async fn get(&self, id: &str) -> Result<CourseTerm, CampusError> {
        self.repo
            .find(id)
            .await
            .map_err(CampusError::storage)?
            .ok_or_else(|| CampusError::not_found("course term", id))
    }

    pub async fn create(&self, term: CourseTerm) -> Result<CourseTerm, CampusError> {
        let id = require_text("course term id", &term.id)?;
        let name = require_text("course term name", &term.name)?;
        validate_year_range(term.start_year, term.end_year)?;

        if self.repo.find(&id).await.map_err(CampusError::storage)?.is_some() {
            return Err(CampusError::conflict(format!("course term id already exists: {}", id)));
        }

        let saved = self
            .repo
            .save(&CourseTerm { id, name, ..term })
            .await
            .map_err(CampusError::storage)?;
        tracing::info!(course_term_id = %saved.id, "course term created");
        Ok(saved)
    }

    pub async fn update(&self, id: &str, term: CourseTerm) -> Result<CourseTerm, CampusError> {
        let current = self.get(id).await?;
        let name = require_text("course term name", &term.name)?;
        validate_year_range(term.start_year, term.end_year)?;

        let saved = self
            .repo
            .save(&CourseTerm {
                id: current.id,
                name,
                ..term
            })
            .await
            .map_err(CampusError::storage)?;
        tracing::info!(course_term_id = id, "course term updated");
        Ok(saved)
    }

    /// Hard delete; a term that classes still belong to is kept
    pub async fn delete(&self, id: &str) -> Result<(), CampusError> {
        self.get(id).await?;
        let referencing = self
            .classes
            .list()
            .await
            .map_err(CampusError::storage)?
            .iter()
            .filter(|c| c.course_term_id == id)
            .count();
        if referencing > 0 {
            return Err(CampusError::conflict(format!(
                "course term {} is still referenced by {} class(es)",
                id, referencing
            )));
        }

        if !self.repo.delete(id).await.map_err(CampusError::storage)? {
            return Err(CampusError::not_found("course term", id));
        }
        tracing::info!(course_term_id = id, "course term deleted");
        Ok(())
    }

    /// The active term flagged current; the latest start year wins a tie
    pub async fn current(&self) -> Result<Option<CourseTerm>, CampusError> {
        Ok(self
            .repo
            .list()
            .await
            .map_err(CampusError::storage)?
            .into_iter()
            .filter(|t| t.is_active && t.is_current)
            .max_by(|a, b| a.start_year.cmp(&b.start_year).then_with(|| b.id.cmp(&a.id))))
    }
}
