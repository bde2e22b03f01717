use crate::contract::{CampusError, Class, StatusCount};
use crate::domain::repository::{ClassRepository, CourseTermRepository, MajorRepository, MemberDirectory};
use crate::domain::validation::require_text;
use std::sync::Arc;

/// Administrative classes, soft-deleted by default
pub struct ClassService {
    repo: Arc<dyn ClassRepository>,
    majors: Arc<dyn MajorRepository>,
    course_terms: Arc<dyn CourseTermRepository>,
    members: Arc<dyn MemberDirectory>,
}

impl ClassService {
    pub fn new(
        repo: Arc<dyn ClassRepository>,
        majors: Arc<dyn MajorRepository>,
        course_terms: Arc<dyn CourseTermRepository>,
        members: Arc<dyn MemberDirectory>,
    ) -> Self {
        Self {
            repo,
            majors,
            course_terms,
            members,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Class>, CampusError> {
        let mut items = self.repo.list().await.map_err(CampusError::storage)?;
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    pub async fn list_active(&self) -> Result<Vec<Class>, CampusError> {
        Ok(self.list_all().await?.into_iter().filter(|c| c.is_active).collect())
    }

    pub async fn list_deleted(&self) -> Result<Vec<Class>, CampusError> {
        Ok(self.list_all().await?.into_iter().filter(|c| !c.is_active).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Class, CampusError> {
        self.repo
            .find(id)
            .await
            .map_err(CampusError::storage)?
            .ok_or_else(|| CampusError::not_found("class", id))
    }

    pub async fn create(&self, class: Class) -> Result<Class, CampusError> {
        let id = require_text("class id", &class.id)?;
        let name = require_text("class name", &class.name)?;

        if self.repo.find(&id).await.map_err(CampusError::storage)?.is_some() {
            return Err(CampusError::conflict(format!("class id already exists: {}", id)));
        }
        self.check_references(&class.major_id, &class.course_term_id).await?;

        let saved = self
            .repo
            .save(&Class {
                id,
                name,
                is_active: true,
                ..class
            })
            .await
            .map_err(CampusError::storage)?;
        tracing::info!(class_id = %saved.id, major_id = %saved.major_id, "class created");
        Ok(saved)
    }

    pub async fn update(&self, id: &str, class: Class) -> Result<Class, CampusError> {
        let current = self.get(id).await?;
        let name = require_text("class name", &class.name)?;
        self.check_references(&class.major_id, &class.course_term_id).await?;

        let saved = self
            .repo
            .save(&Class {
                id: current.id,
                name,
                ..class
            })
            .await
            .map_err(CampusError::storage)?;
        tracing::info!(class_id = id, "class updated");
        Ok(saved)
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> Result<(), CampusError> {
        self.set_active(id, false).await?;
        tracing::info!(class_id = id, "class deactivated");
        Ok(())
    }

    pub async fn restore(&self, id: &str) -> Result<Class, CampusError> {
        let restored = self.set_active(id, true).await?;
        tracing::info!(class_id = id, "class restored");
        Ok(restored)
    }

    /// Remove the row for good
    pub async fn hard_delete(&self, id: &str) -> Result<(), CampusError> {
        if !self.repo.delete(id).await.map_err(CampusError::storage)? {
            return Err(CampusError::not_found("class", id));
        }
        tracing::warn!(class_id = id, "class permanently deleted");
        Ok(())
    }

    pub async fn count_by_status(&self) -> Result<StatusCount, CampusError> {
        let all = self.repo.list().await.map_err(CampusError::storage)?;
        let active = all.iter().filter(|c| c.is_active).count() as u64;
        Ok(StatusCount {
            active,
            inactive: all.len() as u64 - active,
        })
    }

    /// Active members of a class
    pub async fn count_students(&self, id: &str) -> Result<u64, CampusError> {
        self.get(id).await?;
        Ok(self
            .members
            .list_members()
            .await
            .map_err(CampusError::storage)?
            .iter()
            .filter(|m| m.is_active && m.class_id.as_deref() == Some(id))
            .count() as u64)
    }

    async fn check_references(&self, major_id: &str, course_term_id: &str) -> Result<(), CampusError> {
        if self.majors.find(major_id).await.map_err(CampusError::storage)?.is_none() {
            return Err(CampusError::not_found("major", major_id));
        }
        if self
            .course_terms
            .find(course_term_id)
            .await
            .map_err(CampusError::storage)?
            .is_none()
        {
            return Err(CampusError::not_found("course term", course_term_id));
        }
        Ok(())
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<Class, CampusError> {
        let mut class = self.get(id).await?;
        class.is_active = active;
        self.repo.save(&class).await.map_err(CampusError::storage)
    }
}
