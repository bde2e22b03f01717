use super::{matches_keyword, EmailPolicy, FacultyService};
use crate::contract::{CampusError, Lecturer, StatusCount};
use crate::domain::repository::LecturerRepository;
use crate::domain::validation::require_text;
use std::sync::Arc;

/// Lecturers, soft-deleted and restorable
pub struct LecturerService {
    repo: Arc<dyn LecturerRepository>,
    faculties: Arc<FacultyService>,
    email_policy: EmailPolicy,
}

impl LecturerService {
    pub fn new(
        repo: Arc<dyn LecturerRepository>,
        faculties: Arc<FacultyService>,
        email_policy: EmailPolicy,
    ) -> Self {
        Self {
            repo,
            faculties,
            email_policy,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Lecturer>, CampusError> {
        let mut items = self.repo.list().await.map_err(CampusError::storage)?;
        items.sort_by(|a, b| a.full_name.cmp(&b.full_name).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    pub async fn list_active(&self) -> Result<Vec<Lecturer>, CampusError> {
        Ok(self.list_all().await?.into_iter().filter(|l| l.is_active).collect())
    }

    pub async fn list_inactive(&self) -> Result<Vec<Lecturer>, CampusError> {
        Ok(self.list_all().await?.into_iter().filter(|l| !l.is_active).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Lecturer, CampusError> {
        self.repo
            .find(id)
            .await
            .map_err(CampusError::storage)?
            .ok_or_else(|| CampusError::not_found("lecturer", id))
    }

    pub async fn create(&self, lecturer: Lecturer) -> Result<Lecturer, CampusError> {
        let id = require_text("lecturer id", &lecturer.id)?;
        let full_name = require_text("lecturer name", &lecturer.full_name)?;
        let email = self.email_policy.check(&require_text("lecturer email", &lecturer.email)?)?;

        if self.repo.find(&id).await.map_err(CampusError::storage)?.is_some() {
            return Err(CampusError::conflict(format!("lecturer id already exists: {}", id)));
        }
        if self.is_email_taken(&email, None).await? {
            return Err(CampusError::conflict(format!("email already in use: {}", email)));
        }
        let faculty = self.faculties.get(&lecturer.faculty_id).await?;

        let saved = self
            .repo
            .save(&Lecturer {
                id,
                full_name,
                email,
                faculty_id: faculty.id,
                is_active: true,
            })
            .await
            .map_err(CampusError::storage)?;
        tracing::info!(lecturer_id = %saved.id, "lecturer created");
        Ok(saved)
    }

    /// Replace name, email, faculty and status; the id is taken from the path
    pub async fn update(&self, id: &str, lecturer: Lecturer) -> Result<Lecturer, CampusError> {
        let mut current = self.get(id).await?;

        current.full_name = require_text("lecturer name", &lecturer.full_name)?;
        let email = self.email_policy.check(&require_text("lecturer email", &lecturer.email)?)?;
        if self.is_email_taken(&email, Some(id)).await? {
            return Err(CampusError::conflict(format!("email already in use: {}", email)));
        }
        current.email = email;
        current.faculty_id = self.faculties.get(&lecturer.faculty_id).await?.id;
        current.is_active = lecturer.is_active;

        let saved = self.repo.save(&current).await.map_err(CampusError::storage)?;
        tracing::info!(lecturer_id = id, "lecturer updated");
        Ok(saved)
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> Result<(), CampusError> {
        self.set_active(id, false).await?;
        tracing::info!(lecturer_id = id, "lecturer deactivated");
        Ok(())
    }

    pub async fn restore(&self, id: &str) -> Result<Lecturer, CampusError> {
        let restored = self.set_active(id, true).await?;
        tracing::info!(lecturer_id = id, "lecturer restored");
        Ok(restored)
    }

    pub async fn count_by_status(&self) -> Result<StatusCount, CampusError> {
        let all = self.repo.list().await.map_err(CampusError::storage)?;
        let active = all.iter().filter(|l| l.is_active).count() as u64;
        Ok(StatusCount {
            active,
            inactive: all.len() as u64 - active,
        })
    }

    /// Lecturers, active or not, whose id, name or email contains `keyword`
    pub async fn search(&self, keyword: &str) -> Result<Vec<Lecturer>, CampusError> {
        let keyword = keyword.trim();
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|l| keyword.is_empty() || matches_keyword(keyword, &[&l.id, &l.full_name, &l.email]))
            .collect())
    }

    /// Whether another lecturer already holds `email`
    pub async fn is_email_taken(&self, email: &str, exclude_id: Option<&str>) -> Result<bool, CampusError> {
        Ok(self
            .repo
            .find_by_email(email.trim())
            .await
            .map_err(CampusError::storage)?
            .is_some_and(|l| Some(l.id.as_str()) != exclude_id))
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<Lecturer, CampusError> {
        let mut lecturer = self.get(id).await?;
        lecturer.is_active = active;
        self.repo.save(&lecturer).await.map_err(CampusError::storage)
    }
}
