use super::{matches_keyword, EmailPolicy, FacultyService};
use crate::contract::{CampusError, Specialist, SpecialistPatch};
use crate::domain::repository::SpecialistRepository;
use crate::domain::validation::{optional_text, require_text};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialistStatistics {
    pub total: u64,
    pub active: u64,
    pub inactive: u64,
    /// Active specialists per faculty name; unassigned ones are not counted
    pub by_faculty: BTreeMap<String, u64>,
}

/// Administrative specialists
pub struct SpecialistService {
    repo: Arc<dyn SpecialistRepository>,
    faculties: Arc<FacultyService>,
    email_policy: EmailPolicy,
}

impl SpecialistService {
    pub fn new(
        repo: Arc<dyn SpecialistRepository>,
        faculties: Arc<FacultyService>,
        email_policy: EmailPolicy,
    ) -> Self {
        Self {
            repo,
            faculties,
            email_policy,
        }
    }

    /// Active specialists ordered by name
    pub async fn list_active(&self) -> Result<Vec<Specialist>, CampusError> {
        let mut items: Vec<Specialist> = self
            .load()
            .await?
            .into_iter()
            .filter(|s| s.is_active)
            .collect();
        items.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(items)
    }

    pub async fn get(&self, id: &str) -> Result<Specialist, CampusError> {
        let mut specialist = self.find(id).await?;
        if let Some(faculty_id) = specialist.faculty_id.as_deref() {
            specialist.faculty_name = self.faculties.names().await?.remove(faculty_id);
        }
        Ok(specialist)
    }

    pub async fn create(&self, specialist: Specialist) -> Result<Specialist, CampusError> {
        let id = require_text("specialist id", &specialist.id)?;
        let full_name = require_text("specialist name", &specialist.full_name)?;

        if self.repo.find(&id).await.map_err(CampusError::storage)?.is_some() {
            return Err(CampusError::conflict(format!("specialist id already exists: {}", id)));
        }
        let email = match optional_text(specialist.email) {
            Some(email) => Some(self.checked_email(&email, None).await?),
            None => None,
        };
        let faculty = self.faculties.resolve(specialist.faculty_id.as_deref()).await?;

        let now = Utc::now();
        let mut saved = self
            .repo
            .save(&Specialist {
                id,
                full_name,
                email,
                phone: optional_text(specialist.phone),
                title: optional_text(specialist.title),
                faculty_id: faculty.as_ref().map(|f| f.id.clone()),
                faculty_name: None,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(CampusError::storage)?;
        saved.faculty_name = faculty.map(|f| f.name);

        tracing::info!(specialist_id = %saved.id, "specialist created");
        Ok(saved)
    }

    pub async fn update(&self, id: &str, patch: SpecialistPatch) -> Result<Specialist, CampusError> {
        let mut specialist = self.find(id).await?;

        if let Some(name) = patch.full_name {
            specialist.full_name = require_text("specialist name", &name)?;
        }
        if patch.email.is_some() {
            specialist.email = match optional_text(patch.email) {
                Some(email) => Some(self.checked_email(&email, Some(id)).await?),
                None => None,
            };
        }
        if patch.phone.is_some() {
            specialist.phone = optional_text(patch.phone);
        }
        if patch.title.is_some() {
            specialist.title = optional_text(patch.title);
        }
        if let Some(faculty_id) = patch.faculty_id {
            specialist.faculty_id = Some(self.faculties.get(&faculty_id).await?.id);
        }
        if let Some(active) = patch.is_active {
            specialist.is_active = active;
        }
        specialist.updated_at = Utc::now();

        self.repo.save(&specialist).await.map_err(CampusError::storage)?;
        tracing::info!(specialist_id = id, "specialist updated");
        self.get(id).await
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> Result<(), CampusError> {
        let mut specialist = self.find(id).await?;
        specialist.is_active = false;
        specialist.updated_at = Utc::now();
        self.repo.save(&specialist).await.map_err(CampusError::storage)?;
        tracing::info!(specialist_id = id, "specialist deactivated");
        Ok(())
    }

    /// Active specialists whose id, name or email contains `keyword`
    pub async fn search(&self, keyword: &str) -> Result<Vec<Specialist>, CampusError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return self.list_active().await;
        }
        Ok(self
            .list_active()
            .await?
            .into_iter()
            .filter(|s| {
                matches_keyword(
                    keyword,
                    &[&s.id, &s.full_name, s.email.as_deref().unwrap_or_default()],
                )
            })
            .collect())
    }

    pub async fn list_by_faculty(&self, faculty_id: &str) -> Result<Vec<Specialist>, CampusError> {
        Ok(self
            .list_active()
            .await?
            .into_iter()
            .filter(|s| s.faculty_id.as_deref() == Some(faculty_id))
            .collect())
    }

    pub async fn count_active(&self) -> Result<u64, CampusError> {
        Ok(self.list_active().await?.len() as u64)
    }

    pub async fn statistics(&self) -> Result<SpecialistStatistics, CampusError> {
        let all = self.load().await?;
        let active = all.iter().filter(|s| s.is_active).count() as u64;

        let mut by_faculty = BTreeMap::new();
        for name in all
            .iter()
            .filter(|s| s.is_active)
            .filter_map(|s| s.faculty_name.clone())
        {
            *by_faculty.entry(name).or_insert(0) += 1;
        }

        Ok(SpecialistStatistics {
            total: all.len() as u64,
            active,
            inactive: all.len() as u64 - active,
            by_faculty,
        })
    }

    async fn find(&self, id: &str) -> Result<Specialist, CampusError> {
        self.repo
            .find(id)
            .await
            .map_err(CampusError::storage)?
            .ok_or_else(|| CampusError::not_found("specialist", id))
    }

    /// Apply the email policy and reject addresses held by another specialist
    async fn checked_email(&self, email: &str, owner: Option<&str>) -> Result<String, CampusError> {
        let email = self.email_policy.check(email)?;
        let holder = self
            .repo
            .find_by_email(&email)
            .await
            .map_err(CampusError::storage)?;
        if holder.is_some_and(|s| Some(s.id.as_str()) != owner) {
            return Err(CampusError::conflict(format!("email already in use: {}", email)));
        }
        Ok(email)
    }

    async fn load(&self) -> Result<Vec<Specialist>, CampusError> {
        let names = self.faculties.names().await?;
        Ok(self
            .repo
            .list()
            .await
            .map_err(CampusError::storage)?
            .into_iter()
            .map(|mut s| {
                s.faculty_name = s.faculty_id.as_ref().and_then(|f| names.get(f).cloned());
                s
            })
            .collect())
    }
}
