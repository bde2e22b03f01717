use super::FacultyService;
use crate::contract::{CampusError, Major, MajorStatistics};
use crate::domain::repository::{ClassRepository, MajorRepository, MemberDirectory};
use crate::domain::validation::require_text;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Majors with their computed active student count
pub struct MajorService {
    repo: Arc<dyn MajorRepository>,
    faculties: Arc<FacultyService>,
    classes: Arc<dyn ClassRepository>,
    members: Arc<dyn MemberDirectory>,
}

impl MajorService {
    pub fn new(
        repo: Arc<dyn MajorRepository>,
        faculties: Arc<FacultyService>,
        classes: Arc<dyn ClassRepository>,
        members: Arc<dyn MemberDirectory>,
    ) -> Self {
        Self {
            repo,
            faculties,
            classes,
            members,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Major>, CampusError> {
        let mut items = self.enrich(self.repo.list().await.map_err(CampusError::storage)?).await?;
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    pub async fn list_active(&self) -> Result<Vec<Major>, CampusError> {
        Ok(self.list_all().await?.into_iter().filter(|m| m.is_active).collect())
    }

    pub async fn list_deleted(&self) -> Result<Vec<Major>, CampusError> {
        Ok(self.list_all().await?.into_iter().filter(|m| !m.is_active).collect())
    }

    pub async fn list_by_faculty(&self, faculty_id: &str) -> Result<Vec<Major>, CampusError> {
        Ok(self
            .list_active()
            .await?
            .into_iter()
            .filter(|m| m.faculty_id == faculty_id)
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<Major, CampusError> {
        let major = self.find(id).await?;
        self.enrich(vec![major])
            .await?
            .pop()
            .ok_or_else(|| CampusError::not_found("major", id))
    }

    pub async fn create(&self, major: Major) -> Result<Major, CampusError> {
        let id = require_text("major id", &major.id)?;
        let name = require_text("major name", &major.name)?;

        if self.repo.find(&id).await.map_err(CampusError::storage)?.is_some() {
            return Err(CampusError::conflict(format!("major id already exists: {}", id)));
        }
        let faculty = self.faculties.get(&major.faculty_id).await?;

        let saved = self
            .repo
            .save(&Major {
                id,
                name,
                faculty_id: faculty.id,
                faculty_name: None,
                is_active: true,
                student_count: 0,
            })
            .await
            .map_err(CampusError::storage)?;
        tracing::info!(major_id = %saved.id, "major created");
        self.get(&saved.id).await
    }

    pub async fn update(&self, id: &str, major: Major) -> Result<Major, CampusError> {
        let mut current = self.find(id).await?;
        current.name = require_text("major name", &major.name)?;
        current.faculty_id = self.faculties.get(&major.faculty_id).await?.id;
        current.is_active = major.is_active;

        self.repo.save(&current).await.map_err(CampusError::storage)?;
        tracing::info!(major_id = id, "major updated");
        self.get(id).await
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> Result<(), CampusError> {
        self.set_active(id, false).await?;
        tracing::info!(major_id = id, "major deactivated");
        Ok(())
    }

    pub async fn restore(&self, id: &str) -> Result<Major, CampusError> {
        self.set_active(id, true).await?;
        tracing::info!(major_id = id, "major restored");
        self.get(id).await
    }

    /// Remove the row for good; refused while any class still references it
    pub async fn hard_delete(&self, id: &str) -> Result<(), CampusError> {
        self.find(id).await?;
        let referencing = self
            .classes
            .list()
            .await
            .map_err(CampusError::storage)?
            .iter()
            .filter(|c| c.major_id == id)
            .count();
        if referencing > 0 {
            return Err(CampusError::conflict(format!(
                "major {} is still referenced by {} class(es)",
                id, referencing
            )));
        }

        if !self.repo.delete(id).await.map_err(CampusError::storage)? {
            return Err(CampusError::not_found("major", id));
        }
        tracing::warn!(major_id = id, "major permanently deleted");
        Ok(())
    }

    /// Student and class figures for one major
    pub async fn statistics(&self, id: &str) -> Result<MajorStatistics, CampusError> {
        let major = self.get(id).await?;

        let classes = self.classes.list().await.map_err(CampusError::storage)?;
        let class_ids: HashSet<&str> = classes
            .iter()
            .filter(|c| c.major_id == id)
            .map(|c| c.id.as_str())
            .collect();
        let active_classes = classes
            .iter()
            .filter(|c| c.major_id == id && c.is_active)
            .count() as u64;

        let members = self.members.list_members().await.map_err(CampusError::storage)?;
        let in_major: Vec<_> = members
            .iter()
            .filter(|m| m.class_id.as_deref().is_some_and(|c| class_ids.contains(c)))
            .collect();
        let active_students = in_major.iter().filter(|m| m.is_active).count() as u64;

        Ok(MajorStatistics {
            major,
            active_students,
            total_students: in_major.len() as u64,
            active_classes,
        })
    }

    async fn find(&self, id: &str) -> Result<Major, CampusError> {
        self.repo
            .find(id)
            .await
            .map_err(CampusError::storage)?
            .ok_or_else(|| CampusError::not_found("major", id))
    }

    async fn set_active(&self, id: &str, active: bool) -> Result<(), CampusError> {
        let mut major = self.find(id).await?;
        major.is_active = active;
        self.repo.save(&major).await.map_err(CampusError::storage)?;
        Ok(())
    }

    /// Fill faculty names and active student counts
    async fn enrich(&self, majors: Vec<Major>) -> Result<Vec<Major>, CampusError> {
        let faculty_names = self.faculties.names().await?;
        let class_major: HashMap<String, String> = self
            .classes
            .list()
            .await
            .map_err(CampusError::storage)?
            .into_iter()
            .map(|c| (c.id, c.major_id))
            .collect();

        let mut counts: HashMap<String, u64> = HashMap::new();
        for member in self.members.list_members().await.map_err(CampusError::storage)? {
            if !member.is_active {
                continue;
            }
            if let Some(major_id) = member.class_id.as_ref().and_then(|c| class_major.get(c)) {
                *counts.entry(major_id.clone()).or_insert(0) += 1;
            }
        }

        Ok(majors
            .into_iter()
            .map(|mut m| {
                m.faculty_name = faculty_names.get(&m.faculty_id).cloned();
                m.student_count = counts.get(&m.id).copied().unwrap_or(0);
                m
            })
            .collect())
    }
}
