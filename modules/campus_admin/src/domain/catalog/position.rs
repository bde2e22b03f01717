use crate::contract::{CampusError, Position, PositionPatch};
use crate::domain::repository::PositionRepository;
use crate::domain::validation::{optional_text, require_text};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Position counts, overall and per organization unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionStatistics {
    pub total: u64,
    /// Positions without a unit are counted under an empty key
    pub by_unit: BTreeMap<String, u64>,
}

/// Staff positions (chairman, secretary, member, ...)
pub struct PositionService {
    repo: Arc<dyn PositionRepository>,
}

impl PositionService {
    pub fn new(repo: Arc<dyn PositionRepository>) -> Self {
        Self { repo }
    }

    /// Active positions by display order; positions without one come last
    pub async fn list_active(&self) -> Result<Vec<Position>, CampusError> {
        let mut items = self.active().await?;
        items.sort_by(display_order);
        Ok(items)
    }

    pub async fn get(&self, id: &str) -> Result<Position, CampusError> {
        self.repo
            .find(id)
            .await
            .map_err(CampusError::storage)?
            .ok_or_else(|| CampusError::not_found("position", id))
    }

    pub async fn create(&self, position: Position) -> Result<Position, CampusError> {
        let id = require_text("position id", &position.id)?;
        let name = require_text("position name", &position.name)?;

        if self.repo.find(&id).await.map_err(CampusError::storage)?.is_some() {
            return Err(CampusError::conflict(format!("position id already exists: {}", id)));
        }
        if self.name_taken(&name, None).await? {
            return Err(CampusError::conflict(format!("position name already exists: {}", name)));
        }

        let saved = self
            .repo
            .save(&Position {
                id,
                name,
                unit: optional_text(position.unit),
                description: optional_text(position.description),
                display_order: position.display_order,
                is_active: true,
            })
            .await
            .map_err(CampusError::storage)?;
        tracing::info!(position_id = %saved.id, "position created");
        Ok(saved)
    }

    pub async fn update(&self, id: &str, patch: PositionPatch) -> Result<Position, CampusError> {
        let mut position = self.get(id).await?;

        if let Some(name) = patch.name {
            let name = require_text("position name", &name)?;
            if name != position.name && self.name_taken(&name, Some(id)).await? {
                return Err(CampusError::conflict(format!("position name already exists: {}", name)));
            }
            position.name = name;
        }
        if patch.unit.is_some() {
            position.unit = optional_text(patch.unit);
        }
        if patch.description.is_some() {
            position.description = optional_text(patch.description);
        }
        if patch.display_order.is_some() {
            position.display_order = patch.display_order;
        }
        if let Some(active) = patch.is_active {
            position.is_active = active;
        }

        let saved = self.repo.save(&position).await.map_err(CampusError::storage)?;
        tracing::info!(position_id = id, "position updated");
        Ok(saved)
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> Result<(), CampusError> {
        let mut position = self.get(id).await?;
        position.is_active = false;
        self.repo.save(&position).await.map_err(CampusError::storage)?;
        tracing::info!(position_id = id, "position deactivated");
        Ok(())
    }

    /// Active positions of one organization unit, by display order
    pub async fn list_by_unit(&self, unit: &str) -> Result<Vec<Position>, CampusError> {
        let mut items: Vec<Position> = self
            .active()
            .await?
            .into_iter()
            .filter(|p| p.unit.as_deref().is_some_and(|u| u.eq_ignore_ascii_case(unit)))
            .collect();
        items.sort_by(display_order);
        Ok(items)
    }

    pub async fn statistics(&self) -> Result<PositionStatistics, CampusError> {
        let active = self.active().await?;
        let mut by_unit = BTreeMap::new();
        for position in &active {
            *by_unit.entry(position.unit.clone().unwrap_or_default()).or_insert(0) += 1;
        }
        Ok(PositionStatistics {
            total: active.len() as u64,
            by_unit,
        })
    }

    async fn active(&self) -> Result<Vec<Position>, CampusError> {
        Ok(self
            .repo
            .list()
            .await
            .map_err(CampusError::storage)?
            .into_iter()
            .filter(|p| p.is_active)
            .collect())
    }

    async fn name_taken(&self, name: &str, except: Option<&str>) -> Result<bool, CampusError> {
        Ok(self
            .repo
            .find_by_name(name)
            .await
            .map_err(CampusError::storage)?
            .is_some_and(|p| Some(p.id.as_str()) != except))
    }
}

fn display_order(a: &Position, b: &Position) -> Ordering {
    match (a.display_order, b.display_order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.name.cmp(&b.name))
}
