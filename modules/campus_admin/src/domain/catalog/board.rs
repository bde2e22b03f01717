use super::FacultyService;
use crate::contract::{Board, BoardKind, BoardPatch, CampusError};
use crate::domain::repository::BoardRepository;
use crate::domain::validation::{optional_text, require_text};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Board counts, overall and per kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardStatistics {
    pub total: u64,
    pub by_kind: BTreeMap<BoardKind, u64>,
}

/// Union and association boards
pub struct BoardService {
    repo: Arc<dyn BoardRepository>,
    faculties: Arc<FacultyService>,
}

impl BoardService {
    pub fn new(repo: Arc<dyn BoardRepository>, faculties: Arc<FacultyService>) -> Self {
        Self { repo, faculties }
    }

    /// Active boards ordered by name
    pub async fn list_active(&self) -> Result<Vec<Board>, CampusError> {
        let mut items = self.load(|b| b.is_active).await?;
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    pub async fn get(&self, id: &str) -> Result<Board, CampusError> {
        let mut board = self.find(id).await?;
        if let Some(faculty_id) = board.faculty_id.as_deref() {
            board.faculty_name = self.faculties.names().await?.remove(faculty_id);
        }
        Ok(board)
    }

    pub async fn create(&self, board: Board) -> Result<Board, CampusError> {
        let id = require_text("board id", &board.id)?;
        let name = require_text("board name", &board.name)?;

        if self.repo.find(&id).await.map_err(CampusError::storage)?.is_some() {
            return Err(CampusError::conflict(format!("board id already exists: {}", id)));
        }
        if self.name_taken(&name, None).await? {
            return Err(CampusError::conflict(format!("board name already exists: {}", name)));
        }

        let faculty = self.faculties.resolve(board.faculty_id.as_deref()).await?;
        let record = Board {
            id,
            name,
            kind: board.kind,
            description: optional_text(board.description),
            faculty_id: faculty.as_ref().map(|f| f.id.clone()),
            faculty_name: faculty.map(|f| f.name),
            is_active: true,
        };
        let mut saved = self.repo.save(&record).await.map_err(CampusError::storage)?;
        saved.faculty_name = record.faculty_name;

        tracing::info!(board_id = %saved.id, kind = saved.kind.code(), "board created");
        Ok(saved)
    }

    /// Apply the fields present in `patch`
    pub async fn update(&self, id: &str, patch: BoardPatch) -> Result<Board, CampusError> {
        let mut board = self.find(id).await?;

        if let Some(name) = patch.name {
            let name = require_text("board name", &name)?;
            if name != board.name && self.name_taken(&name, Some(id)).await? {
                return Err(CampusError::conflict(format!("board name already exists: {}", name)));
            }
            board.name = name;
        }
        if let Some(kind) = patch.kind {
            board.kind = kind;
        }
        if patch.description.is_some() {
            board.description = optional_text(patch.description);
        }
        if let Some(faculty_id) = patch.faculty_id {
            let faculty = self.faculties.get(&faculty_id).await?;
            board.faculty_id = Some(faculty.id);
        }
        if let Some(active) = patch.is_active {
            board.is_active = active;
        }

        self.repo.save(&board).await.map_err(CampusError::storage)?;
        tracing::info!(board_id = id, "board updated");
        self.get(id).await
    }

    /// Soft delete
    pub async fn delete(&self, id: &str) -> Result<(), CampusError> {
        let mut board = self.find(id).await?;
        board.is_active = false;
        self.repo.save(&board).await.map_err(CampusError::storage)?;
        tracing::info!(board_id = id, "board deactivated");
        Ok(())
    }

    pub async fn list_by_kind(&self, kind: BoardKind) -> Result<Vec<Board>, CampusError> {
        let mut items = self.load(|b| b.is_active && b.kind == kind).await?;
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    pub async fn list_by_faculty(&self, faculty_id: &str) -> Result<Vec<Board>, CampusError> {
        let mut items = self
            .load(|b| b.is_active && b.faculty_id.as_deref() == Some(faculty_id))
            .await?;
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    /// Counts over active boards
    pub async fn statistics(&self) -> Result<BoardStatistics, CampusError> {
        let active = self.load(|b| b.is_active).await?;
        let mut by_kind = BTreeMap::new();
        for board in &active {
            *by_kind.entry(board.kind).or_insert(0) += 1;
        }
        Ok(BoardStatistics {
            total: active.len() as u64,
            by_kind,
        })
    }

    async fn find(&self, id: &str) -> Result<Board, CampusError> {
        self.repo
            .find(id)
            .await
            .map_err(CampusError::storage)?
            .ok_or_else(|| CampusError::not_found("board", id))
    }

    async fn name_taken(&self, name: &str, except: Option<&str>) -> Result<bool, CampusError> {
        Ok(self
            .repo
            .find_by_name(name)
            .await
            .map_err(CampusError::storage)?
            .is_some_and(|b| Some(b.id.as_str()) != except))
    }

    async fn load(&self, keep: impl Fn(&Board) -> bool) -> Result<Vec<Board>, CampusError> {
        let names = self.faculties.names().await?;
        Ok(self
            .repo
            .list()
            .await
            .map_err(CampusError::storage)?
            .into_iter()
            .filter(|b| keep(b))
            .map(|mut b| {
                b.faculty_name = b.faculty_id.as_ref().and_then(|f| names.get(f).cloned());
                b
            })
            .collect())
    }
}
