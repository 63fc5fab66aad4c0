use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::document::{now_millis, GameDesignDocument};
use crate::ui::settings_io::APP_DIR_NAME;

pub const GALLERY_FILE_NAME: &str = "canvas_games.json";

fn default_gallery_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR_NAME);
    fs::create_dir_all(&path).ok();
    path.push(GALLERY_FILE_NAME);
    path
}

/// Saved canvases, kept as one JSON array in one file.
///
/// Every operation reads and rewrites the whole file. There is a single
/// writer (the engine thread); the last write wins.
#[derive(Debug, Clone)]
pub struct GalleryStore {
    path: PathBuf,
}

impl GalleryStore {
    pub fn open_default() -> Self {
        Self::at(default_gallery_path())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Newest first. Unreadable storage lists as empty.
    pub fn list(&self) -> Vec<GameDesignDocument> {
        let mut games = self.read_or_empty();
        games.sort_by_key(|g| std::cmp::Reverse(g.last_saved_or_zero()));
        games
    }

    /// Saves with the current time as `lastSaved`.
    pub fn upsert(&self, doc: GameDesignDocument) -> Option<GameDesignDocument> {
        self.upsert_at(doc, now_millis())
    }

    /// Replaces the entry with the same id in place, otherwise appends.
    /// Returns the stored value, or `None` if it could not be written.
    pub fn upsert_at(&self, doc: GameDesignDocument, now_ms: i64) -> Option<GameDesignDocument> {
        // A corrupt file is left alone rather than overwritten.
        let mut games = match self.read() {
            Ok(games) => games,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "gallery unreadable, not saving");
                return None;
            }
        };

        let entry = GameDesignDocument {
            id: Some(doc.id.clone().unwrap_or_else(|| uuid::Uuid::new_v4().to_string())),
            last_saved: Some(now_ms),
            ..doc
        };

        match games.iter_mut().find(|g| g.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => games.push(entry.clone()),
        }

        match self.write(&games) {
            Ok(()) => {
                tracing::info!(id = ?entry.id, count = games.len(), "saved canvas to gallery");
                Some(entry)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not save gallery");
                None
            }
        }
    }

    /// Removes the entry with `id`. Absent ids leave the file untouched.
    pub fn delete(&self, id: &str) -> bool {
        let mut games = match self.read() {
            Ok(games) => games,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "gallery unreadable, not deleting");
                return false;
            }
        };
        let before = games.len();
        games.retain(|g| g.id.as_deref() != Some(id));

        if games.len() == before {
            return true;
        }

        match self.write(&games) {
            Ok(()) => {
                tracing::info!(id, count = games.len(), "deleted canvas from gallery");
                true
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not delete from gallery");
                false
            }
        }
    }

    fn read_or_empty(&self) -> Vec<GameDesignDocument> {
        self.read().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "gallery unreadable, treating as empty");
            Vec::new()
        })
    }

    fn read(&self) -> Result<Vec<GameDesignDocument>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).context("reading gallery file"),
        };

        serde_json::from_str(&raw).context("parsing gallery file")
    }

    fn write(&self, games: &[GameDesignDocument]) -> Result<()> {
        let json = serde_json::to_string(games)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path).context("replacing gallery file")?;
        Ok(())
    }
}
