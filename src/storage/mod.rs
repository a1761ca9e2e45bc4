//! # Storage - Save Game Persistence
//!
//! The game core only talks to the [`SaveStore`] trait. [`FileSaveStore`]
//! keeps one pretty-printed JSON snapshot per save:
//!
//! ```text
//! <data_dir>/
//! └── saves/
//!     ├── run1.json
//!     └── game-3f9a0c1d.json
//! ```
//!
//! Writes go to a temp file that is renamed over the target while an
//! exclusive `fs2` lock is held on a sidecar lock file, so a crash mid-write
//! never leaves a truncated save behind. [`MemorySaveStore`] keeps snapshots
//! in a map for tests and throwaway sessions.
//!
//! ```rust,no_run
//! use dungeoncrawl::storage::{FileSaveStore, SaveStore};
//!
//! fn main() -> Result<(), dungeoncrawl::storage::StorageError> {
//!     let store = FileSaveStore::new("./data")?;
//!     for id in store.list()? {
//!         println!("{}", id);
//!     }
//!     Ok(())
//! }
//! ```

use fs2::FileExt;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::game::state::Game;
use crate::validation::{validate_save_name, SaveNameError};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save file is not valid: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidName(#[from] SaveNameError),

    #[error("no save named '{0}'")]
    NotFound(String),

    #[error("save does not fit this dungeon: {0}")]
    LayoutMismatch(String),

    #[error("snapshot has no save id")]
    MissingSaveId,
}

/// Persistence collaborator for whole-game snapshots.
pub trait SaveStore {
    /// `Ok(None)` when no save with that id exists.
    fn load(&self, save_id: &str) -> Result<Option<Game>, StorageError>;

    /// Store under the snapshot's own `save_id`; returns that id.
    fn save(&mut self, game: &Game) -> Result<String, StorageError>;

    /// Returns whether anything was removed.
    fn delete(&mut self, save_id: &str) -> Result<bool, StorageError>;

    /// Known save ids, sorted.
    fn list(&self) -> Result<Vec<String>, StorageError>;
}

/// Generate an id for a game saved without a name.
pub fn fresh_save_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("game-{}", &id[..8])
}

fn snapshot_id(game: &Game) -> Result<String, StorageError> {
    let id = game.save_id.as_deref().ok_or(StorageError::MissingSaveId)?;
    Ok(validate_save_name(id)?)
}

#[derive(Debug, Clone)]
pub struct FileSaveStore {
    dir: PathBuf,
}

impl FileSaveStore {
    /// Open (and create if needed) `<data_dir>/saves`.
    pub fn new(data_dir: &str) -> Result<Self, StorageError> {
        let dir = Path::new(data_dir).join("saves");
        fs::create_dir_all(&dir)?;
        Ok(FileSaveStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, save_id: &str) -> Result<PathBuf, StorageError> {
        let name = validate_save_name(save_id)?;
        Ok(self.dir.join(format!("{}.json", name)))
    }
}

fn write_json_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("save.json");
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(dir.join(format!(".{}.lock", base)))?;
    lock_file.lock_exclusive()?;

    let mut counter = 0u32;
    let tmp_path = loop {
        let cand = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&cand) {
            Ok(mut tmp) => {
                tmp.write_all(content.as_bytes())?;
                tmp.sync_all()?;
                break cand;
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e),
        }
    };
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    if let Ok(dirf) = File::open(dir) {
        let _ = dirf.sync_all();
    }
    drop(lock_file);
    Ok(())
}

impl SaveStore for FileSaveStore {
    fn load(&self, save_id: &str) -> Result<Option<Game>, StorageError> {
        let path = self.path_for(save_id)?;
        let raw = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let game: Game = serde_json::from_str(raw.trim_start_matches('\0'))?;
        debug!("storage: loaded {}", path.display());
        Ok(Some(game))
    }

    fn save(&mut self, game: &Game) -> Result<String, StorageError> {
        let id = snapshot_id(game)?;
        let path = self.path_for(&id)?;
        let json = serde_json::to_string_pretty(game)?;
        write_json_atomic(&path, &json)?;
        debug!("storage: wrote {} ({} bytes)", path.display(), json.len());
        Ok(id)
    }

    fn delete(&mut self, save_id: &str) -> Result<bool, StorageError> {
        let path = self.path_for(save_id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                let lock = self.dir.join(format!(".{}.json.lock", save_id.trim()));
                let _ = fs::remove_file(lock);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                warn!("storage: skipping non-UTF-8 file in {}", self.dir.display());
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            if let Some(id) = name.strip_suffix(".json") {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    saves: BTreeMap<String, String>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// Snapshots are kept as JSON so loads go through the same decoding as files.
impl SaveStore for MemorySaveStore {
    fn load(&self, save_id: &str) -> Result<Option<Game>, StorageError> {
        let id = validate_save_name(save_id)?;
        match self.saves.get(&id) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, game: &Game) -> Result<String, StorageError> {
        let id = snapshot_id(game)?;
        self.saves.insert(id.clone(), serde_json::to_string(game)?);
        Ok(id)
    }

    fn delete(&mut self, save_id: &str) -> Result<bool, StorageError> {
        let id = validate_save_name(save_id)?;
        Ok(self.saves.remove(&id).is_some())
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.saves.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::dungeon::default_dungeon;
    use crate::game::treasure::{Treasure, TreasureType};

    fn sample_game(id: &str) -> Game {
        let mut g = Game::new(&default_dungeon(), &GameConfig::default());
        g.save_id = Some(id.to_string());
        g.player.experience = 40;
        g.player.health = g.player.health.damaged(25);
        g.player.pick_up(Treasure {
            kind: TreasureType::Artifact,
            name: "Crystal Amulet".into(),
            value: 150,
            description: "It is colder than the air around it.".into(),
        });
        g
    }

    #[test]
    fn file_store_save_load_delete() {
        let td = tempfile::tempdir().unwrap();
        let mut store = FileSaveStore::new(&td.path().to_string_lossy()).unwrap();
        let g = sample_game("run1");

        assert_eq!(store.save(&g).unwrap(), "run1");
        assert!(store.dir().join("run1.json").exists());
        let back = store.load("run1").unwrap().expect("present");
        assert_eq!(back, g);
        assert_eq!(back.player.health.current(), 75);
        assert_eq!(back.player.inventory[0].name, "Crystal Amulet");

        assert_eq!(store.list().unwrap(), vec!["run1".to_string()]);
        assert!(store.delete("run1").unwrap());
        assert!(!store.delete("run1").unwrap());
        assert!(store.load("run1").unwrap().is_none());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn overwrite_replaces_previous_snapshot() {
        let td = tempfile::tempdir().unwrap();
        let mut store = FileSaveStore::new(&td.path().to_string_lossy()).unwrap();
        let mut g = sample_game("slot");
        store.save(&g).unwrap();
        g.turn = 42;
        store.save(&g).unwrap();
        assert_eq!(store.load("slot").unwrap().unwrap().turn, 42);
        // lock and temp files never show up as saves
        assert_eq!(store.list().unwrap(), vec!["slot".to_string()]);
    }

    #[test]
    fn bad_names_and_missing_ids_fail() {
        let td = tempfile::tempdir().unwrap();
        let mut store = FileSaveStore::new(&td.path().to_string_lossy()).unwrap();
        assert!(matches!(
            store.load("../escape"),
            Err(StorageError::InvalidName(_))
        ));
        let mut g = sample_game("x");
        g.save_id = None;
        assert!(matches!(store.save(&g), Err(StorageError::MissingSaveId)));
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let td = tempfile::tempdir().unwrap();
        let store = FileSaveStore::new(&td.path().to_string_lossy()).unwrap();
        fs::write(store.dir().join("broken.json"), "{ not json").unwrap();
        assert!(matches!(store.load("broken"), Err(StorageError::Json(_))));
    }

    #[test]
    fn memory_store_behaves_like_files() {
        let mut store = MemorySaveStore::new();
        let g = sample_game("mem");
        assert_eq!(store.save(&g).unwrap(), "mem");
        assert_eq!(store.load("mem").unwrap(), Some(g));
        assert_eq!(store.list().unwrap(), vec!["mem".to_string()]);
        assert!(store.delete("mem").unwrap());
        assert!(store.load("mem").unwrap().is_none());
    }

    #[test]
    fn fresh_ids_are_valid_names() {
        let id = fresh_save_id();
        assert!(id.starts_with("game-"));
        assert_eq!(id.len(), 13);
        assert!(validate_save_name(&id).is_ok());
    }
}
