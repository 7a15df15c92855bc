//! # File-backed Slot Storage
//!
//! Each slot lives in its own JSON file in the state directory:
//!
//! ```text
//! ~/.local/share/startpage/state/
//! ├── clickStats.json
//! ├── categoriesOrder.json
//! ├── customOrder.json
//! └── frequentSitesVisible.json
//! ```
//!
//! Writes replace the whole file; the last writer wins.

use super::slot::{Slot, SlotStore};
use crate::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.json", slot.key()))
    }
}

impl SlotStore for FileStore {
    fn read(&self, slot: Slot) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, slot: Slot, value: String) -> Result<()> {
        fs::write(self.slot_path(slot), value)?;
        Ok(())
    }

    fn remove(&mut self, slot: Slot) -> Result<()> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Platform data directory for persisted state
pub fn default_state_dir() -> anyhow::Result<PathBuf> {
    use anyhow::Context;

    let proj_dirs = directories::ProjectDirs::from("", "", "startpage")
        .context("Failed to determine application data directory")?;

    Ok(proj_dirs.data_dir().join("state"))
}
