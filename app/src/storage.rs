//! File-backed storage adapter.
//!
//! Implements the engine's storage capability with one file per key under
//! a data directory.

use std::fs;
use std::io;
use std::path::PathBuf;
use trailmark_engine::{Error, Result, Storage};

/// Key-value storage persisted as JSON files.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage under `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| Error::StorageWrite(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::StorageRead(e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value).map_err(|e| Error::StorageWrite(e.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::StorageWrite(e.to_string())),
        }
    }
}
