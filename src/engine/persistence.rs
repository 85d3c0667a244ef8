use std::fs;
use std::path::{Path, PathBuf};
use crate::model::Profile;
use crate::{Result, Error};
use log::debug;

#[allow(unused_imports)]
use crate::engine::MemStore;

const DATA_FILE: &str = "profiles.json";

/// Handles disk I/O for the [`MemStore`].
///
/// Persistence uses an atomic "write-then-rename" strategy to ensure data integrity.
/// All documents are stored, in insertion order, in a single `profiles.json` file.
pub struct Persistence {
    data_dir: PathBuf,
}

impl Persistence {
    /// Initializes a new `Persistence` handler in the specified directory.
    ///
    /// If the directory does not exist, it will be created.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                Error::StoreUnavailable(format!("cannot create data directory {:?}: {}", dir, e))
            })?;
        }
        Ok(Self { data_dir: dir })
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE)
    }

    /// Writes every document to the data file atomically.
    ///
    /// This method writes to a temporary file first and then renames it to the
    /// final destination, so a crash mid-write leaves the previous file intact.
    pub fn save_all(&self, profiles: &[Profile]) -> Result<()> {
        let file_path = self.data_file();
        let temp_path = file_path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(profiles)?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &file_path)?;
        debug!("Persisted {} profile(s) to {:?}", profiles.len(), file_path);

        Ok(())
    }

    /// Loads all documents from the data directory.
    ///
    /// A missing data file is an empty store. An unreadable or corrupt file
    /// makes the store unavailable rather than silently discarding its data.
    pub fn load_all(&self) -> Result<Vec<Profile>> {
        let path = self.data_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read(&path)
            .map_err(|e| Error::StoreUnavailable(format!("cannot read {:?}: {}", path, e)))?;
        serde_json::from_slice(&content)
            .map_err(|e| Error::StoreUnavailable(format!("corrupt data file {:?}: {}", path, e)))
    }
}
