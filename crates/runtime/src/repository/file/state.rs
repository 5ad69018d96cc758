//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{RepositoryError, Result, SaveRecord, StateRepository};

/// File-based implementation of StateRepository.
///
/// Each slot is stored as `{slot}.json`. Writes go to `{slot}.json.tmp`
/// first and are renamed into place, so a crash never leaves a half-written
/// record under the real name.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based state repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a slot file.
    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", slot))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, slot: &str, record: &SaveRecord) -> Result<()> {
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(record)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            target: "runtime::repository",
            slot,
            path = %path.display(),
            "Saved record"
        );

        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveRecord>> {
        let path = self.slot_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let record: SaveRecord = serde_json::from_slice(&bytes)
            .map_err(|e| RepositoryError::CorruptedData(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(
            target: "runtime::repository",
            slot,
            path = %path.display(),
            "Loaded record"
        );

        Ok(Some(record))
    }

    fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::repository", slot, "Deleted record");
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename.strip_suffix(".json")
            {
                slots.push(slot.to_owned());
            }
        }

        slots.sort_unstable();
        Ok(slots)
    }
}
