//! Repository contract for saving and loading the session.

use super::{Result, SaveRecord};

/// Repository for game state persistence and loading.
///
/// Records are keyed by a save slot name. Implementations store and return
/// records verbatim; [`SaveRecord::open`] does the verification.
pub trait StateRepository: Send + Sync {
    /// Save a record under `slot`, replacing any previous one.
    fn save(&self, slot: &str, record: &SaveRecord) -> Result<()>;

    /// Load the record stored under `slot`.
    fn load(&self, slot: &str) -> Result<Option<SaveRecord>>;

    /// Check if a record exists.
    fn exists(&self, slot: &str) -> bool;

    /// Delete a record. Deleting a missing slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all slots holding a record.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
