//! In-memory StateRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{RepositoryError, Result, SaveRecord, StateRepository};

/// In-memory implementation of StateRepository.
#[derive(Default)]
pub struct InMemoryStateRepo {
    records: RwLock<HashMap<String, SaveRecord>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, slot: &str, record: &SaveRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(slot.to_owned(), record.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut slots: Vec<String> = records.keys().cloned().collect();
        slots.sort_unstable();
        Ok(slots)
    }
}
