//! Versioned, checksummed save envelope.

use chrono::{DateTime, Utc};
use game_core::GameState;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{RepositoryError, Result};

/// Current save format. Records with any other version are rejected.
pub const FORMAT_VERSION: u32 = 1;

/// One saved session.
///
/// `state` is kept as a JSON value so a record from another format version
/// can be read far enough to report its version instead of a parse error.
/// `checksum` is the SHA-256 of the serialized value, hex encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
    pub checksum: String,
    pub state: serde_json::Value,
}

impl SaveRecord {
    /// Wraps `state` in a record stamped with the current time.
    pub fn seal(state: &GameState) -> Result<Self> {
        let state = serde_json::to_value(state)?;
        Ok(Self {
            format_version: FORMAT_VERSION,
            saved_at: Utc::now(),
            checksum: checksum(&state)?,
            state,
        })
    }

    /// Verifies version and checksum, decodes the state, then checks the
    /// invariants the engine relies on.
    pub fn open(&self) -> Result<GameState> {
        if self.format_version != FORMAT_VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }

        let actual = checksum(&self.state)?;
        if actual != self.checksum {
            return Err(RepositoryError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }

        let state: GameState = serde_json::from_value(self.state.clone())
            .map_err(|e| RepositoryError::CorruptedData(e.to_string()))?;
        check_invariants(&state)?;
        Ok(state)
    }

    /// Nonce of the saved session, if the state carries one.
    pub fn nonce(&self) -> Option<u64> {
        self.state.get("nonce").and_then(serde_json::Value::as_u64)
    }
}

/// The checksum is recomputable, so a hand-edited record can pass it.
fn check_invariants(state: &GameState) -> Result<()> {
    let corrupt = |reason: String| Err(RepositoryError::CorruptedData(reason));
    let stats = &state.player.stats;

    if stats.hp > stats.max_hp {
        return corrupt(format!("hp {} exceeds max_hp {}", stats.hp, stats.max_hp));
    }
    if stats.mp > stats.max_mp {
        return corrupt(format!("mp {} exceeds max_mp {}", stats.mp, stats.max_mp));
    }
    if stats.level == 0 {
        return corrupt("level must be at least 1".to_owned());
    }

    let world = &state.world;
    if world.tiles().len() != world.dimensions.area() {
        return corrupt(format!(
            "{} tiles for a {}x{} zone",
            world.tiles().len(),
            world.dimensions.width,
            world.dimensions.height
        ));
    }
    if !world.contains(state.player.position) {
        return corrupt(format!("player position {} is outside the zone", state.player.position));
    }
    let broken_enemy = state
        .mode
        .encounter()
        .filter(|encounter| encounter.enemy.hp > encounter.enemy.max_hp);
    if let Some(encounter) = broken_enemy {
        return corrupt(format!("{} hp exceeds its maximum", encounter.enemy.name));
    }
    Ok(())
}

fn checksum(state: &serde_json::Value) -> Result<String> {
    let bytes = serde_json::to_vec(state)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::OracleManager;

    fn state() -> GameState {
        let oracles = OracleManager::builtin();
        GameState::new_game(&oracles.as_game_env(), 11).unwrap()
    }

    #[test]
    fn sealed_record_opens_to_same_state() {
        let state = state();
        let record = SaveRecord::seal(&state).unwrap();

        assert_eq!(record.format_version, FORMAT_VERSION);
        assert_eq!(record.checksum.len(), 64);
        assert_eq!(record.nonce(), Some(0));
        assert_eq!(record.open().unwrap(), state);
    }

    #[test]
    fn tampered_state_fails_checksum() {
        let mut record = SaveRecord::seal(&state()).unwrap();
        record.state["nonce"] = serde_json::json!(99);

        assert!(matches!(
            record.open(),
            Err(RepositoryError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn other_versions_are_rejected() {
        let mut record = SaveRecord::seal(&state()).unwrap();
        record.format_version = FORMAT_VERSION + 1;

        assert!(matches!(
            record.open(),
            Err(RepositoryError::UnsupportedVersion { found: 2, expected: 1 })
        ));
    }

    #[test]
    fn well_formed_but_wrong_shape_is_corrupt() {
        let value = serde_json::json!({ "nonce": 1 });
        let record = SaveRecord {
            format_version: FORMAT_VERSION,
            saved_at: Utc::now(),
            checksum: checksum(&value).unwrap(),
            state: value,
        };

        assert!(matches!(record.open(), Err(RepositoryError::CorruptedData(_))));
    }

    #[test]
    fn resealed_state_with_broken_stats_is_corrupt() {
        let mut state = state();
        state.player.stats.hp = 500;
        let record = SaveRecord::seal(&state).unwrap();

        let err = record.open().unwrap_err();
        assert!(matches!(err, RepositoryError::CorruptedData(ref reason) if reason.contains("max_hp")));
    }

    #[test]
    fn player_outside_the_zone_is_corrupt() {
        let mut state = state();
        state.player.position = game_core::Position::new(-1, 40);
        let record = SaveRecord::seal(&state).unwrap();

        assert!(matches!(record.open(), Err(RepositoryError::CorruptedData(_))));
    }
}
