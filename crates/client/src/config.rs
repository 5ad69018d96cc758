//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use runtime::RuntimeConfig;

const APP_NAME: &str = "ethershift";

/// Everything the client needs before the runtime exists.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub save_data_dir: PathBuf,
    pub save_slot: String,
    /// Directory holding `config.toml`, `items.ron` and friends.
    /// Falls back to the built-in content when unset.
    pub content_dir: Option<PathBuf>,
    /// Rules override applied on top of whichever content was loaded.
    pub game_config: Option<PathBuf>,
    pub game_seed: u64,
    pub log_dir: PathBuf,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SAVE_DATA_DIR` - Directory for save records (default: platform data dir)
    /// - `SAVE_SLOT` - Save slot key (default: `ethershift_save_v1`)
    /// - `CONTENT_DIR` - Content directory (default: built-in content)
    /// - `GAME_CONFIG` - TOML file overriding the game rules
    /// - `GAME_SEED` - Seed for new sessions (default: random)
    /// - `LOG_DIR` - Directory for the client log (default: platform cache dir)
    pub fn from_env() -> Self {
        let dirs = directories::ProjectDirs::from("", "", APP_NAME);

        let save_data_dir = env::var("SAVE_DATA_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs.as_ref().map(|d| d.data_dir().join("saves")))
            .unwrap_or_else(|| PathBuf::from("./save_data"));

        let log_dir = env::var("LOG_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs.as_ref().map(|d| d.cache_dir().join("logs")))
            .unwrap_or_else(|| PathBuf::from("/tmp/ethershift/logs"));

        Self {
            save_data_dir,
            save_slot: env::var("SAVE_SLOT")
                .unwrap_or_else(|_| RuntimeConfig::DEFAULT_SAVE_SLOT.to_owned()),
            content_dir: env::var("CONTENT_DIR").ok().map(PathBuf::from),
            game_config: env::var("GAME_CONFIG").ok().map(PathBuf::from),
            game_seed: read_env::<u64>("GAME_SEED").unwrap_or_else(rand::random),
            log_dir,
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            game_seed: self.game_seed,
            save_slot: self.save_slot.clone(),
            ..RuntimeConfig::default()
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
