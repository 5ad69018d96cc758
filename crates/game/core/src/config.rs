/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Zone loaded for a new game and used as the fallback for unknown zone ids.
    pub starting_zone: String,
    /// Euclidean fog-of-war reveal radius in tiles.
    pub reveal_radius: f64,
    /// Number of log lines retained in the session log.
    pub log_capacity: usize,
    pub starting_stats: StartingStats,
    pub level_growth: LevelGrowth,
    pub delays: ContinuationDelays,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Longest rune sequence a skill may declare.
    pub const MAX_RUNE_LENGTH: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_ZONE: &'static str = "sector_01";
    pub const DEFAULT_REVEAL_RADIUS: f64 = 2.5;
    pub const DEFAULT_LOG_CAPACITY: usize = 50;

    pub fn new() -> Self {
        Self {
            starting_zone: Self::DEFAULT_STARTING_ZONE.to_owned(),
            reveal_radius: Self::DEFAULT_REVEAL_RADIUS,
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
            starting_stats: StartingStats::default(),
            level_growth: LevelGrowth::default(),
            delays: ContinuationDelays::default(),
        }
    }

    pub fn with_reveal_radius(mut self, reveal_radius: f64) -> Self {
        self.reveal_radius = reveal_radius;
        self
    }

    pub fn with_starting_zone(mut self, zone: impl Into<String>) -> Self {
        self.starting_zone = zone.into();
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Player statistics for a fresh session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StartingStats {
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub level: u32,
}

impl Default for StartingStats {
    fn default() -> Self {
        Self {
            max_hp: 100,
            max_mp: 50,
            attack: 10,
            defense: 5,
            level: 1,
        }
    }
}

/// Stat increases applied per level gained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelGrowth {
    /// Level `L` is left once cumulative xp reaches `L × xp_per_level`.
    pub xp_per_level: u32,
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
}

impl Default for LevelGrowth {
    fn default() -> Self {
        Self {
            xp_per_level: 100,
            max_hp: 20,
            max_mp: 10,
            attack: 3,
            defense: 2,
        }
    }
}

/// Fixed delays (milliseconds) before scheduled continuations fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContinuationDelays {
    pub enemy_turn_ms: u64,
    pub skill_cast_ms: u64,
    pub gate_step_ms: u64,
    pub zone_transition_ms: u64,
}

impl Default for ContinuationDelays {
    fn default() -> Self {
        Self {
            enemy_turn_ms: 1000,
            skill_cast_ms: 300,
            gate_step_ms: 100,
            zone_transition_ms: 1500,
        }
    }
}
