use crate::config::{GameConfig, LevelGrowth};

use super::common::{Direction, ItemId, Position};
use super::tile::Item;

/// Player statistics.
///
/// Invariant: `hp <= max_hp` and `mp <= max_mp` at all times. Every mutator on
/// this type preserves it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub level: u32,
    pub xp: u32,
    pub credits: u32,
}

impl PlayerStats {
    pub fn from_config(config: &GameConfig) -> Self {
        let start = &config.starting_stats;
        Self {
            hp: start.max_hp,
            max_hp: start.max_hp,
            mp: start.max_mp,
            max_mp: start.max_mp,
            attack: start.attack,
            defense: start.defense,
            level: start.level,
            xp: 0,
            credits: 0,
        }
    }

    /// Applies incoming damage, flooring health at zero. Returns the damage dealt.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Restores health up to the maximum. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += restored;
        restored
    }

    /// Restores ether up to the maximum. Returns the amount actually restored.
    pub fn restore_mp(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_mp.saturating_sub(self.mp));
        self.mp += restored;
        restored
    }

    /// Spends ether if affordable.
    pub fn spend_mp(&mut self, cost: u32) -> bool {
        if self.mp < cost {
            return false;
        }
        self.mp -= cost;
        true
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Adds experience and applies every level-up it unlocks.
    ///
    /// A level-up happens while cumulative xp reaches `level × xp_per_level`;
    /// each one raises the maxima and attack/defense, then fully restores hp/mp.
    /// Returns the number of levels gained. A zero `xp_per_level` disables
    /// levelling.
    pub fn gain_xp(&mut self, xp: u32, growth: &LevelGrowth) -> u32 {
        self.xp = self.xp.saturating_add(xp);
        if growth.xp_per_level == 0 {
            return 0;
        }

        let mut gained = 0;
        while self.level < u32::MAX && self.xp >= self.level.saturating_mul(growth.xp_per_level) {
            self.level += 1;
            self.max_hp = self.max_hp.saturating_add(growth.max_hp);
            self.max_mp = self.max_mp.saturating_add(growth.max_mp);
            self.attack = self.attack.saturating_add(growth.attack);
            self.defense = self.defense.saturating_add(growth.defense);
            gained += 1;
        }

        if gained > 0 {
            self.hp = self.max_hp;
            self.mp = self.max_mp;
        }
        gained
    }
}

/// Everything the session tracks about the controllable character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position: Position,
    pub facing: Direction,
    pub stats: PlayerStats,
    /// Ordered; duplicates allowed.
    pub inventory: Vec<Item>,
}

impl PlayerState {
    pub fn new(position: Position, facing: Direction, stats: PlayerStats) -> Self {
        Self {
            position,
            facing,
            stats,
            inventory: Vec::new(),
        }
    }

    /// The tile the player is currently facing.
    pub fn facing_target(&self) -> Position {
        self.position.step(self.facing)
    }

    pub fn find_item(&self, id: &ItemId) -> Option<&Item> {
        self.inventory.iter().find(|item| &item.id == id)
    }

    /// Removes the first inventory entry with the given id.
    pub fn take_item(&mut self, id: &ItemId) -> Option<Item> {
        let index = self.inventory.iter().position(|item| &item.id == id)?;
        Some(self.inventory.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> PlayerStats {
        PlayerStats::from_config(&GameConfig::default())
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut stats = stats();
        assert_eq!(stats.take_damage(250), 100);
        assert_eq!(stats.hp, 0);
        assert!(stats.is_defeated());
    }

    #[test]
    fn heal_is_capped() {
        let mut stats = stats();
        stats.take_damage(10);
        assert_eq!(stats.heal(30), 10);
        assert_eq!(stats.hp, stats.max_hp);
    }

    #[test]
    fn level_up_restores_resources() {
        let growth = LevelGrowth::default();
        let mut stats = stats();
        stats.take_damage(40);
        stats.spend_mp(20);

        assert_eq!(stats.gain_xp(99, &growth), 0);
        assert_eq!(stats.hp, 60);

        assert_eq!(stats.gain_xp(1, &growth), 1);
        assert_eq!(stats.level, 2);
        assert_eq!(stats.max_hp, 120);
        assert_eq!(stats.max_mp, 60);
        assert_eq!(stats.attack, 13);
        assert_eq!(stats.defense, 7);
        assert_eq!(stats.hp, 120);
        assert_eq!(stats.mp, 60);
    }

    #[test]
    fn large_reward_grants_several_levels() {
        let growth = LevelGrowth::default();
        let mut stats = stats();
        // 299 xp crosses level 1 (100) and level 2 (200) thresholds, not level 3 (300).
        assert_eq!(stats.gain_xp(299, &growth), 2);
        assert_eq!(stats.level, 3);
    }

    #[test]
    fn zero_xp_per_level_never_levels() {
        let growth = LevelGrowth {
            xp_per_level: 0,
            ..LevelGrowth::default()
        };
        let mut stats = stats();
        assert_eq!(stats.gain_xp(25, &growth), 0);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.xp, 25);
    }

    #[test]
    fn levelling_stops_at_the_top_level() {
        let growth = LevelGrowth {
            xp_per_level: 1,
            ..LevelGrowth::default()
        };
        let mut stats = stats();
        stats.level = u32::MAX - 2;
        assert_eq!(stats.gain_xp(u32::MAX, &growth), 2);
        assert_eq!(stats.level, u32::MAX);
    }

    #[test]
    fn heal_above_maximum_restores_nothing() {
        let mut stats = stats();
        stats.hp = 500;
        stats.mp = 90;
        assert_eq!(stats.heal(30), 0);
        assert_eq!(stats.restore_mp(10), 0);
        assert_eq!(stats.hp, 500);
    }
}
