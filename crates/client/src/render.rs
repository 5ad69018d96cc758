//! Plain-text snapshot of the session.

use std::fmt::Write;

use game_content::ContentPack;
use game_core::{CombatPhase, Encounter, GameState, InteractableKind, Mode, Position, Tile, TileKind};

const LOG_LINES: usize = 5;

pub fn snapshot(state: &GameState, pack: &ContentPack) -> String {
    let mut out = String::new();
    let stats = &state.player.stats;

    let _ = writeln!(out, "== {} ==", state.zone_name());
    draw_map(&mut out, state);
    let _ = writeln!(
        out,
        "HP {}/{}  MP {}/{}  LV {}  XP {}  CR {}  SHIFT {}  [{}]",
        stats.hp,
        stats.max_hp,
        stats.mp,
        stats.max_mp,
        stats.level,
        stats.xp,
        stats.credits,
        if state.shift_active { "on" } else { "off" },
        state.mode.label(),
    );

    if !state.player.inventory.is_empty() {
        let items: Vec<_> = state
            .player
            .inventory
            .iter()
            .map(|item| format!("{} ({})", item.name, item.id.as_str()))
            .collect();
        let _ = writeln!(out, "Inventory: {}", items.join(", "));
    }

    match &state.mode {
        Mode::Combat(encounter) => draw_combat(&mut out, encounter, state, pack),
        Mode::Dialogue(dialogue) => {
            let node = pack
                .dialogues
                .iter()
                .find(|tree| tree.id == dialogue.tree)
                .and_then(|tree| tree.node(&dialogue.node));
            if let Some(node) = node {
                let _ = writeln!(out, "{}: \"{}\"", node.speaker, node.text);
                for (i, option) in node.options.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", i + 1, option.label);
                }
            }
        }
        Mode::Transition(pending) => {
            let _ = writeln!(out, "Transitioning to {}...", pending.target.zone_name);
        }
        Mode::GameOver => {
            let _ = writeln!(out, "Connection lost. Type `load` or `reset`.");
        }
        Mode::Exploring => {}
    }

    let mut recent: Vec<_> = state.log.entries().take(LOG_LINES).collect();
    recent.reverse();
    for entry in recent {
        let _ = writeln!(out, "> {}", entry.message);
    }
    out
}

fn draw_map(out: &mut String, state: &GameState) {
    let dims = state.world.dimensions;
    for y in 0..dims.height as i32 {
        let row: String = (0..dims.width as i32)
            .map(|x| {
                let position = Position::new(x, y);
                if position == state.player.position {
                    '@'
                } else {
                    state
                        .world
                        .tile(position)
                        .map_or(' ', |tile| glyph(tile, state.shift_active))
                }
            })
            .collect();
        let _ = writeln!(out, "{row}");
    }
}

fn glyph(tile: &Tile, shift_active: bool) -> char {
    if !tile.is_revealed() {
        return ' ';
    }
    let visible = tile
        .interactable
        .as_ref()
        .filter(|it| !it.is_hidden || shift_active);
    match visible.map(|it| &it.kind) {
        Some(InteractableKind::Npc { .. }) => 'N',
        Some(InteractableKind::Item { .. }) => '$',
        Some(InteractableKind::Enemy { .. }) => 'E',
        Some(InteractableKind::ZoneGate { .. }) | None => match tile.kind {
            TileKind::Empty => '.',
            TileKind::Wall => '#',
            TileKind::Water => '~',
            TileKind::Door => '+',
            TileKind::Void => '%',
        },
    }
}

fn draw_combat(out: &mut String, encounter: &Encounter, state: &GameState, pack: &ContentPack) {
    let enemy = &encounter.enemy;
    let combat = &encounter.combat;
    let _ = writeln!(out, "{}  HP {}/{}", enemy.name, enemy.hp, enemy.max_hp);

    match combat.phase {
        CombatPhase::Menu => {
            let _ = writeln!(out, "attack | skills | flee");
        }
        CombatPhase::SkillSelect => {
            for skill in &pack.skills {
                let mark = if skill.mp_cost <= state.player.stats.mp { ' ' } else { 'x' };
                let _ = writeln!(
                    out,
                    " {mark} {} ({}) {} MP",
                    skill.name,
                    skill.id.as_str(),
                    skill.mp_cost
                );
            }
            let _ = writeln!(out, "skill <id> | cancel");
        }
        CombatPhase::Input => {
            let sequence = combat
                .selected_skill
                .as_ref()
                .and_then(|id| pack.skills.iter().find(|skill| &skill.id == id));
            if let Some(skill) = sequence {
                let runes: Vec<_> = skill.sequence.iter().map(ToString::to_string).collect();
                let _ = writeln!(
                    out,
                    "{}: {}  [{}/{}]",
                    skill.name,
                    runes.join(" "),
                    combat.input_buffer.len(),
                    skill.sequence.len()
                );
            }
            let _ = writeln!(out, "rune <direction> | cancel");
        }
        CombatPhase::Waiting => {
            let _ = writeln!(out, "...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::OracleManager;

    fn fresh() -> GameState {
        GameState::new_game(&OracleManager::builtin().as_game_env(), 1).unwrap()
    }

    #[test]
    fn snapshot_shows_zone_player_and_stats() {
        let text = snapshot(&fresh(), &ContentPack::builtin());
        assert!(text.starts_with("== Sector-01: Awakening =="));
        assert_eq!(text.matches('@').count(), 1);
        assert!(text.contains("HP 100/100  MP 50/50  LV 1"));
        assert!(text.contains("[exploring]"));
    }

    #[test]
    fn unrevealed_tiles_stay_blank() {
        let state = fresh();
        let text = snapshot(&state, &ContentPack::builtin());
        let map_rows: Vec<_> = text.lines().skip(1).take(10).collect();
        // The far corner is well outside the reveal radius.
        assert_eq!(map_rows[9].chars().nth(11), Some(' '));
    }

    #[test]
    fn hidden_interactables_need_shift() {
        let mut state = fresh();
        let cache = Position::new(10, 1);
        state.world.reveal_around(cache, 0.0);
        let tile = state.world.tile(cache).unwrap();
        assert_eq!(glyph(tile, false), '.');
        assert_eq!(glyph(tile, true), '$');
    }
}
