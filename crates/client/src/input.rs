//! Line commands typed at the prompt.
//!
//! Parsing is mode-agnostic; the engine rejects whatever the current mode
//! forbids and the rejection is shown like any other message.

use game_core::{Action, CombatCommand, Direction};

/// High-level outcome of parsing one input line.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Submit the decoded game action to the runtime.
    Submit(Action),
    /// Pick dialogue option `n` (zero-based) of the current node.
    Choose(usize),
    Save,
    Load,
    Reset,
    Look,
    Help,
    Quit,
}

pub const HELP: &str = "\
movement   w a s d | move <up|down|left|right>
world      interact (e) | shift (f) | use <item_id>
combat     attack | flee | skills | skill <skill_id> | cancel | rune <direction>
dialogue   say <n> | end
session    save | load | reset | look | help | quit";

pub fn parse(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Look);
    };
    let arg = words.next();

    let command = match (head.to_ascii_lowercase().as_str(), arg) {
        ("w", None) => step(Direction::Up),
        ("a", None) => step(Direction::Left),
        ("s", None) => step(Direction::Down),
        ("d", None) => step(Direction::Right),
        ("move" | "m", Some(dir)) => step(direction(dir)?),
        ("interact" | "e", None) => Command::Submit(Action::interact()),
        ("shift" | "f", None) => Command::Submit(Action::toggle_shift()),
        ("use" | "u", Some(item)) => Command::Submit(Action::use_item(item)),
        ("attack", None) => combat(CombatCommand::Attack),
        ("flee", None) => combat(CombatCommand::Flee),
        ("skills", None) => combat(CombatCommand::OpenSkills),
        ("cancel", None) => combat(CombatCommand::CancelSkill),
        ("skill", Some(skill)) => Command::Submit(Action::select_skill(skill)),
        ("rune" | "r", Some(dir)) => Command::Submit(Action::rune(direction(dir)?)),
        ("say", Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Command::Choose(n - 1),
            _ => return Err(format!("not an option number: {n}")),
        },
        ("end", None) => Command::Submit(Action::select_option(None)),
        ("save", None) => Command::Save,
        ("load", None) => Command::Load,
        ("reset", None) => Command::Reset,
        ("look" | "l", None) => Command::Look,
        ("help" | "?", None) => Command::Help,
        ("quit" | "q" | "exit", None) => Command::Quit,
        _ => return Err(format!("unknown command: {}", line.trim())),
    };

    if words.next().is_some() {
        return Err(format!("too many arguments: {}", line.trim()));
    }
    Ok(command)
}

fn step(direction: Direction) -> Command {
    Command::Submit(Action::step(direction))
}

fn combat(command: CombatCommand) -> Command {
    Command::Submit(Action::combat(command))
}

fn direction(word: &str) -> Result<Direction, String> {
    match word.to_ascii_lowercase().as_str() {
        "up" | "u" | "w" => Ok(Direction::Up),
        "down" | "d" | "s" => Ok(Direction::Down),
        "left" | "l" | "a" => Ok(Direction::Left),
        "right" | "r" => Ok(Direction::Right),
        _ => Err(format!("not a direction: {word}")),
    }
}
