use game_core::{Direction, SkillDefinition, SkillEffect};

pub const CODE_BREAKER: &str = "code_breaker";
pub const PATCH_ROUTINE: &str = "patch_routine";
pub const OVERCLOCK: &str = "overclock";

pub fn skills() -> Vec<SkillDefinition> {
    use Direction::*;

    vec![
        SkillDefinition {
            id: CODE_BREAKER.into(),
            name: "Code Breaker".into(),
            mp_cost: 10,
            effect: SkillEffect::Damage { scale_percent: 250 },
            sequence: vec![Up, Down, Up],
        },
        SkillDefinition {
            id: PATCH_ROUTINE.into(),
            name: "Patch Routine".into(),
            mp_cost: 15,
            effect: SkillEffect::Heal { amount: 30 },
            sequence: vec![Left, Right, Left, Right],
        },
        SkillDefinition {
            id: OVERCLOCK.into(),
            name: "Overclock".into(),
            mp_cost: 20,
            effect: SkillEffect::Buff { attack: 5 },
            sequence: vec![Up, Up, Down, Down],
        },
    ]
}
