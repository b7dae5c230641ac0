//! Structured battle events.
//!
//! The battle emits these for every resolved turn. Only the summary events
//! (`is_logged`) go into the bounded battle log; the rest exist for whatever
//! renders the fight.

use std::fmt;

use serde::Serialize;

use crate::combatant::Archetype;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BattleEvent {
    BattleStarted {
        arena: String,
    },
    FirstMover {
        name: String,
    },
    Attacked {
        attacker: String,
        target: String,
        /// Set when an unrecognised action code was forced into an attack.
        fallback: bool,
    },
    Hit {
        attacker: String,
        archetype: Archetype,
        target: String,
        raw: i32,
        dealt: i32,
        target_health: i32,
    },
    Hiding {
        name: String,
    },
    SpecialUsed {
        attacker: String,
        target: String,
    },
    Smash {
        attacker: String,
        target: String,
        raw: i32,
        dealt: i32,
        target_health: i32,
    },
    Vanish {
        name: String,
    },
    Healed {
        name: String,
        before: i32,
        after: i32,
    },
    SpecialNotReady {
        name: String,
        cooldown: u32,
    },
    Dodged {
        name: String,
    },
    Victory {
        winner: String,
    },
}

impl BattleEvent {
    pub fn is_logged(&self) -> bool {
        matches!(
            self,
            BattleEvent::BattleStarted { .. }
                | BattleEvent::FirstMover { .. }
                | BattleEvent::Attacked { .. }
                | BattleEvent::SpecialUsed { .. }
                | BattleEvent::Dodged { .. }
                | BattleEvent::Victory { .. }
        )
    }

    /// Magnitude carried by the event, if any.
    pub fn magnitude(&self) -> Option<i32> {
        match self {
            BattleEvent::Hit { dealt, .. } | BattleEvent::Smash { dealt, .. } => Some(*dealt),
            BattleEvent::Healed { before, after, .. } => Some(after - before),
            _ => None,
        }
    }

    /// The archetype's announcement for hits, smashes and heals.
    pub fn flavor(&self) -> Option<String> {
        match self {
            BattleEvent::Hit {
                attacker, archetype, ..
            } => Some(format!("{attacker} {}", archetype.attack_line())),
            BattleEvent::Smash { attacker, .. } => Some(format!(
                "{attacker} {}",
                Archetype::Warrior.special_line()
            )),
            BattleEvent::Healed { name, .. } => Some(format!(
                "{name} {}",
                Archetype::Legendary.special_line()
            )),
            _ => None,
        }
    }
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::BattleStarted { arena } => write!(f, "Battle starts in {arena}!"),
            BattleEvent::FirstMover { name } => write!(f, "Player selected {name}"),
            BattleEvent::Attacked {
                attacker,
                target,
                fallback: false,
            } => write!(f, "{attacker} attacks {target}"),
            BattleEvent::Attacked {
                attacker,
                target,
                fallback: true,
            } => write!(f, "{attacker} attacks (default) {target}"),
            BattleEvent::Hit {
                attacker,
                target,
                raw,
                dealt,
                target_health,
                ..
            } => write!(
                f,
                "{attacker} strikes {target} for {dealt} ({raw} before defense), {target} at {target_health} HP"
            ),
            BattleEvent::Hiding { name } => write!(f, "{name} is hiding!"),
            BattleEvent::SpecialUsed { attacker, target } => {
                write!(f, "{attacker} uses special on {target}")
            }
            BattleEvent::Smash {
                attacker,
                target,
                raw,
                dealt,
                target_health,
            } => write!(
                f,
                "{attacker} smashes {target} for {dealt} ({raw} before defense), {target} at {target_health} HP"
            ),
            BattleEvent::Vanish { name } => write!(f, "{name} turns invisible!"),
            BattleEvent::Healed { name, before, after } => {
                write!(f, "{name} heals {before} -> {after} HP")
            }
            BattleEvent::SpecialNotReady { name, cooldown } => {
                write!(f, "Special not ready! {name} must wait {cooldown} more turn(s)")
            }
            BattleEvent::Dodged { name } => write!(f, "{name} dodged attack"),
            BattleEvent::Victory { winner } => write!(f, "{winner} wins the battle!"),
        }
    }
}
