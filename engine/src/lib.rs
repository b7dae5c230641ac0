//! Deterministic two-fighter arena duels.
//!
//! Build an [`Arena`], register two [`Combatant`]s, hand it to [`Battle::new`]
//! and feed turns either one at a time or through an [`ActionSource`].

pub mod api;
pub mod arena;
pub mod battle;
pub mod combatant;
pub mod content;
pub mod events;
pub mod log;
pub mod logging;

pub use arena::{Arena, ArenaKind};
pub use battle::{
    Action, ActionSource, Battle, BattleError, ChosenAction, Outcome, Phase, TurnReport, TurnView,
};
pub use combatant::{
    Archetype, AttackOutcome, Combatant, CombatantSnapshot, Side, SpecialOutcome, Variant,
    COOLDOWN_TURNS,
};
pub use events::BattleEvent;
pub use log::{BattleLog, LOG_CAPACITY};
