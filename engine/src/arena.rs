use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::combatant::Combatant;

pub const ARENA_SLOTS: usize = 2;
pub const BUFF_PERCENT: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArenaKind {
    #[default]
    Fire,
    Ice,
    Jungle,
}

impl ArenaKind {
    pub const ALL: [ArenaKind; 3] = [ArenaKind::Fire, ArenaKind::Ice, ArenaKind::Jungle];

    pub fn default_name(self) -> &'static str {
        match self {
            ArenaKind::Fire => "Fire Arena",
            ArenaKind::Ice => "Ice Arena",
            ArenaKind::Jungle => "Jungle Arena",
        }
    }
}

/// Battle environment. Owns the fighters until the battle takes them over.
#[derive(Debug, Clone)]
pub struct Arena {
    name: String,
    kind: ArenaKind,
    fighters: ArrayVec<Combatant, ARENA_SLOTS>,
}

impl Arena {
    pub fn new(name: impl Into<String>, kind: ArenaKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fighters: ArrayVec::new(),
        }
    }

    pub fn of_kind(kind: ArenaKind) -> Self {
        Self::new(kind.default_name(), kind)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ArenaKind {
        self.kind
    }

    pub fn fighters(&self) -> &[Combatant] {
        &self.fighters
    }

    /// Returns false when both slots are taken; the combatant is dropped.
    pub fn register(&mut self, fighter: Combatant) -> bool {
        match self.fighters.try_push(fighter) {
            Ok(()) => true,
            Err(err) => {
                let rejected = err.element();
                warn!(arena = %self.name, fighter = rejected.name(), "arena full; registration ignored");
                false
            }
        }
    }

    /// Raise the stat this arena favours by a tenth, truncated.
    /// Not idempotent: call once per battle.
    pub fn apply_buff(&mut self) {
        for fighter in self.fighters.iter_mut() {
            let stat = match self.kind {
                ArenaKind::Fire => &mut fighter.attack,
                ArenaKind::Ice => &mut fighter.defense,
                ArenaKind::Jungle => &mut fighter.health,
            };
            let before = *stat;
            *stat += before * BUFF_PERCENT / 100;
            let after = *stat;
            debug!(arena = ?self.kind, fighter = fighter.name(), before, after, "arena buff");
        }
    }

    pub(crate) fn into_parts(self) -> (String, ArenaKind, ArrayVec<Combatant, ARENA_SLOTS>) {
        (self.name, self.kind, self.fighters)
    }
}
