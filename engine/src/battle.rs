use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::arena::{Arena, ArenaKind, ARENA_SLOTS};
use crate::combatant::{AttackOutcome, Combatant, CombatantSnapshot, Side, SpecialOutcome};
use crate::events::BattleEvent;
use crate::log::BattleLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Attack,
    Special,
}

/// An action after input validation; `fallback` marks a forced attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChosenAction {
    pub action: Action,
    pub fallback: bool,
}

impl Action {
    pub const ATTACK_CODE: i64 = 1;
    pub const SPECIAL_CODE: i64 = 2;

    /// Unknown codes become a basic attack.
    pub fn from_code(code: i64) -> ChosenAction {
        match code {
            Self::ATTACK_CODE => ChosenAction { action: Action::Attack, fallback: false },
            Self::SPECIAL_CODE => ChosenAction { action: Action::Special, fallback: false },
            _ => ChosenAction { action: Action::Attack, fallback: true },
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Action::Attack => Self::ATTACK_CODE,
            Action::Special => Self::SPECIAL_CODE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("a battle needs two fighters, the arena holds {0}")]
    MissingFighters(usize),
    #[error("{0} cannot start a battle with 0 HP")]
    Defeated(String),
    #[error("battle is over; {winner} already won")]
    Finished { winner: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    AwaitingAction { active: Side },
    Finished { winner: Side },
}

/// Everything one resolved turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Zero-based index of the turn that was just resolved.
    pub turn: u32,
    pub actor: Side,
    pub action: ChosenAction,
    pub events: Vec<BattleEvent>,
    pub winner: Option<Side>,
    /// Both fighters after the turn, player one first.
    pub after: [CombatantSnapshot; ARENA_SLOTS],
}

/// Read-only view handed to an [`ActionSource`] when a choice is needed.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    pub turn: u32,
    pub active: Side,
    pub actor: &'a Combatant,
    pub opponent: &'a Combatant,
}

/// Supplies per-turn action codes to [`Battle::run`].
pub trait ActionSource {
    fn next_action(&mut self, view: &TurnView<'_>) -> i64;

    /// Called after each resolved turn.
    fn observe(&mut self, _report: &TurnReport) {}
}

impl<F> ActionSource for F
where
    F: FnMut(&TurnView<'_>) -> i64,
{
    fn next_action(&mut self, view: &TurnView<'_>) -> i64 {
        self(view)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub winner: Option<Side>,
    pub turns: u32,
}

#[derive(Debug, Clone)]
pub struct Battle {
    arena_name: String,
    arena_kind: ArenaKind,
    fighters: [Combatant; ARENA_SLOTS],
    turn: u32,
    phase: Phase,
    log: BattleLog,
}

impl Battle {
    /// Take over the arena's two fighters, apply its buff once and open the log.
    pub fn new(mut arena: Arena, first: Side) -> Result<Self, BattleError> {
        let count = arena.fighters().len();
        if count != ARENA_SLOTS {
            return Err(BattleError::MissingFighters(count));
        }
        if let Some(down) = arena.fighters().iter().find(|f| !f.is_alive()) {
            return Err(BattleError::Defeated(down.name().to_owned()));
        }
        arena.apply_buff();

        let (arena_name, arena_kind, fighters) = arena.into_parts();
        let fighters = fighters
            .into_inner()
            .map_err(|partial| BattleError::MissingFighters(partial.len()))?;

        let mut battle = Self {
            arena_name,
            arena_kind,
            fighters,
            turn: 0,
            phase: Phase::AwaitingAction { active: first },
            log: BattleLog::new(),
        };
        let opening = [
            BattleEvent::BattleStarted {
                arena: battle.arena_name.clone(),
            },
            BattleEvent::FirstMover {
                name: battle.fighter(first).name().to_owned(),
            },
        ];
        for event in &opening {
            battle.log.record(event.to_string());
        }
        debug!(arena = %battle.arena_name, first = ?first, "battle ready");
        Ok(battle)
    }

    pub fn arena_name(&self) -> &str {
        &self.arena_name
    }

    pub fn arena_kind(&self) -> ArenaKind {
        self.arena_kind
    }

    pub fn fighter(&self, side: Side) -> &Combatant {
        &self.fighters[side.index()]
    }

    pub fn snapshot(&self, side: Side) -> CombatantSnapshot {
        self.fighter(side).snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed turns so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn active(&self) -> Option<Side> {
        match self.phase {
            Phase::AwaitingAction { active } => Some(active),
            Phase::Finished { .. } => None,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::Finished { winner } => Some(winner),
            Phase::AwaitingAction { .. } => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.winner().is_some()
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn view(&self, active: Side) -> TurnView<'_> {
        TurnView {
            turn: self.turn,
            active,
            actor: self.fighter(active),
            opponent: self.fighter(active.other()),
        }
    }

    pub fn take_turn(&mut self, action: Action) -> Result<TurnReport, BattleError> {
        self.take_chosen(ChosenAction { action, fallback: false })
    }

    /// Resolve a raw menu code; anything but attack/special is a forced attack.
    pub fn take_turn_code(&mut self, code: i64) -> Result<TurnReport, BattleError> {
        self.take_chosen(Action::from_code(code))
    }

    fn take_chosen(&mut self, chosen: ChosenAction) -> Result<TurnReport, BattleError> {
        match self.phase {
            Phase::AwaitingAction { active } => Ok(self.resolve(active, chosen)),
            Phase::Finished { winner } => Err(BattleError::Finished {
                winner: self.fighter(winner).name().to_owned(),
            }),
        }
    }

    /// Pull actions from `source` until somebody wins.
    pub fn run(&mut self, source: &mut impl ActionSource) -> Outcome {
        self.drive(source, None)
    }

    /// Like [`Battle::run`] but stops after `limit` completed turns.
    pub fn run_with_limit(&mut self, source: &mut impl ActionSource, limit: u32) -> Outcome {
        self.drive(source, Some(limit))
    }

    fn drive(&mut self, source: &mut impl ActionSource, limit: Option<u32>) -> Outcome {
        while let Phase::AwaitingAction { active } = self.phase {
            if limit.is_some_and(|l| self.turn >= l) {
                debug!(turns = self.turn, "turn limit reached");
                break;
            }
            let code = source.next_action(&self.view(active));
            let report = self.resolve(active, Action::from_code(code));
            source.observe(&report);
        }
        Outcome {
            winner: self.winner(),
            turns: self.turn,
        }
    }

    fn resolve(&mut self, active: Side, chosen: ChosenAction) -> TurnReport {
        let turn = self.turn;
        let mut events = Vec::new();

        let (actor, target) = self.pair_mut(active);
        match chosen.action {
            Action::Attack => {
                events.push(BattleEvent::Attacked {
                    attacker: actor.name().to_owned(),
                    target: target.name().to_owned(),
                    fallback: chosen.fallback,
                });
                match actor.attack(target) {
                    AttackOutcome::Hit { raw, dealt } => events.push(BattleEvent::Hit {
                        attacker: actor.name().to_owned(),
                        archetype: actor.archetype(),
                        target: target.name().to_owned(),
                        raw,
                        dealt,
                        target_health: target.health(),
                    }),
                    AttackOutcome::Hiding => events.push(BattleEvent::Hiding {
                        name: actor.name().to_owned(),
                    }),
                }
            }
            Action::Special => {
                events.push(BattleEvent::SpecialUsed {
                    attacker: actor.name().to_owned(),
                    target: target.name().to_owned(),
                });
                let event = match actor.special(target) {
                    SpecialOutcome::Smash { raw, dealt } => BattleEvent::Smash {
                        attacker: actor.name().to_owned(),
                        target: target.name().to_owned(),
                        raw,
                        dealt,
                        target_health: target.health(),
                    },
                    SpecialOutcome::Vanish => BattleEvent::Vanish {
                        name: actor.name().to_owned(),
                    },
                    SpecialOutcome::Heal { before, after } => BattleEvent::Healed {
                        name: actor.name().to_owned(),
                        before,
                        after,
                    },
                    SpecialOutcome::NotReady { cooldown } => BattleEvent::SpecialNotReady {
                        name: actor.name().to_owned(),
                        cooldown,
                    },
                };
                events.push(event);
            }
        }

        // Evasion is checked on the opponent after every action, whatever it was.
        if target.clear_evasion() {
            events.push(BattleEvent::Dodged {
                name: target.name().to_owned(),
            });
        }

        actor.advance_cooldown();

        self.turn += 1;
        let winner = self.terminal_winner();
        self.phase = match winner {
            Some(winner) => Phase::Finished { winner },
            None => Phase::AwaitingAction {
                active: active.other(),
            },
        };
        if let Some(winner) = winner {
            let name = self.fighter(winner).name().to_owned();
            info!(winner = %name, turns = self.turn, "battle finished");
            events.push(BattleEvent::Victory { winner: name });
        }

        for event in events.iter().filter(|e| e.is_logged()) {
            self.log.record(event.to_string());
        }
        debug!(turn, actor = ?active, action = ?chosen.action, fallback = chosen.fallback, "turn resolved");

        TurnReport {
            turn,
            actor: active,
            action: chosen,
            events,
            winner,
            after: [self.snapshot(Side::PlayerOne), self.snapshot(Side::PlayerTwo)],
        }
    }

    /// Player one is checked first, so it takes the win when it is still standing.
    fn terminal_winner(&self) -> Option<Side> {
        let [one, two] = &self.fighters;
        if one.is_alive() && two.is_alive() {
            None
        } else if one.is_alive() {
            Some(Side::PlayerOne)
        } else {
            Some(Side::PlayerTwo)
        }
    }

    fn pair_mut(&mut self, active: Side) -> (&mut Combatant, &mut Combatant) {
        let [one, two] = &mut self.fighters;
        match active {
            Side::PlayerOne => (one, two),
            Side::PlayerTwo => (two, one),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duel(one: Combatant, two: Combatant) -> Battle {
        let mut arena = Arena::of_kind(ArenaKind::Ice);
        arena.register(one);
        arena.register(two);
        Battle::new(arena, Side::PlayerOne).expect("two fighters")
    }

    #[test]
    fn unknown_codes_map_to_fallback_attack() {
        assert_eq!(
            Action::from_code(7),
            ChosenAction {
                action: Action::Attack,
                fallback: true
            }
        );
        assert!(!Action::from_code(Action::ATTACK_CODE).fallback);
        assert_eq!(Action::from_code(2).action, Action::Special);
    }

    #[test]
    fn pair_mut_puts_active_first() {
        let mut battle = duel(Combatant::warrior("One"), Combatant::caster("Two"));
        let (actor, target) = battle.pair_mut(Side::PlayerTwo);
        assert_eq!(actor.name(), "Two");
        assert_eq!(target.name(), "One");
    }

    #[test]
    fn terminal_check_prefers_player_one_when_standing() {
        let mut battle = duel(Combatant::warrior("One"), Combatant::warrior("Two"));
        battle.fighters[1].health = 0;
        assert_eq!(battle.terminal_winner(), Some(Side::PlayerOne));
        battle.fighters[0].health = 0;
        assert_eq!(battle.terminal_winner(), Some(Side::PlayerTwo));
    }
}
