use std::{collections::VecDeque, fs, path::Path};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::arena::{Arena, ArenaKind};
use crate::battle::{Action, ActionSource, Battle, TurnView};
use crate::combatant::{Archetype, Combatant, CombatantSnapshot, Side};
use crate::content::builtin_duels;

const DEFAULT_MAX_TURNS: u32 = 200;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown duel preset '{0}'")]
    UnknownPreset(String),
    #[error("unsupported config format for {0}; expected .json, .yaml or .yml")]
    UnsupportedFormat(String),
    #[error("max_turns must be at least 1")]
    ZeroTurnLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(ConfigFormat::Json),
            Some("yaml" | "yml") => Ok(ConfigFormat::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// What to do once a scripted duel runs out of queued action codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    #[default]
    AlwaysAttack,
    SpecialWhenReady,
}

impl Policy {
    pub fn choose(self, view: &TurnView<'_>) -> i64 {
        match self {
            Policy::AlwaysAttack => Action::ATTACK_CODE,
            Policy::SpecialWhenReady if view.actor.special_ready() => Action::SPECIAL_CODE,
            Policy::SpecialWhenReady => Action::ATTACK_CODE,
        }
    }
}

/// Queued action codes consumed in turn order, then a fixed policy.
#[derive(Debug, Clone, Default)]
pub struct Script {
    queued: VecDeque<i64>,
    fallback: Policy,
}

impl Script {
    pub fn new(codes: impl IntoIterator<Item = i64>, fallback: Policy) -> Self {
        Self {
            queued: codes.into_iter().collect(),
            fallback,
        }
    }

    pub fn remaining(&self) -> usize {
        self.queued.len()
    }
}

impl ActionSource for Script {
    fn next_action(&mut self, view: &TurnView<'_>) -> i64 {
        self.queued
            .pop_front()
            .unwrap_or_else(|| self.fallback.choose(view))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DuelConfig {
    pub player_one: Archetype,
    pub player_two: Archetype,
    #[serde(default)]
    pub player_one_name: Option<String>,
    #[serde(default)]
    pub player_two_name: Option<String>,
    #[serde(default)]
    pub arena: ArenaKind,
    #[serde(default)]
    pub arena_name: Option<String>,
    #[serde(default)]
    pub first: Side,
    #[serde(default)]
    pub actions: Vec<i64>,
    #[serde(default)]
    pub policy: Policy,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

impl DuelConfig {
    pub fn new(player_one: Archetype, player_two: Archetype) -> Self {
        Self {
            player_one,
            player_two,
            player_one_name: None,
            player_two_name: None,
            arena: ArenaKind::default(),
            arena_name: None,
            first: Side::PlayerOne,
            actions: Vec::new(),
            policy: Policy::default(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_turns == 0 {
            return Err(ConfigError::ZeroTurnLimit);
        }
        Ok(())
    }

    fn fighter(&self, side: Side) -> Combatant {
        let (archetype, name) = match side {
            Side::PlayerOne => (self.player_one, self.player_one_name.as_deref()),
            Side::PlayerTwo => (self.player_two, self.player_two_name.as_deref()),
        };
        Combatant::new(name.unwrap_or(archetype.default_name(side)), archetype)
    }

    /// Arena, fighters and buff set up; no turns taken.
    pub fn build_battle(&self) -> Result<Battle> {
        self.validate()?;
        let mut arena = match &self.arena_name {
            Some(name) => Arena::new(name.clone(), self.arena),
            None => Arena::of_kind(self.arena),
        };
        arena.register(self.fighter(Side::PlayerOne));
        arena.register(self.fighter(Side::PlayerTwo));
        Ok(Battle::new(arena, self.first)?)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DuelResult {
    pub winner: Option<String>,
    pub winner_side: Option<Side>,
    pub turns: u32,
    pub finished: bool,
    pub arena: String,
    pub player_one: CombatantSnapshot,
    pub player_two: CombatantSnapshot,
    pub log: Vec<String>,
}

impl DuelResult {
    fn from_battle(battle: &Battle) -> Self {
        let winner_side = battle.winner();
        Self {
            winner: winner_side.map(|side| battle.fighter(side).name().to_owned()),
            winner_side,
            turns: battle.turn(),
            finished: battle.is_finished(),
            arena: battle.arena_name().to_owned(),
            player_one: battle.snapshot(Side::PlayerOne),
            player_two: battle.snapshot(Side::PlayerTwo),
            log: battle.log().report(),
        }
    }
}

pub fn simulate_duel(cfg: DuelConfig) -> Result<DuelResult> {
    let mut battle = cfg.build_battle()?;
    let mut script = Script::new(cfg.actions.iter().copied(), cfg.policy);
    battle.run_with_limit(&mut script, cfg.max_turns);
    Ok(DuelResult::from_battle(&battle))
}

pub fn parse_duel_config(text: &str, format: ConfigFormat) -> Result<DuelConfig> {
    let cfg: DuelConfig = match format {
        ConfigFormat::Json => serde_json::from_str(text).context("failed to parse duel JSON")?,
        ConfigFormat::Yaml => serde_yaml::from_str(text).context("failed to parse duel YAML")?,
    };
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_duel_config(path: impl AsRef<Path>) -> Result<DuelConfig> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read duel config: {}", path.display()))?;
    parse_duel_config(&text, format)
        .with_context(|| format!("invalid duel config: {}", path.display()))
}

pub fn load_builtin_duel(id: &str) -> Result<DuelConfig> {
    let text = builtin_duels()
        .get(id)
        .copied()
        .ok_or_else(|| ConfigError::UnknownPreset(id.to_owned()))?;
    parse_duel_config(text, ConfigFormat::Json)
        .with_context(|| format!("built-in preset '{}' is malformed", id))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatrixRow {
    pub arena: ArenaKind,
    pub player_one: Archetype,
    pub player_two: Archetype,
    pub winner_side: Option<Side>,
    pub turns: u32,
    pub player_one_hp_end: i32,
    pub player_two_hp_end: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatrixSummary {
    pub policy: Policy,
    pub duels: u32,
    pub unfinished: u32,
    /// Wins per archetype, counting either seat.
    pub wins: IndexMap<Archetype, u32>,
    pub rows: Vec<MatrixRow>,
}

/// Every ordered archetype pairing in every arena, player one moving first.
pub fn simulate_matrix(policy: Policy, max_turns: u32) -> Result<MatrixSummary> {
    let mut wins: IndexMap<Archetype, u32> = Archetype::ALL.iter().map(|&a| (a, 0)).collect();
    let mut rows = Vec::new();
    let mut unfinished = 0;

    for arena in ArenaKind::ALL {
        for player_one in Archetype::ALL {
            for player_two in Archetype::ALL {
                let cfg = DuelConfig {
                    arena,
                    policy,
                    max_turns,
                    ..DuelConfig::new(player_one, player_two)
                };
                let res = simulate_duel(cfg)?;
                match res.winner_side {
                    Some(Side::PlayerOne) => *wins.entry(player_one).or_default() += 1,
                    Some(Side::PlayerTwo) => *wins.entry(player_two).or_default() += 1,
                    None => unfinished += 1,
                }
                rows.push(MatrixRow {
                    arena,
                    player_one,
                    player_two,
                    winner_side: res.winner_side,
                    turns: res.turns,
                    player_one_hp_end: res.player_one.health,
                    player_two_hp_end: res.player_two.health,
                });
            }
        }
    }

    Ok(MatrixSummary {
        policy,
        duels: rows.len() as u32,
        unfinished,
        wins,
        rows,
    })
}
