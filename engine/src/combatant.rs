use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

pub const START_HEALTH: i32 = 100;
pub const START_ATTACK: i32 = 20;
pub const START_DEFENSE: i32 = 10;
pub const LEGENDARY_HEALTH: i32 = START_HEALTH + 50;
pub const LEGENDARY_ATTACK: i32 = START_ATTACK + 10;
pub const LEGENDARY_DEFENSE: i32 = START_DEFENSE + 5;
pub const COOLDOWN_TURNS: u32 = 3;
pub const HEAL_AMOUNT: i32 = 30;

/// Which side of the duel a combatant fights on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    PlayerOne,
    PlayerTwo,
}

impl Side {
    /// `1` picks player one; any other code picks player two.
    pub fn from_choice(code: i64) -> Self {
        if code == 1 { Side::PlayerOne } else { Side::PlayerTwo }
    }

    pub fn other(self) -> Self {
        match self {
            Side::PlayerOne => Side::PlayerTwo,
            Side::PlayerTwo => Side::PlayerOne,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::PlayerOne => 0,
            Side::PlayerTwo => 1,
        }
    }
}

/// Selection tag for a character archetype. Carries no combat state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Warrior,
    Caster,
    Legendary,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [Archetype::Warrior, Archetype::Caster, Archetype::Legendary];

    /// Menu mapping: `1` Warrior, `2` Caster, anything else Legendary.
    pub fn from_choice(code: i64) -> Self {
        match code {
            1 => Archetype::Warrior,
            2 => Archetype::Caster,
            _ => Archetype::Legendary,
        }
    }

    pub fn default_name(self, side: Side) -> &'static str {
        match (self, side) {
            (Archetype::Warrior, Side::PlayerOne) => "Bob the Warrior",
            (Archetype::Caster, Side::PlayerOne) => "Alice the Caster",
            (Archetype::Legendary, Side::PlayerOne) => "Draco the Legend",
            (Archetype::Warrior, Side::PlayerTwo) => "Enemy Warrior",
            (Archetype::Caster, Side::PlayerTwo) => "Enemy Caster",
            (Archetype::Legendary, Side::PlayerTwo) => "Enemy Legend",
        }
    }

    /// Base (health, attack, defense) at construction.
    pub fn base_stats(self) -> (i32, i32, i32) {
        match self {
            Archetype::Warrior | Archetype::Caster => (START_HEALTH, START_ATTACK, START_DEFENSE),
            Archetype::Legendary => (LEGENDARY_HEALTH, LEGENDARY_ATTACK, LEGENDARY_DEFENSE),
        }
    }

    /// Announcement for a basic attack, shown after the fighter's name.
    pub fn attack_line(self) -> &'static str {
        match self {
            Archetype::Warrior => "swings a sword!",
            Archetype::Caster => "throws a fireball!",
            Archetype::Legendary => "unleashes a legendary strike!",
        }
    }

    pub fn special_line(self) -> &'static str {
        match self {
            Archetype::Warrior => "does a big smash!",
            Archetype::Caster => "turns invisible!",
            Archetype::Legendary => "uses healing aura!",
        }
    }

    /// Ceiling used by self-healing.
    pub fn max_health(self) -> i32 {
        self.base_stats().0
    }
}

/// Variant tag plus the state only that variant uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Warrior,
    Caster { evasive: bool },
    Legendary,
}

impl Variant {
    pub fn archetype(&self) -> Archetype {
        match self {
            Variant::Warrior => Archetype::Warrior,
            Variant::Caster { .. } => Archetype::Caster,
            Variant::Legendary => Archetype::Legendary,
        }
    }
}

impl From<Archetype> for Variant {
    fn from(archetype: Archetype) -> Self {
        match archetype {
            Archetype::Warrior => Variant::Warrior,
            Archetype::Caster => Variant::Caster { evasive: false },
            Archetype::Legendary => Variant::Legendary,
        }
    }
}

/// Result of a basic attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// `raw` is the attack stat swung, `dealt` what got past defense.
    Hit { raw: i32, dealt: i32 },
    /// An evasive caster stays hidden instead of attacking.
    Hiding,
}

/// Result of a special ability attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialOutcome {
    Smash { raw: i32, dealt: i32 },
    Vanish,
    Heal { before: i32, after: i32 },
    NotReady { cooldown: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CombatantSnapshot {
    pub name: String,
    pub archetype: Archetype,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub cooldown: u32,
    pub special_ready: bool,
    pub evasive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    name: String,
    variant: Variant,
    pub(crate) health: i32,
    pub(crate) attack: i32,
    pub(crate) defense: i32,
    cooldown: u32,
}

impl Combatant {
    pub fn new(name: impl Into<String>, archetype: Archetype) -> Self {
        let (health, attack, defense) = archetype.base_stats();
        Self {
            name: name.into(),
            variant: archetype.into(),
            health,
            attack,
            defense,
            cooldown: 0,
        }
    }

    pub fn warrior(name: impl Into<String>) -> Self {
        Self::new(name, Archetype::Warrior)
    }

    pub fn caster(name: impl Into<String>) -> Self {
        Self::new(name, Archetype::Caster)
    }

    pub fn legendary(name: impl Into<String>) -> Self {
        Self::new(name, Archetype::Legendary)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn archetype(&self) -> Archetype {
        self.variant.archetype()
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn attack_stat(&self) -> i32 {
        self.attack
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Sum of health, attack and defense.
    pub fn stat_total(&self) -> i32 {
        self.health + self.attack + self.defense
    }

    /// Attack stats of both fighters added together.
    pub fn combo_attack(&self, partner: &Combatant) -> i32 {
        self.attack + partner.attack
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn special_ready(&self) -> bool {
        self.cooldown == 0
    }

    pub fn is_evasive(&self) -> bool {
        matches!(self.variant, Variant::Caster { evasive: true })
    }

    /// Consume the evasion flag. Returns true if it was set.
    pub fn clear_evasion(&mut self) -> bool {
        match &mut self.variant {
            Variant::Caster { evasive } if *evasive => {
                *evasive = false;
                true
            }
            _ => false,
        }
    }

    /// Basic attack against `target` using the current attack stat.
    pub fn attack(&self, target: &mut Combatant) -> AttackOutcome {
        if self.is_evasive() {
            return AttackOutcome::Hiding;
        }
        let dealt = target.receive_damage(self.attack);
        AttackOutcome::Hit { raw: self.attack, dealt }
    }

    /// Variant special. Leaves all state untouched while on cooldown.
    pub fn special(&mut self, target: &mut Combatant) -> SpecialOutcome {
        if !self.special_ready() {
            return SpecialOutcome::NotReady { cooldown: self.cooldown };
        }
        let outcome = match &mut self.variant {
            Variant::Warrior => {
                let raw = self.attack * 2;
                let dealt = target.receive_damage(raw);
                SpecialOutcome::Smash { raw, dealt }
            }
            Variant::Caster { evasive } => {
                *evasive = true;
                SpecialOutcome::Vanish
            }
            Variant::Legendary => {
                let before = self.health;
                // The ceiling is the unbuffed max, so a jungle buff above it is lost on heal.
                self.health = (self.health + HEAL_AMOUNT).min(Archetype::Legendary.max_health());
                trace!(name = %self.name, before, after = self.health, "heal");
                SpecialOutcome::Heal { before, after: self.health }
            }
        };
        self.cooldown = COOLDOWN_TURNS;
        outcome
    }

    /// Apply incoming damage after defense. Returns the health actually lost.
    pub fn receive_damage(&mut self, amount: i32) -> i32 {
        let mitigated = (amount - self.defense).max(0);
        let before = self.health;
        self.health = (self.health - mitigated).max(0);
        trace!(name = %self.name, amount, defense = self.defense, before, after = self.health, "damage");
        before - self.health
    }

    pub fn advance_cooldown(&mut self) {
        if self.cooldown > 0 {
            self.cooldown -= 1;
        }
    }

    pub fn snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            name: self.name.clone(),
            archetype: self.archetype(),
            health: self.health,
            max_health: self.archetype().max_health(),
            attack: self.attack,
            defense: self.defense,
            cooldown: self.cooldown,
            special_ready: self.special_ready(),
            evasive: self.is_evasive(),
        }
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (HP: {}, ATK: {}, DEF: {})",
            self.name, self.health, self.attack, self.defense
        )
    }
}
