//! Loot: treasure kinds, the tiered template catalog, and the generator.
//!
//! Generation happens in two steps. A difficulty roll decides whether an
//! encounter drops anything at all and, if so, which rarity tier; then one
//! template is drawn uniformly from that tier and dressed with a flavor line
//! for its kind.
//!
//! Tier thresholds are applied to `d100 + 2 * level` without normalizing, so
//! deep levels push most rolls past 105 into legendary while a low natural
//! roll can still land in common.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dice::Dice;
use super::errors::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreasureType {
    Gold,
    HealthPotion,
    Weapon,
    Artifact,
}

/// Presentation data for a treasure kind. Only the renderer reads this.
#[derive(Debug)]
pub struct TreasureStyle {
    pub label: &'static str,
    pub icon: &'static str,
    /// ANSI SGR color sequence.
    pub color: &'static str,
}

// Indexed by `TreasureType as usize`.
static STYLES: [TreasureStyle; 4] = [
    TreasureStyle {
        label: "Gold",
        icon: "$",
        color: "\x1b[33m",
    },
    TreasureStyle {
        label: "Health Potion",
        icon: "+",
        color: "\x1b[31m",
    },
    TreasureStyle {
        label: "Weapon",
        icon: "/",
        color: "\x1b[36m",
    },
    TreasureStyle {
        label: "Artifact",
        icon: "*",
        color: "\x1b[35m",
    },
];

static FLAVOR: [[&str; 4]; 4] = [
    [
        "Coins stamped with the face of a forgotten king.",
        "A pouch heavier than it looks.",
        "Still warm from the last hand that held it.",
        "It glints even in the dark.",
    ],
    [
        "The liquid swirls a faint, hopeful red.",
        "Smells of mint and iron.",
        "The cork is sealed with old wax.",
        "A label reads: drink before dying.",
    ],
    [
        "The edge has been kept keen by someone who cared.",
        "Balanced perfectly in the hand.",
        "Nicks along the blade tell of many fights.",
        "It hums quietly when drawn.",
    ],
    [
        "Runes crawl across its surface when unobserved.",
        "It is colder than the air around it.",
        "You feel watched while holding it.",
        "Older than the dungeon itself.",
    ],
];

impl TreasureType {
    pub const ALL: [TreasureType; 4] = [
        TreasureType::Gold,
        TreasureType::HealthPotion,
        TreasureType::Weapon,
        TreasureType::Artifact,
    ];

    pub fn style(self) -> &'static TreasureStyle {
        &STYLES[self as usize]
    }

    pub fn flavor_lines(self) -> &'static [&'static str; 4] {
        &FLAVOR[self as usize]
    }
}

/// A concrete piece of loot. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasure {
    #[serde(rename = "type")]
    pub kind: TreasureType,
    pub name: String,
    pub value: u32,
    pub description: String,
}

/// Ordered loot-quality band; `Common < ... < Legendary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreasureTemplate {
    pub kind: TreasureType,
    pub name: &'static str,
    pub value: u32,
}

const fn tpl(kind: TreasureType, name: &'static str, value: u32) -> TreasureTemplate {
    TreasureTemplate { kind, name, value }
}

static COMMON: [TreasureTemplate; 3] = [
    tpl(TreasureType::Gold, "Copper Coins", 10),
    tpl(TreasureType::HealthPotion, "Minor Healing Potion", 15),
    tpl(TreasureType::Weapon, "Rusty Dagger", 20),
];

static UNCOMMON: [TreasureTemplate; 3] = [
    tpl(TreasureType::Gold, "Silver Coins", 30),
    tpl(TreasureType::HealthPotion, "Healing Potion", 35),
    tpl(TreasureType::Weapon, "Iron Sword", 50),
];

static RARE: [TreasureTemplate; 3] = [
    tpl(TreasureType::Gold, "Gold Coins", 75),
    tpl(TreasureType::Weapon, "Enchanted Blade", 120),
    tpl(TreasureType::Artifact, "Crystal Amulet", 150),
];

static EPIC: [TreasureTemplate; 3] = [
    tpl(TreasureType::HealthPotion, "Elixir of Vigor", 200),
    tpl(TreasureType::Weapon, "Flaming Greatsword", 250),
    tpl(TreasureType::Artifact, "Orb of Insight", 300),
];

static LEGENDARY: [TreasureTemplate; 3] = [
    tpl(TreasureType::Weapon, "Dragonbane", 500),
    tpl(TreasureType::Gold, "Dragon's Hoard", 600),
    tpl(TreasureType::Artifact, "Crown of the Deep King", 750),
];

pub const BOSS_SUFFIX: &str = "(Boss Reward)";

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Templates that can drop at this tier.
    pub fn pool(self) -> &'static [TreasureTemplate] {
        match self {
            Rarity::Common => &COMMON,
            Rarity::Uncommon => &UNCOMMON,
            Rarity::Rare => &RARE,
            Rarity::Epic => &EPIC,
            Rarity::Legendary => &LEGENDARY,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Rarity::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| GameError::InvalidInput(format!("unknown rarity '{}'", s.trim())))
    }
}

impl TreasureTemplate {
    pub fn instantiate(&self, dice: &mut dyn Dice) -> Treasure {
        let lines = self.kind.flavor_lines();
        Treasure {
            kind: self.kind,
            name: self.name.to_string(),
            value: self.value,
            description: lines[dice.pick(lines.len())].to_string(),
        }
    }
}

/// Percent chance that an encounter at `level` drops anything: `min(60 + 5L, 80)`.
pub fn treasure_chance(level: u32) -> u32 {
    level.saturating_mul(5).saturating_add(60).min(80)
}

/// Classify a natural d100 `roll` at dungeon `level`.
pub fn rarity_for_roll(roll: u32, level: u32) -> Rarity {
    let score = roll.saturating_add(level.saturating_mul(2));
    match score {
        0..=40 => Rarity::Common,
        41..=70 => Rarity::Uncommon,
        71..=90 => Rarity::Rare,
        91..=105 => Rarity::Epic,
        _ => Rarity::Legendary,
    }
}

pub fn roll_rarity(dice: &mut dyn Dice, level: u32) -> Rarity {
    let roll = dice.d100();
    rarity_for_roll(roll, level)
}

/// Full encounter roll: `None` when the drop check fails.
pub fn roll_for_difficulty(dice: &mut dyn Dice, level: u32) -> Option<Treasure> {
    let check = dice.d100();
    if check > treasure_chance(level) {
        log::debug!(
            "loot: no drop (rolled {} vs chance {} at level {})",
            check,
            treasure_chance(level),
            level
        );
        return None;
    }
    let rarity = roll_rarity(dice, level);
    log::debug!("loot: {} drop at level {}", rarity, level);
    Some(create_for_rarity(dice, rarity))
}

pub fn create_for_rarity(dice: &mut dyn Dice, rarity: Rarity) -> Treasure {
    sample(dice, &[rarity]).instantiate(dice)
}

/// Look up a tier by name, e.g. `"epic"`; unknown names are `InvalidInput`.
pub fn create_by_rarity(dice: &mut dyn Dice, rarity: &str) -> Result<Treasure, GameError> {
    let rarity: Rarity = rarity.parse()?;
    Ok(create_for_rarity(dice, rarity))
}

/// Epic-or-legendary item worth half again its base value.
pub fn create_boss_treasure(dice: &mut dyn Dice) -> Treasure {
    let template = sample(dice, &[Rarity::Epic, Rarity::Legendary]);
    let mut t = template.instantiate(dice);
    t.name = format!("{} {}", template.name, BOSS_SUFFIX);
    t.value = template.value.saturating_mul(3) / 2;
    t
}

pub fn create_random(dice: &mut dyn Dice) -> Treasure {
    sample(dice, &Rarity::ALL).instantiate(dice)
}

// Uniform over the concatenation of the tiers' pools.
fn sample(dice: &mut dyn Dice, tiers: &[Rarity]) -> &'static TreasureTemplate {
    let total: usize = tiers.iter().map(|r| r.pool().len()).sum();
    let mut idx = dice.pick(total);
    for tier in tiers {
        let pool = tier.pool();
        if idx < pool.len() {
            return &pool[idx];
        }
        idx -= pool.len();
    }
    &COMMON[0]
}
