use serde::{Deserialize, Serialize};

use super::health::Health;
use super::treasure::{Treasure, TreasureType};

/// Max health gained per level.
pub const LEVEL_HEALTH_BONUS: u32 = 15;
/// Attack gained per level.
pub const LEVEL_ATTACK_BONUS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub health: Health,
    pub attack_power: u32,
    pub experience: u32,
    /// Older saves predate levels; they load as level 1.
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default)]
    pub inventory: Vec<Treasure>,
    /// Id of the room the player stands in.
    pub position: String,
}

fn first_level() -> u32 {
    1
}

/// Total experience needed to leave `level`.
pub fn level_threshold(level: u32) -> u32 {
    match level {
        0 | 1 => 20,
        2 => 50,
        3 => 100,
        4 => 175,
        _ => 175u32.saturating_add((level - 4).saturating_mul(100)),
    }
}

impl Player {
    pub fn new(max_health: u32, attack_power: u32, position: &str) -> Self {
        Player {
            health: Health::new(max_health),
            attack_power,
            experience: 0,
            level: 1,
            inventory: Vec::new(),
            position: position.to_string(),
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }

    pub fn gain_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
    }

    /// Apply every level the current experience qualifies for; returns the
    /// number of levels gained.
    pub fn try_level_up(&mut self) -> u32 {
        let mut gained = 0;
        while self.experience >= level_threshold(self.level) {
            self.level += 1;
            self.health = self.health.raised(LEVEL_HEALTH_BONUS);
            self.attack_power = self.attack_power.saturating_add(LEVEL_ATTACK_BONUS);
            gained += 1;
        }
        gained
    }

    pub fn pick_up(&mut self, treasure: Treasure) {
        self.inventory.push(treasure);
    }

    pub fn treasure_value(&self) -> u32 {
        self.inventory
            .iter()
            .fold(0u32, |acc, t| acc.saturating_add(t.value))
    }

    /// Drink the first potion held. The potion's value is the amount healed;
    /// returns the potion and the hit points actually restored.
    pub fn drink_potion(&mut self) -> Option<(Treasure, u32)> {
        let idx = self
            .inventory
            .iter()
            .position(|t| t.kind == TreasureType::HealthPotion)?;
        let potion = self.inventory.remove(idx);
        let before = self.health.current();
        self.health = self.health.healed(potion.value);
        let restored = self.health.current() - before;
        Some((potion, restored))
    }
}
