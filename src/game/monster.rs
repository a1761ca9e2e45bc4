use serde::{Deserialize, Serialize};

use super::health::Health;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Goblin,
    Orc,
    Dragon,
}

impl MonsterKind {
    /// Bosses drop boss treasure instead of rolling the difficulty table.
    pub fn is_boss(self) -> bool {
        matches!(self, MonsterKind::Dragon)
    }

    pub fn spawn(self) -> Monster {
        match self {
            MonsterKind::Goblin => create_goblin(),
            MonsterKind::Orc => create_orc(),
            MonsterKind::Dragon => create_dragon(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub kind: MonsterKind,
    pub name: String,
    pub health: Health,
    pub attack_power: u32,
    pub experience_reward: u32,
}

impl Monster {
    pub fn new(
        kind: MonsterKind,
        name: &str,
        max_health: u32,
        attack_power: u32,
        experience_reward: u32,
    ) -> Self {
        Monster {
            kind,
            name: name.to_string(),
            health: Health::new(max_health),
            attack_power,
            experience_reward,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }
}

// Balance lives here and nowhere else: (health, attack, experience).
const GOBLIN: (u32, u32, u32) = (30, 10, 15);
const ORC: (u32, u32, u32) = (50, 15, 25);
const DRAGON: (u32, u32, u32) = (100, 30, 100);

pub fn create_goblin() -> Monster {
    let (hp, atk, xp) = GOBLIN;
    Monster::new(MonsterKind::Goblin, "Goblin", hp, atk, xp)
}

pub fn create_orc() -> Monster {
    let (hp, atk, xp) = ORC;
    Monster::new(MonsterKind::Orc, "Orc", hp, atk, xp)
}

pub fn create_dragon() -> Monster {
    let (hp, atk, xp) = DRAGON;
    Monster::new(MonsterKind::Dragon, "Dragon", hp, atk, xp)
}
