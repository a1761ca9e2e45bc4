use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::dungeon::Dungeon;
use super::monster::Monster;
use super::player::Player;
use crate::config::GameConfig;

/// Bumped when the save layout changes incompatibly.
pub const SNAPSHOT_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Exploring,
    InCombat,
    GameOver(Outcome),
}

/// Everything needed to resume a game. Saved and loaded wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(default = "current_version")]
    pub version: u8,
    #[serde(default)]
    pub save_id: Option<String>,
    /// Name of the dungeon layout this game was played in.
    pub layout: String,
    pub turn: u32,
    pub phase: GamePhase,
    pub player: Player,
    /// The monster being fought; present exactly while `InCombat`.
    #[serde(default)]
    pub encounter: Option<Monster>,
    /// Rooms whose guardian has been defeated.
    #[serde(default)]
    pub cleared_rooms: BTreeSet<String>,
    #[serde(default = "created_now")]
    pub created_at: DateTime<Utc>,
}

fn current_version() -> u8 {
    SNAPSHOT_VERSION
}

fn created_now() -> DateTime<Utc> {
    Utc::now()
}

impl Game {
    pub fn new(dungeon: &Dungeon, config: &GameConfig) -> Self {
        Game {
            version: SNAPSHOT_VERSION,
            save_id: None,
            layout: dungeon.name.to_string(),
            turn: 1,
            phase: GamePhase::Exploring,
            player: Player::new(
                config.starting_health,
                config.starting_attack,
                dungeon.start,
            ),
            encounter: None,
            cleared_rooms: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    /// Check a loaded snapshot against the dungeon it is about to run in.
    pub fn check_against(&self, dungeon: &Dungeon) -> Result<(), String> {
        if self.layout != dungeon.name {
            return Err(format!(
                "save was made in layout '{}', not '{}'",
                self.layout, dungeon.name
            ));
        }
        if dungeon.room(&self.player.position).is_none() {
            return Err(format!("save places player in unknown room '{}'", self.player.position));
        }
        if let Some(id) = self.cleared_rooms.iter().find(|id| dungeon.room(id).is_none()) {
            return Err(format!("save lists unknown cleared room '{}'", id));
        }
        let in_combat = self.phase == GamePhase::InCombat;
        if in_combat != self.encounter.is_some() {
            return Err("save has a combat phase without a monster (or the reverse)".to_string());
        }
        if !self.is_over() && !self.player.is_alive() {
            return Err("save has a defeated player in a game still running".to_string());
        }
        if let Some(monster) = self.encounter.as_ref().filter(|m| !m.is_alive()) {
            return Err(format!("save has a defeated {} still in combat", monster.name));
        }
        Ok(())
    }
}
