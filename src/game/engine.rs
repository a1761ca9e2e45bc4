//! # Session - Command Dispatch
//!
//! A [`Session`] owns the live [`Game`] snapshot together with the dungeon
//! layout, the save store and the dice. Each call to [`Session::dispatch`]
//! runs one command to completion and returns the [`Event`]s a renderer
//! should show.
//!
//! Phase rules:
//!
//! | phase        | accepted                                                 |
//! |--------------|----------------------------------------------------------|
//! | `Exploring`  | move, look, inventory, use, save, load, help, restart, quit |
//! | `InCombat`   | attack, look, inventory, use, save, load, help, restart, quit |
//! | `GameOver`   | restart, quit                                            |
//!
//! A command that fails returns an error and leaves the snapshot exactly as
//! it was.

use log::{debug, info, warn};

use super::combat::{resolve_round, CombatResult};
use super::command::{parse, Command};
use super::dice::Dice;
use super::dungeon::{Direction, Dungeon, RoomSpec};
use super::errors::GameError;
use super::health::Health;
use super::state::{Game, GamePhase, Outcome};
use super::treasure::{create_boss_treasure, roll_for_difficulty, Treasure};
use crate::config::GameConfig;
use crate::storage::{fresh_save_id, SaveStore, StorageError};
use crate::validation::validate_save_name;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterView {
    pub name: String,
    pub health: Health,
    pub attack_power: u32,
}

/// Final tally shown when a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub level: u32,
    pub experience: u32,
    pub treasure_value: u32,
    pub turns: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Room {
        name: &'static str,
        description: &'static str,
        exits: Vec<Direction>,
        monster: Option<MonsterView>,
    },
    NoExit(Direction),
    PlayerStrikes {
        monster: String,
        damage: u32,
        remaining: Health,
    },
    MonsterStrikes {
        monster: String,
        damage: u32,
        remaining: Health,
    },
    MonsterDefeated {
        monster: String,
        experience: u32,
    },
    LevelUp {
        level: u32,
        max_health: u32,
        attack_power: u32,
    },
    TreasureFound(Treasure),
    NothingFound,
    Inventory {
        items: Vec<Treasure>,
        total_value: u32,
        health: Health,
        attack_power: u32,
        experience: u32,
        level: u32,
    },
    PotionUsed {
        name: String,
        restored: u32,
        health: Health,
    },
    Saved(String),
    Loaded(String),
    Help,
    Restarted,
    Victory(Summary),
    Defeat(Summary),
    Farewell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything one command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub events: Vec<Event>,
    pub flow: Flow,
}

impl Turn {
    fn cont(events: Vec<Event>) -> Self {
        Turn {
            events,
            flow: Flow::Continue,
        }
    }
}

pub struct Session<S: SaveStore, D: Dice> {
    game: Game,
    dungeon: Dungeon,
    config: GameConfig,
    store: S,
    dice: D,
}

impl<S: SaveStore, D: Dice> Session<S, D> {
    /// Start a new game in the dungeon's start room.
    pub fn new(dungeon: Dungeon, config: GameConfig, store: S, dice: D) -> Self {
        let game = Game::new(&dungeon, &config);
        info!(
            "new game in '{}' (health {}, attack {})",
            dungeon.name, config.starting_health, config.starting_attack
        );
        Session {
            game,
            dungeon,
            config,
            store,
            dice,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Swap in a different snapshot after checking it fits this dungeon.
    pub fn replace_game(&mut self, game: Game) -> Result<(), GameError> {
        game.check_against(&self.dungeon)
            .map_err(StorageError::LayoutMismatch)?;
        self.game = game;
        Ok(())
    }

    /// What the player sees before the first command.
    pub fn opening(&self) -> Result<Vec<Event>, GameError> {
        Ok(vec![self.describe_room()?])
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Turn, GameError> {
        let cmd = parse(line)?;
        self.dispatch(cmd)
    }

    pub fn dispatch(&mut self, cmd: Command) -> Result<Turn, GameError> {
        debug!("turn {} {:?}: {}", self.game.turn, self.game.phase, cmd);
        if self.game.is_over() && !matches!(cmd, Command::Quit | Command::Restart) {
            return Err(GameError::InvalidCommand(
                "the game is over; type restart or quit".to_string(),
            ));
        }

        let events = match cmd {
            Command::Move(dir) => self.do_move(dir)?,
            Command::Attack => self.do_attack()?,
            Command::Look => vec![self.describe_room()?],
            Command::Inventory => vec![self.inventory()],
            Command::Use => self.do_use()?,
            Command::Save(name) => self.do_save(name)?,
            Command::Load(name) => self.do_load(name)?,
            Command::Help => vec![Event::Help],
            Command::Restart => self.do_restart()?,
            Command::Quit => {
                info!("player quit on turn {}", self.game.turn);
                return Ok(Turn {
                    events: vec![Event::Farewell],
                    flow: Flow::Quit,
                });
            }
        };
        Ok(Turn::cont(events))
    }

    fn current_room(&self) -> Result<&'static RoomSpec, GameError> {
        self.dungeon.room(&self.game.player.position).ok_or_else(|| {
            GameError::InvalidState(format!(
                "player is in unknown room '{}'",
                self.game.player.position
            ))
        })
    }

    fn describe_room(&self) -> Result<Event, GameError> {
        let room = self.current_room()?;
        Ok(Event::Room {
            name: room.name,
            description: room.description,
            exits: room.exit_directions(),
            monster: self.game.encounter.as_ref().map(|m| MonsterView {
                name: m.name.clone(),
                health: m.health,
                attack_power: m.attack_power,
            }),
        })
    }

    fn inventory(&self) -> Event {
        let p = &self.game.player;
        Event::Inventory {
            items: p.inventory.clone(),
            total_value: p.treasure_value(),
            health: p.health,
            attack_power: p.attack_power,
            experience: p.experience,
            level: p.level,
        }
    }

    fn summary(&self) -> Summary {
        let p = &self.game.player;
        Summary {
            level: p.level,
            experience: p.experience,
            treasure_value: p.treasure_value(),
            turns: self.game.turn,
        }
    }

    fn advance_turn(&mut self) {
        self.game.turn = self.game.turn.saturating_add(1);
    }

    fn win(&mut self) -> Event {
        self.game.phase = GamePhase::GameOver(Outcome::Won);
        let summary = self.summary();
        info!(
            "game won on turn {} (level {}, {} gold worth of treasure)",
            summary.turns, summary.level, summary.treasure_value
        );
        Event::Victory(summary)
    }

    fn do_move(&mut self, dir: Direction) -> Result<Vec<Event>, GameError> {
        if let Some(monster) = &self.game.encounter {
            return Err(GameError::InvalidCommand(format!(
                "you cannot flee from the {}; attack or use a potion",
                monster.name
            )));
        }
        let here = self.current_room()?;
        let Some(to) = here.exit(dir) else {
            return Ok(vec![Event::NoExit(dir)]);
        };
        let target = self.dungeon.room(to).ok_or_else(|| {
            GameError::InvalidState(format!("exit {} of '{}' leads nowhere", dir, here.id))
        })?;

        self.game.player.position = target.id.to_string();
        self.advance_turn();
        debug!("moved {} to '{}'", dir, target.id);

        if let Some(kind) = target.guardian {
            if !self.game.cleared_rooms.contains(target.id) {
                let monster = kind.spawn();
                info!("{} appears in '{}'", monster.name, target.id);
                self.game.encounter = Some(monster);
                self.game.phase = GamePhase::InCombat;
            }
        }

        let mut events = vec![self.describe_room()?];
        if self.game.phase == GamePhase::Exploring && target.id == self.dungeon.exit {
            events.push(self.win());
        }
        Ok(events)
    }

    fn do_attack(&mut self) -> Result<Vec<Event>, GameError> {
        let room = self.current_room()?;
        let game = &mut self.game;
        let Some(monster) = game.encounter.as_mut() else {
            return Err(GameError::InvalidCommand(
                "there is nothing here to attack".to_string(),
            ));
        };

        let report = resolve_round(&mut game.player, monster)?;
        let monster_name = monster.name.clone();
        let mut events = vec![Event::PlayerStrikes {
            monster: monster_name.clone(),
            damage: report.player_hit,
            remaining: monster.health,
        }];
        if let Some(damage) = report.monster_hit {
            events.push(Event::MonsterStrikes {
                monster: monster_name.clone(),
                damage,
                remaining: game.player.health,
            });
        }
        debug!(
            "combat: player hit {} for {}, retaliation {:?}",
            monster_name, report.player_hit, report.monster_hit
        );
        self.advance_turn();

        match report.result {
            CombatResult::Ongoing => {}
            CombatResult::Defeat => {
                self.game.encounter = None;
                self.game.phase = GamePhase::GameOver(Outcome::Lost);
                let summary = self.summary();
                info!("player slain by {} on turn {}", monster_name, summary.turns);
                events.push(Event::Defeat(summary));
            }
            CombatResult::Victory { experience } => {
                let boss = self
                    .game
                    .encounter
                    .take()
                    .map(|m| m.kind.is_boss())
                    .unwrap_or(false);
                self.game.cleared_rooms.insert(room.id.to_string());
                self.game.phase = GamePhase::Exploring;
                events.push(Event::MonsterDefeated {
                    monster: monster_name,
                    experience,
                });

                if self.game.player.try_level_up() > 0 {
                    let p = &self.game.player;
                    info!("player reached level {}", p.level);
                    events.push(Event::LevelUp {
                        level: p.level,
                        max_health: p.health.max(),
                        attack_power: p.attack_power,
                    });
                }

                let loot = if boss {
                    Some(create_boss_treasure(&mut self.dice))
                } else {
                    let level = room.depth.saturating_add(self.config.level_bonus);
                    roll_for_difficulty(&mut self.dice, level)
                };
                match loot {
                    Some(t) => {
                        self.game.player.pick_up(t.clone());
                        events.push(Event::TreasureFound(t));
                    }
                    None => events.push(Event::NothingFound),
                }

                if room.id == self.dungeon.exit {
                    events.push(self.win());
                }
            }
        }
        Ok(events)
    }

    fn do_use(&mut self) -> Result<Vec<Event>, GameError> {
        let (potion, restored) = self
            .game
            .player
            .drink_potion()
            .ok_or_else(|| GameError::InvalidCommand("you have no health potions".to_string()))?;
        self.advance_turn();
        Ok(vec![Event::PotionUsed {
            name: potion.name,
            restored,
            health: self.game.player.health,
        }])
    }

    fn requested_name(name: Option<String>) -> Result<Option<String>, GameError> {
        name.map(|n| validate_save_name(&n).map_err(|e| GameError::InvalidInput(e.to_string())))
            .transpose()
    }

    fn do_save(&mut self, name: Option<String>) -> Result<Vec<Event>, GameError> {
        let id = match Self::requested_name(name)? {
            Some(id) => id,
            None => self.game.save_id.clone().unwrap_or_else(fresh_save_id),
        };
        let mut snapshot = self.game.clone();
        snapshot.save_id = Some(id);
        let id = self.store.save(&snapshot).map_err(|e| {
            warn!("save failed: {}", e);
            e
        })?;
        info!("saved game as '{}' on turn {}", id, self.game.turn);
        self.game.save_id = Some(id.clone());
        Ok(vec![Event::Saved(id)])
    }

    fn do_load(&mut self, name: Option<String>) -> Result<Vec<Event>, GameError> {
        let id = match Self::requested_name(name)? {
            Some(id) => id,
            None => self.game.save_id.clone().ok_or_else(|| {
                GameError::InvalidInput(
                    "no save name given and this game was never saved".to_string(),
                )
            })?,
        };
        let mut loaded = self
            .store
            .load(&id)
            .and_then(|g| g.ok_or_else(|| StorageError::NotFound(id.clone())))
            .map_err(|e| {
                warn!("load of '{}' failed: {}", id, e);
                e
            })?;
        loaded
            .check_against(&self.dungeon)
            .map_err(StorageError::LayoutMismatch)?;
        loaded.save_id = Some(id.clone());
        self.game = loaded;
        info!("loaded save '{}' at turn {}", id, self.game.turn);

        let mut events = vec![Event::Loaded(id)];
        if !self.game.is_over() {
            events.push(self.describe_room()?);
        }
        Ok(events)
    }

    fn do_restart(&mut self) -> Result<Vec<Event>, GameError> {
        let save_id = self.game.save_id.take();
        self.game = Game::new(&self.dungeon, &self.config);
        self.game.save_id = save_id;
        info!("game restarted");
        Ok(vec![Event::Restarted, self.describe_room()?])
    }
}
