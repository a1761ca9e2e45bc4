//! # Game - Dungeon Crawler Core
//!
//! The pieces of a turn, bottom up:
//!
//! - [`health`] / [`monster`] / [`player`] - combatants and their stats
//! - [`treasure`] - rarity tiers, item catalog and the loot generator
//! - [`dice`] - the injected random source loot rolls draw from
//! - [`combat`] - one deterministic melee round
//! - [`dungeon`] - the static room layout
//! - [`command`] - text command parsing
//! - [`state`] - the serializable [`Game`] snapshot
//! - [`engine`] - the [`Session`] state machine that dispatches commands
//! - [`render`] / [`console`] - text output and the interactive loop
//!
//! ```rust
//! use dungeoncrawl::config::GameConfig;
//! use dungeoncrawl::game::{default_dungeon, RngDice, Session};
//! use dungeoncrawl::storage::MemorySaveStore;
//!
//! let mut session = Session::new(
//!     default_dungeon(),
//!     GameConfig::default(),
//!     MemorySaveStore::new(),
//!     RngDice::seeded(7),
//! );
//! let turn = session.handle_line("look").unwrap();
//! assert_eq!(turn.events.len(), 1);
//! ```

pub mod combat;
pub mod command;
pub mod console;
pub mod dice;
pub mod dungeon;
pub mod engine;
pub mod errors;
pub mod health;
pub mod monster;
pub mod player;
pub mod render;
pub mod state;
pub mod treasure;

pub use dice::{Dice, RngDice, ScriptedDice};
pub use dungeon::{default_dungeon, Direction, Dungeon};
pub use engine::{Event, Flow, Session, Turn};
pub use errors::GameError;
pub use render::Renderer;
pub use state::{Game, GamePhase, Outcome};
