//! # Dungeoncrawl - A Text Console Dungeon Crawler
//!
//! Explore a fixed dungeon room by room, fight the monsters guarding it,
//! collect treasure of rising rarity and climb out alive.
//!
//! ## Features
//!
//! - **Treasure Generator**: five rarity tiers with static item pools; deeper rooms drop more often and roll rarer loot. Dragons always drop boss treasure.
//! - **Deterministic Combat**: one call is one round; the monster never retaliates on a killing blow.
//! - **Levels and Potions**: experience raises level, max health and attack; health potions heal in or out of combat.
//! - **Save/Load**: whole-game JSON snapshots written atomically under the data directory.
//! - **Reproducible Runs**: all randomness goes through an injected [`game::Dice`], seedable from config or the CLI.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dungeoncrawl::config::Config;
//! use dungeoncrawl::game::{console, default_dungeon, Renderer, RngDice, Session};
//! use dungeoncrawl::storage::FileSaveStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("dungeon.toml").await?;
//!     let store = FileSaveStore::new(&config.storage.data_dir)?;
//!     let mut session = Session::new(
//!         default_dungeon(),
//!         config.game.clone(),
//!         store,
//!         RngDice::from_entropy(),
//!     );
//!     let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//!     console::run(&mut session, Renderer::new(config.display.color), stdin, tokio::io::stdout()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - Rules, loot, combat, the command state machine and console loop
//! - [`storage`] - Save game persistence
//! - [`config`] - Configuration management
//! - [`validation`] - Save name validation
//! - [`logutil`] - Log-safe escaping of player input

pub mod config;
pub mod game;
pub mod logutil;
pub mod storage;
pub mod validation;
