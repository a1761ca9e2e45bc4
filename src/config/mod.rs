//! # Configuration
//!
//! Game tuning, storage location, logging and display settings, read from a
//! TOML file. Every section has defaults, so a partial file (or no file at
//! all) still yields a playable configuration.
//!
//! ```toml
//! [game]
//! starting_health = 100
//! starting_attack = 10
//! level_bonus = 0
//! # seed = 1234
//!
//! [storage]
//! data_dir = "./data"
//!
//! [logging]
//! level = "info"
//! file = "dungeon.log"
//!
//! [display]
//! color = true
//! ```
//!
//! ```rust,no_run
//! use dungeoncrawl::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Config::create_default("dungeon.toml").await?;
//!     let config = Config::load("dungeon.toml").await?;
//!     println!("saves go to {}", config.storage.data_dir);
//!     Ok(())
//! }
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_starting_health")]
    pub starting_health: u32,
    #[serde(default = "default_starting_attack")]
    pub starting_attack: u32,
    /// Added to every room's depth when rolling loot.
    #[serde(default)]
    pub level_bonus: u32,
    /// Fixed RNG seed for reproducible runs; entropy when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_starting_health() -> u32 {
    100
}

fn default_starting_attack() -> u32 {
    10
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            starting_health: default_starting_health(),
            starting_attack: default_starting_attack(),
            level_bonus: 0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Saves are written under `<data_dir>/saves/`.
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: "./data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file; keeps records off the game screen. `None` logs to stderr.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: Some("dungeon.log".to_string()),
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown strings fall back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// ANSI colors for treasure and errors.
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { color: true }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        Self::parse(&content).map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.game.starting_health == 0 {
            return Err(anyhow!("game.starting_health must be at least 1"));
        }
        if config.game.starting_attack == 0 {
            return Err(anyhow!("game.starting_attack must be at least 1"));
        }
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let content = toml::to_string_pretty(&Config::default())
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
