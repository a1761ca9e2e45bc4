//! Binary entrypoint for the dungeoncrawl CLI.
//!
//! Commands:
//! - `play [--load <name>] [--seed <n>]` - play on stdin/stdout, optionally resuming a save
//! - `init` - write a starter `dungeon.toml`
//! - `saves` - list saved games
//! - `delete <name>` - remove a saved game
//!
//! See the library crate docs for module-level details: `dungeoncrawl::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use dungeoncrawl::config::Config;
use dungeoncrawl::game::{console, default_dungeon, Renderer, RngDice, Session};
use dungeoncrawl::storage::{FileSaveStore, SaveStore};

#[derive(Parser)]
#[command(name = "dungeoncrawl")]
#[command(about = "A text console dungeon crawler")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "dungeon.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start playing
    Play {
        /// Resume a saved game
        #[arg(short, long)]
        load: Option<String>,

        /// RNG seed for a reproducible run (overrides the config)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write a default configuration file
    Init,
    /// List saved games
    Saves,
    /// Delete a saved game
    Delete {
        /// Save name
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, missing) = match cli.command {
        Commands::Init => (None, None),
        _ => match Config::load(&cli.config).await {
            Ok(cfg) => (Some(cfg), None),
            Err(e) if !std::path::Path::new(&cli.config).exists() => {
                (Some(Config::default()), Some(e))
            }
            Err(e) => return Err(e),
        },
    };
    init_logging(&config, cli.verbose);
    if let Some(e) = missing {
        warn!("{} (using defaults)", e);
    }
    let config = config.unwrap_or_default();

    match cli.command {
        Commands::Play { load, seed } => {
            info!("Starting dungeoncrawl v{}", env!("CARGO_PKG_VERSION"));
            let store = FileSaveStore::new(&config.storage.data_dir)?;
            let dice = match seed.or(config.game.seed) {
                Some(seed) => {
                    info!("Using RNG seed {}", seed);
                    RngDice::seeded(seed)
                }
                None => RngDice::from_entropy(),
            };
            let dungeon = default_dungeon();
            dungeon
                .validate()
                .map_err(|e| anyhow!("Dungeon layout is broken: {}", e))?;
            let mut session = Session::new(dungeon, config.game.clone(), store, dice);
            let renderer = Renderer::new(config.display.color);
            if let Some(name) = load {
                println!("{}", console::resume(&mut session, renderer, &name));
            }

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            console::run(&mut session, renderer, stdin, tokio::io::stdout()).await?;
        }
        Commands::Init => {
            if std::path::Path::new(&cli.config).exists() {
                return Err(anyhow!("{} already exists; not overwriting", cli.config));
            }
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
            println!("Wrote {}", cli.config);
        }
        Commands::Saves => {
            let store = FileSaveStore::new(&config.storage.data_dir)?;
            let ids = store.list()?;
            if ids.is_empty() {
                println!("No saved games in {}", store.dir().display());
            }
            for id in ids {
                println!("{}", id);
            }
        }
        Commands::Delete { name } => {
            let mut store = FileSaveStore::new(&config.storage.data_dir)?;
            if store.delete(&name)? {
                info!("Deleted save '{}'", name);
                println!("Deleted '{}'", name);
            } else {
                println!("No save named '{}'", name);
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let level = match verbosity {
        0 => config
            .as_ref()
            .map(|c| c.logging.level_filter())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    if let Some(f) = log_file {
        let file = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Console mirror only for -v runs on a terminal
        let mirror = verbosity > 0 && atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = file.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if mirror {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
