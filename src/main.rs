//! Commander Cache - snapshot inspection tool
//!
//! Reads the cache snapshots found in the configured cache directory and
//! reports their contents.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cmdr_cache::config::{DIRECTORY_PROFILES_SNAPSHOT, FRIENDS_SNAPSHOT, LOCAL_PROFILES_SNAPSHOT};
use cmdr_cache::{Config, SnapshotFile, TimedLruCache};

#[derive(Parser)]
#[command(name = "cmdr-cache", version, about = "Inspect commander cache snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every entry of a snapshot as a JSON line
    Inspect {
        #[arg(value_enum)]
        kind: SnapshotKind,
    },
    /// Print entry counts for all snapshots
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum SnapshotKind {
    Local,
    Directory,
    Friends,
}

impl SnapshotKind {
    const ALL: [SnapshotKind; 3] = [
        SnapshotKind::Local,
        SnapshotKind::Directory,
        SnapshotKind::Friends,
    ];

    fn label(self) -> &'static str {
        match self {
            SnapshotKind::Local => "local",
            SnapshotKind::Directory => "directory",
            SnapshotKind::Friends => "friends",
        }
    }

    fn file(self, config: &Config) -> SnapshotFile {
        let name = match self {
            SnapshotKind::Local => LOCAL_PROFILES_SNAPSHOT,
            SnapshotKind::Directory => DIRECTORY_PROFILES_SNAPSHOT,
            SnapshotKind::Friends => FRIENDS_SNAPSHOT,
        };
        SnapshotFile::new(config.cache_dir.join(name))
    }

    fn max_age(self, config: &Config) -> Duration {
        match self {
            SnapshotKind::Local => config.local_profile_age(),
            SnapshotKind::Directory => config.directory_profile_age(),
            SnapshotKind::Friends => config.friends_age(),
        }
    }

    // Loads without a capacity limit so nothing in the file is dropped.
    fn load(self, config: &Config) -> Result<TimedLruCache<String, Value>> {
        let file = self.file(config);
        file.try_load(usize::MAX, self.max_age(config))
            .with_context(|| format!("Failed to read {}", file.path().display()))
    }
}

fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cmdr_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    info!(cache_dir = %config.cache_dir.display(), "Configuration loaded");

    match cli.command {
        Command::Inspect { kind } => inspect(kind, &config),
        Command::Stats => {
            stats(&config);
            Ok(())
        }
    }
}

fn inspect(kind: SnapshotKind, config: &Config) -> Result<()> {
    let cache = kind.load(config)?;
    let now = Utc::now();
    let max_age = cache.max_age();

    for (key, entry) in cache.iter() {
        let line = json!({
            "key": key,
            "inserted_at": entry.inserted_at,
            "age_secs": entry.age_at(now).num_seconds(),
            "fresh": !entry.is_stale_at(now, max_age),
            "value": entry.content,
        });
        println!("{}", line);
    }
    Ok(())
}

fn stats(config: &Config) {
    let now = Utc::now();
    for kind in SnapshotKind::ALL {
        match kind.load(config) {
            Ok(cache) => {
                let fresh = cache
                    .iter()
                    .filter(|(_, entry)| !entry.is_stale_at(now, cache.max_age()))
                    .count();
                println!("{}: {} entries ({} fresh)", kind.label(), cache.len(), fresh);
            }
            Err(e) => println!("{}: unavailable ({:#})", kind.label(), e),
        }
    }
}
