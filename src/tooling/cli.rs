//! CLI Tooling
//!
//! One invocation runs one action for one configured agent. An external
//! scheduler (cron, systemd timers) provides the cadence.

use crate::agent::AgentRegistry;
use crate::cache::FileSlotStorage;
use crate::config::{BotConfig, ConfigLoader};
use crate::driver::{Action, Driver, RunOptions};
use crate::error::BotError;
use crate::fetch::{Fetcher, HttpTransport};
use crate::logging::LoggingConfig;
use crate::post::{ConsoleClient, PlatformClient, PlatformSet};
use crate::types::Timestamp;
use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::debug;

/// schedbot - post shortly before scheduled real-world events
#[derive(Parser, Debug)]
#[command(name = "schedbot")]
#[command(about = "Post to social platforms shortly before scheduled real-world events")]
pub struct Cli {
    /// Agent name, as configured under [agents.<name>]
    pub agent: String,

    /// Action to perform
    #[arg(value_enum)]
    pub action: Action,

    /// Post even when no event is in its alert window
    #[arg(long)]
    pub setup: bool,

    /// Print posts to stdout instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cache directory (overrides data_dir from config)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer the `--log-*` flags over configured logging.
    pub fn apply_logging_overrides(&self, logging: &mut LoggingConfig) {
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
    }
}

/// Loaded configuration plus the agents it names.
pub struct CliContext {
    config: BotConfig,
    registry: AgentRegistry,
    data_dir: PathBuf,
}

impl CliContext {
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self, BotError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Self::from_config(config, data_dir)
    }

    /// `data_dir` overrides the configured directory; the platform default
    /// is only resolved when neither is given.
    pub fn from_config(config: BotConfig, data_dir: Option<PathBuf>) -> Result<Self, BotError> {
        config.validate()?;
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => config.resolve_data_dir()?,
        };
        let registry = AgentRegistry::from_config(&config);
        Ok(Self {
            config,
            registry,
            data_dir,
        })
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Wire the named agent to file storage, HTTP and the configured platforms.
    pub fn driver(&self, agent: &str, dry_run: bool) -> Result<Driver, BotError> {
        let agent = self.registry.build(agent)?;
        let storage = FileSlotStorage::new(&self.data_dir);
        let fetcher = Fetcher::new(Box::new(HttpTransport::new(&self.config.http)?));
        let poster = if dry_run {
            let clients = self
                .config
                .platforms
                .iter()
                .map(|p| Box::new(ConsoleClient::new(&p.name, p.max_length)) as Box<dyn PlatformClient>)
                .collect();
            PlatformSet::new(clients)
        } else {
            PlatformSet::from_config(&self.config.platforms, &self.config.http)?
        };
        debug!(
            data_dir = %self.data_dir.display(),
            platforms = poster.len(),
            dry_run,
            "Driver ready"
        );
        Ok(Driver::new(agent, Box::new(storage), fetcher, Box::new(poster)))
    }

    pub fn execute(&self, cli: &Cli) -> Result<String, BotError> {
        self.execute_at(cli, Utc::now())
    }

    pub fn execute_at(&self, cli: &Cli, now: Timestamp) -> Result<String, BotError> {
        let driver = self.driver(&cli.agent, cli.dry_run)?;
        let opts = RunOptions {
            force_post: cli.setup,
            now,
        };
        driver.execute(cli.action, &opts)
    }
}
