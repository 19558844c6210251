//! CLI module for Ghostbusters.
//!
//! Commands:
//! - scan: find ghost routes (default)
//! - init: install the pre-commit hook

pub mod init;
pub mod scan;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{GhostConfig, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "ghostbusters")]
#[command(about = "Ghostbusters - find frontend API calls with no backend route", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Config file (default: <root>/ghostbusters.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    /// Print nothing, only set the exit status
    #[arg(short, long, global = true)]
    pub silent: bool,

    /// Fail when any file could not be read or parsed
    #[arg(long, global = true)]
    pub strict: bool,

    /// Frontend glob (repeatable, replaces the configured list)
    #[arg(long, global = true)]
    pub frontend: Vec<String>,

    /// Backend glob (repeatable, replaces the configured list)
    #[arg(long, global = true)]
    pub backend: Vec<String>,

    /// Ignore glob (repeatable, replaces the configured list)
    #[arg(long, global = true)]
    pub ignore: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Scan the project for ghost routes
    Scan,

    /// Install ghostbusters as a git pre-commit hook
    Init,
}

impl Cli {
    /// Resolve the effective configuration: file (or defaults) then flags.
    pub fn load_config(&self) -> Result<GhostConfig> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| self.root.join(CONFIG_FILE));
        let mut config = GhostConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;

        if !self.frontend.is_empty() {
            config.scan.frontend = self.frontend.clone();
        }
        if !self.backend.is_empty() {
            config.scan.backend = self.backend.clone();
        }
        if !self.ignore.is_empty() {
            config.scan.ignore = self.ignore.clone();
        }

        Ok(config)
    }
}

/// Dispatch a parsed command line. Returns the process exit code.
pub fn run(cli: &Cli) -> Result<i32> {
    match cli.command.unwrap_or(Commands::Scan) {
        Commands::Scan => {
            let config = cli.load_config()?;
            let options = scan::ScanOptions {
                json: cli.json,
                silent: cli.silent,
                strict: cli.strict,
            };
            scan::scan(&cli.root, &config, options)
        }
        Commands::Init => {
            init::init(&cli.root, cli.silent)?;
            Ok(0)
        }
    }
}
