//! # Social Network Binary
//!
//! Loads settings, wires up logging, seeds the registry and hands the
//! terminal to the interactive shell.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sn_configs::{LogFormat, Settings};
use sn_core::{Registry, SeedData};
use sn_shell::Shell;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "social-network", author, version, about)]
struct Cli {
    /// TOML settings file. Defaults to ./social.toml when present.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON seed file applied before the shell starts. Overrides `seed.path`.
    #[arg(short, long, value_name = "FILE")]
    seed: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    init_tracing(&settings);

    let mut registry = Registry::new();
    if let Some(path) = cli.seed.as_ref().or(settings.seed.path.as_ref()) {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read seed file {}", path.display()))?;
        let report = SeedData::from_json(&raw)?.apply(&mut registry)?;
        tracing::info!(path = %path.display(), users = report.users, "registry seeded");
    }

    tracing::info!("social network shell starting");
    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout().lock());
    shell.run(&mut registry)
}

/// Logs go to stderr so they never interleave with the menus on stdout.
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.level));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);

    let result = match settings.log.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing init failed: {e}");
    }
}
