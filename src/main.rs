//! Japack - build pipeline for a Minecraft Japanese translation pack site.

mod build;
mod cli;
mod config;
mod index;
mod pack;
mod utils;

use anyhow::{Result, bail};
use build::build_packs;
use clap::Parser;
use cli::{Cli, Commands};
use config::PacksConfig;
use index::generate_index;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build { version, force } => {
            let stats = build_packs(&config, version.as_deref(), *force)?;
            stats.log_summary();
            if stats.failed() > 0 {
                bail!("{} pack(s) failed to build", stats.failed());
            }
            Ok(())
        }
        Commands::Index => generate_index(&config),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is not an error: the built-in defaults describe the
/// canonical site layout and the two supported versions.
fn load_config(cli: &Cli) -> Result<PacksConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        PacksConfig::from_path(&config_path)?
    } else {
        PacksConfig::default()
    };

    config.resolve_paths(root);
    config.validate(cli.target_version())?;

    Ok(config)
}
