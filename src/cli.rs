//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Japack translation pack pipeline CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: japack.toml)
    #[arg(short = 'C', long, default_value = "japack.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build translation packs for one version, or all configured versions
    Build {
        /// Minecraft version to build (e.g. 1.20.1); all configured versions when omitted
        version: Option<String>,

        /// Rebuild packs even when the archive is newer than its source file
        #[arg(short, long)]
        force: bool,
    },

    /// Regenerate the pack catalog and patch site metadata
    Index,
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_index(&self) -> bool {
        matches!(self.command, Commands::Index)
    }

    /// Version explicitly requested on the command line, if any
    pub fn target_version(&self) -> Option<&str> {
        match &self.command {
            Commands::Build { version, .. } => version.as_deref(),
            Commands::Index => None,
        }
    }
}
