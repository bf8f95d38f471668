//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{parse::ParseArgs, sync::SyncArgs};

#[derive(Parser, Debug)]
#[command(name = "plansync")]
#[command(about = "Import a markdown planning document into GitHub milestones and issues", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Defaults to `sync` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this YAML file instead of .plansync/
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ensure labels and milestones, then create every issue of the document
    Sync(SyncArgs),

    /// Parse the document and print what it declares (no network access)
    Parse(ParseArgs),

    /// Print the built-in label taxonomy
    Labels,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Sync(SyncArgs::default())
    }
}
