//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Structure command arguments.
#[derive(Debug, Args)]
pub struct StructureCommand {
    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write the structure to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Sections command arguments.
#[derive(Debug, Args)]
pub struct SectionsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Task command arguments.
#[derive(Debug, Args)]
pub struct TaskCommand {
    /// Section number (1-8)
    pub section: u8,

    /// Task letter (A-E)
    pub letter: char,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Images command arguments.
#[derive(Debug, Args)]
pub struct ImagesCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
