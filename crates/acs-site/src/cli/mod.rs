//! Command-line interface for acs-site.
//!
//! This module provides the CLI structure and command definitions for the
//! `acsgen` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CheckCommand, ConfigCommand, ImagesCommand, SectionsCommand, StructureCommand, TaskCommand,
};

/// acsgen - Build-time data pipeline for the instrument rating study site
///
/// Scans the content tree, parses task documents, probes image dimensions,
/// and emits the site structure consumed by page rendering.
#[derive(Debug, Parser)]
#[command(name = "acsgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Assemble and emit the site structure as JSON
    Structure(StructureCommand),

    /// List discovered sections and tasks
    Sections(SectionsCommand),

    /// Load and display a single task document
    Task(TaskCommand),

    /// List the image metadata index
    Images(ImagesCommand),

    /// Validate the whole content tree (parse every task, probe every image)
    Check(CheckCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "acsgen");
    }

    #[test]
    fn test_parse_structure() {
        let cli = Cli::try_parse_from(["acsgen", "structure", "--pretty"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Structure(StructureCommand { pretty: true, .. })
        ));
    }

    #[test]
    fn test_parse_task() {
        let cli = Cli::try_parse_from(["acsgen", "task", "3", "B"]).unwrap();
        match cli.command {
            Command::Task(cmd) => {
                assert_eq!(cmd.section, 3);
                assert_eq!(cmd.letter, 'B');
                assert!(!cmd.json);
            }
            other => panic!("expected task command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["acsgen", "check"]).unwrap();
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["acsgen", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));
    }

    #[test]
    fn test_parse_with_config_path() {
        let cli = Cli::try_parse_from(["acsgen", "-c", "/custom/config.toml", "check"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["acsgen", "-v", "check"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);

        let cli = Cli::try_parse_from(["acsgen", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);

        let cli = Cli::try_parse_from(["acsgen", "-q", "check"]).unwrap();
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }
}
