//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract minErr templates from a JavaScript file and strip them
//! - `init`: Initialize minerr configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by pass-running commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Factory identifier (overrides config file)
    #[arg(long = "factory")]
    pub factory_name: Option<String>,

    /// Direct-form suffix (overrides config file)
    #[arg(long)]
    pub suffix: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// JavaScript file to process
    pub input: PathBuf,

    /// Where to write the rewritten program (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Where to write the extracted JSON table (overrides config file)
    #[arg(long)]
    pub messages: Option<PathBuf>,

    /// File holding the production minErr definition (overrides config file)
    #[arg(long)]
    pub replacement: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract minErr message templates into a JSON table and strip them from the source
    Extract(ExtractCommand),
    /// Initialize a new .minerrrc.json configuration file
    Init,
}
