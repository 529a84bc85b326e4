//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Walk a yes/no decision tree loaded from a text file
#[derive(Parser, Debug)]
#[command(name = "dtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Without a subcommand the configured default files are run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate tree files one after another
    Run {
        /// Tree files (default: `default_files` from config)
        #[arg(value_hint = ValueHint::FilePath)]
        files: Vec<PathBuf>,
    },

    /// Show a tree with its yes/no branches
    Show {
        /// Tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Report malformed lines in a tree file
    Check {
        /// Tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print a tree in normalized line format
    Export {
        /// Tree file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
