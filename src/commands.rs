//! CLI command definitions
//!
//! Defines the clap commands for the harness.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scripted session against the emulator
    Run {
        /// Path to the emulator executable (default: config, then the
        /// platform emulator filename)
        program: Option<PathBuf>,

        /// YAML script to run instead of the built-in smoke script
        #[arg(long)]
        script: Option<PathBuf>,

        /// Arguments to pass to the emulator
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Print the steps of a script without spawning anything
    Show {
        /// YAML script to show (default: built-in smoke script)
        #[arg(long)]
        script: Option<PathBuf>,
    },
}
