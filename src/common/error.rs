//! Error types for the harness
//!
//! The driver is the only component that surfaces errors to the user;
//! relay faults end the background reader silently.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Spawn Errors ===
    #[error("Failed to start emulator '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Emulator executable '{0}' not found. Pass a path or put it on PATH")]
    ProgramNotFound(String),

    // === Driver Errors ===
    #[error("Failed to send command '{command}': {source}")]
    CommandSend {
        command: String,
        #[source]
        source: io::Error,
    },

    // === Script Errors ===
    #[error("Failed to read script '{path}': {error}")]
    ScriptRead { path: String, error: String },

    #[error("Invalid script: {0}")]
    ScriptParse(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a spawn error for a program path
    pub fn spawn(program: &std::path::Path, source: io::Error) -> Self {
        Self::Spawn {
            program: program.display().to_string(),
            source,
        }
    }

    /// Create a command-send error
    pub fn command_send(command: &str, source: io::Error) -> Self {
        Self::CommandSend {
            command: command.to_string(),
            source,
        }
    }
}
