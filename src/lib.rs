//! Scripted smoke-test driver for the OS emulator CLI
//!
//! This library spawns the emulator as a subprocess, feeds it a fixed
//! sequence of commands over stdin, and concurrently relays the emulator's
//! combined output back to the console.

pub mod cli;
pub mod commands;
pub mod common;
pub mod script;
pub mod session;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use script::{Script, Step};
