//! emu-harness - scripted smoke-test driver for the OS emulator CLI
//!
//! Drives the emulator executable through a fixed command sequence over
//! stdin while relaying everything the emulator prints back to the console.

use clap::Parser;
use emu_harness::{cli, commands, common};
use commands::Commands;

#[derive(Parser)]
#[command(name = "emu-harness", about = "Scripted smoke-test driver for the OS emulator")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    common::logging::init_cli();

    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
