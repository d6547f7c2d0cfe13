//! Mock OS emulator binary for integration testing
//!
//! Implements just enough of the emulator's command loop to exercise the
//! harness without a real emulator build: line-oriented stdin, canned
//! responses on stdout. The optional mode argument makes the binary
//! misbehave in the ways the harness has to survive.

use std::io::{self, BufRead, Write};

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "normal".to_string());

    match mode.as_str() {
        // Quit immediately so the driver hits a broken pipe.
        "exit" => {}

        // Emit a fixed burst of lines and exit without reading stdin.
        "burst" => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for line in ["A", "B", "C"] {
                writeln!(out, "{line}").unwrap();
            }
            out.flush().unwrap();
        }

        // Consume commands but never produce any output.
        "mute" => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                if line.is_err() {
                    break;
                }
            }
        }

        _ => run_command_loop(),
    }
}

/// The normal mode: a minimal rendition of the emulator's command loop
fn run_command_loop() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut initialized = false;
    let mut scheduler_running = false;

    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let command = line.trim();

        if command.is_empty() {
            continue;
        }

        if command == "initialize" {
            initialized = true;
            writeln!(out, "System initialized successfully!").unwrap();
        } else if !initialized {
            writeln!(out, "Please initialize the system first.").unwrap();
        } else {
            match command {
                "scheduler-start" => {
                    scheduler_running = true;
                    writeln!(out, "Scheduler auto-started for dummy process generation.").unwrap();
                }
                "scheduler-stop" => {
                    scheduler_running = false;
                    writeln!(out, "Dummy process generation stopped successfully!").unwrap();
                    writeln!(out, "Existing processes will continue to execute.").unwrap();
                }
                "screen -ls" => {
                    writeln!(out, "CPU utilization: 0%").unwrap();
                    writeln!(
                        out,
                        "Scheduler: {}",
                        if scheduler_running { "running" } else { "stopped" }
                    )
                    .unwrap();
                    writeln!(out, "No process screen sessions.").unwrap();
                }
                "exit" => break,
                other => {
                    writeln!(out, "Unknown command: {other}").unwrap();
                }
            }
        }

        out.flush().unwrap();
    }
}
