//! Scripted command sequences
//!
//! A script is an ordered list of steps: either a command line sent to the
//! emulator's stdin followed by a pause, or a bare pause with no command
//! attached. Scripts can be loaded from YAML files or built from the
//! built-in smoke sequence.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::common::{Error, Result};

/// A single step in a scripted session
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Write one command line to the emulator's stdin, then pause
    Send {
        /// The command text, without a trailing newline
        line: String,
        /// Seconds to pause after the command is flushed
        #[serde(default = "default_delay")]
        delay_secs: f64,
    },
    /// Unconditional pause with no command attached
    Wait {
        /// Seconds to pause
        secs: f64,
    },
}

fn default_delay() -> f64 {
    1.0
}

impl Step {
    /// Shorthand for a send step
    pub fn send(line: impl Into<String>, delay_secs: f64) -> Self {
        Self::Send {
            line: line.into(),
            delay_secs,
        }
    }

    /// Shorthand for a wait step
    pub fn wait(secs: f64) -> Self {
        Self::Wait { secs }
    }

    /// The pause this step carries
    pub fn delay(&self) -> Duration {
        let secs = match self {
            Self::Send { delay_secs, .. } => *delay_secs,
            Self::Wait { secs } => *secs,
        };
        Duration::from_secs_f64(secs)
    }
}

/// A complete scripted session
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Name of the script
    pub name: String,
    /// Optional description of what the script exercises
    pub description: Option<String>,
    /// The sequence of steps to execute
    pub steps: Vec<Step>,
}

impl Script {
    /// The built-in smoke sequence: initialize, start the scheduler, let it
    /// run, stop it, then list the screen sessions.
    pub fn smoke(command_delay_secs: f64, scheduler_wait_secs: f64) -> Self {
        Self {
            name: "smoke".to_string(),
            description: Some(
                "Initialize the emulator, run the scheduler, stop it, list sessions".to_string(),
            ),
            steps: vec![
                Step::send("initialize", command_delay_secs),
                Step::send("scheduler-start", command_delay_secs),
                Step::wait(scheduler_wait_secs),
                Step::send("scheduler-stop", command_delay_secs),
                Step::send("screen -ls", command_delay_secs),
            ],
        }
    }

    /// Load a script from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ScriptRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let script: Script = serde_yaml::from_str(&content)
            .map_err(|e| Error::ScriptParse(e.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    /// Reject scripts the driver cannot send faithfully
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(Error::ScriptParse("script has no steps".to_string()));
        }
        for step in &self.steps {
            let secs = match step {
                Step::Send { line, delay_secs } => {
                    // An embedded newline would smuggle extra commands past
                    // the one-line-per-send contract.
                    if line.contains('\n') {
                        return Err(Error::ScriptParse(format!(
                            "command line {:?} contains a newline",
                            line
                        )));
                    }
                    *delay_secs
                }
                Step::Wait { secs } => *secs,
            };
            // Duration::from_secs_f64 panics outside this range.
            if !secs.is_finite() || secs < 0.0 {
                return Err(Error::ScriptParse(format!(
                    "delay {secs} is not a non-negative number of seconds"
                )));
            }
        }
        Ok(())
    }

    /// Sum of all scripted pauses
    pub fn total_delay(&self) -> Duration {
        self.steps.iter().map(Step::delay).sum()
    }
}
