//! Configuration file handling

use serde::Deserialize;
use std::time::Duration;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Timing settings for the built-in smoke script and shutdown
    #[serde(default)]
    pub timing: Timing,
}

/// Default settings
#[derive(Debug, Deserialize)]
pub struct Defaults {
    /// Emulator executable to run when none is given on the command line
    #[serde(default = "default_program")]
    pub program: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

fn default_program() -> String {
    if cfg!(windows) {
        "OS_Emu_Project.exe".to_string()
    } else {
        "./OS_Emu_Project".to_string()
    }
}

/// Timing settings in seconds
#[derive(Debug, Deserialize)]
pub struct Timing {
    /// Pause after each command is flushed
    #[serde(default = "default_command_delay")]
    pub command_delay_secs: f64,

    /// Unconditional wait while the scheduler runs
    #[serde(default = "default_scheduler_wait")]
    pub scheduler_wait_secs: f64,

    /// Grace period for the emulator to exit after its stdin closes
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_secs: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            command_delay_secs: default_command_delay(),
            scheduler_wait_secs: default_scheduler_wait(),
            shutdown_grace_secs: default_shutdown_grace(),
        }
    }
}

fn default_command_delay() -> f64 {
    1.0
}
fn default_scheduler_wait() -> f64 {
    5.0
}
fn default_shutdown_grace() -> f64 {
    2.0
}

impl Timing {
    /// Shutdown grace period as a Duration
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs_f64(self.shutdown_grace_secs)
    }
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if the file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    super::Error::Config(format!(
                        "Failed to read config '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                return toml::from_str(&content)
                    .map_err(|e| super::Error::ConfigParse(e.to_string()));
            }
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let config = Config::default();
        assert_eq!(config.timing.command_delay_secs, 1.0);
        assert_eq!(config.timing.scheduler_wait_secs, 5.0);
        assert_eq!(config.timing.shutdown_grace_secs, 2.0);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [timing]
            scheduler_wait_secs = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.timing.scheduler_wait_secs, 0.5);
        assert_eq!(config.timing.command_delay_secs, 1.0);
        assert_eq!(config.defaults.program, default_program());
    }

    #[test]
    fn test_default_program_is_platform_specific() {
        let program = default_program();
        if cfg!(windows) {
            assert!(program.ends_with(".exe"));
        } else {
            assert!(program.starts_with("./"));
        }
    }
}
