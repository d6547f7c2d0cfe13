//! CLI command handling
//!
//! Dispatches CLI commands: resolves the target executable and script, runs
//! the session, and formats the `show` listing.

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::script::{Script, Step};
use crate::session::Session;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            program,
            script,
            args,
        } => run(program, script, args).await,

        Commands::Show { script } => show(script),
    }
}

async fn run(program: Option<PathBuf>, script: Option<PathBuf>, args: Vec<String>) -> Result<()> {
    let config = Config::load()?;
    let script = load_script(script.as_deref(), &config)?;
    let program = resolve_program(program, &config)?;

    tracing::info!(
        program = %program.display(),
        script = %script.name,
        "starting scripted session"
    );

    let mut session = Session::spawn(&program, &args)?;

    match session.run(&script).await {
        Ok(()) => session.shutdown(config.timing.shutdown_grace()).await,
        Err(e) => {
            session.terminate().await;
            Err(e)
        }
    }
}

fn show(script: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let script = load_script(script.as_deref(), &config)?;

    println!("{} {}", "Script:".cyan(), script.name.bold());
    if let Some(desc) = &script.description {
        println!("  {}", desc.dimmed());
    }

    for (i, step) in script.steps.iter().enumerate() {
        match step {
            Step::Send { line, delay_secs } => {
                println!("  {}. send {:?} (then pause {}s)", i + 1, line, delay_secs);
            }
            Step::Wait { secs } => {
                println!("  {}. wait {}s", i + 1, secs);
            }
        }
    }

    println!(
        "  total scripted delay: {}s",
        script.total_delay().as_secs_f64()
    );
    Ok(())
}

/// Load the named script, or build the smoke script from config timing
fn load_script(path: Option<&Path>, config: &Config) -> Result<Script> {
    match path {
        Some(path) => Script::load(path),
        None => Ok(Script::smoke(
            config.timing.command_delay_secs,
            config.timing.scheduler_wait_secs,
        )),
    }
}

/// Resolve the emulator executable
///
/// Multi-component paths are taken as-is. A bare name that exists in the
/// current directory gets a `./` prefix, since `Command::new` would search
/// PATH for it instead; anything else falls back to a PATH lookup.
fn resolve_program(cli: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    let program = cli.unwrap_or_else(|| PathBuf::from(&config.defaults.program));

    if program.components().count() > 1 {
        return Ok(program);
    }

    if program.exists() {
        return Ok(Path::new(".").join(program));
    }

    which::which(&program).map_err(|_| Error::ProgramNotFound(program.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_explicit_path_is_kept() {
        let config = Config::default();
        let path = PathBuf::from("./build/emulator");
        let resolved = resolve_program(Some(path.clone()), &config).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    fn test_resolve_bare_name_in_cwd_gets_prefixed() {
        // cargo test runs with the manifest dir as cwd, so Cargo.toml is a
        // bare name that exists on disk here.
        let config = Config::default();
        let resolved = resolve_program(Some(PathBuf::from("Cargo.toml")), &config).unwrap();
        assert_eq!(resolved, Path::new(".").join("Cargo.toml"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_bare_name_uses_path_lookup() {
        let config = Config::default();
        let resolved = resolve_program(Some(PathBuf::from("sh")), &config).unwrap();
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_resolve_unknown_bare_name_fails() {
        let config = Config::default();
        let err =
            resolve_program(Some(PathBuf::from("no-such-emulator-binary")), &config).unwrap_err();
        assert!(matches!(err, Error::ProgramNotFound(_)));
    }

    #[test]
    fn test_load_script_defaults_to_smoke() {
        let config = Config::default();
        let script = load_script(None, &config).unwrap();
        assert_eq!(script.name, "smoke");
        assert_eq!(script.steps.len(), 5);
    }
}
