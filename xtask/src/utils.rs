use anyhow::{Context, Result, bail};
use std::env;
use std::path::{Path, PathBuf};

/// Initialise `env_logger`; `RUST_LOG` still takes precedence per module
pub fn init_logging(verbose: bool) {
    let log_level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Check if a command exists in PATH
pub fn check_command(cmd: &str, hint: &str) -> Result<()> {
    if which::which(cmd).is_err() {
        bail!(
            "Required command '{}' not found.{}{}",
            cmd,
            if hint.is_empty() { "" } else { "\n" },
            hint
        );
    }
    Ok(())
}

/// Walk up from `start` to the directory whose Cargo.toml declares `[workspace]`
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    let mut path = start;

    loop {
        let cargo_toml = path.join("Cargo.toml");
        if cargo_toml.exists() {
            let content = std::fs::read_to_string(&cargo_toml)
                .with_context(|| format!("Failed to read {}", cargo_toml.display()))?;
            if content.contains("[workspace]") {
                return Ok(path.to_path_buf());
            }
        }

        path = path
            .parent()
            .context("Reached filesystem root without finding project")?;
    }
}

/// Make a user-supplied path absolute relative to where xtask was invoked
pub fn absolutize(invocation_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        invocation_dir.join(path)
    }
}

pub fn current_dir() -> Result<PathBuf> {
    env::current_dir().context("Failed to get current directory")
}
