use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "quizokrat";

/// Compute the XDG-compliant log file path.
/// Uses `state_dir` on platforms that have it, falls back to `cache_dir`.
pub fn resolve_log_path() -> Result<PathBuf> {
    let base = dirs::state_dir()
        .or_else(dirs::cache_dir)
        .context("Could not determine state or cache directory")?;

    let log_dir = base.join(APP_NAME);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {log_dir:?}"))?;

    Ok(log_dir.join(format!("{APP_NAME}.log")))
}

/// Directory exports are written to: the explicit choice, else the working
/// directory. The directory must exist.
pub fn resolve_export_dir(configured: Option<&Path>) -> Result<PathBuf> {
    let dir = match configured {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    if !dir.is_dir() {
        anyhow::bail!("Export directory does not exist: {}", dir.display());
    }
    Ok(dir)
}
