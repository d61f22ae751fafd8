//! Header acquisition: upstream HTTP retrieval or a local directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Fetch one header from the upstream raw-file location.
pub fn fetch_remote(repo: &str, header: &str) -> Result<String> {
    let url = format!("{repo}{header}");
    ureq::get(&url)
        .call()
        .with_context(|| format!("failed to fetch {url}"))?
        .into_string()
        .with_context(|| format!("failed to read response body from {url}"))
}

/// Read one header from a local directory.
pub fn read_local(dir: &Path, header: &str) -> Result<String> {
    let path = dir.join(header);
    fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
}

/// List the SDL headers present in a local directory, sorted for
/// deterministic output.
pub fn discover_local(dir: &Path) -> Result<Vec<String>> {
    let pattern = dir.join("SDL_*.h");
    let mut names: Vec<String> = glob::glob(&pattern.to_string_lossy())
        .context("invalid header glob")?
        .filter_map(|entry| entry.ok())
        .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    Ok(names)
}
