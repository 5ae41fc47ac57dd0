//! File I/O for session snapshots

use super::SessionState;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a session snapshot from a JSON file
pub fn load_session_from(path: &Path) -> Result<SessionState> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session from {:?}", path))?;

    let state: SessionState = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse session from {:?}", path))?;

    log::info!("Loaded session ({} tabs) from {:?}", state.tabs.len(), path);
    Ok(state)
}

/// Save a session snapshot as pretty-printed JSON
pub fn save_session_to(state: &SessionState, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let contents =
        serde_json::to_string_pretty(state).context("Failed to serialize session state")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write session to {:?}", path))?;

    log::info!("Saved session ({} tabs) to {:?}", state.tabs.len(), path);
    Ok(())
}
