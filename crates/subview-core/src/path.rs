use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Directory under a session that holds subagent transcripts
pub const SUBAGENTS_DIR: &str = "subagents";

/// Extension of transcript files
pub const LOG_EXTENSION: &str = "jsonl";

/// Resolve the Claude data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. CLAUDE_CONFIG_DIR environment variable (with tilde expansion)
/// 3. ~/.claude
pub fn resolve_claude_root(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("CLAUDE_CONFIG_DIR")
        && !env_path.is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".claude"));
    }

    Err(Error::Config(
        "Could not determine Claude data directory: no HOME directory found".to_string(),
    ))
}

/// `<claude_root>/projects`
pub fn projects_root(claude_root: &Path) -> PathBuf {
    claude_root.join("projects")
}

/// Encode an absolute working directory the way Claude names project folders.
///
/// `/Users/a/b` -> `-Users-a-b`
pub fn encode_project_dir(cwd: &Path) -> String {
    let raw = cwd.to_string_lossy();
    let stripped = raw.strip_prefix('/').unwrap_or(&raw);
    format!("-{}", stripped.replace('/', "-"))
}

/// Session root holding one directory per session for `cwd`
pub fn project_log_dir(projects_root: &Path, cwd: &Path) -> PathBuf {
    projects_root.join(encode_project_dir(cwd))
}

pub fn session_dir(project_dir: &Path, session_id: &str) -> PathBuf {
    project_dir.join(session_id)
}

pub fn subagents_dir(project_dir: &Path, session_id: &str) -> PathBuf {
    session_dir(project_dir, session_id).join(SUBAGENTS_DIR)
}

/// Whether a path has the transcript extension
pub fn is_log_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == LOG_EXTENSION)
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Normalize a path for comparison (resolve to absolute, canonicalize if possible)
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

/// Discover the project whose sessions are shown:
/// 1. explicit_project_root (--project flag), tilde expanded and normalized
/// 2. Current working directory
pub fn discover_project_root(explicit_project_root: Option<&str>) -> Result<PathBuf> {
    if let Some(root) = explicit_project_root {
        return Ok(normalize_path(&expand_tilde(root)));
    }

    let cwd = std::env::current_dir()?;
    Ok(cwd)
}
