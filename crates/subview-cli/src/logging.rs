use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use subview_core::expand_tilde;
use tracing_subscriber::EnvFilter;

/// Log destination: `--log-file`, then `SUBVIEW_LOG_FILE`.
pub fn resolve_log_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(expand_tilde(path));
    }

    std::env::var("SUBVIEW_LOG_FILE")
        .ok()
        .filter(|path| !path.is_empty())
        .map(|path| expand_tilde(&path))
}

/// Install the global subscriber.
///
/// The terminal belongs to the TUI, so events go to a file or nowhere.
pub fn init_logging(explicit_log_file: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match resolve_log_path(explicit_log_file) {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_log_path_wins() {
        assert_eq!(
            resolve_log_path(Some("/tmp/subview.log")),
            Some(PathBuf::from("/tmp/subview.log"))
        );
    }
}
