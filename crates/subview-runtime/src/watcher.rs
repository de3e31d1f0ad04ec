use notify::{Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::Result;

/// Which notify backend drives change events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchBackend {
    /// Platform notification (inotify, FSEvents, ...)
    #[default]
    Native,
    /// Periodic stat scan
    Poll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    pub backend: WatchBackend,
    pub poll_interval: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            backend: WatchBackend::Native,
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Best-effort change notification for one file or directory.
///
/// Holds the underlying watcher; dropping it stops notifications.
pub struct ChangeWatch {
    target: PathBuf,
    watcher: Option<Box<dyn Watcher + Send>>,
}

impl ChangeWatch {
    /// Attach to `target`, degrading to a detached handle on failure.
    ///
    /// A detached handle never fires; callers rely on their timer instead.
    pub fn attach<F>(target: &Path, options: WatchOptions, on_change: F) -> Self
    where
        F: Fn() -> bool + Send + 'static,
    {
        match Self::try_attach(target, options, on_change) {
            Ok(watch) => watch,
            Err(err) => {
                warn!(
                    path = %target.display(),
                    error = %err,
                    "change watch unavailable, relying on periodic polling"
                );
                Self::detached(target)
            }
        }
    }

    pub fn try_attach<F>(target: &Path, options: WatchOptions, on_change: F) -> Result<Self>
    where
        F: Fn() -> bool + Send + 'static,
    {
        let handler = move |res: notify::Result<Event>| match res {
            Ok(event) if is_content_change(&event.kind) => {
                let _ = on_change();
            }
            Ok(_) => {}
            Err(err) => debug!(error = %err, "watch backend error"),
        };

        let mut watcher: Box<dyn Watcher + Send> = match options.backend {
            WatchBackend::Native => Box::new(notify::recommended_watcher(handler)?),
            WatchBackend::Poll => {
                let config = notify::Config::default().with_poll_interval(options.poll_interval);
                Box::new(PollWatcher::new(handler, config)?)
            }
        };

        watcher.watch(target, RecursiveMode::NonRecursive)?;
        debug!(path = %target.display(), backend = ?options.backend, "change watch attached");

        Ok(Self {
            target: target.to_path_buf(),
            watcher: Some(watcher),
        })
    }

    pub fn detached(target: &Path) -> Self {
        Self {
            target: target.to_path_buf(),
            watcher: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.watcher.is_some()
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}

fn is_content_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) | EventKind::Any
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_target_degrades_to_detached() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("not-created-yet");

        let watch = ChangeWatch::attach(&missing, WatchOptions::default(), || true);
        assert!(!watch.is_attached());
        assert_eq!(watch.target(), missing.as_path());
    }

    #[test]
    fn test_access_events_are_not_changes() {
        use notify::event::{AccessKind, CreateKind, ModifyKind};

        assert!(!is_content_change(&EventKind::Access(AccessKind::Any)));
        assert!(is_content_change(&EventKind::Create(CreateKind::File)));
        assert!(is_content_change(&EventKind::Modify(ModifyKind::Any)));
    }
}
