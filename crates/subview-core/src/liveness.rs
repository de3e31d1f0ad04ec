use std::path::Path;
use std::time::{Duration, SystemTime};

/// How recently a transcript must have been written to count as live
pub const LIVE_WINDOW: Duration = Duration::from_millis(5000);

/// `now - modified < window`.
///
/// A modification time in the future (clock skew, coarse filesystems)
/// counts as zero elapsed, so the file is live.
pub fn is_live(modified: SystemTime, now: SystemTime, window: Duration) -> bool {
    match now.duration_since(modified) {
        Ok(elapsed) => elapsed < window,
        Err(_) => true,
    }
}

/// Liveness of a file on disk; unreadable metadata means not live.
pub fn file_is_live(path: &Path, now: SystemTime, window: Duration) -> bool {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|modified| is_live(modified, now, window))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_exclusive() {
        let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);

        assert!(is_live(modified, modified + Duration::from_millis(4_900), LIVE_WINDOW));
        assert!(is_live(modified, modified + Duration::from_millis(4_999), LIVE_WINDOW));
        assert!(!is_live(modified, modified + Duration::from_millis(5_000), LIVE_WINDOW));
        assert!(!is_live(modified, modified + Duration::from_millis(5_100), LIVE_WINDOW));
    }

    #[test]
    fn test_future_mtime_is_live() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        assert!(is_live(now + Duration::from_secs(3), now, LIVE_WINDOW));
    }

    #[test]
    fn test_missing_file_is_not_live() {
        assert!(!file_is_live(
            Path::new("/definitely/not/here.jsonl"),
            SystemTime::now(),
            LIVE_WINDOW
        ));
    }
}
