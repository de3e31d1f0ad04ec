use std::path::Path;
use std::time::{Duration, SystemTime};

use subview_core::{LIVE_WINDOW, is_live};
use subview_types::{AgentInfo, sort_agents};
use tracing::debug;

use crate::io::{log_files, modified, read_first_record};

/// Discover agent transcripts in a session's subagents directory.
///
/// Returns agents in display order (start time, then agent id). The UI keeps
/// an index into this list across rescans, so the order must not depend on
/// directory enumeration.
pub fn discover_agents(dir: &Path) -> Vec<AgentInfo> {
    discover_agents_at(dir, SystemTime::now(), LIVE_WINDOW)
}

/// [`discover_agents`] with an explicit clock and liveness window.
pub fn discover_agents_at(dir: &Path, now: SystemTime, live_window: Duration) -> Vec<AgentInfo> {
    let mut agents = Vec::new();

    for (path, metadata) in log_files(dir) {
        let Some(first) = read_first_record(&path) else {
            debug!(path = %path.display(), "skipping transcript without a valid first record");
            continue;
        };

        let mtime = modified(&metadata);
        agents.push(AgentInfo {
            agent_id: first.agent_id,
            slug: first.slug,
            file_path: path,
            start_time: first.timestamp,
            is_live: is_live(mtime, now, live_window),
            modified: mtime,
        });
    }

    sort_agents(&mut agents);
    agents
}
