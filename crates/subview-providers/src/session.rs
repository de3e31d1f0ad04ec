use std::path::Path;
use std::time::SystemTime;

use subview_core::subagents_dir;
use subview_types::SessionInfo;
use tracing::debug;
use walkdir::WalkDir;

use crate::io::{log_files, modified};

/// Session directories are UUID-shaped; anything without a dash is ignored.
fn looks_like_session(name: &str) -> bool {
    name.contains('-')
}

fn session_dirs(project_dir: &Path) -> Vec<(String, SystemTime)> {
    WalkDir::new(project_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            if !looks_like_session(&name) {
                return None;
            }
            let mtime = entry.metadata().map(|m| modified(&m)).ok()?;
            Some((name, mtime))
        })
        .collect()
}

/// Newest transcript mtime in a session's subagents directory, if any.
fn latest_agent_mtime(project_dir: &Path, session_id: &str) -> Option<SystemTime> {
    log_files(&subagents_dir(project_dir, session_id))
        .iter()
        .map(|(_, metadata)| modified(metadata))
        .max()
}

/// List sessions of a project, most recently modified first.
///
/// A session's modification time is the newest of its directory mtime and its
/// agent transcripts. Ties are broken by session id so the order is stable.
pub fn list_sessions(project_dir: &Path) -> Vec<SessionInfo> {
    let mut sessions: Vec<SessionInfo> = session_dirs(project_dir)
        .into_iter()
        .map(|(session_id, dir_mtime)| {
            let last_modified = latest_agent_mtime(project_dir, &session_id)
                .map_or(dir_mtime, |agent_mtime| agent_mtime.max(dir_mtime));
            SessionInfo {
                session_id,
                last_modified,
            }
        })
        .collect();

    sessions.sort_by(|a, b| {
        b.last_modified
            .cmp(&a.last_modified)
            .then_with(|| a.session_id.cmp(&b.session_id))
    });

    debug!(count = sessions.len(), dir = %project_dir.display(), "listed sessions");
    sessions
}

/// The session owning the most recently modified agent transcript.
///
/// Sessions without any transcript are never chosen, however fresh their
/// directory is.
pub fn find_current_session(project_dir: &Path) -> Option<String> {
    session_dirs(project_dir)
        .into_iter()
        .filter_map(|(session_id, _)| {
            latest_agent_mtime(project_dir, &session_id).map(|mtime| (session_id, mtime))
        })
        .max_by(|(id_a, a), (id_b, b)| a.cmp(b).then_with(|| id_b.cmp(id_a)))
        .map(|(session_id, _)| session_id)
}
