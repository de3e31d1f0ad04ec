use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::record::parse_timestamp;

/// An agent transcript discovered in a session's log directory.
///
/// Produced fresh by every scan; `is_live` is derived from the file's
/// modification time at scan time and never updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentInfo {
    pub agent_id: String,
    pub slug: String,
    pub file_path: PathBuf,
    /// Timestamp of the first record
    pub start_time: String,
    pub is_live: bool,
    pub modified: SystemTime,
}

impl AgentInfo {
    /// Ordering used for every agent list: start time ascending, then agent id.
    ///
    /// Timestamps that parse as RFC 3339 compare chronologically; unparseable
    /// ones sort first and compare as raw strings.
    pub fn display_order(&self, other: &Self) -> Ordering {
        let a = parse_timestamp(&self.start_time);
        let b = parse_timestamp(&other.start_time);
        a.cmp(&b)
            .then_with(|| self.start_time.cmp(&other.start_time))
            .then_with(|| self.agent_id.cmp(&other.agent_id))
    }

    pub fn short_id(&self) -> &str {
        short_id(&self.agent_id)
    }
}

/// Sort agents into display order in place.
pub fn sort_agents(agents: &mut [AgentInfo]) {
    agents.sort_by(AgentInfo::display_order);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub session_id: String,
    /// Newest of the session directory mtime and its agent log mtimes
    pub last_modified: SystemTime,
}

impl SessionInfo {
    pub fn short_id(&self) -> &str {
        short_id(&self.session_id)
    }

    pub fn last_modified_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.last_modified)
    }
}

/// First 8 characters, respecting char boundaries
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    fn agent(id: &str, start: &str) -> AgentInfo {
        AgentInfo {
            agent_id: id.to_string(),
            slug: format!("slug-{}", id),
            file_path: PathBuf::from(format!("/tmp/agent-{}.jsonl", id)),
            start_time: start.to_string(),
            is_live: false,
            modified: UNIX_EPOCH,
        }
    }

    #[test]
    fn test_sort_is_by_start_time_then_id() {
        let mut agents = vec![
            agent("c", "2025-01-01T00:00:02Z"),
            agent("b", "2025-01-01T00:00:01Z"),
            agent("a", "2025-01-01T00:00:02Z"),
        ];
        sort_agents(&mut agents);
        let ids: Vec<_> = agents.iter().map(|a| a.agent_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_compares_instants_not_strings() {
        // Same instant in different notations, then a later one with an offset
        let mut agents = vec![
            agent("late", "2025-01-01T02:00:00+01:00"),
            agent("early", "2025-01-01T00:30:00.000Z"),
        ];
        sort_agents(&mut agents);
        assert_eq!(agents[0].agent_id, "early");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789"), "01234567");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("ééééééééé"), "éééééééé");
    }
}
