//! Isolated Claude data directory for integration tests.
//!
//! ```no_run
//! use subview_testing::{ClaudeHome, records};
//!
//! let home = ClaudeHome::new();
//! let project = home.project("/work/app");
//! let session = project.new_session();
//! session
//!     .write_agent("a1", &[records::user("a1", "explore", "2025-01-15T10:00:00Z", "hi")])
//!     .unwrap();
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::write_lines;

pub struct ClaudeHome {
    temp_dir: TempDir,
    claude_root: PathBuf,
}

impl Default for ClaudeHome {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaudeHome {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let claude_root = temp_dir.path().join(".claude");
        std::fs::create_dir_all(subview_core::projects_root(&claude_root))
            .expect("Failed to create projects dir");

        Self {
            temp_dir,
            claude_root,
        }
    }

    /// The `.claude` directory (what `--claude-dir` points at)
    pub fn claude_root(&self) -> &Path {
        &self.claude_root
    }

    pub fn projects_root(&self) -> PathBuf {
        subview_core::projects_root(&self.claude_root)
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create the encoded project directory for an absolute `cwd`.
    pub fn project(&self, cwd: &str) -> ProjectFixture {
        let cwd = PathBuf::from(cwd);
        let dir = subview_core::project_log_dir(&self.projects_root(), &cwd);
        std::fs::create_dir_all(&dir).expect("Failed to create project dir");
        ProjectFixture { cwd, dir }
    }
}

pub struct ProjectFixture {
    cwd: PathBuf,
    dir: PathBuf,
}

impl ProjectFixture {
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Session directory with an explicit id (must contain a dash to be listed)
    pub fn session(&self, id: &str) -> SessionFixture {
        let dir = self.dir.join(id);
        std::fs::create_dir_all(&dir).expect("Failed to create session dir");
        SessionFixture {
            id: id.to_string(),
            dir,
        }
    }

    /// Session directory with a fresh UUID
    pub fn new_session(&self) -> SessionFixture {
        self.session(&uuid::Uuid::new_v4().to_string())
    }
}

pub struct SessionFixture {
    id: String,
    dir: PathBuf,
}

impl SessionFixture {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<session>/subagents`, created on first use
    pub fn subagents_dir(&self) -> PathBuf {
        let dir = self.dir.join(subview_core::SUBAGENTS_DIR);
        std::fs::create_dir_all(&dir).expect("Failed to create subagents dir");
        dir
    }

    /// Write `agent-<agent_id>.jsonl` with the given lines.
    pub fn write_agent(&self, agent_id: &str, lines: &[String]) -> Result<PathBuf> {
        let path = self.subagents_dir().join(format!("agent-{}.jsonl", agent_id));
        write_lines(&path, lines)?;
        Ok(path)
    }
}
