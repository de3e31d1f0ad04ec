//! Viewer state machine.
//!
//! `ViewerState` owns everything the UI shows. It is mutated only through
//! [`ViewerState::apply`], which returns the I/O the driver must perform
//! next. Nothing in here touches the filesystem or the terminal.

pub mod keymap;
pub mod viewport;

use chrono::FixedOffset;
use std::path::PathBuf;
use subview_runtime::DisplayFormat;
use subview_types::{AgentInfo, AgentRecord, SessionInfo};
use tracing::info;

use crate::presentation::{DisplayLine, format_records};
pub use keymap::command_for_key;
pub use viewport::{Step, Viewport, Window};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    AgentList,
    Activity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
    ToggleAutoScroll,
    FocusLeft,
    FocusRight,
    NextSession,
    PrevSession,
    ToggleFormat,
    Quit,
}

/// Input to the state machine. Results of I/O carry the session or agent
/// they were produced for; results for anything no longer selected are
/// dropped.
#[derive(Debug, Clone)]
pub enum Action {
    SessionsLoaded {
        sessions: Vec<SessionInfo>,
        /// Session owning the most recently written transcript
        current: Option<String>,
    },
    AgentsLoaded {
        session_id: String,
        agents: Vec<AgentInfo>,
    },
    StreamOpened {
        agent_id: String,
        records: Vec<AgentRecord>,
    },
    RecordsAppended {
        agent_id: String,
        records: Vec<AgentRecord>,
    },
    /// The transcript was truncated or replaced; `records` is its full content
    StreamReset {
        agent_id: String,
        records: Vec<AgentRecord>,
    },
    StreamLiveness {
        agent_id: String,
        is_live: bool,
    },
    Resize {
        visible_lines: usize,
    },
    Command(Command),
}

/// I/O requested by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadAgents { session_id: String },
    ClearAgents,
    OpenStream { agent_id: String, path: PathBuf },
    CloseStream,
    Quit,
}

/// Records and display lines of the agent being shown
#[derive(Debug, Clone)]
pub struct StreamView {
    pub agent_id: String,
    pub records: Vec<AgentRecord>,
    pub lines: Vec<DisplayLine>,
}

#[derive(Debug, Clone)]
pub struct ViewerState {
    sessions: Vec<SessionInfo>,
    sessions_loaded: bool,
    selected_session: Option<usize>,
    agents: Vec<AgentInfo>,
    /// Session the current agent list was loaded for
    agents_session: Option<String>,
    selected_agent: usize,
    stream: Option<StreamView>,
    viewport: Viewport,
    focus: Focus,
    format: DisplayFormat,
    offset: FixedOffset,
    should_quit: bool,
}

impl ViewerState {
    pub fn new(page_size: usize, format: DisplayFormat, offset: FixedOffset) -> Self {
        Self {
            sessions: Vec::new(),
            sessions_loaded: false,
            selected_session: None,
            agents: Vec::new(),
            agents_session: None,
            selected_agent: 0,
            stream: None,
            viewport: Viewport::new(page_size),
            focus: Focus::AgentList,
            format,
            offset,
            should_quit: false,
        }
    }

    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::SessionsLoaded { sessions, current } => self.on_sessions(sessions, current),
            Action::AgentsLoaded { session_id, agents } => self.on_agents(&session_id, agents),
            Action::StreamOpened { agent_id, records } => {
                self.on_stream_opened(agent_id, records);
                Vec::new()
            }
            Action::RecordsAppended { agent_id, records } => {
                self.on_records_appended(&agent_id, records);
                Vec::new()
            }
            Action::StreamReset { agent_id, records } => {
                self.on_stream_reset(&agent_id, records);
                Vec::new()
            }
            Action::StreamLiveness { agent_id, is_live } => {
                if let Some(agent) = self.agents.iter_mut().find(|a| a.agent_id == agent_id) {
                    agent.is_live = is_live;
                }
                Vec::new()
            }
            Action::Resize { visible_lines } => {
                self.viewport.set_visible_lines(visible_lines);
                Vec::new()
            }
            Action::Command(command) => self.on_command(command),
        }
    }

    // ===== Sessions =====

    fn on_sessions(&mut self, sessions: Vec<SessionInfo>, current: Option<String>) -> Vec<Effect> {
        let previous = self.selected_session().map(|s| s.session_id.clone());
        let first_load = !self.sessions_loaded;
        self.sessions = sessions;
        self.sessions_loaded = true;

        let position = |id: &str| self.sessions.iter().position(|s| s.session_id == id);
        let kept = previous.as_deref().and_then(position);
        self.selected_session = kept
            .or_else(|| current.as_deref().and_then(position))
            .or(if self.sessions.is_empty() { None } else { Some(0) });

        let selected = self.selected_session().map(|s| s.session_id.clone());
        if selected == previous && !first_load {
            return Vec::new();
        }
        self.enter_session(selected)
    }

    fn enter_session(&mut self, session_id: Option<String>) -> Vec<Effect> {
        self.agents.clear();
        self.agents_session = None;
        self.selected_agent = 0;

        let mut effects = self.close_stream();
        match session_id {
            Some(session_id) => {
                info!(session = %session_id, "session selected");
                effects.push(Effect::LoadAgents { session_id });
            }
            None => effects.push(Effect::ClearAgents),
        }
        effects
    }

    fn step_session(&mut self, forward: bool) -> Vec<Effect> {
        let len = self.sessions.len();
        let Some(current) = self.selected_session else {
            return Vec::new();
        };
        if len < 2 {
            return Vec::new();
        }

        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.selected_session = Some(next);
        self.enter_session(Some(self.sessions[next].session_id.clone()))
    }

    // ===== Agents =====

    fn on_agents(&mut self, session_id: &str, agents: Vec<AgentInfo>) -> Vec<Effect> {
        if self.selected_session().map(|s| s.session_id.as_str()) != Some(session_id) {
            return Vec::new();
        }

        if self.agents_session.as_deref() != Some(session_id) {
            self.agents_session = Some(session_id.to_string());
            self.selected_agent = 0;
        }
        self.agents = agents;
        self.selected_agent = self.selected_agent.min(self.agents.len().saturating_sub(1));

        self.sync_stream()
    }

    /// Open the selected agent's stream unless it is already shown.
    fn sync_stream(&mut self) -> Vec<Effect> {
        let Some(agent) = self.agents.get(self.selected_agent) else {
            return self.close_stream();
        };

        if self.stream.as_ref().map(|s| s.agent_id.as_str()) == Some(agent.agent_id.as_str()) {
            return Vec::new();
        }

        info!(agent = %agent.agent_id, slug = %agent.slug, "agent selected");
        vec![Effect::OpenStream {
            agent_id: agent.agent_id.clone(),
            path: agent.file_path.clone(),
        }]
    }

    fn close_stream(&mut self) -> Vec<Effect> {
        self.viewport.clear_stream();
        match self.stream.take() {
            Some(_) => vec![Effect::CloseStream],
            None => Vec::new(),
        }
    }

    fn step_agent(&mut self, forward: bool) -> Vec<Effect> {
        let len = self.agents.len();
        if len == 0 {
            return Vec::new();
        }

        self.selected_agent = if forward {
            (self.selected_agent + 1) % len
        } else {
            (self.selected_agent + len - 1) % len
        };
        self.sync_stream()
    }

    // ===== Stream =====

    fn on_stream_opened(&mut self, agent_id: String, records: Vec<AgentRecord>) {
        let Some(agent) = self.agents.get(self.selected_agent) else {
            return;
        };
        if agent.agent_id != agent_id {
            return;
        }
        let is_live = agent.is_live;

        let lines = format_records(&records, self.format, &self.offset);
        self.viewport.select_stream(&agent_id, is_live, lines.len());
        self.stream = Some(StreamView {
            agent_id,
            records,
            lines,
        });
    }

    fn on_records_appended(&mut self, agent_id: &str, records: Vec<AgentRecord>) {
        let Some(stream) = self.stream.as_mut().filter(|s| s.agent_id == agent_id) else {
            return;
        };

        stream
            .lines
            .extend(format_records(&records, self.format, &self.offset));
        stream.records.extend(records);
        self.viewport.set_total_lines(stream.lines.len());
    }

    fn on_stream_reset(&mut self, agent_id: &str, records: Vec<AgentRecord>) {
        let Some(stream) = self.stream.as_mut().filter(|s| s.agent_id == agent_id) else {
            return;
        };

        stream.lines = format_records(&records, self.format, &self.offset);
        stream.records = records;
        self.viewport.set_total_lines(stream.lines.len());
    }

    fn reformat(&mut self) {
        if let Some(stream) = self.stream.as_mut() {
            stream.lines = format_records(&stream.records, self.format, &self.offset);
            self.viewport.set_total_lines(stream.lines.len());
        }
    }

    // ===== Commands =====

    fn on_command(&mut self, command: Command) -> Vec<Effect> {
        match command {
            Command::Up => match self.focus {
                Focus::AgentList => return self.step_agent(false),
                Focus::Activity => self.viewport.scroll_up(Step::Line),
            },
            Command::Down => match self.focus {
                Focus::AgentList => return self.step_agent(true),
                Focus::Activity => self.viewport.scroll_down(Step::Line),
            },
            Command::PageUp => self.viewport.scroll_up(Step::Page),
            Command::PageDown => self.viewport.scroll_down(Step::Page),
            Command::Top => self.viewport.scroll_up(Step::All),
            Command::Bottom => self.viewport.scroll_down(Step::All),
            Command::ToggleAutoScroll => self.viewport.toggle_auto_scroll(),
            Command::FocusLeft => self.focus = Focus::AgentList,
            Command::FocusRight => self.focus = Focus::Activity,
            Command::NextSession => return self.step_session(true),
            Command::PrevSession => return self.step_session(false),
            Command::ToggleFormat => {
                self.format = self.format.toggle();
                self.reformat();
            }
            Command::Quit => {
                self.should_quit = true;
                return vec![Effect::Quit];
            }
        }
        Vec::new()
    }

    // ===== Read access for rendering =====

    pub fn sessions(&self) -> &[SessionInfo] {
        &self.sessions
    }

    pub fn sessions_loaded(&self) -> bool {
        self.sessions_loaded
    }

    pub fn selected_session_index(&self) -> Option<usize> {
        self.selected_session
    }

    pub fn selected_session(&self) -> Option<&SessionInfo> {
        self.selected_session.and_then(|i| self.sessions.get(i))
    }

    pub fn agents(&self) -> &[AgentInfo] {
        &self.agents
    }

    pub fn selected_agent_index(&self) -> usize {
        self.selected_agent
    }

    pub fn selected_agent(&self) -> Option<&AgentInfo> {
        self.agents.get(self.selected_agent)
    }

    pub fn stream(&self) -> Option<&StreamView> {
        self.stream.as_ref()
    }

    pub fn lines(&self) -> &[DisplayLine] {
        match &self.stream {
            Some(stream) => &stream.lines,
            None => &[],
        }
    }

    /// Lines inside the viewport window
    pub fn visible(&self) -> &[DisplayLine] {
        let window = self.viewport.window();
        let lines = self.lines();
        &lines[window.start.min(lines.len())..window.end.min(lines.len())]
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn format(&self) -> DisplayFormat {
        self.format
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Model of the most recent record that names one
    pub fn model(&self) -> Option<&str> {
        self.stream
            .as_ref()?
            .records
            .iter()
            .rev()
            .find_map(|r| r.model.as_deref())
    }

    /// Summed input and output tokens of the shown stream
    pub fn token_totals(&self) -> (u64, u64) {
        let Some(stream) = self.stream.as_ref() else {
            return (0, 0);
        };
        stream
            .records
            .iter()
            .filter_map(|r| r.usage.as_ref())
            .fold((0, 0), |(input, output), usage| {
                (input + usage.total_input(), output + usage.total_output())
            })
    }
}
