//! Interactive viewer loop.
//!
//! A single thread owns the [`ViewerState`] and consumes one channel fed by
//! the terminal input thread and by the runtime subscriptions. Effects
//! returned by the reducer are carried out here, and their results are fed
//! back as actions.

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::SystemTime;

use anyhow::{Context, Result};
use chrono::{Local, Offset};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use subview_core::subagents_dir;
use subview_providers::{discover_agents_at, find_current_session, list_sessions};
use subview_runtime::{Config, RuntimeEvent, StreamId, StreamIds, Subscription, Tailer};
use tracing::{debug, info};

use crate::ui;
use crate::viewer::{Action, Effect, ViewerState, command_for_key};

/// Everything the viewer loop reacts to
#[derive(Debug)]
pub enum AppEvent {
    Terminal(Event),
    Runtime(RuntimeEvent),
}

impl From<RuntimeEvent> for AppEvent {
    fn from(event: RuntimeEvent) -> Self {
        AppEvent::Runtime(event)
    }
}

struct SessionWatch {
    session_id: String,
    dir: PathBuf,
    subscription: Subscription,
}

struct AgentWatch {
    agent_id: String,
    tailer: Tailer,
    subscription: Subscription,
}

/// Owns the I/O side of the viewer: subscriptions and the tailer of the
/// shown agent. At most one subscription of each kind is alive.
pub struct Driver {
    project_dir: PathBuf,
    config: Config,
    ids: StreamIds,
    tx: Sender<AppEvent>,
    project: Option<Subscription>,
    session: Option<SessionWatch>,
    agent: Option<AgentWatch>,
}

impl Driver {
    pub fn new(project_dir: PathBuf, config: Config, tx: Sender<AppEvent>) -> Self {
        Self {
            project_dir,
            config,
            ids: StreamIds::new(),
            tx,
            project: None,
            session: None,
            agent: None,
        }
    }

    /// Subscribe to the project directory and load the session list.
    pub fn start(&mut self, state: &mut ViewerState) -> Result<()> {
        let subscription = Subscription::start(
            self.ids.next_id(),
            &self.project_dir,
            self.config.rescan_interval(),
            self.config.watch_options(),
            self.tx.clone(),
        )?;
        self.project = Some(subscription);

        let action = self.load_sessions();
        self.dispatch(state, action)
    }

    pub fn handle_event(&mut self, state: &mut ViewerState, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Terminal(Event::Key(key)) => match command_for_key(key) {
                Some(command) => self.dispatch(state, Action::Command(command)),
                None => Ok(()),
            },
            AppEvent::Terminal(Event::Resize(width, height)) => self.dispatch(
                state,
                Action::Resize {
                    visible_lines: ui::activity_height(Rect::new(0, 0, width, height)),
                },
            ),
            AppEvent::Terminal(_) => Ok(()),
            AppEvent::Runtime(event) => self.handle_runtime(state, event),
        }
    }

    /// Apply `action` and every action produced by carrying out its effects.
    pub fn dispatch(&mut self, state: &mut ViewerState, action: Action) -> Result<()> {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            for effect in state.apply(action) {
                if let Some(next) = self.perform(effect)? {
                    queue.push_back(next);
                }
            }
        }
        Ok(())
    }

    fn perform(&mut self, effect: Effect) -> Result<Option<Action>> {
        match effect {
            Effect::LoadAgents { session_id } => {
                // Tear down before starting the replacement
                self.session = None;
                self.agent = None;

                let dir = subagents_dir(&self.project_dir, &session_id);
                let subscription = Subscription::start(
                    self.ids.next_id(),
                    &dir,
                    self.config.rescan_interval(),
                    self.config.watch_options(),
                    self.tx.clone(),
                )?;
                let action = self.load_agents(&session_id, &dir);
                self.session = Some(SessionWatch {
                    session_id,
                    dir,
                    subscription,
                });
                Ok(Some(action))
            }
            Effect::ClearAgents => {
                self.session = None;
                self.agent = None;
                Ok(None)
            }
            Effect::OpenStream { agent_id, path } => {
                self.agent = None;

                let (tailer, records) = Tailer::open(&path);
                let subscription = Subscription::start(
                    self.ids.next_id(),
                    &path,
                    self.config.status_poll_interval(),
                    self.config.watch_options(),
                    self.tx.clone(),
                )?;
                debug!(agent = %agent_id, records = records.len(), "stream opened");
                self.agent = Some(AgentWatch {
                    agent_id: agent_id.clone(),
                    tailer,
                    subscription,
                });
                Ok(Some(Action::StreamOpened { agent_id, records }))
            }
            Effect::CloseStream => {
                self.agent = None;
                Ok(None)
            }
            Effect::Quit => {
                info!("quit requested");
                Ok(None)
            }
        }
    }

    fn handle_runtime(&mut self, state: &mut ViewerState, event: RuntimeEvent) -> Result<()> {
        let id = event.stream();

        if self.project.as_ref().is_some_and(|s| s.id() == id) {
            let action = self.load_sessions();
            return self.dispatch(state, action);
        }

        if let Some(watch) = &self.session
            && watch.subscription.id() == id
        {
            let action = self.load_agents(&watch.session_id, &watch.dir);
            return self.dispatch(state, action);
        }

        if let Some(watch) = self.agent.as_mut()
            && watch.subscription.id() == id
        {
            let update = watch.tailer.poll();
            let agent_id = watch.agent_id.clone();
            let is_live = watch
                .tailer
                .is_recently_modified_at(SystemTime::now(), self.config.live_window());

            let mut actions = Vec::with_capacity(2);
            if update.reset {
                actions.push(Action::StreamReset {
                    agent_id: agent_id.clone(),
                    records: update.records,
                });
            } else if !update.records.is_empty() {
                actions.push(Action::RecordsAppended {
                    agent_id: agent_id.clone(),
                    records: update.records,
                });
            }
            actions.push(Action::StreamLiveness { agent_id, is_live });

            for action in actions {
                self.dispatch(state, action)?;
            }
            return Ok(());
        }

        debug!(stream = id.value(), "dropping event of a closed subscription");
        Ok(())
    }

    fn load_sessions(&self) -> Action {
        Action::SessionsLoaded {
            sessions: list_sessions(&self.project_dir),
            current: find_current_session(&self.project_dir),
        }
    }

    fn load_agents(&self, session_id: &str, dir: &Path) -> Action {
        Action::AgentsLoaded {
            session_id: session_id.to_string(),
            agents: discover_agents_at(dir, SystemTime::now(), self.config.live_window()),
        }
    }

    pub fn session_stream(&self) -> Option<StreamId> {
        self.session.as_ref().map(|w| w.subscription.id())
    }

    pub fn agent_stream(&self) -> Option<StreamId> {
        self.agent.as_ref().map(|w| w.subscription.id())
    }

    pub fn project_stream(&self) -> Option<StreamId> {
        self.project.as_ref().map(|s| s.id())
    }
}

/// Run the viewer on the controlling terminal until the user quits.
pub fn handle(project_dir: &Path, config: Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    ctrlc::set_handler(move || {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        std::process::exit(0);
    })?;

    let result = run_app(&mut terminal, project_dir, config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    project_dir: &Path,
    config: Config,
) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    spawn_input_thread(tx.clone())?;

    let offset = Local::now().offset().fix();
    let mut state = ViewerState::new(config.page_size, config.format, offset);
    let size = terminal.size()?;
    state.apply(Action::Resize {
        visible_lines: ui::activity_height(Rect::new(0, 0, size.width, size.height)),
    });

    let mut driver = Driver::new(project_dir.to_path_buf(), config, tx);
    driver.start(&mut state)?;

    event_loop(terminal, &mut driver, &mut state, &rx)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    driver: &mut Driver,
    state: &mut ViewerState,
    rx: &Receiver<AppEvent>,
) -> Result<()> {
    while !state.should_quit() {
        terminal.draw(|f| ui::draw(f, state))?;

        let Ok(event) = rx.recv() else {
            break;
        };
        driver.handle_event(state, event)?;

        // Drain what queued up during the draw before redrawing
        while !state.should_quit()
            && let Ok(event) = rx.try_recv()
        {
            driver.handle_event(state, event)?;
        }
    }
    Ok(())
}

fn spawn_input_thread(tx: Sender<AppEvent>) -> Result<()> {
    thread::Builder::new()
        .name("subview-input".to_string())
        .spawn(move || {
            loop {
                match event::read() {
                    Ok(event) => {
                        if tx.send(AppEvent::Terminal(event)).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "terminal input closed");
                        break;
                    }
                }
            }
        })
        .context("Failed to spawn input thread")?;
    Ok(())
}
