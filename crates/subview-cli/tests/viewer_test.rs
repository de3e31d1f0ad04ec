use chrono::FixedOffset;
use std::time::Duration;
use subview_cli::viewer::{Action, Command, Effect, Focus, ViewerState};
use subview_providers::discover_agents;
use subview_runtime::DisplayFormat;
use subview_testing::fixtures::set_age;
use subview_testing::{ClaudeHome, SessionFixture, records};
use subview_types::SessionInfo;

fn write_agents(session: &SessionFixture, order: &[(&str, &str, u64)]) {
    for (id, ts, age) in order {
        let path = session
            .write_agent(id, &[records::user(id, "work", ts, "hi")])
            .unwrap();
        set_age(&path, Duration::from_secs(*age)).unwrap();
    }
}

const AGENTS: [(&str, &str, u64); 3] = [
    ("aaaa", "2025-01-15T10:00:02Z", 0),
    ("bbbb", "2025-01-15T10:00:01Z", 0),
    ("cccc", "2025-01-15T10:00:00Z", 600),
];

#[test]
fn test_selection_survives_rescan_in_other_creation_order() {
    let home = ClaudeHome::new();
    let project = home.project("/work/app");
    let session = project.session("6666aaaa-scan");
    write_agents(&session, &AGENTS);

    let mut state = ViewerState::new(10, DisplayFormat::Compact, FixedOffset::east_opt(0).unwrap());
    state.apply(Action::Resize { visible_lines: 20 });
    let effects = state.apply(Action::SessionsLoaded {
        sessions: vec![SessionInfo {
            session_id: session.id().to_string(),
            last_modified: std::time::SystemTime::now(),
        }],
        current: None,
    });
    assert!(matches!(effects.as_slice(), [Effect::LoadAgents { .. }]));

    let agents = discover_agents(&session.subagents_dir());
    let order: Vec<_> = agents.iter().map(|a| a.agent_id.as_str()).collect();
    assert_eq!(order, ["cccc", "bbbb", "aaaa"]);
    state.apply(Action::AgentsLoaded {
        session_id: session.id().to_string(),
        agents,
    });
    assert_eq!(state.focus(), Focus::AgentList);
    state.apply(Action::Command(Command::Down));
    state.apply(Action::Command(Command::Down));
    assert_eq!(state.selected_agent().unwrap().agent_id, "aaaa");

    // Recreate the files in reverse order
    std::fs::remove_dir_all(session.subagents_dir()).unwrap();
    let mut reversed = AGENTS;
    reversed.reverse();
    write_agents(&session, &reversed);

    state.apply(Action::AgentsLoaded {
        session_id: session.id().to_string(),
        agents: discover_agents(&session.subagents_dir()),
    });
    assert_eq!(state.selected_agent_index(), 2);
    assert_eq!(state.selected_agent().unwrap().agent_id, "aaaa");
}

#[test]
fn test_liveness_flip_keeps_scroll_and_switch_resets_it() {
    let home = ClaudeHome::new();
    let project = home.project("/work/app");
    let session = project.session("7777bbbb-flip");
    session
        .write_agent("xxxx", &records::numbered("xxxx", "live", 60))
        .unwrap();
    let done = session
        .write_agent("yyyy", &records::numbered("yyyy", "done", 60))
        .unwrap();
    set_age(&done, Duration::from_secs(600)).unwrap();

    let mut state = ViewerState::new(10, DisplayFormat::Compact, FixedOffset::east_opt(0).unwrap());
    state.apply(Action::Resize { visible_lines: 20 });
    state.apply(Action::SessionsLoaded {
        sessions: vec![SessionInfo {
            session_id: session.id().to_string(),
            last_modified: std::time::SystemTime::now(),
        }],
        current: None,
    });
    state.apply(Action::AgentsLoaded {
        session_id: session.id().to_string(),
        agents: discover_agents(&session.subagents_dir()),
    });
    assert_eq!(state.selected_agent().unwrap().agent_id, "xxxx");

    let (_, records) = subview_runtime::Tailer::open(&state.selected_agent().unwrap().file_path);
    state.apply(Action::StreamOpened {
        agent_id: "xxxx".to_string(),
        records,
    });
    assert!(state.viewport().auto_scroll());
    state.apply(Action::Command(Command::Top));
    state.apply(Action::Command(Command::FocusRight));
    for _ in 0..5 {
        state.apply(Action::Command(Command::Down));
    }
    assert_eq!(state.viewport().scroll_offset(), 5);

    state.apply(Action::StreamLiveness {
        agent_id: "xxxx".to_string(),
        is_live: false,
    });
    assert_eq!(state.viewport().scroll_offset(), 5);

    state.apply(Action::Command(Command::FocusLeft));
    let effects = state.apply(Action::Command(Command::Down));
    let Some(Effect::OpenStream { agent_id, path }) = effects.into_iter().next() else {
        panic!("expected the next agent's stream to be opened");
    };
    assert_eq!(agent_id, "yyyy");
    let (_, records) = subview_runtime::Tailer::open(&path);
    state.apply(Action::StreamOpened { agent_id, records });
    assert_eq!(state.viewport().scroll_offset(), 0);
}
