use std::sync::mpsc;
use std::time::Duration;

use subview_runtime::{RuntimeEvent, StreamIds, Subscription, WatchBackend, WatchOptions};
use subview_testing::fixtures::append_raw;

fn poll_options() -> WatchOptions {
    WatchOptions {
        backend: WatchBackend::Poll,
        poll_interval: Duration::from_millis(20),
    }
}

#[test]
fn test_ticks_are_tagged_with_stream_id() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let mut ids = StreamIds::new();
    let id = ids.next_id();
    let (tx, rx) = mpsc::channel::<RuntimeEvent>();

    let _sub = Subscription::start(id, dir.path(), Duration::from_millis(20), poll_options(), tx)?;

    let event = rx.recv_timeout(Duration::from_secs(2))?;
    assert_eq!(event.stream(), id);
    Ok(())
}

#[test]
fn test_file_change_is_reported() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("agent-a.jsonl");
    std::fs::write(&path, "")?;

    let id = StreamIds::new().next_id();
    let (tx, rx) = mpsc::channel::<RuntimeEvent>();
    // Long tick so only the watcher can produce events in time
    let sub = Subscription::start(id, &path, Duration::from_secs(60), poll_options(), tx)?;
    assert!(sub.is_watched());

    std::thread::sleep(Duration::from_millis(50));
    append_raw(&path, "{\"partial\":")?;

    let event = rx.recv_timeout(Duration::from_secs(5))?;
    assert_eq!(event, RuntimeEvent::Changed(id));
    Ok(())
}

#[test]
fn test_missing_target_still_ticks() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let missing = dir.path().join("subagents");

    let id = StreamIds::new().next_id();
    let (tx, rx) = mpsc::channel::<RuntimeEvent>();
    let sub = Subscription::start(id, &missing, Duration::from_millis(20), poll_options(), tx)?;
    assert!(!sub.is_watched());

    assert_eq!(rx.recv_timeout(Duration::from_secs(2))?, RuntimeEvent::Tick(id));
    Ok(())
}

#[test]
fn test_drop_disconnects_all_senders() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let id = StreamIds::new().next_id();
    let (tx, rx) = mpsc::channel::<RuntimeEvent>();

    let sub = Subscription::start(id, dir.path(), Duration::from_millis(10), poll_options(), tx)?;
    rx.recv_timeout(Duration::from_secs(2))?;
    drop(sub);

    let disconnected = loop {
        match rx.recv_timeout(Duration::from_secs(5)) {
            Ok(_) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break true,
            Err(mpsc::RecvTimeoutError::Timeout) => break false,
        }
    };
    assert!(disconnected, "subscription left a sender alive after drop");
    Ok(())
}
