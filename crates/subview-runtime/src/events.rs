/// Generation tag of one subscription.
///
/// Every subscription gets a fresh id, so an event still queued from a
/// torn-down subscription never matches the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StreamId(u64);

impl StreamId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic source of [`StreamId`]s.
#[derive(Debug, Default)]
pub struct StreamIds {
    next: u64,
}

impl StreamIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> StreamId {
        self.next += 1;
        StreamId(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// The watched path reported a change
    Changed(StreamId),
    /// The subscription's periodic timer fired
    Tick(StreamId),
}

impl RuntimeEvent {
    pub fn stream(&self) -> StreamId {
        match self {
            RuntimeEvent::Changed(id) | RuntimeEvent::Tick(id) => *id,
        }
    }
}
