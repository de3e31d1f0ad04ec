use std::path::Path;
use std::sync::mpsc::Sender;
use std::time::Duration;

use tracing::debug;

use crate::events::{RuntimeEvent, StreamId};
use crate::ticker::Ticker;
use crate::Result;
use crate::watcher::{ChangeWatch, WatchOptions};

/// Change watch plus fallback timer for one target, tagged with a
/// [`StreamId`].
///
/// Both halves send into the caller's channel. Dropping the subscription
/// stops the timer thread and the watcher before returning.
pub struct Subscription {
    id: StreamId,
    watch: ChangeWatch,
    _ticker: Ticker,
}

impl Subscription {
    pub fn start<T>(
        id: StreamId,
        target: &Path,
        interval: Duration,
        options: WatchOptions,
        tx: Sender<T>,
    ) -> Result<Self>
    where
        T: From<RuntimeEvent> + Send + 'static,
    {
        let watch_tx = tx.clone();
        let watch = ChangeWatch::attach(target, options, move || {
            watch_tx.send(RuntimeEvent::Changed(id).into()).is_ok()
        });

        let ticker = Ticker::spawn(
            &format!("subview-tick-{}", id.value()),
            interval,
            move || tx.send(RuntimeEvent::Tick(id).into()).is_ok(),
        )?;

        debug!(
            stream = id.value(),
            path = %target.display(),
            watched = watch.is_attached(),
            "subscription started"
        );

        Ok(Self {
            id,
            watch,
            _ticker: ticker,
        })
    }

    pub fn id(&self) -> StreamId {
        self.id
    }

    pub fn is_watched(&self) -> bool {
        self.watch.is_attached()
    }
}
