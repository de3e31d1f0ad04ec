pub mod config;
pub mod error;
pub mod events;
pub mod subscription;
pub mod tailer;
pub mod ticker;
pub mod watcher;

pub use config::{Config, DisplayFormat, resolve_config_path};
pub use error::{Error, Result};
pub use events::{RuntimeEvent, StreamId, StreamIds};
pub use subscription::Subscription;
pub use tailer::{TailUpdate, Tailer};
pub use ticker::Ticker;
pub use watcher::{ChangeWatch, WatchBackend, WatchOptions};
