//! Discovery of sessions and agent transcripts on disk.
//!
//! Nothing here fails upward: unreadable directories and corrupt files
//! shrink the result instead of producing errors.

pub mod discovery;
pub mod io;
pub mod session;

pub use discovery::{discover_agents, discover_agents_at};
pub use io::read_first_record;
pub use session::{find_current_session, list_sessions};
