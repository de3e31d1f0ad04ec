pub mod error;
pub mod liveness;
pub mod path;

pub use error::{Error, Result};
pub use liveness::*;
pub use path::*;
