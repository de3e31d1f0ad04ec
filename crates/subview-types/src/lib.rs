pub mod domain;
pub mod error;
pub mod parser;
pub mod record;

pub use domain::*;
pub use error::{Error, Result};
pub use parser::parse_record;
pub use record::*;
