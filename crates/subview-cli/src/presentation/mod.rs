pub mod formatter;
pub mod sanitize;

pub use formatter::{DisplayLine, LineKind, format_record, format_records, truncate};
pub use sanitize::sanitize_text;
