//! File helpers for simulating a transcript writer.

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Write complete lines (each terminated by `\n`), replacing the file.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Append raw text with no newline handling, like a writer mid-flush.
pub fn append_raw(path: &Path, text: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Append complete lines.
pub fn append_lines(path: &Path, lines: &[String]) -> Result<()> {
    for line in lines {
        append_raw(path, &format!("{}\n", line))?;
    }
    Ok(())
}

/// Pin a file's mtime.
pub fn set_mtime(path: &Path, at: SystemTime) -> Result<()> {
    filetime::set_file_mtime(path, filetime::FileTime::from_system_time(at))?;
    Ok(())
}

/// Make a file look like it was last written `age` ago.
pub fn set_age(path: &Path, age: Duration) -> Result<()> {
    set_mtime(path, SystemTime::now() - age)
}
