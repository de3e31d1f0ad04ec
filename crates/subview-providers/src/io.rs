use std::fs::{File, Metadata};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use subview_core::is_log_file;
use subview_types::{AgentRecord, parse_record};
use walkdir::WalkDir;

/// Upper bound on bytes read while looking for the first line
const MAX_HEADER_BYTES: u64 = 4 * 1024 * 1024;

/// Parse the first line of a transcript without reading the rest of the file.
pub fn read_first_record(path: &Path) -> Option<AgentRecord> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file.take(MAX_HEADER_BYTES));
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line).ok()?;
    if line.is_empty() {
        return None;
    }

    parse_record(&String::from_utf8_lossy(&line)).ok()
}

/// Transcript files directly inside `dir` with their metadata.
///
/// A missing or unreadable directory yields nothing.
pub(crate) fn log_files(dir: &Path) -> Vec<(PathBuf, Metadata)> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_log_file(entry.path()))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            Some((entry.into_path(), metadata))
        })
        .collect()
}

pub(crate) fn modified(metadata: &Metadata) -> SystemTime {
    metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH)
}
