use std::fs::{File, Metadata};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use subview_core::{LIVE_WINDOW, file_is_live};
use subview_types::{AgentRecord, parse_record};
use tracing::debug;

/// Records produced by one poll.
#[derive(Debug, Default)]
pub struct TailUpdate {
    pub records: Vec<AgentRecord>,
    /// The file was truncated or replaced; `records` is the full new content
    /// and previously returned records are stale.
    pub reset: bool,
}

impl TailUpdate {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && !self.reset
    }
}

/// Incremental reader of one append-only transcript.
///
/// `byte_offset` always equals the number of bytes pulled from the file;
/// bytes after the last newline are held in `pending` until the line is
/// completed. Consumed bytes are never read again unless the file is
/// truncated or replaced.
#[derive(Debug)]
pub struct Tailer {
    path: PathBuf,
    byte_offset: u64,
    pending: Vec<u8>,
    identity: Option<u64>,
    bytes_read: u64,
}

impl Tailer {
    /// Read the whole file once and return its records in file order.
    ///
    /// A missing or unreadable file yields no records and a zeroed state;
    /// later polls pick the file up once it exists.
    pub fn open(path: impl Into<PathBuf>) -> (Self, Vec<AgentRecord>) {
        let mut tailer = Self {
            path: path.into(),
            byte_offset: 0,
            pending: Vec::new(),
            identity: None,
            bytes_read: 0,
        };

        let update = tailer.poll();
        (tailer, update.records)
    }

    /// Records appended since the previous call.
    ///
    /// I/O failures are logged and treated as "nothing new".
    pub fn poll(&mut self) -> TailUpdate {
        let metadata = match std::fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "tail stat failed");
                return TailUpdate::default();
            }
        };

        let size = metadata.len();
        let identity = file_identity(&metadata);
        let replaced = size < self.byte_offset
            || (self.identity.is_some() && identity.is_some() && identity != self.identity);
        self.identity = identity;

        if replaced {
            debug!(
                path = %self.path.display(),
                offset = self.byte_offset,
                size,
                "tailed file truncated or replaced, rereading"
            );
            self.byte_offset = 0;
            self.pending.clear();
        }

        if size <= self.byte_offset {
            return TailUpdate {
                records: Vec::new(),
                reset: replaced,
            };
        }

        match self.read_to(size) {
            Ok(records) => TailUpdate {
                records,
                reset: replaced,
            },
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "tail read failed");
                TailUpdate {
                    records: Vec::new(),
                    reset: replaced,
                }
            }
        }
    }

    /// Read `[byte_offset, size)` and split off complete lines.
    fn read_to(&mut self, size: u64) -> std::io::Result<Vec<AgentRecord>> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(self.byte_offset))?;

        let mut chunk = Vec::with_capacity((size - self.byte_offset) as usize);
        file.take(size - self.byte_offset).read_to_end(&mut chunk)?;

        self.byte_offset += chunk.len() as u64;
        self.bytes_read += chunk.len() as u64;
        self.pending.extend_from_slice(&chunk);

        Ok(self.drain_complete_lines())
    }

    fn drain_complete_lines(&mut self) -> Vec<AgentRecord> {
        let mut records = Vec::new();
        let mut consumed = 0;

        while let Some(pos) = self.pending[consumed..].iter().position(|&b| b == b'\n') {
            let line = &self.pending[consumed..consumed + pos];
            consumed += pos + 1;

            let text = String::from_utf8_lossy(line);
            if text.trim().is_empty() {
                continue;
            }
            match parse_record(&text) {
                Ok(record) => records.push(record),
                Err(err) => debug!(path = %self.path.display(), error = %err, "skipping line"),
            }
        }

        self.pending.drain(..consumed);
        records
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn byte_offset(&self) -> u64 {
        self.byte_offset
    }

    /// Length of the unterminated fragment held back
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Total bytes read from disk over this tailer's lifetime
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn is_recently_modified(&self) -> bool {
        self.is_recently_modified_at(SystemTime::now(), LIVE_WINDOW)
    }

    /// Liveness from the file's mtime, independent of content changes.
    pub fn is_recently_modified_at(&self, now: SystemTime, window: Duration) -> bool {
        file_is_live(&self.path, now, window)
    }
}

#[cfg(unix)]
fn file_identity(metadata: &Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.ino())
}

#[cfg(not(unix))]
fn file_identity(_metadata: &Metadata) -> Option<u64> {
    None
}
