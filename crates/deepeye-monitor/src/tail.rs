//! Bounded tail extraction from the watched file.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::config::TailWindow;

/// Read the decoded tail of the file at `path`.
///
/// Seeks to `max(0, len - max_chars)` bytes, reads to end-of-file, decodes
/// lossily (undecodable sequences are substituted, never an error), and
/// returns the last `min_chars` characters — fewer if the decoded text is
/// shorter. Racing a concurrent appender is acceptable under the polling
/// model; the caller treats any I/O error as file-recreated, not fatal.
pub fn read_tail(path: &Path, window: &TailWindow) -> io::Result<String> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();

    let start = len.saturating_sub(window.max_chars as u64);
    file.seek(SeekFrom::Start(start))?;

    let mut bytes = Vec::with_capacity(window.max_chars);
    file.read_to_end(&mut bytes)?;
    let decoded = String::from_utf8_lossy(&bytes);

    let chars: Vec<char> = decoded.chars().collect();
    let skip = chars.len().saturating_sub(window.min_chars);
    Ok(chars[skip..].iter().collect())
}
