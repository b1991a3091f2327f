//! Line codec for the state file.
//!
//! ```text
//! # This file is automatically generated. DO NOT EDIT
//! <mtime>:<path>
//! ```
//!
//! Only the first `:` separates the fields, so paths may contain colons.
//! Paths are raw bytes and are never re-encoded.

use super::Entry;
use super::error::{ParseReason, StateError};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

/// Comment line written at the top of every state file.
pub const HEADER: &str = "# This file is automatically generated. DO NOT EDIT";

/// Write the header line
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(HEADER.as_bytes())?;
    out.write_all(b"\n")
}

/// Write one `<mtime>:<path>` record
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_record<W: Write>(out: &mut W, entry: &Entry) -> io::Result<()> {
    write!(out, "{}:", entry.mtime)?;
    out.write_all(entry.path.as_os_str().as_bytes())?;
    out.write_all(b"\n")
}

/// Parse a single line with its trailing newline already removed.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
///
/// # Errors
///
/// Returns [`StateError::Parse`] if the line has no colon, an empty path,
/// or a timestamp that is not a decimal `i64`.
pub fn parse_line(line_no: usize, line: &[u8]) -> Result<Option<Entry>, StateError> {
    if line.is_empty() || line[0] == b'#' {
        return Ok(None);
    }

    let Some(colon) = line.iter().position(|&b| b == b':') else {
        return Err(StateError::parse(line_no, ParseReason::MissingColon, line));
    };

    let (stamp, rest) = line.split_at(colon);
    let path = &rest[1..];
    if path.is_empty() {
        return Err(StateError::parse(line_no, ParseReason::EmptyPath, line));
    }

    let mtime = std::str::from_utf8(stamp)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| StateError::parse(line_no, ParseReason::InvalidMtime, line))?;

    Ok(Some(Entry {
        path: PathBuf::from(OsStr::from_bytes(path)),
        mtime,
    }))
}
