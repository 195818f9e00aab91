//! Text codec for the warp point store.
//!
//! On-disk format, one entry per line:
//! ```text
//! key = /path/to/dir
//! ```
//!
//! Whitespace around the key and the target is ignored. Blank lines and lines
//! starting with `;`, `#` or `[` are skipped. A line is split at its first `=`
//! only, so targets may themselves contain `=`. Any other line without `=` is
//! a fatal parse error. Later lines overwrite earlier lines with the same key.
//!
//! Encoding writes `"<key> = <target>\n"` per entry in ascending key order.

use std::io::{BufRead, Write};

use crate::error::{Result, StoreError};
use crate::types::WarpPoints;

/// Line prefixes that mark a line as a comment or legacy section header.
pub(crate) const COMMENT_PREFIXES: &[char] = &[';', '#', '['];

/// Decode store text into a mapping.
///
/// Fails on the first malformed line; no partial mapping is returned.
pub fn decode(text: &str) -> Result<WarpPoints> {
    read_from(text.as_bytes())
}

/// Encode a mapping as store text. An empty mapping encodes to `""`.
pub fn encode(warp_points: &WarpPoints) -> String {
    let mut out = String::new();
    for (key, target) in warp_points.iter() {
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(target);
        out.push('\n');
    }
    out
}

/// Read a mapping from a buffered reader, line by line.
pub fn read_from<R: BufRead>(reader: R) -> Result<WarpPoints> {
    let mut warp_points = WarpPoints::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIXES) {
            continue;
        }
        let Some((key, target)) = line.split_once('=') else {
            return Err(StoreError::Malformed {
                line_no: idx + 1,
                line: line.to_string(),
            });
        };
        warp_points.insert(key.trim(), target.trim());
    }
    Ok(warp_points)
}

/// Write a mapping to `writer` in canonical form.
pub fn write_to<W: Write>(mut writer: W, warp_points: &WarpPoints) -> Result<()> {
    for (key, target) in warp_points.iter() {
        writeln!(writer, "{key} = {target}")?;
    }
    writer.flush()?;
    Ok(())
}
