//! Head/tail truncation of listing lines

use std::io;

use super::ListingOutput;

/// Line standing in for omitted listing lines.
pub const OMITTED_MARKER: &str = "..........  ..... ..";

/// Apply head or tail truncation.
///
/// Head wins when both are set and it actually truncates; a count of at
/// least the line count leaves the listing alone.
pub fn truncate(mut lines: Vec<String>, head: Option<usize>, tail: Option<usize>) -> Vec<String> {
    let len = lines.len();
    if let Some(n) = head.filter(|&n| n > 0 && n < len) {
        lines.truncate(n);
        lines.push(OMITTED_MARKER.to_string());
    } else if let Some(n) = tail.filter(|&n| n > 0 && n < len) {
        lines.drain(..len - n - 1);
        lines[0] = OMITTED_MARKER.to_string();
    }
    lines
}

/// Truncate and emit lines in order.
pub fn render<O: ListingOutput + ?Sized>(
    lines: Vec<String>,
    head: Option<usize>,
    tail: Option<usize>,
    output: &mut O,
) -> io::Result<()> {
    for line in truncate(lines, head, tail) {
        output.line(&line)?;
    }
    Ok(())
}
