//! Timing-line grammar: `MM:SS.mmm --> MM:SS.mmm`
//!
//! Two-digit minutes, two-digit seconds, three-digit milliseconds, one
//! whitespace character on each side of the arrow. There is no hour field;
//! `00:00:01.000 --> 00:00:02.000` is not a timing line. Seconds are not
//! range-checked, so `00:75.000` means 75 000 ms.

use std::sync::LazyLock;

use regex::Regex;

use crate::cue::Millis;

/// Compiled timing-line pattern
static TIMING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{2}):([0-9]{2})\.([0-9]{3})\s-->\s([0-9]{2}):([0-9]{2})\.([0-9]{3})$",
    )
    .expect("timing line pattern is a valid regex")
});

/// Arrow that marks a line as intended to be a timing line
pub(crate) const ARROW: &str = "-->";

/// Parse a trimmed line as a timing line
///
/// Returns `(start, end)` in milliseconds, or `None` when the line does not
/// match the grammar exactly.
///
/// # Examples
///
/// ```rust
/// use dualsub_core::parser::parse_timing_line;
///
/// assert_eq!(parse_timing_line("00:01.500 --> 00:03.200"), Some((1500, 3200)));
/// assert_eq!(parse_timing_line("00:00:01.500 --> 00:00:03.200"), None);
/// ```
#[must_use]
pub fn parse_timing_line(line: &str) -> Option<(Millis, Millis)> {
    let caps = TIMING_LINE.captures(line)?;
    let field = |idx: usize| caps.get(idx).map_or(0, |m| digits_value(m.as_str()));

    let start = to_millis(field(1), field(2), field(3));
    let end = to_millis(field(4), field(5), field(6));
    Some((start, end))
}

/// Check whether a trimmed line is a timing line
#[must_use]
pub fn is_timing_line(line: &str) -> bool {
    TIMING_LINE.is_match(line)
}

/// `minutes * 60000 + seconds * 1000 + millis`
const fn to_millis(minutes: u64, seconds: u64, millis: u64) -> Millis {
    minutes * 60_000 + seconds * 1000 + millis
}

/// Value of an ASCII digit run already validated by the pattern
fn digits_value(digits: &str) -> u64 {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
}
