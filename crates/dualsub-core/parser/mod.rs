//! Cue document parser
//!
//! Converts raw cue text into an ordered `Vec<Cue>`. The parser is total:
//! malformed input produces fewer cues, never an error.
//!
//! # Algorithm
//!
//! 1. Split on `\n`, `\r\n` or `\r`, trim every line, drop empty lines.
//! 2. A line matching `MM:SS.mmm --> MM:SS.mmm` opens a new cue.
//! 3. Every following non-timing line is appended to the open cue's text,
//!    separated by a single space.
//! 4. Lines seen while no cue is open are dropped.
//!
//! Output order is encounter order. Cues are neither sorted, deduplicated nor
//! checked for `start <= end` unless [`ParserConfig::reject_inverted_intervals`]
//! is set.
//!
//! # Examples
//!
//! ```rust
//! use dualsub_core::{parser::CueParser, Cue};
//!
//! let cues = CueParser::new().parse("WEBVTT\n\n00:01.500 --> 00:03.200\nHello\nworld\n");
//! assert_eq!(cues, vec![Cue::new(1500, 3200, "Hello world")]);
//! ```

mod issues;
mod timestamp;

pub use issues::{CueIssue, IssueKind, IssueSeverity};
pub use timestamp::{is_timing_line, parse_timing_line};

use crate::cue::{Cue, Millis};
use timestamp::ARROW;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parser behaviour switches
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    /// Drop cues whose end lies before their start instead of keeping them
    pub reject_inverted_intervals: bool,
}

/// Cues plus the recoverable issues found while parsing them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCues {
    /// Cues in encounter order
    pub cues: Vec<Cue>,

    /// Issues in source order
    pub issues: Vec<CueIssue>,
}

impl ParsedCues {
    /// Check whether any warning-level issue was reported
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity >= IssueSeverity::Warning)
    }

    /// Issues of one kind
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &CueIssue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }
}

/// Parser for the two-field cue timestamp grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct CueParser {
    config: ParserConfig,
}

impl CueParser {
    /// Parser with the permissive default configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            config: ParserConfig {
                reject_inverted_intervals: false,
            },
        }
    }

    /// Parser with an explicit configuration
    #[must_use]
    pub const fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> ParserConfig {
        self.config
    }

    /// Parse raw cue text into cues, discarding diagnostics
    #[must_use]
    pub fn parse(&self, raw: &str) -> Vec<Cue> {
        self.parse_document(raw).cues
    }

    /// Parse raw cue text, keeping recoverable issues alongside the cues
    #[must_use]
    pub fn parse_document(&self, raw: &str) -> ParsedCues {
        let mut out = ParsedCues::default();
        let mut open: Option<OpenCue> = None;

        for line in source_lines(raw) {
            if let Some((start, end)) = parse_timing_line(line.text) {
                if let Some(done) = open.take() {
                    self.finish(done, &mut out);
                }
                open = Some(OpenCue::new(line.number, start, end));
                continue;
            }

            if line.text.contains(ARROW) {
                out.issues
                    .push(CueIssue::malformed_timestamp(line.number, line.text));
            }

            match open.as_mut() {
                Some(cue) => cue.push_text(line.text),
                None => out
                    .issues
                    .push(CueIssue::dropped_preamble(line.number, line.text)),
            }
        }

        if let Some(done) = open.take() {
            self.finish(done, &mut out);
        }

        tracing::debug!(
            cues = out.cues.len(),
            issues = out.issues.len(),
            "parsed cue document"
        );
        out
    }

    /// Close an open cue, applying interval policy and recording issues
    fn finish(&self, open: OpenCue, out: &mut ParsedCues) {
        if open.text.is_empty() {
            out.issues.push(CueIssue::empty_cue(open.line));
        }
        if open.end < open.start {
            out.issues
                .push(CueIssue::inverted_interval(open.line, open.start, open.end));
            if self.config.reject_inverted_intervals {
                return;
            }
        }
        out.cues.push(Cue::new(open.start, open.end, open.text));
    }
}

/// Parse raw cue text with the default parser
///
/// # Examples
///
/// ```rust
/// use dualsub_core::parser::parse;
///
/// let cues = parse("00:01.500 --> 00:03.200\nHello");
/// assert_eq!(cues.len(), 1);
/// assert_eq!(cues[0].start, 1500);
/// ```
#[must_use]
pub fn parse(raw: &str) -> Vec<Cue> {
    CueParser::new().parse(raw)
}

/// Cue being accumulated
#[derive(Debug)]
struct OpenCue {
    /// Source line of the timing line
    line: usize,
    start: Millis,
    end: Millis,
    text: String,
}

impl OpenCue {
    const fn new(line: usize, start: Millis, end: Millis) -> Self {
        Self {
            line,
            start,
            end,
            text: String::new(),
        }
    }

    fn push_text(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(line);
    }
}

/// Non-empty trimmed source line with its 1-based line number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceLine<'a> {
    number: usize,
    text: &'a str,
}

/// Split on any line ending, trim, and drop empty lines
fn source_lines(raw: &str) -> Vec<SourceLine<'_>> {
    let mut rest = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = Vec::new();
    let mut number = 1;

    while !rest.is_empty() {
        let (line, tail) = match rest.find(['\r', '\n']) {
            Some(idx) => {
                let sep = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                (&rest[..idx], &rest[idx + sep..])
            }
            None => (rest, ""),
        };

        let text = line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        if !text.is_empty() {
            lines.push(SourceLine { number, text });
        }
        number += 1;
        rest = tail;
    }

    lines
}
