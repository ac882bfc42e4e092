//! Parse issue types for recoverable cue-document problems
//!
//! The cue parser never fails. Anything it skips, folds or accepts despite
//! looking wrong is reported here so hosts can surface diagnostics without
//! changing the parsed output.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Issue severity levels
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueSeverity {
    /// Expected input handled silently, e.g. a `WEBVTT` header line
    Info,

    /// Input that is probably a mistake and may affect what is shown
    Warning,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// What the parser noticed
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// A line containing `-->` that is not a valid `MM:SS.mmm --> MM:SS.mmm` timing line
    MalformedTimestamp,

    /// A cue whose end lies before its start
    InvertedInterval,

    /// A line dropped because no cue was open yet
    DroppedPreamble,

    /// A timing line followed directly by another timing line or end of input
    EmptyCue,
}

impl IssueKind {
    /// Default severity for this kind of issue
    #[must_use]
    pub const fn severity(self) -> IssueSeverity {
        match self {
            Self::MalformedTimestamp | Self::InvertedInterval => IssueSeverity::Warning,
            Self::DroppedPreamble | Self::EmptyCue => IssueSeverity::Info,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTimestamp => write!(f, "malformed timestamp"),
            Self::InvertedInterval => write!(f, "inverted interval"),
            Self::DroppedPreamble => write!(f, "dropped preamble"),
            Self::EmptyCue => write!(f, "empty cue"),
        }
    }
}

/// A single recoverable problem found while parsing
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueIssue {
    /// Issue severity level
    pub severity: IssueSeverity,

    /// Issue kind for filtering
    pub kind: IssueKind,

    /// Line number in the raw source (1-based)
    pub line: usize,

    /// Human-readable message
    pub message: String,
}

impl CueIssue {
    /// Create an issue using the kind's default severity
    #[must_use]
    pub const fn new(kind: IssueKind, line: usize, message: String) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            line,
            message,
        }
    }

    /// Line is not a valid timing line although it contains an arrow
    #[must_use]
    pub fn malformed_timestamp(line: usize, text: &str) -> Self {
        Self::new(
            IssueKind::MalformedTimestamp,
            line,
            format!("'{text}' is not a MM:SS.mmm --> MM:SS.mmm timing line"),
        )
    }

    /// Cue ends before it starts
    #[must_use]
    pub fn inverted_interval(line: usize, start: u64, end: u64) -> Self {
        Self::new(
            IssueKind::InvertedInterval,
            line,
            format!("cue ends at {end}ms before it starts at {start}ms"),
        )
    }

    /// Line dropped before the first cue
    #[must_use]
    pub fn dropped_preamble(line: usize, text: &str) -> Self {
        Self::new(
            IssueKind::DroppedPreamble,
            line,
            format!("'{text}' appears before the first cue"),
        )
    }

    /// Cue without any text lines
    #[must_use]
    pub fn empty_cue(line: usize) -> Self {
        Self::new(IssueKind::EmptyCue, line, "cue has no text".to_string())
    }
}

impl fmt::Display for CueIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}: {} ({})",
            self.severity, self.line, self.message, self.kind
        )
    }
}
