//! Cue value type shared by the parser, tracks and the sync engine
//!
//! A cue is a closed `[start, end]` millisecond interval paired with the text
//! shown while the playback position lies inside it. Cues compare by value:
//! two cues are equal when `start`, `end` and `text` all match.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Playback position or cue boundary in milliseconds
pub type Millis = u64;

/// A single timed span of subtitle text
///
/// # Examples
///
/// ```rust
/// use dualsub_core::Cue;
///
/// let cue = Cue::new(1000, 2000, "Hello");
/// assert!(cue.contains(1000));
/// assert!(cue.contains(2000));
/// assert!(!cue.contains(2001));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cue {
    /// Inclusive start in milliseconds
    pub start: Millis,

    /// Inclusive end in milliseconds
    pub end: Millis,

    /// Cue text, multi-line source text joined with single spaces
    pub text: String,
}

impl Cue {
    /// Create a cue from its boundaries and text
    pub fn new(start: Millis, end: Millis, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Check whether `position` lies inside the closed interval `[start, end]`
    ///
    /// Always `false` for inverted cues (`end < start`).
    #[must_use]
    pub const fn contains(&self, position: Millis) -> bool {
        self.start <= position && position <= self.end
    }

    /// Duration in milliseconds, zero for inverted cues
    #[must_use]
    pub const fn duration(&self) -> Millis {
        self.end.saturating_sub(self.start)
    }

    /// Check whether the cue ends before it starts
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --> {} {}",
            format_timestamp(self.start),
            format_timestamp(self.end),
            self.text
        )
    }
}

/// Render milliseconds in the cue grammar's `MM:SS.mmm` form
///
/// The grammar has no hour field, so positions of 100 minutes or more are
/// written with extra minute digits and will not parse back.
///
/// # Examples
///
/// ```rust
/// use dualsub_core::cue::format_timestamp;
///
/// assert_eq!(format_timestamp(1500), "00:01.500");
/// assert_eq!(format_timestamp(61_005), "01:01.005");
/// ```
#[must_use]
pub fn format_timestamp(ms: Millis) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}
