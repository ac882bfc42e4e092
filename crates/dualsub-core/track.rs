//! Immutable cue track with active-cue lookup
//!
//! A [`Track`] is built once from parsed cues and never mutated. Cloning is
//! cheap (the cue list is shared) and tracks are `Send + Sync`, so several
//! tick callers may read the same track.
//!
//! # Lookup rule
//!
//! [`Track::find_active`] returns the **first** cue in list order whose closed
//! interval `[start, end]` contains the position. Overlapping cues are not
//! merged or prioritised beyond that.
//!
//! Large tracks whose starts are non-decreasing get a lookup index: a binary
//! search over `start` bounds the candidates, and a binary search over the
//! running maximum of `end` picks the earliest candidate that still covers the
//! position. The result is identical to the linear scan, overlaps included.

use std::sync::Arc;

use crate::cue::{Cue, Millis};

/// Tracks with at least this many sorted cues use the lookup index
pub const INDEXED_LOOKUP_THRESHOLD: usize = 1024;

/// Ordered, immutable cue collection for one language
#[derive(Debug, Clone)]
pub struct Track {
    /// Language code this track was loaded for, if known
    language: Option<Arc<str>>,

    /// Cues in source order
    cues: Arc<[Cue]>,

    /// Lookup index, present for large sorted tracks
    index: Option<Arc<LookupIndex>>,

    /// Whether starts are non-decreasing
    sorted: bool,
}

/// Running maximum of cue ends, valid only for start-sorted cues
#[derive(Debug)]
struct LookupIndex {
    /// `max_end[i] = max(cues[0..=i].end)`
    max_end: Vec<Millis>,
}

impl LookupIndex {
    fn build(cues: &[Cue]) -> Self {
        let max_end = cues
            .iter()
            .scan(0, |max, cue| {
                *max = (*max).max(cue.end);
                Some(*max)
            })
            .collect();
        Self { max_end }
    }

    fn find(&self, cues: &[Cue], position: Millis) -> Option<usize> {
        let candidates = cues.partition_point(|cue| cue.start <= position);
        let first = self.max_end[..candidates].partition_point(|&end| end < position);
        (first < candidates).then_some(first)
    }
}

impl Track {
    /// Build a track from cues in source order
    #[must_use]
    pub fn new(cues: Vec<Cue>) -> Self {
        let sorted = cues.windows(2).all(|pair| pair[0].start <= pair[1].start);
        let index = (sorted && cues.len() >= INDEXED_LOOKUP_THRESHOLD)
            .then(|| Arc::new(LookupIndex::build(&cues)));

        Self {
            language: None,
            cues: cues.into(),
            index,
            sorted,
        }
    }

    /// Build a track tagged with the language it was loaded for
    #[must_use]
    pub fn with_language(language: impl Into<Arc<str>>, cues: Vec<Cue>) -> Self {
        Self {
            language: Some(language.into()),
            ..Self::new(cues)
        }
    }

    /// The cue active at `position`, first match in list order
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dualsub_core::{Cue, Track};
    ///
    /// let track = Track::new(vec![Cue::new(0, 100, "A"), Cue::new(50, 150, "B")]);
    /// assert_eq!(track.find_active(75).map(|c| c.text.as_str()), Some("A"));
    /// assert_eq!(track.find_active(120).map(|c| c.text.as_str()), Some("B"));
    /// assert_eq!(track.find_active(151), None);
    /// ```
    #[must_use]
    pub fn find_active(&self, position: Millis) -> Option<&Cue> {
        self.find_active_index(position).map(|idx| &self.cues[idx])
    }

    /// Index of the cue active at `position`
    #[must_use]
    pub fn find_active_index(&self, position: Millis) -> Option<usize> {
        match &self.index {
            Some(index) => index.find(&self.cues, position),
            None => self.cues.iter().position(|cue| cue.contains(position)),
        }
    }

    /// All cues in source order
    #[must_use]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Language code, if the track was tagged with one
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Number of cues
    #[must_use]
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Check whether the track has no cues
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Check whether cue starts are non-decreasing
    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Check whether lookups go through the index instead of a linear scan
    #[must_use]
    pub const fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// Earliest start and latest end over all cues
    #[must_use]
    pub fn span(&self) -> Option<(Millis, Millis)> {
        let start = self.cues.iter().map(|cue| cue.start).min()?;
        let end = self.cues.iter().map(|cue| cue.end).max()?;
        Some((start, end))
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Cue>> for Track {
    fn from(cues: Vec<Cue>) -> Self {
        Self::new(cues)
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language && self.cues == other.cues
    }
}

impl Eq for Track {}
