//! Fetching, decoding and parsing subtitle pairs
//!
//! The core never performs I/O itself. Hosts implement [`SubtitleFetcher`]
//! for their transport (HTTP, extension messaging, files). The loader resolves
//! languages through the [`SubtitleCatalog`](crate::SubtitleCatalog), fetches
//! and parses both tracks concurrently, and hands the pair to a
//! [`SubtitleSession`] which applies it only if the selection is still current.

mod session;

pub use session::{LoadOutcome, SelectionTicket, SubtitleSession};

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::catalog::SubtitleSource;
use crate::error::{FetchError, LoadError};
use crate::parser::{CueParser, IssueSeverity};
use crate::track::Track;

/// Host-side retrieval of raw subtitle bytes
///
/// Implementations must not retry on their own behalf unless the host wants
/// that; the loader treats any error as final for the current selection.
pub trait SubtitleFetcher: Send + Sync {
    /// Retrieve the raw bytes behind `source`
    fn fetch<'a>(&'a self, source: &'a SubtitleSource) -> BoxFuture<'a, Result<Vec<u8>, FetchError>>;
}

impl<F: SubtitleFetcher + ?Sized> SubtitleFetcher for Arc<F> {
    fn fetch<'a>(&'a self, source: &'a SubtitleSource) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        (**self).fetch(source)
    }
}

impl<F: SubtitleFetcher + ?Sized> SubtitleFetcher for &F {
    fn fetch<'a>(&'a self, source: &'a SubtitleSource) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        (**self).fetch(source)
    }
}

/// Fetcher serving preloaded text keyed by source location
///
/// # Examples
///
/// ```rust
/// use dualsub_core::loader::MemoryFetcher;
///
/// let fetcher = MemoryFetcher::new()
///     .with_text("en.vtt", "00:00.000 --> 00:01.000\nHello")
///     .with_text("tr.vtt", "00:00.000 --> 00:01.000\nMerhaba");
/// assert_eq!(fetcher.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    documents: HashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    /// Empty fetcher
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` at `location`
    #[must_use]
    pub fn with_text(self, location: impl Into<String>, text: impl Into<String>) -> Self {
        self.with_bytes(location, text.into().into_bytes())
    }

    /// Serve raw `bytes` at `location`
    #[must_use]
    pub fn with_bytes(mut self, location: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.documents.insert(location.into(), bytes);
        self
    }

    /// Number of documents served
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check whether nothing is served
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl SubtitleFetcher for MemoryFetcher {
    fn fetch<'a>(&'a self, source: &'a SubtitleSource) -> BoxFuture<'a, Result<Vec<u8>, FetchError>> {
        let result = self
            .documents
            .get(&source.location)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                location: source.location.clone(),
            });
        Box::pin(futures::future::ready(result))
    }
}

/// Decode fetched bytes as UTF-8 text
///
/// # Errors
///
/// Returns [`LoadError::Decode`] if the bytes are not valid UTF-8.
pub fn decode_text(language: &str, bytes: Vec<u8>) -> Result<String, LoadError> {
    String::from_utf8(bytes).map_err(|error| LoadError::Decode {
        language: language.to_string(),
        message: error.utf8_error().to_string(),
    })
}

/// Fetch, decode and parse one language into a track
///
/// # Errors
///
/// Returns [`LoadError::Fetch`] or [`LoadError::Decode`]; parsing itself
/// cannot fail.
pub async fn load_track<F: SubtitleFetcher + ?Sized>(
    parser: &CueParser,
    source: &SubtitleSource,
    fetcher: &F,
) -> Result<Track, LoadError> {
    let bytes = fetcher
        .fetch(source)
        .await
        .map_err(|error| LoadError::Fetch {
            language: source.code.clone(),
            source: error,
        })?;
    let text = decode_text(&source.code, bytes)?;

    let parsed = parser.parse_document(&text);
    let warnings = parsed
        .issues
        .iter()
        .filter(|issue| issue.severity >= IssueSeverity::Warning)
        .count();
    if warnings > 0 {
        tracing::debug!(
            language = %source.code,
            warnings,
            "subtitle text parsed with warnings"
        );
    }

    Ok(Track::with_language(source.code.as_str(), parsed.cues))
}
