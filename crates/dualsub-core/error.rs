//! Error types for dual-subtitle loading and configuration
//!
//! Parsing and lookup never fail; malformed cue text is reported through
//! [`CueIssue`](crate::parser::CueIssue) instead. Errors here cover the
//! outer edges: selecting languages, reading the player configuration and
//! fetching/decoding raw subtitle text. None of them is fatal to the host,
//! the worst outcome is "no subtitles for this selection".

use thiserror::Error;

/// Failure reported by a host fetcher
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Source location does not exist
    #[error("subtitle source not found: {location}")]
    NotFound { location: String },

    /// Server answered with a non-success status
    #[error("subtitle request for {location} failed with status {status}")]
    Status { location: String, status: u16 },

    /// Transport-level failure
    #[error("subtitle transport error: {0}")]
    Transport(String),

    /// Fetch was abandoned by the host
    #[error("subtitle fetch cancelled")]
    Cancelled,
}

impl FetchError {
    /// Create a transport error from any displayable cause
    pub fn transport<T: core::fmt::Display>(cause: T) -> Self {
        Self::Transport(cause.to_string())
    }
}

/// Fetch or decode failure for one language of a selection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Raw text could not be retrieved
    #[error("failed to fetch '{language}' subtitles: {source}")]
    Fetch {
        language: String,
        #[source]
        source: FetchError,
    },

    /// Retrieved bytes are not valid UTF-8 text
    #[error("failed to decode '{language}' subtitles: {message}")]
    Decode { language: String, message: String },
}

impl LoadError {
    /// Language whose load failed
    #[must_use]
    pub fn language(&self) -> &str {
        match self {
            Self::Fetch { language, .. } | Self::Decode { language, .. } => language,
        }
    }
}

/// Invalid language selection or configuration snapshot
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Primary and secondary would show the same language
    #[error("primary and secondary language are both '{code}'")]
    SameLanguage { code: String },

    /// Reselection needs to move the other slot but no other language is known
    #[error("no alternative language to '{code}' is available")]
    NoAlternativeLanguage { code: String },

    /// Snapshot JSON could not be read or written
    #[error("invalid configuration JSON: {0}")]
    Json(String),
}

/// Player configuration could not be turned into a catalog
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Document is not JSON
    #[error("player configuration is not valid JSON: {0}")]
    InvalidJson(String),

    /// Document lacks the subtitle list
    #[error("player configuration has no subtitle list at {path}")]
    MissingSubtitles { path: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn load_error_carries_language_and_source() {
        let error = LoadError::Fetch {
            language: "tr".to_string(),
            source: FetchError::Status {
                location: "https://cdn.example/tr.vtt".to_string(),
                status: 404,
            },
        };
        assert_eq!(error.language(), "tr");
        assert!(error.to_string().contains("'tr'"));
        assert!(error.source().is_some());
    }

    #[test]
    fn decode_error_display() {
        let error = LoadError::Decode {
            language: "en".to_string(),
            message: "invalid utf-8 sequence".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "failed to decode 'en' subtitles: invalid utf-8 sequence"
        );
    }

    #[test]
    fn config_error_display() {
        let error = ConfigError::SameLanguage {
            code: "en".to_string(),
        };
        assert_eq!(error.to_string(), "primary and secondary language are both 'en'");
    }

    #[test]
    fn transport_helper() {
        assert_eq!(
            FetchError::transport("connection reset"),
            FetchError::Transport("connection reset".to_string())
        );
    }
}
