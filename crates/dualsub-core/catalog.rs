//! Language catalog: which subtitle sources a video offers
//!
//! Maps language codes to source locations, in the order the player declares
//! them. Looking up a code that is not present is the missing-track case and
//! simply yields `None`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::error::CatalogError;

/// One available subtitle source
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubtitleSource {
    /// Language code, e.g. `en`
    pub code: String,

    /// Where the host can fetch the raw text from
    #[cfg_attr(feature = "serde", serde(rename = "src"))]
    pub location: String,

    /// Human-readable label, if the player provides one
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub label: Option<String>,
}

impl SubtitleSource {
    /// Source without a label
    pub fn new(code: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            location: location.into(),
            label: None,
        }
    }

    /// Attach a display label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Ordered language-code to source mapping
///
/// # Examples
///
/// ```rust
/// use dualsub_core::{SubtitleCatalog, catalog::SubtitleSource};
///
/// let catalog = SubtitleCatalog::from_sources([
///     SubtitleSource::new("en", "https://cdn.example/en.vtt"),
///     SubtitleSource::new("tr", "https://cdn.example/tr.vtt"),
/// ]);
/// assert_eq!(catalog.language_codes(), vec!["en", "tr"]);
/// assert!(catalog.source("de").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleCatalog {
    sources: Vec<SubtitleSource>,
}

/// Where the subtitle list lives inside the player configuration document
#[cfg(feature = "serde")]
const PLAYER_SUBTITLES_POINTER: &str = "/props/pageProps/playerConfig/media/subtitles";

impl SubtitleCatalog {
    /// Empty catalog
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Catalog from sources in declaration order; the last entry wins for a repeated code
    pub fn from_sources(sources: impl IntoIterator<Item = SubtitleSource>) -> Self {
        let mut catalog = Self::new();
        for source in sources {
            catalog.insert(source);
        }
        catalog
    }

    /// Add a source, replacing any earlier source for the same code
    ///
    /// A replaced source keeps its position in declaration order. Returns the
    /// source that was replaced.
    pub fn insert(&mut self, source: SubtitleSource) -> Option<SubtitleSource> {
        match self.sources.iter_mut().find(|existing| existing.code == source.code) {
            Some(existing) => {
                tracing::debug!(code = %source.code, "repeated subtitle language replaces earlier entry");
                Some(std::mem::replace(existing, source))
            }
            None => {
                self.sources.push(source);
                None
            }
        }
    }

    /// Source for a language code
    #[must_use]
    pub fn source(&self, code: &str) -> Option<&SubtitleSource> {
        self.sources.iter().find(|source| source.code == code)
    }

    /// Check whether a language is available
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.source(code).is_some()
    }

    /// All sources in declaration order
    #[must_use]
    pub fn sources(&self) -> &[SubtitleSource] {
        &self.sources
    }

    /// Available language codes in declaration order
    #[must_use]
    pub fn language_codes(&self) -> Vec<&str> {
        self.sources.iter().map(|source| source.code.as_str()).collect()
    }

    /// Number of languages
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check whether no language is available
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Read the subtitle list from a player configuration document
    ///
    /// The list is expected at `props.pageProps.playerConfig.media.subtitles`,
    /// each entry carrying `code` and `src` and optionally `label`. Entries
    /// lacking `code` or `src` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidJson`] for unreadable JSON and
    /// [`CatalogError::MissingSubtitles`] if the list is absent or not an array.
    #[cfg(feature = "serde")]
    pub fn from_player_config(json: &str) -> Result<Self, CatalogError> {
        let document: serde_json::Value =
            serde_json::from_str(json).map_err(|e| CatalogError::InvalidJson(e.to_string()))?;

        let entries = document
            .pointer(PLAYER_SUBTITLES_POINTER)
            .and_then(serde_json::Value::as_array)
            .ok_or(CatalogError::MissingSubtitles {
                path: PLAYER_SUBTITLES_POINTER,
            })?;

        let mut catalog = Self::new();
        for entry in entries {
            match serde_json::from_value::<SubtitleSource>(entry.clone()) {
                Ok(source) => {
                    catalog.insert(source);
                }
                Err(error) => {
                    tracing::debug!(%error, "skipping unusable subtitle entry");
                }
            }
        }

        tracing::debug!(languages = catalog.len(), "read player subtitle catalog");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_entry_wins_for_repeated_code() {
        let catalog = SubtitleCatalog::from_sources([
            SubtitleSource::new("en", "a.vtt"),
            SubtitleSource::new("tr", "c.vtt"),
            SubtitleSource::new("en", "b.vtt"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.source("en").map(|s| s.location.as_str()), Some("b.vtt"));
        assert_eq!(catalog.language_codes(), vec!["en", "tr"]);
    }

    #[test]
    fn insert_returns_replaced_source() {
        let mut catalog = SubtitleCatalog::new();
        assert_eq!(catalog.insert(SubtitleSource::new("en", "a.vtt")), None);
        assert_eq!(
            catalog.insert(SubtitleSource::new("en", "b.vtt")),
            Some(SubtitleSource::new("en", "a.vtt"))
        );
    }

    #[test]
    fn missing_language_is_none() {
        let catalog = SubtitleCatalog::from_sources([SubtitleSource::new("en", "a.vtt")]);
        assert!(catalog.source("tr").is_none());
        assert!(!catalog.contains("tr"));
        assert!(SubtitleCatalog::new().is_empty());
    }

    #[test]
    fn labels_are_optional() {
        let source = SubtitleSource::new("tr", "tr.vtt").with_label("Türkçe");
        assert_eq!(source.label.as_deref(), Some("Türkçe"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn reads_player_config() {
        let json = r#"{
            "props": {"pageProps": {"playerConfig": {"media": {"subtitles": [
                {"code": "en", "src": "https://cdn.example/en.vtt", "label": "English"},
                {"code": "tr", "src": "https://cdn.example/tr.vtt"},
                {"src": "https://cdn.example/unknown.vtt"}
            ]}}}}
        }"#;
        let catalog = SubtitleCatalog::from_player_config(json).unwrap();
        assert_eq!(catalog.language_codes(), vec!["en", "tr"]);
        assert_eq!(
            catalog.source("en").and_then(|s| s.label.as_deref()),
            Some("English")
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn player_config_repeated_code_uses_last_source() {
        let json = r#"{"props":{"pageProps":{"playerConfig":{"media":{"subtitles":[
            {"code":"en","src":"first.vtt"},
            {"code":"en","src":"second.vtt"}
        ]}}}}}"#;
        let catalog = SubtitleCatalog::from_player_config(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.source("en").map(|s| s.location.as_str()),
            Some("second.vtt")
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn player_config_without_subtitles_is_an_error() {
        assert!(matches!(
            SubtitleCatalog::from_player_config(r#"{"props":{}}"#),
            Err(CatalogError::MissingSubtitles { .. })
        ));
        assert!(matches!(
            SubtitleCatalog::from_player_config("<html>"),
            Err(CatalogError::InvalidJson(_))
        ));
    }
}
