//! Immutable subtitle configuration snapshots
//!
//! A [`SubtitleConfig`] is built once and never mutated; every update returns
//! a new snapshot. Hosts pass snapshots into session selection and renderers.
//! Persistence is the host's business: the optional JSON helpers only convert
//! between snapshots and text.

use crate::engine::TrackSlot;
use crate::error::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display values handed through to renderers
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
    /// Text colour of the primary slot
    #[cfg_attr(feature = "serde", serde(alias = "originalColor"))]
    pub primary_color: String,

    /// Text colour of the secondary slot
    #[cfg_attr(feature = "serde", serde(alias = "translatedColor"))]
    pub secondary_color: String,

    /// Background behind both slots
    pub background_color: String,

    /// Font size in pixels
    pub font_size: u32,

    /// CSS-style font family list
    pub font_family: String,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            primary_color: "#ffd700".to_string(),
            secondary_color: "#ffffff".to_string(),
            background_color: "rgba(0, 0, 0, 0.7)".to_string(),
            font_size: 16,
            font_family: "'Work Sans', system-ui, arial".to_string(),
        }
    }
}

/// Language selection and display settings
///
/// # Examples
///
/// ```rust
/// use dualsub_core::SubtitleConfig;
///
/// let config = SubtitleConfig::default();
/// assert_eq!(config.primary_language(), "en");
/// assert_eq!(config.secondary_language(), "tr");
///
/// // Picking the secondary's language for primary swaps the secondary over.
/// let swapped = config.with_primary_language("tr", &["en", "tr"])?;
/// assert_eq!(swapped.primary_language(), "tr");
/// assert_eq!(swapped.secondary_language(), "en");
/// # Ok::<(), dualsub_core::error::ConfigError>(())
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleConfig {
    primary_language: String,
    secondary_language: String,
    #[cfg_attr(feature = "serde", serde(alias = "showSecondarySubtitle"))]
    show_secondary: bool,
    #[cfg_attr(feature = "serde", serde(flatten))]
    appearance: Appearance,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            primary_language: "en".to_string(),
            secondary_language: "tr".to_string(),
            show_secondary: true,
            appearance: Appearance::default(),
        }
    }
}

impl SubtitleConfig {
    /// Snapshot with two distinct languages and default display settings
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SameLanguage`] if both codes are equal.
    pub fn new(
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            primary_language: primary.into(),
            secondary_language: secondary.into(),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Primary language code
    #[must_use]
    pub fn primary_language(&self) -> &str {
        &self.primary_language
    }

    /// Secondary language code
    #[must_use]
    pub fn secondary_language(&self) -> &str {
        &self.secondary_language
    }

    /// Language code of a slot
    #[must_use]
    pub fn language(&self, slot: TrackSlot) -> &str {
        match slot {
            TrackSlot::Primary => &self.primary_language,
            TrackSlot::Secondary => &self.secondary_language,
        }
    }

    /// Whether the secondary slot should be displayed
    #[must_use]
    pub const fn show_secondary(&self) -> bool {
        self.show_secondary
    }

    /// Renderer display values
    #[must_use]
    pub const fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// New snapshot with a different primary language
    ///
    /// If `code` is the current secondary language, the secondary moves to an
    /// alternative from `known` (see [`Self::with_language`]).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoAlternativeLanguage`] when the secondary must
    /// move but `known` offers nothing else.
    pub fn with_primary_language(
        self,
        code: impl Into<String>,
        known: &[&str],
    ) -> Result<Self, ConfigError> {
        self.with_language(TrackSlot::Primary, code, known)
    }

    /// New snapshot with a different secondary language
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoAlternativeLanguage`] when the primary must
    /// move but `known` offers nothing else.
    pub fn with_secondary_language(
        self,
        code: impl Into<String>,
        known: &[&str],
    ) -> Result<Self, ConfigError> {
        self.with_language(TrackSlot::Secondary, code, known)
    }

    /// New snapshot with `slot` set to `code`
    ///
    /// The two slots never share a language. When `code` equals the other
    /// slot's language, the other slot takes the changed slot's previous
    /// language if that is in `known`, otherwise the first entry of `known`
    /// that differs from `code`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoAlternativeLanguage`] when no such language exists.
    pub fn with_language(
        mut self,
        slot: TrackSlot,
        code: impl Into<String>,
        known: &[&str],
    ) -> Result<Self, ConfigError> {
        let code = code.into();

        if code == self.language(slot.other()) {
            let previous = self.language(slot);
            let alternative = if previous != code && known.contains(&previous) {
                previous.to_string()
            } else {
                known
                    .iter()
                    .find(|candidate| **candidate != code)
                    .map(|candidate| (*candidate).to_string())
                    .ok_or_else(|| ConfigError::NoAlternativeLanguage { code: code.clone() })?
            };
            tracing::debug!(
                slot = %slot.other(),
                language = %alternative,
                "moved other slot to avoid duplicate language"
            );
            *self.language_mut(slot.other()) = alternative;
        }

        *self.language_mut(slot) = code;
        Ok(self)
    }

    /// New snapshot with a different secondary-visibility flag
    #[must_use]
    pub fn with_show_secondary(self, show: bool) -> Self {
        Self {
            show_secondary: show,
            ..self
        }
    }

    /// New snapshot with different display values
    #[must_use]
    pub fn with_appearance(self, appearance: Appearance) -> Self {
        Self { appearance, ..self }
    }

    /// Check the snapshot invariants
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SameLanguage`] if both slots hold one language.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.primary_language == self.secondary_language {
            return Err(ConfigError::SameLanguage {
                code: self.primary_language.clone(),
            });
        }
        Ok(())
    }

    /// Read a snapshot, filling absent fields from the defaults
    ///
    /// Accepts both this crate's field names and the browser settings names
    /// (`originalColor`, `translatedColor`, `showSecondarySubtitle`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for unreadable JSON and
    /// [`ConfigError::SameLanguage`] if both languages are equal.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the snapshot as JSON
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if serialization fails.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Json(e.to_string()))
    }

    fn language_mut(&mut self, slot: TrackSlot) -> &mut String {
        match slot {
            TrackSlot::Primary => &mut self.primary_language,
            TrackSlot::Secondary => &mut self.secondary_language,
        }
    }
}
