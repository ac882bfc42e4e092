//! # dualsub-core
//!
//! Dual-track timed-subtitle engine: parses two independently timed cue
//! documents (a primary and a translated language) and resolves, for every
//! playback position sample, which cue each track shows.
//!
//! ## Features
//!
//! - **Total parsing**: malformed input yields fewer cues plus diagnostics, never an error
//! - **First-match lookup**: deterministic under overlapping cues, O(log n) on large sorted tracks
//! - **Change-only output**: at most one transition per track per tick
//! - **Immutable data**: tracks and configuration snapshots are shared, never mutated
//! - **Stale-safe loading**: generation tickets keep late results from overwriting newer selections
//!
//! ## Quick Start
//!
//! ```rust
//! use dualsub_core::{parser::CueParser, SyncEngine, Track, TrackSlot, Transition};
//!
//! let parser = CueParser::new();
//! let primary = Track::with_language("en", parser.parse("WEBVTT\n\n00:01.000 --> 00:02.500\nHello there"));
//! let secondary = Track::with_language("tr", parser.parse("WEBVTT\n\n00:01.200 --> 00:02.500\nMerhaba"));
//!
//! let mut engine = SyncEngine::new(Some(primary), Some(secondary));
//! assert!(engine.on_tick(500).is_empty());
//!
//! let shown: Vec<_> = engine.on_tick(1200).into_iter().collect();
//! assert_eq!(shown, vec![
//!     Transition::show(TrackSlot::Primary, "Hello there"),
//!     Transition::show(TrackSlot::Secondary, "Merhaba"),
//! ]);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod cue;
pub mod engine;
pub mod error;
pub mod parser;
pub mod render;
pub mod track;

#[cfg(feature = "loader")]
#[cfg_attr(docsrs, doc(cfg(feature = "loader")))]
pub mod loader;

pub use catalog::SubtitleCatalog;
pub use config::SubtitleConfig;
pub use cue::{Cue, Millis};
pub use engine::{CueAction, SyncEngine, TrackSlot, Transition};
pub use error::{CatalogError, ConfigError, FetchError, LoadError};
pub use parser::CueParser;
pub use track::Track;

#[cfg(feature = "loader")]
pub use loader::{SubtitleFetcher, SubtitleSession};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::render::OverlayModel;

    #[test]
    fn parse_track_engine_overlay_pipeline() {
        let parser = CueParser::new();
        let primary = Track::new(parser.parse(
            "WEBVTT\n\n00:00.000 --> 00:00.999\na\n\n00:01.000 --> 00:01.999\nb\n",
        ));
        let secondary = Track::new(parser.parse("00:00.500 --> 00:01.500\nx\n"));

        let mut engine = SyncEngine::new(Some(primary), Some(secondary));
        let mut overlay = OverlayModel::new(false);

        engine.on_tick_into(600, &mut overlay);
        assert_eq!(overlay.visible_text(TrackSlot::Primary), Some("a"));
        assert_eq!(overlay.visible_text(TrackSlot::Secondary), None);

        overlay.set_show_secondary(true);
        assert_eq!(overlay.visible_text(TrackSlot::Secondary), Some("x"));

        engine.on_tick_into(1600, &mut overlay);
        assert_eq!(overlay.visible_text(TrackSlot::Primary), Some("b"));
        assert_eq!(overlay.visible_text(TrackSlot::Secondary), None);
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
