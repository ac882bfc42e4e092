//! Selection-aware subtitle session
//!
//! Every language selection gets a generation number. Loads carry the ticket
//! of the selection that started them and are applied only while that
//! selection is still the newest, so a slow fetch for an abandoned language can
//! never overwrite a newer choice. Applying a load replaces the engine
//! wholesale; engines are never patched in place.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::{load_track, SubtitleFetcher};
use crate::catalog::SubtitleCatalog;
use crate::config::SubtitleConfig;
use crate::cue::{Cue, Millis};
use crate::engine::{SyncEngine, TrackSlot, Transition};
use crate::error::LoadError;
use crate::parser::CueParser;
use crate::render::TransitionSink;
use crate::track::Track;

/// Proof of which selection a load belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    generation: u64,
    config: Arc<SubtitleConfig>,
}

impl SelectionTicket {
    /// Selection generation, strictly increasing per session
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Configuration snapshot the selection was made with
    #[must_use]
    pub fn config(&self) -> &SubtitleConfig {
        &self.config
    }
}

/// Result of a load that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A new engine was installed
    Applied {
        /// Hides for whatever the replaced engine was still showing
        retired: Vec<Transition>,
    },

    /// The ticket's engine was already installed by an earlier load; nothing changed
    AlreadyApplied {
        /// Generation of the installed engine
        generation: u64,
    },

    /// The selection was superseded; the loaded tracks were discarded
    Stale {
        /// Generation of the ticket that was loaded
        generation: u64,
        /// Generation that is current now
        current: u64,
    },
}

impl LoadOutcome {
    /// Check whether the load was applied
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Engine plus the generation it was built for
#[derive(Debug, Default)]
struct Installed {
    generation: u64,
    engine: Option<SyncEngine>,
}

/// Host-facing owner of the catalog, selection and active engine
///
/// All methods take `&self`; the session can be shared behind an `Arc`
/// between the task driving loads and the callback delivering ticks.
#[derive(Debug)]
pub struct SubtitleSession {
    catalog: SubtitleCatalog,
    parser: CueParser,
    config: RwLock<Arc<SubtitleConfig>>,
    generation: AtomicU64,
    installed: Mutex<Installed>,
}

impl SubtitleSession {
    /// Session over a catalog with an initial configuration; nothing is loaded yet
    #[must_use]
    pub fn new(catalog: SubtitleCatalog, config: SubtitleConfig) -> Self {
        Self {
            catalog,
            parser: CueParser::new(),
            config: RwLock::new(Arc::new(config)),
            generation: AtomicU64::new(0),
            installed: Mutex::new(Installed::default()),
        }
    }

    /// Use a specific parser for subsequent loads
    #[must_use]
    pub fn with_parser(mut self, parser: CueParser) -> Self {
        self.parser = parser;
        self
    }

    /// Language catalog
    #[must_use]
    pub const fn catalog(&self) -> &SubtitleCatalog {
        &self.catalog
    }

    /// Current configuration snapshot
    #[must_use]
    pub fn config(&self) -> Arc<SubtitleConfig> {
        Arc::clone(&self.config.read())
    }

    /// Newest selection generation
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Check whether a ticket still belongs to the newest selection
    #[must_use]
    pub fn is_current(&self, ticket: &SelectionTicket) -> bool {
        ticket.generation == self.generation()
    }

    /// Record a new selection, superseding every earlier ticket
    pub fn select(&self, config: SubtitleConfig) -> SelectionTicket {
        let config = Arc::new(config);
        let mut current = self.config.write();
        *current = Arc::clone(&config);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        drop(current);

        tracing::info!(
            generation,
            primary = %config.primary_language(),
            secondary = %config.secondary_language(),
            "subtitle selection changed"
        );
        SelectionTicket { generation, config }
    }

    /// Start a new selection with the current configuration
    pub fn reload(&self) -> SelectionTicket {
        let config = (*self.config()).clone();
        self.select(config)
    }

    /// Update secondary visibility without reloading or re-ticking
    ///
    /// Returns the new snapshot; renderers should re-derive visibility from it
    /// using the last known active cue.
    pub fn set_show_secondary(&self, show: bool) -> Arc<SubtitleConfig> {
        let mut current = self.config.write();
        let next = Arc::new((**current).clone().with_show_secondary(show));
        *current = Arc::clone(&next);
        next
    }

    /// Fetch, parse and install the track pair for a selection
    ///
    /// Languages missing from the catalog leave their slot empty. Both present
    /// languages are fetched and parsed concurrently and both must succeed
    /// before anything is installed. The result is discarded if a newer
    /// selection was made in the meantime.
    ///
    /// # Errors
    ///
    /// Returns the first [`LoadError`] (primary before secondary) if a fetch
    /// or decode failed for a still-current selection. The previous engine,
    /// if any, stays installed.
    pub async fn load<F: SubtitleFetcher + ?Sized>(
        &self,
        ticket: &SelectionTicket,
        fetcher: &F,
    ) -> Result<LoadOutcome, LoadError> {
        if !self.is_current(ticket) {
            return Ok(self.stale(ticket));
        }

        let config = ticket.config();
        let (primary, secondary) = futures::join!(
            self.load_slot(config.primary_language(), fetcher),
            self.load_slot(config.secondary_language(), fetcher),
        );

        if !self.is_current(ticket) {
            return Ok(self.stale(ticket));
        }

        let log_failure = |error: &LoadError| {
            tracing::warn!(
                generation = ticket.generation,
                language = %error.language(),
                %error,
                "subtitle load failed; keeping previous subtitles"
            );
        };
        let primary = primary.inspect_err(log_failure);
        let secondary = secondary.inspect_err(log_failure);
        let (primary, secondary) = (primary?, secondary?);

        Ok(self.install(ticket, SyncEngine::new(primary, secondary)))
    }

    /// Resolve a tick against the installed engine
    ///
    /// Returns no transitions while nothing is installed.
    pub fn on_tick(&self, position: Millis) -> Vec<Transition> {
        let mut installed = self.installed.lock();
        installed
            .engine
            .as_mut()
            .map(|engine| engine.on_tick(position).into_iter().collect())
            .unwrap_or_default()
    }

    /// Resolve a tick and forward the transitions to a renderer
    ///
    /// The sink runs after the session lock is released, so it may call back
    /// into the session.
    pub fn on_tick_into<S: TransitionSink + ?Sized>(&self, position: Millis, sink: &mut S) -> usize {
        let transitions = {
            let mut installed = self.installed.lock();
            installed.engine.as_mut().map(|engine| engine.on_tick(position))
        };
        let Some(transitions) = transitions else {
            return 0;
        };
        for transition in transitions.iter() {
            sink.apply(transition);
        }
        transitions.len()
    }

    /// Cue currently shown in a slot
    #[must_use]
    pub fn active_cue(&self, slot: TrackSlot) -> Option<Cue> {
        let installed = self.installed.lock();
        installed
            .engine
            .as_ref()
            .and_then(|engine| engine.active_cue(slot).cloned())
    }

    /// Check whether an engine is installed
    #[must_use]
    pub fn has_engine(&self) -> bool {
        self.installed.lock().engine.is_some()
    }

    /// Generation of the installed engine, zero before the first install
    #[must_use]
    pub fn installed_generation(&self) -> u64 {
        self.installed.lock().generation
    }

    /// Earliest start and latest end over the installed tracks
    #[must_use]
    pub fn span(&self) -> Option<(Millis, Millis)> {
        let installed = self.installed.lock();
        let engine = installed.engine.as_ref()?;
        TrackSlot::ALL
            .into_iter()
            .filter_map(|slot| engine.track(slot).and_then(Track::span))
            .reduce(|(start, end), (other_start, other_end)| {
                (start.min(other_start), end.max(other_end))
            })
    }

    /// Load one language, `None` when the catalog does not offer it
    async fn load_slot<F: SubtitleFetcher + ?Sized>(
        &self,
        language: &str,
        fetcher: &F,
    ) -> Result<Option<Track>, LoadError> {
        let Some(source) = self.catalog.source(language) else {
            tracing::info!(%language, "language not offered; slot disabled");
            return Ok(None);
        };
        load_track(&self.parser, source, fetcher).await.map(Some)
    }

    /// Swap in a new engine if the ticket is still the newest
    fn install(&self, ticket: &SelectionTicket, engine: SyncEngine) -> LoadOutcome {
        let mut installed = self.installed.lock();

        if self.is_current(ticket) && ticket.generation == installed.generation {
            tracing::debug!(
                generation = ticket.generation,
                "subtitle engine for this selection already installed"
            );
            return LoadOutcome::AlreadyApplied {
                generation: ticket.generation,
            };
        }

        // Re-checked under the lock: a concurrent install for a newer ticket wins.
        if !self.is_current(ticket) || ticket.generation < installed.generation {
            drop(installed);
            return self.stale(ticket);
        }

        let retired = installed
            .engine
            .replace(engine)
            .map(SyncEngine::retire)
            .unwrap_or_default();
        installed.generation = ticket.generation;

        tracing::debug!(
            generation = ticket.generation,
            retired = retired.len(),
            "installed subtitle engine"
        );
        LoadOutcome::Applied { retired }
    }

    fn stale(&self, ticket: &SelectionTicket) -> LoadOutcome {
        let current = self.generation();
        tracing::warn!(
            generation = ticket.generation,
            current,
            "discarding subtitles for superseded selection"
        );
        LoadOutcome::Stale {
            generation: ticket.generation,
            current,
        }
    }
}
