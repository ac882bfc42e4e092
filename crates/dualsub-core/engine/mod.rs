//! Dual-track synchronization engine
//!
//! [`SyncEngine`] owns a primary and a secondary [`Track`] and turns playback
//! position samples into display transitions. Each slot is an independent
//! two-state machine:
//!
//! ```text
//!            find_active = Some(c)              find_active = Some(c') != c
//!   Hidden ------------------------> Showing(c) ---------------------------> Showing(c')
//!      ^                                 |
//!      +---------------------------------+
//!            find_active = None
//! ```
//!
//! A tick that resolves to the cue already shown (compared by value) emits
//! nothing, so a slot changes at most once per tick. An absent track keeps its
//! slot `Hidden` for the engine's lifetime.
//!
//! The engine never blocks and performs no I/O. Secondary visibility is not
//! its concern: the secondary cue is resolved unconditionally and renderers
//! apply the visibility flag.

mod transition;

pub use transition::{CueAction, SlotState, TickTransitions, TrackSlot, Transition};

use crate::cue::{Cue, Millis};
use crate::render::TransitionSink;
use crate::track::Track;

/// One track plus its display state
#[derive(Debug, Clone, Default)]
struct Slot {
    track: Option<Track>,
    state: SlotState,
}

impl Slot {
    const fn new(track: Option<Track>) -> Self {
        Self {
            track,
            state: SlotState::Hidden,
        }
    }

    fn advance(&mut self, slot: TrackSlot, position: Millis) -> Option<Transition> {
        let next = self
            .track
            .as_ref()
            .and_then(|track| track.find_active(position));

        let unchanged = match (&self.state, next) {
            (SlotState::Showing(current), Some(next)) => current == next,
            (SlotState::Hidden, None) => true,
            _ => false,
        };
        if unchanged {
            return None;
        }

        match next {
            Some(cue) => {
                self.state = SlotState::Showing(cue.clone());
                Some(Transition::show(slot, cue.text.clone()))
            }
            None => {
                self.state = SlotState::Hidden;
                Some(Transition::hide(slot))
            }
        }
    }
}

/// Primary/secondary cue synchronization state
///
/// # Examples
///
/// ```rust
/// use dualsub_core::{Cue, SyncEngine, Track, TrackSlot, Transition};
///
/// let track = Track::new(vec![Cue::new(0, 999, "a"), Cue::new(1000, 1999, "b")]);
/// let mut engine = SyncEngine::new(Some(track), None);
///
/// let shown: Vec<_> = engine.on_tick(0).into_iter().collect();
/// assert_eq!(shown, vec![Transition::show(TrackSlot::Primary, "a")]);
/// assert!(engine.on_tick(500).is_empty());
/// assert_eq!(engine.active_cue(TrackSlot::Primary), Some(&Cue::new(0, 999, "a")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyncEngine {
    primary: Slot,
    secondary: Slot,
    position: Option<Millis>,
}

impl SyncEngine {
    /// Engine over a track pair; `None` marks a missing track
    #[must_use]
    pub const fn new(primary: Option<Track>, secondary: Option<Track>) -> Self {
        Self {
            primary: Slot::new(primary),
            secondary: Slot::new(secondary),
            position: None,
        }
    }

    /// Resolve both tracks at `position` and report what changed
    pub fn on_tick(&mut self, position: Millis) -> TickTransitions {
        if let Some(previous) = self.position {
            if position < previous {
                tracing::trace!(from = previous, to = position, "playback moved backwards");
            }
        }
        self.position = Some(position);

        TickTransitions::new(
            self.primary.advance(TrackSlot::Primary, position),
            self.secondary.advance(TrackSlot::Secondary, position),
        )
    }

    /// Tick and forward the resulting transitions to a renderer
    ///
    /// Returns how many transitions were forwarded.
    pub fn on_tick_into<S: TransitionSink + ?Sized>(
        &mut self,
        position: Millis,
        sink: &mut S,
    ) -> usize {
        let transitions = self.on_tick(position);
        let count = transitions.len();
        for transition in transitions.iter() {
            sink.apply(transition);
        }
        count
    }

    /// Cue currently shown in a slot
    #[must_use]
    pub const fn active_cue(&self, slot: TrackSlot) -> Option<&Cue> {
        self.state(slot).cue()
    }

    /// Display state of a slot
    #[must_use]
    pub const fn state(&self, slot: TrackSlot) -> &SlotState {
        &self.slot(slot).state
    }

    /// Track backing a slot, `None` when it is missing
    #[must_use]
    pub const fn track(&self, slot: TrackSlot) -> Option<&Track> {
        self.slot(slot).track.as_ref()
    }

    /// Position of the most recent tick
    #[must_use]
    pub const fn position(&self) -> Option<Millis> {
        self.position
    }

    /// Consume an engine being replaced, hiding every slot it still shows
    #[must_use]
    pub fn retire(self) -> Vec<Transition> {
        TrackSlot::ALL
            .into_iter()
            .filter(|&slot| self.state(slot).is_showing())
            .map(Transition::hide)
            .collect()
    }

    const fn slot(&self, slot: TrackSlot) -> &Slot {
        match slot {
            TrackSlot::Primary => &self.primary,
            TrackSlot::Secondary => &self.secondary,
        }
    }
}

/// Convert a seconds-based player clock sample to milliseconds
///
/// Rounds down; NaN and negative samples map to zero.
///
/// # Examples
///
/// ```rust
/// use dualsub_core::engine::millis_from_seconds;
///
/// assert_eq!(millis_from_seconds(1.9995), 1999);
/// assert_eq!(millis_from_seconds(-3.0), 0);
/// assert_eq!(millis_from_seconds(f64::NAN), 0);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn millis_from_seconds(seconds: f64) -> Millis {
    if seconds.is_nan() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0).floor() as Millis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab_track() -> Track {
        Track::new(vec![Cue::new(0, 999, "a"), Cue::new(1000, 1999, "b")])
    }

    #[test]
    fn tick_sequence_emits_three_transitions() {
        let mut engine = SyncEngine::new(Some(ab_track()), None);
        let mut seen = Vec::new();
        for position in [0, 500, 1500, 2500] {
            let tick: Vec<_> = engine.on_tick(position).into_iter().collect();
            seen.push((position, tick));
        }
        assert_eq!(
            seen,
            vec![
                (0, vec![Transition::show(TrackSlot::Primary, "a")]),
                (500, vec![]),
                (1500, vec![Transition::show(TrackSlot::Primary, "b")]),
                (2500, vec![Transition::hide(TrackSlot::Primary)]),
            ]
        );
    }

    #[test]
    fn repeated_position_is_idempotent() {
        let mut engine = SyncEngine::new(Some(ab_track()), Some(ab_track()));
        assert_eq!(engine.on_tick(1200).len(), 2);
        assert!(engine.on_tick(1200).is_empty());
        assert!(engine.on_tick(1200).is_empty());
    }

    #[test]
    fn missing_track_stays_hidden() {
        let mut engine = SyncEngine::new(Some(ab_track()), None);
        for position in [0, 1000, 5000] {
            assert!(engine.on_tick(position).get(TrackSlot::Secondary).is_none());
        }
        assert_eq!(engine.active_cue(TrackSlot::Secondary), None);
        assert!(engine.track(TrackSlot::Secondary).is_none());
    }

    #[test]
    fn identical_adjacent_cues_do_not_retrigger() {
        let track = Track::new(vec![Cue::new(0, 100, "same"), Cue::new(0, 100, "same")]);
        let mut engine = SyncEngine::new(Some(track), None);
        assert_eq!(engine.on_tick(10).len(), 1);
        assert!(engine.on_tick(90).is_empty());
    }

    #[test]
    fn same_text_different_timing_is_a_new_show() {
        let track = Track::new(vec![Cue::new(0, 100, "same"), Cue::new(101, 200, "same")]);
        let mut engine = SyncEngine::new(Some(track), None);
        engine.on_tick(50);
        let tick: Vec<_> = engine.on_tick(150).into_iter().collect();
        assert_eq!(tick, vec![Transition::show(TrackSlot::Primary, "same")]);
    }

    #[test]
    fn seek_backwards_reshows_earlier_cue() {
        let mut engine = SyncEngine::new(Some(ab_track()), None);
        engine.on_tick(1500);
        let tick: Vec<_> = engine.on_tick(100).into_iter().collect();
        assert_eq!(tick, vec![Transition::show(TrackSlot::Primary, "a")]);
        assert_eq!(engine.position(), Some(100));
    }

    #[test]
    fn slots_are_independent() {
        let secondary = Track::new(vec![Cue::new(400, 600, "x")]);
        let mut engine = SyncEngine::new(Some(ab_track()), Some(secondary));
        let first: Vec<_> = engine.on_tick(0).into_iter().collect();
        assert_eq!(first, vec![Transition::show(TrackSlot::Primary, "a")]);
        let second: Vec<_> = engine.on_tick(500).into_iter().collect();
        assert_eq!(second, vec![Transition::show(TrackSlot::Secondary, "x")]);
        let third: Vec<_> = engine.on_tick(700).into_iter().collect();
        assert_eq!(third, vec![Transition::hide(TrackSlot::Secondary)]);
    }

    #[test]
    fn on_tick_into_forwards_to_sink() {
        let mut engine = SyncEngine::new(Some(ab_track()), Some(ab_track()));
        let mut sink: Vec<Transition> = Vec::new();
        assert_eq!(engine.on_tick_into(0, &mut sink), 2);
        assert_eq!(engine.on_tick_into(10, &mut sink), 0);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn retire_hides_showing_slots() {
        let mut engine = SyncEngine::new(Some(ab_track()), Some(Track::default()));
        engine.on_tick(0);
        assert_eq!(engine.retire(), vec![Transition::hide(TrackSlot::Primary)]);
        assert!(SyncEngine::default().retire().is_empty());
    }

    #[test]
    fn seconds_conversion() {
        assert_eq!(millis_from_seconds(0.0), 0);
        assert_eq!(millis_from_seconds(1.5), 1500);
        assert_eq!(millis_from_seconds(f64::INFINITY), Millis::MAX);
    }
}
