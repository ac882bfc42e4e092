//! Renderer collaborator contract
//!
//! The engine decides *what* each slot shows; renderers decide *whether and how*
//! it is displayed. [`TransitionSink`] is the seam. [`OverlayModel`] is a
//! headless renderer that keeps the displayed text per slot and applies the
//! secondary-visibility flag, usable by hosts as their view model and by tests.

use crate::config::SubtitleConfig;
use crate::engine::{CueAction, Transition, TrackSlot};

/// Consumer of engine transitions
pub trait TransitionSink {
    /// Apply one transition
    fn apply(&mut self, transition: &Transition);
}

impl TransitionSink for Vec<Transition> {
    fn apply(&mut self, transition: &Transition) {
        self.push(transition.clone());
    }
}

impl<S: TransitionSink + ?Sized> TransitionSink for &mut S {
    fn apply(&mut self, transition: &Transition) {
        (**self).apply(transition);
    }
}

/// Headless view of both subtitle slots
///
/// Stores the last text each slot was told to show. Secondary visibility is
/// derived on read from the flag, so flipping the flag takes effect without a
/// new tick.
///
/// # Examples
///
/// ```rust
/// use dualsub_core::{render::{OverlayModel, TransitionSink}, Transition, TrackSlot};
///
/// let mut overlay = OverlayModel::new(true);
/// overlay.apply(&Transition::show(TrackSlot::Secondary, "merhaba"));
/// assert_eq!(overlay.visible_text(TrackSlot::Secondary), Some("merhaba"));
///
/// overlay.set_show_secondary(false);
/// assert_eq!(overlay.visible_text(TrackSlot::Secondary), None);
///
/// overlay.set_show_secondary(true);
/// assert_eq!(overlay.visible_text(TrackSlot::Secondary), Some("merhaba"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayModel {
    primary: Option<String>,
    secondary: Option<String>,
    show_secondary: bool,
    applied: usize,
}

impl OverlayModel {
    /// Empty overlay with the given secondary-visibility flag
    #[must_use]
    pub const fn new(show_secondary: bool) -> Self {
        Self {
            primary: None,
            secondary: None,
            show_secondary,
            applied: 0,
        }
    }

    /// Empty overlay following a configuration snapshot
    #[must_use]
    pub const fn from_config(config: &SubtitleConfig) -> Self {
        Self::new(config.show_secondary())
    }

    /// Update the secondary-visibility flag
    pub fn set_show_secondary(&mut self, show: bool) {
        self.show_secondary = show;
    }

    /// Current secondary-visibility flag
    #[must_use]
    pub const fn show_secondary(&self) -> bool {
        self.show_secondary
    }

    /// Text last assigned to a slot, ignoring visibility
    #[must_use]
    pub fn current_text(&self, slot: TrackSlot) -> Option<&str> {
        match slot {
            TrackSlot::Primary => self.primary.as_deref(),
            TrackSlot::Secondary => self.secondary.as_deref(),
        }
    }

    /// Text actually visible in a slot
    #[must_use]
    pub fn visible_text(&self, slot: TrackSlot) -> Option<&str> {
        if slot == TrackSlot::Secondary && !self.show_secondary {
            return None;
        }
        self.current_text(slot)
    }

    /// Check whether a slot is visible
    #[must_use]
    pub fn is_visible(&self, slot: TrackSlot) -> bool {
        self.visible_text(slot).is_some()
    }

    /// Number of transitions applied so far
    #[must_use]
    pub const fn applied(&self) -> usize {
        self.applied
    }
}

impl TransitionSink for OverlayModel {
    fn apply(&mut self, transition: &Transition) {
        let target = match transition.slot {
            TrackSlot::Primary => &mut self.primary,
            TrackSlot::Secondary => &mut self.secondary,
        };
        *target = match &transition.action {
            CueAction::Show(text) => Some(text.clone()),
            CueAction::Hide => None,
        };
        self.applied += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_then_hide() {
        let mut overlay = OverlayModel::new(true);
        overlay.apply(&Transition::show(TrackSlot::Primary, "hello"));
        assert_eq!(overlay.visible_text(TrackSlot::Primary), Some("hello"));
        overlay.apply(&Transition::hide(TrackSlot::Primary));
        assert_eq!(overlay.visible_text(TrackSlot::Primary), None);
        assert_eq!(overlay.applied(), 2);
    }

    #[test]
    fn flag_gates_secondary_only() {
        let mut overlay = OverlayModel::new(false);
        overlay.apply(&Transition::show(TrackSlot::Primary, "a"));
        overlay.apply(&Transition::show(TrackSlot::Secondary, "b"));
        assert!(overlay.is_visible(TrackSlot::Primary));
        assert!(!overlay.is_visible(TrackSlot::Secondary));
        assert_eq!(overlay.current_text(TrackSlot::Secondary), Some("b"));
    }

    #[test]
    fn vec_collects_transitions() {
        let mut sink: Vec<Transition> = Vec::new();
        sink.apply(&Transition::hide(TrackSlot::Secondary));
        assert_eq!(sink, vec![Transition::hide(TrackSlot::Secondary)]);
    }

    #[test]
    fn follows_config_flag() {
        let config = SubtitleConfig::default().with_show_secondary(false);
        assert!(!OverlayModel::from_config(&config).show_secondary());
    }
}
