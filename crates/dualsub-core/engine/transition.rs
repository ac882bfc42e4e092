//! Display-state transitions emitted by the sync engine

use core::fmt;

use crate::cue::Cue;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which of the two tracks a transition refers to
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrackSlot {
    /// Primary-language track
    Primary,

    /// Secondary (translated) track
    Secondary,
}

impl TrackSlot {
    /// Both slots, primary first
    pub const ALL: [Self; 2] = [Self::Primary, Self::Secondary];

    /// The other slot
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }
}

impl fmt::Display for TrackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

/// What the renderer should do with a slot
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CueAction {
    /// Display this text, replacing whatever the slot showed
    Show(String),

    /// Clear the slot
    Hide,
}

/// A display change for one slot
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    /// Slot the change applies to
    pub slot: TrackSlot,

    /// Change to apply
    pub action: CueAction,
}

impl Transition {
    /// Show `text` in `slot`
    pub fn show(slot: TrackSlot, text: impl Into<String>) -> Self {
        Self {
            slot,
            action: CueAction::Show(text.into()),
        }
    }

    /// Clear `slot`
    #[must_use]
    pub const fn hide(slot: TrackSlot) -> Self {
        Self {
            slot,
            action: CueAction::Hide,
        }
    }

    /// Text being shown, `None` for a hide
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.action {
            CueAction::Show(text) => Some(text),
            CueAction::Hide => None,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            CueAction::Show(text) => write!(f, "{} show {text:?}", self.slot),
            CueAction::Hide => write!(f, "{} hide", self.slot),
        }
    }
}

/// Per-slot display state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotState {
    /// Nothing shown
    #[default]
    Hidden,

    /// This cue is shown
    Showing(Cue),
}

impl SlotState {
    /// Cue being shown, if any
    #[must_use]
    pub const fn cue(&self) -> Option<&Cue> {
        match self {
            Self::Hidden => None,
            Self::Showing(cue) => Some(cue),
        }
    }

    /// Check whether something is shown
    #[must_use]
    pub const fn is_showing(&self) -> bool {
        matches!(self, Self::Showing(_))
    }
}

/// Transitions produced by one tick, at most one per slot
///
/// Iterates primary before secondary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickTransitions {
    slots: [Option<Transition>; 2],
}

impl TickTransitions {
    pub(crate) const fn new(primary: Option<Transition>, secondary: Option<Transition>) -> Self {
        Self {
            slots: [primary, secondary],
        }
    }

    /// Transition for one slot
    #[must_use]
    pub const fn get(&self, slot: TrackSlot) -> Option<&Transition> {
        match slot {
            TrackSlot::Primary => self.slots[0].as_ref(),
            TrackSlot::Secondary => self.slots[1].as_ref(),
        }
    }

    /// Number of transitions (0, 1 or 2)
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Check whether the tick changed nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterate transitions, primary first
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.slots.iter().flatten()
    }
}

impl IntoIterator for TickTransitions {
    type Item = Transition;
    type IntoIter = core::iter::Flatten<core::array::IntoIter<Option<Transition>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_other_swaps() {
        assert_eq!(TrackSlot::Primary.other(), TrackSlot::Secondary);
        assert_eq!(TrackSlot::Secondary.other(), TrackSlot::Primary);
    }

    #[test]
    fn transition_text() {
        assert_eq!(Transition::show(TrackSlot::Primary, "hi").text(), Some("hi"));
        assert_eq!(Transition::hide(TrackSlot::Primary).text(), None);
    }

    #[test]
    fn transition_display() {
        assert_eq!(
            Transition::show(TrackSlot::Secondary, "merhaba").to_string(),
            "secondary show \"merhaba\""
        );
        assert_eq!(Transition::hide(TrackSlot::Primary).to_string(), "primary hide");
    }

    #[test]
    fn tick_transitions_iterate_primary_first() {
        let tick = TickTransitions::new(
            Some(Transition::hide(TrackSlot::Primary)),
            Some(Transition::show(TrackSlot::Secondary, "b")),
        );
        assert_eq!(tick.len(), 2);
        let slots: Vec<_> = tick.iter().map(|t| t.slot).collect();
        assert_eq!(slots, vec![TrackSlot::Primary, TrackSlot::Secondary]);
        assert_eq!(
            tick.get(TrackSlot::Secondary),
            Some(&Transition::show(TrackSlot::Secondary, "b"))
        );
    }

    #[test]
    fn empty_tick() {
        let tick = TickTransitions::default();
        assert!(tick.is_empty());
        assert_eq!(tick.len(), 0);
        assert_eq!(tick.into_iter().count(), 0);
    }

    #[test]
    fn slot_state_defaults_to_hidden() {
        assert_eq!(SlotState::default(), SlotState::Hidden);
        assert!(!SlotState::Hidden.is_showing());
        assert!(SlotState::Showing(Cue::new(0, 1, "x")).is_showing());
    }
}
