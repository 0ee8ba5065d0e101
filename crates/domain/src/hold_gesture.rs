//! Hold-to-confirm gesture for a single card
//!
//! `Idle -> Holding -> (Confirmed | Canceled)`. Timing lives outside the
//! domain; whoever owns the timer feeds [`HoldEvent::Expired`] in.

/// Input that drives a [`HoldGesture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldEvent {
    PointerDown,
    PointerUp,
    PointerLeave,
    /// Finger slid outside the card bounds
    TouchMoveOut,
    TouchCancel,
    /// The hold duration elapsed
    Expired,
}

/// Why a hold ended without a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Let go before the duration elapsed; the UI may show a hint
    ReleasedEarly,
    /// Pointer or finger left the card
    Left,
    /// The platform interrupted the touch
    Interrupted,
    /// Superseded by new board state or a disconnect
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldState {
    #[default]
    Idle,
    Holding,
    Confirmed,
    Canceled(CancelReason),
}

impl HoldState {
    pub fn is_holding(&self) -> bool {
        matches!(self, HoldState::Holding)
    }
}

/// What a single event did to the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldTransition {
    Started,
    Confirmed,
    Canceled(CancelReason),
    /// Event had no meaning in the current state
    Ignored,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HoldGesture {
    state: HoldState,
}

impl HoldGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn handle(&mut self, event: HoldEvent) -> HoldTransition {
        let transition = match (self.state, event) {
            (HoldState::Holding, HoldEvent::PointerDown) => HoldTransition::Ignored,
            (_, HoldEvent::PointerDown) => HoldTransition::Started,
            (HoldState::Holding, HoldEvent::Expired) => HoldTransition::Confirmed,
            (HoldState::Holding, HoldEvent::PointerUp) => {
                HoldTransition::Canceled(CancelReason::ReleasedEarly)
            }
            (HoldState::Holding, HoldEvent::PointerLeave | HoldEvent::TouchMoveOut) => {
                HoldTransition::Canceled(CancelReason::Left)
            }
            (HoldState::Holding, HoldEvent::TouchCancel) => {
                HoldTransition::Canceled(CancelReason::Interrupted)
            }
            _ => HoldTransition::Ignored,
        };

        self.state = match transition {
            HoldTransition::Started => HoldState::Holding,
            HoldTransition::Confirmed => HoldState::Confirmed,
            HoldTransition::Canceled(reason) => HoldState::Canceled(reason),
            HoldTransition::Ignored => self.state,
        };
        transition
    }

    /// Abort an in-progress hold from outside (new snapshot, disconnect).
    pub fn reset(&mut self) -> HoldTransition {
        if self.state.is_holding() {
            self.state = HoldState::Canceled(CancelReason::Reset);
            HoldTransition::Canceled(CancelReason::Reset)
        } else {
            HoldTransition::Ignored
        }
    }
}
