//! Pointer routing for the deck widget.
//!
//! The host forwards raw pointer events as [`PointerInput`] and acts on the
//! [`PointerResponse`]: capture the pointer on the card after a grab,
//! suppress the default action while dragging, start the fly-off on a
//! commit.
//!
//! Leaving the widget is not an input. Once the pointer is captured it
//! keeps reporting wherever it goes, and only its own `pointerup` or
//! `pointercancel` ends the drag.

use crate::deck::{MoveOutcome, PendingSwipe, ReleaseOutcome, SwipeDeck};
use crate::types::{CardKey, Point, PointerId};

/// A pointer event as the widget sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// `pointerdown` on a card
    Down {
        key: CardKey,
        pointer: PointerId,
        point: Point,
    },
    /// `pointermove` anywhere
    Move { pointer: PointerId, point: Point },
    /// `pointerup` anywhere
    Up { pointer: PointerId },
    /// `pointercancel`, e.g. the OS took the touch for a system gesture
    Cancel { pointer: PointerId },
}

impl PointerInput {
    pub fn pointer(&self) -> PointerId {
        match self {
            PointerInput::Down { pointer, .. }
            | PointerInput::Move { pointer, .. }
            | PointerInput::Up { pointer }
            | PointerInput::Cancel { pointer } => *pointer,
        }
    }
}

/// What the host should do after an input
#[derive(Debug, Clone, PartialEq)]
pub enum PointerResponse {
    Ignored,
    /// A drag started; capture `pointer` on the card so it is tracked
    /// outside the widget
    Capture { key: CardKey, pointer: PointerId },
    /// Vertical move, left to the browser
    Scroll,
    /// The card followed the pointer
    Dragged,
    SnappedBack,
    /// Play the fly-off and complete the ticket when it ends
    Committed(PendingSwipe),
}

impl PointerResponse {
    pub fn should_prevent_default(&self) -> bool {
        matches!(self, PointerResponse::Dragged)
    }
}

impl From<ReleaseOutcome> for PointerResponse {
    fn from(outcome: ReleaseOutcome) -> Self {
        match outcome {
            ReleaseOutcome::Ignored => PointerResponse::Ignored,
            ReleaseOutcome::SnappedBack => PointerResponse::SnappedBack,
            ReleaseOutcome::Committed(ticket) => PointerResponse::Committed(ticket),
        }
    }
}

impl SwipeDeck {
    /// Whether `input` can change the deck at all.
    ///
    /// Lets the host skip a state write for moves of a pointer that is not
    /// dragging, which is almost every move.
    pub fn routes(&self, input: &PointerInput) -> bool {
        match input {
            PointerInput::Down { .. } => !self.is_animating() && !self.is_dragging(),
            _ => self.gesture().is_driven_by(input.pointer()),
        }
    }

    /// Apply one pointer event.
    pub fn handle_pointer(&mut self, input: PointerInput) -> PointerResponse {
        match input {
            PointerInput::Down {
                key,
                pointer,
                point,
            } => {
                if self.pointer_down(key, pointer, point) {
                    PointerResponse::Capture { key, pointer }
                } else {
                    PointerResponse::Ignored
                }
            }
            PointerInput::Move { pointer, point } => match self.pointer_move(pointer, point) {
                MoveOutcome::Ignored => PointerResponse::Ignored,
                MoveOutcome::Scroll => PointerResponse::Scroll,
                MoveOutcome::Dragged(_) => PointerResponse::Dragged,
            },
            PointerInput::Up { pointer } => self.pointer_up(pointer).into(),
            PointerInput::Cancel { pointer } => self.pointer_cancel(pointer).into(),
        }
    }
}
