//! The swipe deck state machine.
//!
//! [`SwipeDeck`] owns the ordered cards and the gesture state. Pointer and
//! button input go in, visual state and [`PendingSwipe`] tickets come out.
//! Nothing here sleeps or does I/O: the owner plays the fly-off animation
//! and hands the ticket back through [`SwipeDeck::complete_swipe`] once it
//! has finished.
//!
//! ## Lifecycle
//!
//! ```text
//!            pointer_down          pointer_up (> threshold)
//!   Ready ───────────────▶ drag ──────────────────────────▶ Animating
//!     ▲                      │                                  │
//!     │   pointer_up (≤)     │                                  │ complete_swipe
//!     └──────────────────────┘                                  ▼
//!     └──────────────────────────── cards left ◀──────── advance ──▶ Exhausted
//! ```

use std::path::Path;

use crate::config::DeckConfig;
use crate::error::DeckError;
use crate::gesture::{self, DragFrame, GestureState, Release};
use crate::types::{
    Card, CardData, CardKey, CardVisual, ItemId, Point, PointerId, SwipeDirection, Transition,
};

/// Coarse state of the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckStatus {
    /// Built without cards; ignores all input
    Inert,
    /// Front card accepts gestures and buttons
    Ready,
    /// Front card is being dragged
    Dragging,
    /// A committed card is flying off
    Animating,
    /// Every card has been swiped
    Exhausted,
    /// Torn down; pending work is stale
    Disposed,
}

/// Result of a pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No drag in progress
    Ignored,
    /// Vertical-dominant move, left to the browser to scroll
    Scroll,
    /// Card followed the pointer; the default action must be suppressed
    Dragged(DragFrame),
}

impl MoveOutcome {
    pub fn should_prevent_default(&self) -> bool {
        matches!(self, MoveOutcome::Dragged(_))
    }
}

/// Result of a pointer release
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    Ignored,
    SnappedBack,
    Committed(PendingSwipe),
}

/// Ticket for a committed swipe whose animation is still playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSwipe {
    pub key: CardKey,
    pub item_id: Option<ItemId>,
    pub direction: SwipeDirection,
    generation: u64,
}

/// What happened when a pending swipe was completed
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeCompletion {
    pub card: Card,
    pub direction: SwipeDirection,
    /// Item to add to the cart, set for right swipes on cards with an id
    pub add_to_cart: Option<ItemId>,
    pub remaining: usize,
}

impl SwipeCompletion {
    pub fn exhausted(&self) -> bool {
        self.remaining == 0
    }
}

/// The card stack and its gesture state.
#[derive(Debug, Clone)]
pub struct SwipeDeck {
    cards: Vec<Card>,
    config: DeckConfig,
    viewport_width: f64,
    gesture: GestureState,
    pending: Option<PendingSwipe>,
    generation: u64,
    inert: bool,
    disposed: bool,
}

impl SwipeDeck {
    /// Build a deck over cards in presentation order.
    ///
    /// An empty list gives an inert deck rather than an error.
    pub fn new(
        cards: Vec<CardData>,
        viewport_width: f64,
        config: DeckConfig,
    ) -> Result<Self, DeckError> {
        validate_viewport(viewport_width)?;

        let inert = cards.is_empty();
        let cards = cards
            .into_iter()
            .enumerate()
            .map(|(i, data)| Card {
                key: CardKey(i),
                data,
                visual: CardVisual::default(),
            })
            .collect();

        let mut deck = Self {
            cards,
            config,
            viewport_width,
            gesture: GestureState::default(),
            pending: None,
            generation: 0,
            inert,
            disposed: false,
        };
        deck.mark_front_active();

        if inert {
            tracing::debug!("Deck built without cards; staying inert");
        } else {
            tracing::debug!(cards = deck.cards.len(), viewport_width, "Deck ready");
        }
        Ok(deck)
    }

    /// A deck that ignores all input, for when no usable deck could be built
    pub fn inert(config: DeckConfig) -> Self {
        Self {
            cards: Vec::new(),
            config,
            viewport_width: 1.0,
            gesture: GestureState::default(),
            pending: None,
            generation: 0,
            inert: true,
            disposed: false,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The active card, always the front of the stack
    pub fn front(&self) -> Option<&Card> {
        self.cards.first()
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn pending(&self) -> Option<&PendingSwipe> {
        self.pending.as_ref()
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn is_animating(&self) -> bool {
        self.gesture.animating
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.dragging
    }

    pub fn status(&self) -> DeckStatus {
        if self.disposed {
            DeckStatus::Disposed
        } else if self.inert {
            DeckStatus::Inert
        } else if self.cards.is_empty() {
            DeckStatus::Exhausted
        } else if self.gesture.animating {
            DeckStatus::Animating
        } else if self.gesture.dragging {
            DeckStatus::Dragging
        } else {
            DeckStatus::Ready
        }
    }

    fn accepts_input(&self) -> bool {
        !self.disposed && !self.inert && !self.cards.is_empty()
    }

    /// Follow a window resize.
    pub fn set_viewport_width(&mut self, width: f64) -> Result<(), DeckError> {
        validate_viewport(width)?;
        self.viewport_width = width;
        Ok(())
    }

    /// Start a drag by `pointer` if `key` is the active card.
    ///
    /// Returns whether the drag started. A second pointer landing while one
    /// is already dragging is ignored.
    pub fn pointer_down(&mut self, key: CardKey, pointer: PointerId, point: Point) -> bool {
        if !self.accepts_input() || self.gesture.animating || self.gesture.dragging {
            return false;
        }
        let Some(front) = self.cards.first_mut() else {
            return false;
        };
        if front.key != key || !front.visual.active {
            return false;
        }

        self.gesture.begin(pointer, point);
        front.visual.transition = Transition::None;
        front.visual.grabbing = true;
        true
    }

    /// Update the dragged card from a pointer position.
    ///
    /// Positions anywhere in the viewport count, including outside the
    /// widget; only moves from the dragging pointer reach the card.
    pub fn pointer_move(&mut self, pointer: PointerId, point: Point) -> MoveOutcome {
        if !self.accepts_input() || !self.gesture.is_driven_by(pointer) || self.gesture.animating {
            return MoveOutcome::Ignored;
        }

        let dx = point.x - self.gesture.start.x;
        let dy = point.y - self.gesture.start.y;
        if !gesture::is_horizontal(dx, dy) {
            return MoveOutcome::Scroll;
        }

        self.gesture.current = point;
        let clamped = gesture::clamp_delta(dx, self.viewport_width, &self.config);
        let frame = gesture::drag_frame(clamped, self.viewport_width, &self.config);

        if let Some(front) = self.cards.first_mut() {
            front.visual.translate_x = frame.clamped_dx;
            front.visual.translate_y = 0.0;
            front.visual.rotate_deg = frame.rotate_deg;
            front.visual.opacity = frame.opacity;
            front.visual.cue = frame.cue;
        }
        MoveOutcome::Dragged(frame)
    }

    /// Finish a drag: commit past the threshold, otherwise snap back.
    pub fn pointer_up(&mut self, pointer: PointerId) -> ReleaseOutcome {
        if !self.accepts_input() || !self.gesture.is_driven_by(pointer) || self.gesture.animating {
            return ReleaseOutcome::Ignored;
        }
        self.gesture.end();
        if let Some(front) = self.cards.first_mut() {
            front.visual.grabbing = false;
        }

        let clamped =
            gesture::clamp_delta(self.gesture.delta_x(), self.viewport_width, &self.config);
        match gesture::release(clamped, self.viewport_width, &self.config) {
            Release::Commit(direction) => {
                tracing::debug!(clamped, ?direction, "Drag released past threshold");
                match self.commit(direction) {
                    Some(ticket) => ReleaseOutcome::Committed(ticket),
                    None => ReleaseOutcome::Ignored,
                }
            }
            Release::SnapBack => {
                tracing::debug!(clamped, "Drag released under threshold");
                self.snap_back();
                ReleaseOutcome::SnappedBack
            }
        }
    }

    /// The browser took the pointer away mid-drag; never commits.
    pub fn pointer_cancel(&mut self, pointer: PointerId) -> ReleaseOutcome {
        if !self.accepts_input() || !self.gesture.is_driven_by(pointer) || self.gesture.animating {
            return ReleaseOutcome::Ignored;
        }
        self.gesture.end();
        if let Some(front) = self.cards.first_mut() {
            front.visual.grabbing = false;
        }
        self.snap_back();
        ReleaseOutcome::SnappedBack
    }

    /// Button equivalent of a right swipe
    pub fn accept(&mut self) -> Option<PendingSwipe> {
        self.commit(SwipeDirection::Right)
    }

    /// Button equivalent of a left swipe
    pub fn reject(&mut self) -> Option<PendingSwipe> {
        self.commit(SwipeDirection::Left)
    }

    fn snap_back(&mut self) {
        let ms = self.config.snap_back_ms;
        if let Some(front) = self.cards.first_mut() {
            front.visual.transition = Transition::SnapBack(ms);
            front.visual.reset();
        }
    }

    fn commit(&mut self, direction: SwipeDirection) -> Option<PendingSwipe> {
        if !self.accepts_input() || self.gesture.animating {
            return None;
        }
        let vw = self.viewport_width;
        let config = &self.config;
        let front = self.cards.first_mut()?;

        self.gesture.animating = true;
        self.gesture.end();

        let sign = direction.sign();
        front.visual.transition = Transition::FlyOff(config.fly_off_ms);
        front.visual.translate_x = sign * vw * config.fly_off_ratio;
        front.visual.rotate_deg = sign * config.fly_off_rotate_deg;
        front.visual.translate_y = config.fly_off_drop_px;
        front.visual.opacity = 0.0;
        front.visual.grabbing = false;

        let ticket = PendingSwipe {
            key: front.key,
            item_id: front.item_id(),
            direction,
            generation: self.generation,
        };
        tracing::info!(card = %ticket.key, ?direction, "Swipe committed");
        self.pending = Some(ticket.clone());
        Some(ticket)
    }

    /// Signal that the fly-off animation for `ticket` has finished.
    ///
    /// Advances the stack exactly once per ticket; stale or repeated
    /// tickets return `None`.
    pub fn complete_swipe(&mut self, ticket: &PendingSwipe) -> Option<SwipeCompletion> {
        if self.disposed || ticket.generation != self.generation {
            return None;
        }
        if self.pending.as_ref() != Some(ticket) {
            return None;
        }
        self.pending = None;

        let position = self.cards.iter().position(|c| c.key == ticket.key)?;
        let card = self.cards.remove(position);

        self.gesture.animating = false;
        self.mark_front_active();

        let add_to_cart = match ticket.direction {
            SwipeDirection::Right => card.item_id(),
            SwipeDirection::Left => None,
        };

        tracing::info!(
            card = %card.key,
            direction = ?ticket.direction,
            remaining = self.cards.len(),
            "Card left the deck"
        );

        Some(SwipeCompletion {
            card,
            direction: ticket.direction,
            add_to_cart,
            remaining: self.cards.len(),
        })
    }

    /// The card `key` finished its own transition.
    ///
    /// Completes the pending swipe if it belongs to that card. Transitions
    /// that end on other cards, or after the swipe was already completed
    /// by [`complete_swipe`](Self::complete_swipe), do nothing.
    pub fn settle(&mut self, key: CardKey) -> Option<SwipeCompletion> {
        let ticket = self.pending.as_ref().filter(|t| t.key == key)?.clone();
        self.complete_swipe(&ticket)
    }

    /// Tear down: pending tickets go stale and input is ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.generation += 1;
        self.pending = None;
        self.gesture = GestureState::default();
        tracing::debug!("Deck disposed");
    }

    fn mark_front_active(&mut self) {
        for (index, card) in self.cards.iter_mut().enumerate() {
            if index == 0 {
                card.visual = CardVisual {
                    active: true,
                    ..CardVisual::default()
                };
            } else {
                card.visual.active = false;
            }
        }
    }
}

fn validate_viewport(width: f64) -> Result<(), DeckError> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(DeckError::InvalidViewport(width))
    }
}

/// Read a deck file: a JSON array of cards.
pub fn load_deck(path: impl AsRef<Path>) -> Result<Vec<CardData>, DeckError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let cards: Vec<CardData> = serde_json::from_str(&text)?;
    tracing::debug!(path = %path.as_ref().display(), cards = cards.len(), "Loaded deck file");
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOUSE: PointerId = PointerId(1);

    fn deck_of(n: usize) -> SwipeDeck {
        let cards = (0..n)
            .map(|i| CardData::new(format!("Item {}", i)).with_item_id(100 + i as u64))
            .collect();
        SwipeDeck::new(cards, 1000.0, DeckConfig::default()).unwrap()
    }

    #[test]
    fn front_card_is_the_only_active_one() {
        let deck = deck_of(3);
        let active: Vec<_> = deck.cards().iter().filter(|c| c.visual.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].key, CardKey(0));
        assert_eq!(deck.status(), DeckStatus::Ready);
    }

    #[test]
    fn empty_deck_is_inert() {
        let mut deck = SwipeDeck::new(vec![], 1000.0, DeckConfig::default()).unwrap();
        assert_eq!(deck.status(), DeckStatus::Inert);
        assert!(!deck.pointer_down(CardKey(0), MOUSE, Point::new(0.0, 0.0)));
        assert!(deck.accept().is_none());
        assert_eq!(deck.pointer_up(MOUSE), ReleaseOutcome::Ignored);
    }

    #[test]
    fn inert_constructor_ignores_input() {
        let mut deck = SwipeDeck::inert(DeckConfig::default());
        assert_eq!(deck.status(), DeckStatus::Inert);
        assert!(deck.reject().is_none());
    }

    #[test]
    fn invalid_viewport_is_rejected() {
        assert!(matches!(
            SwipeDeck::new(vec![], 0.0, DeckConfig::default()),
            Err(DeckError::InvalidViewport(_))
        ));
        let mut deck = deck_of(1);
        assert!(deck.set_viewport_width(f64::NAN).is_err());
        assert!(deck.set_viewport_width(640.0).is_ok());
        assert_eq!(deck.viewport_width(), 640.0);
    }

    #[test]
    fn pointer_down_only_on_active_card() {
        let mut deck = deck_of(2);
        assert!(!deck.pointer_down(CardKey(1), MOUSE, Point::new(500.0, 300.0)));
        assert!(!deck.is_dragging());

        assert!(deck.pointer_down(CardKey(0), MOUSE, Point::new(500.0, 300.0)));
        let front = deck.front().unwrap();
        assert!(front.visual.grabbing);
        assert_eq!(front.visual.transition, Transition::None);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut deck = deck_of(1);
        assert_eq!(deck.pointer_move(MOUSE, Point::new(10.0, 0.0)), MoveOutcome::Ignored);
    }

    #[test]
    fn vertical_move_keeps_last_horizontal_point() {
        let mut deck = deck_of(1);
        deck.pointer_down(CardKey(0), MOUSE, Point::new(500.0, 300.0));
        assert!(deck.pointer_move(MOUSE, Point::new(600.0, 300.0)).should_prevent_default());

        // Scroll away vertically; the release still sees the last drag point
        let outcome = deck.pointer_move(MOUSE, Point::new(520.0, 500.0));
        assert_eq!(outcome, MoveOutcome::Scroll);
        assert!(!outcome.should_prevent_default());
        assert_eq!(deck.gesture().current, Point::new(600.0, 300.0));

        assert!(matches!(deck.pointer_up(MOUSE), ReleaseOutcome::Committed(_)));
    }

    #[test]
    fn drag_sets_cue_past_fifty_pixels() {
        let mut deck = deck_of(1);
        deck.pointer_down(CardKey(0), MOUSE, Point::new(500.0, 300.0));
        deck.pointer_move(MOUSE, Point::new(430.0, 300.0));
        assert_eq!(deck.front().unwrap().visual.cue, Some(SwipeDirection::Left));

        deck.pointer_move(MOUSE, Point::new(520.0, 300.0));
        assert_eq!(deck.front().unwrap().visual.cue, None);
    }

    #[test]
    fn snap_back_restores_identity() {
        let mut deck = deck_of(2);
        deck.pointer_down(CardKey(0), MOUSE, Point::new(500.0, 300.0));
        deck.pointer_move(MOUSE, Point::new(560.0, 300.0));
        assert_eq!(deck.pointer_up(MOUSE), ReleaseOutcome::SnappedBack);

        let front = deck.front().unwrap();
        assert!(front.visual.is_identity());
        assert_eq!(front.visual.transition, Transition::SnapBack(300));
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.status(), DeckStatus::Ready);
    }

    #[test]
    fn commit_then_complete_advances() {
        let mut deck = deck_of(2);
        deck.pointer_down(CardKey(0), MOUSE, Point::new(500.0, 300.0));
        deck.pointer_move(MOUSE, Point::new(600.0, 300.0));
        let ReleaseOutcome::Committed(ticket) = deck.pointer_up(MOUSE) else {
            panic!("expected commit");
        };
        assert_eq!(ticket.direction, SwipeDirection::Right);
        assert_eq!(deck.status(), DeckStatus::Animating);

        let front = deck.front().unwrap();
        assert_eq!(front.visual.translate_x, 2000.0);
        assert_eq!(front.visual.translate_y, 100.0);
        assert_eq!(front.visual.opacity, 0.0);
        // Card stays until the animation finishes
        assert_eq!(deck.len(), 2);

        let done = deck.complete_swipe(&ticket).unwrap();
        assert_eq!(done.add_to_cart, Some(ItemId(100)));
        assert_eq!(done.remaining, 1);
        assert_eq!(deck.front().unwrap().key, CardKey(1));
        assert!(deck.front().unwrap().visual.active);
        assert!(!deck.is_animating());
    }

    #[test]
    fn completion_is_idempotent() {
        let mut deck = deck_of(3);
        let ticket = deck.reject().unwrap();
        assert!(deck.complete_swipe(&ticket).is_some());
        assert!(deck.complete_swipe(&ticket).is_none());
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn buttons_are_dropped_while_animating() {
        let mut deck = deck_of(3);
        let first = deck.accept().unwrap();
        assert!(deck.reject().is_none());
        assert!(deck.accept().is_none());
        assert!(!deck.pointer_down(CardKey(0), MOUSE, Point::new(1.0, 1.0)));
        deck.complete_swipe(&first).unwrap();
        assert!(deck.reject().is_some());
    }

    #[test]
    fn left_swipe_never_adds_to_cart() {
        let mut deck = deck_of(1);
        let ticket = deck.reject().unwrap();
        let done = deck.complete_swipe(&ticket).unwrap();
        assert_eq!(done.add_to_cart, None);
        assert!(done.exhausted());
        assert_eq!(deck.status(), DeckStatus::Exhausted);
    }

    #[test]
    fn right_swipe_without_item_id_skips_cart() {
        let mut deck =
            SwipeDeck::new(vec![CardData::new("Mystery box")], 1000.0, DeckConfig::default())
                .unwrap();
        let ticket = deck.accept().unwrap();
        assert_eq!(deck.complete_swipe(&ticket).unwrap().add_to_cart, None);
    }

    #[test]
    fn pointer_cancel_snaps_back() {
        let mut deck = deck_of(1);
        deck.pointer_down(CardKey(0), MOUSE, Point::new(500.0, 300.0));
        deck.pointer_move(MOUSE, Point::new(700.0, 300.0));
        assert_eq!(deck.pointer_cancel(MOUSE), ReleaseOutcome::SnappedBack);
        assert_eq!(deck.len(), 1);
        assert!(deck.front().unwrap().visual.is_identity());
    }

    #[test]
    fn second_pointer_cannot_steer_or_release() {
        let mut deck = deck_of(2);
        let finger = PointerId(7);
        assert!(deck.pointer_down(CardKey(0), MOUSE, Point::new(500.0, 300.0)));
        assert!(!deck.pointer_down(CardKey(0), finger, Point::new(100.0, 300.0)));

        assert_eq!(
            deck.pointer_move(finger, Point::new(900.0, 300.0)),
            MoveOutcome::Ignored
        );
        assert_eq!(deck.front().unwrap().visual.translate_x, 0.0);
        assert_eq!(deck.pointer_up(finger), ReleaseOutcome::Ignored);
        assert_eq!(deck.pointer_cancel(finger), ReleaseOutcome::Ignored);
        assert!(deck.is_dragging());

        deck.pointer_move(MOUSE, Point::new(530.0, 300.0));
        assert_eq!(deck.pointer_up(MOUSE), ReleaseOutcome::SnappedBack);
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn transition_end_completes_before_timer() {
        let mut deck = deck_of(2);
        let ticket = deck.accept().unwrap();

        let done = deck.settle(CardKey(0)).unwrap();
        assert_eq!(done.add_to_cart, Some(ItemId(100)));
        // Fallback timer arrives later and finds nothing to do
        assert!(deck.complete_swipe(&ticket).is_none());
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn timer_completes_before_transition_end() {
        let mut deck = deck_of(2);
        let ticket = deck.reject().unwrap();

        assert!(deck.complete_swipe(&ticket).is_some());
        assert!(deck.settle(CardKey(0)).is_none());
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn settle_ignores_other_cards_and_snap_backs() {
        let mut deck = deck_of(2);
        deck.pointer_down(CardKey(0), MOUSE, Point::new(500.0, 300.0));
        deck.pointer_move(MOUSE, Point::new(530.0, 300.0));
        deck.pointer_up(MOUSE);
        // The snap-back transition ending is not a swipe
        assert!(deck.settle(CardKey(0)).is_none());

        deck.accept().unwrap();
        assert!(deck.settle(CardKey(1)).is_none());
        assert_eq!(deck.len(), 2);
        assert!(deck.settle(CardKey(0)).is_some());
    }

    #[test]
    fn settle_after_dispose_does_nothing() {
        let mut deck = deck_of(1);
        deck.accept().unwrap();
        deck.dispose();
        assert!(deck.settle(CardKey(0)).is_none());
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn dispose_makes_tickets_stale() {
        let mut deck = deck_of(2);
        let ticket = deck.accept().unwrap();
        deck.dispose();
        assert!(deck.complete_swipe(&ticket).is_none());
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.status(), DeckStatus::Disposed);
        assert!(deck.accept().is_none());
    }

    #[test]
    fn load_deck_reads_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        std::fs::write(
            &path,
            r#"[{"item_id": 7, "title": "Lamp", "price": "12.50"}, {"title": "Poster"}]"#,
        )
        .unwrap();

        let cards = load_deck(&path).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].item_id, Some(ItemId(7)));
        assert_eq!(cards[1].item_id, None);
    }
}
