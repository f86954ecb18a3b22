//! Drag gesture math.
//!
//! Pure functions from pointer deltas to what the card should look like
//! and what a release should do. [`crate::deck::SwipeDeck`] owns the state
//! and applies these.

use crate::config::DeckConfig;
use crate::types::{Point, PointerId, SwipeDirection};

/// Transient pointer tracking, one per deck.
///
/// `dragging` and `animating` are never both set. Only the pointer that
/// started a drag may move or release it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    pub dragging: bool,
    pub animating: bool,
    pub pointer: Option<PointerId>,
    pub start: Point,
    pub current: Point,
}

impl GestureState {
    /// Begin a drag by `pointer` at `point`
    pub fn begin(&mut self, pointer: PointerId, point: Point) {
        self.dragging = true;
        self.pointer = Some(pointer);
        self.start = point;
        self.current = point;
    }

    /// End the drag, keeping the positions for the release decision
    pub fn end(&mut self) {
        self.dragging = false;
        self.pointer = None;
    }

    /// Whether `pointer` is the one driving the current drag
    pub fn is_driven_by(&self, pointer: PointerId) -> bool {
        self.dragging && self.pointer == Some(pointer)
    }

    /// Raw horizontal distance travelled so far
    pub fn delta_x(&self) -> f64 {
        self.current.x - self.start.x
    }
}

/// Card appearance for one drag position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    pub clamped_dx: f64,
    pub rotate_deg: f64,
    pub opacity: f64,
    pub cue: Option<SwipeDirection>,
}

/// What a pointer release resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    SnapBack,
    Commit(SwipeDirection),
}

/// A move counts as a drag only when it is strictly more horizontal
/// than vertical. Ties belong to scrolling.
pub fn is_horizontal(dx: f64, dy: f64) -> bool {
    dx.abs() > dy.abs()
}

/// Largest horizontal travel a card follows, in pixels
pub fn max_drag(viewport_width: f64, config: &DeckConfig) -> f64 {
    viewport_width * config.clamp_ratio
}

/// Release distance that commits a swipe, in pixels
pub fn threshold(viewport_width: f64, config: &DeckConfig) -> f64 {
    viewport_width * config.threshold_ratio
}

pub fn clamp_delta(dx: f64, viewport_width: f64, config: &DeckConfig) -> f64 {
    let limit = max_drag(viewport_width, config);
    dx.clamp(-limit, limit)
}

pub fn drag_frame(clamped_dx: f64, viewport_width: f64, config: &DeckConfig) -> DragFrame {
    let percent = clamped_dx / viewport_width;
    let rotate_deg = percent * config.rotation_factor_deg;
    let opacity = (1.0 - percent.abs() * config.opacity_falloff).max(config.min_opacity);

    let cue = if clamped_dx.abs() > config.cue_distance_px {
        SwipeDirection::from_delta(clamped_dx)
    } else {
        None
    };

    DragFrame {
        clamped_dx,
        rotate_deg,
        opacity,
        cue,
    }
}

pub fn release(clamped_dx: f64, viewport_width: f64, config: &DeckConfig) -> Release {
    if clamped_dx.abs() > threshold(viewport_width, config) {
        match SwipeDirection::from_delta(clamped_dx) {
            Some(direction) => Release::Commit(direction),
            None => Release::SnapBack,
        }
    } else {
        Release::SnapBack
    }
}
