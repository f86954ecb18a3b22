//! Core types for SwipeCart

use serde::{Deserialize, Serialize};

/// Store-side identifier of a browsable item.
///
/// This is the id the cart endpoint expects in `/cart/add/{id}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable per-deck key of a card.
///
/// Assigned in presentation order when the deck is built, so it stays
/// valid while cards in front of it are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardKey(pub usize);

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "card_{}", self.0)
    }
}

/// DOM `pointerId` of the mouse, pen or finger driving a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

impl CardKey {
    /// Element id of the card, used to capture the pointer on it
    pub fn dom_id(&self) -> String {
        format!("swipe-{}", self)
    }
}

/// Which way a card leaves the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Reject
    Left,
    /// Add to cart
    Right,
}

impl SwipeDirection {
    /// Direction of a signed horizontal delta; zero has no direction.
    pub fn from_delta(dx: f64) -> Option<Self> {
        if dx > 0.0 {
            Some(SwipeDirection::Right)
        } else if dx < 0.0 {
            Some(SwipeDirection::Left)
        } else {
            None
        }
    }

    /// `1.0` for right, `-1.0` for left
    pub fn sign(&self) -> f64 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }

    /// CSS class used as the directional cue
    pub fn class(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "swiped-left",
            SwipeDirection::Right => "swiped-right",
        }
    }
}

/// A pointer position in client (viewport) pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Display data of one item, as listed in a deck file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardData {
    /// Cards without an id can still be swiped but never reach the cart
    #[serde(default)]
    pub item_id: Option<ItemId>,
    pub title: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CardData {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            item_id: None,
            title: title.into(),
            price: None,
            condition: None,
            image_url: None,
            description: None,
        }
    }

    pub fn with_item_id(mut self, id: u64) -> Self {
        self.item_id = Some(ItemId(id));
        self
    }
}

/// How the card eases into its current transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// Stylesheet default
    #[default]
    Inherit,
    /// Follows the pointer with no easing
    None,
    /// Springy return to the centre, over the given milliseconds
    SnapBack(u64),
    /// Falling off the edge of the screen, over the given milliseconds
    FlyOff(u64),
}

/// Everything that decides how one card is painted.
#[derive(Debug, Clone, PartialEq)]
pub struct CardVisual {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate_deg: f64,
    pub opacity: f64,
    pub transition: Transition,
    pub active: bool,
    pub grabbing: bool,
    pub cue: Option<SwipeDirection>,
}

impl Default for CardVisual {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            rotate_deg: 0.0,
            opacity: 1.0,
            transition: Transition::Inherit,
            active: false,
            grabbing: false,
            cue: None,
        }
    }
}

impl CardVisual {
    /// True when the card sits untransformed at full opacity
    pub fn is_identity(&self) -> bool {
        self.translate_x == 0.0
            && self.translate_y == 0.0
            && self.rotate_deg == 0.0
            && self.opacity == 1.0
            && self.cue.is_none()
    }

    /// Reset transform, opacity and cue, keeping flags
    pub fn reset(&mut self) {
        self.translate_x = 0.0;
        self.translate_y = 0.0;
        self.rotate_deg = 0.0;
        self.opacity = 1.0;
        self.cue = None;
    }

    /// CSS `transform` value
    pub fn transform_css(&self) -> String {
        if self.translate_y != 0.0 {
            format!(
                "translateX({}px) rotate({}deg) translateY({}px)",
                self.translate_x, self.rotate_deg, self.translate_y
            )
        } else {
            format!(
                "translateX({}px) rotate({}deg)",
                self.translate_x, self.rotate_deg
            )
        }
    }

    /// CSS `transition` value, `None` to leave the stylesheet in charge
    pub fn transition_css(&self) -> Option<String> {
        match self.transition {
            Transition::Inherit => None,
            Transition::None => Some("none".to_string()),
            Transition::SnapBack(ms) => Some(format!(
                "all {}ms cubic-bezier(0.34, 1.56, 0.64, 1)",
                ms
            )),
            Transition::FlyOff(ms) => Some(format!(
                "all {}ms cubic-bezier(0.25, 0.46, 0.45, 0.94)",
                ms
            )),
        }
    }

    /// Inline style string for the card element
    pub fn style(&self) -> String {
        let cursor = if self.grabbing { "grabbing" } else { "grab" };
        let mut style = format!(
            "transform: {}; opacity: {}; cursor: {};",
            self.transform_css(),
            self.opacity,
            cursor
        );
        if let Some(transition) = self.transition_css() {
            style.push_str(&format!(" transition: {};", transition));
        }
        style
    }

    /// Class list for the card element
    pub fn class_list(&self) -> String {
        let mut classes = vec!["swipe-card"];
        if self.active {
            classes.push("active");
        }
        if let Some(cue) = self.cue {
            classes.push(cue.class());
        }
        classes.join(" ")
    }
}

/// A card tracked by the deck
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub key: CardKey,
    pub data: CardData,
    pub visual: CardVisual,
}

impl Card {
    pub fn item_id(&self) -> Option<ItemId> {
        self.data.item_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_delta() {
        assert_eq!(SwipeDirection::from_delta(12.0), Some(SwipeDirection::Right));
        assert_eq!(SwipeDirection::from_delta(-0.5), Some(SwipeDirection::Left));
        assert_eq!(SwipeDirection::from_delta(0.0), None);
    }

    #[test]
    fn visual_class_list() {
        let mut visual = CardVisual::default();
        assert_eq!(visual.class_list(), "swipe-card");
        visual.active = true;
        visual.cue = Some(SwipeDirection::Left);
        assert_eq!(visual.class_list(), "swipe-card active swiped-left");
    }

    #[test]
    fn fly_off_transform_includes_fall() {
        let visual = CardVisual {
            translate_x: 2000.0,
            translate_y: 100.0,
            rotate_deg: 30.0,
            opacity: 0.0,
            transition: Transition::FlyOff(600),
            ..Default::default()
        };
        assert_eq!(
            visual.transform_css(),
            "translateX(2000px) rotate(30deg) translateY(100px)"
        );
        assert!(visual.style().contains("transition: all 600ms"));
    }

    #[test]
    fn card_data_parses_sparse_json() {
        let json = r#"{"item_id": 42, "title": "Denim jacket"}"#;
        let data: CardData = serde_json::from_str(json).unwrap();
        assert_eq!(data.item_id, Some(ItemId(42)));
        assert_eq!(data.title, "Denim jacket");
        assert!(data.price.is_none());
    }
}
