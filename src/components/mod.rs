//! Page-level components for SwipeCart.
//!
//! Stateless pieces live in `swipecart-ui`; this module wires them to the
//! deck state and the cart.

mod swipe_deck;

pub use swipe_deck::SwipeDeckView;
