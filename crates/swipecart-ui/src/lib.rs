//! SwipeCart UI Components
//!
//! Dioxus components for the swipe deck: the card itself, the
//! reject/add controls, toasts, the cart badge and the end-of-deck
//! message. They only render and forward input; the deck state and the
//! cart calls live in the application.

pub mod components;

pub use components::*;
