//! Reusable components for the swipe page

mod button;
mod cart_badge;
mod deck_controls;
mod end_of_deck;
mod swipe_card;
mod toast_stack;

pub use button::*;
pub use cart_badge::*;
pub use deck_controls::*;
pub use end_of_deck::*;
pub use swipe_card::*;
pub use toast_stack::*;
