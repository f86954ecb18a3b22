//! SwipeCart Core Library
//!
//! Headless model of a swipeable stack of shop items: drag a card right to
//! add it to the cart, left to pass on it.
//!
//! ## Overview
//!
//! - [`deck::SwipeDeck`] turns pointer and button input into card visuals
//!   and swipe tickets. It never sleeps or touches the network.
//! - [`input`] routes raw pointer events to the deck by pointer id.
//! - [`cart::CartClient`] talks to the store's `POST /cart/add/{id}/`.
//! - [`cart::CartDispatcher`] runs those calls in the background with a
//!   result channel and cancels them on teardown.
//! - [`toast::ToastBoard`] tracks the status messages shown afterwards.
//!
//! ## Quick Start
//!
//! ```ignore
//! use swipecart_core::{CardData, DeckConfig, Point, PointerId, ReleaseOutcome, SwipeDeck};
//!
//! let cards = vec![CardData::new("Denim jacket").with_item_id(42)];
//! let mut deck = SwipeDeck::new(cards, 1000.0, DeckConfig::default())?;
//!
//! let key = deck.front().unwrap().key;
//! let mouse = PointerId(1);
//! deck.pointer_down(key, mouse, Point::new(500.0, 300.0));
//! deck.pointer_move(mouse, Point::new(600.0, 300.0));
//! if let ReleaseOutcome::Committed(ticket) = deck.pointer_up(mouse) {
//!     // ...play the fly-off animation, then:
//!     let done = deck.complete_swipe(&ticket).unwrap();
//!     assert_eq!(done.add_to_cart.map(|id| id.0), Some(42));
//! }
//! ```

pub mod cart;
pub mod config;
pub mod csrf;
pub mod deck;
pub mod error;
pub mod gesture;
pub mod input;
pub mod logging;
pub mod toast;
pub mod types;

// Re-exports
pub use cart::{AddToCartResponse, CartClient, CartDispatcher, CartOutcome, CartRequest};
pub use config::{AppConfig, DeckConfig, ToastConfig};
pub use deck::{
    load_deck, DeckStatus, MoveOutcome, PendingSwipe, ReleaseOutcome, SwipeCompletion, SwipeDeck,
};
pub use error::{CartError, CartResult, ConfigError, DeckError};
pub use input::{PointerInput, PointerResponse};
pub use toast::{cart_notice, Toast, ToastBoard, ToastId, ToastKind, ToastPhase};
pub use types::*;
