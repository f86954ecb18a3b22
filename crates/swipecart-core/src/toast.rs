//! Transient status messages.
//!
//! Toasts are independent of each other: no deduplication and no queue.
//! Each one is visible for a while, fades out, then goes away. The timing
//! lives in [`crate::config::ToastConfig`]; the UI drives the phases.

use crate::cart::{CartOutcome, GENERIC_CART_ERROR};
use crate::error::CartResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    FadingOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
    pub phase: ToastPhase,
}

/// All toasts currently on screen, oldest first
#[derive(Debug, Clone, Default)]
pub struct ToastBoard {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
            phase: ToastPhase::Visible,
        });
        id
    }

    /// Move a toast into its fade-out phase
    pub fn begin_fade(&mut self, id: ToastId) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) => {
                toast.phase = ToastPhase::FadingOut;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    #[cfg(test)]
    fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Toast for a finished add-to-cart request.
///
/// Transport and HTTP failures are logged here and shown generically.
pub fn cart_notice(result: &CartResult<CartOutcome>) -> (ToastKind, String) {
    match result {
        Ok(CartOutcome::Added { message, .. }) => (ToastKind::Success, message.clone()),
        Ok(CartOutcome::Rejected { error }) => (ToastKind::Error, error.clone()),
        Err(e) => {
            tracing::warn!(error = %e, "Error adding to cart");
            (ToastKind::Error, GENERIC_CART_ERROR.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CartError;

    #[test]
    fn toasts_are_not_deduplicated() {
        let mut board = ToastBoard::new();
        let a = board.push(ToastKind::Error, "Out of stock");
        let b = board.push(ToastKind::Error, "Out of stock");
        assert_ne!(a, b);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn fade_then_remove() {
        let mut board = ToastBoard::new();
        let id = board.push(ToastKind::Success, "Added");
        assert_eq!(board.get(id).unwrap().phase, ToastPhase::Visible);

        assert!(board.begin_fade(id));
        assert_eq!(board.get(id).unwrap().phase, ToastPhase::FadingOut);

        assert!(board.remove(id));
        assert!(board.is_empty());
        assert!(!board.remove(id));
        assert!(!board.begin_fade(id));
    }

    #[test]
    fn cart_notice_mapping() {
        let added: CartResult<CartOutcome> = Ok(CartOutcome::Added {
            message: "Lamp added to cart".to_string(),
            cart_count: None,
        });
        assert_eq!(
            cart_notice(&added),
            (ToastKind::Success, "Lamp added to cart".to_string())
        );

        let rejected: CartResult<CartOutcome> = Ok(CartOutcome::Rejected {
            error: "Out of stock".to_string(),
        });
        assert_eq!(cart_notice(&rejected), (ToastKind::Error, "Out of stock".to_string()));

        let failed: CartResult<CartOutcome> = Err(CartError::Http(500));
        assert_eq!(
            cart_notice(&failed),
            (ToastKind::Error, GENERIC_CART_ERROR.to_string())
        );
    }
}
