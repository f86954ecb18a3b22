//! Shared state for SwipeCart components.
//!
//! Provides the configuration, the cart dispatcher and the toast board to
//! all components via use_context.
//!
//! ## Usage
//!
//! ```ignore
//! // In App component
//! use_context_provider(|| SwipeContext::new(settings));
//!
//! // In child components
//! let ctx = use_swipe_context();
//! ctx.notify(ToastKind::Success, "Added");
//! ```

use std::sync::Arc;

use dioxus::prelude::*;
use swipecart_core::cart::GENERIC_CART_ERROR;
use swipecart_core::{
    cart_notice, AppConfig, CartClient, CartDispatcher, CartError, CartOutcome, ItemId,
    ToastBoard, ToastKind,
};

use crate::LaunchSettings;

/// Get the launch settings chosen on the command line.
pub fn launch_settings() -> LaunchSettings {
    crate::launch_settings()
}

/// State shared by every component on the swipe page.
#[derive(Clone)]
pub struct SwipeContext {
    pub config: Arc<AppConfig>,
    /// `None` when no usable cart client could be built
    pub cart: Option<Arc<CartDispatcher>>,
    pub toasts: Signal<ToastBoard>,
    /// Last cart size the store reported
    pub cart_count: Signal<Option<u32>>,
}

impl SwipeContext {
    /// Build the context from launch settings. Must run inside a component.
    pub fn new(settings: &LaunchSettings) -> Self {
        let cart = match CartClient::new(&settings.config, settings.session_id.as_deref()) {
            Ok(client) => {
                if let Some(token) = &settings.csrf_token {
                    client.set_csrf_token(token.clone());
                }
                Some(Arc::new(CartDispatcher::new(Arc::new(client))))
            }
            Err(e) => {
                tracing::error!("Failed to build cart client: {}", e);
                None
            }
        };

        Self {
            config: Arc::new(settings.config.clone()),
            cart,
            toasts: Signal::new(ToastBoard::new()),
            cart_count: Signal::new(None),
        }
    }

    /// Show a toast and schedule its fade-out and removal.
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let mut toasts = self.toasts;
        let timing = self.config.toast.clone();
        let id = toasts.write().push(kind, message);
        tracing::debug!(toast = id.0, on_screen = toasts.peek().len(), "Toast shown");

        spawn(async move {
            tokio::time::sleep(timing.visible()).await;
            toasts.write().begin_fade(id);
            tokio::time::sleep(timing.fade()).await;
            toasts.write().remove(id);
        });
    }

    /// Fire the add-to-cart call for a right swipe and toast the result.
    ///
    /// Returns immediately; the deck never waits on the store.
    pub fn add_to_cart(&self, item_id: ItemId) {
        let Some(dispatcher) = self.cart.as_ref() else {
            self.notify(ToastKind::Error, GENERIC_CART_ERROR);
            return;
        };

        let request = dispatcher.dispatch(item_id);
        tracing::debug!(%item_id, in_flight = dispatcher.in_flight(), "Cart request sent");
        let ctx = self.clone();
        spawn(async move {
            let result = request.outcome().await;
            if matches!(result, Err(CartError::Cancelled)) {
                return;
            }
            if let Ok(CartOutcome::Added {
                cart_count: Some(count),
                ..
            }) = &result
            {
                let mut cart_count = ctx.cart_count;
                cart_count.set(Some(*count));
            }
            let (kind, message) = cart_notice(&result);
            ctx.notify(kind, message);
        });
    }

    /// Abort cart calls still in flight.
    pub fn cancel_pending(&self) {
        if let Some(dispatcher) = &self.cart {
            let cancelled = dispatcher.cancel_all();
            tracing::debug!(cancelled, "Widget torn down");
        }
    }
}

/// Hook to access the swipe page context.
pub fn use_swipe_context() -> SwipeContext {
    use_context::<SwipeContext>()
}
