use dioxus::prelude::*;
use swipecart_ui::{CartBadge, ToastStack};

use crate::components::SwipeDeckView;
use crate::context::{launch_settings, SwipeContext};
use crate::theme::GLOBAL_STYLES;

/// Root application component.
///
/// Provides global styles and the swipe context, fetches a CSRF token if
/// none was given, and lays out the deck with its toasts.
#[component]
pub fn App() -> Element {
    let settings = use_hook(launch_settings);
    let ctx = use_context_provider(|| SwipeContext::new(&settings));

    // The store renders its token into the browse page; pick it up from there
    let bootstrap_ctx = ctx.clone();
    use_future(move || {
        let ctx = bootstrap_ctx.clone();
        async move {
            let Some(dispatcher) = ctx.cart.as_ref() else {
                return;
            };
            let client = dispatcher.client();
            if client.csrf_token().is_some() {
                return;
            }
            match client.fetch_csrf_token().await {
                Ok(Some(_)) => tracing::info!("CSRF token loaded from browse page"),
                Ok(None) => tracing::warn!("Browse page carried no CSRF token"),
                Err(e) => tracing::warn!("Failed to fetch CSRF token: {}", e),
            }
        }
    });

    let (has_toasts, toasts) = {
        let board = ctx.toasts.read();
        (!board.is_empty(), board.iter().cloned().collect::<Vec<_>>())
    };
    let cart_count = (ctx.cart_count)();

    rsx! {
        style { {GLOBAL_STYLES} }
        main { class: "swipe-page",
            header { class: "swipe-header",
                h1 { class: "swipe-header__title", "Discover" }
                CartBadge { count: cart_count }
            }
            SwipeDeckView { cards: settings.cards.clone() }
        }
        if has_toasts {
            ToastStack { toasts }
        }
    }
}
