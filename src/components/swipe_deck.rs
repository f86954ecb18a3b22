//! The swipe deck widget.
//!
//! Owns the [`SwipeDeck`] state for the page. Presses are taken on the
//! front card, which then captures the pointer, so moves and the release
//! keep arriving wherever the pointer goes. They bubble up to the widget
//! root, where they are routed to the deck by pointer id. The drop hook
//! disposes the deck and aborts cart calls still in flight.

use dioxus::prelude::*;
use swipecart_core::{
    CardData, CardKey, DeckStatus, PendingSwipe, Point, PointerId, PointerInput, PointerResponse,
    SwipeCompletion, SwipeDeck,
};
use swipecart_ui::{DeckControls, EndOfDeck, SwipeCard};

use crate::context::{use_swipe_context, SwipeContext};

/// Width assumed until the window reports its own
const INITIAL_VIEWPORT_WIDTH: f64 = 480.0;

/// Reports `window.innerWidth` now and on every resize
const VIEWPORT_WATCHER: &str = r#"
    const report = () => dioxus.send(window.innerWidth);
    window.addEventListener('resize', report);
    report();
    await new Promise(() => {});
"#;

/// Capture `pointer` on the card element so the drag follows it off the
/// widget. Releasing happens on its own at `pointerup`.
fn capture_pointer(key: CardKey, pointer: PointerId) {
    let script = format!(
        "try {{ document.getElementById('{}')?.setPointerCapture({}); }} catch (_) {{}}",
        key.dom_id(),
        pointer.0
    );
    let _ = document::eval(&script);
}

/// Hit the cart for a finished swipe.
fn after_swipe(ctx: &SwipeContext, done: SwipeCompletion) {
    if let Some(item_id) = done.add_to_cart {
        ctx.add_to_cart(item_id);
    }
    if done.exhausted() {
        tracing::info!("Deck exhausted");
    }
}

/// Feed a move, release or cancel to the deck.
///
/// Events from pointers that are not dragging are dropped without
/// touching the signal.
fn route_pointer(
    mut deck: Signal<SwipeDeck>,
    ctx: &SwipeContext,
    input: PointerInput,
    evt: &PointerEvent,
) {
    if !deck.peek().routes(&input) {
        return;
    }
    let response = deck.write().handle_pointer(input);
    if response.should_prevent_default() {
        evt.prevent_default();
    }
    if let PointerResponse::Committed(ticket) = response {
        start_fly_off(deck, ctx.clone(), ticket);
    }
}

/// Arm the fallback completion for a committed swipe.
///
/// The card's `transitionend` usually gets there first; whichever is
/// second finds the ticket already used.
fn start_fly_off(mut deck: Signal<SwipeDeck>, ctx: SwipeContext, ticket: PendingSwipe) {
    let fallback = deck.peek().config().fly_off_duration();
    spawn(async move {
        tokio::time::sleep(fallback).await;
        let done = deck.write().complete_swipe(&ticket);
        if let Some(done) = done {
            after_swipe(&ctx, done);
        }
    });
}

/// Swipeable stack of item cards with reject/add controls.
///
/// # Props
///
/// * `cards` - Items in presentation order; empty leaves the widget inert
#[component]
pub fn SwipeDeckView(cards: Vec<CardData>) -> Element {
    let ctx = use_swipe_context();

    let mut deck = use_signal(|| {
        let config = ctx.config.deck.clone();
        SwipeDeck::new(cards.clone(), INITIAL_VIEWPORT_WIDTH, config.clone()).unwrap_or_else(
            |e| {
                tracing::error!("Failed to build deck: {}", e);
                SwipeDeck::inert(config)
            },
        )
    });

    // Track the viewport so thresholds follow the window size
    use_future(move || async move {
        let mut watcher = document::eval(VIEWPORT_WATCHER);
        while let Ok(width) = watcher.recv::<f64>().await {
            if let Err(e) = deck.write().set_viewport_width(width) {
                tracing::warn!("Ignoring viewport width: {}", e);
            }
        }
    });

    let drop_ctx = ctx.clone();
    use_drop(move || {
        if let Ok(mut deck) = deck.try_write() {
            deck.dispose();
        }
        drop_ctx.cancel_pending();
    });

    let on_grab = use_callback(move |input: PointerInput| {
        if !deck.peek().routes(&input) {
            return;
        }
        let response = deck.write().handle_pointer(input);
        if let PointerResponse::Capture { key, pointer } = response {
            tracing::debug!(card = %key, pointer = pointer.0, "Drag started");
            capture_pointer(key, pointer);
        }
    });

    let settle_ctx = ctx.clone();
    let on_settled = use_callback(move |key: CardKey| {
        let done = deck.write().settle(key);
        if let Some(done) = done {
            after_swipe(&settle_ctx, done);
        }
    });

    let reject_ctx = ctx.clone();
    let on_reject = use_callback(move |_: ()| {
        let ticket = deck.write().reject();
        if let Some(ticket) = ticket {
            start_fly_off(deck, reject_ctx.clone(), ticket);
        }
    });

    let accept_ctx = ctx.clone();
    let on_accept = use_callback(move |_: ()| {
        let ticket = deck.write().accept();
        if let Some(ticket) = ticket {
            start_fly_off(deck, accept_ctx.clone(), ticket);
        }
    });

    let move_ctx = ctx.clone();
    let on_move = move |evt: PointerEvent| {
        let p = evt.client_coordinates();
        let input = PointerInput::Move {
            pointer: PointerId(evt.pointer_id()),
            point: Point::new(p.x, p.y),
        };
        route_pointer(deck, &move_ctx, input, &evt);
    };

    let release_ctx = ctx.clone();
    let on_release = move |evt: PointerEvent| {
        let input = PointerInput::Up {
            pointer: PointerId(evt.pointer_id()),
        };
        route_pointer(deck, &release_ctx, input, &evt);
    };

    let cancel_ctx = ctx.clone();
    let on_cancel = move |evt: PointerEvent| {
        let input = PointerInput::Cancel {
            pointer: PointerId(evt.pointer_id()),
        };
        route_pointer(deck, &cancel_ctx, input, &evt);
    };

    let (status, busy, visible) = {
        let snapshot = deck.read();
        let visible: Vec<_> = snapshot.cards().iter().cloned().enumerate().collect();
        (snapshot.status(), snapshot.is_animating(), visible)
    };
    let browse_url = ctx.config.browse_url();
    let show_controls = matches!(
        status,
        DeckStatus::Ready | DeckStatus::Dragging | DeckStatus::Animating
    );

    rsx! {
        div {
            class: "swipe-widget",
            onpointermove: on_move,
            onpointerup: on_release,
            onpointercancel: on_cancel,

            div { id: "swipe-card-stack", class: "swipe-stack",
                {match status {
                    DeckStatus::Exhausted => rsx! {
                        EndOfDeck { browse_url: browse_url }
                    },
                    DeckStatus::Inert | DeckStatus::Disposed => rsx! {},
                    _ => rsx! {
                        for (depth, card) in visible.into_iter().rev() {
                            SwipeCard {
                                key: "{card.key.0}",
                                card: card,
                                depth: depth,
                                on_grab: on_grab,
                                on_settled: on_settled,
                            }
                        }
                    },
                }}
            }

            if show_controls {
                DeckControls {
                    on_reject: on_reject,
                    on_accept: on_accept,
                    disabled: busy,
                }
            }
        }
    }
}
