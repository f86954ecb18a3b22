//! Reject / add controls under the deck.

use dioxus::prelude::*;

use super::button::{Button, ButtonVariant};

/// The two button equivalents of a swipe.
///
/// Presses while a card is still flying off are dropped by the deck, so
/// `disabled` is only a visual hint.
#[component]
pub fn DeckControls(
    on_reject: EventHandler<()>,
    on_accept: EventHandler<()>,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        div { class: "swipe-controls",
            Button {
                variant: ButtonVariant::Reject,
                id: "nope-btn".to_string(),
                aria_label: "Pass on this item".to_string(),
                disabled: disabled,
                onclick: move |_| {
                    tracing::debug!("Reject pressed");
                    on_reject.call(());
                },
                "\u{2715}"
            }
            Button {
                variant: ButtonVariant::Accept,
                id: "add-btn".to_string(),
                aria_label: "Add this item to cart".to_string(),
                disabled: disabled,
                onclick: move |_| {
                    tracing::debug!("Add pressed");
                    on_accept.call(());
                },
                "\u{2665}"
            }
        }
    }
}
