//! Terminal state once every card has been swiped.

use dioxus::prelude::*;

use super::button::ButtonVariant;

/// Replaces the card stack when the deck is exhausted.
///
/// The link is plain navigation; nothing here follows it programmatically.
#[component]
pub fn EndOfDeck(browse_url: String) -> Element {
    let link_class = ButtonVariant::Primary.class();

    rsx! {
        div { class: "end-of-deck",
            div { class: "end-of-deck__icon", "\u{1F389}" }
            h2 { class: "end-of-deck__title", "All Done!" }
            p { class: "end-of-deck__text", "You've explored all available items" }
            a { class: "{link_class}", href: "{browse_url}", "Browse More Items" }
        }
    }
}
