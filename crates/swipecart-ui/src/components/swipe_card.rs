//! Swipe Card
//!
//! One item in the deck. The card paints whatever [`CardVisual`] the deck
//! gives it and reports two things back: a press on it, and the end of a
//! CSS transition (which is how the fly-off animation signals completion).

use dioxus::prelude::*;
use swipecart_core::{Card, CardKey, Point, PointerId, PointerInput};

/// z-index for the card at `depth` in the stack, front highest
pub fn stack_z_index(depth: usize) -> usize {
    100usize.saturating_sub(depth)
}

/// A draggable item card
///
/// # Props
///
/// * `card` - The card and its current visual state
/// * `depth` - Position in the stack, 0 for the front card
/// * `on_grab` - Pointer pressed on the card, as a [`PointerInput::Down`]
/// * `on_settled` - The card's transform transition finished
#[component]
pub fn SwipeCard(
    card: Card,
    depth: usize,
    on_grab: EventHandler<PointerInput>,
    on_settled: EventHandler<CardKey>,
) -> Element {
    let key = card.key;
    let dom_id = key.dom_id();
    let class = card.visual.class_list();
    let style = format!("{} z-index: {};", card.visual.style(), stack_z_index(depth));
    let item_id = card
        .data
        .item_id
        .map(|id| id.to_string())
        .unwrap_or_default();
    let data = card.data.clone();

    rsx! {
        div {
            id: "{dom_id}",
            class: "{class}",
            style: "{style}",
            "data-item-id": "{item_id}",
            onpointerdown: move |evt: PointerEvent| {
                let p = evt.client_coordinates();
                on_grab.call(PointerInput::Down {
                    key,
                    pointer: PointerId(evt.pointer_id()),
                    point: Point::new(p.x, p.y),
                });
            },
            // Stamps fade on their own; only the card's transform ends a swipe
            ontransitionend: move |evt: TransitionEvent| {
                if evt.property_name() == "transform" {
                    on_settled.call(key);
                }
            },

            if let Some(url) = data.image_url.as_ref() {
                img {
                    class: "swipe-card__image",
                    src: "{url}",
                    alt: "{data.title}",
                    draggable: "false",
                }
            } else {
                div { class: "swipe-card__image swipe-card__image--empty", "\u{1F6CD}" }
            }

            div { class: "swipe-card__body",
                h3 { class: "swipe-card__title", "{data.title}" }
                div { class: "swipe-card__meta",
                    if let Some(price) = data.price.as_ref() {
                        span { class: "swipe-card__price", "${price}" }
                    }
                    if let Some(condition) = data.condition.as_ref() {
                        span { class: "swipe-card__condition", "{condition}" }
                    }
                }
                if let Some(description) = data.description.as_ref() {
                    p { class: "swipe-card__description", "{description}" }
                }
            }

            div { class: "swipe-card__stamp swipe-card__stamp--nope", "NOPE" }
            div { class: "swipe-card__stamp swipe-card__stamp--add", "ADD" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_element_ids_follow_keys() {
        assert_eq!(CardKey(3).dom_id(), "swipe-card_3");
    }

    #[test]
    fn front_card_sits_on_top() {
        assert!(stack_z_index(0) > stack_z_index(1));
        assert_eq!(stack_z_index(500), 0);
    }
}
