//! Cart item count as last reported by the store.

use dioxus::prelude::*;

/// Text for the badge; nothing until the store has reported a count
pub fn badge_label(count: Option<u32>) -> Option<String> {
    match count {
        None => None,
        Some(1) => Some("1 item in cart".to_string()),
        Some(n) => Some(format!("{} items in cart", n)),
    }
}

#[component]
pub fn CartBadge(count: Option<u32>) -> Element {
    let Some(label) = badge_label(count) else {
        return rsx! {};
    };

    rsx! {
        div { class: "cart-badge", "\u{1F6D2} {label}" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_labels() {
        assert_eq!(badge_label(None), None);
        assert_eq!(badge_label(Some(1)).as_deref(), Some("1 item in cart"));
        assert_eq!(badge_label(Some(4)).as_deref(), Some("4 items in cart"));
    }
}
