//! Button Components
//!
//! - Reject: round red control that sends the card left
//! - Accept: round green control that sends the card right
//! - Primary: ordinary call to action, e.g. "Browse More Items"

use dioxus::prelude::*;

/// Button style variants
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ButtonVariant {
    /// Ordinary action button
    #[default]
    Primary,
    /// Round "nope" control
    Reject,
    /// Round "add to cart" control
    Accept,
}

impl ButtonVariant {
    /// Returns the CSS class for this variant
    pub fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Reject => "swipe-btn swipe-btn--reject",
            ButtonVariant::Accept => "swipe-btn swipe-btn--accept",
        }
    }
}

/// Properties for the Button component
#[derive(Clone, PartialEq, Props)]
pub struct ButtonProps {
    /// Visual style variant
    #[props(default)]
    pub variant: ButtonVariant,
    /// Button content (text, icons, etc.)
    pub children: Element,
    /// Click handler
    #[props(default)]
    pub onclick: Option<EventHandler<()>>,
    /// Whether the button is disabled
    #[props(default = false)]
    pub disabled: bool,
    /// Element id, so pages can find the controls
    #[props(default)]
    pub id: Option<String>,
    /// Accessible label for icon-only buttons
    #[props(default)]
    pub aria_label: Option<String>,
}

/// Styled button
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     Button {
///         variant: ButtonVariant::Accept,
///         aria_label: "Add to cart".to_string(),
///         onclick: move |_| accept(),
///         "\u{2665}"
///     }
/// }
/// ```
#[component]
pub fn Button(props: ButtonProps) -> Element {
    let class = props.variant.class();
    let id = props.id.clone().unwrap_or_default();
    let label = props.aria_label.clone().unwrap_or_default();

    rsx! {
        button {
            class: "{class}",
            id: "{id}",
            r#type: "button",
            "aria-label": "{label}",
            disabled: props.disabled,
            onclick: move |_| {
                if let Some(handler) = &props.onclick {
                    handler.call(());
                }
            },
            {props.children}
        }
    }
}
