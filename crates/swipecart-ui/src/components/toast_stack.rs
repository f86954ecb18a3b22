//! Toast overlay.
//!
//! Renders every toast on the board; each one is its own box, newest
//! lowest, and fades on its own schedule.

use dioxus::prelude::*;
use swipecart_core::{Toast, ToastPhase};

/// Vertical offset of the toast at `index`, in pixels from the top
pub fn toast_offset(index: usize) -> usize {
    20 + index * 64
}

fn toast_class(toast: &Toast) -> String {
    let phase = match toast.phase {
        ToastPhase::Visible => "toast--in",
        ToastPhase::FadingOut => "toast--out",
    };
    format!("toast {} {}", toast.kind.class(), phase)
}

#[component]
pub fn ToastStack(toasts: Vec<Toast>) -> Element {
    rsx! {
        div { class: "toast-stack", role: "status", "aria-live": "polite",
            for (index, toast) in toasts.into_iter().enumerate() {
                {
                    let class = toast_class(&toast);
                    let top = toast_offset(index);
                    rsx! {
                        div {
                            key: "{toast.id.0}",
                            class: "{class}",
                            style: "top: {top}px;",
                            "{toast.message}"
                        }
                    }
                }
            }
        }
    }
}
