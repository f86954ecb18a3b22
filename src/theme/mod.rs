//! Visual theme for the swipe page.

mod styles;

pub use styles::GLOBAL_STYLES;
