//! CSRF token discovery.
//!
//! The store renders its token into every form as a hidden
//! `csrfmiddlewaretoken` input. We read it from there rather than from the
//! cookie so the value matches what the page itself would submit.

use scraper::{Html, Selector};

/// Name of the hidden form field, also the form body key on submit
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Header the store checks on AJAX posts
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Find the `value` of the first `<input name="csrfmiddlewaretoken">`.
///
/// Empty values count as missing.
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!(r#"input[name="{}"]"#, CSRF_FIELD)).ok()?;

    document
        .select(&selector)
        .find_map(|input| input.value().attr("value"))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
