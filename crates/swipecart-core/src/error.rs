//! Error types for SwipeCart

use thiserror::Error;

/// Failures of the add-to-cart round trip.
///
/// None of these reverse a committed swipe; they only decide which toast
/// the user sees.
#[derive(Error, Debug)]
pub enum CartError {
    /// The configured base URL cannot be joined with a cart path
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Connection, TLS or timeout failure
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP error! status: {0}")]
    Http(u16),

    /// Response body was not the expected JSON shape
    #[error("Malformed cart response: {0}")]
    Decode(String),

    /// Request was cancelled because the widget was torn down
    #[error("Request cancelled")]
    Cancelled,
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for the expected schema
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its allowed range
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Deck file loading errors
#[derive(Error, Debug)]
pub enum DeckError {
    /// Deck file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Deck file is not a JSON array of cards
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Viewport width must be a positive, finite number of pixels
    #[error("Invalid viewport width: {0}")]
    InvalidViewport(f64),
}

/// Result type alias for cart operations
pub type CartResult<T> = Result<T, CartError>;
