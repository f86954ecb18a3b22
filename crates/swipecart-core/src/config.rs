//! Tunables for the deck and the cart endpoint.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! { "base_url": "https://shop.example", "deck": { "threshold_ratio": 0.1 } }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Gesture and animation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Release distance that commits a swipe, as a fraction of viewport width
    pub threshold_ratio: f64,
    /// Horizontal drag clamp, as a fraction of viewport width
    pub clamp_ratio: f64,
    /// Degrees of rotation for a drag of one full viewport width
    pub rotation_factor_deg: f64,
    /// Lowest opacity a dragged card fades to
    pub min_opacity: f64,
    /// Opacity lost per viewport width of drag
    pub opacity_falloff: f64,
    /// Drag distance in pixels past which the direction cue shows
    pub cue_distance_px: f64,
    /// Horizontal fly-off distance, as a multiple of viewport width
    pub fly_off_ratio: f64,
    /// Rotation of a flown-off card
    pub fly_off_rotate_deg: f64,
    /// Downward fall of a flown-off card
    pub fly_off_drop_px: f64,
    /// Fly-off animation length
    pub fly_off_ms: u64,
    /// Snap-back animation length
    pub snap_back_ms: u64,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: 0.08,
            clamp_ratio: 0.35,
            rotation_factor_deg: 30.0,
            min_opacity: 0.4,
            opacity_falloff: 0.6,
            cue_distance_px: 50.0,
            fly_off_ratio: 2.0,
            fly_off_rotate_deg: 30.0,
            fly_off_drop_px: 100.0,
            fly_off_ms: 600,
            snap_back_ms: 300,
        }
    }
}

impl DeckConfig {
    pub fn fly_off_duration(&self) -> Duration {
        Duration::from_millis(self.fly_off_ms)
    }

    /// Check ranges that would make the gesture math degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("{} is not within (0, 1]", value),
                })
            }
        }

        unit("threshold_ratio", self.threshold_ratio)?;
        unit("clamp_ratio", self.clamp_ratio)?;
        unit("min_opacity", self.min_opacity)?;

        if self.threshold_ratio >= self.clamp_ratio {
            return Err(ConfigError::Invalid {
                field: "threshold_ratio",
                reason: "must be smaller than clamp_ratio".to_string(),
            });
        }
        if !self.opacity_falloff.is_finite() || self.opacity_falloff < 0.0 {
            return Err(ConfigError::Invalid {
                field: "opacity_falloff",
                reason: "must be a non-negative number".to_string(),
            });
        }
        Ok(())
    }
}

/// Toast timings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub visible_ms: u64,
    pub fade_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            visible_ms: 3000,
            fade_ms: 300,
        }
    }
}

impl ToastConfig {
    pub fn visible(&self) -> Duration {
        Duration::from_millis(self.visible_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Store origin, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
    /// Page the end-of-deck link points at, also used for CSRF bootstrap
    pub browse_path: String,
    /// Request timeout for cart calls
    pub request_timeout_ms: u64,
    pub deck: DeckConfig,
    pub toast: ToastConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            browse_path: "/browse/".to_string(),
            request_timeout_ms: 10_000,
            deck: DeckConfig::default(),
            toast: ToastConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file, filling gaps with defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: AppConfig = serde_json::from_str(&text)?;
        config.validate()?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "base_url",
                reason: "must not be empty".to_string(),
            });
        }
        self.deck.validate()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Absolute URL of the browse-more page
    pub fn browse_url(&self) -> String {
        join_url(&self.base_url, &self.browse_path)
    }
}

/// Join an origin and an absolute path without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.deck.threshold_ratio, 0.08);
        assert_eq!(config.deck.clamp_ratio, 0.35);
        assert_eq!(config.deck.fly_off_duration(), Duration::from_millis(600));
        assert_eq!(config.toast.visible(), Duration::from_secs(3));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"base_url": "https://shop.example/", "deck": {{"threshold_ratio": 0.1}}}}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.base_url, "https://shop.example/");
        assert_eq!(config.deck.threshold_ratio, 0.1);
        assert_eq!(config.deck.clamp_ratio, 0.35);
        assert_eq!(config.browse_url(), "https://shop.example/browse/");
    }

    #[test]
    fn threshold_past_clamp_is_rejected() {
        let deck = DeckConfig {
            threshold_ratio: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            deck.validate(),
            Err(ConfigError::Invalid { field: "threshold_ratio", .. })
        ));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(join_url("http://a", "/b/"), "http://a/b/");
        assert_eq!(join_url("http://a/", "b/"), "http://a/b/");
    }
}
