//! Page tunables read from an optional inline JSON block:
//!
//! ```html
//! <script type="application/json" id="site-config">
//!   { "logLevel": "debug", "fireworks": { "secret": "KARAN" } }
//! </script>
//! ```
//!
//! Every field has a default. Numeric values outside their bounds fall back to
//! the default instead of being clamped, so a typo never produces an extreme
//! setting.

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_ELEMENT_ID: &str = "site-config";

const DEFAULT_TRANSITION_DELAY_MS: u32 = 300;
const DEFAULT_BACK_TO_TOP_THRESHOLD: f64 = 300.0;
const DEFAULT_MAGNETIC_STRENGTH: f64 = 10.0;
const DEFAULT_TILT_DEGREES: f64 = 6.0;
const DEFAULT_SECRET: &str = "KARAN";
const DEFAULT_SPAWN_INTERVAL_MS: f64 = 380.0;
const DEFAULT_BURST_SIZE: usize = 90;
const DEFAULT_GRAVITY: f64 = 0.08;
const DEFAULT_FRICTION: f64 = 0.985;
const DEFAULT_FADE_OPACITY: f64 = 0.18;

const TRANSITION_DELAY_MS_BOUNDS: (u32, u32) = (0, 2_000);
const BACK_TO_TOP_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const MAGNETIC_STRENGTH_BOUNDS: (f64, f64) = (0.0, 40.0);
const TILT_DEGREES_BOUNDS: (f64, f64) = (0.0, 30.0);
const SPAWN_INTERVAL_MS_BOUNDS: (f64, f64) = (50.0, 5_000.0);
const BURST_SIZE_BOUNDS: (usize, usize) = (1, 400);
const GRAVITY_BOUNDS: (f64, f64) = (0.0, 1.0);
const FRICTION_BOUNDS: (f64, f64) = (0.5, 1.0);
const FADE_OPACITY_BOUNDS: (f64, f64) = (0.01, 1.0);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("site config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
}

impl LogLevel {
    pub fn to_level(self) -> log::Level {
        match self {
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warn => log::Level::Warn,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub log_level: LogLevel,
    pub transition_delay_ms: u32,
    pub back_to_top_threshold: f64,
    pub magnetic_strength: f64,
    pub tilt_degrees: f64,
    pub fireworks: FireworksConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            transition_delay_ms: DEFAULT_TRANSITION_DELAY_MS,
            back_to_top_threshold: DEFAULT_BACK_TO_TOP_THRESHOLD,
            magnetic_strength: DEFAULT_MAGNETIC_STRENGTH,
            tilt_degrees: DEFAULT_TILT_DEGREES,
            fireworks: FireworksConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FireworksConfig {
    pub secret: String,
    pub spawn_interval_ms: f64,
    pub burst_size: usize,
    pub gravity: f64,
    pub friction: f64,
    pub fade_opacity: f64,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            spawn_interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            burst_size: DEFAULT_BURST_SIZE,
            gravity: DEFAULT_GRAVITY,
            friction: DEFAULT_FRICTION,
            fade_opacity: DEFAULT_FADE_OPACITY,
        }
    }
}

impl SiteConfig {
    /// Parses the inline JSON block. Blank input yields the defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let parsed: Self = serde_json::from_str(raw)?;
        Ok(parsed.sanitized())
    }

    fn sanitized(self) -> Self {
        Self {
            log_level: self.log_level,
            transition_delay_ms: within_bounds(
                self.transition_delay_ms,
                DEFAULT_TRANSITION_DELAY_MS,
                TRANSITION_DELAY_MS_BOUNDS,
            ),
            back_to_top_threshold: within_bounds(
                self.back_to_top_threshold,
                DEFAULT_BACK_TO_TOP_THRESHOLD,
                BACK_TO_TOP_THRESHOLD_BOUNDS,
            ),
            magnetic_strength: within_bounds(
                self.magnetic_strength,
                DEFAULT_MAGNETIC_STRENGTH,
                MAGNETIC_STRENGTH_BOUNDS,
            ),
            tilt_degrees: within_bounds(self.tilt_degrees, DEFAULT_TILT_DEGREES, TILT_DEGREES_BOUNDS),
            fireworks: self.fireworks.sanitized(),
        }
    }
}

impl FireworksConfig {
    fn sanitized(self) -> Self {
        let secret = self.secret.trim().to_ascii_uppercase();
        let secret = if !secret.is_empty() && secret.chars().all(|c| c.is_ascii_alphabetic()) {
            secret
        } else {
            DEFAULT_SECRET.to_string()
        };

        Self {
            secret,
            spawn_interval_ms: within_bounds(
                self.spawn_interval_ms,
                DEFAULT_SPAWN_INTERVAL_MS,
                SPAWN_INTERVAL_MS_BOUNDS,
            ),
            burst_size: within_bounds(self.burst_size, DEFAULT_BURST_SIZE, BURST_SIZE_BOUNDS),
            gravity: within_bounds(self.gravity, DEFAULT_GRAVITY, GRAVITY_BOUNDS),
            friction: within_bounds(self.friction, DEFAULT_FRICTION, FRICTION_BOUNDS),
            fade_opacity: within_bounds(self.fade_opacity, DEFAULT_FADE_OPACITY, FADE_OPACITY_BOUNDS),
        }
    }
}

// NaN fails the range check and falls back like any other out-of-range value.
fn within_bounds<T: PartialOrd>(value: T, default: T, bounds: (T, T)) -> T {
    if (bounds.0..=bounds.1).contains(&value) {
        value
    } else {
        default
    }
}
