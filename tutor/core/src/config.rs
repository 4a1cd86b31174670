//! Widget Configuration
//!
//! Timing knobs for the reply delay, the excited hold and the blink driver.
//! Defaults reproduce the widget's stock feel; every field can be overridden
//! from `TUTOR_*` environment variables.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The reply delay window is empty
    #[error("reply delay window is empty: min {min_ms}ms must be below max {max_ms}ms")]
    EmptyReplyWindow { min_ms: u64, max_ms: u64 },

    /// The blink timer would fire continuously
    #[error("blink period must be greater than zero")]
    ZeroBlinkPeriod,

    /// The blink threshold is not a probability
    #[error("blink threshold {0} is outside [0, 1]")]
    BlinkThresholdOutOfRange(f64),
}

/// Timing and randomness configuration for a [`crate::TutorWidget`]
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Lower bound of the reply delay (inclusive)
    pub reply_delay_min_ms: u64,
    /// Upper bound of the reply delay (exclusive)
    pub reply_delay_max_ms: u64,
    /// How long the avatar stays excited after a reply lands
    pub excited_hold_ms: u64,
    /// Period of the idle blink timer
    pub blink_period_ms: u64,
    /// Draws above this value blink (0.7 = 30% blink chance)
    pub blink_threshold: f64,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            reply_delay_min_ms: 1500,
            reply_delay_max_ms: 2500,
            excited_hold_ms: 3000,
            blink_period_ms: 2000,
            blink_threshold: 0.7,
            seed: None,
        }
    }
}

impl WidgetConfig {
    /// Create configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup, falling back to
    /// defaults for missing or unparseable values
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let parse = |key: &str| parse_value(&lookup, key);

        Self {
            reply_delay_min_ms: parse("TUTOR_REPLY_DELAY_MIN_MS")
                .unwrap_or(default.reply_delay_min_ms),
            reply_delay_max_ms: parse("TUTOR_REPLY_DELAY_MAX_MS")
                .unwrap_or(default.reply_delay_max_ms),
            excited_hold_ms: parse("TUTOR_EXCITED_HOLD_MS").unwrap_or(default.excited_hold_ms),
            blink_period_ms: parse("TUTOR_BLINK_PERIOD_MS").unwrap_or(default.blink_period_ms),
            blink_threshold: parse_value(&lookup, "TUTOR_BLINK_THRESHOLD")
                .unwrap_or(default.blink_threshold),
            seed: parse_value(&lookup, "TUTOR_SEED"),
        }
    }

    /// Check that the timings describe a usable widget
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reply_delay_min_ms >= self.reply_delay_max_ms {
            return Err(ConfigError::EmptyReplyWindow {
                min_ms: self.reply_delay_min_ms,
                max_ms: self.reply_delay_max_ms,
            });
        }
        if self.blink_period_ms == 0 {
            return Err(ConfigError::ZeroBlinkPeriod);
        }
        if !(0.0..=1.0).contains(&self.blink_threshold) {
            return Err(ConfigError::BlinkThresholdOutOfRange(self.blink_threshold));
        }
        Ok(())
    }

    pub fn excited_hold(&self) -> Duration {
        Duration::from_millis(self.excited_hold_ms)
    }

    pub fn blink_period(&self) -> Duration {
        Duration::from_millis(self.blink_period_ms)
    }
}

/// Parse one value, warning when it is present but malformed
fn parse_value<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable config value");
            None
        }
    }
}
