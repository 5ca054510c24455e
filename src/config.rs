//! Run configuration: what to type and how fast, how sloppily, how evenly.
//!
//! A [`RunConfig`] can be built in code or loaded from a JSON profile:
//!
//! ```json
//! {
//!   "wpm": 70,
//!   "typo_probability": 0.02,
//!   "variability": 0.25,
//!   "burst_mode": false
//! }
//! ```
//!
//! Missing fields fall back to the defaults of [`RunConfig::default`].

use crate::error::{EngineError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Immutable input to one typing run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Paragraphs separated by `\n`, words separated by whitespace.
    pub text: String,
    /// Target typing speed in words per minute (5 characters per word).
    pub wpm: f64,
    /// Chance in `[0, 1]` that any given character is first mistyped.
    pub typo_probability: f64,
    /// Fraction in `[0, 1]` by which each keystroke delay may deviate.
    pub variability: f64,
    /// Occasionally type a whole word noticeably faster.
    pub burst_mode: bool,
    /// Seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            wpm: 55.0,
            typo_probability: 0.03,
            variability: 0.35,
            burst_mode: true,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Create a config for `text` with default pacing.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_wpm(mut self, wpm: f64) -> Self {
        self.wpm = wpm;
        self
    }

    pub fn with_typo_probability(mut self, probability: f64) -> Self {
        self.typo_probability = probability;
        self
    }

    pub fn with_variability(mut self, variability: f64) -> Self {
        self.variability = variability;
        self
    }

    pub fn with_burst_mode(mut self, enabled: bool) -> Self {
        self.burst_mode = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a profile from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::config_load(path.display().to_string(), e.to_string()))?;
        serde_json::from_str(&content)
            .map_err(|e| EngineError::config_load(path.display().to_string(), e.to_string()))
    }

    /// Check that the config describes a run the engine can perform.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptyText`] when there is nothing but whitespace to
    /// type, [`EngineError::InvalidConfig`] for out-of-range parameters.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(EngineError::EmptyText);
        }
        if !self.wpm.is_finite() || self.wpm <= 0.0 {
            return Err(EngineError::invalid_config(format!(
                "wpm must be a positive number, got {}",
                self.wpm
            )));
        }
        if !(0.0..=1.0).contains(&self.typo_probability) {
            return Err(EngineError::invalid_config(format!(
                "typo_probability must be between 0.0 and 1.0, got {}",
                self.typo_probability
            )));
        }
        if !(0.0..=1.0).contains(&self.variability) {
            return Err(EngineError::invalid_config(format!(
                "variability must be between 0.0 and 1.0, got {}",
                self.variability
            )));
        }
        Ok(())
    }
}

/// Parse a duration string: `1s`, `500ms`, `1.5s`.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let trimmed = s.trim();
    if let Some(ms_str) = trimmed.strip_suffix("ms") {
        let ms: u64 = ms_str
            .trim()
            .parse()
            .map_err(|_| EngineError::invalid_duration(s, "invalid milliseconds value"))?;
        Ok(Duration::from_millis(ms))
    } else if let Some(s_str) = trimmed.strip_suffix('s') {
        let secs: f64 = s_str
            .trim()
            .parse()
            .map_err(|_| EngineError::invalid_duration(s, "invalid seconds value"))?;
        Duration::try_from_secs_f64(secs)
            .map_err(|_| EngineError::invalid_duration(s, "seconds must be non-negative"))
    } else {
        Err(EngineError::invalid_duration(s, "must end with 's' or 'ms'"))
    }
}
