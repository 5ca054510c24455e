//! Keystroke pacing.
//!
//! Every delay starts from the base delay implied by the target speed
//! (`60 / (wpm * 5)` seconds per character) and is then stretched or shrunk
//! by independent factors: character class, random jitter, an occasional
//! hesitation, fatigue, and burst typing.

use rand::Rng;
use std::time::Duration;

/// Characters that take longer to reach than letters.
pub const SLOW_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:'\",.<>?/\\";

const UPPERCASE_FACTOR: f64 = 1.1;
const SYMBOL_FACTOR: f64 = 1.3;
const HESITATION_PROBABILITY: f64 = 0.02;
const MAX_FATIGUE: f64 = 0.15;
const BURST_PROBABILITY: f64 = 0.15;
const BURST_MULTIPLIER: f64 = 0.6;

/// Pacing parameters for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingModel {
    base_delay: f64,
    variability: f64,
}

impl TimingModel {
    /// `wpm` must be positive and `variability` within `[0, 1]`.
    pub fn new(wpm: f64, variability: f64) -> Self {
        Self {
            base_delay: 60.0 / (wpm * 5.0),
            variability,
        }
    }

    /// Seconds per character at the target speed.
    pub fn base_delay(&self) -> f64 {
        self.base_delay
    }

    /// Delay after typing `ch`, before fatigue and burst are applied.
    pub fn char_delay<R: Rng + ?Sized>(&self, ch: char, rng: &mut R) -> f64 {
        let mut delay = self.base_delay;

        if ch.is_uppercase() {
            delay *= UPPERCASE_FACTOR;
        }
        if SLOW_SYMBOLS.contains(ch) {
            delay *= SYMBOL_FACTOR;
        }

        delay *= 1.0 + rng.gen_range(-self.variability..=self.variability);

        if rng.gen_bool(HESITATION_PROBABILITY) {
            delay += rng.gen_range(0.1..=0.3);
        }

        delay
    }

    /// Pause after a word boundary space.
    pub fn word_pause<R: Rng + ?Sized>(&self, fatigue: f64, rng: &mut R) -> Duration {
        seconds(self.base_delay * rng.gen_range(1.5..=2.5) * fatigue)
    }
}

/// Slowdown that grows linearly to 15% over the run.
pub fn fatigue_factor(processed: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    1.0 + (processed as f64 / total as f64) * MAX_FATIGUE
}

/// Per-word speed multiplier; drawn once for each word.
pub fn burst_multiplier<R: Rng + ?Sized>(burst_mode: bool, rng: &mut R) -> f64 {
    if burst_mode && rng.gen_bool(BURST_PROBABILITY) {
        BURST_MULTIPLIER
    } else {
        1.0
    }
}

/// Pause after pressing enter between paragraphs.
pub fn paragraph_pause<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    seconds(rng.gen_range(0.8..=1.8))
}

/// Time to notice a typo before reaching for backspace.
pub fn recognition_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    seconds(rng.gen_range(0.15..=0.35))
}

/// Time between backspace and retyping the intended character.
pub fn correction_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    seconds(rng.gen_range(0.05..=0.12))
}

/// Convert seconds to a `Duration`. Non-positive and NaN values become zero,
/// values too large for a `Duration` saturate at `Duration::MAX`.
pub fn seconds(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}
