//! The pacing primitive: a single best-effort pause, optionally perturbed by jitter.

use crate::error::{Result, TypioError};
use rand::Rng;
use std::thread;
use std::time::Duration;

/// Default base delay between emitted segments, in seconds.
pub const DEFAULT_DELAY: f64 = 0.04;

/// Default jitter bound, in seconds.
pub const DEFAULT_JITTER: f64 = 0.0;

/// Base delay and jitter bound for one emission, both in seconds.
///
/// Both values are finite and non-negative; the only way to build a `Timing`
/// is through [`Timing::new`], which enforces that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    delay: f64,
    jitter: f64,
}

impl Timing {
    /// Validate `delay` then `jitter` and build a `Timing`.
    ///
    /// # Errors
    ///
    /// [`TypioError::InvalidDelay`] or [`TypioError::InvalidJitter`] if the
    /// value is negative, NaN or infinite.
    pub fn new(delay: f64, jitter: f64) -> Result<Self> {
        Ok(Self {
            delay: check_delay(delay)?,
            jitter: check_jitter(jitter)?,
        })
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    /// Pause for `factor × delay`, jittered by the configured bound.
    pub fn pause(&self, factor: f64) {
        sleep(self.delay * factor, self.jitter);
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            jitter: DEFAULT_JITTER,
        }
    }
}

pub(crate) fn check_delay(delay: f64) -> Result<f64> {
    if delay.is_finite() && delay >= 0.0 {
        Ok(delay)
    } else {
        Err(TypioError::InvalidDelay)
    }
}

pub(crate) fn check_jitter(jitter: f64) -> Result<f64> {
    if jitter.is_finite() && jitter >= 0.0 {
        Ok(jitter)
    } else {
        Err(TypioError::InvalidJitter)
    }
}

/// Block the current thread for `delay` seconds, perturbed by a uniform
/// offset in `[-jitter, +jitter]` and clamped at zero.
///
/// A non-positive `delay` returns immediately, whatever the jitter. Never
/// fails: arguments are expected to have been validated by the caller.
pub fn sleep(delay: f64, jitter: f64) {
    if let Some(pause) = pause_duration(delay, jitter, &mut rand::thread_rng()) {
        thread::sleep(pause);
    }
}

/// Compute the pause [`sleep`] would take, or `None` for no pause at all.
/// Pauses too long for a [`Duration`] saturate at [`Duration::MAX`].
pub(crate) fn pause_duration<R: Rng + ?Sized>(
    delay: f64,
    jitter: f64,
    rng: &mut R,
) -> Option<Duration> {
    if delay.is_nan() || delay <= 0.0 {
        return None;
    }
    let mut secs = delay;
    if jitter > 0.0 {
        secs = (secs + rng.gen_range(-jitter..=jitter)).max(0.0);
    }
    Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
}
