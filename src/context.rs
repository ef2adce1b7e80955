//! The [`Context`] handed to a [`CustomMode`](crate::CustomMode).

use crate::error::Result;
use crate::pacing::{self, Timing, check_delay, check_jitter};
use std::io::Write;

/// Emission context passed to [`CustomMode::run`](crate::CustomMode::run).
///
/// Gives the custom mode the sink of the current emission and its timing.
/// Lives only for the duration of that one call.
pub struct Context<'a> {
    pub(crate) out: &'a mut dyn Write,
    pub(crate) timing: Timing,
}

impl<'a> Context<'a> {
    pub(crate) fn new(out: &'a mut dyn Write, timing: Timing) -> Self {
        Self { out, timing }
    }

    /// Configured base delay, in seconds.
    pub fn delay(&self) -> f64 {
        self.timing.delay()
    }

    /// Configured jitter bound, in seconds.
    pub fn jitter(&self) -> f64 {
        self.timing.jitter()
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Write `text` to the sink. No pause is taken.
    pub fn emit(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Pause with the configured delay and jitter.
    pub fn sleep(&self) -> Result<()> {
        self.timing.pause(1.0);
        Ok(())
    }

    /// Pause with a per-call override of delay and/or jitter. `None` keeps
    /// the configured value; `Some(0.0)` really means zero.
    ///
    /// # Errors
    ///
    /// [`TypioError::InvalidDelay`](crate::TypioError::InvalidDelay) or
    /// [`TypioError::InvalidJitter`](crate::TypioError::InvalidJitter) if an
    /// override is negative or not finite. Nothing is slept in that case.
    pub fn sleep_with(&self, delay: Option<f64>, jitter: Option<f64>) -> Result<()> {
        let delay = delay.map_or(Ok(self.delay()), check_delay)?;
        let jitter = jitter.map_or(Ok(self.jitter()), check_jitter)?;
        log::trace!("custom sleep: delay={delay} jitter={jitter}");
        pacing::sleep(delay, jitter);
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TypioError;
    use std::time::{Duration, Instant};

    #[test]
    fn test_emit_writes_without_terminator() {
        let mut out: Vec<u8> = Vec::new();
        let mut ctx = Context::new(&mut out, Timing::new(0.0, 0.0).unwrap());
        ctx.emit("he").unwrap();
        ctx.emit("llo").unwrap();
        ctx.flush().unwrap();
        assert_eq!(out, b"hello");
    }

    #[test]
    fn test_exposes_timing() {
        let mut out: Vec<u8> = Vec::new();
        let ctx = Context::new(&mut out, Timing::new(0.1, 0.2).unwrap());
        assert_eq!(ctx.delay(), 0.1);
        assert_eq!(ctx.jitter(), 0.2);
        assert_eq!(ctx.timing(), Timing::new(0.1, 0.2).unwrap());
    }

    #[test]
    fn test_override_is_validated_at_use() {
        let mut out: Vec<u8> = Vec::new();
        let ctx = Context::new(&mut out, Timing::new(0.0, 0.0).unwrap());
        assert!(matches!(
            ctx.sleep_with(Some(-1.0), None),
            Err(TypioError::InvalidDelay)
        ));
        assert!(matches!(
            ctx.sleep_with(None, Some(-0.5)),
            Err(TypioError::InvalidJitter)
        ));
        assert!(matches!(
            ctx.sleep_with(Some(f64::NAN), None),
            Err(TypioError::InvalidDelay)
        ));
    }

    #[test]
    fn test_explicit_zero_override_is_honored() {
        let mut out: Vec<u8> = Vec::new();
        let ctx = Context::new(&mut out, Timing::new(5.0, 0.0).unwrap());
        let start = Instant::now();
        ctx.sleep_with(Some(0.0), Some(0.0)).unwrap();
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_override_delay_is_slept() {
        let mut out: Vec<u8> = Vec::new();
        let ctx = Context::new(&mut out, Timing::new(0.0, 0.0).unwrap());
        let start = Instant::now();
        ctx.sleep_with(Some(0.02), None).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
