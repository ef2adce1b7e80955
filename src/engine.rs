//! The typing engine: validates an [`EmissionRequest`] and plays it out.

use crate::context::Context;
use crate::error::{Result, TypioError};
use crate::mode::Mode;
use crate::pacing::{DEFAULT_DELAY, DEFAULT_JITTER, Timing};
use crate::segment;
use crate::style;
use std::borrow::Cow;
use std::io::Write;

/// Default terminator appended after the text.
pub const DEFAULT_END: &str = "\n";

/// Text to be typed: either a string or UTF-8 encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text<'a> {
    Str(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
}

impl<'a> Text<'a> {
    /// Strictly decode into a string.
    ///
    /// # Errors
    ///
    /// [`TypioError::InvalidBytes`] if a byte text is not valid UTF-8.
    pub fn decode(self) -> Result<Cow<'a, str>> {
        match self {
            Self::Str(s) => Ok(s),
            Self::Bytes(Cow::Borrowed(b)) => std::str::from_utf8(b)
                .map(Cow::Borrowed)
                .map_err(TypioError::InvalidBytes),
            Self::Bytes(Cow::Owned(b)) => String::from_utf8(b)
                .map(Cow::Owned)
                .map_err(|e| TypioError::InvalidBytes(e.utf8_error())),
        }
    }
}

impl<'a> From<&'a str> for Text<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Text<'a> {
    fn from(s: &'a String) -> Self {
        Self::Str(Cow::Borrowed(s))
    }
}

impl From<String> for Text<'_> {
    fn from(s: String) -> Self {
        Self::Str(Cow::Owned(s))
    }
}

impl<'a> From<&'a [u8]> for Text<'a> {
    fn from(b: &'a [u8]) -> Self {
        Self::Bytes(Cow::Borrowed(b))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Text<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        Self::Bytes(Cow::Borrowed(b))
    }
}

impl From<Vec<u8>> for Text<'_> {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(Cow::Owned(b))
    }
}

/// Everything one typing call needs.
///
/// Built with [`EmissionRequest::new`] and the chained setters, then consumed
/// by [`run`](Self::run). Defaults: delay `0.04`, jitter `0.0`, terminator
/// `"\n"`, [`Mode::Char`], and the default output (see [`crate::stdout`]).
///
/// ```
/// use typio::{EmissionRequest, Mode};
///
/// let mut out: Vec<u8> = Vec::new();
/// EmissionRequest::new("hello world")
///     .delay(0.0)
///     .mode(Mode::Word)
///     .end("!")
///     .sink(&mut out)
///     .run()
///     .unwrap();
/// assert_eq!(out, b"hello world!");
/// ```
pub struct EmissionRequest<'a> {
    text: Text<'a>,
    delay: f64,
    jitter: f64,
    end: Cow<'a, str>,
    mode: Mode,
    sink: Option<&'a mut dyn Write>,
}

impl<'a> EmissionRequest<'a> {
    pub fn new(text: impl Into<Text<'a>>) -> Self {
        Self {
            text: text.into(),
            delay: DEFAULT_DELAY,
            jitter: DEFAULT_JITTER,
            end: Cow::Borrowed(DEFAULT_END),
            mode: Mode::default(),
            sink: None,
        }
    }

    /// Base delay between segments, in seconds.
    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Bound of the random offset added to every pause, in seconds.
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Terminator appended to the text before it is typed.
    pub fn end(mut self, end: impl Into<Cow<'a, str>>) -> Self {
        self.end = end.into();
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Write to `sink` instead of the default output.
    pub fn sink(mut self, sink: &'a mut dyn Write) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate the request, then type it out. Blocks until done.
    ///
    /// # Errors
    ///
    /// Validation failures (text, delay, jitter, sink, in that order) are
    /// reported before anything is written. After that, sink I/O errors and
    /// whatever a custom mode returns are passed through.
    pub fn run(self) -> Result<()> {
        let Self {
            text,
            delay,
            jitter,
            end,
            mode,
            sink,
        } = self;

        let text = text.decode()?;
        let timing = Timing::new(delay, jitter)?;

        match sink {
            Some(out) => {
                probe(out)?;
                emit(out, &text, &end, timing, &mode)
            }
            None => {
                let mut out = style::stdout();
                probe(&mut out)?;
                emit(&mut out, &text, &end, timing, &mode)
            }
        }
    }
}

/// Type `text` to the default output with default timing, terminator and mode.
///
/// # Errors
///
/// See [`EmissionRequest::run`].
pub fn type_print<'a>(text: impl Into<Text<'a>>) -> Result<()> {
    EmissionRequest::new(text).run()
}

/// A sink that cannot even be flushed is not a usable sink.
fn probe(out: &mut dyn Write) -> Result<()> {
    out.flush().map_err(TypioError::InvalidSink)
}

/// Play `text + end` out on `out`. Inputs are assumed valid.
pub(crate) fn emit(
    out: &mut dyn Write,
    text: &str,
    end: &str,
    timing: Timing,
    mode: &Mode,
) -> Result<()> {
    let mut full = String::with_capacity(text.len() + end.len());
    full.push_str(text);
    full.push_str(end);

    log::debug!(
        "typing {} chars in {mode} mode (delay={}, jitter={})",
        full.chars().count(),
        timing.delay(),
        timing.jitter()
    );

    match mode {
        Mode::Custom(custom) => {
            let mut ctx = Context::new(&mut *out, timing);
            custom.run(&mut ctx, &full)?;
        }
        builtin => {
            for step in segment::plan(builtin, &full).unwrap_or_default() {
                out.write_all(step.text.as_bytes())?;
                out.flush()?;
                timing.pause(step.pace);
                if let Some(extra) = step.extra {
                    timing.pause(extra);
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}
