//! Scoped typing style: route ordinary writes through the typing engine.
//!
//! The explicit form is [`TypingWriter`], which wraps any sink. For code that
//! writes to "the default output" rather than to a sink it was handed, this
//! module keeps a per-thread default output, reachable through [`stdout`],
//! which [`with_typing_style`] and [`with_output`] temporarily replace.
//!
//! The default output is thread-local and is not re-entrant: a write to
//! [`stdout`] issued from inside a routed write on the same thread (for
//! instance by a custom mode) fails with an I/O error instead of recursing.

use crate::engine;
use crate::error::{Result, TypioError};
use crate::mode::Mode;
use crate::pacing::Timing;
use std::cell::RefCell;
use std::io::{self, Write};

thread_local! {
    static DEFAULT_OUTPUT: RefCell<Output> = const { RefCell::new(Output::Stdout) };
}

/// The default output of one thread, as a stack of substitutions over the
/// process's standard output.
enum Output {
    Stdout,
    Redirected {
        sink: Box<dyn Write>,
        below: Box<Output>,
    },
    Styled(Box<TypingWriter<Output>>),
}

impl Output {
    /// Undo the most recent substitution.
    fn pop(self) -> Self {
        match self {
            Self::Stdout => Self::Stdout,
            Self::Redirected { below, .. } => *below,
            Self::Styled(writer) => {
                if !writer.pending.is_empty() {
                    log::warn!(
                        "dropping {} bytes of incomplete UTF-8 at end of typing style",
                        writer.pending.len()
                    );
                }
                (*writer).into_inner()
            }
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout => io::stdout().write(buf),
            Self::Redirected { sink, .. } => sink.write(buf),
            Self::Styled(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout => io::stdout().flush(),
            Self::Redirected { sink, .. } => sink.flush(),
            Self::Styled(writer) => writer.flush(),
        }
    }
}

/// A sink adapter that types every write out through the engine.
///
/// Writes must be UTF-8. A multi-byte character split across two writes is
/// held back until it is complete. No terminator is added: whatever the
/// caller writes, including newlines, is exactly what gets typed.
///
/// ```
/// use std::io::Write;
/// use typio::{Mode, TypingWriter};
///
/// let mut writer = TypingWriter::new(Vec::<u8>::new(), 0.0, 0.0, Mode::Word).unwrap();
/// writeln!(writer, "hello {}", "world").unwrap();
/// assert_eq!(writer.into_inner(), b"hello world\n");
/// ```
pub struct TypingWriter<W: Write> {
    inner: W,
    timing: Timing,
    mode: Mode,
    pending: Vec<u8>,
}

impl<W: Write> TypingWriter<W> {
    /// Validate `delay` and `jitter`, then wrap `inner`.
    ///
    /// # Errors
    ///
    /// [`TypioError::InvalidDelay`] or [`TypioError::InvalidJitter`].
    pub fn new(inner: W, delay: f64, jitter: f64, mode: Mode) -> Result<Self> {
        Ok(Self::with_timing(inner, Timing::new(delay, jitter)?, mode))
    }

    pub fn with_timing(inner: W, timing: Timing, mode: Mode) -> Self {
        Self {
            inner,
            timing,
            mode,
            pending: Vec::new(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for TypingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        let complete = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => {
                self.pending.clear();
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    TypioError::InvalidBytes(e),
                ));
            }
        };
        if complete > 0 {
            let rest = self.pending.split_off(complete);
            let chunk = std::mem::replace(&mut self.pending, rest);
            let text = String::from_utf8(chunk)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            engine::emit(&mut self.inner, &text, "", self.timing, &self.mode)
                .map_err(into_io)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn busy() -> io::Error {
    io::Error::other("default output is already in use by a routed write on this thread")
}

fn into_io(err: TypioError) -> io::Error {
    match err {
        TypioError::Io(e) => e,
        other => io::Error::other(other),
    }
}

/// Handle to the current thread's default output. See [`stdout`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOutput;

/// The current thread's default output: the process's standard output,
/// unless replaced by [`with_typing_style`] or [`with_output`].
pub fn stdout() -> DefaultOutput {
    DefaultOutput
}

impl DefaultOutput {
    fn with<T>(f: impl FnOnce(&mut Output) -> io::Result<T>) -> io::Result<T> {
        DEFAULT_OUTPUT.with(|cell| {
            let mut output = cell.try_borrow_mut().map_err(|_| busy())?;
            f(&mut output)
        })
    }
}

impl Write for DefaultOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Self::with(|out| out.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Self::with(|out| out.flush())
    }
}

/// Restores the previous default output when dropped, including during
/// unwinding.
struct Scope;

impl Scope {
    fn push(make: impl FnOnce(Output) -> Output) -> io::Result<Self> {
        DEFAULT_OUTPUT.with(|cell| {
            let mut output = cell.try_borrow_mut().map_err(|_| busy())?;
            let current = std::mem::replace(&mut *output, Output::Stdout);
            *output = make(current);
            Ok(Scope)
        })
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        DEFAULT_OUTPUT.with(|cell| match cell.try_borrow_mut() {
            Ok(mut output) => {
                let current = std::mem::replace(&mut *output, Output::Stdout);
                *output = current.pop();
            }
            Err(_) => log::error!("default output still borrowed; cannot restore it"),
        });
    }
}

/// Run `body` with every write to [`stdout`] on this thread typed out with
/// the given style, then put the previous default output back.
///
/// Restoration happens however `body` ends: normal return, an `Err` value,
/// or a panic. The value returned by `body` is passed through. Calls nest.
///
/// # Errors
///
/// [`TypioError::InvalidDelay`] or [`TypioError::InvalidJitter`], raised
/// before `body` runs, or [`TypioError::Io`] when called from inside a
/// routed write on the same thread.
///
/// ```
/// use std::io::Write;
/// use typio::Mode;
///
/// let answer = typio::with_typing_style(0.0, 0.0, Mode::Char, || {
///     writeln!(typio::stdout(), "thinking...").unwrap();
///     42
/// })
/// .unwrap();
/// assert_eq!(answer, 42);
/// ```
pub fn with_typing_style<R>(
    delay: f64,
    jitter: f64,
    mode: Mode,
    body: impl FnOnce() -> R,
) -> Result<R> {
    let timing = Timing::new(delay, jitter)?;
    log::debug!("installing {mode} typing style (delay={delay}, jitter={jitter})");
    let scope = Scope::push(|below| {
        Output::Styled(Box::new(TypingWriter::with_timing(below, timing, mode)))
    })?;
    let result = body();
    drop(scope);
    log::debug!("typing style removed");
    Ok(result)
}

/// Run `body` with this thread's default output replaced by `sink`.
///
/// # Errors
///
/// Fails without running `body` when called from inside a routed write on
/// the same thread.
pub fn with_output<R>(sink: impl Write + 'static, body: impl FnOnce() -> R) -> io::Result<R> {
    let _scope = Scope::push(|below| Output::Redirected {
        sink: Box::new(sink),
        below: Box::new(below),
    })?;
    Ok(body())
}
