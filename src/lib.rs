//! # Typio
//!
//! Make your terminal type like a human.
//!
//! Typio prints text incrementally with configurable pacing, so terminal
//! demos, tutorials and command-line storytelling read as if someone were
//! typing them. Output is synchronous: every pause blocks the calling thread.
//!
//! ## Quick start
//!
//! ```no_run
//! use typio::{EmissionRequest, Mode};
//!
//! fn main() -> typio::Result<()> {
//!     typio::type_print("Hello, world!")?;
//!
//!     EmissionRequest::new("Slower, word by word.")
//!         .delay(0.2)
//!         .jitter(0.05)
//!         .mode(Mode::Word)
//!         .run()
//! }
//! ```
//!
//! ## Modes
//!
//! | Mode | Segment | Pacing |
//! |------|---------|--------|
//! | `char` | one character | `delay` after each |
//! | `word` | a run of non-whitespace or of whitespace | `delay` after each |
//! | `line` | a line, with its line break | `delay` after each |
//! | `sentence` | one character | as `char`, plus `4 × delay` after `.` `!` `?` |
//! | `typewriter` | one character | as `char`, plus `5 × delay` after a newline |
//! | `adaptive` | one character | `0.3 ×` for whitespace, `1.5 ×` for punctuation |
//!
//! Every pause is perturbed by a uniform random offset in `[-jitter, +jitter]`
//! and never goes below zero.
//!
//! ## Custom modes
//!
//! [`Mode::custom`] hands the whole emission to a closure. It receives a
//! [`Context`] and the text (terminator included) and decides what to write
//! and when to pause:
//!
//! ```
//! use typio::{EmissionRequest, Mode};
//!
//! let stutter = Mode::custom(|ctx, text| {
//!     for word in text.split_inclusive(' ') {
//!         ctx.emit(word)?;
//!         ctx.flush()?;
//!         ctx.sleep_with(Some(ctx.delay() * 2.0), None)?;
//!     }
//!     Ok(())
//! });
//!
//! let mut out: Vec<u8> = Vec::new();
//! EmissionRequest::new("one two").delay(0.0).mode(stutter).sink(&mut out).run().unwrap();
//! assert_eq!(out, b"one two\n");
//! ```
//!
//! ## Styling existing output
//!
//! Wrap any sink in a [`TypingWriter`] to type out everything written to it,
//! or run a block under [`with_typing_style`] so that writes to
//! [`typio::stdout()`](stdout) are typed out until the block ends.

pub mod context;
pub mod engine;
pub mod error;
pub mod mode;
pub mod pacing;
pub(crate) mod segment;
pub mod style;

pub use context::Context;
pub use engine::{DEFAULT_END, EmissionRequest, Text, type_print};
pub use error::{Result, TypioError};
pub use mode::{CustomMode, Mode};
pub use pacing::{DEFAULT_DELAY, DEFAULT_JITTER, Timing};
pub use style::{DefaultOutput, TypingWriter, stdout, with_output, with_typing_style};

/// Version of this crate, as printed by `typio --version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
