//! [`Mode`] — how a text is cut into segments and paced.

use crate::context::Context;
use crate::error::{Result, TypioError};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Caller-supplied pacing logic.
///
/// A custom mode takes over the whole emission: the engine does no
/// segmentation and no pacing of its own, it only hands over a [`Context`]
/// and the text (terminator already appended). Any closure with the matching
/// signature is a `CustomMode`.
///
/// ```
/// use typio::{EmissionRequest, Mode};
///
/// let shout = Mode::custom(|ctx, text| {
///     ctx.emit(&text.to_uppercase())?;
///     ctx.sleep()
/// });
///
/// let mut out: Vec<u8> = Vec::new();
/// EmissionRequest::new("hello").delay(0.0).mode(shout).sink(&mut out).run().unwrap();
/// assert_eq!(out, b"HELLO\n");
/// ```
pub trait CustomMode {
    /// Emit `text` through `ctx`. Errors are returned to the caller of the
    /// engine exactly as produced here.
    fn run(&self, ctx: &mut Context<'_>, text: &str) -> Result<()>;
}

impl<F> CustomMode for F
where
    F: Fn(&mut Context<'_>, &str) -> Result<()>,
{
    fn run(&self, ctx: &mut Context<'_>, text: &str) -> Result<()> {
        self(ctx, text)
    }
}

/// Segmentation strategy for one emission.
#[derive(Clone, Default)]
pub enum Mode {
    /// One character at a time.
    #[default]
    Char,
    /// Alternating runs of non-whitespace and whitespace.
    Word,
    /// One line at a time, each keeping its line terminator.
    Line,
    /// Like `Char`, with an extra `4 × delay` pause after `.`, `!` and `?`.
    Sentence,
    /// Like `Char`, with an extra `5 × delay` pause after a newline.
    Typewriter,
    /// Like `Char`, with the delay scaled by the kind of character.
    Adaptive,
    /// Caller-controlled segmentation and pacing.
    Custom(Arc<dyn CustomMode + Send + Sync>),
}

impl Mode {
    /// Names of the built-in modes, in declaration order.
    pub const NAMES: [&'static str; 6] = [
        "char",
        "word",
        "line",
        "sentence",
        "typewriter",
        "adaptive",
    ];

    /// Wrap a closure as a custom mode. Types implementing [`CustomMode`]
    /// directly can be wrapped with `Mode::Custom(Arc::new(..))`.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut Context<'_>, &str) -> Result<()> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Word => "word",
            Self::Line => "line",
            Self::Sentence => "sentence",
            Self::Typewriter => "typewriter",
            Self::Adaptive => "adaptive",
            Self::Custom(_) => "custom",
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl FromStr for Mode {
    type Err = TypioError;

    /// Parse one of the built-in mode names. Custom modes have no name.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "char" => Ok(Self::Char),
            "word" => Ok(Self::Word),
            "line" => Ok(Self::Line),
            "sentence" => Ok(Self::Sentence),
            "typewriter" => Ok(Self::Typewriter),
            "adaptive" => Ok(Self::Adaptive),
            _ => Err(TypioError::InvalidMode),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Char => "Char",
            Self::Word => "Word",
            Self::Line => "Line",
            Self::Sentence => "Sentence",
            Self::Typewriter => "Typewriter",
            Self::Adaptive => "Adaptive",
            Self::Custom(_) => "Custom(..)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_names() {
        for name in Mode::NAMES {
            let mode: Mode = name.parse().unwrap();
            assert_eq!(mode.name(), name);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!("invalid".parse::<Mode>(), Err(TypioError::InvalidMode)));
        assert!(matches!("CHAR".parse::<Mode>(), Err(TypioError::InvalidMode)));
        assert!(matches!("custom".parse::<Mode>(), Err(TypioError::InvalidMode)));
    }

    #[test]
    fn test_default_is_char() {
        assert!(matches!(Mode::default(), Mode::Char));
    }

    #[test]
    fn test_custom() {
        let mode = Mode::custom(|ctx, text| ctx.emit(text));
        assert!(mode.is_custom());
        assert_eq!(mode.name(), "custom");
        assert_eq!(format!("{mode:?}"), "Custom(..)");
    }

    #[test]
    fn test_modes_cross_threads() {
        let handle = std::thread::spawn(move || {
            let mut out: Vec<u8> = Vec::new();
            crate::EmissionRequest::new("a  b")
                .delay(0.0)
                .mode(Mode::Word)
                .sink(&mut out)
                .run()
                .map(|()| out)
        });
        assert_eq!(handle.join().unwrap().unwrap(), b"a  b\n");

        let shout = Mode::custom(|ctx, text| ctx.emit(&text.to_uppercase()));
        let handle = std::thread::spawn(move || {
            let mut writer = crate::TypingWriter::new(Vec::<u8>::new(), 0.0, 0.0, shout)?;
            std::io::Write::write_all(&mut writer, b"hi")?;
            Ok::<_, TypioError>(writer.into_inner())
        });
        assert_eq!(handle.join().unwrap().unwrap(), b"HI");
    }

    #[test]
    fn test_display_and_debug() {
        assert_eq!(Mode::Typewriter.to_string(), "typewriter");
        assert_eq!(format!("{:?}", Mode::Typewriter), "Typewriter");
    }
}
