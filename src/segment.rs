//! Built-in segmentation: turns a text into the ordered steps a mode emits.

use crate::mode::Mode;
use regex::Regex;
use std::sync::LazyLock;

const SENTENCE_ENDERS: [char; 3] = ['.', '!', '?'];
const SENTENCE_PAUSE: f64 = 4.0;
const TYPEWRITER_PAUSE: f64 = 5.0;
const ADAPTIVE_WHITESPACE: f64 = 0.3;
const ADAPTIVE_SYMBOL: f64 = 1.5;

static WORD_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+|\s+").expect("static pattern is valid"));

/// One segment plus the pauses that follow it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Step<'t> {
    pub text: &'t str,
    /// Multiple of the base delay slept right after the segment is written.
    pub pace: f64,
    /// Additional pause, as a multiple of the base delay, taken after `pace`.
    pub extra: Option<f64>,
}

impl<'t> Step<'t> {
    fn plain(text: &'t str) -> Self {
        Self {
            text,
            pace: 1.0,
            extra: None,
        }
    }
}

/// Split `text` according to a built-in `mode`. Returns `None` for
/// [`Mode::Custom`], which does its own segmentation.
pub(crate) fn plan<'t>(mode: &Mode, text: &'t str) -> Option<Vec<Step<'t>>> {
    let steps = match mode {
        Mode::Char => chars(text).map(Step::plain).collect(),
        Mode::Word => WORD_RUNS
            .find_iter(text)
            .map(|m| Step::plain(m.as_str()))
            .collect(),
        Mode::Line => lines(text).map(Step::plain).collect(),
        Mode::Sentence => chars(text)
            .map(|c| Step {
                extra: c
                    .ends_with(SENTENCE_ENDERS)
                    .then_some(SENTENCE_PAUSE),
                ..Step::plain(c)
            })
            .collect(),
        Mode::Typewriter => chars(text)
            .map(|c| Step {
                extra: (c == "\n").then_some(TYPEWRITER_PAUSE),
                ..Step::plain(c)
            })
            .collect(),
        Mode::Adaptive => chars(text)
            .map(|c| Step {
                pace: c.chars().next().map_or(1.0, adaptive_scale),
                ..Step::plain(c)
            })
            .collect(),
        Mode::Custom(_) => return None,
    };
    Some(steps)
}

/// Delay multiplier for a single character in adaptive mode.
pub(crate) fn adaptive_scale(c: char) -> f64 {
    if c.is_whitespace() || matches!(c, '\x1c'..='\x1f') {
        ADAPTIVE_WHITESPACE
    } else if c.is_alphanumeric() {
        1.0
    } else {
        ADAPTIVE_SYMBOL
    }
}

/// Every character of `text` as its own subslice.
fn chars(text: &str) -> impl Iterator<Item = &str> {
    text.char_indices()
        .map(move |(i, c)| &text[i..i + c.len_utf8()])
}

/// Lines of `text`, each keeping its terminator. `\r\n` counts as one
/// terminator; the last line may have none.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = match rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((i, '\r')) if rest[i + 1..].starts_with('\n') => i + 2,
            Some((i, c)) => i + c.len_utf8(),
            None => rest.len(),
        };
        let (line, tail) = rest.split_at(end);
        rest = tail;
        Some(line)
    })
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'t>(steps: &[Step<'t>]) -> Vec<&'t str> {
        steps.iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_char_mode_splits_code_points() {
        let steps = plan(&Mode::Char, "héy").unwrap();
        assert_eq!(texts(&steps), ["h", "é", "y"]);
        assert!(steps.iter().all(|s| s.pace == 1.0 && s.extra.is_none()));
    }

    #[test]
    fn test_word_mode_keeps_whitespace_runs() {
        let text = "  hello \t world\n\nbye";
        let steps = plan(&Mode::Word, text).unwrap();
        assert_eq!(
            texts(&steps),
            ["  ", "hello", " \t ", "world", "\n\n", "bye"]
        );
        assert_eq!(texts(&steps).concat(), text);
    }

    #[test]
    fn test_line_mode_keeps_terminators() {
        let steps = plan(&Mode::Line, "a\nb\r\nc\rd").unwrap();
        assert_eq!(texts(&steps), ["a\n", "b\r\n", "c\r", "d"]);
    }

    #[test]
    fn test_line_mode_unicode_separators() {
        let steps = plan(&Mode::Line, "a\u{2028}b\x0cc").unwrap();
        assert_eq!(texts(&steps), ["a\u{2028}", "b\x0c", "c"]);
    }

    #[test]
    fn test_line_mode_empty_text() {
        assert!(plan(&Mode::Line, "").unwrap().is_empty());
    }

    #[test]
    fn test_sentence_mode_pauses_after_enders() {
        let steps = plan(&Mode::Sentence, "Hi. Ok!?").unwrap();
        let extras: Vec<_> = steps.iter().map(|s| s.extra).collect();
        assert_eq!(
            extras,
            [None, None, Some(4.0), None, None, None, Some(4.0), Some(4.0)]
        );
    }

    #[test]
    fn test_typewriter_mode_pauses_after_newline() {
        let steps = plan(&Mode::Typewriter, "a\nb").unwrap();
        let extras: Vec<_> = steps.iter().map(|s| s.extra).collect();
        assert_eq!(extras, [None, Some(5.0), None]);
    }

    #[test]
    fn test_adaptive_ordering() {
        assert!(adaptive_scale(' ') < adaptive_scale('a'));
        assert!(adaptive_scale('a') < adaptive_scale(','));
        assert_eq!(adaptive_scale('7'), adaptive_scale('a'));
        assert_eq!(adaptive_scale('\n'), ADAPTIVE_WHITESPACE);
        assert_eq!(adaptive_scale('$'), ADAPTIVE_SYMBOL);
        // information separators count as whitespace
        for c in ['\x1c', '\x1d', '\x1e', '\x1f'] {
            assert_eq!(adaptive_scale(c), ADAPTIVE_WHITESPACE);
        }
    }

    #[test]
    fn test_adaptive_mode_paces_each_char() {
        let steps = plan(&Mode::Adaptive, "a, b").unwrap();
        let paces: Vec<_> = steps.iter().map(|s| s.pace).collect();
        assert_eq!(paces, [1.0, 1.5, 0.3, 1.0]);
    }

    #[test]
    fn test_custom_has_no_plan() {
        let custom = Mode::custom(|_, _| Ok(()));
        assert!(plan(&custom, "text").is_none());
    }
}
