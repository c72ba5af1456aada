//! Report glyphs and status labels.
//!
//! Every status is carried by a bracketed text label so the report reads the
//! same with `NO_COLOR` or through a screen reader. `--no-unicode` swaps the
//! few non-ASCII glyphs the report uses for ASCII ones.

use std::sync::atomic::{AtomicBool, Ordering};

static ASCII_ONLY: AtomicBool = AtomicBool::new(false);

/// Glyph substitutions applied under `--no-unicode`.
const ASCII_FALLBACKS: &[(char, char)] = &[('═', '='), ('─', '-'), ('→', '>'), ('•', '*')];

pub struct OutputConfig;

impl OutputConfig {
    pub fn configure(no_unicode: bool) {
        ASCII_ONLY.store(no_unicode, Ordering::Relaxed);
    }

    #[inline]
    pub fn no_unicode() -> bool {
        ASCII_ONLY.load(Ordering::Relaxed)
    }

    /// `line` with every known glyph replaced when ASCII output is on.
    pub fn to_ascii(line: &str) -> String {
        if !Self::no_unicode() {
            return line.to_string();
        }
        line.chars()
            .map(|c| {
                ASCII_FALLBACKS
                    .iter()
                    .find(|(glyph, _)| *glyph == c)
                    .map_or(c, |(_, ascii)| *ascii)
            })
            .collect()
    }

    /// Banner rule of `width` characters.
    pub fn double_rule_line(width: usize) -> String {
        let glyph = if Self::no_unicode() { '=' } else { '═' };
        std::iter::repeat(glyph).take(width).collect()
    }
}

/// Prefix of every report line that states an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Pass,
    Fail,
    Skip,
    Info,
    Warning,
    Error,
}

impl StatusLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusLabel::Pass => "[PASS]",
            StatusLabel::Fail => "[FAIL]",
            StatusLabel::Skip => "[SKIP]",
            StatusLabel::Info => "[INFO]",
            StatusLabel::Warning => "[WARN]",
            StatusLabel::Error => "[ERROR]",
        }
    }
}
