//! Which characters the tubes can show, and which of them are authentic
//!
//! Two fallback sheets cover Latin-1: FontA holds 32..=126 and FontB holds
//! 161..=255. The authentic sheet only knows `.` and the ten digits.

use crate::error::{DivergenceError, Result};
use crate::params::Authenticity;

/// First character of the FontA sheet
pub const FONT_A_START: char = ' ';
/// Last character of the FontA sheet
pub const FONT_A_END: char = '~';
/// First character of the FontB sheet
pub const FONT_B_START: char = '\u{A1}';
/// Last character of the FontB sheet
pub const FONT_B_END: char = '\u{FF}';

/// Latin-1 glyphs too wide for a tube cell
pub const TOO_WIDE: &str = "¤§¬¯µ¶¼½¾Þð";

/// Punctuation that keeps clock-style text semi-authentic
pub const CLOCK_PUNCTUATION: [char; 4] = [':', '\\', '/', '-'];

/// Whether `c` has no glyph and gets replaced while formatting
pub fn is_unsupported(c: char) -> bool {
    (c != '\n' && c < FONT_A_START)
        || (c > FONT_A_END && c < FONT_B_START)
        || c > FONT_B_END
        || TOO_WIDE.contains(c)
}

/// Whether the authentic sheet has a glyph for `c`
pub fn is_authentic_char(c: char) -> bool {
    c == '.' || c.is_ascii_digit()
}

/// FontA glyph; space is in range but never drawn
pub fn is_font_a(c: char) -> bool {
    c > FONT_A_START && c <= FONT_A_END
}

/// Latin-1 characters drawn from the second font sheet
pub fn is_font_b(c: char) -> bool {
    (FONT_B_START..=FONT_B_END).contains(&c)
}

/// Returns true if the text contains only authentic characters, spaces and newlines.
pub fn is_authentic(text: &str) -> bool {
    text.chars()
        .all(|c| c == '\n' || c == ' ' || is_authentic_char(c))
}

/// Returns true if the text is authentic apart from clock punctuation (`:`, `\`, `/`, `-`).
pub fn is_semi_authentic(text: &str) -> bool {
    text.chars().all(|c| {
        c == '\n' || c == ' ' || CLOCK_PUNCTUATION.contains(&c) || is_authentic_char(c)
    })
}

impl Authenticity {
    /// Settle the mode for one render of already formatted text.
    ///
    /// `Decide` becomes `Strict`, `Lax` or `None` depending on the text. `Strict`
    /// fails when the text holds anything the authentic sheet cannot draw.
    pub fn resolve(self, formatted: &str) -> Result<Authenticity> {
        match self {
            Authenticity::Decide => Ok(if is_authentic(formatted) {
                Authenticity::Strict
            } else if is_semi_authentic(formatted) {
                Authenticity::Lax
            } else {
                Authenticity::None
            }),
            Authenticity::Strict if !is_authentic(formatted) => {
                Err(DivergenceError::NotAuthentic {
                    text: formatted.to_string(),
                })
            },
            other => Ok(other),
        }
    }

    /// Whether authentic glyphs may be used at all
    pub fn allows_authentic(self) -> bool {
        self != Authenticity::None
    }
}

/// Every character the fallback sheets can draw, plus newline
pub fn supported_characters() -> impl Iterator<Item = char> {
    std::iter::once('\n')
        .chain(FONT_A_START..=FONT_A_END)
        .chain((FONT_B_START..=FONT_B_END).filter(|c| !TOO_WIDE.contains(*c)))
}

/// Every character that keeps text authentic
pub fn authentic_characters() -> impl Iterator<Item = char> {
    ['\n', ' ', '.'].into_iter().chain('0'..='9')
}
