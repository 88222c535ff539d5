// src/unicode.rs
//! Block-level character classification and the per-block folding rules that
//! turn raw text into detection symbols.

use crate::{cjk, data::LATIN1_EXCLUDE};

/// The only separator symbol n-gram extraction knows about.
pub const SEPARATOR: char = ' ';

/// The Unicode blocks that carry a normalization rule. Everything else is
/// reported as [`UnicodeBlock::Other`] and passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnicodeBlock {
    BasicLatin,
    Latin1Supplement,
    LatinExtendedB,
    GeneralPunctuation,
    Arabic,
    LatinExtendedAdditional,
    Hiragana,
    Katakana,
    Bopomofo,
    BopomofoExtended,
    CjkUnifiedIdeographs,
    HangulSyllables,
    Other,
}

impl UnicodeBlock {
    #[inline(always)]
    pub const fn of(c: char) -> Self {
        match c as u32 {
            0x0000..=0x007F => Self::BasicLatin,
            0x0080..=0x00FF => Self::Latin1Supplement,
            0x0180..=0x024F => Self::LatinExtendedB,
            0x0600..=0x06FF => Self::Arabic,
            0x1E00..=0x1EFF => Self::LatinExtendedAdditional,
            0x2000..=0x206F => Self::GeneralPunctuation,
            0x3040..=0x309F => Self::Hiragana,
            0x30A0..=0x30FF => Self::Katakana,
            0x3100..=0x312F => Self::Bopomofo,
            0x31A0..=0x31BF => Self::BopomofoExtended,
            0x4E00..=0x9FFF => Self::CjkUnifiedIdeographs,
            0xAC00..=0xD7AF => Self::HangulSyllables,
            _ => Self::Other,
        }
    }
}

// Script markers: whole syllabaries collapse onto one symbol each.
pub const HIRAGANA_MARKER: char = '\u{3042}';
pub const KATAKANA_MARKER: char = '\u{30A2}';
pub const BOPOMOFO_MARKER: char = '\u{3105}';
pub const HANGUL_MARKER: char = '\u{AC00}';

/// Latin Extended Additional characters at or above this codepoint fold onto
/// [`LATIN_EXT_ADDITIONAL_MARKER`].
pub const LATIN_EXT_ADDITIONAL_FOLD_START: char = '\u{1EA0}';
pub const LATIN_EXT_ADDITIONAL_MARKER: char = '\u{1EC3}';

/// Map one character to its detection symbol.
///
/// CJK ideographs fold through [`cjk::fold`]. The built-in class table is a
/// small seed covering a few dozen ideographs; almost every variant ideograph
/// passes through unchanged unless the complete table was installed with
/// [`cjk::install_classes`] before first use.
///
/// Pure and idempotent: `normalize_char(normalize_char(c)) == normalize_char(c)`.
#[inline]
pub fn normalize_char(c: char) -> char {
    match UnicodeBlock::of(c) {
        UnicodeBlock::BasicLatin => {
            if c.is_ascii_alphabetic() {
                c
            } else {
                SEPARATOR
            }
        }
        UnicodeBlock::Latin1Supplement => {
            if LATIN1_EXCLUDE.contains(&c) {
                SEPARATOR
            } else {
                c
            }
        }
        // Romanian comma-below letters share profiles with the cedilla forms.
        UnicodeBlock::LatinExtendedB => match c {
            '\u{0219}' => '\u{015F}',
            '\u{021B}' => '\u{0163}',
            _ => c,
        },
        UnicodeBlock::GeneralPunctuation => SEPARATOR,
        // Farsi yeh
        UnicodeBlock::Arabic if c == '\u{06CC}' => '\u{064A}',
        UnicodeBlock::LatinExtendedAdditional if c >= LATIN_EXT_ADDITIONAL_FOLD_START => {
            LATIN_EXT_ADDITIONAL_MARKER
        }
        UnicodeBlock::Hiragana => HIRAGANA_MARKER,
        UnicodeBlock::Katakana => KATAKANA_MARKER,
        UnicodeBlock::Bopomofo | UnicodeBlock::BopomofoExtended => BOPOMOFO_MARKER,
        UnicodeBlock::CjkUnifiedIdeographs => cjk::fold(c),
        UnicodeBlock::HangulSyllables => HANGUL_MARKER,
        _ => c,
    }
}

/// ASCII capital letter, the only casing the capital-run rule recognises.
#[inline(always)]
pub const fn is_roman_upper(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// `[A-Za-z]`, used by profile pruning to spot Latin contamination.
#[inline(always)]
pub const fn is_roman(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[inline]
pub fn contains_roman(s: &str) -> bool {
    s.chars().any(is_roman)
}
