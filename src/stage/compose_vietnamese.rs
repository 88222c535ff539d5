//! Composes a Vietnamese base letter followed by a combining tone mark into
//! the precomposed character, e.g. `A` + U+0300 → `À`, `ê` + U+0323 → `ệ`.
//!
//! Runs on raw input, before any script folding, so decomposed and
//! precomposed spellings produce the same n-grams.

use std::borrow::Cow;

use crate::{
    data::{VI_BASE_INDEX, VI_COMPOSED, VI_MARK_INDEX},
    stage::Stage,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct ComposeVietnamese;

/// The precomposed form of `base` + `mark`, if the pair is in the table.
#[inline]
pub fn compose_pair(base: char, mark: char) -> Option<char> {
    let b = *VI_BASE_INDEX.get(&base)?;
    let m = *VI_MARK_INDEX.get(&mark)?;
    Some(VI_COMPOSED[m as usize][b as usize])
}

#[inline(always)]
fn is_tone_mark(c: char) -> bool {
    VI_MARK_INDEX.contains_key(&c)
}

/// Compose every base + mark pair in `text`; other sequences pass through.
pub fn compose_vietnamese(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_tone_mark) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek().and_then(|&next| compose_pair(c, next)) {
            Some(composed) => {
                out.push(composed);
                chars.next();
            }
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

impl Stage for ComposeVietnamese {
    fn name(&self) -> &'static str {
        "compose_vietnamese"
    }

    #[inline]
    fn needs_apply(&self, text: &str) -> bool {
        !text.is_ascii() && text.chars().any(is_tone_mark)
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        match text {
            Cow::Borrowed(s) => compose_vietnamese(s),
            Cow::Owned(s) => {
                let composed = match compose_vietnamese(&s) {
                    Cow::Owned(composed) => Some(composed),
                    Cow::Borrowed(_) => None,
                };
                Cow::Owned(composed.unwrap_or(s))
            }
        }
    }
}
