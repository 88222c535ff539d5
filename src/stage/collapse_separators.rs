use std::borrow::Cow;

use crate::{stage::Stage, unicode::SEPARATOR};

/// Collapses runs of separators into one and trims the edges.
///
/// Only U+0020 counts as a separator inside the text; the edges are trimmed
/// of any Unicode whitespace, so a trailing newline never survives.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollapseSeparators;

#[inline]
fn has_separator_run(text: &str) -> bool {
    let mut prev_sep = false;
    for b in text.bytes() {
        let is_sep = b == SEPARATOR as u8;
        if is_sep && prev_sep {
            return true;
        }
        prev_sep = is_sep;
    }
    false
}

impl Stage for CollapseSeparators {
    fn name(&self) -> &'static str {
        "collapse_separators"
    }

    fn needs_apply(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        text.starts_with(char::is_whitespace)
            || text.ends_with(char::is_whitespace)
            || has_separator_run(text)
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if !has_separator_run(&text) {
            let trimmed = text.trim();
            if trimmed.len() == text.len() {
                return text;
            }
            return match text {
                Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
                Cow::Owned(s) => Cow::Owned(s.trim().to_owned()),
            };
        }

        // leading separators drop out because `prev` starts as one
        let mut out = String::with_capacity(text.len());
        let mut prev = SEPARATOR;
        for c in text.chars() {
            if c != SEPARATOR || prev != SEPARATOR {
                out.push(c);
            }
            prev = c;
        }
        let trimmed_len = out.trim_end().len();
        out.truncate(trimmed_len);
        let lead = out.len() - out.trim_start().len();
        if lead > 0 {
            out.drain(..lead);
        }
        Cow::Owned(out)
    }
}
