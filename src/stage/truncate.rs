use std::borrow::Cow;

use crate::stage::Stage;

/// Keeps at most `max_chars` Unicode scalar values.
#[derive(Debug, Clone, Copy)]
pub struct Truncate {
    pub max_chars: usize,
}

impl Truncate {
    pub const fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Byte offset at which the text must be cut, if it is too long.
    #[inline]
    fn cut_at(&self, text: &str) -> Option<usize> {
        // fewer bytes than the limit means fewer chars too
        if text.len() <= self.max_chars {
            return None;
        }
        text.char_indices().nth(self.max_chars).map(|(idx, _)| idx)
    }
}

impl Stage for Truncate {
    fn name(&self) -> &'static str {
        "truncate"
    }

    #[inline]
    fn needs_apply(&self, text: &str) -> bool {
        self.cut_at(text).is_some()
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        let Some(cut) = self.cut_at(&text) else {
            return text;
        };
        match text {
            Cow::Borrowed(s) => Cow::Borrowed(&s[..cut]),
            Cow::Owned(mut s) => {
                s.truncate(cut);
                Cow::Owned(s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuts_on_char_boundaries() {
        let stage = Truncate::new(3);
        assert_eq!(stage.apply(Cow::Borrowed("日本語です")), "日本語");
        assert_eq!(stage.apply(Cow::Owned("abcdef".to_string())), "abc");
    }

    #[test]
    fn short_text_untouched() {
        let stage = Truncate::new(5);
        assert!(!stage.needs_apply("日本語です"));
        assert!(!stage.needs_apply("abc"));
        assert!(!Truncate::new(0).needs_apply(""));
        assert!(Truncate::new(0).needs_apply("a"));
    }
}
