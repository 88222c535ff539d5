//! Sliding-window n-gram extraction over normalized characters.

use crate::unicode::{SEPARATOR, is_roman_upper, normalize_char};

/// Longest gram the detector scores.
pub const N_GRAM: usize = 3;

/// Rolling window of the last [`N_GRAM`] normalized characters.
///
/// A fresh window holds a single separator, so the first letter of a text
/// starts a word exactly like a letter after a space does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NGramWindow {
    grams: String,
    capital_run: bool,
}

impl Default for NGramWindow {
    fn default() -> Self {
        Self {
            grams: SEPARATOR.to_string(),
            capital_run: false,
        }
    }
}

impl NGramWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the window sits inside a run of ASCII capitals.
    #[inline]
    pub fn capital_run(&self) -> bool {
        self.capital_run
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.grams
    }

    /// Feed one raw character.
    pub fn add_char(&mut self, ch: char) {
        let ch = normalize_char(ch);
        let last = self.grams.chars().next_back();

        if last == Some(SEPARATOR) {
            self.grams.clear();
            self.grams.push(SEPARATOR);
            self.capital_run = false;
            if ch == SEPARATOR {
                return;
            }
        } else if self.grams.chars().count() >= N_GRAM {
            let first_len = self.grams.chars().next().map_or(0, char::len_utf8);
            self.grams.drain(..first_len);
        }
        self.grams.push(ch);

        self.capital_run = match last {
            Some(prev) => prev != SEPARATOR && is_roman_upper(prev) && is_roman_upper(ch),
            None => false,
        };
    }

    /// The trailing gram of length `n`, if it is a usable feature.
    pub fn get(&self, n: usize) -> Option<&str> {
        if self.capital_run || n == 0 || n > N_GRAM {
            return None;
        }
        let len = self.grams.chars().count();
        if len < n {
            return None;
        }
        let start = self
            .grams
            .char_indices()
            .nth(len - n)
            .map_or(0, |(idx, _)| idx);
        let gram = &self.grams[start..];
        if gram.chars().all(char::is_whitespace) {
            return None;
        }
        Some(gram)
    }
}

/// Extract every known 1-, 2- and 3-gram of `text`, in text order.
///
/// `is_known` decides membership in the probability matrix; unknown grams are
/// dropped here rather than scored as zero.
pub fn extract_ngrams<F>(text: &str, mut is_known: F) -> Vec<String>
where
    F: FnMut(&str) -> bool,
{
    let mut window = NGramWindow::new();
    let mut grams = Vec::new();

    for ch in text.chars() {
        window.add_char(ch);
        if window.capital_run() {
            continue;
        }
        for n in 1..=N_GRAM {
            if let Some(gram) = window.get(n).filter(|g| is_known(g)) {
                grams.push(gram.to_owned());
            }
        }
    }
    grams
}
