//! Per-language n-gram frequency profiles.
//!
//! Profiles are produced elsewhere (usually deserialized from one JSON record
//! per language) and only consumed here.

pub mod registry;

pub use registry::{ProfileRegistry, RegistryBuilder};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ngram::N_GRAM,
    unicode::{contains_roman, is_roman},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("duplicate language profile `{0}`")]
    DuplicateLanguage(String),
}

/// Grams at or below this count never survive pruning.
const MINIMUM_FREQ: u64 = 2;
/// One gram in this many tokens is the pruning floor for large corpora.
const LESS_FREQ_RATIO: u64 = 100_000;

/// `{ name, freq, n_words }` record of one language.
///
/// `n_words[k]` is the total count of grams of length `k + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub name: String,
    #[serde(default)]
    pub freq: HashMap<String, u64>,
    #[serde(default)]
    pub n_words: Vec<u64>,
}

impl LanguageProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            freq: HashMap::new(),
            n_words: vec![0; N_GRAM],
        }
    }

    /// Count every whitespace-separated token of `text` as one gram of its own
    /// length. Convenient for hand-built profiles of single characters.
    pub fn from_tokens(name: impl Into<String>, text: &str) -> Self {
        let mut profile = Self::new(name);
        for token in text.split_whitespace() {
            let len = token.chars().count();
            *profile.freq.entry(token.to_owned()).or_default() += 1;
            if (1..=N_GRAM).contains(&len) {
                profile.n_words[len - 1] += 1;
            }
        }
        profile
    }

    /// Pad `n_words` to one slot per gram length.
    pub fn validated(mut self) -> Self {
        if self.n_words.len() < N_GRAM {
            self.n_words.resize(N_GRAM, 0);
        }
        self
    }

    /// Token count for grams of `len` characters.
    #[inline]
    pub fn n_words_for(&self, len: usize) -> u64 {
        len.checked_sub(1)
            .and_then(|idx| self.n_words.get(idx))
            .copied()
            .unwrap_or(0)
    }

    fn discount(&mut self, gram: &str, count: u64) {
        let len = gram.chars().count();
        if !(1..=N_GRAM).contains(&len) {
            return;
        }
        if let Some(total) = self.n_words.get_mut(len - 1) {
            *total = total.saturating_sub(count);
        }
    }

    /// Drop noise grams and, for languages written in a non-Latin script,
    /// incidental Latin grams.
    ///
    /// A gram is noise when its count does not exceed
    /// `max(n_words[0] / 100000, 2)`. If the surviving single Roman letters
    /// make up less than a third of the remaining unigram mass, every gram
    /// containing a Roman letter is dropped as well. Token counts are reduced
    /// by the count of every removed gram. Unnamed profiles are returned as is.
    pub fn omit_less_freq(self) -> Self {
        if self.name.is_empty() {
            return self;
        }
        let mut profile = self.validated();
        let threshold = (profile.n_words[0] / LESS_FREQ_RATIO).max(MINIMUM_FREQ);

        let freq = std::mem::take(&mut profile.freq);
        let mut kept = HashMap::with_capacity(freq.len());
        let mut roman = 0u64;
        for (gram, count) in freq {
            if count <= threshold {
                profile.discount(&gram, count);
                continue;
            }
            if is_single_roman(&gram) {
                roman += count;
            }
            kept.insert(gram, count);
        }

        if roman < profile.n_words[0] / 3 {
            let latin: Vec<(String, u64)> = kept
                .iter()
                .filter(|(gram, _)| contains_roman(gram))
                .map(|(gram, &count)| (gram.clone(), count))
                .collect();
            for (gram, count) in latin {
                kept.remove(&gram);
                profile.discount(&gram, count);
            }
        }

        profile.freq = kept;
        profile
    }
}

#[inline]
fn is_single_roman(gram: &str) -> bool {
    let mut chars = gram.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if is_roman(c))
}
