//! The immutable gram → per-language probability matrix shared by every
//! detector.

use std::collections::{HashMap, HashSet};

use crate::{
    ngram::N_GRAM,
    profile::{LanguageProfile, ProfileError},
};

/// Word → per-language probability matrix plus the language order it is
/// indexed by.
///
/// Built once and never mutated, so it can sit behind an `Arc` and be read by
/// any number of detectors at the same time.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    lang_list: Vec<String>,
    /// gram → row index into `matrix`
    rows: HashMap<String, usize>,
    /// Row-major, `rows.len() * lang_list.len()` entries.
    matrix: Vec<f64>,
    profiles: Vec<LanguageProfile>,
}

impl ProfileRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Register `profiles` in order. Fails on the first duplicate name.
    pub fn new<I>(profiles: I) -> Result<Self, ProfileError>
    where
        I: IntoIterator<Item = LanguageProfile>,
    {
        profiles
            .into_iter()
            .try_fold(Self::builder(), RegistryBuilder::add_profile)
            .map(RegistryBuilder::build)
    }

    pub fn from_profile(profile: LanguageProfile) -> Result<Self, ProfileError> {
        Self::new([profile])
    }

    /// Language names in registration order; index `i` of every matrix row
    /// belongs to `lang_list()[i]`.
    #[inline]
    pub fn lang_list(&self) -> &[String] {
        &self.lang_list
    }

    #[inline]
    pub fn lang_count(&self) -> usize {
        self.lang_list.len()
    }

    #[inline]
    pub fn gram_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn contains(&self, gram: &str) -> bool {
        self.rows.contains_key(gram)
    }

    #[inline]
    pub fn row_index(&self, gram: &str) -> Option<usize> {
        self.rows.get(gram).copied()
    }

    /// Per-language probabilities of `gram`.
    #[inline]
    pub fn row(&self, gram: &str) -> Option<&[f64]> {
        self.row_index(gram).map(|idx| self.row_at(idx))
    }

    #[inline]
    pub fn row_at(&self, idx: usize) -> &[f64] {
        let width = self.lang_list.len();
        &self.matrix[idx * width..(idx + 1) * width]
    }

    /// The whole matrix, row-major, rows in [`Self::row_index`] order.
    #[inline]
    pub fn matrix(&self) -> &[f64] {
        &self.matrix
    }

    /// The registered profiles after pruning.
    #[inline]
    pub fn profiles(&self) -> &[LanguageProfile] {
        &self.profiles
    }

    pub fn lang_index(&self, lang: &str) -> Option<usize> {
        self.lang_list.iter().position(|l| l == lang)
    }
}

/// Collects profiles, rejecting duplicate names as they arrive. The matrix is
/// laid out in [`RegistryBuilder::build`], once the language count is known.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    profiles: Vec<LanguageProfile>,
    names: HashSet<String>,
}

impl RegistryBuilder {
    pub fn add_profile(mut self, profile: LanguageProfile) -> Result<Self, ProfileError> {
        let profile = profile.validated();
        if !self.names.insert(profile.name.clone()) {
            return Err(ProfileError::DuplicateLanguage(profile.name));
        }
        self.profiles.push(profile);
        Ok(self)
    }

    pub fn build(self) -> ProfileRegistry {
        let width = self.profiles.len();
        if width == 0 {
            tracing::warn!("building a language registry without profiles");
        }

        let mut rows: HashMap<String, usize> = HashMap::new();
        let mut matrix: Vec<f64> = Vec::new();
        let mut lang_list = Vec::with_capacity(width);
        let mut pruned = Vec::with_capacity(width);

        for (index, profile) in self.profiles.into_iter().enumerate() {
            for (gram, &count) in &profile.freq {
                let len = gram.chars().count();
                if !(1..=N_GRAM).contains(&len) {
                    continue;
                }
                let row = *rows.entry(gram.clone()).or_insert_with(|| {
                    matrix.resize(matrix.len() + width, 0.0);
                    matrix.len() / width - 1
                });
                let total = profile.n_words_for(len);
                matrix[row * width + index] = if total == 0 {
                    tracing::warn!(
                        lang = %profile.name,
                        gram = %gram,
                        "zero token count for gram length, probability set to 0"
                    );
                    0.0
                } else {
                    count as f64 / total as f64
                };
            }
            lang_list.push(profile.name.clone());
            pruned.push(profile.omit_less_freq());
        }

        tracing::debug!(
            languages = lang_list.len(),
            grams = rows.len(),
            "built language registry"
        );

        ProfileRegistry {
            lang_list,
            rows,
            matrix,
            profiles: pruned,
        }
    }
}
