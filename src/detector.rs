//! The per-caller detection handle.
//!
//! A [`Detector`] owns its accumulated text, its prior and its random source;
//! the [`ProfileRegistry`] behind it is shared and never written to.

use std::{
    borrow::{Borrow, Cow},
    collections::HashMap,
    hash::{BuildHasher, Hash},
    sync::Arc,
};

use rand::{SeedableRng, rngs::StdRng};
use thiserror::Error;

use crate::{
    LangIdError,
    config::DetectorConfig,
    estimator::{Backend, Estimator, TrialParams, new_estimator},
    ngram::extract_ngrams,
    pipeline::{Pipeline, preprocess_pipeline},
    profile::{LanguageProfile, ProfileRegistry},
    rank::{ScoredLanguage, best, rank},
};

#[derive(Debug, Error, PartialEq)]
pub enum PriorError {
    #[error("prior weight for `{lang}` must be a finite non-negative number, got {weight}")]
    Negative { lang: String, weight: f64 },
    #[error("at least one non-zero prior weight is required")]
    AllZero,
}

#[derive(Debug, Error, PartialEq)]
pub enum DetectError {
    #[error("no features in text")]
    NoFeatures,
    #[error("detector buffers have been released")]
    Released,
    #[error("invalid prior: {0}")]
    Prior(#[from] PriorError),
}

/// Accumulates text and scores it against a shared registry.
pub struct Detector {
    registry: Arc<ProfileRegistry>,
    config: DetectorConfig,
    pipeline: Pipeline,
    text: String,
    /// Normalized, aligned to `registry.lang_list()`.
    prior: Option<Vec<f64>>,
    /// Cleared by anything that changes the estimate's inputs.
    lang_prob: Option<Vec<f64>>,
    estimator: Box<dyn Estimator>,
    rng: StdRng,
}

impl Detector {
    pub fn new(registry: Arc<ProfileRegistry>) -> Self {
        Self::builder(registry).build()
    }

    pub fn builder(registry: impl Into<Arc<ProfileRegistry>>) -> DetectorBuilder {
        DetectorBuilder::new(registry.into())
    }

    /// Preprocess `text` and add it to the buffer. Each call keeps at most
    /// `max_text_length` characters of its own input.
    pub fn append(&mut self, text: &str) {
        let processed = self.pipeline.process(Cow::Borrowed(text));
        self.text.push_str(&processed);
        self.lang_prob = None;
    }

    /// Best language of the buffered text, or [`crate::UNKNOWN_LANG`].
    pub fn detect(&mut self) -> Result<String, DetectError> {
        let ranked = self.probabilities()?;
        let lang = best(&ranked).to_owned();
        tracing::debug!(lang = %lang, candidates = ranked.len(), "detected language");
        Ok(lang)
    }

    /// Languages above the probability threshold, most probable first.
    ///
    /// The estimate is cached until the text, alpha or prior changes.
    pub fn probabilities(&mut self) -> Result<Vec<ScoredLanguage>, DetectError> {
        if self.estimator.is_released() {
            return Err(DetectError::Released);
        }
        let prob = match self.lang_prob.take() {
            Some(prob) => prob,
            None => self.estimate()?,
        };
        let ranked = rank(&prob, self.registry.lang_list(), self.config.prob_threshold);
        self.lang_prob = Some(prob);
        Ok(ranked)
    }

    fn estimate(&mut self) -> Result<Vec<f64>, DetectError> {
        let registry = &self.registry;
        let features = extract_ngrams(&self.text, |gram| registry.contains(gram));
        if features.is_empty() {
            return Err(DetectError::NoFeatures);
        }
        tracing::debug!(
            features = features.len(),
            backend = %self.estimator.backend(),
            "estimating language probabilities"
        );
        let params = TrialParams::from(&self.config);
        self.estimator
            .estimate(&features, self.prior.as_deref(), &params, &mut self.rng)
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.config.alpha = alpha;
        self.lang_prob = None;
    }

    /// Applies to later `append` calls only.
    pub fn set_max_text_length(&mut self, max_text_length: usize) {
        self.config.max_text_length = max_text_length;
        self.pipeline = preprocess_pipeline(max_text_length);
    }

    /// Bias detection towards the languages in `weights`.
    ///
    /// Registered languages missing from the map get weight 0; keys that name
    /// no registered language are ignored. On error the previous prior is
    /// kept.
    pub fn set_prior_map<K, S>(&mut self, weights: &HashMap<K, f64, S>) -> Result<(), PriorError>
    where
        K: Borrow<str> + Hash + Eq,
        S: BuildHasher,
    {
        let mut prior = Vec::with_capacity(self.registry.lang_count());
        let mut sum = 0.0;
        for lang in self.registry.lang_list() {
            let weight = weights.get(lang.as_str()).copied().unwrap_or(0.0);
            if !weight.is_finite() || weight < 0.0 {
                return Err(PriorError::Negative {
                    lang: lang.clone(),
                    weight,
                });
            }
            sum += weight;
            prior.push(weight);
        }
        if sum <= 0.0 {
            return Err(PriorError::AllZero);
        }
        for p in &mut prior {
            *p /= sum;
        }
        self.prior = Some(prior);
        self.lang_prob = None;
        Ok(())
    }

    pub fn clear_prior(&mut self) {
        self.prior = None;
        self.lang_prob = None;
    }

    /// Normalized prior, aligned to the registry's language list.
    #[inline]
    pub fn prior(&self) -> Option<&[f64]> {
        self.prior.as_deref()
    }

    /// The preprocessed text accumulated so far.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    #[inline]
    pub fn backend(&self) -> Backend {
        self.estimator.backend()
    }

    /// Free backend buffers ahead of drop. Idempotent.
    pub fn release(&mut self) {
        self.estimator.release();
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.estimator.is_released()
    }
}

pub struct DetectorBuilder {
    registry: Arc<ProfileRegistry>,
    config: DetectorConfig,
}

impl DetectorBuilder {
    pub fn new(registry: Arc<ProfileRegistry>) -> Self {
        Self {
            registry,
            config: DetectorConfig::default(),
        }
    }

    /// Replace every setting at once, e.g. with a preset.
    pub fn config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    pub fn alpha_width(mut self, alpha_width: f64) -> Self {
        self.config.alpha_width = alpha_width;
        self
    }

    pub fn n_trial(mut self, n_trial: usize) -> Self {
        self.config.n_trial = n_trial;
        self
    }

    pub fn iteration_limit(mut self, iteration_limit: usize) -> Self {
        self.config.iteration_limit = iteration_limit;
        self
    }

    pub fn prob_threshold(mut self, prob_threshold: f64) -> Self {
        self.config.prob_threshold = prob_threshold;
        self
    }

    pub fn max_text_length(mut self, max_text_length: usize) -> Self {
        self.config.max_text_length = max_text_length;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.config.backend = backend;
        self
    }

    pub fn parallel_trials(mut self, parallel: bool) -> Self {
        self.config.parallel_trials = parallel;
        self
    }

    pub fn build(self) -> Detector {
        let Self { registry, config } = self;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let estimator = new_estimator(config.backend, Arc::clone(&registry), config.max_text_length);
        tracing::debug!(
            backend = %config.backend,
            languages = registry.lang_count(),
            seeded = config.seed.is_some(),
            "created detector"
        );
        Detector {
            pipeline: preprocess_pipeline(config.max_text_length),
            registry,
            config,
            text: String::new(),
            prior: None,
            lang_prob: None,
            estimator,
            rng,
        }
    }
}

/// One-shot detection of `text` against `profiles` with default settings.
///
/// The registry and detector live only for this call; backend buffers are
/// released before it returns.
pub fn detect_language<I>(text: &str, profiles: I) -> Result<String, LangIdError>
where
    I: IntoIterator<Item = LanguageProfile>,
{
    let registry = ProfileRegistry::new(profiles)?;
    let mut detector = Detector::new(Arc::new(registry));
    detector.append(text);
    let lang = detector.detect();
    detector.release();
    lang.map_err(LangIdError::from)
}
