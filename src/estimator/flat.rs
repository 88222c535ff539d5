//! `f32` estimator over contiguous, detector-owned buffers.
//!
//! At construction the registry matrix is copied once into a row-major `f32`
//! buffer next to a feature-id buffer, an output buffer and a prior buffer.
//! Each estimate stages gram ids into the feature buffer, with grams missing
//! from the registry staged as [`UNKNOWN_GRAM`], runs [`detect_block`] and
//! copies the output back out. The buffers live until [`Estimator::release`]
//! or drop.

use std::{ops::Deref, sync::Arc};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    detector::DetectError,
    estimator::{Backend, Estimator, NORMALIZE_EVERY, TrialParams, run_trials, trial_seeds},
    ngram::N_GRAM,
    profile::ProfileRegistry,
};

/// Feature id of a gram the registry has no row for. Drawing it costs an
/// iteration but leaves the probabilities unchanged.
pub const UNKNOWN_GRAM: u32 = u32::MAX;

/// Buffers handed to the kernel.
#[derive(Debug)]
pub struct FlatBuffers {
    lang_count: usize,
    /// `gram_count * lang_count`, row-major by gram id.
    matrix: Vec<f32>,
    features: Vec<u32>,
    output: Vec<f32>,
    prior: Vec<f32>,
}

impl FlatBuffers {
    pub fn allocate(registry: &ProfileRegistry, max_text_length: usize) -> Self {
        let lang_count = registry.lang_count();
        let buffers = Self {
            lang_count,
            matrix: registry.matrix().iter().map(|&p| p as f32).collect(),
            features: Vec::with_capacity(max_text_length.saturating_mul(N_GRAM)),
            output: vec![0.0; lang_count],
            prior: vec![0.0; lang_count],
        };
        tracing::debug!(
            bytes = buffers.byte_size(),
            grams = registry.gram_count(),
            languages = lang_count,
            "allocated flat buffers"
        );
        buffers
    }

    #[inline]
    pub fn lang_count(&self) -> usize {
        self.lang_count
    }

    /// Reserved size of all four buffers.
    pub fn byte_size(&self) -> usize {
        self.matrix.capacity() * size_of::<f32>()
            + self.features.capacity() * size_of::<u32>()
            + (self.output.capacity() + self.prior.capacity()) * size_of::<f32>()
    }

    /// Gram ids currently staged. Empty between estimates.
    #[inline]
    pub fn staged_features(&self) -> &[u32] {
        &self.features
    }

    #[inline]
    pub fn feature_capacity(&self) -> usize {
        self.features.capacity()
    }
}

impl Drop for FlatBuffers {
    fn drop(&mut self) {
        tracing::debug!(bytes = self.byte_size(), "released flat buffers");
    }
}

/// Gram ids staged for one estimate. The buffer is emptied when the scope
/// ends, whichever way it ends.
struct FeatureScope<'a> {
    ids: &'a mut Vec<u32>,
}

impl<'a> FeatureScope<'a> {
    fn stage<I>(ids: &'a mut Vec<u32>, grams: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        ids.clear();
        ids.extend(grams);
        Self { ids }
    }
}

impl Deref for FeatureScope<'_> {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        self.ids
    }
}

impl Drop for FeatureScope<'_> {
    fn drop(&mut self) {
        self.ids.clear();
    }
}

#[derive(Debug)]
pub struct FlatEstimator {
    registry: Arc<ProfileRegistry>,
    buffers: Option<FlatBuffers>,
}

impl FlatEstimator {
    pub fn new(registry: Arc<ProfileRegistry>, max_text_length: usize) -> Self {
        let buffers = FlatBuffers::allocate(&registry, max_text_length);
        Self {
            registry,
            buffers: Some(buffers),
        }
    }

    /// `None` once released.
    #[inline]
    pub fn buffers(&self) -> Option<&FlatBuffers> {
        self.buffers.as_ref()
    }
}

impl Estimator for FlatEstimator {
    fn backend(&self) -> Backend {
        Backend::Flat
    }

    fn estimate(
        &mut self,
        features: &[String],
        prior: Option<&[f64]>,
        params: &TrialParams,
        rng: &mut StdRng,
    ) -> Result<Vec<f64>, DetectError> {
        let buffers = self.buffers.as_mut().ok_or(DetectError::Released)?;
        if features.is_empty() {
            return Err(DetectError::NoFeatures);
        }
        let registry = &self.registry;

        let ids = FeatureScope::stage(
            &mut buffers.features,
            features.iter().map(|gram| {
                registry
                    .row_index(gram)
                    .and_then(|idx| u32::try_from(idx).ok())
                    .unwrap_or(UNKNOWN_GRAM)
            }),
        );

        let prior = match prior {
            Some(prior) => {
                for (dst, &p) in buffers.prior.iter_mut().zip(prior) {
                    *dst = p as f32;
                }
                Some(&buffers.prior[..])
            }
            None => None,
        };

        buffers.output.fill(0.0);
        let seeds = trial_seeds(rng, params.n_trial);
        detect_block(&mut buffers.output, &ids, &buffers.matrix, prior, params, &seeds);

        Ok(buffers.output.iter().map(|&p| f64::from(p)).collect())
    }

    fn release(&mut self) {
        self.buffers.take();
    }

    fn is_released(&self) -> bool {
        self.buffers.is_none()
    }
}

/// Run one trial per seed over `ngrams` (row ids into `matrix`, or
/// [`UNKNOWN_GRAM`]) and add the trial average into `lang_prob`.
///
/// `matrix` is row-major with `lang_prob.len()` columns; `prior`, when given,
/// has one entry per column.
pub fn detect_block(
    lang_prob: &mut [f32],
    ngrams: &[u32],
    matrix: &[f32],
    prior: Option<&[f32]>,
    params: &TrialParams,
    seeds: &[u64],
) {
    if ngrams.is_empty() || seeds.is_empty() {
        return;
    }
    let lang_count = lang_prob.len();
    let trials = run_trials(seeds, params.parallel, |trial, seed| {
        run_trial(trial, ngrams, matrix, prior, lang_count, params, seed)
    });

    let n = seeds.len() as f32;
    for prob in &trials {
        for (acc, &p) in lang_prob.iter_mut().zip(prob) {
            *acc += p / n;
        }
    }
}

fn run_trial(
    trial: usize,
    ngrams: &[u32],
    matrix: &[f32],
    prior: Option<&[f32]>,
    lang_count: usize,
    params: &TrialParams,
    seed: u64,
) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut prob = vec![0.0; lang_count];
    init_probability(&mut prob, prior);
    let alpha = (params.alpha + rng.random::<f64>() * params.alpha_width) as f32;
    let weight = alpha / params.base_freq as f32;
    let threshold = params.convergence_threshold as f32;

    let mut i = 0;
    let max = loop {
        let id = ngrams[rng.random_range(0..ngrams.len())];
        if id != UNKNOWN_GRAM {
            let id = id as usize;
            let row = &matrix[id * lang_count..(id + 1) * lang_count];
            update_lang_prob(&mut prob, row, weight);
        }
        if i % NORMALIZE_EVERY == 0 {
            let max = normalize_prob(&mut prob);
            if max > threshold || i >= params.iteration_limit {
                break max;
            }
        }
        i += 1;
    };

    tracing::trace!(trial, iterations = i, max, alpha, "flat trial finished");
    prob
}

#[inline]
fn init_probability(prob: &mut [f32], prior: Option<&[f32]>) {
    match prior {
        Some(prior) => prob.copy_from_slice(prior),
        None => prob.fill(1.0 / prob.len() as f32),
    }
}

#[inline]
fn update_lang_prob(prob: &mut [f32], row: &[f32], weight: f32) {
    for (p, &w) in prob.iter_mut().zip(row) {
        *p *= weight + w;
    }
}

#[inline]
fn normalize_prob(prob: &mut [f32]) -> f32 {
    let sum: f32 = prob.iter().sum();
    let mut max = 0.0;
    for p in prob.iter_mut() {
        *p /= sum;
        if *p > max {
            max = *p;
        }
    }
    max
}
