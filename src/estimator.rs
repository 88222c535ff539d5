//! Randomized language-probability estimation.
//!
//! Each trial starts from the prior (or a uniform vector), draws a jittered
//! smoothing constant, then repeatedly samples one feature gram and multiplies
//! every language's probability by that gram's smoothed likelihood. The
//! vector is renormalized every fifth iteration; a trial stops when one
//! language passes the convergence threshold or the iteration cap is hit. The
//! result is the average of all trials.
//!
//! Two interchangeable backends implement the loop:
//!
//! - [`Backend::Reference`]: `f64` arithmetic straight over the registry rows.
//! - [`Backend::Flat`]: an `f32` kernel over contiguous buffers allocated once
//!   per detector, the layout a native or SIMD kernel expects.
//!
//! Both draw their random numbers in the same order from the same per-trial
//! seeds, so for one seed they sample the same grams.

pub mod flat;
pub mod reference;

pub use flat::{FlatBuffers, FlatEstimator, UNKNOWN_GRAM};
pub use reference::ReferenceEstimator;

use std::{fmt, sync::Arc};

use rand::{Rng, rngs::StdRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{config::DetectorConfig, detector::DetectError, profile::ProfileRegistry};

/// Renormalization cadence of the trial loop.
pub const NORMALIZE_EVERY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Pure-Rust `f64` loop over the shared registry.
    #[default]
    Reference,
    /// `f32` kernel over detector-owned flat buffers.
    Flat,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Reference => write!(f, "reference (f64)"),
            Backend::Flat => write!(f, "flat (f32 buffers)"),
        }
    }
}

/// The subset of [`DetectorConfig`] the trial loop reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialParams {
    pub alpha: f64,
    pub alpha_width: f64,
    pub n_trial: usize,
    pub iteration_limit: usize,
    pub convergence_threshold: f64,
    pub base_freq: f64,
    pub parallel: bool,
}

impl From<&DetectorConfig> for TrialParams {
    fn from(config: &DetectorConfig) -> Self {
        Self {
            alpha: config.alpha,
            alpha_width: config.alpha_width,
            n_trial: config.n_trial,
            iteration_limit: config.iteration_limit,
            convergence_threshold: config.convergence_threshold,
            base_freq: config.base_freq,
            parallel: config.parallel_trials,
        }
    }
}

impl Default for TrialParams {
    fn default() -> Self {
        Self::from(&DetectorConfig::default())
    }
}

/// A scoring backend.
pub trait Estimator: Send {
    fn backend(&self) -> Backend;

    /// Average per-language probabilities over `params.n_trial` trials, in
    /// registry language order.
    ///
    /// `features` must be non-empty. A feature missing from the registry is
    /// still drawn, but the iteration leaves the probabilities unchanged.
    /// `prior`, when given, is aligned to the registry's language list and
    /// sums to 1.
    fn estimate(
        &mut self,
        features: &[String],
        prior: Option<&[f64]>,
        params: &TrialParams,
        rng: &mut StdRng,
    ) -> Result<Vec<f64>, DetectError>;

    /// Free backend-owned buffers. Later estimates fail with
    /// [`DetectError::Released`] on backends that own any.
    fn release(&mut self) {}

    fn is_released(&self) -> bool {
        false
    }
}

/// Construct the estimator for `backend`. Flat buffers are sized from the
/// registry here, once.
pub fn new_estimator(
    backend: Backend,
    registry: Arc<ProfileRegistry>,
    max_text_length: usize,
) -> Box<dyn Estimator> {
    match backend {
        Backend::Reference => Box::new(ReferenceEstimator::new(registry)),
        Backend::Flat => Box::new(FlatEstimator::new(registry, max_text_length)),
    }
}

/// One seed per trial, drawn up front so trial order does not matter.
pub(crate) fn trial_seeds(rng: &mut StdRng, n_trial: usize) -> Vec<u64> {
    (0..n_trial).map(|_| rng.random()).collect()
}

/// Run `trial` once per seed, on the rayon pool when `parallel`. Results come
/// back in seed order either way.
pub(crate) fn run_trials<T, F>(seeds: &[u64], parallel: bool, trial: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, u64) -> T + Sync + Send,
{
    if parallel {
        seeds
            .par_iter()
            .enumerate()
            .map(|(t, &seed)| trial(t, seed))
            .collect()
    } else {
        seeds
            .iter()
            .enumerate()
            .map(|(t, &seed)| trial(t, seed))
            .collect()
    }
}
