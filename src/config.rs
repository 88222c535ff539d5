// src/config.rs
//! Detector tuning knobs and the presets built from them.

use serde::{Deserialize, Serialize};

use crate::{estimator::Backend, pipeline::MAX_TEXT_LENGTH};

/// Every parameter of a detection run.
///
/// Deserializes from a partial record: missing fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Smoothing added to every gram probability, scaled by `base_freq`.
    pub alpha: f64,
    /// Each trial draws its alpha from `[alpha, alpha + alpha_width)`.
    pub alpha_width: f64,
    pub n_trial: usize,
    pub iteration_limit: usize,
    /// A trial stops once one language exceeds this probability.
    pub convergence_threshold: f64,
    pub base_freq: f64,
    /// Languages at or below this probability are not reported.
    pub prob_threshold: f64,
    /// Characters kept from each `append` call.
    pub max_text_length: usize,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub backend: Backend,
    /// Run the trials on the rayon pool.
    pub parallel_trials: bool,
}

pub const DEFAULT_CONFIG: DetectorConfig = DetectorConfig {
    alpha: 0.5,
    alpha_width: 0.05,
    n_trial: 7,
    iteration_limit: 1000,
    convergence_threshold: 0.99999,
    base_freq: 10_000.0,
    prob_threshold: 0.1,
    max_text_length: MAX_TEXT_LENGTH,
    seed: None,
    backend: Backend::Reference,
    parallel_trials: false,
};

/// Fewer, shorter trials for latency-bound callers.
pub const FAST_CONFIG: DetectorConfig = DetectorConfig {
    n_trial: 3,
    iteration_limit: 200,
    ..DEFAULT_CONFIG
};

/// Flat-buffer kernel with the trials spread over the rayon pool.
pub const ACCELERATED_CONFIG: DetectorConfig = DetectorConfig {
    backend: Backend::Flat,
    parallel_trials: true,
    ..DEFAULT_CONFIG
};

impl Default for DetectorConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}
