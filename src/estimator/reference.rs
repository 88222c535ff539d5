//! `f64` estimator reading rows straight out of the shared registry.

use std::sync::Arc;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    detector::DetectError,
    estimator::{Backend, Estimator, NORMALIZE_EVERY, TrialParams, run_trials, trial_seeds},
    profile::ProfileRegistry,
};

#[derive(Debug, Clone)]
pub struct ReferenceEstimator {
    registry: Arc<ProfileRegistry>,
}

impl ReferenceEstimator {
    pub fn new(registry: Arc<ProfileRegistry>) -> Self {
        Self { registry }
    }

    fn run_trial(
        &self,
        trial: usize,
        features: &[String],
        prior: Option<&[f64]>,
        params: &TrialParams,
        seed: u64,
    ) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut prob = init_probability(prior, self.registry.lang_count());
        let alpha = params.alpha + rng.random::<f64>() * params.alpha_width;
        let weight = alpha / params.base_freq;

        let mut i = 0;
        let max = loop {
            let gram = &features[rng.random_range(0..features.len())];
            if let Some(row) = self.registry.row(gram) {
                for (p, &w) in prob.iter_mut().zip(row) {
                    *p *= weight + w;
                }
            }
            if i % NORMALIZE_EVERY == 0 {
                let max = normalize_prob(&mut prob);
                if max > params.convergence_threshold || i >= params.iteration_limit {
                    break max;
                }
            }
            i += 1;
        };

        tracing::trace!(trial, iterations = i, max, alpha, "reference trial finished");
        prob
    }
}

impl Estimator for ReferenceEstimator {
    fn backend(&self) -> Backend {
        Backend::Reference
    }

    fn estimate(
        &mut self,
        features: &[String],
        prior: Option<&[f64]>,
        params: &TrialParams,
        rng: &mut StdRng,
    ) -> Result<Vec<f64>, DetectError> {
        if features.is_empty() {
            return Err(DetectError::NoFeatures);
        }
        let seeds = trial_seeds(rng, params.n_trial);
        let trials = run_trials(&seeds, params.parallel, |trial, seed| {
            self.run_trial(trial, features, prior, params, seed)
        });

        let mut lang_prob = vec![0.0; self.registry.lang_count()];
        let n = params.n_trial as f64;
        for prob in &trials {
            for (acc, &p) in lang_prob.iter_mut().zip(prob) {
                *acc += p / n;
            }
        }
        Ok(lang_prob)
    }
}

/// Prior copy, or uniform when there is none.
pub(crate) fn init_probability(prior: Option<&[f64]>, lang_count: usize) -> Vec<f64> {
    match prior {
        Some(prior) => prior.to_vec(),
        None => vec![1.0 / lang_count as f64; lang_count],
    }
}

/// Scale `prob` to sum to 1 and return its largest entry.
pub(crate) fn normalize_prob(prob: &mut [f64]) -> f64 {
    let sum: f64 = prob.iter().sum();
    let mut max = 0.0;
    for p in prob.iter_mut() {
        *p /= sum;
        if *p > max {
            max = *p;
        }
    }
    max
}
