//! Thresholding and ordering of estimated probabilities.

use std::fmt;

use serde::Serialize;

/// Returned by [`crate::Detector::detect`] when no language clears the
/// probability threshold.
pub const UNKNOWN_LANG: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredLanguage {
    pub lang: String,
    pub prob: f64,
}

impl fmt::Display for ScoredLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lang, self.prob)
    }
}

/// Pair `prob` with `lang_list`, keep entries strictly above `threshold` and
/// order them by descending probability. Equal probabilities keep language
/// order.
pub fn rank(prob: &[f64], lang_list: &[String], threshold: f64) -> Vec<ScoredLanguage> {
    let mut ranked: Vec<ScoredLanguage> = lang_list
        .iter()
        .zip(prob)
        .filter(|&(_, &p)| p > threshold)
        .map(|(lang, &prob)| ScoredLanguage {
            lang: lang.clone(),
            prob,
        })
        .collect();
    ranked.sort_by(|a, b| b.prob.total_cmp(&a.prob));
    ranked
}

/// Name of the top entry, or [`UNKNOWN_LANG`].
#[inline]
pub fn best(ranked: &[ScoredLanguage]) -> &str {
    ranked.first().map_or(UNKNOWN_LANG, |s| s.lang.as_str())
}
