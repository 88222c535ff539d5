//! Randomized n-gram language identification.
//!
//! Text is cleaned by a small [`pipeline`] of stages, folded character by
//! character into detection symbols ([`unicode`]), cut into 1- to 3-grams
//! ([`ngram`]) and scored against a shared [`ProfileRegistry`] by a Monte
//! Carlo [`estimator`].
//!
//! The CJK ideograph folding table that ships with the crate is partial: a
//! seed of ten symbol classes. Callers that score Chinese or Japanese against
//! full profiles should install the complete class table with
//! [`cjk::install_classes`] before the first detection.
//!
//! ```ignore
//! use std::sync::Arc;
//! use ngram_langid::{Detector, LanguageProfile, ProfileRegistry};
//!
//! let registry = Arc::new(ProfileRegistry::new(profiles)?);
//! let mut detector = Detector::builder(registry).seed(42).build();
//! detector.append("Ceci n'est pas une pipe.");
//! assert_eq!(detector.detect()?, "fr");
//! ```

pub mod cjk;
pub mod config;
pub mod data;
pub mod detector;
pub mod estimator;
pub mod ngram;
pub mod pipeline;
pub mod profile;
pub mod rank;
pub mod stage;
pub mod unicode;

#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;

pub use cjk::CjkTableError;
pub use config::{ACCELERATED_CONFIG, DEFAULT_CONFIG, DetectorConfig, FAST_CONFIG};
pub use detector::{DetectError, Detector, DetectorBuilder, PriorError, detect_language};
pub use estimator::Backend;
pub use profile::{LanguageProfile, ProfileError, ProfileRegistry};
pub use rank::{ScoredLanguage, UNKNOWN_LANG};

#[derive(Debug, Error)]
pub enum LangIdError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Detect(#[from] DetectError),
    #[error(transparent)]
    Prior(#[from] PriorError),
    #[error(transparent)]
    CjkTable(#[from] CjkTableError),
}
