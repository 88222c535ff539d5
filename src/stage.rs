//! Text stages applied by [`crate::detector::Detector::append`] before any
//! n-gram extraction.
//!
//! Every stage follows the same allocation contract: `needs_apply` is a cheap
//! pre-check, and `apply` hands back the borrowed input untouched when it
//! finds nothing to change. A pipeline of clean text therefore never copies.

pub mod collapse_separators;
pub mod compose_vietnamese;
pub mod strip_urls;
pub mod truncate;

pub use collapse_separators::CollapseSeparators;
pub use compose_vietnamese::ComposeVietnamese;
pub use strip_urls::StripUrls;
pub use truncate::Truncate;

use std::borrow::Cow;

/// A single preprocessing step.
pub trait Stage: Send + Sync {
    /// Human-readable name, used in trace events.
    fn name(&self) -> &'static str;

    /// Fast pre-check. Returning `false` skips the whole stage.
    fn needs_apply(&self, text: &str) -> bool;

    /// Allocation-aware transformation. Never fails: text that cannot be
    /// improved comes back unchanged.
    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str>;
}
