// src/pipeline.rs
use crate::stage::{CollapseSeparators, ComposeVietnamese, Stage, StripUrls, Truncate};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::sync::Arc;

/// Default cap on the characters kept from one `append` call.
pub const MAX_TEXT_LENGTH: usize = 10_000;

#[derive(Clone, Default)]
pub struct Pipeline {
    stages: SmallVec<[Arc<dyn Stage>; 4]>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<T: Stage + 'static>(mut self, stage: T) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|s| s.name())
    }

    pub fn process<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        let mut current = text;

        for stage in &self.stages {
            // Fast path: skip if no mutation needed
            if !stage.needs_apply(&current) {
                continue;
            }
            tracing::trace!(stage = stage.name(), "applying stage");
            current = stage.apply(current);
        }

        current
    }
}

/// The fixed preprocessing chain run by every `append`: strip links and
/// addresses, compose Vietnamese tone marks, cut to `max_text_length`
/// characters, then collapse separators and trim.
pub fn preprocess_pipeline(max_text_length: usize) -> Pipeline {
    Pipeline::new()
        .push(StripUrls)
        .push(ComposeVietnamese)
        .push(Truncate::new(max_text_length))
        .push(CollapseSeparators)
}
