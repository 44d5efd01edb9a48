//! Exact-match similarity score lookup.

use crate::types::{ParagraphId, SlideMatchSet};
use std::collections::HashMap;

/// Lookup table `(slide_file, paragraph_id) -> similarity score`.
///
/// Built once from the precomputed shortlists and shared by assignment
/// fallback, order enforcement, and output assembly. A missing entry is
/// never an error; it reads as `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScoreLookup {
    scores: HashMap<String, HashMap<ParagraphId, f64>>,
}

impl ScoreLookup {
    /// Build the lookup from the similarity service shortlists.
    #[must_use = "builds a score lookup that should be queried"]
    pub fn new(matches: &[SlideMatchSet]) -> Self {
        let mut scores: HashMap<String, HashMap<ParagraphId, f64>> = HashMap::new();
        for match_set in matches {
            let per_slide = scores.entry(match_set.slide_file.clone()).or_default();
            for candidate in &match_set.results {
                per_slide.insert(candidate.paragraph_id, candidate.score);
            }
        }
        Self { scores }
    }

    /// Score recorded for a (slide, paragraph) pair, if any.
    #[must_use = "returns the recorded score"]
    pub fn get(&self, slide_file: &str, paragraph_id: ParagraphId) -> Option<f64> {
        self.scores
            .get(slide_file)
            .and_then(|per_slide| per_slide.get(&paragraph_id))
            .copied()
    }

    /// Score for a (slide, paragraph) pair, defaulting to `0.0` when absent.
    #[must_use = "returns the recorded score or zero"]
    pub fn get_or_zero(&self, slide_file: &str, paragraph_id: ParagraphId) -> f64 {
        self.get(slide_file, paragraph_id).unwrap_or(0.0)
    }
}
