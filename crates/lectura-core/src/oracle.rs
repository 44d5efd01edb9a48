//! Capability interface for the judgement oracle.
//!
//! The pipeline depends only on this trait and its fallback contract; any
//! text-generation backend can sit behind it. Answers are best-effort:
//! implementations must convert malformed model output into
//! [`OracleError::Parse`](crate::error::OracleError::Parse) rather than
//! propagate decoding internals, and callers recover from every error
//! variant with a deterministic fallback.

use crate::error::Result;
use crate::types::{CohesionOperation, Paragraph, ParagraphId};
use async_trait::async_trait;

/// One candidate rendered for the assignment judgement prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateContext {
    /// Candidate paragraph id.
    pub paragraph_id: ParagraphId,
    /// Vector similarity score.
    pub score: f64,
    /// Short preview of the candidate paragraph's current text.
    pub preview: String,
}

/// Everything the oracle sees about one slide in an assignment batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideJudgementRequest {
    /// Slide file name.
    pub slide_file: String,
    /// Natural-language description of the slide.
    pub description: String,
    /// Shortlisted candidate paragraphs with previews and scores.
    pub candidates: Vec<CandidateContext>,
}

/// The oracle's verdict for one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideJudgement {
    /// Slide the verdict is for.
    pub slide_file: String,
    /// Chosen paragraph id; validated by the caller, not trusted.
    pub paragraph_id: ParagraphId,
}

/// External judgement service invoked with a bounded context window.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Judge topic cohesion for one window of paragraphs.
    ///
    /// Returns split/merge/keep operations for ids within the window. The
    /// result need not cover every id; the caller fills gaps with keeps.
    ///
    /// # Errors
    /// Returns an error when the request fails or the response cannot be
    /// decoded; the caller degrades the whole window to keeps.
    async fn judge_cohesion(&self, window: &[Paragraph]) -> Result<Vec<CohesionOperation>>;

    /// Pick the best-matching paragraph for each slide in a batch.
    ///
    /// The oracle may answer with any paragraph id, not only shortlisted
    /// ones; the caller validates each answer against the current paragraph
    /// set and falls back per slide.
    ///
    /// # Errors
    /// Returns an error when the request fails or the response cannot be
    /// decoded; the caller falls back for every slide in the batch.
    async fn judge_assignment(
        &self,
        slides: &[SlideJudgementRequest],
    ) -> Result<Vec<SlideJudgement>>;
}
