//! Core data model and oracle contract for lecture script curation.
//!
//! This crate defines the shared vocabulary of the curation pipeline:
//!
//! - [`Paragraph`], [`CohesionOperation`] - the transcript and its repair
//!   instructions
//! - [`SlideMatchSet`], [`SlideDescription`] - precomputed inputs from the
//!   similarity service and the slide interpreter
//! - [`Assignment`], [`CuratedScript`] - the pipeline's intermediate and
//!   terminal artifacts
//! - [`ScoreLookup`] - the exact-match `(slide, paragraph) -> score` table
//! - [`Oracle`] - the capability interface for the judgement service
//!
//! Pipeline logic lives in `lectura-curate`; the live oracle binding lives
//! in `lectura-oracle`. Both depend on this crate, never on each other.

pub mod error;
pub mod oracle;
pub mod score;
pub mod types;

pub use error::{OracleError, Result};
pub use oracle::{CandidateContext, Oracle, SlideJudgement, SlideJudgementRequest};
pub use score::ScoreLookup;
pub use types::{
    Assignment, CohesionOperation, CuratedParagraph, CuratedScript, CuratedSlide, Paragraph,
    ParagraphId, SlideCandidate, SlideDescription, SlideMatchSet,
};
