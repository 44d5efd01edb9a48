//! Curation pipeline for lecture scripts.
//!
//! Aligns two independently produced descriptions of the same lecture (a
//! cleaned paragraph transcript and a set of slide descriptions) into one
//! linear document where every slide is anchored at the textually correct
//! paragraph, preserving reading order.
//!
//! # Stages
//!
//! ```text
//! paragraphs ──► cohesion analysis ──► restructuring ─┐
//!                 (oracle, windowed)    (pure)        │
//!                                                     ▼
//! slide matches ───────────────► slide assignment ──► order enforcement ──► assembly
//! slide descriptions             (oracle, batched)    (pure, LNDS)          (pure)
//! ```
//!
//! The oracle stages are judgement calls against a chat model and degrade
//! to deterministic fallbacks on any failure; the algorithmic stages repair
//! whatever the judgements got wrong. The pipeline therefore always
//! terminates with a complete, monotonic curated script.
//!
//! # Example
//!
//! ```no_run
//! use lectura_curate::curate;
//! # async fn example(
//! #     oracle: &dyn lectura_core::Oracle,
//! #     paragraphs: Vec<lectura_core::Paragraph>,
//! #     descriptions: Vec<lectura_core::SlideDescription>,
//! #     matches: Vec<lectura_core::SlideMatchSet>,
//! # ) {
//! let script = curate(oracle, paragraphs, &descriptions, &matches).await;
//! println!("curated {} paragraphs", script.content.len());
//! # }
//! ```

pub mod assemble;
pub mod assignment;
pub mod cohesion;
pub mod order;
pub mod pipeline;
pub mod restructure;

pub use assemble::assemble_output;
pub use assignment::assign_slides;
pub use cohesion::analyze_cohesion;
pub use order::enforce_monotonic_order;
pub use pipeline::curate;
pub use restructure::apply_operations;
