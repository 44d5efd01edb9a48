//! The curation pipeline entry point.

use crate::assemble::assemble_output;
use crate::assignment::assign_slides;
use crate::cohesion::analyze_cohesion;
use crate::order::enforce_monotonic_order;
use crate::restructure::apply_operations;
use lectura_core::{CuratedScript, Oracle, Paragraph, SlideDescription, SlideMatchSet};
use tracing::info;

/// Run the full curation pipeline.
///
/// Stages run strictly sequentially: cohesion analysis, restructuring,
/// slide assignment, monotonic order enforcement, output assembly. Oracle
/// failures never surface here; every stage degrades to its deterministic
/// fallback, so curation always yields a complete, monotonic script.
pub async fn curate(
    oracle: &dyn Oracle,
    paragraphs: Vec<Paragraph>,
    descriptions: &[SlideDescription],
    matches: &[SlideMatchSet],
) -> CuratedScript {
    // Upstream lectoring emits paragraphs with ids in reading order.
    let mut paragraphs = paragraphs;
    paragraphs.sort_by_key(|p| p.id);

    info!("analyzing cohesion of {} paragraphs", paragraphs.len());
    let operations = analyze_cohesion(oracle, &paragraphs).await;
    let restructured = apply_operations(&paragraphs, &operations);
    info!(
        "paragraphs: {} -> {} after cohesion analysis",
        paragraphs.len(),
        restructured.len()
    );

    info!("assigning {} slides to paragraphs", matches.len());
    let raw_assignments = assign_slides(oracle, &restructured, descriptions, matches).await;

    let final_assignments = enforce_monotonic_order(&raw_assignments, &restructured, matches);
    let reassigned = raw_assignments
        .iter()
        .filter(|&(slide, paragraph_id)| final_assignments.get(slide) != Some(paragraph_id))
        .count();
    info!("order enforcement reassigned {reassigned} slide(s)");

    assemble_output(&restructured, &final_assignments, matches)
}
