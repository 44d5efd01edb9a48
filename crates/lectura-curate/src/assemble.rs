//! Curated script assembly.

use lectura_core::{
    Assignment, CuratedParagraph, CuratedScript, CuratedSlide, Paragraph, ParagraphId,
    ScoreLookup, SlideMatchSet,
};
use std::collections::HashMap;

/// Invert the final assignment into the curated script.
///
/// For each paragraph in document order, `selected_slides` carries the
/// slides anchored there and `slide_candidates` every shortlisted-but-
/// unassigned slide, surfaced for downstream manual review. Slides within a
/// paragraph keep page order. `deleted_slides` is reserved for the manual
/// curation step and always empty here.
#[must_use = "returns the curated script"]
pub fn assemble_output(
    paragraphs: &[Paragraph],
    assignments: &Assignment,
    matches: &[SlideMatchSet],
) -> CuratedScript {
    // BTreeMap iteration keeps slides in page order per paragraph.
    let mut slides_of: HashMap<ParagraphId, Vec<&str>> = HashMap::new();
    for (slide_file, &paragraph_id) in assignments {
        slides_of
            .entry(paragraph_id)
            .or_default()
            .push(slide_file.as_str());
    }

    let scores = ScoreLookup::new(matches);

    let content = paragraphs
        .iter()
        .map(|paragraph| {
            let assigned = slides_of
                .get(&paragraph.id)
                .map_or(&[] as &[&str], Vec::as_slice);

            let selected_slides = assigned
                .iter()
                .map(|slide_file| CuratedSlide {
                    slide_file: (*slide_file).to_string(),
                    score: scores.get_or_zero(slide_file, paragraph.id),
                    selected: true,
                })
                .collect();

            let mut slide_candidates = Vec::new();
            for match_set in matches {
                for candidate in &match_set.results {
                    if candidate.paragraph_id == paragraph.id
                        && !assigned.contains(&match_set.slide_file.as_str())
                    {
                        slide_candidates.push(CuratedSlide {
                            slide_file: match_set.slide_file.clone(),
                            score: candidate.score,
                            selected: false,
                        });
                    }
                }
            }

            CuratedParagraph {
                id: paragraph.id,
                text: paragraph.text.clone(),
                slide_candidates,
                selected_slides,
            }
        })
        .collect();

    CuratedScript {
        content,
        deleted_slides: Vec::new(),
    }
}
