//! Oracle-assisted slide-to-paragraph assignment.
//!
//! Each slide is judged against its candidate shortlist from the vector
//! similarity service. The oracle's answer is validated against the current
//! paragraph set; anything invalid, missing, or failed degrades to the
//! top-scored valid shortlist candidate.

use lectura_core::{
    Assignment, CandidateContext, Oracle, Paragraph, ParagraphId, SlideCandidate,
    SlideDescription, SlideJudgementRequest, SlideMatchSet,
};
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

/// Number of slides judged per oracle request.
pub const BATCH_SIZE: usize = 5;

/// Characters of candidate paragraph text surfaced in the prompt.
const PREVIEW_CHARS: usize = 200;

/// Assign every slide in `matches` to a paragraph.
///
/// Slides are processed in page order, five per oracle request, with no
/// overlap between batches. Answers naming a paragraph id that does not
/// survive restructuring fall back to the top-scored valid candidate in the
/// slide's shortlist; a shortlist with no valid candidate falls back to the
/// smallest valid paragraph id. A failed batch falls back the same way for
/// every slide in it.
pub async fn assign_slides(
    oracle: &dyn Oracle,
    paragraphs: &[Paragraph],
    descriptions: &[SlideDescription],
    matches: &[SlideMatchSet],
) -> Assignment {
    let text_of: HashMap<ParagraphId, &str> =
        paragraphs.iter().map(|p| (p.id, p.text.as_str())).collect();
    let valid_ids: BTreeSet<ParagraphId> = paragraphs.iter().map(|p| p.id).collect();

    let description_of: HashMap<&str, &str> = descriptions
        .iter()
        .map(|d| (d.slide_file.as_str(), d.description.as_str()))
        .collect();
    let candidates_of: HashMap<&str, &[SlideCandidate]> = matches
        .iter()
        .map(|m| (m.slide_file.as_str(), m.results.as_slice()))
        .collect();

    let mut slide_files: Vec<&str> = candidates_of.keys().copied().collect();
    slide_files.sort_unstable();

    let mut assignments = Assignment::new();

    for batch in slide_files.chunks(BATCH_SIZE) {
        let requests: Vec<SlideJudgementRequest> = batch
            .iter()
            .map(|slide_file| {
                build_request(slide_file, &description_of, &candidates_of, &text_of)
            })
            .collect();

        match oracle.judge_assignment(&requests).await {
            Ok(judgements) => {
                let judged: HashMap<&str, ParagraphId> = judgements
                    .iter()
                    .map(|j| (j.slide_file.as_str(), j.paragraph_id))
                    .collect();
                for slide_file in batch {
                    let chosen = match judged.get(slide_file) {
                        Some(&id) if valid_ids.contains(&id) => Some(id),
                        _ => fallback_assignment(slide_file, &candidates_of, &valid_ids),
                    };
                    if let Some(id) = chosen {
                        assignments.insert((*slide_file).to_string(), id);
                    }
                }
            }
            Err(err) => {
                warn!("assignment judgement failed for batch, using vector fallback: {err}");
                for slide_file in batch {
                    if let Some(id) = fallback_assignment(slide_file, &candidates_of, &valid_ids)
                    {
                        assignments.insert((*slide_file).to_string(), id);
                    }
                }
            }
        }
    }

    assignments
}

/// Build the judgement context for one slide.
fn build_request(
    slide_file: &str,
    description_of: &HashMap<&str, &str>,
    candidates_of: &HashMap<&str, &[SlideCandidate]>,
    text_of: &HashMap<ParagraphId, &str>,
) -> SlideJudgementRequest {
    let candidates = candidates_of
        .get(slide_file)
        .copied()
        .unwrap_or_default()
        .iter()
        .map(|candidate| CandidateContext {
            paragraph_id: candidate.paragraph_id,
            score: candidate.score,
            preview: text_of
                .get(&candidate.paragraph_id)
                .map_or_else(|| "?".to_string(), |text| preview(text, PREVIEW_CHARS)),
        })
        .collect();

    SlideJudgementRequest {
        slide_file: slide_file.to_string(),
        description: description_of
            .get(slide_file)
            .copied()
            .unwrap_or_default()
            .to_string(),
        candidates,
    }
}

/// Highest-scoring valid shortlist candidate, then smallest valid id.
///
/// Returns `None` only when no valid paragraph exists at all.
fn fallback_assignment(
    slide_file: &str,
    candidates_of: &HashMap<&str, &[SlideCandidate]>,
    valid_ids: &BTreeSet<ParagraphId>,
) -> Option<ParagraphId> {
    let mut best_score = -1.0_f64;
    let mut best_id = None;

    for candidate in candidates_of.get(slide_file).copied().unwrap_or_default() {
        if valid_ids.contains(&candidate.paragraph_id) && candidate.score > best_score {
            best_score = candidate.score;
            best_id = Some(candidate.paragraph_id);
        }
    }

    best_id.or_else(|| valid_ids.iter().next().copied())
}

/// Char-safe prefix of a paragraph text.
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((i, _)) => text[..i].to_string(),
        None => text.to_string(),
    }
}
