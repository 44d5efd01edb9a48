//! Monotonic order enforcement for slide assignments.
//!
//! Slide order (by file name, which encodes page order) must imply
//! non-decreasing paragraph position. The largest set of already-valid
//! assignments is found with a longest-non-decreasing-subsequence pass;
//! every slide outside it is reassigned into the position range left open
//! by its kept neighbors, using vector similarity scores as tiebreak.

use lectura_core::{Assignment, Paragraph, ParagraphId, ScoreLookup, SlideMatchSet};
use std::collections::{HashMap, HashSet};

/// Repair an assignment so paragraph positions never decrease in page order.
///
/// Slides on the longest non-decreasing subsequence keep their assignment;
/// violators are reassigned left to right, each time advancing the lower
/// bound to the position just chosen so repairs cannot regress earlier
/// choices. The result covers exactly the slides the input covered.
///
/// Enforcing an already-monotonic assignment returns it unchanged, so the
/// operation is idempotent.
#[must_use = "returns the repaired assignment"]
pub fn enforce_monotonic_order(
    assignments: &Assignment,
    paragraphs: &[Paragraph],
    matches: &[SlideMatchSet],
) -> Assignment {
    if assignments.is_empty() {
        return Assignment::new();
    }
    if paragraphs.is_empty() {
        // Nothing to reposition against.
        return assignments.clone();
    }

    let position_of: HashMap<ParagraphId, usize> = paragraphs
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.id, idx))
        .collect();
    let paragraph_ids: Vec<ParagraphId> = paragraphs.iter().map(|p| p.id).collect();

    // BTreeMap iteration is lexicographic, i.e. page order.
    let sorted_slides: Vec<&String> = assignments.keys().collect();
    let positions: Vec<usize> = sorted_slides
        .iter()
        .map(|slide| {
            position_of
                .get(&assignments[*slide])
                .copied()
                .unwrap_or(0)
        })
        .collect();

    let kept: HashSet<usize> = longest_non_decreasing_indices(&positions)
        .into_iter()
        .collect();

    let scores = ScoreLookup::new(matches);

    let mut repaired = Assignment::new();
    let mut prev_pos = 0;

    for (i, slide) in sorted_slides.iter().enumerate() {
        if kept.contains(&i) {
            repaired.insert((*slide).clone(), assignments[*slide]);
            prev_pos = positions[i];
        } else {
            let next_pos = (i + 1..sorted_slides.len())
                .find(|j| kept.contains(j))
                .map_or(paragraphs.len() - 1, |j| positions[j]);

            let best =
                find_best_candidate(slide.as_str(), prev_pos, next_pos, &paragraph_ids, &scores);
            prev_pos = position_of.get(&best).copied().unwrap_or(prev_pos);
            repaired.insert((*slide).clone(), best);
        }
    }

    repaired
}

/// Indices of a longest non-decreasing subsequence.
///
/// Patience sorting in O(n log n): `tails[k]` holds the smallest value any
/// non-decreasing subsequence of length `k + 1` can end with. The binary
/// search is right-biased so equal values extend a pile instead of
/// replacing its tail.
fn longest_non_decreasing_indices(seq: &[usize]) -> Vec<usize> {
    if seq.is_empty() {
        return Vec::new();
    }

    let mut tails: Vec<usize> = Vec::new();
    let mut pile_last: Vec<usize> = Vec::new();
    let mut predecessors: Vec<Option<usize>> = vec![None; seq.len()];

    for (i, &value) in seq.iter().enumerate() {
        // First pile whose tail is strictly greater than `value`.
        let pos = tails.partition_point(|&tail| tail <= value);

        if pos == tails.len() {
            tails.push(value);
            pile_last.push(i);
        } else {
            tails[pos] = value;
            pile_last[pos] = i;
        }

        if pos > 0 {
            predecessors[i] = Some(pile_last[pos - 1]);
        }
    }

    let mut result = vec![0; tails.len()];
    let mut current = Some(pile_last[tails.len() - 1]);
    for slot in result.iter_mut().rev() {
        if let Some(idx) = current {
            *slot = idx;
            current = predecessors[idx];
        }
    }
    result
}

/// Best paragraph for a slide within an inclusive position range.
///
/// Picks the strictly highest recorded score; ties keep the first (lowest
/// position) maximum. Without any score data the range's leftmost paragraph
/// wins.
fn find_best_candidate(
    slide_file: &str,
    min_pos: usize,
    max_pos: usize,
    paragraph_ids: &[ParagraphId],
    scores: &ScoreLookup,
) -> ParagraphId {
    let mut best_score = -1.0_f64;
    let mut best = paragraph_ids[min_pos];

    for &paragraph_id in paragraph_ids
        .iter()
        .take(max_pos + 1)
        .skip(min_pos)
    {
        let score = scores.get_or_zero(slide_file, paragraph_id);
        if score > best_score {
            best_score = score;
            best = paragraph_id;
        }
    }

    best
}
