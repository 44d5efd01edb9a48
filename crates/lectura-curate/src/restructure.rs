//! Applying cohesion operations to the paragraph sequence.

use lectura_core::{CohesionOperation, Paragraph, ParagraphId};
use std::collections::{HashMap, HashSet};

/// Apply split/merge operations to produce the restructured sequence.
///
/// Deterministic and pure. Paragraphs are walked in document order: the
/// later half of a merge is absorbed into the earlier one (texts joined by
/// a blank line), a split emits two paragraphs with the second half under a
/// freshly minted id, everything else passes through unchanged. Operations
/// referencing unknown ids are ignored; a split whose halves are not both
/// non-empty degrades to a keep. When the same id is targeted by both a
/// merge and a split, the merge wins.
///
/// The output order of surviving and created paragraphs is the document
/// order every later stage treats as ground truth for position.
#[must_use = "returns the restructured paragraph sequence"]
pub fn apply_operations(
    paragraphs: &[Paragraph],
    operations: &[CohesionOperation],
) -> Vec<Paragraph> {
    let position: HashMap<ParagraphId, usize> = paragraphs
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.id, idx))
        .collect();
    let text_of: HashMap<ParagraphId, &str> =
        paragraphs.iter().map(|p| (p.id, p.text.as_str())).collect();

    let mut next_id = paragraphs.iter().map(|p| p.id).max().map_or(1, |m| m + 1);

    // Index operations by the paragraph they act on.
    let mut splits: HashMap<ParagraphId, (&str, &str)> = HashMap::new();
    let mut merges: HashMap<ParagraphId, ParagraphId> = HashMap::new();
    let mut absorbed: HashSet<ParagraphId> = HashSet::new();

    for operation in operations {
        match operation {
            CohesionOperation::Keep { .. } => {}
            CohesionOperation::Split { id, first, second } => {
                if position.contains_key(id) {
                    splits.insert(*id, (first.as_str(), second.as_str()));
                }
            }
            CohesionOperation::Merge { ids } => {
                let (Some(&pos_a), Some(&pos_b)) = (position.get(&ids[0]), position.get(&ids[1]))
                else {
                    continue;
                };
                let (earlier, later) = if pos_a <= pos_b {
                    (ids[0], ids[1])
                } else {
                    (ids[1], ids[0])
                };
                merges.insert(earlier, later);
                absorbed.insert(later);
            }
        }
    }

    let mut result = Vec::with_capacity(paragraphs.len());
    for paragraph in paragraphs {
        if absorbed.contains(&paragraph.id) {
            continue;
        }

        if let Some(later_text) = merges
            .get(&paragraph.id)
            .and_then(|later| text_of.get(later))
        {
            result.push(Paragraph {
                id: paragraph.id,
                text: format!("{}\n\n{}", paragraph.text, later_text),
            });
        } else if let Some(&(first, second)) = splits.get(&paragraph.id) {
            if first.is_empty() || second.is_empty() {
                result.push(paragraph.clone());
            } else {
                result.push(Paragraph {
                    id: paragraph.id,
                    text: first.to_string(),
                });
                result.push(Paragraph {
                    id: next_id,
                    text: second.to_string(),
                });
                next_id += 1;
            }
        } else {
            result.push(paragraph.clone());
        }
    }

    result
}
