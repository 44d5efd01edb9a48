//! Paragraph cohesion analysis.
//!
//! Paragraphs that cover multiple distinct topics are split; adjacent
//! paragraphs on the same topic are merged. The oracle judges one window of
//! paragraphs at a time; windows overlap so it sees enough surrounding
//! context to place topic boundaries correctly at window edges.

use lectura_core::{CohesionOperation, Oracle, Paragraph, ParagraphId};
use std::collections::HashSet;
use tracing::warn;

/// Number of paragraphs the oracle judges per request.
pub const WINDOW_SIZE: usize = 8;

/// Number of trailing paragraphs repeated in the next window.
pub const WINDOW_OVERLAP: usize = 2;

/// Ask the oracle for split/merge/keep operations covering every paragraph.
///
/// Windows are processed sequentially in document order. Operations from an
/// overlapping window that touch an already-resolved id are discarded
/// (first-seen-wins), so each id resolves exactly once. A failed window
/// degrades to keeps for its unresolved ids, and a final pass keeps any id
/// the oracle never mentioned: the result always covers every input id
/// exactly once.
pub async fn analyze_cohesion(
    oracle: &dyn Oracle,
    paragraphs: &[Paragraph],
) -> Vec<CohesionOperation> {
    let mut operations = Vec::new();
    let mut seen: HashSet<ParagraphId> = HashSet::new();

    for window in create_windows(paragraphs, WINDOW_SIZE, WINDOW_OVERLAP) {
        match oracle.judge_cohesion(window).await {
            Ok(judged) => {
                for operation in judged {
                    let ids = operation.touched_ids();
                    if ids.iter().any(|id| seen.contains(id)) {
                        continue;
                    }
                    seen.extend(ids);
                    operations.push(operation);
                }
            }
            Err(err) => {
                warn!("cohesion judgement failed for window, keeping paragraphs unchanged: {err}");
                for paragraph in window {
                    if seen.insert(paragraph.id) {
                        operations.push(CohesionOperation::Keep { id: paragraph.id });
                    }
                }
            }
        }
    }

    // Coverage guarantee: the oracle may return partial results.
    for paragraph in paragraphs {
        if seen.insert(paragraph.id) {
            operations.push(CohesionOperation::Keep { id: paragraph.id });
        }
    }

    operations
}

/// Cut the paragraph sequence into overlapping windows.
fn create_windows(paragraphs: &[Paragraph], size: usize, overlap: usize) -> Vec<&[Paragraph]> {
    let mut windows = Vec::new();
    let step = size - overlap;
    let mut start = 0;
    while start < paragraphs.len() {
        let end = usize::min(start + size, paragraphs.len());
        windows.push(&paragraphs[start..end]);
        if start + size >= paragraphs.len() {
            break;
        }
        start += step;
    }
    windows
}
