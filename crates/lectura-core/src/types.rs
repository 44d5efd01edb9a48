//! Data model for the curation pipeline.
//!
//! The types here mirror the JSON contracts of the surrounding system: the
//! lectored paragraph transcript, the slide shortlists produced by the vector
//! similarity service, and the curated script consumed by the downstream
//! editor. Shortlist data may carry paragraph ids as either JSON numbers or
//! numeric strings; deserialization normalizes both into [`ParagraphId`] so
//! the duality never reaches pipeline logic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a transcript paragraph.
///
/// Ids are unique within a sequence but not necessarily contiguous after
/// restructuring. Reading order is defined by sequence position, never by
/// the numeric value.
pub type ParagraphId = u32;

/// Mapping `slide_file -> paragraph_id`.
///
/// Slide file names are zero-padded page numbers (e.g. `page_003.png`), so
/// the `BTreeMap` iteration order recovers page order whenever positional
/// reasoning is required.
pub type Assignment = BTreeMap<String, ParagraphId>;

/// A single transcript paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Unique paragraph id assigned by upstream lectoring.
    pub id: ParagraphId,
    /// Cleaned paragraph text.
    pub text: String,
}

/// A cohesion repair instruction for the paragraph sequence.
///
/// Produced by the cohesion analysis stage; applied by the restructurer.
/// Every input paragraph id is covered by exactly one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CohesionOperation {
    /// Leave the paragraph unchanged.
    Keep {
        /// Paragraph to keep.
        id: ParagraphId,
    },
    /// Cut one paragraph into two at a topic boundary.
    Split {
        /// Paragraph to split; retains its id and position for `first`.
        id: ParagraphId,
        /// Text of the first half.
        first: String,
        /// Text of the second half, emitted under a freshly minted id.
        second: String,
    },
    /// Join two paragraphs covering the same topic.
    ///
    /// Which of the pair is "earlier" is decided by document position when
    /// the operation is applied, not by the order of the ids here.
    Merge {
        /// The paragraph pair to join.
        ids: [ParagraphId; 2],
    },
}

impl CohesionOperation {
    /// Paragraph ids resolved by this operation.
    #[must_use = "returns the ids this operation resolves"]
    pub fn touched_ids(&self) -> Vec<ParagraphId> {
        match self {
            Self::Keep { id } | Self::Split { id, .. } => vec![*id],
            Self::Merge { ids } => ids.to_vec(),
        }
    }
}

/// One candidate paragraph for a slide, scored by the similarity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideCandidate {
    /// Candidate paragraph id; accepts numeric strings from upstream data.
    #[serde(deserialize_with = "deserialize_paragraph_id")]
    pub paragraph_id: ParagraphId,
    /// Vector similarity score.
    pub score: f64,
}

/// Shortlist of candidate paragraphs for one slide.
///
/// The order of `results` carries no meaning beyond being a shortlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideMatchSet {
    /// Slide file name (zero-padded page number).
    pub slide_file: String,
    /// Unordered candidate shortlist; duplicate scores are possible.
    pub results: Vec<SlideCandidate>,
}

/// Natural-language description of one slide image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDescription {
    /// Slide file name.
    pub slide_file: String,
    /// Description produced by the upstream slide interpreter.
    #[serde(default)]
    pub description: String,
}

/// A slide reference inside the curated script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedSlide {
    /// Slide file name.
    pub slide_file: String,
    /// Similarity score for this (slide, paragraph) pair; 0.0 when unknown.
    pub score: f64,
    /// Whether the slide is anchored at this paragraph.
    pub selected: bool,
}

/// A paragraph of the curated script with its slide anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedParagraph {
    /// Paragraph id after restructuring.
    pub id: ParagraphId,
    /// Paragraph text.
    pub text: String,
    /// Shortlisted but unassigned slides, surfaced for manual review.
    #[serde(rename = "slideCandidates")]
    pub slide_candidates: Vec<CuratedSlide>,
    /// Slides anchored at this paragraph.
    #[serde(rename = "selectedSlides")]
    pub selected_slides: Vec<CuratedSlide>,
}

/// Terminal artifact of the curation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedScript {
    /// Curated paragraphs in document order.
    pub content: Vec<CuratedParagraph>,
    /// Reserved for the downstream manual-curation step; always empty here.
    #[serde(rename = "deletedSlides")]
    pub deleted_slides: Vec<CuratedSlide>,
}

/// Deserialize a paragraph id that may arrive as a number or numeric string.
fn deserialize_paragraph_id<'de, D>(deserializer: D) -> Result<ParagraphId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| ParagraphId::try_from(v).ok())
            .ok_or_else(|| D::Error::custom(format!("paragraph id {n} out of range"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("paragraph id '{s}' is not numeric"))),
        _ => Err(D::Error::custom(
            "expected integer or numeric string for paragraph id",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_accepts_integer_paragraph_id() {
        let candidate: SlideCandidate =
            serde_json::from_str(r#"{"paragraph_id": 7, "score": 0.91}"#).unwrap();
        assert_eq!(candidate.paragraph_id, 7);
        assert_eq!(candidate.score, 0.91);
    }

    #[test]
    fn test_candidate_accepts_string_paragraph_id() {
        let candidate: SlideCandidate =
            serde_json::from_str(r#"{"paragraph_id": "12", "score": 0.5}"#).unwrap();
        assert_eq!(candidate.paragraph_id, 12);
    }

    #[test]
    fn test_candidate_rejects_non_numeric_paragraph_id() {
        let result = serde_json::from_str::<SlideCandidate>(
            r#"{"paragraph_id": "abstract", "score": 0.5}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_match_set_tolerates_extra_result_fields() {
        // The similarity service also stores the matched paragraph text;
        // the pipeline reads current paragraph text by id instead.
        let matches: SlideMatchSet = serde_json::from_str(
            r#"{
                "slide_file": "page_001.png",
                "results": [{"paragraph_id": "3", "text": "stale copy", "score": 0.8}]
            }"#,
        )
        .unwrap();
        assert_eq!(matches.results.len(), 1);
        assert_eq!(matches.results[0].paragraph_id, 3);
    }

    #[test]
    fn test_curated_script_field_names() {
        let script = CuratedScript {
            content: vec![CuratedParagraph {
                id: 1,
                text: "A".to_string(),
                slide_candidates: vec![],
                selected_slides: vec![CuratedSlide {
                    slide_file: "page_001.png".to_string(),
                    score: 0.9,
                    selected: true,
                }],
            }],
            deleted_slides: vec![],
        };

        let json = serde_json::to_value(&script).unwrap();
        assert!(json.get("deletedSlides").is_some());
        let paragraph = &json["content"][0];
        assert!(paragraph.get("slideCandidates").is_some());
        assert!(paragraph.get("selectedSlides").is_some());
        assert_eq!(paragraph["selectedSlides"][0]["selected"], true);
    }

    #[test]
    fn test_touched_ids() {
        let keep = CohesionOperation::Keep { id: 4 };
        assert_eq!(keep.touched_ids(), vec![4]);

        let split = CohesionOperation::Split {
            id: 2,
            first: "a".to_string(),
            second: "b".to_string(),
        };
        assert_eq!(split.touched_ids(), vec![2]);

        let merge = CohesionOperation::Merge { ids: [5, 6] };
        assert_eq!(merge.touched_ids(), vec![5, 6]);
    }

    #[test]
    fn test_assignment_iterates_in_page_order() {
        let mut assignment = Assignment::new();
        assignment.insert("page_010.png".to_string(), 3);
        assignment.insert("page_002.png".to_string(), 1);
        assignment.insert("page_005.png".to_string(), 2);

        let order: Vec<&str> = assignment.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["page_002.png", "page_005.png", "page_010.png"]);
    }
}
