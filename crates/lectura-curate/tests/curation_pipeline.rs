//! End-to-end tests for the curation pipeline with a scripted oracle.

use async_trait::async_trait;
use lectura_core::{
    CohesionOperation, Oracle, OracleError, Paragraph, ParagraphId, Result, SlideCandidate,
    SlideDescription, SlideJudgement, SlideJudgementRequest, SlideMatchSet,
};
use lectura_curate::curate;
use std::sync::Mutex;

/// Oracle with one scripted reply queue per judgement shape.
struct ScriptedOracle {
    cohesion_replies: Mutex<Vec<Result<Vec<CohesionOperation>>>>,
    assignment_replies: Mutex<Vec<Result<Vec<SlideJudgement>>>>,
}

impl ScriptedOracle {
    fn new(
        cohesion_replies: Vec<Result<Vec<CohesionOperation>>>,
        assignment_replies: Vec<Result<Vec<SlideJudgement>>>,
    ) -> Self {
        Self {
            cohesion_replies: Mutex::new(cohesion_replies),
            assignment_replies: Mutex::new(assignment_replies),
        }
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn judge_cohesion(&self, _window: &[Paragraph]) -> Result<Vec<CohesionOperation>> {
        let mut replies = self.cohesion_replies.lock().unwrap();
        if replies.is_empty() {
            Ok(vec![])
        } else {
            replies.remove(0)
        }
    }

    async fn judge_assignment(
        &self,
        _slides: &[SlideJudgementRequest],
    ) -> Result<Vec<SlideJudgement>> {
        let mut replies = self.assignment_replies.lock().unwrap();
        if replies.is_empty() {
            Ok(vec![])
        } else {
            replies.remove(0)
        }
    }
}

/// Oracle whose every judgement fails; the pipeline must still complete.
struct BrokenOracle;

#[async_trait]
impl Oracle for BrokenOracle {
    async fn judge_cohesion(&self, _window: &[Paragraph]) -> Result<Vec<CohesionOperation>> {
        Err(OracleError::Parse("no json here".to_string()))
    }

    async fn judge_assignment(
        &self,
        _slides: &[SlideJudgementRequest],
    ) -> Result<Vec<SlideJudgement>> {
        Err(OracleError::Request("connection refused".to_string()))
    }
}

fn paragraph(id: ParagraphId, text: &str) -> Paragraph {
    Paragraph {
        id,
        text: text.to_string(),
    }
}

fn match_set(slide_file: &str, results: &[(ParagraphId, f64)]) -> SlideMatchSet {
    SlideMatchSet {
        slide_file: slide_file.to_string(),
        results: results
            .iter()
            .map(|&(paragraph_id, score)| SlideCandidate {
                paragraph_id,
                score,
            })
            .collect(),
    }
}

fn judgement(slide_file: &str, paragraph_id: ParagraphId) -> SlideJudgement {
    SlideJudgement {
        slide_file: slide_file.to_string(),
        paragraph_id,
    }
}

fn lecture_paragraphs() -> Vec<Paragraph> {
    vec![
        paragraph(1, "Welcome to the lecture."),
        paragraph(2, "Sorting basics. Quicksort details."),
        paragraph(3, "Merge sort."),
        paragraph(4, "Heaps intro."),
        paragraph(5, "Heaps continued."),
    ]
}

fn lecture_matches() -> Vec<SlideMatchSet> {
    vec![
        match_set("page_001.png", &[(1, 0.9)]),
        match_set("page_002.png", &[(2, 0.8), (6, 0.7)]),
        match_set("page_003.png", &[(3, 0.85)]),
        match_set("page_004.png", &[(4, 0.9)]),
    ]
}

fn lecture_descriptions() -> Vec<SlideDescription> {
    vec![SlideDescription {
        slide_file: "page_001.png".to_string(),
        description: "Title slide with course name".to_string(),
    }]
}

/// Paragraph positions of the selected slides, in page order.
fn selected_positions(script: &lectura_core::CuratedScript) -> Vec<(String, usize)> {
    let mut selected: Vec<(String, usize)> = script
        .content
        .iter()
        .enumerate()
        .flat_map(|(position, paragraph)| {
            paragraph
                .selected_slides
                .iter()
                .map(move |slide| (slide.slide_file.clone(), position))
        })
        .collect();
    selected.sort();
    selected
}

#[tokio::test]
async fn test_full_pipeline_restructures_and_anchors_slides() {
    // Cohesion: split paragraph 2 and merge 4 with 5.
    // Assignment: page_002 answers out of page order and must be repaired.
    let oracle = ScriptedOracle::new(
        vec![Ok(vec![
            CohesionOperation::Keep { id: 1 },
            CohesionOperation::Split {
                id: 2,
                first: "Sorting basics.".to_string(),
                second: "Quicksort details.".to_string(),
            },
            CohesionOperation::Keep { id: 3 },
            CohesionOperation::Merge { ids: [4, 5] },
        ])],
        vec![Ok(vec![
            judgement("page_001.png", 1),
            judgement("page_002.png", 3),
            judgement("page_003.png", 6),
            judgement("page_004.png", 4),
        ])],
    );

    let script = curate(
        &oracle,
        lecture_paragraphs(),
        &lecture_descriptions(),
        &lecture_matches(),
    )
    .await;

    // Restructured document order: split halves in place, merge absorbed.
    let ids: Vec<ParagraphId> = script.content.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 6, 3, 4]);
    assert_eq!(script.content[1].text, "Sorting basics.");
    assert_eq!(script.content[2].text, "Quicksort details.");
    assert_eq!(script.content[4].text, "Heaps intro.\n\nHeaps continued.");

    // page_002 violated page order and was repaired to its best-scoring
    // paragraph between its kept neighbors; everything is monotonic.
    let selected = selected_positions(&script);
    assert_eq!(
        selected,
        vec![
            ("page_001.png".to_string(), 0),
            ("page_002.png".to_string(), 1),
            ("page_003.png".to_string(), 2),
            ("page_004.png".to_string(), 4),
        ]
    );

    // The unassigned shortlist hit on the split's second half is surfaced
    // for manual review.
    let quicksort = &script.content[2];
    assert_eq!(quicksort.slide_candidates.len(), 1);
    assert_eq!(quicksort.slide_candidates[0].slide_file, "page_002.png");
    assert!(!quicksort.slide_candidates[0].selected);

    assert!(script.deleted_slides.is_empty());
}

#[tokio::test]
async fn test_pipeline_survives_total_oracle_failure() {
    let script = curate(
        &BrokenOracle,
        lecture_paragraphs(),
        &[],
        &lecture_matches(),
    )
    .await;

    // Paragraphs pass through untouched.
    let ids: Vec<ParagraphId> = script.content.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    // Every slide is anchored at its top-scored candidate.
    let selected = selected_positions(&script);
    assert_eq!(
        selected,
        vec![
            ("page_001.png".to_string(), 0),
            ("page_002.png".to_string(), 1),
            ("page_003.png".to_string(), 2),
            ("page_004.png".to_string(), 3),
        ]
    );
}

#[tokio::test]
async fn test_pipeline_output_is_monotonic_and_complete() {
    // A deliberately erratic assignment round: several answers point
    // backwards, one is invalid, one slide is never answered.
    let oracle = ScriptedOracle::new(
        vec![],
        vec![Ok(vec![
            judgement("page_001.png", 4),
            judgement("page_002.png", 1),
            judgement("page_003.png", 99),
            judgement("page_004.png", 2),
        ])],
    );

    let matches = vec![
        match_set("page_001.png", &[(4, 0.9), (1, 0.4)]),
        match_set("page_002.png", &[(1, 0.8)]),
        match_set("page_003.png", &[(3, 0.7)]),
        match_set("page_004.png", &[(2, 0.6)]),
        match_set("page_005.png", &[(5, 0.5)]),
    ];

    let script = curate(&oracle, lecture_paragraphs(), &[], &matches).await;

    let selected = selected_positions(&script);
    assert_eq!(selected.len(), 5, "every slide must stay covered");
    for window in selected.windows(2) {
        assert!(
            window[0].1 <= window[1].1,
            "slide positions must not decrease: {selected:?}"
        );
    }
}

#[tokio::test]
async fn test_empty_inputs_yield_empty_script() {
    let script = curate(&BrokenOracle, vec![], &[], &[]).await;
    assert!(script.content.is_empty());
    assert!(script.deleted_slides.is_empty());
}

#[tokio::test]
async fn test_curated_script_serializes_to_editor_contract() {
    let oracle = ScriptedOracle::new(vec![], vec![]);
    let script = curate(
        &oracle,
        vec![paragraph(1, "Only paragraph.")],
        &[],
        &[match_set("page_001.png", &[(1, 0.9)])],
    )
    .await;

    let json = serde_json::to_value(&script).unwrap();
    assert_eq!(json["content"][0]["id"], 1);
    assert_eq!(json["content"][0]["selectedSlides"][0]["slide_file"], "page_001.png");
    assert_eq!(json["content"][0]["selectedSlides"][0]["selected"], true);
    assert_eq!(json["deletedSlides"], serde_json::json!([]));
}
