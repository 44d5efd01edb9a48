//! Defensive decoding of oracle responses.
//!
//! Chat models return best-effort JSON: sometimes bare, sometimes wrapped
//! in markdown code fences or surrounding prose, with ids as numbers or
//! numeric strings and occasional unknown operation names. Everything that
//! cannot be salvaged maps to [`OracleError::Parse`](lectura_core::OracleError::Parse);
//! nothing here panics.

use lectura_core::{CohesionOperation, OracleError, ParagraphId, SlideJudgement};
use serde::Deserialize;
use serde_json::Value;

/// Extract a JSON value from a raw model response.
///
/// Strips markdown code fences first; if the remainder still does not parse,
/// falls back to the outermost brace-delimited slice.
///
/// # Errors
/// Returns [`OracleError::EmptyResponse`] for blank input and
/// [`OracleError::Parse`] when no JSON object can be recovered.
pub fn extract_json(response: &str) -> Result<Value, OracleError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(OracleError::EmptyResponse);
    }

    let text = if trimmed.starts_with("```") {
        trimmed
            .lines()
            .filter(|line| !line.trim_start().starts_with("```"))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        trimmed.to_string()
    };

    if let Ok(value) = serde_json::from_str(&text) {
        return Ok(value);
    }

    let start = text.find('{');
    let end = text.rfind('}');
    if let (Some(start), Some(end)) = (start, end) {
        if end > start {
            if let Ok(value) = serde_json::from_str(&text[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(OracleError::Parse(format!(
        "no JSON object in response: {}",
        truncate(trimmed, 200)
    )))
}

/// Cohesion reply as the model emits it.
#[derive(Debug, Deserialize)]
struct RawCohesionReply {
    #[serde(default)]
    operations: Vec<RawOperation>,
}

#[derive(Debug, Deserialize)]
struct RawOperation {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    ids: Vec<Value>,
    #[serde(default)]
    text_part_1: Option<String>,
    #[serde(default)]
    text_part_2: Option<String>,
}

/// Assignment reply as the model emits it.
#[derive(Debug, Deserialize)]
struct RawAssignmentReply {
    #[serde(default)]
    assignments: Vec<RawAssignment>,
}

#[derive(Debug, Deserialize)]
struct RawAssignment {
    #[serde(default)]
    slide: Option<String>,
    #[serde(default)]
    paragraph_id: Option<Value>,
}

/// Decode a cohesion judgement response into typed operations.
///
/// Operations with an unknown action or unusable ids are dropped; the
/// analyzer's coverage pass keeps the affected paragraphs unchanged.
///
/// # Errors
/// Returns [`OracleError::Parse`] when the response carries no decodable
/// JSON object at all.
pub fn parse_cohesion_reply(response: &str) -> Result<Vec<CohesionOperation>, OracleError> {
    let value = extract_json(response)?;
    let reply: RawCohesionReply = serde_json::from_value(value)
        .map_err(|e| OracleError::Parse(format!("unexpected cohesion reply shape: {e}")))?;

    let mut operations = Vec::new();
    for raw in reply.operations {
        let Some(action) = raw.action.as_deref() else {
            continue;
        };
        match action {
            "keep" => {
                if let Some(id) = raw.id.as_ref().and_then(value_to_id) {
                    operations.push(CohesionOperation::Keep { id });
                }
            }
            "split" => {
                if let Some(id) = raw.id.as_ref().and_then(value_to_id) {
                    operations.push(CohesionOperation::Split {
                        id,
                        first: raw.text_part_1.unwrap_or_default(),
                        second: raw.text_part_2.unwrap_or_default(),
                    });
                }
            }
            "merge" => {
                let ids: Vec<ParagraphId> =
                    raw.ids.iter().filter_map(value_to_id).collect();
                if let [a, b] = ids[..] {
                    operations.push(CohesionOperation::Merge { ids: [a, b] });
                }
            }
            _ => {}
        }
    }
    Ok(operations)
}

/// Decode an assignment judgement response into per-slide verdicts.
///
/// Entries with a missing slide name or unusable paragraph id are dropped;
/// the assigner falls back per slide for anything not answered.
///
/// # Errors
/// Returns [`OracleError::Parse`] when the response carries no decodable
/// JSON object at all.
pub fn parse_assignment_reply(response: &str) -> Result<Vec<SlideJudgement>, OracleError> {
    let value = extract_json(response)?;
    let reply: RawAssignmentReply = serde_json::from_value(value)
        .map_err(|e| OracleError::Parse(format!("unexpected assignment reply shape: {e}")))?;

    Ok(reply
        .assignments
        .into_iter()
        .filter_map(|raw| {
            let slide_file = raw.slide.filter(|s| !s.is_empty())?;
            let paragraph_id = raw.paragraph_id.as_ref().and_then(value_to_id)?;
            Some(SlideJudgement {
                slide_file,
                paragraph_id,
            })
        })
        .collect())
}

/// Read a paragraph id from a JSON number or numeric string.
fn value_to_id(value: &Value) -> Option<ParagraphId> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| ParagraphId::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}
