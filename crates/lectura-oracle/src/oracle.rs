//! Live [`Oracle`] implementation backed by the chat client.

use crate::client::ChatClient;
use crate::config::OracleConfig;
use crate::response::{parse_assignment_reply, parse_cohesion_reply};
use async_trait::async_trait;
use lectura_core::{
    CohesionOperation, Oracle, OracleError, Paragraph, Result, SlideJudgement,
    SlideJudgementRequest,
};

/// System prompt for cohesion judgement.
const COHESION_SYSTEM_PROMPT: &str = r#"You review the paragraphs of a lecture transcript for topic cohesion.

For every paragraph decide exactly one operation:
- "keep": the paragraph covers one topic and stays as it is.
- "split": the paragraph covers two distinct topics. Provide the full text of
  both halves; together they must reproduce the original paragraph.
- "merge": the paragraph and an adjacent paragraph cover the same topic and
  should become one. Merge at most two paragraphs.

Never rewrite, shorten, or correct the text. Only repair topic boundaries.

Return JSON ONLY:
{
  "operations": [
    {"action": "keep", "id": 1},
    {"action": "split", "id": 2, "text_part_1": "...", "text_part_2": "..."},
    {"action": "merge", "ids": [3, 4]}
  ]
}
"#;

/// System prompt for assignment judgement.
const ASSIGNMENT_SYSTEM_PROMPT: &str = r#"You anchor lecture slides at the paragraph of the transcript they belong to.

For every slide you receive its description and a shortlist of candidate
paragraphs with similarity scores. Choose the single paragraph whose content
the slide illustrates. Prefer shortlisted candidates, but you may answer with
any paragraph id when the shortlist clearly misses the right place.

Return JSON ONLY:
{
  "assignments": [
    {"slide": "page_001.png", "paragraph_id": 3}
  ]
}
"#;

/// Judgement oracle backed by an OpenAI-compatible chat model.
///
/// The client and configuration are constructed by the caller and passed in
/// explicitly; there is no process-wide cached instance.
#[derive(Debug, Clone)]
pub struct ChatOracle {
    client: ChatClient,
    config: OracleConfig,
}

impl ChatOracle {
    /// Create an oracle from an explicit client and configuration.
    #[must_use = "creating an oracle that is not used is a waste of resources"]
    pub fn new(client: ChatClient, config: OracleConfig) -> Self {
        Self { client, config }
    }

    /// Create an oracle configured entirely from environment variables.
    ///
    /// # Errors
    /// Returns an error if the chat client cannot be initialized.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(ChatClient::new()?, OracleConfig::from_env()))
    }

    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        tracing::debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "requesting oracle judgement"
        );
        self.client
            .chat_completion(&self.config.model, system, prompt, self.config.max_tokens)
            .await
            .map_err(|e| OracleError::Request(format!("{e:#}")))
    }
}

#[async_trait]
impl Oracle for ChatOracle {
    async fn judge_cohesion(&self, window: &[Paragraph]) -> Result<Vec<CohesionOperation>> {
        let prompt = build_cohesion_prompt(window);
        let response = self.complete(COHESION_SYSTEM_PROMPT, &prompt).await?;
        parse_cohesion_reply(&response)
    }

    async fn judge_assignment(
        &self,
        slides: &[SlideJudgementRequest],
    ) -> Result<Vec<SlideJudgement>> {
        let prompt = build_assignment_prompt(slides);
        let response = self.complete(ASSIGNMENT_SYSTEM_PROMPT, &prompt).await?;
        parse_assignment_reply(&response)
    }
}

/// Render one cohesion window as the user message.
fn build_cohesion_prompt(window: &[Paragraph]) -> String {
    let mut text = String::from("PARAGRAPHS:\n");
    for paragraph in window {
        text.push_str(&format!("[ID={}] {}\n\n", paragraph.id, paragraph.text));
    }
    text
}

/// Render one assignment batch as the user message.
fn build_assignment_prompt(slides: &[SlideJudgementRequest]) -> String {
    let mut parts = vec!["Assign each slide to its best matching paragraph.\n".to_string()];

    for slide in slides {
        parts.push(format!("SLIDE: {}", slide_filename(&slide.slide_file)));
        let description = if slide.description.is_empty() {
            "No description available."
        } else {
            slide.description.as_str()
        };
        parts.push(format!("Description: \"{description}\""));
        parts.push("Candidates:".to_string());

        for candidate in &slide.candidates {
            parts.push(format!(
                "  - Paragraph [{}] (score: {:.2}): \"{}\"",
                candidate.paragraph_id, candidate.score, candidate.preview
            ));
        }

        parts.push(String::new());
    }

    parts.join("\n")
}

/// Strip any directory prefix from a slide file reference.
fn slide_filename(slide_file: &str) -> &str {
    slide_file
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(slide_file)
}
