//! Dialogue generation and structuring.
//!
//! Two completion calls back to back: a free-form call invents the
//! conversation, then a schema-constrained call forces it into an ordered
//! list of speaker/line records. The decoded payload is validated
//! immediately; missing or empty fields become a data-format error instead
//! of flowing downstream.

use crate::error::{PodcastError, Result};
use crate::llm::CompletionApi;
use crate::prompt;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One speaker/line pair in the conversation. Ordering is significant and is
/// preserved exactly as produced by the structuring call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTurn {
    /// The name of the speaker.
    pub name: String,
    /// The dialogue said by the speaker.
    pub dialogue: String,
}

/// Structuring payload: ordered turns under the single `dialogues` key.
#[derive(Debug, Clone, Deserialize)]
struct StructuredConversation {
    dialogues: Vec<DialogueTurn>,
}

impl StructuredConversation {
    fn validate(&self) -> Result<()> {
        if self.dialogues.is_empty() {
            return Err(PodcastError::DataFormat(
                "structured conversation has no dialogues".to_owned(),
            ));
        }
        for (index, turn) in self.dialogues.iter().enumerate() {
            if turn.name.trim().is_empty() {
                return Err(PodcastError::DataFormat(format!(
                    "dialogue {index} has an empty speaker name"
                )));
            }
            if turn.dialogue.trim().is_empty() {
                return Err(PodcastError::DataFormat(format!(
                    "dialogue {index} has an empty line"
                )));
            }
        }
        Ok(())
    }
}

/// Generate a structured conversation about a video summary.
///
/// First asks for free-form prose between `name_a` and `name_b`, then forces
/// that prose into ordered [`DialogueTurn`] records. Turn order in the result
/// matches the order of the prose; nothing is reordered locally.
///
/// # Errors
///
/// Propagates completion failures unmodified, and returns
/// [`PodcastError::DataFormat`] when the structuring payload does not match
/// the schema or contains empty fields.
pub async fn generate_structured_conversation(
    llm: &dyn CompletionApi,
    summary: &str,
    name_a: &str,
    name_b: &str,
) -> Result<Vec<DialogueTurn>> {
    let dialogue_prompt = prompt::build_dialogue_prompt(summary, name_a, name_b);
    let unstructured = llm.complete(&dialogue_prompt, 0.0).await?;
    info!(
        "generated unstructured conversation ({} chars)",
        unstructured.len()
    );

    let structuring_prompt = prompt::build_structuring_prompt(&unstructured);
    let payload = llm
        .complete_with_schema(
            &structuring_prompt,
            prompt::structuring_function(),
            prompt::STRUCTURING_FUNCTION_NAME,
        )
        .await?;

    let conversation: StructuredConversation = serde_json::from_value(payload).map_err(|e| {
        PodcastError::DataFormat(format!("structuring payload does not match schema: {e}"))
    })?;
    conversation.validate()?;

    info!(
        "structured conversation with {} turns",
        conversation.dialogues.len()
    );
    Ok(conversation.dialogues)
}
