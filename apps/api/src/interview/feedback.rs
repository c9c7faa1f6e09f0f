//! Feedback Generator — asks the model to critique the finished transcript.
//!
//! Unlike a turn, a failed feedback call is not an error for the caller: the
//! failure text is returned in place of the report.

use tracing::{info, warn};

use crate::interview::prompts::{build_feedback_prompt, FEEDBACK_SYSTEM};
use crate::interview::session::Session;
use crate::interview::transcript::conversation_text;
use crate::llm_client::{ChatMessage, ChatModel, Sampling};

pub const FEEDBACK_SAMPLING: Sampling = Sampling {
    temperature: 0.7,
    max_tokens: 2000,
};

pub fn build_feedback_messages(session: &Session) -> Vec<ChatMessage> {
    let transcript = conversation_text(session.history());
    vec![
        ChatMessage::system(FEEDBACK_SYSTEM),
        ChatMessage::user(build_feedback_prompt(&session.role, &transcript)),
    ]
}

pub async fn generate_feedback(session: &Session, llm: &dyn ChatModel) -> String {
    let messages = build_feedback_messages(session);

    match llm.complete(&messages, FEEDBACK_SAMPLING).await {
        Ok(feedback) => {
            info!("Generated feedback for session {}", session.id);
            feedback
        }
        Err(e) => {
            warn!("Feedback generation failed for session {}: {e}", session.id);
            format!("Error generating feedback: {e}")
        }
    }
}
