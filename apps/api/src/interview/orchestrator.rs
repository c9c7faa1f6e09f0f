//! Conversation Orchestrator — asks the model for the next interviewer line.

use crate::interview::session::{Session, Speaker};
use crate::llm_client::{ChatMessage, ChatModel, LlmError, Sampling};

pub const TURN_SAMPLING: Sampling = Sampling {
    temperature: 0.8,
    max_tokens: 500,
};

/// Preamble, then every stored turn, then the answer being responded to.
pub fn build_turn_messages(session: &Session, candidate_message: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(session.history().len() + 2);
    messages.push(ChatMessage::system(session.system_prompt()));
    messages.extend(session.history().iter().map(|turn| match turn.role {
        Speaker::Interviewer => ChatMessage::assistant(turn.content.as_str()),
        Speaker::Candidate => ChatMessage::user(turn.content.as_str()),
    }));
    messages.push(ChatMessage::user(candidate_message));
    messages
}

/// Returns the model's raw reply. Does not touch the session; errors are
/// passed straight back with no retry.
pub async fn next_interviewer_turn(
    session: &Session,
    candidate_message: &str,
    llm: &dyn ChatModel,
) -> Result<String, LlmError> {
    let messages = build_turn_messages(session, candidate_message);
    llm.complete(&messages, TURN_SAMPLING).await
}
