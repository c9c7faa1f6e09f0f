//! Interview State Machine — decides what a candidate message does to a session.
//!
//! Per accepted message: either the quota is already met and the interview
//! closes with feedback, or the model asks the next question. A main question
//! bumps `questions_asked`; a follow-up does not. Whether the *next* reply is a
//! follow-up is a fresh coin-flip each turn.

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::interview::feedback::generate_feedback;
use crate::interview::orchestrator::next_interviewer_turn;
use crate::interview::prompts::{CLOSING_MESSAGE, EMPTY_MESSAGE_PROMPT, LONG_MESSAGE_PROMPT};
use crate::interview::session::{Session, Speaker};
use crate::llm_client::ChatModel;

/// Answers longer than this (in characters) are bounced back for a summary.
pub const MAX_MESSAGE_CHARS: usize = 2000;
pub const FOLLOWUP_PROBABILITY: f64 = 0.4;

/// Source of uniform draws in `[0, 1)`. Injected so tests can force outcomes.
pub trait RandomSource: Send + Sync {
    fn uniform(&self) -> f64;
}

/// Thread-local RNG from `rand`.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform(&self) -> f64 {
        rand::random::<f64>()
    }
}

/// Result of one message exchange, serialized as the message endpoint's body.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub response: String,
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions_remaining: Option<u32>,
}

impl TurnOutcome {
    fn clarification(prompt: &str) -> Self {
        Self {
            response: prompt.to_string(),
            is_complete: false,
            feedback: None,
            questions_remaining: None,
        }
    }
}

/// Returns the clarifying prompt for a message that must not consume a turn.
pub fn screen_message(message: &str) -> Option<&'static str> {
    if message.trim().is_empty() {
        Some(EMPTY_MESSAGE_PROMPT)
    } else if message.chars().count() > MAX_MESSAGE_CHARS {
        Some(LONG_MESSAGE_PROMPT)
    } else {
        None
    }
}

/// Whether the reply after this turn should be a follow-up. Always draws, so
/// each turn consumes exactly one value from `rng`.
pub fn decide_followup(questions_asked: u32, num_questions: u32, rng: &dyn RandomSource) -> bool {
    let draw = rng.uniform();
    draw < FOLLOWUP_PROBABILITY && questions_asked < num_questions
}

/// Advances `session` by one candidate message.
///
/// Errors:
/// - `Conflict` if the interview already finished; nothing is changed.
/// - `Llm` if the model call for the next question fails; nothing is changed.
pub async fn advance(
    session: &mut Session,
    message: &str,
    llm: &dyn ChatModel,
    rng: &dyn RandomSource,
) -> Result<TurnOutcome, AppError> {
    if session.is_complete() {
        return Err(AppError::Conflict(format!(
            "Interview {} is already complete",
            session.id
        )));
    }

    if let Some(prompt) = screen_message(message) {
        return Ok(TurnOutcome::clarification(prompt));
    }

    if session.questions_asked >= session.role.num_questions {
        session.push_turn(Speaker::Candidate, message);
        session.push_turn(Speaker::Interviewer, CLOSING_MESSAGE);
        session.mark_complete();
        info!(
            "Session {} ({}) complete after {} questions",
            session.id, session.role_id, session.questions_asked
        );

        let feedback = generate_feedback(session, llm).await;
        return Ok(TurnOutcome {
            response: CLOSING_MESSAGE.to_string(),
            is_complete: true,
            feedback: Some(feedback),
            questions_remaining: None,
        });
    }

    let reply = next_interviewer_turn(session, message, llm).await?;
    session.push_turn(Speaker::Candidate, message);
    session.push_turn(Speaker::Interviewer, reply.as_str());

    if !session.awaiting_followup {
        session.questions_asked += 1;
    }
    session.awaiting_followup =
        decide_followup(session.questions_asked, session.role.num_questions, rng);

    Ok(TurnOutcome {
        response: reply,
        is_complete: false,
        feedback: None,
        questions_remaining: Some(session.questions_remaining()),
    })
}
