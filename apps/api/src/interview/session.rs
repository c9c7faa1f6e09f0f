//! Session — one candidate's interview, from opening question to feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interview::prompts::build_system_prompt;
use crate::interview::roles::RoleConfig;

/// Who said a line. Serialized with the chat-API tags the frontend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    #[serde(rename = "assistant")]
    Interviewer,
    #[serde(rename = "user")]
    Candidate,
}

impl Speaker {
    pub fn label(self) -> &'static str {
        match self {
            Speaker::Interviewer => "INTERVIEWER",
            Speaker::Candidate => "CANDIDATE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Speaker,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Complete,
}

/// Interview state. `history` is append-only and only reachable through
/// [`Session::push_turn`].
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub role_id: String,
    pub role: RoleConfig,
    pub user_name: String,
    pub start_time: DateTime<Utc>,
    /// Starts at 1 (the opening question). Never exceeds `role.num_questions`.
    pub questions_asked: u32,
    /// Whether the interviewer's last reply was chosen to be a follow-up.
    pub awaiting_followup: bool,
    pub status: SessionStatus,
    system_prompt: String,
    history: Vec<Turn>,
}

impl Session {
    /// Opens a session with the role's opening question already asked.
    pub fn start(role_id: &str, role: &RoleConfig, user_name: &str) -> Self {
        Self {
            id: new_session_id(),
            role_id: role_id.to_string(),
            role: role.clone(),
            user_name: user_name.to_string(),
            start_time: Utc::now(),
            questions_asked: 1,
            awaiting_followup: false,
            status: SessionStatus::InProgress,
            system_prompt: build_system_prompt(role, user_name),
            history: vec![Turn {
                role: Speaker::Interviewer,
                content: role.opening_question.to_string(),
            }],
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn push_turn(&mut self, role: Speaker, content: impl Into<String>) {
        self.history.push(Turn {
            role,
            content: content.into(),
        });
    }

    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Complete
    }

    pub fn mark_complete(&mut self) {
        self.status = SessionStatus::Complete;
    }

    pub fn questions_remaining(&self) -> u32 {
        self.role.num_questions.saturating_sub(self.questions_asked)
    }
}

fn new_session_id() -> String {
    format!("session_{}", Uuid::new_v4().simple())
}
