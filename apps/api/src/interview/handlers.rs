//! Axum route handlers for the Interview API.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::interview::feedback::generate_feedback;
use crate::interview::roles::RoleConfig;
use crate::interview::session::{Session, Turn};
use crate::interview::state_machine::{advance, TurnOutcome};
use crate::interview::store::SessionHandle;
use crate::interview::transcript::render_transcript;
use crate::state::AppState;

const DEFAULT_USER_NAME: &str = "Candidate";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: BTreeMap<&'static str, RoleConfig>,
}

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub role: String,
    pub user_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub session_id: String,
    pub first_question: String,
    pub role_info: RoleConfig,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub session_id: String,
    pub message: String,
}

/// `session_id` may arrive as a query parameter or in the JSON body.
#[derive(Debug, Default, Deserialize)]
pub struct EndRequest {
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EndResponse {
    pub feedback: String,
    pub transcript: Vec<Turn>,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub role: &'static str,
    pub user_name: String,
    pub start_time: DateTime<Utc>,
    pub questions_asked: u32,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub transcript: String,
    pub session_info: SessionInfo,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: state.roles.roles().clone(),
    })
}

/// POST /api/interview/start
///
/// Creates a session with the role's opening question already asked.
pub async fn handle_start(
    State(state): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<Json<StartResponse>, AppError> {
    let role = state
        .roles
        .get(&request.role)
        .ok_or_else(|| AppError::Validation("Invalid role selected".to_string()))?;

    let user_name = request
        .user_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_USER_NAME);

    let session = Session::start(&request.role, role, user_name);
    let session_id = session.id.clone();
    state.sessions.put(session).await?;

    info!("Started {} interview {}", request.role, session_id);

    Ok(Json(StartResponse {
        session_id,
        first_question: role.opening_question.to_string(),
        role_info: role.clone(),
    }))
}

/// POST /api/interview/message
///
/// Runs one turn of the state machine while holding the session's lock.
pub async fn handle_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<TurnOutcome>, AppError> {
    let handle = find_session(&state, &request.session_id).await?;
    let mut session = handle.lock().await;

    let outcome = advance(
        &mut session,
        &request.message,
        state.llm.as_ref(),
        state.rng.as_ref(),
    )
    .await?;

    Ok(Json(outcome))
}

/// POST /api/interview/end
///
/// Generates feedback over whatever has been said so far and closes the session.
pub async fn handle_end(
    State(state): State<AppState>,
    Query(query): Query<EndRequest>,
    body: Option<Json<EndRequest>>,
) -> Result<Json<EndResponse>, AppError> {
    let session_id = query
        .session_id
        .or_else(|| body.and_then(|Json(b)| b.session_id))
        .ok_or_else(|| AppError::Validation("session_id is required".to_string()))?;

    let handle = find_session(&state, &session_id).await?;
    let mut session = handle.lock().await;

    let feedback = generate_feedback(&session, state.llm.as_ref()).await;
    session.mark_complete();
    info!("Interview {} ended manually", session.id);

    Ok(Json(EndResponse {
        feedback,
        transcript: session.history().to_vec(),
    }))
}

/// GET /api/interview/transcript/:session_id
pub async fn handle_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let handle = find_session(&state, &session_id).await?;
    let session = handle.lock().await;

    Ok(Json(TranscriptResponse {
        transcript: render_transcript(&session),
        session_info: SessionInfo {
            role: session.role.name,
            user_name: session.user_name.clone(),
            start_time: session.start_time,
            questions_asked: session.questions_asked,
        },
    }))
}

/// DELETE /api/interview/:session_id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.delete(&session_id).await? {
        return Err(session_not_found(&session_id));
    }
    info!("Deleted interview {session_id}");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_session(state: &AppState, session_id: &str) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(session_id)
        .await?
        .ok_or_else(|| session_not_found(session_id))
}

fn session_not_found(session_id: &str) -> AppError {
    AppError::NotFound(format!("Session {session_id} not found"))
}
