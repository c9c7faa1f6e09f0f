use std::sync::Arc;

use crate::interview::roles::RoleCatalog;
use crate::interview::state_machine::RandomSource;
use crate::interview::store::SessionRepository;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionRepository>,
    pub roles: Arc<RoleCatalog>,
    /// Pluggable model collaborator. Default: `LlmClient` against Groq.
    pub llm: Arc<dyn ChatModel>,
    /// Follow-up coin-flip. Default: `ThreadRandom`.
    pub rng: Arc<dyn RandomSource>,
}
