//! Session Store — repository abstraction over live interview sessions.
//!
//! Each stored session sits behind its own async mutex. A handler holds the
//! lock for a whole turn (including the model call), so two requests for the
//! same session run one after the other; different sessions never contend.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::interview::session::Session;

/// Exclusive-access handle to one session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Storage backend for sessions, carried in `AppState` as
/// `Arc<dyn SessionRepository>`.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn get(&self, session_id: &str) -> Result<Option<SessionHandle>>;

    /// Stores a new session and returns its handle.
    async fn put(&self, session: Session) -> Result<SessionHandle>;

    /// Returns `false` if no session had that id.
    async fn delete(&self, session_id: &str) -> Result<bool>;
}

/// Process-lifetime store. No eviction, no persistence.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl InMemorySessionRepository {
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, session_id: &str) -> Result<Option<SessionHandle>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn put(&self, session: Session) -> Result<SessionHandle> {
        let id = session.id.clone();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        Ok(handle)
    }

    async fn delete(&self, session_id: &str) -> Result<bool> {
        Ok(self.sessions.write().await.remove(session_id).is_some())
    }
}
