//! Test doubles for the model and randomness seams.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::interview::state_machine::RandomSource;
use crate::llm_client::{ChatMessage, ChatModel, LlmError, Sampling};

/// Replies with numbered questions and records every request it receives.
#[derive(Default)]
pub struct ScriptedModel {
    calls: Mutex<Vec<(Vec<ChatMessage>, Sampling)>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<(Vec<ChatMessage>, Sampling)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: Sampling,
    ) -> Result<String, LlmError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((messages.to_vec(), sampling));
        Ok(format!("Scripted reply #{}", calls.len()))
    }
}

/// Waits before every reply, then answers like [`ScriptedModel`].
pub struct SlowModel {
    delay: Duration,
    inner: ScriptedModel,
}

impl SlowModel {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: ScriptedModel::new(),
        }
    }
}

#[async_trait]
impl ChatModel for SlowModel {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: Sampling,
    ) -> Result<String, LlmError> {
        tokio::time::sleep(self.delay).await;
        self.inner.complete(messages, sampling).await
    }
}

/// Always fails as if the provider returned an error status.
pub struct FailingModel;

#[async_trait]
impl ChatModel for FailingModel {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _sampling: Sampling,
    ) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }
}

/// Returns the same draw every time.
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn uniform(&self) -> f64 {
        self.0
    }
}

/// Replays a queue of draws, then repeats the last fallback value.
pub struct SequenceRandom {
    draws: Mutex<VecDeque<f64>>,
    fallback: f64,
}

impl SequenceRandom {
    pub fn new(draws: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            draws: Mutex::new(draws.into_iter().collect()),
            fallback,
        }
    }
}

impl RandomSource for SequenceRandom {
    fn uniform(&self) -> f64 {
        self.draws.lock().unwrap().pop_front().unwrap_or(self.fallback)
    }
}
