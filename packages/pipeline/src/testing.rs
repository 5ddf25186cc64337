//! Test utilities: scripted collaborators for exercising the pipeline
//! without a real model behind it.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CollaboratorError, CollaboratorResult};
use crate::traits::collaborator::{Collaborator, PromptKind};

/// One recorded call to a mock collaborator.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub kind: PromptKind,
    pub prompt: String,
}

/// A scripted collaborator.
///
/// Replies are queued per prompt kind and consumed in order; once a queue
/// runs dry the mock falls back to a benign empty artifact for that kind,
/// so tests only script the replies they care about. Every call is
/// recorded for assertion.
#[derive(Default)]
pub struct MockCollaborator {
    replies: Mutex<HashMap<PromptKind, VecDeque<String>>>,
    failures: Mutex<HashMap<PromptKind, CollaboratorError>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockCollaborator {
    /// Queue a reply for a prompt kind.
    pub fn with_reply(self, kind: PromptKind, reply: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .push_back(reply.into());
        self
    }

    /// Make every call of a prompt kind fail.
    pub fn with_failure(self, kind: PromptKind, error: CollaboratorError) -> Self {
        self.failures.lock().unwrap().insert(kind, error);
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Prompt kinds of all calls made so far, in order.
    pub fn call_kinds(&self) -> Vec<PromptKind> {
        self.calls.lock().unwrap().iter().map(|c| c.kind).collect()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn default_reply(kind: PromptKind) -> &'static str {
        match kind {
            PromptKind::ExtractFacts => r#"{"facts": []}"#,
            PromptKind::BuildOutline => r#"{"sections": []}"#,
            PromptKind::Summarize => r#"{"segments": []}"#,
            PromptKind::RepairJson => "{}",
        }
    }
}

#[async_trait]
impl Collaborator for MockCollaborator {
    async fn generate(&self, kind: PromptKind, prompt: &str) -> CollaboratorResult<String> {
        self.calls.lock().unwrap().push(MockCall {
            kind,
            prompt: prompt.to_string(),
        });

        if let Some(error) = self.failures.lock().unwrap().get(&kind) {
            return Err(error.clone());
        }

        let queued = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&kind)
            .and_then(VecDeque::pop_front);
        Ok(queued.unwrap_or_else(|| Self::default_reply(kind).to_string()))
    }
}

/// A collaborator that never answers in time, for timeout tests.
pub struct StallingCollaborator {
    delay: Duration,
}

impl StallingCollaborator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Collaborator for StallingCollaborator {
    async fn generate(&self, _kind: PromptKind, _prompt: &str) -> CollaboratorResult<String> {
        tokio::time::sleep(self.delay).await;
        Err(CollaboratorError::Timeout)
    }
}
