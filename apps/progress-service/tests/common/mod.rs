//! Common test utilities and fixtures for integration tests.
//!
//! Every test gets its own [`TestContext`] backed by a fresh in-memory store,
//! so tests are independent and need no external services.

pub mod fixtures;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use lexiquest_progress::models::{Learner, Question};
use lexiquest_progress::{MemoryStore, ProgressService, ProgressStore, ServiceConfig};

/// Test context holding the store and a service built on top of it.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub service: Arc<ProgressService<MemoryStore>>,
}

impl TestContext {
    /// Create a context with default configuration.
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    /// Create a context with a custom configuration.
    pub fn with_config(config: ServiceConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let service = Arc::new(ProgressService::new(store.clone(), config));
        Self { store, service }
    }

    /// Store a new learner and return it.
    pub async fn create_learner(&self, username: &str) -> Learner {
        let learner = Learner::new(username, fixtures::now());
        self.store
            .save_learner(&learner)
            .await
            .expect("Failed to save learner");
        learner
    }

    /// Store a learner after applying `edit` to a fresh one.
    pub async fn create_learner_with(
        &self,
        username: &str,
        edit: impl FnOnce(&mut Learner),
    ) -> Learner {
        let mut learner = Learner::new(username, fixtures::now());
        edit(&mut learner);
        self.store
            .save_learner(&learner)
            .await
            .expect("Failed to save learner");
        learner
    }

    /// Store a question with the given stored answer and reward.
    pub async fn create_question(&self, correct_answer: Value, xp_reward: Option<u32>) -> Question {
        let question = fixtures::question("grammar", correct_answer, xp_reward);
        self.add_question(question).await
    }

    /// Store an already-built question.
    pub async fn add_question(&self, question: Question) -> Question {
        self.store
            .save_question(&question)
            .await
            .expect("Failed to save question");
        question
    }

    /// Reload a learner from the store.
    pub async fn learner(&self, learner: &Learner) -> Learner {
        self.store
            .get_learner(learner.id)
            .await
            .expect("Failed to load learner")
            .expect("Learner should exist")
    }
}

/// Shorthand for `fixtures::now()` shifted by whole days.
pub fn days_from_now(days: i64) -> DateTime<Utc> {
    fixtures::now() + chrono::Duration::days(days)
}
