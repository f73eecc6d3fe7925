//! Question catalog and practice question selection

use rand::seq::SliceRandom;
use uuid::Uuid;

use super::ProgressService;
use crate::error::{Result, ServiceError};
use crate::models::*;
use crate::store::ProgressStore;

impl<S: ProgressStore> ProgressService<S> {
    /// One page of questions matching `filter`
    pub async fn questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>> {
        self.store.list_questions(filter).await
    }

    pub async fn question(&self, question_id: Uuid) -> Result<Question> {
        self.store
            .get_question(question_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Question {}", question_id)))
    }

    /// All questions at `level`, easiest first
    pub async fn questions_by_level(&self, level: CefrLevel) -> Result<Vec<Question>> {
        self.store
            .list_questions(&QuestionFilter::at_level(level))
            .await
    }

    /// All questions in `topic`, ordered by level then difficulty
    pub async fn questions_by_topic(&self, topic: &str) -> Result<Vec<Question>> {
        self.store
            .list_questions(&QuestionFilter::in_topic(topic))
            .await
    }

    /// Pick a random question at `level` (the learner's CEFR level when
    /// unset), optionally restricted to `topic`.
    pub async fn practice_question(
        &self,
        learner_id: Uuid,
        level: Option<CefrLevel>,
        topic: Option<&str>,
    ) -> Result<Question> {
        let learner = self.learner(learner_id).await?;
        let filter = QuestionFilter {
            topic: topic.map(str::to_string),
            ..QuestionFilter::at_level(level.unwrap_or(learner.cefr_level))
        };
        let candidates = self.store.list_questions(&filter).await?;

        let picked = candidates.choose(&mut rand::thread_rng()).cloned();
        picked.ok_or_else(|| {
            tracing::debug!(learner_id = %learner_id, ?filter, "No practice question matched");
            ServiceError::NotFound("No questions found".to_string())
        })
    }
}
