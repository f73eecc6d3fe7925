//! In-memory progress store

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ProgressStore;
use crate::error::Result;
use crate::models::*;

#[derive(Default)]
struct Tables {
    learners: HashMap<Uuid, Learner>,
    questions: HashMap<Uuid, Question>,
    progress: HashMap<(Uuid, Uuid), ProgressRecord>,
    sessions: HashMap<Uuid, PracticeSession>,
    daily_activity: HashMap<(Uuid, NaiveDate), DailyActivity>,
}

/// Store keeping every table in a single `RwLock`ed map set
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn get_learner(&self, id: Uuid) -> Result<Option<Learner>> {
        Ok(self.tables.read().await.learners.get(&id).cloned())
    }

    async fn list_learners(&self) -> Result<Vec<Learner>> {
        Ok(self.tables.read().await.learners.values().cloned().collect())
    }

    async fn save_learner(&self, learner: &Learner) -> Result<()> {
        self.tables
            .write()
            .await
            .learners
            .insert(learner.id, learner.clone());
        Ok(())
    }

    async fn get_question(&self, id: Uuid) -> Result<Option<Question>> {
        Ok(self.tables.read().await.questions.get(&id).cloned())
    }

    async fn save_question(&self, question: &Question) -> Result<()> {
        self.tables
            .write()
            .await
            .questions
            .insert(question.id, question.clone());
        Ok(())
    }

    async fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>> {
        let tables = self.tables.read().await;
        let mut questions: Vec<&Question> = tables
            .questions
            .values()
            .filter(|q| filter.matches(q))
            .collect();
        questions.sort_by(|a, b| {
            a.level
                .cmp(&b.level)
                .then(a.difficulty.cmp(&b.difficulty))
                .then_with(|| a.question_text.cmp(&b.question_text))
                .then(a.id.cmp(&b.id))
        });

        Ok(questions
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .cloned()
            .collect())
    }

    async fn get_progress(
        &self,
        learner_id: Uuid,
        question_id: Uuid,
    ) -> Result<Option<ProgressRecord>> {
        Ok(self
            .tables
            .read()
            .await
            .progress
            .get(&(learner_id, question_id))
            .cloned())
    }

    async fn list_progress(&self, learner_id: Uuid) -> Result<Vec<ProgressRecord>> {
        Ok(self
            .tables
            .read()
            .await
            .progress
            .values()
            .filter(|p| p.learner_id == learner_id)
            .cloned()
            .collect())
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<()> {
        self.tables
            .write()
            .await
            .progress
            .insert((record.learner_id, record.question_id), record.clone());
        Ok(())
    }

    async fn get_session(&self, id: Uuid) -> Result<Option<PracticeSession>> {
        Ok(self.tables.read().await.sessions.get(&id).cloned())
    }

    async fn list_sessions(&self, learner_id: Uuid) -> Result<Vec<PracticeSession>> {
        Ok(self
            .tables
            .read()
            .await
            .sessions
            .values()
            .filter(|s| s.learner_id == learner_id)
            .cloned()
            .collect())
    }

    async fn save_session(&self, session: &PracticeSession) -> Result<()> {
        self.tables
            .write()
            .await
            .sessions
            .insert(session.id, session.clone());
        Ok(())
    }

    async fn get_daily_activity(
        &self,
        learner_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyActivity>> {
        Ok(self
            .tables
            .read()
            .await
            .daily_activity
            .get(&(learner_id, date))
            .cloned())
    }

    async fn save_daily_activity(&self, activity: &DailyActivity) -> Result<()> {
        self.tables
            .write()
            .await
            .daily_activity
            .insert((activity.learner_id, activity.date), activity.clone());
        Ok(())
    }
}
