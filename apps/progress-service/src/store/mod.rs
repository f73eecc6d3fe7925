//! Persistence seam for learner progress
//!
//! The relational schema lives outside this crate. Anything that can load and
//! save these records implements [`ProgressStore`]; [`MemoryStore`] backs
//! tests and embedded use.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

#[async_trait]
pub trait ProgressStore: Send + Sync {
    // === Learners ===

    async fn get_learner(&self, id: Uuid) -> Result<Option<Learner>>;

    async fn list_learners(&self) -> Result<Vec<Learner>>;

    async fn save_learner(&self, learner: &Learner) -> Result<()>;

    // === Questions ===

    async fn get_question(&self, id: Uuid) -> Result<Option<Question>>;

    async fn save_question(&self, question: &Question) -> Result<()>;

    /// Questions matching `filter`, ordered by level, difficulty and text,
    /// then paginated by the filter's offset and limit
    async fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>>;

    // === Progress ===

    async fn get_progress(&self, learner_id: Uuid, question_id: Uuid)
        -> Result<Option<ProgressRecord>>;

    async fn list_progress(&self, learner_id: Uuid) -> Result<Vec<ProgressRecord>>;

    /// Insert or replace the record for its (learner, question) pair
    async fn save_progress(&self, record: &ProgressRecord) -> Result<()>;

    // === Sessions ===

    async fn get_session(&self, id: Uuid) -> Result<Option<PracticeSession>>;

    async fn list_sessions(&self, learner_id: Uuid) -> Result<Vec<PracticeSession>>;

    async fn save_session(&self, session: &PracticeSession) -> Result<()>;

    // === Daily Activity ===

    async fn get_daily_activity(
        &self,
        learner_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyActivity>>;

    async fn save_daily_activity(&self, activity: &DailyActivity) -> Result<()>;
}
