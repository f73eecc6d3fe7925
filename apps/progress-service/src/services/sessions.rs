//! Practice sessions and daily activity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ProgressService;
use crate::error::{Result, ServiceError};
use crate::models::*;
use crate::store::ProgressStore;

impl<S: ProgressStore> ProgressService<S> {
    /// Start a new practice session for a learner
    pub async fn start_session(
        &self,
        learner_id: Uuid,
        session_type: SessionType,
        now: DateTime<Utc>,
    ) -> Result<PracticeSession> {
        // Fails with NotFound for unknown learners.
        self.learner(learner_id).await?;

        let session = PracticeSession {
            id: Uuid::new_v4(),
            learner_id,
            session_type,
            questions_answered: 0,
            correct_answers: 0,
            xp_earned: 0,
            duration_secs: 0,
            started_at: now,
            completed_at: None,
        };
        self.store.save_session(&session).await?;

        tracing::info!(
            learner_id = %learner_id,
            session_id = %session.id,
            ?session_type,
            "Session started"
        );
        Ok(session)
    }

    /// Get one of the learner's sessions
    pub async fn session(&self, learner_id: Uuid, session_id: Uuid) -> Result<PracticeSession> {
        self.store
            .get_session(session_id)
            .await?
            .filter(|s| s.learner_id == learner_id)
            .ok_or_else(|| ServiceError::NotFound(format!("Session {}", session_id)))
    }

    /// Sessions newest first, paginated
    pub async fn session_history(
        &self,
        learner_id: Uuid,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<PracticeSession>> {
        let mut sessions = self.store.list_sessions(learner_id).await?;
        sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(sessions.into_iter().skip(offset).take(limit).collect())
    }

    /// Finish a session, fold its totals into today's activity and extend
    /// the learner's streak.
    pub async fn complete_session(
        &self,
        learner_id: Uuid,
        session_id: Uuid,
        duration_secs: u32,
        now: DateTime<Utc>,
    ) -> Result<PracticeSession> {
        let _guard = self.locks.acquire(learner_id).await;

        let mut session = self.open_session(learner_id, session_id).await?;
        let mut learner = self.learner(learner_id).await?;

        session.completed_at = Some(now);
        session.duration_secs = duration_secs;
        self.store.save_session(&session).await?;

        let today = now.date_naive();
        let mut activity = self
            .store
            .get_daily_activity(learner_id, today)
            .await?
            .unwrap_or_else(|| DailyActivity::empty(learner_id, today));
        activity.xp_earned = activity.xp_earned.saturating_add(session.xp_earned);
        activity.questions_answered = activity
            .questions_answered
            .saturating_add(session.questions_answered);
        activity.correct_answers = activity
            .correct_answers
            .saturating_add(session.correct_answers);
        activity.streak_maintained = true;
        self.store.save_daily_activity(&activity).await?;

        learner.streak = learner.streak.record_activity(today);
        learner.last_active_at = Some(now);
        learner.updated_at = now;
        self.store.save_learner(&learner).await?;

        tracing::info!(
            learner_id = %learner_id,
            session_id = %session_id,
            questions = session.questions_answered,
            xp = session.xp_earned,
            streak = learner.streak.current,
            "Session completed"
        );
        Ok(session)
    }

    /// Load a session that belongs to the learner and is still running
    pub(crate) async fn open_session(
        &self,
        learner_id: Uuid,
        session_id: Uuid,
    ) -> Result<PracticeSession> {
        let session = self.session(learner_id, session_id).await?;
        if session.is_completed() {
            tracing::warn!(session_id = %session_id, "Rejected use of completed session");
            return Err(ServiceError::BadRequest(format!(
                "Session {} is already completed",
                session_id
            )));
        }
        Ok(session)
    }
}
