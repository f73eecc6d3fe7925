//! Answer submission: correctness, mastery, review date, XP and level

use chrono::{DateTime, Utc};
use lexiquest_core::{compare_answers, Answer, AnswerContext};
use uuid::Uuid;

use super::ProgressService;
use crate::error::{Result, ServiceError};
use crate::models::*;
use crate::store::ProgressStore;

impl<S: ProgressStore> ProgressService<S> {
    /// Score one answer and persist the learner's updated progress.
    pub async fn submit_answer(
        &self,
        learner_id: Uuid,
        submission: AnswerSubmission,
        now: DateTime<Utc>,
    ) -> Result<AnswerOutcome> {
        let question = self
            .store
            .get_question(submission.question_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Question {}", submission.question_id))
            })?;

        let correct_answer = Answer::from_stored(&question.correct_answer)?;
        let submitted = Answer::from_submitted(&submission.answer);
        let matched = compare_answers(&submitted, &correct_answer);
        let is_correct = matched.is_correct;
        let time_taken_ms = submission.time_taken_ms.unwrap_or(0).max(0) as u64;

        let _guard = self.locks.acquire(learner_id).await;
        let mut learner = self.learner(learner_id).await?;

        // Validate the session before anything is written.
        let mut session = match submission.session_id {
            Some(session_id) => Some(self.open_session(learner_id, session_id).await?),
            None => None,
        };

        let scoring = &self.config.scoring;
        let existing = self.store.get_progress(learner_id, question.id).await?;
        let current_mastery = existing.as_ref().map(|p| p.mastery).unwrap_or_default();
        let schedule = scoring.review.schedule(current_mastery, is_correct, now);

        let ctx = AnswerContext {
            base_xp_reward: scoring.xp.base_reward(question.xp_reward),
            is_correct,
            time_taken_ms,
            current_streak: learner.streak.effective(now.date_naive()),
        };
        let xp_earned = scoring.xp.award(&ctx);
        tracing::debug!(?ctx, xp_earned, "Computed XP award");

        let record = match existing {
            Some(previous) => ProgressRecord {
                is_correct,
                time_taken_ms,
                attempts: previous.attempts.saturating_add(1),
                mastery: schedule.mastery,
                last_attempted_at: now,
                next_review_at: schedule.next_review_at,
                ..previous
            },
            None => ProgressRecord {
                id: Uuid::new_v4(),
                learner_id,
                question_id: question.id,
                is_correct,
                time_taken_ms,
                attempts: 1,
                mastery: schedule.mastery,
                last_attempted_at: now,
                next_review_at: schedule.next_review_at,
                created_at: now,
            },
        };
        self.store.save_progress(&record).await?;

        let previous_level = scoring.level_curve.level_for(learner.total_xp).level;
        learner.total_xp = learner.total_xp.saturating_add(xp_earned);
        let level = scoring.level_curve.level_for(learner.total_xp);
        learner.level_number = level.level;
        learner.last_active_at = Some(now);
        learner.updated_at = now;
        self.store.save_learner(&learner).await?;

        if let Some(session) = session.as_mut() {
            session.questions_answered = session.questions_answered.saturating_add(1);
            if is_correct {
                session.correct_answers = session.correct_answers.saturating_add(1);
            }
            session.xp_earned = session.xp_earned.saturating_add(xp_earned);
            self.store.save_session(session).await?;
        }

        let leveled_up = level.level > previous_level;
        tracing::info!(
            learner_id = %learner_id,
            question_id = %question.id,
            is_correct,
            xp_earned,
            mastery = schedule.mastery.value(),
            level = level.level,
            leveled_up,
            "Answer scored"
        );

        Ok(AnswerOutcome {
            is_correct,
            xp_earned,
            mastery_level: schedule.mastery,
            next_review_at: schedule.next_review_at,
            total_xp: learner.total_xp,
            level,
            leveled_up,
            explanation: question.explanation,
            correct_answer,
            submitted_normalized: matched.submitted_normalized,
            correct_normalized: matched.correct_normalized,
        })
    }
}
