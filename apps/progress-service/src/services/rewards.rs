//! Daily reward claims

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ProgressService;
use crate::error::{Result, ServiceError};
use crate::models::*;
use crate::store::ProgressStore;

impl<S: ProgressStore> ProgressService<S> {
    /// Grant the daily gem reward. Only one claim per learner per day.
    pub async fn claim_daily_reward(
        &self,
        learner_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<RewardClaim> {
        let _guard = self.locks.acquire(learner_id).await;

        let today = now.date_naive();
        let mut learner = self.learner(learner_id).await?;
        let mut activity = self
            .store
            .get_daily_activity(learner_id, today)
            .await?
            .unwrap_or_else(|| DailyActivity::empty(learner_id, today));

        if activity.goals_completed > 0 {
            tracing::warn!(learner_id = %learner_id, %today, "Daily reward already claimed");
            return Err(ServiceError::BadRequest(
                "Daily reward already claimed".to_string(),
            ));
        }

        let gems_reward = self.config.daily_reward_gems;
        learner.gems = learner.gems.saturating_add(gems_reward);
        learner.updated_at = now;
        self.store.save_learner(&learner).await?;

        activity.goals_completed += 1;
        self.store.save_daily_activity(&activity).await?;

        tracing::info!(learner_id = %learner_id, gems_reward, "Daily reward claimed");
        Ok(RewardClaim {
            gems_reward,
            total_gems: learner.gems,
        })
    }
}
