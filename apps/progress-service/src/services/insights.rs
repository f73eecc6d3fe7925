//! Dashboard statistics, weak areas, review queue and leaderboard
//!
//! The aggregations are plain functions over loaded records so they can be
//! tested without a store; the service methods only load and delegate.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use super::ProgressService;
use crate::error::Result;
use crate::models::*;
use crate::store::ProgressStore;

impl<S: ProgressStore> ProgressService<S> {
    /// Totals across all of the learner's progress records
    pub async fn progress_overview(&self, learner_id: Uuid) -> Result<ProgressOverview> {
        let records = self.store.list_progress(learner_id).await?;
        Ok(overview(&records))
    }

    /// Totals plus breakdowns by CEFR level and topic
    pub async fn detailed_stats(&self, learner_id: Uuid) -> Result<DetailedStats> {
        let joined = self.progress_with_questions(learner_id).await?;
        Ok(detailed_stats(&joined))
    }

    /// Topic/level groups below the configured accuracy threshold
    pub async fn weak_areas(&self, learner_id: Uuid) -> Result<Vec<WeakArea>> {
        let joined = self.progress_with_questions(learner_id).await?;
        Ok(weak_areas(&joined, self.config.weak_area_threshold))
    }

    /// Questions due for review at `now`, most overdue first
    pub async fn review_queue(
        &self,
        learner_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReviewItem>> {
        let joined = self.progress_with_questions(learner_id).await?;
        Ok(review_queue(joined, now, self.config.review_queue_limit))
    }

    /// Ranked learners for `period`, plus this learner's overall rank
    pub async fn leaderboard(
        &self,
        learner_id: Uuid,
        period: LeaderboardPeriod,
        today: NaiveDate,
    ) -> Result<Leaderboard> {
        let learner = self.learner(learner_id).await?;
        let learners = self.store.list_learners().await?;
        Ok(leaderboard(
            &learners,
            learner.total_xp,
            period,
            today,
            self.config.leaderboard_limit,
        ))
    }

    /// XP, level, streak and currency summary
    pub async fn gamification_stats(&self, learner_id: Uuid) -> Result<GamificationStats> {
        let learner = self.learner(learner_id).await?;
        Ok(GamificationStats {
            total_xp: learner.total_xp,
            level: self.config.scoring.level_curve.level_for(learner.total_xp),
            current_streak: learner.streak.current,
            longest_streak: learner.streak.longest,
            gems: learner.gems,
            hearts: learner.hearts,
            cefr_level: learner.cefr_level,
        })
    }

    /// Progress records joined with their questions. Records whose question
    /// has been removed are skipped.
    async fn progress_with_questions(
        &self,
        learner_id: Uuid,
    ) -> Result<Vec<(ProgressRecord, Question)>> {
        let records = self.store.list_progress(learner_id).await?;
        let mut joined = Vec::with_capacity(records.len());
        for record in records {
            if let Some(question) = self.store.get_question(record.question_id).await? {
                joined.push((record, question));
            }
        }
        Ok(joined)
    }
}

pub fn overview(records: &[ProgressRecord]) -> ProgressOverview {
    if records.is_empty() {
        return ProgressOverview::default();
    }

    let total = records.len() as u32;
    let correct = records.iter().filter(|r| r.is_correct).count() as u32;
    let time_sum: f64 = records.iter().map(|r| r.time_taken_ms as f64).sum();
    let unique: HashSet<Uuid> = records.iter().map(|r| r.question_id).collect();

    ProgressOverview {
        total_questions_answered: total,
        correct_answers: correct,
        avg_time_taken_ms: Some(time_sum / total as f64),
        unique_questions_answered: unique.len() as u32,
    }
}

pub fn detailed_stats(joined: &[(ProgressRecord, Question)]) -> DetailedStats {
    let mut by_level: BTreeMap<CefrLevel, (u32, u32)> = BTreeMap::new();
    let mut by_topic: BTreeMap<String, (u32, u32)> = BTreeMap::new();

    for (record, question) in joined {
        tally(by_level.entry(question.level).or_default(), record.is_correct);
        tally(
            by_topic.entry(question.topic.clone()).or_default(),
            record.is_correct,
        );
    }

    let records: Vec<ProgressRecord> = joined.iter().map(|(r, _)| r.clone()).collect();
    DetailedStats {
        overall: overview(&records),
        by_level: into_groups(by_level),
        by_topic: into_groups(by_topic),
    }
}

pub fn weak_areas(joined: &[(ProgressRecord, Question)], threshold: f64) -> Vec<WeakArea> {
    let mut groups: BTreeMap<(String, CefrLevel), (u32, u32)> = BTreeMap::new();
    for (record, question) in joined {
        tally(
            groups
                .entry((question.topic.clone(), question.level))
                .or_default(),
            record.is_correct,
        );
    }

    let mut areas: Vec<WeakArea> = groups
        .into_iter()
        .map(|((topic, level), (total, correct))| WeakArea {
            topic,
            level,
            total_attempts: total,
            correct_attempts: correct,
            accuracy: correct as f64 / total as f64 * 100.0,
        })
        .filter(|area| area.accuracy < threshold)
        .collect();

    // Stable sort keeps topic/level order among equal accuracies.
    areas.sort_by(|a, b| a.accuracy.total_cmp(&b.accuracy));
    areas
}

pub fn review_queue(
    joined: Vec<(ProgressRecord, Question)>,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<ReviewItem> {
    let mut due: Vec<ReviewItem> = joined
        .into_iter()
        .filter(|(record, _)| record.next_review_at <= now && !record.mastery.is_mastered())
        .map(|(record, question)| ReviewItem {
            question,
            mastery: record.mastery,
            next_review_at: record.next_review_at,
        })
        .collect();

    due.sort_by_key(|item| item.next_review_at);
    due.truncate(limit);
    due
}

/// Rank learners with XP by total XP. `period` keeps only learners who
/// answered or finished a session within the window ending on `today`.
/// The returned `learner_rank` is the rank of `learner_xp` among all
/// learners regardless of period.
pub fn leaderboard(
    learners: &[Learner],
    learner_xp: u64,
    period: LeaderboardPeriod,
    today: NaiveDate,
    limit: usize,
) -> Leaderboard {
    let earliest = period
        .window_days()
        .map(|days| today - Duration::days(days - 1));

    let mut ranked: Vec<&Learner> = learners
        .iter()
        .filter(|l| l.total_xp > 0)
        .filter(|l| match earliest {
            Some(earliest) => l
                .last_active_at
                .is_some_and(|at| at.date_naive() >= earliest),
            None => true,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.total_xp
            .cmp(&a.total_xp)
            .then_with(|| a.username.cmp(&b.username))
    });

    let entries = ranked
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, l)| LeaderboardEntry {
            rank: i as u32 + 1,
            learner_id: l.id,
            username: l.username.clone(),
            total_xp: l.total_xp,
            current_streak: l.streak.current,
            level_number: l.level_number,
        })
        .collect();

    let ahead = learners.iter().filter(|l| l.total_xp > learner_xp).count() as u32;

    Leaderboard {
        entries,
        learner_rank: ahead + 1,
    }
}

fn tally(counts: &mut (u32, u32), is_correct: bool) {
    counts.0 += 1;
    if is_correct {
        counts.1 += 1;
    }
}

fn into_groups<K>(groups: BTreeMap<K, (u32, u32)>) -> Vec<GroupStats<K>> {
    groups
        .into_iter()
        .map(|(key, (answered, correct))| GroupStats {
            key,
            answered,
            correct,
        })
        .collect()
}
