//! Stored records and service request/response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// Re-export shared types from lexiquest-core
pub use lexiquest_core::{Answer, CefrLevel, LevelInfo, MasteryLevel, Streak};

// === Stored Records ===

/// Learner account as seen by the progress service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Learner {
    pub id: Uuid,
    pub username: String,
    pub cefr_level: CefrLevel,
    pub total_xp: u64,
    pub level_number: u32,
    #[serde(flatten)]
    pub streak: Streak,
    pub gems: u32,
    pub hearts: u32,
    /// Last answer submission or session completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Learner {
    pub const DEFAULT_HEARTS: u32 = 5;

    /// Create a fresh learner at level 1 with no XP
    pub fn new(username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            cefr_level: CefrLevel::default(),
            total_xp: 0,
            level_number: 1,
            streak: Streak::default(),
            gems: 0,
            hearts: Self::DEFAULT_HEARTS,
            last_active_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Kind of practice question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    FillBlank,
    SentenceOrder,
    Audio,
    Image,
}

/// Practice question. `correct_answer` is kept as raw JSON, exactly as the
/// question bank stores it, and resolved with [`Answer::from_stored`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub question_text: String,
    pub question_type: QuestionType,
    pub level: CefrLevel,
    pub topic: String,
    pub difficulty: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    pub correct_answer: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xp_reward: Option<u32>,
}

/// Catalog query. Unset fields match every question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionFilter {
    #[serde(default)]
    pub level: Option<CefrLevel>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub question_type: Option<QuestionType>,
    #[serde(default = "QuestionFilter::default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

impl QuestionFilter {
    pub const DEFAULT_LIMIT: usize = 50;

    fn default_limit() -> usize {
        Self::DEFAULT_LIMIT
    }

    /// Every question at `level`, unpaginated
    pub fn at_level(level: CefrLevel) -> Self {
        Self {
            level: Some(level),
            limit: usize::MAX,
            ..Self::default()
        }
    }

    /// Every question in `topic`, unpaginated
    pub fn in_topic(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            limit: usize::MAX,
            ..Self::default()
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        self.level.map_or(true, |level| question.level == level)
            && self
                .topic
                .as_deref()
                .map_or(true, |topic| question.topic == topic)
            && self
                .difficulty
                .map_or(true, |difficulty| question.difficulty == difficulty)
            && self
                .question_type
                .map_or(true, |kind| question.question_type == kind)
    }
}

impl Default for QuestionFilter {
    fn default() -> Self {
        Self {
            level: None,
            topic: None,
            difficulty: None,
            question_type: None,
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Latest attempt state for one (learner, question) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: Uuid,
    pub learner_id: Uuid,
    pub question_id: Uuid,
    pub is_correct: bool,
    pub time_taken_ms: u64,
    pub attempts: u32,
    pub mastery: MasteryLevel,
    pub last_attempted_at: DateTime<Utc>,
    pub next_review_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Kind of practice session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    #[default]
    Practice,
    Test,
    Review,
}

/// A run of answers grouped for the dashboard and daily activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeSession {
    pub id: Uuid,
    pub learner_id: Uuid,
    pub session_type: SessionType,
    pub questions_answered: u32,
    pub correct_answers: u32,
    pub xp_earned: u64,
    pub duration_secs: u32,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl PracticeSession {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Per-learner totals for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub learner_id: Uuid,
    pub date: NaiveDate,
    pub xp_earned: u64,
    pub questions_answered: u32,
    pub correct_answers: u32,
    pub streak_maintained: bool,
    pub goals_completed: u32,
}

impl DailyActivity {
    /// Empty activity row for a learner and day
    pub fn empty(learner_id: Uuid, date: NaiveDate) -> Self {
        Self {
            learner_id,
            date,
            xp_earned: 0,
            questions_answered: 0,
            correct_answers: 0,
            streak_maintained: false,
            goals_completed: 0,
        }
    }
}

// === Service Request/Response Types ===

/// Answer submitted by a learner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: Uuid,
    pub answer: Value,
    /// Milliseconds spent answering. Negative values from clients are
    /// treated as zero.
    #[serde(default)]
    pub time_taken_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
}

/// Result of scoring a submitted answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub xp_earned: u64,
    pub mastery_level: MasteryLevel,
    pub next_review_at: DateTime<Utc>,
    pub total_xp: u64,
    pub level: LevelInfo,
    pub leveled_up: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub correct_answer: Answer,
    /// Submitted answer in the form it was compared in
    pub submitted_normalized: String,
    pub correct_normalized: String,
}

/// Answer totals across a learner's progress records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressOverview {
    pub total_questions_answered: u32,
    pub correct_answers: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_time_taken_ms: Option<f64>,
    pub unique_questions_answered: u32,
}

/// Answered/correct counts for one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats<K> {
    pub key: K,
    pub answered: u32,
    pub correct: u32,
}

/// Overall totals with breakdowns by CEFR level and topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedStats {
    pub overall: ProgressOverview,
    pub by_level: Vec<GroupStats<CefrLevel>>,
    pub by_topic: Vec<GroupStats<String>>,
}

/// Topic and level where the learner's accuracy is low
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakArea {
    pub topic: String,
    pub level: CefrLevel,
    pub total_attempts: u32,
    pub correct_attempts: u32,
    /// Percentage in `[0, 100]`
    pub accuracy: f64,
}

/// Question due for review with its current mastery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    pub question: Question,
    pub mastery: MasteryLevel,
    pub next_review_at: DateTime<Utc>,
}

/// Leaderboard time window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardPeriod {
    Daily,
    #[default]
    Weekly,
    Monthly,
    AllTime,
}

impl LeaderboardPeriod {
    /// Parse from a query value; unknown values mean all-time.
    pub fn parse(s: &str) -> Self {
        match s {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::AllTime,
        }
    }

    /// Number of days (including today) a learner's last activity may lie
    /// within, or `None` for no limit.
    pub fn window_days(self) -> Option<i64> {
        match self {
            Self::Daily => Some(1),
            Self::Weekly => Some(7),
            Self::Monthly => Some(30),
            Self::AllTime => None,
        }
    }
}

/// One ranked leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub learner_id: Uuid,
    pub username: String,
    pub total_xp: u64,
    pub current_streak: u32,
    pub level_number: u32,
}

/// Leaderboard plus the requesting learner's overall rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub learner_rank: u32,
}

/// Dashboard summary of a learner's gamification state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamificationStats {
    pub total_xp: u64,
    pub level: LevelInfo,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub gems: u32,
    pub hearts: u32,
    pub cefr_level: CefrLevel,
}

/// Gems granted by a daily reward claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardClaim {
    pub gems_reward: u32,
    pub total_gems: u32,
}
