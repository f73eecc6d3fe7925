//! Test fixtures and factory functions for creating test data.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use lexiquest_progress::models::{AnswerSubmission, CefrLevel, Question, QuestionType};

/// Fixed reference time so review dates are predictable.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 10, 30, 0).unwrap()
}

/// Build a question in `topic` at level A1.
pub fn question(topic: &str, correct_answer: Value, xp_reward: Option<u32>) -> Question {
    question_at(topic, CefrLevel::A1, correct_answer, xp_reward)
}

/// Build a question in `topic` at `level`.
pub fn question_at(
    topic: &str,
    level: CefrLevel,
    correct_answer: Value,
    xp_reward: Option<u32>,
) -> Question {
    let question_type = if correct_answer.is_array() {
        QuestionType::SentenceOrder
    } else {
        QuestionType::FillBlank
    };

    Question {
        id: Uuid::new_v4(),
        question_text: format!("Practice question about {}", topic),
        question_type,
        level,
        topic: topic.to_string(),
        difficulty: 1,
        options: None,
        correct_answer,
        explanation: Some(format!("Explanation for {}", topic)),
        xp_reward,
    }
}

/// Create an answer submission without a session.
pub fn submission(question_id: Uuid, answer: Value, time_taken_ms: i64) -> AnswerSubmission {
    AnswerSubmission {
        question_id,
        answer,
        time_taken_ms: Some(time_taken_ms),
        session_id: None,
    }
}

/// Create an answer submission inside a session.
pub fn session_submission(
    question_id: Uuid,
    session_id: Uuid,
    answer: Value,
    time_taken_ms: i64,
) -> AnswerSubmission {
    AnswerSubmission {
        session_id: Some(session_id),
        ..submission(question_id, answer, time_taken_ms)
    }
}
