use chrono::{DateTime, Utc};
use db::models::exam::{ExamDuration, Model as ExamModel};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DURATION_MESSAGE: &str = "Duration must be one of 10, 15, 30, 45, 60, 90, 120 minutes";

#[derive(Debug, Deserialize, Validate)]
pub struct ExamRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    /// Exam length in minutes. Only the closed set of allowed durations is
    /// accepted.
    pub duration: u32,
    #[validate(range(min = 1, message = "subject_id must be a positive id"))]
    pub subject_id: i64,
    /// Replacement quiz membership. Omitted means an empty exam on create
    /// and unchanged membership on update.
    pub quiz_ids: Option<Vec<i64>>,
}

impl ExamRequest {
    pub fn parsed_duration(&self) -> Option<ExamDuration> {
        ExamDuration::from_minutes(self.duration)
    }

    /// Requested quiz ids with duplicates dropped, first occurrence wins.
    /// Duplicate ids would trip the join table's composite key.
    pub fn deduped_quiz_ids(&self) -> Option<Vec<i64>> {
        self.quiz_ids.as_ref().map(|ids| {
            let mut seen = std::collections::HashSet::new();
            ids.iter()
                .copied()
                .filter(|id| seen.insert(*id))
                .collect()
        })
    }
}

#[derive(Debug, Serialize, Default)]
pub struct ExamResponse {
    pub id: i64,
    pub title: String,
    pub duration: u32,
    pub subject_id: i64,
    pub quiz_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExamResponse {
    pub fn from_model(exam: ExamModel, quiz_ids: Vec<i64>) -> Self {
        Self {
            id: exam.id,
            duration: exam.duration.minutes(),
            title: exam.title,
            subject_id: exam.subject_id,
            quiz_ids,
            created_at: exam.created_at,
            updated_at: exam.updated_at,
        }
    }
}
