use std::borrow::Cow;
use std::collections::HashMap;

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use db::grading::grade;
use db::models::exam::Entity as ExamEntity;
use db::models::exam_result::Model as ExamResultModel;
use db::models::user::Entity as UserEntity;
use once_cell::sync::Lazy;
use sea_orm::EntityTrait;
use serde::Deserialize;
use util::{answer_set, state::AppState};
use validator::{Validate, ValidationError};

use crate::auth::AuthUser;
use crate::policy::{Checker, Policy, PolicyError};
use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use crate::routes::exam_results::common::{ResultDetail, build_review};

#[derive(Debug, Deserialize, Validate)]
pub struct ExamSubmitRequest {
    #[validate(range(min = 1, message = "Exam ID must be a positive number"))]
    pub exam_id: i64,
    #[validate(range(min = 1, message = "User ID must be a positive number"))]
    pub user_id: i64,
    /// Client-measured seconds; stored verbatim, never re-checked against
    /// the exam duration.
    #[validate(range(min = 0, message = "Time taken cannot be negative"))]
    pub time_taken: i32,
    /// Quiz id to selected option indices. A blank submission is an empty
    /// map, not a missing field.
    #[validate(custom(function = "validate_answers"))]
    pub answers: HashMap<i64, Vec<i64>>,
}

fn validate_answers(answers: &HashMap<i64, Vec<i64>>) -> Result<(), ValidationError> {
    for (quiz_id, selection) in answers {
        if *quiz_id <= 0 {
            return Err(ValidationError::new("answers")
                .with_message(Cow::Borrowed("Quiz ID key must be positive")));
        }
        if selection.iter().any(|&index| index < 0) {
            return Err(ValidationError::new("answers")
                .with_message(Cow::Borrowed("Answer index cannot be negative")));
        }
    }
    Ok(())
}

/// Submitting on someone else's behalf requires admin claims.
static SUBMIT_POLICY: Lazy<Policy<ExamSubmitRequest>> =
    Lazy::new(|| Policy::new().require(Checker::CallerIs, |req| Some(req.user_id)));

/// POST /api/exam-results/submit
///
/// Grade a submission against the exam's current quiz set and record the
/// result. Every call creates a new row; resubmission is allowed and never
/// merges with an earlier attempt.
///
/// ### Request Body
/// ```json
/// {
///   "exam_id": 1,
///   "user_id": 2,
///   "time_taken": 300,
///   "answers": { "1": [1], "2": [0, 3] }
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the result and its per-question review
/// - `400 Bad Request` on validation failure
/// - `403 Forbidden` when submitting for another user without admin claims
/// - `404 Not Found` when the user or exam does not exist
/// - `500 Internal Server Error` on database faults
pub async fn submit_exam(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<ExamSubmitRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ResultDetail>::error(
                format_validation_errors(&e),
            )),
        );
    }

    match SUBMIT_POLICY.authorize(db, &claims, &req).await {
        Ok(()) => {}
        Err(PolicyError::Denied) => {
            return (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::<ResultDetail>::error("Access denied")),
            );
        }
        Err(PolicyError::Db(e)) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResultDetail>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    match UserEntity::find_by_id(req.user_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ResultDetail>::error(format!(
                    "User not found id: {}",
                    req.user_id
                ))),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResultDetail>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    let exam = match ExamEntity::find_by_id(req.exam_id).one(db).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ResultDetail>::error(format!(
                    "Exam not found id: {}",
                    req.exam_id
                ))),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResultDetail>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    // An exam with no quizzes is still submittable and grades to zero.
    let quizzes = match exam.quizzes(db).await {
        Ok(quizzes) => quizzes,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResultDetail>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let grading = grade(&quizzes, &req.answers);
    let history = answer_set::encode_history(&req.answers);

    let result = match ExamResultModel::create(
        db,
        req.user_id,
        req.exam_id,
        grading.score,
        grading.correct,
        grading.incorrect,
        req.time_taken,
        &history,
    )
    .await
    {
        Ok(result) => result,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResultDetail>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    // The review is built from the quiz set that was just graded, so the
    // returned detail is consistent even if the exam is edited right after.
    let items = build_review(&quizzes, &req.answers);

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            ResultDetail::from_parts(result, exam.title, items),
            "Exam submitted successfully",
        )),
    )
}
