use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use db::models::quiz::Entity as QuizEntity;
use db::models::subject::Entity as SubjectEntity;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, IntoActiveModel};
use util::{answer_set, state::AppState};
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use crate::routes::quizzes::common::{QuizRequest, QuizResponse};

/// PUT /api/quizzes/{quiz_id}
///
/// Replace a quiz's content. Admin only.
///
/// The full quiz body is required; partial updates are not supported.
///
/// ### Responses
/// - `200 OK` with the updated quiz
/// - `400 Bad Request` on validation failure or out-of-range answer indices
/// - `404 Not Found` when the quiz or target subject does not exist
/// - `500 Internal Server Error` on database faults
pub async fn edit_quiz(
    State(app_state): State<AppState>,
    Path(quiz_id): Path<i64>,
    Json(req): Json<QuizRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let quiz = match QuizEntity::find_by_id(quiz_id).one(db).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<QuizResponse>::error(format!(
                    "Quiz not found with id: {}",
                    quiz_id
                ))),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<QuizResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<QuizResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    if req.invalid_index().is_some() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<QuizResponse>::error(
                "Each correct answer must reference a valid option index",
            )),
        );
    }

    match SubjectEntity::find_by_id(req.subject_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<QuizResponse>::error(format!(
                    "Subject not found with id: {}",
                    req.subject_id
                ))),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<QuizResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    let mut active = quiz.into_active_model();
    active.subject_id = Set(req.subject_id);
    active.question = Set(req.question.clone());
    active.options = Set(answer_set::encode_options(&req.options));
    active.correct_answers = Set(answer_set::encode_indices(&req.correct_answers));
    active.multiple_choice = Set(req.multiple_choice);
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(updated) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                QuizResponse::from(updated),
                "Quiz updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<QuizResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}
