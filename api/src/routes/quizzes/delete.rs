use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::quiz::Entity as QuizEntity;
use sea_orm::{EntityTrait, ModelTrait};
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;

/// DELETE /api/quizzes/{quiz_id}
///
/// Remove a quiz. Admin only. Exam links to the quiz are removed by the
/// cascade; past submissions keep their recorded history.
///
/// ### Responses
/// - `200 OK` on success
/// - `404 Not Found` when the quiz does not exist
/// - `500 Internal Server Error` on database faults
pub async fn delete_quiz(
    State(app_state): State<AppState>,
    Path(quiz_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let quiz = match QuizEntity::find_by_id(quiz_id).one(db).await {
        Ok(Some(quiz)) => quiz,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Empty>::error(format!(
                    "Quiz not found with id: {}",
                    quiz_id
                ))),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error(format!("Database error: {}", e))),
            );
        }
    };

    match quiz.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Quiz deleted successfully")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(format!("Database error: {}", e))),
        ),
    }
}
