use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::exam::Entity as ExamEntity;
use sea_orm::{EntityTrait, ModelTrait};
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;

/// DELETE /api/exams/{exam_id}
///
/// Remove an exam. Admin only. The cascade also removes its quiz links and
/// any recorded results.
///
/// ### Responses
/// - `200 OK` on success
/// - `404 Not Found` when the exam does not exist
/// - `500 Internal Server Error` on database faults
pub async fn delete_exam(
    State(app_state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    let exam = match ExamEntity::find_by_id(exam_id).one(db).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Empty>::error(format!(
                    "Exam not found with id: {}",
                    exam_id
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

    match exam.delete(db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Exam deleted successfully")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(format!("Database error: {}", e))),
        ),
    }
}
