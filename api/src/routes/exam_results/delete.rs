use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::exam_result::{Entity as ResultEntity, Model as ExamResultModel};
use sea_orm::EntityTrait;
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;

/// DELETE /api/exam-results/{result_id}
///
/// Permanently remove a result. Admin only. The referenced user, exam and
/// quizzes are untouched.
///
/// ### Responses
/// - `200 OK` on success
/// - `404 Not Found` when the result does not exist
/// - `500 Internal Server Error` on database faults
pub async fn delete_result(
    State(app_state): State<AppState>,
    Path(result_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match ResultEntity::find_by_id(result_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<Empty>::error(format!(
                    "Result not found id: {}",
                    result_id
                ))),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Empty>::error(format!("Database error: {}", e))),
            );
        }
    }

    match ExamResultModel::delete(db, result_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                Empty,
                "Exam result deleted successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Empty>::error(format!("Database error: {}", e))),
        ),
    }
}
