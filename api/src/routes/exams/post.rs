use std::collections::HashSet;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::exam::Model as ExamModel;
use db::models::quiz::{Column as QuizColumn, Entity as QuizEntity};
use db::models::subject::Entity as SubjectEntity;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use crate::routes::exams::common::{DURATION_MESSAGE, ExamRequest, ExamResponse};

/// POST /api/exams
///
/// Create a new exam and link its quiz membership. Admin only.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Algebra Midterm",
///   "duration": 45,
///   "subject_id": 1,
///   "quiz_ids": [3, 5, 8]
/// }
/// ```
///
/// An omitted `quiz_ids` creates an exam with no questions, which is valid
/// and grades every submission to zero.
///
/// ### Responses
/// - `201 Created` with the stored exam
/// - `400 Bad Request` on validation failure or a disallowed duration
/// - `404 Not Found` when the subject or any referenced quiz does not exist
/// - `500 Internal Server Error` on database faults
pub async fn create_exam(
    State(app_state): State<AppState>,
    Json(req): Json<ExamRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ExamResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    let Some(duration) = req.parsed_duration() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ExamResponse>::error(DURATION_MESSAGE)),
        );
    };

    match SubjectEntity::find_by_id(req.subject_id).one(db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ExamResponse>::error(format!(
                    "Subject not found with id: {}",
                    req.subject_id
                ))),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ExamResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    let quiz_ids = req.deduped_quiz_ids().unwrap_or_default();

    if !quiz_ids.is_empty() {
        let found: HashSet<i64> = match QuizEntity::find()
            .filter(QuizColumn::Id.is_in(quiz_ids.clone()))
            .all(db)
            .await
        {
            Ok(rows) => rows.into_iter().map(|q| q.id).collect(),
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<ExamResponse>::error(format!(
                        "Database error: {}",
                        e
                    ))),
                );
            }
        };

        if let Some(missing) = quiz_ids.iter().find(|id| !found.contains(id)) {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ExamResponse>::error(format!(
                    "Quiz not found with id: {}",
                    missing
                ))),
            );
        }
    }

    let exam = match ExamModel::create(db, &req.title, duration, req.subject_id).await {
        Ok(exam) => exam,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ExamResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if let Err(e) = exam.replace_quizzes(db, &quiz_ids).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ExamResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        );
    }

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(
            ExamResponse::from_model(exam, quiz_ids),
            "Exam created successfully",
        )),
    )
}
