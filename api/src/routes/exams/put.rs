use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use db::models::exam::Entity as ExamEntity;
use db::models::quiz::{Column as QuizColumn, Entity as QuizEntity};
use db::models::subject::Entity as SubjectEntity;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
};
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use crate::routes::exams::common::{DURATION_MESSAGE, ExamRequest, ExamResponse};

/// PUT /api/exams/{exam_id}
///
/// Replace an exam's title, duration and subject, and optionally its quiz
/// membership. Admin only.
///
/// When `quiz_ids` is present the membership is replaced wholesale; when it
/// is omitted the current membership is kept. Past submissions are never
/// rewritten by a membership change, but their reviews are rebuilt against
/// the new membership.
///
/// ### Responses
/// - `200 OK` with the updated exam
/// - `400 Bad Request` on validation failure or a disallowed duration
/// - `404 Not Found` when the exam, subject or any referenced quiz does not exist
/// - `500 Internal Server Error` on database faults
pub async fn edit_exam(
    State(app_state): State<AppState>,
    Path(exam_id): Path<i64>,
    Json(req): Json<ExamRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    let exam = match ExamEntity::find_by_id(exam_id).one(db).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ExamResponse>::error(format!(
                    "Exam not found with id: {}",
                    exam_id
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
    };

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

    let new_quiz_ids = req.deduped_quiz_ids();

    if let Some(ids) = &new_quiz_ids {
        if !ids.is_empty() {
            let found: HashSet<i64> = match QuizEntity::find()
                .filter(QuizColumn::Id.is_in(ids.clone()))
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

            if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<ExamResponse>::error(format!(
                        "Quiz not found with id: {}",
                        missing
                    ))),
                );
            }
        }
    }

    let mut active = exam.into_active_model();
    active.title = Set(req.title.clone());
    active.duration = Set(duration);
    active.subject_id = Set(req.subject_id);
    active.updated_at = Set(Utc::now());

    let updated = match active.update(db).await {
        Ok(updated) => updated,
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

    let quiz_ids = match new_quiz_ids {
        Some(ids) => {
            if let Err(e) = updated.replace_quizzes(db, &ids).await {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<ExamResponse>::error(format!(
                        "Database error: {}",
                        e
                    ))),
                );
            }
            ids
        }
        None => match updated.quizzes(db).await {
            Ok(quizzes) => quizzes.into_iter().map(|q| q.id).collect(),
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<ExamResponse>::error(format!(
                        "Database error: {}",
                        e
                    ))),
                );
            }
        },
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            ExamResponse::from_model(updated, quiz_ids),
            "Exam updated successfully",
        )),
    )
}
