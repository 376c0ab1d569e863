use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use db::models::exam::{Column as ExamColumn, Entity as ExamEntity};
use db::models::exam_result::{Column as ResultColumn, Entity as ResultEntity};
use once_cell::sync::Lazy;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use util::{answer_set, state::AppState};
use validator::Validate;

use crate::auth::AuthUser;
use crate::policy::{Checker, Policy, PolicyError};
use crate::response::ApiResponse;
use crate::routes::common::format_validation_errors;
use crate::routes::exam_results::common::{ResultDetail, ResultSummary, build_review};

#[derive(Debug, Deserialize, Validate)]
pub struct ListResultsQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub user_id: Option<i64>,
    pub exam_id: Option<i64>,
    pub score_from: Option<f64>,
    pub score_to: Option<f64>,
    pub submitted_from: Option<DateTime<Utc>>,
    pub submitted_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Default)]
pub struct ResultListResponse {
    pub results: Vec<ResultSummary>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// Only applies when the caller filters by user: seeing your own history
/// is fine, someone else's requires admin claims. An unfiltered list is
/// not constrained by this pair.
static LIST_POLICY: Lazy<Policy<ListResultsQuery>> =
    Lazy::new(|| Policy::new().require(Checker::CallerIs, |query| query.user_id));

static DETAIL_POLICY: Lazy<Policy<i64>> =
    Lazy::new(|| Policy::new().require(Checker::ExamResultOwner, |id| Some(*id)));

/// GET /api/exam-results
///
/// Retrieve a paginated result history with optional filtering and sorting.
/// No review detail is included; fetch a single result for that.
///
/// ### Query Parameters
/// - `page` (optional): Page number (default: 1, min: 1)
/// - `per_page` (optional): Items per page (default: 20, min: 1, max: 100)
/// - `user_id` (optional): Filter by submitting user (policy-checked)
/// - `exam_id` (optional): Filter by exam
/// - `score_from` / `score_to` (optional): Inclusive score bounds
/// - `submitted_from` / `submitted_to` (optional): Inclusive RFC 3339
///   bounds on the submission time
/// - `sort` (optional): Comma-separated sort fields; `-` prefix for descending
///
/// ### Responses
/// - `200 OK` with `{ results, page, per_page, total }`
/// - `400 Bad Request` on invalid query parameters
/// - `403 Forbidden` when filtering on another user's history without admin claims
/// - `500 Internal Server Error` on database faults
pub async fn list_results(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Query(query): Query<ListResultsQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ResultListResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    match LIST_POLICY.authorize(db, &claims, &query).await {
        Ok(()) => {}
        Err(PolicyError::Denied) => {
            return (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::<ResultListResponse>::error("Access denied")),
            );
        }
        Err(PolicyError::Db(e)) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResultListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    }

    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(20);

    let mut condition = Condition::all();

    if let Some(user_id) = query.user_id {
        condition = condition.add(ResultColumn::UserId.eq(user_id));
    }

    if let Some(exam_id) = query.exam_id {
        condition = condition.add(ResultColumn::ExamId.eq(exam_id));
    }

    if let Some(score_from) = query.score_from {
        condition = condition.add(ResultColumn::Score.gte(score_from));
    }

    if let Some(score_to) = query.score_to {
        condition = condition.add(ResultColumn::Score.lte(score_to));
    }

    if let Some(submitted_from) = query.submitted_from {
        condition = condition.add(ResultColumn::CreatedAt.gte(submitted_from));
    }

    if let Some(submitted_to) = query.submitted_to {
        condition = condition.add(ResultColumn::CreatedAt.lte(submitted_to));
    }

    let mut query_builder = ResultEntity::find().filter(condition);

    if let Some(sort_param) = &query.sort {
        for sort_field in sort_param.split(',') {
            let (field, desc) = if let Some(stripped) = sort_field.strip_prefix('-') {
                (stripped, true)
            } else {
                (sort_field, false)
            };

            match field {
                "score" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(ResultColumn::Score)
                    } else {
                        query_builder.order_by_asc(ResultColumn::Score)
                    };
                }
                "time_taken" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(ResultColumn::TimeTaken)
                    } else {
                        query_builder.order_by_asc(ResultColumn::TimeTaken)
                    };
                }
                "created_at" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(ResultColumn::CreatedAt)
                    } else {
                        query_builder.order_by_asc(ResultColumn::CreatedAt)
                    };
                }
                _ => {}
            }
        }
    } else {
        query_builder = query_builder.order_by_asc(ResultColumn::Id);
    }

    let paginator = query_builder.paginate(db, per_page);
    let total = match paginator.num_items().await {
        Ok(n) => n,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResultListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };
    let rows = match paginator.fetch_page(page - 1).await {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResultListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    // One batched lookup for the page's exam titles.
    let mut exam_ids: Vec<i64> = rows.iter().map(|r| r.exam_id).collect();
    exam_ids.sort_unstable();
    exam_ids.dedup();

    let titles: HashMap<i64, String> = match ExamEntity::find()
        .filter(ExamColumn::Id.is_in(exam_ids))
        .all(db)
        .await
    {
        Ok(exams) => exams.into_iter().map(|e| (e.id, e.title)).collect(),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ResultListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let results = rows
        .into_iter()
        .map(|row| {
            let title = titles.get(&row.exam_id).cloned();
            ResultSummary::from_model(row, title)
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            ResultListResponse {
                results,
                page,
                per_page,
                total,
            },
            "Exam results retrieved successfully",
        )),
    )
}

/// GET /api/exam-results/{result_id}
///
/// Fetch one result with its review. The review pairs the stored
/// submission with the exam's quiz membership as it stands now, so a quiz
/// removed from the exam after submission no longer appears even though it
/// was graded.
///
/// The ownership policy runs before the row is fetched. A non-admin caller
/// asking for a missing or foreign result gets 403 either way; only admins
/// can distinguish missing from foreign.
///
/// ### Responses
/// - `200 OK` with the result and review items
/// - `403 Forbidden` when the result is not the caller's own
/// - `404 Not Found` when the result does not exist (admin only)
/// - `500 Internal Server Error` on database faults
pub async fn get_result(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(result_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match DETAIL_POLICY.authorize(db, &claims, &result_id).await {
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

    let result = match ResultEntity::find_by_id(result_id).one(db).await {
        Ok(Some(result)) => result,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ResultDetail>::error(format!(
                    "Result not found id: {}",
                    result_id
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

    // Malformed stored history degrades to an empty map, never an error.
    let history = answer_set::decode_history(&result.submission_history);

    let exam = match ExamEntity::find_by_id(result.exam_id).one(db).await {
        Ok(Some(exam)) => exam,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<ResultDetail>::error(format!(
                    "Exam not found id: {}",
                    result.exam_id
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

    let items = build_review(&quizzes, &history);

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            ResultDetail::from_parts(result, exam.title, items),
            "Exam result retrieved successfully",
        )),
    )
}
