use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::questions::{self, get_all_questions},
        Question,
    },
    server::{
        app::AppState,
        deserializers::{lenient_i64, PageQuery},
        pagination::paginate,
    },
};

use super::{categories_by_id, ApiError, ApiResponse};

#[derive(Serialize)]
struct QuestionsList {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct QuestionCreated {
    success: bool,
    question_id: i64,
}

async fn get_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<Json<QuestionsList>> {
    let questions = get_all_questions(&pool).await?;
    let page = paginate(&questions, query.page);
    if page.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(QuestionsList {
        success: true,
        total_questions: questions.len(),
        questions: page.to_vec(),
        categories: categories_by_id(&pool).await?,
    }))
}

// The body is read field by field: absent text fields stay None and fail on
// the NOT NULL constraints, so every malformed creation collapses into the
// same 422 without a separate validation pass.
async fn create_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse<Json<QuestionCreated>> {
    let Json(body) = body.map_err(|_| ApiError::Unprocessable)?;

    let question = body.get("question").and_then(Value::as_str);
    let answer = body.get("answer").and_then(Value::as_str);
    let category = body.get("category").and_then(lenient_i64);
    let difficulty = body
        .get("difficulty")
        .and_then(lenient_i64)
        .ok_or(ApiError::Unprocessable)?;

    let question_id = questions::create_question(&pool, question, answer, category, difficulty)
        .await
        .map_err(|_| ApiError::Unprocessable)?;

    Ok(Json(QuestionCreated {
        success: true,
        question_id,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<String>,
) -> ApiResponse<StatusCode> {
    let id = id.parse::<i64>().map_err(|_| ApiError::NotFound)?;
    // fetch first so deleting an absent id is a 404, not a silent no-op
    questions::get_question_by_id(&pool, id).await?;
    questions::delete_question(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse<Json<QuestionsList>> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest)?;
    // a missing term matches everything
    let term = body
        .get("searchTerm")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let matches = questions::search_questions(&pool, term).await?;
    let page = paginate(&matches, query.page);
    if page.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(QuestionsList {
        success: true,
        total_questions: matches.len(),
        questions: page.to_vec(),
        categories: categories_by_id(&pool).await?,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
