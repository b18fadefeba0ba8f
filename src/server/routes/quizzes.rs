use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions::random_question, Question},
    server::{app::AppState, deserializers::lenient_i64},
    telemetry::QUIZ_QUESTION_CNTR,
};

use super::{ApiError, ApiResponse};

#[derive(Serialize)]
struct QuizDraw {
    success: bool,
    // omitted entirely once the pool of unseen questions runs dry
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse<Json<QuizDraw>> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest)?;

    let previous = body
        .get("previous_questions")
        .and_then(Value::as_array)
        .ok_or(ApiError::BadRequest)?;
    let exclude: Vec<i64> = previous.iter().filter_map(lenient_i64).collect();

    // category id 0 plays across the whole bank
    let category = body
        .get("quiz_category")
        .and_then(|c| c.get("id"))
        .and_then(lenient_i64)
        .ok_or(ApiError::BadRequest)?;

    let question = random_question(&pool, category, &exclude)
        .await
        .map_err(|e| {
            tracing::error!("Quiz draw failed: {e}");
            ApiError::BadRequest
        })?;

    if question.is_some() {
        let category_label = category.to_string();
        QUIZ_QUESTION_CNTR
            .with_label_values(&[category_label.as_str()])
            .inc();
    }

    Ok(Json(QuizDraw {
        success: true,
        question,
    }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
