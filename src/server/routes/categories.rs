use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions::get_questions_for_category, Question},
    server::{
        app::AppState,
        deserializers::PageQuery,
        pagination::paginate,
    },
};

use super::{categories_by_id, ApiError, ApiResponse};

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    total_categories: usize,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsList {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesList>> {
    let categories = categories_by_id(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesList {
        success: true,
        total_categories: categories.len(),
        categories,
    }))
}

async fn questions_by_category(
    State(pool): State<SqlitePool>,
    Path(category_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<Json<CategoryQuestionsList>> {
    // a non-numeric id segment is just a route that doesn't exist
    let category_id = category_id.parse::<i64>().map_err(|_| ApiError::NotFound)?;

    let questions = get_questions_for_category(&pool, category_id).await?;
    let page = paginate(&questions, query.page);
    if page.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoryQuestionsList {
        success: true,
        total_questions: questions.len(),
        questions: page.to_vec(),
        current_category: category_id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{category_id}/questions", get(questions_by_category))
        .with_state(state)
}
