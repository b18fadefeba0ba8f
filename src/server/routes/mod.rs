mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

pub use crate::server::error::{ApiError, ApiResponse};

use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::db::queries::categories::get_all_categories;

// BTreeMap keeps the map ordered by id, and serde_json writes integer keys
// out as strings, which is the shape clients expect.
async fn categories_by_id(pool: &SqlitePool) -> sqlx::Result<BTreeMap<i64, String>> {
    let categories = get_all_categories(pool).await?;
    Ok(categories
        .into_iter()
        .map(|c| (c.id, c.category_type))
        .collect())
}
