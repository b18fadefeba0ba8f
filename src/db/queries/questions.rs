use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: Option<i64>,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Question> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

// The text fields stay optional all the way down so a missing field fails on
// the NOT NULL constraint instead of being rejected up front; the route
// collapses either failure into the same response.
pub async fn create_question(
    pool: &SqlitePool,
    question: Option<&str>,
    answer: Option<&str>,
    category: Option<i64>,
    difficulty: i64,
) -> anyhow::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(category)
    .bind(difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    sqlx::query(
        r#"
DELETE FROM questions WHERE id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

// SQLite LIKE is case-insensitive for ASCII, which is exactly the contract.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE question LIKE '%' || ?1 || '%'
ORDER BY id
        "#,
    )
    .bind(term)
    .fetch_all(pool)
    .await
}

// The join filters on the category id only; a category id with no row in
// categories simply produces an empty set.
pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category_id: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT questions.id, questions.question, questions.answer, questions.category, questions.difficulty
FROM questions
JOIN categories ON questions.category = categories.id
WHERE categories.id = ?1
ORDER BY questions.id
        "#,
    )
    .bind(category_id)
    .fetch_all(pool)
    .await
}

/// Draw one question uniformly at random, skipping `exclude`. A category of
/// 0 draws from the whole bank. Returns `None` once every eligible question
/// has been excluded.
pub async fn random_question(
    pool: &SqlitePool,
    category: i64,
    exclude: &[i64],
) -> sqlx::Result<Option<Question>> {
    let mut builder = sqlx::QueryBuilder::new(
        "SELECT id, question, answer, category, difficulty FROM questions WHERE 1=1",
    );
    if category != 0 {
        builder.push(" AND category = ");
        builder.push_bind(category);
    }
    if !exclude.is_empty() {
        builder.push(" AND id NOT IN (");
        let mut ids = builder.separated(", ");
        for id in exclude {
            ids.push_bind(*id);
        }
        builder.push(")");
    }
    builder.push(" ORDER BY RANDOM() LIMIT 1");

    builder
        .build_query_as::<Question>()
        .fetch_optional(pool)
        .await
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> anyhow::Result<()> {
    for question in questions {
        sqlx::query(
            r#"
INSERT INTO questions (id, question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(question.id)
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(pool)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    async fn seed(pool: &SqlitePool) {
        for (question, answer, category, difficulty) in [
            ("What is the capital of France?", "Paris", 3, 1),
            ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
            ("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
        ] {
            create_question(pool, Some(question), Some(answer), Some(category), difficulty)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn create_then_fetch_round_trips() {
        let pool = test_pool().await;
        let id = create_question(&pool, Some("Q"), Some("A"), Some(2), 4)
            .await
            .unwrap();

        let question = get_question_by_id(&pool, id).await.unwrap();
        assert_eq!(question.question, "Q");
        assert_eq!(question.answer, "A");
        assert_eq!(question.category, Some(2));
        assert_eq!(question.difficulty, 4);
    }

    #[tokio::test]
    async fn missing_question_text_is_rejected_by_the_store() {
        let pool = test_pool().await;
        let result = create_question(&pool, None, Some("A"), None, 1).await;
        assert!(result.is_err());
        assert!(get_all_questions(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_category_id_is_accepted() {
        let pool = test_pool().await;
        let id = create_question(&pool, Some("Q"), Some("A"), Some(999), 1)
            .await
            .unwrap();
        assert_eq!(get_question_by_id(&pool, id).await.unwrap().category, Some(999));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let pool = test_pool().await;
        seed(&pool).await;
        delete_question(&pool, 2).await.unwrap();

        let error = get_question_by_id(&pool, 2).await.unwrap_err();
        assert!(matches!(error, sqlx::Error::RowNotFound));
        assert_eq!(get_all_questions(&pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn search_matches_substrings_case_insensitively() {
        let pool = test_pool().await;
        seed(&pool).await;

        for term in ["capital", "CAPITAL", "pita"] {
            let matches = search_questions(&pool, term).await.unwrap();
            assert_eq!(matches.len(), 1, "term {term:?}");
            assert_eq!(matches[0].answer, "Paris");
        }
        assert!(search_questions(&pool, "howdy").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn category_join_excludes_dangling_ids() {
        let pool = test_pool().await;
        crate::db::queries::categories::create_category(&pool, "Science")
            .await
            .unwrap();
        // Category 3 is never created, so the join drops the Geography rows.
        seed(&pool).await;

        let science = get_questions_for_category(&pool, 1).await.unwrap();
        assert_eq!(science.len(), 1);
        assert_eq!(science[0].answer, "Alexander Fleming");
        assert!(get_questions_for_category(&pool, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn random_draw_respects_category_and_exclusions() {
        let pool = test_pool().await;
        seed(&pool).await;

        let drawn = random_question(&pool, 1, &[]).await.unwrap().unwrap();
        assert_eq!(drawn.category, Some(1));

        // Both Geography rows excluded: the scoped draw is exhausted.
        let exhausted = random_question(&pool, 3, &[1, 3]).await.unwrap();
        assert!(exhausted.is_none());

        // Across the whole bank only id 2 is left.
        let last = random_question(&pool, 0, &[1, 3]).await.unwrap().unwrap();
        assert_eq!(last.id, 2);
    }
}
