use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use triad_core::search::like_pattern;
use triad_core::{CategoryId, QuestionId};
use triad_trivia::{Category, Question, ValidQuestion};

use super::map_sqlx_error;
use crate::store::{StoreError, StoreResult, TriviaStore};

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    kind: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category::new(row.id, row.kind)
    }
}

#[derive(Debug, FromRow)]
struct QuestionRow {
    id: i64,
    question: String,
    answer: String,
    difficulty: i32,
    category: i64,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question {
            id: QuestionId::new(row.id),
            question: row.question,
            answer: row.answer,
            difficulty: row.difficulty,
            category: CategoryId::new(row.category),
        }
    }
}

const QUESTION_COLUMNS: &str = "id, question, answer, difficulty, category";

#[derive(Debug, Clone)]
pub struct PgTriviaStore {
    pool: PgPool,
}

impl PgTriviaStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TriviaStore for PgTriviaStore {
    #[instrument(skip(self), err)]
    async fn categories(&self) -> StoreResult<Vec<Category>> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, type AS kind FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("categories", e))?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self), fields(category_id = %id), err)]
    async fn category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT id, type AS kind FROM categories WHERE id = $1")
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("category", e))?;
        Ok(row.map(Category::from))
    }

    #[instrument(skip(self), err)]
    async fn questions(&self, category: Option<CategoryId>) -> StoreResult<Vec<Question>> {
        let sql = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE ($1::bigint IS NULL OR category = $1) ORDER BY id"
        );
        let rows: Vec<QuestionRow> = sqlx::query_as(&sql)
            .bind(category.map(|c| c.get()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("questions", e))?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    #[instrument(skip(self), err)]
    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE question ILIKE $1 ORDER BY id");
        let rows: Vec<QuestionRow> = sqlx::query_as(&sql)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("search_questions", e))?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    #[instrument(skip(self, question), fields(category_id = %question.category), err)]
    async fn insert_question(&self, question: ValidQuestion) -> StoreResult<Question> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO questions (question, answer, difficulty, category) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.difficulty)
        .bind(question.category.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_question", e))?;
        Ok(question.into_question(QuestionId::new(id)))
    }

    #[instrument(skip(self), fields(question_id = %id), err)]
    async fn delete_question(&self, id: QuestionId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_question", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
