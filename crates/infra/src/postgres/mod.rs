//! PostgreSQL-backed stores.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Code | StoreError |
//! |------------|-----------------|------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (foreign key violation) | `23503` | `Reference` |
//! | Database (check violation) | `23514` | `Backend` |
//! | PoolTimedOut / PoolClosed / Io | N/A | `Unavailable` |
//! | RowNotFound | N/A | `NotFound` |
//! | Other | N/A | `Backend` |

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use triad_trivia::seed;

use crate::config::DatabaseConfig;
use crate::store::StoreError;

mod coffee;
mod fyyur;
mod trivia;

pub use coffee::PgCoffeeStore;
pub use fyyur::PgFyyurStore;
pub use trivia::PgTriviaStore;

const SCHEMA: &str = include_str!("schema.sql");

/// Open a connection pool.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))?;
    info!(max_connections = config.max_connections, "connected to postgres");
    Ok(pool)
}

/// Create any missing tables. Idempotent.
pub async fn apply_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("apply_schema", e))?;
    Ok(())
}

/// Load the trivia categories, and the starter questions when the question
/// table is empty.
pub async fn seed_trivia(pool: &PgPool) -> Result<(), StoreError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| map_sqlx_error("begin_transaction", e))?;

    for category in seed::categories() {
        sqlx::query("INSERT INTO categories (id, type) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(category.id.get())
            .bind(&category.kind)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("seed_categories", e))?;
    }

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("count_questions", e))?;

    if existing == 0 {
        for q in seed::questions() {
            sqlx::query(
                "INSERT INTO questions (id, question, answer, difficulty, category) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(q.id.get())
            .bind(&q.question)
            .bind(&q.answer)
            .bind(q.difficulty)
            .bind(q.category.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("seed_questions", e))?;
        }
        info!("seeded trivia questions");
    }

    // Explicit ids bypass the sequences; move them past the seeded rows.
    for table in ["categories", "questions"] {
        let sql = format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), (SELECT COALESCE(MAX(id), 1) FROM {table}))"
        );
        sqlx::query(&sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("reset_sequence", e))?;
    }

    tx.commit()
        .await
        .map_err(|e| map_sqlx_error("commit", e))?;
    Ok(())
}

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => StoreError::Conflict(msg),
                Some("23503") => StoreError::Reference(msg),
                _ => StoreError::Backend(msg),
            }
        }
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool unavailable in {}", operation))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {}: {}", operation, e)),
        _ => StoreError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}
