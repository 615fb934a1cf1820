use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use triad_coffee::{Drink, Ingredient, ValidDrink, ValidPatch};
use triad_core::DrinkId;

use super::map_sqlx_error;
use crate::store::{CoffeeStore, StoreError, StoreResult};

#[derive(Debug, FromRow)]
struct DrinkRow {
    id: i64,
    title: String,
    recipe: Json<Vec<Ingredient>>,
}

impl From<DrinkRow> for Drink {
    fn from(row: DrinkRow) -> Self {
        Drink {
            id: DrinkId::new(row.id),
            title: row.title,
            recipe: row.recipe.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgCoffeeStore {
    pool: PgPool,
}

impl PgCoffeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CoffeeStore for PgCoffeeStore {
    #[instrument(skip(self), err)]
    async fn drinks(&self) -> StoreResult<Vec<Drink>> {
        let rows: Vec<DrinkRow> = sqlx::query_as("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("drinks", e))?;
        Ok(rows.into_iter().map(Drink::from).collect())
    }

    #[instrument(skip(self, drink), fields(title = %drink.title), err)]
    async fn insert_drink(&self, drink: ValidDrink) -> StoreResult<Drink> {
        let id: i64 = sqlx::query_scalar("INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id")
            .bind(&drink.title)
            .bind(Json(&drink.recipe))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_drink", e))?;
        Ok(drink.into_drink(DrinkId::new(id)))
    }

    #[instrument(skip(self, patch), fields(drink_id = %id), err)]
    async fn update_drink(&self, id: DrinkId, patch: ValidPatch) -> StoreResult<Drink> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let row: Option<DrinkRow> =
            sqlx::query_as("SELECT id, title, recipe FROM drinks WHERE id = $1 FOR UPDATE")
                .bind(id.get())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("lock_drink", e))?;
        let mut drink = Drink::from(row.ok_or(StoreError::NotFound)?);
        drink.apply(patch);

        sqlx::query("UPDATE drinks SET title = $2, recipe = $3 WHERE id = $1")
            .bind(id.get())
            .bind(&drink.title)
            .bind(Json(&drink.recipe))
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("update_drink", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit", e))?;
        Ok(drink)
    }

    #[instrument(skip(self), fields(drink_id = %id), err)]
    async fn delete_drink(&self, id: DrinkId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_drink", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
