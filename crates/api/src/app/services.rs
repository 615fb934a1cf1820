use std::sync::Arc;

use tracing::info;

use triad_infra::postgres::{self, PgCoffeeStore, PgFyyurStore, PgTriviaStore};
use triad_infra::store::{
    CoffeeStore, FyyurStore, InMemoryCoffeeStore, InMemoryFyyurStore, InMemoryTriviaStore, TriviaStore,
};
use triad_infra::{AppConfig, DatabaseConfig, StoreError};

/// Storage handles shared by every handler (via `Extension<Arc<AppServices>>`).
pub struct AppServices {
    pub trivia: Arc<dyn TriviaStore>,
    pub coffee: Arc<dyn CoffeeStore>,
    pub fyyur: Arc<dyn FyyurStore>,
}

impl AppServices {
    /// Fresh in-memory stores; trivia starts with its seed data.
    pub fn in_memory() -> Self {
        Self {
            trivia: Arc::new(InMemoryTriviaStore::seeded()),
            coffee: Arc::new(InMemoryCoffeeStore::new()),
            fyyur: Arc::new(InMemoryFyyurStore::new()),
        }
    }

    /// PostgreSQL-backed stores. Creates missing tables and seeds the trivia
    /// categories/questions on first start.
    pub async fn postgres(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = postgres::connect(config).await?;
        postgres::apply_schema(&pool).await?;
        postgres::seed_trivia(&pool).await?;
        Ok(Self {
            trivia: Arc::new(PgTriviaStore::new(pool.clone())),
            coffee: Arc::new(PgCoffeeStore::new(pool.clone())),
            fyyur: Arc::new(PgFyyurStore::new(pool)),
        })
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        match &config.database {
            Some(db) => Self::postgres(db).await,
            None => {
                info!("DATABASE_URL not set; using in-memory stores");
                Ok(Self::in_memory())
            }
        }
    }
}
