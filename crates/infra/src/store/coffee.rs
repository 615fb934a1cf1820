use std::sync::RwLock;

use async_trait::async_trait;

use triad_coffee::{Drink, ValidDrink, ValidPatch};
use triad_core::DrinkId;

use super::memory::{Table, read, write};
use super::{StoreError, StoreResult};

/// Drink catalog storage. Titles are unique.
#[async_trait]
pub trait CoffeeStore: Send + Sync {
    /// All drinks in id order.
    async fn drinks(&self) -> StoreResult<Vec<Drink>>;

    async fn insert_drink(&self, drink: ValidDrink) -> StoreResult<Drink>;

    async fn update_drink(&self, id: DrinkId, patch: ValidPatch) -> StoreResult<Drink>;

    async fn delete_drink(&self, id: DrinkId) -> StoreResult<()>;
}

/// In-memory drink catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCoffeeStore {
    inner: RwLock<Table<Drink>>,
}

impl InMemoryCoffeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn title_taken(table: &Table<Drink>, title: &str, except: Option<DrinkId>) -> bool {
    table
        .values()
        .any(|d| d.title == title && Some(d.id) != except)
}

#[async_trait]
impl CoffeeStore for InMemoryCoffeeStore {
    async fn drinks(&self) -> StoreResult<Vec<Drink>> {
        Ok(read(&self.inner)?.values().cloned().collect())
    }

    async fn insert_drink(&self, drink: ValidDrink) -> StoreResult<Drink> {
        let mut table = write(&self.inner)?;
        if title_taken(&table, &drink.title, None) {
            return Err(StoreError::conflict(format!("drink {:?} already exists", drink.title)));
        }
        let id = table.next_id();
        let stored = drink.into_drink(DrinkId::new(id));
        table.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_drink(&self, id: DrinkId, patch: ValidPatch) -> StoreResult<Drink> {
        let mut table = write(&self.inner)?;
        if table.get(id.get()).is_none() {
            return Err(StoreError::NotFound);
        }
        if let Some(title) = &patch.title {
            if title_taken(&table, title, Some(id)) {
                return Err(StoreError::conflict(format!("drink {title:?} already exists")));
            }
        }
        let drink = table.get_mut(id.get()).ok_or(StoreError::NotFound)?;
        drink.apply(patch);
        Ok(drink.clone())
    }

    async fn delete_drink(&self, id: DrinkId) -> StoreResult<()> {
        write(&self.inner)?
            .remove(id.get())
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triad_coffee::Ingredient;

    fn water(title: &str) -> ValidDrink {
        ValidDrink {
            title: title.to_string(),
            recipe: vec![Ingredient {
                name: "Water".to_string(),
                color: "blue".to_string(),
                parts: 1,
            }],
        }
    }

    #[tokio::test]
    async fn titles_are_unique() {
        let store = InMemoryCoffeeStore::new();
        let first = store.insert_drink(water("Water")).await.unwrap();
        assert_eq!(first.id, DrinkId::new(1));
        assert!(matches!(
            store.insert_drink(water("Water")).await,
            Err(StoreError::Conflict(_))
        ));

        let second = store.insert_drink(water("Sparkling")).await.unwrap();
        let rename = ValidPatch {
            title: Some("Water".to_string()),
            recipe: None,
        };
        assert!(matches!(
            store.update_drink(second.id, rename).await,
            Err(StoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn update_and_delete_missing_drinks() {
        let store = InMemoryCoffeeStore::new();
        let patch = ValidPatch {
            title: Some("Tea".to_string()),
            recipe: None,
        };
        assert_eq!(store.update_drink(DrinkId::new(9), patch).await, Err(StoreError::NotFound));
        assert_eq!(store.delete_drink(DrinkId::new(9)).await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn update_keeps_own_title() {
        let store = InMemoryCoffeeStore::new();
        let drink = store.insert_drink(water("Water")).await.unwrap();
        let same = ValidPatch {
            title: Some("Water".to_string()),
            recipe: None,
        };
        let updated = store.update_drink(drink.id, same).await.unwrap();
        assert_eq!(updated, drink);
    }
}
