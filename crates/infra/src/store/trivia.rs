use std::sync::RwLock;

use async_trait::async_trait;

use triad_core::{CategoryId, QuestionId, contains_ignore_case};
use triad_trivia::{Category, Question, ValidQuestion, seed};

use super::memory::{Table, read, write};
use super::{StoreError, StoreResult};

/// Trivia question bank storage.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// All categories in id order.
    async fn categories(&self) -> StoreResult<Vec<Category>>;

    async fn category(&self, id: CategoryId) -> StoreResult<Option<Category>>;

    /// Questions in id order, optionally restricted to one category.
    async fn questions(&self, category: Option<CategoryId>) -> StoreResult<Vec<Question>>;

    /// Case-insensitive substring match on the question text.
    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>>;

    /// Fails with [`StoreError::Reference`] when the category does not exist.
    async fn insert_question(&self, question: ValidQuestion) -> StoreResult<Question>;

    /// Fails with [`StoreError::NotFound`] when nothing was deleted.
    async fn delete_question(&self, id: QuestionId) -> StoreResult<()>;
}

#[derive(Debug, Default)]
struct TriviaTables {
    categories: Table<Category>,
    questions: Table<Question>,
}

/// In-memory trivia store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryTriviaStore {
    inner: RwLock<TriviaTables>,
}

impl InMemoryTriviaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the six categories and the starter questions.
    pub fn seeded() -> Self {
        let tables = TriviaTables {
            categories: Table::with_rows(seed::categories().into_iter().map(|c| (c.id.get(), c))),
            questions: Table::with_rows(seed::questions().into_iter().map(|q| (q.id.get(), q))),
        };
        Self {
            inner: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl TriviaStore for InMemoryTriviaStore {
    async fn categories(&self) -> StoreResult<Vec<Category>> {
        Ok(read(&self.inner)?.categories.values().cloned().collect())
    }

    async fn category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(read(&self.inner)?.categories.get(id.get()).cloned())
    }

    async fn questions(&self, category: Option<CategoryId>) -> StoreResult<Vec<Question>> {
        let tables = read(&self.inner)?;
        Ok(tables
            .questions
            .values()
            .filter(|q| category.is_none_or(|c| q.category == c))
            .cloned()
            .collect())
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        let tables = read(&self.inner)?;
        Ok(tables
            .questions
            .values()
            .filter(|q| contains_ignore_case(&q.question, term))
            .cloned()
            .collect())
    }

    async fn insert_question(&self, question: ValidQuestion) -> StoreResult<Question> {
        let mut tables = write(&self.inner)?;
        if tables.categories.get(question.category.get()).is_none() {
            return Err(StoreError::reference(format!(
                "category {} does not exist",
                question.category
            )));
        }
        let id = tables.questions.next_id();
        let stored = question.into_question(QuestionId::new(id));
        tables.questions.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_question(&self, id: QuestionId) -> StoreResult<()> {
        write(&self.inner)?
            .questions
            .remove(id.get())
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
