//! Storage abstractions for the three applications.
//!
//! Each application gets one async trait. Two implementations exist for each:
//! in-memory tables (tests/dev) and PostgreSQL (`crate::postgres`).

use thiserror::Error;

pub mod coffee;
pub mod fyyur;
pub mod memory;
pub mod trivia;

pub use coffee::{CoffeeStore, InMemoryCoffeeStore};
pub use fyyur::{FyyurStore, InMemoryFyyurStore};
pub use trivia::{InMemoryTriviaStore, TriviaStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure, classified so handlers can pick a status code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The write points at a record that does not exist (or is still
    /// referenced, for deletes).
    #[error("reference violation: {0}")]
    Reference(String),

    /// The backend could not be reached (pool closed, timeout, IO).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn reference(msg: impl Into<String>) -> Self {
        Self::Reference(msg.into())
    }
}
