//! `triad-core` — domain building blocks shared by the three applications.
//!
//! Pure code only: no HTTP, no storage.

pub mod error;
pub mod id;
pub mod pagination;
pub mod search;

pub use error::{DomainError, DomainResult};
pub use id::{ArtistId, CategoryId, DrinkId, QuestionId, VenueId};
pub use pagination::{Page, PAGE_SIZE};
pub use search::contains_ignore_case;
