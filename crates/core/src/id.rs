//! Strongly-typed record identifiers.
//!
//! Every table uses a database-assigned integer key; the newtypes keep a
//! venue id from being passed where an artist id is expected.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a fyyur venue.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(i64);

/// Identifier of a fyyur artist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistId(i64);

/// Identifier of a trivia question.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(i64);

/// Identifier of a trivia category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(i64);

/// Identifier of a coffee-shop drink.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrinkId(i64);

macro_rules! impl_id_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_id_newtype!(VenueId, "VenueId");
impl_id_newtype!(ArtistId, "ArtistId");
impl_id_newtype!(QuestionId, "QuestionId");
impl_id_newtype!(CategoryId, "CategoryId");
impl_id_newtype!(DrinkId, "DrinkId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_and_serialize_as_plain_integers() {
        let id: QuestionId = " 15 ".parse().unwrap();
        assert_eq!(id.get(), 15);
        assert_eq!(serde_json::to_string(&id).unwrap(), "15");
        assert!(matches!("abc".parse::<VenueId>(), Err(DomainError::InvalidId(_))));
    }
}
