use serde::{Deserialize, Deserializer, Serialize};

use triad_fyyur::{Artist, Venue};

// -------------------------
// Trivia
// -------------------------

/// Non-integer values fall back to the defaults, same as leaving them out.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionsQuery {
    #[serde(default, deserialize_with = "int_or_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "int_or_none")]
    pub category: Option<i64>,
}

fn int_or_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.trim().parse().ok()))
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

// -------------------------
// Fyyur
// -------------------------

/// `?flash=` carried by redirects.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub flash: Option<String>,
}

/// A page body plus the flash message that led to it.
#[derive(Debug, Serialize)]
pub struct WithFlash<T> {
    pub flash: Option<String>,
    #[serde(flatten)]
    pub page: T,
}

/// `{id, name}` reference used by listings and form choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

impl From<&Venue> for NamedRef {
    fn from(venue: &Venue) -> Self {
        Self {
            id: venue.id.get(),
            name: venue.name.clone(),
        }
    }
}

impl From<&Artist> for NamedRef {
    fn from(artist: &Artist) -> Self {
        Self {
            id: artist.id.get(),
            name: artist.name.clone(),
        }
    }
}
