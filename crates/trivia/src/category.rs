use serde::{Deserialize, Serialize};

use triad_core::CategoryId;

/// A question category (`1 => "Science"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: i64, kind: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            kind: kind.into(),
        }
    }
}

/// Render categories as the `{ "<id>": "<type>" }` object clients key on.
pub fn categories_to_map(categories: &[Category]) -> serde_json::Map<String, serde_json::Value> {
    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by_key(|c| c.id);
    sorted
        .into_iter()
        .map(|c| (c.id.to_string(), serde_json::Value::String(c.kind.clone())))
        .collect()
}
