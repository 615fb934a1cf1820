//! Access to decoded `application/x-www-form-urlencoded` pairs.

/// Decoded form pairs in submission order.
///
/// Multi-selects submit one pair per selected value, so lookups come in a
/// first-value flavour and an all-values flavour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value for `key`, trimmed; blank values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Every non-blank value for `key`.
    pub fn all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Checkbox semantics: present with `y`, `yes`, `true`, `on` or `1`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| {
            matches!(
                v.to_ascii_lowercase().as_str(),
                "y" | "yes" | "true" | "on" | "1"
            )
        })
    }

    /// The submitted `name`, for flash messages; empty when absent.
    pub fn name(&self) -> &str {
        self.get("name").unwrap_or_default()
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}
