//! Allowed values for the venue/artist forms.

use serde::Serialize;

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR",
    "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

/// Choice lists handed to the create/edit forms.
#[derive(Debug, Clone, Serialize)]
pub struct FormChoices {
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

pub fn form_choices() -> FormChoices {
    FormChoices {
        genres: GENRES,
        states: STATES,
    }
}

pub fn is_genre(value: &str) -> bool {
    GENRES.contains(&value)
}

pub fn is_state(value: &str) -> bool {
    STATES.contains(&value)
}
