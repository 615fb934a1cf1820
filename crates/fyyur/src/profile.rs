//! Fields shared by venue and artist listings.

use triad_core::{DomainError, DomainResult};

use crate::choices;
use crate::form::FormFields;

/// Validated listing fields common to venues and artists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    /// `seeking_talent` for venues, `seeking_venue` for artists.
    pub seeking: bool,
    /// Only kept while `seeking` is set.
    pub seeking_description: Option<String>,
    pub genres: Vec<String>,
}

impl ProfileDraft {
    /// Read and validate the shared fields; `seeking_key` names the checkbox.
    pub fn from_form(form: &FormFields, seeking_key: &str) -> DomainResult<Self> {
        let name = required(form, "name")?;
        let city = required(form, "city")?;
        let state = required(form, "state")?.to_ascii_uppercase();
        if !choices::is_state(&state) {
            return Err(DomainError::validation(format!("unknown state {state:?}")));
        }

        let genres: Vec<String> = form.all("genres").into_iter().map(String::from).collect();
        if genres.is_empty() {
            return Err(DomainError::validation("at least one genre is required"));
        }
        if let Some(bad) = genres.iter().find(|g| !choices::is_genre(g)) {
            return Err(DomainError::validation(format!("unknown genre {bad:?}")));
        }

        let seeking = form.flag(seeking_key);
        let seeking_description = if seeking {
            form.get("seeking_description").map(String::from)
        } else {
            None
        };

        Ok(Self {
            name,
            city,
            state,
            phone: form.get("phone").map(String::from),
            website: link(form, "website")?,
            image_link: link(form, "image_link")?,
            facebook_link: link(form, "facebook_link")?,
            seeking,
            seeking_description,
            genres,
        })
    }
}

fn required(form: &FormFields, key: &str) -> DomainResult<String> {
    form.get(key)
        .map(String::from)
        .ok_or_else(|| DomainError::validation(format!("{key} is required")))
}

fn link(form: &FormFields, key: &str) -> DomainResult<Option<String>> {
    match form.get(key) {
        None => Ok(None),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Ok(Some(url.to_string()))
        }
        Some(_) => Err(DomainError::validation(format!("{key} must be an http(s) URL"))),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn form(pairs: &[(&str, &str)]) -> FormFields {
        FormFields::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn description_is_cleared_when_not_seeking() {
        let f = form(&[
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "ca"),
            ("genres", "Jazz"),
            ("seeking_description", "looking for jazz acts"),
        ]);
        let draft = ProfileDraft::from_form(&f, "seeking_talent").unwrap();
        assert_eq!(draft.state, "CA");
        assert!(!draft.seeking);
        assert_eq!(draft.seeking_description, None);
    }

    #[test]
    fn description_is_kept_when_seeking() {
        let f = form(&[
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("genres", "Rock n Roll"),
            ("seeking_venue", "y"),
            ("seeking_description", "looking for shows"),
        ]);
        let draft = ProfileDraft::from_form(&f, "seeking_venue").unwrap();
        assert!(draft.seeking);
        assert_eq!(draft.seeking_description.as_deref(), Some("looking for shows"));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let base = [("name", "X"), ("city", "Y"), ("state", "NY"), ("genres", "Jazz")];
        assert!(ProfileDraft::from_form(&form(&base), "seeking_talent").is_ok());

        let no_name = [("city", "Y"), ("state", "NY"), ("genres", "Jazz")];
        assert!(ProfileDraft::from_form(&form(&no_name), "seeking_talent").is_err());

        let bad_state = [("name", "X"), ("city", "Y"), ("state", "ZZ"), ("genres", "Jazz")];
        assert!(ProfileDraft::from_form(&form(&bad_state), "seeking_talent").is_err());

        let bad_genre = [("name", "X"), ("city", "Y"), ("state", "NY"), ("genres", "Polka")];
        assert!(ProfileDraft::from_form(&form(&bad_genre), "seeking_talent").is_err());

        let mut bad_link = base.to_vec();
        bad_link.push(("facebook_link", "facebook.com/hop"));
        assert!(ProfileDraft::from_form(&form(&bad_link), "seeking_talent").is_err());
    }
}
