use serde::{Deserialize, Serialize};

use triad_core::{ArtistId, DomainResult};

use crate::form::FormFields;
use crate::profile::ProfileDraft;

/// A stored artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

/// Validated artist form submission (create or edit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistDraft {
    pub profile: ProfileDraft,
}

impl ArtistDraft {
    pub fn from_form(form: &FormFields) -> DomainResult<Self> {
        Ok(Self {
            profile: ProfileDraft::from_form(form, "seeking_venue")?,
        })
    }

    pub fn into_artist(self, id: ArtistId) -> Artist {
        let p = self.profile;
        Artist {
            id,
            name: p.name,
            genres: p.genres,
            city: p.city,
            state: p.state,
            phone: p.phone,
            website: p.website,
            facebook_link: p.facebook_link,
            seeking_venue: p.seeking,
            seeking_description: p.seeking_description,
            image_link: p.image_link,
        }
    }
}

impl Artist {
    /// Artists are unique on (name, city, state, genres).
    pub fn same_listing(&self, other: &Artist) -> bool {
        self.name == other.name
            && self.city == other.city
            && self.state == other.state
            && self.genres == other.genres
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::tests::form;

    #[test]
    fn draft_uses_seeking_venue_checkbox() {
        let f = form(&[
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("genres", "Rock n Roll"),
            ("seeking_talent", "y"),
            ("seeking_venue", "y"),
            ("seeking_description", "Looking for shows to perform at"),
        ]);
        let artist = ArtistDraft::from_form(&f).unwrap().into_artist(ArtistId::new(4));
        assert!(artist.seeking_venue);
        assert_eq!(
            artist.seeking_description.as_deref(),
            Some("Looking for shows to perform at")
        );
    }
}
