use serde::{Deserialize, Serialize};

use triad_core::error::require_text;
use triad_core::{DomainResult, VenueId};

use crate::form::FormFields;
use crate::profile::ProfileDraft;

/// A stored venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

/// Validated venue form submission (create or edit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueDraft {
    pub profile: ProfileDraft,
    pub address: String,
}

impl VenueDraft {
    pub fn from_form(form: &FormFields) -> DomainResult<Self> {
        let profile = ProfileDraft::from_form(form, "seeking_talent")?;
        let address = form.get("address").unwrap_or_default().to_string();
        require_text("address", &address)?;
        Ok(Self { profile, address })
    }

    pub fn into_venue(self, id: VenueId) -> Venue {
        let p = self.profile;
        Venue {
            id,
            name: p.name,
            genres: p.genres,
            address: self.address,
            city: p.city,
            state: p.state,
            phone: p.phone,
            website: p.website,
            facebook_link: p.facebook_link,
            seeking_talent: p.seeking,
            seeking_description: p.seeking_description,
            image_link: p.image_link,
        }
    }
}

impl Venue {
    /// Venues are unique on (name, city, state, address).
    pub fn same_listing(&self, other: &Venue) -> bool {
        self.name == other.name
            && self.city == other.city
            && self.state == other.state
            && self.address == other.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::tests::form;

    #[test]
    fn address_is_required() {
        let f = form(&[("name", "Hop"), ("city", "SF"), ("state", "CA"), ("genres", "Jazz")]);
        assert!(VenueDraft::from_form(&f).is_err());
    }

    #[test]
    fn draft_maps_onto_venue_fields() {
        let f = form(&[
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("genres", "Jazz"),
            ("genres", "Folk"),
            ("seeking_talent", "y"),
            ("seeking_description", "We are on the lookout for a local artist"),
        ]);
        let venue = VenueDraft::from_form(&f).unwrap().into_venue(VenueId::new(1));
        assert_eq!(venue.address, "1015 Folsom Street");
        assert_eq!(venue.genres, vec!["Jazz", "Folk"]);
        assert!(venue.seeking_talent);

        let mut moved = venue.clone();
        moved.address = "1 Market Street".to_string();
        assert!(!venue.same_listing(&moved));
        assert!(venue.same_listing(&venue.clone()));
    }
}
