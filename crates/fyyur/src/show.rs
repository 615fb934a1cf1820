use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use triad_core::{ArtistId, DomainError, DomainResult, VenueId};

use crate::form::FormFields;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const INPUT_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Validated show form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowDraft {
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
    pub start_time: DateTime<Utc>,
}

impl ShowDraft {
    pub fn from_form(form: &FormFields) -> DomainResult<Self> {
        let artist_id = form
            .get("artist_id")
            .ok_or_else(|| DomainError::validation("artist_id is required"))?
            .parse()?;
        let venue_id = form
            .get("venue_id")
            .ok_or_else(|| DomainError::validation("venue_id is required"))?
            .parse()?;
        let start_time = parse_start_time(
            form.get("start_time")
                .ok_or_else(|| DomainError::validation("start_time is required"))?,
        )?;
        Ok(Self {
            venue_id,
            artist_id,
            start_time,
        })
    }
}

/// Parse a show start time; zone-less inputs are taken as UTC.
pub fn parse_start_time(raw: &str) -> DomainResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DomainError::validation(format!("unrecognized start_time {raw:?}")))
}

/// Render a show time the way every page displays it.
pub fn format_show_time(at: &DateTime<Utc>) -> String {
    at.format(DISPLAY_FORMAT).to_string()
}

/// A show joined with the venue and artist fields pages display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowDetail {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl ShowDetail {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_time >= now
    }
}

/// Which shows to load.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ShowFilter {
    pub venue_id: Option<VenueId>,
    pub artist_id: Option<ArtistId>,
}

impl ShowFilter {
    pub fn venue(id: VenueId) -> Self {
        Self {
            venue_id: Some(id),
            artist_id: None,
        }
    }

    pub fn artist(id: ArtistId) -> Self {
        Self {
            venue_id: None,
            artist_id: Some(id),
        }
    }

    pub fn matches(&self, show: &ShowDetail) -> bool {
        self.venue_id.is_none_or(|v| v == show.venue_id)
            && self.artist_id.is_none_or(|a| a == show.artist_id)
    }
}

/// Row of the `/shows` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<&ShowDetail> for ShowListing {
    fn from(show: &ShowDetail) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name.clone(),
            artist_id: show.artist_id,
            artist_name: show.artist_name.clone(),
            artist_image_link: show.artist_image_link.clone(),
            start_time: format_show_time(&show.start_time),
        }
    }
}
