//! Page shapes assembled from store rows.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use triad_core::{ArtistId, VenueId};

use crate::show::{ShowDetail, format_show_time};
use crate::{Artist, Venue};

/// `{id, name, num_upcoming_shows}` entry used by area listings and search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues of one city/state pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<ListingSummary>,
}

/// Group venues by (state, city), counting each venue's upcoming shows.
pub fn group_by_area(venues: &[Venue], shows: &[ShowDetail], now: DateTime<Utc>) -> Vec<Area> {
    let mut areas: BTreeMap<(String, String), Vec<ListingSummary>> = BTreeMap::new();
    for venue in venues {
        areas
            .entry((venue.state.clone(), venue.city.clone()))
            .or_default()
            .push(venue_summary(venue, shows, now));
    }
    areas
        .into_iter()
        .map(|((state, city), venues)| Area { city, state, venues })
        .collect()
}

pub fn venue_search_results(venues: &[Venue], shows: &[ShowDetail], now: DateTime<Utc>) -> SearchResults {
    let data: Vec<ListingSummary> = venues.iter().map(|v| venue_summary(v, shows, now)).collect();
    SearchResults {
        count: data.len(),
        data,
    }
}

pub fn artist_search_results(artists: &[Artist], shows: &[ShowDetail], now: DateTime<Utc>) -> SearchResults {
    let data: Vec<ListingSummary> = artists
        .iter()
        .map(|a| ListingSummary {
            id: a.id.get(),
            name: a.name.clone(),
            num_upcoming_shows: shows
                .iter()
                .filter(|s| s.artist_id == a.id && s.is_upcoming(now))
                .count(),
        })
        .collect();
    SearchResults {
        count: data.len(),
        data,
    }
}

fn venue_summary(venue: &Venue, shows: &[ShowDetail], now: DateTime<Utc>) -> ListingSummary {
    ListingSummary {
        id: venue.id.get(),
        name: venue.name.clone(),
        num_upcoming_shows: shows
            .iter()
            .filter(|s| s.venue_id == venue.id && s.is_upcoming(now))
            .count(),
    }
}

/// Shows split around `now`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowTimeline<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Split shows into past (`start_time < now`) and upcoming, mapping each
/// through `entry` and keeping start-time order.
pub fn split_shows<T>(
    shows: &[ShowDetail],
    now: DateTime<Utc>,
    entry: impl Fn(&ShowDetail) -> T,
) -> ShowTimeline<T> {
    let mut ordered: Vec<&ShowDetail> = shows.iter().collect();
    ordered.sort_by_key(|s| s.start_time);

    let (upcoming, past): (Vec<&ShowDetail>, Vec<&ShowDetail>) =
        ordered.into_iter().partition(|s| s.is_upcoming(now));

    let past_shows: Vec<T> = past.into_iter().map(&entry).collect();
    let upcoming_shows: Vec<T> = upcoming.into_iter().map(&entry).collect();
    ShowTimeline {
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

/// A show as listed on a venue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<&ShowDetail> for ArtistAppearance {
    fn from(show: &ShowDetail) -> Self {
        Self {
            artist_id: show.artist_id,
            artist_name: show.artist_name.clone(),
            artist_image_link: show.artist_image_link.clone(),
            start_time: format_show_time(&show.start_time),
        }
    }
}

/// A show as listed on an artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueAppearance {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

impl From<&ShowDetail> for VenueAppearance {
    fn from(show: &ShowDetail) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name.clone(),
            venue_image_link: show.venue_image_link.clone(),
            start_time: format_show_time(&show.start_time),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VenuePage {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub shows: ShowTimeline<ArtistAppearance>,
}

impl VenuePage {
    pub fn new(venue: Venue, shows: &[ShowDetail], now: DateTime<Utc>) -> Self {
        Self {
            venue,
            shows: split_shows(shows, now, |s| ArtistAppearance::from(s)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistPage {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub shows: ShowTimeline<VenueAppearance>,
}

impl ArtistPage {
    pub fn new(artist: Artist, shows: &[ShowDetail], now: DateTime<Utc>) -> Self {
        Self {
            artist,
            shows: split_shows(shows, now, |s| VenueAppearance::from(s)),
        }
    }
}
