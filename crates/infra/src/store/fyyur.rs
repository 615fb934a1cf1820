use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use triad_core::{ArtistId, VenueId, contains_ignore_case};
use triad_fyyur::{Artist, ArtistDraft, ShowDetail, ShowDraft, ShowFilter, Venue, VenueDraft};

use super::memory::{Table, read, write};
use super::{StoreError, StoreResult};

/// Venue / artist / show storage.
#[async_trait]
pub trait FyyurStore: Send + Sync {
    async fn venues(&self) -> StoreResult<Vec<Venue>>;
    async fn venue(&self, id: VenueId) -> StoreResult<Option<Venue>>;
    /// Most recently created venue.
    async fn latest_venue(&self) -> StoreResult<Option<Venue>>;
    async fn search_venues(&self, term: &str) -> StoreResult<Vec<Venue>>;
    async fn insert_venue(&self, draft: VenueDraft) -> StoreResult<Venue>;
    async fn update_venue(&self, id: VenueId, draft: VenueDraft) -> StoreResult<Venue>;
    /// Fails with [`StoreError::Reference`] while shows still point at the venue.
    async fn delete_venue(&self, id: VenueId) -> StoreResult<()>;

    async fn artists(&self) -> StoreResult<Vec<Artist>>;
    async fn artist(&self, id: ArtistId) -> StoreResult<Option<Artist>>;
    async fn search_artists(&self, term: &str) -> StoreResult<Vec<Artist>>;
    async fn insert_artist(&self, draft: ArtistDraft) -> StoreResult<Artist>;
    async fn update_artist(&self, id: ArtistId, draft: ArtistDraft) -> StoreResult<Artist>;

    /// Shows joined with venue/artist display fields, in start-time order.
    async fn shows(&self, filter: ShowFilter) -> StoreResult<Vec<ShowDetail>>;
    /// Fails with [`StoreError::Reference`] for unknown venue/artist and
    /// [`StoreError::Conflict`] when the artist already plays at that time.
    async fn insert_show(&self, draft: ShowDraft) -> StoreResult<ShowDetail>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ShowRow {
    venue_id: VenueId,
    artist_id: ArtistId,
    start_time: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct FyyurTables {
    venues: Table<Venue>,
    artists: Table<Artist>,
    shows: Vec<ShowRow>,
}

impl FyyurTables {
    fn detail(&self, row: &ShowRow) -> Option<ShowDetail> {
        let venue = self.venues.get(row.venue_id.get())?;
        let artist = self.artists.get(row.artist_id.get())?;
        Some(ShowDetail {
            venue_id: venue.id,
            venue_name: venue.name.clone(),
            venue_image_link: venue.image_link.clone(),
            artist_id: artist.id,
            artist_name: artist.name.clone(),
            artist_image_link: artist.image_link.clone(),
            start_time: row.start_time,
        })
    }

    fn venue_taken(&self, candidate: &Venue) -> bool {
        self.venues
            .values()
            .any(|v| v.id != candidate.id && v.same_listing(candidate))
    }

    fn artist_taken(&self, candidate: &Artist) -> bool {
        self.artists
            .values()
            .any(|a| a.id != candidate.id && a.same_listing(candidate))
    }
}

/// In-memory booking store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryFyyurStore {
    inner: RwLock<FyyurTables>,
}

impl InMemoryFyyurStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FyyurStore for InMemoryFyyurStore {
    async fn venues(&self) -> StoreResult<Vec<Venue>> {
        Ok(read(&self.inner)?.venues.values().cloned().collect())
    }

    async fn venue(&self, id: VenueId) -> StoreResult<Option<Venue>> {
        Ok(read(&self.inner)?.venues.get(id.get()).cloned())
    }

    async fn latest_venue(&self) -> StoreResult<Option<Venue>> {
        Ok(read(&self.inner)?.venues.values().next_back().cloned())
    }

    async fn search_venues(&self, term: &str) -> StoreResult<Vec<Venue>> {
        let tables = read(&self.inner)?;
        Ok(tables
            .venues
            .values()
            .filter(|v| contains_ignore_case(&v.name, term))
            .cloned()
            .collect())
    }

    async fn insert_venue(&self, draft: VenueDraft) -> StoreResult<Venue> {
        let mut tables = write(&self.inner)?;
        let candidate = draft.into_venue(VenueId::new(0));
        if tables.venue_taken(&candidate) {
            return Err(StoreError::conflict(format!("venue {:?} is already listed", candidate.name)));
        }
        let id = tables.venues.next_id();
        let venue = Venue {
            id: VenueId::new(id),
            ..candidate
        };
        tables.venues.insert(id, venue.clone());
        Ok(venue)
    }

    async fn update_venue(&self, id: VenueId, draft: VenueDraft) -> StoreResult<Venue> {
        let mut tables = write(&self.inner)?;
        if tables.venues.get(id.get()).is_none() {
            return Err(StoreError::NotFound);
        }
        let venue = draft.into_venue(id);
        if tables.venue_taken(&venue) {
            return Err(StoreError::conflict(format!("venue {:?} is already listed", venue.name)));
        }
        tables.venues.insert(id.get(), venue.clone());
        Ok(venue)
    }

    async fn delete_venue(&self, id: VenueId) -> StoreResult<()> {
        let mut tables = write(&self.inner)?;
        if tables.venues.get(id.get()).is_none() {
            return Err(StoreError::NotFound);
        }
        if tables.shows.iter().any(|s| s.venue_id == id) {
            return Err(StoreError::reference(format!("venue {id} still has shows")));
        }
        tables.venues.remove(id.get());
        Ok(())
    }

    async fn artists(&self) -> StoreResult<Vec<Artist>> {
        Ok(read(&self.inner)?.artists.values().cloned().collect())
    }

    async fn artist(&self, id: ArtistId) -> StoreResult<Option<Artist>> {
        Ok(read(&self.inner)?.artists.get(id.get()).cloned())
    }

    async fn search_artists(&self, term: &str) -> StoreResult<Vec<Artist>> {
        let tables = read(&self.inner)?;
        Ok(tables
            .artists
            .values()
            .filter(|a| contains_ignore_case(&a.name, term))
            .cloned()
            .collect())
    }

    async fn insert_artist(&self, draft: ArtistDraft) -> StoreResult<Artist> {
        let mut tables = write(&self.inner)?;
        let candidate = draft.into_artist(ArtistId::new(0));
        if tables.artist_taken(&candidate) {
            return Err(StoreError::conflict(format!("artist {:?} is already listed", candidate.name)));
        }
        let id = tables.artists.next_id();
        let artist = Artist {
            id: ArtistId::new(id),
            ..candidate
        };
        tables.artists.insert(id, artist.clone());
        Ok(artist)
    }

    async fn update_artist(&self, id: ArtistId, draft: ArtistDraft) -> StoreResult<Artist> {
        let mut tables = write(&self.inner)?;
        if tables.artists.get(id.get()).is_none() {
            return Err(StoreError::NotFound);
        }
        let artist = draft.into_artist(id);
        if tables.artist_taken(&artist) {
            return Err(StoreError::conflict(format!("artist {:?} is already listed", artist.name)));
        }
        tables.artists.insert(id.get(), artist.clone());
        Ok(artist)
    }

    async fn shows(&self, filter: ShowFilter) -> StoreResult<Vec<ShowDetail>> {
        let tables = read(&self.inner)?;
        let mut shows: Vec<ShowDetail> = tables
            .shows
            .iter()
            .filter_map(|row| tables.detail(row))
            .filter(|s| filter.matches(s))
            .collect();
        shows.sort_by_key(|s| s.start_time);
        Ok(shows)
    }

    async fn insert_show(&self, draft: ShowDraft) -> StoreResult<ShowDetail> {
        let mut tables = write(&self.inner)?;
        let row = ShowRow {
            venue_id: draft.venue_id,
            artist_id: draft.artist_id,
            start_time: draft.start_time,
        };
        let detail = tables.detail(&row).ok_or_else(|| {
            StoreError::reference(format!(
                "venue {} or artist {} does not exist",
                row.venue_id, row.artist_id
            ))
        })?;
        if tables
            .shows
            .iter()
            .any(|s| s.artist_id == row.artist_id && s.start_time == row.start_time)
        {
            return Err(StoreError::conflict(format!(
                "artist {} already has a show at {}",
                row.artist_id, row.start_time
            )));
        }
        tables.shows.push(row);
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use triad_fyyur::ProfileDraft;

    fn profile(name: &str) -> ProfileDraft {
        ProfileDraft {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: None,
            website: None,
            image_link: Some(format!("https://img.test/{}.png", name.len())),
            facebook_link: None,
            seeking: false,
            seeking_description: None,
            genres: vec!["Jazz".to_string()],
        }
    }

    fn venue_draft(name: &str) -> VenueDraft {
        VenueDraft {
            profile: profile(name),
            address: "1015 Folsom Street".to_string(),
        }
    }

    fn artist_draft(name: &str) -> ArtistDraft {
        ArtistDraft { profile: profile(name) }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2035, 6, 15, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn venues_are_unique_and_latest_is_newest() {
        let store = InMemoryFyyurStore::new();
        store.insert_venue(venue_draft("The Musical Hop")).await.unwrap();
        let second = store.insert_venue(venue_draft("Park Square Live Music & Coffee")).await.unwrap();
        assert!(matches!(
            store.insert_venue(venue_draft("The Musical Hop")).await,
            Err(StoreError::Conflict(_))
        ));
        assert_eq!(store.latest_venue().await.unwrap(), Some(second));
        assert_eq!(store.search_venues("music").await.unwrap().len(), 2);
        assert_eq!(store.search_venues("hop").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn artist_cannot_play_twice_at_once() {
        let store = InMemoryFyyurStore::new();
        let hop = store.insert_venue(venue_draft("The Musical Hop")).await.unwrap();
        let park = store.insert_venue(venue_draft("Park Square")).await.unwrap();
        let artist = store.insert_artist(artist_draft("Guns N Petals")).await.unwrap();

        let show = |venue_id| ShowDraft {
            venue_id,
            artist_id: artist.id,
            start_time: at(21),
        };
        let detail = store.insert_show(show(hop.id)).await.unwrap();
        assert_eq!(detail.venue_name, "The Musical Hop");
        assert_eq!(detail.artist_name, "Guns N Petals");

        assert!(matches!(store.insert_show(show(park.id)).await, Err(StoreError::Conflict(_))));
        assert!(matches!(
            store.insert_show(show(VenueId::new(99))).await,
            Err(StoreError::Reference(_))
        ));
    }

    #[tokio::test]
    async fn shows_filter_and_block_venue_delete() {
        let store = InMemoryFyyurStore::new();
        let hop = store.insert_venue(venue_draft("The Musical Hop")).await.unwrap();
        let empty = store.insert_venue(venue_draft("Empty Hall")).await.unwrap();
        let a = store.insert_artist(artist_draft("Guns N Petals")).await.unwrap();
        let b = store.insert_artist(artist_draft("Matt Quevedo")).await.unwrap();

        for (artist, hour) in [(b.id, 22), (a.id, 20)] {
            store
                .insert_show(ShowDraft {
                    venue_id: hop.id,
                    artist_id: artist,
                    start_time: at(hour),
                })
                .await
                .unwrap();
        }

        let all = store.shows(ShowFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].artist_id, a.id);
        assert_eq!(store.shows(ShowFilter::artist(b.id)).await.unwrap().len(), 1);

        assert!(matches!(store.delete_venue(hop.id).await, Err(StoreError::Reference(_))));
        store.delete_venue(empty.id).await.unwrap();
        assert_eq!(store.venue(empty.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_missing_rows_is_not_found() {
        let store = InMemoryFyyurStore::new();
        assert_eq!(
            store.update_venue(VenueId::new(5), venue_draft("X")).await,
            Err(StoreError::NotFound)
        );
        assert_eq!(
            store.update_artist(ArtistId::new(5), artist_draft("X")).await,
            Err(StoreError::NotFound)
        );
    }
}
