use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use triad_core::search::like_pattern;
use triad_core::{ArtistId, VenueId};
use triad_fyyur::{Artist, ArtistDraft, ShowDetail, ShowDraft, ShowFilter, Venue, VenueDraft};

use super::map_sqlx_error;
use crate::store::{FyyurStore, StoreError, StoreResult};

#[derive(Debug, FromRow)]
struct VenueRow {
    id: i64,
    name: String,
    genres: Vec<String>,
    address: String,
    city: String,
    state: String,
    phone: Option<String>,
    website: Option<String>,
    facebook_link: Option<String>,
    seeking_talent: bool,
    seeking_description: Option<String>,
    image_link: Option<String>,
}

impl From<VenueRow> for Venue {
    fn from(row: VenueRow) -> Self {
        Venue {
            id: VenueId::new(row.id),
            name: row.name,
            genres: row.genres,
            address: row.address,
            city: row.city,
            state: row.state,
            phone: row.phone,
            website: row.website,
            facebook_link: row.facebook_link,
            seeking_talent: row.seeking_talent,
            seeking_description: row.seeking_description,
            image_link: row.image_link,
        }
    }
}

#[derive(Debug, FromRow)]
struct ArtistRow {
    id: i64,
    name: String,
    genres: Vec<String>,
    city: String,
    state: String,
    phone: Option<String>,
    website: Option<String>,
    facebook_link: Option<String>,
    seeking_venue: bool,
    seeking_description: Option<String>,
    image_link: Option<String>,
}

impl From<ArtistRow> for Artist {
    fn from(row: ArtistRow) -> Self {
        Artist {
            id: ArtistId::new(row.id),
            name: row.name,
            genres: row.genres,
            city: row.city,
            state: row.state,
            phone: row.phone,
            website: row.website,
            facebook_link: row.facebook_link,
            seeking_venue: row.seeking_venue,
            seeking_description: row.seeking_description,
            image_link: row.image_link,
        }
    }
}

#[derive(Debug, FromRow)]
struct ShowRow {
    venue_id: i64,
    venue_name: String,
    venue_image_link: Option<String>,
    artist_id: i64,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: DateTime<Utc>,
}

impl From<ShowRow> for ShowDetail {
    fn from(row: ShowRow) -> Self {
        ShowDetail {
            venue_id: VenueId::new(row.venue_id),
            venue_name: row.venue_name,
            venue_image_link: row.venue_image_link,
            artist_id: ArtistId::new(row.artist_id),
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: row.start_time,
        }
    }
}

const VENUE_COLUMNS: &str = "id, name, genres, address, city, state, phone, website, \
     facebook_link, seeking_talent, seeking_description, image_link";

const ARTIST_COLUMNS: &str = "id, name, genres, city, state, phone, website, \
     facebook_link, seeking_venue, seeking_description, image_link";

const SHOW_SELECT: &str = "SELECT s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link, \
     s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link, s.start_time \
     FROM shows s \
     JOIN venues v ON v.id = s.venue_id \
     JOIN artists a ON a.id = s.artist_id";

#[derive(Debug, Clone)]
pub struct PgFyyurStore {
    pool: PgPool,
}

impl PgFyyurStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_venues(&self, operation: &str, sql: &str, bind: Option<String>) -> StoreResult<Vec<Venue>> {
        let mut query = sqlx::query_as::<_, VenueRow>(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
        Ok(rows.into_iter().map(Venue::from).collect())
    }

    async fn fetch_artists(&self, operation: &str, sql: &str, bind: Option<String>) -> StoreResult<Vec<Artist>> {
        let mut query = sqlx::query_as::<_, ArtistRow>(sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;
        Ok(rows.into_iter().map(Artist::from).collect())
    }
}

#[async_trait]
impl FyyurStore for PgFyyurStore {
    #[instrument(skip(self), err)]
    async fn venues(&self) -> StoreResult<Vec<Venue>> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY id");
        self.fetch_venues("venues", &sql, None).await
    }

    #[instrument(skip(self), fields(venue_id = %id), err)]
    async fn venue(&self, id: VenueId) -> StoreResult<Option<Venue>> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1");
        let row: Option<VenueRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("venue", e))?;
        Ok(row.map(Venue::from))
    }

    #[instrument(skip(self), err)]
    async fn latest_venue(&self) -> StoreResult<Option<Venue>> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY id DESC LIMIT 1");
        let row: Option<VenueRow> = sqlx::query_as(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("latest_venue", e))?;
        Ok(row.map(Venue::from))
    }

    #[instrument(skip(self), err)]
    async fn search_venues(&self, term: &str) -> StoreResult<Vec<Venue>> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE name ILIKE $1 ORDER BY id");
        self.fetch_venues("search_venues", &sql, Some(like_pattern(term))).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.profile.name), err)]
    async fn insert_venue(&self, draft: VenueDraft) -> StoreResult<Venue> {
        let venue = draft.into_venue(VenueId::new(0));
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO venues (name, genres, address, city, state, phone, website, facebook_link, \
             seeking_talent, seeking_description, image_link) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING id",
        )
        .bind(&venue.name)
        .bind(&venue.genres)
        .bind(&venue.address)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.phone)
        .bind(&venue.website)
        .bind(&venue.facebook_link)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .bind(&venue.image_link)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_venue", e))?;
        Ok(Venue {
            id: VenueId::new(id),
            ..venue
        })
    }

    #[instrument(skip(self, draft), fields(venue_id = %id), err)]
    async fn update_venue(&self, id: VenueId, draft: VenueDraft) -> StoreResult<Venue> {
        let venue = draft.into_venue(id);
        let result = sqlx::query(
            "UPDATE venues SET name = $2, genres = $3, address = $4, city = $5, state = $6, \
             phone = $7, website = $8, facebook_link = $9, seeking_talent = $10, \
             seeking_description = $11, image_link = $12 WHERE id = $1",
        )
        .bind(id.get())
        .bind(&venue.name)
        .bind(&venue.genres)
        .bind(&venue.address)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.phone)
        .bind(&venue.website)
        .bind(&venue.facebook_link)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .bind(&venue.image_link)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_venue", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(venue)
    }

    #[instrument(skip(self), fields(venue_id = %id), err)]
    async fn delete_venue(&self, id: VenueId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_venue", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn artists(&self) -> StoreResult<Vec<Artist>> {
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY id");
        self.fetch_artists("artists", &sql, None).await
    }

    #[instrument(skip(self), fields(artist_id = %id), err)]
    async fn artist(&self, id: ArtistId) -> StoreResult<Option<Artist>> {
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1");
        let row: Option<ArtistRow> = sqlx::query_as(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("artist", e))?;
        Ok(row.map(Artist::from))
    }

    #[instrument(skip(self), err)]
    async fn search_artists(&self, term: &str) -> StoreResult<Vec<Artist>> {
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE name ILIKE $1 ORDER BY id");
        self.fetch_artists("search_artists", &sql, Some(like_pattern(term))).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.profile.name), err)]
    async fn insert_artist(&self, draft: ArtistDraft) -> StoreResult<Artist> {
        let artist = draft.into_artist(ArtistId::new(0));
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO artists (name, genres, city, state, phone, website, facebook_link, \
             seeking_venue, seeking_description, image_link) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING id",
        )
        .bind(&artist.name)
        .bind(&artist.genres)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.website)
        .bind(&artist.facebook_link)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .bind(&artist.image_link)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_artist", e))?;
        Ok(Artist {
            id: ArtistId::new(id),
            ..artist
        })
    }

    #[instrument(skip(self, draft), fields(artist_id = %id), err)]
    async fn update_artist(&self, id: ArtistId, draft: ArtistDraft) -> StoreResult<Artist> {
        let artist = draft.into_artist(id);
        let result = sqlx::query(
            "UPDATE artists SET name = $2, genres = $3, city = $4, state = $5, phone = $6, \
             website = $7, facebook_link = $8, seeking_venue = $9, seeking_description = $10, \
             image_link = $11 WHERE id = $1",
        )
        .bind(id.get())
        .bind(&artist.name)
        .bind(&artist.genres)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.website)
        .bind(&artist.facebook_link)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .bind(&artist.image_link)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_artist", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(artist)
    }

    #[instrument(skip(self), err)]
    async fn shows(&self, filter: ShowFilter) -> StoreResult<Vec<ShowDetail>> {
        let sql = format!(
            "{SHOW_SELECT} WHERE ($1::bigint IS NULL OR s.venue_id = $1) \
             AND ($2::bigint IS NULL OR s.artist_id = $2) \
             ORDER BY s.start_time, s.venue_id"
        );
        let rows: Vec<ShowRow> = sqlx::query_as(&sql)
            .bind(filter.venue_id.map(|id| id.get()))
            .bind(filter.artist_id.map(|id| id.get()))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("shows", e))?;
        Ok(rows.into_iter().map(ShowDetail::from).collect())
    }

    #[instrument(
        skip(self, draft),
        fields(venue_id = %draft.venue_id, artist_id = %draft.artist_id),
        err
    )]
    async fn insert_show(&self, draft: ShowDraft) -> StoreResult<ShowDetail> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        sqlx::query("INSERT INTO shows (venue_id, artist_id, start_time) VALUES ($1, $2, $3)")
            .bind(draft.venue_id.get())
            .bind(draft.artist_id.get())
            .bind(draft.start_time)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("insert_show", e))?;

        let sql = format!("{SHOW_SELECT} WHERE s.artist_id = $1 AND s.start_time = $2");
        let row: ShowRow = sqlx::query_as(&sql)
            .bind(draft.artist_id.get())
            .bind(draft.start_time)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("load_show", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit", e))?;
        Ok(row.into())
    }
}
