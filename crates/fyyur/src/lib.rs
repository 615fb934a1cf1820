//! Fyyur booking-site records: venues, artists and the shows joining them.
//!
//! - `form`: urlencoded form access (repeated keys accumulate)
//! - `profile`: fields shared by venues and artists, with validation
//! - `venue` / `artist` / `show`: the three tables
//! - `view`: page shapes (area grouping, search results, past/upcoming split)

pub mod artist;
pub mod choices;
pub mod form;
pub mod profile;
pub mod show;
pub mod venue;
pub mod view;

pub use artist::{Artist, ArtistDraft};
pub use form::FormFields;
pub use profile::ProfileDraft;
pub use show::{ShowDetail, ShowDraft, ShowFilter, format_show_time};
pub use venue::{Venue, VenueDraft};
