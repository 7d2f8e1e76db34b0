pub mod ids;
pub mod tag;
pub mod track;

pub use ids::TrackId;
pub use tag::{normalize_tag_name, TagName};
pub use track::{Track, MAX_YEAR, MIN_YEAR};
