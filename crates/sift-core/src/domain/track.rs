use crate::domain::ids::TrackId;
use crate::domain::tag::TagName;
use crate::error::CoreError;
use crate::query::Record;
use serde::{Deserialize, Serialize};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: TrackId,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub tags: Vec<TagName>,
}

impl Track {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::EmptyTitle);
        }

        if let Some(year) = self.year {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(CoreError::InvalidYear(year));
            }
        }

        Ok(())
    }
}

impl Record for Track {
    fn title(&self) -> &str {
        &self.title
    }

    fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn explicit(&self) -> bool {
        self.explicit
    }

    fn tags(&self) -> Vec<&str> {
        self.tags.iter().map(TagName::as_str).collect()
    }
}
