pub mod error;
pub mod paths;
pub mod query;

use crate::error::{Result, StoreError};
use crate::query::TrackQuery;
use serde::Deserialize;
use sift_core::domain::{TagName, Track, TrackId};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tracks: Vec<Track>,
}

/// Tracks loaded from a JSON catalog file of the form `{"tracks": [...]}`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn open(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                StoreError::MissingCatalog(path.to_path_buf())
            } else {
                StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let parsed: CatalogFile =
            serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::from_tracks(parsed.tracks)?;
        debug!(path = %path.display(), tracks = catalog.tracks.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_tracks(tracks: Vec<Track>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tracks.len());
        for (index, track) in tracks.iter().enumerate() {
            track
                .validate()
                .map_err(|source| StoreError::InvalidTrack { index, source })?;
            if !seen.insert(track.id) {
                return Err(StoreError::DuplicateTrack(track.id));
            }
        }
        Ok(Self { tracks })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|track| track.id == id)
    }

    /// Matching tracks in catalog order.
    pub fn search(&self, query: &TrackQuery) -> Vec<&Track> {
        let matches = self
            .tracks
            .iter()
            .filter(|track| query.predicate.matches(*track));
        match query.limit {
            Some(limit) => matches.take(limit).collect(),
            None => matches.collect(),
        }
    }

    /// Every tag in use with the number of tracks carrying it, by name.
    pub fn tag_counts(&self) -> Vec<(TagName, usize)> {
        let mut counts: BTreeMap<&TagName, usize> = BTreeMap::new();
        for track in &self.tracks {
            let unique: HashSet<&TagName> = track.tags.iter().collect();
            for tag in unique {
                *counts.entry(tag).or_default() += 1;
            }
        }
        counts
            .into_iter()
            .map(|(tag, count)| (tag.clone(), count))
            .collect()
    }
}
