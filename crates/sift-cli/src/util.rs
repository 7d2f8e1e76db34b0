use crate::error::invalid_input;
use anyhow::Result;
use sift_core::domain::{Track, TrackId};

pub fn parse_track_id(raw: &str) -> Result<TrackId> {
    if raw.trim().is_empty() {
        return Err(invalid_input("track id cannot be empty"));
    }
    raw.parse::<TrackId>()
        .map_err(|_| invalid_input(format!("invalid track id: {}", raw.trim())))
}

pub fn format_track_line(track: &Track) -> String {
    let mut line = format!("{}  {}", track.id, track.title);
    if let Some(artist) = track.artist.as_deref() {
        line.push_str(" / ");
        line.push_str(artist);
    }
    if let Some(album) = track.album.as_deref() {
        line.push_str(" / ");
        line.push_str(album);
    }
    if let Some(year) = track.year {
        line.push_str(&format!(" ({})", year));
    }
    if track.explicit {
        line.push_str(" [E]");
    }
    line
}
