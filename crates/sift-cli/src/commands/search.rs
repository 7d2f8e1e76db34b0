use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{format_track_line, parse_track_id};
use anyhow::Result;
use clap::Args;
use sift_core::dto::TrackListItemDto;
use sift_store::query::TrackQuery;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Query in sift syntax; empty matches every track
    #[arg(default_value = "")]
    pub query: String,
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

pub fn search(ctx: &Context<'_>, args: SearchArgs) -> Result<()> {
    if args.limit == Some(0) {
        return Err(invalid_input("limit must be greater than zero"));
    }
    let predicate = ctx.compiler().compile(&args.query)?;
    let catalog = ctx.open_catalog()?;
    let limit = args.limit.or(ctx.config.output.limit);
    let query = TrackQuery::new(predicate).with_limit(limit);
    let matches = catalog.search(&query);

    if ctx.json {
        let items: Vec<TrackListItemDto> =
            matches.into_iter().map(TrackListItemDto::from).collect();
        print_json(&items)?;
        return Ok(());
    }

    if matches.is_empty() {
        println!("no tracks");
        return Ok(());
    }
    for track in matches {
        println!("{}", format_track_line(track));
    }
    Ok(())
}

pub fn show_track(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_track_id(&args.id)?;
    let catalog = ctx.open_catalog()?;
    let track = catalog
        .get(id)
        .ok_or_else(|| not_found(format!("track {}", id)))?;

    if ctx.json {
        print_json(&TrackListItemDto::from(track))?;
        return Ok(());
    }

    println!("id: {}", track.id);
    println!("title: {}", track.title);
    if let Some(artist) = track.artist.as_deref() {
        println!("artist: {}", artist);
    }
    if let Some(album) = track.album.as_deref() {
        println!("album: {}", album);
    }
    if let Some(year) = track.year {
        println!("year: {}", year);
    }
    println!("explicit: {}", if track.explicit { "yes" } else { "no" });
    if !track.tags.is_empty() {
        let tags: Vec<&str> = track.tags.iter().map(|tag| tag.as_str()).collect();
        println!("tags: {}", tags.join(", "));
    }
    Ok(())
}
