use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;
use sift_core::dto::TagCountDto;

#[derive(Debug, Args)]
pub struct TagsArgs {}

pub fn list_tags(ctx: &Context<'_>, _args: TagsArgs) -> Result<()> {
    let catalog = ctx.open_catalog()?;
    let items: Vec<TagCountDto> = catalog
        .tag_counts()
        .into_iter()
        .map(|(tag, count)| TagCountDto {
            name: tag.as_str().to_string(),
            count,
        })
        .collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no tags");
        return Ok(());
    }

    for item in items {
        println!("{} ({})", item.name, item.count);
    }
    Ok(())
}
