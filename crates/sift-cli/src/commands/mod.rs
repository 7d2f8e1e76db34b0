use anyhow::{Context as _, Result};
use serde::Serialize;
use sift_config::AppConfig;
use sift_core::query::Compiler;
use sift_store::{paths, Catalog};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

pub mod query;
pub mod search;
pub mod tags;

pub struct Context<'a> {
    pub config: &'a AppConfig,
    pub json: bool,
    pub catalog_path: Option<PathBuf>,
}

impl Context<'_> {
    pub fn compiler(&self) -> Compiler {
        self.config.query.compiler()
    }

    pub fn open_catalog(&self) -> Result<Catalog> {
        let path =
            paths::resolve_catalog_path(self.catalog_path.clone(), self.config.catalog.clone())
                .with_context(|| "resolve catalog path")?;
        debug!(path = %path.display(), "catalog path resolved");
        Catalog::open(&path).with_context(|| format!("open catalog {}", path.display()))
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
