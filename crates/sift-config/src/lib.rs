use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sift_core::query::{validate_max_group_depth, Compiler, DEFAULT_MAX_GROUP_DEPTH};
use thiserror::Error;

const APP_DIR: &str = "sift";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog: Option<PathBuf>,
    pub query: QueryConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    pub max_group_depth: usize,
}

impl QueryConfig {
    pub fn compiler(&self) -> Compiler {
        Compiler::with_max_depth(self.max_group_depth)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub limit: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            query: QueryConfig {
                max_group_depth: DEFAULT_MAX_GROUP_DEPTH,
            },
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid catalog path: {0}")]
    InvalidCatalogPath(PathBuf),
    #[error("invalid query.max_group_depth value: {0}")]
    InvalidGroupDepth(i64),
    #[error("invalid output.limit value: {0}")]
    InvalidLimit(i64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    catalog: Option<PathBuf>,
    query: Option<QueryFile>,
    output: Option<OutputFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QueryFile {
    max_group_depth: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputFile {
    limit: Option<i64>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(Some(merge_config(parsed, base_dir)?))
}

// Relative catalog paths are taken relative to the config file's directory.
fn merge_config(parsed: ConfigFile, base_dir: &Path) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(catalog) = parsed.catalog {
        if catalog.as_os_str().is_empty() {
            return Err(ConfigError::InvalidCatalogPath(catalog));
        }
        config.catalog = Some(if catalog.is_relative() {
            base_dir.join(catalog)
        } else {
            catalog
        });
    }

    if let Some(query) = parsed.query {
        if let Some(depth) = query.max_group_depth {
            config.query.max_group_depth = validate_max_group_depth(depth)
                .map_err(|_| ConfigError::InvalidGroupDepth(depth))?;
        }
    }

    if let Some(output) = parsed.output {
        if let Some(limit) = output.limit {
            let limit = usize::try_from(limit)
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidLimit(limit))?;
            config.output.limit = Some(limit);
        }
    }

    Ok(config)
}
