//! Configuration for the `typeshape` tool, read with the `config` crate.
//!
//! Settings come from an optional file (`typeshape.toml`, `typeshape.json`,
//! ... in the working directory, or an explicit path) overlaid with
//! environment variables prefixed `TYPESHAPE`, e.g.
//! `TYPESHAPE_LOG_FILTER=typeshape=debug`.
//!
//! ```toml
//! log_filter = "typeshape=info"
//!
//! [types]
//! node = "{value: number, children: Array<node>}"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_FILE: &str = "typeshape";
pub const DEFAULT_LOG_FILTER: &str = "typeshape=warn";

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Named type definitions in descriptor notation.
    #[serde(default)]
    pub types: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            types: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Reads `path`, or the default file when it exists, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_FILE).required(false),
        };
        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("TYPESHAPE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }
    pub fn from_text(text: &str, format: FileFormat) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(text, format))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
