//! Optional `todo.toml` settings.

use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path, path::PathBuf};
use tracing::warn;

use crate::store::DEFAULT_FILE;
use crate::task::Priority;

pub const CONFIG_FILE: &str = "todo.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where tasks are persisted
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Initial priority of the input form
    #[serde(default)]
    pub default_priority: Priority,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            default_priority: Priority::default(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_FILE)
}

impl Config {
    /// Loads `path`, falling back to defaults when it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read config, using defaults");
                return Self::default();
            }
        };
        toml::from_str(&raw).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Self::default()
        })
    }
}
