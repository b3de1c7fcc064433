//! JSON file persistence for the task list.
//!
//! The whole list is rewritten on every save. There is no locking: a second
//! process writing the same file races with this one.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::error::{Error, Result};
use crate::task::Task;

/// Default name of the task file, relative to the working directory.
pub const DEFAULT_FILE: &str = "todo_gui.json";

#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all tasks. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<Task>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no task file yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(Error::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let tasks: Vec<Task> = serde_json::from_str(&data).map_err(|source| Error::Parse {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Overwrites the file with `tasks`, indented four spaces.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        tasks.serialize(&mut ser).map_err(Error::Serialize)?;
        fs::write(&self.path, buf).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new(DEFAULT_FILE)
    }
}
