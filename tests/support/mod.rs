#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use todolist::prompt::Prompter;
use todolist::store::TaskStore;
use todolist::task_list::TaskList;

/// A prompter that answers confirmations from a script and records
/// everything it was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    pub answers: Vec<bool>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub confirms: Vec<String>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().rev().copied().collect(),
            ..Default::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.answers.pop().expect("unexpected confirmation")
    }
}

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("todo_gui.json")
    }

    pub fn store(&self) -> TaskStore {
        TaskStore::new(self.data_file())
    }

    pub fn open(&self) -> TaskList {
        TaskList::open(self.store()).expect("open task list")
    }
}
