use tracing::debug;

use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::store::TaskStore;
use crate::task::{Priority, Task};

const SELECT_TO_COMPLETE: &str = "Please select a task to mark as completed!";
const SELECT_TO_DELETE: &str = "Please select a task to delete!";
const CONFIRM_DELETE: &str = "Are you sure you want to delete this task?";
const CONFIRM_CLEAR: &str = "Are you sure you want to clear all completed tasks?";
const NOTHING_TO_CLEAR: &str = "No completed tasks to clear!";

/// What an operation did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The list changed and was saved; the shell should refresh.
    Changed,
    /// The user declined the confirmation.
    Cancelled,
    /// There was nothing to do.
    Unchanged,
}

/// The tasks in insertion order, kept in sync with their file.
#[derive(Debug)]
pub struct TaskList {
    tasks: Vec<Task>,
    store: TaskStore,
}

impl TaskList {
    /// Loads the list from `store`.
    pub fn open(store: TaskStore) -> Result<Self> {
        let tasks = store.load()?;
        Ok(Self { tasks, store })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    // Never reuses an id still present, even after deletions.
    fn next_id(&self) -> Result<u32> {
        let max = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        max.checked_add(1).ok_or(Error::IdsExhausted)
    }

    pub fn add(
        &mut self,
        prompter: &mut dyn Prompter,
        description: &str,
        priority: Priority,
        due_date: Option<&str>,
    ) -> Result<Outcome> {
        let description = description.trim();
        if description.is_empty() {
            let err = Error::EmptyDescription;
            prompter.warn(&err.to_string());
            return Err(err);
        }
        let due_date = due_date
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let id = match self.next_id() {
            Ok(id) => id,
            Err(err) => {
                prompter.warn(&err.to_string());
                return Err(err);
            }
        };
        let task = Task::new(id, description.to_string(), priority, due_date);
        debug!(id = task.id, %priority, "adding task");
        self.tasks.push(task);
        self.store.save(&self.tasks)?;
        Ok(Outcome::Changed)
    }

    pub fn complete(&mut self, prompter: &mut dyn Prompter, selected: Option<u32>) -> Result<Outcome> {
        let index = self.selected_index(prompter, selected, SELECT_TO_COMPLETE)?;
        let task = &mut self.tasks[index];
        debug!(id = task.id, already = task.completed, "completing task");
        task.completed = true;
        self.store.save(&self.tasks)?;
        Ok(Outcome::Changed)
    }

    pub fn delete(&mut self, prompter: &mut dyn Prompter, selected: Option<u32>) -> Result<Outcome> {
        let index = self.selected_index(prompter, selected, SELECT_TO_DELETE)?;
        if !prompter.confirm(CONFIRM_DELETE) {
            return Ok(Outcome::Cancelled);
        }
        let removed = self.tasks.remove(index);
        debug!(id = removed.id, "deleted task");
        self.store.save(&self.tasks)?;
        Ok(Outcome::Changed)
    }

    pub fn clear_completed(&mut self, prompter: &mut dyn Prompter) -> Result<Outcome> {
        if !self.tasks.iter().any(|t| t.completed) {
            prompter.info(NOTHING_TO_CLEAR);
            return Ok(Outcome::Unchanged);
        }
        if !prompter.confirm(CONFIRM_CLEAR) {
            return Ok(Outcome::Cancelled);
        }
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        debug!(removed = before - self.tasks.len(), "cleared completed tasks");
        self.store.save(&self.tasks)?;
        Ok(Outcome::Changed)
    }

    /// Position of the first task with the selected id.
    fn selected_index(
        &self,
        prompter: &mut dyn Prompter,
        selected: Option<u32>,
        message: &str,
    ) -> Result<usize> {
        let Some(id) = selected else {
            prompter.warn(message);
            return Err(Error::NothingSelected(message.to_string()));
        };
        match self.tasks.iter().position(|t| t.id == id) {
            Some(index) => Ok(index),
            None => {
                prompter.warn(message);
                Err(Error::TaskNotFound(id))
            }
        }
    }
}
