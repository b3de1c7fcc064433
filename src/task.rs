use chrono::Local;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::Error;

/// Format of `created_at`, local time.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Capitalised name, as shown in the task table.
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Priority::High => Priority::Low,
            Priority::Medium => Priority::High,
            Priority::Low => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidPriority(s.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u32,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<String>, // free text, not validated
    #[serde(default)]
    pub completed: bool,
    pub created_at: String,
}

impl Task {
    /// A pending task stamped with the current local time.
    pub fn new(id: u32, description: String, priority: Priority, due_date: Option<String>) -> Self {
        Self {
            id,
            description,
            priority,
            due_date,
            completed: false,
            created_at: Local::now().format(CREATED_AT_FORMAT).to_string(),
        }
    }
}

/// One displayed row of the task table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: String,
    pub description: String,
    pub priority: &'static str,
    pub due_date: String,
    pub completed: &'static str,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            description: task.description.clone(),
            priority: task.priority.label(),
            due_date: task
                .due_date
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "-".to_string()),
            completed: if task.completed { "Yes" } else { "No" },
        }
    }
}

pub fn rows(tasks: &[Task]) -> Vec<TaskRow> {
    tasks.iter().map(TaskRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn priority_parses_loosely() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" Medium ".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("LOW".parse::<Priority>().unwrap(), Priority::Low);
        assert!(matches!(
            "urgent".parse::<Priority>(),
            Err(Error::InvalidPriority(_))
        ));
    }

    #[test]
    fn priority_cycles() {
        for p in Priority::ALL {
            assert_eq!(p.next().prev(), p);
        }
        assert_eq!(Priority::Low.next(), Priority::High);
    }

    #[test]
    fn new_task_is_pending_with_timestamp() {
        let task = Task::new(4, "Buy milk".into(), Priority::High, None);
        assert!(!task.completed);
        assert!(NaiveDateTime::parse_from_str(&task.created_at, CREATED_AT_FORMAT).is_ok());
    }

    #[test]
    fn row_formats_columns() {
        let mut task = Task::new(1, "Buy milk".into(), Priority::High, Some("2024-01-01".into()));
        let row = TaskRow::from(&task);
        assert_eq!(row.id, "1");
        assert_eq!(row.priority, "High");
        assert_eq!(row.due_date, "2024-01-01");
        assert_eq!(row.completed, "No");

        task.due_date = None;
        task.completed = true;
        let row = TaskRow::from(&task);
        assert_eq!(row.due_date, "-");
        assert_eq!(row.completed, "Yes");

        task.due_date = Some(String::new());
        assert_eq!(TaskRow::from(&task).due_date, "-");
    }

    #[test]
    fn deserializes_file_record() {
        let json = r#"{
            "id": 2,
            "description": "Call bank",
            "priority": "low",
            "due_date": null,
            "completed": false,
            "created_at": "2024-01-01 09:30:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 2);
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.due_date, None);
    }
}
