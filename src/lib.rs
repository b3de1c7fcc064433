//! A small terminal to-do list.
//!
//! The core is [`task_list::TaskList`], which owns the tasks and mirrors them
//! to a JSON file through [`store::TaskStore`]. Front ends talk to the user
//! through the [`prompt::Prompter`] trait; the terminal front end lives in
//! [`ui`] and [`view`].

pub mod config;
pub mod error;
pub mod prompt;
pub mod store;
pub mod task;
pub mod task_list;
pub mod ui;
pub mod view;

pub use error::{Error, Result};
