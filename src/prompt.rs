//! The dialog capability the task operations depend on.

/// Synchronous user dialogs.
///
/// Every call blocks until the user has answered or dismissed the message.
pub trait Prompter {
    fn warn(&mut self, message: &str);
    fn info(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
}
