use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, error};

use crate::error::Result;
use crate::prompt::Prompter;
use crate::task::{rows, Priority};
use crate::task_list::{Outcome, TaskList};
use crate::view::{self, Dialog, DialogKind, Focus, Form, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Shell state around the task list: form contents, focus and selection.
pub struct App {
    list: TaskList,
    form: Form,
    focus: Focus,
    selected: Option<usize>,
}

impl App {
    pub fn new(list: TaskList, default_priority: Priority) -> Self {
        Self {
            list,
            form: Form::new(default_priority),
            focus: Focus::Description,
            selected: None,
        }
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected_id(&self) -> Option<u32> {
        self.selected
            .and_then(|i| self.list.tasks().get(i))
            .map(|t| t.id)
    }

    pub fn screen(&self) -> Screen {
        Screen {
            rows: rows(self.list.tasks()),
            selected: self.selected,
            form: self.form.clone(),
            focus: self.focus,
            dialog: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, prompter: &mut dyn Prompter) -> Result<Control> {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Ok(Control::Quit);
        }
        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            _ => match self.focus {
                Focus::Table => return self.handle_table_key(key, prompter),
                Focus::Priority => match key.code {
                    KeyCode::Left => self.form.priority = self.form.priority.prev(),
                    KeyCode::Right | KeyCode::Char(' ') => {
                        self.form.priority = self.form.priority.next()
                    }
                    KeyCode::Enter => self.submit(prompter)?,
                    _ => {}
                },
                Focus::Description | Focus::DueDate if key.code == KeyCode::Enter => {
                    self.submit(prompter)?
                }
                Focus::Description | Focus::DueDate => {
                    let field = if self.focus == Focus::Description {
                        &mut self.form.description
                    } else {
                        &mut self.form.due_date
                    };
                    match key.code {
                        KeyCode::Char(c) => field.push(c),
                        KeyCode::Backspace => {
                            field.pop();
                        }
                        _ => {}
                    }
                }
            },
        }
        Ok(Control::Continue)
    }

    fn handle_table_key(&mut self, key: KeyEvent, prompter: &mut dyn Prompter) -> Result<Control> {
        let len = self.list.tasks().len();
        match key.code {
            KeyCode::Char('q') => return Ok(Control::Quit),
            KeyCode::Up => {
                self.selected = match self.selected {
                    _ if len == 0 => None,
                    Some(i) => Some(i.saturating_sub(1)),
                    None => Some(0),
                }
            }
            KeyCode::Down => {
                self.selected = match self.selected {
                    _ if len == 0 => None,
                    Some(i) => Some((i + 1).min(len - 1)),
                    None => Some(0),
                }
            }
            KeyCode::Char('c') => {
                let selected = self.selected_id();
                settle(self.list.complete(prompter, selected))?;
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let selected = self.selected_id();
                settle(self.list.delete(prompter, selected))?;
                self.clamp_selection();
            }
            KeyCode::Char('x') => {
                settle(self.list.clear_completed(prompter))?;
                self.clamp_selection();
            }
            _ => {}
        }
        Ok(Control::Continue)
    }

    fn submit(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        let due_date = Some(self.form.due_date.as_str());
        let outcome = settle(
            self.list
                .add(prompter, &self.form.description, self.form.priority, due_date),
        )?;
        if outcome == Some(Outcome::Changed) {
            self.form.clear();
            self.focus = Focus::Description;
        }
        Ok(())
    }

    fn clamp_selection(&mut self) {
        let len = self.list.tasks().len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
    }
}

/// Swallows errors the prompter has already shown; persistence and
/// terminal failures pass through.
fn settle(result: Result<Outcome>) -> Result<Option<Outcome>> {
    match result {
        Ok(outcome) => Ok(Some(outcome)),
        Err(err) if err.is_user_facing() => {
            debug!(error = %err, "operation rejected");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Draws dialogs over a snapshot of the screen and waits for a key.
struct ModalPrompter<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    backdrop: Screen,
}

impl<B: Backend> ModalPrompter<'_, B> {
    fn show(&mut self, kind: DialogKind, message: &str) -> bool {
        self.backdrop.dialog = Some(Dialog {
            kind,
            message: message.to_string(),
        });
        let answer = self.wait(kind);
        self.backdrop.dialog = None;
        answer.unwrap_or_else(|err| {
            error!(error = %err, "dialog failed");
            false
        })
    }

    fn wait(&mut self, kind: DialogKind) -> std::io::Result<bool> {
        loop {
            self.terminal.draw(|f| view::render(f, &self.backdrop))?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if kind != DialogKind::Confirm {
                return Ok(true);
            }
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return Ok(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }
}

impl<B: Backend> Prompter for ModalPrompter<'_, B> {
    fn warn(&mut self, message: &str) {
        self.show(DialogKind::Warning, message);
    }

    fn info(&mut self, message: &str) {
        self.show(DialogKind::Info, message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.show(DialogKind::Confirm, message)
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        let screen = app.screen();
        terminal.draw(|f| view::render(f, &screen))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let mut prompter = ModalPrompter {
            terminal: &mut *terminal,
            backdrop: screen,
        };
        if app.handle_key(key, &mut prompter)? == Control::Quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;

    #[derive(Default)]
    struct Answers {
        confirm: bool,
        shown: Vec<String>,
    }

    impl Prompter for Answers {
        fn warn(&mut self, message: &str) {
            self.shown.push(message.to_string());
        }

        fn info(&mut self, message: &str) {
            self.shown.push(message.to_string());
        }

        fn confirm(&mut self, _message: &str) -> bool {
            self.confirm
        }
    }

    fn app(dir: &tempfile::TempDir) -> App {
        let store = TaskStore::new(dir.path().join("todo_gui.json"));
        App::new(TaskList::open(store).unwrap(), Priority::Medium)
    }

    fn press(app: &mut App, prompter: &mut Answers, code: KeyCode) -> Control {
        app.handle_key(KeyEvent::from(code), prompter).unwrap()
    }

    fn type_text(app: &mut App, prompter: &mut Answers, text: &str) {
        for c in text.chars() {
            press(app, prompter, KeyCode::Char(c));
        }
    }

    #[test]
    fn form_submission_adds_and_clears_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        let mut prompter = Answers::default();

        type_text(&mut app, &mut prompter, "Buy milk");
        press(&mut app, &mut prompter, KeyCode::Tab);
        press(&mut app, &mut prompter, KeyCode::Left);
        press(&mut app, &mut prompter, KeyCode::Tab);
        type_text(&mut app, &mut prompter, "2024-01-01");
        press(&mut app, &mut prompter, KeyCode::Enter);

        let task = &app.list().tasks()[0];
        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.due_date.as_deref(), Some("2024-01-01"));
        assert_eq!(app.form().description, "");
        assert_eq!(app.form().due_date, "");
        assert_eq!(app.form().priority, Priority::High);
        assert_eq!(app.focus(), Focus::Description);
    }

    #[test]
    fn empty_submission_warns_and_keeps_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        let mut prompter = Answers::default();

        type_text(&mut app, &mut prompter, "   ");
        press(&mut app, &mut prompter, KeyCode::Enter);

        assert!(app.list().tasks().is_empty());
        assert_eq!(prompter.shown, vec!["Task description cannot be empty!"]);
        assert_eq!(app.form().description, "   ");
    }

    #[test]
    fn table_keys_complete_and_delete_selected_task() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        let mut prompter = Answers {
            confirm: true,
            ..Default::default()
        };
        type_text(&mut app, &mut prompter, "one");
        press(&mut app, &mut prompter, KeyCode::Enter);
        type_text(&mut app, &mut prompter, "two");
        press(&mut app, &mut prompter, KeyCode::Enter);

        press(&mut app, &mut prompter, KeyCode::BackTab);
        assert_eq!(app.focus(), Focus::Table);

        press(&mut app, &mut prompter, KeyCode::Char('c'));
        assert_eq!(prompter.shown, vec!["Please select a task to mark as completed!"]);

        press(&mut app, &mut prompter, KeyCode::Down);
        press(&mut app, &mut prompter, KeyCode::Down);
        assert_eq!(app.selected_id(), Some(2));
        press(&mut app, &mut prompter, KeyCode::Char('c'));
        assert!(app.list().get(2).unwrap().completed);

        press(&mut app, &mut prompter, KeyCode::Char('d'));
        assert_eq!(app.list().tasks().len(), 1);
        assert_eq!(app.selected_id(), Some(1));

        assert_eq!(press(&mut app, &mut prompter, KeyCode::Char('q')), Control::Quit);
    }

    #[test]
    fn letters_type_into_form_instead_of_acting() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        let mut prompter = Answers::default();

        assert_eq!(press(&mut app, &mut prompter, KeyCode::Char('q')), Control::Continue);
        type_text(&mut app, &mut prompter, "xd");
        assert_eq!(app.form().description, "qxd");
        assert_eq!(press(&mut app, &mut prompter, KeyCode::Esc), Control::Quit);
    }

    #[test]
    fn save_failure_ends_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(dir.path().join("missing").join("todo_gui.json"));
        let mut app = App::new(TaskList::open(store).unwrap(), Priority::Medium);
        let mut prompter = Answers::default();

        type_text(&mut app, &mut prompter, "x");
        let err = app
            .handle_key(KeyEvent::from(KeyCode::Enter), &mut prompter)
            .unwrap_err();

        assert!(matches!(err, crate::error::Error::Write { .. }));
        assert_eq!(app.list().tasks().len(), 1);
        assert!(prompter.shown.is_empty());
    }
}
