//! Drawing. Everything here is a pure function of a [`Screen`].

use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::task::{Priority, TaskRow};

const ACCENT: Color = Color::Cyan;
const DIALOG_WIDTH: u16 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Description,
    Priority,
    DueDate,
    Table,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Description => Focus::Priority,
            Focus::Priority => Focus::DueDate,
            Focus::DueDate => Focus::Table,
            Focus::Table => Focus::Description,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Description => Focus::Table,
            Focus::Priority => Focus::Description,
            Focus::DueDate => Focus::Priority,
            Focus::Table => Focus::DueDate,
        }
    }
}

/// Contents of the "New Task" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub description: String,
    pub priority: Priority,
    pub due_date: String,
}

impl Form {
    pub fn new(priority: Priority) -> Self {
        Self {
            description: String::new(),
            priority,
            due_date: String::new(),
        }
    }

    /// Empties the text fields; the priority is kept.
    pub fn clear(&mut self) {
        self.description.clear();
        self.due_date.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Warning,
    Info,
    Confirm,
}

impl DialogKind {
    fn title(self) -> &'static str {
        match self {
            DialogKind::Warning => "Warning",
            DialogKind::Info => "Info",
            DialogKind::Confirm => "Confirm",
        }
    }

    fn hint(self) -> &'static str {
        match self {
            DialogKind::Confirm => "[y] Yes   [n] No",
            _ => "Press any key",
        }
    }

    fn color(self) -> Color {
        match self {
            DialogKind::Warning => Color::Yellow,
            DialogKind::Info => Color::Blue,
            DialogKind::Confirm => ACCENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub message: String,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone)]
pub struct Screen {
    pub rows: Vec<TaskRow>,
    pub selected: Option<usize>,
    pub form: Form,
    pub focus: Focus,
    pub dialog: Option<Dialog>,
}

pub fn render(f: &mut Frame, screen: &Screen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_form(f, screen, chunks[0]);
    render_table(f, screen, chunks[1]);
    render_help(f, screen, chunks[2]);

    if let Some(dialog) = &screen.dialog {
        render_dialog(f, dialog);
    }
}

fn field_style(screen: &Screen, focus: Focus) -> Style {
    if screen.focus == focus {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn text_field<'a>(screen: &Screen, focus: Focus, label: &'a str, value: &'a str) -> Line<'a> {
    let cursor = if screen.focus == focus { "_" } else { "" };
    Line::from(vec![
        Span::styled(label, field_style(screen, focus)),
        Span::raw(value),
        Span::raw(cursor),
    ])
}

fn render_form(f: &mut Frame, screen: &Screen, area: Rect) {
    let form = &screen.form;
    let lines = vec![
        text_field(screen, Focus::Description, "New Task: ", &form.description),
        Line::from(vec![
            Span::styled("Priority: ", field_style(screen, Focus::Priority)),
            Span::raw(format!("< {} >", form.priority.label())),
        ]),
        text_field(screen, Focus::DueDate, "Due Date (YYYY-MM-DD): ", &form.due_date),
    ];
    let block = Block::default().title("Add Task").borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_table(f: &mut Frame, screen: &Screen, area: Rect) {
    let header = Row::new(["ID", "Description", "Priority", "Due Date", "Completed"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = screen.rows.iter().map(|r| {
        Row::new(vec![
            Cell::from(r.id.as_str()),
            Cell::from(r.description.as_str()),
            Cell::from(r.priority),
            Cell::from(r.due_date.as_str()),
            Cell::from(r.completed),
        ])
    });
    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(9),
    ];
    let border = if screen.focus == Focus::Table {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    };
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title("Tasks")
                .borders(Borders::ALL)
                .border_style(border),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = TableState::default().with_selected(screen.selected);
    f.render_stateful_widget(table, area, &mut state);
}

fn render_help(f: &mut Frame, screen: &Screen, area: Rect) {
    let keys = match screen.focus {
        Focus::Table => "↑/↓ select  c complete  d delete  x clear completed  Tab form  q quit",
        Focus::Priority => "←/→ change priority  Enter add  Tab next  Esc quit",
        _ => "Enter add  Tab next  Esc quit",
    };
    f.render_widget(
        Paragraph::new(keys).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_dialog(f: &mut Frame, dialog: &Dialog) {
    let area = centered(f.area(), DIALOG_WIDTH, 6);
    let block = Block::default()
        .title(dialog.kind.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(dialog.kind.color()));
    let body = vec![
        Line::from(dialog.message.as_str()),
        Line::default(),
        Line::from(Span::styled(
            dialog.kind.hint(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(body).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
