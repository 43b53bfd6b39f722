//! Board selection menu.
//!
//! A small terminal menu for picking one of the discovered boards, creating
//! a new one, or quitting. Selecting a board hands its file path back to the
//! caller, which opens the board UI.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};

use crate::project::{create_project, discover_projects, get_legacy_project, Project};
use crate::tui::colors::ACCENT_PURPLE;
use crate::tui::input::InputField;
use crate::tui::utils::centered_rect;

#[derive(Clone, Copy, PartialEq)]
enum MenuMode {
    Browse,
    Create,
}

/// Menu state: the discovered boards and the selection/creation cursor.
pub struct MenuApp {
    boards_dir: PathBuf,
    projects: Vec<Project>,
    list_state: ListState,
    mode: MenuMode,
    name_input: InputField,
    selected: Option<Project>,
    status_message: String,
}

impl MenuApp {
    pub fn new(boards_dir: PathBuf) -> Self {
        let mut app = MenuApp {
            boards_dir,
            projects: Vec::new(),
            list_state: ListState::default(),
            mode: MenuMode::Browse,
            name_input: InputField::new(),
            selected: None,
            status_message: String::new(),
        };
        app.refresh_projects();
        app
    }

    /// The board the user picked, if any.
    pub fn get_selected_project(&self) -> Option<Project> {
        self.selected.clone()
    }

    fn refresh_projects(&mut self) {
        self.projects = discover_projects(&self.boards_dir).unwrap_or_default();
        if let Some(legacy) = get_legacy_project(&self.boards_dir) {
            self.projects.push(legacy);
        }
        if self.projects.is_empty() {
            self.list_state.select(None);
        } else if self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        } else if let Some(selected) = self.list_state.selected() {
            if selected >= self.projects.len() {
                self.list_state.select(Some(self.projects.len() - 1));
            }
        }
    }

    fn select_offset(&mut self, down: bool) {
        if self.projects.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(self.projects.len() - 1)
        } else {
            current.saturating_sub(1)
        };
        self.list_state.select(Some(next));
    }

    /// Handle a key in browse mode. Returns true to exit the menu.
    fn handle_browse_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Up | KeyCode::Char('k') => self.select_offset(false),
            KeyCode::Down | KeyCode::Char('j') => self.select_offset(true),
            KeyCode::Enter => {
                if let Some(selected) = self.list_state.selected() {
                    if let Some(project) = self.projects.get(selected) {
                        self.selected = Some(project.clone());
                        return true;
                    }
                }
            }
            KeyCode::Char('n') => {
                self.mode = MenuMode::Create;
                self.name_input.clear();
                self.status_message.clear();
            }
            KeyCode::Char('r') => {
                self.refresh_projects();
                self.status_message = "Boards refreshed".to_string();
            }
            _ => {}
        }
        false
    }

    fn handle_create_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.mode = MenuMode::Browse;
                self.name_input.clear();
            }
            KeyCode::Enter => {
                let name = self.name_input.value.trim().to_string();
                match create_project(&name, &self.boards_dir) {
                    Ok(project) => {
                        self.status_message = format!("Created board '{}'", project.display_name);
                        self.mode = MenuMode::Browse;
                        self.name_input.clear();
                        self.refresh_projects();
                        if let Some(idx) = self
                            .projects
                            .iter()
                            .position(|p| p.file_path == project.file_path)
                        {
                            self.list_state.select(Some(idx));
                        }
                    }
                    Err(e) => {
                        self.status_message = format!("Error: {}", e);
                    }
                }
            }
            KeyCode::Backspace => self.name_input.backspace(),
            KeyCode::Left => self.name_input.move_left(),
            KeyCode::Right => self.name_input.move_right(),
            KeyCode::Char(c) => self.name_input.insert_char(c),
            _ => {}
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        let header = Paragraph::new(Line::from(vec![
            Span::styled("TASKBOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                "Select a board",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, chunks[0]);

        let items: Vec<ListItem> = if self.projects.is_empty() {
            vec![ListItem::new("No boards yet - press 'n' to create one")]
        } else {
            self.projects
                .iter()
                .map(|p| {
                    let file = p
                        .file_path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    ListItem::new(Line::from(vec![
                        Span::raw(p.display_name.clone()),
                        Span::styled(format!("  ({})", file), Style::default().fg(Color::DarkGray)),
                    ]))
                })
                .collect()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Boards - [Enter] open, [n]ew, [r]efresh, [q]uit"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(ACCENT_PURPLE)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let status = Paragraph::new(self.status_message.as_str())
            .style(Style::default().bg(ACCENT_PURPLE).fg(Color::Black));
        f.render_widget(status, chunks[2]);

        if self.mode == MenuMode::Create {
            let area = centered_rect(50, 20, f.area());
            f.render_widget(Clear, area);
            let input = Paragraph::new(self.name_input.value.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("New board name - [Enter] create, [Esc] cancel")
                    .border_style(Style::default().fg(ACCENT_PURPLE)),
            );
            f.render_widget(input, area);
        }
    }

    /// Main event loop for the menu.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    match self.mode {
                        MenuMode::Browse => {
                            if self.handle_browse_key(key.code, key.modifiers) {
                                return Ok(());
                            }
                        }
                        MenuMode::Create => self.handle_create_key(key.code),
                    }
                }
            }
        }
    }
}
