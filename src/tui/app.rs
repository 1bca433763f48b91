//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::{error, info};

use super::screens::form::FieldId;
use super::screens::{HelpScreen, TableScreen, UserFormScreen};
use super::ui::centered_rect;
use crate::config::Config;
use crate::form::{Draft, FormMode};
use crate::gateway::UserGateway;
use crate::models::SortField;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Register,
    Table,
    Edit,
    Help,
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: Screen,
    /// Previous screen for navigation
    pub previous_screen: Option<Screen>,
    pub config: Config,
    pub gateway: UserGateway,

    // Screen states. The form screen backs both Register and Edit; it is
    // rebuilt on navigation, so drafts never outlive their view.
    pub form: UserFormScreen,
    pub table: TableScreen,
    pub help: HelpScreen,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: Config) -> Result<Self> {
        let gateway = UserGateway::new(&config)?;
        let page_size = config.page_size;

        Ok(Self {
            current_screen: Screen::Register,
            previous_screen: None,
            config,
            gateway,

            form: UserFormScreen::new_register(),
            table: TableScreen::new(page_size),
            help: HelpScreen::new(),

            should_quit: false,
            show_help_popup: false,
            status_message: None,
            error_message: None,
        })
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if let Ok(event) = crossterm::event::read() {
                if let crossterm::event::Event::Key(key) = event {
                    self.handle_key_event(key).await?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Global shortcuts
        match key.code {
            KeyCode::F(1) => {
                self.show_help_popup = !self.show_help_popup;
                return Ok(());
            }
            KeyCode::F(2) => {
                self.open_registration();
                return Ok(());
            }
            KeyCode::F(3) => {
                self.open_table().await;
                return Ok(());
            }
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Esc if self.show_help_popup => {
                self.show_help_popup = false;
                return Ok(());
            }
            _ => {}
        }

        if !self.show_help_popup {
            match self.current_screen {
                Screen::Register | Screen::Edit => self.handle_form_event(key).await?,
                Screen::Table => self.handle_table_event(key).await?,
                Screen::Help => self.handle_help_event(key),
            }
        }

        Ok(())
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        match self.current_screen {
            Screen::Register | Screen::Edit => self.form.draw(f, chunks[0]),
            Screen::Table => self.table.draw(f, chunks[0]),
            Screen::Help => self.help.draw(f, chunks[0]),
        }

        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Draw status bar with current screen info and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if let Some(ref msg) = self.status_message {
            format!("Status: {}", msg)
        } else if let Some(ref err) = self.error_message {
            format!("Error: {}", err)
        } else {
            format!(
                "userdesk - {} | F2: Register | F3: Table | F1: Help | Ctrl+Q: Quit",
                match self.current_screen {
                    Screen::Register => "User Registration",
                    Screen::Table => "User Table",
                    Screen::Edit => "Edit User",
                    Screen::Help => "Help",
                }
            )
        };

        let style = if self.error_message.is_some() {
            Style::default().fg(Color::Red)
        } else if self.status_message.is_some() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 60, area);

        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .block(
                Block::default()
                    .title("Help - Context Shortcuts")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    fn get_context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            F2 - Registration form\n\
            F3 - User table\n\
            F1 - Toggle this help\n\
            Ctrl+Q - Quit\n\n";

        let screen_help = match self.current_screen {
            Screen::Register | Screen::Edit => {
                "Form:\n\
                Tab/Shift+Tab - Navigate fields\n\
                Enter - Submit (on Country: suggestions)\n\
                Space / ←/→ - Toggle gender and skills\n\
                Esc - Back to table without saving"
            }
            Screen::Table => {
                "User Table:\n\
                ↑/↓ - Select row | ←/→ - Change page\n\
                / - Search (Enter submits)\n\
                1-6 - Sort by column, again to flip\n\
                + - Rows per page | e - Edit | d - Delete | r - Refresh"
            }
            Screen::Help => {
                "Help Screen:\n\
                ↑/↓ - Switch sections\n\
                Esc - Go back"
            }
        };

        format!("{}{}", global_help, screen_help)
    }

    /// Navigate to a specific screen
    pub fn navigate_to_screen(&mut self, screen: Screen) {
        self.previous_screen = Some(self.current_screen);
        self.current_screen = screen;
        self.clear_messages();
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.status_message = None;
    }

    /// Clear status and error messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    /// Open a fresh registration form
    pub fn open_registration(&mut self) {
        self.form = UserFormScreen::new_register();
        self.navigate_to_screen(Screen::Register);
    }

    /// Open the table view and re-query the backend; nothing is cached
    /// across visits.
    pub async fn open_table(&mut self) {
        self.navigate_to_screen(Screen::Table);
        self.refresh_table().await;
    }

    /// Re-issue the table's current query
    async fn refresh_table(&mut self) {
        self.table.is_loading = true;
        match self.gateway.list(&self.table.current_query()).await {
            Ok(page) => {
                self.table.set_page_data(page);
                self.clear_messages();
            }
            Err(e) => {
                error!("Listing users failed: {}", e);
                self.set_error(format!("Failed to fetch users: {}", e));
            }
        }
        self.table.is_loading = false;
    }

    /// Fetch a record and open the edit form over it. Pure navigation on
    /// the table side; the only network call is the hydration fetch.
    pub async fn open_editor(&mut self, id: i64) {
        match self.gateway.get(id).await {
            Ok(record) => {
                let picture_url = record
                    .profile_picture_path
                    .as_deref()
                    .and_then(|p| self.gateway.file_url(p));
                let document_url = record
                    .supporting_document_path
                    .as_deref()
                    .and_then(|p| self.gateway.file_url(p));

                let draft = Draft::from_record(&record, picture_url, document_url);
                self.form = UserFormScreen::new_edit(id, draft);
                self.navigate_to_screen(Screen::Edit);
            }
            Err(e) => {
                error!("Fetching user {} failed: {}", id, e);
                self.set_error(format!("Failed to load user {}: {}", id, e));
            }
        }
    }

    // Event handlers for each screen

    async fn handle_form_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.form.show_country_dropdown {
            match key.code {
                KeyCode::Up => self.form.country_dropdown_up(),
                KeyCode::Down => self.form.country_dropdown_down(),
                KeyCode::Enter => self.form.select_country(),
                KeyCode::Esc => self.form.close_country_dropdown(),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
            KeyCode::Left => self.form.handle_left(),
            KeyCode::Right => self.form.handle_right(),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Enter => {
                if self.form.focused_field() == FieldId::Country {
                    self.form.open_country_dropdown();
                } else {
                    self.submit_form().await;
                }
            }
            KeyCode::Esc => {
                self.open_table().await;
            }
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
        Ok(())
    }

    /// Validate and submit the form. Invalid drafts never reach the
    /// gateway; the per-field messages are drawn on the next frame.
    async fn submit_form(&mut self) {
        if !self.form.validate() {
            self.set_error("Please fix the highlighted fields".to_string());
            return;
        }

        self.form.is_submitting = true;
        let mode = self.form.mode;
        let draft = self.form.draft.clone();

        match mode {
            FormMode::Register => match self.gateway.register(&draft).await {
                Ok(message) => {
                    info!("Registered user '{}'", draft.name);
                    self.open_table().await;
                    self.set_status(message);
                }
                Err(e) => {
                    error!("Registration failed: {}", e);
                    self.set_error(e.to_string());
                }
            },
            FormMode::Edit(id) => match self.gateway.update(id, &draft).await {
                Ok(()) => {
                    info!("Updated user {}", id);
                    self.open_table().await;
                    self.set_status("User updated successfully".to_string());
                }
                Err(e) => {
                    error!("Update of user {} failed: {}", id, e);
                    self.set_error(e.to_string());
                }
            },
        }

        self.form.is_submitting = false;
    }

    async fn handle_table_event(&mut self, key: KeyEvent) -> Result<()> {
        // Delete confirmation popup takes over input until resolved
        if self.table.pending_delete.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    if let Some(id) = self.table.take_confirmed_delete() {
                        self.delete_user(id).await;
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.table.cancel_delete();
                }
                _ => {}
            }
            return Ok(());
        }

        if self.table.search_focused {
            match key.code {
                KeyCode::Enter => {
                    self.table.submit_search();
                    self.refresh_table().await;
                }
                KeyCode::Esc => {
                    self.table.search_focused = false;
                }
                KeyCode::Backspace => self.table.search_input.delete_char(),
                KeyCode::Left => self.table.search_input.move_cursor_left(),
                KeyCode::Right => self.table.search_input.move_cursor_right(),
                KeyCode::Char(c) => self.table.search_input.insert_char(c),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Up => self.table.select_previous_row(),
            KeyCode::Down => self.table.select_next_row(),
            KeyCode::Left => {
                if self.table.previous_page() {
                    self.refresh_table().await;
                }
            }
            KeyCode::Right => {
                if self.table.next_page() {
                    self.refresh_table().await;
                }
            }
            KeyCode::Home => {
                if self.table.first_page() {
                    self.refresh_table().await;
                }
            }
            KeyCode::End => {
                if self.table.last_page() {
                    self.refresh_table().await;
                }
            }
            KeyCode::Char('/') => {
                self.table.search_focused = true;
            }
            KeyCode::Char('+') => {
                self.table.cycle_page_size();
                self.refresh_table().await;
            }
            KeyCode::Char(c @ '1'..='6') => {
                let field = match c {
                    '1' => SortField::Id,
                    '2' => SortField::Name,
                    '3' => SortField::Description,
                    '4' => SortField::Gender,
                    '5' => SortField::Country,
                    _ => SortField::DateOfBirth,
                };
                self.table.toggle_sort(field);
                self.refresh_table().await;
            }
            KeyCode::Char('e') => {
                if let Some(user) = self.table.selected_user() {
                    let id = user.id;
                    self.open_editor(id).await;
                } else {
                    self.set_error("No user selected".to_string());
                }
            }
            KeyCode::Char('d') => {
                if !self.table.request_delete() {
                    self.set_error("No user selected".to_string());
                }
            }
            KeyCode::Char('r') => {
                self.refresh_table().await;
            }
            KeyCode::Char('?') => {
                self.navigate_to_screen(Screen::Help);
            }
            KeyCode::Esc => {
                self.open_registration();
            }
            _ => {}
        }
        Ok(())
    }

    /// Delete a confirmed record, then re-query the current page so the
    /// displayed total stays consistent with server truth. On failure the
    /// listing is left untouched.
    async fn delete_user(&mut self, id: i64) {
        match self.gateway.delete(id).await {
            Ok(()) => {
                info!("Deleted user {}", id);
                self.refresh_table().await;
                self.set_status(format!("Deleted user {}", id));
            }
            Err(e) => {
                error!("Delete of user {} failed: {}", id, e);
                self.set_error(format!("Failed to delete user: {}", e));
            }
        }
    }

    fn handle_help_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.help.previous_section(),
            KeyCode::Down => self.help.next_section(),
            KeyCode::Esc => {
                let target = self.previous_screen.unwrap_or(Screen::Register);
                self.navigate_to_screen(target);
            }
            _ => {}
        }
    }
}
