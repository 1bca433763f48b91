//! User table screen: paginated, sortable, searchable listing
//!
//! Owns the full query state (page, page size, search, sort) and the
//! two-step delete confirmation. Every state change that affects the
//! query triggers a fresh round trip; nothing is cached client-side.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, ListState, Paragraph},
    Frame,
};

use crate::models::{ListQuery, SortDirection, SortField, UserPage, UserRecord};
use crate::tui::ui::{centered_rect, render_user_table, InputField, Styles};

/// Rows-per-page options, cycled with +
pub const PAGE_SIZES: [usize; 3] = [5, 10, 25];

/// Table screen state
pub struct TableScreen {
    pub users: Vec<UserRecord>,
    pub total_items: u64,
    /// 0-based page index; the gateway translates to the 1-based wire form
    pub page: usize,
    pub page_size: usize,
    /// Search text currently being typed (not yet submitted)
    pub search_input: InputField,
    /// Search text of the last submitted query
    pub active_search: String,
    pub search_focused: bool,
    pub sort_by: SortField,
    pub sort_dir: SortDirection,
    pub row_state: ListState,
    /// Identifier awaiting delete confirmation, if any
    pub pending_delete: Option<i64>,
    pub is_loading: bool,
}

impl TableScreen {
    pub fn new(page_size: usize) -> Self {
        Self {
            users: Vec::new(),
            total_items: 0,
            page: 0,
            page_size,
            search_input: InputField::new("Search").with_placeholder("Search field"),
            active_search: String::new(),
            search_focused: false,
            sort_by: SortField::Id,
            sort_dir: SortDirection::Ascending,
            row_state: ListState::default(),
            pending_delete: None,
            is_loading: false,
        }
    }

    /// The query describing what this screen currently shows
    pub fn current_query(&self) -> ListQuery {
        ListQuery {
            search: self.active_search.clone(),
            page: self.page,
            size: self.page_size,
            sort_by: self.sort_by,
            sort_dir: self.sort_dir,
        }
    }

    /// Install a freshly fetched page
    pub fn set_page_data(&mut self, page: UserPage) {
        self.users = page.users;
        self.total_items = page.total_items;
        self.row_state
            .select(if self.users.is_empty() { None } else { Some(0) });
    }

    pub fn total_pages(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            ((self.total_items as usize) + self.page_size - 1) / self.page_size
        }
    }

    /// Submit the typed search text: a new search invalidates the prior
    /// pagination position, so the page resets before the next request.
    pub fn submit_search(&mut self) {
        self.active_search = self.search_input.value.clone();
        self.page = 0;
        self.search_focused = false;
    }

    /// Toggle sorting on a column: re-selecting the active column flips
    /// the direction, a new column starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_by == field {
            self.sort_dir = self.sort_dir.flipped();
        } else {
            self.sort_by = field;
            self.sort_dir = SortDirection::Ascending;
        }
    }

    /// Cycle through the rows-per-page options, resetting to page 0
    pub fn cycle_page_size(&mut self) {
        let next = PAGE_SIZES
            .iter()
            .position(|s| *s == self.page_size)
            .map(|i| PAGE_SIZES[(i + 1) % PAGE_SIZES.len()])
            .unwrap_or(PAGE_SIZES[0]);
        self.page_size = next;
        self.page = 0;
    }

    pub fn next_page(&mut self) -> bool {
        if self.page + 1 < self.total_pages() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn first_page(&mut self) -> bool {
        if self.page != 0 {
            self.page = 0;
            true
        } else {
            false
        }
    }

    pub fn last_page(&mut self) -> bool {
        let total = self.total_pages();
        if total > 0 && self.page != total - 1 {
            self.page = total - 1;
            true
        } else {
            false
        }
    }

    pub fn select_previous_row(&mut self) {
        if self.users.is_empty() {
            return;
        }
        let i = match self.row_state.selected() {
            Some(0) | None => self.users.len() - 1,
            Some(i) => i - 1,
        };
        self.row_state.select(Some(i));
    }

    pub fn select_next_row(&mut self) {
        if self.users.is_empty() {
            return;
        }
        let i = match self.row_state.selected() {
            Some(i) => (i + 1) % self.users.len(),
            None => 0,
        };
        self.row_state.select(Some(i));
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.row_state.selected().and_then(|i| self.users.get(i))
    }

    /// First step of deletion: remember the target and ask for
    /// confirmation. No network call happens here.
    pub fn request_delete(&mut self) -> bool {
        match self.selected_user() {
            Some(user) => {
                self.pending_delete = Some(user.id);
                true
            }
            None => false,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second step: hand over the confirmed identifier, clearing the
    /// pending state. Only the caller of this method may hit the gateway.
    pub fn take_confirmed_delete(&mut self) -> Option<i64> {
        self.pending_delete.take()
    }

    /// Draw the table screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(0),    // Table
                Constraint::Length(3), // Pagination footer
            ])
            .split(area);

        self.search_input.set_focus(self.search_focused);
        self.search_input.render(f, chunks[0], None);

        let title = if self.is_loading {
            "Users - Loading...".to_string()
        } else {
            format!("Users ({} total)", self.total_items)
        };
        render_user_table(
            f,
            chunks[1],
            &self.users,
            self.row_state.selected(),
            self.sort_by,
            self.sort_dir,
            &title,
        );

        self.draw_footer(f, chunks[2]);

        if self.pending_delete.is_some() {
            self.draw_delete_popup(f, area);
        }
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect) {
        let total = self.total_pages();
        let footer = format!(
            "Page {}/{} | {} rows/page | ←/→: page | 1-6: sort | /: search | e: edit | d: delete | +: rows | r: refresh",
            if total == 0 { 0 } else { self.page + 1 },
            total,
            self.page_size,
        );
        f.render_widget(
            Paragraph::new(footer)
                .style(Styles::info())
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn draw_delete_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(50, 20, area);
        f.render_widget(Clear, popup_area);

        let lines = vec![
            Line::from("Are you sure you want to delete this user?"),
            Line::from(""),
            Line::from("y/Enter: Delete   n/Esc: Cancel"),
        ];
        let popup = Paragraph::new(lines).style(Styles::error()).block(
            Block::default()
                .title("Confirm Delete")
                .borders(Borders::ALL)
                .border_style(Styles::error()),
        );
        f.render_widget(popup, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn user(id: i64, name: &str) -> UserRecord {
        UserRecord {
            id,
            name: name.to_string(),
            description: "dev".to_string(),
            gender: Some(Gender::Male),
            country: "UK".to_string(),
            date_of_birth: "1990-01-01".to_string(),
            skills: Vec::new(),
            profile_picture_path: None,
            supporting_document_path: None,
        }
    }

    fn screen_with(total_items: u64, page_size: usize) -> TableScreen {
        let mut screen = TableScreen::new(page_size);
        screen.set_page_data(UserPage {
            users: vec![user(1, "Asha"), user(2, "Ben")],
            total_items,
        });
        screen
    }

    #[test]
    fn test_page_count_and_navigation_clamp() {
        let mut screen = screen_with(37, 10);
        assert_eq!(screen.total_pages(), 4);

        assert!(!screen.previous_page());
        assert_eq!(screen.page, 0);

        assert!(screen.next_page());
        assert!(screen.next_page());
        assert!(screen.next_page());
        assert_eq!(screen.page, 3);
        assert!(!screen.next_page());
        assert_eq!(screen.page, 3);

        assert!(screen.first_page());
        assert_eq!(screen.page, 0);
        assert!(screen.last_page());
        assert_eq!(screen.page, 3);
    }

    #[test]
    fn test_empty_listing_has_no_pages() {
        let mut screen = TableScreen::new(10);
        screen.set_page_data(UserPage {
            users: Vec::new(),
            total_items: 0,
        });
        assert_eq!(screen.total_pages(), 0);
        assert_eq!(screen.row_state.selected(), None);
    }

    #[test]
    fn test_sort_toggle_flips_and_resets() {
        let mut screen = screen_with(37, 10);
        assert_eq!(screen.sort_by, SortField::Id);

        screen.toggle_sort(SortField::Name);
        assert_eq!(screen.sort_by, SortField::Name);
        assert_eq!(screen.sort_dir, SortDirection::Ascending);

        screen.toggle_sort(SortField::Name);
        assert_eq!(screen.sort_dir, SortDirection::Descending);

        // Toggling twice returns to ascending
        screen.toggle_sort(SortField::Name);
        assert_eq!(screen.sort_dir, SortDirection::Ascending);

        // A new column starts ascending again
        screen.toggle_sort(SortField::Country);
        screen.toggle_sort(SortField::Country);
        screen.toggle_sort(SortField::Name);
        assert_eq!(screen.sort_by, SortField::Name);
        assert_eq!(screen.sort_dir, SortDirection::Ascending);
    }

    #[test]
    fn test_new_search_resets_page_before_querying() {
        let mut screen = screen_with(37, 10);
        screen.next_page();
        screen.next_page();
        assert_eq!(screen.page, 2);

        screen.search_input.set_value("smith".to_string());
        screen.submit_search();

        assert_eq!(screen.page, 0);
        let query = screen.current_query();
        assert_eq!(query.search, "smith");
        assert_eq!(query.page, 0);
    }

    #[test]
    fn test_typing_search_does_not_change_query_until_submitted() {
        let mut screen = screen_with(37, 10);
        screen.search_input.set_value("smith".to_string());
        assert_eq!(screen.current_query().search, "");
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut screen = screen_with(37, 10);
        screen.next_page();
        screen.cycle_page_size();
        assert_eq!(screen.page_size, 25);
        assert_eq!(screen.page, 0);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut screen = screen_with(37, 10);

        // Nothing pending: no identifier may be handed to the gateway
        assert_eq!(screen.take_confirmed_delete(), None);

        assert!(screen.request_delete());
        assert_eq!(screen.pending_delete, Some(1));

        // Cancelling leaves state unchanged
        screen.cancel_delete();
        assert_eq!(screen.take_confirmed_delete(), None);

        screen.request_delete();
        assert_eq!(screen.take_confirmed_delete(), Some(1));
        assert_eq!(screen.pending_delete, None);
    }

    #[test]
    fn test_row_selection_wraps() {
        let mut screen = screen_with(2, 10);
        assert_eq!(screen.row_state.selected(), Some(0));
        screen.select_next_row();
        assert_eq!(screen.selected_user().map(|u| u.id), Some(2));
        screen.select_next_row();
        assert_eq!(screen.selected_user().map(|u| u.id), Some(1));
        screen.select_previous_row();
        assert_eq!(screen.selected_user().map(|u| u.id), Some(2));
    }
}
