//! Common UI styles and widgets for the userdesk TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::{SortDirection, SortField, UserRecord};

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default()
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn inactive() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_border() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn inactive_border() -> Style {
        Style::default().fg(Color::Gray)
    }
}

/// Single-line text input with cursor editing
#[derive(Debug, Clone)]
pub struct InputField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub is_focused: bool,
    pub cursor_position: usize,
}

impl InputField {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            is_focused: false,
            cursor_position: 0,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor_position = value.len();
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn set_value(&mut self, value: String) {
        self.cursor_position = value.len();
        self.value = value;
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev = self.value[..self.cursor_position]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(1);
            self.cursor_position -= prev;
            self.value.remove(self.cursor_position);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(c) = self.value[..self.cursor_position].chars().next_back() {
            self.cursor_position -= c.len_utf8();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.value[self.cursor_position..].chars().next() {
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Render the input field, with an optional inline error in the title
    pub fn render(&self, f: &mut Frame, area: Rect, error: Option<&str>) {
        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            &self.placeholder
        } else {
            &self.value
        };

        let border_style = if self.is_focused {
            Styles::active_border()
        } else if error.is_some() {
            Styles::error()
        } else {
            Styles::inactive_border()
        };

        let title = match error {
            Some(message) => format!("{} - {}", self.label, message),
            None => self.label.clone(),
        };

        let text_style = if self.value.is_empty() && !self.placeholder.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let paragraph = Paragraph::new(display_text.to_string()).style(text_style).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );

        f.render_widget(paragraph, area);

        if self.is_focused {
            let cursor_x = area.x + 1 + self.value[..self.cursor_position].chars().count() as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Column header label with a direction marker on the active sort field
fn column_header(label: &str, field: SortField, sort_by: SortField, sort_dir: SortDirection) -> String {
    if field == sort_by {
        format!("{} {}", label, sort_dir.marker())
    } else {
        label.to_string()
    }
}

/// Render the user listing as a table-like list with sortable headers
pub fn render_user_table(
    f: &mut Frame,
    area: Rect,
    users: &[UserRecord],
    selected_index: Option<usize>,
    sort_by: SortField,
    sort_dir: SortDirection,
    title: &str,
) {
    let header = Line::from(Span::styled(
        format!(
            "{:<20} | {:<28} | {:<8} | {:<14} | {:<12}",
            column_header("Name", SortField::Name, sort_by, sort_dir),
            column_header("Description", SortField::Description, sort_by, sort_dir),
            column_header("Gender", SortField::Gender, sort_by, sort_dir),
            column_header("Country", SortField::Country, sort_by, sort_dir),
            column_header("Born", SortField::DateOfBirth, sort_by, sort_dir),
        ),
        Styles::title(),
    ));

    let mut items = vec![ListItem::new(header)];

    if users.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "No users found.",
            Styles::inactive(),
        ))));
    }

    items.extend(users.iter().enumerate().map(|(i, user)| {
        let style = if Some(i) == selected_index {
            Styles::selected()
        } else {
            Style::default()
        };

        let content = format!(
            "{:<20} | {:<28} | {:<8} | {:<14} | {:<12}",
            truncate(&user.name, 20),
            truncate(&user.description, 28),
            user.gender.map(|g| g.as_str()).unwrap_or("-"),
            truncate(&user.country, 14),
            truncate(&user.date_of_birth, 12),
        );

        ListItem::new(Line::from(Span::styled(content, style)))
    }));

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Styles::active_border()),
    );

    f.render_widget(list, area);
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_field_editing() {
        let mut field = InputField::new("Name");
        field.insert_char('a');
        field.insert_char('b');
        field.move_cursor_left();
        field.insert_char('x');
        assert_eq!(field.value, "axb");

        field.delete_char();
        assert_eq!(field.value, "ab");
    }

    #[test]
    fn test_column_header_marks_active_sort_only() {
        assert_eq!(
            column_header("Name", SortField::Name, SortField::Name, SortDirection::Ascending),
            "Name ↑"
        );
        assert_eq!(
            column_header("Name", SortField::Name, SortField::Country, SortDirection::Ascending),
            "Name"
        );
    }

    #[test]
    fn test_truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 20), "short");
        assert_eq!(truncate("a very long description indeed", 10), "a very lo…");
    }
}
