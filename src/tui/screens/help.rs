//! Help screen with the full key-binding reference

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::ui::Styles;

pub struct HelpSection {
    pub title: &'static str,
    pub content: &'static str,
}

/// Help screen state
pub struct HelpScreen {
    pub sections: Vec<HelpSection>,
    pub current_section: usize,
    pub section_state: ListState,
}

impl HelpScreen {
    pub fn new() -> Self {
        let sections = vec![
            HelpSection {
                title: "Global",
                content: "Esc - Go back\n\
                    Ctrl+Q - Quit\n\
                    F1 / ? - Toggle help popup\n\
                    F2 - Registration form\n\
                    F3 - User table",
            },
            HelpSection {
                title: "User Table",
                content: "↑/↓ - Select row\n\
                    ←/→ - Previous/next page\n\
                    Home/End - First/last page\n\
                    / - Focus search (Enter submits, resets to page 1)\n\
                    1-6 - Sort by id/name/description/gender/country/date of birth\n\
                    (same column again flips direction)\n\
                    + - Cycle rows per page (5/10/25)\n\
                    e - Edit selected user\n\
                    d - Delete selected user (asks for confirmation)\n\
                    r - Refresh",
            },
            HelpSection {
                title: "Registration / Edit Form",
                content: "Tab/Shift+Tab - Next/previous field\n\
                    Enter - Submit form\n\
                    Enter on Country - Open suggestion list\n\
                    Gender: Space or ←/→ toggles, m/f select directly\n\
                    Skills: ←/→ move between checkboxes, Space toggles\n\
                    Profile picture / document: type a local file path\n\
                    Esc - Back to the table without saving",
            },
        ];

        let mut section_state = ListState::default();
        section_state.select(Some(0));

        Self {
            sections,
            current_section: 0,
            section_state,
        }
    }

    pub fn previous_section(&mut self) {
        if self.current_section > 0 {
            self.current_section -= 1;
            self.section_state.select(Some(self.current_section));
        }
    }

    pub fn next_section(&mut self) {
        if self.current_section + 1 < self.sections.len() {
            self.current_section += 1;
            self.section_state.select(Some(self.current_section));
        }
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(area);

        let items: Vec<ListItem> = self
            .sections
            .iter()
            .map(|s| ListItem::new(Line::from(s.title)))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Help Sections")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected());
        f.render_stateful_widget(list, chunks[0], &mut self.section_state);

        let content = self
            .sections
            .get(self.current_section)
            .map(|s| s.content)
            .unwrap_or("");
        let paragraph = Paragraph::new(content).block(
            Block::default()
                .title("Key Bindings")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(paragraph, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_navigation_clamps() {
        let mut help = HelpScreen::new();
        help.previous_section();
        assert_eq!(help.current_section, 0);

        for _ in 0..10 {
            help.next_section();
        }
        assert_eq!(help.current_section, help.sections.len() - 1);
    }
}
