//! Registration / edit form screen
//!
//! One screen, two modes: register starts from an empty draft, edit is
//! hydrated from a fetched record. Validation runs on submit attempts
//! only and paints one message per invalid field.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::path::PathBuf;

use crate::form::{Draft, FormMode};
use crate::models::{Gender, Skill};
use crate::tui::ui::{centered_rect, InputField, Styles};

/// Country suggestions offered by the form; free-form input is also valid
pub const COUNTRIES: [&str; 20] = [
    "India",
    "USA",
    "UK",
    "Australia",
    "Canada",
    "Germany",
    "France",
    "Japan",
    "China",
    "Brazil",
    "South Africa",
    "Russia",
    "Mexico",
    "Italy",
    "Spain",
    "Netherlands",
    "Sweden",
    "New Zealand",
    "Singapore",
    "Argentina",
];

/// Focusable form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Name,
    Description,
    Gender,
    Skills,
    Country,
    DateOfBirth,
    ProfilePicture,
    SupportingDocument,
}

pub const FIELD_ORDER: [FieldId; 8] = [
    FieldId::Name,
    FieldId::Description,
    FieldId::Gender,
    FieldId::Skills,
    FieldId::Country,
    FieldId::DateOfBirth,
    FieldId::ProfilePicture,
    FieldId::SupportingDocument,
];

/// Form screen state
pub struct UserFormScreen {
    pub mode: FormMode,
    pub draft: Draft,
    pub current_field: usize,

    pub name_input: InputField,
    pub description_input: InputField,
    pub country_input: InputField,
    pub dob_input: InputField,
    pub picture_input: InputField,
    pub document_input: InputField,

    /// Which skill checkbox the cursor is on while the Skills row is focused
    pub skill_cursor: usize,
    pub show_country_dropdown: bool,
    pub country_state: ListState,

    pub is_submitting: bool,
}

impl UserFormScreen {
    /// Create-mode form: everything starts empty
    pub fn new_register() -> Self {
        Self::with_mode(FormMode::Register, Draft::new())
    }

    /// Edit-mode form over a draft hydrated from a fetched record
    pub fn new_edit(id: i64, draft: Draft) -> Self {
        Self::with_mode(FormMode::Edit(id), draft)
    }

    fn with_mode(mode: FormMode, draft: Draft) -> Self {
        let mut screen = Self {
            mode,
            name_input: InputField::new("Name").with_value(&draft.name),
            description_input: InputField::new("Professional Summary")
                .with_placeholder("Enter professional summary")
                .with_value(&draft.description),
            country_input: InputField::new("Country (Enter: suggestions)")
                .with_placeholder("Select or type a country")
                .with_value(&draft.country),
            dob_input: InputField::new("Date of Birth (YYYY-MM-DD)")
                .with_placeholder("1990-01-31")
                .with_value(&draft.date_of_birth),
            picture_input: InputField::new("Profile Picture (local path)")
                .with_placeholder("e.g. ./photo.png"),
            document_input: InputField::new("Supporting Document (local path)")
                .with_placeholder("e.g. ./resume.pdf"),
            draft,
            current_field: 0,
            skill_cursor: 0,
            show_country_dropdown: false,
            country_state: ListState::default(),
            is_submitting: false,
        };
        screen.update_field_focus();
        screen
    }

    pub fn focused_field(&self) -> FieldId {
        FIELD_ORDER[self.current_field]
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_ORDER.len();
        self.update_field_focus();
    }

    pub fn previous_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_ORDER.len() - 1
        } else {
            self.current_field - 1
        };
        self.update_field_focus();
    }

    fn update_field_focus(&mut self) {
        let focused = self.focused_field();
        self.name_input.set_focus(focused == FieldId::Name);
        self.description_input
            .set_focus(focused == FieldId::Description);
        self.country_input.set_focus(focused == FieldId::Country);
        self.dob_input.set_focus(focused == FieldId::DateOfBirth);
        self.picture_input
            .set_focus(focused == FieldId::ProfilePicture);
        self.document_input
            .set_focus(focused == FieldId::SupportingDocument);
    }

    fn focused_input_mut(&mut self) -> Option<&mut InputField> {
        match self.focused_field() {
            FieldId::Name => Some(&mut self.name_input),
            FieldId::Description => Some(&mut self.description_input),
            FieldId::Country => Some(&mut self.country_input),
            FieldId::DateOfBirth => Some(&mut self.dob_input),
            FieldId::ProfilePicture => Some(&mut self.picture_input),
            FieldId::SupportingDocument => Some(&mut self.document_input),
            FieldId::Gender | FieldId::Skills => None,
        }
    }

    pub fn handle_char(&mut self, c: char) {
        match self.focused_field() {
            FieldId::Gender => match c {
                'm' => self.draft.gender = Some(Gender::Male),
                'f' => self.draft.gender = Some(Gender::Female),
                ' ' => self.toggle_gender(),
                _ => {}
            },
            FieldId::Skills => {
                if c == ' ' {
                    self.draft.toggle_skill(Skill::ALL[self.skill_cursor]);
                }
            }
            _ => {
                if let Some(input) = self.focused_input_mut() {
                    input.insert_char(c);
                }
            }
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(input) = self.focused_input_mut() {
            input.delete_char();
        }
    }

    pub fn handle_left(&mut self) {
        match self.focused_field() {
            FieldId::Gender => self.toggle_gender(),
            FieldId::Skills => {
                self.skill_cursor = if self.skill_cursor == 0 {
                    Skill::ALL.len() - 1
                } else {
                    self.skill_cursor - 1
                };
            }
            _ => {
                if let Some(input) = self.focused_input_mut() {
                    input.move_cursor_left();
                }
            }
        }
    }

    pub fn handle_right(&mut self) {
        match self.focused_field() {
            FieldId::Gender => self.toggle_gender(),
            FieldId::Skills => {
                self.skill_cursor = (self.skill_cursor + 1) % Skill::ALL.len();
            }
            _ => {
                if let Some(input) = self.focused_input_mut() {
                    input.move_cursor_right();
                }
            }
        }
    }

    fn toggle_gender(&mut self) {
        self.draft.gender = match self.draft.gender {
            Some(Gender::Male) => Some(Gender::Female),
            Some(Gender::Female) => Some(Gender::Male),
            None => Some(Gender::Male),
        };
    }

    // Country suggestion dropdown

    pub fn open_country_dropdown(&mut self) {
        self.show_country_dropdown = true;
        self.country_state.select(Some(0));
    }

    pub fn close_country_dropdown(&mut self) {
        self.show_country_dropdown = false;
    }

    pub fn country_dropdown_up(&mut self) {
        let i = match self.country_state.selected() {
            Some(0) | None => COUNTRIES.len() - 1,
            Some(i) => i - 1,
        };
        self.country_state.select(Some(i));
    }

    pub fn country_dropdown_down(&mut self) {
        let i = match self.country_state.selected() {
            Some(i) => (i + 1) % COUNTRIES.len(),
            None => 0,
        };
        self.country_state.select(Some(i));
    }

    pub fn select_country(&mut self) {
        if let Some(i) = self.country_state.selected() {
            self.country_input.set_value(COUNTRIES[i].to_string());
        }
        self.show_country_dropdown = false;
    }

    /// Copy the editable inputs into the draft before validation or
    /// submission. A non-empty picture path replaces any prior local
    /// selection and takes precedence over a server-stored image.
    pub fn sync_draft(&mut self) {
        self.draft.name = self.name_input.value.clone();
        self.draft.description = self.description_input.value.clone();
        self.draft.country = self.country_input.value.clone();
        self.draft.date_of_birth = self.dob_input.value.clone();
        self.draft.image = if self.picture_input.is_empty() {
            None
        } else {
            Some(PathBuf::from(self.picture_input.value.clone()))
        };
        self.draft.file = if self.document_input.is_empty() {
            None
        } else {
            Some(PathBuf::from(self.document_input.value.clone()))
        };
    }

    /// Sync and validate. Callers must not submit when this is false.
    pub fn validate(&mut self) -> bool {
        self.sync_draft();
        self.draft.validate(self.mode)
    }

    /// Draw the form screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Name
                Constraint::Length(3), // Description
                Constraint::Length(3), // Gender | Skills
                Constraint::Length(3), // Country | Date of birth
                Constraint::Length(3), // Profile picture
                Constraint::Length(3), // Supporting document
                Constraint::Length(3), // Existing attachments (edit mode)
                Constraint::Min(0),    // Instructions
            ])
            .split(area);

        self.draw_title(f, chunks[0]);
        self.name_input
            .render(f, chunks[1], self.draft.error_for("name"));
        self.description_input
            .render(f, chunks[2], self.draft.error_for("description"));

        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[3]);
        self.draw_gender(f, row[0]);
        self.draw_skills(f, row[1]);

        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[4]);
        self.country_input
            .render(f, row[0], self.draft.error_for("country"));
        self.dob_input
            .render(f, row[1], self.draft.error_for("dateOfBirth"));

        self.picture_input
            .render(f, chunks[5], self.draft.error_for("image"));
        self.document_input.render(f, chunks[6], None);

        self.draw_existing_attachments(f, chunks[7]);
        self.draw_instructions(f, chunks[8]);

        if self.show_country_dropdown {
            self.draw_country_dropdown(f, area);
        }
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let label = match self.mode {
            FormMode::Register => "User Registration",
            FormMode::Edit(_) => "Edit User",
        };
        let title = if self.is_submitting {
            format!("{} - Submitting...", label)
        } else {
            label.to_string()
        };
        f.render_widget(
            Paragraph::new(title)
                .style(Styles::title())
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn draw_gender(&self, f: &mut Frame, area: Rect) {
        let render_option = |gender: Gender| {
            if self.draft.gender == Some(gender) {
                format!("(x) {}", gender.as_str())
            } else {
                format!("( ) {}", gender.as_str())
            }
        };
        let content = format!(
            "{}   {}",
            render_option(Gender::Male),
            render_option(Gender::Female)
        );

        let error = self.draft.error_for("gender");
        let border_style = if self.focused_field() == FieldId::Gender {
            Styles::active_border()
        } else if error.is_some() {
            Styles::error()
        } else {
            Styles::inactive_border()
        };
        let title = match error {
            Some(message) => format!("Gender - {}", message),
            None => "Gender".to_string(),
        };

        f.render_widget(
            Paragraph::new(content).block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(border_style),
            ),
            area,
        );
    }

    fn draw_skills(&self, f: &mut Frame, area: Rect) {
        let focused = self.focused_field() == FieldId::Skills;
        let spans: Vec<Span> = Skill::ALL
            .iter()
            .enumerate()
            .map(|(i, skill)| {
                let mark = if self.draft.has_skill(*skill) { "x" } else { " " };
                let style = if focused && i == self.skill_cursor {
                    Styles::selected()
                } else {
                    Style::default()
                };
                Span::styled(format!("[{}] {}  ", mark, skill.as_str()), style)
            })
            .collect();

        let border_style = if focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        f.render_widget(
            Paragraph::new(Line::from(spans)).block(
                Block::default()
                    .title("Skills")
                    .borders(Borders::ALL)
                    .border_style(border_style),
            ),
            area,
        );
    }

    fn draw_existing_attachments(&self, f: &mut Frame, area: Rect) {
        let picture = self
            .draft
            .profile_picture_url
            .as_deref()
            .unwrap_or("(none)");
        let document = self
            .draft
            .supporting_document_url
            .as_deref()
            .unwrap_or("(none)");

        let content = match self.mode {
            FormMode::Edit(_) => format!("Picture: {} | Document: {}", picture, document),
            FormMode::Register => String::new(),
        };

        f.render_widget(
            Paragraph::new(content).style(Styles::inactive()).block(
                Block::default()
                    .title("Stored attachments")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            ),
            area,
        );
    }

    fn draw_instructions(&self, f: &mut Frame, area: Rect) {
        let instructions = vec![
            Line::from("Tab/Shift+Tab: Navigate fields | Enter: Submit | Esc: Back to table"),
            Line::from("Gender/Skills: ←/→ move, Space toggle | Enter on Country: suggestions"),
        ];
        f.render_widget(
            Paragraph::new(instructions).style(Styles::info()).block(
                Block::default()
                    .title("Instructions")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            ),
            area,
        );
    }

    fn draw_country_dropdown(&mut self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(40, 60, area);

        let items: Vec<ListItem> = COUNTRIES
            .iter()
            .enumerate()
            .map(|(i, country)| {
                let style = if Some(i) == self.country_state.selected() {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(*country, style)))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Select Country")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected());

        f.render_widget(Clear, popup_area);
        f.render_stateful_widget(list, popup_area, &mut self.country_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycling_wraps_both_ways() {
        let mut screen = UserFormScreen::new_register();
        assert_eq!(screen.focused_field(), FieldId::Name);

        screen.previous_field();
        assert_eq!(screen.focused_field(), FieldId::SupportingDocument);

        screen.next_field();
        assert_eq!(screen.focused_field(), FieldId::Name);
    }

    #[test]
    fn test_sync_draft_copies_inputs() {
        let mut screen = UserFormScreen::new_register();
        screen.name_input.set_value("Asha".to_string());
        screen.country_input.set_value("India".to_string());
        screen.dob_input.set_value("1991-04-20".to_string());
        screen.picture_input.set_value("./asha.png".to_string());

        screen.sync_draft();

        assert_eq!(screen.draft.name, "Asha");
        assert_eq!(screen.draft.country, "India");
        assert_eq!(screen.draft.image.as_deref(), Some(std::path::Path::new("./asha.png")));
        assert_eq!(screen.draft.file, None);
    }

    #[test]
    fn test_invalid_form_fails_validation_before_any_submission() {
        let mut screen = UserFormScreen::new_register();
        assert!(!screen.validate());
        // One message per missing required field plus the create-mode image rule
        assert_eq!(screen.draft.errors.len(), 6);
    }

    #[test]
    fn test_gender_and_skill_toggles() {
        let mut screen = UserFormScreen::new_register();

        // Move focus to Gender
        while screen.focused_field() != FieldId::Gender {
            screen.next_field();
        }
        screen.handle_char(' ');
        assert_eq!(screen.draft.gender, Some(Gender::Male));
        screen.handle_char('f');
        assert_eq!(screen.draft.gender, Some(Gender::Female));

        screen.next_field();
        assert_eq!(screen.focused_field(), FieldId::Skills);
        screen.handle_char(' ');
        assert!(screen.draft.has_skill(Skill::Java));
        screen.handle_right();
        screen.handle_char(' ');
        assert_eq!(screen.draft.skills_csv(), "Java,C");
    }

    #[test]
    fn test_country_dropdown_selection() {
        let mut screen = UserFormScreen::new_register();
        screen.open_country_dropdown();
        screen.country_dropdown_down();
        screen.select_country();
        assert_eq!(screen.country_input.value, "USA");
        assert!(!screen.show_country_dropdown);
    }

    #[test]
    fn test_edit_mode_keeps_hydrated_values() {
        let mut draft = Draft::new();
        draft.name = "Ben".to_string();
        draft.profile_picture_url =
            Some("http://localhost:8080/api/users/files/abc.png".to_string());

        let screen = UserFormScreen::new_edit(3, draft);
        assert_eq!(screen.mode, FormMode::Edit(3));
        assert_eq!(screen.name_input.value, "Ben");
        assert!(screen.picture_input.is_empty());
    }
}
