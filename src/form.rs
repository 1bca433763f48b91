//! Draft state and submit-time validation for the registration/edit form

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::models::{Gender, Skill, UserRecord};

/// Which flow a form submission belongs to. Edit mode carries the target
/// identifier; register mode creates a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Register,
    Edit(i64),
}

/// Client-local working copy of a user record. Created empty for
/// registration or hydrated from a fetched record for editing; discarded
/// after a successful submit. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub name: String,
    pub description: String,
    pub gender: Option<Gender>,
    pub country: String,
    pub date_of_birth: String,
    pub skills: Vec<Skill>,
    /// Local profile picture selected for upload
    pub image: Option<PathBuf>,
    /// Local supporting document selected for upload
    pub file: Option<PathBuf>,
    /// Display URL for an already-uploaded profile picture (edit mode)
    pub profile_picture_url: Option<String>,
    /// Display URL for an already-uploaded supporting document (edit mode)
    pub supporting_document_url: Option<String>,
    /// Field name -> message, recomputed on every validation pass
    pub errors: BTreeMap<&'static str, String>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate a draft from a fetched record. Display URLs for existing
    /// attachments are derived by the caller (they need the backend base
    /// URL). Skills outside the fixed vocabulary are dropped since they
    /// cannot be toggled or re-submitted.
    pub fn from_record(
        record: &UserRecord,
        profile_picture_url: Option<String>,
        supporting_document_url: Option<String>,
    ) -> Self {
        let mut draft = Draft {
            name: record.name.clone(),
            description: record.description.clone(),
            gender: record.gender,
            country: record.country.clone(),
            date_of_birth: record.date_of_birth.clone(),
            profile_picture_url,
            supporting_document_url,
            ..Draft::default()
        };
        for entry in &record.skills {
            for part in entry.split(',') {
                if let Some(skill) = Skill::parse(part) {
                    if !draft.skills.contains(&skill) {
                        draft.skills.push(skill);
                    }
                }
            }
        }
        draft
    }

    /// Toggle a skill checkbox. Set semantics: toggling twice is a no-op.
    pub fn toggle_skill(&mut self, skill: Skill) {
        if let Some(pos) = self.skills.iter().position(|s| *s == skill) {
            self.skills.remove(pos);
        } else {
            self.skills.push(skill);
        }
    }

    pub fn has_skill(&self, skill: Skill) -> bool {
        self.skills.contains(&skill)
    }

    /// Wire form of the skill set: comma-joined names
    pub fn skills_csv(&self) -> String {
        self.skills
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Select a new local profile picture. Replaces any prior selection
    /// and takes submission precedence over a server-stored image.
    pub fn set_image(&mut self, path: PathBuf) {
        self.image = Some(path);
    }

    pub fn set_file(&mut self, path: PathBuf) {
        self.file = Some(path);
    }

    /// Validate for submission, producing one message per invalid field.
    /// Runs only on submit attempts, not per keystroke. A profile image
    /// is required when registering; in edit mode an image may already
    /// exist server-side, so none is demanded.
    pub fn validate(&mut self, mode: FormMode) -> bool {
        self.errors.clear();

        if self.name.trim().is_empty() {
            self.errors.insert("name", "Name is required".to_string());
        }
        if self.description.trim().is_empty() {
            self.errors
                .insert("description", "Description is required".to_string());
        }
        if self.gender.is_none() {
            self.errors.insert("gender", "Gender is required".to_string());
        }
        if self.country.trim().is_empty() {
            self.errors
                .insert("country", "Country is required".to_string());
        }
        if self.date_of_birth.trim().is_empty() {
            self.errors
                .insert("dateOfBirth", "Date of birth is required".to_string());
        } else if chrono::NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d").is_err() {
            self.errors.insert(
                "dateOfBirth",
                "Invalid date format (YYYY-MM-DD)".to_string(),
            );
        }
        if mode == FormMode::Register && self.image.is_none() {
            self.errors
                .insert("image", "Profile picture is required".to_string());
        }

        self.errors.is_empty()
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> Draft {
        Draft {
            name: "Asha".to_string(),
            description: "Backend engineer".to_string(),
            gender: Some(Gender::Female),
            country: "India".to_string(),
            date_of_birth: "1991-04-20".to_string(),
            image: Some(PathBuf::from("/tmp/asha.png")),
            ..Draft::default()
        }
    }

    #[test]
    fn test_empty_draft_reports_one_error_per_field() {
        let mut draft = Draft::new();
        assert!(!draft.validate(FormMode::Register));
        let fields: Vec<&str> = draft.errors.keys().copied().collect();
        assert_eq!(
            fields,
            vec!["country", "dateOfBirth", "description", "gender", "image", "name"]
        );
    }

    #[test]
    fn test_filled_draft_is_valid_for_register() {
        let mut draft = filled_draft();
        assert!(draft.validate(FormMode::Register));
        assert!(draft.errors.is_empty());
    }

    #[test]
    fn test_register_requires_image_but_edit_does_not() {
        let mut draft = filled_draft();
        draft.image = None;

        assert!(!draft.validate(FormMode::Register));
        assert_eq!(draft.error_for("image"), Some("Profile picture is required"));

        assert!(draft.validate(FormMode::Edit(3)));
    }

    #[test]
    fn test_errors_recomputed_each_pass() {
        let mut draft = filled_draft();
        draft.name.clear();
        assert!(!draft.validate(FormMode::Register));
        assert!(draft.error_for("name").is_some());

        draft.name = "Asha".to_string();
        assert!(draft.validate(FormMode::Register));
        assert!(draft.error_for("name").is_none());
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let mut draft = filled_draft();
        draft.date_of_birth = "20-04-1991".to_string();
        assert!(!draft.validate(FormMode::Register));
        assert_eq!(
            draft.error_for("dateOfBirth"),
            Some("Invalid date format (YYYY-MM-DD)")
        );
    }

    #[test]
    fn test_skill_toggle_has_set_semantics() {
        let mut draft = Draft::new();
        draft.toggle_skill(Skill::Java);
        draft.toggle_skill(Skill::Python);
        draft.toggle_skill(Skill::Java);
        draft.toggle_skill(Skill::Java);
        assert_eq!(draft.skills_csv(), "Python,Java");

        draft.toggle_skill(Skill::Java);
        assert_eq!(draft.skills_csv(), "Python");
    }

    #[test]
    fn test_hydration_filters_unknown_skills() {
        let record = UserRecord {
            id: 3,
            name: "Ben".to_string(),
            description: "dev".to_string(),
            gender: Some(Gender::Male),
            country: "UK".to_string(),
            date_of_birth: "1988-01-02".to_string(),
            skills: vec!["Java,C++".to_string(), "Fortran".to_string()],
            profile_picture_path: None,
            supporting_document_path: None,
        };
        let draft = Draft::from_record(&record, None, None);
        assert_eq!(draft.skills, vec![Skill::Java, Skill::Cpp]);
    }

    #[test]
    fn test_new_image_replaces_prior_selection() {
        let mut draft = filled_draft();
        draft.set_image(PathBuf::from("/tmp/new.png"));
        assert_eq!(draft.image.as_deref(), Some(std::path::Path::new("/tmp/new.png")));
    }
}
