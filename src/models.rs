use serde::{Deserialize, Serialize};

/// A user record as the backend stores it. The client only ever holds
/// transient copies of these; the server owns the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub gender: Option<Gender>,
    pub country: String,
    /// Date string in YYYY-MM-DD form, passed through as the backend sends it
    pub date_of_birth: String,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Server-side storage path for the profile picture, if any
    #[serde(default)]
    pub profile_picture_path: Option<String>,
    /// Server-side storage path for the supporting document, if any
    #[serde(default)]
    pub supporting_document_path: Option<String>,
}

/// One page of the user listing
#[derive(Debug, Clone, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(rename = "totalItems", default)]
    pub total_items: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// The fixed skill vocabulary the registration form offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skill {
    Java,
    C,
    Cpp,
    Python,
}

impl Skill {
    pub const ALL: [Skill; 4] = [Skill::Java, Skill::C, Skill::Cpp, Skill::Python];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Java => "Java",
            Skill::C => "C",
            Skill::Cpp => "C++",
            Skill::Python => "Python",
        }
    }

    /// Parse a wire skill name; anything outside the vocabulary is None
    pub fn parse(s: &str) -> Option<Skill> {
        match s.trim() {
            "Java" => Some(Skill::Java),
            "C" => Some(Skill::C),
            "C++" => Some(Skill::Cpp),
            "Python" => Some(Skill::Python),
            _ => None,
        }
    }
}

/// Columns the backend accepts as `sortBy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Description,
    Gender,
    Country,
    DateOfBirth,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Description => "description",
            SortField::Gender => "gender",
            SortField::Country => "country",
            SortField::DateOfBirth => "dateOfBirth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn flipped(&self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow marker shown next to the active sort column
    pub fn marker(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Parameters for one listing request. `page` is 0-based here; the wire
/// protocol is 1-based and the gateway translates when building the query.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub search: String,
    pub page: usize,
    pub size: usize,
    pub sort_by: SortField,
    pub sort_dir: SortDirection,
}

impl ListQuery {
    /// Query parameters in wire form (1-based page)
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("search", self.search.clone()),
            ("page", (self.page + 1).to_string()),
            ("size", self.size.to_string()),
            ("sortBy", self.sort_by.as_str().to_string()),
            ("sortDir", self.sort_dir.as_str().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_page_is_one_based() {
        let query = ListQuery {
            search: "smith".to_string(),
            page: 0,
            size: 10,
            sort_by: SortField::DateOfBirth,
            sort_dir: SortDirection::Descending,
        };
        let params = query.to_query_params();
        assert!(params.contains(&("page", "1".to_string())));
        assert!(params.contains(&("search", "smith".to_string())));
        assert!(params.contains(&("sortBy", "dateOfBirth".to_string())));
        assert!(params.contains(&("sortDir", "desc".to_string())));
    }

    #[test]
    fn test_skill_vocabulary_round_trip() {
        for skill in Skill::ALL {
            assert_eq!(Skill::parse(skill.as_str()), Some(skill));
        }
        assert_eq!(Skill::parse("Haskell"), None);
    }

    #[test]
    fn test_user_record_deserializes_wire_shape() {
        let json = r#"{
            "id": 7,
            "name": "Asha",
            "description": "Backend engineer",
            "gender": "female",
            "country": "India",
            "dateOfBirth": "1991-04-20",
            "skills": ["Java", "Python"],
            "profilePicturePath": "C:\\files\\asha.png",
            "supportingDocumentPath": null
        }"#;
        let record: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.gender, Some(Gender::Female));
        assert_eq!(record.date_of_birth, "1991-04-20");
        assert_eq!(record.skills, vec!["Java", "Python"]);
        assert_eq!(record.profile_picture_path.as_deref(), Some("C:\\files\\asha.png"));
    }

    #[test]
    fn test_user_page_defaults_when_fields_missing() {
        let page: UserPage = serde_json::from_str("{}").unwrap();
        assert!(page.users.is_empty());
        assert_eq!(page.total_items, 0);
    }
}
