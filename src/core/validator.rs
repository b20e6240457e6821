// Validates the "add project" form before anything reaches the store.
//
// Every field is checked and all problems are reported together, so the
// front end can show each message next to its field.

use crate::db::{NewProject, Tag};
use serde::{Deserialize, Serialize};
use url::Url;

const MIN_TITLE_LENGTH: usize = 3;
const MIN_DESCRIPTION_LENGTH: usize = 10;

/// Fields of the add-project form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectField {
    Title,
    Description,
    Thumbnail,
    Category,
    TechPrimary,
}

impl std::fmt::Display for ProjectField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProjectField::Title => "title",
            ProjectField::Description => "description",
            ProjectField::Thumbnail => "thumbnail",
            ProjectField::Category => "category",
            ProjectField::TechPrimary => "tech",
        };
        write!(f, "{}", s)
    }
}

/// One failed field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: ProjectField,
    pub message: String,
}

/// All failed field checks for one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: ProjectField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Message for a given field, if that field failed
    pub fn message_for(&self, field: ProjectField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw values of the add-project form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub category: String,
    pub tech_primary: String,
    pub tech_secondary: Option<String>,
}

impl ProjectForm {
    /// Check every field and build the project draft
    ///
    /// Tags come out as category, primary tech, then the optional second
    /// tech. An empty second tech is treated as not given.
    pub fn validate(self) -> Result<NewProject, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if text_length(&self.title) < MIN_TITLE_LENGTH {
            errors.push(ProjectField::Title, "Title must be at least 3 characters long");
        }

        if text_length(&self.description) < MIN_DESCRIPTION_LENGTH {
            errors.push(
                ProjectField::Description,
                "Description must be at least 10 characters long",
            );
        }

        if Url::parse(&self.thumbnail).is_err() {
            errors.push(ProjectField::Thumbnail, "Please enter a valid URL");
        }

        if self.category.is_empty() {
            errors.push(ProjectField::Category, "Category is required");
        }

        if self.tech_primary.is_empty() {
            errors.push(
                ProjectField::TechPrimary,
                "At least one technology tag is required",
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let mut tags = vec![Tag::category(self.category), Tag::tech(self.tech_primary)];
        if let Some(second) = self.tech_secondary.filter(|t| !t.is_empty()) {
            tags.push(Tag::tech(second));
        }

        Ok(NewProject {
            title: self.title,
            description: self.description,
            thumbnail: self.thumbnail,
            tags,
        })
    }
}

// Length in UTF-16 code units, the way browser form checks count it
fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}
