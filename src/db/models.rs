/// Data models for persisted entities
///
/// `Project` is stored as a JSON array under a single storage key, so the
/// serde layout here is the on-disk format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a tag classifies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Category,
    Tech,
}

impl std::fmt::Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TagKind::Category => "category",
            TagKind::Tech => "tech",
        };
        write!(f, "{}", s)
    }
}

/// A labeled classifier on a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TagKind,
}

impl Tag {
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TagKind::Category,
        }
    }

    pub fn tech(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TagKind::Tech,
        }
    }
}

/// A single portfolio entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub tags: Vec<Tag>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Names of all category tags, in tag order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.tags_of(TagKind::Category)
    }

    /// Names of all tech tags, in tag order
    pub fn technologies(&self) -> impl Iterator<Item = &str> {
        self.tags_of(TagKind::Tech)
    }

    /// Whether the project carries a tag with this exact name and kind
    pub fn has_tag(&self, kind: TagKind, name: &str) -> bool {
        self.tags.iter().any(|t| t.kind == kind && t.name == name)
    }

    /// Numeric value of the id, if it is a decimal integer
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }

    fn tags_of(&self, kind: TagKind) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .filter(move |t| t.kind == kind)
            .map(|t| t.name.as_str())
    }
}

/// Input for creating a new project (everything the store does not assign)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub tags: Vec<Tag>,
}

impl NewProject {
    /// Attach the store-assigned fields
    pub fn into_project(self, id: String, updated_at: DateTime<Utc>) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            thumbnail: self.thumbnail,
            tags: self.tags,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        Project {
            id: "7".to_string(),
            title: "Urban Traffic Flow Prediction".to_string(),
            description: "Deep learning traffic models".to_string(),
            thumbnail: "https://example.com/traffic.png".to_string(),
            tags: vec![
                Tag::category("Transportation"),
                Tag::tech("TensorFlow"),
                Tag::tech("Deep Learning"),
            ],
            updated_at: "2025-02-18T13:55:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_project_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["id"], "7");
        assert_eq!(json["updatedAt"], "2025-02-18T13:55:00Z");
        assert_eq!(json["tags"][0]["name"], "Transportation");
        assert_eq!(json["tags"][0]["type"], "category");
        assert_eq!(json["tags"][1]["type"], "tech");
        assert!(json.get("updated_at").is_none());
    }

    #[test]
    fn test_parse_browser_timestamp() {
        // Timestamps written by a browser carry milliseconds
        let raw = r#"{
            "id": "10",
            "title": "Sales",
            "description": "Quarterly sales dashboard",
            "thumbnail": "https://example.com/a.png",
            "tags": [{"name": "Retail", "type": "category"}],
            "updatedAt": "2025-05-01T08:00:00.123Z"
        }"#;

        let project: Project = serde_json::from_str(raw).unwrap();
        assert_eq!(project.id, "10");
        assert_eq!(project.tags[0].kind, TagKind::Category);
    }

    #[test]
    fn test_unknown_tag_type_rejected() {
        let raw = r#"{"name": "Rust", "type": "language"}"#;
        assert!(serde_json::from_str::<Tag>(raw).is_err());
    }

    #[test]
    fn test_tag_accessors() {
        let project = sample();

        assert_eq!(project.categories().collect::<Vec<_>>(), vec!["Transportation"]);
        assert_eq!(
            project.technologies().collect::<Vec<_>>(),
            vec!["TensorFlow", "Deep Learning"]
        );
        assert!(project.has_tag(TagKind::Tech, "TensorFlow"));
        assert!(!project.has_tag(TagKind::Category, "TensorFlow"));
    }

    #[test]
    fn test_numeric_id() {
        let mut project = sample();
        assert_eq!(project.numeric_id(), Some(7));

        project.id = "abc".to_string();
        assert_eq!(project.numeric_id(), None);
    }

    #[test]
    fn test_tag_kind_display() {
        assert_eq!(TagKind::Category.to_string(), "category");
        assert_eq!(TagKind::Tech.to_string(), "tech");
    }
}
