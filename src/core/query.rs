/// Project query engine
///
/// Derives the visible project list from the stored one. Everything here is
/// pure and recomputed from scratch on each call; lists are small.

use crate::db::{Project, TagKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Filter projects by search term and tag selections
///
/// The three checks are ANDed together and each one is skipped when its input
/// is empty:
/// - the term must appear (case-insensitively) in the title, the description
///   or any tag name
/// - at least one category tag must be in `categories`
/// - at least one tech tag must be in `technologies`
///
/// Store order is preserved.
pub fn filter_projects<'a>(
    projects: &'a [Project],
    search_term: &str,
    categories: &BTreeSet<String>,
    technologies: &BTreeSet<String>,
) -> Vec<&'a Project> {
    let needle = search_term.to_lowercase();

    projects
        .iter()
        .filter(|p| search_term.is_empty() || matches_text(p, &needle))
        .filter(|p| categories.is_empty() || has_selected_tag(p, TagKind::Category, categories))
        .filter(|p| technologies.is_empty() || has_selected_tag(p, TagKind::Tech, technologies))
        .collect()
}

fn matches_text(project: &Project, needle: &str) -> bool {
    project.title.to_lowercase().contains(needle)
        || project.description.to_lowercase().contains(needle)
        || project
            .tags
            .iter()
            .any(|tag| tag.name.to_lowercase().contains(needle))
}

fn has_selected_tag(project: &Project, kind: TagKind, selected: &BTreeSet<String>) -> bool {
    project
        .tags
        .iter()
        .any(|tag| tag.kind == kind && selected.contains(&tag.name))
}

/// Currently selected category and technology filters
///
/// Transient UI state; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub categories: BTreeSet<String>,
    pub technologies: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the category if unselected, otherwise unselect it
    ///
    /// Returns whether the category is selected afterwards.
    pub fn toggle_category(&mut self, name: &str) -> bool {
        toggle(&mut self.categories, name)
    }

    /// Select the technology if unselected, otherwise unselect it
    pub fn toggle_technology(&mut self, name: &str) -> bool {
        toggle(&mut self.technologies, name)
    }

    pub fn remove_category(&mut self, name: &str) -> bool {
        self.categories.remove(name)
    }

    pub fn remove_technology(&mut self, name: &str) -> bool {
        self.technologies.remove(name)
    }

    /// Drop every selection
    pub fn clear(&mut self) {
        self.categories.clear();
        self.technologies.clear();
    }

    /// Number of selected filters across both groups
    pub fn active_count(&self) -> usize {
        self.categories.len() + self.technologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Run `filter_projects` with this selection
    pub fn apply<'a>(&self, projects: &'a [Project], search_term: &str) -> Vec<&'a Project> {
        filter_projects(projects, search_term, &self.categories, &self.technologies)
    }
}

fn toggle(set: &mut BTreeSet<String>, name: &str) -> bool {
    if set.remove(name) {
        false
    } else {
        set.insert(name.to_string());
        true
    }
}

/// Distinct tag names available for filtering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableFilters {
    pub categories: Vec<String>,
    pub technologies: Vec<String>,
}

impl AvailableFilters {
    /// Collect distinct category and tech names in first-appearance order
    pub fn from_projects(projects: &[Project]) -> Self {
        let mut filters = Self::default();

        for tag in projects.iter().flat_map(|p| p.tags.iter()) {
            let names = match tag.kind {
                TagKind::Category => &mut filters.categories,
                TagKind::Tech => &mut filters.technologies,
            };
            if !names.contains(&tag.name) {
                names.push(tag.name.clone());
            }
        }

        filters
    }
}

/// Ordering applied to a filtered list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Keep store order
    #[default]
    Stored,
    /// Most recently updated first
    Newest,
    /// Least recently updated first
    Oldest,
    /// Case-insensitive title, A to Z
    Title,
}

impl SortOrder {
    /// Sort in place; ties keep their relative order
    pub fn apply(&self, projects: &mut [&Project]) {
        match self {
            SortOrder::Stored => {}
            SortOrder::Newest => projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            SortOrder::Oldest => projects.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
            SortOrder::Title => projects.sort_by_cached_key(|p| p.title.to_lowercase()),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SortOrder::Stored => "stored",
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Title => "title",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stored" => Ok(SortOrder::Stored),
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "title" => Ok(SortOrder::Title),
            other => Err(format!(
                "unknown sort order '{}' (expected stored, newest, oldest or title)",
                other
            )),
        }
    }
}
