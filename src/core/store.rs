/// Project store
///
/// Owns the authoritative project list. The list is loaded once, kept in
/// memory, and written back in full on every add or remove.

use crate::core::query::AvailableFilters;
use crate::core::seed::seed_projects;
use crate::db::{Database, NewProject, Project};
use crate::error::{DataVistaError, Result};
use chrono::Utc;
use std::sync::Arc;

/// Storage key holding the JSON project list
pub const PROJECTS_KEY: &str = "datavista-projects";

/// Owner of the project list and its persisted copy
pub struct ProjectStore {
    db: Arc<Database>,
    key: String,
    projects: Vec<Project>,
}

impl ProjectStore {
    /// Open the store and load the current list
    ///
    /// Never fails: unreadable state falls back to the sample projects.
    pub async fn open(db: Arc<Database>, key: impl Into<String>) -> Self {
        let mut store = Self {
            db,
            key: key.into(),
            projects: Vec::new(),
        };
        store.projects = store.load().await;
        store
    }

    /// Read the persisted list
    ///
    /// Falls back to the sample projects when nothing is stored, the stored
    /// value is not a valid project list, or storage cannot be read.
    pub async fn load(&self) -> Vec<Project> {
        let raw = match self.db.get_item(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no saved projects, using samples");
                return seed_projects();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read saved projects, using samples");
                return seed_projects();
            }
        };

        match serde_json::from_str::<Vec<Project>>(&raw) {
            Ok(projects) => projects,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "error parsing saved projects, using samples");
                seed_projects()
            }
        }
    }

    /// All projects in store order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Find a project by id
    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Category and tech names present in the list
    pub fn available_filters(&self) -> AvailableFilters {
        AvailableFilters::from_projects(&self.projects)
    }

    /// Create a project
    ///
    /// Assigns the next id, stamps the current time, appends the project and
    /// persists the whole list. The in-memory list only changes once the
    /// write has succeeded.
    ///
    /// # Returns
    /// * `Ok(Project)` - The stored record
    /// * `Err(DataVistaError)` - If no id is left or storage fails
    pub async fn add(&mut self, draft: NewProject) -> Result<Project> {
        let id = self.next_id().await?;
        let next = id.checked_add(1).ok_or(DataVistaError::IdSpaceExhausted)?;
        let project = draft.into_project(id.to_string(), Utc::now());

        let mut updated = self.projects.clone();
        updated.push(project.clone());
        self.persist(&updated, Some(next)).await?;

        self.projects = updated;
        tracing::info!(id = %project.id, title = %project.title, "project added");

        Ok(project)
    }

    /// Delete a project by id
    ///
    /// Deleting an unknown id changes nothing but still rewrites the list.
    ///
    /// # Returns
    /// * `Ok(true)` - A project was removed
    /// * `Ok(false)` - No project had this id
    pub async fn remove(&mut self, id: &str) -> Result<bool> {
        let updated: Vec<Project> = self
            .projects
            .iter()
            .filter(|p| p.id != id)
            .cloned()
            .collect();
        let removed = updated.len() != self.projects.len();

        self.persist(&updated, None).await?;
        self.projects = updated;

        if removed {
            tracing::info!(id = %id, "project removed");
        } else {
            tracing::debug!(id = %id, "remove requested for unknown project");
        }

        Ok(removed)
    }

    fn counter_key(&self) -> String {
        format!("{}:next-id", self.key)
    }

    // Next id: the larger of the saved counter and one past the highest
    // numeric id. Ids that are not numbers are ignored.
    async fn next_id(&self) -> Result<u64> {
        let from_list = match self.projects.iter().filter_map(Project::numeric_id).max() {
            Some(max) => max.checked_add(1).ok_or(DataVistaError::IdSpaceExhausted)?,
            None => 1,
        };

        let from_counter = self
            .db
            .get_item(&self.counter_key())
            .await?
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(1);

        Ok(from_list.max(from_counter))
    }

    async fn persist(&self, projects: &[Project], next_id: Option<u64>) -> Result<()> {
        let json = serde_json::to_string(projects)?;

        match next_id {
            Some(next) => {
                let counter = next.to_string();
                let counter_key = self.counter_key();
                self.db
                    .set_items(&[
                        (self.key.as_str(), json.as_str()),
                        (counter_key.as_str(), counter.as_str()),
                    ])
                    .await?;
            }
            None => self.db.set_item(&self.key, &json).await?,
        }

        tracing::debug!(key = %self.key, count = projects.len(), "projects saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Tag;

    async fn create_test_store() -> (ProjectStore, Arc<Database>) {
        let db = Arc::new(Database::new_test().await.unwrap());
        let store = ProjectStore::open(Arc::clone(&db), PROJECTS_KEY).await;
        (store, db)
    }

    fn draft(title: &str) -> NewProject {
        NewProject {
            title: title.to_string(),
            description: "Exploratory analysis of something".to_string(),
            thumbnail: "https://example.com/thumb.png".to_string(),
            tags: vec![Tag::category("Research"), Tag::tech("Polars")],
        }
    }

    fn max_id(projects: &[Project]) -> u64 {
        projects.iter().filter_map(Project::numeric_id).max().unwrap_or(0)
    }

    #[tokio::test]
    async fn test_empty_storage_loads_seed() {
        let (store, _db) = create_test_store().await;

        assert_eq!(store.projects(), seed_projects().as_slice());
    }

    #[tokio::test]
    async fn test_corrupt_storage_loads_seed() {
        let db = Arc::new(Database::new_test().await.unwrap());
        db.set_item(PROJECTS_KEY, "{not json").await.unwrap();

        let store = ProjectStore::open(db, PROJECTS_KEY).await;
        assert_eq!(store.projects(), seed_projects().as_slice());
    }

    #[tokio::test]
    async fn test_wrong_shape_loads_seed() {
        let db = Arc::new(Database::new_test().await.unwrap());
        db.set_item(PROJECTS_KEY, r#"[{"id": 1}]"#).await.unwrap();

        let store = ProjectStore::open(db, PROJECTS_KEY).await;
        assert_eq!(store.len(), seed_projects().len());
    }

    #[tokio::test]
    async fn test_saved_empty_list_is_kept() {
        let db = Arc::new(Database::new_test().await.unwrap());
        db.set_item(PROJECTS_KEY, "[]").await.unwrap();

        let store = ProjectStore::open(db, PROJECTS_KEY).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_add_assigns_greater_id_and_persists() {
        let (mut store, _db) = create_test_store().await;
        let prior_max = max_id(store.projects());

        let created = store.add(draft("Ocean Temperature Study")).await.unwrap();
        assert_eq!(created.id, "10");
        assert!(created.numeric_id().unwrap() > prior_max);

        let reloaded = store.load().await;
        assert_eq!(reloaded.len(), 10);
        assert_eq!(reloaded.last(), Some(&created));
    }

    #[tokio::test]
    async fn test_add_stamps_current_time() {
        let (mut store, _db) = create_test_store().await;
        let before = Utc::now();

        let created = store.add(draft("Timed")).await.unwrap();
        assert!(created.updated_at >= before);
        assert!(created.updated_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_removed_ids_are_not_reused() {
        let (mut store, _db) = create_test_store().await;

        let first = store.add(draft("First")).await.unwrap();
        assert!(store.remove(&first.id).await.unwrap());

        let second = store.add(draft("Second")).await.unwrap();
        assert_ne!(first.id, second.id);
        assert!(second.numeric_id() > first.numeric_id());
    }

    #[tokio::test]
    async fn test_non_numeric_ids_do_not_break_generation() {
        let db = Arc::new(Database::new_test().await.unwrap());
        let mut seeded = seed_projects();
        seeded[0].id = "imported-abc".to_string();
        db.set_item(PROJECTS_KEY, &serde_json::to_string(&seeded).unwrap())
            .await
            .unwrap();

        let mut store = ProjectStore::open(db, PROJECTS_KEY).await;
        let created = store.add(draft("After import")).await.unwrap();
        assert_eq!(created.id, "10");
    }

    #[tokio::test]
    async fn test_add_to_empty_list_starts_at_one() {
        let db = Arc::new(Database::new_test().await.unwrap());
        db.set_item(PROJECTS_KEY, "[]").await.unwrap();

        let mut store = ProjectStore::open(db, PROJECTS_KEY).await;
        let created = store.add(draft("Fresh start")).await.unwrap();
        assert_eq!(created.id, "1");
    }

    #[tokio::test]
    async fn test_remove_existing() {
        let (mut store, _db) = create_test_store().await;

        assert!(store.remove("3").await.unwrap());
        assert!(store.get("3").is_none());
        assert_eq!(store.len(), 8);

        let reloaded = store.load().await;
        assert!(reloaded.iter().all(|p| p.id != "3"));
    }

    #[tokio::test]
    async fn test_remove_missing_is_noop() {
        let (mut store, db) = create_test_store().await;
        let before = store.len();

        assert!(!store.remove("does-not-exist").await.unwrap());
        assert_eq!(store.len(), before);

        // The list is still written out
        assert!(db.get_item(PROJECTS_KEY).await.unwrap().is_some());
        assert_eq!(store.load().await.len(), before);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (store, _db) = create_test_store().await;

        let project = store.get("4").unwrap();
        assert_eq!(project.title, "Social Media Sentiment Analysis");
        assert!(store.get("404").is_none());
    }

    #[tokio::test]
    async fn test_available_filters_follow_mutations() {
        let (mut store, _db) = create_test_store().await;
        assert!(!store.available_filters().categories.contains(&"Research".to_string()));

        store.add(draft("New category")).await.unwrap();
        let filters = store.available_filters();
        assert!(filters.categories.contains(&"Research".to_string()));
        assert!(filters.technologies.contains(&"Polars".to_string()));
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.db");

        let created = {
            let db = Arc::new(Database::new(&path).await.unwrap());
            let mut store = ProjectStore::open(Arc::clone(&db), PROJECTS_KEY).await;
            store.remove("1").await.unwrap();
            let created = store.add(draft("Survives restart")).await.unwrap();
            db.close().await;
            created
        };

        let db = Arc::new(Database::new(&path).await.unwrap());
        let store = ProjectStore::open(db, PROJECTS_KEY).await;

        assert_eq!(store.len(), 9);
        assert!(store.get("1").is_none());
        assert_eq!(store.get(&created.id), Some(&created));
    }

    #[tokio::test]
    async fn test_stored_format_is_plain_project_array() {
        let (mut store, db) = create_test_store().await;
        store.add(draft("Shape check")).await.unwrap();

        let raw = db.get_item(PROJECTS_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 10);
        assert!(items[9].get("updatedAt").is_some());
        assert_eq!(items[9]["tags"][0]["type"], "category");
    }

    #[tokio::test]
    async fn test_add_refuses_when_ids_run_out() {
        let db = Arc::new(Database::new_test().await.unwrap());
        let mut seeded = seed_projects();
        seeded[0].id = u64::MAX.to_string();
        db.set_item(PROJECTS_KEY, &serde_json::to_string(&seeded).unwrap())
            .await
            .unwrap();

        let mut store = ProjectStore::open(Arc::clone(&db), PROJECTS_KEY).await;
        let result = store.add(draft("One too many")).await;

        match result {
            Err(DataVistaError::IdSpaceExhausted) => {}
            other => panic!("Expected IdSpaceExhausted, got {:?}", other),
        }
        assert_eq!(store.projects(), seeded.as_slice());
        assert_eq!(store.load().await, seeded);
    }

    #[tokio::test]
    async fn test_add_refuses_when_counter_is_at_max() {
        let (mut store, db) = create_test_store().await;
        db.set_item(&store.counter_key(), &u64::MAX.to_string())
            .await
            .unwrap();

        let result = store.add(draft("Last slot")).await;
        assert!(matches!(result, Err(DataVistaError::IdSpaceExhausted)));
        assert_eq!(store.len(), seed_projects().len());
    }

    #[tokio::test]
    async fn test_add_on_closed_storage_leaves_list_untouched() {
        let (mut store, db) = create_test_store().await;
        let before = store.projects().to_vec();

        db.close().await;
        let result = store.add(draft("Never saved")).await;

        assert!(result.is_err());
        assert_eq!(store.len(), before.len());
        assert_eq!(store.projects(), before.as_slice());
    }

    #[tokio::test]
    async fn test_add_failed_write_leaves_list_untouched() {
        let (mut store, db) = create_test_store().await;
        let before = store.projects().to_vec();

        // Reads still work, every write is rejected
        sqlx::query(
            "CREATE TRIGGER reject_writes BEFORE INSERT ON storage \
             BEGIN SELECT RAISE(ABORT, 'storage is read-only'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let result = store.add(draft("Rejected")).await;
        match result {
            Err(DataVistaError::Database(_)) => {}
            other => panic!("Expected Database error, got {:?}", other),
        }
        assert_eq!(store.projects(), before.as_slice());
        assert!(db.get_item(PROJECTS_KEY).await.unwrap().is_none());
        assert!(db.get_item(&store.counter_key()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_on_closed_storage_leaves_list_untouched() {
        let (mut store, db) = create_test_store().await;
        let before = store.projects().to_vec();

        db.close().await;
        let result = store.remove("3").await;

        assert!(result.is_err());
        assert_eq!(store.len(), before.len());
        assert!(store.get("3").is_some());
        assert_eq!(store.projects(), before.as_slice());
    }
}
