/// Core functionality modules
///
/// Contains the main business logic: the project store, the query engine,
/// form validation and the built-in sample data.

pub mod query;
pub mod seed;
pub mod store;
pub mod validator;

pub use query::{filter_projects, AvailableFilters, FilterSelection, SortOrder};
pub use seed::seed_projects;
pub use store::{ProjectStore, PROJECTS_KEY};
pub use validator::{FieldError, ProjectField, ProjectForm, ValidationErrors};
