/// Error types for datavista
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use crate::core::validator::ValidationErrors;
use thiserror::Error;

/// Main error type for datavista operations
#[derive(Error, Debug)]
pub enum DataVistaError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Project not found in the store
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Submitted project form failed validation
    #[error("Invalid project: {0}")]
    Validation(ValidationErrors),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Every numeric project id has been handed out
    #[error("No project ids left to assign")]
    IdSpaceExhausted,
}

impl From<ValidationErrors> for DataVistaError {
    fn from(errors: ValidationErrors) -> Self {
        DataVistaError::Validation(errors)
    }
}

/// Result type alias for datavista operations
pub type Result<T> = std::result::Result<T, DataVistaError>;

/// Convert DataVistaError to a user-friendly error message
impl DataVistaError {
    pub fn user_message(&self) -> String {
        match self {
            DataVistaError::Database(e) => {
                format!("Could not read or write saved projects. Details: {}", e)
            }
            DataVistaError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            DataVistaError::ProjectNotFound(id) => {
                format!("Project '{}' not found", id)
            }
            DataVistaError::Validation(errors) => {
                let lines: Vec<String> = errors
                    .iter()
                    .map(|e| format!("  --{:<12} {}", e.field.to_string(), e.message))
                    .collect();
                format!("Project not added. Please fix:\n{}", lines.join("\n"))
            }
            DataVistaError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            DataVistaError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            DataVistaError::IdSpaceExhausted => {
                "No project ids are left. Delete the project with the highest id and try again."
                    .to_string()
            }
        }
    }
}
