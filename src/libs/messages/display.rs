//! Display implementation for todo_site messages.
//!
//! All user-facing text lives here, in one match, so the console output of
//! the CLI, the log lines of the server and the validation errors shown in
//! the HTML forms share a single wording.
//!
//! ```rust
//! use todo_site::libs::messages::Message;
//!
//! assert_eq!(Message::FieldRequired.to_string(), "This field is required.");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(id) => format!("Task #{} created", id),
            Message::TaskUpdated(id) => format!("Task #{} updated", id),
            Message::TaskDeleted(id) => format!("Task #{} deleted", id),
            Message::TaskNotFound(id) => format!("Task #{} not found", id),
            Message::TaskActionIgnored(id) => format!("No known action submitted for task #{}", id),

            // === COMMENT MESSAGES ===
            Message::CommentAdded(id, task_id) => format!("Comment #{} added to task #{}", id, task_id),

            // === TAG MESSAGES ===
            Message::TagCreated(name) => format!("Tag '{}' created", name),
            Message::TagAttached(name, task_id) => format!("Tag '{}' attached to task #{}", name, task_id),
            Message::TagAlreadyAttached(name, task_id) => format!("Tag '{}' is already attached to task #{}", name, task_id),
            Message::TagNotFound(name) => format!("Tag '{}' not found", name),

            // === VALIDATION MESSAGES ===
            Message::FieldRequired => "This field is required.".to_string(),
            Message::FieldTooLong(max, actual) => {
                format!("Ensure this value has at most {} characters (it has {}).", max, actual)
            }

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigDeleted(path) => format!("Configuration removed from {}", path),
            Message::ConfigFileNotFound => "Configuration file not found".to_string(),
            Message::ConfigParseError(err) => format!("Failed to parse configuration: {}", err),
            Message::ConfigInvalidPort(value) => format!("Invalid port '{}': expected a number between 1 and 65535", value),

            // === SERVER MESSAGES ===
            Message::ServerListening(addr) => format!("Listening on http://{}", addr),
            Message::ServerShuttingDown => "Shutting down server".to_string(),
            Message::ServerBindFailed(addr) => format!("Failed to bind {}", addr),

            // === DATABASE MESSAGES ===
            Message::DatabaseOpened(path) => format!("Database opened at {}", path),
            Message::DataDirCreateFailed(err) => format!("Failed to create data directory: {}", err),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, err) => format!("Migration v{} failed: {}", version, err),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
            Message::DatabaseVersion(version) => format!("Database schema version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
        };
        write!(f, "{}", s)
    }
}
