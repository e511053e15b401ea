//! Database layer for todo_site.
//!
//! SQLite persistence for the three record kinds and their relations:
//!
//! - **Task** (`tasks`) owns zero or more **Comments** (`comments`, cascade on delete)
//! - **Task** and **Tag** (`tags`, unique `name`) are linked many-to-many through `task_tags`
//!
//! Connections come from [`db::Db`], which enforces foreign keys and applies
//! pending migrations before handing the connection out. Repositories borrow
//! the connection:
//!
//! ```rust
//! use todo_site::db::db::Db;
//!
//! let db = Db::open_in_memory()?;
//! let task = db.tasks().insert("Water the plants")?;
//! db.comments().insert(task.id, "the ficus too")?;
//! let attached = db.tags().attach(task.id, "home")?;
//! assert!(attached.created);
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection bootstrap.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Comments owned by tasks.
pub mod comments;

/// Uniquely named tags and the atomic get-or-create-and-attach operation.
pub mod tags;

/// Task CRUD.
pub mod tasks;
