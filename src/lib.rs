//! # todo_site
//!
//! A minimal task tracker served as HTML: create tasks, attach comments and
//! tag them with labels that are created on first use.
//!
//! ## Features
//!
//! - **Tasks**: create, update, delete (comments cascade, tags are detached)
//! - **Comments**: free-text notes owned by one task
//! - **Tags**: uniquely named, attached through an atomic get-or-create
//! - **Detail dispatch**: one form endpoint per task, routed by the submitted control
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todo_site::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod web;
