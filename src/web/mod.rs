//! HTTP surface: two pages backed by the database.
//!
//! | Route | Method | Handler |
//! |---|---|---|
//! | `/` | GET, POST | [`handlers::list_tasks`], [`handlers::create_task`] |
//! | `/task/{id}` | GET, POST | [`handlers::task_detail`], [`handlers::task_action`] |
//! | `/tag/{name}` | GET | [`handlers::tag_detail`] |
//!
//! Anything else renders the 404 page.

pub mod error;
pub mod handlers;
pub mod templates;

use crate::db::db::Db;
use axum::routing::get;
use axum::Router;
use error::AppError;
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared handler state: the single SQLite connection.
///
/// Storage work runs on the blocking pool and holds the lock for one call,
/// so every handler sees a consistent database.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Db>>,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        Self { db: Arc::new(Mutex::new(db)) }
    }

    /// Runs `f` against the database on the blocking thread pool.
    pub async fn with_db<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Db) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let db = db.lock();
            f(&db)
        })
        .await?
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_tasks).post(handlers::create_task))
        .route("/task/{id}", get(handlers::task_detail).post(handlers::task_action))
        .route("/tag/{name}", get(handlers::tag_detail))
        .fallback(handlers::not_found)
        .with_state(state)
}
