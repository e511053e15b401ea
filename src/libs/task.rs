use chrono::NaiveDateTime;
use serde::Serialize;

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub created_at: NaiveDateTime,
}
