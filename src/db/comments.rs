use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

const INSERT_COMMENT: &str = "INSERT INTO comments (task_id, body) VALUES (?1, ?2)";
const SELECT_COMMENT_BY_ID: &str = "SELECT id, task_id, body, created_at FROM comments WHERE id = ?1";
const SELECT_COMMENTS_BY_TASK: &str = "SELECT id, task_id, body, created_at FROM comments WHERE task_id = ?1 ORDER BY id";
const SELECT_TASK_EXISTS: &str = "SELECT 1 FROM tasks WHERE id = ?1";

/// A note attached to exactly one task. The owner never changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: i64,
    pub task_id: i64,
    pub body: String,
    pub created_at: NaiveDateTime,
}

pub struct Comments<'a> {
    conn: &'a Connection,
}

impl<'a> Comments<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Adds a comment to `task_id`.
    ///
    /// Fails with "task not found" when the owner does not exist.
    pub fn insert(&self, task_id: i64, body: &str) -> Result<Comment> {
        let owner = self.conn.query_row(SELECT_TASK_EXISTS, params![task_id], |_| Ok(())).optional()?;
        if owner.is_none() {
            return Err(msg_error_anyhow!(Message::TaskNotFound(task_id)));
        }

        self.conn.execute(INSERT_COMMENT, params![task_id, body])?;
        let id = self.conn.last_insert_rowid();
        let comment = self.conn.query_row(SELECT_COMMENT_BY_ID, params![id], comment_from_row)?;
        Ok(comment)
    }

    /// Comments of a task, oldest first.
    pub fn list_for_task(&self, task_id: i64) -> Result<Vec<Comment>> {
        let mut stmt = self.conn.prepare(SELECT_COMMENTS_BY_TASK)?;
        let comments = stmt.query_map(params![task_id], comment_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(comments)
    }
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        task_id: row.get(1)?,
        body: row.get(2)?,
        created_at: row.get(3)?,
    })
}
