use crate::libs::messages::Message;
use crate::libs::task::Task;
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_TASK: &str = "INSERT INTO tasks (description) VALUES (?1)";
const UPDATE_TASK: &str = "UPDATE tasks SET description = ?2 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const SELECT_TASKS: &str = "SELECT id, description, created_at FROM tasks ORDER BY id";
const SELECT_TASK_BY_ID: &str = "SELECT id, description, created_at FROM tasks WHERE id = ?1";
const SELECT_TASKS_BY_TAG: &str = "
    SELECT t.id, t.description, t.created_at FROM tasks t
    JOIN task_tags tt ON t.id = tt.task_id
    WHERE tt.tag_id = ?1
    ORDER BY t.id
";

pub struct Tasks<'a> {
    conn: &'a Connection,
}

impl<'a> Tasks<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Creates a task and returns the stored record.
    pub fn insert(&self, description: &str) -> Result<Task> {
        self.conn.execute(INSERT_TASK, params![description])?;
        let id = self.conn.last_insert_rowid();
        self.get(id)?.ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(id)))
    }

    pub fn get(&self, id: i64) -> Result<Option<Task>> {
        self.conn.query_row(SELECT_TASK_BY_ID, params![id], task_from_row).optional().map_err(Into::into)
    }

    pub fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// All tasks, oldest first.
    pub fn list(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(SELECT_TASKS)?;
        let tasks = stmt.query_map([], task_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Tasks carrying the tag `tag_id`, oldest first.
    pub fn list_by_tag(&self, tag_id: i64) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(SELECT_TASKS_BY_TAG)?;
        let tasks = stmt.query_map(params![tag_id], task_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    pub fn update(&self, id: i64, description: &str) -> Result<()> {
        let affected = self.conn.execute(UPDATE_TASK, params![id, description])?;
        if affected == 0 {
            return Err(msg_error_anyhow!(Message::TaskNotFound(id)));
        }
        Ok(())
    }

    /// Deletes a task. Its comments and tag links cascade; tags themselves stay.
    ///
    /// Returns the number of task rows removed (0 or 1).
    pub fn delete(&self, id: i64) -> Result<usize> {
        let deleted = self.conn.execute(DELETE_TASK, params![id])?;
        Ok(deleted)
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        description: row.get(1)?,
        created_at: row.get(2)?,
    })
}
