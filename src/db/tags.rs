use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use serde::Serialize;

// Conditional insert: a concurrent writer that wins the race on `name` turns
// this into a no-op instead of a UNIQUE violation.
const INSERT_TAG_IF_ABSENT: &str = "INSERT INTO tags (name) VALUES (?1) ON CONFLICT(name) DO NOTHING";
const SELECT_ALL_TAGS: &str = "SELECT id, name, created_at FROM tags ORDER BY name";
const SELECT_TAG_BY_NAME: &str = "SELECT id, name, created_at FROM tags WHERE name = ?1";
const SELECT_TAGS_BY_TASK: &str = "
    SELECT t.id, t.name, t.created_at FROM tags t
    JOIN task_tags tt ON t.id = tt.tag_id
    WHERE tt.task_id = ?1
    ORDER BY t.name
";
const SELECT_TASK_EXISTS: &str = "SELECT 1 FROM tasks WHERE id = ?1";
const INSERT_TASK_TAG: &str = "INSERT OR IGNORE INTO task_tags (task_id, tag_id) VALUES (?1, ?2)";

/// A uniquely named label shared between tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Outcome of [`Tags::attach`].
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub tag: Tag,
    /// The tag row did not exist before this call.
    pub created: bool,
    /// A new task<->tag link was written (false if it was already there).
    pub linked: bool,
}

pub struct Tags<'a> {
    conn: &'a Connection,
}

impl<'a> Tags<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// All tags ordered by name.
    pub fn list(&self) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_TAGS)?;
        let tags = stmt.query_map([], tag_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Tag>> {
        self.conn.query_row(SELECT_TAG_BY_NAME, params![name], tag_from_row).optional().map_err(Into::into)
    }

    /// Tags attached to a task, ordered by name.
    pub fn list_for_task(&self, task_id: i64) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(SELECT_TAGS_BY_TASK)?;
        let tags = stmt.query_map(params![task_id], tag_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tags)
    }

    /// Finds the tag named `name`, inserting it if absent.
    ///
    /// Returns the tag and whether this call created it. Never fails with a
    /// uniqueness violation, even when another connection inserts the same
    /// name concurrently.
    pub fn get_or_create(&self, name: &str) -> Result<(Tag, bool)> {
        let created = self.conn.execute(INSERT_TAG_IF_ABSENT, params![name])? == 1;
        let tag = self
            .get_by_name(name)?
            .ok_or_else(|| msg_error_anyhow!(Message::TagNotFound(name.to_string())))?;
        Ok((tag, created))
    }

    /// Gets or creates the tag `name` and links it to `task_id`.
    ///
    /// Runs in one IMMEDIATE transaction; concurrent writers wait on the busy
    /// timeout. Idempotent: attaching the same name twice leaves one tag and
    /// one link. If the task does not exist nothing is
    /// written and a "task not found" error is returned.
    pub fn attach(&self, task_id: i64, name: &str) -> Result<Attachment> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let owner = tx.query_row(SELECT_TASK_EXISTS, params![task_id], |_| Ok(())).optional()?;
        if owner.is_none() {
            return Err(msg_error_anyhow!(Message::TaskNotFound(task_id)));
        }

        let (tag, created) = Tags::new(&tx).get_or_create(name)?;
        let linked = tx.execute(INSERT_TASK_TAG, params![task_id, tag.id])? == 1;

        tx.commit()?;
        Ok(Attachment { tag, created, linked })
    }
}

fn tag_from_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: row.get(2)?,
    })
}
