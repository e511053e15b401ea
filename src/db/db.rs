use super::comments::Comments;
use super::migrations::init_with_migrations;
use super::tags::Tags;
use super::tasks::Tasks;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

pub const DB_FILE_NAME: &str = "todo_site.db";

/// An open, migrated SQLite connection with foreign keys enforced.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens (creating if needed) the database at `path` and migrates it.
    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let mut conn = Self::open_without_migrations(path)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        configure(&conn)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens a configured connection without touching the schema.
    pub fn open_without_migrations(path: impl AsRef<Path>) -> Result<Connection> {
        let conn = Connection::open(path)?;
        configure(&conn)?;
        Ok(conn)
    }

    pub fn tasks(&self) -> Tasks<'_> {
        Tasks::new(&self.conn)
    }

    pub fn comments(&self) -> Comments<'_> {
        Comments::new(&self.conn)
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags::new(&self.conn)
    }
}

fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    Ok(())
}
