use crate::Result;
use rusqlite::{Connection, OpenFlags};
use std::fs;
use std::path::Path;

pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Creates the database at `path`, creating missing parent directories.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Creates a throwaway database that lives only as long as the returned value.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Opens an existing database. A missing file is an error and is not created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // Validate database structure
        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type='table'
             AND name IN ('notes', 'drafy_meta')",
            [],
            |row| row.get(0),
        )?;

        if table_count != 2 {
            return Err(crate::DrafyError::InvalidDatabase(
                "Not a valid Drafy database".to_string(),
            ));
        }

        // Migrate: databases written before list ordering was indexed
        let index_exists: bool = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type='index' AND name='idx_notes_modified_at'",
            [],
            |row| row.get::<_, i64>(0).map(|count| count > 0),
        )?;

        if !index_exists {
            log::info!("migrating notes database: adding modified_at index");
            conn.execute(
                "CREATE INDEX idx_notes_modified_at ON notes(modified_at DESC)",
                [],
            )?;
        }

        Ok(Self { conn })
    }

    /// Opens the database at `path`, creating it first if the file does not exist.
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::open(path)
        } else {
            Self::create(path)
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
