//! SQLite-backed query source
//!
//! The connection is opened read-only on the first query and then reused for
//! every later query issued through the same source.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, OpenFlags};
use serde_json::{Number, Value};

use crate::errors::{DashboardError, DashboardResult};
use crate::observability::{log_event_with_fields, Event};

use super::table::QueryTable;
use super::QuerySource;

/// Read-only SQLite source with a lazily opened, long-lived connection
pub struct SqliteSource {
    path: PathBuf,
    conn: OnceCell<Connection>,
}

impl SqliteSource {
    /// Creates a source for the database at `path`.
    ///
    /// Nothing is opened until the first query runs.
    pub fn open_lazy(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: OnceCell::new(),
        }
    }

    /// Wraps an already open connection
    pub fn from_connection(conn: Connection) -> Self {
        let path = conn
            .path()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(":memory:"));
        Self {
            path,
            conn: OnceCell::from(conn),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the underlying connection has been opened yet
    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    fn connection(&self) -> rusqlite::Result<&Connection> {
        if let Some(conn) = self.conn.get() {
            return Ok(conn);
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&self.path, flags)?;

        let path = self.path.display().to_string();
        log_event_with_fields(Event::SourceOpened, &[("path", path.as_str())]);

        Ok(self.conn.get_or_init(|| conn))
    }
}

impl QuerySource for SqliteSource {
    fn run(&self, sql: &str) -> DashboardResult<QueryTable> {
        let conn = self
            .connection()
            .map_err(|e| DashboardError::query_failure(sql, e.to_string()))?;
        let (columns, rows) =
            read_rows(conn, sql).map_err(|e| DashboardError::query_failure(sql, e.to_string()))?;
        QueryTable::new(columns, rows)
    }
}

fn read_rows(conn: &Connection, sql: &str) -> rusqlite::Result<(Vec<String>, Vec<Vec<Value>>)> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut out = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            cells.push(cell_value(idx, name, row.get_ref(idx)?)?);
        }
        out.push(cells);
    }

    Ok((columns, out))
}

fn cell_value(idx: usize, name: &str, cell: ValueRef<'_>) -> rusqlite::Result<Value> {
    match cell {
        ValueRef::Null => Ok(Value::Null),
        ValueRef::Integer(i) => Ok(Value::from(i)),
        // Non-finite reals have no JSON form
        ValueRef::Real(f) => Ok(Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)),
        ValueRef::Text(bytes) => Ok(Value::String(String::from_utf8_lossy(bytes).into_owned())),
        ValueRef::Blob(_) => Err(rusqlite::Error::InvalidColumnType(
            idx,
            name.to_string(),
            Type::Blob,
        )),
    }
}
