//! Query source subsystem
//!
//! Runs parameterless SQL text against a relational store and hands back a
//! fully materialized table or a `QueryFailure` carrying the statement.
//!
//! # Invariants
//!
//! - Read-only: no statement issued by this crate mutates the store
//! - One connection per source, opened at most once
//! - Every failure names the query that caused it

mod sqlite;
mod table;

pub use sqlite::SqliteSource;
pub use table::{QueryTable, RowRef};

use crate::errors::DashboardResult;

/// Something that can run a SQL statement and return its rows
pub trait QuerySource {
    /// Run `sql` to completion and return every row
    fn run(&self, sql: &str) -> DashboardResult<QueryTable>;
}

impl<S: QuerySource + ?Sized> QuerySource for &S {
    fn run(&self, sql: &str) -> DashboardResult<QueryTable> {
        (**self).run(sql)
    }
}
