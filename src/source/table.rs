//! Tabular query results
//!
//! Cells are JSON-typed: NULL, INTEGER, REAL and TEXT map onto
//! `Value::Null`, `Value::Number` and `Value::String`.

use serde_json::Value;

use crate::errors::{DashboardError, DashboardResult};

/// A fully materialized query result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl QueryTable {
    /// Creates a table. Every row must have one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> DashboardResult<Self> {
        if let Some(bad) = rows.iter().position(|r| r.len() != columns.len()) {
            return Err(DashboardError::decode(
                "*",
                format!(
                    "row {} has {} cells, expected {}",
                    bad,
                    rows[bad].len(),
                    columns.len()
                ),
            ));
        }
        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, or a decode error naming it
    pub fn column_index(&self, name: &str) -> DashboardResult<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DashboardError::decode(name, "column not present in result"))
    }

    /// Iterates rows in result order
    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        self.rows.iter().map(move |cells| RowRef { table: self, cells })
    }
}

/// Borrowed view of one result row with typed accessors
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a QueryTable,
    cells: &'a [Value],
}

impl<'a> RowRef<'a> {
    /// Raw cell by column name
    pub fn get(&self, column: &str) -> DashboardResult<&'a Value> {
        let idx = self.table.column_index(column)?;
        Ok(&self.cells[idx])
    }

    /// Non-negative count. NULL reads as zero.
    pub fn count(&self, column: &str) -> DashboardResult<u64> {
        match self.get(column)? {
            Value::Null => Ok(0),
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    return Ok(v);
                }
                if n.as_i64().is_some() {
                    return Err(DashboardError::decode(column, format!("negative count {}", n)));
                }
                match n.as_f64() {
                    Some(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
                    _ => Err(DashboardError::decode(
                        column,
                        format!("{} is not a whole count", n),
                    )),
                }
            }
            other => Err(DashboardError::decode(
                column,
                format!("expected a count, found {}", other),
            )),
        }
    }

    /// Integer identifier
    pub fn id(&self, column: &str) -> DashboardResult<i64> {
        match self.get(column)? {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| DashboardError::decode(column, format!("{} is not an integer id", n))),
            other => Err(DashboardError::decode(
                column,
                format!("expected an integer id, found {}", other),
            )),
        }
    }

    /// Text value. NULL reads as the empty string.
    pub fn text(&self, column: &str) -> DashboardResult<String> {
        match self.get(column)? {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(DashboardError::decode(
                column,
                format!("expected text, found {}", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> QueryTable {
        QueryTable::new(
            vec!["id".into(), "name".into(), "total".into()],
            vec![
                vec![json!(1), json!("North"), json!(12)],
                vec![json!(2), Value::Null, Value::Null],
                vec![json!(3), json!("South"), json!(4.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = QueryTable::new(vec!["a".into()], vec![vec![json!(1), json!(2)]]).unwrap_err();
        assert_eq!(err.code(), "CRIT_DECODE_FAILED");
    }

    #[test]
    fn test_typed_accessors() {
        let t = table();
        let rows: Vec<_> = t.rows().collect();

        assert_eq!(rows[0].id("id").unwrap(), 1);
        assert_eq!(rows[0].text("name").unwrap(), "North");
        assert_eq!(rows[0].count("total").unwrap(), 12);
        assert_eq!(rows[2].count("total").unwrap(), 4);
    }

    #[test]
    fn test_null_count_is_zero() {
        let t = table();
        let row = t.rows().nth(1).unwrap();
        assert_eq!(row.count("total").unwrap(), 0);
        assert_eq!(row.text("name").unwrap(), "");
    }

    #[test]
    fn test_unknown_column() {
        let t = table();
        let row = t.rows().next().unwrap();
        let err = row.count("missing").unwrap_err();
        assert!(matches!(err, DashboardError::Decode { ref column, .. } if column == "missing"));
    }

    #[test]
    fn test_negative_and_fractional_counts_rejected() {
        let t = QueryTable::new(
            vec!["a".into(), "b".into()],
            vec![vec![json!(-1), json!(2.5)]],
        )
        .unwrap();
        let row = t.rows().next().unwrap();
        assert!(row.count("a").is_err());
        assert!(row.count("b").is_err());
    }
}
