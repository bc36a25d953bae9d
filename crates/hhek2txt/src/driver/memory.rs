//! In-process driver over hand-built tables.
//!
//! Serves the engine's integration tests and any embedded caller that
//! already holds its rows. The driver honors the statements the engine
//! actually issues: the SELECT projection decides which stored columns
//! the cursor reports, and an `ORDER BY` clause sorts rows on the named
//! column. Stored column layout is preserved otherwise, so a table can
//! deliberately disagree with the schema's declared order.

use std::path::Path;

use crate::driver::{ColumnInfo, Connection, Cursor, Driver};
use crate::error::{DumpError, Result};
use crate::value::SqlValue;

/// One in-memory table: stored column layout plus rows.
#[derive(Debug, Clone)]
pub struct MemoryTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<SqlValue>>,
}

impl MemoryTable {
    /// Create an empty table with the given stored column layout.
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append one row; cells align with the stored column layout.
    #[must_use]
    pub fn with_row(mut self, cells: Vec<SqlValue>) -> Self {
        self.rows.push(cells);
        self
    }
}

/// Driver over a fixed set of [`MemoryTable`]s.
///
/// `open` ignores the path; the connection sees whatever tables the
/// driver was built with.
#[derive(Debug, Default, Clone)]
pub struct MemoryDriver {
    tables: Vec<MemoryTable>,
}

impl MemoryDriver {
    /// An empty driver; add tables with [`MemoryDriver::with_table`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one table.
    #[must_use]
    pub fn with_table(mut self, table: MemoryTable) -> Self {
        self.tables.push(table);
        self
    }
}

impl Driver for MemoryDriver {
    fn open(&self, _path: &Path) -> Result<Box<dyn Connection>> {
        Ok(Box::new(MemoryConnection {
            tables: self.tables.clone(),
        }))
    }
}

struct MemoryConnection {
    tables: Vec<MemoryTable>,
}

impl Connection for MemoryConnection {
    fn query(&mut self, table: &str, sql: &str) -> Result<Box<dyn Cursor + '_>> {
        let stored = self
            .tables
            .iter()
            .find(|t| t.name == table)
            .ok_or_else(|| DumpError::query(table, "no such table"))?;

        // Report stored columns restricted to the statement's projection;
        // a requested column the table never stored simply goes missing
        // from the result, like a driver that cannot resolve it.
        let projection = parse_projection(sql);
        let positions: Vec<usize> = match &projection {
            Some(requested) => requested
                .iter()
                .filter_map(|name| stored.columns.iter().position(|c| c == name))
                .collect(),
            None => (0..stored.columns.len()).collect(),
        };
        let mut positions_in_stored_order = positions;
        positions_in_stored_order.sort_unstable();

        let mut rows: Vec<Vec<SqlValue>> = stored
            .rows
            .iter()
            .map(|row| {
                positions_in_stored_order
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(SqlValue::Null))
                    .collect()
            })
            .collect();

        let columns: Vec<ColumnInfo> = positions_in_stored_order
            .iter()
            .enumerate()
            .map(|(result_index, &stored_index)| {
                let mut info = ColumnInfo::named(stored.columns[stored_index].clone());
                if let Some(value) = rows
                    .iter()
                    .map(|row| &row[result_index])
                    .find(|v| !v.is_null())
                {
                    info.db_type = value.type_name().to_string();
                }
                info
            })
            .collect();

        if let Some(order_column) = parse_order_by(sql) {
            if let Some(key_index) = columns.iter().position(|c| c.name == order_column) {
                rows.sort_by_key(|row| sort_rank(&row[key_index]));
            }
        }

        Ok(Box::new(MemoryCursor {
            columns,
            rows: rows.into_iter(),
        }))
    }
}

struct MemoryCursor {
    columns: Vec<ColumnInfo>,
    rows: std::vec::IntoIter<Vec<SqlValue>>,
}

impl Cursor for MemoryCursor {
    fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Vec<SqlValue>>> {
        Ok(self.rows.next())
    }
}

/// Column names between `SELECT ` and ` FROM `, brackets stripped.
fn parse_projection(sql: &str) -> Option<Vec<String>> {
    let rest = sql.strip_prefix("SELECT ")?;
    let (list, _) = rest.split_once(" FROM ")?;
    Some(list.split(", ").map(unquote).collect())
}

/// The ordering column of a trailing `ORDER BY` clause, if any.
fn parse_order_by(sql: &str) -> Option<String> {
    let (_, clause) = sql.rsplit_once(" ORDER BY ")?;
    Some(unquote(clause))
}

fn unquote(ident: &str) -> String {
    ident
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .map_or_else(|| ident.to_string(), |s| s.replace("]]", "]"))
}

/// Ascending sort rank for row-identifier cells; non-numeric values
/// keep their insertion order at the front.
fn sort_rank(value: &SqlValue) -> i64 {
    match value {
        SqlValue::I16(v) => i64::from(*v),
        SqlValue::I32(v) => i64::from(*v),
        SqlValue::I64(v) => *v,
        _ => i64::MIN,
    }
}
