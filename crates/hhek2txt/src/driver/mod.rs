//! Connectivity layer: the seam between the dump engine and a database.
//!
//! The engine needs exactly four operations: open a database file, run
//! one statement, read the result's column metadata, and pull rows one
//! at a time. Everything is blocking and single-cursor; releasing a
//! cursor or connection is its `Drop`.
//!
//! Two implementations ship: [`memory::MemoryDriver`] for tests and
//! embedded use, and an ODBC binding to the Microsoft Access driver
//! behind the `odbc` cargo feature.

use std::path::Path;

use crate::error::{DumpError, Result};
use crate::value::SqlValue;

pub mod memory;
#[cfg(feature = "odbc")]
pub mod odbc;

/// Metadata for one projected column, as reported by a cursor.
///
/// Drivers fill in what they know; `None` (and `"-"` for the type name)
/// stands for metadata the driver does not report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name as the driver reports it.
    pub name: String,

    /// Database type name, `"-"` when unreported.
    pub db_type: String,

    /// Decimal precision and scale, for exact-numeric columns.
    pub decimal: Option<(u32, i16)>,

    /// Declared length, for sized columns.
    pub length: Option<usize>,

    /// Whether the column admits NULL, when the driver knows.
    pub nullable: Option<bool>,
}

impl ColumnInfo {
    /// A column known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            db_type: "-".to_string(),
            decimal: None,
            length: None,
            nullable: None,
        }
    }
}

/// Opens connections to database files.
pub trait Driver {
    /// Open the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::Connect`] when the file cannot be opened as
    /// a database.
    fn open(&self, path: &Path) -> Result<Box<dyn Connection>>;
}

/// One open database, executing one statement at a time.
pub trait Connection {
    /// Execute `sql` against `table` and return a cursor over its rows.
    ///
    /// The table name is carried for error attribution; the statement
    /// text is authoritative for what actually runs.
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::Query`] when the statement fails.
    fn query(&mut self, table: &str, sql: &str) -> Result<Box<dyn Cursor + '_>>;
}

/// A statement's result set, advanced one row at a time.
pub trait Cursor {
    /// Metadata for the projected columns, in result order.
    fn columns(&self) -> &[ColumnInfo];

    /// Fetch the next row, `None` when the result set is exhausted.
    ///
    /// Cells align positionally with [`Cursor::columns`].
    ///
    /// # Errors
    ///
    /// Returns [`DumpError::Fetch`] when the driver fails mid-result.
    fn next_row(&mut self) -> Result<Option<Vec<SqlValue>>>;
}

/// Placeholder driver for builds without a database binding.
///
/// Opening anything through it reports the connection-error path, so
/// the CLI behaves identically whether the ODBC feature is missing or
/// the platform driver is.
pub struct UnavailableDriver;

impl Driver for UnavailableDriver {
    fn open(&self, path: &Path) -> Result<Box<dyn Connection>> {
        Err(DumpError::connect(
            path,
            "no database driver compiled in; rebuild with the odbc feature enabled",
        ))
    }
}

/// The driver this build can reach the platform database with.
#[cfg(feature = "odbc")]
pub fn platform_driver() -> Box<dyn Driver> {
    Box::new(odbc::OdbcDriver::new())
}

/// The driver this build can reach the platform database with.
#[cfg(not(feature = "odbc"))]
pub fn platform_driver() -> Box<dyn Driver> {
    Box::new(UnavailableDriver)
}
