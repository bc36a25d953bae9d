//! # hhek2txt
//!
//! Dump engine for Hogia Hemekonomi databases: extracts the full
//! contents of the program's fixed table set from an MS Access/Jet
//! `.mdb` file and renders every row as a deterministic, human-readable
//! text stream for debugging and archival inspection.
//!
//! The pieces:
//!
//! - **Fixed catalog** of the ten Hogia tables, dumped in a stable order
//! - **Deterministic statements** with bracket-quoted identifiers and
//!   ascending row-identifier ordering
//! - **Typed value model** so every cell lands in exactly one rendered
//!   shape, unknown types degrading to a diagnostic marker
//! - **Legacy decoding** of Windows-1252 text plus hex dumps of the
//!   underlying bytes
//! - **Pluggable drivers**: in-memory for tests and embedded use, ODBC
//!   (cargo feature `odbc`) for real databases
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use hhek2txt::{platform_driver, Driver, Dumper, SchemaCatalog};
//!
//! fn main() -> hhek2txt::Result<()> {
//!     let driver = platform_driver();
//!     let mut connection = driver.open(Path::new("hemekonomi.mdb"))?;
//!     let dumper = Dumper::new(SchemaCatalog::hogia(), std::io::stdout().lock());
//!     dumper.run(connection.as_mut())?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod driver;
pub mod dump;
pub mod encoding;
pub mod error;
pub mod hexdump;
pub mod query;
pub mod render;
pub mod scan;
pub mod value;

// Re-exports for convenient access
pub use catalog::{SchemaCatalog, TableSpec, ROW_ID_COLUMN};
pub use driver::memory::{MemoryDriver, MemoryTable};
pub use driver::{platform_driver, ColumnInfo, Connection, Cursor, Driver};
pub use dump::Dumper;
pub use error::{DumpError, Result};
pub use value::{ColumnValue, RowRecord, SqlValue};
