//! ODBC binding to the Microsoft Access driver.
//!
//! **Requirements:**
//! - The `odbc` feature must be enabled
//! - An ODBC driver for Access/Jet must be installed:
//!   - Windows: `Microsoft Access Driver (*.mdb, *.accdb)` ships with
//!     Office or the Access Database Engine redistributable
//!   - Linux: `apt install odbc-mdbtools`
//!
//! Result sets are buffered as text and converted per column type, the
//! only row shape the driver manager hands out portably. Narrow CHAR
//! data arrives in the database's ANSI codepage and is surfaced as raw
//! bytes, which keeps the legacy decoding in the rendering layer.

use std::path::Path;

use odbc_api::{
    buffers::TextRowSet, ColumnDescription, ConnectionOptions, Cursor as _, DataType, Environment,
    Nullability, ResultSetMetadata as _,
};
use tracing::{debug, warn};

use crate::driver::{ColumnInfo, Connection, Cursor, Driver};
use crate::error::{DumpError, Result};
use crate::value::SqlValue;

/// Rows fetched per batch.
const BATCH_ROWS: usize = 250;

/// Per-cell text buffer cap. Memo columns can exceed it; a cell that
/// fills its buffer is logged as possibly truncated.
const MAX_TEXT_BYTES: usize = 65_536;

/// Driver over the platform's Access ODBC binding.
#[derive(Debug, Default)]
pub struct OdbcDriver;

impl OdbcDriver {
    pub fn new() -> Self {
        Self
    }
}

fn access_connection_string(path: &Path) -> String {
    format!(
        "Driver={{Microsoft Access Driver (*.mdb, *.accdb)}};Dbq={};",
        path.display()
    )
}

impl Driver for OdbcDriver {
    fn open(&self, path: &Path) -> Result<Box<dyn Connection>> {
        let env = Environment::new().map_err(|e| {
            DumpError::connect(
                path,
                format!(
                    "failed to create the ODBC environment: {e}. \
                     Make sure an ODBC driver manager is installed \
                     (built in on Windows, unixODBC on Linux)."
                ),
            )
        })?;

        let connection_string = access_connection_string(path);
        debug!("ODBC connection string: {connection_string}");

        // Probe the connection in a scope so it is dropped before the
        // environment moves into the returned connection.
        {
            env.connect_with_connection_string(&connection_string, ConnectionOptions::default())
                .map_err(|e| {
                    DumpError::connect(
                        path,
                        format!(
                            "{e}. Make sure the Microsoft Access ODBC driver is \
                             installed (odbc-mdbtools on Linux)."
                        ),
                    )
                })?;
        }

        Ok(Box::new(OdbcConnection {
            env,
            connection_string,
        }))
    }
}

struct OdbcConnection {
    env: Environment,
    connection_string: String,
}

impl Connection for OdbcConnection {
    fn query(&mut self, table: &str, sql: &str) -> Result<Box<dyn Cursor + '_>> {
        let conn = self
            .env
            .connect_with_connection_string(&self.connection_string, ConnectionOptions::default())
            .map_err(|e| DumpError::query(table, format!("ODBC connection failed: {e}")))?;

        let Some(mut cursor) = conn
            .execute(sql, ())
            .map_err(|e| DumpError::query(table, format!("{e} - SQL: {sql}")))?
        else {
            // Statement produced no result set.
            return Ok(Box::new(MaterializedCursor {
                columns: Vec::new(),
                rows: Vec::new().into_iter(),
            }));
        };

        let num_cols = cursor
            .num_result_cols()
            .map_err(|e| DumpError::query(table, format!("failed to get column count: {e}")))?
            .max(0) as u16;

        let mut columns = Vec::with_capacity(num_cols as usize);
        let mut data_types = Vec::with_capacity(num_cols as usize);
        for index in 1..=num_cols {
            let mut description = ColumnDescription::default();
            cursor
                .describe_col(index, &mut description)
                .map_err(|e| DumpError::query(table, format!("failed to describe column {index}: {e}")))?;
            columns.push(column_info(&description));
            data_types.push(description.data_type);
        }

        let mut buffers = TextRowSet::for_cursor(BATCH_ROWS, &mut cursor, Some(MAX_TEXT_BYTES))
            .map_err(|e| DumpError::query(table, format!("failed to create row buffer: {e}")))?;
        let mut row_cursor = cursor
            .bind_buffer(&mut buffers)
            .map_err(|e| DumpError::query(table, format!("failed to bind buffer: {e}")))?;

        let mut rows = Vec::new();
        while let Some(batch) = row_cursor
            .fetch()
            .map_err(|e| DumpError::fetch(table, e.to_string()))?
        {
            for row_index in 0..batch.num_rows() {
                let mut cells = Vec::with_capacity(data_types.len());
                for (col_index, data_type) in data_types.iter().enumerate() {
                    let bytes = batch.at(col_index, row_index);
                    if cell_fills_buffer(bytes) {
                        warn!(
                            "column {} in table {table} filled the {MAX_TEXT_BYTES} byte cell buffer; the value may be truncated",
                            columns[col_index].name
                        );
                    }
                    cells.push(convert_cell(bytes, *data_type));
                }
                rows.push(cells);
            }
        }
        debug!("fetched {} rows from {table}", rows.len());

        Ok(Box::new(MaterializedCursor {
            columns,
            rows: rows.into_iter(),
        }))
    }
}

struct MaterializedCursor {
    columns: Vec<ColumnInfo>,
    rows: std::vec::IntoIter<Vec<SqlValue>>,
}

impl Cursor for MaterializedCursor {
    fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Vec<SqlValue>>> {
        Ok(self.rows.next())
    }
}

fn column_info(description: &ColumnDescription) -> ColumnInfo {
    let (db_type, decimal, length) = describe_data_type(description.data_type);
    ColumnInfo {
        name: description.name_to_string().unwrap_or_default(),
        db_type: db_type.to_string(),
        decimal,
        length,
        nullable: match description.nullability {
            Nullability::Nullable => Some(true),
            Nullability::NoNulls => Some(false),
            Nullability::Unknown => None,
        },
    }
}

fn describe_data_type(data_type: DataType) -> (&'static str, Option<(u32, i16)>, Option<usize>) {
    let size = |length: Option<std::num::NonZeroUsize>| length.map(std::num::NonZeroUsize::get);
    match data_type {
        DataType::Unknown => ("UNKNOWN", None, None),
        DataType::Char { length } => ("CHAR", None, size(length)),
        DataType::WChar { length } => ("WCHAR", None, size(length)),
        DataType::Varchar { length } => ("VARCHAR", None, size(length)),
        DataType::WVarchar { length } => ("WVARCHAR", None, size(length)),
        DataType::LongVarchar { length } => ("LONGVARCHAR", None, size(length)),
        DataType::Numeric { precision, scale } => ("NUMERIC", Some((precision as u32, scale)), None),
        DataType::Decimal { precision, scale } => ("DECIMAL", Some((precision as u32, scale)), None),
        DataType::Integer => ("INTEGER", None, None),
        DataType::SmallInt => ("SMALLINT", None, None),
        DataType::TinyInt => ("TINYINT", None, None),
        DataType::BigInt => ("BIGINT", None, None),
        DataType::Real => ("REAL", None, None),
        DataType::Float { .. } => ("FLOAT", None, None),
        DataType::Double => ("DOUBLE", None, None),
        DataType::Bit => ("BIT", None, None),
        DataType::Date => ("DATE", None, None),
        DataType::Time { .. } => ("TIME", None, None),
        DataType::Timestamp { .. } => ("TIMESTAMP", None, None),
        DataType::Binary { length } => ("BINARY", None, size(length)),
        DataType::Varbinary { length } => ("VARBINARY", None, size(length)),
        DataType::LongVarbinary { length } => ("LONGVARBINARY", None, size(length)),
        DataType::Other { column_size, .. } => ("OTHER", None, size(column_size)),
        _ => ("OTHER", None, None),
    }
}

/// A cell that occupies its whole buffer may have been cut off at
/// [`MAX_TEXT_BYTES`] by the driver.
fn cell_fills_buffer(bytes: Option<&[u8]>) -> bool {
    bytes.map_or(false, |b| b.len() >= MAX_TEXT_BYTES)
}

/// Convert one buffered text cell to a value, guided by the column type.
fn convert_cell(bytes: Option<&[u8]>, data_type: DataType) -> SqlValue {
    let Some(bytes) = bytes else {
        return SqlValue::Null;
    };
    let text = || String::from_utf8_lossy(bytes);

    match data_type {
        DataType::Bit => match text().as_ref() {
            "1" | "true" | "True" | "TRUE" => SqlValue::Bool(true),
            "0" | "false" | "False" | "FALSE" => SqlValue::Bool(false),
            other => SqlValue::Bool(other.parse().unwrap_or(false)),
        },
        DataType::TinyInt | DataType::SmallInt => text()
            .parse::<i16>()
            .map(SqlValue::I16)
            .unwrap_or(SqlValue::Null),
        DataType::Integer => text()
            .parse::<i32>()
            .map(SqlValue::I32)
            .unwrap_or(SqlValue::Null),
        DataType::BigInt => text()
            .parse::<i64>()
            .map(SqlValue::I64)
            .unwrap_or(SqlValue::Null),
        DataType::Real => text()
            .parse::<f32>()
            .map(SqlValue::F32)
            .unwrap_or(SqlValue::Null),
        DataType::Float { .. } | DataType::Double => text()
            .parse::<f64>()
            .map(SqlValue::F64)
            .unwrap_or(SqlValue::Null),
        DataType::Numeric { .. } | DataType::Decimal { .. } => {
            let cleaned = text().replace(['$', ','], "");
            rust_decimal::Decimal::from_str_exact(&cleaned)
                .or_else(|_| cleaned.parse::<rust_decimal::Decimal>())
                .map(SqlValue::Decimal)
                .unwrap_or(SqlValue::Null)
        }
        DataType::Timestamp { .. } | DataType::Date | DataType::Time { .. } => {
            parse_datetime(text().as_ref())
                .map(SqlValue::DateTime)
                .unwrap_or_else(|| SqlValue::Text(text().into_owned()))
        }
        // Narrow character data stays raw so the renderer can decode it
        // from the legacy codepage.
        DataType::Char { .. } | DataType::Varchar { .. } | DataType::LongVarchar { .. } => {
            SqlValue::Bytes(bytes.to_vec())
        }
        DataType::WChar { .. } | DataType::WVarchar { .. } => {
            SqlValue::Text(text().into_owned())
        }
        DataType::Binary { .. } | DataType::Varbinary { .. } | DataType::LongVarbinary { .. } => {
            // The text buffer carries binary columns hex-encoded.
            let owned = text().into_owned();
            let hex_str = owned
                .strip_prefix("0x")
                .or_else(|| owned.strip_prefix("0X"))
                .unwrap_or(&owned);
            hex::decode(hex_str)
                .map(SqlValue::Bytes)
                .unwrap_or_else(|_| SqlValue::Bytes(bytes.to_vec()))
        }
        _ => SqlValue::Bytes(bytes.to_vec()),
    }
}

/// ODBC renders timestamps as `2023-01-15 10:30:45.123`; Jet sometimes
/// hands back the date alone.
fn parse_datetime(s: &str) -> Option<chrono::NaiveDateTime> {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_access_connection_string() {
        assert_eq!(
            access_connection_string(Path::new("hem.mdb")),
            "Driver={Microsoft Access Driver (*.mdb, *.accdb)};Dbq=hem.mdb;"
        );
    }

    #[test]
    fn test_convert_null() {
        assert_eq!(convert_cell(None, DataType::Integer), SqlValue::Null);
    }

    #[test]
    fn test_convert_integers() {
        assert_eq!(
            convert_cell(Some(b"42"), DataType::Integer),
            SqlValue::I32(42)
        );
        assert_eq!(
            convert_cell(Some(b"-7"), DataType::SmallInt),
            SqlValue::I16(-7)
        );
        assert_eq!(
            convert_cell(Some(b"nonsense"), DataType::Integer),
            SqlValue::Null
        );
    }

    #[test]
    fn test_convert_bit() {
        assert_eq!(convert_cell(Some(b"1"), DataType::Bit), SqlValue::Bool(true));
        assert_eq!(convert_cell(Some(b"0"), DataType::Bit), SqlValue::Bool(false));
    }

    #[test]
    fn test_convert_currency() {
        let value = convert_cell(Some(b"1,234.56"), DataType::Numeric { precision: 19, scale: 4 });
        match value {
            SqlValue::Decimal(d) => assert_eq!(d.to_string(), "1234.56"),
            other => panic!("expected Decimal, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_timestamp() {
        let value = convert_cell(
            Some(b"1997-03-01 00:00:00"),
            DataType::Timestamp { precision: 0 },
        );
        match value {
            SqlValue::DateTime(dt) => {
                assert_eq!(dt.year(), 1997);
                assert_eq!(dt.month(), 3);
                assert_eq!(dt.hour(), 0);
            }
            other => panic!("expected DateTime, got {other:?}"),
        }
    }

    #[test]
    fn test_narrow_char_stays_raw() {
        let value = convert_cell(Some(&[0xC5, 0x73, 0x61]), DataType::Varchar { length: None });
        assert_eq!(value, SqlValue::Bytes(vec![0xC5, 0x73, 0x61]));
    }

    #[test]
    fn test_wide_char_is_text() {
        let value = convert_cell(Some("Åsa".as_bytes()), DataType::WVarchar { length: None });
        assert_eq!(value, SqlValue::Text("Åsa".to_string()));
    }

    #[test]
    fn test_binary_is_hex_decoded() {
        let value = convert_cell(Some(b"0xDEADBEEF"), DataType::Varbinary { length: None });
        assert_eq!(value, SqlValue::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF]));
    }

    #[test]
    fn test_cell_filling_its_buffer_is_flagged_as_truncated() {
        let full = vec![0x41u8; MAX_TEXT_BYTES];
        assert!(cell_fills_buffer(Some(&full)));
    }

    #[test]
    fn test_shorter_cells_and_nulls_are_not_flagged() {
        let short = vec![0x41u8; MAX_TEXT_BYTES - 1];
        assert!(!cell_fills_buffer(Some(&short)));
        assert!(!cell_fills_buffer(None));
    }

    #[test]
    fn test_describe_sized_type() {
        let (name, decimal, length) = describe_data_type(DataType::Varchar {
            length: std::num::NonZeroUsize::new(50),
        });
        assert_eq!(name, "VARCHAR");
        assert_eq!(decimal, None);
        assert_eq!(length, Some(50));
    }

    #[test]
    fn test_describe_decimal_type() {
        let (name, decimal, length) =
            describe_data_type(DataType::Decimal { precision: 19, scale: 4 });
        assert_eq!(name, "DECIMAL");
        assert_eq!(decimal, Some((19, 4)));
        assert_eq!(length, None);
    }
}
