//! Value models for type-safe row handling.
//!
//! Two layers: [`SqlValue`] is what the data-access layer populates, one
//! variant per shape a Jet provider can hand back; [`ColumnValue`] is the
//! closed set the renderer knows how to print. The gap between the two is
//! deliberate: anything outside the closed set degrades to a diagnostic
//! marker instead of failing the dump.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// A database cell as reported by a driver.
///
/// Values are owned; a row is materialized once, rendered, and dropped,
/// so there is nothing to borrow from.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL cell.
    Null,

    /// Boolean flag (Jet YESNO).
    Bool(bool),

    /// 16-bit signed integer (Jet SMALLINT).
    I16(i16),

    /// 32-bit signed integer (Jet LONG).
    I32(i32),

    /// 64-bit signed integer.
    I64(i64),

    /// 32-bit floating point (Jet SINGLE).
    F32(f32),

    /// 64-bit floating point (Jet DOUBLE).
    F64(f64),

    /// Text already decoded to UTF-8 by the driver.
    Text(String),

    /// Raw bytes in the database's legacy codepage.
    Bytes(Vec<u8>),

    /// Timestamp without timezone (Jet DATETIME).
    DateTime(NaiveDateTime),

    /// Fixed-point value (Jet CURRENCY).
    Decimal(Decimal),
}

impl SqlValue {
    /// Stable type name, used verbatim in diagnostics for values the
    /// renderer has no representation for.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Bool(_) => "bool",
            SqlValue::I16(_) => "i16",
            SqlValue::I32(_) => "i32",
            SqlValue::I64(_) => "i64",
            SqlValue::F32(_) => "f32",
            SqlValue::F64(_) => "f64",
            SqlValue::Text(_) => "text",
            SqlValue::Bytes(_) => "bytes",
            SqlValue::DateTime(_) => "datetime",
            SqlValue::Decimal(_) => "decimal",
        }
    }

    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

// From implementations for common types
impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        SqlValue::I16(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::I32(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        SqlValue::F32(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::F64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(v)
    }
}

impl From<&[u8]> for SqlValue {
    fn from(v: &[u8]) -> Self {
        SqlValue::Bytes(v.to_vec())
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(v: NaiveDateTime) -> Self {
        SqlValue::DateTime(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

/// A cell after classification: the closed set the renderer prints.
///
/// Produced fresh per cell per row and discarded after rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// Absent value.
    Null,

    /// 32-bit signed integer.
    Integer32(i32),

    /// 64-bit signed integer.
    Integer64(i64),

    /// 64-bit float (narrower floats are widened on classification).
    Float64(f64),

    /// Boolean flag.
    Boolean(bool),

    /// UTF-8 text.
    Text(String),

    /// Raw legacy-codepage bytes.
    Binary(Vec<u8>),

    /// A driver value outside the closed set, carrying its type name.
    Unhandled(&'static str),
}

impl ColumnValue {
    /// The kind label printed between `Value` and `:` on an output line.
    ///
    /// NULL has no kind, so its line reads `Value : NULL`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ColumnValue::Null => "",
            ColumnValue::Integer32(_) => "int32",
            ColumnValue::Integer64(_) => "int64",
            ColumnValue::Float64(_) => "f64",
            ColumnValue::Boolean(_) => "BOOL",
            ColumnValue::Text(_) => "String",
            ColumnValue::Binary(_) => "uint8string",
            ColumnValue::Unhandled(_) => "Unhandled Type",
        }
    }
}

/// One row's column-name to value mapping.
///
/// Rebuilt for every fetched row, never aliased across rows. Rows are a
/// handful of columns, so lookups walk the pairs in place.
#[derive(Debug, Clone, Default)]
pub struct RowRecord {
    fields: Vec<(String, ColumnValue)>,
}

impl RowRecord {
    /// Create a record from (column, value) pairs.
    pub fn new(fields: Vec<(String, ColumnValue)>) -> Self {
        Self { fields }
    }

    /// Look up a column's value; columns the cursor never produced
    /// read as NULL.
    #[must_use]
    pub fn value_of(&self, column: &str) -> &ColumnValue {
        static NULL: ColumnValue = ColumnValue::Null;
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map_or(&NULL, |(_, value)| value)
    }

    /// Number of columns the cursor produced for this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the cursor produced no columns at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(SqlValue::Null.type_name(), "null");
        assert_eq!(SqlValue::I16(7).type_name(), "i16");
        assert_eq!(SqlValue::Decimal(Decimal::new(1250, 2)).type_name(), "decimal");
        let dt = NaiveDateTime::parse_from_str("1997-03-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(SqlValue::DateTime(dt).type_name(), "datetime");
    }

    #[test]
    fn test_is_null() {
        assert!(SqlValue::Null.is_null());
        assert!(!SqlValue::I32(42).is_null());
    }

    #[test]
    fn test_from_implementations() {
        let v: SqlValue = 42i32.into();
        assert_eq!(v, SqlValue::I32(42));

        let v: SqlValue = "hello".into();
        assert_eq!(v, SqlValue::Text("hello".to_string()));

        let v: SqlValue = vec![0x41u8, 0x42].into();
        assert_eq!(v, SqlValue::Bytes(vec![0x41, 0x42]));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ColumnValue::Null.kind(), "");
        assert_eq!(ColumnValue::Integer32(1).kind(), "int32");
        assert_eq!(ColumnValue::Integer64(1).kind(), "int64");
        assert_eq!(ColumnValue::Float64(1.0).kind(), "f64");
        assert_eq!(ColumnValue::Boolean(true).kind(), "BOOL");
        assert_eq!(ColumnValue::Text(String::new()).kind(), "String");
        assert_eq!(ColumnValue::Binary(Vec::new()).kind(), "uint8string");
        assert_eq!(ColumnValue::Unhandled("datetime").kind(), "Unhandled Type");
    }

    #[test]
    fn test_row_record_lookup() {
        let row = RowRecord::new(vec![
            ("Namn".to_string(), ColumnValue::Text("Anna".to_string())),
            ("Löpnr".to_string(), ColumnValue::Integer32(3)),
        ]);
        assert_eq!(row.value_of("Löpnr"), &ColumnValue::Integer32(3));
        assert_eq!(row.value_of("Saknas"), &ColumnValue::Null);
        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
    }
}
