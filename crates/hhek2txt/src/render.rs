//! Field rendering: classified values into output lines.
//!
//! One rendered field is one `Key: <name> Value <kind>: <body>` line.
//! Text and binary bodies carry a quoted, SQL-escaped form plus a hex
//! dump of the underlying bytes, so the archival stream stays readable
//! and byte-accurate at the same time. Rendering is total; it never
//! fails.

use crate::encoding::decode_windows_1252;
use crate::hexdump;
use crate::value::ColumnValue;

/// One column's final output text.
///
/// Ephemeral: written to the stream as soon as it is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedField {
    /// Column name the field belongs to.
    pub column: String,

    /// Complete output text, hex-dump continuation lines included.
    pub text: String,
}

/// SQL-style escaping: double every apostrophe and every double-quote.
pub fn escape_sql_text(text: &str) -> String {
    text.replace('\'', "''").replace('"', "\"\"")
}

/// Render one value under its column name.
///
/// Text dumps its UTF-8 encoding; binary decodes through the legacy
/// codepage for the quoted form but dumps the original bytes.
pub fn render_field(column: &str, value: &ColumnValue) -> RenderedField {
    let body = match value {
        ColumnValue::Null => "NULL".to_string(),
        ColumnValue::Integer32(v) => v.to_string(),
        ColumnValue::Integer64(v) => v.to_string(),
        ColumnValue::Float64(v) => v.to_string(),
        ColumnValue::Boolean(v) => v.to_string(),
        ColumnValue::Text(v) => {
            format!("'{}' {}", escape_sql_text(v), hexdump::dump(v.as_bytes()))
        }
        ColumnValue::Binary(v) => {
            format!(
                "'{}' {}",
                escape_sql_text(&decode_windows_1252(v)),
                hexdump::dump(v)
            )
        }
        ColumnValue::Unhandled(type_name) => (*type_name).to_string(),
    };
    RenderedField {
        column: column.to_string(),
        text: format!("Key: {} Value {}: {}", column, value.kind(), body),
    }
}
