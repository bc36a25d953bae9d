//! Row scanning: driver cells into per-row records.
//!
//! Classification is total. Every [`SqlValue`] lands in exactly one
//! [`ColumnValue`] variant; variants the renderer has no representation
//! for are recorded as [`ColumnValue::Unhandled`] with their type name
//! rather than failing the row.

use crate::driver::ColumnInfo;
use crate::value::{ColumnValue, RowRecord, SqlValue};

/// Classify one driver cell into the closed render model.
///
/// Exact-width integers map through; 32-bit floats widen losslessly to
/// 64-bit. Everything else (i16, datetime, decimal) is out of set and
/// carries its type name as a diagnostic.
pub fn classify(value: SqlValue) -> ColumnValue {
    match value {
        SqlValue::Null => ColumnValue::Null,
        SqlValue::Bool(v) => ColumnValue::Boolean(v),
        SqlValue::I32(v) => ColumnValue::Integer32(v),
        SqlValue::I64(v) => ColumnValue::Integer64(v),
        SqlValue::F32(v) => ColumnValue::Float64(f64::from(v)),
        SqlValue::F64(v) => ColumnValue::Float64(v),
        SqlValue::Text(v) => ColumnValue::Text(v),
        SqlValue::Bytes(v) => ColumnValue::Binary(v),
        other @ (SqlValue::I16(_) | SqlValue::DateTime(_) | SqlValue::Decimal(_)) => {
            ColumnValue::Unhandled(other.type_name())
        }
    }
}

/// Build one [`RowRecord`] by pairing the cursor's reported columns with
/// one fetched row of cells.
///
/// The record is keyed by the cursor's column names, whatever order the
/// driver returned them in; the dumper re-reads it in schema order.
pub fn scan_row(columns: &[ColumnInfo], cells: Vec<SqlValue>) -> RowRecord {
    let fields = columns
        .iter()
        .zip(cells)
        .map(|(column, cell)| (column.name.clone(), classify(cell)))
        .collect();
    RowRecord::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;

    #[test]
    fn test_classify_in_set_variants() {
        assert_eq!(classify(SqlValue::Null), ColumnValue::Null);
        assert_eq!(classify(SqlValue::Bool(true)), ColumnValue::Boolean(true));
        assert_eq!(classify(SqlValue::I32(-7)), ColumnValue::Integer32(-7));
        assert_eq!(classify(SqlValue::I64(1 << 40)), ColumnValue::Integer64(1 << 40));
        assert_eq!(classify(SqlValue::F64(42.5)), ColumnValue::Float64(42.5));
        assert_eq!(
            classify(SqlValue::Text("it's".to_string())),
            ColumnValue::Text("it's".to_string())
        );
        assert_eq!(
            classify(SqlValue::Bytes(vec![0xC5, 0x72])),
            ColumnValue::Binary(vec![0xC5, 0x72])
        );
    }

    #[test]
    fn test_classify_widens_f32() {
        assert_eq!(classify(SqlValue::F32(1.5)), ColumnValue::Float64(1.5));
    }

    #[test]
    fn test_classify_out_of_set_variants() {
        assert_eq!(classify(SqlValue::I16(3)), ColumnValue::Unhandled("i16"));
        let dt = NaiveDateTime::parse_from_str("1997-03-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(classify(SqlValue::DateTime(dt)), ColumnValue::Unhandled("datetime"));
        assert_eq!(
            classify(SqlValue::Decimal(Decimal::new(125, 2))),
            ColumnValue::Unhandled("decimal")
        );
    }

    #[test]
    fn test_scan_row_pairs_names_with_cells() {
        let columns = vec![
            ColumnInfo::named("Namn"),
            ColumnInfo::named("Löpnr"),
        ];
        let row = scan_row(
            &columns,
            vec![SqlValue::Text("Anna".to_string()), SqlValue::I32(1)],
        );
        assert_eq!(row.value_of("Namn"), &ColumnValue::Text("Anna".to_string()));
        assert_eq!(row.value_of("Löpnr"), &ColumnValue::Integer32(1));
    }

    #[test]
    fn test_scan_row_unreported_column_reads_null() {
        let columns = vec![ColumnInfo::named("Namn")];
        let row = scan_row(&columns, vec![SqlValue::Text("Anna".to_string())]);
        assert_eq!(row.value_of("Löpnr"), &ColumnValue::Null);
    }
}
