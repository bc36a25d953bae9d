//! SELECT statement construction for the Jet/Access dialect.
//!
//! Every identifier is bracket-quoted, which keeps names containing
//! non-ASCII letters or reserved words (the schema has both) valid
//! without per-name special cases.

use crate::catalog::{TableSpec, ROW_ID_COLUMN};

/// Quote an identifier in the Access/Jet bracket style.
///
/// A literal `]` inside the name is doubled, the only escape the
/// dialect needs.
pub fn quote_ident(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

/// Build the SELECT statement for one catalog table.
///
/// Projects exactly the declared columns in declared order and, for
/// tables carrying the row identifier, appends an ascending ORDER BY on
/// it. The returned text is also what the dump echoes on its `EXEC:`
/// line.
pub fn build_select(table: &TableSpec) -> String {
    let cols = table
        .columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!("SELECT {} FROM {}", cols, quote_ident(table.name));
    if table.has_row_id {
        sql.push_str(&format!(" ORDER BY {}", quote_ident(ROW_ID_COLUMN)));
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SchemaCatalog;

    #[test]
    fn test_quote_ident_plain() {
        assert_eq!(quote_ident("Konton"), "[Konton]");
    }

    #[test]
    fn test_quote_ident_non_ascii() {
        assert_eq!(quote_ident("Överföringar"), "[Överföringar]");
        assert_eq!(quote_ident("Löpnr"), "[Löpnr]");
    }

    #[test]
    fn test_quote_ident_escapes_closing_bracket() {
        assert_eq!(quote_ident("odd]name"), "[odd]]name]");
    }

    #[test]
    fn test_select_without_order() {
        let table = TableSpec {
            name: "DtbVer",
            columns: &["VerNum", "Benämning", "Losenord"],
            has_row_id: false,
        };
        assert_eq!(
            build_select(&table),
            "SELECT [VerNum], [Benämning], [Losenord] FROM [DtbVer]"
        );
    }

    #[test]
    fn test_select_with_order() {
        let table = TableSpec {
            name: "Personer",
            columns: &["Namn", "Född", "Kön", "Löpnr"],
            has_row_id: true,
        };
        assert_eq!(
            build_select(&table),
            "SELECT [Namn], [Född], [Kön], [Löpnr] FROM [Personer] ORDER BY [Löpnr]"
        );
    }

    #[test]
    fn test_every_hogia_statement_is_bracketed() {
        for table in SchemaCatalog::hogia().tables() {
            let sql = build_select(table);
            assert!(sql.starts_with("SELECT ["), "{}", sql);
            assert!(sql.contains(&format!("FROM [{}]", table.name.replace(']', "]]"))));
            if table.has_row_id {
                assert!(sql.ends_with(" ORDER BY [Löpnr]"), "{}", sql);
            } else {
                assert!(!sql.contains("ORDER BY"), "{}", sql);
            }
        }
    }
}
