//! The dump engine: walks the catalog and writes the text stream.
//!
//! Per table: header line, the statement being run, one metadata line
//! per reported column, then every row as one rendered line per
//! declared column with a blank separator after it. A failed statement
//! or fetch aborts the whole run; partial output up to that point has
//! already been flushed.

use std::io::Write;

use tracing::{debug, info};

use crate::catalog::{SchemaCatalog, TableSpec};
use crate::driver::{ColumnInfo, Connection};
use crate::error::Result;
use crate::query;
use crate::render;
use crate::scan;

/// Dumps every catalog table through one connection to one stream.
pub struct Dumper<W: Write> {
    catalog: SchemaCatalog,
    out: W,
}

impl<W: Write> Dumper<W> {
    /// Create a dumper writing to `out`.
    pub fn new(catalog: SchemaCatalog, out: W) -> Self {
        Self { catalog, out }
    }

    /// Dump all tables in catalog order.
    ///
    /// # Errors
    ///
    /// The first failed statement, fetch, or stream write aborts the
    /// run and is returned as is.
    pub fn run(mut self, connection: &mut dyn Connection) -> Result<()> {
        for table in self.catalog.tables() {
            dump_table(&mut self.out, connection, table)?;
        }
        info!("dumped {} tables", self.catalog.len());
        Ok(())
    }
}

fn dump_table(
    out: &mut impl Write,
    connection: &mut dyn Connection,
    table: &TableSpec,
) -> Result<()> {
    info!("dumping table {}", table.name);
    writeln!(out, "Dump Table: {}", table.name)?;

    let sql = query::build_select(table);
    writeln!(out, "EXEC: {sql}")?;

    let mut cursor = connection.query(table.name, &sql)?;
    let columns = cursor.columns().to_vec();
    for column in &columns {
        writeln!(out, "{}", metadata_line(column))?;
    }

    let mut row_count = 0usize;
    while let Some(cells) = cursor.next_row()? {
        let row = scan::scan_row(&columns, cells);
        for &column in table.columns {
            let field = render::render_field(column, row.value_of(column));
            writeln!(out, "{}", field.text)?;
        }
        writeln!(out)?;
        row_count += 1;
    }
    debug!("table {} produced {row_count} rows", table.name);
    Ok(())
}

fn metadata_line(column: &ColumnInfo) -> String {
    let decimal = match column.decimal {
        Some((precision, scale)) => format!("{precision},{scale}"),
        None => "-".to_string(),
    };
    let length = column.length.map_or_else(|| "-".to_string(), |l| l.to_string());
    let nullable = column.nullable.map_or_else(|| "-".to_string(), |n| n.to_string());
    format!(
        "COLNAME: {} DBTYP: {} DEC: {} LEN: {} NULLABLE: {}",
        column.name, column.db_type, decimal, length, nullable
    )
}
