//! The fixed table catalog.
//!
//! Hogia Hemekonomi databases all share one hand-curated schema; nothing
//! is discovered at runtime. The catalog is built once at startup and
//! never mutated, and it is constructed explicitly rather than through
//! a global singleton.

/// The monotonic row-identifier column carried by most tables.
///
/// Rows are numbered in insertion order, so fetching in ascending
/// `Löpnr` order makes the dump deterministic.
pub const ROW_ID_COLUMN: &str = "Löpnr";

/// One table: its name and the projected columns, in output order.
///
/// The column sequence defines both the query projection and the order
/// fields are rendered in, independent of the order the driver returns
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Table name, preserved verbatim (several are non-ASCII).
    pub name: &'static str,

    /// Declared columns, in projection and output order.
    pub columns: &'static [&'static str],

    /// Whether the table carries [`ROW_ID_COLUMN`] and must be fetched
    /// in ascending order of it.
    pub has_row_id: bool,
}

/// Ordered, immutable set of tables to dump.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    tables: Vec<TableSpec>,
}

impl SchemaCatalog {
    /// Build a catalog from arbitrary table specs (dump order = slice order).
    pub fn new(tables: Vec<TableSpec>) -> Self {
        Self { tables }
    }

    /// The built-in Hogia Hemekonomi schema, in dump order.
    ///
    /// `DtbVer` is a single-row version record without `Löpnr`; every
    /// other table is fetched in ascending row-identifier order.
    pub fn hogia() -> Self {
        Self::new(HOGIA_TABLES.to_vec())
    }

    /// Tables in dump order.
    pub fn tables(&self) -> &[TableSpec] {
        &self.tables
    }

    /// Number of tables in the catalog.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

const HOGIA_TABLES: &[TableSpec] = &[
    TableSpec {
        name: "DtbVer",
        columns: &["VerNum", "Benämning", "Losenord"],
        has_row_id: false,
    },
    TableSpec {
        name: "Personer",
        columns: &["Namn", "Född", "Kön", "Löpnr"],
        has_row_id: true,
    },
    TableSpec {
        name: "BetalKonton",
        columns: &["Konto", "Kontonummer", "Kundnummer", "Sigillnummer", "Löpnr"],
        has_row_id: true,
    },
    TableSpec {
        name: "Betalningar",
        columns: &[
            "FrånKonto",
            "TillPlats",
            "Typ",
            "Datum",
            "Vad",
            "Vem",
            "Belopp",
            "Text",
            "Löpnr",
            "Ranta",
            "FastAmort",
            "RorligAmort",
            "OvrUtg",
            "LanLopnr",
            "Grey",
        ],
        has_row_id: true,
    },
    TableSpec {
        name: "Överföringar",
        columns: &[
            "FrånKonto",
            "TillKonto",
            "Belopp",
            "Datum",
            "HurOfta",
            "Vad",
            "Vem",
            "Löpnr",
            "Kontrollnr",
            "TillDatum",
            "Rakning",
        ],
        has_row_id: true,
    },
    TableSpec {
        name: "Konton",
        columns: &[
            "KontoNummer",
            "Benämning",
            "Saldo",
            "StartSaldo",
            "StartManad",
            "Löpnr",
            "SaldoArsskifte",
            "ArsskifteManad",
        ],
        has_row_id: true,
    },
    TableSpec {
        name: "LÅN",
        columns: &[
            "Langivare",
            "EgenBeskrivn",
            "LanNummer",
            "TotLanebelopp",
            "StartDatum",
            "RegDatum",
            "RantJustDatum",
            "SlutBetDatum",
            "AktLaneskuld",
            "RorligDel",
            "FastDel",
            "FastRanta",
            "RorligRanta",
            "HurOfta",
            "Ranta",
            "FastAmort",
            "RorligAmort",
            "OvrUtg",
            "Löpnr",
            "Rakning",
            "Vem",
            "FrånKonto",
            "Grey",
            "Anteckningar",
            "BudgetRanta",
            "BudgetAmort",
            "BudgetOvriga",
        ],
        has_row_id: true,
    },
    TableSpec {
        name: "Platser",
        columns: &["Namn", "Gironummer", "Typ", "RefKonto", "Löpnr"],
        has_row_id: true,
    },
    TableSpec {
        name: "Budget",
        columns: &[
            "Typ",
            "Inkomst",
            "HurOfta",
            "StartMånad",
            "Jan",
            "Feb",
            "Mar",
            "Apr",
            "Maj",
            "Jun",
            "Jul",
            "Aug",
            "Sep",
            "Okt",
            "Nov",
            "Dec",
            "Kontrollnr",
            "Löpnr",
        ],
        has_row_id: true,
    },
    TableSpec {
        name: "Transaktioner",
        columns: &[
            "FrånKonto",
            "TillKonto",
            "Typ",
            "Datum",
            "Vad",
            "Vem",
            "Belopp",
            "Löpnr",
            "Saldo",
            "Fastöverföring",
            "Text",
        ],
        has_row_id: true,
    },
];
