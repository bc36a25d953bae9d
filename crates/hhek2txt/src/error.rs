//! Error types for the dump library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for dump operations.
#[derive(Error, Debug)]
pub enum DumpError {
    /// Invalid invocation (missing or unusable input path).
    #[error("usage error: {0}")]
    Usage(String),

    /// The external database could not be opened.
    #[error("cannot open database {path:?}: {message}")]
    Connect { path: PathBuf, message: String },

    /// A statement failed to execute against the open connection.
    #[error("query failed for table {table}: {message}")]
    Query { table: String, message: String },

    /// The cursor reported a fetch or decoding error mid-table.
    #[error("row fetch failed for table {table}: {message}")]
    Fetch { table: String, message: String },

    /// Output stream error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DumpError {
    /// Create a Connect error for the given database path.
    pub fn connect(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DumpError::Connect {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a Query error scoped to a table.
    pub fn query(table: impl Into<String>, message: impl Into<String>) -> Self {
        DumpError::Query {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a Fetch error scoped to a table.
    pub fn fetch(table: impl Into<String>, message: impl Into<String>) -> Self {
        DumpError::Fetch {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Process exit code for this error class.
    ///
    /// Usage errors exit 2 (matching the argument parser), connection
    /// failures exit 3, every later fatal error exits 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            DumpError::Usage(_) => 2,
            DumpError::Connect { .. } => 3,
            DumpError::Query { .. } | DumpError::Fetch { .. } | DumpError::Io(_) => 1,
        }
    }

    /// Format error with full details including error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for dump operations.
pub type Result<T> = std::result::Result<T, DumpError>;
