//! hhek2txt CLI - dump a Hogia Hemekonomi database as readable text.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hhek2txt::{platform_driver, DumpError, Dumper, SchemaCatalog};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "hhek2txt")]
#[command(about = "Dump the tables of a Hogia Hemekonomi database as readable text")]
#[command(version)]
struct Cli {
    /// The Hemekonomi .mdb file to use as input
    #[arg(long, value_name = "FILE")]
    optin: PathBuf,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), DumpError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity);

    // Fail before touching the driver when the path cannot possibly be
    // a database file.
    if !cli.optin.is_file() {
        return Err(DumpError::Usage(format!(
            "input database {:?} is not a file; pass --optin <FILE>",
            cli.optin
        )));
    }

    let driver = platform_driver();
    let mut connection = driver.open(&cli.optin)?;
    info!("Opened database {:?}", cli.optin);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Dumper::new(SchemaCatalog::hogia(), &mut out).run(connection.as_mut())?;
    out.flush()?;

    Ok(())
}

/// Diagnostics go to stderr so the dump stream on stdout stays clean.
fn setup_logging(verbosity: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
