//! Main binary entry point for ledgerbook.

use clap::{Parser, ValueEnum};
use ledgerbook::errors::StorageError;
use ledgerbook::formats::DataKind;
use ledgerbook::{Config, Operation};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The data file to operate on
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    #[arg(short, long, value_enum)]
    operation: Operation,

    /// Which collection the file holds; detected from the root element
    /// when omitted
    #[arg(short, long, value_enum)]
    kind: Option<CliKind>,

    /// Where `export` writes its JSON (defaults to the data file with a
    /// .json extension)
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliKind {
    #[value(name = "addressbook")]
    AddressBook,
    #[value(name = "expendituretracker")]
    ExpenditureTracker,
}

fn setup_logging(verbose: bool) {
    let filter_level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter(None, filter_level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_app() -> Result<(), StorageError> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let kind = cli.kind.map(|kind| match kind {
        CliKind::AddressBook => DataKind::AddressBook,
        CliKind::ExpenditureTracker => DataKind::ExpenditureTracker,
    });

    let config = Config {
        file: cli.file,
        operation: cli.operation,
        kind,
        output: cli.output,
    };

    ledgerbook::run(config)
}

fn main() -> ExitCode {
    match run_app() {
        Ok(_) => {
            log::info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("A fatal error occurred:");
            log::error!("{}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(s) = source {
                log::error!("  Caused by: {}", s);
                source = std::error::Error::source(s);
            }
            ExitCode::FAILURE
        }
    }
}
