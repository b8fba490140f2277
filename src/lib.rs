//! Diagcat: an interactive catalog for bounding-box annotation XML.
//!
//! Diagcat loads Pascal VOC style annotation files into an in-memory
//! catalog and answers queries over them: lookup by name, search by object
//! type, search by canvas size and object flags, and aggregate statistics.
//!
//! # Modules
//!
//! - [`model`]: Diagram and object records, plus the XML loader
//! - [`catalog`]: The name-keyed store of loaded diagrams
//! - [`query`]: Name, type and dimension searches
//! - [`stats`]: Aggregate statistics
//! - [`shell`]: The interactive menu loop
//! - [`error`]: Error types for diagcat operations

pub mod catalog;
pub mod error;
pub mod model;
pub mod query;
pub mod shell;
pub mod stats;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use log::info;

pub use catalog::Catalog;
pub use error::DiagcatError;
pub use shell::{OutputFormat, Session, Shell};

/// Command-line arguments for the diagcat shell.
#[derive(Parser, Debug)]
#[command(name = "diagcat")]
#[command(version, about)]
pub struct Args {
    /// Directory holding the annotation XML files.
    pub directory: PathBuf,

    /// Output format for diagram info and statistics ('text' or 'json').
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Run the interactive shell on stdin/stdout.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run(args: &Args) -> Result<(), DiagcatError> {
    let output_format: OutputFormat = args.output.parse()?;

    info!("Starting session in {}", args.directory.display());
    let session = Session::new(&args.directory, output_format);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(session, stdin.lock(), stdout.lock());
    shell.run()?;

    info!(
        "Session ended with {} diagram(s) loaded",
        shell.session().catalog().count()
    );
    Ok(())
}
