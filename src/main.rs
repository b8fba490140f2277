use std::{process, str::FromStr};

use clap::Parser;
use log::{debug, LevelFilter};

use diagcat::Args;

fn main() {
    // Wrong argument count exits 1; --help and --version exit 0.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if err.use_stderr() => {
            eprint!("{err}");
            process::exit(1);
        }
        Err(err) => err.exit(),
    };

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!("Parsed arguments: {:?}", args);

    if let Err(err) = diagcat::run(&args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
