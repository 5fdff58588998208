//! `apidocs-export`: normalize an API document and print it cleaned.
//!
//! Usage:
//!   apidocs-export [spec|openapi] [--config FILE]
//!
//! The document is read from stdin. `spec` (the default) prints the export
//! document, `openapi` its OpenAPI rendering. Log output goes to stderr and
//! is controlled by `RUST_LOG` (default `warn`).

use std::io::{self, Read, Write};
use std::process::ExitCode;

use apidocs_editor::cli::{export, load_options, parse_args, CliError, USAGE};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run() -> Result<(), CliError> {
    let args = parse_args(std::env::args().skip(1))?;
    let options = load_options(args.config.as_deref())?;

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;

    let out = export(buf.trim(), args.format, &options)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(out.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err @ CliError::Usage(_)) => {
            eprintln!("{err}\n{USAGE}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("apidocs-export: {err}");
            ExitCode::FAILURE
        }
    }
}
