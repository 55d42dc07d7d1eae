//! popup-cli: show a popup on the configured popup server and print the result.
//!
//! Reads a popup definition as JSON from a file (or stdin when no file is
//! given), sends it with `show_popup`, and pretty-prints the result mapping.
//! Exits non-zero when the result status is `error`.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use popup_requester::{show_popup, DEFAULT_TIMEOUT_MS};

#[derive(Parser)]
#[command(name = "popup-cli")]
#[command(about = "Show a popup on the configured popup server")]
#[command(version)]
struct Cli {
    /// Path to a JSON popup definition (reads stdin when omitted)
    definition: Option<PathBuf>,

    /// Popup timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let raw = match read_definition(cli.definition.as_deref()) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error: failed to read definition: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let definition: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: definition is not valid JSON: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("showing popup (timeout {} ms)", cli.timeout_ms);

    let result = show_popup(&definition, cli.timeout_ms);
    let failed = result.is_error();

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: could not serialize result: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn read_definition(path: Option<&std::path::Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}
