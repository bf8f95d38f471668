//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use console::style;

use crate::domain::errors::SetupError;

/// Exit status for setup failures and any other error that stops a command.
pub const EXIT_FAILURE: i32 = 1;

/// Renders an error as a single line, tagged as a setup or runtime failure.
pub fn error_message(err: &anyhow::Error, json_mode: bool) -> String {
    let kind = if err.downcast_ref::<SetupError>().is_some() {
        "setup"
    } else {
        "runtime"
    };

    if json_mode {
        serde_json::json!({ "error": format!("{err:#}"), "kind": kind }).to_string()
    } else {
        format!("{} {err:#}", style("Error:").red().bold())
    }
}

/// Prints the error on stderr and terminates the process.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    eprintln!("{}", error_message(&err, json_mode));
    std::process::exit(EXIT_FAILURE);
}
