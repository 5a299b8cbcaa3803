//! CLI module for the Cub syntax tools
//!
//! ## Commands
//!
//! - `lex <file>` - Print the token stream
//! - `outline <file>` - Print the top-level statements and how each one was classified
//! - `detect <entry> [file] [-c code]` - Run one disambiguation entry point on a snippet
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Syntax tools for the Cub programming language
#[derive(Parser, Debug)]
#[command(name = "cub")]
#[command(version = VERSION)]
#[command(about = "Syntax tools for the Cub programming language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tokenize a file and print one token per line
    Lex {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Split a file into top-level statements and classify each one
    Outline {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Disambiguate the start of a snippet
    Detect {
        /// Which grammar position the snippet is in
        #[arg(value_enum)]
        entry: Entry,
        /// Source file holding the snippet
        #[arg(value_name = "FILE", conflicts_with = "code")]
        file: Option<PathBuf>,
        /// Inline snippet
        #[arg(short = 'c', long = "code", value_name = "CODE")]
        code: Option<String>,
    },
}

/// Disambiguation entry point selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Entry {
    /// Start of a statement
    Statement,
    /// Operand in expression position
    Expression,
    /// Operand of `new`
    New,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Statement => f.write_str("statement"),
            Entry::Expression => f.write_str("expression"),
            Entry::New => f.write_str("new"),
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Lex { file } => commands::lex_file(&file.to_string_lossy()),
        Command::Outline { file } => commands::outline_file(&file.to_string_lossy()),
        Command::Detect { entry, file, code } => execute_detect(entry, file, code),
    }
}

/// Handle the `detect` subcommand with its two input forms.
fn execute_detect(entry: Entry, file: Option<PathBuf>, code: Option<String>) -> CliResult<ExitCode> {
    if let Some(code) = code {
        if code.is_empty() {
            return Err(CliError::failure("Error: -c/--code requires a source snippet"));
        }
        commands::detect_source(entry, "<command line>", &code)
    } else if let Some(file) = file {
        let name = file.to_string_lossy();
        let source = commands::read_source(&name)?;
        commands::detect_source(entry, &name, &source)
    } else {
        Err(CliError::failure("Error: detect requires a file path or -c \"code\""))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_lex() {
        let cli = Cli::try_parse_from(["cub", "lex", "main.cub"]).unwrap();
        assert!(matches!(cli.command, Command::Lex { .. }));
    }

    #[test]
    fn test_cli_parse_outline() {
        let cli = Cli::try_parse_from(["cub", "outline", "main.cub"]).unwrap();
        if let Command::Outline { file } = cli.command {
            assert_eq!(file, PathBuf::from("main.cub"));
        } else {
            panic!("Expected Outline command");
        }
    }

    #[test]
    fn test_cli_parse_detect_with_code() {
        let cli = Cli::try_parse_from(["cub", "detect", "new", "-c", "Type(Type)[]"]).unwrap();
        if let Command::Detect { entry, file, code } = cli.command {
            assert_eq!(entry, Entry::New);
            assert!(file.is_none());
            assert_eq!(code.as_deref(), Some("Type(Type)[]"));
        } else {
            panic!("Expected Detect command");
        }
    }

    #[test]
    fn test_cli_parse_detect_rejects_file_and_code() {
        assert!(Cli::try_parse_from(["cub", "detect", "statement", "a.cub", "-c", "x;"]).is_err());
    }

    #[test]
    fn test_cli_parse_detect_rejects_unknown_entry() {
        assert!(Cli::try_parse_from(["cub", "detect", "block", "-c", "x;"]).is_err());
    }

    #[test]
    fn test_detect_without_input_fails() {
        let err = execute_detect(Entry::Statement, None, None).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("requires a file path"));
    }

    #[test]
    fn test_detect_rejects_empty_code() {
        let err = execute_detect(Entry::Statement, None, Some(String::new())).unwrap_err();
        assert!(err.message.contains("-c/--code"));
    }
}
