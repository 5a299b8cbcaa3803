//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.
//!
//! Each command has a `render_*` counterpart that returns its output as a string, so the
//! integration tests can snapshot it without spawning the binary.

use std::fmt::Write as _;
use std::fs;

use cub_syntax::diagnostics::{self, SyntaxError};
use cub_syntax::disambiguate::{disambiguate_expression, disambiguate_new, disambiguate_statement};
use cub_syntax::lexer::tokens::Token;
use cub_syntax::lexer::{self, Scanner};
use cub_syntax::outline::{StatementOutline, outline};
use cub_syntax::reader::Reader;
use tracing::debug;

use super::{CliError, CliResult, Entry, ExitCode};

/// Maximum source file size (16 MB).
const MAX_SOURCE_SIZE: u64 = 16 * 1024 * 1024;

/// Read a source file, refusing anything larger than `MAX_SOURCE_SIZE`.
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Join rendered diagnostics into one failure.
fn report(file_name: &str, source: &str, errors: &[SyntaxError]) -> CliError {
    let mut msg = String::new();
    for err in errors {
        msg.push_str(&diagnostics::format_error(file_name, source, err));
        msg.push('\n');
    }
    CliError::failure(msg.trim_end())
}

// ============================================================================
// lex
// ============================================================================

/// Lex and display tokens.
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    print!("{}", render_tokens(file_path, &source)?);
    Ok(ExitCode::SUCCESS)
}

/// One token per line: `line:column kind [payload]`.
pub fn render_tokens(file_name: &str, source: &str) -> CliResult<String> {
    let tokens = lexer::lex(source).map_err(|errs| report(file_name, source, &errs))?;
    debug!(file = file_name, tokens = tokens.len(), "lexed file");

    let mut out = String::new();
    for token in &tokens {
        let _ = writeln!(out, "{}", describe_token(token));
    }
    Ok(out)
}

fn describe_token(token: &Token) -> String {
    match &token.payload {
        Some(payload) => format!("{} {} {}", token.position, token.kind, payload),
        None => format!("{} {}", token.position, token.kind),
    }
}

// ============================================================================
// outline
// ============================================================================

/// Outline and display top-level statements.
pub fn outline_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    print!("{}", render_outline(file_path, &source)?);
    Ok(ExitCode::SUCCESS)
}

/// One statement per line: `line:column head (n tokens)`.
///
/// Scanner errors are reported before outline errors, since a bad token usually explains a
/// structural failure that follows it.
pub fn render_outline(file_name: &str, source: &str) -> CliResult<String> {
    let mut reader = Reader::new(Scanner::new(source.chars()));
    let outcome = outline(&mut reader);
    let scan_errors = reader.into_inner().finish();
    if !scan_errors.is_empty() {
        return Err(report(file_name, source, &scan_errors));
    }
    let statements = outcome.map_err(|err| {
        let err = SyntaxError::from_reader(&err, diagnostics::end_of(source));
        report(file_name, source, &[err])
    })?;
    debug!(file = file_name, statements = statements.len(), "outlined file");

    let mut out = String::new();
    for statement in &statements {
        let _ = writeln!(out, "{}", describe_statement(statement));
    }
    Ok(out)
}

fn describe_statement(statement: &StatementOutline) -> String {
    let plural = if statement.token_count == 1 { "" } else { "s" };
    format!(
        "{} {} ({} token{plural})",
        statement.position, statement.head, statement.token_count
    )
}

// ============================================================================
// detect
// ============================================================================

/// Disambiguate `source` and print the verdict.
pub fn detect_source(entry: Entry, file_name: &str, source: &str) -> CliResult<ExitCode> {
    println!("{}", render_detect(entry, file_name, source)?);
    Ok(ExitCode::SUCCESS)
}

/// The verdict of one entry point, or `none` when no production matches.
pub fn render_detect(entry: Entry, file_name: &str, source: &str) -> CliResult<String> {
    let tokens = lexer::lex(source).map_err(|errs| report(file_name, source, &errs))?;
    let mut reader = Reader::new(tokens.into_iter());
    let mut look = reader.lookahead();
    let verdict = match entry {
        Entry::Statement => disambiguate_statement(&mut look).map_or_else(|| "none".to_string(), |c| c.to_string()),
        Entry::Expression => disambiguate_expression(&mut look).map_or_else(|| "none".to_string(), |c| c.to_string()),
        Entry::New => disambiguate_new(&mut look).to_string(),
    };
    debug!(%entry, inspected = look.inspected(), %verdict, "detected category");
    Ok(verdict)
}
