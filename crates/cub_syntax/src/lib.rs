//! Syntax frontend for the Cub language: scanner, buffered reader, grammar disambiguation, diagnostics.
//!
//! Cub's grammar is ambiguous in its first few tokens: `Type(Type()) name` may begin a variable
//! definition, a function definition or a call expression. This crate resolves that ambiguity with
//! unbounded, replayable lookahead instead of a full backtracking parser.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it does not build an AST, resolve names, or check types.
//! - Vocabulary identity (keywords/operators/punctuation/primitive types) comes from `cub_core::lang`.
//! - Every token the disambiguator inspects stays in the [`reader::Reader`] buffer, so the caller
//!   consumes exactly the same tokens afterwards.
//!
//! ## Examples
//! ```rust
//! use cub_syntax::disambiguate::{Category, disambiguate_statement};
//! use cub_syntax::lexer::Scanner;
//! use cub_syntax::reader::Reader;
//!
//! let mut reader = Reader::new(Scanner::new("void main() {}".chars()));
//! let verdict = disambiguate_statement(&mut reader.lookahead());
//! assert_eq!(verdict, Some(Category::Function));
//! // Nothing was consumed.
//! assert_eq!(reader.count(), 6);
//! ```
//!
//! ## See also
//! - `cub_core::lang` for registry-backed language vocabulary.

pub mod diagnostics;
pub mod disambiguate;
pub mod lexer;
pub mod outline;
pub mod position;
pub mod reader;

pub use position::Position;
