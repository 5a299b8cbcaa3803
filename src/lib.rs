#![forbid(unsafe_code)]
//! Cub Programming Language syntax tools
//!
//! Cub's grammar cannot tell a variable definition from a function definition or a call until it
//! has looked an unbounded distance ahead. This crate bundles the pieces that resolve that: the
//! scanner, the replayable token reader, the category disambiguator and a statement outliner, plus
//! the `cub` command-line front end over them.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a compiler bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod cli;

pub use cub_core::lang;
pub use cub_syntax::diagnostics;
pub use cub_syntax::disambiguate;
pub use cub_syntax::lexer;
pub use cub_syntax::outline;
pub use cub_syntax::reader;

pub use cub_syntax::Position;
pub use cub_syntax::disambiguate::{Category, NewCategory};
