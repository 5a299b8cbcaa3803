//! Provide the canonical language vocabulary shared by the Cub compiler frontend and its tooling.
//!
//! This crate is intentionally small and dependency-free. It contains the registry tables that the
//! scanner uses to turn spellings into stable IDs, and that diagnostics/tooling use to turn IDs back
//! into spellings.
//!
//! ## Notes
//!
//! - This is a “vocabulary core” crate: **no IO**, no global state, and no compiler-specific types.
//! - Syntax rules (what may follow what) live in `cub_syntax`, never here.

pub mod lang;
