//! Cub language vocabulary registries.
//!
//! This module is the “front door” for language-level vocabulary: reserved keywords, operators,
//! punctuation, and primitive type names.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up spellings and
//! metadata via registry tables, instead of comparing strings at call sites.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no token types, no IO, no side effects.
//! - The scanner owns longest-match rules; registries only record spellings.
//!
//! ## Examples
//! ```rust
//! use cub_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("while"), Some(KeywordId::While));
//! assert_eq!(keywords::as_str(KeywordId::While), "while");
//! ```

pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod types;
