//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens used by the scanner and
//! the disambiguator: delimiters, separators, and the member-access dot.
//!
//! ## Examples
//! ```rust
//! use cub_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str(";"), Some(PunctuationId::Semicolon));
//! assert_eq!(punctuation::as_str(PunctuationId::LBracket), "[");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,`, `:` and `;`.
    Separator,
    /// Member access (`.`).
    Access,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Separators
    Comma,
    Colon,
    Semicolon,

    // Access
    Dot,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
];

/// Canonical spelling.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("INVARIANT: every PunctuationId has a PUNCTUATION entry")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

impl PunctuationId {
    /// Return the matching closer for an opening delimiter.
    pub fn closer(self) -> Option<PunctuationId> {
        match self {
            PunctuationId::LParen => Some(PunctuationId::RParen),
            PunctuationId::LBracket => Some(PunctuationId::RBracket),
            PunctuationId::LBrace => Some(PunctuationId::RBrace),
            _ => None,
        }
    }

    /// Return `true` for `)`, `]` and `}`.
    pub fn is_closer(self) -> bool {
        matches!(self, PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace)
    }
}

// --- helpers -----------------------------------------------------------------

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo {
        id,
        canonical,
        category,
    }
}
