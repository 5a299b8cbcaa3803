//! Define the reserved keyword vocabulary for the Cub language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings,
//! and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Primitive type names (`u8`, `void`, ...) are *not* keywords; see [`crate::lang::types`].
//! - `true`, `false` and `null` are literals, not keywords; the scanner handles them directly.
//!
//! ## Examples
//! ```rust
//! use cub_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("new"), Some(KeywordId::New));
//! assert_eq!(keywords::as_str(KeywordId::New), "new");
//! assert_eq!(keywords::from_str("New"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow / statements
    If,
    Else,
    While,
    Do,
    For,
    Break,
    Continue,
    Return,
    Case,

    // Definitions / declarations
    Class,
    Extends,
    Typedef,
    Native,

    // Bindings
    Let,

    // Expressions
    New,
    As,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Definition,
    Binding,
    Expression,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    /// Whether the keyword begins a statement of its own (as opposed to appearing mid-construct).
    pub starts_statement: bool,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow / statements
    info(KeywordId::If, "if", KeywordCategory::ControlFlow, true),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow, false),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow, true),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow, true),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow, true),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow, true),
    info(KeywordId::Continue, "continue", KeywordCategory::ControlFlow, true),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow, true),
    // Scanned as a keyword, but no statement starts with it yet.
    info(KeywordId::Case, "case", KeywordCategory::ControlFlow, false),
    // Definitions / declarations
    info(KeywordId::Class, "class", KeywordCategory::Definition, true),
    info(KeywordId::Extends, "extends", KeywordCategory::Definition, false),
    info(KeywordId::Typedef, "typedef", KeywordCategory::Definition, true),
    info(KeywordId::Native, "native", KeywordCategory::Definition, false),
    // Bindings
    info(KeywordId::Let, "let", KeywordCategory::Binding, true),
    // Expressions
    info(KeywordId::New, "new", KeywordCategory::Expression, false),
    info(KeywordId::As, "as", KeywordCategory::Expression, false),
];

/// Canonical spelling.
///
/// ## Parameters
/// - `id`: Keyword identifier.
///
/// ## Returns
/// - The canonical spelling for `id`.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return `true` if a statement may begin with this keyword.
pub fn starts_statement(id: KeywordId) -> bool {
    info_for(id).starts_statement
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS
        .iter()
        .find(|k| k.id == id)
        .expect("INVARIANT: every KeywordId has a KEYWORDS entry")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is a reserved word.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    category: KeywordCategory,
    starts_statement: bool,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        starts_statement,
    }
}
