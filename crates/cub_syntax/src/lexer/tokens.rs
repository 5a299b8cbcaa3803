//! Token types for the Cub scanner.
//!
//! The scanner uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for delimiters and separators
//!
//! ## Notes
//! - [`TokenKind`] is `Copy` and carries no text. The disambiguator only ever compares kinds; names,
//!   literal values and primitive type ids travel separately in [`Payload`].

use std::fmt;

use crate::position::Position;
use cub_core::lang::keywords::{self, KeywordId};
use cub_core::lang::operators::{self, OperatorId};
use cub_core::lang::punctuation::{self, PunctuationId};
use cub_core::lang::types::{self, PrimitiveType};

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Names and literals ==========
    Ident,
    /// A primitive type name such as `u8` or `void`.
    Type,
    Literal,
}

impl TokenKind {
    pub fn is_keyword(self, id: KeywordId) -> bool {
        self == TokenKind::Keyword(id)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => write!(f, "'{}'", keywords::as_str(*id)),
            TokenKind::Operator(id) => write!(f, "'{}'", operators::as_str(*id)),
            TokenKind::Punctuation(id) => write!(f, "'{}'", punctuation::as_str(*id)),
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Type => write!(f, "type"),
            TokenKind::Literal => write!(f, "literal"),
        }
    }
}

/// Literal value carried by a [`TokenKind::Literal`] token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Bool(bool),
    /// Integer literals are typed with the narrowest unsigned type that holds them.
    Int {
        value: u64,
        ty: PrimitiveType,
    },
    Str(String),
    Null,
}

impl Literal {
    pub fn int(value: u64) -> Self {
        Literal::Int {
            value,
            ty: types::smallest_unsigned_for(value),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int { value, ty } => write!(f, "{value}{}", types::as_str(*ty)),
            Literal::Str(s) => write!(f, "{s:?}"),
            Literal::Null => write!(f, "null"),
        }
    }
}

/// Kind-specific data attached to a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Ident(String),
    Type(PrimitiveType),
    Literal(Literal),
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Ident(name) => write!(f, "{name}"),
            Payload::Type(ty) => write!(f, "{}", types::as_str(*ty)),
            Payload::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

/// A token with its kind, source position and optional payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
    pub payload: Option<Payload>,
}

impl Token {
    /// Construct a payload-free token.
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Self {
            kind,
            position,
            payload: None,
        }
    }

    pub fn ident(name: impl Into<String>, position: Position) -> Self {
        Self {
            kind: TokenKind::Ident,
            position,
            payload: Some(Payload::Ident(name.into())),
        }
    }

    pub fn ty(ty: PrimitiveType, position: Position) -> Self {
        Self {
            kind: TokenKind::Type,
            position,
            payload: Some(Payload::Type(ty)),
        }
    }

    pub fn literal(literal: Literal, position: Position) -> Self {
        Self {
            kind: TokenKind::Literal,
            position,
            payload: Some(Payload::Literal(literal)),
        }
    }

    /// Identifier text, if this is an identifier token.
    pub fn ident_name(&self) -> Option<&str> {
        match &self.payload {
            Some(Payload::Ident(name)) => Some(name),
            _ => None,
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
