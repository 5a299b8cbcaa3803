//! Statement outline: split a token stream into top-level statements and classify each head.
//!
//! This is the first consumer of the disambiguator. It does not parse statements; it only finds
//! where each one starts and ends, and what kind of statement it is.
//!
//! ## Notes
//! - A statement ends at a `;` outside any brackets. Blocks, function definitions and brace-bodied
//!   control flow end at the `}` that closes their body instead.
//! - `if` continues across `else` (and `else if`), and `do` continues across its trailing `while`.
//! - Brackets are checked for balance; any mismatch is reported as an unexpected token.

use std::fmt;

use tracing::debug;

use crate::disambiguate::{Category, disambiguate_statement};
use crate::lexer::tokens::{Token, TokenKind};
use crate::position::Position;
use crate::reader::{Reader, ReaderError};
use cub_core::lang::keywords::{self, KeywordId};
use cub_core::lang::punctuation::{self, PunctuationId};

const IDENT: TokenKind = TokenKind::Ident;
const COLON: TokenKind = TokenKind::Punctuation(PunctuationId::Colon);

/// Loops a label may name.
const LABEL_TARGETS: [KeywordId; 3] = [KeywordId::Do, KeywordId::While, KeywordId::For];

/// How a statement begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementHead {
    /// A lone `;`.
    Empty,
    /// A `{ ... }` block.
    Block,
    /// A statement keyword such as `if`, `return` or `class`.
    Keyword(KeywordId),
    /// `label: while ...`, `label: do ...` or `label: for ...`.
    Labeled { label: String, keyword: KeywordId },
    /// A statement starting with a type, an identifier or an expression, classified by
    /// [`disambiguate_statement`]. `None` means no production matched.
    Ambiguous(Option<Category>),
}

impl StatementHead {
    /// The keyword that drives this statement's shape, if any.
    pub fn keyword(&self) -> Option<KeywordId> {
        match self {
            StatementHead::Keyword(id) | StatementHead::Labeled { keyword: id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Whether the `}` closing a top-level body ends the statement.
    fn ends_at_brace(&self) -> bool {
        match self {
            StatementHead::Empty => false,
            StatementHead::Block | StatementHead::Labeled { .. } => true,
            StatementHead::Keyword(id) => matches!(
                id,
                KeywordId::If | KeywordId::While | KeywordId::Do | KeywordId::For | KeywordId::Class
            ),
            StatementHead::Ambiguous(verdict) => {
                !matches!(verdict, Some(Category::Define | Category::Expression))
            }
        }
    }
}

impl fmt::Display for StatementHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementHead::Empty => f.write_str("empty"),
            StatementHead::Block => f.write_str("block"),
            StatementHead::Keyword(id) => write!(f, "'{}'", keywords::as_str(*id)),
            StatementHead::Labeled { label, keyword } => {
                write!(f, "{label}: '{}'", keywords::as_str(*keyword))
            }
            StatementHead::Ambiguous(Some(category)) => write!(f, "{category}"),
            StatementHead::Ambiguous(None) => f.write_str("unresolved"),
        }
    }
}

/// One top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementOutline {
    /// Position of the statement's first token (the label, for labeled loops).
    pub position: Position,
    pub head: StatementHead,
    /// Number of tokens the statement spans, terminator included.
    pub token_count: usize,
}

/// Split `reader` into top-level statements.
///
/// ## Errors
/// - [`ReaderError::UnexpectedToken`] for a stray or mismatched closer, a dangling `else`, or a
///   label not followed by a loop.
/// - [`ReaderError::UnexpectedEof`] when the input ends inside a statement.
#[tracing::instrument(skip_all)]
pub fn outline<I>(reader: &mut Reader<I>) -> Result<Vec<StatementOutline>, ReaderError>
where
    I: Iterator<Item = Token>,
{
    let mut statements = Vec::new();
    while let Some(first) = reader.peek() {
        let position = first.position;
        let kind = first.kind;

        let head = classify_head(reader, kind)?;
        let label_tokens = if matches!(head, StatementHead::Labeled { .. }) { 2 } else { 0 };
        let token_count = label_tokens + consume_statement(reader, &head)?;

        debug!(%position, head = %head, token_count, "outlined statement");
        statements.push(StatementOutline {
            position,
            head,
            token_count,
        });
    }
    Ok(statements)
}

/// Decide what the statement at the front of `reader` is. Only a label is consumed.
fn classify_head<I>(reader: &mut Reader<I>, kind: TokenKind) -> Result<StatementHead, ReaderError>
where
    I: Iterator<Item = Token>,
{
    match kind {
        TokenKind::Punctuation(PunctuationId::Semicolon) => Ok(StatementHead::Empty),
        TokenKind::Punctuation(PunctuationId::LBrace) => Ok(StatementHead::Block),
        TokenKind::Punctuation(p) if p.is_closer() => Err(reader.mismatch("statement")),
        TokenKind::Keyword(id) if keywords::starts_statement(id) => Ok(StatementHead::Keyword(id)),
        // `new Type(...)...;` is an ordinary expression statement.
        TokenKind::Keyword(id) if id != KeywordId::New => Err(reader.mismatch("statement")),
        TokenKind::Ident if is_label(reader) => label(reader),
        _ => Ok(StatementHead::Ambiguous(disambiguate_statement(&mut reader.lookahead()))),
    }
}

fn is_label<I>(reader: &mut Reader<I>) -> bool
where
    I: Iterator<Item = Token>,
{
    let mut look = reader.lookahead();
    look.accept(IDENT) && look.accept(COLON)
}

fn label<I>(reader: &mut Reader<I>) -> Result<StatementHead, ReaderError>
where
    I: Iterator<Item = Token>,
{
    let name = reader.expect(IDENT)?;
    reader.expect(COLON)?;
    match reader.peek().map(|token| token.kind) {
        Some(TokenKind::Keyword(id)) if LABEL_TARGETS.contains(&id) => Ok(StatementHead::Labeled {
            label: name.ident_name().unwrap_or_default().to_owned(),
            keyword: id,
        }),
        _ => Err(reader.mismatch("'do', 'while' or 'for' after label")),
    }
}

/// Consume tokens up to and including the end of the statement; return how many.
fn consume_statement<I>(reader: &mut Reader<I>, head: &StatementHead) -> Result<usize, ReaderError>
where
    I: Iterator<Item = Token>,
{
    let brace_ends = head.ends_at_brace();
    let mut allow_else = head.keyword() == Some(KeywordId::If);
    let mut awaiting_while = head.keyword() == Some(KeywordId::Do);
    // Closers still owed, innermost last.
    let mut owed: Vec<PunctuationId> = Vec::new();
    let mut count = 0;

    loop {
        let Some(token) = reader.pop() else {
            return Err(ReaderError::UnexpectedEof {
                expected: expected_closer(&owed),
            });
        };
        count += 1;

        let TokenKind::Punctuation(p) = token.kind else {
            continue;
        };
        if let Some(closer) = p.closer() {
            owed.push(closer);
            continue;
        }
        let ended = if p.is_closer() {
            if owed.last() != Some(&p) {
                return Err(ReaderError::UnexpectedToken {
                    expected: expected_closer(&owed),
                    found: token.kind.to_string(),
                    position: Some(token.position),
                });
            }
            owed.pop();
            owed.is_empty() && p == PunctuationId::RBrace && brace_ends
        } else {
            owed.is_empty() && p == PunctuationId::Semicolon
        };
        if !ended {
            continue;
        }

        if allow_else && next_is(reader, KeywordId::Else) {
            reader.pop();
            count += 1;
            // Only `else if` may be followed by yet another `else`.
            allow_else = next_is(reader, KeywordId::If);
            continue;
        }
        if awaiting_while && next_is(reader, KeywordId::While) {
            awaiting_while = false;
            continue;
        }
        return Ok(count);
    }
}

fn next_is<I>(reader: &mut Reader<I>, keyword: KeywordId) -> bool
where
    I: Iterator<Item = Token>,
{
    reader.peek().is_some_and(|token| token.kind.is_keyword(keyword))
}

fn expected_closer(owed: &[PunctuationId]) -> String {
    let closer = owed.last().copied().unwrap_or(PunctuationId::Semicolon);
    format!("'{}'", punctuation::as_str(closer))
}
