//! Property-based tests for the reader and disambiguator.
//!
//! The central property: whatever a disambiguation entry point decides, the reader afterwards
//! yields exactly the tokens it would have yielded without it.

use cub_core::lang::keywords::KeywordId;
use cub_core::lang::operators::OperatorId;
use cub_core::lang::punctuation::PunctuationId;
use cub_core::lang::types::PrimitiveType;
use cub_syntax::Position;
use cub_syntax::disambiguate::{disambiguate_expression, disambiguate_new, disambiguate_statement};
use cub_syntax::lexer::tokens::{Literal, Token, TokenKind};
use cub_syntax::lexer::{Scanner, lex};
use cub_syntax::reader::{CharReader, Reader};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Tokens that steer the disambiguator, plus a few that it treats as "anything else".
fn token_strategy() -> impl Strategy<Value = Token> {
    let kinds = prop::sample::select(vec![
        TokenKind::Ident,
        TokenKind::Type,
        TokenKind::Literal,
        TokenKind::Keyword(KeywordId::New),
        TokenKind::Operator(OperatorId::Assign),
        TokenKind::Operator(OperatorId::Add),
        TokenKind::Punctuation(PunctuationId::LParen),
        TokenKind::Punctuation(PunctuationId::RParen),
        TokenKind::Punctuation(PunctuationId::LBracket),
        TokenKind::Punctuation(PunctuationId::RBracket),
        TokenKind::Punctuation(PunctuationId::LBrace),
        TokenKind::Punctuation(PunctuationId::Comma),
        TokenKind::Punctuation(PunctuationId::Semicolon),
    ]);
    (kinds, 1usize..50).prop_map(|(kind, column)| {
        let position = Position::new(1, column);
        match kind {
            TokenKind::Ident => Token::ident(format!("name{column}"), position),
            TokenKind::Type => Token::ty(PrimitiveType::U8, position),
            TokenKind::Literal => Token::literal(Literal::int(column as u64), position),
            other => Token::new(other, position),
        }
    })
}

fn tokens_strategy() -> impl Strategy<Value = Vec<Token>> {
    prop::collection::vec(token_strategy(), 0..40)
}

// =============================================================================
// Replay
// =============================================================================

proptest! {
    #[test]
    fn statement_disambiguation_replays_every_token(tokens in tokens_strategy()) {
        let mut reader = Reader::new(tokens.clone().into_iter());
        let _ = disambiguate_statement(&mut reader.lookahead());
        prop_assert_eq!(reader.collect::<Vec<_>>(), tokens);
    }

    #[test]
    fn expression_disambiguation_replays_every_token(tokens in tokens_strategy()) {
        let mut reader = Reader::new(tokens.clone().into_iter());
        let _ = disambiguate_expression(&mut reader.lookahead());
        prop_assert_eq!(reader.collect::<Vec<_>>(), tokens);
    }

    #[test]
    fn new_disambiguation_replays_every_token(tokens in tokens_strategy()) {
        let mut reader = Reader::new(tokens.clone().into_iter());
        let _ = disambiguate_new(&mut reader.lookahead());
        prop_assert_eq!(reader.collect::<Vec<_>>(), tokens);
    }

    /// Consuming a prefix first does not disturb the replay of the rest.
    #[test]
    fn disambiguation_after_partial_consumption(tokens in tokens_strategy(), skip in 0usize..10) {
        let mut reader = Reader::new(tokens.clone().into_iter());
        for _ in 0..skip {
            reader.pop();
        }
        let _ = disambiguate_statement(&mut reader.lookahead());
        let rest: Vec<Token> = tokens.into_iter().skip(skip).collect();
        prop_assert_eq!(reader.collect::<Vec<_>>(), rest);
    }

    #[test]
    fn lookahead_never_inspects_more_than_it_buffers(tokens in tokens_strategy()) {
        let len = tokens.len();
        let mut reader = Reader::new(tokens.into_iter());
        let inspected = {
            let mut look = reader.lookahead();
            let _ = disambiguate_statement(&mut look);
            look.inspected()
        };
        prop_assert!(inspected <= reader.buffered());
        prop_assert!(reader.buffered() <= len);
    }
}

// =============================================================================
// Push-back
// =============================================================================

proptest! {
    #[test]
    fn reader_push_undoes_pop(items in prop::collection::vec(any::<u8>(), 0..30), n in 0usize..30) {
        let mut reader = Reader::new(items.clone().into_iter());
        let mut popped = Vec::new();
        for _ in 0..n {
            popped.push(reader.pop());
        }
        while let Some(item) = popped.pop() {
            reader.push(item);
        }
        prop_assert_eq!(reader.collect::<Vec<_>>(), items);
    }

    #[test]
    fn char_reader_push_restores_position(line in "[a-z0-9 ]{0,30}", n in 0usize..30) {
        let mut reader = CharReader::new(line.chars());
        let mut popped = Vec::new();
        for _ in 0..n {
            popped.push(reader.pop());
        }
        while let Some(c) = popped.pop() {
            prop_assert!(reader.push(c).is_ok());
        }
        prop_assert_eq!(reader.position(), Position::start());
        prop_assert_eq!(reader.collect::<String>(), line);
    }
}

// =============================================================================
// Scanner robustness
// =============================================================================

proptest! {
    #[test]
    fn scanner_never_panics(source in "\\PC{0,80}") {
        let mut scanner = Scanner::new(source.chars());
        let tokens: Vec<Token> = scanner.by_ref().collect();
        let errors = scanner.finish();
        match lex(&source) {
            Ok(lexed) => {
                prop_assert!(errors.is_empty());
                prop_assert_eq!(lexed, tokens);
            }
            Err(lexed_errors) => prop_assert_eq!(lexed_errors.len(), errors.len()),
        }
    }

    #[test]
    fn scanner_positions_are_monotonic(source in "[a-z0-9 ;(){}\\[\\],=+\\n]{0,80}") {
        let tokens: Vec<Token> = Scanner::new(source.chars()).collect();
        for pair in tokens.windows(2) {
            let (a, b) = (pair[0].position, pair[1].position);
            prop_assert!(a < b, "{} then {}", a, b);
        }
    }
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn deeply_nested_groups_terminate() {
    let depth = 200;
    let code = format!("{}x{} name;", "Type(".repeat(depth), ")".repeat(depth));
    let mut reader = Reader::new(Scanner::new(code.chars()));
    let verdict = disambiguate_statement(&mut reader.lookahead());
    // The innermost `x` is ambiguous, so every level stays ambiguous and the definition wins.
    assert_eq!(verdict, Some(cub_syntax::disambiguate::Category::Define));
    assert_eq!(reader.count(), 3 * depth + 3);

    let unclosed = "f(".repeat(depth);
    let mut reader = Reader::new(Scanner::new(unclosed.chars()));
    let _ = disambiguate_expression(&mut reader.lookahead());
    assert_eq!(reader.count(), 2 * depth);
}
