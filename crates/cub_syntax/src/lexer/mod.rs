//! Scanner for the Cub programming language.
//!
//! Handles tokenization including:
//! - Keywords, primitive type names and identifiers
//! - Integer literals (decimal, `0x` hex, `0b` binary), strings, `true`/`false`/`null`
//! - Operators (longest match) and punctuation
//! - `//` line comments and nestable `/* */` block comments
//!
//! The scanner is a pull source: each [`Iterator::next`] call scans exactly one token. Errors are
//! recorded and scanning resumes after the offending input, so a single pass reports every problem.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, Payload, Literal)

pub mod tokens;

pub use tokens::{Literal, Payload, Token, TokenKind, keyword_id};

use crate::diagnostics::SyntaxError;
use crate::position::Position;
use crate::reader::CharReader;
use cub_core::lang::operators;
use cub_core::lang::punctuation;
use cub_core::lang::types;

/// Pull-based scanner over a character source.
pub struct Scanner<I: Iterator<Item = char>> {
    reader: CharReader<I>,
    errors: Vec<SyntaxError>,
}

impl<I: Iterator<Item = char>> Scanner<I> {
    pub fn new(source: I) -> Self {
        Self {
            reader: CharReader::new(source),
            errors: Vec::new(),
        }
    }

    /// Errors recorded so far.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Position of the next character to be scanned.
    pub fn position(&self) -> Position {
        self.reader.position()
    }

    /// Hand back the recorded errors.
    pub fn finish(self) -> Vec<SyntaxError> {
        self.errors
    }

    /// Scan tokens until one is produced or the input ends, recording errors on the way.
    fn scan(&mut self) -> Option<Token> {
        loop {
            match self.scan_token() {
                Ok(token) => return token,
                Err(err) => self.errors.push(err),
            }
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    /// Scan a single token. `Ok(None)` means end of input.
    ///
    /// Every error path consumes at least one character, so [`Scanner::scan`] always progresses.
    fn scan_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        let (start, c) = loop {
            let start = self.reader.position();
            let Some(c) = self.reader.pop() else {
                return Ok(None);
            };
            match c {
                ' ' | '\t' | '\r' | '\n' => {}
                '/' if self.reader.accept('/').is_some() => self.reader.consume_line(),
                '/' if self.reader.accept('*').is_some() => self.consume_comment(start)?,
                _ => break (start, c),
            }
        };

        let token = match c {
            '.' if self.reader.peek().is_some_and(|c| c.is_ascii_digit()) => self.scan_number(start, c)?,
            '0'..='9' => self.scan_number(start, c)?,
            '\'' | '"' => self.scan_string(start, c)?,
            _ if is_ident_start(c) => self.scan_word(start, c),
            _ => self.scan_symbol(start, c)?,
        };
        Ok(Some(token))
    }

    /// Skip a block comment whose `/*` has been consumed. Comments nest.
    fn consume_comment(&mut self, start: Position) -> Result<(), SyntaxError> {
        let mut depth = 1usize;
        while let Some(c) = self.reader.pop() {
            if c == '*' && self.reader.accept('/').is_some() {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            } else if c == '/' && self.reader.accept('*').is_some() {
                depth += 1;
            }
        }
        Err(SyntaxError::syntax("unterminated block comment, expected '*/'", start))
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.reader.accept_with(&pred).is_some() {}
    }

    // ========================================================================
    // Operators and punctuation
    // ========================================================================

    /// Scan punctuation or the longest operator starting with `first`.
    ///
    /// Every prefix of an operator spelling is itself an operator, so extending one character at a
    /// time while the result is still an operator yields the longest match.
    fn scan_symbol(&mut self, start: Position, first: char) -> Result<Token, SyntaxError> {
        let mut spelling = first.to_string();
        if let Some(id) = punctuation::from_str(&spelling) {
            return Ok(Token::new(TokenKind::Punctuation(id), start));
        }

        let Some(mut id) = operators::from_str(&spelling) else {
            return Err(SyntaxError::syntax(format!("unexpected character '{first}'"), start));
        };
        while let Some(next) = self.reader.peek() {
            spelling.push(next);
            match operators::from_str(&spelling) {
                Some(longer) => {
                    self.reader.pop();
                    id = longer;
                }
                None => break,
            }
        }
        Ok(Token::new(TokenKind::Operator(id), start))
    }

    // ========================================================================
    // Words
    // ========================================================================

    fn scan_word(&mut self, start: Position, first: char) -> Token {
        let mut word = String::from(first);
        while let Some(c) = self.reader.accept_with(is_ident_continue) {
            word.push(c);
        }

        if let Some(id) = keyword_id(&word) {
            return Token::new(TokenKind::Keyword(id), start);
        }
        if let Some(ty) = types::from_str(&word) {
            return Token::ty(ty, start);
        }
        match word.as_str() {
            "true" => Token::literal(Literal::Bool(true), start),
            "false" => Token::literal(Literal::Bool(false), start),
            "null" => Token::literal(Literal::Null, start),
            _ => Token::ident(word, start),
        }
    }

    // ========================================================================
    // Numbers
    // ========================================================================

    fn scan_number(&mut self, start: Position, first: char) -> Result<Token, SyntaxError> {
        if first == '.' {
            return Err(self.unsupported_float(start));
        }

        if first == '0' {
            match self.reader.peek() {
                Some('x') => {
                    self.reader.pop();
                    return self.scan_radix(start, 16, "hexadecimal");
                }
                Some('b') => {
                    self.reader.pop();
                    return self.scan_radix(start, 2, "binary");
                }
                Some('o') => {
                    self.skip_while(is_ident_continue);
                    return Err(SyntaxError::unsupported("octal literals are not supported", start));
                }
                _ => {}
            }
        }

        let mut value = Some(u64::from(first as u8 - b'0'));
        while let Some(c) = self.reader.peek() {
            match c {
                '0'..='9' => {
                    self.reader.pop();
                    let digit = u64::from(c as u8 - b'0');
                    value = value.and_then(|v| v.checked_mul(10)).and_then(|v| v.checked_add(digit));
                }
                '.' | 'e' | 'E' => return Err(self.unsupported_float(start)),
                _ if is_ident_continue(c) => {
                    self.skip_while(is_ident_continue);
                    return Err(SyntaxError::syntax("identifiers may not begin with digits", start));
                }
                _ => break,
            }
        }

        match value {
            Some(value) => Ok(Token::literal(Literal::int(value), start)),
            None => Err(SyntaxError::syntax("decimal literal too large", start)),
        }
    }

    /// Scan the digits of a `0x`/`0b` literal whose prefix has been consumed.
    fn scan_radix(&mut self, start: Position, radix: u32, name: &str) -> Result<Token, SyntaxError> {
        let mut value = Some(0u64);
        let mut found = false;
        while let Some(c) = self.reader.peek() {
            if let Some(digit) = c.to_digit(radix) {
                self.reader.pop();
                found = true;
                value = value
                    .and_then(|v| v.checked_mul(u64::from(radix)))
                    .and_then(|v| v.checked_add(u64::from(digit)));
            } else if is_ident_continue(c) {
                self.skip_while(is_ident_continue);
                return Err(SyntaxError::syntax(
                    format!("invalid digit '{c}' in {name} literal"),
                    start,
                ));
            } else {
                break;
            }
        }

        if !found {
            return Err(SyntaxError::syntax(format!("expected {name} digits"), start));
        }
        match value {
            Some(value) => Ok(Token::literal(Literal::int(value), start)),
            None => Err(SyntaxError::syntax(format!("{name} literal too large"), start)),
        }
    }

    fn unsupported_float(&mut self, start: Position) -> SyntaxError {
        self.skip_while(|c| is_ident_continue(c) || c == '.');
        SyntaxError::unsupported("floating point literals are not supported", start)
    }

    // ========================================================================
    // Strings
    // ========================================================================

    /// Scan a string whose opening quote has been consumed.
    ///
    /// Bad escapes are recorded and skipped so the rest of the string still scans; only a missing
    /// closing quote fails the token.
    fn scan_string(&mut self, start: Position, quote: char) -> Result<Token, SyntaxError> {
        let mut value = String::new();
        loop {
            let Some(c) = self.reader.pop() else {
                return Err(SyntaxError::syntax("unterminated string literal", start));
            };
            if c == quote {
                break;
            }
            if c != '\\' {
                value.push(c);
                continue;
            }

            let escape_at = self.reader.position();
            let Some(escape) = self.reader.pop() else {
                return Err(SyntaxError::syntax("unterminated string literal", start));
            };
            match escape {
                '"' | '\'' | '#' | '\\' => value.push(escape),
                '0' => value.push('\0'),
                'b' => value.push('\u{8}'),
                'f' => value.push('\u{c}'),
                'n' => value.push('\n'),
                'r' => value.push('\r'),
                't' => value.push('\t'),
                'v' => value.push('\u{b}'),
                'x' => {
                    let high = self.expect_hex_digit();
                    let low = self.expect_hex_digit();
                    value.push(char::from((high << 4) | low));
                }
                'u' => self.errors.push(SyntaxError::unsupported(
                    "unicode escapes are not supported",
                    escape_at,
                )),
                '\n' => self.errors.push(SyntaxError::syntax(
                    "expected escape sequence, found newline",
                    escape_at,
                )),
                other => self.errors.push(SyntaxError::syntax(
                    format!("unexpected character '{other}', expected escape sequence"),
                    escape_at,
                )),
            }
        }
        Ok(Token::literal(Literal::Str(value), start))
    }

    /// Consume one hex digit of a `\xHH` escape. A non-digit is left in place and recorded.
    fn expect_hex_digit(&mut self) -> u8 {
        let at = self.reader.position();
        match self.reader.accept_with(|c| c.is_ascii_hexdigit()) {
            // to_digit(16) of an ASCII hex digit is < 16
            Some(c) => c.to_digit(16).map_or(0, |d| d as u8),
            None => {
                self.errors.push(SyntaxError::syntax("expected hex digit", at));
                0
            }
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for Scanner<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.scan()
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to scan a whole source string.
///
/// Returns every token on success, or every recorded error if there was at least one.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<SyntaxError>> {
    let mut scanner = Scanner::new(source.chars());
    let tokens: Vec<Token> = scanner.by_ref().collect();
    let errors = scanner.finish();
    tracing::debug!(tokens = tokens.len(), errors = errors.len(), "scanned source");
    if errors.is_empty() { Ok(tokens) } else { Err(errors) }
}

// ============================================================================
// TESTS
// ============================================================================
