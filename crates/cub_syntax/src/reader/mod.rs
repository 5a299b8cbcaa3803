//! Buffered, replayable readers over tokens and characters.
//!
//! A [`Reader`] wraps any pull source (the scanner, a `Vec<Token>`, a `Chars`) and adds unlimited
//! push-back plus non-destructive lookahead. Items pulled from the source are kept in one buffer
//! owned by the reader; a [`Lookahead`] cursor only holds an index into that buffer.
//!
//! ## Notes
//! - Every item a lookahead inspects is appended to the shared buffer, so the reader's own
//!   [`Reader::pop`] later yields exactly the same items in the same order. Discarding a lookahead
//!   never loses or duplicates anything.
//! - A lookahead mutably borrows its reader, so only one cursor can be live at a time and the reader
//!   cannot be consumed while a cursor exists.
//!
//! ## Examples
//! ```rust
//! use cub_syntax::reader::Reader;
//!
//! let mut reader = Reader::new("hello".chars());
//! let peeked: String = reader.lookahead().take(3).collect();
//! assert_eq!(peeked, "hel");
//! assert_eq!(reader.pop(), Some('h'));
//! assert_eq!(reader.collect::<String>(), "ello");
//! ```

mod char_reader;

pub use char_reader::CharReader;

use std::collections::VecDeque;
use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::lexer::tokens::{Token, TokenKind};
use crate::position::Position;

// ============================================================================
// Items
// ============================================================================

/// An item that can be matched by kind.
///
/// Matching never looks at payloads: two identifiers with different names have the same kind.
pub trait Kinded {
    type Kind: Copy + Eq + fmt::Debug + fmt::Display;

    fn kind(&self) -> Self::Kind;

    /// Source position for diagnostics, when the item carries one.
    fn position(&self) -> Option<Position> {
        None
    }
}

impl Kinded for char {
    type Kind = char;

    fn kind(&self) -> char {
        *self
    }
}

impl Kinded for Token {
    type Kind = TokenKind;

    fn kind(&self) -> TokenKind {
        self.kind
    }

    fn position(&self) -> Option<Position> {
        Some(self.position)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failure of an `expect`-family operation, or an illegal character push-back.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ReaderError {
    #[error("unexpected end of input, expected {expected}")]
    #[diagnostic(code(cub::reader::unexpected_eof))]
    UnexpectedEof { expected: String },

    #[error("unexpected {found}, expected {expected}")]
    #[diagnostic(code(cub::reader::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        position: Option<Position>,
    },

    #[error("cannot push back across the start of line {line}")]
    #[diagnostic(
        code(cub::reader::rewind_across_line),
        help("the column of the previous line is unknown once a newline has been consumed")
    )]
    RewindAcrossLine { line: usize },
}

impl ReaderError {
    /// Position of the offending item, if known.
    pub fn position(&self) -> Option<Position> {
        match self {
            ReaderError::UnexpectedToken { position, .. } => *position,
            ReaderError::UnexpectedEof { .. } | ReaderError::RewindAcrossLine { .. } => None,
        }
    }
}

/// Outcome of a successful `*_terminated` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminated<V> {
    /// The terminator came first; no item was read.
    Immediate,
    /// An item was read and the terminator followed it.
    Item(V),
}

impl<V> Terminated<V> {
    /// Replace [`Terminated::Immediate`] with `default`.
    pub fn unwrap_or(self, default: V) -> V {
        match self {
            Terminated::Immediate => default,
            Terminated::Item(value) => value,
        }
    }

    /// Replace [`Terminated::Immediate`] with a lazily computed value.
    pub fn unwrap_or_else(self, default: impl FnOnce() -> V) -> V {
        match self {
            Terminated::Immediate => default(),
            Terminated::Item(value) => value,
        }
    }
}

// ============================================================================
// Reader
// ============================================================================

/// Pull-based reader with a push-back buffer.
///
/// Earlier items sit at the front of the buffer. The source is only pulled when the buffer is
/// empty (for [`Reader::pop`]/[`Reader::peek`]) or exhausted (for a [`Lookahead`]).
pub struct Reader<I: Iterator> {
    source: I,
    exhausted: bool,
    buffer: VecDeque<I::Item>,
}

impl<I: Iterator> Reader<I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            exhausted: false,
            buffer: VecDeque::new(),
        }
    }

    /// Pull one item from the source. Once the source returns `None` it is never polled again.
    fn pull(&mut self) -> Option<I::Item> {
        if self.exhausted {
            return None;
        }
        let item = self.source.next();
        self.exhausted = item.is_none();
        item
    }

    /// Return the next item without consuming it.
    pub fn peek(&mut self) -> Option<&I::Item> {
        if self.buffer.is_empty() {
            let item = self.pull()?;
            self.buffer.push_back(item);
        }
        self.buffer.front()
    }

    /// Consume and return the next item.
    pub fn pop(&mut self) -> Option<I::Item> {
        match self.buffer.pop_front() {
            Some(item) => Some(item),
            None => self.pull(),
        }
    }

    /// Put an item back in front of the stream, undoing a [`Reader::pop`].
    ///
    /// Pushing `None` is a no-op, so `reader.push(reader.pop())` is always safe.
    pub fn push(&mut self, item: Option<I::Item>) {
        if let Some(item) = item {
            self.buffer.push_front(item);
        }
    }

    /// Start a lookahead cursor at the reader's current position.
    pub fn lookahead(&mut self) -> Lookahead<'_, I> {
        Lookahead { reader: self, index: 0 }
    }

    /// Number of items pulled from the source but not yet consumed.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &I {
        &self.source
    }

    /// Unwrap the underlying source. Buffered items are dropped.
    pub fn into_inner(self) -> I {
        self.source
    }
}

impl<I> Reader<I>
where
    I: Iterator,
    I::Item: Kinded,
{
    /// Consume the next item if it has the given kind.
    pub fn accept(&mut self, kind: <I::Item as Kinded>::Kind) -> Option<I::Item> {
        self.accept_with(|item| item.kind() == kind)
    }

    /// Consume the next item if `matches` approves of it.
    pub fn accept_with(&mut self, matches: impl FnOnce(&I::Item) -> bool) -> Option<I::Item> {
        if self.peek().is_some_and(matches) {
            self.pop()
        } else {
            None
        }
    }

    /// Like [`Reader::accept`], but a mismatch is an error. The stream is untouched on failure.
    pub fn expect(&mut self, kind: <I::Item as Kinded>::Kind) -> Result<I::Item, ReaderError> {
        match self.accept(kind) {
            Some(item) => Ok(item),
            None => Err(self.mismatch(kind)),
        }
    }

    /// Like [`Reader::accept_with`], but a mismatch is an error described by `expected`. The stream
    /// is untouched on failure.
    pub fn expect_with(
        &mut self,
        expected: impl fmt::Display,
        matches: impl FnOnce(&I::Item) -> bool,
    ) -> Result<I::Item, ReaderError> {
        match self.accept_with(matches) {
            Some(item) => Ok(item),
            None => Err(self.mismatch(expected)),
        }
    }

    /// Read an optional item followed by `terminator`.
    ///
    /// ## Parameters
    /// - `terminator`: kind that closes the construct.
    /// - `item`: kind the item must have, or `None` to take any item.
    ///
    /// ## Returns
    /// - `Some(Terminated::Immediate)` if the terminator was next.
    /// - `Some(Terminated::Item(item))` if one item and then the terminator were read.
    /// - `None` otherwise, with the stream left as it was.
    pub fn accept_terminated(
        &mut self,
        terminator: <I::Item as Kinded>::Kind,
        item: Option<<I::Item as Kinded>::Kind>,
    ) -> Option<Terminated<I::Item>> {
        if self.accept(terminator).is_some() {
            return Some(Terminated::Immediate);
        }
        let value = match item {
            None => self.pop(),
            Some(kind) => self.accept(kind),
        }?;
        if self.accept(terminator).is_some() {
            return Some(Terminated::Item(value));
        }
        self.push(Some(value));
        None
    }

    /// Like [`Reader::accept_terminated`], but failure is an error.
    ///
    /// On failure the item (if one was read) is pushed back, so the stream is left as it was.
    pub fn expect_terminated(
        &mut self,
        terminator: <I::Item as Kinded>::Kind,
        item: Option<<I::Item as Kinded>::Kind>,
    ) -> Result<Terminated<I::Item>, ReaderError> {
        if self.accept(terminator).is_some() {
            return Ok(Terminated::Immediate);
        }
        let value = match item {
            None => self.pop().ok_or_else(|| ReaderError::UnexpectedEof {
                expected: format!("item or {terminator}"),
            })?,
            Some(kind) => self.expect(kind)?,
        };
        if self.accept(terminator).is_some() {
            return Ok(Terminated::Item(value));
        }
        let err = self.mismatch(terminator);
        self.push(Some(value));
        Err(err)
    }

    /// Read an item with a sub-parser, followed by `terminator`.
    ///
    /// ## Notes
    /// - Failure here is irrecoverable: whatever `parse` consumed is not rolled back when the
    ///   terminator is missing afterwards.
    pub fn expect_terminated_with<V>(
        &mut self,
        terminator: <I::Item as Kinded>::Kind,
        parse: impl FnOnce(&mut Self) -> Result<V, ReaderError>,
    ) -> Result<Terminated<V>, ReaderError> {
        if self.accept(terminator).is_some() {
            return Ok(Terminated::Immediate);
        }
        let value = parse(self)?;
        if self.accept(terminator).is_some() {
            return Ok(Terminated::Item(value));
        }
        Err(self.mismatch(terminator))
    }

    /// Describe why the next item does not satisfy `expected`, without consuming it.
    pub fn mismatch(&mut self, expected: impl fmt::Display) -> ReaderError {
        match self.peek() {
            Some(item) => ReaderError::UnexpectedToken {
                expected: expected.to_string(),
                found: item.kind().to_string(),
                position: item.position(),
            },
            None => ReaderError::UnexpectedEof {
                expected: expected.to_string(),
            },
        }
    }
}

impl<I: Iterator> Iterator for Reader<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.pop()
    }
}

// ============================================================================
// Lookahead
// ============================================================================

/// Non-destructive cursor over a [`Reader`]'s buffer.
///
/// Reads the shared buffer first; past its end, pulls fresh items from the reader's source and
/// appends them to the buffer so the reader sees them later.
pub struct Lookahead<'r, I: Iterator> {
    reader: &'r mut Reader<I>,
    index: usize,
}

impl<I: Iterator> Lookahead<'_, I> {
    /// Return the item under the cursor without moving it.
    pub fn peek(&mut self) -> Option<&I::Item> {
        if self.index == self.reader.buffer.len() {
            let item = self.reader.pull()?;
            self.reader.buffer.push_back(item);
        }
        self.reader.buffer.get(self.index)
    }

    /// Move past the item under the cursor. Returns `false` at end of input.
    pub fn advance(&mut self) -> bool {
        if self.peek().is_some() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Number of items this cursor has moved past.
    pub fn inspected(&self) -> usize {
        self.index
    }
}

impl<I> Lookahead<'_, I>
where
    I: Iterator,
    I::Item: Kinded,
{
    /// Move past the item under the cursor if it has the given kind.
    pub fn accept(&mut self, kind: <I::Item as Kinded>::Kind) -> bool {
        if self.peek().is_some_and(|item| item.kind() == kind) {
            self.index += 1;
            true
        } else {
            false
        }
    }
}

impl<I> Iterator for Lookahead<'_, I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = self.peek()?.clone();
        self.index += 1;
        Some(item)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> impl Iterator<Item = char> {
        'a'..='z'
    }

    #[test]
    fn test_reads_and_terminates() {
        assert_eq!(Reader::new(std::iter::empty::<char>()).pop(), None);
        assert_eq!(Reader::new(std::iter::empty::<char>()).count(), 0);
        assert_eq!(Reader::new("hello".chars()).collect::<String>(), "hello");

        let items = vec![vec![1], vec![2, 3]];
        assert_eq!(Reader::new(items.clone().into_iter()).collect::<Vec<_>>(), items);
    }

    #[test]
    fn test_peek_does_not_advance() {
        assert_eq!(Reader::new(std::iter::empty::<char>()).peek(), None);

        let mut reader = Reader::new("hello".chars());
        assert_eq!(reader.peek(), Some(&'h'));
        assert_eq!(reader.peek(), Some(&'h'));
        assert_eq!(reader.pop(), Some('h'));
        assert_eq!(reader.peek(), Some(&'e'));
        assert_eq!(reader.pop(), Some('e'));
    }

    #[test]
    fn test_push_undoes_pop() {
        let mut reader = Reader::new("hello".chars());
        let first = reader.pop();
        reader.push(first);
        reader.push(None);
        assert_eq!(reader.peek(), Some(&'h'));
        assert_eq!(reader.collect::<String>(), "hello");
    }

    #[test]
    fn test_lookahead_is_independent_of_reader() {
        let mut reader = Reader::new("hello".chars());
        assert_eq!(reader.lookahead().collect::<String>(), "hello");
        assert_eq!(reader.pop(), Some('h'));
        assert_eq!(reader.lookahead().collect::<String>(), "ello");
        assert_eq!(reader.collect::<String>(), "ello");

        let mut reader = Reader::new("hello".chars());
        let mut lookahead = reader.lookahead();
        assert_eq!(lookahead.peek(), Some(&'h'));
        assert_eq!(lookahead.next(), Some('h'));
        assert_eq!(reader.collect::<String>(), "hello");

        // Lookahead starting over an already-filled buffer.
        let mut reader = Reader::new("hello".chars());
        reader.peek();
        let mut lookahead = reader.lookahead();
        assert_eq!(lookahead.peek(), Some(&'h'));
        assert_eq!(lookahead.next(), Some('h'));
        assert_eq!(lookahead.next(), Some('e'));
        assert_eq!(lookahead.inspected(), 2);

        let mut reader = Reader::new(std::iter::empty::<char>());
        assert_eq!(reader.lookahead().count(), 0);
    }

    #[test]
    fn test_lookahead_keeps_pulled_items_buffered() {
        let mut reader = Reader::new("abc".chars());
        {
            let mut lookahead = reader.lookahead();
            assert!(lookahead.accept('a'));
            assert!(!lookahead.accept('c'));
            assert!(lookahead.advance());
        }
        assert_eq!(reader.buffered(), 3);
        assert_eq!(reader.pop(), Some('a'));
        assert_eq!(reader.buffered(), 2);
    }

    #[test]
    fn test_source_not_polled_after_exhaustion() {
        let mut polls = 0;
        let source = std::iter::from_fn(|| {
            polls += 1;
            None::<char>
        });
        let mut reader = Reader::new(source);
        assert_eq!(reader.pop(), None);
        assert_eq!(reader.peek(), None);
        assert_eq!(reader.lookahead().next(), None);
        drop(reader);
        assert_eq!(polls, 1);
    }

    #[test]
    fn test_get_ref_and_into_inner_expose_unbuffered_source() {
        let mut reader = Reader::new(vec![1, 2, 3, 4].into_iter());
        let _ = reader.lookahead().nth(1);
        assert_eq!(reader.get_ref().len(), 2);
        assert_eq!(reader.into_inner().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn test_accept_and_expect() {
        let mut reader = Reader::new("hello".chars());
        assert_eq!(reader.accept('h'), Some('h'));
        assert_eq!(reader.accept('h'), None);
        assert_eq!(reader.peek(), Some(&'e'));
        assert_eq!(reader.expect('e'), Ok('e'));
        assert!(matches!(
            reader.expect('h'),
            Err(ReaderError::UnexpectedToken { ref found, .. }) if found == "l"
        ));
        // A failed expect leaves the stream untouched.
        assert_eq!(reader.pop(), Some('l'));

        let mut reader = Reader::new(std::iter::empty::<char>());
        assert_eq!(reader.accept('a'), None);
        assert!(matches!(reader.expect('a'), Err(ReaderError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_accept_with_custom_matcher() {
        let mut reader = Reader::new([4u8, 3, 1, 1, 0].into_iter().map(char::from));
        assert_eq!(reader.accept_with(|c| *c == '\u{3}'), None);
        assert_eq!(reader.accept_with(|c| *c == '\u{4}'), Some('\u{4}'));
        assert!(reader.expect('\u{4}').is_err());
        assert_eq!(reader.expect('\u{3}'), Ok('\u{3}'));
    }

    #[test]
    fn test_expect_with_custom_matcher() {
        let mut reader = Reader::new("a1".chars());
        assert_eq!(
            reader.expect_with("digit", |c| c.is_ascii_digit()),
            Err(ReaderError::UnexpectedToken {
                expected: "digit".to_string(),
                found: "a".to_string(),
                position: None,
            })
        );
        assert_eq!(reader.expect_with("letter", |c| c.is_alphabetic()), Ok('a'));
        assert_eq!(reader.expect_with("digit", |c| c.is_ascii_digit()), Ok('1'));
        assert!(matches!(
            reader.expect_with("digit", |c| c.is_ascii_digit()),
            Err(ReaderError::UnexpectedEof { ref expected }) if expected == "digit"
        ));
    }

    #[test]
    fn test_accept_terminated() {
        let mut reader = Reader::new(alphabet());
        assert_eq!(reader.accept_terminated('z', None), None);
        assert_eq!(reader.accept_terminated('c', None), None);
        assert_eq!(reader.peek(), Some(&'a'));
        assert_eq!(
            reader.accept_terminated('a', None).map(|t| t.unwrap_or('?')),
            Some('?')
        );
        assert_eq!(reader.peek(), Some(&'b'));
        assert_eq!(reader.accept_terminated('c', None), Some(Terminated::Item('b')));
        assert_eq!(reader.accept_terminated('e', Some('d')), Some(Terminated::Item('d')));
        assert_eq!(reader.accept_terminated('g', Some('d')), None);
        assert_eq!(reader.peek(), Some(&'f'));
    }

    #[test]
    fn test_expect_terminated() {
        let mut reader = Reader::new("fghijk".chars());
        assert!(reader.expect_terminated('a', None).is_err());
        assert!(reader.expect_terminated('h', None).is_err());
        assert!(reader.expect_terminated('h', Some('g')).is_err());
        assert_eq!(reader.expect_terminated('f', None), Ok(Terminated::Immediate));
        assert_eq!(reader.expect_terminated('h', Some('g')), Ok(Terminated::Item('g')));

        let parsed = reader.expect_terminated_with('k', |reader| {
            reader.expect('i')?;
            reader.expect('j')?;
            Ok("tree")
        });
        assert_eq!(parsed, Ok(Terminated::Item("tree")));
        assert_eq!(reader.pop(), None);
    }

    #[test]
    fn test_expect_terminated_with_does_not_roll_back() {
        let mut reader = Reader::new("ijx".chars());
        let parsed = reader.expect_terminated_with('k', |reader| {
            reader.expect('i')?;
            reader.expect('j')
        });
        assert!(matches!(
            parsed,
            Err(ReaderError::UnexpectedToken { ref expected, ref found, .. }) if expected == "k" && found == "x"
        ));
        assert_eq!(reader.pop(), Some('x'));
    }

    #[test]
    fn test_expect_terminated_reports_eof() {
        let mut reader = Reader::new("a".chars());
        assert!(matches!(
            reader.expect_terminated(';', None),
            Err(ReaderError::UnexpectedEof { ref expected }) if expected == ";"
        ));
        assert_eq!(reader.pop(), Some('a'));
        assert!(matches!(
            reader.expect_terminated(';', None),
            Err(ReaderError::UnexpectedEof { .. })
        ));
    }
}
