//! Line/column tracking reader over characters, used by the scanner.

use super::{Reader, ReaderError};
use crate::position::Position;

/// A [`Reader`] over characters that tracks the position of the next character to be consumed.
///
/// ## Notes
/// - A character can only be pushed back onto the current line. Once a `'\n'` has been consumed the
///   previous line's length is gone, so pushing back at column 1 is a [`ReaderError::RewindAcrossLine`].
pub struct CharReader<I: Iterator<Item = char>> {
    inner: Reader<I>,
    line: usize,
    column: usize,
}

impl<I: Iterator<Item = char>> CharReader<I> {
    pub fn new(source: I) -> Self {
        Self {
            inner: Reader::new(source),
            line: 1,
            column: 1,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Position of the next character to be consumed.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn peek(&mut self) -> Option<char> {
        self.inner.peek().copied()
    }

    pub fn pop(&mut self) -> Option<char> {
        let c = self.inner.pop()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Push a character back onto the current line.
    ///
    /// ## Errors
    /// - [`ReaderError::RewindAcrossLine`] if nothing has been consumed on the current line. The
    ///   position is unchanged in that case.
    pub fn push(&mut self, c: Option<char>) -> Result<(), ReaderError> {
        let Some(c) = c else {
            return Ok(());
        };
        if self.column == 1 {
            return Err(ReaderError::RewindAcrossLine { line: self.line });
        }
        self.inner.push(Some(c));
        self.column -= 1;
        Ok(())
    }

    pub fn accept(&mut self, expected: char) -> Option<char> {
        self.accept_with(|c| c == expected)
    }

    pub fn accept_with(&mut self, matches: impl FnOnce(char) -> bool) -> Option<char> {
        if self.peek().is_some_and(matches) {
            self.pop()
        } else {
            None
        }
    }

    /// Skip everything up to and including the next newline (or to end of input).
    pub fn consume_line(&mut self) {
        while let Some(c) = self.pop() {
            if c == '\n' {
                break;
            }
        }
    }

    pub fn into_inner(self) -> I {
        self.inner.into_inner()
    }
}

impl<I: Iterator<Item = char>> Iterator for CharReader<I> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        self.pop()
    }
}
