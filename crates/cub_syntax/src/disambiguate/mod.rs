//! Category disambiguation for ambiguous token prefixes.
//!
//! A statement starting with a type or identifier may turn out to be a definition, a function
//! definition or an expression; inside a parenthesized group the same prefix may be a named
//! parameter, a bare type or a call argument. The entry points here decide which, by narrowing a
//! [`CategorySet`] token by token over a [`Lookahead`] and recursing into nested groups.
//!
//! ## Notes
//! - Nothing is consumed: every inspected token stays in the reader's buffer, and the parser reads
//!   the same tokens again once it knows which production to use.
//! - A `None` verdict means no production matches. It is data, not an error; the caller decides how
//!   to report it.
//! - The three entry points deliberately differ in their fallbacks (a missing `)` is an expression
//!   at statement level but an object construction under `new`). Do not unify them.
//!
//! ## Examples
//! ```rust
//! use cub_syntax::disambiguate::{NewCategory, disambiguate_new};
//! use cub_syntax::lexer::Scanner;
//! use cub_syntax::reader::Reader;
//!
//! let mut reader = Reader::new(Scanner::new("Type(Type)[]".chars()));
//! assert_eq!(disambiguate_new(&mut reader.lookahead()), NewCategory::NewArray);
//! ```

mod category;

#[cfg(test)]
mod tests;

pub use category::{Category, CategorySet, NewCategory};

use category::Detection;

use crate::lexer::tokens::{Token, TokenKind};
use crate::reader::Lookahead;
use cub_core::lang::operators::OperatorId;
use cub_core::lang::punctuation::PunctuationId;

const IDENT: TokenKind = TokenKind::Ident;
const TYPE: TokenKind = TokenKind::Type;
const ASSIGN: TokenKind = TokenKind::Operator(OperatorId::Assign);
const COMMA: TokenKind = TokenKind::Punctuation(PunctuationId::Comma);
const SEMICOLON: TokenKind = TokenKind::Punctuation(PunctuationId::Semicolon);
const LPAREN: TokenKind = TokenKind::Punctuation(PunctuationId::LParen);
const RPAREN: TokenKind = TokenKind::Punctuation(PunctuationId::RParen);
const LBRACKET: TokenKind = TokenKind::Punctuation(PunctuationId::LBracket);
const RBRACKET: TokenKind = TokenKind::Punctuation(PunctuationId::RBracket);
const LBRACE: TokenKind = TokenKind::Punctuation(PunctuationId::LBrace);

const ARGUMENT: CategorySet = CategorySet::ARGUMENT;
const DEFINE: CategorySet = CategorySet::DEFINE;
const EXPRESSION: CategorySet = CategorySet::EXPRESSION;
const FUNCTION: CategorySet = CategorySet::FUNCTION;
const PARAMETER: CategorySet = CategorySet::PARAMETER;

/// Deepest group nesting the disambiguator follows. Past it the item resolves to no category, so
/// the entry points answer `None` (or `NewObject` under `new`) instead of recursing further.
pub const MAX_NESTING: usize = 256;

// ============================================================================
// Entry points
// ============================================================================

/// Classify the statement starting at the cursor as a definition, function definition or
/// expression.
///
/// ## Returns
/// - `Some(Category::Define)` for `Type name;`, `Type(Param) name = value;`, `Type[] a, b;`.
/// - `Some(Category::Function)` for `void name(...)`.
/// - `Some(Category::Expression)` for anything that does not start with a type or identifier, and
///   for calls, member accesses and the like.
/// - `None` when the narrowed set becomes empty, e.g. a parameter-only group followed by an
///   operator (`Type(Elem[]) + 1`).
pub fn disambiguate_statement<I>(look: &mut Lookahead<'_, I>) -> Option<Category>
where
    I: Iterator<Item = Token>,
{
    let verdict = statement(look);
    tracing::trace!(verdict = ?verdict, inspected = look.inspected(), "disambiguated statement");
    verdict
}

/// Classify an operand in expression position as an anonymous function literal or an ordinary
/// expression.
///
/// ## Returns
/// - `Some(Category::Function)` for a leading primitive type, a named return type
///   (`Type name(...)`), an array return type (`Type[]`), a group holding parameters, or an empty
///   parameter list followed by a body (`name() {`).
/// - `Some(Category::Expression)` otherwise.
/// - `None` for a body after a non-empty group (`f(x) {`) or an unresolvable group item.
pub fn disambiguate_expression<I>(look: &mut Lookahead<'_, I>) -> Option<Category>
where
    I: Iterator<Item = Token>,
{
    let verdict = expression(look);
    tracing::trace!(verdict = ?verdict, inspected = look.inspected(), "disambiguated expression");
    verdict
}

/// Classify the operand of `new` as array or object construction.
///
/// Never fails: malformed input falls back to [`NewCategory::NewObject`] and is reported by the
/// object-construction production.
pub fn disambiguate_new<I>(look: &mut Lookahead<'_, I>) -> NewCategory
where
    I: Iterator<Item = Token>,
{
    let verdict = new_operand(look);
    tracing::trace!(verdict = ?verdict, inspected = look.inspected(), "disambiguated new");
    verdict
}

// ============================================================================
// Decision procedures
// ============================================================================

fn accept_name<I>(look: &mut Lookahead<'_, I>) -> bool
where
    I: Iterator<Item = Token>,
{
    look.accept(TYPE) || look.accept(IDENT)
}

fn statement<I>(look: &mut Lookahead<'_, I>) -> Option<Category>
where
    I: Iterator<Item = Token>,
{
    if !accept_name(look) {
        // Neither a definition nor a function definition can start this way.
        return Some(Category::Expression);
    }

    let mut restrict = DEFINE | EXPRESSION | FUNCTION;

    while look.accept(LPAREN) {
        if look.accept(RPAREN) {
            continue;
        }
        loop {
            match classify_nested(look, restrict.remap(), 1) {
                Detection::Empty | Detection::Resolved(Category::Define) => return None,
                // A named parameter: this group is a parameter list.
                Detection::Resolved(Category::Argument) => return (restrict & FUNCTION).single(),
                Detection::Resolved(Category::Expression | Category::Function) => {
                    return (restrict & EXPRESSION).single();
                }
                Detection::Resolved(Category::Parameter) => restrict &= DEFINE | FUNCTION,
                Detection::Continue => {}
            }
            if !look.accept(COMMA) {
                break;
            }
        }
        if !look.accept(RPAREN) {
            return (restrict & EXPRESSION).single();
        }
    }

    if look.accept(LBRACKET) {
        if !look.accept(RBRACKET) {
            return (restrict & EXPRESSION).single();
        }
        restrict.remove(EXPRESSION);
    }

    if look.accept(IDENT) {
        if look.accept(ASSIGN) || look.accept(COMMA) || look.accept(SEMICOLON) {
            return Some(Category::Define);
        }
        if look.accept(LPAREN) {
            return Some(Category::Function);
        }
    }

    (restrict & EXPRESSION).single()
}

fn expression<I>(look: &mut Lookahead<'_, I>) -> Option<Category>
where
    I: Iterator<Item = Token>,
{
    // Only a function signature can begin with a primitive type in expression position.
    if look.accept(TYPE) {
        return Some(Category::Function);
    }
    if !look.accept(IDENT) {
        return Some(Category::Expression);
    }

    let mut was_empty = false;
    while look.accept(LPAREN) {
        if look.accept(RPAREN) {
            was_empty = true;
            continue;
        }
        loop {
            match classify_nested(look, CategorySet::ANY - DEFINE, 1) {
                Detection::Empty | Detection::Resolved(Category::Define) => return None,
                Detection::Resolved(Category::Argument | Category::Parameter) => return Some(Category::Function),
                Detection::Resolved(Category::Expression | Category::Function) => {
                    return Some(Category::Expression);
                }
                Detection::Continue => {}
            }
            if !look.accept(COMMA) {
                break;
            }
        }
        if !look.accept(RPAREN) {
            return Some(Category::Expression);
        }
        was_empty = false;
    }

    if look.accept(LBRACKET) {
        return Some(if look.accept(RBRACKET) {
            Category::Function
        } else {
            Category::Expression
        });
    }
    if look.accept(IDENT) {
        return Some(Category::Function);
    }
    if look.accept(LBRACE) {
        return was_empty.then_some(Category::Function);
    }
    Some(Category::Expression)
}

fn new_operand<I>(look: &mut Lookahead<'_, I>) -> NewCategory
where
    I: Iterator<Item = Token>,
{
    // Primitives are only ever array-constructed.
    if look.accept(TYPE) {
        return NewCategory::NewArray;
    }
    if !look.accept(IDENT) {
        return NewCategory::NewObject;
    }

    if look.accept(LPAREN) {
        if !look.accept(RPAREN) {
            loop {
                match classify_nested(look, EXPRESSION | FUNCTION | PARAMETER, 1) {
                    // A type parameter: the whole operand is an element type.
                    Detection::Resolved(Category::Parameter) => return NewCategory::NewArray,
                    Detection::Resolved(_) | Detection::Empty => return NewCategory::NewObject,
                    Detection::Continue => {}
                }
                if !look.accept(COMMA) {
                    break;
                }
            }
            if !look.accept(RPAREN) {
                return NewCategory::NewObject;
            }
        }
        // A second group means the first one was type parameters.
        if look.accept(LPAREN) {
            return NewCategory::NewArray;
        }
    }

    if look.accept(LBRACKET) {
        NewCategory::NewArray
    } else {
        NewCategory::NewObject
    }
}

/// Classify one item of a parenthesized group, or anything else that could be a type, named
/// parameter or expression.
///
/// `depth` counts the enclosing groups. Every call consumes at least one token or returns, and no
/// call goes deeper than [`MAX_NESTING`].
fn classify_nested<I>(look: &mut Lookahead<'_, I>, mut restrict: CategorySet, depth: usize) -> Detection
where
    I: Iterator<Item = Token>,
{
    if depth > MAX_NESTING {
        return Detection::Empty;
    }
    if !accept_name(look) {
        return (restrict & EXPRESSION).into();
    }

    let mut was_empty = false;
    while look.accept(LPAREN) {
        if look.accept(RPAREN) {
            was_empty = true;
            continue;
        }
        loop {
            match classify_nested(look, restrict.remap(), depth + 1) {
                // Nested items never resolve to a definition.
                Detection::Empty | Detection::Resolved(Category::Define) => return Detection::Empty,
                Detection::Resolved(Category::Argument) => return (restrict & FUNCTION).into(),
                Detection::Resolved(Category::Expression | Category::Function) => {
                    return (restrict & EXPRESSION).into();
                }
                Detection::Resolved(Category::Parameter) => restrict &= ARGUMENT | FUNCTION | PARAMETER,
                Detection::Continue => {}
            }
            if !look.accept(COMMA) {
                break;
            }
        }
        if !look.accept(RPAREN) {
            return (restrict & EXPRESSION).into();
        }
        was_empty = false;
    }

    let mut has_array = false;
    if look.accept(LBRACKET) {
        if !look.accept(RBRACKET) {
            // Indexing.
            return (restrict & EXPRESSION).into();
        }
        has_array = true;
        restrict.remove(EXPRESSION);
    }

    if look.accept(IDENT) {
        if look.accept(LPAREN) {
            return (restrict & FUNCTION).into();
        }
        return (restrict & ARGUMENT).into();
    }

    if look.accept(LBRACE) {
        if was_empty && !has_array {
            return (restrict & FUNCTION).into();
        }
        return Detection::Empty;
    }

    (restrict & (EXPRESSION | PARAMETER)).into()
}
