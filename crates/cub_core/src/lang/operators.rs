//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with basic metadata (category and fixity).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** and exact: it does not perform longest-match
//!   scanning. The scanner decides where an operator ends.
//! - `>>` is the arithmetic (sign-propagating) shift and `>>>` the logical shift.
//! - `#` is string concatenation and `^^` is logical exclusive or.
//!
//! ## Examples
//! ```rust
//! use cub_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str(">>>="), Some(OperatorId::RShiftAssign));
//! assert_eq!(operators::as_str(OperatorId::StrConcat), "#");
//! ```

/// Define whether an operator is infix (binary), prefix/postfix (unary), or part of the ternary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    /// `++` and `--` may appear on either side of their operand.
    PrefixOrPostfix,
    Ternary,
}

/// Broad grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorCategory {
    Arithmetic,
    Bitwise,
    Logical,
    Comparison,
    Assignment,
    StringConcat,
    Conditional,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Increment,
    Decrement,

    // Bitwise
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseNot,
    LShift,
    AShift,
    RShift,

    // Logical
    And,
    Or,
    Xor,
    Not,

    // Comparison
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,

    // Assignment
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    BitwiseAndAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
    LShiftAssign,
    AShiftAssign,
    RShiftAssign,
    StrConcatAssign,

    // Strings
    StrConcat,

    // Conditional
    Ternary,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub category: OperatorCategory,
    pub fixity: Fixity,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Add, "+", OperatorCategory::Arithmetic, Fixity::Infix),
    op(OperatorId::Sub, "-", OperatorCategory::Arithmetic, Fixity::Infix),
    op(OperatorId::Mul, "*", OperatorCategory::Arithmetic, Fixity::Infix),
    op(OperatorId::Div, "/", OperatorCategory::Arithmetic, Fixity::Infix),
    op(OperatorId::Mod, "%", OperatorCategory::Arithmetic, Fixity::Infix),
    op(OperatorId::Increment, "++", OperatorCategory::Arithmetic, Fixity::PrefixOrPostfix),
    op(OperatorId::Decrement, "--", OperatorCategory::Arithmetic, Fixity::PrefixOrPostfix),
    // Bitwise
    op(OperatorId::BitwiseAnd, "&", OperatorCategory::Bitwise, Fixity::Infix),
    op(OperatorId::BitwiseOr, "|", OperatorCategory::Bitwise, Fixity::Infix),
    op(OperatorId::BitwiseXor, "^", OperatorCategory::Bitwise, Fixity::Infix),
    op(OperatorId::BitwiseNot, "~", OperatorCategory::Bitwise, Fixity::Prefix),
    op(OperatorId::LShift, "<<", OperatorCategory::Bitwise, Fixity::Infix),
    op(OperatorId::AShift, ">>", OperatorCategory::Bitwise, Fixity::Infix),
    op(OperatorId::RShift, ">>>", OperatorCategory::Bitwise, Fixity::Infix),
    // Logical
    op(OperatorId::And, "&&", OperatorCategory::Logical, Fixity::Infix),
    op(OperatorId::Or, "||", OperatorCategory::Logical, Fixity::Infix),
    op(OperatorId::Xor, "^^", OperatorCategory::Logical, Fixity::Infix),
    op(OperatorId::Not, "!", OperatorCategory::Logical, Fixity::Prefix),
    // Comparison
    op(OperatorId::Eq, "==", OperatorCategory::Comparison, Fixity::Infix),
    op(OperatorId::Ne, "!=", OperatorCategory::Comparison, Fixity::Infix),
    op(OperatorId::Lt, "<", OperatorCategory::Comparison, Fixity::Infix),
    op(OperatorId::Lte, "<=", OperatorCategory::Comparison, Fixity::Infix),
    op(OperatorId::Gt, ">", OperatorCategory::Comparison, Fixity::Infix),
    op(OperatorId::Gte, ">=", OperatorCategory::Comparison, Fixity::Infix),
    // Assignment
    op(OperatorId::Assign, "=", OperatorCategory::Assignment, Fixity::Infix),
    op(OperatorId::AddAssign, "+=", OperatorCategory::Assignment, Fixity::Infix),
    op(OperatorId::SubAssign, "-=", OperatorCategory::Assignment, Fixity::Infix),
    op(OperatorId::MulAssign, "*=", OperatorCategory::Assignment, Fixity::Infix),
    op(OperatorId::DivAssign, "/=", OperatorCategory::Assignment, Fixity::Infix),
    op(OperatorId::ModAssign, "%=", OperatorCategory::Assignment, Fixity::Infix),
    op(OperatorId::BitwiseAndAssign, "&=", OperatorCategory::Assignment, Fixity::Infix),
    op(OperatorId::BitwiseOrAssign, "|=", OperatorCategory::Assignment, Fixity::Infix),
    op(OperatorId::BitwiseXorAssign, "^=", OperatorCategory::Assignment, Fixity::Infix),
    op(OperatorId::LShiftAssign, "<<=", OperatorCategory::Assignment, Fixity::Infix),
    op(OperatorId::AShiftAssign, ">>=", OperatorCategory::Assignment, Fixity::Infix),
    op(OperatorId::RShiftAssign, ">>>=", OperatorCategory::Assignment, Fixity::Infix),
    op(OperatorId::StrConcatAssign, "#=", OperatorCategory::Assignment, Fixity::Infix),
    // Strings
    op(OperatorId::StrConcat, "#", OperatorCategory::StringConcat, Fixity::Infix),
    // Conditional
    op(OperatorId::Ternary, "?", OperatorCategory::Conditional, Fixity::Ternary),
];

/// Canonical spelling.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS
        .iter()
        .find(|o| o.id == id)
        .expect("INVARIANT: every OperatorId has an OPERATORS entry")
}

/// Resolve an operator spelling to its identifier.
///
/// ## Returns
/// - `Some(OperatorId)` if the spelling exists in [`OPERATORS`].
/// - `None` otherwise.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

/// Fixity.
pub fn fixity(id: OperatorId) -> Fixity {
    info_for(id).fixity
}

/// Return `true` if `id` assigns to its left operand.
pub fn is_assignment(id: OperatorId) -> bool {
    info_for(id).category == OperatorCategory::Assignment
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, spelling: &'static str, category: OperatorCategory, fixity: Fixity) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        category,
        fixity,
    }
}
