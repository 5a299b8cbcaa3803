//! Grammar categories and restrict sets.

use std::fmt;

use bitflags::bitflags;

/// A grammar role an ambiguous token prefix may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A named formal parameter inside a parameter list, e.g. `Type name`.
    Argument,
    /// A variable definition statement, e.g. `Type name = value;`.
    Define,
    /// A plain expression.
    Expression,
    /// A function definition or anonymous function literal.
    Function,
    /// A bare type, e.g. a type parameter or an unnamed parameter.
    Parameter,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Argument => "argument",
            Category::Define => "define",
            Category::Expression => "expression",
            Category::Function => "function",
            Category::Parameter => "parameter",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of disambiguating the operand of `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewCategory {
    /// `new u8[4]`, `new Type(Type)[]`.
    NewArray,
    /// `new Type(arg)`.
    NewObject,
}

impl NewCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            NewCategory::NewArray => "new-array",
            NewCategory::NewObject => "new-object",
        }
    }
}

impl fmt::Display for NewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// The categories still possible during one disambiguation call.
    ///
    /// A set only ever shrinks within a call. The one exception is [`CategorySet::remap`], which
    /// translates the set at a parenthesis boundary.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategorySet: u8 {
        const ARGUMENT = 1 << 0;
        const DEFINE = 1 << 1;
        const EXPRESSION = 1 << 2;
        const FUNCTION = 1 << 3;
        const PARAMETER = 1 << 4;
    }
}

impl CategorySet {
    pub const ANY: CategorySet = CategorySet::all();

    /// The only category in the set, if it has exactly one.
    pub fn single(self) -> Option<Category> {
        match self {
            s if s == CategorySet::ARGUMENT => Some(Category::Argument),
            s if s == CategorySet::DEFINE => Some(Category::Define),
            s if s == CategorySet::EXPRESSION => Some(Category::Expression),
            s if s == CategorySet::FUNCTION => Some(Category::Function),
            s if s == CategorySet::PARAMETER => Some(Category::Parameter),
            _ => None,
        }
    }

    /// Categories an item of a parenthesized group may take, given the categories of the enclosing
    /// construct.
    ///
    /// - an argument's group holds parameters (`Type(Param) name`)
    /// - a definition's group holds type parameters (`Type(Param) name;`)
    /// - an expression's group holds call arguments, which are expressions or function literals
    /// - a function's group holds its named or unnamed parameters
    /// - a parameter's group holds type parameters
    pub fn remap(self) -> CategorySet {
        let mut inner = CategorySet::empty();
        if self.intersects(CategorySet::ARGUMENT | CategorySet::DEFINE | CategorySet::PARAMETER) {
            inner |= CategorySet::PARAMETER;
        }
        if self.contains(CategorySet::EXPRESSION) {
            inner |= CategorySet::EXPRESSION | CategorySet::FUNCTION;
        }
        if self.contains(CategorySet::FUNCTION) {
            inner |= CategorySet::ARGUMENT | CategorySet::PARAMETER;
        }
        inner
    }
}

impl From<Category> for CategorySet {
    fn from(category: Category) -> Self {
        match category {
            Category::Argument => CategorySet::ARGUMENT,
            Category::Define => CategorySet::DEFINE,
            Category::Expression => CategorySet::EXPRESSION,
            Category::Function => CategorySet::FUNCTION,
            Category::Parameter => CategorySet::PARAMETER,
        }
    }
}

/// Result of classifying one item of a parenthesized group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Detection {
    Resolved(Category),
    /// No category survives.
    Empty,
    /// Still ambiguous (expression or parameter); keep scanning the group.
    Continue,
}

impl From<CategorySet> for Detection {
    fn from(set: CategorySet) -> Self {
        if set.is_empty() {
            Detection::Empty
        } else {
            set.single().map_or(Detection::Continue, Detection::Resolved)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        assert_eq!(CategorySet::FUNCTION.single(), Some(Category::Function));
        assert_eq!(CategorySet::empty().single(), None);
        assert_eq!((CategorySet::EXPRESSION | CategorySet::PARAMETER).single(), None);
        for category in [
            Category::Argument,
            Category::Define,
            Category::Expression,
            Category::Function,
            Category::Parameter,
        ] {
            assert_eq!(CategorySet::from(category).single(), Some(category));
        }
    }

    #[test]
    fn test_remap_statement_set() {
        let statement = CategorySet::DEFINE | CategorySet::EXPRESSION | CategorySet::FUNCTION;
        assert_eq!(
            statement.remap(),
            CategorySet::ARGUMENT | CategorySet::EXPRESSION | CategorySet::FUNCTION | CategorySet::PARAMETER
        );
        assert_eq!(
            (CategorySet::DEFINE | CategorySet::FUNCTION).remap(),
            CategorySet::ARGUMENT | CategorySet::PARAMETER
        );
    }

    #[test]
    fn test_remap_nested_sets() {
        assert_eq!(CategorySet::ARGUMENT.remap(), CategorySet::PARAMETER);
        assert_eq!(CategorySet::PARAMETER.remap(), CategorySet::PARAMETER);
        assert_eq!(
            CategorySet::EXPRESSION.remap(),
            CategorySet::EXPRESSION | CategorySet::FUNCTION
        );
        assert_eq!(CategorySet::empty().remap(), CategorySet::empty());
    }

    #[test]
    fn test_detection_from_set() {
        assert_eq!(Detection::from(CategorySet::empty()), Detection::Empty);
        assert_eq!(
            Detection::from(CategorySet::PARAMETER),
            Detection::Resolved(Category::Parameter)
        );
        assert_eq!(
            Detection::from(CategorySet::EXPRESSION | CategorySet::PARAMETER),
            Detection::Continue
        );
    }
}
