use super::*;
use crate::lexer::{Scanner, lex};
use crate::reader::Reader;

/// Run an entry point over `code` and check that the reader still yields every token afterwards.
fn run<'c, T>(code: &'c str, detect: impl FnOnce(&mut Lookahead<'_, Scanner<std::str::Chars<'c>>>) -> T) -> T {
    let mut reader = Reader::new(Scanner::new(code.chars()));
    let verdict = detect(&mut reader.lookahead());
    let replayed: Vec<Token> = reader.collect();
    let expected = lex(code).unwrap_or_else(|errs| panic!("lex({code:?}) failed: {errs:?}"));
    assert_eq!(replayed, expected, "tokens lost or reordered after disambiguating {code:?}");
    verdict
}

fn statement(code: &str) -> Option<Category> {
    run(code, |look| disambiguate_statement(look))
}

fn expression(code: &str) -> Option<Category> {
    run(code, |look| disambiguate_expression(look))
}

fn new(code: &str) -> NewCategory {
    run(code, |look| disambiguate_new(look))
}

// ----------------------------------------------------------------------------
// Statements
// ----------------------------------------------------------------------------

#[test]
fn test_statement_basic() {
    assert_eq!(statement("obj.value;"), Some(Category::Expression));
    assert_eq!(statement("func();"), Some(Category::Expression));
    assert_eq!(statement("void func() {}"), Some(Category::Function));
    assert_eq!(statement("Type thing;"), Some(Category::Define));
}

#[test]
fn test_statement_complex() {
    assert_eq!(statement("Type(Type()) fn() {}"), Some(Category::Function));
    assert_eq!(statement("Type(Type()) fn;"), Some(Category::Define));
    assert_eq!(statement("Type(Type()) fn = 4;"), Some(Category::Define));
    assert_eq!(statement("Type(Type()) fn, fn2;"), Some(Category::Define));
    assert_eq!(statement("func(func(value + value))"), Some(Category::Expression));
}

#[test]
fn test_statement_non_name_start_is_expression() {
    assert_eq!(statement("4 + 4;"), Some(Category::Expression));
    assert_eq!(statement("(a);"), Some(Category::Expression));
    assert_eq!(statement(""), Some(Category::Expression));
}

#[test]
fn test_statement_arrays() {
    assert_eq!(statement("u8[] bytes;"), Some(Category::Define));
    assert_eq!(statement("Type[] make() {}"), Some(Category::Function));
    assert_eq!(statement("values[4] = 5;"), Some(Category::Expression));
    // `[]` rules out an expression, and nothing else fits.
    assert_eq!(statement("Type[] + 1;"), None);
}

#[test]
fn test_statement_group_items() {
    // A named parameter makes the group a parameter list.
    assert_eq!(statement("void(u8 x) callback;"), Some(Category::Function));
    // A call argument makes the whole thing an expression.
    assert_eq!(statement("print(4);"), Some(Category::Expression));
    // A parameter-only item rules out an expression.
    assert_eq!(statement("Type(Elem[]) x;"), Some(Category::Define));
    assert_eq!(statement("Type(Elem[]) + 1;"), None);
    // Several ambiguous items.
    assert_eq!(statement("Map(Key, Value) table;"), Some(Category::Define));
    assert_eq!(statement("Map(key, value);"), Some(Category::Expression));
}

#[test]
fn test_statement_unclosed_group() {
    assert_eq!(statement("call(a;"), Some(Category::Expression));
    // A named parameter decides before the missing `)` is noticed.
    assert_eq!(statement("call(a b"), Some(Category::Function));
}

#[test]
fn test_statement_nested_body_without_empty_list_is_empty() {
    assert_eq!(statement("Type(x(y) {}) z;"), None);
}

// ----------------------------------------------------------------------------
// Expressions
// ----------------------------------------------------------------------------

#[test]
fn test_expression() {
    assert_eq!(expression("4"), Some(Category::Expression));
    assert_eq!(expression("a + b"), Some(Category::Expression));
    assert_eq!(expression("a b() {}"), Some(Category::Function));
    assert_eq!(expression("a() {}"), Some(Category::Function));
}

#[test]
fn test_expression_function_literals() {
    assert_eq!(expression("u8(u8 x) {}"), Some(Category::Function));
    assert_eq!(expression("Type(u8 x) {}"), Some(Category::Function));
    assert_eq!(expression("Type[] () {}"), Some(Category::Function));
    assert_eq!(expression("Type(Elem[])"), Some(Category::Function));
}

#[test]
fn test_expression_calls_and_indexing() {
    assert_eq!(expression("f(1, 2)"), Some(Category::Expression));
    assert_eq!(expression("f(a)(b)"), Some(Category::Expression));
    assert_eq!(expression("items[0]"), Some(Category::Expression));
    assert_eq!(expression("f(a"), Some(Category::Expression));
}

#[test]
fn test_expression_body_after_arguments_is_empty() {
    assert_eq!(expression("f(x) {}"), None);
    assert_eq!(expression("f()(x) {}"), None);
}

// ----------------------------------------------------------------------------
// new
// ----------------------------------------------------------------------------

#[test]
fn test_new_object() {
    for code in [
        "Type()",
        "Type(arg)",
        "Type(arg1, arg2)",
        "Type(arg1 + arg2)",
        "Type(new Type())",
    ] {
        assert_eq!(new(code), NewCategory::NewObject, "new {code}");
    }
}

#[test]
fn test_new_array() {
    for code in [
        "u8[4]",
        "u8[length]",
        "u8[new Type()]",
        "Type[4]",
        "Type[length]",
        "Type[new Type()]",
        "Type()[]",
        "Type(Type)[]",
        "Type(Type())[]",
        "Type(Type, Type)[]",
        "Type(Type(), Type)[]",
        "Type()()[]",
        "Type(Type)()[]",
        "Type()(Type)[]",
        "Type(Type)(Type)[]",
        "Type(Type, Type)(Type)[]",
    ] {
        assert_eq!(new(code), NewCategory::NewArray, "new {code}");
    }
}

#[test]
fn test_new_parameter_item_forces_array() {
    assert_eq!(new("Type(Elem[])"), NewCategory::NewArray);
}

#[test]
fn test_new_malformed_falls_back_to_object() {
    assert_eq!(new("4"), NewCategory::NewObject);
    assert_eq!(new("Type(arg"), NewCategory::NewObject);
    assert_eq!(new("Type(x y) {}"), NewCategory::NewObject);
    assert_eq!(new(""), NewCategory::NewObject);
}

// ----------------------------------------------------------------------------
// Buffer behaviour
// ----------------------------------------------------------------------------

#[test]
fn test_parser_resumes_at_first_token() {
    let mut reader = Reader::new(Scanner::new("Type(Type()) fn = 4; next".chars()));
    assert_eq!(disambiguate_statement(&mut reader.lookahead()), Some(Category::Define));
    assert_eq!(reader.pop().and_then(|t| t.ident_name().map(str::to_owned)).as_deref(), Some("Type"));
}

#[test]
fn test_lookahead_pulls_only_what_it_needs() {
    let mut reader = Reader::new(Scanner::new("Type thing; rest of the file".chars()));
    let mut look = reader.lookahead();
    assert_eq!(disambiguate_statement(&mut look), Some(Category::Define));
    assert_eq!(look.inspected(), 3);
    assert_eq!(reader.buffered(), 3);
}

#[test]
fn test_disambiguation_over_partially_consumed_reader() {
    let tokens = lex("x; Type thing;").unwrap();
    let mut reader = Reader::new(tokens.into_iter());
    reader.pop();
    reader.pop();
    assert_eq!(disambiguate_statement(&mut reader.lookahead()), Some(Category::Define));
    assert_eq!(reader.count(), 3);
}

// ----------------------------------------------------------------------------
// Nesting limit
// ----------------------------------------------------------------------------

fn nested_define(levels: usize) -> String {
    format!("{}x{} name;", "Type(".repeat(levels), ")".repeat(levels))
}

#[test]
fn test_nesting_up_to_the_limit_resolves() {
    assert_eq!(statement(&nested_define(MAX_NESTING)), Some(Category::Define));
}

#[test]
fn test_nesting_past_the_limit_gives_up() {
    assert_eq!(statement(&nested_define(MAX_NESTING + 1)), None);
}

#[test]
fn test_unbounded_nesting_returns_instead_of_overflowing() {
    let unclosed = "f(".repeat(200_000);
    assert_eq!(statement(&unclosed), None);
    assert_eq!(expression(&unclosed), None);
    assert_eq!(new(&unclosed), NewCategory::NewObject);
}
