//! Behavior of the arithmetic demo grammar.

use descent::grammars::calc::eval;
use descent::ErrorKind;

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(eval("1 + 2 * 3").unwrap(), 7.0);
    assert_eq!(eval("1 + 10 / 5 * 2").unwrap(), 5.0);
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(eval("(1 + 2) * 3").unwrap(), 9.0);
    assert_eq!(eval("((2))").unwrap(), 2.0);
}

#[test]
fn subtraction_and_division_are_left_associative() {
    assert_eq!(eval("2 - 3 - 4").unwrap(), -5.0);
    assert_eq!(eval("12 / 4 / 3").unwrap(), 1.0);
}

#[test]
fn fractional_results_and_literals() {
    assert_eq!(eval("10 / 4").unwrap(), 2.5);
    assert_eq!(eval("-3.5 + 1").unwrap(), -2.5);
    assert_eq!(eval("0.25 * 4").unwrap(), 1.0);
}

#[test]
fn signed_numbers() {
    assert_eq!(eval("2 * -3").unwrap(), -6.0);
    assert_eq!(eval("1 - -2").unwrap(), 3.0);
    assert_eq!(eval("+5").unwrap(), 5.0);
}

#[test]
fn whitespace_is_trivia_everywhere() {
    assert_eq!(eval(" ( 1+ 2 ) *3 ").unwrap(), 9.0);
}

#[test]
fn division_by_zero_follows_float_semantics() {
    assert_eq!(eval("1 / 0").unwrap(), f64::INFINITY);
}

#[test]
fn empty_input_fails() {
    let err = eval("").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EndOfInput { .. }));
}

#[test]
fn dangling_operator_fails_past_the_operator() {
    let err = eval("1 +").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EndOfInput { .. }));
    assert_eq!(err.position, 3);
}

#[test]
fn unclosed_parenthesis_fails() {
    assert!(eval("(1 + 2").is_err());
}

#[test]
fn adjacent_numbers_are_trailing_input() {
    let err = eval("1 2").unwrap_err();
    assert_eq!(err.kind, ErrorKind::TrailingInput);
    assert_eq!(err.position, 2);
}
