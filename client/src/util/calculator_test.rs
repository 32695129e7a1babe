use super::*;

#[test]
fn respects_precedence_and_parentheses() {
    assert_eq!(evaluate("2+3*4"), Ok(14.0));
    assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
    assert_eq!(evaluate("10 - 4 - 3"), Ok(3.0));
    assert_eq!(evaluate("2^3^2"), Ok(512.0));
    assert_eq!(evaluate("7 % 4"), Ok(3.0));
}

#[test]
fn handles_unary_signs_and_decimals() {
    assert_eq!(evaluate("-3 + 5"), Ok(2.0));
    assert_eq!(evaluate("-(2*3)"), Ok(-6.0));
    assert_eq!(evaluate("0.5 * 4"), Ok(2.0));
    assert_eq!(evaluate(".25*4"), Ok(1.0));
}

#[test]
fn keypad_symbols_are_aliases() {
    assert_eq!(evaluate("6×7"), Ok(42.0));
    assert_eq!(evaluate("9÷3"), Ok(3.0));
}

#[test]
fn reports_malformed_input() {
    assert_eq!(evaluate(""), Err(CalcError::Empty));
    assert_eq!(evaluate("   "), Err(CalcError::Empty));
    assert_eq!(evaluate("2+"), Err(CalcError::UnexpectedEnd));
    assert_eq!(evaluate("(1+2"), Err(CalcError::UnbalancedParens));
    assert_eq!(evaluate("1+2)"), Err(CalcError::UnbalancedParens));
    assert_eq!(evaluate("2a"), Err(CalcError::UnexpectedChar('a')));
    assert_eq!(evaluate("1.2.3"), Err(CalcError::UnexpectedChar('.')));
}

#[test]
fn division_by_zero_is_an_error() {
    assert_eq!(evaluate("1/0"), Err(CalcError::DivisionByZero));
    assert_eq!(evaluate("5%0"), Err(CalcError::DivisionByZero));
}

#[test]
fn formats_results_for_display() {
    assert_eq!(format_result(42.0), "42");
    assert_eq!(format_result(-3.0), "-3");
    assert_eq!(format_result(0.1 + 0.2), "0.3");
    assert_eq!(format_result(1.0 / 3.0), "0.3333333333");
}

#[test]
fn deep_nesting_is_rejected_without_overflow() {
    let parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(evaluate(&parens), Err(CalcError::TooDeep));
    assert_eq!(evaluate(&format!("{}1", "-".repeat(10_000))), Err(CalcError::TooDeep));

    let shallow = format!("{}1{}", "(".repeat(MAX_DEPTH - 1), ")".repeat(MAX_DEPTH - 1));
    assert_eq!(evaluate(&shallow), Ok(1.0));
}
