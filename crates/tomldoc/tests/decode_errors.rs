//! Error rendering: positions, message wording, and first-error ordering.

use tomldoc::from_str;

fn err(input: &str) -> String {
    from_str(input).unwrap_err().to_string()
}

#[test]
fn missing_value_points_at_the_gap() {
    assert_eq!(err("a = \n"), "1:5: parse error: invalid value");
}

#[test]
fn duplicate_key_reports_the_second_occurrence() {
    assert_eq!(err("x = 1\nx = 2\n"), "2:1: key error: x is already assigned");
}

#[test]
fn the_earliest_error_in_source_order_wins() {
    assert_eq!(
        err("x = 1\nx = 2\ny = 1\ny = 2\n"),
        "2:1: key error: x is already assigned"
    );
}

#[test]
fn non_bare_keys_are_quoted_in_messages() {
    assert_eq!(
        err("\"a b\" = 1\n\"a b\" = 2\n"),
        "2:1: key error: \"a b\" is already assigned"
    );
}

#[test]
fn leading_zeros_are_rejected() {
    assert_eq!(err("n = 01\n"), "1:5: parse error: leading zeros are not allowed");
}

#[test]
fn integer_overflow_is_reported() {
    assert_eq!(
        err("n = 9223372036854775808\n"),
        "1:5: parse error: integer out of range"
    );
}

#[test]
fn dangling_underscores_are_rejected() {
    assert!(err("n = 1__2\n").contains("underscore"));
    assert!(err("n = _1\n").contains("parse error"));
    assert!(err("n = 1_\n").contains("parse error"));
}

#[test]
fn unterminated_strings_are_rejected() {
    assert!(err("s = \"abc\n").contains("unterminated string"));
    assert!(err("s = 'abc").contains("unterminated string"));
}

#[test]
fn invalid_escapes_are_rejected() {
    assert!(err("s = \"\\x41\"\n").contains("invalid escape sequence"));
    assert!(err("s = \"\\uD800\"\n").contains("invalid unicode escape"));
}

#[test]
fn control_characters_are_rejected() {
    assert!(err("s = \"a\u{1}b\"\n").contains("control character in string"));
    assert!(err("# comment \u{7f}\n").contains("control character in comment"));
}

#[test]
fn inline_table_trailing_comma_is_rejected() {
    assert!(err("t = {a = 1,}\n").contains("expected key"));
}

#[test]
fn inline_table_newline_is_rejected() {
    assert!(err("t = {a = 1,\nb = 2}\n").contains("parse error"));
}

#[test]
fn junk_after_a_value_is_rejected() {
    assert_eq!(err("a = 1 b = 2\n"), "1:7: parse error: expected newline");
}

#[test]
fn unclosed_header_is_rejected() {
    assert_eq!(err("[a\n"), "1:3: parse error: expected ']'");
}

#[test]
fn array_table_brackets_must_be_adjacent() {
    assert!(err("[[a] ]\n").contains("expected ']]'"));
}

#[test]
fn bare_carriage_return_is_rejected() {
    assert!(err("a = 1\rb = 2\n").contains("bare carriage return"));
}

#[test]
fn datetime_range_errors_point_at_the_literal() {
    assert_eq!(err("d = 2021-02-30\n"), "1:5: parse error: invalid date");
    assert_eq!(err("t = 25:00:00\n"), "1:5: parse error: invalid time");
    assert_eq!(
        err("odt = 1979-05-27T00:32:00+25:00\n"),
        "1:7: parse error: invalid time offset"
    );
}
