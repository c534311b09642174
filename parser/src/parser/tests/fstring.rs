use taipan_ast::{Constant, ConversionFlag, Expr, Located, Stmt};
use taipan_parser_core::Location;

use crate::{parse_starts_at, parse_suite, Mode};

fn parse_fstring_expr(source: &str) -> Expr {
    let mut suite = parse_suite(source).expect("f-string should parse");
    match suite.pop().expect("one statement") {
        Stmt::Expr(node) => *node.value,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

#[test]
fn test_plain_fstring() {
    let Expr::JoinedStr(joined) = parse_fstring_expr("f\"a{x}b\"\n") else {
        panic!("expected a JoinedStr");
    };
    assert_eq!(joined.values.len(), 3);
    assert!(matches!(
        &joined.values[0],
        Expr::Constant(c) if c.value == Constant::Str("a".to_owned())
    ));
    assert!(joined.values[1].is_formatted_value());
    assert!(matches!(
        &joined.values[2],
        Expr::Constant(c) if c.value == Constant::Str("b".to_owned())
    ));
}

#[test]
fn test_fstring_conversion() {
    let Expr::JoinedStr(joined) = parse_fstring_expr("f\"{x!s}\"\n") else {
        panic!("expected a JoinedStr");
    };
    let Expr::FormattedValue(value) = &joined.values[0] else {
        panic!("expected a FormattedValue");
    };
    assert_eq!(value.conversion, ConversionFlag::Str);
}

#[test]
fn test_fstring_invalid_conversion() {
    let err = parse_suite("f\"{x!z}\"\n").unwrap_err();
    assert!(err
        .to_string()
        .contains("invalid conversion character"));
}

#[test]
fn test_fstring_debug_expression() {
    // `{x=}` exposes the text (including `=`) plus a repr-converted value.
    let Expr::JoinedStr(joined) = parse_fstring_expr("f\"{x=}\"\n") else {
        panic!("expected a JoinedStr");
    };
    assert_eq!(joined.values.len(), 2);
    assert!(matches!(
        &joined.values[0],
        Expr::Constant(c) if c.value == Constant::Str("x=".to_owned())
    ));
    let Expr::FormattedValue(value) = &joined.values[1] else {
        panic!("expected a FormattedValue");
    };
    assert!(value.value.is_name());
    assert_eq!(value.conversion, ConversionFlag::Repr);
}

#[test]
fn test_fstring_debug_with_spec_keeps_no_conversion() {
    let Expr::JoinedStr(joined) = parse_fstring_expr("f\"{x=:>5}\"\n") else {
        panic!("expected a JoinedStr");
    };
    let Expr::FormattedValue(value) = &joined.values[1] else {
        panic!("expected a FormattedValue");
    };
    assert_eq!(value.conversion, ConversionFlag::None);
    assert!(value.format_spec.is_some());
}

#[test]
fn test_fstring_format_spec_nested_field() {
    let Expr::JoinedStr(joined) = parse_fstring_expr("f\"{x:{width}}\"\n") else {
        panic!("expected a JoinedStr");
    };
    let Expr::FormattedValue(value) = &joined.values[0] else {
        panic!("expected a FormattedValue");
    };
    let spec = value.format_spec.as_ref().expect("spec parsed");
    let Expr::JoinedStr(spec) = &**spec else {
        panic!("specs normalize to JoinedStr");
    };
    assert!(spec.values[0].is_formatted_value());
}

#[test]
fn test_empty_format_spec_is_empty_joined_str() {
    let Expr::JoinedStr(joined) = parse_fstring_expr("f\"{x:}\"\n") else {
        panic!("expected a JoinedStr");
    };
    let Expr::FormattedValue(value) = &joined.values[0] else {
        panic!("expected a FormattedValue");
    };
    let spec = value.format_spec.as_ref().expect("spec present");
    assert!(matches!(&**spec, Expr::JoinedStr(s) if s.values.is_empty()));
}

#[test]
fn test_doubled_braces_become_literals() {
    // The pieces fold into one constant, but the literal stays a
    // JoinedStr because an f-string was involved.
    let Expr::JoinedStr(joined) = parse_fstring_expr("f\"a{{b}}c\"\n") else {
        panic!("expected a JoinedStr");
    };
    assert_eq!(joined.values.len(), 1);
    assert!(matches!(
        &joined.values[0],
        Expr::Constant(c) if c.value == Constant::Str("a{b}c".to_owned())
    ));
}

#[test]
fn test_adjacent_string_and_fstring_concatenation() {
    let Expr::JoinedStr(joined) = parse_fstring_expr("'a' f'{x}' 'c'\n") else {
        panic!("expected a JoinedStr");
    };
    assert_eq!(joined.values.len(), 3);
    assert!(joined.values[0].is_constant());
    assert!(joined.values[1].is_formatted_value());
    assert!(joined.values[2].is_constant());
}

#[test]
fn test_concatenation_equals_original_text() {
    // Property: the concatenation of the string children equals the
    // concatenation of the originals.
    let Expr::JoinedStr(joined) = parse_fstring_expr("'ab' f'c{x}' 'de' 'f'\n") else {
        panic!("expected a JoinedStr");
    };
    let literal_text: String = joined
        .values
        .iter()
        .filter_map(|v| match v {
            Expr::Constant(c) => c.value.as_str_value().map(str::to_owned),
            _ => None,
        })
        .collect();
    assert_eq!(literal_text, "abcdef");
}

#[test]
fn test_raw_fstring_middles_stay_raw() {
    let Expr::JoinedStr(joined) = parse_fstring_expr("rf'\\n{x}'\n") else {
        panic!("expected a JoinedStr");
    };
    assert!(matches!(
        &joined.values[0],
        Expr::Constant(c) if c.value == Constant::Str("\\n".to_owned())
    ));
}

#[test]
fn test_nested_fstring() {
    let Expr::JoinedStr(joined) = parse_fstring_expr("f\"{f'{y}'}\"\n") else {
        panic!("expected a JoinedStr");
    };
    let Expr::FormattedValue(outer) = &joined.values[0] else {
        panic!("expected a FormattedValue");
    };
    assert!(outer.value.is_joined_str());
}

#[test]
fn test_multiline_replacement_field() {
    let source = "f\"{(1 +\n     2)}\"\n";
    assert!(parse_suite(source).is_ok());
}

#[test]
fn test_lone_closing_brace_rejected() {
    let err = parse_suite("f\"a}b\"\n").unwrap_err();
    assert!(err.to_string().contains("single '}' is not allowed"));
}

#[test]
fn test_fstring_location_projection() {
    // An embedded snippet parsed with a starting location projects every
    // node at or after that location.
    let module = parse_starts_at("x + y", Mode::FStringInput, "<fstring>", Location::new(3, 8))
        .expect("snippet should parse");
    let taipan_ast::Mod::Expression(expression) = module else {
        panic!("expected an Expression module");
    };
    let range = expression.body.range();
    assert_eq!(range.start, Location::new(3, 8));
    let Expr::BinOp(binop) = *expression.body else {
        panic!("expected a BinOp");
    };
    // Both operands sit on the projected line, at or beyond the column.
    for side in [&binop.left, &binop.right] {
        assert_eq!(side.range().start.row(), 3);
        assert!(side.range().start.column() >= 8);
    }
}

#[test]
fn test_fstring_feature_gates() {
    use crate::{parse_with_options, ParseOptions};

    let old = ParseOptions {
        feature_version: 5,
        ..ParseOptions::default()
    };
    let err = parse_with_options("f'{x}'\n", "<test>", &old).unwrap_err();
    assert!(err.to_string().contains("only supported in Python 3.6"));

    let pre_debug = ParseOptions {
        feature_version: 7,
        ..ParseOptions::default()
    };
    let err = parse_with_options("f'{x=}'\n", "<test>", &pre_debug).unwrap_err();
    assert!(err.to_string().contains("only supported in Python 3.8"));
    assert!(parse_with_options("f'{x}'\n", "<test>", &pre_debug).is_ok());
}
