//! Error surfacing: the two-pass driver, tokenizer error mapping, the
//! incomplete-input flag and error metadata.

use taipan_parser_core::Location;

use crate::{
    parse, parse_suite, parse_with_options, Mode, ParseErrorType, ParseOptions, ParserFlags,
};

#[test]
fn test_errors_never_succeed_on_the_second_pass() {
    // Two-pass idempotence: a failing first pass must surface an error,
    // never a tree.
    for source in [
        "x ==\n",
        "def f(:\n",
        "1 +\n",
        "if x\n    pass\n",
        "a b c\n",
        "return\n1 +\n",
    ] {
        assert!(parse_suite(source).is_err(), "{source:?} must not parse");
    }
}

#[test]
fn test_legacy_print_statement_message() {
    let err = parse_suite("print 'hi'\n").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"Missing parentheses in call to 'print'. Did you mean print(...)? at line 1 column 0"
    );
}

#[test]
fn test_legacy_exec_statement_message() {
    let err = parse_suite("exec 'code'\n").unwrap_err();
    assert!(err.to_string().contains("Missing parentheses in call to 'exec'"));
}

#[test]
fn test_forgotten_comma_diagnosis() {
    let err = parse_suite("foo(1)\nbar baz\n").unwrap_err();
    assert!(err.to_string().contains("Perhaps you forgot a comma?"));
}

#[test]
fn test_unclosed_bracket() {
    let err = parse_suite("(").unwrap_err();
    assert!(err.to_string().contains("'(' was never closed"));
    assert_eq!(err.range.start, Location::new(1, 0));

    let err = parse_suite("x = [1, 2\n").unwrap_err();
    assert!(err.to_string().contains("'[' was never closed"));
    assert_eq!(err.range.start, Location::new(1, 4));
}

#[test]
fn test_incomplete_input_flag() {
    let options = ParseOptions {
        flags: ParserFlags::ALLOW_INCOMPLETE_INPUT,
        ..ParseOptions::default()
    };
    for source in ["(", "def f():\n", "x = '''abc", "if x:\n"] {
        let err = parse_with_options(source, "<test>", &options).unwrap_err();
        assert_eq!(
            err.error,
            ParseErrorType::IncompleteInput,
            "{source:?} should be incomplete"
        );
    }
    // A hard syntax error is not incomplete input.
    let err = parse_with_options("x ==\n", "<test>", &options).unwrap_err();
    assert!(err.error.is_syntax());
}

#[test]
fn test_indentation_errors() {
    let err = parse_suite("if x:\npass\n").unwrap_err();
    assert!(
        matches!(&err.error, ParseErrorType::Indentation(msg) if msg.contains("expected an indented block")),
        "got {:?}",
        err.error
    );

    let err = parse_suite("if x:\n    a\n  b\n").unwrap_err();
    assert!(
        matches!(&err.error, ParseErrorType::Indentation(msg) if msg.contains("unindent does not match")),
        "got {:?}",
        err.error
    );
}

#[test]
fn test_tab_error() {
    let err = parse_suite("if x:\n\ty\n        z\n").unwrap_err();
    assert!(matches!(err.error, ParseErrorType::Tab(_)), "got {:?}", err.error);
}

#[test]
fn test_barry_as_bdfl() {
    // The future import flips the accepted not-equal spelling.
    let suite = parse_suite("from __future__ import barry_as_FLUFL\nx <> y\n")
        .expect("the FLUFL spelling should parse after the import");
    let taipan_ast::Stmt::Expr(expr) = &suite[1] else {
        panic!("expected an expression statement");
    };
    assert!(matches!(
        &*expr.value,
        taipan_ast::Expr::Compare(c) if c.ops == vec![taipan_ast::CmpOp::NotEq]
    ));

    let err = parse_suite("from __future__ import barry_as_FLUFL\nx != y\n").unwrap_err();
    assert!(err.to_string().contains("with Barry as BDFL, use '<>' instead of '!='"));

    // Without the import the old spelling is plain invalid syntax.
    assert!(parse_suite("x <> y\n").is_err());
}

#[test]
fn test_single_mode_accepts_one_statement() {
    assert!(parse("x = 1\n", Mode::Interactive, "<stdin>").is_ok());
    assert!(parse("if x:\n    pass\n", Mode::Interactive, "<stdin>").is_ok());
    // Trailing whitespace and comments after the statement are fine.
    assert!(parse("x = 1\n   \n# done\n", Mode::Interactive, "<stdin>").is_ok());
}

#[test]
fn test_single_mode_rejects_multiple_statements() {
    let err = parse("x = 1\ny = 2\n", Mode::Interactive, "<stdin>").unwrap_err();
    assert!(err
        .to_string()
        .contains("multiple statements found while compiling a single statement"));
}

#[test]
fn test_blank_interactive_line_is_a_pass() {
    let module = parse("\n", Mode::Interactive, "<stdin>").expect("blank line parses");
    let taipan_ast::Mod::Interactive(interactive) = module else {
        panic!("expected an Interactive module");
    };
    assert_eq!(interactive.body.len(), 1);
    assert!(interactive.body[0].is_pass());
}

#[test]
fn test_error_metadata_and_line() {
    let err = parse_suite("x = 1\ny = (\n1 1\n").unwrap_err();
    // Syntax errors carry the offending line and the last completed
    // statement's location.
    assert!(err.line.is_some());
    let metadata = err.metadata.as_ref().expect("syntax errors carry metadata");
    assert_eq!(metadata.last_statement.row(), 1);
    assert!(metadata.source.contains("y = ("));
}

#[test]
fn test_char_columns_step_through_utf8() {
    let err = parse_suite("ä = )\n").unwrap_err();
    let (start, _) = err.char_columns();
    // The byte column is 4 ('ä' is two bytes); the character column is 3.
    assert!(err.range.start.column() >= start);
}

#[test]
fn test_reserved_identifier_rejected_in_grammar() {
    // `None`, `True`, `False` are reserved words and never plain names.
    for source in ["None = 1\n", "True = 1\n", "False = 1\n"] {
        assert!(parse_suite(source).is_err(), "{source:?} must not parse");
    }
}

#[test]
fn test_recursion_limit_is_reported() {
    let source = format!("{}0{}\n", "(".repeat(1200), ")".repeat(1200));
    let err = parse_suite(&source).unwrap_err();
    assert_eq!(err.error, ParseErrorType::Recursion);
}

#[test]
fn test_eval_mode() {
    let module = parse("1 + 2", Mode::Expression, "<eval>").expect("expression parses");
    assert!(module.is_expression());
    // Statements do not parse in expression mode.
    assert!(parse("x = 1", Mode::Expression, "<eval>").is_err());
}

#[test]
fn test_func_type_mode() {
    let module =
        parse("(int, str) -> bool", Mode::FunctionType, "<func_type>").expect("signature parses");
    let taipan_ast::Mod::FunctionType(func_type) = module else {
        panic!("expected a FunctionType module");
    };
    assert_eq!(func_type.argtypes.len(), 2);
}
