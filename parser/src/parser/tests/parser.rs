//! Engine-level checks: memoization, the token buffer, type comments and
//! flag plumbing.

use taipan_parser_core::{Mode, ParserFlags};

use crate::parser::Parser;
use crate::{parse_suite, parse_with_options, ParseOptions, DEFAULT_FEATURE_VERSION};

fn parser_for(source: &str) -> Parser<'_> {
    Parser::new(
        source,
        Mode::Module,
        ParserFlags::empty(),
        DEFAULT_FEATURE_VERSION,
        "<test>",
    )
}

#[test]
fn test_memoized_parse_equals_fresh_parse() {
    // Memo hits and misses must build identical trees: the same source
    // parsed by two independent parsers (each with a cold cache) and one
    // that backtracks heavily over memoized rules agrees.
    let source = "\
def f(a, b=1):
    return a if b else [x*2 for x in range(a)]

value = f(1)(2)[3].attr
";
    let first = parse_suite(source).expect("should parse");
    let second = parse_suite(source).expect("should parse");
    assert_eq!(first, second);
}

#[cfg(debug_assertions)]
#[test]
fn test_memoization_hits_are_recorded() {
    // Expressions that force ordered-choice backtracking re-enter the
    // same rule at the same token and must hit the memo table.
    let mut parser = parser_for("a + b * c - d if e else f\n");
    parser.run().expect("should parse");
    let stats = parser.memo_statistics();
    assert!(
        stats.values().any(|&count| count > 0),
        "expected memo hits, got {stats:?}"
    );
}

#[test]
fn test_backtracking_is_invisible() {
    // `(x)` walks the tuple alternative before settling on group; `(x,)`
    // commits to tuple. The choice is leftmost-first and leaves no trace.
    let suite = parse_suite("a = (x)\nb = (x,)\nc = ()\n").expect("should parse");
    let values: Vec<_> = suite
        .iter()
        .map(|stmt| match stmt {
            taipan_ast::Stmt::Assign(assign) => &*assign.value,
            _ => panic!("expected assignments"),
        })
        .collect();
    assert!(values[0].is_name());
    assert!(matches!(values[1], taipan_ast::Expr::Tuple(t) if t.elts.len() == 1));
    assert!(matches!(values[2], taipan_ast::Expr::Tuple(t) if t.elts.is_empty()));
}

#[test]
fn test_soft_keyword_lookahead_does_not_consume() {
    // `match` used as a name must survive the match-statement probe.
    let suite = parse_suite("match.group(1)\n").expect("should parse");
    assert_eq!(suite.len(), 1);
}

#[test]
fn test_type_comments_collected_on_assignment() {
    let options = ParseOptions {
        flags: ParserFlags::TYPE_COMMENTS,
        ..ParseOptions::default()
    };
    let module = parse_with_options("x = []  # type: list[int]\n", "<test>", &options)
        .expect("should parse");
    let taipan_ast::Mod::Module(module) = module else {
        panic!("expected a Module");
    };
    let taipan_ast::Stmt::Assign(assign) = &module.body[0] else {
        panic!("expected an Assign");
    };
    assert_eq!(assign.type_comment.as_deref(), Some("list[int]"));
}

#[test]
fn test_type_ignores_attached_to_module() {
    let options = ParseOptions {
        flags: ParserFlags::TYPE_COMMENTS,
        ..ParseOptions::default()
    };
    let module = parse_with_options(
        "x = 1  # type: ignore[assignment]\n# type: ignore\ny = 2\n",
        "<test>",
        &options,
    )
    .expect("should parse");
    let taipan_ast::Mod::Module(module) = module else {
        panic!("expected a Module");
    };
    assert_eq!(module.body.len(), 2);
    assert_eq!(module.type_ignores.len(), 2);
    assert_eq!(module.type_ignores[0].lineno, 1);
    assert_eq!(module.type_ignores[0].tag, "[assignment]");
    assert_eq!(module.type_ignores[1].lineno, 2);
    assert_eq!(module.type_ignores[1].tag, "");
}

#[test]
fn test_type_comments_ignored_without_flag() {
    let module = parse_suite("x = 1  # type: ignore\n").expect("should parse");
    assert_eq!(module.len(), 1);
}

#[test]
fn test_function_type_comment() {
    let options = ParseOptions {
        flags: ParserFlags::TYPE_COMMENTS,
        ..ParseOptions::default()
    };
    let module = parse_with_options(
        "def f(a, b):\n    # type: (int, str) -> bool\n    return True\n",
        "<test>",
        &options,
    )
    .expect("should parse");
    let taipan_ast::Mod::Module(module) = module else {
        panic!("expected a Module");
    };
    let taipan_ast::Stmt::FunctionDef(def) = &module.body[0] else {
        panic!("expected a FunctionDef");
    };
    assert_eq!(def.type_comment.as_deref(), Some("(int, str) -> bool"));
}

#[test]
fn test_nfkc_normalization_of_identifiers() {
    // The ligature ﬁ normalizes to "fi"; both spellings are one name.
    let suite = parse_suite("ﬁ = 1\n").expect("should parse");
    let taipan_ast::Stmt::Assign(assign) = &suite[0] else {
        panic!("expected an Assign");
    };
    let taipan_ast::Expr::Name(name) = &assign.targets[0] else {
        panic!("expected a Name target");
    };
    assert_eq!(name.id.as_str(), "fi");
}

#[test]
fn test_unicode_identifiers_pass_through() {
    let suite = parse_suite("变量 = 1\n").expect("should parse");
    assert_eq!(suite.len(), 1);
}

#[test]
fn test_flags_default_to_empty() {
    let options = ParseOptions::default();
    assert_eq!(options.flags, ParserFlags::empty());
    assert_eq!(options.feature_version, DEFAULT_FEATURE_VERSION);
}
