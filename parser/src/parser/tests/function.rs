use taipan_ast::{Constant, Expr, Stmt};

use crate::parse_suite;

fn parse_def(source: &str) -> taipan_ast::StmtFunctionDef {
    let mut suite = parse_suite(source).expect("function should parse");
    assert_eq!(suite.len(), 1);
    match suite.pop().expect("length checked") {
        Stmt::FunctionDef(def) => def,
        other => panic!("expected a FunctionDef, got {other:?}"),
    }
}

fn arg_names(args: &[taipan_ast::Arg]) -> Vec<&str> {
    args.iter().map(|a| a.arg.as_str()).collect()
}

#[test]
fn test_function_no_args() {
    let def = parse_def("def f(): pass\n");
    assert_eq!(def.name.as_str(), "f");
    assert!(def.args.is_empty());
    assert_eq!(def.body.len(), 1);
}

#[test]
fn test_function_pos_args() {
    let def = parse_def("def f(a, b, c): pass\n");
    assert_eq!(arg_names(&def.args.args), vec!["a", "b", "c"]);
    assert!(def.args.posonlyargs.is_empty());
    assert!(def.args.defaults.is_empty());
}

#[test]
fn test_function_full_parameter_shape() {
    // Positional with a default, keyword-only after a bare star, and a
    // double-star catch-all.
    let def = parse_def("def f(a, b=1, *, c, **kw): pass\n");
    assert_eq!(arg_names(&def.args.args), vec!["a", "b"]);
    assert_eq!(def.args.defaults.len(), 1);
    assert!(matches!(
        &def.args.defaults[0],
        Expr::Constant(c) if c.value == Constant::Int(1.into())
    ));
    assert_eq!(arg_names(&def.args.kwonlyargs), vec!["c"]);
    assert_eq!(def.args.kw_defaults, vec![None]);
    assert!(def.args.vararg.is_none());
    assert_eq!(def.args.kwarg.as_ref().map(|a| a.arg.as_str()), Some("kw"));
}

#[test]
fn test_function_positional_only() {
    let def = parse_def("def f(a, b, /, c): pass\n");
    assert_eq!(arg_names(&def.args.posonlyargs), vec!["a", "b"]);
    assert_eq!(arg_names(&def.args.args), vec!["c"]);
}

#[test]
fn test_function_positional_only_with_defaults() {
    let def = parse_def("def f(a=0, /, b=1): pass\n");
    assert_eq!(arg_names(&def.args.posonlyargs), vec!["a"]);
    assert_eq!(arg_names(&def.args.args), vec!["b"]);
    // Defaults stay in source order across the slash.
    assert_eq!(def.args.defaults.len(), 2);
}

#[test]
fn test_function_vararg_and_kwonly_defaults() {
    let def = parse_def("def f(*args, x, y=2, **kw): pass\n");
    assert_eq!(def.args.vararg.as_ref().map(|a| a.arg.as_str()), Some("args"));
    assert_eq!(arg_names(&def.args.kwonlyargs), vec!["x", "y"]);
    assert_eq!(def.args.kw_defaults[0], None);
    assert!(def.args.kw_defaults[1].is_some());
}

#[test]
fn test_function_annotations_and_return_type() {
    let def = parse_def("def f(a: int, b: str = 'x') -> bool:\n    return True\n");
    assert!(def.args.args[0].annotation.is_some());
    assert!(def.args.args[1].annotation.is_some());
    assert!(def.returns.is_some());
}

#[test]
fn test_async_function() {
    let mut suite = parse_suite("async def f():\n    await g()\n").expect("should parse");
    let Stmt::AsyncFunctionDef(def) = suite.pop().expect("one statement") else {
        panic!("expected an AsyncFunctionDef");
    };
    let Stmt::Expr(expr) = &def.body[0] else {
        panic!("expected an expression statement");
    };
    assert!(expr.value.is_await());
}

#[test]
fn test_decorators_attach_in_order() {
    let def = parse_def("@outer\n@inner(arg)\ndef f(): pass\n");
    assert_eq!(def.decorator_list.len(), 2);
    assert!(def.decorator_list[0].is_name());
    assert!(def.decorator_list[1].is_call());
}

#[test]
fn test_lambda_parameter_shapes() {
    let suite = parse_suite("f = lambda a, /, b, *args, c=1, **kw: 0\n").expect("should parse");
    let Stmt::Assign(assign) = &suite[0] else {
        panic!("expected an Assign");
    };
    let Expr::Lambda(lambda) = &*assign.value else {
        panic!("expected a Lambda");
    };
    assert_eq!(arg_names(&lambda.args.posonlyargs), vec!["a"]);
    assert_eq!(arg_names(&lambda.args.args), vec!["b"]);
    assert_eq!(lambda.args.vararg.as_ref().map(|a| a.arg.as_str()), Some("args"));
    assert_eq!(arg_names(&lambda.args.kwonlyargs), vec!["c"]);
    assert_eq!(lambda.args.kwarg.as_ref().map(|a| a.arg.as_str()), Some("kw"));
}

#[test]
fn test_parameter_default_ordering_rejected() {
    assert!(parse_suite("def f(a=1, b): pass\n").is_err());
}

#[test]
fn test_bare_star_requires_named_args() {
    let err = parse_suite("def f(*): pass\n").unwrap_err();
    assert!(err.to_string().contains("named arguments must follow bare *"));
}

#[test]
fn test_generator_argument_must_be_parenthesized() {
    let err = parse_suite("f(a, x for x in y)\n").unwrap_err();
    assert!(err
        .to_string()
        .contains("Generator expression must be parenthesized"));
    // A single generator argument is fine without parentheses.
    assert!(parse_suite("f(x for x in y)\n").is_ok());
}

#[test]
fn test_positional_after_keyword_rejected() {
    let err = parse_suite("f(a=1, b)\n").unwrap_err();
    assert!(err
        .to_string()
        .contains("positional argument follows keyword argument"));
}
