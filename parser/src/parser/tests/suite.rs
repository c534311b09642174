use taipan_ast::{
    BoolOp, CmpOp, Constant, Expr, ExprContext, Located, Operator, Stmt, UnaryOp,
};
use taipan_parser_core::Location;

use crate::parse_suite;

fn parse_one(source: &str) -> Stmt {
    let mut suite = parse_suite(source).expect("source should parse");
    assert_eq!(suite.len(), 1, "expected exactly one statement");
    suite.pop().expect("length checked")
}

fn expr_of(stmt: Stmt) -> Expr {
    match stmt {
        Stmt::Expr(node) => *node.value,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

#[test]
fn test_binop_expression_statement() {
    let expr = expr_of(parse_one("1+2\n"));
    let Expr::BinOp(binop) = expr else {
        panic!("expected a BinOp");
    };
    assert_eq!(binop.op, Operator::Add);
    assert!(
        matches!(&*binop.left, Expr::Constant(c) if c.value == Constant::Int(1.into()))
    );
    assert!(
        matches!(&*binop.right, Expr::Constant(c) if c.value == Constant::Int(2.into()))
    );
    assert_eq!(binop.range.start, Location::new(1, 0));
    assert_eq!(binop.range.end, Location::new(1, 3));
}

#[test]
fn test_operator_precedence() {
    let expr = expr_of(parse_one("1 + 2 * 3\n"));
    let Expr::BinOp(add) = expr else {
        panic!("expected a BinOp");
    };
    assert_eq!(add.op, Operator::Add);
    let Expr::BinOp(mult) = &*add.right else {
        panic!("multiplication should bind tighter");
    };
    assert_eq!(mult.op, Operator::Mult);
}

#[test]
fn test_left_associativity() {
    // 1 - 2 - 3 parses as (1 - 2) - 3 through the left-recursive rule.
    let expr = expr_of(parse_one("1 - 2 - 3\n"));
    let Expr::BinOp(outer) = expr else {
        panic!("expected a BinOp");
    };
    assert_eq!(outer.op, Operator::Sub);
    assert!(matches!(&*outer.left, Expr::BinOp(inner) if inner.op == Operator::Sub));
    assert!(matches!(&*outer.right, Expr::Constant(_)));
}

#[test]
fn test_power_is_right_associative() {
    let expr = expr_of(parse_one("2 ** 3 ** 4\n"));
    let Expr::BinOp(outer) = expr else {
        panic!("expected a BinOp");
    };
    assert_eq!(outer.op, Operator::Pow);
    assert!(matches!(&*outer.left, Expr::Constant(_)));
    assert!(matches!(&*outer.right, Expr::BinOp(inner) if inner.op == Operator::Pow));
}

#[test]
fn test_comparison_chain() {
    let expr = expr_of(parse_one("a < b <= c\n"));
    let Expr::Compare(compare) = expr else {
        panic!("expected a Compare");
    };
    assert_eq!(compare.ops, vec![CmpOp::Lt, CmpOp::LtE]);
    assert_eq!(compare.comparators.len(), 2);
}

#[test]
fn test_bool_ops_and_not() {
    let expr = expr_of(parse_one("a or b and not c\n"));
    let Expr::BoolOp(or) = expr else {
        panic!("expected a BoolOp");
    };
    assert_eq!(or.op, BoolOp::Or);
    let Expr::BoolOp(and) = &or.values[1] else {
        panic!("expected a nested BoolOp");
    };
    assert_eq!(and.op, BoolOp::And);
    assert!(matches!(&and.values[1], Expr::UnaryOp(u) if u.op == UnaryOp::Not));
}

#[test]
fn test_ternary_and_ordered_choice() {
    // The conditional alternative is tried before the bare disjunction.
    let expr = expr_of(parse_one("a if b else c\n"));
    assert!(expr.is_if_exp());
    let expr = expr_of(parse_one("a\n"));
    assert!(expr.is_name());
}

#[test]
fn test_call_with_keywords_and_stars() {
    let expr = expr_of(parse_one("f(1, *rest, x=2, **kw)\n"));
    let Expr::Call(call) = expr else {
        panic!("expected a Call");
    };
    assert_eq!(call.args.len(), 2);
    assert!(call.args[1].is_starred());
    assert_eq!(call.keywords.len(), 2);
    assert_eq!(call.keywords[0].arg.as_ref().map(|id| id.as_str()), Some("x"));
    assert!(call.keywords[1].arg.is_none());
}

#[test]
fn test_subscript_and_slice() {
    let expr = expr_of(parse_one("a[1:2, ::3]\n"));
    let Expr::Subscript(subscript) = expr else {
        panic!("expected a Subscript");
    };
    let Expr::Tuple(tuple) = &*subscript.slice else {
        panic!("expected a slice tuple");
    };
    assert!(tuple.elts[0].is_slice());
    let Expr::Slice(second) = &tuple.elts[1] else {
        panic!("expected a slice");
    };
    assert!(second.lower.is_none() && second.upper.is_none() && second.step.is_some());
}

#[test]
fn test_assignment_forms() {
    let stmt = parse_one("a = b = 1\n");
    let Stmt::Assign(assign) = stmt else {
        panic!("expected an Assign");
    };
    assert_eq!(assign.targets.len(), 2);

    let stmt = parse_one("a += 1\n");
    let Stmt::AugAssign(aug) = stmt else {
        panic!("expected an AugAssign");
    };
    assert_eq!(aug.op, Operator::Add);

    let stmt = parse_one("a: int = 1\n");
    let Stmt::AnnAssign(ann) = stmt else {
        panic!("expected an AnnAssign");
    };
    assert!(ann.simple);
}

#[test]
fn test_star_target_contexts() {
    let stmt = parse_one("a, *b = c\n");
    let Stmt::Assign(assign) = stmt else {
        panic!("expected an Assign");
    };
    let Expr::Tuple(tuple) = &assign.targets[0] else {
        panic!("expected a tuple target");
    };
    assert_eq!(tuple.ctx, ExprContext::Store);
    let Expr::Starred(starred) = &tuple.elts[1] else {
        panic!("expected a starred target");
    };
    assert_eq!(starred.ctx, ExprContext::Store);
    assert!(matches!(&*starred.value, Expr::Name(n) if n.ctx == ExprContext::Store));
}

#[test]
fn test_del_statement_contexts() {
    let stmt = parse_one("del a, b[0]\n");
    let Stmt::Delete(delete) = stmt else {
        panic!("expected a Delete");
    };
    assert!(matches!(&delete.targets[0], Expr::Name(n) if n.ctx == ExprContext::Del));
    assert!(matches!(&delete.targets[1], Expr::Subscript(s) if s.ctx == ExprContext::Del));
}

#[test]
fn test_import_forms() {
    let stmt = parse_one("import os.path as p, sys\n");
    let Stmt::Import(import) = stmt else {
        panic!("expected an Import");
    };
    assert_eq!(import.names[0].name.as_str(), "os.path");
    assert_eq!(import.names[0].asname.as_ref().map(|a| a.as_str()), Some("p"));
    assert_eq!(import.names[1].name.as_str(), "sys");

    let stmt = parse_one("from ..pkg import a, b as c\n");
    let Stmt::ImportFrom(from) = stmt else {
        panic!("expected an ImportFrom");
    };
    assert_eq!(from.level, 2);
    assert_eq!(from.module.as_ref().map(|m| m.as_str()), Some("pkg"));
    assert_eq!(from.names.len(), 2);

    let stmt = parse_one("from m import *\n");
    let Stmt::ImportFrom(star) = stmt else {
        panic!("expected an ImportFrom");
    };
    assert_eq!(star.names[0].name.as_str(), "*");
}

#[test]
fn test_compound_statements() {
    let source = "\
if a:
    x = 1
elif b:
    x = 2
else:
    x = 3
";
    let Stmt::If(if_stmt) = parse_one(source) else {
        panic!("expected an If");
    };
    assert_eq!(if_stmt.body.len(), 1);
    let Stmt::If(elif) = &if_stmt.orelse[0] else {
        panic!("elif should nest as If in orelse");
    };
    assert_eq!(elif.orelse.len(), 1);
}

#[test]
fn test_while_for_with() {
    let suite = parse_suite(
        "\
while x:
    break
else:
    pass
for i in xs:
    continue
with open(f) as fh, lock:
    pass
",
    )
    .expect("should parse");
    assert_eq!(suite.len(), 3);
    assert!(suite[0].is_while());
    assert!(suite[1].is_for());
    let Stmt::With(with) = &suite[2] else {
        panic!("expected a With");
    };
    assert_eq!(with.items.len(), 2);
    assert!(with.items[0].optional_vars.is_some());
    assert!(with.items[1].optional_vars.is_none());
}

#[test]
fn test_try_except() {
    let source = "\
try:
    x()
except ValueError as e:
    pass
except Exception:
    pass
else:
    pass
finally:
    done()
";
    let Stmt::Try(try_stmt) = parse_one(source) else {
        panic!("expected a Try");
    };
    assert_eq!(try_stmt.handlers.len(), 2);
    assert_eq!(
        try_stmt.handlers[0].name.as_ref().map(|n| n.as_str()),
        Some("e")
    );
    assert_eq!(try_stmt.orelse.len(), 1);
    assert_eq!(try_stmt.finalbody.len(), 1);
}

#[test]
fn test_try_except_star() {
    let Stmt::TryStar(try_star) = parse_one("try:\n    x()\nexcept* ValueError:\n    pass\n")
    else {
        panic!("expected a TryStar");
    };
    assert_eq!(try_star.handlers.len(), 1);
}

#[test]
fn test_class_def() {
    let Stmt::ClassDef(class) = parse_one("@register\nclass C(Base, metaclass=M):\n    pass\n")
    else {
        panic!("expected a ClassDef");
    };
    assert_eq!(class.name.as_str(), "C");
    assert_eq!(class.decorator_list.len(), 1);
    assert_eq!(class.bases.len(), 1);
    assert_eq!(class.keywords.len(), 1);
}

#[test]
fn test_comprehensions() {
    let expr = expr_of(parse_one("[x*2 for x in xs if x > 0]\n"));
    let Expr::ListComp(comp) = expr else {
        panic!("expected a ListComp");
    };
    assert_eq!(comp.generators.len(), 1);
    assert_eq!(comp.generators[0].ifs.len(), 1);
    assert!(!comp.generators[0].is_async);

    let expr = expr_of(parse_one("{k: v for k, v in items}\n"));
    assert!(expr.is_dict_comp());
    let expr = expr_of(parse_one("{x async for x in xs}\n"));
    let Expr::SetComp(set_comp) = expr else {
        panic!("expected a SetComp");
    };
    assert!(set_comp.generators[0].is_async);
}

#[test]
fn test_lambda_and_walrus() {
    let expr = expr_of(parse_one("lambda a, b=1: a + b\n"));
    let Expr::Lambda(lambda) = expr else {
        panic!("expected a Lambda");
    };
    assert_eq!(lambda.args.args.len(), 2);
    assert_eq!(lambda.args.defaults.len(), 1);

    let expr = expr_of(parse_one("(n := 10)\n"));
    assert!(expr.is_named_expr());
}

#[test]
fn test_dict_and_set_displays() {
    let expr = expr_of(parse_one("{1: 'a', **rest}\n"));
    let Expr::Dict(dict) = expr else {
        panic!("expected a Dict");
    };
    assert_eq!(dict.keys.len(), 2);
    assert!(dict.keys[1].is_none());

    let expr = expr_of(parse_one("{1, 2}\n"));
    assert!(expr.is_set());
    let expr = expr_of(parse_one("{}\n"));
    assert!(matches!(&expr, Expr::Dict(d) if d.keys.is_empty()));
}

#[test]
fn test_string_concatenation_folds_to_constant() {
    let expr = expr_of(parse_one("'a' \"b\" 'c'\n"));
    let Expr::Constant(constant) = expr else {
        panic!("expected a Constant");
    };
    assert_eq!(constant.value, Constant::Str("abc".to_owned()));
}

#[test]
fn test_bytes_concatenation() {
    let expr = expr_of(parse_one("b'a' b'b'\n"));
    let Expr::Constant(constant) = expr else {
        panic!("expected a Constant");
    };
    assert_eq!(constant.value, Constant::Bytes(b"ab".to_vec()));
}

#[test]
fn test_mixed_bytes_and_str_rejected() {
    let err = parse_suite("b'a' 'b'\n").unwrap_err();
    assert!(err.to_string().contains("cannot mix bytes and nonbytes literals"));
}

#[test]
fn test_unicode_kind_preserved() {
    let expr = expr_of(parse_one("u'a'\n"));
    let Expr::Constant(constant) = expr else {
        panic!("expected a Constant");
    };
    assert_eq!(constant.kind.as_deref(), Some("u"));
}

#[test]
fn test_escape_decoding() {
    let expr = expr_of(parse_one(r#"'\n\t\x41\u0042\N{LATIN SMALL LETTER C}'"#));
    let Expr::Constant(constant) = expr else {
        panic!("expected a Constant");
    };
    assert_eq!(constant.value, Constant::Str("\n\tABc".to_owned()));
}

#[test]
fn test_raw_strings_skip_decoding() {
    let expr = expr_of(parse_one(r"r'\n'"));
    let Expr::Constant(constant) = expr else {
        panic!("expected a Constant");
    };
    assert_eq!(constant.value, Constant::Str("\\n".to_owned()));
}

#[test]
fn test_number_literals() {
    let expr = expr_of(parse_one("0x_ff\n"));
    assert!(matches!(&expr, Expr::Constant(c) if c.value == Constant::Int(255.into())));
    let expr = expr_of(parse_one("1_000.5\n"));
    assert!(matches!(&expr, Expr::Constant(c) if c.value == Constant::Float(1000.5)));
    let expr = expr_of(parse_one("3j\n"));
    assert!(matches!(
        &expr,
        Expr::Constant(c) if c.value == Constant::Complex { real: 0.0, imag: 3.0 }
    ));
}

#[test]
fn test_match_statement() {
    let source = "\
match command:
    case 'go', direction:
        move(direction)
    case Point(x=0, y=0) | None:
        origin()
    case {'key': value, **rest}:
        pass
    case [first, *others] if first:
        pass
    case _:
        default()
";
    let Stmt::Match(match_stmt) = parse_one(source) else {
        panic!("expected a Match");
    };
    assert_eq!(match_stmt.cases.len(), 5);
    assert!(match_stmt.cases[0].pattern.is_match_sequence());
    assert!(match_stmt.cases[1].pattern.is_match_or());
    assert!(match_stmt.cases[2].pattern.is_match_mapping());
    assert!(match_stmt.cases[3].guard.is_some());
    assert!(
        matches!(&match_stmt.cases[4].pattern, taipan_ast::Pattern::MatchAs(p) if p.name.is_none())
    );
}

#[test]
fn test_match_as_plain_name_still_works() {
    // Soft keywords stay usable as identifiers.
    let suite = parse_suite("match = 1\nmatch(2)\ncase = match\ntype = case\n")
        .expect("soft keywords should stay usable as names");
    assert_eq!(suite.len(), 4);
}

#[test]
fn test_type_alias_statement() {
    let Stmt::TypeAlias(alias) = parse_one("type Vector[T] = list[T]\n") else {
        panic!("expected a TypeAlias");
    };
    assert!(matches!(&*alias.name, Expr::Name(n) if n.ctx == ExprContext::Store));
    assert_eq!(alias.type_params.len(), 1);
}

#[test]
fn test_generic_function_and_class() {
    let Stmt::FunctionDef(def) = parse_one("def first[T](xs: list[T]) -> T:\n    return xs[0]\n")
    else {
        panic!("expected a FunctionDef");
    };
    assert_eq!(def.type_params.len(), 1);

    let Stmt::ClassDef(class) = parse_one("class Box[*Ts, **P]:\n    pass\n") else {
        panic!("expected a ClassDef");
    };
    assert_eq!(class.type_params.len(), 2);
    assert!(class.type_params[0].is_type_var_tuple());
    assert!(class.type_params[1].is_param_spec());
}

#[test]
fn test_global_nonlocal_and_simple_statements() {
    let suite = parse_suite("global a, b\nassert x, 'msg'\npass\nraise E from cause\n")
        .expect("should parse");
    let Stmt::Global(global) = &suite[0] else {
        panic!("expected a Global");
    };
    assert_eq!(global.names.len(), 2);
    let Stmt::Assert(assert_stmt) = &suite[1] else {
        panic!("expected an Assert");
    };
    assert!(assert_stmt.msg.is_some());
    let Stmt::Raise(raise) = &suite[3] else {
        panic!("expected a Raise");
    };
    assert!(raise.exc.is_some() && raise.cause.is_some());
}

#[test]
fn test_semicolon_separated_statements() {
    let suite = parse_suite("a = 1; b = 2; c = 3\n").expect("should parse");
    assert_eq!(suite.len(), 3);
}

#[test]
fn test_locations_are_ordered() {
    let suite = parse_suite("x = 1\nif x:\n    y = x + 2\n").expect("should parse");
    for stmt in &suite {
        let range = stmt.range();
        assert!(range.start <= range.end);
    }
    let Stmt::If(if_stmt) = &suite[1] else {
        panic!("expected an If");
    };
    assert_eq!(if_stmt.range.start, Location::new(2, 0));
    // The node's span covers its body.
    assert!(if_stmt.range.contains(&if_stmt.body[0].range()));
}
