//! Expression-context rewriting and assignment-target validation.

use taipan_ast::{
    CmpOp, Expr, ExprAttribute, ExprContext, ExprList, ExprName, ExprStarred, ExprSubscript,
    ExprTuple,
};

use crate::parser::TargetsKind;

fn set_seq_context(seq: Vec<Expr>, ctx: ExprContext) -> Vec<Expr> {
    seq.into_iter().map(|e| set_expr_context(e, ctx)).collect()
}

/// Clones `expr` with every target-relevant sub-expression rewritten to
/// carry `ctx`. Subscript and Attribute keep their inner value in load
/// context; Starred rewrites recursively; other kinds pass through.
pub(crate) fn set_expr_context(expr: Expr, ctx: ExprContext) -> Expr {
    match expr {
        Expr::Name(node) => ExprName { ctx, ..node }.into(),
        Expr::Tuple(node) => ExprTuple {
            range: node.range,
            elts: set_seq_context(node.elts, ctx),
            ctx,
        }
        .into(),
        Expr::List(node) => ExprList {
            range: node.range,
            elts: set_seq_context(node.elts, ctx),
            ctx,
        }
        .into(),
        Expr::Subscript(node) => ExprSubscript { ctx, ..node }.into(),
        Expr::Attribute(node) => ExprAttribute { ctx, ..node }.into(),
        Expr::Starred(node) => ExprStarred {
            range: node.range,
            value: Box::new(set_expr_context(*node.value, ctx)),
            ctx,
        }
        .into(),
        other => other,
    }
}

/// Returns the innermost sub-expression of `expr` that cannot appear as a
/// target of the given kind, or `None` when the whole expression is a
/// valid target.
pub(crate) fn get_invalid_target(expr: &Expr, kind: TargetsKind) -> Option<&Expr> {
    // Only List and Tuple are searched recursively: they are the only
    // containers that can still hold valid names when parsed as
    // expressions. Any other container kind is invalid as a whole.
    match expr {
        Expr::List(list) => list
            .elts
            .iter()
            .find_map(|elt| get_invalid_target(elt, kind)),
        Expr::Tuple(tuple) => tuple
            .elts
            .iter()
            .find_map(|elt| get_invalid_target(elt, kind)),
        Expr::Starred(starred) => {
            if kind == TargetsKind::DelTargets {
                return Some(expr);
            }
            get_invalid_target(&starred.value, kind)
        }
        Expr::Compare(compare) => {
            // `for a in b` misparses as a comparison; search the left
            // operand when the first comparator is `in`.
            if kind == TargetsKind::ForTargets {
                if matches!(compare.ops.first(), Some(CmpOp::In)) {
                    return get_invalid_target(&compare.left, kind);
                }
                return None;
            }
            Some(expr)
        }
        Expr::Name(_) | Expr::Subscript(_) | Expr::Attribute(_) => None,
        _ => Some(expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taipan_ast::{ExprCall, Identifier, SourceRange};

    fn name(id: &str) -> Expr {
        let range = SourceRange::default();
        ExprName {
            range,
            id: Identifier::new(id, range),
            ctx: ExprContext::Load,
        }
        .into()
    }

    fn call(func: Expr) -> Expr {
        ExprCall {
            range: SourceRange::default(),
            func: Box::new(func),
            args: vec![],
            keywords: vec![],
        }
        .into()
    }

    #[test]
    fn test_set_context_recurses_into_containers() {
        let tuple: Expr = ExprTuple {
            range: SourceRange::default(),
            elts: vec![name("a"), name("b")],
            ctx: ExprContext::Load,
        }
        .into();
        let Expr::Tuple(stored) = set_expr_context(tuple, ExprContext::Store) else {
            panic!("expected a tuple");
        };
        assert!(stored.ctx.is_store());
        for elt in &stored.elts {
            let Expr::Name(n) = elt else {
                panic!("expected names")
            };
            assert!(n.ctx.is_store());
        }
    }

    #[test]
    fn test_subscript_value_left_untouched() {
        let subscript: Expr = ExprSubscript {
            range: SourceRange::default(),
            value: Box::new(call(name("f"))),
            slice: Box::new(name("i")),
            ctx: ExprContext::Load,
        }
        .into();
        let Expr::Subscript(stored) = set_expr_context(subscript, ExprContext::Store) else {
            panic!("expected a subscript");
        };
        assert!(stored.ctx.is_store());
        // The call inside stays a load; only the outer node's context moved.
        assert!(matches!(&*stored.value, Expr::Call(_)));
    }

    #[test]
    fn test_invalid_target_finds_innermost_offender() {
        let tuple: Expr = ExprTuple {
            range: SourceRange::default(),
            elts: vec![name("ok"), call(name("f"))],
            ctx: ExprContext::Load,
        }
        .into();
        let offender = get_invalid_target(&tuple, TargetsKind::StarTargets);
        assert!(matches!(offender, Some(Expr::Call(_))));
    }

    #[test]
    fn test_starred_is_invalid_for_del() {
        let starred: Expr = ExprStarred {
            range: SourceRange::default(),
            value: Box::new(name("xs")),
            ctx: ExprContext::Load,
        }
        .into();
        assert!(get_invalid_target(&starred, TargetsKind::DelTargets).is_some());
        assert!(get_invalid_target(&starred, TargetsKind::StarTargets).is_none());
    }

    #[test]
    fn test_valid_targets() {
        for expr in [name("x")] {
            assert!(get_invalid_target(&expr, TargetsKind::StarTargets).is_none());
            assert!(get_invalid_target(&expr, TargetsKind::DelTargets).is_none());
            assert!(get_invalid_target(&expr, TargetsKind::ForTargets).is_none());
        }
    }
}
