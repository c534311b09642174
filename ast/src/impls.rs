use crate::{Constant, Expr};

impl Expr {
    /// Returns a short name for the node suitable for use in error messages
    /// ("cannot assign to ...", "cannot delete ...").
    pub fn name(&self) -> &'static str {
        match self {
            Expr::Attribute(_) => "attribute",
            Expr::Subscript(_) => "subscript",
            Expr::Starred(_) => "starred",
            Expr::Name(_) => "name",
            Expr::List(_) => "list",
            Expr::Tuple(_) => "tuple",
            Expr::Lambda(_) => "lambda",
            Expr::Call(_) => "function call",
            Expr::BoolOp(_) | Expr::BinOp(_) | Expr::UnaryOp(_) => "expression",
            Expr::GeneratorExp(_) => "generator expression",
            Expr::Yield(_) | Expr::YieldFrom(_) => "yield expression",
            Expr::Await(_) => "await expression",
            Expr::ListComp(_) => "list comprehension",
            Expr::SetComp(_) => "set comprehension",
            Expr::DictComp(_) => "dict comprehension",
            Expr::Dict(_) => "dict literal",
            Expr::Set(_) => "set display",
            Expr::JoinedStr(_) | Expr::FormattedValue(_) => "f-string expression",
            Expr::Constant(constant) => match &constant.value {
                Constant::None => "None",
                Constant::Bool(b) => {
                    if *b {
                        "True"
                    } else {
                        "False"
                    }
                }
                Constant::Ellipsis => "ellipsis",
                _ => "literal",
            },
            Expr::Compare(_) => "comparison",
            Expr::IfExp(_) => "conditional expression",
            Expr::NamedExpr(_) => "named expression",
            Expr::Slice(_) => "slice",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExprConstant, ExprName, ExprContext, Identifier};
    use taipan_parser_core::SourceRange;

    #[test]
    fn test_expr_name() {
        let range = SourceRange::default();
        let name = Expr::Name(ExprName {
            range,
            id: Identifier::new("x", range),
            ctx: ExprContext::Load,
        });
        assert_eq!(name.name(), "name");

        let none = Expr::Constant(ExprConstant {
            range,
            value: Constant::None,
            kind: None,
        });
        assert_eq!(none.name(), "None");
    }
}
