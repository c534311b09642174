//! Intermediate pair structs and AST assembly helpers the grammar actions
//! call into.

use taipan_ast::{
    Alias, Arg, Arguments, CmpOp, Comprehension, Expr, ExprName, Identifier, Keyword, Located,
    Pattern, SourceRange, Stmt,
};

use crate::token::{Token, TokenKind};

/// One `op expr` tail of a comparison chain.
#[derive(Clone, Debug)]
pub(crate) struct CmpopExprPair {
    pub op: CmpOp,
    pub expr: Expr,
}

/// A dict display entry; `key` is `None` for `**` unpacking.
#[derive(Clone, Debug)]
pub(crate) struct KeyValuePair {
    pub key: Option<Expr>,
    pub value: Expr,
}

/// A mapping-pattern entry.
#[derive(Clone, Debug)]
pub(crate) struct KeyPatternPair {
    pub key: Expr,
    pub pattern: Pattern,
}

/// A parameter together with its default, when present.
#[derive(Clone, Debug)]
pub(crate) struct NameDefaultPair {
    pub arg: Arg,
    pub value: Option<Expr>,
}

/// Positional-only parameters when the group carries defaults.
#[derive(Clone, Debug)]
pub(crate) struct SlashWithDefault {
    pub plain_names: Vec<Arg>,
    pub names_with_defaults: Vec<NameDefaultPair>,
}

/// The `*args`, keyword-only and `**kwargs` tail of a parameter list.
#[derive(Clone, Debug, Default)]
pub(crate) struct StarEtc {
    pub vararg: Option<Arg>,
    pub kwonlyargs: Vec<NameDefaultPair>,
    pub kwarg: Option<Arg>,
}

/// A call-argument tail entry: either `name=value` / `**value` (keyword)
/// or a `*value` starred positional.
#[derive(Clone, Debug)]
pub(crate) enum KeywordOrStarred {
    Keyword(Keyword),
    Starred(Expr),
}

/// Splits a comparison tail into the aligned operator and operand lists.
pub(crate) fn split_cmpop_pairs(pairs: Vec<CmpopExprPair>) -> (Vec<CmpOp>, Vec<Expr>) {
    pairs.into_iter().map(|pair| (pair.op, pair.expr)).unzip()
}

pub(crate) fn get_keys(pairs: &[KeyValuePair]) -> Vec<Option<Expr>> {
    pairs.iter().map(|pair| pair.key.clone()).collect()
}

pub(crate) fn get_values(pairs: Vec<KeyValuePair>) -> Vec<Expr> {
    pairs.into_iter().map(|pair| pair.value).collect()
}

pub(crate) fn get_pattern_keys(pairs: &[KeyPatternPair]) -> Vec<Expr> {
    pairs.iter().map(|pair| pair.key.clone()).collect()
}

pub(crate) fn get_patterns(pairs: Vec<KeyPatternPair>) -> Vec<Pattern> {
    pairs.into_iter().map(|pair| pair.pattern).collect()
}

fn get_names(pairs: &[NameDefaultPair]) -> Vec<Arg> {
    pairs.iter().map(|pair| pair.arg.clone()).collect()
}

fn get_defaults(pairs: &[NameDefaultPair]) -> Vec<Expr> {
    pairs
        .iter()
        .filter_map(|pair| pair.value.clone())
        .collect()
}

/// Builds an `Arguments` node out of the five optional pieces the
/// parameters rule produces.
pub(crate) fn make_arguments(
    range: SourceRange,
    slash_without_default: Option<Vec<Arg>>,
    slash_with_default: Option<SlashWithDefault>,
    plain_names: Option<Vec<Arg>>,
    names_with_default: Option<Vec<NameDefaultPair>>,
    star_etc: Option<StarEtc>,
) -> Arguments {
    let posonlyargs = if let Some(names) = slash_without_default {
        names
    } else if let Some(slash) = &slash_with_default {
        let mut names = slash.plain_names.clone();
        names.extend(get_names(&slash.names_with_defaults));
        names
    } else {
        Vec::new()
    };

    let posargs = names_with_default
        .as_deref()
        .map(|pairs| {
            let mut names = plain_names.clone().unwrap_or_default();
            names.extend(get_names(pairs));
            names
        })
        .or(plain_names)
        .unwrap_or_default();

    let mut defaults = slash_with_default
        .as_ref()
        .map(|slash| get_defaults(&slash.names_with_defaults))
        .unwrap_or_default();
    defaults.extend(
        names_with_default
            .as_deref()
            .map(get_defaults)
            .unwrap_or_default(),
    );

    let star_etc = star_etc.unwrap_or_default();
    let kwonlyargs = get_names(&star_etc.kwonlyargs);
    let kw_defaults = star_etc
        .kwonlyargs
        .iter()
        .map(|pair| pair.value.clone())
        .collect();

    Arguments {
        range,
        posonlyargs,
        args: posargs,
        vararg: star_etc.vararg.map(Box::new),
        kwonlyargs,
        kw_defaults,
        kwarg: star_etc.kwarg.map(Box::new),
        defaults,
    }
}

/// Creates a new name of the form `first.second`.
pub(crate) fn join_names_with_dot(first: &Expr, second: &Expr) -> Expr {
    let (Expr::Name(a), Expr::Name(b)) = (first, second) else {
        unreachable!("dotted names are built from Name nodes");
    };
    let range = SourceRange::new(a.range.start, b.range.end);
    ExprName {
        range,
        id: Identifier::new(format!("{}.{}", a.id, b.id), range),
        ctx: taipan_ast::ExprContext::Load,
    }
    .into()
}

/// Counts the dots contributed by DOT and ELLIPSIS tokens in a relative
/// import prefix.
pub(crate) fn seq_count_dots(tokens: &[Token]) -> u32 {
    tokens
        .iter()
        .map(|token| match token.kind {
            TokenKind::Ellipsis => 3,
            TokenKind::Dot => 1,
            _ => unreachable!("import prefix contains only dots"),
        })
        .sum()
}

/// An alias with `*` as the imported name.
pub(crate) fn alias_for_star(range: SourceRange) -> Alias {
    Alias {
        range,
        name: Identifier::new("*", range),
        asname: None,
    }
}

pub(crate) fn seq_extract_starred_exprs(seq: &[KeywordOrStarred]) -> Vec<Expr> {
    seq.iter()
        .filter_map(|item| match item {
            KeywordOrStarred::Starred(expr) => Some(expr.clone()),
            KeywordOrStarred::Keyword(_) => None,
        })
        .collect()
}

pub(crate) fn seq_delete_starred_exprs(seq: Vec<KeywordOrStarred>) -> Vec<Keyword> {
    seq.into_iter()
        .filter_map(|item| match item {
            KeywordOrStarred::Keyword(keyword) => Some(keyword),
            KeywordOrStarred::Starred(_) => None,
        })
        .collect()
}

/// Reattaches a decorator list onto a freshly parsed function definition.
pub(crate) fn function_def_decorators(decorators: Vec<Expr>, function_def: Stmt) -> Stmt {
    match function_def {
        Stmt::FunctionDef(mut node) => {
            node.decorator_list = decorators;
            node.into()
        }
        Stmt::AsyncFunctionDef(mut node) => {
            node.decorator_list = decorators;
            node.into()
        }
        _ => unreachable!("decorators attach to function definitions"),
    }
}

pub(crate) fn class_def_decorators(decorators: Vec<Expr>, class_def: Stmt) -> Stmt {
    match class_def {
        Stmt::ClassDef(mut node) => {
            node.decorator_list = decorators;
            node.into()
        }
        _ => unreachable!("decorators attach to class definitions"),
    }
}

/// Whether a bare name starts one of the statements that were keywords in
/// the language's second major version.
pub(crate) fn check_legacy_stmt(name: &Expr) -> bool {
    match name {
        Expr::Name(name) => matches!(name.id.as_str(), "print" | "exec"),
        _ => false,
    }
}

/// The error anchor for an unparenthesized generator argument: the last
/// iteration-clause item.
pub(crate) fn get_last_comprehension_item(comprehension: &Comprehension) -> SourceRange {
    comprehension
        .ifs
        .last()
        .map_or_else(|| comprehension.iter.range(), Located::range)
}

/// Copies a type comment's text onto a parameter.
pub(crate) fn add_type_comment_to_arg(mut arg: Arg, tc: Option<Token>) -> Arg {
    if let Some(tc) = tc {
        arg.type_comment = Some(tc.text.to_string());
    }
    arg
}

pub(crate) fn new_type_comment(token: &Token) -> String {
    token.text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taipan_ast::ExprContext;

    fn arg(name: &str) -> Arg {
        let range = SourceRange::default();
        Arg {
            range,
            arg: Identifier::new(name, range),
            annotation: None,
            type_comment: None,
        }
    }

    fn constant(i: i32) -> Expr {
        taipan_ast::ExprConstant {
            range: SourceRange::default(),
            value: taipan_ast::Constant::Int(i.into()),
            kind: None,
        }
        .into()
    }

    #[test]
    fn test_make_arguments_distributes_defaults() {
        // (a, /, b, c=1, *, d) with the slash group carrying no defaults.
        let arguments = make_arguments(
            SourceRange::default(),
            Some(vec![arg("a")]),
            None,
            Some(vec![arg("b")]),
            Some(vec![NameDefaultPair {
                arg: arg("c"),
                value: Some(constant(1)),
            }]),
            Some(StarEtc {
                vararg: None,
                kwonlyargs: vec![NameDefaultPair {
                    arg: arg("d"),
                    value: None,
                }],
                kwarg: None,
            }),
        );
        assert_eq!(arguments.posonlyargs.len(), 1);
        assert_eq!(arguments.args.len(), 2);
        assert_eq!(arguments.defaults.len(), 1);
        assert_eq!(arguments.kwonlyargs.len(), 1);
        assert_eq!(arguments.kw_defaults, vec![None]);
        assert!(arguments.vararg.is_none() && arguments.kwarg.is_none());
    }

    #[test]
    fn test_make_arguments_slash_with_default() {
        // (a=0, /, b=1): both defaults end up in source order.
        let arguments = make_arguments(
            SourceRange::default(),
            None,
            Some(SlashWithDefault {
                plain_names: vec![],
                names_with_defaults: vec![NameDefaultPair {
                    arg: arg("a"),
                    value: Some(constant(0)),
                }],
            }),
            None,
            Some(vec![NameDefaultPair {
                arg: arg("b"),
                value: Some(constant(1)),
            }]),
            None,
        );
        assert_eq!(arguments.posonlyargs.len(), 1);
        assert_eq!(arguments.args.len(), 1);
        assert_eq!(arguments.defaults, vec![constant(0), constant(1)]);
    }

    #[test]
    fn test_join_names_with_dot() {
        let range = SourceRange::default();
        let a: Expr = ExprName {
            range,
            id: Identifier::new("os", range),
            ctx: ExprContext::Load,
        }
        .into();
        let b: Expr = ExprName {
            range,
            id: Identifier::new("path", range),
            ctx: ExprContext::Load,
        }
        .into();
        let joined = join_names_with_dot(&a, &b);
        let Expr::Name(name) = joined else {
            panic!("expected a Name");
        };
        assert_eq!(name.id.as_str(), "os.path");
    }
}
