use taipan_parser_core::{Location, SourceRange};

use crate::generic::*;

pub trait Located {
    fn range(&self) -> SourceRange;

    fn location(&self) -> Location {
        self.range().start
    }

    fn end_location(&self) -> Location {
        self.range().end
    }
}

impl<T> Located for &T
where
    T: Located,
{
    fn range(&self) -> SourceRange {
        T::range(self)
    }
}

macro_rules! impl_located {
    ($($node:ty),+ $(,)?) => {
        $(
            impl Located for $node {
                fn range(&self) -> SourceRange {
                    self.range
                }
            }
        )+
    };
}

impl_located!(
    ModModule,
    ModInteractive,
    ModExpression,
    ModFunctionType,
    StmtFunctionDef,
    StmtAsyncFunctionDef,
    StmtClassDef,
    StmtReturn,
    StmtDelete,
    StmtTypeAlias,
    StmtAssign,
    StmtAugAssign,
    StmtAnnAssign,
    StmtFor,
    StmtAsyncFor,
    StmtWhile,
    StmtIf,
    StmtWith,
    StmtAsyncWith,
    StmtMatch,
    StmtRaise,
    StmtTry,
    StmtTryStar,
    StmtAssert,
    StmtImport,
    StmtImportFrom,
    StmtGlobal,
    StmtNonlocal,
    StmtExpr,
    StmtPass,
    StmtBreak,
    StmtContinue,
    ExprBoolOp,
    ExprNamedExpr,
    ExprBinOp,
    ExprUnaryOp,
    ExprLambda,
    ExprIfExp,
    ExprDict,
    ExprSet,
    ExprListComp,
    ExprSetComp,
    ExprDictComp,
    ExprGeneratorExp,
    ExprAwait,
    ExprYield,
    ExprYieldFrom,
    ExprCompare,
    ExprCall,
    ExprFormattedValue,
    ExprJoinedStr,
    ExprConstant,
    ExprAttribute,
    ExprSubscript,
    ExprStarred,
    ExprName,
    ExprList,
    ExprTuple,
    ExprSlice,
    Comprehension,
    ExceptHandler,
    Arguments,
    Arg,
    Keyword,
    Alias,
    WithItem,
    MatchCase,
    PatternMatchValue,
    PatternMatchSingleton,
    PatternMatchSequence,
    PatternMatchMapping,
    PatternMatchClass,
    PatternMatchStar,
    PatternMatchAs,
    PatternMatchOr,
    TypeParamTypeVar,
    TypeParamParamSpec,
    TypeParamTypeVarTuple,
);

macro_rules! impl_located_sum {
    ($sum:ident: $($variant:ident),+ $(,)?) => {
        impl Located for $sum {
            fn range(&self) -> SourceRange {
                match self {
                    $(Self::$variant(node) => node.range(),)+
                }
            }
        }
    };
}

impl_located_sum!(Mod: Module, Interactive, Expression, FunctionType);
impl_located_sum!(
    Stmt: FunctionDef,
    AsyncFunctionDef,
    ClassDef,
    Return,
    Delete,
    TypeAlias,
    Assign,
    AugAssign,
    AnnAssign,
    For,
    AsyncFor,
    While,
    If,
    With,
    AsyncWith,
    Match,
    Raise,
    Try,
    TryStar,
    Assert,
    Import,
    ImportFrom,
    Global,
    Nonlocal,
    Expr,
    Pass,
    Break,
    Continue,
);
impl_located_sum!(
    Expr: BoolOp,
    NamedExpr,
    BinOp,
    UnaryOp,
    Lambda,
    IfExp,
    Dict,
    Set,
    ListComp,
    SetComp,
    DictComp,
    GeneratorExp,
    Await,
    Yield,
    YieldFrom,
    Compare,
    Call,
    FormattedValue,
    JoinedStr,
    Constant,
    Attribute,
    Subscript,
    Starred,
    Name,
    List,
    Tuple,
    Slice,
);
impl_located_sum!(
    Pattern: MatchValue,
    MatchSingleton,
    MatchSequence,
    MatchMapping,
    MatchClass,
    MatchStar,
    MatchAs,
    MatchOr,
);
impl_located_sum!(TypeParam: TypeVar, ParamSpec, TypeVarTuple);
