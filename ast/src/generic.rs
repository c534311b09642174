// This file started as a transliteration of the ASDL node set and is now
// edited manually.

use taipan_parser_core::{ConversionFlag, SourceRange};

use crate::builtin::{Constant, Identifier};

macro_rules! node_from {
    ($node:ident, $sum:ident :: $variant:ident) => {
        impl From<$node> for $sum {
            fn from(node: $node) -> Self {
                $sum::$variant(node)
            }
        }
    };
}

// --- Modules -----------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct ModModule {
    pub range: SourceRange,
    pub body: Vec<Stmt>,
    pub type_ignores: Vec<TypeIgnore>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModInteractive {
    pub range: SourceRange,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModExpression {
    pub range: SourceRange,
    pub body: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModFunctionType {
    pub range: SourceRange,
    pub argtypes: Vec<Expr>,
    pub returns: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, is_macro::Is)]
pub enum Mod {
    Module(ModModule),
    Interactive(ModInteractive),
    Expression(ModExpression),
    FunctionType(ModFunctionType),
}

node_from!(ModModule, Mod::Module);
node_from!(ModInteractive, Mod::Interactive);
node_from!(ModExpression, Mod::Expression);
node_from!(ModFunctionType, Mod::FunctionType);

// --- Statements --------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct StmtFunctionDef {
    pub range: SourceRange,
    pub name: Identifier,
    pub args: Box<Arguments>,
    pub body: Vec<Stmt>,
    pub decorator_list: Vec<Expr>,
    pub returns: Option<Box<Expr>>,
    pub type_comment: Option<String>,
    pub type_params: Vec<TypeParam>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAsyncFunctionDef {
    pub range: SourceRange,
    pub name: Identifier,
    pub args: Box<Arguments>,
    pub body: Vec<Stmt>,
    pub decorator_list: Vec<Expr>,
    pub returns: Option<Box<Expr>>,
    pub type_comment: Option<String>,
    pub type_params: Vec<TypeParam>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtClassDef {
    pub range: SourceRange,
    pub name: Identifier,
    pub bases: Vec<Expr>,
    pub keywords: Vec<Keyword>,
    pub body: Vec<Stmt>,
    pub decorator_list: Vec<Expr>,
    pub type_params: Vec<TypeParam>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtReturn {
    pub range: SourceRange,
    pub value: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtDelete {
    pub range: SourceRange,
    pub targets: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtTypeAlias {
    pub range: SourceRange,
    pub name: Box<Expr>,
    pub type_params: Vec<TypeParam>,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAssign {
    pub range: SourceRange,
    pub targets: Vec<Expr>,
    pub value: Box<Expr>,
    pub type_comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAugAssign {
    pub range: SourceRange,
    pub target: Box<Expr>,
    pub op: Operator,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAnnAssign {
    pub range: SourceRange,
    pub target: Box<Expr>,
    pub annotation: Box<Expr>,
    pub value: Option<Box<Expr>>,
    pub simple: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtFor {
    pub range: SourceRange,
    pub target: Box<Expr>,
    pub iter: Box<Expr>,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
    pub type_comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAsyncFor {
    pub range: SourceRange,
    pub target: Box<Expr>,
    pub iter: Box<Expr>,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
    pub type_comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtWhile {
    pub range: SourceRange,
    pub test: Box<Expr>,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtIf {
    pub range: SourceRange,
    pub test: Box<Expr>,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtWith {
    pub range: SourceRange,
    pub items: Vec<WithItem>,
    pub body: Vec<Stmt>,
    pub type_comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAsyncWith {
    pub range: SourceRange,
    pub items: Vec<WithItem>,
    pub body: Vec<Stmt>,
    pub type_comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtMatch {
    pub range: SourceRange,
    pub subject: Box<Expr>,
    pub cases: Vec<MatchCase>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtRaise {
    pub range: SourceRange,
    pub exc: Option<Box<Expr>>,
    pub cause: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtTry {
    pub range: SourceRange,
    pub body: Vec<Stmt>,
    pub handlers: Vec<ExceptHandler>,
    pub orelse: Vec<Stmt>,
    pub finalbody: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtTryStar {
    pub range: SourceRange,
    pub body: Vec<Stmt>,
    pub handlers: Vec<ExceptHandler>,
    pub orelse: Vec<Stmt>,
    pub finalbody: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAssert {
    pub range: SourceRange,
    pub test: Box<Expr>,
    pub msg: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtImport {
    pub range: SourceRange,
    pub names: Vec<Alias>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtImportFrom {
    pub range: SourceRange,
    pub module: Option<Identifier>,
    pub names: Vec<Alias>,
    pub level: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtGlobal {
    pub range: SourceRange,
    pub names: Vec<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtNonlocal {
    pub range: SourceRange,
    pub names: Vec<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtExpr {
    pub range: SourceRange,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtPass {
    pub range: SourceRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtBreak {
    pub range: SourceRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtContinue {
    pub range: SourceRange,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    FunctionDef(StmtFunctionDef),
    AsyncFunctionDef(StmtAsyncFunctionDef),
    ClassDef(StmtClassDef),
    Return(StmtReturn),
    Delete(StmtDelete),
    TypeAlias(StmtTypeAlias),
    Assign(StmtAssign),
    AugAssign(StmtAugAssign),
    AnnAssign(StmtAnnAssign),
    For(StmtFor),
    AsyncFor(StmtAsyncFor),
    While(StmtWhile),
    If(StmtIf),
    With(StmtWith),
    AsyncWith(StmtAsyncWith),
    Match(StmtMatch),
    Raise(StmtRaise),
    Try(StmtTry),
    TryStar(StmtTryStar),
    Assert(StmtAssert),
    Import(StmtImport),
    ImportFrom(StmtImportFrom),
    Global(StmtGlobal),
    Nonlocal(StmtNonlocal),
    Expr(StmtExpr),
    Pass(StmtPass),
    Break(StmtBreak),
    Continue(StmtContinue),
}

node_from!(StmtFunctionDef, Stmt::FunctionDef);
node_from!(StmtAsyncFunctionDef, Stmt::AsyncFunctionDef);
node_from!(StmtClassDef, Stmt::ClassDef);
node_from!(StmtReturn, Stmt::Return);
node_from!(StmtDelete, Stmt::Delete);
node_from!(StmtTypeAlias, Stmt::TypeAlias);
node_from!(StmtAssign, Stmt::Assign);
node_from!(StmtAugAssign, Stmt::AugAssign);
node_from!(StmtAnnAssign, Stmt::AnnAssign);
node_from!(StmtFor, Stmt::For);
node_from!(StmtAsyncFor, Stmt::AsyncFor);
node_from!(StmtWhile, Stmt::While);
node_from!(StmtIf, Stmt::If);
node_from!(StmtWith, Stmt::With);
node_from!(StmtAsyncWith, Stmt::AsyncWith);
node_from!(StmtMatch, Stmt::Match);
node_from!(StmtRaise, Stmt::Raise);
node_from!(StmtTry, Stmt::Try);
node_from!(StmtTryStar, Stmt::TryStar);
node_from!(StmtAssert, Stmt::Assert);
node_from!(StmtImport, Stmt::Import);
node_from!(StmtImportFrom, Stmt::ImportFrom);
node_from!(StmtGlobal, Stmt::Global);
node_from!(StmtNonlocal, Stmt::Nonlocal);
node_from!(StmtExpr, Stmt::Expr);
node_from!(StmtPass, Stmt::Pass);
node_from!(StmtBreak, Stmt::Break);
node_from!(StmtContinue, Stmt::Continue);

// `is_macro::Is` panics on variants whose snake_case name is a Rust keyword
// (e.g. `Return` -> `return`), so the is_/as_/as_mut_/expect_/take methods
// it would generate are hand-expanded here instead.
impl Stmt {
    /// Returns `true` if `self` is of variant [`FunctionDef`].
    #[inline]
    pub const fn is_function_def(&self) -> bool {
        matches!(self, Self::FunctionDef(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`FunctionDef`], and `None` otherwise.
    #[inline]
    pub fn as_function_def(&self) -> Option<&StmtFunctionDef> {
        match self {
            Self::FunctionDef(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`FunctionDef`], and `None` otherwise.
    #[inline]
    pub fn as_mut_function_def(&mut self) -> Option<&mut StmtFunctionDef> {
        match self {
            Self::FunctionDef(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`FunctionDef`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`FunctionDef`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_function_def(self) -> StmtFunctionDef {
        match self {
            Self::FunctionDef(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`FunctionDef`], and `None` otherwise.
    #[inline]
    pub fn function_def(self) -> Option<StmtFunctionDef> {
        match self {
            Self::FunctionDef(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`AsyncFunctionDef`].
    #[inline]
    pub const fn is_async_function_def(&self) -> bool {
        matches!(self, Self::AsyncFunctionDef(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`AsyncFunctionDef`], and `None` otherwise.
    #[inline]
    pub fn as_async_function_def(&self) -> Option<&StmtAsyncFunctionDef> {
        match self {
            Self::AsyncFunctionDef(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`AsyncFunctionDef`], and `None` otherwise.
    #[inline]
    pub fn as_mut_async_function_def(&mut self) -> Option<&mut StmtAsyncFunctionDef> {
        match self {
            Self::AsyncFunctionDef(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`AsyncFunctionDef`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`AsyncFunctionDef`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_async_function_def(self) -> StmtAsyncFunctionDef {
        match self {
            Self::AsyncFunctionDef(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`AsyncFunctionDef`], and `None` otherwise.
    #[inline]
    pub fn async_function_def(self) -> Option<StmtAsyncFunctionDef> {
        match self {
            Self::AsyncFunctionDef(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`ClassDef`].
    #[inline]
    pub const fn is_class_def(&self) -> bool {
        matches!(self, Self::ClassDef(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`ClassDef`], and `None` otherwise.
    #[inline]
    pub fn as_class_def(&self) -> Option<&StmtClassDef> {
        match self {
            Self::ClassDef(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`ClassDef`], and `None` otherwise.
    #[inline]
    pub fn as_mut_class_def(&mut self) -> Option<&mut StmtClassDef> {
        match self {
            Self::ClassDef(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`ClassDef`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`ClassDef`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_class_def(self) -> StmtClassDef {
        match self {
            Self::ClassDef(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`ClassDef`], and `None` otherwise.
    #[inline]
    pub fn class_def(self) -> Option<StmtClassDef> {
        match self {
            Self::ClassDef(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Return`].
    #[inline]
    pub const fn is_return(&self) -> bool {
        matches!(self, Self::Return(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Return`], and `None` otherwise.
    #[inline]
    pub fn as_return(&self) -> Option<&StmtReturn> {
        match self {
            Self::Return(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Return`], and `None` otherwise.
    #[inline]
    pub fn as_mut_return(&mut self) -> Option<&mut StmtReturn> {
        match self {
            Self::Return(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Return`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Return`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_return(self) -> StmtReturn {
        match self {
            Self::Return(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Return`], and `None` otherwise.
    #[inline]
    pub fn r#return(self) -> Option<StmtReturn> {
        match self {
            Self::Return(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Delete`].
    #[inline]
    pub const fn is_delete(&self) -> bool {
        matches!(self, Self::Delete(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Delete`], and `None` otherwise.
    #[inline]
    pub fn as_delete(&self) -> Option<&StmtDelete> {
        match self {
            Self::Delete(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Delete`], and `None` otherwise.
    #[inline]
    pub fn as_mut_delete(&mut self) -> Option<&mut StmtDelete> {
        match self {
            Self::Delete(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Delete`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Delete`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_delete(self) -> StmtDelete {
        match self {
            Self::Delete(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Delete`], and `None` otherwise.
    #[inline]
    pub fn delete(self) -> Option<StmtDelete> {
        match self {
            Self::Delete(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`TypeAlias`].
    #[inline]
    pub const fn is_type_alias(&self) -> bool {
        matches!(self, Self::TypeAlias(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`TypeAlias`], and `None` otherwise.
    #[inline]
    pub fn as_type_alias(&self) -> Option<&StmtTypeAlias> {
        match self {
            Self::TypeAlias(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`TypeAlias`], and `None` otherwise.
    #[inline]
    pub fn as_mut_type_alias(&mut self) -> Option<&mut StmtTypeAlias> {
        match self {
            Self::TypeAlias(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`TypeAlias`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`TypeAlias`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_type_alias(self) -> StmtTypeAlias {
        match self {
            Self::TypeAlias(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`TypeAlias`], and `None` otherwise.
    #[inline]
    pub fn type_alias(self) -> Option<StmtTypeAlias> {
        match self {
            Self::TypeAlias(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Assign`].
    #[inline]
    pub const fn is_assign(&self) -> bool {
        matches!(self, Self::Assign(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Assign`], and `None` otherwise.
    #[inline]
    pub fn as_assign(&self) -> Option<&StmtAssign> {
        match self {
            Self::Assign(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Assign`], and `None` otherwise.
    #[inline]
    pub fn as_mut_assign(&mut self) -> Option<&mut StmtAssign> {
        match self {
            Self::Assign(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Assign`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Assign`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_assign(self) -> StmtAssign {
        match self {
            Self::Assign(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Assign`], and `None` otherwise.
    #[inline]
    pub fn assign(self) -> Option<StmtAssign> {
        match self {
            Self::Assign(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`AugAssign`].
    #[inline]
    pub const fn is_aug_assign(&self) -> bool {
        matches!(self, Self::AugAssign(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`AugAssign`], and `None` otherwise.
    #[inline]
    pub fn as_aug_assign(&self) -> Option<&StmtAugAssign> {
        match self {
            Self::AugAssign(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`AugAssign`], and `None` otherwise.
    #[inline]
    pub fn as_mut_aug_assign(&mut self) -> Option<&mut StmtAugAssign> {
        match self {
            Self::AugAssign(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`AugAssign`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`AugAssign`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_aug_assign(self) -> StmtAugAssign {
        match self {
            Self::AugAssign(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`AugAssign`], and `None` otherwise.
    #[inline]
    pub fn aug_assign(self) -> Option<StmtAugAssign> {
        match self {
            Self::AugAssign(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`AnnAssign`].
    #[inline]
    pub const fn is_ann_assign(&self) -> bool {
        matches!(self, Self::AnnAssign(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`AnnAssign`], and `None` otherwise.
    #[inline]
    pub fn as_ann_assign(&self) -> Option<&StmtAnnAssign> {
        match self {
            Self::AnnAssign(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`AnnAssign`], and `None` otherwise.
    #[inline]
    pub fn as_mut_ann_assign(&mut self) -> Option<&mut StmtAnnAssign> {
        match self {
            Self::AnnAssign(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`AnnAssign`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`AnnAssign`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_ann_assign(self) -> StmtAnnAssign {
        match self {
            Self::AnnAssign(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`AnnAssign`], and `None` otherwise.
    #[inline]
    pub fn ann_assign(self) -> Option<StmtAnnAssign> {
        match self {
            Self::AnnAssign(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`For`].
    #[inline]
    pub const fn is_for(&self) -> bool {
        matches!(self, Self::For(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`For`], and `None` otherwise.
    #[inline]
    pub fn as_for(&self) -> Option<&StmtFor> {
        match self {
            Self::For(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`For`], and `None` otherwise.
    #[inline]
    pub fn as_mut_for(&mut self) -> Option<&mut StmtFor> {
        match self {
            Self::For(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`For`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`For`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_for(self) -> StmtFor {
        match self {
            Self::For(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`For`], and `None` otherwise.
    #[inline]
    pub fn r#for(self) -> Option<StmtFor> {
        match self {
            Self::For(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`AsyncFor`].
    #[inline]
    pub const fn is_async_for(&self) -> bool {
        matches!(self, Self::AsyncFor(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`AsyncFor`], and `None` otherwise.
    #[inline]
    pub fn as_async_for(&self) -> Option<&StmtAsyncFor> {
        match self {
            Self::AsyncFor(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`AsyncFor`], and `None` otherwise.
    #[inline]
    pub fn as_mut_async_for(&mut self) -> Option<&mut StmtAsyncFor> {
        match self {
            Self::AsyncFor(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`AsyncFor`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`AsyncFor`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_async_for(self) -> StmtAsyncFor {
        match self {
            Self::AsyncFor(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`AsyncFor`], and `None` otherwise.
    #[inline]
    pub fn async_for(self) -> Option<StmtAsyncFor> {
        match self {
            Self::AsyncFor(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`While`].
    #[inline]
    pub const fn is_while(&self) -> bool {
        matches!(self, Self::While(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`While`], and `None` otherwise.
    #[inline]
    pub fn as_while(&self) -> Option<&StmtWhile> {
        match self {
            Self::While(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`While`], and `None` otherwise.
    #[inline]
    pub fn as_mut_while(&mut self) -> Option<&mut StmtWhile> {
        match self {
            Self::While(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`While`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`While`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_while(self) -> StmtWhile {
        match self {
            Self::While(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`While`], and `None` otherwise.
    #[inline]
    pub fn r#while(self) -> Option<StmtWhile> {
        match self {
            Self::While(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`If`].
    #[inline]
    pub const fn is_if(&self) -> bool {
        matches!(self, Self::If(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`If`], and `None` otherwise.
    #[inline]
    pub fn as_if(&self) -> Option<&StmtIf> {
        match self {
            Self::If(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`If`], and `None` otherwise.
    #[inline]
    pub fn as_mut_if(&mut self) -> Option<&mut StmtIf> {
        match self {
            Self::If(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`If`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`If`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_if(self) -> StmtIf {
        match self {
            Self::If(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`If`], and `None` otherwise.
    #[inline]
    pub fn r#if(self) -> Option<StmtIf> {
        match self {
            Self::If(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`With`].
    #[inline]
    pub const fn is_with(&self) -> bool {
        matches!(self, Self::With(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`With`], and `None` otherwise.
    #[inline]
    pub fn as_with(&self) -> Option<&StmtWith> {
        match self {
            Self::With(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`With`], and `None` otherwise.
    #[inline]
    pub fn as_mut_with(&mut self) -> Option<&mut StmtWith> {
        match self {
            Self::With(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`With`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`With`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_with(self) -> StmtWith {
        match self {
            Self::With(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`With`], and `None` otherwise.
    #[inline]
    pub fn with(self) -> Option<StmtWith> {
        match self {
            Self::With(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`AsyncWith`].
    #[inline]
    pub const fn is_async_with(&self) -> bool {
        matches!(self, Self::AsyncWith(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`AsyncWith`], and `None` otherwise.
    #[inline]
    pub fn as_async_with(&self) -> Option<&StmtAsyncWith> {
        match self {
            Self::AsyncWith(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`AsyncWith`], and `None` otherwise.
    #[inline]
    pub fn as_mut_async_with(&mut self) -> Option<&mut StmtAsyncWith> {
        match self {
            Self::AsyncWith(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`AsyncWith`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`AsyncWith`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_async_with(self) -> StmtAsyncWith {
        match self {
            Self::AsyncWith(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`AsyncWith`], and `None` otherwise.
    #[inline]
    pub fn async_with(self) -> Option<StmtAsyncWith> {
        match self {
            Self::AsyncWith(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Match`].
    #[inline]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Match`], and `None` otherwise.
    #[inline]
    pub fn as_match(&self) -> Option<&StmtMatch> {
        match self {
            Self::Match(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Match`], and `None` otherwise.
    #[inline]
    pub fn as_mut_match(&mut self) -> Option<&mut StmtMatch> {
        match self {
            Self::Match(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Match`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Match`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_match(self) -> StmtMatch {
        match self {
            Self::Match(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Match`], and `None` otherwise.
    #[inline]
    pub fn r#match(self) -> Option<StmtMatch> {
        match self {
            Self::Match(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Raise`].
    #[inline]
    pub const fn is_raise(&self) -> bool {
        matches!(self, Self::Raise(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Raise`], and `None` otherwise.
    #[inline]
    pub fn as_raise(&self) -> Option<&StmtRaise> {
        match self {
            Self::Raise(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Raise`], and `None` otherwise.
    #[inline]
    pub fn as_mut_raise(&mut self) -> Option<&mut StmtRaise> {
        match self {
            Self::Raise(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Raise`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Raise`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_raise(self) -> StmtRaise {
        match self {
            Self::Raise(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Raise`], and `None` otherwise.
    #[inline]
    pub fn raise(self) -> Option<StmtRaise> {
        match self {
            Self::Raise(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Try`].
    #[inline]
    pub const fn is_try(&self) -> bool {
        matches!(self, Self::Try(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Try`], and `None` otherwise.
    #[inline]
    pub fn as_try(&self) -> Option<&StmtTry> {
        match self {
            Self::Try(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Try`], and `None` otherwise.
    #[inline]
    pub fn as_mut_try(&mut self) -> Option<&mut StmtTry> {
        match self {
            Self::Try(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Try`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Try`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_try(self) -> StmtTry {
        match self {
            Self::Try(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Try`], and `None` otherwise.
    #[inline]
    pub fn r#try(self) -> Option<StmtTry> {
        match self {
            Self::Try(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`TryStar`].
    #[inline]
    pub const fn is_try_star(&self) -> bool {
        matches!(self, Self::TryStar(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`TryStar`], and `None` otherwise.
    #[inline]
    pub fn as_try_star(&self) -> Option<&StmtTryStar> {
        match self {
            Self::TryStar(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`TryStar`], and `None` otherwise.
    #[inline]
    pub fn as_mut_try_star(&mut self) -> Option<&mut StmtTryStar> {
        match self {
            Self::TryStar(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`TryStar`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`TryStar`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_try_star(self) -> StmtTryStar {
        match self {
            Self::TryStar(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`TryStar`], and `None` otherwise.
    #[inline]
    pub fn try_star(self) -> Option<StmtTryStar> {
        match self {
            Self::TryStar(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Assert`].
    #[inline]
    pub const fn is_assert(&self) -> bool {
        matches!(self, Self::Assert(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Assert`], and `None` otherwise.
    #[inline]
    pub fn as_assert(&self) -> Option<&StmtAssert> {
        match self {
            Self::Assert(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Assert`], and `None` otherwise.
    #[inline]
    pub fn as_mut_assert(&mut self) -> Option<&mut StmtAssert> {
        match self {
            Self::Assert(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Assert`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Assert`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_assert(self) -> StmtAssert {
        match self {
            Self::Assert(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Assert`], and `None` otherwise.
    #[inline]
    pub fn assert(self) -> Option<StmtAssert> {
        match self {
            Self::Assert(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Import`].
    #[inline]
    pub const fn is_import(&self) -> bool {
        matches!(self, Self::Import(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Import`], and `None` otherwise.
    #[inline]
    pub fn as_import(&self) -> Option<&StmtImport> {
        match self {
            Self::Import(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Import`], and `None` otherwise.
    #[inline]
    pub fn as_mut_import(&mut self) -> Option<&mut StmtImport> {
        match self {
            Self::Import(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Import`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Import`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_import(self) -> StmtImport {
        match self {
            Self::Import(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Import`], and `None` otherwise.
    #[inline]
    pub fn import(self) -> Option<StmtImport> {
        match self {
            Self::Import(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`ImportFrom`].
    #[inline]
    pub const fn is_import_from(&self) -> bool {
        matches!(self, Self::ImportFrom(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`ImportFrom`], and `None` otherwise.
    #[inline]
    pub fn as_import_from(&self) -> Option<&StmtImportFrom> {
        match self {
            Self::ImportFrom(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`ImportFrom`], and `None` otherwise.
    #[inline]
    pub fn as_mut_import_from(&mut self) -> Option<&mut StmtImportFrom> {
        match self {
            Self::ImportFrom(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`ImportFrom`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`ImportFrom`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_import_from(self) -> StmtImportFrom {
        match self {
            Self::ImportFrom(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`ImportFrom`], and `None` otherwise.
    #[inline]
    pub fn import_from(self) -> Option<StmtImportFrom> {
        match self {
            Self::ImportFrom(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Global`].
    #[inline]
    pub const fn is_global(&self) -> bool {
        matches!(self, Self::Global(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Global`], and `None` otherwise.
    #[inline]
    pub fn as_global(&self) -> Option<&StmtGlobal> {
        match self {
            Self::Global(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Global`], and `None` otherwise.
    #[inline]
    pub fn as_mut_global(&mut self) -> Option<&mut StmtGlobal> {
        match self {
            Self::Global(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Global`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Global`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_global(self) -> StmtGlobal {
        match self {
            Self::Global(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Global`], and `None` otherwise.
    #[inline]
    pub fn global(self) -> Option<StmtGlobal> {
        match self {
            Self::Global(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Nonlocal`].
    #[inline]
    pub const fn is_nonlocal(&self) -> bool {
        matches!(self, Self::Nonlocal(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Nonlocal`], and `None` otherwise.
    #[inline]
    pub fn as_nonlocal(&self) -> Option<&StmtNonlocal> {
        match self {
            Self::Nonlocal(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Nonlocal`], and `None` otherwise.
    #[inline]
    pub fn as_mut_nonlocal(&mut self) -> Option<&mut StmtNonlocal> {
        match self {
            Self::Nonlocal(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Nonlocal`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Nonlocal`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_nonlocal(self) -> StmtNonlocal {
        match self {
            Self::Nonlocal(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Nonlocal`], and `None` otherwise.
    #[inline]
    pub fn nonlocal(self) -> Option<StmtNonlocal> {
        match self {
            Self::Nonlocal(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Expr`].
    #[inline]
    pub const fn is_expr(&self) -> bool {
        matches!(self, Self::Expr(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Expr`], and `None` otherwise.
    #[inline]
    pub fn as_expr(&self) -> Option<&StmtExpr> {
        match self {
            Self::Expr(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Expr`], and `None` otherwise.
    #[inline]
    pub fn as_mut_expr(&mut self) -> Option<&mut StmtExpr> {
        match self {
            Self::Expr(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Expr`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Expr`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_expr(self) -> StmtExpr {
        match self {
            Self::Expr(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Expr`], and `None` otherwise.
    #[inline]
    pub fn expr(self) -> Option<StmtExpr> {
        match self {
            Self::Expr(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Pass`].
    #[inline]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Pass`], and `None` otherwise.
    #[inline]
    pub fn as_pass(&self) -> Option<&StmtPass> {
        match self {
            Self::Pass(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Pass`], and `None` otherwise.
    #[inline]
    pub fn as_mut_pass(&mut self) -> Option<&mut StmtPass> {
        match self {
            Self::Pass(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Pass`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Pass`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_pass(self) -> StmtPass {
        match self {
            Self::Pass(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Pass`], and `None` otherwise.
    #[inline]
    pub fn pass(self) -> Option<StmtPass> {
        match self {
            Self::Pass(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Break`].
    #[inline]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::Break(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Break`], and `None` otherwise.
    #[inline]
    pub fn as_break(&self) -> Option<&StmtBreak> {
        match self {
            Self::Break(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Break`], and `None` otherwise.
    #[inline]
    pub fn as_mut_break(&mut self) -> Option<&mut StmtBreak> {
        match self {
            Self::Break(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Break`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Break`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_break(self) -> StmtBreak {
        match self {
            Self::Break(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Break`], and `None` otherwise.
    #[inline]
    pub fn r#break(self) -> Option<StmtBreak> {
        match self {
            Self::Break(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Continue`].
    #[inline]
    pub const fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Continue`], and `None` otherwise.
    #[inline]
    pub fn as_continue(&self) -> Option<&StmtContinue> {
        match self {
            Self::Continue(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Continue`], and `None` otherwise.
    #[inline]
    pub fn as_mut_continue(&mut self) -> Option<&mut StmtContinue> {
        match self {
            Self::Continue(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Continue`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Continue`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_continue(self) -> StmtContinue {
        match self {
            Self::Continue(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Continue`], and `None` otherwise.
    #[inline]
    pub fn r#continue(self) -> Option<StmtContinue> {
        match self {
            Self::Continue(v0) => Some(v0),
            _ => None,
        }
    }
}

// --- Expressions -------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct ExprBoolOp {
    pub range: SourceRange,
    pub op: BoolOp,
    pub values: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprNamedExpr {
    pub range: SourceRange,
    pub target: Box<Expr>,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprBinOp {
    pub range: SourceRange,
    pub left: Box<Expr>,
    pub op: Operator,
    pub right: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprUnaryOp {
    pub range: SourceRange,
    pub op: UnaryOp,
    pub operand: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprLambda {
    pub range: SourceRange,
    pub args: Box<Arguments>,
    pub body: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprIfExp {
    pub range: SourceRange,
    pub test: Box<Expr>,
    pub body: Box<Expr>,
    pub orelse: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprDict {
    pub range: SourceRange,
    /// `None` keys mark `**` double-starred entries.
    pub keys: Vec<Option<Expr>>,
    pub values: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprSet {
    pub range: SourceRange,
    pub elts: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprListComp {
    pub range: SourceRange,
    pub elt: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprSetComp {
    pub range: SourceRange,
    pub elt: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprDictComp {
    pub range: SourceRange,
    pub key: Box<Expr>,
    pub value: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprGeneratorExp {
    pub range: SourceRange,
    pub elt: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprAwait {
    pub range: SourceRange,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprYield {
    pub range: SourceRange,
    pub value: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprYieldFrom {
    pub range: SourceRange,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprCompare {
    pub range: SourceRange,
    pub left: Box<Expr>,
    pub ops: Vec<CmpOp>,
    pub comparators: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprCall {
    pub range: SourceRange,
    pub func: Box<Expr>,
    pub args: Vec<Expr>,
    pub keywords: Vec<Keyword>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprFormattedValue {
    pub range: SourceRange,
    pub value: Box<Expr>,
    pub conversion: ConversionFlag,
    pub format_spec: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprJoinedStr {
    pub range: SourceRange,
    pub values: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprConstant {
    pub range: SourceRange,
    pub value: Constant,
    pub kind: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprAttribute {
    pub range: SourceRange,
    pub value: Box<Expr>,
    pub attr: Identifier,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprSubscript {
    pub range: SourceRange,
    pub value: Box<Expr>,
    pub slice: Box<Expr>,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprStarred {
    pub range: SourceRange,
    pub value: Box<Expr>,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprName {
    pub range: SourceRange,
    pub id: Identifier,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprList {
    pub range: SourceRange,
    pub elts: Vec<Expr>,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprTuple {
    pub range: SourceRange,
    pub elts: Vec<Expr>,
    pub ctx: ExprContext,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprSlice {
    pub range: SourceRange,
    pub lower: Option<Box<Expr>>,
    pub upper: Option<Box<Expr>>,
    pub step: Option<Box<Expr>>,
}

// `is_macro::Is` panics on variants whose snake_case name is a Rust keyword
// (e.g. `Await` -> `await`), so the is_/as_/as_mut_/expect_/take methods it
// would generate are hand-expanded further below instead.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    BoolOp(ExprBoolOp),
    NamedExpr(ExprNamedExpr),
    BinOp(ExprBinOp),
    UnaryOp(ExprUnaryOp),
    Lambda(ExprLambda),
    IfExp(ExprIfExp),
    Dict(ExprDict),
    Set(ExprSet),
    ListComp(ExprListComp),
    SetComp(ExprSetComp),
    DictComp(ExprDictComp),
    GeneratorExp(ExprGeneratorExp),
    Await(ExprAwait),
    Yield(ExprYield),
    YieldFrom(ExprYieldFrom),
    Compare(ExprCompare),
    Call(ExprCall),
    FormattedValue(ExprFormattedValue),
    JoinedStr(ExprJoinedStr),
    Constant(ExprConstant),
    Attribute(ExprAttribute),
    Subscript(ExprSubscript),
    Starred(ExprStarred),
    Name(ExprName),
    List(ExprList),
    Tuple(ExprTuple),
    Slice(ExprSlice),
}

node_from!(ExprBoolOp, Expr::BoolOp);
node_from!(ExprNamedExpr, Expr::NamedExpr);
node_from!(ExprBinOp, Expr::BinOp);
node_from!(ExprUnaryOp, Expr::UnaryOp);
node_from!(ExprLambda, Expr::Lambda);
node_from!(ExprIfExp, Expr::IfExp);
node_from!(ExprDict, Expr::Dict);
node_from!(ExprSet, Expr::Set);
node_from!(ExprListComp, Expr::ListComp);
node_from!(ExprSetComp, Expr::SetComp);
node_from!(ExprDictComp, Expr::DictComp);
node_from!(ExprGeneratorExp, Expr::GeneratorExp);
node_from!(ExprAwait, Expr::Await);
node_from!(ExprYield, Expr::Yield);
node_from!(ExprYieldFrom, Expr::YieldFrom);
node_from!(ExprCompare, Expr::Compare);
node_from!(ExprCall, Expr::Call);
node_from!(ExprFormattedValue, Expr::FormattedValue);
node_from!(ExprJoinedStr, Expr::JoinedStr);
node_from!(ExprConstant, Expr::Constant);
node_from!(ExprAttribute, Expr::Attribute);
node_from!(ExprSubscript, Expr::Subscript);
node_from!(ExprStarred, Expr::Starred);
node_from!(ExprName, Expr::Name);
node_from!(ExprList, Expr::List);
node_from!(ExprTuple, Expr::Tuple);
node_from!(ExprSlice, Expr::Slice);

impl Expr {
    /// Returns `true` if `self` is of variant [`BoolOp`].
    #[inline]
    pub const fn is_bool_op(&self) -> bool {
        matches!(self, Self::BoolOp(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`BoolOp`], and `None` otherwise.
    #[inline]
    pub fn as_bool_op(&self) -> Option<&ExprBoolOp> {
        match self {
            Self::BoolOp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`BoolOp`], and `None` otherwise.
    #[inline]
    pub fn as_mut_bool_op(&mut self) -> Option<&mut ExprBoolOp> {
        match self {
            Self::BoolOp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`BoolOp`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`BoolOp`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_bool_op(self) -> ExprBoolOp {
        match self {
            Self::BoolOp(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`BoolOp`], and `None` otherwise.
    #[inline]
    pub fn bool_op(self) -> Option<ExprBoolOp> {
        match self {
            Self::BoolOp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`NamedExpr`].
    #[inline]
    pub const fn is_named_expr(&self) -> bool {
        matches!(self, Self::NamedExpr(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`NamedExpr`], and `None` otherwise.
    #[inline]
    pub fn as_named_expr(&self) -> Option<&ExprNamedExpr> {
        match self {
            Self::NamedExpr(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`NamedExpr`], and `None` otherwise.
    #[inline]
    pub fn as_mut_named_expr(&mut self) -> Option<&mut ExprNamedExpr> {
        match self {
            Self::NamedExpr(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`NamedExpr`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`NamedExpr`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_named_expr(self) -> ExprNamedExpr {
        match self {
            Self::NamedExpr(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`NamedExpr`], and `None` otherwise.
    #[inline]
    pub fn named_expr(self) -> Option<ExprNamedExpr> {
        match self {
            Self::NamedExpr(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`BinOp`].
    #[inline]
    pub const fn is_bin_op(&self) -> bool {
        matches!(self, Self::BinOp(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`BinOp`], and `None` otherwise.
    #[inline]
    pub fn as_bin_op(&self) -> Option<&ExprBinOp> {
        match self {
            Self::BinOp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`BinOp`], and `None` otherwise.
    #[inline]
    pub fn as_mut_bin_op(&mut self) -> Option<&mut ExprBinOp> {
        match self {
            Self::BinOp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`BinOp`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`BinOp`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_bin_op(self) -> ExprBinOp {
        match self {
            Self::BinOp(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`BinOp`], and `None` otherwise.
    #[inline]
    pub fn bin_op(self) -> Option<ExprBinOp> {
        match self {
            Self::BinOp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`UnaryOp`].
    #[inline]
    pub const fn is_unary_op(&self) -> bool {
        matches!(self, Self::UnaryOp(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`UnaryOp`], and `None` otherwise.
    #[inline]
    pub fn as_unary_op(&self) -> Option<&ExprUnaryOp> {
        match self {
            Self::UnaryOp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`UnaryOp`], and `None` otherwise.
    #[inline]
    pub fn as_mut_unary_op(&mut self) -> Option<&mut ExprUnaryOp> {
        match self {
            Self::UnaryOp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`UnaryOp`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`UnaryOp`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_unary_op(self) -> ExprUnaryOp {
        match self {
            Self::UnaryOp(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`UnaryOp`], and `None` otherwise.
    #[inline]
    pub fn unary_op(self) -> Option<ExprUnaryOp> {
        match self {
            Self::UnaryOp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Lambda`].
    #[inline]
    pub const fn is_lambda(&self) -> bool {
        matches!(self, Self::Lambda(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Lambda`], and `None` otherwise.
    #[inline]
    pub fn as_lambda(&self) -> Option<&ExprLambda> {
        match self {
            Self::Lambda(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Lambda`], and `None` otherwise.
    #[inline]
    pub fn as_mut_lambda(&mut self) -> Option<&mut ExprLambda> {
        match self {
            Self::Lambda(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Lambda`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Lambda`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_lambda(self) -> ExprLambda {
        match self {
            Self::Lambda(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Lambda`], and `None` otherwise.
    #[inline]
    pub fn lambda(self) -> Option<ExprLambda> {
        match self {
            Self::Lambda(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`IfExp`].
    #[inline]
    pub const fn is_if_exp(&self) -> bool {
        matches!(self, Self::IfExp(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`IfExp`], and `None` otherwise.
    #[inline]
    pub fn as_if_exp(&self) -> Option<&ExprIfExp> {
        match self {
            Self::IfExp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`IfExp`], and `None` otherwise.
    #[inline]
    pub fn as_mut_if_exp(&mut self) -> Option<&mut ExprIfExp> {
        match self {
            Self::IfExp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`IfExp`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`IfExp`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_if_exp(self) -> ExprIfExp {
        match self {
            Self::IfExp(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`IfExp`], and `None` otherwise.
    #[inline]
    pub fn if_exp(self) -> Option<ExprIfExp> {
        match self {
            Self::IfExp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Dict`].
    #[inline]
    pub const fn is_dict(&self) -> bool {
        matches!(self, Self::Dict(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Dict`], and `None` otherwise.
    #[inline]
    pub fn as_dict(&self) -> Option<&ExprDict> {
        match self {
            Self::Dict(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Dict`], and `None` otherwise.
    #[inline]
    pub fn as_mut_dict(&mut self) -> Option<&mut ExprDict> {
        match self {
            Self::Dict(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Dict`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Dict`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_dict(self) -> ExprDict {
        match self {
            Self::Dict(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Dict`], and `None` otherwise.
    #[inline]
    pub fn dict(self) -> Option<ExprDict> {
        match self {
            Self::Dict(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Set`].
    #[inline]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Set`], and `None` otherwise.
    #[inline]
    pub fn as_set(&self) -> Option<&ExprSet> {
        match self {
            Self::Set(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Set`], and `None` otherwise.
    #[inline]
    pub fn as_mut_set(&mut self) -> Option<&mut ExprSet> {
        match self {
            Self::Set(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Set`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Set`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_set(self) -> ExprSet {
        match self {
            Self::Set(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Set`], and `None` otherwise.
    #[inline]
    pub fn set(self) -> Option<ExprSet> {
        match self {
            Self::Set(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`ListComp`].
    #[inline]
    pub const fn is_list_comp(&self) -> bool {
        matches!(self, Self::ListComp(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`ListComp`], and `None` otherwise.
    #[inline]
    pub fn as_list_comp(&self) -> Option<&ExprListComp> {
        match self {
            Self::ListComp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`ListComp`], and `None` otherwise.
    #[inline]
    pub fn as_mut_list_comp(&mut self) -> Option<&mut ExprListComp> {
        match self {
            Self::ListComp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`ListComp`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`ListComp`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_list_comp(self) -> ExprListComp {
        match self {
            Self::ListComp(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`ListComp`], and `None` otherwise.
    #[inline]
    pub fn list_comp(self) -> Option<ExprListComp> {
        match self {
            Self::ListComp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`SetComp`].
    #[inline]
    pub const fn is_set_comp(&self) -> bool {
        matches!(self, Self::SetComp(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`SetComp`], and `None` otherwise.
    #[inline]
    pub fn as_set_comp(&self) -> Option<&ExprSetComp> {
        match self {
            Self::SetComp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`SetComp`], and `None` otherwise.
    #[inline]
    pub fn as_mut_set_comp(&mut self) -> Option<&mut ExprSetComp> {
        match self {
            Self::SetComp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`SetComp`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`SetComp`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_set_comp(self) -> ExprSetComp {
        match self {
            Self::SetComp(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`SetComp`], and `None` otherwise.
    #[inline]
    pub fn set_comp(self) -> Option<ExprSetComp> {
        match self {
            Self::SetComp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`DictComp`].
    #[inline]
    pub const fn is_dict_comp(&self) -> bool {
        matches!(self, Self::DictComp(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`DictComp`], and `None` otherwise.
    #[inline]
    pub fn as_dict_comp(&self) -> Option<&ExprDictComp> {
        match self {
            Self::DictComp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`DictComp`], and `None` otherwise.
    #[inline]
    pub fn as_mut_dict_comp(&mut self) -> Option<&mut ExprDictComp> {
        match self {
            Self::DictComp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`DictComp`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`DictComp`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_dict_comp(self) -> ExprDictComp {
        match self {
            Self::DictComp(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`DictComp`], and `None` otherwise.
    #[inline]
    pub fn dict_comp(self) -> Option<ExprDictComp> {
        match self {
            Self::DictComp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`GeneratorExp`].
    #[inline]
    pub const fn is_generator_exp(&self) -> bool {
        matches!(self, Self::GeneratorExp(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`GeneratorExp`], and `None` otherwise.
    #[inline]
    pub fn as_generator_exp(&self) -> Option<&ExprGeneratorExp> {
        match self {
            Self::GeneratorExp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`GeneratorExp`], and `None` otherwise.
    #[inline]
    pub fn as_mut_generator_exp(&mut self) -> Option<&mut ExprGeneratorExp> {
        match self {
            Self::GeneratorExp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`GeneratorExp`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`GeneratorExp`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_generator_exp(self) -> ExprGeneratorExp {
        match self {
            Self::GeneratorExp(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`GeneratorExp`], and `None` otherwise.
    #[inline]
    pub fn generator_exp(self) -> Option<ExprGeneratorExp> {
        match self {
            Self::GeneratorExp(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Await`].
    #[inline]
    pub const fn is_await(&self) -> bool {
        matches!(self, Self::Await(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Await`], and `None` otherwise.
    #[inline]
    pub fn as_await(&self) -> Option<&ExprAwait> {
        match self {
            Self::Await(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Await`], and `None` otherwise.
    #[inline]
    pub fn as_mut_await(&mut self) -> Option<&mut ExprAwait> {
        match self {
            Self::Await(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Await`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Await`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_await(self) -> ExprAwait {
        match self {
            Self::Await(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Await`], and `None` otherwise.
    #[inline]
    pub fn r#await(self) -> Option<ExprAwait> {
        match self {
            Self::Await(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Yield`].
    #[inline]
    pub const fn is_yield(&self) -> bool {
        matches!(self, Self::Yield(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Yield`], and `None` otherwise.
    #[inline]
    pub fn as_yield(&self) -> Option<&ExprYield> {
        match self {
            Self::Yield(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Yield`], and `None` otherwise.
    #[inline]
    pub fn as_mut_yield(&mut self) -> Option<&mut ExprYield> {
        match self {
            Self::Yield(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Yield`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Yield`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_yield(self) -> ExprYield {
        match self {
            Self::Yield(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Yield`], and `None` otherwise.
    #[inline]
    pub fn r#yield(self) -> Option<ExprYield> {
        match self {
            Self::Yield(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`YieldFrom`].
    #[inline]
    pub const fn is_yield_from(&self) -> bool {
        matches!(self, Self::YieldFrom(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`YieldFrom`], and `None` otherwise.
    #[inline]
    pub fn as_yield_from(&self) -> Option<&ExprYieldFrom> {
        match self {
            Self::YieldFrom(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`YieldFrom`], and `None` otherwise.
    #[inline]
    pub fn as_mut_yield_from(&mut self) -> Option<&mut ExprYieldFrom> {
        match self {
            Self::YieldFrom(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`YieldFrom`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`YieldFrom`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_yield_from(self) -> ExprYieldFrom {
        match self {
            Self::YieldFrom(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`YieldFrom`], and `None` otherwise.
    #[inline]
    pub fn yield_from(self) -> Option<ExprYieldFrom> {
        match self {
            Self::YieldFrom(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Compare`].
    #[inline]
    pub const fn is_compare(&self) -> bool {
        matches!(self, Self::Compare(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Compare`], and `None` otherwise.
    #[inline]
    pub fn as_compare(&self) -> Option<&ExprCompare> {
        match self {
            Self::Compare(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Compare`], and `None` otherwise.
    #[inline]
    pub fn as_mut_compare(&mut self) -> Option<&mut ExprCompare> {
        match self {
            Self::Compare(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Compare`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Compare`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_compare(self) -> ExprCompare {
        match self {
            Self::Compare(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Compare`], and `None` otherwise.
    #[inline]
    pub fn compare(self) -> Option<ExprCompare> {
        match self {
            Self::Compare(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Call`].
    #[inline]
    pub const fn is_call(&self) -> bool {
        matches!(self, Self::Call(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Call`], and `None` otherwise.
    #[inline]
    pub fn as_call(&self) -> Option<&ExprCall> {
        match self {
            Self::Call(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Call`], and `None` otherwise.
    #[inline]
    pub fn as_mut_call(&mut self) -> Option<&mut ExprCall> {
        match self {
            Self::Call(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Call`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Call`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_call(self) -> ExprCall {
        match self {
            Self::Call(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Call`], and `None` otherwise.
    #[inline]
    pub fn call(self) -> Option<ExprCall> {
        match self {
            Self::Call(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`FormattedValue`].
    #[inline]
    pub const fn is_formatted_value(&self) -> bool {
        matches!(self, Self::FormattedValue(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`FormattedValue`], and `None` otherwise.
    #[inline]
    pub fn as_formatted_value(&self) -> Option<&ExprFormattedValue> {
        match self {
            Self::FormattedValue(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`FormattedValue`], and `None` otherwise.
    #[inline]
    pub fn as_mut_formatted_value(&mut self) -> Option<&mut ExprFormattedValue> {
        match self {
            Self::FormattedValue(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`FormattedValue`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`FormattedValue`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_formatted_value(self) -> ExprFormattedValue {
        match self {
            Self::FormattedValue(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`FormattedValue`], and `None` otherwise.
    #[inline]
    pub fn formatted_value(self) -> Option<ExprFormattedValue> {
        match self {
            Self::FormattedValue(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`JoinedStr`].
    #[inline]
    pub const fn is_joined_str(&self) -> bool {
        matches!(self, Self::JoinedStr(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`JoinedStr`], and `None` otherwise.
    #[inline]
    pub fn as_joined_str(&self) -> Option<&ExprJoinedStr> {
        match self {
            Self::JoinedStr(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`JoinedStr`], and `None` otherwise.
    #[inline]
    pub fn as_mut_joined_str(&mut self) -> Option<&mut ExprJoinedStr> {
        match self {
            Self::JoinedStr(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`JoinedStr`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`JoinedStr`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_joined_str(self) -> ExprJoinedStr {
        match self {
            Self::JoinedStr(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`JoinedStr`], and `None` otherwise.
    #[inline]
    pub fn joined_str(self) -> Option<ExprJoinedStr> {
        match self {
            Self::JoinedStr(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Constant`].
    #[inline]
    pub const fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Constant`], and `None` otherwise.
    #[inline]
    pub fn as_constant(&self) -> Option<&ExprConstant> {
        match self {
            Self::Constant(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Constant`], and `None` otherwise.
    #[inline]
    pub fn as_mut_constant(&mut self) -> Option<&mut ExprConstant> {
        match self {
            Self::Constant(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Constant`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Constant`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_constant(self) -> ExprConstant {
        match self {
            Self::Constant(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Constant`], and `None` otherwise.
    #[inline]
    pub fn constant(self) -> Option<ExprConstant> {
        match self {
            Self::Constant(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Attribute`].
    #[inline]
    pub const fn is_attribute(&self) -> bool {
        matches!(self, Self::Attribute(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Attribute`], and `None` otherwise.
    #[inline]
    pub fn as_attribute(&self) -> Option<&ExprAttribute> {
        match self {
            Self::Attribute(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Attribute`], and `None` otherwise.
    #[inline]
    pub fn as_mut_attribute(&mut self) -> Option<&mut ExprAttribute> {
        match self {
            Self::Attribute(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Attribute`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Attribute`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_attribute(self) -> ExprAttribute {
        match self {
            Self::Attribute(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Attribute`], and `None` otherwise.
    #[inline]
    pub fn attribute(self) -> Option<ExprAttribute> {
        match self {
            Self::Attribute(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Subscript`].
    #[inline]
    pub const fn is_subscript(&self) -> bool {
        matches!(self, Self::Subscript(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Subscript`], and `None` otherwise.
    #[inline]
    pub fn as_subscript(&self) -> Option<&ExprSubscript> {
        match self {
            Self::Subscript(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Subscript`], and `None` otherwise.
    #[inline]
    pub fn as_mut_subscript(&mut self) -> Option<&mut ExprSubscript> {
        match self {
            Self::Subscript(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Subscript`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Subscript`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_subscript(self) -> ExprSubscript {
        match self {
            Self::Subscript(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Subscript`], and `None` otherwise.
    #[inline]
    pub fn subscript(self) -> Option<ExprSubscript> {
        match self {
            Self::Subscript(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Starred`].
    #[inline]
    pub const fn is_starred(&self) -> bool {
        matches!(self, Self::Starred(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Starred`], and `None` otherwise.
    #[inline]
    pub fn as_starred(&self) -> Option<&ExprStarred> {
        match self {
            Self::Starred(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Starred`], and `None` otherwise.
    #[inline]
    pub fn as_mut_starred(&mut self) -> Option<&mut ExprStarred> {
        match self {
            Self::Starred(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Starred`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Starred`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_starred(self) -> ExprStarred {
        match self {
            Self::Starred(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Starred`], and `None` otherwise.
    #[inline]
    pub fn starred(self) -> Option<ExprStarred> {
        match self {
            Self::Starred(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Name`].
    #[inline]
    pub const fn is_name(&self) -> bool {
        matches!(self, Self::Name(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Name`], and `None` otherwise.
    #[inline]
    pub fn as_name(&self) -> Option<&ExprName> {
        match self {
            Self::Name(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Name`], and `None` otherwise.
    #[inline]
    pub fn as_mut_name(&mut self) -> Option<&mut ExprName> {
        match self {
            Self::Name(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Name`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Name`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_name(self) -> ExprName {
        match self {
            Self::Name(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Name`], and `None` otherwise.
    #[inline]
    pub fn name(self) -> Option<ExprName> {
        match self {
            Self::Name(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`List`].
    #[inline]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`List`], and `None` otherwise.
    #[inline]
    pub fn as_list(&self) -> Option<&ExprList> {
        match self {
            Self::List(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`List`], and `None` otherwise.
    #[inline]
    pub fn as_mut_list(&mut self) -> Option<&mut ExprList> {
        match self {
            Self::List(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`List`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`List`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_list(self) -> ExprList {
        match self {
            Self::List(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`List`], and `None` otherwise.
    #[inline]
    pub fn list(self) -> Option<ExprList> {
        match self {
            Self::List(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Tuple`].
    #[inline]
    pub const fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Tuple`], and `None` otherwise.
    #[inline]
    pub fn as_tuple(&self) -> Option<&ExprTuple> {
        match self {
            Self::Tuple(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Tuple`], and `None` otherwise.
    #[inline]
    pub fn as_mut_tuple(&mut self) -> Option<&mut ExprTuple> {
        match self {
            Self::Tuple(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Tuple`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Tuple`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_tuple(self) -> ExprTuple {
        match self {
            Self::Tuple(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Tuple`], and `None` otherwise.
    #[inline]
    pub fn tuple(self) -> Option<ExprTuple> {
        match self {
            Self::Tuple(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `true` if `self` is of variant [`Slice`].
    #[inline]
    pub const fn is_slice(&self) -> bool {
        matches!(self, Self::Slice(..))
    }

    /// Returns `Some` if `self` is a reference of variant [`Slice`], and `None` otherwise.
    #[inline]
    pub fn as_slice(&self) -> Option<&ExprSlice> {
        match self {
            Self::Slice(v0) => Some(v0),
            _ => None,
        }
    }

    /// Returns `Some` if `self` is a mutable reference of variant [`Slice`], and `None` otherwise.
    #[inline]
    pub fn as_mut_slice(&mut self) -> Option<&mut ExprSlice> {
        match self {
            Self::Slice(v0) => Some(v0),
            _ => None,
        }
    }

    /// Unwraps the value, yielding the content of [`Slice`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not [`Slice`], with a panic message including the content of `self`.
    #[inline]
    pub fn expect_slice(self) -> ExprSlice {
        match self {
            Self::Slice(v0) => v0,
            _ => panic!("called expect on {:?}", "wrong variant"),
        }
    }

    /// Returns `Some` if `self` is of variant [`Slice`], and `None` otherwise.
    #[inline]
    pub fn slice(self) -> Option<ExprSlice> {
        match self {
            Self::Slice(v0) => Some(v0),
            _ => None,
        }
    }
}

// --- Operators & contexts ----------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, is_macro::Is)]
pub enum ExprContext {
    Load,
    Store,
    Del,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, is_macro::Is)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, is_macro::Is)]
pub enum Operator {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
    FloorDiv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, is_macro::Is)]
pub enum UnaryOp {
    Invert,
    Not,
    UAdd,
    USub,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, is_macro::Is)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CmpOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::NotEq => "!=",
            CmpOp::Lt => "<",
            CmpOp::LtE => "<=",
            CmpOp::Gt => ">",
            CmpOp::GtE => ">=",
            CmpOp::Is => "is",
            CmpOp::IsNot => "is not",
            CmpOp::In => "in",
            CmpOp::NotIn => "not in",
        }
    }
}

// --- Auxiliary nodes ---------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Comprehension {
    pub range: SourceRange,
    pub target: Expr,
    pub iter: Expr,
    pub ifs: Vec<Expr>,
    pub is_async: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExceptHandler {
    pub range: SourceRange,
    pub type_: Option<Box<Expr>>,
    pub name: Option<Identifier>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Arguments {
    pub range: SourceRange,
    pub posonlyargs: Vec<Arg>,
    pub args: Vec<Arg>,
    pub vararg: Option<Box<Arg>>,
    pub kwonlyargs: Vec<Arg>,
    /// Aligned with `kwonlyargs`; `None` marks a keyword-only parameter
    /// without a default.
    pub kw_defaults: Vec<Option<Expr>>,
    pub kwarg: Option<Box<Arg>>,
    pub defaults: Vec<Expr>,
}

impl Arguments {
    pub fn empty(range: SourceRange) -> Self {
        Self {
            range,
            posonlyargs: Vec::new(),
            args: Vec::new(),
            vararg: None,
            kwonlyargs: Vec::new(),
            kw_defaults: Vec::new(),
            kwarg: None,
            defaults: Vec::new(),
        }
    }

    /// Total number of parameter slots, counting `*args`/`**kwargs`.
    pub fn len(&self) -> usize {
        self.posonlyargs.len()
            + self.args.len()
            + usize::from(self.vararg.is_some())
            + self.kwonlyargs.len()
            + usize::from(self.kwarg.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Arg {
    pub range: SourceRange,
    pub arg: Identifier,
    pub annotation: Option<Box<Expr>>,
    pub type_comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Keyword {
    pub range: SourceRange,
    /// `None` marks a `**` double-starred argument.
    pub arg: Option<Identifier>,
    pub value: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alias {
    pub range: SourceRange,
    pub name: Identifier,
    pub asname: Option<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WithItem {
    pub range: SourceRange,
    pub context_expr: Expr,
    pub optional_vars: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchCase {
    pub range: SourceRange,
    pub pattern: Pattern,
    pub guard: Option<Box<Expr>>,
    pub body: Vec<Stmt>,
}

// --- Patterns ----------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchValue {
    pub range: SourceRange,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchSingleton {
    pub range: SourceRange,
    pub value: Constant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchSequence {
    pub range: SourceRange,
    pub patterns: Vec<Pattern>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchMapping {
    pub range: SourceRange,
    pub keys: Vec<Expr>,
    pub patterns: Vec<Pattern>,
    pub rest: Option<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchClass {
    pub range: SourceRange,
    pub cls: Box<Expr>,
    pub patterns: Vec<Pattern>,
    pub kwd_attrs: Vec<Identifier>,
    pub kwd_patterns: Vec<Pattern>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchStar {
    pub range: SourceRange,
    pub name: Option<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchAs {
    pub range: SourceRange,
    pub pattern: Option<Box<Pattern>>,
    pub name: Option<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchOr {
    pub range: SourceRange,
    pub patterns: Vec<Pattern>,
}

#[derive(Clone, Debug, PartialEq, is_macro::Is)]
pub enum Pattern {
    MatchValue(PatternMatchValue),
    MatchSingleton(PatternMatchSingleton),
    MatchSequence(PatternMatchSequence),
    MatchMapping(PatternMatchMapping),
    MatchClass(PatternMatchClass),
    MatchStar(PatternMatchStar),
    MatchAs(PatternMatchAs),
    MatchOr(PatternMatchOr),
}

node_from!(PatternMatchValue, Pattern::MatchValue);
node_from!(PatternMatchSingleton, Pattern::MatchSingleton);
node_from!(PatternMatchSequence, Pattern::MatchSequence);
node_from!(PatternMatchMapping, Pattern::MatchMapping);
node_from!(PatternMatchClass, Pattern::MatchClass);
node_from!(PatternMatchStar, Pattern::MatchStar);
node_from!(PatternMatchAs, Pattern::MatchAs);
node_from!(PatternMatchOr, Pattern::MatchOr);

// --- Type parameters ----------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct TypeParamTypeVar {
    pub range: SourceRange,
    pub name: Identifier,
    pub bound: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeParamParamSpec {
    pub range: SourceRange,
    pub name: Identifier,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeParamTypeVarTuple {
    pub range: SourceRange,
    pub name: Identifier,
}

#[derive(Clone, Debug, PartialEq, is_macro::Is)]
pub enum TypeParam {
    TypeVar(TypeParamTypeVar),
    ParamSpec(TypeParamParamSpec),
    TypeVarTuple(TypeParamTypeVarTuple),
}

node_from!(TypeParamTypeVar, TypeParam::TypeVar);
node_from!(TypeParamParamSpec, TypeParam::ParamSpec);
node_from!(TypeParamTypeVarTuple, TypeParam::TypeVarTuple);

/// A `# type: ignore` comment preserved for downstream type checkers.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeIgnore {
    pub lineno: u32,
    pub tag: String,
}

static_assertions::assert_impl_all!(Mod: Clone, std::fmt::Debug, Send, Sync);
static_assertions::assert_impl_all!(Stmt: Clone, std::fmt::Debug, Send, Sync);
static_assertions::assert_impl_all!(Expr: Clone, std::fmt::Debug, Send, Sync);
static_assertions::assert_impl_all!(Pattern: Clone, std::fmt::Debug, Send, Sync);
