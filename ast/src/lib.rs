//! Python AST node definitions and utilities.
//!
//! Nodes mirror the shapes of the
//! [Python AST](https://docs.python.org/3/library/ast.html): one struct per
//! node kind, grouped into the `Mod`, `Stmt`, `Expr`, `Pattern` and
//! `TypeParam` sum types. Every node carries a [`SourceRange`] with 1-based
//! rows and 0-based byte columns, which is what the location fields of the
//! Python AST report.

mod builtin;
mod generic;
mod impls;
mod located;

pub use builtin::*;
pub use generic::*;
pub use located::Located;
pub use taipan_parser_core::{ConversionFlag, Location, SourceRange};

pub type Suite = Vec<Stmt>;
