//! Taipan's parser: a memoizing PEG engine over a Python-family token
//! stream, producing [`taipan_ast`] nodes with precise source locations.
//!
//! The entry points mirror the host's `compile()` start rules:
//!
//! ```
//! use taipan_parser::{parse_program, parse_expression};
//!
//! let suite = parse_program("x = 1 + 2\n", "<embedded>").unwrap();
//! assert_eq!(suite.len(), 1);
//!
//! let expr = parse_expression("x + y", "<embedded>").unwrap();
//! assert!(expr.is_bin_op());
//! ```
//!
//! Parsing runs in two passes on failure: the first pass is the fast
//! grammar, the second enables the diagnostic (`invalid_*`) rule
//! alternatives to pin down a precise message and location.

mod context;
mod error;
mod helpers;
mod lexer;
mod number;
mod parser;
mod string;
mod token;

pub use error::{
    LexicalError, LexicalErrorType, ParseError, ParseErrorType, SyntaxErrorMetadata,
    TokenizerDone,
};
pub use lexer::{InteractiveUnderflow, Lexer};
pub use taipan_parser_core::{Location, Mode, ParserFlags, SourceRange};
pub use token::{Token, TokenKind};

use taipan_ast::{Expr, Mod, Suite};

/// The feature version assumed when the caller does not pin one.
pub const DEFAULT_FEATURE_VERSION: u32 = 12;

/// Configuration for a parse run.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    pub mode: Mode,
    pub flags: ParserFlags,
    /// Minor version of the language to accept syntax for; gates, e.g.,
    /// underscores in numeric literals (>= 6) and self-documenting
    /// f-string expressions (>= 8).
    pub feature_version: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Module,
            flags: ParserFlags::empty(),
            feature_version: DEFAULT_FEATURE_VERSION,
        }
    }
}

impl ParseOptions {
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

/// Parse a full module body.
pub fn parse_program(source: &str, source_path: &str) -> Result<Suite, ParseError> {
    match parse(source, Mode::Module, source_path)? {
        Mod::Module(module) => Ok(module.body),
        _ => unreachable!("module mode produces a Module"),
    }
}

/// Parse a single expression, as for `eval()`.
pub fn parse_expression(source: &str, source_path: &str) -> Result<Expr, ParseError> {
    match parse(source, Mode::Expression, source_path)? {
        Mod::Expression(expression) => Ok(*expression.body),
        _ => unreachable!("expression mode produces an Expression"),
    }
}

/// Parse source with the given start rule.
pub fn parse(source: &str, mode: Mode, source_path: &str) -> Result<Mod, ParseError> {
    parse_with_options(source, source_path, &ParseOptions::with_mode(mode))
}

/// Parse an embedded snippet, projecting every reported location as if the
/// snippet started at `location` in the enclosing source. This is how
/// f-string sub-expressions keep outer coordinates.
pub fn parse_starts_at(
    source: &str,
    mode: Mode,
    source_path: &str,
    location: Location,
) -> Result<Mod, ParseError> {
    let options = ParseOptions::with_mode(mode);
    let mut parser = parser::Parser::new(
        source,
        options.mode,
        options.flags,
        options.feature_version,
        source_path,
    );
    parser.starts_at(location);
    parser.run()
}

/// Parse with full control over flags and feature version.
pub fn parse_with_options(
    source: &str,
    source_path: &str,
    options: &ParseOptions,
) -> Result<Mod, ParseError> {
    let mut parser = parser::Parser::new(
        source,
        options.mode,
        options.flags,
        options.feature_version,
        source_path,
    );
    parser.run()
}

/// Convenience wrapper the test suites use: parse a module body and
/// return its statements.
pub fn parse_suite(source: &str) -> Result<Suite, ParseError> {
    parse_program(source, "<test>")
}
