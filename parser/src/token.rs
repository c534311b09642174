//! Token kinds and the token record buffered by the parser.

use taipan_parser_core::SourceRange;

/// The closed set of token kinds the tokenizer can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, is_macro::Is)]
pub enum TokenKind {
    /// An identifier that is not a reserved keyword.
    Name,
    /// A numeric literal, raw (underscores and radix prefix included).
    Number,
    /// A complete string literal, prefixes and quotes included.
    String,
    /// The `f"`-ish head of an f-string, prefixes and quotes included.
    FStringStart,
    /// A literal run between replacement fields inside an f-string.
    FStringMiddle,
    /// The closing quote of an f-string.
    FStringEnd,
    /// A logical (statement-terminating) newline.
    Newline,
    Indent,
    Dedent,
    EndMarker,
    /// A `# type: ignore` comment (TYPE_COMMENTS mode only).
    TypeIgnore,
    /// Any other `# type:` comment (TYPE_COMMENTS mode only).
    TypeComment,

    // Operators.
    Lpar,
    Rpar,
    Lsqb,
    Rsqb,
    Lbrace,
    Rbrace,
    Colon,
    ColonEqual,
    Comma,
    Semi,
    Plus,
    Minus,
    Star,
    Slash,
    Vbar,
    Amper,
    Less,
    Greater,
    Equal,
    Dot,
    Percent,
    EqEqual,
    /// `!=`, or `<>` when the Barry-as-BDFL flag is active.
    NotEqual,
    LessEqual,
    GreaterEqual,
    Tilde,
    CircumFlex,
    LeftShift,
    RightShift,
    DoubleStar,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    AmperEqual,
    VbarEqual,
    CircumflexEqual,
    LeftShiftEqual,
    RightShiftEqual,
    DoubleStarEqual,
    DoubleSlash,
    DoubleSlashEqual,
    At,
    AtEqual,
    Rarrow,
    Ellipsis,
    /// `!`, only emitted inside f-string replacement fields.
    Exclamation,

    // Reserved keywords; NAME tokens are promoted to these by the buffer.
    False,
    None,
    True,
    And,
    As,
    Assert,
    Async,
    Await,
    Break,
    Class,
    Continue,
    Def,
    Del,
    Elif,
    Else,
    Except,
    Finally,
    For,
    From,
    Global,
    If,
    Import,
    In,
    Is,
    Lambda,
    Nonlocal,
    Not,
    Or,
    Pass,
    Raise,
    Return,
    Try,
    While,
    With,
    Yield,
}

impl TokenKind {
    /// NEWLINE / INDENT / DEDENT / ENDMARKER, which the
    /// last-non-whitespace scan skips over.
    pub const fn is_whitespace(self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent | TokenKind::EndMarker
        )
    }

    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::False
                | TokenKind::None
                | TokenKind::True
                | TokenKind::And
                | TokenKind::As
                | TokenKind::Assert
                | TokenKind::Async
                | TokenKind::Await
                | TokenKind::Break
                | TokenKind::Class
                | TokenKind::Continue
                | TokenKind::Def
                | TokenKind::Del
                | TokenKind::Elif
                | TokenKind::Else
                | TokenKind::Except
                | TokenKind::Finally
                | TokenKind::For
                | TokenKind::From
                | TokenKind::Global
                | TokenKind::If
                | TokenKind::Import
                | TokenKind::In
                | TokenKind::Is
                | TokenKind::Lambda
                | TokenKind::Nonlocal
                | TokenKind::Not
                | TokenKind::Or
                | TokenKind::Pass
                | TokenKind::Raise
                | TokenKind::Return
                | TokenKind::Try
                | TokenKind::While
                | TokenKind::With
                | TokenKind::Yield
        )
    }
}

/// A token as buffered by the parser: an immutable copy of the source slice
/// plus its projected location and the bracket-nesting depth at emission.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: Box<str>,
    pub range: SourceRange,
    pub level: u32,
    /// Opaque per-token side data; the tokenizer stores the source text of
    /// a self-documenting f-string expression (`{x=}`) on the token that
    /// terminates the expression part.
    pub metadata: Option<Box<str>>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<Box<str>>, range: SourceRange) -> Self {
        Self {
            kind,
            text: text.into(),
            range,
            level: 0,
            metadata: None,
        }
    }
}
