//! Error types surfaced by the tokenizer and the parser.

use taipan_parser_core::{BaseError, Location, SourceRange};

/// Why the tokenizer stopped producing tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TokenizerDone {
    #[default]
    Ok,
    /// End of input reached.
    Eof,
    /// End of input inside a triple-quoted string.
    EofInTripleQuote,
    /// End of line inside a single-quoted string.
    EolInString,
    /// A dedent did not match any outer indentation level.
    DedentMismatch,
    /// A token could not be formed.
    InvalidToken,
    /// Tabs and spaces were mixed inconsistently in indentation.
    TabSpace,
    /// Too many levels of indentation.
    TooDeep,
    /// Unexpected characters after a line continuation.
    LineContinuation,
    /// Extra text after a single interactive statement.
    BadSingle,
}

impl TokenizerDone {
    /// Whether the tokenizer consumed the input to its end; incomplete
    /// constructs at end-of-source qualify.
    pub const fn is_end_of_source(self) -> bool {
        matches!(
            self,
            TokenizerDone::Eof | TokenizerDone::EofInTripleQuote | TokenizerDone::EolInString
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexicalErrorType {
    /// A character that cannot start any token.
    UnrecognizedToken { tok: char },
    UnterminatedString { triple_quoted: bool },
    /// End of input in the middle of a bracketed construct.
    Eof,
    DedentMismatch,
    TabError,
    TooDeepIndent,
    LineContinuationError,
    OtherError(String),
}

impl LexicalErrorType {
    pub const fn done(&self) -> TokenizerDone {
        match self {
            LexicalErrorType::UnrecognizedToken { .. } | LexicalErrorType::OtherError(_) => {
                TokenizerDone::InvalidToken
            }
            LexicalErrorType::UnterminatedString { triple_quoted: true } => {
                TokenizerDone::EofInTripleQuote
            }
            LexicalErrorType::UnterminatedString { triple_quoted: false } => {
                TokenizerDone::EolInString
            }
            LexicalErrorType::Eof => TokenizerDone::Eof,
            LexicalErrorType::DedentMismatch => TokenizerDone::DedentMismatch,
            LexicalErrorType::TabError => TokenizerDone::TabSpace,
            LexicalErrorType::TooDeepIndent => TokenizerDone::TooDeep,
            LexicalErrorType::LineContinuationError => TokenizerDone::LineContinuation,
        }
    }
}

impl std::fmt::Display for LexicalErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LexicalErrorType::UnrecognizedToken { tok } => {
                if unic_emoji_char::is_emoji_presentation(*tok) {
                    write!(f, "invalid character {tok:?} (emoji)")
                } else {
                    write!(f, "invalid character {:?} (U+{:04X})", tok, *tok as u32)
                }
            }
            LexicalErrorType::UnterminatedString { triple_quoted: true } => {
                write!(f, "unterminated triple-quoted string literal")
            }
            LexicalErrorType::UnterminatedString {
                triple_quoted: false,
            } => write!(f, "unterminated string literal"),
            LexicalErrorType::Eof => write!(f, "unexpected EOF while parsing"),
            LexicalErrorType::DedentMismatch => {
                write!(f, "unindent does not match any outer indentation level")
            }
            LexicalErrorType::TabError => {
                write!(f, "inconsistent use of tabs and spaces in indentation")
            }
            LexicalErrorType::TooDeepIndent => write!(f, "too many levels of indentation"),
            LexicalErrorType::LineContinuationError => {
                write!(f, "unexpected character after line continuation character")
            }
            LexicalErrorType::OtherError(msg) => write!(f, "{msg}"),
        }
    }
}

pub type LexicalError = BaseError<LexicalErrorType>;

/// The error kind surfaced to the host, mirroring the exception types
/// CPython raises for the same failures.
#[derive(Clone, Debug, PartialEq, Eq, is_macro::Is)]
pub enum ParseErrorType {
    /// SyntaxError
    Syntax(String),
    /// IndentationError
    Indentation(String),
    /// TabError
    Tab(String),
    /// ValueError (e.g. a reserved literal used as an identifier field)
    Value(String),
    /// The recursion cap was exceeded; CPython surfaces this as a
    /// MemoryError.
    Recursion,
    /// End of input mid-construct with ALLOW_INCOMPLETE_INPUT set.
    IncompleteInput,
}

impl std::fmt::Display for ParseErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ParseErrorType::Syntax(msg)
            | ParseErrorType::Indentation(msg)
            | ParseErrorType::Tab(msg)
            | ParseErrorType::Value(msg) => write!(f, "{msg}"),
            ParseErrorType::Recursion => {
                write!(f, "parser stack overflowed - source too complex to parse")
            }
            ParseErrorType::IncompleteInput => write!(f, "incomplete input"),
        }
    }
}

/// Extra metadata attached to syntax errors only: the location of the last
/// completely parsed statement and the decoded source, for hosts that
/// re-render diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxErrorMetadata {
    pub last_statement: Location,
    pub source: String,
}

#[derive(Debug, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub range: SourceRange,
    pub source_path: String,
    /// The decoded text of the offending source line.
    pub line: Option<String>,
    pub metadata: Option<SyntaxErrorMetadata>,
}

impl ParseError {
    pub(crate) fn new(error: ParseErrorType, range: SourceRange, source_path: String) -> Self {
        Self {
            error,
            range,
            source_path,
            line: None,
            metadata: None,
        }
    }

    /// Start and end columns as character offsets into the offending line,
    /// the way the host reports them to users.
    pub fn char_columns(&self) -> (usize, Option<usize>) {
        let Some(line) = &self.line else {
            return (self.range.start.column(), Some(self.range.end.column()));
        };
        let start = byte_offset_to_char_offset(line, self.range.start.column());
        let end = if self.range.end.row() == self.range.start.row() {
            Some(byte_offset_to_char_offset(line, self.range.end.column()))
        } else {
            None
        };
        (start, end)
    }
}

impl std::ops::Deref for ParseError {
    type Target = ParseErrorType;

    fn deref(&self) -> &Self::Target {
        &self.error
    }
}

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.range.start.fmt_with(f, &self.error)
    }
}

impl From<LexicalError> for ParseError {
    fn from(err: LexicalError) -> Self {
        let error = match &err.error {
            LexicalErrorType::DedentMismatch | LexicalErrorType::TooDeepIndent => {
                ParseErrorType::Indentation(err.error.to_string())
            }
            LexicalErrorType::TabError => ParseErrorType::Tab(err.error.to_string()),
            _ => ParseErrorType::Syntax(err.error.to_string()),
        };
        ParseError::new(error, err.range, err.source_path)
    }
}

/// Converts a byte offset into `line` to a character offset by stepping
/// through the line's UTF-8 code units.
pub(crate) fn byte_offset_to_char_offset(line: &str, byte_offset: usize) -> usize {
    let clamped = byte_offset.min(line.len());
    line.char_indices().take_while(|(i, _)| *i < clamped).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_offset_to_char_offset() {
        assert_eq!(byte_offset_to_char_offset("abc", 0), 0);
        assert_eq!(byte_offset_to_char_offset("abc", 2), 2);
        // 'ä' occupies two bytes.
        assert_eq!(byte_offset_to_char_offset("äbc", 2), 1);
        assert_eq!(byte_offset_to_char_offset("äbc", 3), 2);
        // Offsets past the end clamp to the line length in characters.
        assert_eq!(byte_offset_to_char_offset("äbc", 40), 3);
    }
}
