//! The tokenizer.
//!
//! Produces the token stream the parser buffers: logical newlines,
//! INDENT/DEDENT pairs from the indentation stack, bracket-aware implicit
//! line joining, f-string segmentation (FSTRING_START / FSTRING_MIDDLE /
//! FSTRING_END with replacement fields re-entering normal tokenization), and
//! `# type:` comment classification.
//!
//! Identifiers are *not* classified into keywords here; the parser's token
//! buffer promotes NAME tokens against its keyword table.

use std::collections::VecDeque;

use taipan_parser_core::{Location, SourceRange};

use crate::error::{LexicalError, LexicalErrorType, TokenizerDone};
use crate::token::{Token, TokenKind};

/// Maximum depth of the indentation stack.
const MAX_INDENT: usize = 100;
/// Tab stops every 8 columns, with a 1-column alternate used to detect
/// inconsistent tab/space mixes.
const TAB_SIZE: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Indentation {
    col: usize,
    altcol: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FieldPart {
    Expression,
    FormatSpec,
}

#[derive(Debug)]
struct FieldState {
    part: FieldPart,
    /// `paren_stack` depth just before the field's `{` was pushed; the
    /// field is at top level when the stack is one deeper than this.
    paren_base: usize,
    /// Byte offset of the first character of the expression.
    expr_start: usize,
    /// Set when a top-level `=` marks a self-documenting expression.
    debug: bool,
    /// The captured `expr =` source text, filled at the first terminator.
    debug_text: Option<Box<str>>,
}

#[derive(Debug)]
struct FStringContext {
    quote: char,
    triple: bool,
    fields: Vec<FieldState>,
}

/// Whether the tokenizer may request more input when the source ends
/// mid-construct; the diagnostic pass turns this off.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InteractiveUnderflow {
    #[default]
    Normal,
    Stop,
}

pub struct Lexer<'a> {
    source: &'a str,
    source_path: String,
    offset: usize,
    loc: Location,
    type_comments: bool,
    indents: Vec<Indentation>,
    pending: VecDeque<Token>,
    paren_stack: Vec<(char, Location)>,
    fstrings: Vec<FStringContext>,
    at_line_start: bool,
    done: TokenizerDone,
    interactive_underflow: InteractiveUnderflow,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, source_path: impl Into<String>) -> Self {
        Self {
            source,
            source_path: source_path.into(),
            offset: 0,
            loc: Location::default(),
            type_comments: false,
            indents: vec![Indentation { col: 0, altcol: 0 }],
            pending: VecDeque::new(),
            paren_stack: Vec::new(),
            fstrings: Vec::new(),
            at_line_start: true,
            done: TokenizerDone::Ok,
            interactive_underflow: InteractiveUnderflow::Normal,
        }
    }

    pub fn set_type_comments(&mut self, enabled: bool) {
        self.type_comments = enabled;
    }

    pub fn set_interactive_underflow(&mut self, mode: InteractiveUnderflow) {
        self.interactive_underflow = mode;
    }

    pub fn interactive_underflow(&self) -> InteractiveUnderflow {
        self.interactive_underflow
    }

    /// Why tokenization stopped, once it has.
    pub fn done(&self) -> TokenizerDone {
        self.done
    }

    pub(crate) fn set_done(&mut self, done: TokenizerDone) {
        self.done = done;
    }

    /// Bracket nesting depth.
    pub fn level(&self) -> usize {
        self.paren_stack.len()
    }

    /// The innermost open bracket and where it was opened.
    pub fn open_brackets(&self) -> &[(char, Location)] {
        &self.paren_stack
    }

    /// The source text that has not been tokenized yet.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.offset.min(self.source.len())..]
    }

    /// The tokenizer's current position, used to resolve errors raised "at
    /// the current location".
    pub fn current_location(&self) -> Location {
        self.loc
    }

    /// Queue DEDENT tokens for every open indentation level. Interactive
    /// mode uses this when rewriting the final ENDMARKER to a NEWLINE.
    pub fn imply_dedents(&mut self) {
        while self.indents.len() > 1 {
            self.indents.pop();
            self.pending
                .push_back(self.token_at(TokenKind::Dedent, "", self.loc));
        }
    }

    // --- low-level cursor ------------------------------------------------

    fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    fn peek2(&self) -> Option<char> {
        let mut it = self.source[self.offset..].chars();
        it.next();
        it.next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.source[self.offset..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.loc.newline();
        } else {
            self.loc = self.loc.with_col_offset(c.len_utf8());
        }
        Some(c)
    }

    /// Consumes a physical newline, folding `\r\n` and bare `\r` into one.
    fn bump_newline(&mut self) {
        if self.peek() == Some('\r') {
            self.offset += 1;
            if self.peek() == Some('\n') {
                self.offset += 1;
            }
            self.loc.newline();
        } else {
            self.bump();
        }
    }

    fn at_newline(&self) -> bool {
        matches!(self.peek(), Some('\n' | '\r'))
    }

    fn token_at(&self, kind: TokenKind, text: &str, start: Location) -> Token {
        let mut token = Token::new(kind, text, SourceRange::new(start, self.loc));
        token.level = self.paren_stack.len() as u32;
        token
    }

    fn error(&mut self, error: LexicalErrorType, start: Location) -> LexicalError {
        self.done = error.done();
        LexicalError {
            error,
            range: SourceRange::new(start, self.loc),
            source_path: self.source_path.clone(),
        }
    }

    // --- main entry ------------------------------------------------------

    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        if let Some(token) = self.pending.pop_front() {
            return Ok(token);
        }

        // Inside an f-string we are either scanning literal middle text, a
        // format spec, or tokenizing a replacement-field expression. The
        // expression case goes through normal tokenization; the field's `{`
        // sits on the bracket stack, so line joining works unchanged.
        if !self.fstrings.is_empty() {
            match self.fstring_mode() {
                Some(FieldPart::Expression) => return self.lex_normal(),
                Some(FieldPart::FormatSpec) => return self.lex_format_spec(),
                None => return self.lex_fstring_middle(),
            }
        }

        if self.at_line_start && self.paren_stack.is_empty() {
            if let Some(token) = self.lex_line_start()? {
                return Ok(token);
            }
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
        }

        self.lex_normal()
    }

    /// The scanning mode implied by the innermost f-string, if any.
    fn fstring_mode(&self) -> Option<FieldPart> {
        let ctx = self.fstrings.last()?;
        match ctx.fields.last() {
            Some(field) if field.part == FieldPart::Expression => Some(FieldPart::Expression),
            Some(_) => Some(FieldPart::FormatSpec),
            None => None,
        }
    }

    // --- line starts and indentation ------------------------------------

    /// Handles indentation at the start of a logical line. Returns a token
    /// only for type comments found on otherwise blank lines; INDENT/DEDENT
    /// go through the pending queue.
    fn lex_line_start(&mut self) -> Result<Option<Token>, LexicalError> {
        loop {
            let mut col = 0usize;
            let mut altcol = 0usize;
            loop {
                match self.peek() {
                    Some(' ') => {
                        col += 1;
                        altcol += 1;
                        self.bump();
                    }
                    Some('\t') => {
                        col = (col / TAB_SIZE + 1) * TAB_SIZE;
                        altcol += 1;
                        self.bump();
                    }
                    Some('\x0c') => {
                        col = 0;
                        altcol = 0;
                        self.bump();
                    }
                    _ => break,
                }
            }

            match self.peek() {
                // Blank line: indentation is not significant.
                Some('\n' | '\r') => {
                    self.bump_newline();
                    continue;
                }
                Some('#') => {
                    let token = self.lex_comment()?;
                    let newline_start = self.loc;
                    if self.peek().is_some() {
                        self.bump_newline();
                    }
                    if let Some(token) = token {
                        // A function type comment on its own line counts as
                        // line content, so its newline is a real NEWLINE;
                        // `# type: ignore` lines stay blank-like.
                        if token.kind == TokenKind::TypeComment {
                            self.pending.push_back(self.token_at(
                                TokenKind::Newline,
                                "\n",
                                newline_start,
                            ));
                        }
                        return Ok(Some(token));
                    }
                    continue;
                }
                Some('\\') if self.peek2() == Some('\n') || self.peek2() == Some('\r') => {
                    // A line continuation on an otherwise empty line.
                    self.bump();
                    self.bump_newline();
                    continue;
                }
                None => return Ok(None),
                _ => {}
            }

            self.at_line_start = false;
            self.update_indentation(col, altcol)?;
            return Ok(None);
        }
    }

    fn update_indentation(&mut self, col: usize, altcol: usize) -> Result<(), LexicalError> {
        let top = *self.indents.last().expect("indent stack is never empty");
        if col == top.col {
            if altcol != top.altcol {
                return Err(self.error(LexicalErrorType::TabError, self.loc));
            }
        } else if col > top.col {
            if altcol <= top.altcol {
                return Err(self.error(LexicalErrorType::TabError, self.loc));
            }
            if self.indents.len() + 1 > MAX_INDENT {
                return Err(self.error(LexicalErrorType::TooDeepIndent, self.loc));
            }
            self.indents.push(Indentation { col, altcol });
            self.pending
                .push_back(self.token_at(TokenKind::Indent, "", self.loc));
        } else {
            while self.indents.len() > 1 && col < self.indents.last().unwrap().col {
                self.indents.pop();
                self.pending
                    .push_back(self.token_at(TokenKind::Dedent, "", self.loc));
            }
            let top = *self.indents.last().unwrap();
            if col != top.col {
                return Err(self.error(LexicalErrorType::DedentMismatch, self.loc));
            }
            if altcol != top.altcol {
                return Err(self.error(LexicalErrorType::TabError, self.loc));
            }
        }
        Ok(())
    }

    /// Consumes a comment up to (not including) the line's newline. With
    /// TYPE_COMMENTS enabled, `# type:` comments become tokens.
    fn lex_comment(&mut self) -> Result<Option<Token>, LexicalError> {
        let start = self.loc;
        let text_start = self.offset;
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.bump();
        }
        if !self.type_comments {
            return Ok(None);
        }

        let comment = &self.source[text_start..self.offset];
        let body = comment.trim_start_matches('#').trim_start();
        let Some(tail) = body.strip_prefix("type:") else {
            return Ok(None);
        };
        let tail = tail.trim_start();
        if let Some(rest) = tail.strip_prefix("ignore") {
            if rest.chars().next().map_or(true, |c| !c.is_alphanumeric()) {
                return Ok(Some(self.token_at(
                    TokenKind::TypeIgnore,
                    rest.trim_end(),
                    start,
                )));
            }
        }
        Ok(Some(self.token_at(
            TokenKind::TypeComment,
            tail.trim_end(),
            start,
        )))
    }

    // --- normal tokenization --------------------------------------------

    fn lex_normal(&mut self) -> Result<Token, LexicalError> {
        loop {
            let Some(c) = self.peek() else {
                return self.lex_eof();
            };
            match c {
                ' ' | '\t' | '\x0c' => {
                    self.bump();
                }
                '#' => {
                    if let Some(token) = self.lex_comment()? {
                        return Ok(token);
                    }
                }
                '\\' => {
                    let start = self.loc;
                    self.bump();
                    if self.at_newline() {
                        self.bump_newline();
                    } else if self.peek().is_none() {
                        return Err(self.error(LexicalErrorType::Eof, start));
                    } else {
                        return Err(self.error(LexicalErrorType::LineContinuationError, start));
                    }
                }
                '\n' | '\r' => {
                    let start = self.loc;
                    if self.paren_stack.is_empty() {
                        self.bump_newline();
                        self.at_line_start = true;
                        return Ok(self.token_at(TokenKind::Newline, "\n", start));
                    }
                    // Implicit line joining inside brackets.
                    self.bump_newline();
                }
                c if is_identifier_start(c) => return self.lex_identifier_or_string(),
                '0'..='9' => return self.lex_number(),
                '.' if matches!(self.peek2(), Some('0'..='9')) => return self.lex_number(),
                '\'' | '"' => return self.lex_string(self.offset, self.loc, StringPrefix::default()),
                _ => return self.lex_operator(),
            }
        }
    }

    fn lex_eof(&mut self) -> Result<Token, LexicalError> {
        if let Some(ctx) = self.fstrings.last() {
            let triple = ctx.triple;
            return Err(self.error(LexicalErrorType::UnterminatedString { triple_quoted: triple }, self.loc));
        }
        if !self.paren_stack.is_empty() {
            self.done = TokenizerDone::Eof;
            return Err(self.error(LexicalErrorType::Eof, self.loc));
        }
        if !self.at_line_start {
            self.at_line_start = true;
            return Ok(self.token_at(TokenKind::Newline, "", self.loc));
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.pending
                .push_back(self.token_at(TokenKind::Dedent, "", self.loc));
        }
        self.done = TokenizerDone::Eof;
        if let Some(token) = self.pending.pop_front() {
            return Ok(token);
        }
        Ok(self.token_at(TokenKind::EndMarker, "", self.loc))
    }

    // --- identifiers, keywords-to-be, string prefixes --------------------

    fn lex_identifier_or_string(&mut self) -> Result<Token, LexicalError> {
        let start = self.loc;
        let start_offset = self.offset;
        while let Some(c) = self.peek() {
            if is_identifier_continue(c) {
                self.bump();
            } else {
                break;
            }
        }
        let word = &self.source[start_offset..self.offset];

        if matches!(self.peek(), Some('\'' | '"')) {
            if let Some(prefix) = StringPrefix::parse(word) {
                return self.lex_string(start_offset, start, prefix);
            }
        }

        Ok(self.token_at(TokenKind::Name, word, start))
    }

    // --- numbers ---------------------------------------------------------

    fn lex_number(&mut self) -> Result<Token, LexicalError> {
        let start = self.loc;
        let start_offset = self.offset;

        let mut invalid: Option<&'static str> = None;
        let mut is_float = false;
        if self.peek() == Some('0') && matches!(self.peek2(), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B')) {
            let radix_char = self.peek2().unwrap();
            self.bump();
            self.bump();
            let is_digit: fn(char) -> bool = match radix_char {
                'x' | 'X' => |c| c.is_ascii_hexdigit(),
                'o' | 'O' => |c| ('0'..='8').contains(&c),
                _ => |c| c == '0' || c == '1',
            };
            // Underscores may directly follow the radix prefix (`0x_ff`).
            if !self.scan_digits(is_digit, true) {
                invalid = Some(match radix_char {
                    'x' | 'X' => "invalid hexadecimal literal",
                    'o' | 'O' => "invalid octal literal",
                    _ => "invalid binary literal",
                });
            }
        } else {
            if matches!(self.peek(), Some('0'..='9')) && !self.scan_digits(|c| c.is_ascii_digit(), false) {
                invalid = Some("invalid decimal literal");
            }
            if self.peek() == Some('.') && invalid.is_none() {
                is_float = true;
                self.bump();
                if matches!(self.peek(), Some('0'..='9'))
                    && !self.scan_digits(|c| c.is_ascii_digit(), false)
                {
                    invalid = Some("invalid decimal literal");
                }
            }
            if matches!(self.peek(), Some('e' | 'E'))
                && (matches!(self.peek2(), Some('0'..='9'))
                    || matches!(self.peek2(), Some('+' | '-'))
                        && matches!(self.peek_at(2), Some('0'..='9')))
                && invalid.is_none()
            {
                is_float = true;
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                if !self.scan_digits(|c| c.is_ascii_digit(), false) {
                    invalid = Some("invalid decimal literal");
                }
            }
        }
        let mut is_imaginary = false;
        if matches!(self.peek(), Some('j' | 'J')) {
            is_imaginary = true;
            self.bump();
        }

        let text = &self.source[start_offset..self.offset];
        if invalid.is_none() && self.peek().map_or(false, is_identifier_start) {
            invalid = Some("invalid decimal literal");
        }
        if invalid.is_none()
            && !is_float
            && !is_imaginary
            && text.starts_with('0')
            && text.bytes().all(|b| b.is_ascii_digit() || b == b'_')
            && text.bytes().any(|b| (b'1'..=b'9').contains(&b))
        {
            invalid = Some(
                "leading zeros in decimal integer literals are not permitted; \
                 use an 0o prefix for octal integers",
            );
        }
        if let Some(msg) = invalid {
            return Err(self.error(LexicalErrorType::OtherError(msg.to_string()), start));
        }

        Ok(self.token_at(TokenKind::Number, text, start))
    }

    /// Scans `digit (['_'] digit)*`; returns false when no digit was
    /// consumed or an underscore is misplaced.
    fn scan_digits(&mut self, is_digit: fn(char) -> bool, allow_leading_underscore: bool) -> bool {
        let mut any = allow_leading_underscore;
        let mut last_underscore = false;
        let mut any_digit = false;
        loop {
            match self.peek() {
                Some('_') => {
                    if last_underscore || !any {
                        return false;
                    }
                    last_underscore = true;
                    self.bump();
                }
                Some(c) if is_digit(c) => {
                    any = true;
                    any_digit = true;
                    last_underscore = false;
                    self.bump();
                }
                _ => break,
            }
        }
        any_digit && !last_underscore
    }

    // --- strings ----------------------------------------------------------

    fn lex_string(
        &mut self,
        start_offset: usize,
        start: Location,
        prefix: StringPrefix,
    ) -> Result<Token, LexicalError> {
        let quote = self.peek().expect("caller checked for a quote");
        self.bump();
        let triple = self.peek() == Some(quote) && self.peek2() == Some(quote);
        if triple {
            self.bump();
            self.bump();
        } else if self.peek() == Some(quote) && !prefix.fstring {
            // An empty single-quoted literal.
            self.bump();
            let text = &self.source[start_offset..self.offset];
            return Ok(self.token_at(TokenKind::String, text, start));
        }

        if prefix.fstring {
            self.fstrings.push(FStringContext {
                quote,
                triple,
                fields: Vec::new(),
            });
            let text = &self.source[start_offset..self.offset];
            return Ok(self.token_at(TokenKind::FStringStart, text, start));
        }

        // A plain (non-f) literal: scan to the closing quote.
        loop {
            match self.peek() {
                None => {
                    return Err(self.error(
                        LexicalErrorType::UnterminatedString {
                            triple_quoted: triple,
                        },
                        start,
                    ));
                }
                Some('\n' | '\r') if !triple => {
                    return Err(self.error(
                        LexicalErrorType::UnterminatedString {
                            triple_quoted: false,
                        },
                        start,
                    ));
                }
                Some('\\') => {
                    self.bump();
                    if self.at_newline() {
                        self.bump_newline();
                    } else if self.bump().is_none() {
                        return Err(self.error(
                            LexicalErrorType::UnterminatedString {
                                triple_quoted: triple,
                            },
                            start,
                        ));
                    }
                }
                Some(c) if c == quote => {
                    self.bump();
                    if !triple {
                        break;
                    }
                    if self.peek() == Some(quote) && self.peek2() == Some(quote) {
                        self.bump();
                        self.bump();
                        break;
                    }
                }
                Some('\n' | '\r') => {
                    self.bump_newline();
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        let text = &self.source[start_offset..self.offset];
        Ok(self.token_at(TokenKind::String, text, start))
    }

    // --- f-string literal runs -------------------------------------------

    fn lex_fstring_middle(&mut self) -> Result<Token, LexicalError> {
        let (quote, triple) = {
            let ctx = self.fstrings.last().expect("caller checked");
            (ctx.quote, ctx.triple)
        };
        let start = self.loc;
        let start_offset = self.offset;

        loop {
            match self.peek() {
                None => {
                    return Err(self.error(
                        LexicalErrorType::UnterminatedString {
                            triple_quoted: triple,
                        },
                        start,
                    ));
                }
                Some('\n' | '\r') if !triple => {
                    return Err(self.error(
                        LexicalErrorType::UnterminatedString {
                            triple_quoted: false,
                        },
                        start,
                    ));
                }
                Some('\n' | '\r') => {
                    self.bump_newline();
                }
                Some('\\') if !matches!(self.peek2(), Some('{' | '}')) => {
                    self.bump();
                    if self.at_newline() {
                        self.bump_newline();
                    } else {
                        self.bump();
                    }
                }
                Some('{' | '}') => {
                    let brace = self.peek().unwrap();
                    if self.offset > start_offset {
                        // Flush the literal run; the brace is handled on the
                        // next call.
                        let text = &self.source[start_offset..self.offset];
                        return Ok(self.token_at(TokenKind::FStringMiddle, text, start));
                    }
                    if self.peek2() == Some(brace) {
                        // `{{` / `}}`: a doubled brace is its own middle
                        // token; decoding halves it.
                        self.bump();
                        self.bump();
                        let text = &self.source[start_offset..self.offset];
                        return Ok(self.token_at(TokenKind::FStringMiddle, text, start));
                    }
                    if brace == '}' {
                        let loc = self.loc;
                        self.bump();
                        return Err(self.error(
                            LexicalErrorType::OtherError(
                                "f-string: single '}' is not allowed".to_string(),
                            ),
                            loc,
                        ));
                    }
                    return self.open_replacement_field();
                }
                Some(c) if c == quote => {
                    if !triple {
                        break;
                    }
                    if self.peek2() == Some(quote) && self.peek_at(2) == Some(quote) {
                        break;
                    }
                    self.bump();
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        if self.offset > start_offset {
            let text = &self.source[start_offset..self.offset];
            return Ok(self.token_at(TokenKind::FStringMiddle, text, start));
        }

        // The closing quote.
        let end_start = self.loc;
        self.bump();
        if triple {
            self.bump();
            self.bump();
        }
        self.fstrings.pop();
        let text = &self.source[start_offset..self.offset];
        Ok(self.token_at(TokenKind::FStringEnd, text, end_start))
    }

    fn open_replacement_field(&mut self) -> Result<Token, LexicalError> {
        let start = self.loc;
        self.bump();
        let paren_base = self.paren_stack.len();
        self.paren_stack.push(('{', start));
        let ctx = self.fstrings.last_mut().expect("caller checked");
        ctx.fields.push(FieldState {
            part: FieldPart::Expression,
            paren_base,
            expr_start: self.offset,
            debug: false,
            debug_text: None,
        });
        Ok(self.token_at(TokenKind::Lbrace, "{", start))
    }

    /// Closes the innermost replacement field; the `}` token has already
    /// been positioned by the caller.
    fn close_replacement_field(&mut self) {
        self.paren_stack.pop();
        let ctx = self.fstrings.last_mut().expect("field implies context");
        ctx.fields.pop();
    }

    fn lex_format_spec(&mut self) -> Result<Token, LexicalError> {
        let (quote, triple) = {
            let ctx = self.fstrings.last().expect("caller checked");
            (ctx.quote, ctx.triple)
        };
        let start = self.loc;
        let start_offset = self.offset;

        loop {
            match self.peek() {
                None => {
                    return Err(self.error(
                        LexicalErrorType::UnterminatedString {
                            triple_quoted: triple,
                        },
                        start,
                    ));
                }
                Some('\n' | '\r') if !triple => {
                    return Err(self.error(
                        LexicalErrorType::UnterminatedString {
                            triple_quoted: false,
                        },
                        start,
                    ));
                }
                Some('\n' | '\r') => {
                    self.bump_newline();
                }
                Some('{' | '}') => {
                    if self.offset > start_offset {
                        let text = &self.source[start_offset..self.offset];
                        return Ok(self.token_at(TokenKind::FStringMiddle, text, start));
                    }
                    if self.peek() == Some('{') {
                        return self.open_replacement_field();
                    }
                    // `}` ends the whole field.
                    let loc = self.loc;
                    self.bump();
                    let token = self.finish_field_token(TokenKind::Rbrace, "}", loc);
                    self.close_replacement_field();
                    return Ok(token);
                }
                Some(c) if c == quote && !triple => {
                    return Err(self.error(
                        LexicalErrorType::OtherError("f-string: expecting '}'".to_string()),
                        start,
                    ));
                }
                Some(c)
                    if c == quote
                        && triple
                        && self.peek2() == Some(quote)
                        && self.peek_at(2) == Some(quote) =>
                {
                    return Err(self.error(
                        LexicalErrorType::OtherError("f-string: expecting '}'".to_string()),
                        start,
                    ));
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// Builds a field-terminator token (`!`, `:` or `}`), attaching the
    /// `expr=` source text when the field is a self-documenting expression.
    fn finish_field_token(&mut self, kind: TokenKind, text: &str, start: Location) -> Token {
        let mut token = self.token_at(kind, text, start);
        let terminator_offset = self.offset - text.len();
        let expr_start;
        {
            let ctx = self.fstrings.last_mut().expect("field implies context");
            let field = ctx.fields.last_mut().expect("field implies state");
            if !field.debug {
                return token;
            }
            expr_start = field.expr_start;
            if field.debug_text.is_none() {
                field.debug_text = Some(Box::from(&self.source[expr_start..terminator_offset]));
            }
            token.metadata = field.debug_text.clone();
        }
        token
    }

    // --- operators --------------------------------------------------------

    fn lex_operator(&mut self) -> Result<Token, LexicalError> {
        let start = self.loc;
        let start_offset = self.offset;
        let c = self.bump().expect("caller checked");

        // Replacement-field terminators take precedence over the generic
        // operator table when we are at the top level of a field.
        if self.at_field_top() {
            match c {
                '}' => {
                    let token = self.finish_field_token(TokenKind::Rbrace, "}", start);
                    self.close_replacement_field();
                    return Ok(token);
                }
                '!' if self.peek() != Some('=') => {
                    return Ok(self.finish_field_token(TokenKind::Exclamation, "!", start));
                }
                ':' => {
                    let token = self.finish_field_token(TokenKind::Colon, ":", start);
                    let ctx = self.fstrings.last_mut().expect("field implies context");
                    ctx.fields.last_mut().expect("checked").part = FieldPart::FormatSpec;
                    return Ok(token);
                }
                '=' if self.peek() != Some('=') && self.marks_debug_expression() => {
                    let ctx = self.fstrings.last_mut().expect("field implies context");
                    ctx.fields.last_mut().expect("checked").debug = true;
                    return Ok(self.token_at(TokenKind::Equal, "=", start));
                }
                _ => {}
            }
        }

        let kind = match c {
            '(' | '[' | '{' => {
                self.paren_stack.push((c, start));
                match c {
                    '(' => TokenKind::Lpar,
                    '[' => TokenKind::Lsqb,
                    _ => TokenKind::Lbrace,
                }
            }
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match self.paren_stack.last() {
                    Some((open, _)) if *open == expected => {
                        self.paren_stack.pop();
                    }
                    Some((open, _)) => {
                        let open = *open;
                        return Err(self.error(
                            LexicalErrorType::OtherError(format!(
                                "closing parenthesis '{c}' does not match opening parenthesis '{open}'"
                            )),
                            start,
                        ));
                    }
                    None => {
                        return Err(self.error(
                            LexicalErrorType::OtherError(format!("unmatched '{c}'")),
                            start,
                        ));
                    }
                }
                match c {
                    ')' => TokenKind::Rpar,
                    ']' => TokenKind::Rsqb,
                    _ => TokenKind::Rbrace,
                }
            }
            ':' => {
                if self.peek() == Some('=') {
                    self.bump();
                    TokenKind::ColonEqual
                } else {
                    TokenKind::Colon
                }
            }
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semi,
            '+' => self.with_equal(TokenKind::Plus, TokenKind::PlusEqual),
            '-' => {
                if self.peek() == Some('>') {
                    self.bump();
                    TokenKind::Rarrow
                } else {
                    self.with_equal(TokenKind::Minus, TokenKind::MinusEqual)
                }
            }
            '*' => {
                if self.peek() == Some('*') {
                    self.bump();
                    self.with_equal(TokenKind::DoubleStar, TokenKind::DoubleStarEqual)
                } else {
                    self.with_equal(TokenKind::Star, TokenKind::StarEqual)
                }
            }
            '/' => {
                if self.peek() == Some('/') {
                    self.bump();
                    self.with_equal(TokenKind::DoubleSlash, TokenKind::DoubleSlashEqual)
                } else {
                    self.with_equal(TokenKind::Slash, TokenKind::SlashEqual)
                }
            }
            '|' => self.with_equal(TokenKind::Vbar, TokenKind::VbarEqual),
            '&' => self.with_equal(TokenKind::Amper, TokenKind::AmperEqual),
            '<' => {
                if self.peek() == Some('<') {
                    self.bump();
                    self.with_equal(TokenKind::LeftShift, TokenKind::LeftShiftEqual)
                } else if self.peek() == Some('>') {
                    // The FLUFL spelling; validity is the grammar's concern.
                    self.bump();
                    TokenKind::NotEqual
                } else {
                    self.with_equal(TokenKind::Less, TokenKind::LessEqual)
                }
            }
            '>' => {
                if self.peek() == Some('>') {
                    self.bump();
                    self.with_equal(TokenKind::RightShift, TokenKind::RightShiftEqual)
                } else {
                    self.with_equal(TokenKind::Greater, TokenKind::GreaterEqual)
                }
            }
            '=' => self.with_equal(TokenKind::Equal, TokenKind::EqEqual),
            '.' => {
                if self.peek() == Some('.') && self.peek2() == Some('.') {
                    self.bump();
                    self.bump();
                    TokenKind::Ellipsis
                } else {
                    TokenKind::Dot
                }
            }
            '%' => self.with_equal(TokenKind::Percent, TokenKind::PercentEqual),
            '^' => self.with_equal(TokenKind::CircumFlex, TokenKind::CircumflexEqual),
            '~' => TokenKind::Tilde,
            '@' => self.with_equal(TokenKind::At, TokenKind::AtEqual),
            '!' => {
                if self.peek() == Some('=') {
                    self.bump();
                    TokenKind::NotEqual
                } else {
                    return Err(
                        self.error(LexicalErrorType::UnrecognizedToken { tok: '!' }, start)
                    );
                }
            }
            c => {
                return Err(self.error(LexicalErrorType::UnrecognizedToken { tok: c }, start));
            }
        };

        let text = &self.source[start_offset..self.offset];
        Ok(self.token_at(kind, text, start))
    }

    fn with_equal(&mut self, plain: TokenKind, with_eq: TokenKind) -> TokenKind {
        if self.peek() == Some('=') {
            self.bump();
            with_eq
        } else {
            plain
        }
    }

    /// Whether the cursor sits at the top level of a replacement field.
    fn at_field_top(&self) -> bool {
        let Some(ctx) = self.fstrings.last() else {
            return false;
        };
        let Some(field) = ctx.fields.last() else {
            return false;
        };
        field.part == FieldPart::Expression && self.paren_stack.len() == field.paren_base + 1
    }

    /// After consuming a lone `=`: a self-documenting expression requires
    /// the next non-blank character to terminate the expression part.
    fn marks_debug_expression(&self) -> bool {
        let rest = &self.source[self.offset..];
        matches!(
            rest.trim_start_matches([' ', '\t']).chars().next(),
            Some('}' | '!' | ':')
        )
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && unic_ucd_ident::is_xid_start(c))
}

fn is_identifier_continue(c: char) -> bool {
    c == '_'
        || c.is_ascii_alphanumeric()
        || (!c.is_ascii() && unic_ucd_ident::is_xid_continue(c))
}

/// The prefix letters of a string literal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct StringPrefix {
    pub raw: bool,
    pub bytes: bool,
    pub fstring: bool,
    pub unicode: bool,
}

impl StringPrefix {
    /// Parses a candidate prefix; `None` means the word is an ordinary
    /// identifier that happens to precede a quote.
    pub(crate) fn parse(word: &str) -> Option<Self> {
        let mut prefix = StringPrefix::default();
        for c in word.chars() {
            match c {
                'r' | 'R' if !prefix.raw => prefix.raw = true,
                'b' | 'B' if !prefix.bytes => prefix.bytes = true,
                'f' | 'F' if !prefix.fstring => prefix.fstring = true,
                'u' | 'U' if !prefix.unicode => prefix.unicode = true,
                _ => return None,
            }
        }
        // `u` does not combine with anything else.
        if prefix.unicode && (prefix.raw || prefix.bytes || prefix.fstring) {
            return None;
        }
        if prefix.bytes && prefix.fstring {
            return None;
        }
        Some(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(TokenKind, String)> {
        let mut lexer = Lexer::new(source, "<test>");
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token().expect("lexing failed");
            let done = token.kind == TokenKind::EndMarker;
            tokens.push((token.kind, token.text.to_string()));
            if done {
                break;
            }
        }
        tokens
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|(kind, _)| kind).collect()
    }

    #[test]
    fn test_simple_expression() {
        assert_eq!(
            kinds("1+2\n"),
            vec![
                TokenKind::Number,
                TokenKind::Plus,
                TokenKind::Number,
                TokenKind::Newline,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn test_newline_synthesized_at_eof() {
        assert_eq!(
            kinds("x"),
            vec![TokenKind::Name, TokenKind::Newline, TokenKind::EndMarker]
        );
    }

    #[test]
    fn test_indentation() {
        assert_eq!(
            kinds("if x:\n    pass\n"),
            vec![
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Name,
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn test_blank_lines_do_not_dedent() {
        assert_eq!(
            kinds("if x:\n    a\n\n    b\n"),
            vec![
                TokenKind::Name,
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Name,
                TokenKind::Newline,
                TokenKind::Name,
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn test_implicit_joining_inside_brackets() {
        assert_eq!(
            kinds("(1,\n 2)\n"),
            vec![
                TokenKind::Lpar,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::Rpar,
                TokenKind::Newline,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn test_dedent_mismatch() {
        let mut lexer = Lexer::new("if x:\n    a\n  b\n", "<test>");
        let err = loop {
            match lexer.next_token() {
                Ok(_) => {}
                Err(err) => break err,
            }
        };
        assert_eq!(err.error, LexicalErrorType::DedentMismatch);
        assert_eq!(lexer.done(), TokenizerDone::DedentMismatch);
    }

    #[test]
    fn test_unterminated_string_done_state() {
        let mut lexer = Lexer::new("'abc", "<test>");
        let err = lexer.next_token().unwrap_err();
        assert_eq!(
            err.error,
            LexicalErrorType::UnterminatedString {
                triple_quoted: false
            }
        );
        assert!(lexer.done().is_end_of_source());
    }

    #[test]
    fn test_unclosed_bracket_at_eof() {
        let mut lexer = Lexer::new("(", "<test>");
        let lpar = lexer.next_token().unwrap();
        assert_eq!(lpar.kind, TokenKind::Lpar);
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.error, LexicalErrorType::Eof);
        assert_eq!(lexer.open_brackets(), &[('(', Location::new(1, 0))]);
    }

    #[test]
    fn test_fstring_tokens() {
        assert_eq!(
            kinds("f\"a{x}b\"\n"),
            vec![
                TokenKind::FStringStart,
                TokenKind::FStringMiddle,
                TokenKind::Lbrace,
                TokenKind::Name,
                TokenKind::Rbrace,
                TokenKind::FStringMiddle,
                TokenKind::FStringEnd,
                TokenKind::Newline,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn test_fstring_doubled_brace_is_its_own_middle() {
        let tokens = lex("f\"a{{b\"\n");
        assert_eq!(
            tokens
                .iter()
                .filter(|(kind, _)| *kind == TokenKind::FStringMiddle)
                .map(|(_, text)| text.as_str())
                .collect::<Vec<_>>(),
            vec!["a", "{{", "b"]
        );
    }

    #[test]
    fn test_fstring_debug_metadata() {
        let mut lexer = Lexer::new("f\"{x=}\"\n", "<test>");
        let mut metadata = None;
        loop {
            let token = lexer.next_token().unwrap();
            if token.kind == TokenKind::Rbrace {
                metadata = token.metadata.clone();
            }
            if token.kind == TokenKind::EndMarker {
                break;
            }
        }
        assert_eq!(metadata.as_deref(), Some("x="));
    }

    #[test]
    fn test_fstring_format_spec() {
        assert_eq!(
            kinds("f\"{x:>10}\"\n"),
            vec![
                TokenKind::FStringStart,
                TokenKind::Lbrace,
                TokenKind::Name,
                TokenKind::Colon,
                TokenKind::FStringMiddle,
                TokenKind::Rbrace,
                TokenKind::FStringEnd,
                TokenKind::Newline,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn test_type_comments_lexed_when_enabled() {
        let mut lexer = Lexer::new("x = 1 # type: int\n", "<test>");
        lexer.set_type_comments(true);
        let mut seen = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            let done = token.kind == TokenKind::EndMarker;
            seen.push((token.kind, token.text.to_string()));
            if done {
                break;
            }
        }
        assert!(seen
            .iter()
            .any(|(kind, text)| *kind == TokenKind::TypeComment && text == "int"));
    }

    #[test]
    fn test_type_ignore_tag() {
        let mut lexer = Lexer::new("x = 1 # type: ignore[assignment]\n", "<test>");
        lexer.set_type_comments(true);
        let mut tag = None;
        loop {
            let token = lexer.next_token().unwrap();
            if token.kind == TokenKind::TypeIgnore {
                tag = Some(token.text.to_string());
            }
            if token.kind == TokenKind::EndMarker {
                break;
            }
        }
        assert_eq!(tag.as_deref(), Some("[assignment]"));
    }

    #[test]
    fn test_operator_disambiguation() {
        assert_eq!(
            kinds("a ** b // c -> d := e\n"),
            vec![
                TokenKind::Name,
                TokenKind::DoubleStar,
                TokenKind::Name,
                TokenKind::DoubleSlash,
                TokenKind::Name,
                TokenKind::Rarrow,
                TokenKind::Name,
                TokenKind::ColonEqual,
                TokenKind::Name,
                TokenKind::Newline,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn test_flufl_spelling_lexes_as_not_equal() {
        assert_eq!(
            kinds("a <> b\n"),
            vec![
                TokenKind::Name,
                TokenKind::NotEqual,
                TokenKind::Name,
                TokenKind::Newline,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn test_ranges_are_monotonic() {
        let mut lexer = Lexer::new("def f(a, b):\n    return a + b\n", "<test>");
        let mut last_end = Location::new(1, 0);
        loop {
            let token = lexer.next_token().unwrap();
            assert!(token.range.start >= last_end || token.kind.is_whitespace());
            last_end = token.range.end;
            if token.kind == TokenKind::EndMarker {
                break;
            }
        }
    }
}
