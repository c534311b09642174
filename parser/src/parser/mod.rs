//! The parsing engine: token buffering, memoization and the two-pass
//! rule driver. The grammar rules themselves live in the sibling modules
//! (`expression`, `statement`, `pattern`).

mod expression;
mod pattern;
mod statement;
#[cfg(test)]
mod tests;

use std::any::Any;
use std::rc::Rc;

use taipan_ast::{Expr, ExprName, Identifier, Mod};
use taipan_parser_core::{Location, Mode, ParserFlags, SourceRange};
use unicode_normalization::{is_nfkc_quick, IsNormalized, UnicodeNormalization};

use crate::error::{
    LexicalError, LexicalErrorType, ParseError, ParseErrorType, SyntaxErrorMetadata,
};
use crate::lexer::{InteractiveUnderflow, Lexer};
use crate::token::{Token, TokenKind};

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// Recursion cap for rules that drive nesting; exceeding it aborts the
/// parse instead of overflowing the stack. Each level of source nesting
/// costs a few dozen stack frames through the rule chain, so the cap is
/// far below what the thread stack could nominally hold.
const MAX_RECURSION_LEVEL: u32 = 500;

/// Reserved keywords; the token buffer promotes NAME tokens whose text
/// matches byte-for-byte.
static KEYWORDS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "False" => TokenKind::False,
    "None" => TokenKind::None,
    "True" => TokenKind::True,
    "and" => TokenKind::And,
    "as" => TokenKind::As,
    "assert" => TokenKind::Assert,
    "async" => TokenKind::Async,
    "await" => TokenKind::Await,
    "break" => TokenKind::Break,
    "class" => TokenKind::Class,
    "continue" => TokenKind::Continue,
    "def" => TokenKind::Def,
    "del" => TokenKind::Del,
    "elif" => TokenKind::Elif,
    "else" => TokenKind::Else,
    "except" => TokenKind::Except,
    "finally" => TokenKind::Finally,
    "for" => TokenKind::For,
    "from" => TokenKind::From,
    "global" => TokenKind::Global,
    "if" => TokenKind::If,
    "import" => TokenKind::Import,
    "in" => TokenKind::In,
    "is" => TokenKind::Is,
    "lambda" => TokenKind::Lambda,
    "nonlocal" => TokenKind::Nonlocal,
    "not" => TokenKind::Not,
    "or" => TokenKind::Or,
    "pass" => TokenKind::Pass,
    "raise" => TokenKind::Raise,
    "return" => TokenKind::Return,
    "try" => TokenKind::Try,
    "while" => TokenKind::While,
    "with" => TokenKind::With,
    "yield" => TokenKind::Yield,
};

/// Identifiers acting as keywords only in specific syntactic positions.
static SOFT_KEYWORDS: &[&str] = &["_", "case", "match", "type"];

/// Memoization keys; one per memoized rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Rule {
    NamedExpression,
    Expression,
    Disjunction,
    Conjunction,
    Inversion,
    Comparison,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    ShiftExpr,
    Sum,
    Term,
    Factor,
    AwaitPrimary,
    Primary,
    Atom,
    Strings,
    Slices,
    TPrimary,
    Lambdef,
    YieldExpr,
    Arguments,
    StarExpressions,
    SimpleStmt,
    TypeParams,
}

struct MemoEntry {
    rule: Rule,
    /// `None` is a memoized failure.
    result: Option<Rc<dyn Any>>,
    /// Buffer position the parser advanced to when the rule last ran here.
    end: usize,
}

/// How targets are being validated, for error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TargetsKind {
    StarTargets,
    DelTargets,
    ForTargets,
}

pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    source: &'a str,
    source_path: String,
    mode: Mode,
    pub(crate) flags: ParserFlags,
    pub(crate) feature_version: u32,

    tokens: Vec<Token>,
    memos: Vec<Vec<MemoEntry>>,
    mark: usize,

    starting_lineno: usize,
    starting_col_offset: usize,

    parsing_started: bool,
    pub(crate) call_invalid_rules: bool,
    last_stmt_location: Option<SourceRange>,
    type_ignore_comments: Vec<(u32, String)>,
    level: u32,

    #[cfg(debug_assertions)]
    memo_hits: std::collections::BTreeMap<Rule, u64>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        source: &'a str,
        mode: Mode,
        flags: ParserFlags,
        feature_version: u32,
        source_path: &str,
    ) -> Self {
        let mut lexer = Lexer::new(source, source_path);
        lexer.set_type_comments(flags.contains(ParserFlags::TYPE_COMMENTS));
        Self {
            lexer,
            source,
            source_path: source_path.to_owned(),
            mode,
            flags,
            feature_version,
            tokens: Vec::new(),
            memos: Vec::new(),
            mark: 0,
            starting_lineno: 0,
            starting_col_offset: 0,
            parsing_started: false,
            call_invalid_rules: false,
            last_stmt_location: None,
            type_ignore_comments: Vec::new(),
            level: 0,
            #[cfg(debug_assertions)]
            memo_hits: std::collections::BTreeMap::new(),
        }
    }

    /// Projects every token location into an enclosing source's coordinate
    /// system, for parsing embedded snippets such as f-string expressions.
    pub(crate) fn starts_at(&mut self, location: Location) {
        self.starting_lineno = location.row().saturating_sub(1);
        self.starting_col_offset = location.column();
    }

    fn project(&self, range: SourceRange) -> SourceRange {
        let mut start = range.start;
        let mut end = range.end;
        if start.row() == 1 {
            start = start.with_col_offset(self.starting_col_offset);
        }
        if end.row() == 1 {
            end = end.with_col_offset(self.starting_col_offset);
        }
        SourceRange::new(
            start.with_row_offset(self.starting_lineno),
            end.with_row_offset(self.starting_lineno),
        )
    }

    // --- C1: token buffer -------------------------------------------------

    /// Pulls one more token from the tokenizer into the buffer.
    fn fill_token(&mut self) -> ParseResult<()> {
        let mut token = match self.lexer.next_token() {
            Ok(token) => token,
            Err(err) => return Err(self.tokenizer_error(err)),
        };

        // Record and skip `# type: ignore` comments.
        while token.kind == TokenKind::TypeIgnore {
            let lineno = self
                .project(token.range)
                .start
                .row()
                .try_into()
                .unwrap_or(u32::MAX);
            self.type_ignore_comments
                .push((lineno, token.text.to_string()));
            token = match self.lexer.next_token() {
                Ok(token) => token,
                Err(err) => return Err(self.tokenizer_error(err)),
            };
        }

        // In interactive mode the ENDMARKER after a parsed statement is
        // rewritten to a NEWLINE so the grammar can finish the line, and
        // the still-open indentation levels are flushed.
        if self.mode.is_interactive()
            && token.kind == TokenKind::EndMarker
            && self.parsing_started
        {
            token.kind = TokenKind::Newline;
            self.parsing_started = false;
            if !self.flags.contains(ParserFlags::DONT_IMPLY_DEDENT) {
                self.lexer.imply_dedents();
            }
        } else {
            self.parsing_started = true;
        }

        if token.kind == TokenKind::Name {
            if let Some(&kw) = KEYWORDS.get(&*token.text) {
                token.kind = kw;
            }
        }

        token.range = self.project(token.range);
        self.tokens.push(token);
        self.memos.push(Vec::new());
        Ok(())
    }

    fn ensure_token(&mut self) -> ParseResult<()> {
        if self.mark == self.tokens.len() {
            self.fill_token()?;
        }
        Ok(())
    }

    pub(crate) fn mark(&self) -> usize {
        self.mark
    }

    pub(crate) fn reset(&mut self, mark: usize) {
        self.mark = mark;
    }

    /// The token at the current position, filling the buffer on demand.
    pub(crate) fn peek_token(&mut self) -> ParseResult<&Token> {
        self.ensure_token()?;
        Ok(&self.tokens[self.mark])
    }

    pub(crate) fn peek_kind(&mut self) -> ParseResult<TokenKind> {
        Ok(self.peek_token()?.kind)
    }

    /// Advances over the next token if it has the given kind.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> ParseResult<Option<Token>> {
        self.ensure_token()?;
        let token = &self.tokens[self.mark];
        if token.kind != kind {
            return Ok(None);
        }
        let token = token.clone();
        self.mark += 1;
        Ok(Some(token))
    }

    /// Like [`expect`], but a mismatch is a syntax error naming the
    /// expected construct.
    pub(crate) fn expect_forced(
        &mut self,
        kind: TokenKind,
        expected: &str,
    ) -> ParseResult<Token> {
        self.ensure_token()?;
        let token = &self.tokens[self.mark];
        if token.kind != kind {
            let range = token.range;
            return Err(self.syntax_error_known_location(range, format!("expected '{expected}'")));
        }
        let token = token.clone();
        self.mark += 1;
        Ok(token)
    }

    /// Matches a NAME whose text equals `keyword` without reserving it.
    pub(crate) fn expect_soft_keyword(&mut self, keyword: &str) -> ParseResult<Option<Expr>> {
        self.ensure_token()?;
        let token = &self.tokens[self.mark];
        if token.kind != TokenKind::Name || &*token.text != keyword {
            return Ok(None);
        }
        self.name_token()
    }

    /// Matches any NAME that is one of the soft keywords.
    pub(crate) fn soft_keyword_token(&mut self) -> ParseResult<Option<Expr>> {
        self.ensure_token()?;
        let token = &self.tokens[self.mark];
        if token.kind != TokenKind::Name || !SOFT_KEYWORDS.contains(&&*token.text) {
            return Ok(None);
        }
        self.name_token()
    }

    /// Scans backward from the current position for the last token that is
    /// not NEWLINE / INDENT / DEDENT / ENDMARKER.
    pub(crate) fn last_non_whitespace_token(&self) -> Option<&Token> {
        let mut result = None;
        for token in self.tokens[..self.mark].iter().rev() {
            result = Some(token);
            if !token.kind.is_whitespace() {
                break;
            }
        }
        result
    }

    /// Evaluates `f` with the position saved and unconditionally restored;
    /// reports whether the match sense agrees with `positive`.
    pub(crate) fn lookahead<T, F>(&mut self, positive: bool, f: F) -> ParseResult<bool>
    where
        F: FnOnce(&mut Self) -> ParseResult<Option<T>>,
    {
        let mark = self.mark;
        let result = f(self)?;
        self.mark = mark;
        Ok(result.is_some() == positive)
    }

    pub(crate) fn lookahead_kind(&mut self, positive: bool, kind: TokenKind) -> ParseResult<bool> {
        self.lookahead(positive, |p| p.expect(kind))
    }

    // --- C2: memoization --------------------------------------------------

    fn is_memoized<T: Clone + 'static>(&mut self, rule: Rule) -> ParseResult<Option<Option<T>>> {
        self.ensure_token()?;
        let Some(entry) = self.memos[self.mark].iter().find(|m| m.rule == rule) else {
            return Ok(None);
        };
        let end = entry.end;
        let stored = entry.result.clone();
        #[cfg(debug_assertions)]
        {
            // Count tokens skipped thanks to the hit; a negative result
            // counts for one.
            let count = end.saturating_sub(self.mark).max(1) as u64;
            *self.memo_hits.entry(rule).or_insert(0) += count;
        }
        self.mark = end;
        let value = stored.map(|rc| {
            rc.downcast::<T>()
                .map(|rc| (*rc).clone())
                .expect("memoized result has the rule's value type")
        });
        Ok(Some(value))
    }

    fn insert_memo<T: Clone + 'static>(&mut self, mark: usize, rule: Rule, result: Option<T>) {
        let entry = MemoEntry {
            rule,
            result: result.map(|value| Rc::new(value) as Rc<dyn Any>),
            end: self.mark,
        };
        // Push-front so the freshest entry wins the scan.
        self.memos[mark].insert(0, entry);
    }

    fn update_memo<T: Clone + 'static>(&mut self, mark: usize, rule: Rule, result: Option<T>) {
        let end = self.mark;
        if let Some(entry) = self.memos[mark].iter_mut().find(|m| m.rule == rule) {
            entry.result = result.map(|value| Rc::new(value) as Rc<dyn Any>);
            entry.end = end;
            return;
        }
        self.insert_memo(mark, rule, result);
    }

    /// Runs a rule body through the memo table.
    pub(crate) fn memoize<T, F>(&mut self, rule: Rule, f: F) -> ParseResult<Option<T>>
    where
        T: Clone + 'static,
        F: FnOnce(&mut Self) -> ParseResult<Option<T>>,
    {
        if let Some(hit) = self.is_memoized::<T>(rule)? {
            return Ok(hit);
        }
        let pos = self.mark;
        let result = f(self)?;
        self.insert_memo(pos, rule, result.clone());
        Ok(result)
    }

    /// Left-recursive variant: seeds a failure, then re-runs the body until
    /// the match stops growing.
    pub(crate) fn memoize_left_rec<T, F>(&mut self, rule: Rule, mut f: F) -> ParseResult<Option<T>>
    where
        T: Clone + 'static,
        F: FnMut(&mut Self) -> ParseResult<Option<T>>,
    {
        if let Some(hit) = self.is_memoized::<T>(rule)? {
            return Ok(hit);
        }
        let pos = self.mark;
        self.insert_memo::<T>(pos, rule, None);
        let mut best: Option<T> = None;
        let mut best_end = pos;
        loop {
            self.mark = pos;
            let result = f(self)?;
            let end = self.mark;
            if result.is_some() && end > best_end {
                best = result;
                best_end = end;
                self.mark = best_end;
                self.update_memo(pos, rule, best.clone());
            } else {
                break;
            }
        }
        self.mark = if best.is_some() { best_end } else { pos };
        Ok(best)
    }

    /// Per-rule memo hit counters collected in debug builds.
    #[cfg(debug_assertions)]
    #[allow(dead_code)]
    pub(crate) fn memo_statistics(&self) -> &std::collections::BTreeMap<Rule, u64> {
        &self.memo_hits
    }

    // --- recursion guard --------------------------------------------------

    pub(crate) fn with_recursion_guard<T, F>(&mut self, f: F) -> ParseResult<T>
    where
        F: FnOnce(&mut Self) -> ParseResult<T>,
    {
        self.level += 1;
        if self.level > MAX_RECURSION_LEVEL {
            self.level -= 1;
            let range = SourceRange::from(self.lexer.current_location());
            return Err(ParseError::new(
                ParseErrorType::Recursion,
                self.project(range),
                self.source_path.clone(),
            ));
        }
        let result = f(self);
        self.level -= 1;
        result
    }

    // --- locations --------------------------------------------------------

    /// The start location of the next unread token.
    pub(crate) fn start_location(&mut self) -> ParseResult<Location> {
        Ok(self.peek_token()?.range.start)
    }

    /// The end location of the last consumed token.
    pub(crate) fn end_location(&self) -> Location {
        self.tokens[..self.mark]
            .last()
            .map(|t| t.range.end)
            .unwrap_or_default()
    }

    pub(crate) fn range_from(&self, start: Location) -> SourceRange {
        SourceRange::new(start, self.end_location())
    }

    /// Records the span of the statement parsed most recently, for the
    /// metadata attached to syntax errors.
    pub(crate) fn register_stmt_location(&mut self, range: SourceRange) {
        self.last_stmt_location = Some(range);
    }

    // --- raising ----------------------------------------------------------

    fn error_token_range(&mut self, use_mark: bool) -> SourceRange {
        if self.tokens.is_empty() {
            return SourceRange::default();
        }
        if use_mark {
            if self.mark == self.tokens.len() && self.fill_token().is_err() {
                // The fill itself failed; the caller's message still wins.
            }
            let index = self.mark.min(self.tokens.len() - 1);
            return self.tokens[index].range;
        }
        self.tokens[self.tokens.len() - 1].range
    }

    /// SyntaxError at the last read token.
    pub(crate) fn syntax_error(&mut self, msg: impl Into<String>) -> ParseError {
        let range = self.error_token_range(false);
        ParseError::new(
            ParseErrorType::Syntax(msg.into()),
            range,
            self.source_path.clone(),
        )
    }

    /// SyntaxError at the next unread token.
    pub(crate) fn syntax_error_on_next_token(&mut self, msg: impl Into<String>) -> ParseError {
        let range = self.error_token_range(true);
        ParseError::new(
            ParseErrorType::Syntax(msg.into()),
            range,
            self.source_path.clone(),
        )
    }

    /// SyntaxError at a known node or token span.
    pub(crate) fn syntax_error_known_location(
        &self,
        range: SourceRange,
        msg: impl Into<String>,
    ) -> ParseError {
        ParseError::new(
            ParseErrorType::Syntax(msg.into()),
            range,
            self.source_path.clone(),
        )
    }

    /// SyntaxError spanning from `a`'s start to `b`'s end.
    pub(crate) fn syntax_error_known_range(
        &self,
        a: SourceRange,
        b: SourceRange,
        msg: impl Into<String>,
    ) -> ParseError {
        self.syntax_error_known_location(SourceRange::new(a.start, b.end), msg)
    }

    /// SyntaxError from a node's start to the tokenizer's current position.
    pub(crate) fn syntax_error_starting_from(
        &mut self,
        a: SourceRange,
        msg: impl Into<String>,
    ) -> ParseError {
        let current = self.project(SourceRange::from(self.lexer.current_location()));
        self.syntax_error_known_location(SourceRange::new(a.start, current.end), msg)
    }

    /// SyntaxError at the last substantive (non-NEWLINE/INDENT/DEDENT)
    /// token, where diagnoses such as a missing ':' belong.
    pub(crate) fn syntax_error_at_last_token(&mut self, msg: impl Into<String>) -> ParseError {
        let range = self
            .last_non_whitespace_token()
            .map(|t| t.range)
            .unwrap_or_else(|| self.error_token_range(false));
        ParseError::new(
            ParseErrorType::Syntax(msg.into()),
            range,
            self.source_path.clone(),
        )
    }

    pub(crate) fn indentation_error(&mut self, msg: impl Into<String>) -> ParseError {
        let range = self.error_token_range(false);
        ParseError::new(
            ParseErrorType::Indentation(msg.into()),
            range,
            self.source_path.clone(),
        )
    }

    /// Routes an invalid-escape deprecation warning to the logging sink.
    /// Suppressed on the diagnostic pass to avoid reporting twice.
    pub(crate) fn warn_invalid_escape_sequence(&self, first_invalid: char, range: SourceRange) {
        if self.call_invalid_rules {
            return;
        }
        log::warn!(
            "{}:{}:{}: DeprecationWarning: invalid escape sequence '\\{}'",
            self.source_path,
            range.start.row(),
            range.start.column(),
            first_invalid
        );
    }

    /// Maps a tokenizer failure onto the host error kinds.
    fn tokenizer_error(&mut self, err: LexicalError) -> ParseError {
        if matches!(err.error, LexicalErrorType::Eof) && self.lexer.level() > 0 {
            let &(ch, loc) = self
                .lexer
                .open_brackets()
                .last()
                .expect("level > 0 implies an open bracket");
            let range = self.project(SourceRange::from(loc));
            return ParseError::new(
                ParseErrorType::Syntax(format!("'{ch}' was never closed")),
                range,
                self.source_path.clone(),
            );
        }
        let mut parse_err: ParseError = err.into();
        parse_err.range = self.project(parse_err.range);
        parse_err
    }

    // --- C4 entry helpers shared by the grammar ---------------------------

    /// Decodes NAME text into an identifier: NFKC-normalizes non-ASCII
    /// names and rejects the reserved literal spellings.
    pub(crate) fn new_identifier(
        &mut self,
        text: &str,
        range: SourceRange,
    ) -> ParseResult<Identifier> {
        let id = if text.is_ascii() {
            text.to_owned()
        } else {
            match is_nfkc_quick(text.chars()) {
                IsNormalized::Yes => text.to_owned(),
                _ => text.chars().nfkc().collect(),
            }
        };
        if matches!(id.as_str(), "None" | "True" | "False") {
            return Err(ParseError::new(
                ParseErrorType::Value(format!("identifier field can't represent '{id}' constant")),
                range,
                self.source_path.clone(),
            ));
        }
        Ok(Identifier::new(id, range))
    }

    /// NAME token to a load-context Name node.
    pub(crate) fn name_token(&mut self) -> ParseResult<Option<Expr>> {
        let Some(token) = self.expect(TokenKind::Name)? else {
            return Ok(None);
        };
        let id = self.new_identifier(&token.text, token.range)?;
        Ok(Some(
            ExprName {
                range: token.range,
                id,
                ctx: taipan_ast::ExprContext::Load,
            }
            .into(),
        ))
    }

    pub(crate) fn type_ignores(&mut self) -> Vec<taipan_ast::TypeIgnore> {
        self.type_ignore_comments
            .drain(..)
            .map(|(lineno, tag)| taipan_ast::TypeIgnore { lineno, tag })
            .collect()
    }

    // --- the two-pass driver ----------------------------------------------

    fn reset_for_error_pass(&mut self) {
        self.last_stmt_location = None;
        for chain in &mut self.memos {
            chain.clear();
        }
        self.mark = 0;
        self.call_invalid_rules = true;
        // Don't try to get extra interactive input when producing
        // specialized errors in the second pass.
        self.lexer
            .set_interactive_underflow(InteractiveUnderflow::Stop);
    }

    /// Checks that nothing but whitespace and comments follows a parsed
    /// single statement.
    fn bad_single_statement(&self) -> bool {
        let mut rest = self.lexer.remaining().chars().peekable();
        loop {
            while matches!(rest.peek(), Some(' ' | '\t' | '\n' | '\r' | '\x0c')) {
                rest.next();
            }
            match rest.peek() {
                None => return false,
                Some('#') => {
                    while !matches!(rest.peek(), None | Some('\n')) {
                        rest.next();
                    }
                }
                Some(_) => return true,
            }
        }
    }

    /// Extracts the source line an error points at.
    fn error_line(&self, row: usize) -> Option<String> {
        let relative = if self.starting_lineno > 0 {
            row.checked_sub(self.starting_lineno)?
        } else {
            row
        };
        self.source
            .lines()
            .nth(relative.checked_sub(1)?)
            .map(str::to_owned)
    }

    fn attach_error_context(&self, mut err: ParseError) -> ParseError {
        err.line = self.error_line(err.range.start.row());
        if err.error.is_syntax() {
            err.metadata = Some(SyntaxErrorMetadata {
                last_statement: self
                    .last_stmt_location
                    .map(|r| r.start)
                    .unwrap_or_default(),
                source: self.source.to_owned(),
            });
        }
        err
    }

    /// Synthesizes the generic error when the diagnostic pass did not find
    /// a more precise one, based on the last token the first pass reached.
    fn fallback_syntax_error(&mut self, last_token: Option<(TokenKind, SourceRange)>) -> ParseError {
        let Some((kind, range)) = last_token else {
            return self.syntax_error("error at start before reading any input");
        };
        match kind {
            TokenKind::Indent => {
                ParseError::new(
                    ParseErrorType::Indentation("unexpected indent".to_owned()),
                    range,
                    self.source_path.clone(),
                )
            }
            TokenKind::Dedent => ParseError::new(
                ParseErrorType::Indentation("unexpected unindent".to_owned()),
                range,
                self.source_path.clone(),
            ),
            _ => self.syntax_error_known_location(range, "invalid syntax"),
        }
    }

    /// Runs the start rule, re-running with the diagnostic `invalid_*`
    /// rules enabled when the first pass fails.
    pub(crate) fn run(&mut self) -> Result<Mod, ParseError> {
        let first = self.parse_start();
        debug_assert_eq!(self.level, 0);
        let first_err = match first {
            Ok(Some(module)) => {
                if self.mode.is_interactive() && self.bad_single_statement() {
                    self.lexer.set_done(crate::error::TokenizerDone::BadSingle);
                    let err = self
                        .syntax_error("multiple statements found while compiling a single statement");
                    return Err(self.attach_error_context(err));
                }
                return Ok(module);
            }
            Ok(None) => None,
            Err(err) => Some(err),
        };

        if self.flags.contains(ParserFlags::ALLOW_INCOMPLETE_INPUT)
            && self.lexer.done().is_end_of_source()
        {
            let range = first_err
                .as_ref()
                .map(|err| err.range)
                .or_else(|| self.tokens.last().map(|t| t.range))
                .unwrap_or_default();
            return Err(ParseError::new(
                ParseErrorType::IncompleteInput,
                range,
                self.source_path.clone(),
            ));
        }

        // Only syntax-shaped failures get the diagnostic pass.
        let syntax_shaped = |error: &ParseErrorType| {
            matches!(
                error,
                ParseErrorType::Syntax(_) | ParseErrorType::Indentation(_) | ParseErrorType::Tab(_)
            )
        };
        if first_err.as_ref().is_some_and(|err| !syntax_shaped(&err.error)) {
            let err = first_err.expect("checked just above");
            return Err(self.attach_error_context(err));
        }

        // Second pass: heavier checks for better messages. The extra
        // `invalid_*` rule alternatives are active during parsing.
        log::debug!("first parser pass failed; rerunning with invalid rules enabled");
        let last_token = self.tokens.last().map(|t| (t.kind, t.range));
        self.reset_for_error_pass();
        let second = self.parse_start();

        let err = match second {
            Err(second_err) => second_err,
            // The diagnostic pass must not succeed where the first pass
            // failed; blame the furthest token of the first pass.
            Ok(_) => match first_err {
                Some(err) => err,
                None => self.fallback_syntax_error(last_token),
            },
        };
        Err(self.attach_error_context(err))
    }
}
