//! The `match` statement and its pattern grammar. `match` and `case` are
//! soft keywords: they only commit when the statement shape follows.

use taipan_ast::{
    Constant, Expr, ExprAttribute, ExprBinOp, ExprConstant, ExprContext, ExprTuple, ExprUnaryOp,
    MatchCase, Operator, Pattern, PatternMatchAs, PatternMatchClass, PatternMatchMapping,
    PatternMatchOr, PatternMatchSequence, PatternMatchSingleton, PatternMatchStar,
    PatternMatchValue, Identifier, Stmt, StmtMatch, UnaryOp,
};

use crate::helpers::{get_pattern_keys, get_patterns, KeyPatternPair};
use crate::token::TokenKind;

use super::{ParseResult, Parser};

impl Parser<'_> {
    // match_stmt: "match" subject_expr ':' NEWLINE INDENT case_block+ DEDENT
    pub(crate) fn match_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect_soft_keyword("match")?.is_none() {
            return Ok(None);
        }
        let Some(subject) = self.subject_expr()? else {
            self.reset(mark);
            return Ok(None);
        };
        if self.expect(TokenKind::Colon)?.is_none() {
            // `match` is a soft keyword: without the colon this line may
            // still be a perfectly fine expression statement, so no
            // diagnostic fires here even on the second pass.
            self.reset(mark);
            return Ok(None);
        }
        self.check_version(10, "Pattern matching is", Some(()))?;
        if self.expect(TokenKind::Newline)?.is_none()
            || self.expect(TokenKind::Indent)?.is_none()
        {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.indentation_error("expected an indented block after 'match' statement"));
            }
            return Ok(None);
        }
        let mut cases = Vec::new();
        loop {
            let inner = self.mark();
            match self.case_block()? {
                Some(case) => cases.push(case),
                None => {
                    self.reset(inner);
                    break;
                }
            }
        }
        if cases.is_empty() || self.expect(TokenKind::Dedent)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_on_next_token(
                    "expected 'case' block inside 'match' statement",
                ));
            }
            return Ok(None);
        }
        Ok(Some(
            StmtMatch {
                range: self.range_from(start),
                subject: Box::new(subject),
                cases,
            }
            .into(),
        ))
    }

    // subject_expr: star_named_expression ',' [star_named_expressions] | named_expression
    fn subject_expr(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(first) = self.star_named_expression()? {
            if self.expect(TokenKind::Comma)?.is_some() {
                let mut elts = vec![first];
                if let Some(rest) = self.star_named_expressions()? {
                    elts.extend(rest);
                }
                return Ok(Some(
                    ExprTuple {
                        range: self.range_from(start),
                        elts,
                        ctx: ExprContext::Load,
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        self.named_expression()
    }

    // case_block: "case" patterns [guard] ':' block
    fn case_block(&mut self) -> ParseResult<Option<MatchCase>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect_soft_keyword("case")?.is_none() {
            return Ok(None);
        }
        let Some(pattern) = self.patterns()? else {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_on_next_token("invalid syntax"));
            }
            return Ok(None);
        };
        let guard = if self.expect(TokenKind::If)?.is_some() {
            match self.named_expression()? {
                Some(guard) => Some(guard),
                None => {
                    self.reset(mark);
                    return Ok(None);
                }
            }
        } else {
            None
        };
        if self.expect(TokenKind::Colon)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_on_next_token("expected ':'"));
            }
            return Ok(None);
        }
        let Some(body) = self.block()? else {
            self.reset(mark);
            return Ok(None);
        };
        Ok(Some(MatchCase {
            range: self.range_from(start),
            pattern,
            guard: guard.map(Box::new),
            body,
        }))
    }

    // patterns: open_sequence_pattern | pattern
    fn patterns(&mut self) -> ParseResult<Option<Pattern>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(patterns) = self.open_sequence_pattern()? {
            return Ok(Some(
                PatternMatchSequence {
                    range: self.range_from(start),
                    patterns,
                }
                .into(),
            ));
        }
        self.reset(mark);
        self.pattern()
    }

    // pattern: as_pattern | or_pattern
    fn pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let mark = self.mark();
        let start = self.start_location()?;
        let Some(or_pattern) = self.or_pattern()? else {
            self.reset(mark);
            return Ok(None);
        };
        if self.expect(TokenKind::As)?.is_some() {
            let Some(name) = self.pattern_capture_target()? else {
                self.reset(mark);
                if self.call_invalid_rules {
                    return Err(self.syntax_error_on_next_token(
                        "invalid pattern target",
                    ));
                }
                return Ok(None);
            };
            return Ok(Some(
                PatternMatchAs {
                    range: self.range_from(start),
                    pattern: Some(Box::new(or_pattern)),
                    name: Some(name),
                }
                .into(),
            ));
        }
        Ok(Some(or_pattern))
    }

    // or_pattern: '|'.closed_pattern+
    fn or_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let start = self.start_location()?;
        let Some(first) = self.closed_pattern()? else {
            return Ok(None);
        };
        let mut patterns = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Vbar)?.is_none() {
                break;
            }
            match self.closed_pattern()? {
                Some(pattern) => patterns.push(pattern),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        if patterns.len() == 1 {
            return Ok(Some(patterns.pop().expect("one pattern parsed")));
        }
        Ok(Some(
            PatternMatchOr {
                range: self.range_from(start),
                patterns,
            }
            .into(),
        ))
    }

    // closed_pattern: literal | capture | wildcard | value | group
    //   | sequence | mapping | class
    fn closed_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let mark = self.mark();
        if let Some(pattern) = self.literal_pattern()? {
            return Ok(Some(pattern));
        }
        self.reset(mark);
        if let Some(pattern) = self.capture_or_wildcard_pattern()? {
            return Ok(Some(pattern));
        }
        self.reset(mark);
        if let Some(pattern) = self.value_pattern()? {
            return Ok(Some(pattern));
        }
        self.reset(mark);
        if let Some(pattern) = self.group_pattern()? {
            return Ok(Some(pattern));
        }
        self.reset(mark);
        if let Some(pattern) = self.sequence_pattern()? {
            return Ok(Some(pattern));
        }
        self.reset(mark);
        if let Some(pattern) = self.mapping_pattern()? {
            return Ok(Some(pattern));
        }
        self.reset(mark);
        if let Some(pattern) = self.class_pattern()? {
            return Ok(Some(pattern));
        }
        self.reset(mark);
        Ok(None)
    }

    // literal_pattern: signed_number / complex / strings / None / True / False
    fn literal_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let mark = self.mark();
        let start = self.start_location()?;
        match self.peek_kind()? {
            TokenKind::None => {
                self.expect(TokenKind::None)?;
                return Ok(Some(
                    PatternMatchSingleton {
                        range: self.range_from(start),
                        value: Constant::None,
                    }
                    .into(),
                ));
            }
            TokenKind::True | TokenKind::False => {
                let kind = self.peek_kind()?;
                self.expect(kind)?;
                return Ok(Some(
                    PatternMatchSingleton {
                        range: self.range_from(start),
                        value: Constant::Bool(kind == TokenKind::True),
                    }
                    .into(),
                ));
            }
            _ => {}
        }
        if let Some(value) = self.literal_expr()? {
            return Ok(Some(
                PatternMatchValue {
                    range: self.range_from(start),
                    value: Box::new(value),
                }
                .into(),
            ));
        }
        self.reset(mark);
        Ok(None)
    }

    /// Number (optionally signed / complex) and string literal expressions
    /// allowed in value positions of patterns.
    fn literal_expr(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if matches!(self.peek_kind()?, TokenKind::String | TokenKind::FStringStart) {
            // f-strings are not valid literal patterns, so only accept the
            // result when it folded to a constant.
            let strings = self.without_invalid(|p| p.strings())?;
            match strings {
                Some(expr @ Expr::Constant(_)) => return Ok(Some(expr)),
                _ => {
                    self.reset(mark);
                    return Ok(None);
                }
            }
        }
        if let Some(real) = self.signed_number()? {
            let op = match self.peek_kind()? {
                TokenKind::Plus => Some(Operator::Add),
                TokenKind::Minus => Some(Operator::Sub),
                _ => None,
            };
            if let Some(op) = op {
                let kind = self.peek_kind()?;
                self.expect(kind)?;
                let Some(imag) = self.imaginary_number()? else {
                    self.reset(mark);
                    return Ok(None);
                };
                return Ok(Some(
                    ExprBinOp {
                        range: self.range_from(start),
                        left: Box::new(real),
                        op,
                        right: Box::new(imag),
                    }
                    .into(),
                ));
            }
            return Ok(Some(real));
        }
        self.reset(mark);
        Ok(None)
    }

    fn signed_number(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        let negated = self.expect(TokenKind::Minus)?.is_some();
        let Some(number) = self.without_invalid(|p| p.number_token())? else {
            self.reset(mark);
            return Ok(None);
        };
        if !negated {
            return Ok(Some(number));
        }
        Ok(Some(
            ExprUnaryOp {
                range: self.range_from(start),
                op: UnaryOp::USub,
                operand: Box::new(number),
            }
            .into(),
        ))
    }

    fn imaginary_number(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let Some(number) = self.without_invalid(|p| p.number_token())? else {
            return Ok(None);
        };
        if matches!(
            &number,
            Expr::Constant(ExprConstant {
                value: Constant::Complex { .. },
                ..
            })
        ) {
            return Ok(Some(number));
        }
        self.reset(mark);
        Ok(None)
    }

    // capture_pattern: !"_" NAME !('.' | '(' | '=');
    // wildcard_pattern: "_"
    fn capture_or_wildcard_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect_soft_keyword("_")?.is_some() {
            return Ok(Some(
                PatternMatchAs {
                    range: self.range_from(start),
                    pattern: None,
                    name: None,
                }
                .into(),
            ));
        }
        self.reset(mark);
        let Some(name) = self.pattern_capture_target()? else {
            return Ok(None);
        };
        Ok(Some(
            PatternMatchAs {
                range: self.range_from(start),
                pattern: None,
                name: Some(name),
            }
            .into(),
        ))
    }

    // pattern_capture_target: !"_" NAME !('.' | '(' | '=')
    fn pattern_capture_target(&mut self) -> ParseResult<Option<Identifier>> {
        let mark = self.mark();
        let Some(token) = self.expect(TokenKind::Name)? else {
            return Ok(None);
        };
        if &*token.text == "_"
            || matches!(
                self.peek_kind()?,
                TokenKind::Dot | TokenKind::Lpar | TokenKind::Equal
            )
        {
            self.reset(mark);
            return Ok(None);
        }
        Ok(Some(self.new_identifier(&token.text, token.range)?))
    }

    // value_pattern: attr !('.' | '(' | '=')
    fn value_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let mark = self.mark();
        let start = self.start_location()?;
        let Some(attr) = self.name_or_attr()? else {
            return Ok(None);
        };
        if !attr.is_attribute()
            || matches!(
                self.peek_kind()?,
                TokenKind::Dot | TokenKind::Lpar | TokenKind::Equal
            )
        {
            self.reset(mark);
            return Ok(None);
        }
        Ok(Some(
            PatternMatchValue {
                range: self.range_from(start),
                value: Box::new(attr),
            }
            .into(),
        ))
    }

    // name_or_attr: NAME ('.' NAME)*
    fn name_or_attr(&mut self) -> ParseResult<Option<Expr>> {
        let start = self.start_location()?;
        let Some(mut value) = self.name_token()? else {
            return Ok(None);
        };
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Dot)?.is_none() {
                break;
            }
            let Some(name) = self.expect(TokenKind::Name)? else {
                self.reset(mark);
                break;
            };
            let attr = self.new_identifier(&name.text, name.range)?;
            value = ExprAttribute {
                range: self.range_from(start),
                value: Box::new(value),
                attr,
                ctx: ExprContext::Load,
            }
            .into();
        }
        Ok(Some(value))
    }

    // group_pattern: '(' pattern ')'
    fn group_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let mark = self.mark();
        if self.expect(TokenKind::Lpar)?.is_none() {
            return Ok(None);
        }
        if let Some(pattern) = self.pattern()? {
            if self.expect(TokenKind::Rpar)?.is_some() {
                return Ok(Some(pattern));
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // sequence_pattern:
    //   '[' [maybe_sequence_pattern] ']' | '(' [open_sequence_pattern] ')'
    fn sequence_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Lsqb)?.is_some() {
            let patterns = self.maybe_sequence_pattern()?.unwrap_or_default();
            if self.expect(TokenKind::Rsqb)?.is_some() {
                return Ok(Some(
                    PatternMatchSequence {
                        range: self.range_from(start),
                        patterns,
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        if self.expect(TokenKind::Lpar)?.is_some() {
            let patterns = self.open_sequence_pattern()?.unwrap_or_default();
            if self.expect(TokenKind::Rpar)?.is_some() {
                return Ok(Some(
                    PatternMatchSequence {
                        range: self.range_from(start),
                        patterns,
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // open_sequence_pattern: maybe_star_pattern ',' [maybe_sequence_pattern]
    fn open_sequence_pattern(&mut self) -> ParseResult<Option<Vec<Pattern>>> {
        let mark = self.mark();
        let Some(first) = self.maybe_star_pattern()? else {
            return Ok(None);
        };
        if self.expect(TokenKind::Comma)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        let mut patterns = vec![first];
        if let Some(rest) = self.maybe_sequence_pattern()? {
            patterns.extend(rest);
        }
        Ok(Some(patterns))
    }

    // maybe_sequence_pattern: ','.maybe_star_pattern+ [',']
    fn maybe_sequence_pattern(&mut self) -> ParseResult<Option<Vec<Pattern>>> {
        let Some(first) = self.maybe_star_pattern()? else {
            return Ok(None);
        };
        let mut patterns = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.maybe_star_pattern()? {
                Some(pattern) => patterns.push(pattern),
                None => {
                    self.reset(mark);
                    self.expect(TokenKind::Comma)?;
                    break;
                }
            }
        }
        Ok(Some(patterns))
    }

    // maybe_star_pattern: star_pattern | pattern
    fn maybe_star_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Star)?.is_some() {
            if self.expect_soft_keyword("_")?.is_some() {
                return Ok(Some(
                    PatternMatchStar {
                        range: self.range_from(start),
                        name: None,
                    }
                    .into(),
                ));
            }
            if let Some(name) = self.pattern_capture_target()? {
                return Ok(Some(
                    PatternMatchStar {
                        range: self.range_from(start),
                        name: Some(name),
                    }
                    .into(),
                ));
            }
            self.reset(mark);
            return Ok(None);
        }
        self.reset(mark);
        self.pattern()
    }

    // mapping_pattern: '{' entries with optional '**' rest '}'
    fn mapping_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Lbrace)?.is_none() {
            return Ok(None);
        }
        let mut pairs: Vec<KeyPatternPair> = Vec::new();
        let mut rest = None;
        loop {
            let inner = self.mark();
            if !pairs.is_empty() || rest.is_some() {
                if self.expect(TokenKind::Comma)?.is_none() {
                    break;
                }
            }
            if self.expect(TokenKind::DoubleStar)?.is_some() {
                match self.pattern_capture_target()? {
                    Some(name) => {
                        rest = Some(name);
                        continue;
                    }
                    None => {
                        self.reset(inner);
                        break;
                    }
                }
            }
            match self.key_value_pattern()? {
                Some(pair) => pairs.push(pair),
                None => {
                    self.reset(inner);
                    break;
                }
            }
        }
        if self.expect(TokenKind::Rbrace)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        let keys = get_pattern_keys(&pairs);
        let patterns = get_patterns(pairs);
        Ok(Some(
            PatternMatchMapping {
                range: self.range_from(start),
                keys,
                patterns,
                rest,
            }
            .into(),
        ))
    }

    // key_value_pattern: (literal_expr | attr) ':' pattern
    fn key_value_pattern(&mut self) -> ParseResult<Option<KeyPatternPair>> {
        let mark = self.mark();
        let key = {
            let key_mark = self.mark();
            match self.literal_expr()? {
                Some(key) => Some(key),
                None => {
                    self.reset(key_mark);
                    match self.name_or_attr()? {
                        Some(attr @ Expr::Attribute(_)) => Some(attr),
                        _ => None,
                    }
                }
            }
        };
        let Some(key) = key else {
            self.reset(mark);
            return Ok(None);
        };
        if self.expect(TokenKind::Colon)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        let Some(pattern) = self.pattern()? else {
            self.reset(mark);
            return Ok(None);
        };
        Ok(Some(KeyPatternPair { key, pattern }))
    }

    // class_pattern:
    //   name_or_attr '(' [positional_patterns] [keyword_patterns] ')'
    fn class_pattern(&mut self) -> ParseResult<Option<Pattern>> {
        let mark = self.mark();
        let start = self.start_location()?;
        let Some(cls) = self.name_or_attr()? else {
            return Ok(None);
        };
        if self.expect(TokenKind::Lpar)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        let mut patterns = Vec::new();
        let mut kwd_attrs = Vec::new();
        let mut kwd_patterns = Vec::new();
        loop {
            let inner = self.mark();
            if !(patterns.is_empty() && kwd_attrs.is_empty())
                && self.expect(TokenKind::Comma)?.is_none()
            {
                break;
            }
            if self.lookahead_kind(true, TokenKind::Rpar)? {
                break;
            }
            // keyword_pattern: NAME '=' pattern
            let kw_mark = self.mark();
            if let Some(name) = self.expect(TokenKind::Name)? {
                if self.expect(TokenKind::Equal)?.is_some() {
                    if let Some(pattern) = self.pattern()? {
                        kwd_attrs.push(self.new_identifier(&name.text, name.range)?);
                        kwd_patterns.push(pattern);
                        continue;
                    }
                }
            }
            self.reset(kw_mark);
            if !kwd_attrs.is_empty() {
                // Positional patterns cannot follow keyword patterns.
                self.reset(inner);
                break;
            }
            match self.pattern()? {
                Some(pattern) => patterns.push(pattern),
                None => {
                    self.reset(inner);
                    break;
                }
            }
        }
        if self.expect(TokenKind::Rpar)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        Ok(Some(
            PatternMatchClass {
                range: self.range_from(start),
                cls: Box::new(cls),
                patterns,
                kwd_attrs,
                kwd_patterns,
            }
            .into(),
        ))
    }
}
