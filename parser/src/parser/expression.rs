//! Expression rules, from the ordered-choice top (`expressions`) down to
//! atoms, plus targets, call arguments, comprehensions and f-strings.
//! Alternatives are attempted in grammar order with the position restored
//! between them; `invalid_*` alternatives only run on the diagnostic pass.

use taipan_ast::{
    CmpOp, Expr, ExprAttribute, ExprAwait, ExprBinOp, ExprBoolOp, ExprCall, ExprCompare,
    ExprConstant, ExprContext, ExprDict, ExprDictComp, ExprGeneratorExp, ExprIfExp, ExprLambda,
    ExprList, ExprListComp, ExprNamedExpr, ExprSet, ExprSetComp, ExprSlice, ExprStarred,
    ExprSubscript, ExprTuple, ExprUnaryOp, ExprYield, ExprYieldFrom, Comprehension, Constant,
    Keyword, Located, Operator, UnaryOp,
};
use taipan_parser_core::{ParserFlags, SourceRange};

use crate::context::{get_invalid_target, set_expr_context};
use crate::helpers::{
    get_keys, get_last_comprehension_item, get_values, seq_delete_starred_exprs,
    seq_extract_starred_exprs, split_cmpop_pairs, CmpopExprPair, KeyValuePair, KeywordOrStarred,
};
use crate::number::parse_number_literal;
use crate::string::{
    check_fstring_conversion, concatenate_strings, formatted_value, joined_str,
    parse_string_literal, setup_full_format_spec, ResultTokenWithMetadata,
};
use crate::token::TokenKind;

use super::{ParseResult, Parser, Rule, TargetsKind};

/// Left-recursive binary-operator tiers, in the growing-memo scheme. The
/// operator alternatives all sit at the same position over the same
/// operand rule, so the first matching operator token decides.
macro_rules! left_rec_binop {
    ($name:ident, $body:ident, $rule:expr, $next:ident, { $($kind:path => $op:expr),+ $(,)? }) => {
        pub(crate) fn $name(&mut self) -> ParseResult<Option<Expr>> {
            self.memoize_left_rec($rule, |p| p.$body())
        }

        fn $body(&mut self) -> ParseResult<Option<Expr>> {
            let mark = self.mark();
            let start = self.start_location()?;
            if let Some(left) = self.$name()? {
                let op = match self.peek_kind()? {
                    $($kind => Some($op),)+
                    _ => None,
                };
                if let Some(op) = op {
                    let kind = self.peek_kind()?;
                    self.expect(kind)?;
                    if let Some(right) = self.$next()? {
                        return Ok(Some(
                            ExprBinOp {
                                range: self.range_from(start),
                                left: Box::new(left),
                                op,
                                right: Box::new(right),
                            }
                            .into(),
                        ));
                    }
                }
            }
            self.reset(mark);
            self.$next()
        }
    };
}

impl Parser<'_> {
    /// Raises when a construct needs a newer feature version than the one
    /// being parsed for.
    pub(crate) fn check_version<T>(
        &mut self,
        version: u32,
        construct: &str,
        node: Option<T>,
    ) -> ParseResult<Option<T>> {
        let Some(node) = node else {
            return Ok(None);
        };
        if self.feature_version < version {
            return Err(self.syntax_error(format!(
                "{construct} only supported in Python 3.{version} and greater"
            )));
        }
        Ok(Some(node))
    }

    // expressions: expression (',' expression)+ [','] | expression ',' | expression
    pub(crate) fn expressions(&mut self) -> ParseResult<Option<Expr>> {
        let start = self.start_location()?;
        let Some(first) = self.expression()? else {
            return Ok(None);
        };
        let mut elts = vec![first];
        let mut is_tuple = false;
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            is_tuple = true;
            match self.expression()? {
                Some(elt) => elts.push(elt),
                None => {
                    // A trailing comma still makes a tuple.
                    self.reset(mark);
                    self.expect(TokenKind::Comma)?;
                    break;
                }
            }
        }
        if !is_tuple {
            return Ok(Some(elts.pop().expect("one element parsed")));
        }
        Ok(Some(
            ExprTuple {
                range: self.range_from(start),
                elts,
                ctx: ExprContext::Load,
            }
            .into(),
        ))
    }

    // expression (memo):
    //   invalid_expression | invalid_legacy_expression
    //   | disjunction 'if' disjunction 'else' expression | disjunction | lambdef
    pub(crate) fn expression(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::Expression, |p| {
            p.with_recursion_guard(|p| p.expression_body())
        })
    }

    fn expression_body(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.call_invalid_rules {
            self.invalid_expression()?;
            self.reset(mark);
            self.invalid_legacy_expression()?;
            self.reset(mark);
        }
        if let Some(body) = self.disjunction()? {
            if self.expect(TokenKind::If)?.is_some() {
                if let Some(test) = self.disjunction()? {
                    if self.expect(TokenKind::Else)?.is_some() {
                        if let Some(orelse) = self.expression()? {
                            return Ok(Some(
                                ExprIfExp {
                                    range: self.range_from(start),
                                    test: Box::new(test),
                                    body: Box::new(body),
                                    orelse: Box::new(orelse),
                                }
                                .into(),
                            ));
                        }
                    }
                }
            } else {
                return Ok(Some(body));
            }
        }
        self.reset(mark);
        if let Some(expr) = self.disjunction()? {
            return Ok(Some(expr));
        }
        self.reset(mark);
        if let Some(lambda) = self.lambdef()? {
            return Ok(Some(lambda));
        }
        self.reset(mark);
        Ok(None)
    }

    // invalid_expression (diagnostic pass only)
    fn invalid_expression(&mut self) -> ParseResult<()> {
        let mark = self.mark();
        // !(NAME STRING | SOFT_KEYWORD) disjunction expression_without_invalid
        let legacy_shape = self.lookahead(true, |p| {
            if p.expect(TokenKind::Name)?.is_some()
                && matches!(
                    p.peek_kind()?,
                    TokenKind::String | TokenKind::FStringStart
                )
            {
                return Ok(Some(()));
            }
            Ok(None)
        })?;
        let soft_ahead = self.lookahead(true, |p| p.soft_keyword_token())?;
        if !legacy_shape && !soft_ahead {
            if let Some(first) = self.disjunction()? {
                let second = self.without_invalid(|p| p.expression())?;
                if let Some(second) = second {
                    return Err(self.syntax_error_known_range(
                        first.range(),
                        second.range(),
                        "invalid syntax. Perhaps you forgot a comma?",
                    ));
                }
            }
        }
        self.reset(mark);
        // disjunction 'if' disjunction !('else' | ':')
        if let Some(_cond) = self.disjunction()? {
            if let Some(if_token) = self.expect(TokenKind::If)? {
                if let Some(test) = self.disjunction()? {
                    let followed = self.lookahead(true, |p| {
                        if p.expect(TokenKind::Else)?.is_some() || p.expect(TokenKind::Colon)?.is_some() {
                            Ok(Some(()))
                        } else {
                            Ok(None)
                        }
                    })?;
                    if !followed {
                        return Err(self.syntax_error_known_range(
                            if_token.range,
                            test.range(),
                            "expected 'else' after 'if' expression",
                        ));
                    }
                }
            }
        }
        self.reset(mark);
        Ok(())
    }

    // invalid_legacy_expression: NAME !'(' star_expressions
    fn invalid_legacy_expression(&mut self) -> ParseResult<()> {
        let mark = self.mark();
        if let Some(name) = self.name_token()? {
            if !self.lookahead_kind(true, TokenKind::Lpar)? {
                if let Some(rest) = self.without_invalid(|p| p.star_expressions())? {
                    if crate::helpers::check_legacy_stmt(&name) {
                        let id = match &name {
                            Expr::Name(n) => n.id.to_string(),
                            _ => String::new(),
                        };
                        return Err(self.syntax_error_known_range(
                            name.range(),
                            rest.range(),
                            format!(
                                "Missing parentheses in call to '{id}'. Did you mean {id}(...)?"
                            ),
                        ));
                    }
                }
            }
        }
        self.reset(mark);
        Ok(())
    }

    /// Runs a sub-parse with the diagnostic alternatives switched off, the
    /// way `expression_without_invalid` is generated.
    pub(crate) fn without_invalid<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let saved = self.call_invalid_rules;
        self.call_invalid_rules = false;
        let result = f(self);
        self.call_invalid_rules = saved;
        result
    }

    // yield_expr: 'yield' 'from' expression | 'yield' [star_expressions]
    pub(crate) fn yield_expr(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::YieldExpr, |p| {
            let mark = p.mark();
            let start = p.start_location()?;
            if p.expect(TokenKind::Yield)?.is_some() {
                if p.expect(TokenKind::From)?.is_some() {
                    if let Some(value) = p.expression()? {
                        return Ok(Some(
                            ExprYieldFrom {
                                range: p.range_from(start),
                                value: Box::new(value),
                            }
                            .into(),
                        ));
                    }
                    p.reset(mark);
                    p.expect(TokenKind::Yield)?;
                }
                let value = p.star_expressions()?;
                return Ok(Some(
                    ExprYield {
                        range: p.range_from(start),
                        value: value.map(Box::new),
                    }
                    .into(),
                ));
            }
            p.reset(mark);
            Ok(None)
        })
    }

    // star_expressions: star_expression ((',' star_expression)* [','])?
    pub(crate) fn star_expressions(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::StarExpressions, |p| {
            let start = p.start_location()?;
            let Some(first) = p.star_expression()? else {
                return Ok(None);
            };
            let mut elts = vec![first];
            let mut is_tuple = false;
            loop {
                let mark = p.mark();
                if p.expect(TokenKind::Comma)?.is_none() {
                    break;
                }
                match p.star_expression()? {
                    Some(elt) => {
                        is_tuple = true;
                        elts.push(elt);
                    }
                    None => {
                        p.reset(mark);
                        if p.expect(TokenKind::Comma)?.is_some() {
                            is_tuple = true;
                        }
                        break;
                    }
                }
            }
            if !is_tuple {
                return Ok(Some(elts.pop().expect("one element parsed")));
            }
            Ok(Some(
                ExprTuple {
                    range: p.range_from(start),
                    elts,
                    ctx: ExprContext::Load,
                }
                .into(),
            ))
        })
    }

    // star_expression: '*' bitwise_or | expression
    fn star_expression(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Star)?.is_some() {
            if let Some(value) = self.bitwise_or()? {
                return Ok(Some(
                    ExprStarred {
                        range: self.range_from(start),
                        value: Box::new(value),
                        ctx: ExprContext::Load,
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        self.expression()
    }

    // star_named_expressions: ','.star_named_expression+ [',']
    pub(crate) fn star_named_expressions(&mut self) -> ParseResult<Option<Vec<Expr>>> {
        let Some(first) = self.star_named_expression()? else {
            return Ok(None);
        };
        let mut elts = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.star_named_expression()? {
                Some(elt) => elts.push(elt),
                None => {
                    self.reset(mark);
                    self.expect(TokenKind::Comma)?;
                    break;
                }
            }
        }
        Ok(Some(elts))
    }

    // star_named_expression: '*' bitwise_or | named_expression
    pub(crate) fn star_named_expression(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Star)?.is_some() {
            if let Some(value) = self.bitwise_or()? {
                return Ok(Some(
                    ExprStarred {
                        range: self.range_from(start),
                        value: Box::new(value),
                        ctx: ExprContext::Load,
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        self.named_expression()
    }

    // assignment_expression: NAME ':=' ~ expression
    pub(crate) fn assignment_expression(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(target) = self.name_token()? {
            if self.expect(TokenKind::ColonEqual)?.is_some() {
                self.check_version(8, "Assignment expressions are", Some(()))?;
                // Cut: a ':=' after a name commits to this form.
                let Some(value) = self.expression()? else {
                    self.reset(mark);
                    return Ok(None);
                };
                let target = set_expr_context(target, ExprContext::Store);
                return Ok(Some(
                    ExprNamedExpr {
                        range: self.range_from(start),
                        target: Box::new(target),
                        value: Box::new(value),
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // named_expression: assignment_expression | invalid_named_expression | expression !':='
    pub(crate) fn named_expression(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::NamedExpression, |p| {
            let mark = p.mark();
            if let Some(expr) = p.assignment_expression()? {
                return Ok(Some(expr));
            }
            p.reset(mark);
            if p.call_invalid_rules {
                p.invalid_named_expression()?;
                p.reset(mark);
            }
            if let Some(expr) = p.expression()? {
                if !p.lookahead_kind(true, TokenKind::ColonEqual)? {
                    return Ok(Some(expr));
                }
            }
            p.reset(mark);
            Ok(None)
        })
    }

    fn invalid_named_expression(&mut self) -> ParseResult<()> {
        let mark = self.mark();
        // expression ':=' expression
        if let Some(target) = self.without_invalid(|p| p.expression())? {
            if self.expect(TokenKind::ColonEqual)?.is_some()
                && self.without_invalid(|p| p.expression())?.is_some()
            {
                let name = target.name();
                let range = target.range();
                return Err(self.syntax_error_known_location(
                    range,
                    format!("cannot use assignment expressions with {name}"),
                ));
            }
        }
        self.reset(mark);
        // NAME '=' bitwise_or !('=' | ':=')
        if self.name_token()?.is_some() && self.expect(TokenKind::Equal)?.is_some() {
            if self.bitwise_or()?.is_some() {
                let more = self.lookahead(true, |p| {
                    if p.expect(TokenKind::Equal)?.is_some()
                        || p.expect(TokenKind::ColonEqual)?.is_some()
                    {
                        Ok(Some(()))
                    } else {
                        Ok(None)
                    }
                })?;
                if !more {
                    return Err(self.syntax_error(
                        "invalid syntax. Maybe you meant '==' or ':=' instead of '='?",
                    ));
                }
            }
        }
        self.reset(mark);
        Ok(())
    }

    // disjunction (memo): conjunction ('or' conjunction)+ | conjunction
    pub(crate) fn disjunction(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::Disjunction, |p| {
            let start = p.start_location()?;
            let Some(first) = p.conjunction()? else {
                return Ok(None);
            };
            let mut values = vec![first];
            loop {
                let mark = p.mark();
                if p.expect(TokenKind::Or)?.is_none() {
                    break;
                }
                match p.conjunction()? {
                    Some(value) => values.push(value),
                    None => {
                        p.reset(mark);
                        break;
                    }
                }
            }
            if values.len() == 1 {
                return Ok(Some(values.pop().expect("one value parsed")));
            }
            Ok(Some(
                ExprBoolOp {
                    range: p.range_from(start),
                    op: taipan_ast::BoolOp::Or,
                    values,
                }
                .into(),
            ))
        })
    }

    // conjunction (memo): inversion ('and' inversion)+ | inversion
    fn conjunction(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::Conjunction, |p| {
            let start = p.start_location()?;
            let Some(first) = p.inversion()? else {
                return Ok(None);
            };
            let mut values = vec![first];
            loop {
                let mark = p.mark();
                if p.expect(TokenKind::And)?.is_none() {
                    break;
                }
                match p.inversion()? {
                    Some(value) => values.push(value),
                    None => {
                        p.reset(mark);
                        break;
                    }
                }
            }
            if values.len() == 1 {
                return Ok(Some(values.pop().expect("one value parsed")));
            }
            Ok(Some(
                ExprBoolOp {
                    range: p.range_from(start),
                    op: taipan_ast::BoolOp::And,
                    values,
                }
                .into(),
            ))
        })
    }

    // inversion (memo): 'not' inversion | comparison
    fn inversion(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::Inversion, |p| {
            p.with_recursion_guard(|p| p.inversion_body())
        })
    }

    fn inversion_body(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Not)?.is_some() {
            if let Some(operand) = self.inversion()? {
                return Ok(Some(
                    ExprUnaryOp {
                        range: self.range_from(start),
                        op: UnaryOp::Not,
                        operand: Box::new(operand),
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        self.comparison()
    }

    // comparison: bitwise_or compare_op_bitwise_or_pair+ | bitwise_or
    fn comparison(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::Comparison, |p| {
            let start = p.start_location()?;
            let Some(left) = p.bitwise_or()? else {
                return Ok(None);
            };
            let mut pairs = Vec::new();
            loop {
                let mark = p.mark();
                match p.compare_op_bitwise_or_pair()? {
                    Some(pair) => pairs.push(pair),
                    None => {
                        p.reset(mark);
                        break;
                    }
                }
            }
            if pairs.is_empty() {
                return Ok(Some(left));
            }
            let (ops, comparators) = split_cmpop_pairs(pairs);
            Ok(Some(
                ExprCompare {
                    range: p.range_from(start),
                    left: Box::new(left),
                    ops,
                    comparators,
                }
                .into(),
            ))
        })
    }

    fn compare_op_bitwise_or_pair(&mut self) -> ParseResult<Option<CmpopExprPair>> {
        let mark = self.mark();
        let op = match self.peek_kind()? {
            TokenKind::EqEqual => {
                self.expect(TokenKind::EqEqual)?;
                Some(CmpOp::Eq)
            }
            TokenKind::NotEqual => {
                let token = self.expect(TokenKind::NotEqual)?.expect("peeked");
                self.check_barry_as_flufl(&token)?;
                Some(CmpOp::NotEq)
            }
            TokenKind::LessEqual => {
                self.expect(TokenKind::LessEqual)?;
                Some(CmpOp::LtE)
            }
            TokenKind::Less => {
                self.expect(TokenKind::Less)?;
                Some(CmpOp::Lt)
            }
            TokenKind::GreaterEqual => {
                self.expect(TokenKind::GreaterEqual)?;
                Some(CmpOp::GtE)
            }
            TokenKind::Greater => {
                self.expect(TokenKind::Greater)?;
                Some(CmpOp::Gt)
            }
            TokenKind::In => {
                self.expect(TokenKind::In)?;
                Some(CmpOp::In)
            }
            TokenKind::Not => {
                self.expect(TokenKind::Not)?;
                if self.expect(TokenKind::In)?.is_some() {
                    Some(CmpOp::NotIn)
                } else {
                    self.reset(mark);
                    None
                }
            }
            TokenKind::Is => {
                self.expect(TokenKind::Is)?;
                if self.expect(TokenKind::Not)?.is_some() {
                    Some(CmpOp::IsNot)
                } else {
                    Some(CmpOp::Is)
                }
            }
            _ => None,
        };
        let Some(op) = op else {
            self.reset(mark);
            return Ok(None);
        };
        match self.bitwise_or()? {
            Some(expr) => Ok(Some(CmpopExprPair { op, expr })),
            None => {
                self.reset(mark);
                Ok(None)
            }
        }
    }

    /// Validates a not-equal spelling against the Barry-as-BDFL flag.
    pub(crate) fn check_barry_as_flufl(&mut self, token: &crate::token::Token) -> ParseResult<()> {
        let barry = self.flags.contains(ParserFlags::BARRY_AS_BDFL);
        if barry && &*token.text != "<>" {
            return Err(self.syntax_error_known_location(
                token.range,
                "with Barry as BDFL, use '<>' instead of '!='",
            ));
        }
        if !barry && &*token.text != "!=" {
            return Err(self.syntax_error_known_location(token.range, "invalid syntax"));
        }
        Ok(())
    }

    left_rec_binop!(bitwise_or, bitwise_or_body, Rule::BitwiseOr, bitwise_xor, {
        TokenKind::Vbar => Operator::BitOr,
    });

    left_rec_binop!(bitwise_xor, bitwise_xor_body, Rule::BitwiseXor, bitwise_and, {
        TokenKind::CircumFlex => Operator::BitXor,
    });

    left_rec_binop!(bitwise_and, bitwise_and_body, Rule::BitwiseAnd, shift_expr, {
        TokenKind::Amper => Operator::BitAnd,
    });

    left_rec_binop!(shift_expr, shift_expr_body, Rule::ShiftExpr, sum, {
        TokenKind::LeftShift => Operator::LShift,
        TokenKind::RightShift => Operator::RShift,
    });

    left_rec_binop!(sum, sum_body, Rule::Sum, term, {
        TokenKind::Plus => Operator::Add,
        TokenKind::Minus => Operator::Sub,
    });

    left_rec_binop!(term, term_body, Rule::Term, factor, {
        TokenKind::Star => Operator::Mult,
        TokenKind::Slash => Operator::Div,
        TokenKind::DoubleSlash => Operator::FloorDiv,
        TokenKind::Percent => Operator::Mod,
        TokenKind::At => Operator::MatMult,
    });

    // factor (memo): '+' factor | '-' factor | '~' factor | power
    fn factor(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::Factor, |p| p.with_recursion_guard(|p| p.factor_body()))
    }

    fn factor_body(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        let op = match self.peek_kind()? {
            TokenKind::Plus => Some(UnaryOp::UAdd),
            TokenKind::Minus => Some(UnaryOp::USub),
            TokenKind::Tilde => Some(UnaryOp::Invert),
            _ => None,
        };
        if let Some(op) = op {
            let kind = self.peek_kind()?;
            self.expect(kind)?;
            if let Some(operand) = self.factor()? {
                return Ok(Some(
                    ExprUnaryOp {
                        range: self.range_from(start),
                        op,
                        operand: Box::new(operand),
                    }
                    .into(),
                ));
            }
            self.reset(mark);
        }
        self.power()
    }

    // power: await_primary '**' factor | await_primary
    fn power(&mut self) -> ParseResult<Option<Expr>> {
        let start = self.start_location()?;
        let Some(base) = self.await_primary()? else {
            return Ok(None);
        };
        let mark = self.mark();
        if self.expect(TokenKind::DoubleStar)?.is_some() {
            if let Some(exp) = self.factor()? {
                return Ok(Some(
                    ExprBinOp {
                        range: self.range_from(start),
                        left: Box::new(base),
                        op: Operator::Pow,
                        right: Box::new(exp),
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        Ok(Some(base))
    }

    // await_primary (memo): 'await' primary | primary
    fn await_primary(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::AwaitPrimary, |p| {
            let mark = p.mark();
            let start = p.start_location()?;
            if p.expect(TokenKind::Await)?.is_some() {
                if let Some(value) = p.primary()? {
                    return Ok(Some(
                        ExprAwait {
                            range: p.range_from(start),
                            value: Box::new(value),
                        }
                        .into(),
                    ));
                }
            }
            p.reset(mark);
            p.primary()
        })
    }

    // primary (left-recursive):
    //   primary '.' NAME | primary genexp | primary '(' [arguments] ')'
    //   | primary '[' slices ']' | atom
    fn primary(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize_left_rec(Rule::Primary, |p| p.primary_body())
    }

    fn primary_body(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(value) = self.primary()? {
            let after_left = self.mark();

            if self.expect(TokenKind::Dot)?.is_some() {
                if let Some(name) = self.expect(TokenKind::Name)? {
                    let attr = self.new_identifier(&name.text, name.range)?;
                    return Ok(Some(
                        ExprAttribute {
                            range: self.range_from(start),
                            value: Box::new(value),
                            attr,
                            ctx: ExprContext::Load,
                        }
                        .into(),
                    ));
                }
            }
            self.reset(after_left);

            if let Some(genexp) = self.genexp()? {
                return Ok(Some(
                    ExprCall {
                        range: self.range_from(start),
                        func: Box::new(value),
                        args: vec![genexp],
                        keywords: vec![],
                    }
                    .into(),
                ));
            }
            self.reset(after_left);

            if self.expect(TokenKind::Lpar)?.is_some() {
                let arguments = self.arguments()?.unwrap_or_default();
                if self.expect(TokenKind::Rpar)?.is_some() {
                    let (args, keywords) = arguments;
                    return Ok(Some(
                        ExprCall {
                            range: self.range_from(start),
                            func: Box::new(value),
                            args,
                            keywords,
                        }
                        .into(),
                    ));
                }
            }
            self.reset(after_left);

            if self.expect(TokenKind::Lsqb)?.is_some() {
                if let Some(slice) = self.slices()? {
                    if self.expect(TokenKind::Rsqb)?.is_some() {
                        return Ok(Some(
                            ExprSubscript {
                                range: self.range_from(start),
                                value: Box::new(value),
                                slice: Box::new(slice),
                                ctx: ExprContext::Load,
                            }
                            .into(),
                        ));
                    }
                }
            }
        }
        self.reset(mark);
        self.atom()
    }

    // slices: slice !',' | ','.(slice | starred_expression)+ [',']
    pub(crate) fn slices(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::Slices, |p| {
            let mark = p.mark();
            let start = p.start_location()?;
            if let Some(slice) = p.slice()? {
                if !p.lookahead_kind(true, TokenKind::Comma)? {
                    return Ok(Some(slice));
                }
            }
            p.reset(mark);
            let Some(first) = p.slice_or_starred()? else {
                return Ok(None);
            };
            let mut elts = vec![first];
            loop {
                let inner = p.mark();
                if p.expect(TokenKind::Comma)?.is_none() {
                    break;
                }
                match p.slice_or_starred()? {
                    Some(elt) => elts.push(elt),
                    None => {
                        p.reset(inner);
                        p.expect(TokenKind::Comma)?;
                        break;
                    }
                }
            }
            Ok(Some(
                ExprTuple {
                    range: p.range_from(start),
                    elts,
                    ctx: ExprContext::Load,
                }
                .into(),
            ))
        })
    }

    fn slice_or_starred(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        if let Some(slice) = self.slice()? {
            return Ok(Some(slice));
        }
        self.reset(mark);
        self.starred_expression()
    }

    // slice: [expression] ':' [expression] [':' [expression]] | named_expression
    fn slice(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        let lower = self.expression()?;
        if self.expect(TokenKind::Colon)?.is_some() {
            let upper = self.expression()?;
            let step = if self.expect(TokenKind::Colon)?.is_some() {
                self.expression()?
            } else {
                None
            };
            return Ok(Some(
                ExprSlice {
                    range: self.range_from(start),
                    lower: lower.map(Box::new),
                    upper: upper.map(Box::new),
                    step: step.map(Box::new),
                }
                .into(),
            ));
        }
        self.reset(mark);
        self.named_expression()
    }

    // atom: NAME | 'True' | 'False' | 'None' | strings | NUMBER
    //   | (tuple | group | genexp) | (list | listcomp)
    //   | (dict | set | dictcomp | setcomp) | '...'
    fn atom(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::Atom, |p| p.with_recursion_guard(|p| p.atom_body()))
    }

    fn atom_body(&mut self) -> ParseResult<Option<Expr>> {
        let start = self.start_location()?;
        match self.peek_kind()? {
            TokenKind::Name => self.name_token(),
            TokenKind::True => {
                self.expect(TokenKind::True)?;
                Ok(Some(self.constant(start, Constant::Bool(true))))
            }
            TokenKind::False => {
                self.expect(TokenKind::False)?;
                Ok(Some(self.constant(start, Constant::Bool(false))))
            }
            TokenKind::None => {
                self.expect(TokenKind::None)?;
                Ok(Some(self.constant(start, Constant::None)))
            }
            TokenKind::Ellipsis => {
                self.expect(TokenKind::Ellipsis)?;
                Ok(Some(self.constant(start, Constant::Ellipsis)))
            }
            TokenKind::Number => self.number_token(),
            TokenKind::String | TokenKind::FStringStart => self.strings(),
            TokenKind::Lpar => {
                let mark = self.mark();
                if let Some(tuple) = self.tuple()? {
                    return Ok(Some(tuple));
                }
                self.reset(mark);
                if let Some(group) = self.group()? {
                    return Ok(Some(group));
                }
                self.reset(mark);
                if let Some(genexp) = self.genexp()? {
                    return Ok(Some(genexp));
                }
                self.reset(mark);
                Ok(None)
            }
            TokenKind::Lsqb => {
                let mark = self.mark();
                if let Some(list) = self.list()? {
                    return Ok(Some(list));
                }
                self.reset(mark);
                if let Some(listcomp) = self.listcomp()? {
                    return Ok(Some(listcomp));
                }
                self.reset(mark);
                Ok(None)
            }
            TokenKind::Lbrace => {
                let mark = self.mark();
                if let Some(dict) = self.dict()? {
                    return Ok(Some(dict));
                }
                self.reset(mark);
                if let Some(set) = self.set()? {
                    return Ok(Some(set));
                }
                self.reset(mark);
                if let Some(dictcomp) = self.dictcomp()? {
                    return Ok(Some(dictcomp));
                }
                self.reset(mark);
                if let Some(setcomp) = self.setcomp()? {
                    return Ok(Some(setcomp));
                }
                self.reset(mark);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn constant(&self, start: taipan_parser_core::Location, value: Constant) -> Expr {
        ExprConstant {
            range: self.range_from(start),
            value,
            kind: None,
        }
        .into()
    }

    /// NUMBER token to a Constant, with the underscore feature gate.
    pub(crate) fn number_token(&mut self) -> ParseResult<Option<Expr>> {
        let Some(token) = self.expect(TokenKind::Number)? else {
            return Ok(None);
        };
        if self.feature_version < 6 && token.text.contains('_') {
            return Err(self.syntax_error(
                "Underscores in numeric literals are only supported in Python 3.6 and greater",
            ));
        }
        match parse_number_literal(&token.text) {
            Ok(value) => Ok(Some(
                ExprConstant {
                    range: token.range,
                    value,
                    kind: None,
                }
                .into(),
            )),
            Err(msg) => Err(self.syntax_error_known_location(token.range, msg)),
        }
    }

    // strings (memo): (fstring | string)+
    pub(crate) fn strings(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::Strings, |p| {
            let start = p.start_location()?;
            let mut pieces = Vec::new();
            loop {
                match p.peek_kind()? {
                    TokenKind::String => {
                        let token = p.expect(TokenKind::String)?.expect("peeked");
                        pieces.push(parse_string_literal(p, &token)?);
                    }
                    TokenKind::FStringStart => {
                        let Some(fstring) = p.fstring()? else {
                            break;
                        };
                        pieces.push(fstring);
                    }
                    _ => break,
                }
            }
            if pieces.is_empty() {
                return Ok(None);
            }
            let range = p.range_from(start);
            concatenate_strings(p, pieces, range).map(Some)
        })
    }

    // fstring: FSTRING_START fstring_middle* FSTRING_END
    fn fstring(&mut self) -> ParseResult<Option<Expr>> {
        let Some(start_token) = self.expect(TokenKind::FStringStart)? else {
            return Ok(None);
        };
        self.check_version(
            6,
            "Format strings are",
            Some(()),
        )?;
        let mut parts = Vec::new();
        loop {
            match self.fstring_middle()? {
                Some(part) => parts.push(part),
                None => break,
            }
        }
        let end_token = self.expect_forced(TokenKind::FStringEnd, "}")?;
        joined_str(self, &start_token, parts, &end_token).map(Some)
    }

    // fstring_middle: fstring_replacement_field | FSTRING_MIDDLE
    fn fstring_middle(&mut self) -> ParseResult<Option<Expr>> {
        if let Some(token) = self.expect(TokenKind::FStringMiddle)? {
            return Ok(Some(
                ExprConstant {
                    range: token.range,
                    value: Constant::Str(token.text.to_string()),
                    kind: None,
                }
                .into(),
            ));
        }
        self.fstring_replacement_field()
    }

    // fstring_replacement_field:
    //   '{' annotated_rhs '='? [fstring_conversion] [fstring_full_format_spec] '}'
    fn fstring_replacement_field(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        let Some(_lbrace) = self.expect(TokenKind::Lbrace)? else {
            return Ok(None);
        };
        let Some(value) = self.annotated_rhs()? else {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self
                    .syntax_error_on_next_token("f-string: expecting a valid expression after '{'"));
            }
            return Ok(None);
        };
        let debug = self.expect(TokenKind::Equal)?;
        if debug.is_some() {
            self.check_version(8, "Self-documenting expressions are", Some(()))?;
        }
        let conversion = self.fstring_conversion()?;
        let format_spec = self.fstring_full_format_spec()?;
        let Some(rbrace) = self.expect(TokenKind::Rbrace)? else {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(
                    self.syntax_error_on_next_token("f-string: expecting '}'")
                );
            }
            return Ok(None);
        };
        let range = SourceRange::new(start, rbrace.range.end);
        formatted_value(
            self,
            value,
            debug.as_ref(),
            conversion.as_ref(),
            format_spec.as_ref(),
            &rbrace,
            range,
        )
        .map(Some)
    }

    // fstring_conversion: '!' NAME
    fn fstring_conversion(&mut self) -> ParseResult<Option<ResultTokenWithMetadata>> {
        let mark = self.mark();
        let Some(bang) = self.expect(TokenKind::Exclamation)? else {
            return Ok(None);
        };
        let Some(conv) = self.name_token()? else {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_on_next_token(
                    "f-string: missing conversion character",
                ));
            }
            return Ok(None);
        };
        check_fstring_conversion(self, &bang, conv).map(Some)
    }

    // fstring_full_format_spec: ':' fstring_format_spec*
    fn fstring_full_format_spec(&mut self) -> ParseResult<Option<ResultTokenWithMetadata>> {
        let start = self.start_location()?;
        let Some(colon) = self.expect(TokenKind::Colon)? else {
            return Ok(None);
        };
        let mut spec = Vec::new();
        loop {
            match self.fstring_format_spec()? {
                Some(part) => spec.push(part),
                None => break,
            }
        }
        let range = self.range_from(start);
        setup_full_format_spec(self, &colon, spec, range).map(Some)
    }

    // fstring_format_spec: FSTRING_MIDDLE | fstring_replacement_field
    fn fstring_format_spec(&mut self) -> ParseResult<Option<Expr>> {
        if let Some(token) = self.expect(TokenKind::FStringMiddle)? {
            let decoded = if memchr::memchr(b'\\', token.text.as_bytes()).is_none() {
                token.text.to_string()
            } else {
                crate::string::decode_str_escapes(self, &token.text, token.range)?
            };
            return Ok(Some(
                ExprConstant {
                    range: token.range,
                    value: Constant::Str(decoded),
                    kind: None,
                }
                .into(),
            ));
        }
        self.fstring_replacement_field()
    }

    // annotated_rhs: yield_expr | star_expressions
    pub(crate) fn annotated_rhs(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        if let Some(value) = self.yield_expr()? {
            return Ok(Some(value));
        }
        self.reset(mark);
        self.star_expressions()
    }

    // lambdef: 'lambda' [lambda_params] ':' expression
    fn lambdef(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize(Rule::Lambdef, |p| {
            let mark = p.mark();
            let start = p.start_location()?;
            if p.expect(TokenKind::Lambda)?.is_none() {
                return Ok(None);
            }
            let params_start = p.start_location()?;
            let args = match p.lambda_params()? {
                Some(args) => args,
                None => taipan_ast::Arguments::empty(SourceRange::from(params_start)),
            };
            if p.expect(TokenKind::Colon)?.is_none() {
                p.reset(mark);
                if p.call_invalid_rules {
                    return Err(p.syntax_error_on_next_token("expected ':' after lambda parameters"));
                }
                return Ok(None);
            }
            let Some(body) = p.expression()? else {
                p.reset(mark);
                return Ok(None);
            };
            Ok(Some(
                ExprLambda {
                    range: p.range_from(start),
                    args: Box::new(args),
                    body: Box::new(body),
                }
                .into(),
            ))
        })
    }

    // group: '(' (yield_expr | named_expression) ')'
    fn group(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        if self.expect(TokenKind::Lpar)?.is_none() {
            return Ok(None);
        }
        let inner = {
            let inner_mark = self.mark();
            match self.yield_expr()? {
                Some(expr) => Some(expr),
                None => {
                    self.reset(inner_mark);
                    self.named_expression()?
                }
            }
        };
        if let Some(inner) = inner {
            if self.expect(TokenKind::Rpar)?.is_some() {
                return Ok(Some(inner));
            }
        }
        self.reset(mark);
        if self.call_invalid_rules {
            self.invalid_group()?;
        }
        Ok(None)
    }

    // invalid_group: '(' starred_expression ')' | '(' '**' expression ')'
    fn invalid_group(&mut self) -> ParseResult<()> {
        let mark = self.mark();
        if self.expect(TokenKind::Lpar)?.is_some() {
            if let Some(starred) = self.starred_expression()? {
                if self.expect(TokenKind::Rpar)?.is_some() {
                    return Err(self.syntax_error_known_location(
                        starred.range(),
                        "cannot use starred expression here",
                    ));
                }
            }
        }
        self.reset(mark);
        if self.expect(TokenKind::Lpar)?.is_some() {
            if let Some(star_star) = self.expect(TokenKind::DoubleStar)? {
                if let Some(value) = self.expression()? {
                    if self.expect(TokenKind::Rpar)?.is_some() {
                        return Err(self.syntax_error_known_range(
                            star_star.range,
                            value.range(),
                            "cannot use double starred expression here",
                        ));
                    }
                }
            }
        }
        self.reset(mark);
        Ok(())
    }

    // tuple: '(' [star_named_expression ',' [star_named_expressions]] ')'
    fn tuple(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Lpar)?.is_none() {
            return Ok(None);
        }
        let mut elts = Vec::new();
        if let Some(first) = self.star_named_expression()? {
            if self.expect(TokenKind::Comma)?.is_none() {
                self.reset(mark);
                return Ok(None);
            }
            elts.push(first);
            if let Some(rest) = self.star_named_expressions()? {
                elts.extend(rest);
            }
        }
        if self.expect(TokenKind::Rpar)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        Ok(Some(
            ExprTuple {
                range: self.range_from(start),
                elts,
                ctx: ExprContext::Load,
            }
            .into(),
        ))
    }

    // list: '[' [star_named_expressions] ']'
    fn list(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Lsqb)?.is_none() {
            return Ok(None);
        }
        let elts = self.star_named_expressions()?.unwrap_or_default();
        if self.expect(TokenKind::Rsqb)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        Ok(Some(
            ExprList {
                range: self.range_from(start),
                elts,
                ctx: ExprContext::Load,
            }
            .into(),
        ))
    }

    // listcomp: '[' named_expression for_if_clauses ']' | invalid_comprehension
    fn listcomp(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Lsqb)?.is_some() {
            if let Some(elt) = self.named_expression()? {
                if let Some(generators) = self.for_if_clauses()? {
                    if self.expect(TokenKind::Rsqb)?.is_some() {
                        return Ok(Some(
                            ExprListComp {
                                range: self.range_from(start),
                                elt: Box::new(elt),
                                generators,
                            }
                            .into(),
                        ));
                    }
                }
            }
        }
        self.reset(mark);
        if self.call_invalid_rules {
            self.invalid_comprehension(TokenKind::Lsqb)?;
        }
        Ok(None)
    }

    // genexp: '(' (assignment_expression | expression !':=') for_if_clauses ')'
    pub(crate) fn genexp(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Lpar)?.is_some() {
            if let Some(elt) = self.genexp_element()? {
                if let Some(generators) = self.for_if_clauses()? {
                    if self.expect(TokenKind::Rpar)?.is_some() {
                        return Ok(Some(
                            ExprGeneratorExp {
                                range: self.range_from(start),
                                elt: Box::new(elt),
                                generators,
                            }
                            .into(),
                        ));
                    }
                }
            }
        }
        self.reset(mark);
        if self.call_invalid_rules {
            self.invalid_comprehension(TokenKind::Lpar)?;
        }
        Ok(None)
    }

    fn genexp_element(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        if let Some(expr) = self.assignment_expression()? {
            return Ok(Some(expr));
        }
        self.reset(mark);
        if let Some(expr) = self.expression()? {
            if !self.lookahead_kind(true, TokenKind::ColonEqual)? {
                return Ok(Some(expr));
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // set: '{' star_named_expressions '}'
    fn set(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Lbrace)?.is_some() {
            if let Some(elts) = self.star_named_expressions()? {
                if self.expect(TokenKind::Rbrace)?.is_some() {
                    return Ok(Some(
                        ExprSet {
                            range: self.range_from(start),
                            elts,
                        }
                        .into(),
                    ));
                }
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // setcomp: '{' named_expression for_if_clauses '}' | invalid_comprehension
    fn setcomp(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Lbrace)?.is_some() {
            if let Some(elt) = self.named_expression()? {
                if let Some(generators) = self.for_if_clauses()? {
                    if self.expect(TokenKind::Rbrace)?.is_some() {
                        return Ok(Some(
                            ExprSetComp {
                                range: self.range_from(start),
                                elt: Box::new(elt),
                                generators,
                            }
                            .into(),
                        ));
                    }
                }
            }
        }
        self.reset(mark);
        if self.call_invalid_rules {
            self.invalid_comprehension(TokenKind::Lbrace)?;
        }
        Ok(None)
    }

    // dict: '{' [double_starred_kvpairs] '}'
    fn dict(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Lbrace)?.is_some() {
            let pairs = self.double_starred_kvpairs()?.unwrap_or_default();
            if self.expect(TokenKind::Rbrace)?.is_some() {
                let keys = get_keys(&pairs);
                let values = get_values(pairs);
                return Ok(Some(
                    ExprDict {
                        range: self.range_from(start),
                        keys,
                        values,
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // dictcomp: '{' kvpair for_if_clauses '}' | invalid_dict_comprehension
    fn dictcomp(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Lbrace)?.is_some() {
            if let Some(pair) = self.kvpair()? {
                if let Some(generators) = self.for_if_clauses()? {
                    if self.expect(TokenKind::Rbrace)?.is_some() {
                        let (Some(key), value) = (pair.key, pair.value) else {
                            unreachable!("kvpair always carries a key");
                        };
                        return Ok(Some(
                            ExprDictComp {
                                range: self.range_from(start),
                                key: Box::new(key),
                                value: Box::new(value),
                                generators,
                            }
                            .into(),
                        ));
                    }
                }
            }
        }
        self.reset(mark);
        if self.call_invalid_rules {
            self.invalid_dict_comprehension()?;
        }
        Ok(None)
    }

    // invalid_dict_comprehension: '{' '**' bitwise_or for_if_clauses '}'
    fn invalid_dict_comprehension(&mut self) -> ParseResult<()> {
        let mark = self.mark();
        if self.expect(TokenKind::Lbrace)?.is_some() {
            if let Some(star_star) = self.expect(TokenKind::DoubleStar)? {
                if self.bitwise_or()?.is_some()
                    && self.for_if_clauses()?.is_some()
                    && self.expect(TokenKind::Rbrace)?.is_some()
                {
                    return Err(self.syntax_error_known_location(
                        star_star.range,
                        "dict unpacking cannot be used in dict comprehension",
                    ));
                }
            }
        }
        self.reset(mark);
        Ok(())
    }

    // double_starred_kvpairs: ','.double_starred_kvpair+ [',']
    fn double_starred_kvpairs(&mut self) -> ParseResult<Option<Vec<KeyValuePair>>> {
        let Some(first) = self.double_starred_kvpair()? else {
            return Ok(None);
        };
        let mut pairs = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.double_starred_kvpair()? {
                Some(pair) => pairs.push(pair),
                None => {
                    self.reset(mark);
                    self.expect(TokenKind::Comma)?;
                    break;
                }
            }
        }
        Ok(Some(pairs))
    }

    // double_starred_kvpair: '**' bitwise_or | kvpair
    fn double_starred_kvpair(&mut self) -> ParseResult<Option<KeyValuePair>> {
        let mark = self.mark();
        if self.expect(TokenKind::DoubleStar)?.is_some() {
            if let Some(value) = self.bitwise_or()? {
                return Ok(Some(KeyValuePair { key: None, value }));
            }
        }
        self.reset(mark);
        self.kvpair()
    }

    // kvpair: expression ':' expression
    fn kvpair(&mut self) -> ParseResult<Option<KeyValuePair>> {
        let mark = self.mark();
        if let Some(key) = self.expression()? {
            if self.expect(TokenKind::Colon)?.is_some() {
                if let Some(value) = self.expression()? {
                    return Ok(Some(KeyValuePair {
                        key: Some(key),
                        value,
                    }));
                }
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // for_if_clauses: for_if_clause+
    pub(crate) fn for_if_clauses(&mut self) -> ParseResult<Option<Vec<Comprehension>>> {
        let Some(first) = self.for_if_clause()? else {
            return Ok(None);
        };
        let mut clauses = vec![first];
        loop {
            let mark = self.mark();
            match self.for_if_clause()? {
                Some(clause) => clauses.push(clause),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        Ok(Some(clauses))
    }

    // for_if_clause:
    //   ['async'] 'for' star_targets 'in' ~ disjunction ('if' disjunction)*
    fn for_if_clause(&mut self) -> ParseResult<Option<Comprehension>> {
        let mark = self.mark();
        let start = self.start_location()?;
        let is_async = self.expect(TokenKind::Async)?.is_some();
        if self.expect(TokenKind::For)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        let Some(target) = self.star_targets()? else {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_on_next_token("invalid syntax"));
            }
            return Ok(None);
        };
        if self.expect(TokenKind::In)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_starting_from(
                    SourceRange::from(start),
                    "'in' expected after for-loop variables",
                ));
            }
            return Ok(None);
        }
        // Cut: after 'in', this clause can no longer backtrack.
        let Some(iter) = self.disjunction()? else {
            self.reset(mark);
            return Ok(None);
        };
        let mut ifs = Vec::new();
        loop {
            let inner = self.mark();
            if self.expect(TokenKind::If)?.is_none() {
                break;
            }
            match self.disjunction()? {
                Some(cond) => ifs.push(cond),
                None => {
                    self.reset(inner);
                    break;
                }
            }
        }
        Ok(Some(Comprehension {
            range: self.range_from(start),
            target,
            iter,
            ifs,
            is_async,
        }))
    }

    // invalid_comprehension:
    //   ('[' | '(' | '{') starred_expression for_if_clauses
    fn invalid_comprehension(&mut self, open: TokenKind) -> ParseResult<()> {
        let mark = self.mark();
        if self.expect(open)?.is_some() {
            if let Some(starred) = self.starred_expression()? {
                if self.for_if_clauses()?.is_some() {
                    return Err(self.syntax_error_known_location(
                        starred.range(),
                        "iterable unpacking cannot be used in comprehension",
                    ));
                }
            }
        }
        self.reset(mark);
        Ok(())
    }

    // starred_expression: '*' expression
    pub(crate) fn starred_expression(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(star) = self.expect(TokenKind::Star)? {
            if let Some(value) = self.expression()? {
                return Ok(Some(
                    ExprStarred {
                        range: self.range_from(start),
                        value: Box::new(value),
                        ctx: ExprContext::Load,
                    }
                    .into(),
                ));
            }
            if self.call_invalid_rules {
                return Err(self.syntax_error_known_location(
                    star.range,
                    "invalid syntax",
                ));
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // --- call arguments ---------------------------------------------------

    // arguments (memo): args [','] &')' | invalid_arguments
    pub(crate) fn arguments(&mut self) -> ParseResult<Option<(Vec<Expr>, Vec<Keyword>)>> {
        self.memoize(Rule::Arguments, |p| {
            let mark = p.mark();
            if let Some(result) = p.args()? {
                p.expect(TokenKind::Comma)?;
                if p.lookahead_kind(true, TokenKind::Rpar)? {
                    return Ok(Some(result));
                }
            }
            p.reset(mark);
            if p.call_invalid_rules {
                p.invalid_arguments()?;
            }
            Ok(None)
        })
    }

    // args:
    //   ','.(starred_expression | (assignment_expression | expression !':=') !'=')+
    //     [',' kwargs]
    //   | kwargs
    fn args(&mut self) -> ParseResult<Option<(Vec<Expr>, Vec<Keyword>)>> {
        let mark = self.mark();
        let mut positional = Vec::new();
        loop {
            let item_mark = self.mark();
            if !positional.is_empty() && self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.arg_element()? {
                Some(arg) => positional.push(arg),
                None => {
                    self.reset(item_mark);
                    break;
                }
            }
        }
        if positional.is_empty() {
            self.reset(mark);
            let Some(tail) = self.kwargs()? else {
                return Ok(None);
            };
            let args = seq_extract_starred_exprs(&tail);
            let keywords = seq_delete_starred_exprs(tail);
            return Ok(Some((args, keywords)));
        }
        let tail_mark = self.mark();
        if self.expect(TokenKind::Comma)?.is_some() {
            if let Some(tail) = self.kwargs()? {
                positional.extend(seq_extract_starred_exprs(&tail));
                let keywords = seq_delete_starred_exprs(tail);
                return Ok(Some((positional, keywords)));
            }
        }
        self.reset(tail_mark);
        Ok(Some((positional, Vec::new())))
    }

    fn arg_element(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        if let Some(starred) = self.starred_expression()? {
            return Ok(Some(starred));
        }
        self.reset(mark);
        if let Some(expr) = self.genexp_element()? {
            if !self.lookahead_kind(true, TokenKind::Equal)? {
                return Ok(Some(expr));
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // kwargs: the comma-joined keyword and double-starred tails. Iterable
    // unpacking may not follow keyword unpacking, so the list stops in
    // front of a `*item` once a `**` entry has been seen; the enclosing
    // arguments rule then fails and diagnoses it.
    fn kwargs(&mut self) -> ParseResult<Option<Vec<KeywordOrStarred>>> {
        let Some(first) = self.kwarg_or_starred()? else {
            return Ok(None);
        };
        let mut double_star_seen = matches!(&first, KeywordOrStarred::Keyword(kw) if kw.arg.is_none());
        let mut items = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.kwarg_or_starred()? {
                Some(KeywordOrStarred::Starred(_)) if double_star_seen => {
                    self.reset(mark);
                    break;
                }
                Some(item) => {
                    if matches!(&item, KeywordOrStarred::Keyword(kw) if kw.arg.is_none()) {
                        double_star_seen = true;
                    }
                    items.push(item);
                }
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        Ok(Some(items))
    }

    // kwarg_or_starred: NAME '=' expression | starred_expression
    // kwarg_or_double_starred additionally accepts '**' expression; after
    // the first '**' both shapes stay legal, so one rule serves both.
    fn kwarg_or_starred(&mut self) -> ParseResult<Option<KeywordOrStarred>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(name) = self.expect(TokenKind::Name)? {
            if self.expect(TokenKind::Equal)?.is_some() {
                if let Some(value) = self.expression()? {
                    let arg = self.new_identifier(&name.text, name.range)?;
                    return Ok(Some(KeywordOrStarred::Keyword(Keyword {
                        range: self.range_from(start),
                        arg: Some(arg),
                        value,
                    })));
                }
            }
        }
        self.reset(mark);
        if self.expect(TokenKind::DoubleStar)?.is_some() {
            if let Some(value) = self.expression()? {
                return Ok(Some(KeywordOrStarred::Keyword(Keyword {
                    range: self.range_from(start),
                    arg: None,
                    value,
                })));
            }
        }
        self.reset(mark);
        if let Some(starred) = self.starred_expression()? {
            return Ok(Some(KeywordOrStarred::Starred(starred)));
        }
        self.reset(mark);
        if self.call_invalid_rules {
            self.invalid_kwarg()?;
        }
        Ok(None)
    }

    fn invalid_kwarg(&mut self) -> ParseResult<()> {
        let mark = self.mark();
        // ('True' | 'False' | 'None') '='
        let literal = match self.peek_kind()? {
            TokenKind::True | TokenKind::False | TokenKind::None => {
                let kind = self.peek_kind()?;
                self.expect(kind)?
            }
            _ => None,
        };
        if let Some(literal) = literal {
            if let Some(eq) = self.expect(TokenKind::Equal)? {
                let text = literal.text.to_string();
                return Err(self.syntax_error_known_range(
                    literal.range,
                    eq.range,
                    format!("cannot assign to {text}"),
                ));
            }
        }
        self.reset(mark);
        // NAME '=' expression for_if_clauses
        if self.expect(TokenKind::Name)?.is_some() && self.expect(TokenKind::Equal)?.is_some() {
            if self.without_invalid(|p| p.expression())?.is_some()
                && self.for_if_clauses()?.is_some()
            {
                return Err(self.syntax_error(
                    "invalid syntax. Maybe you meant '==' or ':=' instead of '='?",
                ));
            }
        }
        self.reset(mark);
        // !(NAME '=') expression '='
        let named = self.lookahead(true, |p| {
            if p.expect(TokenKind::Name)?.is_some() && p.expect(TokenKind::Equal)?.is_some() {
                Ok(Some(()))
            } else {
                Ok(None)
            }
        })?;
        if !named {
            if let Some(expr) = self.without_invalid(|p| p.expression())? {
                if let Some(eq) = self.expect(TokenKind::Equal)? {
                    return Err(self.syntax_error_known_range(
                        expr.range(),
                        eq.range,
                        "expression cannot contain assignment, perhaps you meant \"==\"?",
                    ));
                }
            }
        }
        self.reset(mark);
        Ok(())
    }

    // invalid_arguments (subset): the unparenthesized-generator and
    // positional-after-keyword diagnoses.
    fn invalid_arguments(&mut self) -> ParseResult<()> {
        let mark = self.mark();
        // args for_if_clauses: a bare generator next to other arguments.
        if let Some((args, _keywords)) = self.args()? {
            if let Some(comprehensions) = self.for_if_clauses()? {
                if args.len() > 1 {
                    let last_arg = args.last().expect("length checked").range();
                    let last_item = get_last_comprehension_item(
                        comprehensions.last().expect("one clause parsed"),
                    );
                    return Err(self.syntax_error_known_range(
                        last_arg,
                        last_item,
                        "Generator expression must be parenthesized",
                    ));
                }
            }
        }
        self.reset(mark);
        // args ',' '*' expression after keyword unpacking.
        if let Some((_args, keywords)) = self.args()? {
            if keywords.iter().any(|kw| kw.arg.is_none())
                && self.expect(TokenKind::Comma)?.is_some()
                && self.without_invalid(|p| p.starred_expression())?.is_some()
            {
                return Err(self.syntax_error(
                    "iterable argument unpacking follows keyword argument unpacking",
                ));
            }
        }
        self.reset(mark);
        // args ',' expression: a positional argument after keywords.
        if let Some((_args, keywords)) = self.args()? {
            if !keywords.is_empty()
                && self.expect(TokenKind::Comma)?.is_some()
                && self.without_invalid(|p| p.expression())?.is_some()
            {
                let unpacking = keywords.iter().any(|kw| kw.arg.is_none());
                let msg = if unpacking {
                    "positional argument follows keyword argument unpacking"
                } else {
                    "positional argument follows keyword argument"
                };
                return Err(self.syntax_error(msg));
            }
        }
        self.reset(mark);
        Ok(())
    }

    // --- targets ----------------------------------------------------------

    // star_targets: star_target !',' | star_target (',' star_target)* [',']
    pub(crate) fn star_targets(&mut self) -> ParseResult<Option<Expr>> {
        let start = self.start_location()?;
        let Some(first) = self.star_target()? else {
            return Ok(None);
        };
        if !self.lookahead_kind(true, TokenKind::Comma)? {
            return Ok(Some(first));
        }
        let mut elts = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.star_target()? {
                Some(elt) => elts.push(elt),
                None => {
                    self.reset(mark);
                    self.expect(TokenKind::Comma)?;
                    break;
                }
            }
        }
        Ok(Some(
            ExprTuple {
                range: self.range_from(start),
                elts,
                ctx: ExprContext::Store,
            }
            .into(),
        ))
    }

    // star_targets_list_seq: ','.star_target+ [',']
    fn star_targets_seq(&mut self) -> ParseResult<Option<Vec<Expr>>> {
        let Some(first) = self.star_target()? else {
            return Ok(None);
        };
        let mut elts = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.star_target()? {
                Some(elt) => elts.push(elt),
                None => {
                    self.reset(mark);
                    self.expect(TokenKind::Comma)?;
                    break;
                }
            }
        }
        Ok(Some(elts))
    }

    // star_target (memo): '*' (!'*' star_target) | target_with_star_atom
    pub(crate) fn star_target(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Star)?.is_some() {
            if !self.lookahead_kind(true, TokenKind::Star)? {
                if let Some(target) = self.star_target()? {
                    let target = set_expr_context(target, ExprContext::Store);
                    return Ok(Some(
                        ExprStarred {
                            range: self.range_from(start),
                            value: Box::new(target),
                            ctx: ExprContext::Store,
                        }
                        .into(),
                    ));
                }
            }
        }
        self.reset(mark);
        self.target_with_star_atom()
    }

    // target_with_star_atom:
    //   t_primary '.' NAME !t_lookahead | t_primary '[' slices ']' !t_lookahead
    //   | star_atom
    fn target_with_star_atom(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(value) = self.t_primary()? {
            if self.expect(TokenKind::Dot)?.is_some() {
                if let Some(name) = self.expect(TokenKind::Name)? {
                    if !self.t_lookahead()? {
                        let attr = self.new_identifier(&name.text, name.range)?;
                        return Ok(Some(
                            ExprAttribute {
                                range: self.range_from(start),
                                value: Box::new(value),
                                attr,
                                ctx: ExprContext::Store,
                            }
                            .into(),
                        ));
                    }
                }
            }
            self.reset(mark);
        }
        if let Some(value) = self.t_primary()? {
            if self.expect(TokenKind::Lsqb)?.is_some() {
                if let Some(slice) = self.slices()? {
                    if self.expect(TokenKind::Rsqb)?.is_some() && !self.t_lookahead()? {
                        return Ok(Some(
                            ExprSubscript {
                                range: self.range_from(start),
                                value: Box::new(value),
                                slice: Box::new(slice),
                                ctx: ExprContext::Store,
                            }
                            .into(),
                        ));
                    }
                }
            }
        }
        self.reset(mark);
        self.star_atom()
    }

    // star_atom:
    //   NAME | '(' target_with_star_atom ')' | '(' [star_targets_tuple_seq] ')'
    //   | '[' [star_targets_list_seq] ']'
    fn star_atom(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(name) = self.name_token()? {
            return Ok(Some(set_expr_context(name, ExprContext::Store)));
        }
        self.reset(mark);
        if self.expect(TokenKind::Lpar)?.is_some() {
            if let Some(target) = self.target_with_star_atom()? {
                if self.expect(TokenKind::Rpar)?.is_some() {
                    return Ok(Some(set_expr_context(target, ExprContext::Store)));
                }
            }
            self.reset(mark);
            self.expect(TokenKind::Lpar)?;
            let elts = self.star_targets_seq()?.unwrap_or_default();
            if self.expect(TokenKind::Rpar)?.is_some() {
                return Ok(Some(
                    ExprTuple {
                        range: self.range_from(start),
                        elts,
                        ctx: ExprContext::Store,
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        if self.expect(TokenKind::Lsqb)?.is_some() {
            let elts = self.star_targets_seq()?.unwrap_or_default();
            if self.expect(TokenKind::Rsqb)?.is_some() {
                return Ok(Some(
                    ExprList {
                        range: self.range_from(start),
                        elts,
                        ctx: ExprContext::Store,
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // single_target: single_subscript_attribute_target | NAME | '(' single_target ')'
    pub(crate) fn single_target(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        if let Some(target) = self.single_subscript_attribute_target()? {
            return Ok(Some(target));
        }
        self.reset(mark);
        if let Some(name) = self.name_token()? {
            return Ok(Some(set_expr_context(name, ExprContext::Store)));
        }
        self.reset(mark);
        if self.expect(TokenKind::Lpar)?.is_some() {
            if let Some(target) = self.single_target()? {
                if self.expect(TokenKind::Rpar)?.is_some() {
                    return Ok(Some(target));
                }
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // single_subscript_attribute_target:
    //   t_primary '.' NAME !t_lookahead | t_primary '[' slices ']' !t_lookahead
    pub(crate) fn single_subscript_attribute_target(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(value) = self.t_primary()? {
            if self.expect(TokenKind::Dot)?.is_some() {
                if let Some(name) = self.expect(TokenKind::Name)? {
                    if !self.t_lookahead()? {
                        let attr = self.new_identifier(&name.text, name.range)?;
                        return Ok(Some(
                            ExprAttribute {
                                range: self.range_from(start),
                                value: Box::new(value),
                                attr,
                                ctx: ExprContext::Store,
                            }
                            .into(),
                        ));
                    }
                }
            }
            self.reset(mark);
        }
        if let Some(value) = self.t_primary()? {
            if self.expect(TokenKind::Lsqb)?.is_some() {
                if let Some(slice) = self.slices()? {
                    if self.expect(TokenKind::Rsqb)?.is_some() && !self.t_lookahead()? {
                        return Ok(Some(
                            ExprSubscript {
                                range: self.range_from(start),
                                value: Box::new(value),
                                slice: Box::new(slice),
                                ctx: ExprContext::Store,
                            }
                            .into(),
                        ));
                    }
                }
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // t_primary (left-recursive): the target-position primary, which only
    // matches when more trailer follows.
    fn t_primary(&mut self) -> ParseResult<Option<Expr>> {
        self.memoize_left_rec(Rule::TPrimary, |p| p.t_primary_body())
    }

    fn t_primary_body(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(value) = self.t_primary()? {
            let after_left = self.mark();

            if self.expect(TokenKind::Dot)?.is_some() {
                if let Some(name) = self.expect(TokenKind::Name)? {
                    if self.t_lookahead()? {
                        let attr = self.new_identifier(&name.text, name.range)?;
                        return Ok(Some(
                            ExprAttribute {
                                range: self.range_from(start),
                                value: Box::new(value),
                                attr,
                                ctx: ExprContext::Load,
                            }
                            .into(),
                        ));
                    }
                }
            }
            self.reset(after_left);

            if self.expect(TokenKind::Lsqb)?.is_some() {
                if let Some(slice) = self.slices()? {
                    if self.expect(TokenKind::Rsqb)?.is_some() && self.t_lookahead()? {
                        return Ok(Some(
                            ExprSubscript {
                                range: self.range_from(start),
                                value: Box::new(value),
                                slice: Box::new(slice),
                                ctx: ExprContext::Load,
                            }
                            .into(),
                        ));
                    }
                }
            }
            self.reset(after_left);

            if let Some(genexp) = self.genexp()? {
                if self.t_lookahead()? {
                    return Ok(Some(
                        ExprCall {
                            range: self.range_from(start),
                            func: Box::new(value),
                            args: vec![genexp],
                            keywords: vec![],
                        }
                        .into(),
                    ));
                }
            }
            self.reset(after_left);

            if self.expect(TokenKind::Lpar)?.is_some() {
                let arguments = self.arguments()?.unwrap_or_default();
                if self.expect(TokenKind::Rpar)?.is_some() && self.t_lookahead()? {
                    let (args, keywords) = arguments;
                    return Ok(Some(
                        ExprCall {
                            range: self.range_from(start),
                            func: Box::new(value),
                            args,
                            keywords,
                        }
                        .into(),
                    ));
                }
            }
        }
        self.reset(mark);
        if let Some(atom) = self.atom()? {
            if self.t_lookahead()? {
                return Ok(Some(atom));
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // t_lookahead: &('(' | '[' | '.')
    fn t_lookahead(&mut self) -> ParseResult<bool> {
        Ok(matches!(
            self.peek_kind()?,
            TokenKind::Lpar | TokenKind::Lsqb | TokenKind::Dot
        ))
    }

    // del_targets: ','.del_target+ [',']
    pub(crate) fn del_targets(&mut self) -> ParseResult<Option<Vec<Expr>>> {
        let Some(first) = self.del_target()? else {
            return Ok(None);
        };
        let mut targets = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.del_target()? {
                Some(target) => targets.push(target),
                None => {
                    self.reset(mark);
                    self.expect(TokenKind::Comma)?;
                    break;
                }
            }
        }
        Ok(Some(targets))
    }

    // del_target (memo-shape):
    //   t_primary '.' NAME !t_lookahead | t_primary '[' slices ']' !t_lookahead
    //   | del_t_atom
    fn del_target(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(value) = self.t_primary()? {
            if self.expect(TokenKind::Dot)?.is_some() {
                if let Some(name) = self.expect(TokenKind::Name)? {
                    if !self.t_lookahead()? {
                        let attr = self.new_identifier(&name.text, name.range)?;
                        return Ok(Some(
                            ExprAttribute {
                                range: self.range_from(start),
                                value: Box::new(value),
                                attr,
                                ctx: ExprContext::Del,
                            }
                            .into(),
                        ));
                    }
                }
            }
            self.reset(mark);
        }
        if let Some(value) = self.t_primary()? {
            if self.expect(TokenKind::Lsqb)?.is_some() {
                if let Some(slice) = self.slices()? {
                    if self.expect(TokenKind::Rsqb)?.is_some() && !self.t_lookahead()? {
                        return Ok(Some(
                            ExprSubscript {
                                range: self.range_from(start),
                                value: Box::new(value),
                                slice: Box::new(slice),
                                ctx: ExprContext::Del,
                            }
                            .into(),
                        ));
                    }
                }
            }
        }
        self.reset(mark);
        self.del_t_atom()
    }

    // del_t_atom: NAME | '(' del_target ')' | '(' [del_targets] ')' | '[' [del_targets] ']'
    fn del_t_atom(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(name) = self.name_token()? {
            return Ok(Some(set_expr_context(name, ExprContext::Del)));
        }
        self.reset(mark);
        if self.expect(TokenKind::Lpar)?.is_some() {
            if let Some(target) = self.del_target()? {
                if self.expect(TokenKind::Rpar)?.is_some() {
                    return Ok(Some(set_expr_context(target, ExprContext::Del)));
                }
            }
            self.reset(mark);
            self.expect(TokenKind::Lpar)?;
            let targets = self.del_targets()?.unwrap_or_default();
            if self.expect(TokenKind::Rpar)?.is_some() {
                return Ok(Some(
                    ExprTuple {
                        range: self.range_from(start),
                        elts: targets,
                        ctx: ExprContext::Del,
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        if self.expect(TokenKind::Lsqb)?.is_some() {
            let targets = self.del_targets()?.unwrap_or_default();
            if self.expect(TokenKind::Rsqb)?.is_some() {
                return Ok(Some(
                    ExprList {
                        range: self.range_from(start),
                        elts: targets,
                        ctx: ExprContext::Del,
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);
        Ok(None)
    }

    /// Raises "cannot assign to ..." / "cannot delete ..." when the parsed
    /// expression cannot be a target of the requested kind; the innermost
    /// offending sub-expression provides both the label and the location.
    pub(crate) fn raise_invalid_target(
        &mut self,
        kind: TargetsKind,
        expr: &Expr,
    ) -> ParseResult<()> {
        let Some(invalid) = get_invalid_target(expr, kind) else {
            return Ok(());
        };
        let msg = match kind {
            TargetsKind::StarTargets | TargetsKind::ForTargets => "cannot assign to",
            TargetsKind::DelTargets => "cannot delete",
        };
        let range = invalid.range();
        let name = invalid.name();
        Err(self.syntax_error_known_location(range, format!("{msg} {name}")))
    }
}
