//! Statement rules and the per-mode start rules.

use taipan_ast::{
    Alias, Arg, Arguments, Expr, ExprContext, Located, Mod, ModExpression, ModFunctionType,
    ModInteractive, ModModule, Operator, Stmt, StmtAnnAssign, StmtAssert, StmtAssign,
    StmtAsyncFor, StmtAsyncFunctionDef, StmtAsyncWith, StmtAugAssign, StmtBreak, StmtClassDef,
    StmtContinue, StmtDelete, StmtExpr, StmtFor, StmtFunctionDef, StmtGlobal, StmtIf, StmtImport,
    StmtImportFrom, StmtNonlocal, StmtPass, StmtRaise, StmtReturn, StmtTry, StmtTryStar,
    StmtTypeAlias, StmtWhile, StmtWith, Identifier, TypeParam, TypeParamParamSpec,
    TypeParamTypeVar, TypeParamTypeVarTuple, WithItem,
};
use taipan_parser_core::{Mode, ParserFlags, SourceRange};

use crate::context::set_expr_context;
use crate::helpers::{
    add_type_comment_to_arg, alias_for_star, class_def_decorators, function_def_decorators,
    join_names_with_dot, make_arguments, new_type_comment, seq_count_dots, NameDefaultPair,
    SlashWithDefault, StarEtc,
};
use crate::token::TokenKind;

use super::{ParseResult, Parser, Rule, TargetsKind};

/// Whether a parameter list belongs to a `def` or a `lambda`; lambdas take
/// no annotations and close with `:` instead of `)`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ParamStyle {
    Function,
    Lambda,
}

impl ParamStyle {
    const fn terminator(self) -> TokenKind {
        match self {
            ParamStyle::Function => TokenKind::Rpar,
            ParamStyle::Lambda => TokenKind::Colon,
        }
    }
}

impl Parser<'_> {
    /// The start rule selected by the parse mode.
    pub(crate) fn parse_start(&mut self) -> ParseResult<Option<Mod>> {
        match self.mode {
            Mode::Module => self.file_rule(),
            Mode::Interactive => self.interactive_rule(),
            Mode::Expression => self.eval_rule(),
            Mode::FStringInput => self.fstring_input_rule(),
            Mode::FunctionType => self.func_type_rule(),
        }
    }

    // file: [statements] ENDMARKER
    fn file_rule(&mut self) -> ParseResult<Option<Mod>> {
        let start = self.start_location()?;
        let body = self.statements()?;
        if self.expect(TokenKind::EndMarker)?.is_none() {
            return Ok(None);
        }
        let type_ignores = self.type_ignores();
        Ok(Some(
            ModModule {
                range: self.range_from(start),
                body,
                type_ignores,
            }
            .into(),
        ))
    }

    // interactive: statement_newline
    fn interactive_rule(&mut self) -> ParseResult<Option<Mod>> {
        let start = self.start_location()?;
        let Some(body) = self.statement_newline()? else {
            return Ok(None);
        };
        Ok(Some(
            ModInteractive {
                range: self.range_from(start),
                body,
            }
            .into(),
        ))
    }

    // eval: expressions NEWLINE* ENDMARKER
    fn eval_rule(&mut self) -> ParseResult<Option<Mod>> {
        let start = self.start_location()?;
        let Some(body) = self.expressions()? else {
            return Ok(None);
        };
        while self.expect(TokenKind::Newline)?.is_some() {}
        if self.expect(TokenKind::EndMarker)?.is_none() {
            return Ok(None);
        }
        Ok(Some(
            ModExpression {
                range: self.range_from(start),
                body: Box::new(body),
            }
            .into(),
        ))
    }

    // fstring: star_expressions
    fn fstring_input_rule(&mut self) -> ParseResult<Option<Mod>> {
        let start = self.start_location()?;
        let Some(body) = self.star_expressions()? else {
            return Ok(None);
        };
        Ok(Some(
            ModExpression {
                range: self.range_from(start),
                body: Box::new(body),
            }
            .into(),
        ))
    }

    // func_type: '(' [type_expressions] ')' '->' expression NEWLINE* ENDMARKER
    fn func_type_rule(&mut self) -> ParseResult<Option<Mod>> {
        let start = self.start_location()?;
        if self.expect(TokenKind::Lpar)?.is_none() {
            return Ok(None);
        }
        let argtypes = self.type_expressions()?.unwrap_or_default();
        if self.expect(TokenKind::Rpar)?.is_none() || self.expect(TokenKind::Rarrow)?.is_none() {
            return Ok(None);
        }
        let Some(returns) = self.expression()? else {
            return Ok(None);
        };
        while self.expect(TokenKind::Newline)?.is_some() {}
        if self.expect(TokenKind::EndMarker)?.is_none() {
            return Ok(None);
        }
        Ok(Some(
            ModFunctionType {
                range: self.range_from(start),
                argtypes,
                returns: Box::new(returns),
            }
            .into(),
        ))
    }

    // type_expressions: ','.expression+ with optional '*'/'**' tails.
    fn type_expressions(&mut self) -> ParseResult<Option<Vec<Expr>>> {
        let Some(first) = self.type_expression_item()? else {
            return Ok(None);
        };
        let mut exprs = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.type_expression_item()? {
                Some(expr) => exprs.push(expr),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        Ok(Some(exprs))
    }

    fn type_expression_item(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        let start = self.start_location()?;
        for kind in [TokenKind::Star, TokenKind::DoubleStar] {
            if self.expect(kind)?.is_some() {
                if let Some(inner) = self.expression()? {
                    return Ok(Some(
                        taipan_ast::ExprStarred {
                            range: self.range_from(start),
                            value: Box::new(inner),
                            ctx: ExprContext::Load,
                        }
                        .into(),
                    ));
                }
                self.reset(mark);
                return Ok(None);
            }
        }
        self.expression()
    }

    // statements: statement+
    pub(crate) fn statements(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut body = Vec::new();
        loop {
            let mark = self.mark();
            match self.statement()? {
                Some(stmts) => {
                    for stmt in &stmts {
                        self.register_stmt_location(stmt.range());
                    }
                    body.extend(stmts);
                }
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        Ok(body)
    }

    // statement: compound_stmt | simple_stmts
    fn statement(&mut self) -> ParseResult<Option<Vec<Stmt>>> {
        self.with_recursion_guard(|p| {
            let mark = p.mark();
            if let Some(stmt) = p.compound_stmt()? {
                p.register_stmt_location(stmt.range());
                return Ok(Some(vec![stmt]));
            }
            p.reset(mark);
            p.simple_stmts()
        })
    }

    // statement_newline: compound_stmt NEWLINE | simple_stmts | NEWLINE | ENDMARKER
    fn statement_newline(&mut self) -> ParseResult<Option<Vec<Stmt>>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if let Some(stmt) = self.compound_stmt()? {
            if self.expect(TokenKind::Newline)?.is_some() {
                self.register_stmt_location(stmt.range());
                return Ok(Some(vec![stmt]));
            }
        }
        self.reset(mark);
        if let Some(stmts) = self.simple_stmts()? {
            return Ok(Some(stmts));
        }
        self.reset(mark);
        if self.expect(TokenKind::Newline)?.is_some() {
            return Ok(Some(vec![StmtPass {
                range: self.range_from(start),
            }
            .into()]));
        }
        self.reset(mark);
        if self.expect(TokenKind::EndMarker)?.is_some() {
            return Ok(Some(Vec::new()));
        }
        self.reset(mark);
        Ok(None)
    }

    // simple_stmts: simple_stmt !';' NEWLINE | ';'.simple_stmt+ [';'] NEWLINE
    fn simple_stmts(&mut self) -> ParseResult<Option<Vec<Stmt>>> {
        let mark = self.mark();
        let Some(first) = self.simple_stmt()? else {
            self.reset(mark);
            return Ok(None);
        };
        let mut stmts = vec![first];
        loop {
            let inner = self.mark();
            if self.expect(TokenKind::Semi)?.is_none() {
                break;
            }
            match self.simple_stmt()? {
                Some(stmt) => stmts.push(stmt),
                None => {
                    self.reset(inner);
                    self.expect(TokenKind::Semi)?;
                    break;
                }
            }
        }
        if self.expect(TokenKind::Newline)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        for stmt in &stmts {
            self.register_stmt_location(stmt.range());
        }
        Ok(Some(stmts))
    }

    // simple_stmt (memo): the single-line statement forms.
    fn simple_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        self.memoize(Rule::SimpleStmt, |p| p.simple_stmt_body())
    }

    fn simple_stmt_body(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        match self.peek_kind()? {
            TokenKind::Return => return self.return_stmt(),
            TokenKind::Import | TokenKind::From => return self.import_stmt(),
            TokenKind::Raise => return self.raise_stmt(),
            TokenKind::Pass => {
                self.expect(TokenKind::Pass)?;
                return Ok(Some(
                    StmtPass {
                        range: self.range_from(start),
                    }
                    .into(),
                ));
            }
            TokenKind::Del => return self.del_stmt(),
            TokenKind::Yield => return self.yield_stmt(),
            TokenKind::Assert => return self.assert_stmt(),
            TokenKind::Break => {
                self.expect(TokenKind::Break)?;
                return Ok(Some(
                    StmtBreak {
                        range: self.range_from(start),
                    }
                    .into(),
                ));
            }
            TokenKind::Continue => {
                self.expect(TokenKind::Continue)?;
                return Ok(Some(
                    StmtContinue {
                        range: self.range_from(start),
                    }
                    .into(),
                ));
            }
            TokenKind::Global => return self.global_stmt(),
            TokenKind::Nonlocal => return self.nonlocal_stmt(),
            _ => {}
        }
        if let Some(assign) = self.assignment()? {
            return Ok(Some(assign));
        }
        self.reset(mark);
        if self.lookahead(true, |p| p.expect_soft_keyword("type"))? {
            if let Some(alias) = self.type_alias()? {
                return Ok(Some(alias));
            }
            self.reset(mark);
        }
        if let Some(value) = self.star_expressions()? {
            return Ok(Some(
                StmtExpr {
                    range: self.range_from(start),
                    value: Box::new(value),
                }
                .into(),
            ));
        }
        self.reset(mark);
        Ok(None)
    }

    // assignment:
    //   NAME ':' expression ['=' annotated_rhs]
    //   | ('(' single_target ')' | single_subscript_attribute_target) ':' ...
    //   | (star_targets '=')+ (yield_expr | star_expressions) !'=' [TYPE_COMMENT]
    //   | single_target augassign ~ (yield_expr | star_expressions)
    //   | invalid_assignment
    fn assignment(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;

        // NAME ':' expression ['=' annotated_rhs]
        if let Some(name) = self.name_token()? {
            if self.expect(TokenKind::Colon)?.is_some() {
                if let Some(annotation) = self.expression()? {
                    let value = if self.expect(TokenKind::Equal)?.is_some() {
                        match self.annotated_rhs()? {
                            Some(value) => Some(value),
                            None => {
                                self.reset(mark);
                                return self.assignment_fallthrough(mark);
                            }
                        }
                    } else {
                        None
                    };
                    self.check_version(6, "Variable annotation syntax is", Some(()))?;
                    let target = set_expr_context(name, ExprContext::Store);
                    return Ok(Some(
                        StmtAnnAssign {
                            range: self.range_from(start),
                            target: Box::new(target),
                            annotation: Box::new(annotation),
                            value: value.map(Box::new),
                            simple: true,
                        }
                        .into(),
                    ));
                }
            }
        }
        self.reset(mark);

        // ('(' single_target ')' | single_subscript_attribute_target) ':' ...
        if let Some(target) = self.annassign_complex_target()? {
            if self.expect(TokenKind::Colon)?.is_some() {
                if let Some(annotation) = self.expression()? {
                    let value = if self.expect(TokenKind::Equal)?.is_some() {
                        self.annotated_rhs()?
                    } else {
                        None
                    };
                    self.check_version(6, "Variable annotation syntax is", Some(()))?;
                    return Ok(Some(
                        StmtAnnAssign {
                            range: self.range_from(start),
                            target: Box::new(target),
                            annotation: Box::new(annotation),
                            value: value.map(Box::new),
                            simple: false,
                        }
                        .into(),
                    ));
                }
            }
        }
        self.reset(mark);

        self.assignment_fallthrough(mark)
    }

    fn assignment_fallthrough(&mut self, mark: usize) -> ParseResult<Option<Stmt>> {
        let start = self.start_location()?;

        // (star_targets '=')+ (yield_expr | star_expressions) !'=' [TYPE_COMMENT]
        let mut targets = Vec::new();
        loop {
            let inner = self.mark();
            let Some(target) = self.star_targets()? else {
                self.reset(inner);
                break;
            };
            if self.expect(TokenKind::Equal)?.is_none() {
                self.reset(inner);
                break;
            }
            targets.push(target);
        }
        if !targets.is_empty() {
            if let Some(value) = self.assignment_rhs()? {
                if !self.lookahead_kind(true, TokenKind::Equal)? {
                    let type_comment = self
                        .expect(TokenKind::TypeComment)?
                        .as_ref()
                        .map(new_type_comment);
                    return Ok(Some(
                        StmtAssign {
                            range: self.range_from(start),
                            targets,
                            value: Box::new(value),
                            type_comment,
                        }
                        .into(),
                    ));
                }
            }
        }
        self.reset(mark);

        // single_target augassign ~ (yield_expr | star_expressions)
        if let Some(target) = self.single_target()? {
            if let Some(op) = self.augassign()? {
                // Cut: an augmented operator commits to this form.
                let Some(value) = self.assignment_rhs()? else {
                    self.reset(mark);
                    if self.call_invalid_rules {
                        return Err(
                            self.syntax_error_on_next_token("invalid syntax")
                        );
                    }
                    return Ok(None);
                };
                return Ok(Some(
                    StmtAugAssign {
                        range: self.range_from(start),
                        target: Box::new(target),
                        op,
                        value: Box::new(value),
                    }
                    .into(),
                ));
            }
        }
        self.reset(mark);

        if self.call_invalid_rules {
            self.invalid_assignment()?;
        }
        Ok(None)
    }

    // '(' single_target ')' | single_subscript_attribute_target
    fn annassign_complex_target(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        if self.expect(TokenKind::Lpar)?.is_some() {
            if let Some(target) = self.single_target()? {
                if self.expect(TokenKind::Rpar)?.is_some() {
                    return Ok(Some(target));
                }
            }
        }
        self.reset(mark);
        self.single_subscript_attribute_target()
    }

    fn assignment_rhs(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        if let Some(value) = self.yield_expr()? {
            return Ok(Some(value));
        }
        self.reset(mark);
        self.star_expressions()
    }

    fn augassign(&mut self) -> ParseResult<Option<Operator>> {
        let op = match self.peek_kind()? {
            TokenKind::PlusEqual => Operator::Add,
            TokenKind::MinusEqual => Operator::Sub,
            TokenKind::StarEqual => Operator::Mult,
            TokenKind::AtEqual => Operator::MatMult,
            TokenKind::SlashEqual => Operator::Div,
            TokenKind::PercentEqual => Operator::Mod,
            TokenKind::AmperEqual => Operator::BitAnd,
            TokenKind::VbarEqual => Operator::BitOr,
            TokenKind::CircumflexEqual => Operator::BitXor,
            TokenKind::LeftShiftEqual => Operator::LShift,
            TokenKind::RightShiftEqual => Operator::RShift,
            TokenKind::DoubleStarEqual => Operator::Pow,
            TokenKind::DoubleSlashEqual => Operator::FloorDiv,
            _ => return Ok(None),
        };
        let kind = self.peek_kind()?;
        self.expect(kind)?;
        Ok(Some(op))
    }

    // invalid_assignment (diagnostic pass)
    fn invalid_assignment(&mut self) -> ParseResult<()> {
        let mark = self.mark();

        // list ':' / tuple ':' / expression ':' annotations
        if let Some(target) = self.without_invalid(|p| p.expression())? {
            if self.expect(TokenKind::Colon)?.is_some()
                && self.without_invalid(|p| p.expression())?.is_some()
            {
                let msg = match &target {
                    Expr::List(_) => Some("only single target (not list) can be annotated"),
                    Expr::Tuple(_) => Some("only single target (not tuple) can be annotated"),
                    Expr::Name(_) | Expr::Attribute(_) | Expr::Subscript(_) => None,
                    _ => Some("illegal target for annotation"),
                };
                if let Some(msg) = msg {
                    return Err(self.syntax_error_known_location(target.range(), msg));
                }
            }
        }
        self.reset(mark);

        // (star_targets '=')* star_expressions '='
        loop {
            let inner = self.mark();
            if self.without_invalid(|p| p.star_targets())?.is_none()
                || self.expect(TokenKind::Equal)?.is_none()
            {
                self.reset(inner);
                break;
            }
        }
        if let Some(bad) = self.without_invalid(|p| p.star_expressions())? {
            if self.expect(TokenKind::Equal)?.is_some() {
                self.raise_invalid_target(TargetsKind::StarTargets, &bad)?;
            }
        }
        self.reset(mark);

        // (star_targets '=')* yield_expr '='
        loop {
            let inner = self.mark();
            if self.without_invalid(|p| p.star_targets())?.is_none()
                || self.expect(TokenKind::Equal)?.is_none()
            {
                self.reset(inner);
                break;
            }
        }
        if let Some(yield_expr) = self.without_invalid(|p| p.yield_expr())? {
            if self.expect(TokenKind::Equal)?.is_some() {
                return Err(self.syntax_error_known_location(
                    yield_expr.range(),
                    "assignment to yield expression not possible",
                ));
            }
        }
        self.reset(mark);

        // star_expressions augassign annotated_rhs
        if let Some(target) = self.without_invalid(|p| p.star_expressions())? {
            if self.augassign()?.is_some() && self.without_invalid(|p| p.annotated_rhs())?.is_some()
            {
                let name = target.name();
                return Err(self.syntax_error_known_location(
                    target.range(),
                    format!("'{name}' is an illegal expression for augmented assignment"),
                ));
            }
        }
        self.reset(mark);
        Ok(())
    }

    // return_stmt: 'return' [star_expressions]
    fn return_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let start = self.start_location()?;
        if self.expect(TokenKind::Return)?.is_none() {
            return Ok(None);
        }
        let value = self.star_expressions()?;
        Ok(Some(
            StmtReturn {
                range: self.range_from(start),
                value: value.map(Box::new),
            }
            .into(),
        ))
    }

    // raise_stmt: 'raise' expression ['from' expression] | 'raise'
    fn raise_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let start = self.start_location()?;
        if self.expect(TokenKind::Raise)?.is_none() {
            return Ok(None);
        }
        let mark = self.mark();
        if let Some(exc) = self.expression()? {
            let cause = if self.expect(TokenKind::From)?.is_some() {
                match self.expression()? {
                    Some(cause) => Some(cause),
                    None => {
                        self.reset(mark);
                        return Ok(Some(
                            StmtRaise {
                                range: self.range_from(start),
                                exc: None,
                                cause: None,
                            }
                            .into(),
                        ));
                    }
                }
            } else {
                None
            };
            return Ok(Some(
                StmtRaise {
                    range: self.range_from(start),
                    exc: Some(Box::new(exc)),
                    cause: cause.map(Box::new),
                }
                .into(),
            ));
        }
        self.reset(mark);
        Ok(Some(
            StmtRaise {
                range: self.range_from(start),
                exc: None,
                cause: None,
            }
            .into(),
        ))
    }

    // global_stmt: 'global' ','.NAME+
    fn global_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let start = self.start_location()?;
        if self.expect(TokenKind::Global)?.is_none() {
            return Ok(None);
        }
        let Some(names) = self.name_list()? else {
            return Ok(None);
        };
        Ok(Some(
            StmtGlobal {
                range: self.range_from(start),
                names,
            }
            .into(),
        ))
    }

    // nonlocal_stmt: 'nonlocal' ','.NAME+
    fn nonlocal_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let start = self.start_location()?;
        if self.expect(TokenKind::Nonlocal)?.is_none() {
            return Ok(None);
        }
        let Some(names) = self.name_list()? else {
            return Ok(None);
        };
        Ok(Some(
            StmtNonlocal {
                range: self.range_from(start),
                names,
            }
            .into(),
        ))
    }

    fn name_list(&mut self) -> ParseResult<Option<Vec<Identifier>>> {
        let Some(first) = self.identifier()? else {
            return Ok(None);
        };
        let mut names = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.identifier()? {
                Some(name) => names.push(name),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        Ok(Some(names))
    }

    fn identifier(&mut self) -> ParseResult<Option<Identifier>> {
        let Some(token) = self.expect(TokenKind::Name)? else {
            return Ok(None);
        };
        Ok(Some(self.new_identifier(&token.text, token.range)?))
    }

    // del_stmt: 'del' del_targets &(';' | NEWLINE) | invalid_del_stmt
    fn del_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Del)?.is_some() {
            if let Some(targets) = self.del_targets()? {
                let terminated = matches!(
                    self.peek_kind()?,
                    TokenKind::Semi | TokenKind::Newline
                );
                if terminated {
                    return Ok(Some(
                        StmtDelete {
                            range: self.range_from(start),
                            targets,
                        }
                        .into(),
                    ));
                }
            }
        }
        self.reset(mark);
        if self.call_invalid_rules {
            self.invalid_del_stmt()?;
        }
        Ok(None)
    }

    // invalid_del_stmt: 'del' star_expressions
    fn invalid_del_stmt(&mut self) -> ParseResult<()> {
        let mark = self.mark();
        if self.expect(TokenKind::Del)?.is_some() {
            if let Some(bad) = self.without_invalid(|p| p.star_expressions())? {
                self.raise_invalid_target(TargetsKind::DelTargets, &bad)?;
            }
        }
        self.reset(mark);
        Ok(())
    }

    // yield_stmt: yield_expr
    fn yield_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let start = self.start_location()?;
        let Some(value) = self.yield_expr()? else {
            return Ok(None);
        };
        Ok(Some(
            StmtExpr {
                range: self.range_from(start),
                value: Box::new(value),
            }
            .into(),
        ))
    }

    // assert_stmt: 'assert' expression [',' expression]
    fn assert_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let start = self.start_location()?;
        if self.expect(TokenKind::Assert)?.is_none() {
            return Ok(None);
        }
        let Some(test) = self.expression()? else {
            return Ok(None);
        };
        let msg = if self.expect(TokenKind::Comma)?.is_some() {
            self.expression()?
        } else {
            None
        };
        Ok(Some(
            StmtAssert {
                range: self.range_from(start),
                test: Box::new(test),
                msg: msg.map(Box::new),
            }
            .into(),
        ))
    }

    // import_stmt: import_name | import_from
    fn import_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Import)?.is_some() {
            let Some(names) = self.dotted_as_names()? else {
                self.reset(mark);
                if self.call_invalid_rules {
                    return Err(self.syntax_error_on_next_token("invalid syntax"));
                }
                return Ok(None);
            };
            return Ok(Some(
                StmtImport {
                    range: self.range_from(start),
                    names,
                }
                .into(),
            ));
        }
        self.reset(mark);
        self.import_from()
    }

    // import_from:
    //   'from' ('.' | '...')* dotted_name 'import' import_from_targets
    //   | 'from' ('.' | '...')+ 'import' import_from_targets
    fn import_from(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::From)?.is_none() {
            return Ok(None);
        }
        let mut dots = Vec::new();
        loop {
            match self.peek_kind()? {
                TokenKind::Dot => dots.push(self.expect(TokenKind::Dot)?.expect("peeked")),
                TokenKind::Ellipsis => {
                    dots.push(self.expect(TokenKind::Ellipsis)?.expect("peeked"));
                }
                _ => break,
            }
        }
        let level = seq_count_dots(&dots);
        let module = if self.peek_kind()? == TokenKind::Name {
            self.dotted_name()?
        } else {
            None
        };
        if module.is_none() && dots.is_empty() {
            self.reset(mark);
            return Ok(None);
        }
        if self.expect(TokenKind::Import)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_on_next_token("expected 'import'"));
            }
            return Ok(None);
        }
        let Some(names) = self.import_from_targets()? else {
            self.reset(mark);
            return Ok(None);
        };
        let module = match module {
            Some(expr) => {
                let Expr::Name(name) = expr else {
                    unreachable!("dotted names are Name nodes");
                };
                Some(name.id)
            }
            None => None,
        };
        // `from __future__ import barry_as_FLUFL` flips the not-equal
        // spelling for the rest of the parse.
        if level == 0 {
            if let Some(module) = &module {
                if module.as_str() == "__future__" {
                    for alias in &names {
                        if alias.name.as_str() == "barry_as_FLUFL" {
                            self.flags.insert(ParserFlags::BARRY_AS_BDFL);
                        }
                    }
                }
            }
        }
        Ok(Some(
            StmtImportFrom {
                range: self.range_from(start),
                module,
                names,
                level,
            }
            .into(),
        ))
    }

    // import_from_targets:
    //   '(' import_from_as_names [','] ')' | import_from_as_names !',' | '*'
    fn import_from_targets(&mut self) -> ParseResult<Option<Vec<Alias>>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Lpar)?.is_some() {
            if let Some(names) = self.import_from_as_names()? {
                self.expect(TokenKind::Comma)?;
                if self.expect(TokenKind::Rpar)?.is_some() {
                    return Ok(Some(names));
                }
            }
        }
        self.reset(mark);
        if let Some(names) = self.import_from_as_names()? {
            if !self.lookahead_kind(true, TokenKind::Comma)? {
                return Ok(Some(names));
            }
        }
        self.reset(mark);
        if self.expect(TokenKind::Star)?.is_some() {
            return Ok(Some(vec![alias_for_star(self.range_from(start))]));
        }
        self.reset(mark);
        if self.call_invalid_rules {
            return Err(self.syntax_error_on_next_token(
                "expected one or more names after 'import'",
            ));
        }
        Ok(None)
    }

    fn import_from_as_names(&mut self) -> ParseResult<Option<Vec<Alias>>> {
        let Some(first) = self.import_from_as_name()? else {
            return Ok(None);
        };
        let mut names = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.import_from_as_name()? {
                Some(name) => names.push(name),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        Ok(Some(names))
    }

    // import_from_as_name: NAME ['as' NAME]
    fn import_from_as_name(&mut self) -> ParseResult<Option<Alias>> {
        let start = self.start_location()?;
        let Some(name) = self.identifier()? else {
            return Ok(None);
        };
        let asname = if self.expect(TokenKind::As)?.is_some() {
            let Some(asname) = self.identifier()? else {
                return Ok(None);
            };
            Some(asname)
        } else {
            None
        };
        Ok(Some(Alias {
            range: self.range_from(start),
            name,
            asname,
        }))
    }

    fn dotted_as_names(&mut self) -> ParseResult<Option<Vec<Alias>>> {
        let Some(first) = self.dotted_as_name()? else {
            return Ok(None);
        };
        let mut names = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.dotted_as_name()? {
                Some(name) => names.push(name),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        Ok(Some(names))
    }

    // dotted_as_name: dotted_name ['as' NAME]
    fn dotted_as_name(&mut self) -> ParseResult<Option<Alias>> {
        let start = self.start_location()?;
        let Some(dotted) = self.dotted_name()? else {
            return Ok(None);
        };
        let Expr::Name(name) = dotted else {
            unreachable!("dotted names are Name nodes");
        };
        let asname = if self.expect(TokenKind::As)?.is_some() {
            let Some(asname) = self.identifier()? else {
                return Ok(None);
            };
            Some(asname)
        } else {
            None
        };
        Ok(Some(Alias {
            range: self.range_from(start),
            name: name.id,
            asname,
        }))
    }

    // dotted_name: NAME ('.' NAME)*
    fn dotted_name(&mut self) -> ParseResult<Option<Expr>> {
        let Some(mut name) = self.name_token()? else {
            return Ok(None);
        };
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Dot)?.is_none() {
                break;
            }
            match self.name_token()? {
                Some(part) => name = join_names_with_dot(&name, &part),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        Ok(Some(name))
    }

    // compound_stmt, dispatched on the leading token.
    fn compound_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        match self.peek_kind()? {
            TokenKind::Def => self.function_def(),
            TokenKind::At => {
                let mark = self.mark();
                if let Some(def) = self.function_def()? {
                    return Ok(Some(def));
                }
                self.reset(mark);
                self.class_def()
            }
            TokenKind::If => self.if_stmt(),
            TokenKind::Class => self.class_def(),
            TokenKind::With => self.with_stmt(),
            TokenKind::For => self.for_stmt(),
            TokenKind::Async => {
                let mark = self.mark();
                if let Some(def) = self.function_def()? {
                    return Ok(Some(def));
                }
                self.reset(mark);
                if let Some(with) = self.with_stmt()? {
                    return Ok(Some(with));
                }
                self.reset(mark);
                self.for_stmt()
            }
            TokenKind::Try => self.try_stmt(),
            TokenKind::While => self.while_stmt(),
            TokenKind::Name => self.match_stmt(),
            _ => Ok(None),
        }
    }

    // block (shape-memoized through its callers):
    //   NEWLINE INDENT statements DEDENT | simple_stmts | invalid_block
    pub(crate) fn block(&mut self) -> ParseResult<Option<Vec<Stmt>>> {
        let mark = self.mark();
        if self.expect(TokenKind::Newline)?.is_some() {
            if self.expect(TokenKind::Indent)?.is_some() {
                let body = self.statements()?;
                if !body.is_empty() && self.expect(TokenKind::Dedent)?.is_some() {
                    return Ok(Some(body));
                }
            }
        }
        self.reset(mark);
        if let Some(stmts) = self.simple_stmts()? {
            return Ok(Some(stmts));
        }
        self.reset(mark);
        if self.call_invalid_rules {
            if self.expect(TokenKind::Newline)?.is_some()
                && !self.lookahead_kind(true, TokenKind::Indent)?
            {
                return Err(self.indentation_error("expected an indented block"));
            }
            self.reset(mark);
        }
        Ok(None)
    }

    // decorators: ('@' named_expression NEWLINE)+
    fn decorators(&mut self) -> ParseResult<Option<Vec<Expr>>> {
        let mut decorators = Vec::new();
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::At)?.is_none() {
                self.reset(mark);
                break;
            }
            let Some(decorator) = self.named_expression()? else {
                self.reset(mark);
                break;
            };
            if self.expect(TokenKind::Newline)?.is_none() {
                self.reset(mark);
                break;
            }
            decorators.push(decorator);
        }
        if decorators.is_empty() {
            return Ok(None);
        }
        Ok(Some(decorators))
    }

    // function_def: decorators function_def_raw | function_def_raw
    fn function_def(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        if let Some(decorators) = self.decorators()? {
            if let Some(def) = self.function_def_raw()? {
                return Ok(Some(function_def_decorators(decorators, def)));
            }
            self.reset(mark);
            return Ok(None);
        }
        self.reset(mark);
        self.function_def_raw()
    }

    // function_def_raw:
    //   ['async'] 'def' NAME [type_params] '(' [params] ')' ['->' expression]
    //   ':' [func_type_comment] block
    fn function_def_raw(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        let is_async = self.expect(TokenKind::Async)?.is_some();
        if self.expect(TokenKind::Def)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        let Some(name) = self.identifier()? else {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_on_next_token("invalid syntax"));
            }
            return Ok(None);
        };
        let type_params = self.type_params()?.unwrap_or_default();
        if self.expect(TokenKind::Lpar)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_on_next_token("expected '('"));
            }
            return Ok(None);
        }
        let params_start = self.start_location()?;
        let args = match self.parameters(ParamStyle::Function)? {
            Some(args) => args,
            None => Arguments::empty(SourceRange::from(params_start)),
        };
        if self.expect(TokenKind::Rpar)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_on_next_token("expected ')'"));
            }
            return Ok(None);
        }
        let returns = if self.expect(TokenKind::Rarrow)?.is_some() {
            let Some(returns) = self.expression()? else {
                self.reset(mark);
                return Ok(None);
            };
            Some(returns)
        } else {
            None
        };
        if self.expect(TokenKind::Colon)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_at_last_token("expected ':'"));
            }
            return Ok(None);
        }
        let type_comment = self.func_type_comment()?;
        let Some(body) = self.block()? else {
            self.reset(mark);
            return Ok(None);
        };
        let range = self.range_from(start);
        let stmt: Stmt = if is_async {
            StmtAsyncFunctionDef {
                range,
                name,
                args: Box::new(args),
                body,
                decorator_list: Vec::new(),
                returns: returns.map(Box::new),
                type_comment,
                type_params,
            }
            .into()
        } else {
            StmtFunctionDef {
                range,
                name,
                args: Box::new(args),
                body,
                decorator_list: Vec::new(),
                returns: returns.map(Box::new),
                type_comment,
                type_params,
            }
            .into()
        };
        Ok(Some(stmt))
    }

    // func_type_comment:
    //   NEWLINE TYPE_COMMENT &(NEWLINE INDENT) | TYPE_COMMENT
    fn func_type_comment(&mut self) -> ParseResult<Option<String>> {
        let mark = self.mark();
        if self.expect(TokenKind::Newline)?.is_some() {
            if let Some(tc) = self.expect(TokenKind::TypeComment)? {
                let ahead = self.lookahead(true, |p| {
                    if p.expect(TokenKind::Newline)?.is_some()
                        && p.expect(TokenKind::Indent)?.is_some()
                    {
                        Ok(Some(()))
                    } else {
                        Ok(None)
                    }
                })?;
                if ahead {
                    return Ok(Some(new_type_comment(&tc)));
                }
            }
        }
        self.reset(mark);
        if let Some(tc) = self.expect(TokenKind::TypeComment)? {
            return Ok(Some(new_type_comment(&tc)));
        }
        self.reset(mark);
        Ok(None)
    }

    // --- parameter lists (shared between def and lambda) ------------------

    pub(crate) fn lambda_params(&mut self) -> ParseResult<Option<Arguments>> {
        self.parameters(ParamStyle::Lambda)
    }

    // parameters:
    //   slash_no_default param_no_default* param_with_default* [star_etc]
    //   | slash_with_default param_with_default* [star_etc]
    //   | param_no_default+ param_with_default* [star_etc]
    //   | param_with_default+ [star_etc]
    //   | star_etc
    fn parameters(&mut self, style: ParamStyle) -> ParseResult<Option<Arguments>> {
        let mark = self.mark();
        let start = self.start_location()?;

        let slash_no_default = self.slash_no_default(style)?;
        let slash_with_default = if slash_no_default.is_none() {
            self.slash_with_default(style)?
        } else {
            None
        };
        if slash_no_default.is_some() || slash_with_default.is_some() {
            self.check_version(8, "Positional-only parameters are", Some(()))?;
        }

        let mut plain = Vec::new();
        if slash_with_default.is_none() {
            loop {
                let inner = self.mark();
                match self.param_no_default(style)? {
                    Some(param) => plain.push(param),
                    None => {
                        self.reset(inner);
                        break;
                    }
                }
            }
        }

        let mut with_default = Vec::new();
        loop {
            let inner = self.mark();
            match self.param_with_default(style)? {
                Some(pair) => with_default.push(pair),
                None => {
                    self.reset(inner);
                    break;
                }
            }
        }

        let star_etc = self.star_etc(style)?;

        if slash_no_default.is_none()
            && slash_with_default.is_none()
            && plain.is_empty()
            && with_default.is_empty()
            && star_etc.is_none()
        {
            self.reset(mark);
            if self.call_invalid_rules {
                self.invalid_parameters(style)?;
            }
            return Ok(None);
        }

        if self.call_invalid_rules {
            // A parameter without a default may not follow one with one.
            let follows = self.lookahead(true, |p| p.param_no_default(style))?;
            if follows && !with_default.is_empty() && star_etc.is_none() {
                return Err(self.syntax_error_on_next_token(
                    "parameter without a default follows parameter with a default",
                ));
            }
        }

        Ok(Some(make_arguments(
            self.range_from(start),
            slash_no_default,
            slash_with_default,
            if plain.is_empty() { None } else { Some(plain) },
            if with_default.is_empty() {
                None
            } else {
                Some(with_default)
            },
            star_etc,
        )))
    }

    // slash_no_default: param_no_default+ '/' (',' | &terminator)
    fn slash_no_default(&mut self, style: ParamStyle) -> ParseResult<Option<Vec<Arg>>> {
        let mark = self.mark();
        let mut params = Vec::new();
        loop {
            let inner = self.mark();
            match self.param_no_default(style)? {
                Some(param) => params.push(param),
                None => {
                    self.reset(inner);
                    break;
                }
            }
        }
        if params.is_empty() {
            self.reset(mark);
            return Ok(None);
        }
        if self.expect(TokenKind::Slash)?.is_some() {
            if self.expect(TokenKind::Comma)?.is_some()
                || self.lookahead_kind(true, style.terminator())?
            {
                return Ok(Some(params));
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // slash_with_default: param_no_default* param_with_default+ '/' (',' | &terminator)
    fn slash_with_default(&mut self, style: ParamStyle) -> ParseResult<Option<SlashWithDefault>> {
        let mark = self.mark();
        let mut plain = Vec::new();
        loop {
            let inner = self.mark();
            match self.param_no_default(style)? {
                Some(param) => plain.push(param),
                None => {
                    self.reset(inner);
                    break;
                }
            }
        }
        let mut with_default = Vec::new();
        loop {
            let inner = self.mark();
            match self.param_with_default(style)? {
                Some(pair) => with_default.push(pair),
                None => {
                    self.reset(inner);
                    break;
                }
            }
        }
        if with_default.is_empty() {
            self.reset(mark);
            return Ok(None);
        }
        if self.expect(TokenKind::Slash)?.is_some() {
            if self.expect(TokenKind::Comma)?.is_some()
                || self.lookahead_kind(true, style.terminator())?
            {
                return Ok(Some(SlashWithDefault {
                    plain_names: plain,
                    names_with_defaults: with_default,
                }));
            }
        }
        self.reset(mark);
        Ok(None)
    }

    // star_etc:
    //   '*' param_no_default param_maybe_default* [kwds]
    //   | '*' ',' param_maybe_default+ [kwds]
    //   | kwds
    fn star_etc(&mut self, style: ParamStyle) -> ParseResult<Option<StarEtc>> {
        let mark = self.mark();
        if self.expect(TokenKind::Star)?.is_some() {
            if let Some(vararg) = self.param_no_default(style)? {
                let mut kwonly = Vec::new();
                loop {
                    let inner = self.mark();
                    match self.param_maybe_default(style)? {
                        Some(pair) => kwonly.push(pair),
                        None => {
                            self.reset(inner);
                            break;
                        }
                    }
                }
                let kwarg = self.kwds(style)?;
                return Ok(Some(StarEtc {
                    vararg: Some(vararg),
                    kwonlyargs: kwonly,
                    kwarg,
                }));
            }
            if self.expect(TokenKind::Comma)?.is_some() {
                let mut kwonly = Vec::new();
                loop {
                    let inner = self.mark();
                    match self.param_maybe_default(style)? {
                        Some(pair) => kwonly.push(pair),
                        None => {
                            self.reset(inner);
                            break;
                        }
                    }
                }
                if !kwonly.is_empty() {
                    let kwarg = self.kwds(style)?;
                    return Ok(Some(StarEtc {
                        vararg: None,
                        kwonlyargs: kwonly,
                        kwarg,
                    }));
                }
            }
            self.reset(mark);
            if self.call_invalid_rules {
                self.invalid_star_etc(style)?;
            }
            return Ok(None);
        }
        self.reset(mark);
        if let Some(kwarg) = self.kwds(style)? {
            return Ok(Some(StarEtc {
                vararg: None,
                kwonlyargs: Vec::new(),
                kwarg: Some(kwarg),
            }));
        }
        self.reset(mark);
        Ok(None)
    }

    fn invalid_star_etc(&mut self, style: ParamStyle) -> ParseResult<()> {
        let mark = self.mark();
        if let Some(star) = self.expect(TokenKind::Star)? {
            let bare = self.lookahead_kind(true, style.terminator())?
                || (self.expect(TokenKind::Comma)?.is_some()
                    && matches!(
                        self.peek_kind()?,
                        TokenKind::Rpar | TokenKind::Colon | TokenKind::DoubleStar
                    ));
            if bare {
                return Err(self.syntax_error_known_location(
                    star.range,
                    "named arguments must follow bare *",
                ));
            }
        }
        self.reset(mark);
        Ok(())
    }

    // kwds: '**' param_no_default
    fn kwds(&mut self, style: ParamStyle) -> ParseResult<Option<Arg>> {
        let mark = self.mark();
        if self.expect(TokenKind::DoubleStar)?.is_none() {
            return Ok(None);
        }
        let Some(param) = self.param_no_default(style)? else {
            self.reset(mark);
            return Ok(None);
        };
        Ok(Some(param))
    }

    // param_no_default: param ',' [TYPE_COMMENT] | param [TYPE_COMMENT] &terminator
    fn param_no_default(&mut self, style: ParamStyle) -> ParseResult<Option<Arg>> {
        let mark = self.mark();
        let Some(param) = self.param(style)? else {
            return Ok(None);
        };
        if self.expect(TokenKind::Comma)?.is_some() {
            let tc = self.expect(TokenKind::TypeComment)?;
            return Ok(Some(add_type_comment_to_arg(param, tc)));
        }
        let tc = self.expect(TokenKind::TypeComment)?;
        if self.lookahead_kind(true, style.terminator())? {
            return Ok(Some(add_type_comment_to_arg(param, tc)));
        }
        self.reset(mark);
        Ok(None)
    }

    // param_with_default: param default ',' [TC] | param default [TC] &terminator
    fn param_with_default(&mut self, style: ParamStyle) -> ParseResult<Option<NameDefaultPair>> {
        let mark = self.mark();
        let Some(param) = self.param(style)? else {
            return Ok(None);
        };
        let Some(default) = self.default_value()? else {
            self.reset(mark);
            return Ok(None);
        };
        if self.expect(TokenKind::Comma)?.is_some() {
            let tc = self.expect(TokenKind::TypeComment)?;
            return Ok(Some(NameDefaultPair {
                arg: add_type_comment_to_arg(param, tc),
                value: Some(default),
            }));
        }
        let tc = self.expect(TokenKind::TypeComment)?;
        if self.lookahead_kind(true, style.terminator())? {
            return Ok(Some(NameDefaultPair {
                arg: add_type_comment_to_arg(param, tc),
                value: Some(default),
            }));
        }
        self.reset(mark);
        Ok(None)
    }

    // param_maybe_default: param [default] ',' [TC] | param [default] [TC] &terminator
    fn param_maybe_default(&mut self, style: ParamStyle) -> ParseResult<Option<NameDefaultPair>> {
        let mark = self.mark();
        let Some(param) = self.param(style)? else {
            return Ok(None);
        };
        let default = self.default_value()?;
        if self.expect(TokenKind::Comma)?.is_some() {
            let tc = self.expect(TokenKind::TypeComment)?;
            return Ok(Some(NameDefaultPair {
                arg: add_type_comment_to_arg(param, tc),
                value: default,
            }));
        }
        let tc = self.expect(TokenKind::TypeComment)?;
        if self.lookahead_kind(true, style.terminator())? {
            return Ok(Some(NameDefaultPair {
                arg: add_type_comment_to_arg(param, tc),
                value: default,
            }));
        }
        self.reset(mark);
        Ok(None)
    }

    // param: NAME [annotation]; lambda parameters take no annotation.
    fn param(&mut self, style: ParamStyle) -> ParseResult<Option<Arg>> {
        let start = self.start_location()?;
        let Some(name) = self.identifier()? else {
            return Ok(None);
        };
        let annotation = if style == ParamStyle::Function
            && self.expect(TokenKind::Colon)?.is_some()
        {
            let Some(annotation) = self.expression()? else {
                return Ok(None);
            };
            Some(annotation)
        } else {
            None
        };
        Ok(Some(Arg {
            range: self.range_from(start),
            arg: name,
            annotation: annotation.map(Box::new),
            type_comment: None,
        }))
    }

    // default: '=' expression
    fn default_value(&mut self) -> ParseResult<Option<Expr>> {
        let mark = self.mark();
        if self.expect(TokenKind::Equal)?.is_none() {
            return Ok(None);
        }
        match self.expression()? {
            Some(value) => Ok(Some(value)),
            None => {
                self.reset(mark);
                Ok(None)
            }
        }
    }

    fn invalid_parameters(&mut self, style: ParamStyle) -> ParseResult<()> {
        let mark = self.mark();
        // param_with_default+ param_no_default
        let mut any_default = false;
        loop {
            let inner = self.mark();
            match self.param_with_default(style)? {
                Some(_) => any_default = true,
                None => {
                    self.reset(inner);
                    break;
                }
            }
        }
        if any_default {
            if let Some(param) = self.param_no_default(style)? {
                return Err(self.syntax_error_known_location(
                    param.range,
                    "parameter without a default follows parameter with a default",
                ));
            }
        }
        self.reset(mark);
        Ok(())
    }

    // --- compound statements ----------------------------------------------

    // if_stmt:
    //   'if' named_expression ':' block elif_stmt
    //   | 'if' named_expression ':' block [else_block]
    fn if_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::If)?.is_none() {
            return Ok(None);
        }
        let Some(test) = self.named_expression()? else {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(
                    self.syntax_error_on_next_token("invalid syntax")
                );
            }
            return Ok(None);
        };
        if self.expect(TokenKind::Colon)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_at_last_token("expected ':'"));
            }
            return Ok(None);
        }
        let Some(body) = self.block()? else {
            self.reset(mark);
            return Ok(None);
        };
        let orelse = self.elif_or_else()?;
        Ok(Some(
            StmtIf {
                range: self.range_from(start),
                test: Box::new(test),
                body,
                orelse,
            }
            .into(),
        ))
    }

    // elif_stmt mirrors if_stmt, nesting each 'elif' as an If in orelse.
    fn elif_or_else(&mut self) -> ParseResult<Vec<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Elif)?.is_some() {
            if let Some(test) = self.named_expression()? {
                if self.expect(TokenKind::Colon)?.is_some() {
                    if let Some(body) = self.block()? {
                        let orelse = self.elif_or_else()?;
                        return Ok(vec![StmtIf {
                            range: self.range_from(start),
                            test: Box::new(test),
                            body,
                            orelse,
                        }
                        .into()]);
                    }
                }
            }
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_at_last_token("expected ':'"));
            }
            return Ok(Vec::new());
        }
        self.reset(mark);
        Ok(self.else_block()?.unwrap_or_default())
    }

    // else_block: 'else' ':' block
    fn else_block(&mut self) -> ParseResult<Option<Vec<Stmt>>> {
        let mark = self.mark();
        if self.expect(TokenKind::Else)?.is_none() {
            return Ok(None);
        }
        if self.expect(TokenKind::Colon)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_at_last_token("expected ':'"));
            }
            return Ok(None);
        }
        let Some(body) = self.block()? else {
            self.reset(mark);
            return Ok(None);
        };
        Ok(Some(body))
    }

    // while_stmt: 'while' named_expression ':' block [else_block]
    fn while_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::While)?.is_none() {
            return Ok(None);
        }
        let Some(test) = self.named_expression()? else {
            self.reset(mark);
            return Ok(None);
        };
        if self.expect(TokenKind::Colon)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_at_last_token("expected ':'"));
            }
            return Ok(None);
        }
        let Some(body) = self.block()? else {
            self.reset(mark);
            return Ok(None);
        };
        let orelse = self.else_block()?.unwrap_or_default();
        Ok(Some(
            StmtWhile {
                range: self.range_from(start),
                test: Box::new(test),
                body,
                orelse,
            }
            .into(),
        ))
    }

    // for_stmt:
    //   ['async'] 'for' star_targets 'in' ~ star_expressions ':' [TYPE_COMMENT]
    //   block [else_block]
    fn for_stmt(&mut self) -> ParseResult<Option<Stmt>> {
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
                self.invalid_for_target()?;
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
        // Cut: after 'in' the statement form is committed.
        let Some(iter) = self.star_expressions()? else {
            self.reset(mark);
            return Ok(None);
        };
        if self.expect(TokenKind::Colon)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_at_last_token("expected ':'"));
            }
            return Ok(None);
        }
        let type_comment = self
            .expect(TokenKind::TypeComment)?
            .as_ref()
            .map(new_type_comment);
        let Some(body) = self.block()? else {
            self.reset(mark);
            return Ok(None);
        };
        let orelse = self.else_block()?.unwrap_or_default();
        let range = self.range_from(start);
        let stmt: Stmt = if is_async {
            StmtAsyncFor {
                range,
                target: Box::new(target),
                iter: Box::new(iter),
                body,
                orelse,
                type_comment,
            }
            .into()
        } else {
            StmtFor {
                range,
                target: Box::new(target),
                iter: Box::new(iter),
                body,
                orelse,
                type_comment,
            }
            .into()
        };
        Ok(Some(stmt))
    }

    // invalid_for_target: ['async'] 'for' star_expressions
    fn invalid_for_target(&mut self) -> ParseResult<()> {
        let mark = self.mark();
        self.expect(TokenKind::Async)?;
        if self.expect(TokenKind::For)?.is_some() {
            if let Some(bad) = self.without_invalid(|p| p.star_expressions())? {
                self.raise_invalid_target(TargetsKind::ForTargets, &bad)?;
            }
        }
        self.reset(mark);
        Ok(())
    }

    // with_stmt:
    //   ['async'] 'with' '(' ','.with_item+ [','] ')' ':' block
    //   | ['async'] 'with' ','.with_item+ ':' [TYPE_COMMENT] block
    fn with_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        let is_async = self.expect(TokenKind::Async)?.is_some();
        if self.expect(TokenKind::With)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }

        // Parenthesized form first; it requires a newer grammar.
        let paren_mark = self.mark();
        if self.expect(TokenKind::Lpar)?.is_some() {
            if let Some(items) = self.with_items()? {
                self.expect(TokenKind::Comma)?;
                if self.expect(TokenKind::Rpar)?.is_some()
                    && self.expect(TokenKind::Colon)?.is_some()
                {
                    self.check_version(9, "Parenthesized context managers are", Some(()))?;
                    if let Some(body) = self.block()? {
                        return Ok(Some(self.make_with(start, is_async, items, None, body)));
                    }
                }
            }
        }
        self.reset(paren_mark);

        if let Some(items) = self.with_items()? {
            if self.expect(TokenKind::Colon)?.is_some() {
                let type_comment = self
                    .expect(TokenKind::TypeComment)?
                    .as_ref()
                    .map(new_type_comment);
                if let Some(body) = self.block()? {
                    return Ok(Some(self.make_with(start, is_async, items, type_comment, body)));
                }
            }
        }
        self.reset(mark);
        if self.call_invalid_rules {
            self.expect(TokenKind::Async)?;
            if self.expect(TokenKind::With)?.is_some() {
                return Err(self.syntax_error_on_next_token("invalid syntax"));
            }
            self.reset(mark);
        }
        Ok(None)
    }

    fn make_with(
        &self,
        start: taipan_parser_core::Location,
        is_async: bool,
        items: Vec<WithItem>,
        type_comment: Option<String>,
        body: Vec<Stmt>,
    ) -> Stmt {
        let range = self.range_from(start);
        if is_async {
            StmtAsyncWith {
                range,
                items,
                body,
                type_comment,
            }
            .into()
        } else {
            StmtWith {
                range,
                items,
                body,
                type_comment,
            }
            .into()
        }
    }

    fn with_items(&mut self) -> ParseResult<Option<Vec<WithItem>>> {
        let Some(first) = self.with_item()? else {
            return Ok(None);
        };
        let mut items = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.with_item()? {
                Some(item) => items.push(item),
                None => {
                    self.reset(mark);
                    break;
                }
            }
        }
        Ok(Some(items))
    }

    // with_item:
    //   expression 'as' star_target &(',' | ')' | ':') | invalid_with_item
    //   | expression
    fn with_item(&mut self) -> ParseResult<Option<WithItem>> {
        let mark = self.mark();
        let start = self.start_location()?;
        let Some(context_expr) = self.expression()? else {
            return Ok(None);
        };
        if self.expect(TokenKind::As)?.is_some() {
            if let Some(target) = self.star_target()? {
                let terminated = matches!(
                    self.peek_kind()?,
                    TokenKind::Comma | TokenKind::Rpar | TokenKind::Colon
                );
                if terminated {
                    return Ok(Some(WithItem {
                        range: self.range_from(start),
                        context_expr,
                        optional_vars: Some(Box::new(target)),
                    }));
                }
            }
            if self.call_invalid_rules {
                self.reset(mark);
                if self.without_invalid(|p| p.expression())?.is_some()
                    && self.expect(TokenKind::As)?.is_some()
                {
                    if let Some(bad) = self.without_invalid(|p| p.expression())? {
                        self.raise_invalid_target(TargetsKind::StarTargets, &bad)?;
                    }
                }
            }
            self.reset(mark);
            return Ok(None);
        }
        Ok(Some(WithItem {
            range: self.range_from(start),
            context_expr,
            optional_vars: None,
        }))
    }

    // try_stmt:
    //   'try' ':' block finally_block
    //   | 'try' ':' block except_block+ [else_block] [finally_block]
    //   | 'try' ':' block except_star_block+ [else_block] [finally_block]
    fn try_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Try)?.is_none() {
            return Ok(None);
        }
        if self.expect(TokenKind::Colon)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_at_last_token("expected ':'"));
            }
            return Ok(None);
        }
        let Some(body) = self.block()? else {
            self.reset(mark);
            return Ok(None);
        };

        if let Some(finalbody) = self.finally_block()? {
            return Ok(Some(
                StmtTry {
                    range: self.range_from(start),
                    body,
                    handlers: Vec::new(),
                    orelse: Vec::new(),
                    finalbody,
                }
                .into(),
            ));
        }

        let is_star = self.lookahead(true, |p| {
            if p.expect(TokenKind::Except)?.is_some() && p.expect(TokenKind::Star)?.is_some() {
                Ok(Some(()))
            } else {
                Ok(None)
            }
        })?;
        let mut handlers = Vec::new();
        loop {
            let inner = self.mark();
            match self.except_block(is_star)? {
                Some(handler) => handlers.push(handler),
                None => {
                    self.reset(inner);
                    break;
                }
            }
        }
        if handlers.is_empty() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_on_next_token(
                    "expected 'except' or 'finally' block",
                ));
            }
            return Ok(None);
        }
        if is_star {
            self.check_version(11, "Exception groups are", Some(()))?;
        }
        let orelse = self.else_block()?.unwrap_or_default();
        let finalbody = self.finally_block()?.unwrap_or_default();
        let range = self.range_from(start);
        let stmt: Stmt = if is_star {
            StmtTryStar {
                range,
                body,
                handlers,
                orelse,
                finalbody,
            }
            .into()
        } else {
            StmtTry {
                range,
                body,
                handlers,
                orelse,
                finalbody,
            }
            .into()
        };
        Ok(Some(stmt))
    }

    // except_block: 'except' ['*'] [expression ['as' NAME]] ':' block
    fn except_block(&mut self, star: bool) -> ParseResult<Option<taipan_ast::ExceptHandler>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Except)?.is_none() {
            return Ok(None);
        }
        if star && self.expect(TokenKind::Star)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        let type_ = self.expression()?;
        if star && type_.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        let name = if type_.is_some() && self.expect(TokenKind::As)?.is_some() {
            match self.identifier()? {
                Some(name) => Some(name),
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
                return Err(self.syntax_error_at_last_token("expected ':'"));
            }
            return Ok(None);
        }
        let Some(body) = self.block()? else {
            self.reset(mark);
            return Ok(None);
        };
        Ok(Some(taipan_ast::ExceptHandler {
            range: self.range_from(start),
            type_: type_.map(Box::new),
            name,
            body,
        }))
    }

    // finally_block: 'finally' ':' block
    fn finally_block(&mut self) -> ParseResult<Option<Vec<Stmt>>> {
        let mark = self.mark();
        if self.expect(TokenKind::Finally)?.is_none() {
            return Ok(None);
        }
        if self.expect(TokenKind::Colon)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_at_last_token("expected ':'"));
            }
            return Ok(None);
        }
        let Some(body) = self.block()? else {
            self.reset(mark);
            return Ok(None);
        };
        Ok(Some(body))
    }

    // class_def: decorators class_def_raw | class_def_raw
    fn class_def(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        if let Some(decorators) = self.decorators()? {
            if let Some(class) = self.class_def_raw()? {
                return Ok(Some(class_def_decorators(decorators, class)));
            }
            self.reset(mark);
            return Ok(None);
        }
        self.reset(mark);
        self.class_def_raw()
    }

    // class_def_raw: 'class' NAME [type_params] ['(' [arguments] ')'] ':' block
    fn class_def_raw(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Class)?.is_none() {
            return Ok(None);
        }
        let Some(name) = self.identifier()? else {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_on_next_token("invalid syntax"));
            }
            return Ok(None);
        };
        let type_params = self.type_params()?.unwrap_or_default();
        let (bases, keywords) = if self.expect(TokenKind::Lpar)?.is_some() {
            let arguments = self.arguments()?.unwrap_or_default();
            if self.expect(TokenKind::Rpar)?.is_none() {
                self.reset(mark);
                return Ok(None);
            }
            arguments
        } else {
            (Vec::new(), Vec::new())
        };
        if self.expect(TokenKind::Colon)?.is_none() {
            self.reset(mark);
            if self.call_invalid_rules {
                return Err(self.syntax_error_at_last_token("expected ':'"));
            }
            return Ok(None);
        }
        let Some(body) = self.block()? else {
            self.reset(mark);
            return Ok(None);
        };
        Ok(Some(
            StmtClassDef {
                range: self.range_from(start),
                name,
                bases,
                keywords,
                body,
                decorator_list: Vec::new(),
                type_params,
            }
            .into(),
        ))
    }

    // --- type statement & type parameters ---------------------------------

    // type_alias: "type" NAME [type_params] '=' expression
    fn type_alias(&mut self) -> ParseResult<Option<Stmt>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect_soft_keyword("type")?.is_none() {
            return Ok(None);
        }
        let Some(name) = self.name_token()? else {
            self.reset(mark);
            return Ok(None);
        };
        let type_params = self.type_params()?.unwrap_or_default();
        if self.expect(TokenKind::Equal)?.is_none() {
            self.reset(mark);
            return Ok(None);
        }
        let Some(value) = self.expression()? else {
            self.reset(mark);
            return Ok(None);
        };
        self.check_version(12, "Type statement is", Some(()))?;
        let name = set_expr_context(name, ExprContext::Store);
        Ok(Some(
            StmtTypeAlias {
                range: self.range_from(start),
                name: Box::new(name),
                type_params,
                value: Box::new(value),
            }
            .into(),
        ))
    }

    // type_params: '[' type_param_seq ']'
    pub(crate) fn type_params(&mut self) -> ParseResult<Option<Vec<TypeParam>>> {
        self.memoize(Rule::TypeParams, |p| {
            let mark = p.mark();
            if p.expect(TokenKind::Lsqb)?.is_none() {
                return Ok(None);
            }
            let Some(params) = p.type_param_seq()? else {
                p.reset(mark);
                return Ok(None);
            };
            if p.expect(TokenKind::Rsqb)?.is_none() {
                p.reset(mark);
                return Ok(None);
            }
            p.check_version(12, "Type parameter lists are", Some(()))?;
            Ok(Some(params))
        })
    }

    // type_param_seq: ','.type_param+ [',']
    fn type_param_seq(&mut self) -> ParseResult<Option<Vec<TypeParam>>> {
        let Some(first) = self.type_param()? else {
            return Ok(None);
        };
        let mut params = vec![first];
        loop {
            let mark = self.mark();
            if self.expect(TokenKind::Comma)?.is_none() {
                break;
            }
            match self.type_param()? {
                Some(param) => params.push(param),
                None => {
                    self.reset(mark);
                    self.expect(TokenKind::Comma)?;
                    break;
                }
            }
        }
        Ok(Some(params))
    }

    // type_param: NAME [':' expression] | '*' NAME | '**' NAME
    fn type_param(&mut self) -> ParseResult<Option<TypeParam>> {
        let mark = self.mark();
        let start = self.start_location()?;
        if self.expect(TokenKind::Star)?.is_some() {
            if let Some(name) = self.identifier()? {
                return Ok(Some(
                    TypeParamTypeVarTuple {
                        range: self.range_from(start),
                        name,
                    }
                    .into(),
                ));
            }
            self.reset(mark);
            return Ok(None);
        }
        if self.expect(TokenKind::DoubleStar)?.is_some() {
            if let Some(name) = self.identifier()? {
                return Ok(Some(
                    TypeParamParamSpec {
                        range: self.range_from(start),
                        name,
                    }
                    .into(),
                ));
            }
            self.reset(mark);
            return Ok(None);
        }
        let Some(name) = self.identifier()? else {
            return Ok(None);
        };
        let bound = if self.expect(TokenKind::Colon)?.is_some() {
            match self.expression()? {
                Some(bound) => Some(bound),
                None => {
                    self.reset(mark);
                    return Ok(None);
                }
            }
        } else {
            None
        };
        Ok(Some(
            TypeParamTypeVar {
                range: self.range_from(start),
                name,
                bound: bound.map(Box::new),
            }
            .into(),
        ))
    }
}
