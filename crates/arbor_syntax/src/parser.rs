//! Parser for JavaScript source.
//!
//! A recursive-descent parser producing [`Node`] trees. Statements are
//! terminated by `;` or by automatic semicolon insertion before `}`, at end
//! of input, or after a line break. Binary operators are parsed by precedence
//! climbing.

use arbor_foundation::{Error, Result};

use crate::ast::{
    Array, Binary, BinaryOp, Body, Call, Case, Catch, Conditional, Definitions, Dot, Exit, For,
    ForIn, If, Labeled, Lambda, Loop, LoopControl, Node, Object, ObjectProperty, Sequence,
    SimpleStatement, Sub, Switch, Try, Unary, UnaryOp, VarDef,
};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Keyword, Token, TokenKind};

/// Maximum recursive nesting of statements and expressions.
const MAX_DEPTH: usize = 48;

/// Maximum depth of the tree being built, where each link of an operator or
/// member chain counts as a level.
const MAX_TREE_DEPTH: usize = 256;

/// Parser for JavaScript source code.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead), never trivia.
    current: Token,
    /// Token after `current`, filled on demand.
    peeked: Option<Token>,
    /// Source text (for error messages).
    source: &'src str,
    /// Current recursion depth.
    depth: usize,
    /// Current tree depth, including chain links.
    tree_depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = next_significant(&mut lexer);
        Self {
            lexer,
            current,
            peeked: None,
            source,
            depth: 0,
            tree_depth: 0,
        }
    }

    /// Parses a whole program into a `Toplevel` node.
    ///
    /// # Errors
    /// Returns a parse error if the source is not a valid program.
    pub fn parse_program(&mut self) -> Result<Node> {
        let mut body = Vec::new();
        while self.current.kind != TokenKind::Eof {
            body.push(self.parse_statement()?);
        }
        Ok(Node::Toplevel(Body { body }))
    }

    /// Parses a single expression that must span the whole input.
    ///
    /// # Errors
    /// Returns a parse error if the source is not exactly one expression.
    pub fn parse_single_expression(&mut self) -> Result<Node> {
        let expr = self.parse_expression(false)?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.unexpected());
        }
        Ok(expr)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self) -> Result<Node> {
        self.nested(Self::parse_statement_inner)
    }

    fn parse_statement_inner(&mut self) -> Result<Node> {
        if matches!(self.current.kind, TokenKind::Identifier(_)) && self.peek().is_punct(":") {
            return self.parse_labeled();
        }
        match &self.current.kind {
            TokenKind::Punct("{") => Ok(Node::Block(Body {
                body: self.parse_block_body()?,
            })),
            TokenKind::Punct(";") => {
                self.advance();
                Ok(Node::EmptyStatement)
            }
            &TokenKind::Keyword(keyword) => match keyword {
                Keyword::Var | Keyword::Let | Keyword::Const => {
                    let defs = self.parse_definitions(false)?;
                    self.consume_semicolon()?;
                    Ok(defs)
                }
                Keyword::If => self.parse_if(),
                Keyword::While => self.parse_while(),
                Keyword::Do => self.parse_do(),
                Keyword::For => self.parse_for(),
                Keyword::Return => self.parse_exit(Keyword::Return),
                Keyword::Throw => self.parse_exit(Keyword::Throw),
                Keyword::Break => self.parse_loop_control(Keyword::Break),
                Keyword::Continue => self.parse_loop_control(Keyword::Continue),
                Keyword::Switch => self.parse_switch(),
                Keyword::Try => self.parse_try(),
                Keyword::Function => {
                    self.advance();
                    let lambda = self.parse_lambda(true)?;
                    Ok(Node::Defun(lambda))
                }
                Keyword::Debugger => {
                    self.advance();
                    self.consume_semicolon()?;
                    Ok(Node::Debugger)
                }
                _ => self.parse_expression_statement(),
            },
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> Result<Node> {
        let expr = self.parse_expression(false)?;
        self.consume_semicolon()?;
        Ok(Node::SimpleStatement(SimpleStatement {
            body: Box::new(expr),
        }))
    }

    /// Parses `{ statements }` and returns the statements.
    fn parse_block_body(&mut self) -> Result<Vec<Node>> {
        let start_span = self.current.span;
        self.expect_punct("{")?;
        let mut body = Vec::new();
        while !self.current.is_punct("}") {
            if self.current.kind == TokenKind::Eof {
                return Err(self.error_at(start_span, "unterminated block"));
            }
            body.push(self.parse_statement()?);
        }
        self.advance();
        Ok(body)
    }

    /// Parses `var`/`let`/`const` followed by one or more bindings.
    fn parse_definitions(&mut self, no_in: bool) -> Result<Node> {
        let keyword = self.expect_any_keyword()?;
        let mut definitions = Vec::new();
        loop {
            let name = self.expect_identifier()?;
            let value = if self.current.is_punct("=") {
                self.advance();
                Some(Box::new(self.parse_assignment(no_in)?))
            } else {
                None
            };
            definitions.push(Node::VarDef(VarDef { name, value }));
            if !self.current.is_punct(",") {
                break;
            }
            self.advance();
        }
        let defs = Definitions { definitions };
        Ok(match keyword {
            Keyword::Let => Node::Let(defs),
            Keyword::Const => Node::Const(defs),
            _ => Node::Var(defs),
        })
    }

    fn parse_if(&mut self) -> Result<Node> {
        self.advance();
        let condition = self.parse_parenthesized()?;
        let body = self.parse_statement()?;
        let alternative = if self.current.is_keyword(Keyword::Else) {
            self.advance();
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Node::If(If {
            condition: Box::new(condition),
            body: Box::new(body),
            alternative,
        }))
    }

    fn parse_while(&mut self) -> Result<Node> {
        self.advance();
        let condition = self.parse_parenthesized()?;
        let body = self.parse_statement()?;
        Ok(Node::While(Loop {
            condition: Box::new(condition),
            body: Box::new(body),
        }))
    }

    fn parse_do(&mut self) -> Result<Node> {
        self.advance();
        let body = self.parse_statement()?;
        if !self.current.is_keyword(Keyword::While) {
            return Err(self.error(&format!(
                "expected 'while', found {}",
                self.current.kind.name()
            )));
        }
        self.advance();
        let condition = self.parse_parenthesized()?;
        if self.current.is_punct(";") {
            self.advance();
        }
        Ok(Node::Do(Loop {
            condition: Box::new(condition),
            body: Box::new(body),
        }))
    }

    fn parse_for(&mut self) -> Result<Node> {
        self.advance();
        self.expect_punct("(")?;

        let init = if self.current.is_punct(";") {
            None
        } else if matches!(
            self.current.kind,
            TokenKind::Keyword(Keyword::Var | Keyword::Let | Keyword::Const)
        ) {
            Some(self.parse_definitions(true)?)
        } else {
            Some(self.parse_expression(true)?)
        };

        if self.current.is_keyword(Keyword::In) {
            if let Some(init) = init {
                return self.parse_for_in(init);
            }
        }

        self.expect_punct(";")?;
        let condition = self.parse_optional_expression(";")?;
        self.expect_punct(";")?;
        let step = self.parse_optional_expression(")")?;
        self.expect_punct(")")?;
        let body = self.parse_statement()?;

        Ok(Node::For(For {
            init: init.map(Box::new),
            condition,
            step,
            body: Box::new(body),
        }))
    }

    fn parse_for_in(&mut self, init: Node) -> Result<Node> {
        match &init {
            Node::Var(d) | Node::Let(d) | Node::Const(d) if d.definitions.len() != 1 => {
                return Err(self.error("for-in declares exactly one binding"));
            }
            Node::Var(_) | Node::Let(_) | Node::Const(_) => {}
            other if !is_assignable(other) => {
                return Err(self.error("invalid for-in target"));
            }
            _ => {}
        }
        self.advance(); // consume 'in'
        let object = self.parse_expression(false)?;
        self.expect_punct(")")?;
        let body = self.parse_statement()?;
        Ok(Node::ForIn(ForIn {
            init: Box::new(init),
            object: Box::new(object),
            body: Box::new(body),
        }))
    }

    fn parse_optional_expression(&mut self, terminator: &str) -> Result<Option<Box<Node>>> {
        if self.current.is_punct(terminator) {
            Ok(None)
        } else {
            Ok(Some(Box::new(self.parse_expression(false)?)))
        }
    }

    fn parse_exit(&mut self, keyword: Keyword) -> Result<Node> {
        self.advance();
        let value = if self.at_statement_end() {
            if keyword == Keyword::Throw {
                return Err(self.error("expected an expression after 'throw'"));
            }
            None
        } else {
            Some(Box::new(self.parse_expression(false)?))
        };
        self.consume_semicolon()?;
        let exit = Exit { value };
        Ok(if keyword == Keyword::Throw {
            Node::Throw(exit)
        } else {
            Node::Return(exit)
        })
    }

    fn parse_loop_control(&mut self, keyword: Keyword) -> Result<Node> {
        self.advance();
        let label = match &self.current.kind {
            TokenKind::Identifier(name) if !self.current.newline_before => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            _ => None,
        };
        self.consume_semicolon()?;
        let control = LoopControl { label };
        Ok(if keyword == Keyword::Break {
            Node::Break(control)
        } else {
            Node::Continue(control)
        })
    }

    fn parse_labeled(&mut self) -> Result<Node> {
        let label = self.expect_identifier()?;
        self.expect_punct(":")?;
        let body = self.parse_statement()?;
        Ok(Node::Labeled(Labeled {
            label,
            body: Box::new(body),
        }))
    }

    fn parse_switch(&mut self) -> Result<Node> {
        self.advance();
        let expression = self.parse_parenthesized()?;
        let start_span = self.current.span;
        self.expect_punct("{")?;

        let mut branches = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::Punct("}") => {
                    self.advance();
                    break;
                }
                TokenKind::Keyword(Keyword::Case) => {
                    self.advance();
                    let test = self.parse_expression(false)?;
                    self.expect_punct(":")?;
                    let body = self.parse_branch_body()?;
                    branches.push(Node::Case(Case {
                        expression: Box::new(test),
                        body,
                    }));
                }
                TokenKind::Keyword(Keyword::Default) => {
                    self.advance();
                    self.expect_punct(":")?;
                    let body = self.parse_branch_body()?;
                    branches.push(Node::Default(Body { body }));
                }
                TokenKind::Eof => return Err(self.error_at(start_span, "unterminated switch")),
                _ => return Err(self.unexpected()),
            }
        }

        Ok(Node::Switch(Switch {
            expression: Box::new(expression),
            body: branches,
        }))
    }

    /// Parses the statements of one `case`/`default` branch.
    fn parse_branch_body(&mut self) -> Result<Vec<Node>> {
        let mut body = Vec::new();
        while !matches!(
            self.current.kind,
            TokenKind::Punct("}")
                | TokenKind::Keyword(Keyword::Case | Keyword::Default)
                | TokenKind::Eof
        ) {
            body.push(self.parse_statement()?);
        }
        Ok(body)
    }

    fn parse_try(&mut self) -> Result<Node> {
        self.advance();
        let body = self.parse_block_body()?;

        let bcatch = if self.current.is_keyword(Keyword::Catch) {
            self.advance();
            self.expect_punct("(")?;
            let argname = self.expect_identifier()?;
            self.expect_punct(")")?;
            let body = self.parse_block_body()?;
            Some(Box::new(Node::Catch(Catch { argname, body })))
        } else {
            None
        };

        let bfinally = if self.current.is_keyword(Keyword::Finally) {
            self.advance();
            let body = self.parse_block_body()?;
            Some(Box::new(Node::Finally(Body { body })))
        } else {
            None
        };

        if bcatch.is_none() && bfinally.is_none() {
            return Err(self.error("expected 'catch' or 'finally' after try block"));
        }

        Ok(Node::Try(Try {
            body,
            bcatch,
            bfinally,
        }))
    }

    /// Parses the rest of a function after the `function` keyword.
    fn parse_lambda(&mut self, require_name: bool) -> Result<Lambda> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            _ if require_name => return Err(self.error("function declaration requires a name")),
            _ => None,
        };

        self.expect_punct("(")?;
        let mut argnames = Vec::new();
        while !self.current.is_punct(")") {
            argnames.push(self.expect_identifier()?);
            if !self.current.is_punct(",") {
                break;
            }
            self.advance();
        }
        self.expect_punct(")")?;

        let body = self.parse_block_body()?;
        Ok(Lambda {
            name,
            argnames,
            body,
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parses a comma-separated expression. `no_in` disables the `in`
    /// operator for `for` heads.
    fn parse_expression(&mut self, no_in: bool) -> Result<Node> {
        let first = self.parse_assignment(no_in)?;
        if !self.current.is_punct(",") {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.current.is_punct(",") {
            self.advance();
            expressions.push(self.parse_assignment(no_in)?);
        }
        Ok(Node::Sequence(Sequence { expressions }))
    }

    fn parse_assignment(&mut self, no_in: bool) -> Result<Node> {
        self.nested(|p| p.parse_assignment_inner(no_in))
    }

    fn parse_assignment_inner(&mut self, no_in: bool) -> Result<Node> {
        let start_span = self.current.span;
        let left = self.parse_conditional(no_in)?;

        let operator = match &self.current.kind {
            TokenKind::Punct(p) => BinaryOp::from_symbol(p).filter(|op| op.is_assignment()),
            _ => None,
        };
        let Some(operator) = operator else {
            return Ok(left);
        };

        if !is_assignable(&left) {
            return Err(self.error_at(start_span, "invalid assignment target"));
        }
        self.advance();
        let right = self.parse_assignment(no_in)?;
        Ok(Node::Assign(Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_conditional(&mut self, no_in: bool) -> Result<Node> {
        let condition = self.parse_binary(BinaryOp::Or.precedence(), no_in)?;
        if !self.current.is_punct("?") {
            return Ok(condition);
        }
        self.advance();
        let consequent = self.parse_assignment(false)?;
        self.expect_punct(":")?;
        let alternative = self.parse_assignment(no_in)?;
        Ok(Node::Conditional(Conditional {
            condition: Box::new(condition),
            consequent: Box::new(consequent),
            alternative: Box::new(alternative),
        }))
    }

    /// Precedence climbing over left-associative binary operators.
    fn parse_binary(&mut self, min_precedence: u8, no_in: bool) -> Result<Node> {
        let base = self.tree_depth;
        let mut left = self.parse_unary()?;
        loop {
            let operator = match &self.current.kind {
                TokenKind::Punct(p) => BinaryOp::from_symbol(p),
                TokenKind::Keyword(Keyword::In) if !no_in => Some(BinaryOp::In),
                TokenKind::Keyword(Keyword::InstanceOf) => Some(BinaryOp::InstanceOf),
                _ => None,
            };
            let Some(operator) = operator.filter(|op| !op.is_assignment()) else {
                break;
            };
            let precedence = operator.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance();
            self.chain_link()?;
            let right = self.parse_binary(precedence + 1, no_in)?;
            left = Node::Binary(Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            });
        }
        self.tree_depth = base;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Node> {
        let operator = match &self.current.kind {
            TokenKind::Punct(p @ ("!" | "~" | "-" | "+" | "++" | "--")) => UnaryOp::from_symbol(p),
            TokenKind::Keyword(k @ (Keyword::TypeOf | Keyword::Void | Keyword::Delete)) => {
                UnaryOp::from_symbol(k.as_str())
            }
            _ => None,
        };
        let Some(operator) = operator else {
            return self.parse_postfix();
        };

        let start_span = self.current.span;
        self.advance();
        let expression = self.nested(Self::parse_unary)?;
        if matches!(operator, UnaryOp::Increment | UnaryOp::Decrement)
            && !is_assignable(&expression)
        {
            return Err(self.error_at(start_span, "invalid increment/decrement operand"));
        }
        Ok(Node::UnaryPrefix(Unary {
            operator,
            expression: Box::new(expression),
        }))
    }

    fn parse_postfix(&mut self) -> Result<Node> {
        let expression = self.parse_call_member(true)?;
        let operator = match self.current.kind {
            TokenKind::Punct("++") if !self.current.newline_before => UnaryOp::Increment,
            TokenKind::Punct("--") if !self.current.newline_before => UnaryOp::Decrement,
            _ => return Ok(expression),
        };
        if !is_assignable(&expression) {
            return Err(self.error("invalid increment/decrement operand"));
        }
        self.advance();
        Ok(Node::UnaryPostfix(Unary {
            operator,
            expression: Box::new(expression),
        }))
    }

    /// Parses member accesses and, when `allow_call` is set, calls.
    fn parse_call_member(&mut self, allow_call: bool) -> Result<Node> {
        let base = self.tree_depth;
        let mut expr = if self.current.is_keyword(Keyword::New) {
            self.advance();
            let callee = self.nested(|p| p.parse_call_member(false))?;
            let args = if self.current.is_punct("(") {
                self.parse_arguments()?
            } else {
                Vec::new()
            };
            Node::New(Call {
                expression: Box::new(callee),
                args,
            })
        } else {
            self.parse_primary()?
        };

        loop {
            let link = self.current.is_punct(".")
                || self.current.is_punct("[")
                || (allow_call && self.current.is_punct("("));
            if link {
                self.chain_link()?;
            }
            if self.current.is_punct(".") {
                self.advance();
                let property = match &self.current.kind {
                    TokenKind::Identifier(name) => name.clone(),
                    TokenKind::Keyword(k) => k.as_str().to_string(),
                    _ => return Err(self.error("expected property name after '.'")),
                };
                self.advance();
                expr = Node::Dot(Dot {
                    expression: Box::new(expr),
                    property,
                });
            } else if self.current.is_punct("[") {
                self.advance();
                let property = self.parse_expression(false)?;
                self.expect_punct("]")?;
                expr = Node::Sub(Sub {
                    expression: Box::new(expr),
                    property: Box::new(property),
                });
            } else if allow_call && self.current.is_punct("(") {
                let args = self.parse_arguments()?;
                expr = Node::Call(Call {
                    expression: Box::new(expr),
                    args,
                });
            } else {
                self.tree_depth = base;
                return Ok(expr);
            }
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Node>> {
        self.expect_punct("(")?;
        let mut args = Vec::new();
        while !self.current.is_punct(")") {
            args.push(self.parse_assignment(false)?);
            if !self.current.is_punct(",") {
                break;
            }
            self.advance();
        }
        self.expect_punct(")")?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Node> {
        let node = match &self.current.kind {
            TokenKind::Identifier(name) => Node::Identifier(name.clone()),
            TokenKind::Number(n) => Node::Number(*n),
            TokenKind::String(s) => Node::String(s.clone()),
            TokenKind::Keyword(Keyword::True) => Node::Boolean(true),
            TokenKind::Keyword(Keyword::False) => Node::Boolean(false),
            TokenKind::Keyword(Keyword::Null) => Node::Null,
            TokenKind::Keyword(Keyword::This) => Node::This,
            TokenKind::Keyword(Keyword::Function) => {
                self.advance();
                return Ok(Node::Function(self.parse_lambda(false)?));
            }
            TokenKind::Punct("(") => return self.parse_parenthesized(),
            TokenKind::Punct("[") => return self.parse_array(),
            TokenKind::Punct("{") => return self.parse_object(),
            _ => return Err(self.unexpected()),
        };
        self.advance();
        Ok(node)
    }

    /// Parses `( expression )`.
    fn parse_parenthesized(&mut self) -> Result<Node> {
        self.expect_punct("(")?;
        let expr = self.parse_expression(false)?;
        self.expect_punct(")")?;
        Ok(expr)
    }

    fn parse_array(&mut self) -> Result<Node> {
        let start_span = self.current.span;
        self.expect_punct("[")?;
        let mut elements = Vec::new();
        while !self.current.is_punct("]") {
            if self.current.kind == TokenKind::Eof {
                return Err(self.error_at(start_span, "unterminated array literal"));
            }
            if self.current.is_punct(",") {
                return Err(self.error("array holes are not supported"));
            }
            elements.push(self.parse_assignment(false)?);
            if !self.current.is_punct(",") {
                break;
            }
            self.advance();
        }
        self.expect_punct("]")?;
        Ok(Node::Array(Array { elements }))
    }

    fn parse_object(&mut self) -> Result<Node> {
        let start_span = self.current.span;
        self.expect_punct("{")?;
        let mut properties = Vec::new();
        while !self.current.is_punct("}") {
            let key = match &self.current.kind {
                TokenKind::Identifier(name) | TokenKind::String(name) => name.clone(),
                TokenKind::Keyword(k) => k.as_str().to_string(),
                TokenKind::Number(_) => self.current.text(self.source).to_string(),
                TokenKind::Eof => {
                    return Err(self.error_at(start_span, "unterminated object literal"));
                }
                _ => return Err(self.error("expected property name")),
            };
            self.advance();
            self.expect_punct(":")?;
            let value = self.parse_assignment(false)?;
            properties.push(Node::ObjectProperty(ObjectProperty {
                key,
                value: Box::new(value),
            }));
            if !self.current.is_punct(",") {
                break;
            }
            self.advance();
        }
        self.expect_punct("}")?;
        Ok(Node::Object(Object { properties }))
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    /// Runs `f` one nesting level deeper, failing past [`MAX_DEPTH`] or
    /// [`MAX_TREE_DEPTH`].
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH || self.tree_depth >= MAX_TREE_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        let tree_depth = self.tree_depth;
        self.depth += 1;
        self.tree_depth += 1;
        let result = f(self);
        self.depth -= 1;
        self.tree_depth = tree_depth;
        result
    }

    /// Charges one link of an operator or member chain. The chain's parser
    /// resets `tree_depth` once the chain is complete.
    fn chain_link(&mut self) -> Result<()> {
        if self.tree_depth >= MAX_TREE_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.tree_depth += 1;
        Ok(())
    }

    /// Advances to the next significant token.
    fn advance(&mut self) {
        self.current = match self.peeked.take() {
            Some(token) => token,
            None => next_significant(&mut self.lexer),
        };
    }

    /// Returns the token after the current one.
    fn peek(&mut self) -> &Token {
        self.peeked
            .get_or_insert_with(|| next_significant(&mut self.lexer))
    }

    /// True where automatic semicolon insertion may end a statement.
    fn at_statement_end(&self) -> bool {
        self.current.newline_before
            || matches!(
                self.current.kind,
                TokenKind::Punct(";" | "}") | TokenKind::Eof
            )
    }

    /// Consumes a `;`, or accepts an inserted one.
    fn consume_semicolon(&mut self) -> Result<()> {
        if self.current.is_punct(";") {
            self.advance();
            Ok(())
        } else if self.at_statement_end() {
            Ok(())
        } else {
            Err(self.error(&format!(
                "expected ';', found {}",
                self.current.kind.name()
            )))
        }
    }

    /// Expects the current token to be the given punctuator, then advances.
    fn expect_punct(&mut self, punct: &str) -> Result<()> {
        if self.current.is_punct(punct) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!(
                "expected '{punct}', found {}",
                self.current.kind.name()
            )))
        }
    }

    /// Expects an identifier and returns its name.
    fn expect_identifier(&mut self) -> Result<String> {
        if let TokenKind::Identifier(name) = &self.current.kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error(&format!(
                "expected identifier, found {}",
                self.current.kind.name()
            )))
        }
    }

    /// Consumes any keyword and returns it.
    fn expect_any_keyword(&mut self) -> Result<Keyword> {
        if let TokenKind::Keyword(keyword) = self.current.kind {
            self.advance();
            Ok(keyword)
        } else {
            Err(self.unexpected())
        }
    }

    /// Creates an error for the current token, using the lexer's message for
    /// error tokens.
    fn unexpected(&self) -> Error {
        match &self.current.kind {
            TokenKind::Error(message) => self.error(message),
            TokenKind::Eof => self.error("unexpected end of input"),
            other => self.error(&format!("unexpected {}", other.name())),
        }
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    /// Creates a parse error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::parse(message, span.line, span.column, self.context_at(span))
    }

    /// Gets the source line containing a span.
    fn context_at(&self, span: Span) -> String {
        let start = span.start.min(self.source.len());
        let line_start = self.source[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = self.source[start..]
            .find('\n')
            .map_or(self.source.len(), |i| start + i);

        self.source[line_start..line_end].to_string()
    }
}

/// Pulls tokens until one that is not trivia.
fn next_significant(lexer: &mut Lexer<'_>) -> Token {
    loop {
        let token = lexer.next_token();
        if !token.kind.is_trivia() {
            return token;
        }
    }
}

/// Returns true for expressions that may appear on the left of `=`.
fn is_assignable(node: &Node) -> bool {
    matches!(node, Node::Identifier(_) | Node::Dot(_) | Node::Sub(_))
}

/// Parses a program into a `Toplevel` node.
///
/// # Errors
/// Returns a parse error carrying line, column, and the offending source line.
pub fn parse(source: &str) -> Result<Node> {
    Parser::new(source).parse_program()
}

/// Parses a single expression.
///
/// # Errors
/// Returns a parse error if the source is not exactly one expression.
pub fn parse_expression(source: &str) -> Result<Node> {
    Parser::new(source).parse_single_expression()
}
