//! Printer for syntax trees.
//!
//! Converts a [`Node`] back into JavaScript source, either compact (no
//! optional whitespace, final semicolon of each block omitted) or beautified
//! (indented, one statement per line).
//!
//! # Example
//!
//! ```
//! use arbor_syntax::{parse, pretty::{print, PrettyConfig}};
//!
//! let tree = parse("var a = 1, b = 5;").unwrap();
//! assert_eq!(print(&tree, &PrettyConfig::compact()), "var a=1,b=5");
//! ```

use std::mem;

use crate::ast::{BinaryOp, Definitions, If, Lambda, Node, Switch, Try};

/// Configuration for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrettyConfig {
    /// Indent, spaces, and one statement per line.
    pub beautify: bool,
    /// Number of spaces for each indentation level when beautifying.
    pub indent_width: usize,
    /// Terminate every statement with `;`, including the last in a block.
    pub semicolons: bool,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self::compact()
    }
}

impl PrettyConfig {
    /// Smallest output: no optional whitespace or semicolons.
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            beautify: false,
            indent_width: 4,
            semicolons: false,
        }
    }

    /// Human-readable output.
    #[must_use]
    pub const fn beautified() -> Self {
        Self {
            beautify: true,
            indent_width: 4,
            semicolons: true,
        }
    }

    /// Sets the indentation width.
    #[must_use]
    pub const fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Sets whether every statement is terminated.
    #[must_use]
    pub const fn with_semicolons(mut self, semicolons: bool) -> Self {
        self.semicolons = semicolons;
        self
    }
}

/// Prints a tree with the given configuration.
#[must_use]
pub fn print(node: &Node, config: &PrettyConfig) -> String {
    let mut printer = Printer::new(config);
    printer.node(node);
    printer.output
}

/// Prints a tree in compact form.
#[must_use]
pub fn print_compact(node: &Node) -> String {
    print(node, &PrettyConfig::compact())
}

/// Prints a tree in beautified form.
#[must_use]
pub fn print_beautified(node: &Node) -> String {
    print(node, &PrettyConfig::beautified())
}

/// Printer state.
struct Printer<'c> {
    config: &'c PrettyConfig,
    output: String,
    indent_level: usize,
    /// Inside a `for` head, where a bare `in` would end the init clause.
    no_in: bool,
}

impl<'c> Printer<'c> {
    fn new(config: &'c PrettyConfig) -> Self {
        Self {
            config,
            output: String::new(),
            indent_level: 0,
            no_in: false,
        }
    }

    fn node(&mut self, node: &Node) {
        let kind = node.kind();
        if kind.is_expression() {
            self.expression(node, 0);
        } else {
            self.statement(node, false);
        }
    }

    // =========================================================================
    // Output primitives
    // =========================================================================

    /// Appends a token, inserting a space where the two would otherwise fuse.
    fn push(&mut self, text: &str) {
        if let (Some(last), Some(first)) = (self.output.chars().next_back(), text.chars().next()) {
            let fuse = (is_word_char(last) && is_word_char(first))
                || (last == '+' && first == '+')
                || (last == '-' && first == '-');
            if fuse {
                self.output.push(' ');
            }
        }
        self.output.push_str(text);
    }

    /// Optional whitespace, only when beautifying.
    fn space(&mut self) {
        if self.config.beautify {
            self.output.push(' ');
        }
    }

    /// Line break plus indentation, only when beautifying.
    fn newline(&mut self) {
        if self.config.beautify {
            self.output.push('\n');
            let width = self.indent_level * self.config.indent_width;
            self.output.extend(std::iter::repeat_n(' ', width));
        }
    }

    fn comma(&mut self) {
        self.push(",");
        self.space();
    }

    fn semicolon(&mut self, terminate: bool) {
        if terminate {
            self.push(";");
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Prints a statement; `terminate` requests a trailing `;` where one is
    /// syntactically optional.
    fn statement(&mut self, node: &Node, terminate: bool) {
        let terminate = terminate || self.config.beautify || self.config.semicolons;
        match node {
            Node::Toplevel(b) => self.statement_list(&b.body, false),
            Node::Block(b) => self.block(&b.body),
            Node::EmptyStatement => self.push(";"),
            Node::SimpleStatement(s) => {
                if starts_ambiguously(&s.body) {
                    self.push("(");
                    self.expression(&s.body, 0);
                    self.push(")");
                } else {
                    self.expression(&s.body, 0);
                }
                self.semicolon(terminate);
            }
            Node::Var(d) => self.definitions("var", d, terminate),
            Node::Let(d) => self.definitions("let", d, terminate),
            Node::Const(d) => self.definitions("const", d, terminate),
            Node::If(i) => self.if_statement(i, terminate),
            Node::While(l) => {
                self.push("while");
                self.space();
                self.parenthesized(&l.condition);
                self.body(&l.body, terminate);
            }
            Node::Do(l) => {
                self.push("do");
                self.body(&l.body, true);
                self.space();
                self.push("while");
                self.space();
                self.parenthesized(&l.condition);
                self.semicolon(terminate);
            }
            Node::For(f) => {
                self.push("for");
                self.space();
                self.push("(");
                if let Some(init) = &f.init {
                    self.for_init(init);
                }
                self.push(";");
                if let Some(condition) = &f.condition {
                    self.space();
                    self.expression(condition, 0);
                }
                self.push(";");
                if let Some(step) = &f.step {
                    self.space();
                    self.expression(step, 0);
                }
                self.push(")");
                self.body(&f.body, terminate);
            }
            Node::ForIn(f) => {
                self.push("for");
                self.space();
                self.push("(");
                self.for_init(&f.init);
                self.push("in");
                self.space();
                self.expression(&f.object, 0);
                self.push(")");
                self.body(&f.body, terminate);
            }
            Node::Return(e) | Node::Throw(e) => {
                self.push(if matches!(node, Node::Return(_)) {
                    "return"
                } else {
                    "throw"
                });
                if let Some(value) = &e.value {
                    self.space();
                    self.expression(value, 0);
                }
                self.semicolon(terminate);
            }
            Node::Break(c) | Node::Continue(c) => {
                self.push(if matches!(node, Node::Break(_)) {
                    "break"
                } else {
                    "continue"
                });
                if let Some(label) = &c.label {
                    self.push(label);
                }
                self.semicolon(terminate);
            }
            Node::Labeled(l) => {
                self.push(&l.label);
                self.push(":");
                self.space();
                self.statement(&l.body, terminate);
            }
            Node::Switch(s) => self.switch(s),
            Node::Try(t) => self.try_statement(t),
            Node::Defun(l) => self.lambda(l),
            Node::Debugger => {
                self.push("debugger");
                self.semicolon(terminate);
            }
            Node::VarDef(_)
            | Node::Case(_)
            | Node::Default(_)
            | Node::Catch(_)
            | Node::Finally(_)
            | Node::ObjectProperty(_) => self.fragment(node),
            _ => {
                self.expression(node, 0);
                self.semicolon(terminate);
            }
        }
    }

    fn statement_list(&mut self, body: &[Node], terminate_last: bool) {
        let last = body.len().saturating_sub(1);
        for (i, stmt) in body.iter().enumerate() {
            if i > 0 {
                self.newline();
            }
            self.statement(stmt, i < last || terminate_last);
        }
    }

    fn block(&mut self, body: &[Node]) {
        if body.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent_level += 1;
        self.newline();
        self.statement_list(body, false);
        self.indent_level -= 1;
        self.newline();
        self.push("}");
    }

    /// Body of a compound statement.
    fn body(&mut self, node: &Node, terminate: bool) {
        if !node.is_empty_statement() {
            self.space();
        }
        self.statement(node, terminate);
    }

    fn parenthesized(&mut self, node: &Node) {
        self.push("(");
        self.expression(node, 0);
        self.push(")");
    }

    fn definitions(&mut self, keyword: &str, defs: &Definitions, terminate: bool) {
        self.definition_list(keyword, defs);
        self.semicolon(terminate);
    }

    fn definition_list(&mut self, keyword: &str, defs: &Definitions) {
        self.push(keyword);
        for (i, def) in defs.definitions.iter().enumerate() {
            if i > 0 {
                self.comma();
            } else {
                self.space();
            }
            self.fragment(def);
        }
    }

    fn for_init(&mut self, init: &Node) {
        let outer = mem::replace(&mut self.no_in, true);
        match init {
            Node::Var(d) => self.definition_list("var", d),
            Node::Let(d) => self.definition_list("let", d),
            Node::Const(d) => self.definition_list("const", d),
            other => self.expression(other, 0),
        }
        self.no_in = outer;
    }

    fn if_statement(&mut self, node: &If, terminate: bool) {
        self.push("if");
        self.space();
        self.parenthesized(&node.condition);
        let Some(alternative) = &node.alternative else {
            self.body(&node.body, terminate);
            return;
        };

        if ends_with_open_if(&node.body) {
            self.space();
            self.block(std::slice::from_ref(&*node.body));
        } else {
            self.body(&node.body, true);
        }
        self.space();
        self.push("else");
        self.body(alternative, terminate);
    }

    fn switch(&mut self, node: &Switch) {
        self.push("switch");
        self.space();
        self.parenthesized(&node.expression);
        self.space();
        if node.body.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent_level += 1;
        let last_branch = node.body.len() - 1;
        for (i, branch) in node.body.iter().enumerate() {
            self.newline();
            self.branch(branch, i < last_branch);
        }
        self.indent_level -= 1;
        self.newline();
        self.push("}");
    }

    /// Prints a `case`/`default` branch.
    fn branch(&mut self, node: &Node, terminate_last: bool) {
        let body = match node {
            Node::Case(c) => {
                self.push("case");
                self.space();
                self.expression(&c.expression, 0);
                &c.body
            }
            Node::Default(b) => {
                self.push("default");
                &b.body
            }
            other => {
                self.statement(other, terminate_last);
                return;
            }
        };
        self.push(":");
        if body.is_empty() {
            return;
        }
        self.indent_level += 1;
        self.newline();
        self.statement_list(body, terminate_last);
        self.indent_level -= 1;
    }

    fn try_statement(&mut self, node: &Try) {
        self.push("try");
        self.space();
        self.block(&node.body);
        if let Some(bcatch) = &node.bcatch {
            self.space();
            self.fragment(bcatch);
        }
        if let Some(bfinally) = &node.bfinally {
            self.space();
            self.fragment(bfinally);
        }
    }

    fn lambda(&mut self, node: &Lambda) {
        let outer = mem::replace(&mut self.no_in, false);
        self.push("function");
        if let Some(name) = &node.name {
            self.push(name);
        }
        self.push("(");
        for (i, arg) in node.argnames.iter().enumerate() {
            if i > 0 {
                self.comma();
            }
            self.push(arg);
        }
        self.push(")");
        self.space();
        self.block(&node.body);
        self.no_in = outer;
    }

    /// Prints nodes that only occur inside a parent's syntax.
    fn fragment(&mut self, node: &Node) {
        match node {
            Node::VarDef(v) => {
                self.push(&v.name);
                if let Some(value) = &v.value {
                    self.space();
                    self.push("=");
                    self.space();
                    self.expression(value, 2);
                }
            }
            Node::Case(_) | Node::Default(_) => self.branch(node, false),
            Node::Catch(c) => {
                self.push("catch");
                self.space();
                self.push("(");
                self.push(&c.argname);
                self.push(")");
                self.space();
                self.block(&c.body);
            }
            Node::Finally(b) => {
                self.push("finally");
                self.space();
                self.block(&b.body);
            }
            Node::ObjectProperty(p) => {
                self.push(&property_key(&p.key));
                self.push(":");
                self.space();
                self.expression(&p.value, 2);
            }
            other => self.node(other),
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Prints an expression, parenthesised if it binds looser than `min` or
    /// is an `in` test inside a `for` head.
    fn expression(&mut self, node: &Node, min: u8) {
        let bare_in = self.no_in && matches!(node, Node::Binary(b) if b.operator == BinaryOp::In);
        if precedence(node) < min || bare_in {
            let outer = mem::replace(&mut self.no_in, false);
            self.push("(");
            self.expression_inner(node);
            self.push(")");
            self.no_in = outer;
        } else {
            self.expression_inner(node);
        }
    }

    fn expression_inner(&mut self, node: &Node) {
        match node {
            Node::Identifier(name) => self.push(name),
            Node::Number(n) => self.push(&format_number(*n)),
            Node::String(s) => self.push(&quote(s)),
            Node::Boolean(true) => self.push("true"),
            Node::Boolean(false) => self.push("false"),
            Node::Null => self.push("null"),
            Node::This => self.push("this"),
            Node::Function(l) => self.lambda(l),
            Node::Call(c) => {
                self.expression(&c.expression, 17);
                self.arguments(&c.args);
            }
            Node::New(c) => {
                self.push("new");
                if contains_call(&c.expression) {
                    self.push("(");
                    self.expression(&c.expression, 0);
                    self.push(")");
                } else {
                    self.expression(&c.expression, 17);
                }
                self.arguments(&c.args);
            }
            Node::Sequence(s) => {
                for (i, expr) in s.expressions.iter().enumerate() {
                    if i > 0 {
                        self.comma();
                    }
                    self.expression(expr, 2);
                }
            }
            Node::Dot(d) => {
                if matches!(*d.expression, Node::Number(_)) {
                    self.push("(");
                    self.expression(&d.expression, 0);
                    self.push(")");
                } else {
                    self.expression(&d.expression, 17);
                }
                self.push(".");
                self.push(&d.property);
            }
            Node::Sub(s) => {
                self.expression(&s.expression, 17);
                self.push("[");
                self.expression(&s.property, 0);
                self.push("]");
            }
            Node::UnaryPrefix(u) => {
                self.push(u.operator.symbol());
                self.expression(&u.expression, 14);
            }
            Node::UnaryPostfix(u) => {
                self.expression(&u.expression, 16);
                self.push(u.operator.symbol());
            }
            Node::Binary(b) => {
                let p = b.operator.precedence();
                self.expression(&b.left, p);
                self.space();
                self.push(b.operator.symbol());
                self.space();
                self.expression(&b.right, p + 1);
            }
            Node::Assign(b) => {
                self.expression(&b.left, 16);
                self.space();
                self.push(b.operator.symbol());
                self.space();
                self.expression(&b.right, 2);
            }
            Node::Conditional(c) => {
                self.expression(&c.condition, 4);
                self.space();
                self.push("?");
                self.space();
                self.expression(&c.consequent, 2);
                self.space();
                self.push(":");
                self.space();
                self.expression(&c.alternative, 2);
            }
            Node::Array(a) => {
                self.push("[");
                for (i, element) in a.elements.iter().enumerate() {
                    if i > 0 {
                        self.comma();
                    }
                    self.expression(element, 2);
                }
                self.push("]");
            }
            Node::Object(o) => {
                self.push("{");
                for (i, property) in o.properties.iter().enumerate() {
                    if i > 0 {
                        self.comma();
                    }
                    self.fragment(property);
                }
                self.push("}");
            }
            other => self.statement(other, false),
        }
    }

    fn arguments(&mut self, args: &[Node]) {
        self.push("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.comma();
            }
            self.expression(arg, 2);
        }
        self.push(")");
    }
}

/// Binding strength of an expression; higher binds tighter.
fn precedence(node: &Node) -> u8 {
    match node {
        Node::Sequence(_) => 1,
        Node::Assign(_) => 2,
        Node::Conditional(_) => 3,
        Node::Binary(b) => b.operator.precedence(),
        Node::UnaryPrefix(_) => 14,
        Node::Number(n) if n.is_sign_negative() && !n.is_nan() => 14,
        Node::UnaryPostfix(_) => 15,
        Node::Call(_) | Node::New(_) | Node::Dot(_) | Node::Sub(_) => 17,
        _ => 18,
    }
}

/// True if an expression statement would begin with `{` or `function`.
fn starts_ambiguously(node: &Node) -> bool {
    match node {
        Node::Object(_) | Node::Function(_) => true,
        Node::Binary(b) | Node::Assign(b) => starts_ambiguously(&b.left),
        Node::Call(c) => starts_ambiguously(&c.expression),
        Node::Dot(d) => starts_ambiguously(&d.expression),
        Node::Sub(s) => starts_ambiguously(&s.expression),
        Node::UnaryPostfix(u) => starts_ambiguously(&u.expression),
        Node::Conditional(c) => starts_ambiguously(&c.condition),
        Node::Sequence(s) => s.expressions.first().is_some_and(starts_ambiguously),
        _ => false,
    }
}

/// True if a statement ends in an `if` without `else`, which would capture a
/// following `else`.
fn ends_with_open_if(node: &Node) -> bool {
    match node {
        Node::If(i) => i.alternative.as_deref().is_none_or(ends_with_open_if),
        Node::While(l) => ends_with_open_if(&l.body),
        Node::For(f) => ends_with_open_if(&f.body),
        Node::ForIn(f) => ends_with_open_if(&f.body),
        Node::Labeled(l) => ends_with_open_if(&l.body),
        _ => false,
    }
}

/// True if a `new` callee contains a call, which `new` would otherwise take
/// as its own argument list.
fn contains_call(node: &Node) -> bool {
    match node {
        Node::Call(_) => true,
        Node::Dot(d) => contains_call(&d.expression),
        Node::Sub(s) => contains_call(&s.expression),
        _ => false,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Formats a number the way it reads in source.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n.abs() >= 1e21 {
        format!("{n:e}")
    } else {
        format!("{n}")
    }
}

/// Quotes a string literal with double quotes.
#[must_use]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() && (c as u32) < 0x100 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Prints an object key bare when it is an identifier name or canonical
/// number, quoted otherwise.
fn property_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_name = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(is_word_char);
    let is_number = key
        .parse::<f64>()
        .is_ok_and(|n| n >= 0.0 && format_number(n) == key);
    if is_name || is_number {
        key.to_string()
    } else {
        quote(key)
    }
}
