//! Node model for JavaScript syntax trees.
//!
//! Every node kind is a variant of [`Node`]. Kinds that share a shape (for
//! example `While` and `Do`) share one payload struct, and therefore one
//! descent recipe (see [`crate::descent`]).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A syntax tree node.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "fields"))]
pub enum Node {
    // Statements
    /// The program root.
    Toplevel(Body),
    /// `{ ... }`
    Block(Body),
    /// `;`
    #[default]
    EmptyStatement,
    /// An expression used as a statement.
    SimpleStatement(SimpleStatement),
    /// `var a = 1, b;`
    Var(Definitions),
    /// `let a = 1;`
    Let(Definitions),
    /// `const a = 1;`
    Const(Definitions),
    /// One binding inside a `var`/`let`/`const`.
    VarDef(VarDef),
    /// `if (c) body else alternative`
    If(If),
    /// `while (c) body`
    While(Loop),
    /// `do body while (c)`
    Do(Loop),
    /// `for (init; condition; step) body`
    For(For),
    /// `for (init in object) body`
    ForIn(ForIn),
    /// `return value;`
    Return(Exit),
    /// `throw value;`
    Throw(Exit),
    /// `break label;`
    Break(LoopControl),
    /// `continue label;`
    Continue(LoopControl),
    /// `label: body`
    Labeled(Labeled),
    /// `switch (e) { ... }`
    Switch(Switch),
    /// `case e: ...`
    Case(Case),
    /// `default: ...`
    Default(Body),
    /// `try { ... } catch ... finally ...`
    Try(Try),
    /// `catch (e) { ... }`
    Catch(Catch),
    /// `finally { ... }`
    Finally(Body),
    /// Function declaration.
    Defun(Lambda),
    /// `debugger;`
    Debugger,

    // Expressions
    /// Function expression.
    Function(Lambda),
    /// `f(args)`
    Call(Call),
    /// `new F(args)`
    New(Call),
    /// `a, b, c`
    Sequence(Sequence),
    /// `object.property`
    Dot(Dot),
    /// `object[property]`
    Sub(Sub),
    /// `!x`, `-x`, `typeof x`, `++x`, ...
    UnaryPrefix(Unary),
    /// `x++`, `x--`
    UnaryPostfix(Unary),
    /// `a + b`, `a && b`, ...
    Binary(Binary),
    /// `a = b`, `a += b`, ...
    Assign(Binary),
    /// `c ? a : b`
    Conditional(Conditional),
    /// `[a, b]`
    Array(Array),
    /// `{ key: value }`
    Object(Object),
    /// One `key: value` entry of an object literal.
    ObjectProperty(ObjectProperty),

    // Leaves
    /// Identifier reference or binding name.
    Identifier(String),
    /// Numeric literal.
    Number(f64),
    /// String literal.
    String(String),
    /// `true` / `false`
    Boolean(bool),
    /// `null`
    Null,
    /// `this`
    This,
}

/// A sequence of statements.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Body {
    /// Statements in order.
    pub body: Vec<Node>,
}

/// Expression statement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimpleStatement {
    /// The expression.
    pub body: Box<Node>,
}

/// Declaration list shared by `var`, `let`, and `const`.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Definitions {
    /// `VarDef` nodes.
    pub definitions: Vec<Node>,
}

/// A single declared binding.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VarDef {
    /// Binding name.
    pub name: String,
    /// Initializer, if any.
    pub value: Option<Box<Node>>,
}

/// `if` statement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct If {
    /// Test expression.
    pub condition: Box<Node>,
    /// Statement run when the test passes.
    pub body: Box<Node>,
    /// `else` statement, if any.
    pub alternative: Option<Box<Node>>,
}

/// Shape shared by `while` and `do`/`while`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Loop {
    /// Loop test.
    pub condition: Box<Node>,
    /// Loop body.
    pub body: Box<Node>,
}

/// Classic three-clause `for`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct For {
    /// Declaration or expression run once.
    pub init: Option<Box<Node>>,
    /// Loop test.
    pub condition: Option<Box<Node>>,
    /// Update expression.
    pub step: Option<Box<Node>>,
    /// Loop body.
    pub body: Box<Node>,
}

/// `for ... in`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForIn {
    /// Declaration or assignment target.
    pub init: Box<Node>,
    /// Object being enumerated.
    pub object: Box<Node>,
    /// Loop body.
    pub body: Box<Node>,
}

/// Shape shared by `return` and `throw`.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exit {
    /// Returned or thrown value.
    pub value: Option<Box<Node>>,
}

/// Shape shared by `break` and `continue`.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoopControl {
    /// Target label, if any.
    pub label: Option<String>,
}

/// Labeled statement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Labeled {
    /// Label name.
    pub label: String,
    /// Labeled statement.
    pub body: Box<Node>,
}

/// `switch` statement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Switch {
    /// Discriminant.
    pub expression: Box<Node>,
    /// `Case` and `Default` branches.
    pub body: Vec<Node>,
}

/// `case` branch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Case {
    /// Value compared against the discriminant.
    pub expression: Box<Node>,
    /// Statements of this branch.
    pub body: Vec<Node>,
}

/// `try` statement.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Try {
    /// Protected statements.
    pub body: Vec<Node>,
    /// `Catch` clause.
    pub bcatch: Option<Box<Node>>,
    /// `Finally` clause.
    pub bfinally: Option<Box<Node>>,
}

/// `catch` clause.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Catch {
    /// Bound exception name.
    pub argname: String,
    /// Handler statements.
    pub body: Vec<Node>,
}

/// Shape shared by function declarations and expressions.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lambda {
    /// Function name; required for declarations.
    pub name: Option<String>,
    /// Parameter names.
    pub argnames: Vec<String>,
    /// Function body.
    pub body: Vec<Node>,
}

/// Shape shared by calls and `new` expressions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// Callee.
    pub expression: Box<Node>,
    /// Arguments.
    pub args: Vec<Node>,
}

/// Comma expression.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sequence {
    /// Expressions evaluated left to right.
    pub expressions: Vec<Node>,
}

/// Static member access.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dot {
    /// Object.
    pub expression: Box<Node>,
    /// Property name.
    pub property: String,
}

/// Computed member access.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sub {
    /// Object.
    pub expression: Box<Node>,
    /// Property expression.
    pub property: Box<Node>,
}

/// Shape shared by prefix and postfix unary expressions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// Operator.
    pub operator: UnaryOp,
    /// Operand.
    pub expression: Box<Node>,
}

/// Shape shared by binary and assignment expressions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// Left operand or assignment target.
    pub left: Box<Node>,
    /// Operator.
    pub operator: BinaryOp,
    /// Right operand.
    pub right: Box<Node>,
}

/// Ternary expression.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Conditional {
    /// Test expression.
    pub condition: Box<Node>,
    /// Value when the test passes.
    pub consequent: Box<Node>,
    /// Value when the test fails.
    pub alternative: Box<Node>,
}

/// Array literal.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Array {
    /// Elements.
    pub elements: Vec<Node>,
}

/// Object literal.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Object {
    /// `ObjectProperty` nodes.
    pub properties: Vec<Node>,
}

/// `key: value` entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectProperty {
    /// Property key as written (unquoted).
    pub key: String,
    /// Property value.
    pub value: Box<Node>,
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `~`
    BitNot,
    /// `-`
    Neg,
    /// `+`
    Plus,
    /// `typeof`
    TypeOf,
    /// `void`
    Void,
    /// `delete`
    Delete,
    /// `++`
    Increment,
    /// `--`
    Decrement,
}

impl UnaryOp {
    /// Source text of this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::BitNot => "~",
            Self::Neg => "-",
            Self::Plus => "+",
            Self::TypeOf => "typeof",
            Self::Void => "void",
            Self::Delete => "delete",
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }

    /// Looks up a prefix operator by its source text.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "!" => Self::Not,
            "~" => Self::BitNot,
            "-" => Self::Neg,
            "+" => Self::Plus,
            "typeof" => Self::TypeOf,
            "void" => Self::Void,
            "delete" => Self::Delete,
            "++" => Self::Increment,
            "--" => Self::Decrement,
            _ => return None,
        })
    }
}

/// Binary and assignment operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[allow(missing_docs)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Gt,
    Le,
    Ge,
    In,
    InstanceOf,
    Shl,
    Shr,
    UShr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    ShlAssign,
    ShrAssign,
    UShrAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
}

impl BinaryOp {
    const ALL: [Self; 35] = [
        Self::Or,
        Self::And,
        Self::BitOr,
        Self::BitXor,
        Self::BitAnd,
        Self::Eq,
        Self::NotEq,
        Self::StrictEq,
        Self::StrictNotEq,
        Self::Lt,
        Self::Gt,
        Self::Le,
        Self::Ge,
        Self::In,
        Self::InstanceOf,
        Self::Shl,
        Self::Shr,
        Self::UShr,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Rem,
        Self::Assign,
        Self::AddAssign,
        Self::SubAssign,
        Self::MulAssign,
        Self::DivAssign,
        Self::RemAssign,
        Self::ShlAssign,
        Self::ShrAssign,
        Self::UShrAssign,
        Self::BitAndAssign,
        Self::BitOrAssign,
        Self::BitXorAssign,
    ];

    /// Source text of this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::In => "in",
            Self::InstanceOf => "instanceof",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::RemAssign => "%=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::UShrAssign => ">>>=",
            Self::BitAndAssign => "&=",
            Self::BitOrAssign => "|=",
            Self::BitXorAssign => "^=",
        }
    }

    /// Looks up an operator by its source text.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Binding power; higher binds tighter. Assignment operators share 2.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 4,
            Self::And => 5,
            Self::BitOr => 6,
            Self::BitXor => 7,
            Self::BitAnd => 8,
            Self::Eq | Self::NotEq | Self::StrictEq | Self::StrictNotEq => 9,
            Self::Lt | Self::Gt | Self::Le | Self::Ge | Self::In | Self::InstanceOf => 10,
            Self::Shl | Self::Shr | Self::UShr => 11,
            Self::Add | Self::Sub => 12,
            Self::Mul | Self::Div | Self::Rem => 13,
            _ => 2,
        }
    }

    /// Returns true for `=` and the compound assignment operators.
    #[must_use]
    pub const fn is_assignment(self) -> bool {
        self.precedence() == 2
    }

    /// Returns true for `&&` and `||`.
    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// Discriminant of a [`Node`], used to key the descent table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum NodeKind {
    Toplevel,
    Block,
    EmptyStatement,
    SimpleStatement,
    Var,
    Let,
    Const,
    VarDef,
    If,
    While,
    Do,
    For,
    ForIn,
    Return,
    Throw,
    Break,
    Continue,
    Labeled,
    Switch,
    Case,
    Default,
    Try,
    Catch,
    Finally,
    Defun,
    Debugger,
    Function,
    Call,
    New,
    Sequence,
    Dot,
    Sub,
    UnaryPrefix,
    UnaryPostfix,
    Binary,
    Assign,
    Conditional,
    Array,
    Object,
    ObjectProperty,
    Identifier,
    Number,
    String,
    Boolean,
    Null,
    This,
}

impl NodeKind {
    /// Stable name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Toplevel => "Toplevel",
            Self::Block => "Block",
            Self::EmptyStatement => "EmptyStatement",
            Self::SimpleStatement => "SimpleStatement",
            Self::Var => "Var",
            Self::Let => "Let",
            Self::Const => "Const",
            Self::VarDef => "VarDef",
            Self::If => "If",
            Self::While => "While",
            Self::Do => "Do",
            Self::For => "For",
            Self::ForIn => "ForIn",
            Self::Return => "Return",
            Self::Throw => "Throw",
            Self::Break => "Break",
            Self::Continue => "Continue",
            Self::Labeled => "Labeled",
            Self::Switch => "Switch",
            Self::Case => "Case",
            Self::Default => "Default",
            Self::Try => "Try",
            Self::Catch => "Catch",
            Self::Finally => "Finally",
            Self::Defun => "Defun",
            Self::Debugger => "Debugger",
            Self::Function => "Function",
            Self::Call => "Call",
            Self::New => "New",
            Self::Sequence => "Sequence",
            Self::Dot => "Dot",
            Self::Sub => "Sub",
            Self::UnaryPrefix => "UnaryPrefix",
            Self::UnaryPostfix => "UnaryPostfix",
            Self::Binary => "Binary",
            Self::Assign => "Assign",
            Self::Conditional => "Conditional",
            Self::Array => "Array",
            Self::Object => "Object",
            Self::ObjectProperty => "ObjectProperty",
            Self::Identifier => "Identifier",
            Self::Number => "Number",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Null => "Null",
            Self::This => "This",
        }
    }

    /// Returns true for kinds that may appear where a statement is expected.
    #[must_use]
    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            Self::Block
                | Self::EmptyStatement
                | Self::SimpleStatement
                | Self::Var
                | Self::Let
                | Self::Const
                | Self::If
                | Self::While
                | Self::Do
                | Self::For
                | Self::ForIn
                | Self::Return
                | Self::Throw
                | Self::Break
                | Self::Continue
                | Self::Labeled
                | Self::Switch
                | Self::Try
                | Self::Defun
                | Self::Debugger
        )
    }

    /// Returns true for kinds that may appear where an expression is expected.
    #[must_use]
    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            Self::Function
                | Self::Call
                | Self::New
                | Self::Sequence
                | Self::Dot
                | Self::Sub
                | Self::UnaryPrefix
                | Self::UnaryPostfix
                | Self::Binary
                | Self::Assign
                | Self::Conditional
                | Self::Array
                | Self::Object
                | Self::Identifier
                | Self::Number
                | Self::String
                | Self::Boolean
                | Self::Null
                | Self::This
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Node {
    /// Returns the kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Toplevel(_) => NodeKind::Toplevel,
            Self::Block(_) => NodeKind::Block,
            Self::EmptyStatement => NodeKind::EmptyStatement,
            Self::SimpleStatement(_) => NodeKind::SimpleStatement,
            Self::Var(_) => NodeKind::Var,
            Self::Let(_) => NodeKind::Let,
            Self::Const(_) => NodeKind::Const,
            Self::VarDef(_) => NodeKind::VarDef,
            Self::If(_) => NodeKind::If,
            Self::While(_) => NodeKind::While,
            Self::Do(_) => NodeKind::Do,
            Self::For(_) => NodeKind::For,
            Self::ForIn(_) => NodeKind::ForIn,
            Self::Return(_) => NodeKind::Return,
            Self::Throw(_) => NodeKind::Throw,
            Self::Break(_) => NodeKind::Break,
            Self::Continue(_) => NodeKind::Continue,
            Self::Labeled(_) => NodeKind::Labeled,
            Self::Switch(_) => NodeKind::Switch,
            Self::Case(_) => NodeKind::Case,
            Self::Default(_) => NodeKind::Default,
            Self::Try(_) => NodeKind::Try,
            Self::Catch(_) => NodeKind::Catch,
            Self::Finally(_) => NodeKind::Finally,
            Self::Defun(_) => NodeKind::Defun,
            Self::Debugger => NodeKind::Debugger,
            Self::Function(_) => NodeKind::Function,
            Self::Call(_) => NodeKind::Call,
            Self::New(_) => NodeKind::New,
            Self::Sequence(_) => NodeKind::Sequence,
            Self::Dot(_) => NodeKind::Dot,
            Self::Sub(_) => NodeKind::Sub,
            Self::UnaryPrefix(_) => NodeKind::UnaryPrefix,
            Self::UnaryPostfix(_) => NodeKind::UnaryPostfix,
            Self::Binary(_) => NodeKind::Binary,
            Self::Assign(_) => NodeKind::Assign,
            Self::Conditional(_) => NodeKind::Conditional,
            Self::Array(_) => NodeKind::Array,
            Self::Object(_) => NodeKind::Object,
            Self::ObjectProperty(_) => NodeKind::ObjectProperty,
            Self::Identifier(_) => NodeKind::Identifier,
            Self::Number(_) => NodeKind::Number,
            Self::String(_) => NodeKind::String,
            Self::Boolean(_) => NodeKind::Boolean,
            Self::Null => NodeKind::Null,
            Self::This => NodeKind::This,
        }
    }

    /// A human-readable type name for this node.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns the identifier name, or None if not an identifier.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the numeric value, or None if not a number literal.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string value, or None if not a string literal.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the statements of a `Toplevel` or `Block`.
    #[must_use]
    pub fn as_statements(&self) -> Option<&[Node]> {
        match self {
            Self::Toplevel(body) | Self::Block(body) => Some(&body.body),
            _ => None,
        }
    }

    /// Returns true if this is an `EmptyStatement`.
    #[must_use]
    pub const fn is_empty_statement(&self) -> bool {
        matches!(self, Self::EmptyStatement)
    }
}

/// Constructors for building trees by hand (filters, tests, tools).
impl Node {
    /// Creates an identifier.
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Creates a number literal.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Creates a boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Boolean(value)
    }

    /// Creates a program root.
    #[must_use]
    pub fn toplevel(body: Vec<Node>) -> Self {
        Self::Toplevel(Body { body })
    }

    /// Creates a block statement.
    #[must_use]
    pub fn block(body: Vec<Node>) -> Self {
        Self::Block(Body { body })
    }

    /// Wraps an expression as a statement.
    #[must_use]
    pub fn simple(expression: Node) -> Self {
        Self::SimpleStatement(SimpleStatement {
            body: Box::new(expression),
        })
    }

    /// Creates an `if` statement.
    #[must_use]
    pub fn if_else(condition: Node, body: Node, alternative: Option<Node>) -> Self {
        Self::If(If {
            condition: Box::new(condition),
            body: Box::new(body),
            alternative: alternative.map(Box::new),
        })
    }

    /// Creates a ternary expression.
    #[must_use]
    pub fn conditional(condition: Node, consequent: Node, alternative: Node) -> Self {
        Self::Conditional(Conditional {
            condition: Box::new(condition),
            consequent: Box::new(consequent),
            alternative: Box::new(alternative),
        })
    }

    /// Creates a call expression.
    #[must_use]
    pub fn call(callee: Node, args: Vec<Node>) -> Self {
        Self::Call(Call {
            expression: Box::new(callee),
            args,
        })
    }

    /// Creates a binary expression. Assignment operators produce `Assign`.
    #[must_use]
    pub fn binary(operator: BinaryOp, left: Node, right: Node) -> Self {
        let binary = Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        };
        if operator.is_assignment() {
            Self::Assign(binary)
        } else {
            Self::Binary(binary)
        }
    }

    /// Creates a prefix unary expression.
    #[must_use]
    pub fn prefix(operator: UnaryOp, expression: Node) -> Self {
        Self::UnaryPrefix(Unary {
            operator,
            expression: Box::new(expression),
        })
    }

    /// Creates a `var` declaration from `(name, initializer)` pairs.
    #[must_use]
    pub fn var(bindings: Vec<(&str, Option<Node>)>) -> Self {
        let definitions = bindings
            .into_iter()
            .map(|(name, value)| {
                Self::VarDef(VarDef {
                    name: name.to_string(),
                    value: value.map(Box::new),
                })
            })
            .collect();
        Self::Var(Definitions { definitions })
    }
}
