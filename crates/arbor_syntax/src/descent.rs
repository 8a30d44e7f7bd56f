//! Descent table: per-kind knowledge of which fields hold child nodes.
//!
//! Each node kind maps to a static recipe listing its fields in source order
//! together with their role. Kinds that share a payload shape share one
//! recipe. [`descend`] uses the recipe to rewrite a node's children in place
//! through a caller-supplied walk function; [`Node::slots`] exposes the same
//! fields read-only for inspection.

use std::fmt;
use std::mem;

use arbor_foundation::{Error, Result};

use crate::ast::{Node, NodeKind};

/// Deepest tree that walking, minifying and printing accept.
pub const MAX_TREE_DEPTH: usize = 512;

/// Syntactic position a child field accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Any statement kind.
    Statement,
    /// Any expression kind.
    Expression,
    /// A `VarDef`.
    Definition,
    /// An `ObjectProperty`.
    Property,
    /// A `Case` or `Default`.
    SwitchBranch,
    /// A `Catch` clause.
    Catch,
    /// A `Finally` clause.
    Finally,
    /// A declaration or an expression, as in a `for` head.
    ForInit,
}

impl Slot {
    /// Returns true if a node of `kind` may occupy this slot.
    #[must_use]
    pub const fn accepts(self, kind: NodeKind) -> bool {
        match self {
            Self::Statement => kind.is_statement(),
            Self::Expression => kind.is_expression(),
            Self::Definition => matches!(kind, NodeKind::VarDef),
            Self::Property => matches!(kind, NodeKind::ObjectProperty),
            Self::SwitchBranch => matches!(kind, NodeKind::Case | NodeKind::Default),
            Self::Catch => matches!(kind, NodeKind::Catch),
            Self::Finally => matches!(kind, NodeKind::Finally),
            Self::ForInit => {
                matches!(kind, NodeKind::Var | NodeKind::Let | NodeKind::Const)
                    || kind.is_expression()
            }
        }
    }

    const fn describe(self) -> &'static str {
        match self {
            Self::Statement => "a statement",
            Self::Expression => "an expression",
            Self::Definition => "a VarDef",
            Self::Property => "an ObjectProperty",
            Self::SwitchBranch => "a Case or Default",
            Self::Catch => "a Catch",
            Self::Finally => "a Finally",
            Self::ForInit => "a declaration or expression",
        }
    }
}

/// How a field participates in descent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Scalar data left untouched.
    Literal,
    /// A required child node.
    Child(Slot),
    /// A child node that may be absent.
    Optional(Slot),
    /// An ordered list of child nodes.
    Sequence(Slot),
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal => f.write_str("literal"),
            Self::Child(_) => f.write_str("child"),
            Self::Optional(_) => f.write_str("optional child"),
            Self::Sequence(_) => f.write_str("child sequence"),
        }
    }
}

/// One named field of a recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// Field name as it appears on the payload struct.
    pub name: &'static str,
    /// Role of the field.
    pub role: Role,
}

const fn field(name: &'static str, role: Role) -> Field {
    Field { name, role }
}

use Role::{Child, Literal, Optional, Sequence};

static BODY: [Field; 1] = [field("body", Sequence(Slot::Statement))];
static SIMPLE: [Field; 1] = [field("body", Child(Slot::Expression))];
static DEFINITIONS: [Field; 1] = [field("definitions", Sequence(Slot::Definition))];
static VAR_DEF: [Field; 2] = [
    field("name", Literal),
    field("value", Optional(Slot::Expression)),
];
static IF: [Field; 3] = [
    field("condition", Child(Slot::Expression)),
    field("body", Child(Slot::Statement)),
    field("alternative", Optional(Slot::Statement)),
];
static LOOP: [Field; 2] = [
    field("condition", Child(Slot::Expression)),
    field("body", Child(Slot::Statement)),
];
static FOR: [Field; 4] = [
    field("init", Optional(Slot::ForInit)),
    field("condition", Optional(Slot::Expression)),
    field("step", Optional(Slot::Expression)),
    field("body", Child(Slot::Statement)),
];
static FOR_IN: [Field; 3] = [
    field("init", Child(Slot::ForInit)),
    field("object", Child(Slot::Expression)),
    field("body", Child(Slot::Statement)),
];
static EXIT: [Field; 1] = [field("value", Optional(Slot::Expression))];
static LOOP_CONTROL: [Field; 1] = [field("label", Literal)];
static LABELED: [Field; 2] = [field("label", Literal), field("body", Child(Slot::Statement))];
static SWITCH: [Field; 2] = [
    field("expression", Child(Slot::Expression)),
    field("body", Sequence(Slot::SwitchBranch)),
];
static CASE: [Field; 2] = [
    field("expression", Child(Slot::Expression)),
    field("body", Sequence(Slot::Statement)),
];
static TRY: [Field; 3] = [
    field("body", Sequence(Slot::Statement)),
    field("bcatch", Optional(Slot::Catch)),
    field("bfinally", Optional(Slot::Finally)),
];
static CATCH: [Field; 2] = [
    field("argname", Literal),
    field("body", Sequence(Slot::Statement)),
];
static LAMBDA: [Field; 3] = [
    field("name", Literal),
    field("argnames", Literal),
    field("body", Sequence(Slot::Statement)),
];
static CALL: [Field; 2] = [
    field("expression", Child(Slot::Expression)),
    field("args", Sequence(Slot::Expression)),
];
static SEQUENCE: [Field; 1] = [field("expressions", Sequence(Slot::Expression))];
static DOT: [Field; 2] = [
    field("expression", Child(Slot::Expression)),
    field("property", Literal),
];
static SUB: [Field; 2] = [
    field("expression", Child(Slot::Expression)),
    field("property", Child(Slot::Expression)),
];
static UNARY: [Field; 2] = [
    field("operator", Literal),
    field("expression", Child(Slot::Expression)),
];
static BINARY: [Field; 3] = [
    field("left", Child(Slot::Expression)),
    field("operator", Literal),
    field("right", Child(Slot::Expression)),
];
static CONDITIONAL: [Field; 3] = [
    field("condition", Child(Slot::Expression)),
    field("consequent", Child(Slot::Expression)),
    field("alternative", Child(Slot::Expression)),
];
static ARRAY: [Field; 1] = [field("elements", Sequence(Slot::Expression))];
static OBJECT: [Field; 1] = [field("properties", Sequence(Slot::Property))];
static OBJECT_PROPERTY: [Field; 2] = [
    field("key", Literal),
    field("value", Child(Slot::Expression)),
];

/// Returns the descent recipe for `kind`, or `None` for leaf kinds.
#[must_use]
pub fn recipe(kind: NodeKind) -> Option<&'static [Field]> {
    let fields: &'static [Field] = match kind {
        NodeKind::Toplevel | NodeKind::Block | NodeKind::Finally | NodeKind::Default => &BODY,
        NodeKind::SimpleStatement => &SIMPLE,
        NodeKind::Var | NodeKind::Let | NodeKind::Const => &DEFINITIONS,
        NodeKind::VarDef => &VAR_DEF,
        NodeKind::If => &IF,
        NodeKind::While | NodeKind::Do => &LOOP,
        NodeKind::For => &FOR,
        NodeKind::ForIn => &FOR_IN,
        NodeKind::Return | NodeKind::Throw => &EXIT,
        NodeKind::Break | NodeKind::Continue => &LOOP_CONTROL,
        NodeKind::Labeled => &LABELED,
        NodeKind::Switch => &SWITCH,
        NodeKind::Case => &CASE,
        NodeKind::Try => &TRY,
        NodeKind::Catch => &CATCH,
        NodeKind::Defun | NodeKind::Function => &LAMBDA,
        NodeKind::Call | NodeKind::New => &CALL,
        NodeKind::Sequence => &SEQUENCE,
        NodeKind::Dot => &DOT,
        NodeKind::Sub => &SUB,
        NodeKind::UnaryPrefix | NodeKind::UnaryPostfix => &UNARY,
        NodeKind::Binary | NodeKind::Assign => &BINARY,
        NodeKind::Conditional => &CONDITIONAL,
        NodeKind::Array => &ARRAY,
        NodeKind::Object => &OBJECT,
        NodeKind::ObjectProperty => &OBJECT_PROPERTY,
        NodeKind::EmptyStatement
        | NodeKind::Debugger
        | NodeKind::Identifier
        | NodeKind::Number
        | NodeKind::String
        | NodeKind::Boolean
        | NodeKind::Null
        | NodeKind::This => return None,
    };
    Some(fields)
}

/// Result of walking one node.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Keep this node (possibly a replacement) in place.
    Node(Node),
    /// Drop this node from its parent.
    Removed,
}

impl Outcome {
    /// Returns the node, or `None` if it was removed.
    #[must_use]
    pub fn into_node(self) -> Option<Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Removed => None,
        }
    }
}

impl From<Node> for Outcome {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

/// Read-only view of one field, in recipe order.
#[derive(Debug)]
pub enum SlotRef<'a> {
    /// Scalar data.
    Literal,
    /// A required child.
    Child(&'a Node),
    /// A child that may be absent.
    Optional(Option<&'a Node>),
    /// A list of children.
    Sequence(&'a [Node]),
}

impl<'a> SlotRef<'a> {
    /// Iterates over the child nodes held by this field.
    #[must_use]
    pub fn nodes(&self) -> std::slice::Iter<'a, Node> {
        let slice: &'a [Node] = match *self {
            Self::Literal | Self::Optional(None) => &[],
            Self::Child(node) | Self::Optional(Some(node)) => std::slice::from_ref(node),
            Self::Sequence(nodes) => nodes,
        };
        slice.iter()
    }
}

/// Mutable view of one field, in recipe order.
#[derive(Debug)]
pub enum SlotMut<'a> {
    /// Scalar data.
    Literal,
    /// A required child.
    Child(&'a mut Box<Node>),
    /// A child that may be absent.
    Optional(&'a mut Option<Box<Node>>),
    /// A list of children.
    Sequence(&'a mut Vec<Node>),
}

impl SlotMut<'_> {
    const fn shape(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Child(_) => "child",
            Self::Optional(_) => "optional child",
            Self::Sequence(_) => "child sequence",
        }
    }
}

macro_rules! slots {
    ($node:expr, $child:ident, $opt:ident, $seq:ident, $lit:expr) => {
        match $node {
            Node::Toplevel(b) | Node::Block(b) | Node::Finally(b) | Node::Default(b) => {
                vec![$seq!(b.body)]
            }
            Node::SimpleStatement(s) => vec![$child!(s.body)],
            Node::Var(d) | Node::Let(d) | Node::Const(d) => vec![$seq!(d.definitions)],
            Node::VarDef(v) => vec![$lit, $opt!(v.value)],
            Node::If(i) => vec![$child!(i.condition), $child!(i.body), $opt!(i.alternative)],
            Node::While(l) | Node::Do(l) => vec![$child!(l.condition), $child!(l.body)],
            Node::For(f) => vec![
                $opt!(f.init),
                $opt!(f.condition),
                $opt!(f.step),
                $child!(f.body),
            ],
            Node::ForIn(f) => vec![$child!(f.init), $child!(f.object), $child!(f.body)],
            Node::Return(e) | Node::Throw(e) => vec![$opt!(e.value)],
            Node::Break(_) | Node::Continue(_) => vec![$lit],
            Node::Labeled(l) => vec![$lit, $child!(l.body)],
            Node::Switch(s) => vec![$child!(s.expression), $seq!(s.body)],
            Node::Case(c) => vec![$child!(c.expression), $seq!(c.body)],
            Node::Try(t) => vec![$seq!(t.body), $opt!(t.bcatch), $opt!(t.bfinally)],
            Node::Catch(c) => vec![$lit, $seq!(c.body)],
            Node::Defun(l) | Node::Function(l) => vec![$lit, $lit, $seq!(l.body)],
            Node::Call(c) | Node::New(c) => vec![$child!(c.expression), $seq!(c.args)],
            Node::Sequence(s) => vec![$seq!(s.expressions)],
            Node::Dot(d) => vec![$child!(d.expression), $lit],
            Node::Sub(s) => vec![$child!(s.expression), $child!(s.property)],
            Node::UnaryPrefix(u) | Node::UnaryPostfix(u) => vec![$lit, $child!(u.expression)],
            Node::Binary(b) | Node::Assign(b) => vec![$child!(b.left), $lit, $child!(b.right)],
            Node::Conditional(c) => vec![
                $child!(c.condition),
                $child!(c.consequent),
                $child!(c.alternative),
            ],
            Node::Array(a) => vec![$seq!(a.elements)],
            Node::Object(o) => vec![$seq!(o.properties)],
            Node::ObjectProperty(p) => vec![$lit, $child!(p.value)],
            Node::EmptyStatement
            | Node::Debugger
            | Node::Identifier(_)
            | Node::Number(_)
            | Node::String(_)
            | Node::Boolean(_)
            | Node::Null
            | Node::This => Vec::new(),
        }
    };
}

macro_rules! child_ref {
    ($e:expr) => {
        SlotRef::Child(&$e)
    };
}
macro_rules! opt_ref {
    ($e:expr) => {
        SlotRef::Optional($e.as_deref())
    };
}
macro_rules! seq_ref {
    ($e:expr) => {
        SlotRef::Sequence(&$e)
    };
}
macro_rules! child_mut {
    ($e:expr) => {
        SlotMut::Child(&mut $e)
    };
}
macro_rules! opt_mut {
    ($e:expr) => {
        SlotMut::Optional(&mut $e)
    };
}
macro_rules! seq_mut {
    ($e:expr) => {
        SlotMut::Sequence(&mut $e)
    };
}

impl Node {
    /// Returns this node's fields in recipe order. Leaves return no fields.
    #[must_use]
    pub fn slots(&self) -> Vec<SlotRef<'_>> {
        slots!(self, child_ref, opt_ref, seq_ref, SlotRef::Literal)
    }

    /// Returns mutable views of this node's fields in recipe order.
    pub fn slots_mut(&mut self) -> Vec<SlotMut<'_>> {
        slots!(self, child_mut, opt_mut, seq_mut, SlotMut::Literal)
    }

    /// Iterates over the direct children of this node in recipe order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.slots().into_iter().flat_map(|slot| slot.nodes())
    }

    /// Number of levels in this tree; a leaf has depth 1.
    ///
    /// Uses an explicit stack, so trees too deep to walk can still be measured.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Checks that this tree is no deeper than [`MAX_TREE_DEPTH`].
    ///
    /// # Errors
    ///
    /// Returns a structural error naming the root kind when the tree is too
    /// deep for the recursive passes.
    pub fn check_depth(&self) -> Result<()> {
        let depth = self.depth();
        if depth > MAX_TREE_DEPTH {
            return Err(Error::structural(
                self.kind().name(),
                "depth",
                format!("tree is {depth} levels deep, limit is {MAX_TREE_DEPTH}"),
            ));
        }
        Ok(())
    }
}

/// Rewrites the children of `node` in place by passing each one to `walk`.
///
/// Required children that come back [`Outcome::Removed`] become
/// `EmptyStatement` in statement position and are a structural error
/// elsewhere. Removed optional children become absent; removed sequence
/// elements are dropped. Every resulting child must be accepted by its
/// field's [`Slot`]. Errors carry a `Kind.field` frame for each level.
///
/// # Errors
///
/// Returns a structural error when a field does not match its recipe, and
/// propagates any error returned by `walk`.
pub fn descend<F>(mut node: Node, mut walk: F) -> Result<Node>
where
    F: FnMut(Node) -> Result<Outcome>,
{
    let kind = node.kind();
    let Some(fields) = recipe(kind) else {
        return Ok(node);
    };

    let slots = node.slots_mut();
    if slots.len() != fields.len() {
        return Err(Error::internal(format!(
            "{kind} recipe lists {} fields but the node exposes {}",
            fields.len(),
            slots.len()
        )));
    }

    for (field, slot) in fields.iter().zip(slots) {
        descend_field(kind, *field, slot, &mut walk)
            .map_err(|e| e.with_frame(format!("{kind}.{}", field.name)))?;
    }
    Ok(node)
}

fn descend_field<F>(kind: NodeKind, field: Field, slot: SlotMut<'_>, walk: &mut F) -> Result<()>
where
    F: FnMut(Node) -> Result<Outcome>,
{
    match (field.role, slot) {
        (Role::Literal, SlotMut::Literal) => {}
        (Role::Child(accepts), SlotMut::Child(child)) => {
            let current = mem::take(&mut **child);
            match walk(current)? {
                Outcome::Node(new) => {
                    check_slot(kind, field, accepts, &new)?;
                    **child = new;
                }
                Outcome::Removed if accepts == Slot::Statement => {
                    **child = Node::EmptyStatement;
                }
                Outcome::Removed => {
                    return Err(Error::structural(
                        kind.name(),
                        field.name,
                        format!("{} is required and cannot be removed", accepts.describe()),
                    ));
                }
            }
        }
        (Role::Optional(accepts), SlotMut::Optional(optional)) => {
            if let Some(child) = optional.take() {
                if let Outcome::Node(new) = walk(*child)? {
                    check_slot(kind, field, accepts, &new)?;
                    *optional = Some(Box::new(new));
                }
            }
        }
        (Role::Sequence(accepts), SlotMut::Sequence(items)) => {
            let current = mem::take(items);
            let mut kept = Vec::with_capacity(current.len());
            for item in current {
                if let Outcome::Node(new) = walk(item)? {
                    check_slot(kind, field, accepts, &new)?;
                    kept.push(new);
                }
            }
            *items = kept;
        }
        (role, slot) => {
            return Err(Error::structural(
                kind.name(),
                field.name,
                format!("recipe expects a {role}, node holds a {}", slot.shape()),
            ));
        }
    }
    Ok(())
}

fn check_slot(kind: NodeKind, field: Field, accepts: Slot, node: &Node) -> Result<()> {
    if accepts.accepts(node.kind()) {
        Ok(())
    } else {
        Err(Error::structural(
            kind.name(),
            field.name,
            format!("expected {}, found {}", accepts.describe(), node.kind()),
        ))
    }
}
