//! Dead-branch elimination.
//!
//! [`DeadBranchFilter`] evaluates the test of every `if` statement and
//! conditional expression with three-valued logic. A test that is known to
//! pass keeps only the consequent; one known to fail keeps only the
//! alternative; anything undetermined is left alone.
//!
//! The caller's [`Predicate`] decides leaf tests it knows about (such as
//! feature guards). The filter then folds literals and the `!`, `&&`, `||`
//! and `?:` operators around them.
//!
//! # Example
//!
//! ```
//! use arbor_syntax::Node;
//! use arbor_transform::{Verdict, dead_branch_filter, generate, transform};
//!
//! let debug_off = dead_branch_filter(|node: &Node| match node.as_identifier() {
//!     Some("DEBUG") => Verdict::Fail,
//!     _ => Verdict::Next,
//! });
//!
//! let tree = transform("if (DEBUG && verbose) log(); run();", &[debug_off]).unwrap();
//! assert_eq!(generate(&tree, false, false).unwrap(), "if(DEBUG&&verbose)log();run()");
//! ```

use std::fmt;
use std::ops::Not;

use arbor_foundation::Result;
use arbor_syntax::ast::{BinaryOp, UnaryOp};
use arbor_syntax::{Node, Outcome};
use tracing::trace;

use crate::chain::{BoxedFilter, Filter, Next};

/// Three-valued result of evaluating a test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The test is known to be truthy.
    Pass,
    /// The test is known to be falsy.
    Fail,
    /// Nothing is known about the test.
    Next,
}

impl Verdict {
    /// Converts a known truth value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Pass } else { Self::Fail }
    }

    /// Returns true for `Pass` and `Fail`.
    #[must_use]
    pub const fn is_determined(self) -> bool {
        !matches!(self, Self::Next)
    }

    /// Logical and. Undetermined unless both sides are determined.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Next, _) | (_, Self::Next) => Self::Next,
            (Self::Pass, Self::Pass) => Self::Pass,
            _ => Self::Fail,
        }
    }

    /// Logical or. Undetermined unless both sides are determined.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Next, _) | (_, Self::Next) => Self::Next,
            (Self::Fail, Self::Fail) => Self::Fail,
            _ => Self::Pass,
        }
    }
}

impl Not for Verdict {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Pass => Self::Fail,
            Self::Fail => Self::Pass,
            Self::Next => Self::Next,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Next => "next",
        };
        write!(f, "{name}")
    }
}

/// Caller-supplied knowledge about test expressions.
///
/// Returning [`Verdict::Next`] hands the node to the structural evaluator.
pub trait Predicate {
    /// Decides `node` if possible.
    fn test(&self, node: &Node) -> Verdict;
}

impl<F> Predicate for F
where
    F: Fn(&Node) -> Verdict,
{
    fn test(&self, node: &Node) -> Verdict {
        self(node)
    }
}

/// Filter that prunes branches whose test is decided.
#[derive(Clone, Debug)]
pub struct DeadBranchFilter<P> {
    predicate: P,
}

impl<P: Predicate> DeadBranchFilter<P> {
    /// Creates the filter from a predicate.
    #[must_use]
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }

    /// Evaluates a test: the predicate first, then [`Self::eval_node`].
    #[must_use]
    pub fn eval_test(&self, node: &Node) -> Verdict {
        match self.predicate.test(node) {
            Verdict::Next => self.eval_node(node),
            decided => decided,
        }
    }

    /// Evaluates a test from its structure alone.
    ///
    /// Nested conditionals take the verdict of the selected branch. `&&` and
    /// `||` evaluate both operands and combine them only when both are
    /// determined. Numbers pass unless zero or NaN.
    #[must_use]
    pub fn eval_node(&self, node: &Node) -> Verdict {
        match node {
            Node::If(n) => match self.eval_test(&n.condition) {
                Verdict::Pass => self.eval_node(&n.body),
                Verdict::Fail => n
                    .alternative
                    .as_deref()
                    .map_or(Verdict::Next, |alternative| self.eval_node(alternative)),
                Verdict::Next => Verdict::Next,
            },
            Node::Conditional(c) => match self.eval_test(&c.condition) {
                Verdict::Pass => self.eval_node(&c.consequent),
                Verdict::Fail => self.eval_node(&c.alternative),
                Verdict::Next => Verdict::Next,
            },
            Node::Binary(b) if b.operator == BinaryOp::And => {
                self.eval_test(&b.left).and(self.eval_test(&b.right))
            }
            Node::Binary(b) if b.operator == BinaryOp::Or => {
                self.eval_test(&b.left).or(self.eval_test(&b.right))
            }
            Node::UnaryPrefix(u) if u.operator == UnaryOp::Not => !self.eval_test(&u.expression),
            Node::Boolean(value) => Verdict::from_bool(*value),
            Node::Number(n) => Verdict::from_bool(*n != 0.0 && !n.is_nan()),
            _ => Verdict::Next,
        }
    }

    /// Selects the live branch of a decided `if` or conditional.
    ///
    /// Returns the node unchanged in `Err` when nothing can be pruned.
    fn prune(&self, node: Node) -> std::result::Result<Node, Node> {
        match node {
            Node::If(n) => match self.eval_test(&n.condition) {
                Verdict::Pass => {
                    trace!(kind = "If", verdict = %Verdict::Pass, "pruned branch");
                    Ok(*n.body)
                }
                Verdict::Fail => {
                    trace!(kind = "If", verdict = %Verdict::Fail, "pruned branch");
                    Ok(n.alternative.map_or(Node::EmptyStatement, |alternative| *alternative))
                }
                Verdict::Next => Err(Node::If(n)),
            },
            Node::Conditional(c) => match self.eval_test(&c.condition) {
                Verdict::Pass => {
                    trace!(kind = "Conditional", verdict = %Verdict::Pass, "pruned branch");
                    Ok(*c.consequent)
                }
                Verdict::Fail => {
                    trace!(kind = "Conditional", verdict = %Verdict::Fail, "pruned branch");
                    Ok(*c.alternative)
                }
                Verdict::Next => Err(Node::Conditional(c)),
            },
            other => Err(other),
        }
    }
}

impl<P: Predicate> Filter for DeadBranchFilter<P> {
    fn apply(&self, node: Node, next: Next<'_>) -> Result<Outcome> {
        let mut current = match self.prune(node) {
            Ok(live) => live,
            Err(unchanged) => return next.proceed(unchanged),
        };
        // `else if` chains fold here rather than on a second pass.
        loop {
            match self.prune(current) {
                Ok(live) => current = live,
                Err(settled) => return next.replace(settled),
            }
        }
    }

    fn name(&self) -> &str {
        "dead-branch"
    }
}

/// Builds a boxed [`DeadBranchFilter`] from `test`.
pub fn dead_branch_filter<'a, P>(test: P) -> BoxedFilter<'a>
where
    P: Predicate + 'a,
{
    Box::new(DeadBranchFilter::new(test))
}
