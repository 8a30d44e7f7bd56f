//! Filter chain protocol.
//!
//! A [`Filter`] sees each node before the walker descends into it. It either
//! passes the node (or a replacement) on through [`Next`], returns a node
//! without calling `Next` to stop the chain and skip descent, or returns
//! [`Outcome::Removed`] to drop the node.
//!
//! [`Next`] is consumed by value, so a filter continues the chain at most once.
//!
//! # Example
//!
//! ```
//! use arbor_syntax::{Node, Outcome};
//! use arbor_transform::{fn_filter, generate, transform};
//!
//! let clamp = fn_filter(|node, next| match node {
//!     Node::Number(n) if n > 5.0 => next.replace(Node::number(5.0)),
//!     other => next.proceed(other),
//! });
//!
//! let tree = transform("var a = 1, b = 10;", &[clamp]).unwrap();
//! assert_eq!(generate(&tree, false, false).unwrap(), "var a=1,b=5");
//! ```

use arbor_foundation::Result;
use arbor_syntax::{Node, Outcome};
use tracing::trace;

use crate::walker::Walker;

/// A rewrite rule that plugs into the walker.
pub trait Filter {
    /// Handles `node`, usually by calling `next.proceed` or `next.replace`.
    ///
    /// # Errors
    ///
    /// Any error returned here halts the traversal.
    fn apply(&self, node: Node, next: Next<'_>) -> Result<Outcome>;

    /// Name used in trace output.
    fn name(&self) -> &str {
        "filter"
    }
}

/// An owned, type-erased filter.
pub type BoxedFilter<'a> = Box<dyn Filter + 'a>;

/// Single-use cursor to the rest of the filter chain.
///
/// When no filters remain, continuing the chain descends into the node's
/// children.
pub struct Next<'a> {
    walker: Walker<'a>,
    cursor: usize,
}

impl<'a> Next<'a> {
    pub(crate) fn new(walker: Walker<'a>, cursor: usize) -> Self {
        Self { walker, cursor }
    }

    /// Continues the chain with `node` unchanged.
    ///
    /// # Errors
    ///
    /// Propagates errors from later filters and from descent.
    pub fn proceed(self, node: Node) -> Result<Outcome> {
        self.walker.run_chain(self.cursor, node)
    }

    /// Continues the chain with `replacement` in place of the current node.
    ///
    /// Later filters and the descent step observe the replacement.
    ///
    /// # Errors
    ///
    /// Propagates errors from later filters and from descent.
    pub fn replace(self, replacement: Node) -> Result<Outcome> {
        trace!(
            filter = self.filter_name(),
            kind = %replacement.kind(),
            "filter replaced node"
        );
        self.walker.run_chain(self.cursor, replacement)
    }

    /// Returns the number of filters after the current one.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.walker.filter_count().saturating_sub(self.cursor)
    }

    fn filter_name(&self) -> &str {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.walker.filter(index))
            .map_or("filter", |filter| filter.name())
    }
}

/// A filter backed by a closure. See [`fn_filter`].
pub struct FnFilter<F> {
    name: &'static str,
    f: F,
}

impl<F> FnFilter<F>
where
    F: Fn(Node, Next<'_>) -> Result<Outcome>,
{
    /// Wraps a closure as a named filter.
    #[must_use]
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> Filter for FnFilter<F>
where
    F: Fn(Node, Next<'_>) -> Result<Outcome>,
{
    fn apply(&self, node: Node, next: Next<'_>) -> Result<Outcome> {
        (self.f)(node, next)
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Boxes a closure as a filter.
///
/// State shared across invocations goes through interior mutability
/// (`Cell`, `RefCell`) captured by reference.
pub fn fn_filter<'a, F>(f: F) -> BoxedFilter<'a>
where
    F: Fn(Node, Next<'_>) -> Result<Outcome> + 'a,
{
    Box::new(FnFilter::new("fn", f))
}
