//! Generic tree walker driven by the filter chain.
//!
//! For every node the walker runs the filter chain; when the last filter
//! continues the chain, the walker descends into the (possibly replaced)
//! node's children through [`arbor_syntax::descend`] and walks each of them
//! the same way.

use std::cell::Cell;

use arbor_foundation::Result;
use arbor_syntax::{Node, Outcome, descend};
use tracing::debug;

use crate::chain::{BoxedFilter, Filter, Next};

/// Walks `node` with `filters`, returning the rewritten tree.
///
/// The root itself may come back [`Outcome::Removed`].
///
/// # Errors
///
/// Returns the first error raised by a filter or by descent. Structural
/// errors carry the `Kind.field` path from the root. Trees deeper than
/// [`arbor_syntax::MAX_TREE_DEPTH`] are rejected before any filter runs.
pub fn walk(filters: &[BoxedFilter<'_>], node: Node) -> Result<Outcome> {
    node.check_depth()?;
    let visited = Cell::new(0);
    let walker = Walker {
        filters,
        visited: &visited,
    };
    let outcome = walker.walk(node)?;
    debug!(
        filters = filters.len(),
        nodes = visited.get(),
        "walk finished"
    );
    Ok(outcome)
}

/// Shared traversal state. Copied into every [`Next`] cursor.
#[derive(Clone, Copy)]
pub(crate) struct Walker<'a> {
    filters: &'a [BoxedFilter<'a>],
    visited: &'a Cell<usize>,
}

impl<'a> Walker<'a> {
    fn walk(self, node: Node) -> Result<Outcome> {
        self.visited.set(self.visited.get() + 1);
        self.run_chain(0, node)
    }

    /// Runs the chain from filter `cursor` onwards, then descends.
    pub(crate) fn run_chain(self, cursor: usize, node: Node) -> Result<Outcome> {
        match self.filters.get(cursor) {
            Some(filter) => filter.apply(node, Next::new(self, cursor + 1)),
            None => descend(node, |child| self.walk(child)).map(Outcome::Node),
        }
    }

    pub(crate) fn filter(self, index: usize) -> Option<&'a dyn Filter> {
        self.filters.get(index).map(|filter| &**filter)
    }

    pub(crate) fn filter_count(self) -> usize {
        self.filters.len()
    }
}
