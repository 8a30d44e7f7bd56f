//! Minification pass.
//!
//! Drops empty statements and empty blocks from statement lists. Runs
//! post-order, so a block that only held empty statements goes too. Names
//! are never changed.

use arbor_foundation::Result;
use arbor_syntax::{Node, Outcome};

use crate::chain::{BoxedFilter, FnFilter, Next};
use crate::walker::walk;

/// Builds the minifying filter.
#[must_use]
pub fn minify_filter<'a>() -> BoxedFilter<'a> {
    Box::new(FnFilter::new("minify", |node: Node, next: Next<'_>| {
        Ok(match next.proceed(node)? {
            Outcome::Node(node) if is_droppable(&node) => Outcome::Removed,
            outcome => outcome,
        })
    }))
}

/// Runs the minifying pass over `tree`.
///
/// # Errors
///
/// Returns a structural error if `tree` is malformed.
pub fn minify(tree: Node) -> Result<Node> {
    let outcome = walk(&[minify_filter()], tree)?;
    Ok(outcome.into_node().unwrap_or_default())
}

fn is_droppable(node: &Node) -> bool {
    match node {
        Node::EmptyStatement => true,
        Node::Block(block) => block.body.is_empty(),
        _ => false,
    }
}
