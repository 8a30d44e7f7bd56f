//! Entry points: rewrite a program with filters, then print it.

use arbor_foundation::Result;
use arbor_syntax::{Node, parse, print};
use tracing::debug;

use crate::chain::BoxedFilter;
use crate::config::GenerateConfig;
use crate::minify::minify;
use crate::walker::walk;

/// Input to [`transform`]: program text or an already-built tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Source<'s> {
    /// JavaScript source, parsed before walking.
    Text(&'s str),
    /// An existing tree, walked as is.
    Tree(Node),
}

impl<'s> From<&'s str> for Source<'s> {
    fn from(text: &'s str) -> Self {
        Self::Text(text)
    }
}

impl<'s> From<&'s String> for Source<'s> {
    fn from(text: &'s String) -> Self {
        Self::Text(text)
    }
}

impl From<Node> for Source<'_> {
    fn from(tree: Node) -> Self {
        Self::Tree(tree)
    }
}

/// Runs `filters` over a program.
///
/// With no filters the tree is returned without walking it. A removed root
/// becomes an `EmptyStatement`.
///
/// # Errors
///
/// Returns parse errors for text input, structural errors for malformed
/// trees, and any error raised by a filter.
pub fn transform<'s>(source: impl Into<Source<'s>>, filters: &[BoxedFilter<'_>]) -> Result<Node> {
    let tree = match source.into() {
        Source::Text(text) => parse(text)?,
        Source::Tree(tree) => tree,
    };
    if filters.is_empty() {
        debug!("no filters, tree unchanged");
        return Ok(tree);
    }

    debug!(filters = filters.len(), root = %tree.kind(), "transform");
    Ok(walk(filters, tree)?.into_node().unwrap_or_default())
}

/// Prints a tree, optionally minifying and/or beautifying it.
///
/// # Errors
///
/// Returns a structural error if the tree is too deep to print or the
/// minifying pass meets a malformed tree.
pub fn generate(tree: &Node, minify: bool, beautify: bool) -> Result<String> {
    generate_with_config(tree, &GenerateConfig::from_flags(minify, beautify))
}

/// Prints a tree with explicit settings.
///
/// # Errors
///
/// Returns a structural error if the tree is too deep to print or the
/// minifying pass meets a malformed tree.
pub fn generate_with_config(tree: &Node, config: &GenerateConfig) -> Result<String> {
    debug!(minify = config.minify, beautify = config.pretty.beautify, "generate");
    tree.check_depth()?;
    if config.minify {
        let minified = minify(tree.clone())?;
        Ok(print(&minified, &config.pretty))
    } else {
        Ok(print(tree, &config.pretty))
    }
}
