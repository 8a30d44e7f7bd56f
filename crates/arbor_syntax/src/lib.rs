//! Syntax layer for Arbor.
//!
//! This crate provides:
//! - [`Node`] - The JavaScript syntax tree, one variant per node kind
//! - [`descent`] - The per-kind table of child slots and the rebuilding [`descend`]
//! - [`Lexer`] and [`Parser`] - Source text to tree
//! - [`pretty`] - Tree to source text, compact or beautified
//! - [`visitor`] - Read-only traversal hooks and utility visitors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod descent;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod token;
pub mod visitor;

pub use ast::{BinaryOp, Node, NodeKind, UnaryOp};
pub use descent::{Field, MAX_TREE_DEPTH, Outcome, Role, Slot, descend, recipe};
pub use lexer::Lexer;
pub use parser::{Parser, parse, parse_expression};
pub use pretty::{PrettyConfig, print};
pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
