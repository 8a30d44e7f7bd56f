//! Arbor - Filter-chain rewriting for JavaScript syntax trees
//!
//! This crate re-exports all layers of the Arbor system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: arbor_cli        `arbor` command-line tool, logging setup
//! Layer 2: arbor_transform  Filter chain, walker, dead-branch filter, minifier
//! Layer 1: arbor_syntax     Node model, descent table, lexer, parser, printer
//! Layer 0: arbor_foundation Core types (Error, Result)
//! ```

pub use arbor_foundation as foundation;
pub use arbor_syntax as syntax;
pub use arbor_transform as transform;

pub use arbor_foundation::{Error, ErrorKind, Result};
pub use arbor_syntax::{Node, NodeKind, Outcome, PrettyConfig, parse, print};
pub use arbor_transform::{
    BoxedFilter, FeatureSet, Filter, GenerateConfig, Next, Verdict, dead_branch_filter, fn_filter,
    generate, generate_with_config,
};
