//! Tree rewriting for Arbor.
//!
//! This crate provides:
//! - [`Filter`] and [`Next`] - The filter chain protocol
//! - [`walk`] - Chain-driven traversal over the descent table
//! - [`DeadBranchFilter`] - Three-valued branch pruning
//! - [`FeatureSet`] - Decides `has('feature')` guards
//! - [`transform`] and [`generate`] - Source in, rewritten source out

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod chain;
pub mod config;
pub mod dead_branch;
pub mod features;
pub mod minify;
pub mod transform;
pub mod walker;

pub use chain::{BoxedFilter, Filter, FnFilter, Next, fn_filter};
pub use config::GenerateConfig;
pub use dead_branch::{DeadBranchFilter, Predicate, Verdict, dead_branch_filter};
pub use features::FeatureSet;
pub use minify::{minify, minify_filter};
pub use transform::{Source, generate, generate_with_config, transform};
pub use walker::walk;
