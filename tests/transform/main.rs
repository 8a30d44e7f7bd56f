//! Integration tests for Layer 2: Transform
//!
//! Tests the walker, the filter chain, dead-branch elimination, and the
//! minifier end to end from source text.

mod chain;
mod dead_branch;
mod minify;
mod properties;
