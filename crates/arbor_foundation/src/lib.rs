//! Core error types for Arbor.
//!
//! This crate provides:
//! - [`Error`] - Rich error type with context
//! - [`ErrorKind`] - Categorized error kinds (parse, structural, filter, ...)
//! - [`Result`] - Result alias used across all layers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;

pub use error::{Error, ErrorContext, ErrorKind};

/// Result alias for Arbor operations.
pub type Result<T> = std::result::Result<T, Error>;
