//! Integration tests for Layer 1: Syntax
//!
//! Tests for the lexer, parser, printer, and descent table.

mod descent;
mod lexer;
