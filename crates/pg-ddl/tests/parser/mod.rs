//! CREATE TABLE parser tests
//!
//! These tests run SQL text through the lexer and parser and check the
//! resulting table definitions and syntax errors.

mod clauses;
mod definitions;
mod errors;
