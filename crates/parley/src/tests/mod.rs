//! Unit tests for the parley crate.

mod parser_tests;
mod support;
