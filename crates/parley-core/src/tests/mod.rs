//! Unit tests for `parley_core` types.

mod tokenizer_tests;
