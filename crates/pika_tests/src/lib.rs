//! Integration test suite for the pika parsing engine.
//!
//! This crate exists only to run integration tests from the `tests/`
//! directory against grammars built directly as `Rule`/clause values (the
//! textual grammar front-end is out of scope). All actual test code lives
//! in `tests/*.rs` files, one per end-to-end scenario from spec.md §8.
