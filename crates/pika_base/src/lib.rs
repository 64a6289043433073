//! # pika-base
//!
//! Pure structural atoms for the pika parsing engine.
//!
//! This crate provides the foundational types used throughout the engine:
//!
//! - [`Arena`]/[`Id`] — index-based arena for the clause DAG
//! - [`Interner`]/[`Symbol`] — string interning for O(1) equality
//!
//! This crate has no knowledge of grammars, clauses, or matching; it
//! provides only generic, reusable infrastructure that higher-level crates
//! build upon.

pub mod arena;
pub mod ids;
pub mod intern;

pub use arena::{Arena, Id};
pub use ids::ClauseId;
pub use intern::{Interner, Symbol};
