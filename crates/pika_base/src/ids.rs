//! Cross-crate handle types.
//!
//! [`ClauseId`] identifies a node in the clause DAG ([`pika_clause`][pc]).
//! It is a plain newtype rather than an instance of the generic
//! [`crate::arena::Id`] so that the match/memo layers (which sit *below*
//! the clause layer in the dependency order, spec §2) can refer to clauses
//! without depending on the `pika-clause` crate that defines `ClauseData`.
//!
//! [pc]: https://docs.rs/pika-clause

/// A handle to a clause in the grammar's clause DAG.
///
/// Doubles as the clause's position in topological order once a grammar has
/// been built (spec §3, "clause-index"), which is exactly the priority used
/// by the driver loop's queue (spec §4.3).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ClauseId(u32);

impl ClauseId {
    pub fn from_index(index: usize) -> Self {
        ClauseId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}
