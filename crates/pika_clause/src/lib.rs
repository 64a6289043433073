//! # pika-clause
//!
//! The PEG clause algebra (spec §3, §4.1): terminals, `Seq`, `First`,
//! `OneOrMore`, and the two lookaheads, stored as an index-addressed DAG,
//! plus the uniform `match` contract every clause kind exposes against a
//! caller-supplied memo lookup.

pub mod charset;
pub mod clause;
pub mod matching;

pub use charset::{CharClass, CharRange, CharSet};
pub use clause::{ClauseData, ClauseKind, ClauseTable, LabeledSub, UNASSIGNED_INDEX};
pub use matching::{match_clause, Lookup};
pub use pika_base::ClauseId;
