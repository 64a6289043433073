//! # pika-match
//!
//! The `Match` value (spec §3) and the "better match" ordering (spec §4.2)
//! that drives monotone improvement in the memo table. This crate knows
//! nothing about clause *kinds* — the caller tells [`Match::is_better_than`]
//! whether the clause in question is a `First`, since that's the only
//! clause-shape fact the ordering needs.

use pika_base::ClauseId;
use std::rc::Rc;

/// Identifies what was matched and where: a clause and a start position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MemoKey {
    pub clause: ClauseId,
    pub start_pos: usize,
}

impl MemoKey {
    pub fn new(clause: ClauseId, start_pos: usize) -> Self {
        MemoKey { clause, start_pos }
    }
}

/// A successful parse of a clause at a position.
///
/// Cloning a `Match` is O(1): sub-matches are shared via [`Rc`] rather than
/// deep-copied, so the same nested match can be referenced by many parents
/// without duplicating the tree beneath it.
#[derive(Clone, Debug)]
pub struct Match {
    pub memo_key: MemoKey,
    pub length: usize,
    /// Which alternative of a `First` matched; 0 for every other clause kind.
    pub first_matching_sub_clause_index: usize,
    pub sub_matches: Rc<[Match]>,
}

impl Match {
    /// A terminal match: no sub-matches.
    pub fn terminal(memo_key: MemoKey, length: usize) -> Self {
        Match {
            memo_key,
            length,
            first_matching_sub_clause_index: 0,
            sub_matches: Rc::from([]),
        }
    }

    /// A zero-length match with no sub-matches, used both for genuine
    /// zero-width terminals (`Nothing`, `Start`, lookaheads) and for the
    /// synthesized placeholder described in spec §4.2 step 3.
    pub fn empty(memo_key: MemoKey) -> Self {
        Self::terminal(memo_key, 0)
    }

    pub fn with_sub_matches(
        memo_key: MemoKey,
        length: usize,
        first_matching_sub_clause_index: usize,
        sub_matches: Vec<Match>,
    ) -> Self {
        Match {
            memo_key,
            length,
            first_matching_sub_clause_index,
            sub_matches: Rc::from(sub_matches),
        }
    }

    /// The end position of the matched range, exclusive.
    pub fn end_pos(&self) -> usize {
        self.memo_key.start_pos + self.length
    }

    /// "Better match" ordering from spec §4.2: for two matches of the same
    /// memo key, is `self` strictly better than `existing`?
    ///
    /// - For a `First` clause, a strictly smaller alternative index always
    ///   wins — PEG's "choose the first alternative" rule is absolute, so a
    ///   shorter match at an earlier alternative always beats a longer match
    ///   at a later one. When both matches are through the *same*
    ///   alternative, length breaks the tie: this is what lets a
    ///   left-recursive alternative grow across repeated re-evaluations at
    ///   the same position instead of freezing at its first success.
    /// - For every other clause kind, `self` wins iff it is strictly
    ///   longer (longest-greedy repetition).
    pub fn is_better_than(&self, existing: &Match, clause_is_first: bool) -> bool {
        debug_assert_eq!(self.memo_key, existing.memo_key);
        if clause_is_first {
            match self
                .first_matching_sub_clause_index
                .cmp(&existing.first_matching_sub_clause_index)
            {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Equal => self.length > existing.length,
                std::cmp::Ordering::Greater => false,
            }
        } else {
            self.length > existing.length
        }
    }
}
