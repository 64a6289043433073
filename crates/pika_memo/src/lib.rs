//! # pika-memo
//!
//! The memo table (spec §3, §4.2): maps `(clause, start-position)` to the
//! best-known [`Match`], with the lookup policy that synthesizes zero-length
//! placeholder matches and evaluates `NotFollowedBy` top-down instead of
//! seeding it bottom-up.

use pika_base::ClauseId;
use pika_clause::{match_clause, ClauseKind, ClauseTable, Lookup};
use pika_match::{Match, MemoKey};
use rustc_hash::FxHashMap;

/// Per-parse configuration (spec §9 design note: replaces the reference
/// implementation's global debug flag with a value passed to each parse).
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
    /// When set, the memo table tracks the matches-created/matches-memoized
    /// counters from spec §3. Left off by default so the hot path never
    /// pays for a counter nobody reads.
    pub track_stats: bool,
}

/// Diagnostic counters (spec §3: "counters for matches created vs
/// memoized"). Only incremented when [`ParseOptions::track_stats`] is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoStats {
    /// Non-null matches produced by a clause's `match` call.
    pub matches_created: u64,
    /// Of those, how many were actually written into a memo slot (a match
    /// that loses to an already-better stored match is created but not
    /// memoized).
    pub matches_memoized: u64,
}

/// Maps `(clause, start-position)` to its best-known match (spec §2 "C2").
pub struct MemoTable {
    slots: FxHashMap<MemoKey, Match>,
    options: ParseOptions,
    stats: MemoStats,
}

impl MemoTable {
    pub fn new(options: ParseOptions) -> Self {
        MemoTable {
            slots: FxHashMap::default(),
            options,
            stats: MemoStats::default(),
        }
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    /// A raw lookup with no policy applied: `Some` only if a match is
    /// actually stored at this key. Used by the query layer (spec §4.5),
    /// which must distinguish "never matched" from "matches zero chars".
    pub fn get_stored(&self, key: MemoKey) -> Option<&Match> {
        self.slots.get(&key)
    }

    /// Every stored match of `clause`, ordered by start position ascending
    /// (spec §4.5 `all_matches`). Synthesized zero-length placeholders are
    /// never stored, so they never appear here.
    pub fn matches_for(&self, clause: ClauseId) -> Vec<Match> {
        let mut found: Vec<&Match> = self
            .slots
            .values()
            .filter(|m| m.memo_key.clause == clause)
            .collect();
        found.sort_by_key(|m| m.memo_key.start_pos);
        found.into_iter().cloned().collect()
    }

    /// spec §4.2 `lookup_best_match`.
    ///
    /// 1. Return the stored match, if any.
    /// 2. Else, if the clause is `NotFollowedBy`, evaluate it top-down.
    /// 3. Else, if the clause can match zero chars, synthesize a
    ///    zero-length placeholder (not stored).
    /// 4. Else `None`.
    pub fn lookup_best_match(
        &mut self,
        clauses: &ClauseTable,
        input: &[char],
        key: MemoKey,
    ) -> Option<Match> {
        if let Some(m) = self.slots.get(&key) {
            return Some(m.clone());
        }
        let data = clauses.get(key.clause);
        if matches!(data.kind, ClauseKind::NotFollowedBy) {
            let mut top_down = TopDown { table: self, clauses, input };
            return match_clause(clauses, key.clause, key.start_pos, input, &mut top_down);
        }
        if data.can_match_zero_chars {
            return Some(Match::empty(key));
        }
        None
    }

    /// spec §4.2 `add_match`: stores `new_match` if it improves on the
    /// current slot, then returns the seed-parents of `key.clause` that
    /// should be re-enqueued — either because the slot was updated, or
    /// because the seed-parent can match zero chars and must always get a
    /// chance to run (spec §4.2, condition (b)).
    pub fn add_match(
        &mut self,
        clauses: &ClauseTable,
        key: MemoKey,
        new_match: Option<Match>,
    ) -> Vec<ClauseId> {
        let mut updated = false;
        if let Some(m) = new_match {
            if self.options.track_stats {
                self.stats.matches_created += 1;
            }
            let clause_is_first = clauses.get(key.clause).kind.is_first();
            let should_insert = match self.slots.get(&key) {
                None => true,
                Some(existing) => m.is_better_than(existing, clause_is_first),
            };
            if should_insert {
                if self.options.track_stats {
                    self.stats.matches_memoized += 1;
                }
                log::trace!("memoized {:?} (len {})", key, m.length);
                self.slots.insert(key, m);
                updated = true;
            }
        }
        clauses
            .get(key.clause)
            .seed_parents
            .iter()
            .copied()
            .filter(|&parent| updated || clauses.get(parent).can_match_zero_chars)
            .collect()
    }
}

/// Evaluates a clause's `match` top-down, recursing back into
/// [`MemoTable::lookup_best_match`] for its children. Used only for
/// `NotFollowedBy` (spec §4.1, §4.2 step 2) since its "success" result is
/// exactly "no stored match", which the bottom-up sweep can never produce.
struct TopDown<'a> {
    table: &'a mut MemoTable,
    clauses: &'a ClauseTable,
    input: &'a [char],
}

impl<'a> Lookup for TopDown<'a> {
    fn lookup(&mut self, clause: ClauseId, start_pos: usize) -> Option<Match> {
        self.table
            .lookup_best_match(self.clauses, self.input, MemoKey::new(clause, start_pos))
    }
}
