//! The clause matching contract (spec §4.1).
//!
//! `match_clause` reads from the memo table only through the `lookup`
//! callback — never mutates it — and terminals additionally read
//! characters from `input` at the key's start position. This keeps
//! `pika-clause` independent of whatever memoization policy the caller
//! (`pika-memo`) implements; the callback is how spec §4.2's zero-length
//! synthesis and `NotFollowedBy` top-down evaluation reach back into this
//! contract without a dependency cycle between the two crates.

use crate::clause::{ClauseData, ClauseKind, ClauseTable};
use pika_base::ClauseId;
use pika_match::{Match, MemoKey};

/// Looks up the best known match for `(clause, start_pos)`.
pub trait Lookup {
    fn lookup(&mut self, clause: ClauseId, start_pos: usize) -> Option<Match>;
}

impl<F: FnMut(ClauseId, usize) -> Option<Match>> Lookup for F {
    fn lookup(&mut self, clause: ClauseId, start_pos: usize) -> Option<Match> {
        self(clause, start_pos)
    }
}

/// Attempts to match clause `id` at `start_pos` in `input`.
///
/// Returns `None` iff the clause cannot match at that position (spec §4.1).
pub fn match_clause(
    table: &ClauseTable,
    id: ClauseId,
    start_pos: usize,
    input: &[char],
    lookup: &mut dyn Lookup,
) -> Option<Match> {
    let data = table.get(id);
    let key = MemoKey::new(id, start_pos);
    match &data.kind {
        ClauseKind::Char(class) => {
            let c = *input.get(start_pos)?;
            class.contains(c).then(|| Match::terminal(key, 1))
        }
        ClauseKind::CharSeq { text, case_insensitive } => {
            let end = start_pos.checked_add(text.len())?;
            let slice = input.get(start_pos..end)?;
            let matches = if *case_insensitive {
                slice
                    .iter()
                    .zip(text.iter())
                    .all(|(a, b)| a.eq_ignore_ascii_case(b))
            } else {
                slice == text.as_slice()
            };
            matches.then(|| Match::terminal(key, text.len()))
        }
        ClauseKind::Start => (start_pos == 0).then(|| Match::empty(key)),
        ClauseKind::Nothing => Some(Match::empty(key)),
        ClauseKind::Seq => match_seq(data, key, start_pos, lookup),
        ClauseKind::First => match_first(data, key, start_pos, lookup),
        ClauseKind::OneOrMore => match_one_or_more(id, data, key, start_pos, lookup),
        ClauseKind::FollowedBy => {
            let child = data.subs[0].clause;
            lookup.lookup(child, start_pos).map(|_| Match::empty(key))
        }
        ClauseKind::NotFollowedBy => {
            let child = data.subs[0].clause;
            match lookup.lookup(child, start_pos) {
                Some(_) => None,
                None => Some(Match::empty(key)),
            }
        }
        ClauseKind::RuleRef(name) => {
            unreachable!("unresolved RuleRef({name}) reached the matching contract; grammar construction must resolve all references first")
        }
    }
}

fn match_seq(data: &ClauseData, key: MemoKey, start_pos: usize, lookup: &mut dyn Lookup) -> Option<Match> {
    let mut pos = start_pos;
    let mut subs = Vec::with_capacity(data.subs.len());
    for sub in &data.subs {
        let m = lookup.lookup(sub.clause, pos)?;
        pos += m.length;
        subs.push(m);
    }
    Some(Match::with_sub_matches(key, pos - start_pos, 0, subs))
}

fn match_first(data: &ClauseData, key: MemoKey, start_pos: usize, lookup: &mut dyn Lookup) -> Option<Match> {
    for (index, sub) in data.subs.iter().enumerate() {
        if let Some(m) = lookup.lookup(sub.clause, start_pos) {
            let length = m.length;
            return Some(Match::with_sub_matches(key, length, index, vec![m]));
        }
    }
    None
}

fn match_one_or_more(
    id: ClauseId,
    data: &ClauseData,
    key: MemoKey,
    start_pos: usize,
    lookup: &mut dyn Lookup,
) -> Option<Match> {
    let child = data.subs[0].clause;
    let head = lookup.lookup(child, start_pos)?;
    let s = head.length;
    match lookup.lookup(id, start_pos + s) {
        Some(tail) => {
            let length = s + tail.length;
            Some(Match::with_sub_matches(key, length, 0, vec![head, tail]))
        }
        None => Some(Match::with_sub_matches(key, s, 0, vec![head])),
    }
}
