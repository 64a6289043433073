//! # pika-driver
//!
//! The pika main loop (spec §4.3, C5): a right-to-left sweep over start
//! positions, each driven by a priority queue of clauses ordered by
//! topological (clause-index) rank so that, within one position, a clause
//! is only dequeued once every clause it could depend on has already been
//! processed there.

pub use pika_memo::{MemoStats, ParseOptions};

use pika_clause::{match_clause, ClauseTable};
use pika_grammar::Grammar;
use pika_match::MemoKey;
use pika_memo::MemoTable;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Runs the full sweep over `input`, filling and returning a memo table.
pub fn parse(grammar: &Grammar, input: &[char], options: ParseOptions) -> MemoTable {
    let clauses = grammar.clauses();
    let mut memo = MemoTable::new(options);

    let terminal_ids: Vec<_> = grammar
        .order()
        .iter()
        .copied()
        .filter(|&id| is_seedable_terminal(clauses, id))
        .collect();

    for start_pos in (0..input.len()).rev() {
        let mut queue = BinaryHeap::new();
        for &id in &terminal_ids {
            queue.push(Reverse((clauses.get(id).clause_index, id)));
        }
        let mut processed = 0usize;
        while let Some(Reverse((_, id))) = queue.pop() {
            processed += 1;
            let key = MemoKey::new(id, start_pos);
            let new_match = {
                let mut lookup = |clause, pos| memo.lookup_best_match(clauses, input, MemoKey::new(clause, pos));
                match_clause(clauses, id, start_pos, input, &mut lookup)
            };
            let seed_parents = memo.add_match(clauses, key, new_match);
            for parent in seed_parents {
                queue.push(Reverse((clauses.get(parent).clause_index, parent)));
            }
        }
        log::trace!("start_pos {start_pos}: drained {processed} queue entries");
    }

    memo
}

fn is_seedable_terminal(clauses: &ClauseTable, id: pika_base::ClauseId) -> bool {
    let kind = &clauses.get(id).kind;
    kind.is_terminal() && !matches!(kind, pika_clause::ClauseKind::Nothing)
}
