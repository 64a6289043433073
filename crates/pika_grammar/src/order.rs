//! spec §4.4(e): topological ordering.
//!
//! Every clause a rule can reach is built as a sub-clause of exactly one
//! parent except the rule's own top clause (which the `ClauseTable`
//! builder never embeds as anyone's `sub`), so "top-level clauses" in the
//! spec's sense are exactly the rule top clauses — precedence levels
//! included, since each level is itself a registered [`Rule`]. A post-order
//! DFS from those roots gives the required `clause-index(child) <
//! clause-index(parent)` property for every forward edge; a rule that
//! self-recurses outside a precedence group (direct, unrewritten left
//! recursion) closes a genuine back-edge here, which this DFS simply
//! declines to re-enter rather than special-casing as a separate root —
//! the clause still gets indexed once its own frame completes.

use crate::rule::Rule;
use pika_base::ClauseId;
use pika_clause::ClauseTable;

pub fn topological_order(clauses: &mut ClauseTable, rules: &[Rule]) -> Vec<ClauseId> {
    let n = clauses.len();
    let mut color = vec![0u8; n]; // 0 = white, 1 = gray (on stack), 2 = black
    let mut order = Vec::with_capacity(n);

    for rule in rules {
        visit(clauses, rule.top.clause, &mut color, &mut order);
    }

    for (index, &id) in order.iter().enumerate() {
        clauses.get_mut(id).clause_index = index;
    }
    order
}

fn visit(clauses: &ClauseTable, id: ClauseId, color: &mut [u8], order: &mut Vec<ClauseId>) {
    match color[id.index()] {
        2 => return,
        1 => return, // back-edge: cycle head, handled when its own frame unwinds
        _ => {}
    }
    color[id.index()] = 1;
    for sub in clauses.get(id).subs.clone() {
        visit(clauses, sub.clause, color, order);
    }
    color[id.index()] = 2;
    order.push(id);
}
