//! spec §4.4(g): seed-parent wiring.

use pika_base::ClauseId;
use pika_clause::{ClauseKind, ClauseTable};

pub fn wire_seed_parents(clauses: &mut ClauseTable, order: &[ClauseId]) {
    for &id in order {
        let data = clauses.get(id);
        let children: Vec<ClauseId> = match &data.kind {
            ClauseKind::Seq => {
                let mut children = Vec::new();
                for sub in &data.subs {
                    children.push(sub.clause);
                    if !clauses.get(sub.clause).can_match_zero_chars {
                        break;
                    }
                }
                children
            }
            _ => data.subs.iter().map(|s| s.clause).collect(),
        };
        for child in children {
            clauses.get_mut(child).seed_parents.push(id);
        }
    }
}
