//! spec §4.4(a) sanity checks, run before any rewriting.

use crate::error::GrammarError;
use crate::rule::Rule;
use pika_clause::{ClauseKind, ClauseTable};

/// Rejects a rule whose entire top-level clause is a bare reference to its
/// own name — `checkNoRefCycles`'s pre-resolution acyclicity is otherwise
/// guaranteed by the arena's append-only construction (a clause can only
/// name children that already exist), so this is the one case that needs an
/// explicit check.
pub fn check_no_self_referential_bodies(rules: &[Rule], clauses: &ClauseTable) -> Result<(), GrammarError> {
    for rule in rules {
        if let ClauseKind::RuleRef(name) = &clauses.get(rule.top.clause).kind {
            if name == &rule.name {
                return Err(GrammarError::SelfReferentialBody {
                    rule_name: rule.name.clone(),
                });
            }
        }
    }
    Ok(())
}
