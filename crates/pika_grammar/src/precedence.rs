//! spec §4.4(b): precedence-climbing rewrite.
//!
//! Rules sharing a name are renamed `N[precedence]` and their bodies
//! rewritten so each level fails over to the next, turning a single
//! left-recursive rule declaration into a chain of non-left-recursive
//! (within a level) clauses that the driver's bottom-up sweep can still
//! resolve through seed-parent propagation.

use crate::error::GrammarError;
use crate::rule::{Associativity, Rule, UNSPECIFIED_PRECEDENCE};
use pika_base::ClauseId;
use pika_clause::{ClauseKind, ClauseTable, LabeledSub};
use rustc_hash::FxHashMap;

/// Output of the rewrite: the rules with their final (possibly bracketed)
/// names and rewritten bodies, the bare-name → lowest-precedence-name map
/// used by reference resolution, and the set of lowest-precedence clause
/// ids that must be included among the topological-order roots.
pub struct PrecedenceRewrite {
    pub rules: Vec<Rule>,
    pub bare_to_lowest: FxHashMap<String, String>,
}

fn level_name(name: &str, precedences: &[i32], level: usize) -> String {
    format!("{}[{}]", name, precedences[level])
}

pub fn rewrite(mut rules: Vec<Rule>, clauses: &mut ClauseTable) -> Result<PrecedenceRewrite, GrammarError> {
    for rule in &rules {
        if rule.precedence != UNSPECIFIED_PRECEDENCE && rule.precedence < 0 {
            return Err(GrammarError::NegativePrecedence {
                rule_name: rule.name.clone(),
                precedence: rule.precedence,
            });
        }
    }

    let mut groups: FxHashMap<String, Vec<usize>> = FxHashMap::default();
    for (i, rule) in rules.iter().enumerate() {
        groups.entry(rule.name.clone()).or_default().push(i);
    }

    let mut bare_to_lowest = FxHashMap::default();

    for (name, mut indices) in groups {
        if indices.len() < 2 {
            continue;
        }
        indices.sort_by_key(|&i| rules[i].precedence);
        let mut seen_precedences = std::collections::HashSet::new();
        for &i in &indices {
            if !seen_precedences.insert(rules[i].precedence) {
                return Err(GrammarError::DuplicatePrecedence {
                    rule_name: name.clone(),
                    precedence: rules[i].precedence,
                });
            }
        }

        let k = indices.len();
        let precedences: Vec<i32> = indices.iter().map(|&i| rules[i].precedence).collect();

        #[allow(clippy::needless_range_loop)]
        for i in 0..k {
            let i_prime = (i + 1) % k;
            let self_name_i = level_name(&name, &precedences, i);
            let self_name_i_prime = level_name(&name, &precedences, i_prime);
            let idx = indices[i];
            let associativity = rules[idx].associativity;

            let occurrences = find_self_references(clauses, rules[idx].top.clause, &name);
            rewrite_self_references(clauses, &occurrences, associativity, &self_name_i, &self_name_i_prime);

            if i < k - 1 {
                let failover = clauses.rule_ref(self_name_i_prime.clone());
                let label = rules[idx].top.label.take();
                let body = LabeledSub {
                    label,
                    clause: rules[idx].top.clause,
                };
                let wrapped = clauses.first(vec![body, LabeledSub::unlabeled(failover)]);
                rules[idx].top = LabeledSub::unlabeled(wrapped);
            }

            rules[idx].name = self_name_i;
        }

        let lowest_name = level_name(&name, &precedences, 0);
        bare_to_lowest.insert(name, lowest_name);
    }

    Ok(PrecedenceRewrite { rules, bare_to_lowest })
}

/// Pre-order DFS collecting the clause ids, in left-to-right discovery
/// order, of every `RuleRef(name)` reachable from `root` without crossing
/// another `RuleRef` boundary (a self-reference nested inside some other
/// rule's already-resolved body isn't this rule's concern).
fn find_self_references(clauses: &ClauseTable, root: ClauseId, name: &str) -> Vec<ClauseId> {
    let mut found = Vec::new();
    let mut visited = std::collections::HashSet::new();
    // Recursive pre-order keeps discovery order left-to-right.
    fn visit(
        clauses: &ClauseTable,
        id: ClauseId,
        name: &str,
        found: &mut Vec<ClauseId>,
        visited: &mut std::collections::HashSet<ClauseId>,
    ) {
        if !visited.insert(id) {
            return;
        }
        let data = clauses.get(id);
        if let ClauseKind::RuleRef(ref_name) = &data.kind {
            if ref_name == name {
                found.push(id);
            }
            return;
        }
        for sub in &data.subs {
            visit(clauses, sub.clause, name, found, visited);
        }
    }
    visit(clauses, root, name, &mut found, &mut visited);
    found
}

fn rewrite_self_references(
    clauses: &mut ClauseTable,
    occurrences: &[ClauseId],
    associativity: Associativity,
    name_i: &str,
    name_i_prime: &str,
) {
    if occurrences.is_empty() {
        return;
    }
    if occurrences.len() == 1 {
        let id = occurrences[0];
        let a = clauses.rule_ref(name_i.to_string());
        let b = clauses.rule_ref(name_i_prime.to_string());
        let data = clauses.get_mut(id);
        data.kind = ClauseKind::First;
        data.subs = vec![LabeledSub::unlabeled(a), LabeledSub::unlabeled(b)];
        return;
    }
    let designated_as_i = match associativity {
        Associativity::Left => 0,
        Associativity::Right => occurrences.len() - 1,
        Associativity::None => occurrences.len(), // no occurrence is designated i
    };
    for (pos, &id) in occurrences.iter().enumerate() {
        let new_name = if pos == designated_as_i { name_i } else { name_i_prime };
        clauses.get_mut(id).kind = ClauseKind::RuleRef(new_name.to_string());
    }
}
