//! spec §4.4(d): rule-reference resolution.
//!
//! After interning, every occurrence of `RuleRef(name)` for a given `name`
//! is the *same* clause id, so the resolution map has at most one entry
//! per distinct name. Resolving then means: for each `RuleRef` clause,
//! follow (possibly through a chain of rules whose own body is itself a
//! bare reference) to the final non-reference clause, detecting cycles by
//! name.

use crate::error::GrammarError;
use crate::rule::Rule;
use pika_base::ClauseId;
use pika_clause::{ClauseKind, ClauseTable};
use rustc_hash::FxHashMap;

pub fn resolve(
    clauses: &mut ClauseTable,
    rules: &mut [Rule],
    bare_to_lowest: &FxHashMap<String, String>,
) -> Result<(), GrammarError> {
    let rule_by_name: FxHashMap<String, usize> =
        rules.iter().enumerate().map(|(i, r)| (r.name.clone(), i)).collect();

    let mut resolved: FxHashMap<ClauseId, (ClauseId, Option<String>)> = FxHashMap::default();
    let ruleref_ids: Vec<ClauseId> = clauses
        .iter()
        .filter(|(_, data)| data.kind.is_rule_ref())
        .map(|(id, _)| id)
        .collect();

    for ruleref_id in ruleref_ids {
        let ClauseKind::RuleRef(name) = clauses.get(ruleref_id).kind.clone() else {
            unreachable!()
        };
        let resolution = resolve_chain(&name, &rule_by_name, rules, bare_to_lowest, clauses)?;
        resolved.insert(ruleref_id, resolution);
    }

    for (_, data) in clauses.iter_mut() {
        for sub in &mut data.subs {
            if let Some((target, inherited_label)) = resolved.get(&sub.clause) {
                sub.clause = *target;
                if sub.label.is_none() {
                    sub.label = inherited_label.clone();
                }
            }
        }
    }
    for rule in rules.iter_mut() {
        if let Some((target, inherited_label)) = resolved.get(&rule.top.clause) {
            rule.top.clause = *target;
            if rule.top.label.is_none() {
                rule.top.label = inherited_label.clone();
            }
        }
    }

    Ok(())
}

/// Resolves a bare name to `(final clause, first label found along the
/// chain)`, following rule bodies that are themselves bare references.
fn resolve_chain(
    name: &str,
    rule_by_name: &FxHashMap<String, usize>,
    rules: &[Rule],
    bare_to_lowest: &FxHashMap<String, String>,
    clauses: &ClauseTable,
) -> Result<(ClauseId, Option<String>), GrammarError> {
    let mut current = name.to_string();
    let mut visited = std::collections::HashSet::new();
    let mut inherited_label = None;

    loop {
        let effective = bare_to_lowest.get(&current).cloned().unwrap_or_else(|| current.clone());
        if !visited.insert(effective.clone()) {
            return Err(GrammarError::ReferenceCycle { name: name.to_string() });
        }
        let idx = *rule_by_name
            .get(&effective)
            .ok_or_else(|| GrammarError::UnresolvedRuleRef { name: name.to_string() })?;
        let target = &rules[idx];
        if inherited_label.is_none() {
            inherited_label = target.top.label.clone();
        }
        match &clauses.get(target.top.clause).kind {
            ClauseKind::RuleRef(next_name) => {
                current = next_name.clone();
            }
            _ => return Ok((target.top.clause, inherited_label)),
        }
    }
}
