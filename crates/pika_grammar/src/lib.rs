//! # pika-grammar
//!
//! The grammar builder (spec §4.4, C4): takes a list of [`Rule`]s sharing a
//! [`pika_clause::ClauseTable`] and produces a frozen [`Grammar`] — clause
//! DAG interned, rule references resolved, zero-character flags and
//! seed-parent sets computed, everything placed in topological order —
//! ready for the driver loop (`pika-driver`) to sweep.

mod error;
mod intern;
mod order;
mod precedence;
mod resolve;
mod rule;
mod sanity;
mod seed;
mod zerochar;

pub use error::GrammarError;
pub use rule::{Associativity, Rule, UNSPECIFIED_PRECEDENCE};

use pika_base::ClauseId;
use pika_clause::ClauseTable;
use rustc_hash::FxHashMap;

/// A frozen, parse-ready grammar (spec §4.4 output).
#[derive(Debug)]
pub struct Grammar {
    clauses: ClauseTable,
    rules: Vec<Rule>,
    rule_by_name: FxHashMap<String, usize>,
    order: Vec<ClauseId>,
}

impl Grammar {
    /// Runs the full seven-step builder pipeline (spec §4.4) over `rules`,
    /// whose clause ids all live in `clauses`.
    pub fn new(mut clauses: ClauseTable, rules: Vec<Rule>) -> Result<Grammar, GrammarError> {
        if rules.is_empty() {
            return Err(GrammarError::EmptyRuleList);
        }

        sanity::check_no_self_referential_bodies(&rules, &clauses)?;

        let precedence::PrecedenceRewrite { mut rules, bare_to_lowest } =
            precedence::rewrite(rules, &mut clauses)?;
        log::debug!("precedence rewrite complete: {} clause(s)", clauses.len());

        {
            let mut tops: Vec<&mut ClauseId> = rules.iter_mut().map(|r| &mut r.top.clause).collect();
            intern::intern(&mut clauses, &mut tops);
        }
        log::debug!("interning complete: {} clause(s)", clauses.len());

        resolve::resolve(&mut clauses, &mut rules, &bare_to_lowest)?;
        log::debug!("rule-reference resolution complete: {} clause(s)", clauses.len());

        let order = order::topological_order(&mut clauses, &rules);
        log::debug!("topological ordering complete: {} live clause(s)", order.len());

        zerochar::analyze(&mut clauses, &order)?;
        log::debug!("zero-character analysis complete: {} clause(s)", order.len());

        seed::wire_seed_parents(&mut clauses, &order);
        log::debug!("seed-parent wiring complete: {} clause(s)", order.len());

        let mut rule_by_name = FxHashMap::default();
        for (i, rule) in rules.iter().enumerate() {
            rule_by_name.insert(rule.name.clone(), i);
        }
        for (bare, lowest) in &bare_to_lowest {
            if let Some(&idx) = rule_by_name.get(lowest.as_str()) {
                rule_by_name.insert(bare.clone(), idx);
            }
        }

        Ok(Grammar { clauses, rules, rule_by_name, order })
    }

    pub fn rule_by_name(&self, name: &str) -> Result<&Rule, GrammarError> {
        self.rule_by_name
            .get(name)
            .map(|&i| &self.rules[i])
            .ok_or_else(|| GrammarError::UnresolvedRuleRef { name: name.to_string() })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn clauses(&self) -> &ClauseTable {
        &self.clauses
    }

    /// Topological order of every clause reachable from a rule's top
    /// clause (spec §4.4e); index into it is each clause's `clause_index`.
    pub fn order(&self) -> &[ClauseId] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pika_clause::{CharClass, CharRange, CharSet, LabeledSub};

    fn digits() -> CharClass {
        CharClass::single_set(CharSet::new(vec![CharRange { lo: '0', hi: '9' }]))
    }

    #[test]
    fn empty_rule_list_is_rejected() {
        let clauses = ClauseTable::new();
        let err = Grammar::new(clauses, vec![]).unwrap_err();
        assert_eq!(err, GrammarError::EmptyRuleList);
    }

    #[test]
    fn bare_self_reference_top_clause_is_rejected() {
        let mut clauses = ClauseTable::new();
        let r = clauses.rule_ref("A");
        let rule = Rule::new("A", LabeledSub::unlabeled(r));
        let err = Grammar::new(clauses, vec![rule]).unwrap_err();
        assert_eq!(err, GrammarError::SelfReferentialBody { rule_name: "A".to_string() });
    }

    #[test]
    fn unresolved_reference_is_rejected() {
        let mut clauses = ClauseTable::new();
        let r = clauses.rule_ref("Missing");
        let rule = Rule::new("A", LabeledSub::unlabeled(r));
        let err = Grammar::new(clauses, vec![rule]).unwrap_err();
        assert_eq!(err, GrammarError::UnresolvedRuleRef { name: "Missing".to_string() });
    }

    #[test]
    fn simple_grammar_builds_and_assigns_clause_indices() {
        let mut clauses = ClauseTable::new();
        let digit = clauses.char_class(digits());
        let rule = Rule::new("Digit", LabeledSub::unlabeled(digit));
        let grammar = Grammar::new(clauses, vec![rule]).unwrap();
        assert_eq!(grammar.order().len(), 1);
        assert!(grammar.rule_by_name("Digit").is_ok());
    }

    #[test]
    fn a_followed_by_b_rule_reference_resolves_and_inherits_label() {
        let mut clauses = ClauseTable::new();
        let digit = clauses.char_class(digits());
        let b_ref = clauses.rule_ref("B");
        let a_top = LabeledSub::unlabeled(b_ref);
        let a = Rule::new("A", a_top);
        let b = Rule::new("B", LabeledSub::labeled("d", digit));
        let grammar = Grammar::new(clauses, vec![a, b]).unwrap();
        let a_rule = grammar.rule_by_name("A").unwrap();
        assert_eq!(a_rule.top.label.as_deref(), Some("d"));
    }

    #[test]
    fn left_recursive_single_rule_is_not_rejected_and_gets_a_clause_index() {
        // `E <- E '+' D / D` — a direct left-recursive rule with no
        // precedence group declared; legal (this is exactly the case pika
        // parsing is built to handle), and must produce a cycle-surviving
        // topological index rather than erroring.
        let mut clauses = ClauseTable::new();
        let d = clauses.char_class(digits());
        let plus = clauses.char_seq("+", false);
        let e_ref = clauses.rule_ref("E");
        let seq = clauses.seq(vec![
            LabeledSub::unlabeled(e_ref),
            LabeledSub::unlabeled(plus),
            LabeledSub::unlabeled(d),
        ]);
        let first = clauses.first(vec![LabeledSub::unlabeled(seq), LabeledSub::unlabeled(d)]);
        let rule = Rule::new("E", LabeledSub::unlabeled(first));
        let grammar = Grammar::new(clauses, vec![rule]).unwrap();
        let e = grammar.rule_by_name("E").unwrap();
        assert_ne!(
            grammar.clauses().get(e.top.clause).clause_index,
            pika_clause::UNASSIGNED_INDEX
        );
    }

    #[test]
    fn duplicate_precedence_is_rejected() {
        let mut clauses = ClauseTable::new();
        let d1 = clauses.char_class(digits());
        let d2 = clauses.char_class(digits());
        let a = Rule::new("E", LabeledSub::unlabeled(d1)).with_precedence(0, Associativity::None);
        let b = Rule::new("E", LabeledSub::unlabeled(d2)).with_precedence(0, Associativity::None);
        let err = Grammar::new(clauses, vec![a, b]).unwrap_err();
        assert_eq!(
            err,
            GrammarError::DuplicatePrecedence { rule_name: "E".to_string(), precedence: 0 }
        );
    }

    #[test]
    fn precedence_group_wires_failover_to_next_level() {
        // Level 0 (lowest) wraps in First(body, RuleRef(level1)); level 1
        // (highest) does not.
        let mut clauses = ClauseTable::new();
        let d0 = clauses.char_class(digits());
        let d1 = clauses.char_class(digits());
        let a = Rule::new("E", LabeledSub::unlabeled(d0)).with_precedence(0, Associativity::None);
        let b = Rule::new("E", LabeledSub::unlabeled(d1)).with_precedence(1, Associativity::None);
        let grammar = Grammar::new(clauses, vec![a, b]).unwrap();
        let lowest = grammar.rule_by_name("E[0]").unwrap();
        assert!(matches!(
            grammar.clauses().get(lowest.top.clause).kind,
            pika_clause::ClauseKind::First
        ));
        let highest = grammar.rule_by_name("E[1]").unwrap();
        assert!(matches!(
            grammar.clauses().get(highest.top.clause).kind,
            pika_clause::ClauseKind::Char(_)
        ));
        // The bare name aliases to the lowest-precedence level.
        assert_eq!(grammar.rule_by_name("E").unwrap().name, "E[0]");
    }
}
