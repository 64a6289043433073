//! # pika-query
//!
//! The query surface (spec §4.5, C6): read-only views over a completed
//! memo table — raw lookups, every match of a clause, the greedy
//! nonoverlapping scan, and the syntax-error complement.

use pika_base::ClauseId;
use pika_clause::ClauseTable;
use pika_grammar::{Grammar, GrammarError};
use pika_match::{Match, MemoKey};
use pika_memo::MemoTable;

/// spec §4.5 `best_match`: a raw table lookup, including the zero-length
/// synthesis and top-down `NotFollowedBy` policy of §4.2.
pub fn best_match(
    memo: &mut MemoTable,
    clauses: &ClauseTable,
    input: &[char],
    clause: ClauseId,
    pos: usize,
) -> Option<Match> {
    memo.lookup_best_match(clauses, input, MemoKey::new(clause, pos))
}

/// spec §4.5 `all_matches`: every stored match of `clause`, ordered by
/// start position ascending.
pub fn all_matches(memo: &MemoTable, clause: ClauseId) -> Vec<Match> {
    memo.matches_for(clause)
}

/// spec §4.5 `nonoverlapping_matches`: greedy left-to-right scan — keep a
/// match, then skip every match starting before the kept one's end
/// position.
pub fn nonoverlapping_matches(memo: &MemoTable, clause: ClauseId) -> Vec<Match> {
    let mut kept = Vec::new();
    let mut next_allowed_start = 0usize;
    for m in memo.matches_for(clause) {
        if m.memo_key.start_pos < next_allowed_start {
            continue;
        }
        next_allowed_start = m.end_pos();
        kept.push(m);
    }
    kept
}

/// spec §4.5 `syntax_errors`: the complement, within `[0, input.len())`, of
/// the union of the intervals covered by the nonoverlapping matches of
/// every named rule. Each gap is reported once as `(start, end, text)`.
pub fn syntax_errors(
    grammar: &Grammar,
    memo: &MemoTable,
    input: &[char],
    rule_names: &[&str],
) -> Result<Vec<(usize, usize, String)>, GrammarError> {
    let mut intervals = Vec::new();
    for &name in rule_names {
        let rule = grammar.rule_by_name(name)?;
        for m in nonoverlapping_matches(memo, rule.top.clause) {
            intervals.push((m.memo_key.start_pos, m.end_pos()));
        }
    }
    Ok(complement(&intervals, input.len())
        .into_iter()
        .map(|(start, end)| (start, end, input[start..end].iter().collect()))
        .collect())
}

/// Interval-union complement (spec §9: "a utility collaborator, not part
/// of the core"). Merges overlapping or adjacent covered intervals, then
/// returns the gaps in `[0, n)`. Print only when non-empty — spec §9 flags
/// a known inverted-condition bug in the reference implementation here;
/// the caller is responsible for not replicating it (an empty result here
/// means no errors, full stop).
fn complement(intervals: &[(usize, usize)], n: usize) -> Vec<(usize, usize)> {
    let mut sorted: Vec<(usize, usize)> = intervals.to_vec();
    sorted.sort_by_key(|&(start, _)| start);

    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in sorted {
        match merged.last_mut() {
            Some((_, last_end)) if start <= *last_end => {
                if end > *last_end {
                    *last_end = end;
                }
            }
            _ => merged.push((start, end)),
        }
    }

    let mut gaps = Vec::new();
    let mut cursor = 0usize;
    for (start, end) in merged {
        if start > cursor {
            gaps.push((cursor, start));
        }
        cursor = cursor.max(end);
    }
    if cursor < n {
        gaps.push((cursor, n));
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use pika_clause::{CharClass, CharRange, CharSet, LabeledSub};
    use pika_driver::parse;
    use pika_grammar::Rule;

    fn lowercase() -> CharClass {
        CharClass::single_set(CharSet::new(vec![CharRange { lo: 'a', hi: 'z' }]))
    }

    /// `Expr <- "(" Expr ")" / [a-z]`, the S2 nested-parens scenario.
    fn parens_grammar() -> Grammar {
        let mut clauses = ClauseTable::new();
        let open = clauses.char_seq("(", false);
        let expr_ref = clauses.rule_ref("Expr");
        let close = clauses.char_seq(")", false);
        let nested = clauses.seq(vec![
            LabeledSub::unlabeled(open),
            LabeledSub::unlabeled(expr_ref),
            LabeledSub::unlabeled(close),
        ]);
        let letter = clauses.char_class(lowercase());
        let top = clauses.first(vec![LabeledSub::unlabeled(nested), LabeledSub::unlabeled(letter)]);
        let rule = Rule::new("Expr", LabeledSub::unlabeled(top));
        Grammar::new(clauses, vec![rule]).unwrap()
    }

    #[test]
    fn nonoverlapping_matches_finds_one_full_span() {
        let grammar = parens_grammar();
        let input: Vec<char> = "((x))".chars().collect();
        let memo = parse(&grammar, &input, Default::default());
        let expr = grammar.rule_by_name("Expr").unwrap();
        let kept = nonoverlapping_matches(&memo, expr.top.clause);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].memo_key.start_pos, 0);
        assert_eq!(kept[0].length, 5);
    }

    #[test]
    fn all_matches_includes_the_inner_nested_spans() {
        let grammar = parens_grammar();
        let input: Vec<char> = "((x))".chars().collect();
        let memo = parse(&grammar, &input, Default::default());
        let expr = grammar.rule_by_name("Expr").unwrap();
        let found = all_matches(&memo, expr.top.clause);
        let starts: Vec<usize> = found.iter().map(|m| m.memo_key.start_pos).collect();
        assert!(starts.contains(&0));
        assert!(starts.contains(&1));
        assert!(starts.contains(&2));
    }

    #[test]
    fn syntax_errors_is_empty_when_the_whole_input_is_covered() {
        let grammar = parens_grammar();
        let input: Vec<char> = "((x))".chars().collect();
        let memo = parse(&grammar, &input, Default::default());
        let errors = syntax_errors(&grammar, &memo, &input, &["Expr"]).unwrap();
        assert!(errors.is_empty());
    }

    /// `Program <- Statement+`, `Statement <- [a-z]+ ';'`, with a gap of
    /// un-parseable input in the middle — the S6 syntax-error scenario.
    fn statement_grammar() -> Grammar {
        let mut clauses = ClauseTable::new();
        let letter = clauses.char_class(lowercase());
        let letters = clauses.one_or_more(LabeledSub::unlabeled(letter));
        let semi = clauses.char_seq(";", false);
        let statement_top = clauses.seq(vec![LabeledSub::unlabeled(letters), LabeledSub::unlabeled(semi)]);
        let statement = Rule::new("Statement", LabeledSub::unlabeled(statement_top));
        let statement_ref = clauses.rule_ref("Statement");
        let program_top = clauses.one_or_more(LabeledSub::unlabeled(statement_ref));
        let program = Rule::new("Program", LabeledSub::unlabeled(program_top));
        Grammar::new(clauses, vec![program, statement]).unwrap()
    }

    #[test]
    fn syntax_errors_reports_the_gap_between_statements() {
        let grammar = statement_grammar();
        let input: Vec<char> = "ab;???cd;".chars().collect();
        let memo = parse(&grammar, &input, Default::default());
        let errors = syntax_errors(&grammar, &memo, &input, &["Statement"]).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], (3, 6, "???".to_string()));
    }

    #[test]
    fn syntax_errors_propagates_unresolved_rule_names() {
        let grammar = parens_grammar();
        let input: Vec<char> = "x".chars().collect();
        let memo = parse(&grammar, &input, Default::default());
        let err = syntax_errors(&grammar, &memo, &input, &["Missing"]).unwrap_err();
        assert_eq!(err, GrammarError::UnresolvedRuleRef { name: "Missing".to_string() });
    }
}
