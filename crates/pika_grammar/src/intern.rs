//! spec §4.4(c): clause interning.
//!
//! Computes each clause's canonical string and deduplicates
//! structurally-identical clauses by string equality, turning the
//! per-rule clause trees into a shared DAG. Canonical strings are computed
//! by memoized recursion rather than a flat ascending sweep: precedence
//! rewriting (§4.4b) mutates an already-built clause in place to reference
//! freshly-appended `RuleRef` clauses, so a child's id is not guaranteed to
//! be lower than its parent's by the time interning runs. `RuleRef` is
//! always a leaf (no `subs`), so this recursion terminates even though the
//! overall clause graph at this stage still contains reference cycles.
use pika_base::ClauseId;
use pika_clause::{ClauseKind, ClauseTable};
use rustc_hash::FxHashMap;
use std::fmt::Write as _;

/// Rewrites every clause's sub-clause ids (and the ids this caller also
/// supplies, e.g. rule top clauses) to point at one canonical
/// representative per distinct structure.
pub fn intern(clauses: &mut ClauseTable, external_refs: &mut [&mut ClauseId]) {
    let mut cache: FxHashMap<ClauseId, String> = FxHashMap::default();
    let mut canonical_strings: Vec<String> = Vec::with_capacity(clauses.len());
    for (id, _) in clauses.iter() {
        canonical_strings.push(canonical_string(clauses, id, &mut cache).to_string());
    }

    let mut first_seen: FxHashMap<&str, ClauseId> = FxHashMap::default();
    let mut remap: Vec<ClauseId> = Vec::with_capacity(canonical_strings.len());
    for (id, _) in clauses.iter() {
        let s = canonical_strings[id.index()].as_str();
        let canonical = *first_seen.entry(s).or_insert(id);
        remap.push(canonical);
    }

    for (_, data) in clauses.iter_mut() {
        for sub in &mut data.subs {
            sub.clause = remap[sub.clause.index()];
        }
    }
    for r in external_refs.iter_mut() {
        **r = remap[r.index()];
    }
}

fn canonical_string<'a>(clauses: &ClauseTable, id: ClauseId, cache: &'a mut FxHashMap<ClauseId, String>) -> &'a str {
    if !cache.contains_key(&id) {
        let data = clauses.get(id);
        let mut out = String::new();
        match &data.kind {
            ClauseKind::Char(class) => {
                let _ = write!(out, "{class:?}");
            }
            ClauseKind::CharSeq { text, case_insensitive } => {
                let flag = if *case_insensitive { "i" } else { "" };
                let _ = write!(out, "\"{}\"{flag}", text.iter().collect::<String>());
            }
            ClauseKind::Start => out.push('^'),
            ClauseKind::Nothing => out.push_str("()"),
            ClauseKind::Seq => {
                out.push('(');
                write_children(&mut out, clauses, &data.subs, cache, " ");
                out.push(')');
            }
            ClauseKind::First => {
                out.push('(');
                write_children(&mut out, clauses, &data.subs, cache, " / ");
                out.push(')');
            }
            ClauseKind::OneOrMore => {
                let sub = data.subs[0].clone();
                let _ = write!(out, "{}+", labeled_child_string(clauses, &sub, cache));
            }
            ClauseKind::FollowedBy => {
                let sub = data.subs[0].clone();
                let _ = write!(out, "&{}", labeled_child_string(clauses, &sub, cache));
            }
            ClauseKind::NotFollowedBy => {
                let sub = data.subs[0].clone();
                let _ = write!(out, "!{}", labeled_child_string(clauses, &sub, cache));
            }
            ClauseKind::RuleRef(name) => out.push_str(name),
        }
        cache.insert(id, out);
    }
    cache.get(&id).unwrap()
}

fn write_children(
    out: &mut String,
    clauses: &ClauseTable,
    subs: &[pika_clause::LabeledSub],
    cache: &mut FxHashMap<ClauseId, String>,
    sep: &str,
) {
    for (i, sub) in subs.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        let sub = sub.clone();
        out.push_str(&labeled_child_string(clauses, &sub, cache));
    }
}

fn labeled_child_string(
    clauses: &ClauseTable,
    sub: &pika_clause::LabeledSub,
    cache: &mut FxHashMap<ClauseId, String>,
) -> String {
    let child = canonical_string(clauses, sub.clause, cache).to_string();
    match &sub.label {
        Some(label) => format!("{label}:{child}"),
        None => child,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pika_clause::LabeledSub;

    #[test]
    fn identical_char_seqs_intern_to_one_clause() {
        let mut clauses = ClauseTable::new();
        let a = clauses.char_seq("if", false);
        let b = clauses.char_seq("if", false);
        let c = clauses.char_seq("then", false);
        let seq = clauses.seq(vec![LabeledSub::unlabeled(a), LabeledSub::unlabeled(b), LabeledSub::unlabeled(c)]);
        let mut root = seq;
        intern(&mut clauses, &mut [&mut root]);
        let data = clauses.get(root);
        assert_eq!(data.subs[0].clause, data.subs[1].clause);
        assert_ne!(data.subs[0].clause, data.subs[2].clause);
    }

    #[test]
    fn distinct_rule_ref_names_stay_distinct_same_name_shares() {
        let mut clauses = ClauseTable::new();
        let a = clauses.rule_ref("Foo");
        let b = clauses.rule_ref("Foo");
        let c = clauses.rule_ref("Bar");
        let top = clauses.seq(vec![LabeledSub::unlabeled(a), LabeledSub::unlabeled(b), LabeledSub::unlabeled(c)]);
        let mut root = top;
        intern(&mut clauses, &mut [&mut root]);
        let data = clauses.get(root);
        assert_eq!(data.subs[0].clause, data.subs[1].clause);
        assert_ne!(data.subs[0].clause, data.subs[2].clause);
    }
}
