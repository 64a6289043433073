//! The clause DAG (spec §3, §4.4 design note "Cyclic clause graphs").
//!
//! Clauses live in a [`ClauseTable`], a `Vec`-backed store addressed by
//! [`ClauseId`]. A `RuleRef` is modeled as [`ClauseKind::RuleRef`] carrying a
//! name; rule-reference resolution (spec §4.4d) rewrites the `ClauseId`
//! stored in a parent's [`LabeledSub`] in place rather than patching a
//! pointer, which is what lets the construction-time DAG be temporarily
//! cyclic (through names) without any unsafe code.

use crate::charset::CharClass;
pub use pika_base::ClauseId;

/// The kind of PEG operator a clause represents (spec §3 "kind").
#[derive(Clone, Debug)]
pub enum ClauseKind {
    /// Matches a single codepoint against a (possibly inverted, possibly
    /// unioned) character class.
    Char(CharClass),
    /// Matches a literal string, optionally case-insensitively.
    CharSeq { text: Vec<char>, case_insensitive: bool },
    /// Zero-width; matches only at input position 0.
    Start,
    /// Zero-width; always matches.
    Nothing,
    /// Ordered concatenation, ≥2 children.
    Seq,
    /// Ordered alternative, ≥2 children.
    First,
    /// 1 child, one-or-more repetitions.
    OneOrMore,
    /// 1 child, zero-width positive lookahead.
    FollowedBy,
    /// 1 child, zero-width negative lookahead.
    NotFollowedBy,
    /// Not yet resolved: a bare reference to a rule name. Only ever seen
    /// during the window between clause construction and spec §4.4(d)
    /// reference resolution; a frozen grammar contains none.
    RuleRef(String),
}

impl ClauseKind {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ClauseKind::Char(_) | ClauseKind::CharSeq { .. } | ClauseKind::Start | ClauseKind::Nothing
        )
    }

    pub fn is_first(&self) -> bool {
        matches!(self, ClauseKind::First)
    }

    pub fn is_rule_ref(&self) -> bool {
        matches!(self, ClauseKind::RuleRef(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClauseKind::Char(_) => "Char",
            ClauseKind::CharSeq { .. } => "CharSeq",
            ClauseKind::Start => "Start",
            ClauseKind::Nothing => "Nothing",
            ClauseKind::Seq => "Seq",
            ClauseKind::First => "First",
            ClauseKind::OneOrMore => "OneOrMore",
            ClauseKind::FollowedBy => "FollowedBy",
            ClauseKind::NotFollowedBy => "NotFollowedBy",
            ClauseKind::RuleRef(_) => "RuleRef",
        }
    }
}

/// An edge in the clause DAG: an optional AST label attached to the edge,
/// plus the child it points to (spec §3: "the label is attached to the
/// edge, not the child").
#[derive(Clone, Debug)]
pub struct LabeledSub {
    pub label: Option<String>,
    pub clause: ClauseId,
}

impl LabeledSub {
    pub fn unlabeled(clause: ClauseId) -> Self {
        LabeledSub { label: None, clause }
    }

    pub fn labeled(label: impl Into<String>, clause: ClauseId) -> Self {
        LabeledSub {
            label: Some(label.into()),
            clause,
        }
    }
}

/// A node in the clause DAG, plus the metadata the grammar builder (spec
/// §4.4) and driver (spec §4.3) attach to it.
#[derive(Clone, Debug)]
pub struct ClauseData {
    pub kind: ClauseKind,
    pub subs: Vec<LabeledSub>,
    /// Computed bottom-up during grammar finalization (spec §4.4f).
    pub can_match_zero_chars: bool,
    /// Clauses to re-examine when this clause newly matches (spec §4.4g).
    pub seed_parents: Vec<ClauseId>,
    /// Position in topological order; terminals first, then non-terminals
    /// bottom-up (spec §4.4e). `usize::MAX` until assigned.
    pub clause_index: usize,
    /// Names of the rules this clause is the top-level clause of (spec §3,
    /// "for diagnostics only").
    pub rules: Vec<String>,
}

/// Sentinel `clause_index` for a clause that hasn't been placed in
/// topological order yet.
pub const UNASSIGNED_INDEX: usize = usize::MAX;

impl ClauseData {
    fn new(kind: ClauseKind, subs: Vec<LabeledSub>) -> Self {
        ClauseData {
            kind,
            subs,
            can_match_zero_chars: false,
            seed_parents: Vec::new(),
            clause_index: UNASSIGNED_INDEX,
            rules: Vec::new(),
        }
    }
}

/// The clause DAG: a `Vec`-backed arena of [`ClauseData`] addressed by
/// [`ClauseId`] (spec §9 design note: "arena of clause records indexed by
/// integer IDs").
#[derive(Clone, Debug, Default)]
pub struct ClauseTable {
    clauses: Vec<ClauseData>,
}

impl ClauseTable {
    pub fn new() -> Self {
        ClauseTable { clauses: Vec::new() }
    }

    pub fn get(&self, id: ClauseId) -> &ClauseData {
        &self.clauses[id.index()]
    }

    pub fn get_mut(&mut self, id: ClauseId) -> &mut ClauseData {
        &mut self.clauses[id.index()]
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClauseId, &ClauseData)> {
        self.clauses
            .iter()
            .enumerate()
            .map(|(i, c)| (ClauseId::from_index(i), c))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ClauseId, &mut ClauseData)> {
        self.clauses
            .iter_mut()
            .enumerate()
            .map(|(i, c)| (ClauseId::from_index(i), c))
    }

    fn push(&mut self, kind: ClauseKind, subs: Vec<LabeledSub>) -> ClauseId {
        if let Some(first) = subs.first() {
            assert!(
                !matches!(self.get(first.clause).kind, ClauseKind::Nothing),
                "a `Nothing` clause must not be the first sub-clause of any clause (spec §3)"
            );
        }
        let id = ClauseId::from_index(self.clauses.len());
        self.clauses.push(ClauseData::new(kind, subs));
        id
    }

    // -- Constructors (spec §3 kinds). `Optional`/`ZeroOrMore` are not
    // primitives; they desugar here per spec §3.

    pub fn char_class(&mut self, class: CharClass) -> ClauseId {
        self.push(ClauseKind::Char(class), Vec::new())
    }

    pub fn char_seq(&mut self, text: &str, case_insensitive: bool) -> ClauseId {
        self.push(
            ClauseKind::CharSeq {
                text: text.chars().collect(),
                case_insensitive,
            },
            Vec::new(),
        )
    }

    pub fn start(&mut self) -> ClauseId {
        self.push(ClauseKind::Start, Vec::new())
    }

    pub fn nothing(&mut self) -> ClauseId {
        self.push(ClauseKind::Nothing, Vec::new())
    }

    pub fn rule_ref(&mut self, name: impl Into<String>) -> ClauseId {
        self.push(ClauseKind::RuleRef(name.into()), Vec::new())
    }

    pub fn seq(&mut self, subs: Vec<LabeledSub>) -> ClauseId {
        assert!(subs.len() >= 2, "Seq requires at least 2 children (spec §3)");
        self.push(ClauseKind::Seq, subs)
    }

    pub fn first(&mut self, subs: Vec<LabeledSub>) -> ClauseId {
        assert!(subs.len() >= 2, "First requires at least 2 children (spec §3)");
        self.push(ClauseKind::First, subs)
    }

    pub fn one_or_more(&mut self, sub: LabeledSub) -> ClauseId {
        self.push(ClauseKind::OneOrMore, vec![sub])
    }

    pub fn followed_by(&mut self, sub: LabeledSub) -> ClauseId {
        self.push(ClauseKind::FollowedBy, vec![sub])
    }

    pub fn not_followed_by(&mut self, sub: LabeledSub) -> ClauseId {
        self.push(ClauseKind::NotFollowedBy, vec![sub])
    }

    /// `Optional(X)` desugars to `First(X, Nothing)` (spec §3).
    pub fn optional(&mut self, sub: LabeledSub) -> ClauseId {
        let nothing = self.nothing();
        self.first(vec![sub, LabeledSub::unlabeled(nothing)])
    }

    /// `ZeroOrMore(X)` desugars to `First(OneOrMore(X), Nothing)` (spec §3).
    pub fn zero_or_more(&mut self, sub: LabeledSub) -> ClauseId {
        let label = sub.label.clone();
        let one_or_more = self.one_or_more(sub);
        let nothing = self.nothing();
        self.first(vec![
            LabeledSub { label, clause: one_or_more },
            LabeledSub::unlabeled(nothing),
        ])
    }
}
