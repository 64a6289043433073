//! # pika
//!
//! Facade crate (spec §6): the three external entry points — building a
//! [`Grammar`], parsing an input with it, and looking up rules by name —
//! plus the C6 query surface re-exported for convenience.

pub use pika_clause::{
    CharClass, CharRange, CharSet, ClauseKind, ClauseTable, LabeledSub,
};
pub use pika_driver::{MemoStats, ParseOptions};
pub use pika_grammar::{Associativity, GrammarError, Rule, UNSPECIFIED_PRECEDENCE};
pub use pika_match::{Match, MemoKey};
pub use pika_memo::MemoTable;

pub use pika_base::ClauseId;

/// A frozen, parse-ready grammar (spec §4.4 output), paired with the
/// driver loop that sweeps it over an input.
pub struct Grammar(pika_grammar::Grammar);

impl Grammar {
    /// spec §6 entry point 1: runs the seven-step builder pipeline (§4.4).
    pub fn new(clauses: ClauseTable, rules: Vec<Rule>) -> Result<Grammar, GrammarError> {
        Ok(Grammar(pika_grammar::Grammar::new(clauses, rules)?))
    }

    /// spec §6 entry point 2: runs the priority-queue sweep (§4.3),
    /// returning the filled memo table.
    pub fn parse(&self, input: &[char], options: ParseOptions) -> MemoTable {
        pika_driver::parse(&self.0, input, options)
    }

    /// spec §6 entry point 3.
    pub fn rule_by_name(&self, name: &str) -> Result<&Rule, GrammarError> {
        self.0.rule_by_name(name)
    }

    pub fn rules(&self) -> &[Rule] {
        self.0.rules()
    }

    pub fn clauses(&self) -> &ClauseTable {
        self.0.clauses()
    }

    /// spec §4.5 `best_match`.
    pub fn best_match(
        &self,
        memo: &mut MemoTable,
        input: &[char],
        clause: ClauseId,
        pos: usize,
    ) -> Option<Match> {
        pika_query::best_match(memo, self.clauses(), input, clause, pos)
    }

    /// spec §4.5 `all_matches`.
    pub fn all_matches(&self, memo: &MemoTable, clause: ClauseId) -> Vec<Match> {
        pika_query::all_matches(memo, clause)
    }

    /// spec §4.5 `nonoverlapping_matches`.
    pub fn nonoverlapping_matches(&self, memo: &MemoTable, clause: ClauseId) -> Vec<Match> {
        pika_query::nonoverlapping_matches(memo, clause)
    }

    /// spec §4.5 `syntax_errors`.
    pub fn syntax_errors(
        &self,
        memo: &MemoTable,
        input: &[char],
        rule_names: &[&str],
    ) -> Result<Vec<(usize, usize, String)>, GrammarError> {
        pika_query::syntax_errors(&self.0, memo, input, rule_names)
    }
}
