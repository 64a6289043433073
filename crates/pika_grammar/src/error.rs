//! Grammar-construction errors (spec §6 "Errors surfaced to callers", §7).
//!
//! These are programmer errors in the supplied grammar, not parse-time
//! conditions — construction either succeeds completely or aborts with one
//! of these. Hand-rolled per the teacher lineage's error style
//! (`logicaffeine_kernel::interface::error`): no `thiserror`, since the
//! core is a library and callers classify on the variant.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrammarError {
    /// The rule list passed to `Grammar::new` was empty.
    EmptyRuleList,
    /// A rule's top-level clause is a bare reference to its own name.
    SelfReferentialBody { rule_name: String },
    /// Two rules share both a name and a precedence.
    DuplicatePrecedence { rule_name: String, precedence: i32 },
    /// A rule declared a negative precedence explicitly.
    NegativePrecedence { rule_name: String, precedence: i32 },
    /// A `RuleRef` names a rule that does not exist.
    UnresolvedRuleRef { name: String },
    /// A chain of `RuleRef`s never reaches a non-reference clause.
    ReferenceCycle { name: String },
    /// One of the §3 structural invariants was violated.
    InvariantViolation { description: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::EmptyRuleList => write!(f, "grammar must have at least one rule"),
            GrammarError::SelfReferentialBody { rule_name } => {
                write!(f, "rule `{rule_name}` is a bare reference to itself")
            }
            GrammarError::DuplicatePrecedence { rule_name, precedence } => {
                write!(f, "rule `{rule_name}` declares precedence {precedence} more than once")
            }
            GrammarError::NegativePrecedence { rule_name, precedence } => {
                write!(f, "rule `{rule_name}` declares negative precedence {precedence}")
            }
            GrammarError::UnresolvedRuleRef { name } => {
                write!(f, "reference to undefined rule `{name}`")
            }
            GrammarError::ReferenceCycle { name } => {
                write!(f, "rule reference cycle reaching `{name}` never resolves to a clause")
            }
            GrammarError::InvariantViolation { description } => {
                write!(f, "grammar invariant violated: {description}")
            }
        }
    }
}

impl std::error::Error for GrammarError {}
