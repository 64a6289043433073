//! spec §4.4(f): zero-character analysis.

use crate::error::GrammarError;
use pika_base::ClauseId;
use pika_clause::{ClauseKind, ClauseTable};

pub fn analyze(clauses: &mut ClauseTable, order: &[ClauseId]) -> Result<(), GrammarError> {
    for &id in order {
        let flag = compute_flag(clauses, id)?;
        clauses.get_mut(id).can_match_zero_chars = flag;
    }
    Ok(())
}

fn compute_flag(clauses: &ClauseTable, id: ClauseId) -> Result<bool, GrammarError> {
    let data = clauses.get(id);
    Ok(match &data.kind {
        ClauseKind::NotFollowedBy => {
            if clauses.get(data.subs[0].clause).can_match_zero_chars {
                return Err(GrammarError::InvariantViolation {
                    description: "`NotFollowedBy` of a sub-clause that matches zero characters can never match"
                        .to_string(),
                });
            }
            true
        }
        ClauseKind::Nothing | ClauseKind::FollowedBy | ClauseKind::Start => true,
        ClauseKind::Char(_) | ClauseKind::CharSeq { .. } => false,
        ClauseKind::Seq => data.subs.iter().all(|s| clauses.get(s.clause).can_match_zero_chars),
        ClauseKind::First => {
            let zero_positions: Vec<usize> = data
                .subs
                .iter()
                .enumerate()
                .filter(|(_, s)| clauses.get(s.clause).can_match_zero_chars)
                .map(|(i, _)| i)
                .collect();
            if let Some(&last_zero) = zero_positions.last() {
                if last_zero != data.subs.len() - 1 {
                    return Err(GrammarError::InvariantViolation {
                        description: "a `First` alternative that matches zero characters must be last".to_string(),
                    });
                }
            }
            !zero_positions.is_empty()
        }
        ClauseKind::OneOrMore => clauses.get(data.subs[0].clause).can_match_zero_chars,
        ClauseKind::RuleRef(name) => {
            unreachable!("unresolved RuleRef({name}) survived into zero-char analysis")
        }
    })
}
