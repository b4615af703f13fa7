//! Monotonic merge of local rule orders into one chain.
//!
//! Every combination site declares a local order and each input brings its
//! own already-computed chain of leaf rules. The merge repeatedly takes the
//! first sequence head that no other sequence requires to come later.
//! Scanning sequences left to right makes the result follow declaration
//! order whenever more than one order is valid.

use super::error::CompositionError;
use super::rule_type::{RuleId, RuleType};
use std::collections::VecDeque;

/// No head could be placed without violating some sequence's order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict<T> {
    /// The distinct heads left when the merge got stuck.
    pub heads: Vec<T>,
}

/// Merge `sequences` into one order that preserves the relative order of
/// every input sequence, picking the leftmost eligible head at each step.
pub fn merge<T: Clone + PartialEq>(sequences: Vec<Vec<T>>) -> Result<Vec<T>, Conflict<T>> {
    let mut pending: Vec<VecDeque<T>> = sequences
        .into_iter()
        .filter(|sequence| !sequence.is_empty())
        .map(VecDeque::from)
        .collect();
    let mut merged = Vec::new();

    while !pending.is_empty() {
        let candidate = pending
            .iter()
            .filter_map(|sequence| sequence.front())
            .find(|head| {
                !pending
                    .iter()
                    .any(|sequence| sequence.iter().skip(1).any(|item| item == *head))
            })
            .cloned();

        let Some(next) = candidate else {
            let mut heads: Vec<T> = Vec::new();
            for head in pending.iter().filter_map(|sequence| sequence.front()) {
                if !heads.contains(head) {
                    heads.push(head.clone());
                }
            }
            return Err(Conflict { heads });
        };

        for sequence in pending.iter_mut() {
            if sequence.front() == Some(&next) {
                sequence.pop_front();
            }
        }
        pending.retain(|sequence| !sequence.is_empty());
        merged.push(next);
    }

    Ok(merged)
}

/// Chain of a composite with direct inputs `members`: the merge of every
/// member's leaf chain, with leaf members additionally kept in declaration
/// order. A composite member is spliced in as its chain, so a rule reached
/// through several members still appears once.
pub(crate) fn linearize(members: &[RuleType]) -> Result<Vec<RuleId>, CompositionError> {
    let mut sequences: Vec<Vec<RuleId>> = members.iter().map(RuleType::chain_ids).collect();
    sequences.push(
        members
            .iter()
            .filter(|member| !member.is_composite())
            .map(RuleType::id)
            .collect(),
    );

    merge(sequences).map_err(|conflict| {
        let names = conflict
            .heads
            .iter()
            .map(|id| name_of(*id, members))
            .collect::<Vec<_>>();
        CompositionError::inconsistent(&names)
    })
}

fn name_of(id: RuleId, members: &[RuleType]) -> String {
    members
        .iter()
        .find_map(|member| member.find(id))
        .map(|found| found.to_string())
        .unwrap_or_else(|| format!("{id:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sequence_is_kept() {
        assert_eq!(merge(vec![vec![1, 2, 3]]), Ok(vec![1, 2, 3]));
    }

    #[test]
    fn empty_input_merges_to_empty() {
        assert_eq!(merge::<u8>(vec![]), Ok(vec![]));
        assert_eq!(merge::<u8>(vec![vec![], vec![]]), Ok(vec![]));
    }

    #[test]
    fn shared_tail_appears_once() {
        // X = (A, B), Y = (A, C), Z = (X, Y)
        let merged = merge(vec![vec!["X", "A", "B"], vec!["Y", "A", "C"], vec!["X", "Y"]]);
        assert_eq!(merged, Ok(vec!["X", "Y", "A", "B", "C"]));
    }

    #[test]
    fn later_requirement_defers_head() {
        // X = (A, B), Y = (C, B): B must follow C.
        let merged = merge(vec![vec!["X", "A", "B"], vec!["Y", "C", "B"], vec!["X", "Y"]]);
        assert_eq!(merged, Ok(vec!["X", "A", "Y", "C", "B"]));
    }

    #[test]
    fn contradictory_orders_conflict() {
        let merged = merge(vec![vec!["A", "B"], vec!["B", "A"]]);
        assert_eq!(
            merged,
            Err(Conflict {
                heads: vec!["A", "B"]
            })
        );
    }

    #[test]
    fn ties_follow_declaration_order() {
        assert_eq!(merge(vec![vec![2], vec![1], vec![3]]), Ok(vec![2, 1, 3]));
    }
}
