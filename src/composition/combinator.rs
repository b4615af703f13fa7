//! Builds composite rule types.

use super::error::CompositionError;
use super::linearize::linearize;
use super::rule_type::{RuleId, RuleNode, RuleType};
use std::borrow::Borrow;

/// Combine rule types into a new composite rule type.
///
/// The composite's chain runs its inputs left to right; a rule reachable
/// through several inputs runs once, at the latest position some input
/// requires. Combining contradictory orders fails instead of picking one.
///
/// # Example
///
/// ```rust
/// use fieldrule::composition::{combine, RuleType};
/// use fieldrule::rules::{Number, Predicate, Type};
///
/// let number = RuleType::of::<Number>();
/// let ty = RuleType::of::<Type>();
/// let predicate = RuleType::of::<Predicate>();
///
/// let left = combine([&number, &ty]).unwrap();
/// let right = combine([&number, &predicate]).unwrap();
/// let both = combine([&left, &right]).unwrap();
/// assert_eq!(both.chain_names(), vec!["Number", "Type", "Predicate"]);
///
/// let flipped = combine([&ty, &number]).unwrap();
/// assert!(combine([&left, &flipped]).is_err());
/// ```
pub fn combine<I>(rules: I) -> Result<RuleType, CompositionError>
where
    I: IntoIterator,
    I::Item: Borrow<RuleType>,
{
    let members: Vec<RuleType> = rules
        .into_iter()
        .map(|rule| rule.borrow().clone())
        .collect();

    if members.is_empty() {
        return Err(CompositionError::empty());
    }
    for (index, member) in members.iter().enumerate() {
        if members[..index].contains(member) {
            return Err(CompositionError::duplicate(&member.to_string()));
        }
    }

    let linearization = linearize(&members)?;

    let mut nodes: Vec<RuleNode> = Vec::new();
    for node in members.iter().flat_map(|member| member.nodes()) {
        if !nodes.iter().any(|known| known.id() == node.id()) {
            nodes.push(node.clone());
        }
    }
    let chain: Vec<usize> = linearization
        .iter()
        .filter_map(|rule_id| nodes.iter().position(|node| node.id() == *rule_id))
        .collect();

    let composite = RuleType::composite(RuleId::unique(), members, nodes, chain);
    tracing::debug!(
        rule = %composite,
        chain = ?composite.chain_names(),
        "linearized rule chain"
    );
    Ok(composite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Context, Outcome, Rule, RuleError, Value};

    struct Named(&'static str);

    impl Rule for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn validate(&self, _ctx: &Context<'_>, _value: &Value) -> Result<Outcome, RuleError> {
            Ok(Outcome::Keep)
        }
    }

    fn rule(name: &'static str) -> RuleType {
        RuleType::new(name, move || Box::new(Named(name)))
    }

    #[test]
    fn pair_runs_left_to_right() {
        let (a, b) = (rule("A"), rule("B"));
        let combined = combine([&a, &b]).unwrap();

        assert_eq!(combined.chain_names(), vec!["A", "B"]);
        assert_eq!(combined.chain_ids(), vec![a.id(), b.id()]);
        assert!(combined.is_composite());
    }

    #[test]
    fn diamond_runs_shared_rule_once() {
        let (a, b, c) = (rule("A"), rule("B"), rule("C"));
        let left = combine([&a, &b]).unwrap();
        let right = combine([&a, &c]).unwrap();

        let combined = combine([&left, &right]).unwrap();

        assert_eq!(combined.nodes().len(), 3);
        assert_eq!(combined.chain_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn shared_rule_waits_for_every_predecessor() {
        let (a, b, c) = (rule("A"), rule("B"), rule("C"));
        let left = combine([&a, &b]).unwrap();
        let right = combine([&c, &b]).unwrap();

        let combined = combine([&left, &right]).unwrap();

        assert_eq!(combined.chain_names(), vec!["A", "C", "B"]);
    }

    #[test]
    fn contradictory_orders_fail() {
        let (a, b) = (rule("A"), rule("B"));
        let forward = combine([&a, &b]).unwrap();
        let backward = combine([&b, &a]).unwrap();

        let error = combine([&forward, &backward]).unwrap_err();

        assert_eq!(
            error.message,
            "Cannot create a consistent rule order for `A`, `B`"
        );
    }

    #[test]
    fn combination_is_associative() {
        let (a, b, c) = (rule("A"), rule("B"), rule("C"));

        let left_nested = combine([&combine([&a, &b]).unwrap(), &c]).unwrap();
        let right_nested = combine([&a, &combine([&b, &c]).unwrap()]).unwrap();

        assert_eq!(left_nested.chain_ids(), vec![a.id(), b.id(), c.id()]);
        assert_eq!(left_nested.chain_ids(), right_nested.chain_ids());
    }

    #[test]
    fn empty_combination_fails() {
        let error = combine(Vec::<RuleType>::new()).unwrap_err();
        assert_eq!(error, CompositionError::empty());
    }

    #[test]
    fn duplicate_input_fails() {
        let a = rule("A");
        let error = combine([&a, &a]).unwrap_err();
        assert_eq!(error.message, "Rule `A` is listed more than once");
    }

    #[test]
    fn and_flattens_composites() {
        let (a, b, c) = (rule("A"), rule("B"), rule("C"));

        let combined = a.and(&b).unwrap().and(&c).unwrap();

        assert_eq!(combined.members().len(), 3);
        assert_eq!(combined.chain_names(), vec!["A", "B", "C"]);
        assert_eq!(combined.to_string(), "CombinedRule(A, B, C)");
    }

    #[test]
    fn composite_with_itself_nested_is_deduplicated() {
        let (a, b) = (rule("A"), rule("B"));
        let pair = combine([&a, &b]).unwrap();

        let combined = combine([&pair, &a]).unwrap();

        assert_eq!(combined.chain_names(), vec!["A", "B"]);
    }

    #[test]
    fn rule_combined_with_composite_containing_it_runs_once() {
        let (a, b) = (rule("A"), rule("B"));
        let pair = combine([&a, &b]).unwrap();

        let combined = combine([&a, &pair]).unwrap();

        assert_eq!(combined.chain_names(), vec!["A", "B"]);
    }

    #[test]
    fn leaf_order_contradicting_member_fails() {
        let (a, b) = (rule("A"), rule("B"));
        let pair = combine([&a, &b]).unwrap();

        let error = combine([&b, &a, &pair]).unwrap_err();

        assert_eq!(
            error.message,
            "Cannot create a consistent rule order for `B`, `A`"
        );
    }

    #[test]
    fn every_combination_is_a_new_identity() {
        let (a, b) = (rule("A"), rule("B"));
        let first = combine([&a, &b]).unwrap();
        let second = combine([&a, &b]).unwrap();

        assert_ne!(first, second);
        assert_eq!(first.chain_ids(), second.chain_ids());
    }
}
