//! Property-based tests for the core loop vocabulary.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use proptest::prelude::*;
use samloop::{model_diff, ActionRequest, Restriction, StateDefinition, StateIdentity};
use serde::Serialize;

#[derive(Clone, Debug, Serialize, PartialEq)]
struct Gauge {
    level: i64,
    armed: bool,
}

#[derive(Clone, Debug)]
struct Nudge;

impl ActionRequest for Nudge {
    fn id(&self) -> &str {
        "nudge"
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Band(usize);

impl StateIdentity for Band {
    fn id(&self) -> &str {
        "band"
    }
}

fn action_ids() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z]{1,8}", 0..6)
}

prop_compose! {
    fn arbitrary_gauge()(level in -50i64..50, armed in any::<bool>()) -> Gauge {
        Gauge { level, armed }
    }
}

proptest! {
    #[test]
    fn disallow_blocks_exactly_the_listed_ids(ids in action_ids(), query in "[a-z]{1,8}") {
        let policy = Restriction::disallow(ids.clone());
        prop_assert_eq!(policy.blocks(&query), ids.contains(&query));
    }

    #[test]
    fn strictly_allow_is_the_dual_of_disallow(ids in action_ids(), query in "[a-z]{1,8}") {
        let allow = Restriction::strictly_allow(ids.clone());
        let deny = Restriction::disallow(ids);
        prop_assert_eq!(allow.blocks(&query), !deny.blocks(&query));
    }

    #[test]
    fn blocks_is_deterministic(ids in action_ids(), query in "[a-z]{1,8}") {
        let policy = Restriction::strictly_allow(ids);
        prop_assert_eq!(policy.blocks(&query), policy.blocks(&query));
    }

    #[test]
    fn first_match_respects_declaration_order(level in -50i64..50, cuts in proptest::collection::vec(-50i64..50, 1..8)) {
        // Band i matches when the level is below its cut; the matcher must
        // pick the first such band, never a later one.
        let definitions: Vec<StateDefinition<Gauge, Nudge, Band>> = cuts
            .iter()
            .enumerate()
            .map(|(index, &cut)| {
                StateDefinition::new(Band(index), move |g: &Gauge| g.level < cut)
            })
            .collect();

        let gauge = Gauge { level, armed: false };
        let matched = definitions.iter().position(|def| def.matches(&gauge));
        let expected = cuts.iter().position(|&cut| level < cut);
        prop_assert_eq!(matched, expected);
    }

    #[test]
    fn diff_is_empty_iff_models_are_equal(old in arbitrary_gauge(), new in arbitrary_gauge()) {
        let diff = model_diff(&old, &new);
        prop_assert_eq!(diff.is_empty(), old == new);
    }

    #[test]
    fn diff_has_one_line_per_changed_field(old in arbitrary_gauge(), new in arbitrary_gauge()) {
        let changed = usize::from(old.level != new.level) + usize::from(old.armed != new.armed);
        let diff = model_diff(&old, &new);
        prop_assert_eq!(diff.lines().count(), changed);
    }

    #[test]
    fn gate_check_never_depends_on_payload(ids in action_ids()) {
        // Admissibility is a function of the action id alone.
        let def = StateDefinition::<Gauge, Nudge, Band>::new(Band(0), |_: &Gauge| true)
            .disallow(ids.clone());
        prop_assert_eq!(def.admits("nudge"), !ids.contains(&"nudge".to_string()));
    }
}
