// Proptest generators for domain types.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::domain::city::{CityState, Dimension, EffectVector};

pub fn dimension() -> impl Strategy<Value = Dimension> {
    prop_oneof![
        Just(Dimension::Economy),
        Just(Dimension::Welfare),
        Just(Dimension::Education),
        Just(Dimension::Environment),
        Just(Dimension::Security),
        Just(Dimension::HumanRights),
    ]
}

/// Deltas in the range the reviewer is asked to produce, widened a little.
pub fn effect_vector() -> impl Strategy<Value = EffectVector> {
    prop::collection::btree_map(dimension(), -30i32..=30, 0..=6)
        .prop_map(|m| m.into_iter().collect())
}

pub fn city_state() -> impl Strategy<Value = CityState> {
    prop::array::uniform6(-20i32..=150).prop_map(|v| CityState {
        economy: v[0],
        welfare: v[1],
        education: v[2],
        environment: v[3],
        security: v[4],
        human_rights: v[5],
    })
}

/// Ballots for up to 4 voters over a small option pool; some may be empty.
pub fn ballots() -> impl Strategy<Value = BTreeMap<String, Option<String>>> {
    prop::collection::vec(prop::option::of(0usize..3), 0..=4).prop_map(|choices| {
        choices
            .into_iter()
            .enumerate()
            .map(|(i, c)| (format!("u{i}"), c.map(|p| format!("policy_{p:03}"))))
            .collect()
    })
}
