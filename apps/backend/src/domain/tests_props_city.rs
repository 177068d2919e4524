// Property tests for city effect application.

use proptest::prelude::*;

use crate::domain::city::Dimension;
use crate::domain::test_gens;

proptest! {
    #[test]
    fn apply_is_per_dimension_addition(
        city in test_gens::city_state(),
        effects in test_gens::effect_vector(),
    ) {
        let mut after = city;
        after.apply(&effects);
        for dim in Dimension::ALL {
            prop_assert_eq!(after.get(dim), city.get(dim) + effects.get(dim));
        }
    }

    #[test]
    fn collapse_iff_some_dimension_non_positive(city in test_gens::city_state()) {
        let expected = Dimension::ALL.iter().any(|d| city.get(*d) <= 0);
        prop_assert_eq!(city.is_collapsed(), expected);
    }

    #[test]
    fn applying_two_vectors_commutes(
        city in test_gens::city_state(),
        a in test_gens::effect_vector(),
        b in test_gens::effect_vector(),
    ) {
        let mut ab = city;
        ab.apply(&a);
        ab.apply(&b);
        let mut ba = city;
        ba.apply(&b);
        ba.apply(&a);
        prop_assert_eq!(ab, ba);
    }
}
