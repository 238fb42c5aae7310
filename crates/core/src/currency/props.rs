//! Property-based tests for currency operations.

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::rounding::{epsilon, is_settled, round_money};
use super::table::cross_rate;

/// Strategy to generate signed decimal amounts (-1,000,000.00 to 1,000,000.00).
fn signed_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate decimal places (0 to 4).
fn decimal_places() -> impl Strategy<Value = u32> {
    0u32..=4
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Rounding twice at the same precision equals rounding once.
    #[test]
    fn prop_round_money_idempotent(
        value in signed_amount(),
        precision in decimal_places(),
    ) {
        let once = round_money(value, precision);
        prop_assert_eq!(round_money(once, precision), once);
    }

    /// The rounded value never moves by more than half a minor unit.
    #[test]
    fn prop_round_money_bounded_error(
        value in signed_amount(),
        precision in decimal_places(),
    ) {
        let rounded = round_money(value, precision);
        let half_unit = Decimal::new(5, precision + 1);
        prop_assert!((rounded - value).abs() <= half_unit);
    }

    /// Rounding preserves sign (or yields zero).
    #[test]
    fn prop_round_money_preserves_sign(
        value in signed_amount(),
        precision in decimal_places(),
    ) {
        let rounded = round_money(value, precision);
        prop_assert!(
            rounded.is_zero()
                || rounded.is_sign_positive() == value.is_sign_positive()
        );
    }

    /// A balance within epsilon counts as settled, one epsilon beyond does not.
    #[test]
    fn prop_epsilon_is_settlement_boundary(precision in decimal_places()) {
        let eps = epsilon(precision);
        prop_assert!(is_settled(eps, precision));
        prop_assert!(!is_settled(eps + eps, precision));
    }

    /// Composing from -> to and to -> from from the same table are inverses.
    #[test]
    fn prop_cross_rate_inverse(
        from_units in positive_rate(),
        to_units in positive_rate(),
    ) {
        let table = HashMap::from([
            ("AAA".to_string(), from_units),
            ("BBB".to_string(), to_units),
        ]);
        let forward = cross_rate(&table, "USD", "AAA", "BBB").unwrap();
        let backward = cross_rate(&table, "USD", "BBB", "AAA").unwrap();
        // forward * backward == 1 up to decimal division precision
        let product = forward * backward;
        prop_assert!((product - Decimal::ONE).abs() < Decimal::new(1, 10));
    }

    /// Cross rate through the base equals the direct table entry.
    #[test]
    fn prop_cross_rate_from_base_is_direct(to_units in positive_rate()) {
        let table = HashMap::from([("AAA".to_string(), to_units)]);
        let rate = cross_rate(&table, "USD", "USD", "AAA").unwrap();
        prop_assert_eq!(rate, to_units);
    }
}
