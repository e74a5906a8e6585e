//! Property tests for unit conversions

use std::cmp::Ordering;

use aptflow_units::{
    compare_amounts, convert_between_decimals, format_units, is_valid_amount, parse_whole_str,
    to_smallest_units, U256,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn format_then_parse_is_exact(value in any::<u64>(), decimals in 0u32..=18) {
        let text = format_units(value, decimals, None).unwrap();
        prop_assert_eq!(parse_whole_str(&text, decimals).unwrap(), U256::from(value));
    }

    #[test]
    fn compare_agrees_across_representations(a in any::<u64>(), b in any::<u64>()) {
        let expected = a.cmp(&b);
        prop_assert_eq!(compare_amounts(a, b).unwrap(), expected);
        prop_assert_eq!(compare_amounts(a.to_string(), U256::from(b)).unwrap(), expected);
        prop_assert_eq!(compare_amounts(U256::from(a), b.to_string()).unwrap(), expected);
    }

    #[test]
    fn compare_is_antisymmetric(a in any::<u128>(), b in any::<u128>()) {
        let forward = compare_amounts(a, b).unwrap();
        let backward = compare_amounts(b, a).unwrap();
        prop_assert_eq!(forward, backward.reverse());
    }

    #[test]
    fn upscale_then_downscale_is_identity(value in any::<u64>(), from in 0u32..20, extra in 0u32..20) {
        let up = convert_between_decimals(value, from, from + extra).unwrap();
        prop_assert_eq!(convert_between_decimals(up, from + extra, from).unwrap(), U256::from(value));
    }

    #[test]
    fn downscale_never_rounds_up(value in any::<u64>(), drop in 1u32..10) {
        let down = convert_between_decimals(value, drop, 0).unwrap();
        let back = convert_between_decimals(down, 0, drop).unwrap();
        prop_assert!(back <= U256::from(value));
    }

    #[test]
    fn whole_integers_scale_exactly(whole in 0u64..1_000_000_000, decimals in 0u32..=18) {
        let expected = U256::from(whole) * U256::from(10u64).pow(U256::from(decimals));
        prop_assert_eq!(to_smallest_units(whole, decimals).unwrap(), expected);
        prop_assert_eq!(to_smallest_units(whole.to_string(), decimals).unwrap(), expected);
    }

    #[test]
    fn non_negative_numbers_are_valid(value in 0.0f64..1e300) {
        prop_assert!(is_valid_amount(value));
    }

    #[test]
    fn negative_numbers_are_invalid(value in -1e300f64..-1e-300) {
        prop_assert!(!is_valid_amount(value));
        prop_assert!(!is_valid_amount(value.to_string()));
    }
}

#[test]
fn compare_equal_values_in_every_form() {
    assert_eq!(compare_amounts(5i64, "5").unwrap(), Ordering::Equal);
    assert_eq!(compare_amounts(5.0, U256::from(5u64)).unwrap(), Ordering::Equal);
}
