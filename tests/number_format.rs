use period_bars::format::{self, NumberStyle, Tier, annotation_text, format_abbreviated};
use proptest::prelude::*;

#[test]
fn billions_use_two_decimals() {
    assert_eq!(format_abbreviated(1_500_000_000.0), "1.50 tỷ");
    assert_eq!(format_abbreviated(12_345_678_901.0), "12.35 tỷ");
}

#[test]
fn millions_use_two_decimals() {
    assert_eq!(format_abbreviated(2_345_678.0), "2.35 tr");
    assert_eq!(format_abbreviated(1_000_000.0), "1.00 tr");
}

#[test]
fn thousands_use_one_decimal() {
    assert_eq!(format_abbreviated(4_500.0), "4.5 k");
    assert_eq!(format_abbreviated(1_000.0), "1.0 k");
}

#[test]
fn below_a_thousand_is_a_plain_integer() {
    assert_eq!(format_abbreviated(999.0), "999");
    assert_eq!(format_abbreviated(0.0), "0");
    assert_eq!(format_abbreviated(42.4), "42");
}

#[test]
fn negative_values_pick_the_same_tier_as_positive() {
    assert_eq!(format_abbreviated(-1_500_000_000.0), "-1.50 tỷ");
    assert_eq!(format_abbreviated(-7_260.0), "-7.3 k");
    assert_eq!(format_abbreviated(-999.0), "-999");
}

#[test]
fn plain_grouped_truncates_and_groups() {
    assert_eq!(format::format(1_234_567.9, NumberStyle::PlainGrouped), "1,234,567");
    assert_eq!(format::format(999.0, NumberStyle::PlainGrouped), "999");
    assert_eq!(format::format(-12_345.0, NumberStyle::PlainGrouped), "-12,345");
}

#[test]
fn annotation_puts_share_on_second_line() {
    let label = annotation_text(2_500_000.0, Some(35.5), NumberStyle::AbbreviatedCurrency);
    assert_eq!(label.to_string(), "2.50 tr\n(35.5%)");
    assert_eq!(label.lines(), vec!["2.50 tr", "(35.5%)"]);

    let bare = annotation_text(1_234.0, None, NumberStyle::PlainGrouped);
    assert_eq!(bare.to_string(), "1,234");
    assert_eq!(bare.lines().len(), 1);
}

proptest! {
    #[test]
    fn tier_is_monotonic_in_magnitude(a in -1.0e12f64..1.0e12, b in -1.0e12f64..1.0e12) {
        if a.abs() < b.abs() {
            prop_assert!(Tier::of(a) <= Tier::of(b));
        }
    }

    #[test]
    fn sign_does_not_change_the_digits(v in 0.0f64..1.0e12) {
        let pos = format_abbreviated(v);
        let neg = format_abbreviated(-v);
        if neg != pos {
            prop_assert_eq!(neg, format!("-{pos}"));
        }
    }
}
