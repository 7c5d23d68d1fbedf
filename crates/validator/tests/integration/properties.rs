use formkit_validator::prelude::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn min_length_agrees_with_char_count(s in "\\PC{0,20}", min in 0usize..20) {
        let ok = min_length(min).validate(s.as_str()).is_ok();
        prop_assert_eq!(ok, s.chars().count() >= min);
    }

    #[test]
    fn in_range_agrees_with_bounds(value in -1000.0f64..1000.0) {
        let ok = in_range(1.0, 100.0).validate(&value).is_ok();
        prop_assert_eq!(ok, (1.0..=100.0).contains(&value));
    }

    #[test]
    fn integral_accepts_every_whole_number(n in -1_000_000i64..1_000_000) {
        #[allow(clippy::cast_precision_loss)]
        let value = n as f64;
        prop_assert!(integral().validate(&value).is_ok());
    }

    #[test]
    fn ignore_case_suffix_matches_any_casing(local in "[a-z]{1,10}", upper in any::<bool>()) {
        let domain = if upper { "@GMAIL.COM" } else { "@gmail.com" };
        let input = format!("{local}{domain}");
        prop_assert!(ends_with("@gmail.com").ignore_case().validate(&input).is_ok());
    }
}
