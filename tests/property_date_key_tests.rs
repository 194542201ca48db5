use calendar_chart::core::{DateKeyFormat, DateKeyFormatter};
use chrono::NaiveDate;
use proptest::prelude::*;

fn day_strategy() -> impl Strategy<Value = NaiveDate> {
    // Roughly year -2700 through year 10900, covering signed and 5-digit years.
    (-1_000_000i32..4_000_000).prop_map(|days| {
        NaiveDate::from_num_days_from_ce_opt(days).expect("day number inside chrono range")
    })
}

fn format_strategy() -> impl Strategy<Value = DateKeyFormat> {
    prop_oneof![
        Just(DateKeyFormat::DayMonthYear),
        Just(DateKeyFormat::YearMonthDay),
    ]
}

proptest! {
    #[test]
    fn distinct_days_never_share_a_key(
        format in format_strategy(),
        first in day_strategy(),
        second in day_strategy(),
    ) {
        prop_assume!(first != second);
        let formatter = DateKeyFormatter::new(format);
        prop_assert_ne!(formatter.format(first), formatter.format(second));
    }

    #[test]
    fn time_of_day_is_ignored(
        format in format_strategy(),
        day in day_strategy(),
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
    ) {
        let formatter = DateKeyFormatter::new(format);
        let moment = day.and_hms_opt(hour, minute, second).expect("valid time");
        prop_assert_eq!(formatter.format(moment), formatter.format(day));
    }

    #[test]
    fn parse_inverts_format(format in format_strategy(), day in day_strategy()) {
        let formatter = DateKeyFormatter::new(format);
        let key = formatter.format(day);
        let parsed = formatter.parse(key.as_str()).expect("formatted keys parse");
        prop_assert_eq!(parsed.day(), day);
        prop_assert_eq!(parsed.as_str(), key.as_str());
    }

    #[test]
    fn key_order_matches_day_order(
        format in format_strategy(),
        first in day_strategy(),
        second in day_strategy(),
    ) {
        let formatter = DateKeyFormatter::new(format);
        prop_assert_eq!(
            formatter.format(first).cmp(&formatter.format(second)),
            first.cmp(&second)
        );
    }
}
