//! Property tests for the calendar math.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use proptest::prelude::*;

use vetfiles_core::schedule::{
    block_top_px, days_in_month, days_to_show, navigate, week_start, CalendarView, HOUR_ROW_PX,
};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1990..2100i32, 1..=12u32, 1..=28u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    #[test]
    fn week_view_is_seven_consecutive_days_from_sunday(anchor in arb_date()) {
        let days = days_to_show(CalendarView::Week, anchor);
        prop_assert_eq!(days.len(), 7);
        prop_assert_eq!(days[0].weekday(), Weekday::Sun);
        prop_assert!(days.contains(&anchor));
        for pair in days.windows(2) {
            prop_assert_eq!(pair[1], pair[0].succ_opt().unwrap());
        }
    }

    #[test]
    fn week_start_never_after_anchor(anchor in arb_date()) {
        let start = week_start(anchor);
        prop_assert!(start <= anchor);
        prop_assert!((anchor - start).num_days() < 7);
    }

    #[test]
    fn month_view_covers_exactly_the_anchor_month(anchor in arb_date()) {
        let days = days_to_show(CalendarView::Month, anchor);
        prop_assert_eq!(days.len() as u32, days_in_month(anchor));
        prop_assert_eq!(days[0].day(), 1);
        prop_assert!(days.iter().all(|d| d.month() == anchor.month() && d.year() == anchor.year()));
    }

    #[test]
    fn day_view_is_just_the_anchor(anchor in arb_date()) {
        prop_assert_eq!(days_to_show(CalendarView::Day, anchor), vec![anchor]);
    }

    #[test]
    fn week_navigation_round_trips(anchor in arb_date(), steps in 1..50i32) {
        let forward = navigate(CalendarView::Week, anchor, steps);
        let back = navigate(CalendarView::Week, forward, -steps);
        prop_assert_eq!(back, anchor);
    }

    #[test]
    fn day_navigation_round_trips(anchor in arb_date(), steps in 1..365i32) {
        let forward = navigate(CalendarView::Day, anchor, steps);
        prop_assert_eq!((forward - anchor).num_days(), steps as i64);
        prop_assert_eq!(navigate(CalendarView::Day, forward, -steps), anchor);
    }

    #[test]
    fn month_navigation_keeps_early_days(anchor in arb_date(), steps in 1..24i32) {
        // Days 1..=28 exist in every month, so no clamping applies and
        // the round trip is exact.
        let forward = navigate(CalendarView::Month, anchor, steps);
        prop_assert_eq!(forward.day(), anchor.day());
        prop_assert_eq!(navigate(CalendarView::Month, forward, -steps), anchor);
    }

    #[test]
    fn block_top_stays_inside_grid(h in 0..24u32, m in 0..60u32) {
        let top = block_top_px(NaiveTime::from_hms_opt(h, m, 0).unwrap());
        prop_assert!(top >= 0.0);
        prop_assert!(top < 24.0 * HOUR_ROW_PX);
    }

    #[test]
    fn block_top_is_monotonic_in_time(h in 0..23u32, m in 0..59u32) {
        let earlier = NaiveTime::from_hms_opt(h, m, 0).unwrap();
        let later = NaiveTime::from_hms_opt(h, m + 1, 0).unwrap();
        prop_assert!(block_top_px(earlier) < block_top_px(later));
    }
}
