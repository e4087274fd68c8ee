//! Calendar math for the day/week/month views.
//!
//! Pure functions of (view, anchor date). Weeks start on Sunday.

use chrono::{Datelike, Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

/// Active calendar view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalendarView {
    Day,
    Week,
    Month,
}

impl CalendarView {
    /// Display label, as shown in the view switcher.
    pub fn label(&self) -> &'static str {
        match self {
            CalendarView::Day => "Día",
            CalendarView::Week => "Semana",
            CalendarView::Month => "Mes",
        }
    }

    /// Parse a display label back into a view.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Día" => Some(CalendarView::Day),
            "Semana" => Some(CalendarView::Week),
            "Mes" => Some(CalendarView::Month),
            _ => None,
        }
    }
}

/// The Sunday on or before the given date.
pub fn week_start(anchor: NaiveDate) -> NaiveDate {
    anchor - TimeDelta::days(anchor.weekday().num_days_from_sunday() as i64)
}

/// Number of days in the anchor's month.
pub fn days_in_month(anchor: NaiveDate) -> u32 {
    let (next_year, next_month) = if anchor.month() == 12 {
        (anchor.year() + 1, 1)
    } else {
        (anchor.year(), anchor.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}

/// The ordered dates a view renders for the given anchor: the anchor
/// itself for Day, the anchor's Sunday-started week for Week, every date
/// of the anchor's month for Month.
pub fn days_to_show(view: CalendarView, anchor: NaiveDate) -> Vec<NaiveDate> {
    match view {
        CalendarView::Day => vec![anchor],
        CalendarView::Week => {
            let start = week_start(anchor);
            (0..7)
                .map(|i| start + TimeDelta::days(i))
                .collect()
        }
        CalendarView::Month => {
            let count = days_in_month(anchor);
            (1..=count)
                .filter_map(|day| anchor.with_day(day))
                .collect()
        }
    }
}

/// Shift the anchor by `direction` steps of the view's period: days,
/// weeks, or calendar months. Month steps clamp the day-of-month to the
/// target month's length (Jan 31 back one month is Dec 31, forward is
/// Feb 28/29).
pub fn navigate(view: CalendarView, anchor: NaiveDate, direction: i32) -> NaiveDate {
    match view {
        CalendarView::Day => anchor + TimeDelta::days(direction as i64),
        CalendarView::Week => anchor + TimeDelta::days(7 * direction as i64),
        CalendarView::Month => {
            let months = Months::new(direction.unsigned_abs());
            let shifted = if direction >= 0 {
                anchor.checked_add_months(months)
            } else {
                anchor.checked_sub_months(months)
            };
            shifted.unwrap_or(anchor)
        }
    }
}

/// Leading blank cells in the month grid: the weekday index (Sunday = 0)
/// of the 1st of the anchor's month.
pub fn leading_blank_days(anchor: NaiveDate) -> u32 {
    anchor
        .with_day(1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Hour labels for the day/week grid, midnight through 23:00.
pub fn day_hours() -> impl Iterator<Item = u32> {
    0..24
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_view_label_round_trip() {
        for view in [CalendarView::Day, CalendarView::Week, CalendarView::Month] {
            assert_eq!(CalendarView::parse(view.label()), Some(view));
        }
        assert_eq!(CalendarView::parse("Año"), None);
    }

    #[test]
    fn test_day_view_shows_anchor_only() {
        let anchor = date(2024, 3, 15);
        assert_eq!(days_to_show(CalendarView::Day, anchor), vec![anchor]);
    }

    #[test]
    fn test_week_view_starts_sunday() {
        // 2024-03-15 is a Friday
        let days = days_to_show(CalendarView::Week, date(2024, 3, 15));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2024, 3, 10));
        assert_eq!(days[0].weekday(), Weekday::Sun);
        assert_eq!(days[6], date(2024, 3, 16));
    }

    #[test]
    fn test_week_view_anchor_on_sunday() {
        let sunday = date(2024, 3, 10);
        let days = days_to_show(CalendarView::Week, sunday);
        assert_eq!(days[0], sunday);
    }

    #[test]
    fn test_month_view_covers_whole_month() {
        let days = days_to_show(CalendarView::Month, date(2024, 2, 15));
        assert_eq!(days.len(), 29); // 2024 is a leap year
        assert_eq!(days[0], date(2024, 2, 1));
        assert_eq!(days[28], date(2024, 2, 29));
        assert!(days.iter().all(|d| d.month() == 2 && d.year() == 2024));
    }

    #[test]
    fn test_navigate_day_and_week() {
        let anchor = date(2024, 3, 15);
        assert_eq!(navigate(CalendarView::Day, anchor, 1), date(2024, 3, 16));
        assert_eq!(navigate(CalendarView::Day, anchor, -1), date(2024, 3, 14));
        assert_eq!(navigate(CalendarView::Week, anchor, 1), date(2024, 3, 22));
        assert_eq!(navigate(CalendarView::Week, anchor, -2), date(2024, 3, 1));
    }

    #[test]
    fn test_navigate_month_clamps_day() {
        assert_eq!(
            navigate(CalendarView::Month, date(2024, 1, 31), 1),
            date(2024, 2, 29)
        );
        assert_eq!(
            navigate(CalendarView::Month, date(2024, 3, 31), -1),
            date(2024, 2, 29)
        );
        assert_eq!(
            navigate(CalendarView::Month, date(2024, 6, 15), 1),
            date(2024, 7, 15)
        );
    }

    #[test]
    fn test_navigate_month_crosses_year() {
        assert_eq!(
            navigate(CalendarView::Month, date(2024, 12, 10), 1),
            date(2025, 1, 10)
        );
        assert_eq!(
            navigate(CalendarView::Month, date(2024, 1, 10), -1),
            date(2023, 12, 10)
        );
    }

    #[test]
    fn test_leading_blank_days() {
        // March 2024 starts on a Friday
        assert_eq!(leading_blank_days(date(2024, 3, 15)), 5);
        // September 2024 starts on a Sunday
        assert_eq!(leading_blank_days(date(2024, 9, 20)), 0);
    }

    #[test]
    fn test_day_hours_span_full_day() {
        let hours: Vec<u32> = day_hours().collect();
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0], 0);
        assert_eq!(hours[23], 23);
    }
}
