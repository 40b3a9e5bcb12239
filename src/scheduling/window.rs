use time::{Date, Duration, OffsetDateTime, Time};

use crate::db::models::AvailabilityRule;

/// Concrete open-hours interval for one calendar date, half-open
/// `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

/// Day-of-week number for `date` with 0 = Sunday .. 6 = Saturday, the
/// numbering availability rules are stored under. Calendar dates carry no
/// time-of-day, so the derivation is identical under the fixed UTC
/// reference clock.
pub fn weekday(date: Date) -> i16 {
    i16::from(date.weekday().number_days_from_sunday())
}

/// Anchors a weekly rule to a concrete date. Both bounds land on `date` in
/// UTC; the rule invariant `start_time < end_time` keeps the window
/// non-empty.
pub fn resolve_window(rule: &AvailabilityRule, date: Date) -> Window {
    Window {
        start: at(date, rule.start_time),
        end: at(date, rule.end_time),
    }
}

/// `[midnight, next midnight)` bounds of `date` in UTC, used to fetch the
/// day's existing bookings.
pub fn day_bounds(date: Date) -> (OffsetDateTime, OffsetDateTime) {
    let start = date.midnight().assume_utc();
    (start, start + Duration::days(1))
}

fn at(date: Date, time: Time) -> OffsetDateTime {
    date.with_time(time).assume_utc()
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime, time};
    use uuid::Uuid;

    use super::*;

    fn rule(start: Time, end: Time) -> AvailabilityRule {
        AvailabilityRule {
            id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            day_of_week: 1,
            start_time: start,
            end_time: end,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn weekday_is_zero_for_sunday() {
        assert_eq!(weekday(date!(2024 - 08 - 11)), 0); // Sunday
        assert_eq!(weekday(date!(2024 - 08 - 12)), 1); // Monday
        assert_eq!(weekday(date!(2024 - 08 - 17)), 6); // Saturday
    }

    #[test]
    fn window_is_anchored_to_the_requested_date() {
        let window = resolve_window(&rule(time!(09:00), time!(17:00)), date!(2024 - 08 - 12));
        assert_eq!(window.start, datetime!(2024 - 08 - 12 09:00 UTC));
        assert_eq!(window.end, datetime!(2024 - 08 - 12 17:00 UTC));
    }

    #[test]
    fn day_bounds_cover_exactly_one_day() {
        let (start, end) = day_bounds(date!(2024 - 08 - 12));
        assert_eq!(start, datetime!(2024 - 08 - 12 00:00 UTC));
        assert_eq!(end, datetime!(2024 - 08 - 13 00:00 UTC));
    }
}
