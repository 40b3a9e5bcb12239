use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::{OffsetDateTime, Time};
use validator::{Validate, ValidationError};

// Wall-clock "09:00" style times, matching what providers type into the
// schedule form.
time::serde::format_description!(wall_clock, Time, "[hour]:[minute]");

/// Recurring weekly open-hours statement for one weekday.
/// `day_of_week` uses 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub day_of_week: i16,
    #[serde(with = "wall_clock")]
    pub start_time: Time,
    #[serde(with = "wall_clock")]
    pub end_time: Time,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// One entry of a full-replace availability payload. The provider's whole
/// week is replaced at once; there is no incremental patching.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "rule_times_ordered"))]
pub struct NewAvailabilityRule {
    #[validate(range(min = 0, max = 6, message = "day_of_week must be within 0..=6"))]
    pub day_of_week: i16,
    #[serde(with = "wall_clock")]
    pub start_time: Time,
    #[serde(with = "wall_clock")]
    pub end_time: Time,
}

fn rule_times_ordered(rule: &NewAvailabilityRule) -> Result<(), ValidationError> {
    if rule.start_time >= rule.end_time {
        return Err(ValidationError::new("start_time_must_precede_end_time"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use time::macros::time;
    use validator::Validate;

    use super::NewAvailabilityRule;

    #[test]
    fn rejects_inverted_times() {
        let rule = NewAvailabilityRule {
            day_of_week: 1,
            start_time: time!(17:00),
            end_time: time!(09:00),
        };
        assert!(rule.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_day() {
        let rule = NewAvailabilityRule {
            day_of_week: 7,
            start_time: time!(09:00),
            end_time: time!(17:00),
        };
        assert!(rule.validate().is_err());
    }

    #[test]
    fn parses_wall_clock_payload() {
        let rule: NewAvailabilityRule = serde_json::from_str(
            r#"{"day_of_week": 1, "start_time": "09:00", "end_time": "17:00"}"#,
        )
        .expect("payload should deserialize");
        assert_eq!(rule.start_time, time!(09:00));
        assert_eq!(rule.end_time, time!(17:00));
        assert!(rule.validate().is_ok());
    }
}
