use std::fmt;

use serde::{Deserialize, Serialize};

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const MINUTES_PER_HOUR: u64 = 60;
pub const HOURS_PER_DAY: u64 = 24;
pub const SECONDS_PER_HOUR: u64 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;
pub const SECONDS_PER_DAY: u64 = SECONDS_PER_HOUR * HOURS_PER_DAY;

/// Recurrence period as the backend scheduler understands it.
///
/// `None` means "no recurrence component of this kind", which the scheduler treats
/// differently from a zero-length component. Months have no fixed length and never
/// carry into days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub months: Option<u64>,
    pub days: Option<u64>,
    pub seconds: Option<u64>,
}

impl Interval {
    pub fn is_empty(&self) -> bool {
        self.months.is_none() && self.days.is_none() && self.seconds.is_none()
    }
}

/// The five interval inputs as the user sees them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalFields {
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// Zero-padded display strings, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedInterval {
    pub months: String,
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

/// Reads a single interval input. Blank, negative and non-numeric input counts as zero.
pub fn parse_field(raw: &str) -> u64 {
    raw.trim().parse::<u64>().unwrap_or(0)
}

/// Carries overflow upwards in one pass: seconds into minutes, minutes into hours,
/// hours into days. Each stage tests the combined value of its own unit.
pub fn normalize_display(
    months: u64,
    days: u64,
    hours: u64,
    minutes: u64,
    seconds: u64,
) -> (u64, u64, u64, u64, u64) {
    let minutes = minutes.saturating_add(seconds / SECONDS_PER_MINUTE);
    let seconds = seconds % SECONDS_PER_MINUTE;

    let hours = hours.saturating_add(minutes / MINUTES_PER_HOUR);
    let minutes = minutes % MINUTES_PER_HOUR;

    let days = days.saturating_add(hours / HOURS_PER_DAY);
    let hours = hours % HOURS_PER_DAY;

    (months, days, hours, minutes, seconds)
}

pub fn to_interval(months: u64, days: u64, hours: u64, minutes: u64, seconds: u64) -> Interval {
    let total_seconds = hours
        .saturating_mul(SECONDS_PER_HOUR)
        .saturating_add(minutes.saturating_mul(SECONDS_PER_MINUTE))
        .saturating_add(seconds);

    Interval {
        months: non_zero(months),
        days: non_zero(days),
        seconds: non_zero(total_seconds),
    }
}

fn non_zero(value: u64) -> Option<u64> {
    (value != 0).then_some(value)
}

impl IntervalFields {
    pub fn parse(months: &str, days: &str, hours: &str, minutes: &str, seconds: &str) -> Self {
        Self {
            months: parse_field(months),
            days: parse_field(days),
            hours: parse_field(hours),
            minutes: parse_field(minutes),
            seconds: parse_field(seconds),
        }
    }

    pub fn normalized(&self) -> Self {
        let (months, days, hours, minutes, seconds) =
            normalize_display(self.months, self.days, self.hours, self.minutes, self.seconds);

        Self {
            months,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Applied whenever an interval input loses focus.
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    pub fn to_interval(&self) -> Interval {
        to_interval(self.months, self.days, self.hours, self.minutes, self.seconds)
    }

    /// Expands a stored interval back into display fields by plain division.
    pub fn from_interval(interval: &Interval) -> Self {
        let total = interval.seconds.unwrap_or(0);
        let below_day = total % SECONDS_PER_DAY;

        Self {
            months: interval.months.unwrap_or(0),
            days: interval
                .days
                .unwrap_or(0)
                .saturating_add(total / SECONDS_PER_DAY),
            hours: below_day / SECONDS_PER_HOUR,
            minutes: (below_day % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: below_day % SECONDS_PER_MINUTE,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn padded(&self) -> PaddedInterval {
        PaddedInterval {
            months: self.months.to_string(),
            days: self.days.to_string(),
            hours: format!("{:02}", self.hours),
            minutes: format!("{:02}", self.minutes),
            seconds: format!("{:02}", self.seconds),
        }
    }
}

impl fmt::Display for IntervalFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}mo {}d {:02}:{:02}:{:02}",
            self.months, self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn blank_and_garbage_fields_parse_as_zero() {
        assert_eq!(parse_field(""), 0);
        assert_eq!(parse_field("   "), 0);
        assert_eq!(parse_field("-5"), 0);
        assert_eq!(parse_field("abc"), 0);
        assert_eq!(parse_field(" 42 "), 42);
    }

    #[test]
    fn seconds_overflow_cascades_into_days() {
        let normalized = IntervalFields::parse("", "", "23", "59", "61").normalized();

        assert_eq!(
            normalized,
            IntervalFields {
                months: 0,
                days: 1,
                hours: 0,
                minutes: 0,
                seconds: 1,
            }
        );
    }

    #[test]
    fn months_are_never_carried() {
        let normalized = IntervalFields {
            months: 40,
            days: 400,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
        .normalized();

        assert_eq!(normalized.months, 40);
        assert_eq!(normalized.days, 400);
    }

    #[test]
    fn zero_components_become_none() {
        assert_eq!(to_interval(0, 0, 0, 0, 0), Interval::default());
        assert_eq!(
            to_interval(1, 0, 1, 1, 1),
            Interval {
                months: Some(1),
                days: None,
                seconds: Some(3661),
            }
        );
    }

    #[test]
    fn stored_interval_expands_into_display_fields() {
        let fields = IntervalFields::from_interval(&Interval {
            months: Some(2),
            days: Some(3),
            seconds: Some(SECONDS_PER_DAY + 3723),
        });

        assert_eq!(
            fields,
            IntervalFields {
                months: 2,
                days: 4,
                hours: 1,
                minutes: 2,
                seconds: 3,
            }
        );
    }

    #[test]
    fn padding_is_presentation_only() {
        let padded = IntervalFields {
            months: 0,
            days: 1,
            hours: 2,
            minutes: 3,
            seconds: 45,
        }
        .padded();

        assert_eq!(padded.months, "0");
        assert_eq!(padded.days, "1");
        assert_eq!(padded.hours, "02");
        assert_eq!(padded.minutes, "03");
        assert_eq!(padded.seconds, "45");
    }

    proptest! {
        #[test]
        fn test_normalization_bounds_and_conservation(
            h in 0u64..1_000_000,
            m in 0u64..1_000_000,
            s in 0u64..1_000_000,
        ) {
            let (_, days, hours, minutes, seconds) = normalize_display(0, 0, h, m, s);

            prop_assert!(seconds < 60);
            prop_assert!(minutes < 60);
            prop_assert!(hours < 24);
            prop_assert_eq!(
                days * SECONDS_PER_DAY + hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds,
                h * SECONDS_PER_HOUR + m * SECONDS_PER_MINUTE + s
            );
        }

        #[test]
        fn test_normalized_fields_expand_back_unchanged(
            months in 0u64..1000,
            days in 0u64..1000,
            h in 0u64..100_000,
            m in 0u64..100_000,
            s in 0u64..100_000,
        ) {
            let fields = IntervalFields { months, days, hours: h, minutes: m, seconds: s }.normalized();
            let expanded = IntervalFields::from_interval(&fields.to_interval());

            prop_assert_eq!(fields, expanded);
        }

        #[test]
        fn test_to_interval_is_none_exactly_on_zero(
            months in 0u64..3,
            days in 0u64..3,
            h in 0u64..3,
            m in 0u64..3,
            s in 0u64..3,
        ) {
            let interval = to_interval(months, days, h, m, s);

            prop_assert_eq!(interval.months.is_none(), months == 0);
            prop_assert_eq!(interval.days.is_none(), days == 0);
            prop_assert_eq!(interval.seconds.is_none(), h == 0 && m == 0 && s == 0);
            prop_assert_ne!(interval.months, Some(0));
            prop_assert_ne!(interval.days, Some(0));
            prop_assert_ne!(interval.seconds, Some(0));
        }
    }
}
