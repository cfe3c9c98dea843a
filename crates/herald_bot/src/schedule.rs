//! Posting schedules for the internal timer.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// When scheduled runs fire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ScheduleType {
    /// Cron expression (7 fields: sec min hour day month weekday year)
    ///
    /// Example: "0 0 9 * * * *" = 9 AM daily
    Cron {
        /// Cron expression string
        expression: String,
    },

    /// Fixed interval in seconds
    Interval {
        /// Interval duration in seconds
        seconds: u64,
    },
}

impl ScheduleType {
    /// Check the schedule can ever fire.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ScheduleType::Cron { expression } => cron::Schedule::from_str(expression)
                .map(|_| ())
                .map_err(|e| format!("invalid cron expression `{}`: {}", expression, e)),
            ScheduleType::Interval { seconds: 0 } => {
                Err("interval_seconds must be greater than zero".to_string())
            }
            ScheduleType::Interval { seconds } => self
                .next_execution(Utc::now())
                .map(|_| ())
                .ok_or_else(|| format!("interval_seconds {} is out of range", seconds)),
        }
    }

    /// Calculate the next execution time strictly after `after`.
    ///
    /// Returns `None` for an invalid or exhausted schedule.
    pub fn next_execution(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            ScheduleType::Interval { seconds: 0 } => None,
            ScheduleType::Interval { seconds } => {
                let step = TimeDelta::try_seconds(i64::try_from(*seconds).ok()?)?;
                after.checked_add_signed(step)
            }
            ScheduleType::Cron { expression } => cron::Schedule::from_str(expression)
                .ok()
                .and_then(|schedule| schedule.after(&after).next()),
        }
    }

    /// How long to sleep from `now` until the next run.
    pub fn delay_until_next(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        let next = self.next_execution(now)?;
        Some((next - now).to_std().unwrap_or_default())
    }
}

impl std::fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleType::Cron { expression } => write!(f, "cron({})", expression),
            ScheduleType::Interval { seconds } => write!(f, "every {}s", seconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_interval_next_execution() {
        let schedule = ScheduleType::Interval { seconds: 3600 };
        let now = Utc::now();
        assert_eq!(schedule.next_execution(now), Some(now + TimeDelta::hours(1)));
        assert_eq!(
            schedule.delay_until_next(now),
            Some(std::time::Duration::from_secs(3600))
        );
    }

    #[test]
    fn test_cron_next_execution_is_next_matching_time() {
        let schedule = ScheduleType::Cron {
            expression: "0 0 9 * * * *".to_string(),
        };
        let after = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let next = schedule.next_execution(after).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap());
        assert_eq!(next.hour(), 9);
    }

    #[test]
    fn test_invalid_schedules() {
        let bad_cron = ScheduleType::Cron {
            expression: "every day".to_string(),
        };
        assert!(bad_cron.validate().is_err());
        assert!(bad_cron.next_execution(Utc::now()).is_none());

        let zero = ScheduleType::Interval { seconds: 0 };
        assert!(zero.validate().is_err());
        assert!(zero.next_execution(Utc::now()).is_none());
    }

    #[test]
    fn test_oversized_interval_is_rejected_without_panicking() {
        let huge = ScheduleType::Interval {
            seconds: 1_000_000_000_000_000,
        };
        assert!(huge.validate().is_err());
        assert!(huge.next_execution(Utc::now()).is_none());
        assert!(huge.delay_until_next(Utc::now()).is_none());

        let max = ScheduleType::Interval { seconds: u64::MAX };
        assert!(max.validate().is_err());
        assert!(max.next_execution(Utc::now()).is_none());
    }

    #[test]
    fn test_deserializes_tagged_form() {
        let schedule: ScheduleType =
            serde_json::from_str(r#"{"type":"Interval","seconds":60}"#).unwrap();
        assert_eq!(schedule, ScheduleType::Interval { seconds: 60 });
    }
}
