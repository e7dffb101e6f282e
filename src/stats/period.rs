use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::bucket::Granularity;

/// Time window a statistic is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
    All,
}

impl Period {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Some(Period::Day),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            "year" => Some(Period::Year),
            "all" => Some(Period::All),
            _ => None,
        }
    }

    /// Parses a query value, falling back to `default` for missing or unknown
    /// values and for periods the caller does not support.
    pub fn parse_or(value: Option<&str>, allowed: &[Period], default: Period) -> Self {
        value
            .and_then(Period::parse)
            .filter(|p| allowed.contains(p))
            .unwrap_or(default)
    }

    pub fn window(&self) -> Option<Duration> {
        match self {
            Period::Day => Some(Duration::days(1)),
            Period::Week => Some(Duration::days(7)),
            Period::Month => Some(Duration::days(30)),
            Period::Year => Some(Duration::days(365)),
            Period::All => None,
        }
    }

    /// Lower bound of the window ending at `now`, `None` for all time.
    pub fn since(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.window().map(|w| now - w)
    }

    /// Activity charts use daily buckets up to a month and monthly beyond.
    pub fn activity_granularity(&self) -> Granularity {
        match self {
            Period::Day | Period::Week | Period::Month => Granularity::Day,
            Period::Year | Period::All => Granularity::Month,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }
}

pub const TRENDING_PERIODS: &[Period] = &[Period::Day, Period::Week, Period::Month];
pub const ACTIVITY_PERIODS: &[Period] = &[Period::Week, Period::Month, Period::Year];
pub const LEADERBOARD_PERIODS: &[Period] = &[Period::Week, Period::Month, Period::Year, Period::All];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_trending_period_falls_back_to_week() {
        assert_eq!(
            Period::parse_or(Some("fortnight"), TRENDING_PERIODS, Period::Week),
            Period::Week
        );
        assert_eq!(
            Period::parse_or(Some("year"), TRENDING_PERIODS, Period::Week),
            Period::Week
        );
        assert_eq!(
            Period::parse_or(Some("DAY"), TRENDING_PERIODS, Period::Week),
            Period::Day
        );
    }

    #[test]
    fn all_time_has_no_lower_bound() {
        assert_eq!(Period::All.since(Utc::now()), None);
    }

    #[test]
    fn year_activity_is_grouped_by_month() {
        assert_eq!(Period::Year.activity_granularity(), Granularity::Month);
        assert_eq!(Period::Week.activity_granularity(), Granularity::Day);
    }
}
