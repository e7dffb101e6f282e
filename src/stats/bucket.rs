use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
}

/// Bucket key for a timestamp: `YYYY-MM-DD` for days, `YYYY-MM` for months.
///
/// Timestamps are converted to UTC first so the same instant always lands in
/// the same bucket regardless of where the server runs.
pub fn bucket_key<Tz: TimeZone>(timestamp: &DateTime<Tz>, granularity: Granularity) -> String {
    let utc = timestamp.with_timezone(&Utc);
    match granularity {
        Granularity::Day => utc.format("%Y-%m-%d").to_string(),
        Granularity::Month => utc.format("%Y-%m").to_string(),
    }
}

/// Counts timestamps per bucket. Keys come back sorted.
pub fn bucket_by_period<Tz, I>(timestamps: I, granularity: Granularity) -> BTreeMap<String, u64>
where
    Tz: TimeZone,
    I: IntoIterator<Item = DateTime<Tz>>,
{
    let mut buckets = BTreeMap::new();
    for ts in timestamps {
        *buckets.entry(bucket_key(&ts, granularity)).or_insert(0) += 1;
    }
    buckets
}
