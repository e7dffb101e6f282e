use buildable_api::stats::{Granularity, Period, bucket_by_period, bucket_key};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[test]
fn test_day_and_month_keys() {
    let ts = utc(2025, 3, 7, 12, 0);

    assert_eq!(bucket_key(&ts, Granularity::Day), "2025-03-07");
    assert_eq!(bucket_key(&ts, Granularity::Month), "2025-03");
}

#[test]
fn test_buckets_use_utc_regardless_of_offset() {
    // 23:50 at UTC-05:00 is already the next day in UTC
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let local = offset.with_ymd_and_hms(2025, 1, 31, 23, 50, 0).unwrap();

    assert_eq!(bucket_key(&local, Granularity::Day), "2025-02-01");
    assert_eq!(bucket_key(&local, Granularity::Month), "2025-02");
    assert_eq!(
        bucket_key(&local, Granularity::Day),
        bucket_key(&local.with_timezone(&Utc), Granularity::Day)
    );
}

#[test]
fn test_bucket_counts_are_sorted_by_key() {
    let timestamps = vec![
        utc(2025, 2, 2, 9, 0),
        utc(2025, 1, 15, 8, 0),
        utc(2025, 2, 2, 23, 59),
        utc(2025, 1, 15, 0, 0),
        utc(2025, 1, 16, 0, 0),
    ];

    let days = bucket_by_period(timestamps.clone(), Granularity::Day);
    let days: Vec<_> = days.into_iter().collect();
    assert_eq!(
        days,
        vec![
            ("2025-01-15".to_string(), 2),
            ("2025-01-16".to_string(), 1),
            ("2025-02-02".to_string(), 2),
        ]
    );

    let months = bucket_by_period(timestamps, Granularity::Month);
    assert_eq!(months.get("2025-01"), Some(&3));
    assert_eq!(months.get("2025-02"), Some(&2));
    assert_eq!(months.values().sum::<u64>(), 5);
}

#[test]
fn test_no_timestamps_no_buckets() {
    assert!(bucket_by_period(Vec::<DateTime<Utc>>::new(), Granularity::Day).is_empty());
}

#[test]
fn test_activity_periods_pick_granularity() {
    assert_eq!(Period::Week.activity_granularity(), Granularity::Day);
    assert_eq!(Period::Month.activity_granularity(), Granularity::Day);
    assert_eq!(Period::Year.activity_granularity(), Granularity::Month);
}
