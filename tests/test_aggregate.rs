use buildable_api::stats::{
    RatingStats, RatingSummary, TrendingStats, average_rating, rating_distribution,
    round_one_decimal, trending_score,
};

fn counts(ratings: &[i16]) -> Vec<u64> {
    rating_distribution(ratings.iter().copied())
        .into_iter()
        .map(|bucket| bucket.count)
        .collect()
}

fn percentages(ratings: &[i16]) -> Vec<String> {
    rating_distribution(ratings.iter().copied())
        .into_iter()
        .map(|bucket| bucket.percentage)
        .collect()
}

#[test]
fn test_mixed_ratings_summary() {
    let ratings = [5, 4, 5, 3, 5];

    let average = average_rating(ratings);
    assert!((average - 4.4).abs() < 1e-9);
    assert_eq!(round_one_decimal(average), 4.4);
    assert_eq!(format!("{:.1}", average), "4.4");

    assert_eq!(counts(&ratings), vec![0, 0, 1, 1, 3]);
    assert_eq!(percentages(&ratings), vec!["0.0", "0.0", "20.0", "20.0", "60.0"]);

    let stars: Vec<i16> = rating_distribution(ratings)
        .into_iter()
        .map(|bucket| bucket.stars)
        .collect();
    assert_eq!(stars, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_empty_ratings_are_unrated() {
    assert_eq!(average_rating(Vec::<i16>::new()), 0.0);
    assert_eq!(counts(&[]), vec![0, 0, 0, 0, 0]);
    assert!(percentages(&[]).iter().all(|p| p == "0.0"));

    let summary = RatingSummary::from_ratings(Vec::new());
    assert_eq!(summary.total, 0);
    assert_eq!(summary.average, 0.0);

    let stats = RatingStats::from_ratings(Vec::new());
    assert!(!stats.is_rated());
    assert_eq!(stats.display_average(), 0.0);
}

#[test]
fn test_average_stays_within_star_range() {
    let samples: [&[i16]; 6] = [
        &[1],
        &[5],
        &[1, 5],
        &[2, 2, 3],
        &[5, 5, 5, 5, 4],
        &[1, 1, 1, 2, 1, 1, 1],
    ];

    for ratings in samples {
        let average = average_rating(ratings.iter().copied());
        assert!(
            (1.0..=5.0).contains(&average),
            "average {} out of range for {:?}",
            average,
            ratings
        );
    }
}

#[test]
fn test_distribution_counts_sum_to_total() {
    let samples: [&[i16]; 4] = [&[], &[3], &[1, 2, 3, 4, 5], &[4, 4, 4, 5, 1, 2, 2]];

    for ratings in samples {
        let total: u64 = counts(ratings).iter().sum();
        assert_eq!(total, ratings.len() as u64);
    }
}

#[test]
fn test_percentages_add_up_to_hundred() {
    let samples: [&[i16]; 4] = [&[3], &[1, 2, 3], &[1, 2, 3, 4, 5, 5], &[5, 4, 4, 2, 1, 1, 3]];

    for ratings in samples {
        let sum: f64 = percentages(ratings)
            .iter()
            .map(|p| p.parse::<f64>().unwrap())
            .sum();
        // each bucket is rounded to one decimal independently
        assert!((sum - 100.0).abs() <= 0.3, "sum was {} for {:?}", sum, ratings);
    }
}

#[test]
fn test_aggregates_are_idempotent() {
    let ratings = vec![4, 2, 5, 5, 1, 3];

    assert_eq!(
        average_rating(ratings.iter().copied()),
        average_rating(ratings.iter().copied())
    );
    assert_eq!(
        rating_distribution(ratings.iter().copied()),
        rating_distribution(ratings.iter().copied())
    );
    assert_eq!(
        RatingSummary::from_ratings(ratings.clone()),
        RatingSummary::from_ratings(ratings)
    );
}

#[test]
fn test_another_five_star_never_lowers_average() {
    let mut ratings: Vec<i16> = vec![1, 3, 2];

    for _ in 0..10 {
        let before = average_rating(ratings.iter().copied());
        ratings.push(5);
        let after = average_rating(ratings.iter().copied());
        assert!(after >= before, "{} dropped to {}", before, after);
    }
}

#[test]
fn test_trending_score_for_two_recent_ratings() {
    let recent = [5, 5];

    assert_eq!(trending_score(recent), 15.0);

    let stats = TrendingStats::from_ratings(recent);
    assert_eq!(stats.recent_ratings, 2);
    assert!(stats.qualifies());
}

#[test]
fn test_single_recent_rating_does_not_qualify() {
    for stars in 1..=5 {
        let stats = TrendingStats::from_ratings([stars]);
        assert!(!stats.qualifies());
    }

    assert!(!TrendingStats::from_ratings(Vec::new()).qualifies());
}

#[test]
fn test_rating_stats_from_sql_aggregate() {
    // COUNT(*) = 0 comes with AVG() = NULL
    assert_eq!(RatingStats::new(0, None), RatingStats::default());

    let stats = RatingStats::new(3, Some(4.666666));
    assert!(stats.is_rated());
    assert_eq!(stats.display_average(), 4.7);
    assert!((stats.average - 4.666666).abs() < 1e-9);
}
