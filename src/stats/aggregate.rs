use serde::Serialize;

pub const MIN_STARS: i16 = 1;
pub const MAX_STARS: i16 = 5;

/// Fixed boost applied to recent activity when scoring trending projects.
pub const TRENDING_RECENCY_BOOST: f64 = 1.5;

/// A project needs at least this many ratings inside the trending window.
pub const MIN_TRENDING_RATINGS: u64 = 2;

/// Arithmetic mean of the given star values, `0.0` when there are none.
///
/// `0.0` means "unrated", never "rated zero stars". The result is unrounded;
/// use [`round_one_decimal`] only for display.
pub fn average_rating<I>(ratings: I) -> f64
where
    I: IntoIterator<Item = i16>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0i64, 0u64), |(sum, count), r| (sum + i64::from(r), count + 1));

    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Count and unrounded mean of a set of ratings.
///
/// Rows coming from SQL aggregates (`COUNT(*)`, `AVG(rating)`) and in-memory
/// star lists both end up here so ranking code only deals with one shape.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStats {
    pub total: u64,
    pub average: f64,
}

impl RatingStats {
    pub fn new(total: u64, average: Option<f64>) -> Self {
        if total == 0 {
            return Self::default();
        }

        Self {
            total,
            average: average.unwrap_or(0.0),
        }
    }

    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = i16>,
    {
        let stars: Vec<i16> = ratings.into_iter().collect();
        Self {
            total: stars.len() as u64,
            average: average_rating(stars),
        }
    }

    pub fn is_rated(&self) -> bool {
        self.total > 0
    }

    pub fn display_average(&self) -> f64 {
        round_one_decimal(self.average)
    }
}

/// Mean of per-project averages, skipping projects nobody has rated yet.
pub fn mean_of_rated_averages<'a, I>(projects: I) -> f64
where
    I: IntoIterator<Item = &'a RatingStats>,
{
    let (sum, count) = projects
        .into_iter()
        .filter(|p| p.is_rated())
        .fold((0.0, 0u64), |(sum, count), p| (sum + p.average, count + 1));

    if count == 0 { 0.0 } else { sum / count as f64 }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarBucket {
    pub stars: i16,
    pub count: u64,
    pub percentage: String,
}

/// Histogram over star values 1..=5, ordered by stars ascending.
///
/// Values outside 1..=5 are not counted; the write boundary rejects them.
pub fn rating_distribution<I>(ratings: I) -> Vec<StarBucket>
where
    I: IntoIterator<Item = i16>,
{
    let mut counts = [0u64; 5];
    for r in ratings {
        if let Some(slot) = star_index(r) {
            counts[slot] += 1;
        }
    }

    distribution_from_counts(counts)
}

/// Builds the histogram from `(stars, count)` pairs, e.g. a `GROUP BY rating`.
pub fn distribution_from_grouped<I>(grouped: I) -> Vec<StarBucket>
where
    I: IntoIterator<Item = (i16, u64)>,
{
    let mut counts = [0u64; 5];
    for (stars, count) in grouped {
        if let Some(slot) = star_index(stars) {
            counts[slot] += count;
        }
    }

    distribution_from_counts(counts)
}

fn star_index(stars: i16) -> Option<usize> {
    if (MIN_STARS..=MAX_STARS).contains(&stars) {
        Some((stars - MIN_STARS) as usize)
    } else {
        None
    }
}

fn distribution_from_counts(counts: [u64; 5]) -> Vec<StarBucket> {
    let total: u64 = counts.iter().sum();

    (MIN_STARS..=MAX_STARS)
        .zip(counts)
        .map(|(stars, count)| StarBucket {
            stars,
            count,
            percentage: format_percentage(count, total),
        })
        .collect()
}

fn format_percentage(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", count as f64 / total as f64 * 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub total: u64,
    pub average: f64,
    pub distribution: Vec<StarBucket>,
}

impl RatingSummary {
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = i16>,
    {
        let stars: Vec<i16> = ratings.into_iter().collect();
        Self {
            total: stars.len() as u64,
            average: round_one_decimal(average_rating(stars.iter().copied())),
            distribution: rating_distribution(stars),
        }
    }

    /// Summary from a `GROUP BY rating` result, which carries everything needed.
    pub fn from_grouped(grouped: &[(i16, u64)]) -> Self {
        let total: u64 = grouped.iter().map(|(_, count)| count).sum();
        let weighted: i64 = grouped
            .iter()
            .map(|(stars, count)| i64::from(*stars) * *count as i64)
            .sum();
        let average = if total == 0 {
            0.0
        } else {
            weighted as f64 / total as f64
        };

        Self {
            total,
            average: round_one_decimal(average),
            distribution: distribution_from_grouped(grouped.iter().copied()),
        }
    }
}

/// Recent-window activity for one project.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrendingStats {
    pub recent_ratings: u64,
    pub avg_recent_rating: f64,
}

impl TrendingStats {
    pub fn from_ratings<I>(recent: I) -> Self
    where
        I: IntoIterator<Item = i16>,
    {
        let stats = RatingStats::from_ratings(recent);
        Self {
            recent_ratings: stats.total,
            avg_recent_rating: stats.average,
        }
    }

    pub fn score(&self) -> f64 {
        self.recent_ratings as f64 * self.avg_recent_rating * TRENDING_RECENCY_BOOST
    }

    pub fn qualifies(&self) -> bool {
        self.recent_ratings >= MIN_TRENDING_RATINGS
    }
}

/// `count * average * 1.5` over the ratings inside the trending window.
///
/// Callers must still check [`TrendingStats::qualifies`]; a project with fewer
/// than two recent ratings is left out of trending output, not scored zero.
pub fn trending_score<I>(recent: I) -> f64
where
    I: IntoIterator<Item = i16>,
{
    TrendingStats::from_ratings(recent).score()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_summary_matches_list_summary() {
        let from_list = RatingSummary::from_ratings([5, 4, 5, 3, 5]);
        let from_grouped = RatingSummary::from_grouped(&[(5, 3), (3, 1), (4, 1)]);
        assert_eq!(from_list, from_grouped);
    }

    #[test]
    fn out_of_range_groups_are_ignored() {
        let dist = distribution_from_grouped([(0, 4), (6, 1), (2, 1)]);
        assert_eq!(dist[1].count, 1);
        assert_eq!(dist[1].percentage, "100.0");
        assert_eq!(dist.iter().map(|b| b.count).sum::<u64>(), 1);
    }

    #[test]
    fn stats_from_sql_aggregate_without_rows() {
        let stats = RatingStats::new(0, None);
        assert!(!stats.is_rated());
        assert_eq!(stats.average, 0.0);
    }
}
