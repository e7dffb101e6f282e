use buildable_api::stats::{
    DeveloperStats, RatingStats, TrendingStats, leaderboard_score, rank_categories_by_usage,
    rank_developers, rank_projects_by_rating_then_volume, rank_trending, with_ranks,
};

#[derive(Debug, Clone)]
struct Project {
    name: &'static str,
    stats: RatingStats,
}

fn project(name: &'static str, total: u64, average: f64) -> Project {
    Project {
        name,
        stats: RatingStats::new(total, Some(average)),
    }
}

fn names(projects: &[Project]) -> Vec<&'static str> {
    projects.iter().map(|p| p.name).collect()
}

#[test]
fn test_developer_average_skips_unrated_projects() {
    let projects = [RatingStats::new(10, Some(4.5)), RatingStats::new(0, None)];
    let stats = DeveloperStats::from_projects(&projects);

    assert_eq!(stats.total_projects, 2);
    assert_eq!(stats.total_ratings, 10);
    assert_eq!(stats.average_rating, 4.5);
    assert_eq!(leaderboard_score(&stats), 160.0);
    assert_eq!(stats.score(), 160.0);
}

#[test]
fn test_developer_without_ratings_scores_projects_only() {
    let projects = [RatingStats::new(0, None); 3];
    let stats = DeveloperStats::from_projects(&projects);

    assert_eq!(stats.average_rating, 0.0);
    assert_eq!(stats.score(), 30.0);
}

#[test]
fn test_leaderboard_drops_developers_without_projects() {
    let developers = vec![
        ("idle", DeveloperStats::default()),
        (
            "builder",
            DeveloperStats::from_projects(&[RatingStats::new(1, Some(3.0))]),
        ),
    ];

    let ranked = rank_developers(developers, |(_, stats)| *stats);
    let ranked: Vec<_> = with_ranks(ranked).map(|(rank, (name, _))| (rank, name)).collect();

    assert_eq!(ranked, vec![(1, "builder")]);
}

#[test]
fn test_leaderboard_orders_by_score_and_keeps_ties_stable() {
    let one_project = DeveloperStats::from_projects(&[RatingStats::new(0, None)]);
    let strong = DeveloperStats::from_projects(&[
        RatingStats::new(4, Some(4.0)),
        RatingStats::new(2, Some(5.0)),
    ]);

    let developers = vec![
        ("first", one_project),
        ("strong", strong),
        ("second", one_project),
    ];

    let ranked: Vec<_> = with_ranks(rank_developers(developers, |(_, stats)| *stats))
        .map(|(rank, (name, _))| (rank, name))
        .collect();

    assert_eq!(ranked, vec![(1, "strong"), (2, "first"), (3, "second")]);
}

#[test]
fn test_top_rated_requires_three_ratings() {
    let projects = vec![
        project("perfect-but-new", 1, 5.0),
        project("two-votes", 2, 5.0),
        project("unrated", 0, 0.0),
        project("solid", 3, 4.0),
    ];

    let ranked = rank_projects_by_rating_then_volume(projects, |p| p.stats);

    assert_eq!(names(&ranked), vec!["solid"]);
    assert!(ranked.iter().all(|p| p.stats.total >= 3));
}

#[test]
fn test_top_rated_breaks_ties_by_volume() {
    let projects = vec![
        project("few", 3, 4.5),
        project("best", 5, 4.8),
        project("many", 12, 4.5),
        project("low", 40, 3.1),
    ];

    let ranked = rank_projects_by_rating_then_volume(projects, |p| p.stats);

    assert_eq!(names(&ranked), vec!["best", "many", "few", "low"]);
}

#[test]
fn test_top_rated_uses_unrounded_averages() {
    // both display as 4.5
    let projects = vec![project("lower", 10, 4.46), project("higher", 3, 4.54)];

    let ranked = rank_projects_by_rating_then_volume(projects, |p| p.stats);

    assert_eq!(names(&ranked), vec!["higher", "lower"]);
}

#[test]
fn test_categories_by_usage() {
    let categories = vec![("tools", 2u64), ("games", 7), ("ai", 2), ("web", 9)];

    let ranked = rank_categories_by_usage(categories, |(_, count)| *count);
    let names: Vec<_> = ranked.iter().map(|(name, _)| *name).collect();

    assert_eq!(names, vec!["web", "games", "tools", "ai"]);
}

#[test]
fn test_trending_filters_and_orders() {
    let projects = vec![
        ("lone-five", TrendingStats::from_ratings([5])),
        ("steady", TrendingStats::from_ratings([4, 4, 4])),
        ("hot", TrendingStats::from_ratings([5, 5])),
        ("quiet", TrendingStats::from_ratings(Vec::new())),
    ];

    let ranked = rank_trending(projects, |(_, stats)| *stats);
    let ranked: Vec<_> = ranked
        .iter()
        .map(|(name, stats)| (*name, stats.score()))
        .collect();

    // 3 * 4.0 * 1.5 = 18.0 beats 2 * 5.0 * 1.5 = 15.0
    assert_eq!(ranked, vec![("steady", 18.0), ("hot", 15.0)]);
}

#[test]
fn test_ranks_start_at_one() {
    let ranks: Vec<u64> = with_ranks(vec!['a', 'b', 'c']).map(|(rank, _)| rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);

    assert_eq!(with_ranks(Vec::<char>::new()).count(), 0);
}
