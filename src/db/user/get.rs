use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    db::project::{PROJECT_STATS_GROUP, PROJECT_STATS_SELECT, with_categories},
    errors::AppError,
    models::{
        Page, Pagination, User,
        project::ProjectStatsRow,
        rating::{RatingActivity, RatingActivityRow},
        user::{
            Dashboard, DashboardStats, ProfileStats, ProfileWithStats, PublicProfile,
            UserCredentials, UserList, UserListQuery, UserProfile,
        },
    },
    stats::RatingStats,
};

const USER_COLUMNS: &str =
    "id, name, email, bio, avatar, github, website, twitter, created_at";

const PUBLIC_PROFILE_SELECT: &str = "SELECT u.id, u.name, u.avatar, u.bio, u.github, \
    u.website, u.twitter, u.created_at, \
    (SELECT COUNT(*) FROM projects p WHERE p.author_id = u.id) AS project_count, \
    (SELECT COUNT(*) FROM ratings r WHERE r.user_id = u.id) AS rating_count \
    FROM users u";

const RECENT_ACTIVITY_LIMIT: i64 = 10;

pub async fn get_user_by_id(user_id: Uuid, postgres: PgPool) -> Result<User, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

    sqlx::query_as::<_, User>(&sql)
        .bind(user_id)
        .fetch_optional(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to fetch user", e))?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

pub async fn get_credentials_by_email(
    email: &str,
    postgres: &PgPool,
) -> Result<Option<UserCredentials>, AppError> {
    sqlx::query_as::<_, UserCredentials>(
        "SELECT id, password_hash FROM users WHERE LOWER(email) = LOWER($1)",
    )
    .bind(email)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to look up user", e))
}

pub async fn get_password_hash(user_id: Uuid, postgres: &PgPool) -> Result<String, AppError> {
    sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to look up user", e))?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

fn push_user_search(builder: &mut QueryBuilder<'_, Postgres>, search: Option<&str>) {
    if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        builder
            .push(" WHERE (u.name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR u.bio ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

pub async fn list_users(
    query: &UserListQuery,
    page: Page,
    postgres: PgPool,
) -> Result<UserList, AppError> {
    let search = query.search.as_deref();

    let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users u");
    push_user_search(&mut count_query, search);

    let mut list_query = QueryBuilder::<Postgres>::new(PUBLIC_PROFILE_SELECT);
    push_user_search(&mut list_query, search);
    list_query
        .push(" ORDER BY ")
        .push(query.sort_by.order_clause())
        .push(" LIMIT ")
        .push_bind(page.limit())
        .push(" OFFSET ")
        .push_bind(page.offset());

    let (total, users) = futures::try_join!(
        count_query.build_query_scalar::<i64>().fetch_one(&postgres),
        list_query.build_query_as::<PublicProfile>().fetch_all(&postgres),
    )
    .map_err(|e| AppError::from_db("Failed to list users", e))?;

    Ok(UserList {
        users,
        pagination: Pagination::new(page, total.max(0) as u64),
    })
}

/// Count and mean of every rating left on the user's projects.
async fn received_rating_stats(user_id: Uuid, postgres: &PgPool) -> Result<RatingStats, AppError> {
    let (count, average) = sqlx::query_as::<_, (i64, Option<f64>)>(
        "SELECT COUNT(r.id), AVG(r.rating)::float8
        FROM ratings r
        JOIN projects p ON p.id = r.project_id
        WHERE p.author_id = $1",
    )
    .bind(user_id)
    .fetch_one(postgres)
    .await
    .map_err(|e| AppError::from_db("Failed to aggregate received ratings", e))?;

    Ok(RatingStats::new(count.max(0) as u64, average))
}

pub async fn get_user_profile(
    user_id: Uuid,
    page: Page,
    postgres: PgPool,
) -> Result<UserProfile, AppError> {
    let profile_sql = format!("{PUBLIC_PROFILE_SELECT} WHERE u.id = $1");

    let profile = sqlx::query_as::<_, PublicProfile>(&profile_sql)
        .bind(user_id)
        .fetch_optional(&postgres)
        .await
        .map_err(|e| AppError::from_db("Failed to fetch user", e))?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let projects_sql = format!(
        "{PROJECT_STATS_SELECT}
        WHERE p.author_id = $1 AND p.published
        {PROJECT_STATS_GROUP}
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3"
    );

    let (rows, published_total, received) = futures::try_join!(
        async {
            sqlx::query_as::<_, ProjectStatsRow>(&projects_sql)
                .bind(user_id)
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(&postgres)
                .await
                .map_err(|e| AppError::from_db("Failed to fetch user projects", e))
        },
        async {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM projects WHERE author_id = $1 AND published",
            )
            .bind(user_id)
            .fetch_one(&postgres)
            .await
            .map_err(|e| AppError::from_db("Failed to count user projects", e))
        },
        received_rating_stats(user_id, &postgres),
    )?;

    let projects = with_categories(rows, postgres).await?;

    let stats = ProfileStats {
        total_projects: profile.project_count,
        total_ratings_given: profile.rating_count,
        total_ratings_received: received.total,
        average_rating: received.display_average(),
    };

    Ok(UserProfile {
        user: ProfileWithStats { profile, stats },
        projects,
        projects_pagination: Pagination::new(page, published_total.max(0) as u64),
    })
}

pub async fn get_dashboard(user_id: Uuid, postgres: PgPool) -> Result<Dashboard, AppError> {
    let projects_sql = format!(
        "{PROJECT_STATS_SELECT}
        WHERE p.author_id = $1
        {PROJECT_STATS_GROUP}
        ORDER BY p.created_at DESC"
    );

    let (rows, given, received, activity) = futures::try_join!(
        async {
            sqlx::query_as::<_, ProjectStatsRow>(&projects_sql)
                .bind(user_id)
                .fetch_all(&postgres)
                .await
                .map_err(|e| AppError::from_db("Failed to fetch dashboard projects", e))
        },
        async {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ratings WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&postgres)
                .await
                .map_err(|e| AppError::from_db("Failed to count given ratings", e))
        },
        received_rating_stats(user_id, &postgres),
        async {
            sqlx::query_as::<_, RatingActivityRow>(
                "SELECT r.id, r.user_id, r.project_id, r.rating, r.comment, r.created_at,
                    r.updated_at, u.name AS user_name, u.avatar AS user_avatar,
                    p.title AS project_title, p.author_id AS project_author_id
                FROM ratings r
                JOIN users u ON u.id = r.user_id
                JOIN projects p ON p.id = r.project_id
                WHERE r.user_id = $1 OR p.author_id = $1
                ORDER BY r.created_at DESC
                LIMIT $2",
            )
            .bind(user_id)
            .bind(RECENT_ACTIVITY_LIMIT)
            .fetch_all(&postgres)
            .await
            .map_err(|e| AppError::from_db("Failed to fetch recent activity", e))
        },
    )?;

    let statistics = DashboardStats {
        total_projects: rows.len() as u64,
        published_projects: rows.iter().filter(|r| r.project.published).count() as u64,
        featured_projects: rows.iter().filter(|r| r.project.featured).count() as u64,
        total_ratings_received: received.total as i64,
        total_ratings_given: given,
        average_rating: received.display_average(),
    };

    let projects = with_categories(rows, postgres).await?;

    Ok(Dashboard {
        projects,
        statistics,
        recent_activity: activity.into_iter().map(RatingActivity::from).collect(),
    })
}
