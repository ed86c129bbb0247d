use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::scope::{SeasonScope, WeekScope};
use crate::models::weekly_result::WeeklyResult;

const RESULT_COLUMNS: &str = r#"
    user_id, league_id, season, week, is_winner, is_poopstar, is_perfect, has_paid
"#;

pub async fn fetch_season_results<'e, E>(executor: E, scope: &SeasonScope) -> Result<Vec<WeeklyResult>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, WeeklyResult>(&format!(
        "SELECT {RESULT_COLUMNS} FROM weekly_results WHERE league_id = $1 AND season = $2 ORDER BY week, user_id"
    ))
    .bind(scope.league_id)
    .bind(scope.season)
    .fetch_all(executor)
    .await
}

/// Weeks of a season that already have results in this league.
pub async fn fetch_settled_weeks<'e, E>(executor: E, scope: &SeasonScope) -> Result<Vec<i32>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i32>(
        "SELECT DISTINCT week FROM weekly_results WHERE league_id = $1 AND season = $2 ORDER BY week",
    )
    .bind(scope.league_id)
    .bind(scope.season)
    .fetch_all(executor)
    .await
}

/// Insert or overwrite a week's results on `(user_id, league_id, season, week)`.
///
/// Payment state: winners are paid, a row that stops being a winner becomes
/// unpaid, and any other row keeps whatever payment was recorded manually.
pub async fn upsert_week_results<'e, E>(
    executor: E,
    scope: &WeekScope,
    results: &[WeeklyResult],
) -> Result<u64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    if results.is_empty() {
        return Ok(0);
    }
    let user_ids: Vec<Uuid> = results.iter().map(|r| r.user_id).collect();
    let winners: Vec<bool> = results.iter().map(|r| r.is_winner).collect();
    let poopstars: Vec<bool> = results.iter().map(|r| r.is_poopstar).collect();
    let perfect: Vec<bool> = results.iter().map(|r| r.is_perfect).collect();
    let paid: Vec<bool> = results.iter().map(|r| r.has_paid).collect();

    let result = sqlx::query(
        r#"
        INSERT INTO weekly_results (
            user_id, league_id, season, week, is_winner, is_poopstar, is_perfect, has_paid
        )
        SELECT r.user_id, $6, $7, $8, r.is_winner, r.is_poopstar, r.is_perfect, r.has_paid
        FROM UNNEST($1::uuid[], $2::bool[], $3::bool[], $4::bool[], $5::bool[])
            AS r(user_id, is_winner, is_poopstar, is_perfect, has_paid)
        ON CONFLICT (user_id, league_id, season, week) DO UPDATE SET
            is_winner = EXCLUDED.is_winner,
            is_poopstar = EXCLUDED.is_poopstar,
            is_perfect = EXCLUDED.is_perfect,
            updated_at = NOW(),
            has_paid = CASE
                WHEN EXCLUDED.is_winner THEN TRUE
                WHEN weekly_results.is_winner THEN FALSE
                ELSE weekly_results.has_paid
            END
        "#,
    )
    .bind(&user_ids)
    .bind(&winners)
    .bind(&poopstars)
    .bind(&perfect)
    .bind(&paid)
    .bind(scope.league_id)
    .bind(scope.season)
    .bind(scope.week)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

/// Remove rows of players who no longer have picks in the week.
pub async fn delete_stale_results<'e, E>(
    executor: E,
    scope: &WeekScope,
    current_players: &[Uuid],
) -> Result<u64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM weekly_results
        WHERE league_id = $1 AND season = $2 AND week = $3
          AND NOT (user_id = ANY($4::uuid[]))
        "#,
    )
    .bind(scope.league_id)
    .bind(scope.season)
    .bind(scope.week)
    .bind(current_players)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

pub async fn set_paid<'e, E>(
    executor: E,
    user_id: Uuid,
    scope: &WeekScope,
    has_paid: bool,
) -> Result<Option<WeeklyResult>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, WeeklyResult>(&format!(
        r#"
        UPDATE weekly_results
        SET has_paid = $5
        WHERE user_id = $1 AND league_id = $2 AND season = $3 AND week = $4
        RETURNING {RESULT_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(scope.league_id)
    .bind(scope.season)
    .bind(scope.week)
    .bind(has_paid)
    .fetch_optional(executor)
    .await
}
