use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::pick::{Pick, PickGrade};
use crate::models::scope::{SeasonScope, WeekScope};

const PICK_COLUMNS: &str = r#"
    id, user_id, league_id, season, week, game_id, selected_team,
    predicted_home_score, predicted_away_score, is_correct
"#;

pub async fn fetch_week_picks<'e, E>(executor: E, scope: &WeekScope) -> Result<Vec<Pick>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Pick>(&format!(
        "SELECT {PICK_COLUMNS} FROM picks WHERE league_id = $1 AND season = $2 AND week = $3 ORDER BY user_id, id"
    ))
    .bind(scope.league_id)
    .bind(scope.season)
    .bind(scope.week)
    .fetch_all(executor)
    .await
}

pub async fn fetch_season_picks<'e, E>(executor: E, scope: &SeasonScope) -> Result<Vec<Pick>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Pick>(&format!(
        "SELECT {PICK_COLUMNS} FROM picks WHERE league_id = $1 AND season = $2 ORDER BY week, user_id, id"
    ))
    .bind(scope.league_id)
    .bind(scope.season)
    .fetch_all(executor)
    .await
}

/// Picks on one game across every league.
pub async fn fetch_game_picks<'e, E>(executor: E, game_id: Uuid) -> Result<Vec<Pick>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Pick>(&format!("SELECT {PICK_COLUMNS} FROM picks WHERE game_id = $1"))
        .bind(game_id)
        .fetch_all(executor)
        .await
}

pub async fn fetch_pick_for_update<'e, E>(executor: E, pick_id: Uuid) -> Result<Option<Pick>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Pick>(&format!("SELECT {PICK_COLUMNS} FROM picks WHERE id = $1 FOR UPDATE"))
        .bind(pick_id)
        .fetch_optional(executor)
        .await
}

/// Persist a batch of grades with a single statement.
pub async fn apply_grades<'e, E>(executor: E, grades: &[PickGrade]) -> Result<u64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    if grades.is_empty() {
        return Ok(0);
    }
    let ids: Vec<Uuid> = grades.iter().map(|g| g.pick_id).collect();
    let flags: Vec<bool> = grades.iter().map(|g| g.is_correct).collect();

    let result = sqlx::query(
        r#"
        UPDATE picks AS p
        SET is_correct = g.is_correct
        FROM UNNEST($1::uuid[], $2::bool[]) AS g(id, is_correct)
        WHERE p.id = g.id
        "#,
    )
    .bind(&ids)
    .bind(&flags)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

pub async fn update_selection<'e, E>(
    executor: E,
    pick_id: Uuid,
    selected_team: &str,
    is_correct: Option<bool>,
) -> Result<Pick, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Pick>(&format!(
        "UPDATE picks SET selected_team = $2, is_correct = $3 WHERE id = $1 RETURNING {PICK_COLUMNS}"
    ))
    .bind(pick_id)
    .bind(selected_team)
    .bind(is_correct)
    .fetch_one(executor)
    .await
}
