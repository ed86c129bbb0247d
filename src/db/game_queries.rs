use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::game::Game;

const GAME_COLUMNS: &str = r#"
    id, season, week, home_team, away_team, scheduled_time,
    home_score, away_score, winning_team, is_rivalry_game
"#;

/// All games of one week, in schedule order.
pub async fn fetch_week_games<'e, E>(executor: E, season: i32, week: i32) -> Result<Vec<Game>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Game>(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE season = $1 AND week = $2 ORDER BY scheduled_time, id"
    ))
    .bind(season)
    .bind(week)
    .fetch_all(executor)
    .await
}

pub async fn fetch_season_games<'e, E>(executor: E, season: i32) -> Result<Vec<Game>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Game>(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE season = $1 ORDER BY week, scheduled_time, id"
    ))
    .bind(season)
    .fetch_all(executor)
    .await
}

/// Lock a game row for the rest of the transaction.
pub async fn fetch_game_for_update<'e, E>(executor: E, game_id: Uuid) -> Result<Option<Game>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Game>(&format!("SELECT {GAME_COLUMNS} FROM games WHERE id = $1 FOR UPDATE"))
        .bind(game_id)
        .fetch_optional(executor)
        .await
}

pub async fn fetch_game<'e, E>(executor: E, game_id: Uuid) -> Result<Option<Game>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Game>(&format!("SELECT {GAME_COLUMNS} FROM games WHERE id = $1"))
        .bind(game_id)
        .fetch_optional(executor)
        .await
}

/// Weeks of a season with at least one decided game, newest first.
pub async fn fetch_completed_weeks<'e, E>(executor: E, season: i32) -> Result<Vec<i32>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i32>(
        r#"
        SELECT DISTINCT week
        FROM games
        WHERE season = $1 AND winning_team IS NOT NULL
        ORDER BY week DESC
        "#,
    )
    .bind(season)
    .fetch_all(executor)
    .await
}

/// Record a final score and the winner it implies.
pub async fn update_final_score<'e, E>(
    executor: E,
    game_id: Uuid,
    home_score: i32,
    away_score: i32,
    winning_team: &str,
) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        UPDATE games
        SET
            home_score = $2,
            away_score = $3,
            winning_team = $4,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(game_id)
    .bind(home_score)
    .bind(away_score)
    .bind(winning_team)
    .execute(executor)
    .await?;

    Ok(())
}
