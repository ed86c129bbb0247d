use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::profile::Profile;

/// Profiles of every member of a league.
pub async fn fetch_league_profiles<'e, E>(executor: E, league_id: Uuid) -> Result<Vec<Profile>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Profile>(
        r#"
        SELECT p.id, p.username, p.favorite_team
        FROM league_members lm
        JOIN profiles p ON p.id = lm.user_id
        WHERE lm.league_id = $1
        ORDER BY p.username
        "#,
    )
    .bind(league_id)
    .fetch_all(executor)
    .await
}
