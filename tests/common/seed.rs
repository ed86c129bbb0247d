use sqlx::PgPool;
use uuid::Uuid;

use pickem_backend::models::game::Game;
use pickem_backend::models::pick::Pick;
use pickem_backend::models::user::UserRole;

pub async fn insert_league(pool: &PgPool, name: &str) -> Uuid {
    let league_id = Uuid::new_v4();
    sqlx::query("INSERT INTO leagues (id, name) VALUES ($1, $2)")
        .bind(league_id)
        .bind(name)
        .execute(pool)
        .await
        .expect("Failed to insert league");
    league_id
}

/// Insert a profile and add it to the league.
pub async fn insert_member(pool: &PgPool, league_id: Uuid, username: &str, role: UserRole) -> Uuid {
    let user_id = Uuid::new_v4();
    let role = if role.is_commissioner() { "commissioner" } else { "player" };
    sqlx::query("INSERT INTO profiles (id, username, role) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(username)
        .bind(role)
        .execute(pool)
        .await
        .expect("Failed to insert profile");
    sqlx::query("INSERT INTO league_members (league_id, user_id) VALUES ($1, $2)")
        .bind(league_id)
        .bind(user_id)
        .execute(pool)
        .await
        .expect("Failed to insert league member");
    user_id
}

pub async fn insert_game(pool: &PgPool, game: &Game) {
    sqlx::query(
        r#"
        INSERT INTO games (
            id, season, week, home_team, away_team, scheduled_time,
            home_score, away_score, winning_team, is_rivalry_game
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(game.id)
    .bind(game.season)
    .bind(game.week)
    .bind(&game.home_team)
    .bind(&game.away_team)
    .bind(game.scheduled_time)
    .bind(game.home_score)
    .bind(game.away_score)
    .bind(&game.winning_team)
    .bind(game.is_rivalry_game)
    .execute(pool)
    .await
    .expect("Failed to insert game");
}

pub async fn insert_pick(pool: &PgPool, pick: &Pick) {
    sqlx::query(
        r#"
        INSERT INTO picks (
            id, user_id, league_id, season, week, game_id, selected_team,
            predicted_home_score, predicted_away_score, is_correct
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(pick.id)
    .bind(pick.user_id)
    .bind(pick.league_id)
    .bind(pick.season)
    .bind(pick.week)
    .bind(pick.game_id)
    .bind(&pick.selected_team)
    .bind(pick.predicted_home_score)
    .bind(pick.predicted_away_score)
    .bind(pick.is_correct)
    .execute(pool)
    .await
    .expect("Failed to insert pick");
}
