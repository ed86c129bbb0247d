use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use pickem_backend::models::user::UserRole;
use pickem_backend::models::weekly_result::WeeklyResult;

mod common;
use common::fixtures::{decided_week, pending_game, picks_with_correct, SEASON};
use common::seed::{insert_game, insert_league, insert_member, insert_pick};
use common::utils::{spawn_app, TestApp};

struct League {
    id: Uuid,
    commissioner_token: String,
    player_token: String,
    players: Vec<Uuid>,
}

/// Week 1: three players going 4/4, 2/4 and 1/4 with no tiebreaker data.
async fn seed_perfect_week(app: &TestApp) -> League {
    let league_id = insert_league(&app.db_pool, "Office Pool").await;
    let commissioner = insert_member(&app.db_pool, league_id, "commish", UserRole::Commissioner).await;
    let mut players = Vec::new();
    for name in ["perfect", "middle", "worst"] {
        players.push(insert_member(&app.db_pool, league_id, name, UserRole::Player).await);
    }

    let games = decided_week(1, 4);
    for game in games.iter() {
        insert_game(&app.db_pool, game).await;
    }
    for (player, correct) in players.iter().zip([4, 2, 1]) {
        for pick in picks_with_correct(*player, league_id, &games, correct) {
            insert_pick(&app.db_pool, &pick).await;
        }
    }

    League {
        id: league_id,
        commissioner_token: app.token_for(commissioner, "commish", UserRole::Commissioner),
        player_token: app.token_for(players[0], "perfect", UserRole::Player),
        players,
    }
}

async fn stored_results(app: &TestApp, league_id: Uuid, week: i32) -> Vec<WeeklyResult> {
    sqlx::query_as::<_, WeeklyResult>(
        r#"
        SELECT user_id, league_id, season, week, is_winner, is_poopstar, is_perfect, has_paid
        FROM weekly_results
        WHERE league_id = $1 AND season = $2 AND week = $3
        ORDER BY user_id
        "#,
    )
    .bind(league_id)
    .bind(SEASON)
    .bind(week)
    .fetch_all(&app.db_pool)
    .await
    .expect("Failed to fetch weekly results")
}

async fn settle(client: &Client, app: &TestApp, league: &League, week: i32, token: &str) -> reqwest::Response {
    client
        .post(&format!(
            "{}/admin/leagues/{}/seasons/{}/weeks/{}/settle",
            app.address, league.id, SEASON, week
        ))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute settle request.")
}

#[tokio::test]
async fn test_settle_week_persists_results_once() {
    let app = spawn_app().await;
    let client = Client::new();
    let league = seed_perfect_week(&app).await;

    let response = settle(&client, &app, &league, 1, &league.commissioner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["results"].as_array().unwrap().len(), 3);

    let first = stored_results(&app, league.id, 1).await;
    assert_eq!(first.len(), 3);
    let perfect = first.iter().find(|r| r.user_id == league.players[0]).unwrap();
    assert!(perfect.is_winner && perfect.is_perfect && perfect.has_paid);
    let worst = first.iter().find(|r| r.user_id == league.players[2]).unwrap();
    assert!(worst.is_poopstar && !worst.has_paid);

    let graded: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM picks WHERE is_correct IS NOT NULL")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(graded, 12);

    // Re-running reproduces the same rows
    let again = settle(&client, &app, &league, 1, &league.commissioner_token).await;
    assert_eq!(again.status(), StatusCode::OK);
    assert_eq!(stored_results(&app, league.id, 1).await, first);
}

#[tokio::test]
async fn test_settlement_requires_commissioner() {
    let app = spawn_app().await;
    let client = Client::new();
    let league = seed_perfect_week(&app).await;

    let forbidden = settle(&client, &app, &league, 1, &league.player_token).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let anonymous = client
        .post(&format!(
            "{}/admin/leagues/{}/seasons/{}/weeks/1/settle",
            app.address, league.id, SEASON
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    assert!(stored_results(&app, league.id, 1).await.is_empty());
}

#[tokio::test]
async fn test_unsettleable_and_invalid_weeks() {
    let app = spawn_app().await;
    let client = Client::new();
    let league = seed_perfect_week(&app).await;
    insert_game(&app.db_pool, &pending_game(2, 0, "Later", "Still")).await;

    let pending = settle(&client, &app, &league, 2, &league.commissioner_token).await;
    assert_eq!(pending.status(), StatusCode::CONFLICT);

    let invalid = settle(&client, &app, &league, 99, &league.commissioner_token).await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settle_latest_week_then_all_settled() {
    let app = spawn_app().await;
    let client = Client::new();
    let league = seed_perfect_week(&app).await;
    let url = format!("{}/admin/leagues/{}/seasons/{}/settle-latest", app.address, league.id, SEASON);

    let first: Value = client
        .post(&url)
        .bearer_auth(&league.commissioner_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["data"]["scope"]["week"], 1);
    assert_eq!(stored_results(&app, league.id, 1).await.len(), 3);

    let second: Value = client
        .post(&url)
        .bearer_auth(&league.commissioner_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["success"], true);
    assert!(second.get("data").is_none());
}

#[tokio::test]
async fn test_financials_after_perfect_week() {
    let app = spawn_app().await;
    let client = Client::new();
    let league = seed_perfect_week(&app).await;
    settle(&client, &app, &league, 1, &league.commissioner_token).await;

    let winner: Value = client
        .get(&format!(
            "{}/league/{}/seasons/{}/players/{}/financials",
            app.address, league.id, SEASON, league.players[0]
        ))
        .bearer_auth(&league.player_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    // Two losers owe 10 * 2 each
    assert_eq!(winner["data"]["total_winnings"], json!(40.0));
    assert_eq!(winner["data"]["total_losses"], json!(0.0));

    // Marking the poopstar as paid clears the outstanding amount
    let worst = league.players[2];
    let paid = client
        .post(&format!(
            "{}/admin/leagues/{}/seasons/{}/weeks/1/payments/{}",
            app.address, league.id, SEASON, worst
        ))
        .bearer_auth(&league.commissioner_token)
        .json(&json!({ "has_paid": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(paid.status(), StatusCode::OK);

    let loser: Value = client
        .get(&format!(
            "{}/league/{}/seasons/{}/players/{}/financials",
            app.address, league.id, SEASON, worst
        ))
        .bearer_auth(&league.player_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(loser["data"]["total_losses"], json!(20.0));
    assert_eq!(loser["data"]["outstanding"], json!(0.0));

    // Settling again keeps the manual payment
    settle(&client, &app, &league, 1, &league.commissioner_token).await;
    let rows = stored_results(&app, league.id, 1).await;
    assert!(rows.iter().find(|r| r.user_id == worst).unwrap().has_paid);
}

#[tokio::test]
async fn test_score_correction_regrades_picks() {
    let app = spawn_app().await;
    let client = Client::new();
    let league = seed_perfect_week(&app).await;
    settle(&client, &app, &league, 1, &league.commissioner_token).await;

    let game_id: Uuid = sqlx::query_scalar(
        "SELECT id FROM games WHERE week = 1 ORDER BY scheduled_time LIMIT 1",
    )
    .fetch_one(&app.db_pool)
    .await
    .unwrap();

    let tied = client
        .post(&format!("{}/admin/games/{}/score", app.address, game_id))
        .bearer_auth(&league.commissioner_token)
        .json(&json!({ "home_score": 10, "away_score": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(tied.status(), StatusCode::BAD_REQUEST);

    let corrected: Value = client
        .post(&format!("{}/admin/games/{}/score", app.address, game_id))
        .bearer_auth(&league.commissioner_token)
        .json(&json!({ "home_score": 3, "away_score": 17 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(corrected["data"]["picks_regraded"], 3);
    assert_eq!(corrected["data"]["game"]["winning_team"], "Away0");

    let perfect_pick_correct: Option<bool> = sqlx::query_scalar(
        "SELECT is_correct FROM picks WHERE game_id = $1 AND user_id = $2",
    )
    .bind(game_id)
    .bind(league.players[0])
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(perfect_pick_correct, Some(false));

    // After re-settling the former perfect player is no longer perfect
    settle(&client, &app, &league, 1, &league.commissioner_token).await;
    let rows = stored_results(&app, league.id, 1).await;
    assert!(rows.iter().all(|r| !r.is_perfect));
}

async fn correct_score(client: &Client, app: &TestApp, league: &League, game_id: Uuid, home: i32, away: i32) {
    let response = client
        .post(&format!("{}/admin/games/{}/score", app.address, game_id))
        .bearer_auth(&league.commissioner_token)
        .json(&json!({ "home_score": home, "away_score": away }))
        .send()
        .await
        .expect("Failed to execute score request.");
    assert_eq!(response.status(), StatusCode::OK);
}

async fn mark_paid(client: &Client, app: &TestApp, league: &League, user_id: Uuid) {
    let response = client
        .post(&format!(
            "{}/admin/leagues/{}/seasons/{}/weeks/1/payments/{}",
            app.address, league.id, SEASON, user_id
        ))
        .bearer_auth(&league.commissioner_token)
        .json(&json!({ "has_paid": true }))
        .send()
        .await
        .expect("Failed to execute payment request.");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_resettlement_after_regrade_resets_former_winner_only() {
    let app = spawn_app().await;
    let client = Client::new();
    let league = seed_perfect_week(&app).await;
    let (perfect, middle, worst) = (league.players[0], league.players[1], league.players[2]);
    settle(&client, &app, &league, 1, &league.commissioner_token).await;
    mark_paid(&client, &app, &league, worst).await;

    // Away teams win the last two games: middle goes 4/4, perfect drops to 2/4
    let late_games: Vec<Uuid> = sqlx::query_scalar(
        "SELECT id FROM games WHERE week = 1 ORDER BY scheduled_time OFFSET 2",
    )
    .fetch_all(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(late_games.len(), 2);
    for game_id in late_games {
        correct_score(&client, &app, &league, game_id, 3, 17).await;
    }

    let response = settle(&client, &app, &league, 1, &league.commissioner_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rows = stored_results(&app, league.id, 1).await;
    let row = |user_id: Uuid| rows.iter().find(|r| r.user_id == user_id).unwrap();

    assert!(row(middle).is_winner && row(middle).is_perfect && row(middle).has_paid);
    assert!(!row(perfect).is_winner && row(perfect).is_poopstar);
    assert!(!row(perfect).has_paid);
    // A loser who already paid stays paid
    assert!(!row(worst).is_winner && row(worst).has_paid);
}

#[tokio::test]
async fn test_failed_write_leaves_week_untouched() {
    let app = spawn_app().await;
    let client = Client::new();
    let league = seed_perfect_week(&app).await;

    sqlx::query(
        r#"
        CREATE FUNCTION reject_weekly_results() RETURNS trigger AS $$
        BEGIN
            RAISE EXCEPTION 'weekly_results rejected';
        END;
        $$ LANGUAGE plpgsql
        "#,
    )
    .execute(&app.db_pool)
    .await
    .expect("Failed to create trigger function");
    sqlx::query(
        "CREATE TRIGGER reject_weekly_results BEFORE INSERT ON weekly_results \
         FOR EACH ROW EXECUTE FUNCTION reject_weekly_results()",
    )
    .execute(&app.db_pool)
    .await
    .expect("Failed to create trigger");

    let failed = settle(&client, &app, &league, 1, &league.commissioner_token).await;
    assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = failed.json().await.unwrap();
    assert_eq!(body["success"], false);

    // Grades were rolled back together with the results
    let graded: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM picks WHERE is_correct IS NOT NULL")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(graded, 0);
    assert!(stored_results(&app, league.id, 1).await.is_empty());

    sqlx::query("DROP TRIGGER reject_weekly_results ON weekly_results")
        .execute(&app.db_pool)
        .await
        .expect("Failed to drop trigger");

    let retried = settle(&client, &app, &league, 1, &league.commissioner_token).await;
    assert_eq!(retried.status(), StatusCode::OK);
    assert_eq!(stored_results(&app, league.id, 1).await.len(), 3);
}

#[tokio::test]
async fn test_leaderboard_and_stats_endpoints() {
    let app = spawn_app().await;
    let client = Client::new();
    let league = seed_perfect_week(&app).await;
    settle(&client, &app, &league, 1, &league.commissioner_token).await;

    let board: Value = client
        .get(&format!("{}/league/{}/seasons/{}/leaderboard", app.address, league.id, SEASON))
        .bearer_auth(&league.player_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let rows = board["data"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["username"], "perfect");
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[1]["rank"], 2);
    assert_eq!(rows[2]["rank"], 2);

    let stats: Value = client
        .get(&format!("{}/league/{}/seasons/{}/stats", app.address, league.id, SEASON))
        .bearer_auth(&league.player_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["data"]["oracle"]["username"], "perfect");
    assert_eq!(stats["data"]["perfectionist"]["value"], 1);
    assert!(stats["data"]["price_is_right"].is_null());

    let unauthenticated = client
        .get(&format!("{}/league/{}/seasons/{}/leaderboard", app.address, league.id, SEASON))
        .send()
        .await
        .unwrap();
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);
}
