// src/routes/league.rs
use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::league::{financials_handler, stats_handler};

/// Season leaderboard by weeks won
#[get("/{league_id}/seasons/{season}/leaderboard")]
async fn get_leaderboard(
    path: web::Path<(Uuid, i32)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let (league_id, season) = path.into_inner();
    stats_handler::get_leaderboard(league_id, season, pool).await
}

/// Season awards
#[get("/{league_id}/seasons/{season}/stats")]
async fn get_league_stats(
    path: web::Path<(Uuid, i32)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let (league_id, season) = path.into_inner();
    stats_handler::get_league_stats(league_id, season, pool).await
}

/// Winnings and losses for a player
#[get("/{league_id}/seasons/{season}/players/{user_id}/financials")]
async fn get_user_financials(
    path: web::Path<(Uuid, i32, Uuid)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let (league_id, season, user_id) = path.into_inner();
    financials_handler::get_user_financials(league_id, season, user_id, pool).await
}

/// Rank and weeks won/lost for a player
#[get("/{league_id}/seasons/{season}/players/{user_id}/summary")]
async fn get_user_summary(
    path: web::Path<(Uuid, i32, Uuid)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let (league_id, season, user_id) = path.into_inner();
    stats_handler::get_user_summary(league_id, season, user_id, pool).await
}

/// Weekly performance and home/away tendencies for a player
#[get("/{league_id}/seasons/{season}/players/{user_id}/stats")]
async fn get_my_stats(
    path: web::Path<(Uuid, i32, Uuid)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let (league_id, season, user_id) = path.into_inner();
    stats_handler::get_my_stats(league_id, season, user_id, pool).await
}
