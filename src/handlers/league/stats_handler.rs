use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::common::ApiResponse;
use crate::models::scope::SeasonScope;
use crate::services::season_stats_service::StatsError;
use crate::services::SeasonStatsService;

/// Season awards for a league. Awards nobody qualified for are `null`.
pub async fn get_league_stats(
    league_id: Uuid,
    season: i32,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let service = SeasonStatsService::new(pool.get_ref().clone());
    match service.season_awards(SeasonScope::new(league_id, season)).await {
        Ok(awards) => Ok(HttpResponse::Ok().json(ApiResponse::success("Season awards", awards))),
        Err(e) => Ok(stats_error_response(e)),
    }
}

pub async fn get_leaderboard(
    league_id: Uuid,
    season: i32,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let service = SeasonStatsService::new(pool.get_ref().clone());
    match service.leaderboard(SeasonScope::new(league_id, season)).await {
        Ok(board) => Ok(HttpResponse::Ok().json(ApiResponse::success("Leaderboard", board))),
        Err(e) => Ok(stats_error_response(e)),
    }
}

pub async fn get_user_summary(
    league_id: Uuid,
    season: i32,
    user_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let service = SeasonStatsService::new(pool.get_ref().clone());
    match service.user_summary(user_id, SeasonScope::new(league_id, season)).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success("User summary", summary))),
        Err(e) => Ok(stats_error_response(e)),
    }
}

pub async fn get_my_stats(
    league_id: Uuid,
    season: i32,
    user_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let service = SeasonStatsService::new(pool.get_ref().clone());
    match service.my_stats(user_id, SeasonScope::new(league_id, season)).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success("Player stats", stats))),
        Err(e) => Ok(stats_error_response(e)),
    }
}

fn stats_error_response(error: StatsError) -> HttpResponse {
    match &error {
        StatsError::Validation(_) => HttpResponse::BadRequest().json(ApiResponse::<()>::error(error.to_string())),
        StatsError::Database(e) => {
            tracing::error!("Failed to load season stats: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error(error.to_string()))
        }
    }
}
