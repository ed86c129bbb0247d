use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::game::ScoreCorrectionRequest;
use crate::models::pick::EditPickRequest;
use crate::services::score_correction_service::ScoreCorrectionError;
use crate::services::ScoreCorrectionService;

/// POST /admin/games/{game_id}/score - Correct a final score and re-grade its picks
pub async fn correct_game_score(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<ScoreCorrectionRequest>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let game_id = path.into_inner();
    tracing::info!("🛠️  {} correcting game {} to {}-{}",
        claims.username, game_id, body.home_score, body.away_score);

    let service = ScoreCorrectionService::new(pool.get_ref().clone());
    match service.correct_game_score(game_id, body.home_score, body.away_score).await {
        Ok(correction) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Game score corrected and picks re-graded successfully!",
            correction,
        ))),
        Err(e) => Ok(correction_error_response(e)),
    }
}

/// POST /admin/picks/{pick_id} - Change the team on a pick
pub async fn edit_pick(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<EditPickRequest>,
) -> Result<HttpResponse> {
    let pick_id = path.into_inner();
    let selected_team = body.selected_team.trim();
    if selected_team.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error("Pick ID and new team are required.")));
    }

    let service = ScoreCorrectionService::new(pool.get_ref().clone());
    match service.edit_pick(pick_id, selected_team).await {
        Ok(pick) => Ok(HttpResponse::Ok().json(ApiResponse::success("Pick updated successfully", pick))),
        Err(e) => Ok(correction_error_response(e)),
    }
}

fn correction_error_response(error: ScoreCorrectionError) -> HttpResponse {
    match &error {
        ScoreCorrectionError::Validation(_) | ScoreCorrectionError::Grading(_) => {
            HttpResponse::BadRequest().json(ApiResponse::<()>::error(error.to_string()))
        }
        ScoreCorrectionError::GameNotFound(_) | ScoreCorrectionError::PickNotFound(_) => {
            HttpResponse::NotFound().json(ApiResponse::<()>::error(error.to_string()))
        }
        ScoreCorrectionError::Database(e) => {
            tracing::error!("Correction failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error(error.to_string()))
        }
    }
}
