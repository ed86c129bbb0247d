use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::league::settlement::{SettlementError, SettlementOutcome};
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::scope::{SeasonScope, WeekScope};
use crate::services::settlement_service::LatestWeekOutcome;
use crate::services::SettlementService;

/// POST /admin/leagues/{league_id}/seasons/{season}/weeks/{week}/settle
pub async fn settle_week(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, i32, i32)>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let (league_id, season, week) = path.into_inner();
    let scope = WeekScope::new(league_id, season, week);
    tracing::info!("📋 {} requested settlement of {}", claims.username, scope);

    let service = SettlementService::new(pool.get_ref().clone());
    match service.settle_week(scope).await {
        Ok(outcome) => Ok(outcome_response(outcome)),
        Err(e) => Ok(settlement_error_response(e)),
    }
}

/// POST /admin/leagues/{league_id}/seasons/{season}/settle-latest
pub async fn settle_latest_week(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, i32)>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let (league_id, season) = path.into_inner();
    let scope = SeasonScope::new(league_id, season);
    tracing::info!("📋 {} requested settlement of the latest week in {}", claims.username, scope);

    let service = SettlementService::new(pool.get_ref().clone());
    match service.settle_latest_week(scope).await {
        Ok(LatestWeekOutcome::AllSettled { .. }) => Ok(HttpResponse::Ok().json(
            ApiResponse::<()>::success_message("All completed weeks are already settled."),
        )),
        Ok(LatestWeekOutcome::Week { outcome, .. }) => Ok(outcome_response(outcome)),
        Err(e) => Ok(settlement_error_response(e)),
    }
}

fn outcome_response(outcome: SettlementOutcome) -> HttpResponse {
    match outcome {
        SettlementOutcome::Settled(settled) => {
            let message = format!("Successfully settled results for week {}.", settled.scope.week);
            HttpResponse::Ok().json(ApiResponse::success(message, settled))
        }
        SettlementOutcome::NothingToGrade { scope } => HttpResponse::Ok().json(
            ApiResponse::<()>::success_message(format!("No picks to settle for week {}.", scope.week)),
        ),
    }
}

fn settlement_error_response(error: SettlementError) -> HttpResponse {
    match &error {
        SettlementError::Validation(_) => {
            HttpResponse::BadRequest().json(ApiResponse::<()>::error(error.to_string()))
        }
        SettlementError::NotSettleable { .. } => {
            HttpResponse::Conflict().json(ApiResponse::<()>::error(error.to_string()))
        }
        SettlementError::Persistence { scope, .. } => {
            tracing::error!("Settlement failed for {}: {}", scope, error);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_with_message(
                format!("Failed to settle {}; safe to retry", scope),
                error.to_string(),
            ))
        }
        SettlementError::Lookup { scope, .. } => {
            tracing::error!("Unsettled week lookup failed for {}: {}", scope, error);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_with_message(
                format!("Failed to find unsettled weeks for {}; safe to retry", scope),
                error.to_string(),
            ))
        }
    }
}
