use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::scope::{SeasonScope, WeekScope};
use crate::models::settings::UpdatePotSettingsRequest;
use crate::models::weekly_result::MarkPaidRequest;
use crate::services::ledger_service::LedgerError;
use crate::services::LedgerService;

/// POST /admin/leagues/{league_id}/seasons/{season}/weeks/{week}/payments/{user_id}
pub async fn mark_paid(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, i32, i32, Uuid)>,
    body: web::Json<MarkPaidRequest>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let (league_id, season, week, user_id) = path.into_inner();
    let scope = WeekScope::new(league_id, season, week);
    let Some(recorded_by) = claims.user_id() else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error("Invalid user ID in token")));
    };
    tracing::info!("💵 Payment update for {} in {} recorded by {}", user_id, scope, recorded_by);

    let service = LedgerService::new(pool.get_ref().clone());
    match service.mark_paid(user_id, scope, body.has_paid).await {
        Ok(Some(result)) => Ok(HttpResponse::Ok().json(ApiResponse::success("Payment recorded", result))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(format!(
            "No settled result for player {} in week {}", user_id, week
        )))),
        Err(e) => Ok(ledger_error_response(e)),
    }
}

/// GET /admin/leagues/{league_id}/seasons/{season}/financials
pub async fn league_financials(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, i32)>,
) -> Result<HttpResponse> {
    let (league_id, season) = path.into_inner();

    let service = LedgerService::new(pool.get_ref().clone());
    match service.league_financials(SeasonScope::new(league_id, season)).await {
        Ok(financials) => Ok(HttpResponse::Ok().json(ApiResponse::success("League financials", financials))),
        Err(e) => Ok(ledger_error_response(e)),
    }
}

/// GET /admin/settings
pub async fn get_pot_settings(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = LedgerService::new(pool.get_ref().clone());
    match service.pot_settings().await {
        Ok(settings) => Ok(HttpResponse::Ok().json(ApiResponse::success("Pot settings", settings))),
        Err(e) => Ok(ledger_error_response(e)),
    }
}

/// PUT /admin/settings
pub async fn update_pot_settings(
    pool: web::Data<PgPool>,
    body: web::Json<UpdatePotSettingsRequest>,
) -> Result<HttpResponse> {
    let service = LedgerService::new(pool.get_ref().clone());
    match service.update_pot_settings(&body).await {
        Ok(settings) => Ok(HttpResponse::Ok().json(ApiResponse::success("Setting updated.", settings))),
        Err(e) => Ok(ledger_error_response(e)),
    }
}

pub(crate) fn ledger_error_response(error: LedgerError) -> HttpResponse {
    match &error {
        LedgerError::Validation(_) => HttpResponse::BadRequest().json(ApiResponse::<()>::error(error.to_string())),
        LedgerError::Settings(_) | LedgerError::Database(_) => {
            tracing::error!("Ledger request failed: {}", error);
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error(error.to_string()))
        }
    }
}
