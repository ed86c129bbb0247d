use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::admin::ledger_handler::ledger_error_response;
use crate::models::common::ApiResponse;
use crate::models::scope::SeasonScope;
use crate::services::LedgerService;

/// Season winnings and losses for one player
pub async fn get_user_financials(
    league_id: Uuid,
    season: i32,
    user_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let service = LedgerService::new(pool.get_ref().clone());
    match service.player_financials(user_id, SeasonScope::new(league_id, season)).await {
        Ok(financials) => Ok(HttpResponse::Ok().json(ApiResponse::success("Player financials", financials))),
        Err(e) => Ok(ledger_error_response(e)),
    }
}
