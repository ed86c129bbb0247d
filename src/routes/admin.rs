use actix_web::web;

use crate::handlers::admin::{
    game_management_handler,
    ledger_handler,
    settlement_handler,
};
use crate::middleware::commissioner::CommissionerMiddleware;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(CommissionerMiddleware)
            // Settlement
            .service(
                web::resource("/leagues/{league_id}/seasons/{season}/weeks/{week}/settle")
                    .route(web::post().to(settlement_handler::settle_week))
            )
            .service(
                web::resource("/leagues/{league_id}/seasons/{season}/settle-latest")
                    .route(web::post().to(settlement_handler::settle_latest_week))
            )

            // Ledger
            .service(
                web::resource("/leagues/{league_id}/seasons/{season}/weeks/{week}/payments/{user_id}")
                    .route(web::post().to(ledger_handler::mark_paid))
            )
            .service(
                web::resource("/leagues/{league_id}/seasons/{season}/financials")
                    .route(web::get().to(ledger_handler::league_financials))
            )
            .service(
                web::resource("/settings")
                    .route(web::get().to(ledger_handler::get_pot_settings))
                    .route(web::put().to(ledger_handler::update_pot_settings))
            )

            // Corrections
            .service(
                web::resource("/games/{game_id}/score")
                    .route(web::post().to(game_management_handler::correct_game_score))
            )
            .service(
                web::resource("/picks/{pick_id}")
                    .route(web::post().to(game_management_handler::edit_pick))
            )
    );
}
