use actix_web::web;

pub mod admin;
pub mod backend_health;
pub mod league;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // League routes (require authentication)
    cfg.service(
        web::scope("/league")
            .wrap(AuthMiddleware)
            .service(league::get_leaderboard)
            .service(league::get_league_stats)
            .service(league::get_user_financials)
            .service(league::get_user_summary)
            .service(league::get_my_stats)
    );
    // Commissioner routes
    admin::init_admin_routes(cfg);
}
