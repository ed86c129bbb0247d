use actix_web::{get, HttpResponse};

use crate::handlers::backend_health_handler::backend_health_check;

/// Liveness check for the load balancer. Does not touch the database.
#[get("/backend_health")]
async fn backend_health() -> HttpResponse {
    backend_health_check().await
}
