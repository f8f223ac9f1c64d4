use crate::response::{ApiResponse, ErrorBody};
use actix_web::{get, web, HttpResponse, Responder};
use income_repo::HealthCheck;
use std::sync::Arc;
use tracing::warn;

#[get("/health")]
pub async fn health(health_check: web::Data<Arc<dyn HealthCheck>>) -> impl Responder {
    if health_check.check().await {
        HttpResponse::Ok().json(ApiResponse::message("ok"))
    } else {
        warn!("Health check failed");
        HttpResponse::ServiceUnavailable().json(ErrorBody::new("database unavailable"))
    }
}
