use actix_web::web::{self, Data, ServiceConfig};
use income_repo::category_repo::CategoryRepo;
use income_repo::income_repo::IncomeRepo;
use income_repo::HealthCheck;
use std::sync::Arc;

pub mod category;
pub mod config;
pub mod error;
pub mod health;
pub mod income;
pub mod pagination;
pub mod response;
pub mod tracing;
pub mod validation;

/// Registers the repos, the extractor configs and every route of the API.
pub fn app_config_func(
    category_repo: Arc<dyn CategoryRepo>,
    income_repo: Arc<dyn IncomeRepo>,
    health_check: Arc<dyn HealthCheck>,
) -> impl FnOnce(&mut ServiceConfig) {
    move |config| {
        config
            .app_data(Data::new(category_repo))
            .app_data(Data::new(income_repo))
            .app_data(Data::new(health_check))
            .app_data(error::json_config())
            .app_data(error::query_config())
            .app_data(error::path_config())
            .service(health::health)
            .service(
                web::scope("/api/v1")
                    .service(category::category_service())
                    .service(income::income_service()),
            );
    }
}
