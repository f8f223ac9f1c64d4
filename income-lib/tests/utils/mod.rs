use std::sync::Arc;

use rstest::*;
use tracing::info;
use tracing::Level;

use income_repo::category_repo::CategoryRepo;
use income_repo::income_repo::IncomeRepo;
use income_repo::HealthCheck;

pub type Repos = (
    Arc<dyn CategoryRepo>,
    Arc<dyn IncomeRepo>,
    Arc<dyn HealthCheck>,
);

macro_rules! build_app {
    ($repos:expr) => {{
        let (category_repo, income_repo, health_check) = $repos;
        let app = actix_web::App::new()
            .wrap(income_lib::tracing::create_middleware())
            .configure(income_lib::app_config_func(
                category_repo,
                income_repo,
                health_check,
            ));
        tracing::info!("Built app");
        app
    }};
}

macro_rules! create_category {
    (&$service:ident, $tag:expr) => {{
        let request = actix_web::test::TestRequest::post()
            .uri("/api/v1/categories")
            .set_json(serde_json::json!({ "tag": $tag }))
            .to_request();
        let response = actix_web::test::call_service(&$service, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::CREATED,
            "Got {} response when creating category",
            response.status()
        );
        let body: serde_json::Value = actix_web::test::read_body_json(response).await;
        serde_json::from_value::<income_repo::category_repo::Category>(body["data"].clone())
            .unwrap()
    }};
}

macro_rules! create_income {
    (&$service:ident, $body:expr) => {{
        let request = actix_web::test::TestRequest::post()
            .uri("/api/v1/incomes")
            .set_json($body)
            .to_request();
        let response = actix_web::test::call_service(&$service, request).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::CREATED,
            "Got {} response when creating income",
            response.status()
        );
        let body: serde_json::Value = actix_web::test::read_body_json(response).await;
        serde_json::from_value::<income_repo::income_repo::Income>(body["data"].clone()).unwrap()
    }};
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();
    info!("tracing initialized");
}

#[fixture]
pub fn repos(_tracing_setup: &()) -> Repos {
    income_repo::mem_repo::create_repos()
}

pub fn salary(name: &str, tags: &[&str]) -> serde_json::Value {
    let categories: Vec<serde_json::Value> = tags
        .iter()
        .map(|tag| serde_json::json!({ "tag": tag }))
        .collect();
    serde_json::json!({
        "name": name,
        "value": 2500.5,
        "userId": 1,
        "categories": categories,
    })
}
