use crate::error::HandlerError;
use crate::income::models::{IncomeBody, IncomeUpdateBody};
use crate::income::service;
use crate::pagination::{paginate, ListQuery};
use crate::response::{ApiResponse, ListResponse};
use crate::validation::Validate;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use income_repo::category_repo::CategoryRepo;
use income_repo::income_repo::IncomeRepo;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::RootSpan;

#[get("")]
pub async fn get_incomes(
    income_repo: web::Data<Arc<dyn IncomeRepo>>,
    query: web::Query<ListQuery>,
) -> Result<impl Responder, HandlerError> {
    let page_request = query.page_request()?;

    let page = service::get_incomes(
        income_repo.get_ref().as_ref(),
        query.filter(),
        page_request.page_options(),
    )
    .await?;
    let pagination = paginate(page.count, page_request.limit, page_request.page);

    Ok(HttpResponse::Ok().json(ListResponse::new(page, pagination)))
}

#[post("")]
pub async fn add_income(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    income_repo: web::Data<Arc<dyn IncomeRepo>>,
    body: web::Json<IncomeBody>,
) -> Result<impl Responder, HandlerError> {
    info!(body = ?body, "add income");
    let request = body.into_inner().validate()?;

    let income = service::add_income(
        category_repo.get_ref().as_ref(),
        income_repo.get_ref().as_ref(),
        request,
    )
    .await?;

    Ok(HttpResponse::Created().json(ApiResponse::data(income).with_message("created")))
}

#[get("/{income_id}")]
pub async fn get_income(
    income_repo: web::Data<Arc<dyn IncomeRepo>>,
    income_id: web::Path<i32>,
    root_span: RootSpan,
) -> Result<impl Responder, HandlerError> {
    let income_id = income_id.into_inner();
    root_span.record("resource_id", income_id);

    let income = service::get_income(income_repo.get_ref().as_ref(), income_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(income)))
}

#[put("/{income_id}")]
pub async fn update_income(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    income_repo: web::Data<Arc<dyn IncomeRepo>>,
    income_id: web::Path<i32>,
    body: web::Json<IncomeUpdateBody>,
    root_span: RootSpan,
) -> Result<impl Responder, HandlerError> {
    let income_id = income_id.into_inner();
    root_span.record("resource_id", income_id);
    info!(body = ?body, "update income");
    let changes = body.into_inner().validate()?;

    // unknown ids are rejected before any category gets created for them
    service::get_income(income_repo.get_ref().as_ref(), income_id).await?;
    let income = service::update(
        category_repo.get_ref().as_ref(),
        income_repo.get_ref().as_ref(),
        income_id,
        changes,
    )
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(income).with_message("update success")))
}

#[delete("/{income_id}")]
pub async fn delete_income(
    income_repo: web::Data<Arc<dyn IncomeRepo>>,
    income_id: web::Path<i32>,
    root_span: RootSpan,
) -> Result<impl Responder, HandlerError> {
    let income_id = income_id.into_inner();
    root_span.record("resource_id", income_id);

    service::get_income(income_repo.get_ref().as_ref(), income_id).await?;
    service::destroy(income_repo.get_ref().as_ref(), income_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("deleted")))
}
