use crate::category::models::CategoryBody;
use crate::category::service;
use crate::error::HandlerError;
use crate::pagination::{paginate, ListQuery};
use crate::response::{ApiResponse, ListResponse};
use crate::validation::Validate;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use income_repo::category_repo::CategoryRepo;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::RootSpan;

#[get("")]
pub async fn get_categories(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    query: web::Query<ListQuery>,
) -> Result<impl Responder, HandlerError> {
    let page_request = query.page_request()?;

    let page = service::get_categories(
        category_repo.get_ref().as_ref(),
        query.filter(),
        page_request.page_options(),
    )
    .await?;
    let pagination = paginate(page.count, page_request.limit, page_request.page);

    Ok(HttpResponse::Ok().json(ListResponse::new(page, pagination)))
}

#[post("")]
pub async fn add_category(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    body: web::Json<CategoryBody>,
) -> Result<impl Responder, HandlerError> {
    info!(body = ?body, "add category");
    let new_category = body.into_inner().validate()?;

    let category = service::add_category(category_repo.get_ref().as_ref(), new_category).await?;

    Ok(HttpResponse::Created().json(ApiResponse::data(category).with_message("category create")))
}

#[get("/{category_id}")]
pub async fn get_category(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    category_id: web::Path<i32>,
    root_span: RootSpan,
) -> Result<impl Responder, HandlerError> {
    let category_id = category_id.into_inner();
    root_span.record("resource_id", category_id);

    let category = service::get_category(category_repo.get_ref().as_ref(), category_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(category)))
}

#[put("/{category_id}")]
pub async fn update_category(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    category_id: web::Path<i32>,
    body: web::Json<CategoryBody>,
    root_span: RootSpan,
) -> Result<impl Responder, HandlerError> {
    let category_id = category_id.into_inner();
    root_span.record("resource_id", category_id);
    info!(body = ?body, "update category");
    let updated_category = body.into_inner().validate()?;

    service::get_category(category_repo.get_ref().as_ref(), category_id).await?;
    let category = service::update_category(
        category_repo.get_ref().as_ref(),
        category_id,
        updated_category,
    )
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(category).with_message("update success")))
}

#[delete("/{category_id}")]
pub async fn delete_category(
    category_repo: web::Data<Arc<dyn CategoryRepo>>,
    category_id: web::Path<i32>,
    root_span: RootSpan,
) -> Result<impl Responder, HandlerError> {
    let category_id = category_id.into_inner();
    root_span.record("resource_id", category_id);

    service::get_category(category_repo.get_ref().as_ref(), category_id).await?;
    service::destroy(category_repo.get_ref().as_ref(), category_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("deleted")))
}
