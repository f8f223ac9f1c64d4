use actix_web::{web, Scope};

mod handlers;
pub mod models;
pub mod service;

pub fn category_service() -> Scope {
    web::scope("/categories")
        .service(handlers::get_categories)
        .service(handlers::add_category)
        .service(handlers::get_category)
        .service(handlers::update_category)
        .service(handlers::delete_category)
}
