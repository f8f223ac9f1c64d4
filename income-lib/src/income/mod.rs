use actix_web::{web, Scope};

mod handlers;
pub mod models;
pub mod service;

pub fn income_service() -> Scope {
    web::scope("/incomes")
        .service(handlers::get_incomes)
        .service(handlers::add_income)
        .service(handlers::get_income)
        .service(handlers::update_income)
        .service(handlers::delete_income)
}
