mod category_repo;
mod income_repo;

use crate::category_repo::CategoryRepo;
use crate::income_repo::IncomeRepo;
use crate::HealthCheck;
use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tracing::{error, info};

pub struct SQLxRepo {
    pool: Pool<Postgres>,
}

impl SQLxRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxRepo {
        SQLxRepo { pool }
    }
}

#[async_trait]
impl HealthCheck for SQLxRepo {
    async fn check(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                error!(%e, "Database health check failed");
                false
            }
        }
    }
}

pub async fn create_repos(
    database_url: String,
    max_pool_size: u32,
) -> Result<
    (
        Arc<dyn CategoryRepo>,
        Arc<dyn IncomeRepo>,
        Arc<dyn HealthCheck>,
    ),
    anyhow::Error,
> {
    let pool = PgPoolOptions::new()
        .max_connections(max_pool_size)
        .connect(&database_url)
        .await
        .context("Unable to connect to database")?;

    info!("Running migrations");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Unable to run migrations")?;

    let repo = Arc::new(SQLxRepo::new(pool));
    let category_repo: Arc<dyn CategoryRepo> = repo.clone();
    let income_repo: Arc<dyn IncomeRepo> = repo.clone();
    let health_check: Arc<dyn HealthCheck> = repo;
    Ok((category_repo, income_repo, health_check))
}
