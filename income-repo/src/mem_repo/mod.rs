use crate::category_repo::CategoryRepo;
use crate::income_repo::IncomeRepo;
use crate::HealthCheck;
use async_trait::async_trait;
use std::sync::Arc;

mod category_repo;
mod income_repo;

struct MemHealthCheck;

#[async_trait]
impl HealthCheck for MemHealthCheck {
    async fn check(&self) -> bool {
        true
    }
}

pub fn create_repos() -> (
    Arc<dyn CategoryRepo>,
    Arc<dyn IncomeRepo>,
    Arc<dyn HealthCheck>,
) {
    let category_repo = Arc::new(category_repo::MemCategoryRepo::new());
    let income_repo = income_repo::MemIncomeRepo::new(category_repo.clone());

    (category_repo, Arc::new(income_repo), Arc::new(MemHealthCheck))
}
