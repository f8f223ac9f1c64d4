pub mod generator;

use income_repo::category_repo::CategoryRepo;
use income_repo::income_repo::IncomeRepo;
use income_repo::HealthCheck;
use serde::Deserialize;
use std::fs;
use std::sync::Arc;

#[derive(Deserialize)]
struct TestConfig {
    database_url: String,
}

#[derive(Debug)]
pub enum RepoType {
    SQLx,
    Mem,
}

pub type Repos = (
    Arc<dyn CategoryRepo>,
    Arc<dyn IncomeRepo>,
    Arc<dyn HealthCheck>,
);

/// Builds the repos for `repo_type`. SQLx repos need a `config_test.toml` with a
/// `database_url`; without one the SQLx cases are skipped.
pub async fn build_repos(repo_type: RepoType) -> Option<Repos> {
    match repo_type {
        RepoType::SQLx => {
            let Ok(config) = fs::read_to_string("config_test.toml") else {
                eprintln!("config_test.toml not found, skipping SQLx case");
                return None;
            };
            let config: TestConfig = toml::from_str(config.as_str()).unwrap();
            let repos = income_repo::sqlx_repo::create_repos(config.database_url, 1)
                .await
                .unwrap();
            Some(repos)
        }
        RepoType::Mem => Some(income_repo::mem_repo::create_repos()),
    }
}
