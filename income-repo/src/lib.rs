use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod category_repo;
pub mod income_repo;

// implementation modules
pub mod mem_repo;
pub mod sqlx_repo;

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn check(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageOptions {
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub name: Option<String>,
}

impl Filter {
    pub const NONE: Filter = Filter { name: None };

    pub fn by_name(name: impl Into<String>) -> Filter {
        Filter {
            name: Some(name.into()),
        }
    }
}

/// A window of rows together with the number of rows matching the filter, regardless of
/// the page options used to fetch them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub count: i64,
}

impl<T> Page<T> {
    pub fn new(rows: Vec<T>, count: i64) -> Page<T> {
        Page { rows, count }
    }
}
