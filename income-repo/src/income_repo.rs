use crate::category_repo::Category;
use crate::{Filter, Page, PageOptions};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: i32,
    pub name: String,
    pub value: Decimal,
    pub user_id: i32,
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewIncome {
    pub name: String,
    pub value: Decimal,
    pub user_id: i32,
    pub category_ids: Vec<i32>,
}

impl NewIncome {
    pub fn new(name: String, value: Decimal, user_id: i32, category_ids: Vec<i32>) -> NewIncome {
        NewIncome {
            name,
            value,
            user_id,
            category_ids,
        }
    }
}

/// Partial update of an income. `None` leaves the stored value untouched; `Some` for
/// `category_ids` replaces the whole set of linked categories.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct IncomeUpdate {
    pub name: Option<String>,
    pub value: Option<Decimal>,
    pub user_id: Option<i32>,
    pub category_ids: Option<Vec<i32>>,
}

#[derive(Error, Debug)]
pub enum IncomeRepoError {
    #[error("Income with id {0} not found")]
    IncomeNotFound(i32),
    #[error("Income references a category that does not exist")]
    UnknownCategory,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait IncomeRepo: Sync + Send {
    async fn create_income(&self, new_income: NewIncome) -> Result<Income, IncomeRepoError>;

    async fn get_income(&self, income_id: i32) -> Result<Income, IncomeRepoError>;

    async fn get_all_incomes(
        &self,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Page<Income>, IncomeRepoError>;

    async fn update_income(
        &self,
        income_id: i32,
        update: IncomeUpdate,
    ) -> Result<Income, IncomeRepoError>;

    async fn delete_income(&self, income_id: i32) -> Result<Income, IncomeRepoError>;
}
