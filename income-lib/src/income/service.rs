use crate::category::service::find_or_create;
use crate::income::models::{IncomeChanges, NewIncomeRequest};
use income_repo::category_repo::{CategoryRepo, CategoryRepoError};
use income_repo::income_repo::{Income, IncomeRepo, IncomeRepoError, IncomeUpdate, NewIncome};
use income_repo::{Filter, Page, PageOptions};
use thiserror::Error;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum IncomeServiceError {
    #[error(transparent)]
    Category(#[from] CategoryRepoError),
    #[error(transparent)]
    Income(#[from] IncomeRepoError),
}

/// Resolves every tag to a category id, creating the categories that do not exist yet.
/// Repeated tags resolve once; the order of first appearance is kept.
#[instrument(skip(category_repo))]
pub async fn resolve_categories(
    category_repo: &dyn CategoryRepo,
    tags: &[String],
) -> Result<Vec<i32>, CategoryRepoError> {
    let mut category_ids = Vec::with_capacity(tags.len());
    for tag in tags {
        let category = find_or_create(category_repo, tag).await?;
        if !category_ids.contains(&category.id) {
            category_ids.push(category.id);
        }
    }
    Ok(category_ids)
}

#[instrument(skip(category_repo, income_repo))]
pub async fn add_income(
    category_repo: &dyn CategoryRepo,
    income_repo: &dyn IncomeRepo,
    request: NewIncomeRequest,
) -> Result<Income, IncomeServiceError> {
    let category_ids = resolve_categories(category_repo, &request.tags).await?;

    let new_income = NewIncome::new(request.name, request.value, request.user_id, category_ids);
    let income = income_repo.create_income(new_income).await?;
    Ok(income)
}

#[instrument(skip(income_repo))]
pub async fn get_incomes(
    income_repo: &dyn IncomeRepo,
    filter: Filter,
    page_options: PageOptions,
) -> Result<Page<Income>, IncomeRepoError> {
    income_repo.get_all_incomes(filter, Some(page_options)).await
}

#[instrument(skip(income_repo))]
pub async fn get_income(
    income_repo: &dyn IncomeRepo,
    income_id: i32,
) -> Result<Income, IncomeRepoError> {
    income_repo.get_income(income_id).await
}

#[instrument(skip(category_repo, income_repo))]
pub async fn update(
    category_repo: &dyn CategoryRepo,
    income_repo: &dyn IncomeRepo,
    income_id: i32,
    changes: IncomeChanges,
) -> Result<Income, IncomeServiceError> {
    let category_ids = match &changes.tags {
        Some(tags) => Some(resolve_categories(category_repo, tags).await?),
        None => None,
    };

    let update = IncomeUpdate {
        name: changes.name,
        value: changes.value,
        user_id: changes.user_id,
        category_ids,
    };
    let income = income_repo.update_income(income_id, update).await?;
    Ok(income)
}

#[instrument(skip(income_repo))]
pub async fn destroy(
    income_repo: &dyn IncomeRepo,
    income_id: i32,
) -> Result<Income, IncomeRepoError> {
    income_repo.delete_income(income_id).await
}
