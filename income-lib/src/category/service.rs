use income_repo::category_repo::{Category, CategoryRepo, CategoryRepoError, NewCategory};
use income_repo::{Filter, Page, PageOptions};
use tracing::{info, instrument};

#[instrument(skip(category_repo))]
pub async fn add_category(
    category_repo: &dyn CategoryRepo,
    new_category: NewCategory,
) -> Result<Category, CategoryRepoError> {
    category_repo.create_category(new_category).await
}

#[instrument(skip(category_repo))]
pub async fn get_categories(
    category_repo: &dyn CategoryRepo,
    filter: Filter,
    page_options: PageOptions,
) -> Result<Page<Category>, CategoryRepoError> {
    category_repo
        .get_all_categories(filter, Some(page_options))
        .await
}

#[instrument(skip(category_repo))]
pub async fn get_category(
    category_repo: &dyn CategoryRepo,
    category_id: i32,
) -> Result<Category, CategoryRepoError> {
    category_repo.get_category(category_id).await
}

#[instrument(skip(category_repo))]
pub async fn update_category(
    category_repo: &dyn CategoryRepo,
    category_id: i32,
    updated_category: NewCategory,
) -> Result<Category, CategoryRepoError> {
    category_repo
        .update_category(category_id, updated_category)
        .await
}

#[instrument(skip(category_repo))]
pub async fn destroy(
    category_repo: &dyn CategoryRepo,
    category_id: i32,
) -> Result<Category, CategoryRepoError> {
    category_repo.delete_category(category_id).await
}

/// Returns the category tagged `tag`, creating it when there is none. A concurrent request
/// may create the same tag between the lookup and the insert; the unique tag then makes the
/// insert fail and the winner's row is returned instead.
#[instrument(skip(category_repo))]
pub async fn find_or_create(
    category_repo: &dyn CategoryRepo,
    tag: &str,
) -> Result<Category, CategoryRepoError> {
    if let Some(category) = category_repo.find_category_by_tag(tag).await? {
        info!(category_id = category.id, "category already exists");
        return Ok(category);
    }

    match category_repo.create_category(NewCategory::new(tag)).await {
        Ok(category) => {
            info!(category_id = category.id, "new category created");
            Ok(category)
        }
        Err(CategoryRepoError::CategoryAlreadyExists(_)) => category_repo
            .find_category_by_tag(tag)
            .await?
            .ok_or_else(|| CategoryRepoError::CategoryAlreadyExists(tag.to_string())),
        Err(e) => Err(e),
    }
}
