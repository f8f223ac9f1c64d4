use crate::{Filter, Page, PageOptions};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    pub id: i32,
    pub tag: String,
}

impl Category {
    pub fn new(id: i32, tag: String) -> Category {
        Category { id, tag }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewCategory {
    pub tag: String,
}

impl NewCategory {
    pub fn new(tag: impl Into<String>) -> NewCategory {
        NewCategory { tag: tag.into() }
    }

    pub fn to_category(self, id: i32) -> Category {
        Category { id, tag: self.tag }
    }
}

#[derive(Error, Debug)]
pub enum CategoryRepoError {
    #[error("Category with id {0} not found")]
    CategoryNotFound(i32),
    #[error("Category {0} already exists")]
    CategoryAlreadyExists(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait CategoryRepo: Sync + Send {
    async fn create_category(
        &self,
        new_category: NewCategory,
    ) -> Result<Category, CategoryRepoError>;

    async fn get_category(&self, category_id: i32) -> Result<Category, CategoryRepoError>;

    async fn find_category_by_tag(&self, tag: &str)
        -> Result<Option<Category>, CategoryRepoError>;

    async fn get_all_categories(
        &self,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Page<Category>, CategoryRepoError>;

    async fn update_category(
        &self,
        category_id: i32,
        updated_category: NewCategory,
    ) -> Result<Category, CategoryRepoError>;

    async fn delete_category(&self, category_id: i32) -> Result<Category, CategoryRepoError>;
}
