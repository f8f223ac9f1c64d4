use crate::category_repo::{Category, CategoryRepo, CategoryRepoError, NewCategory};
use crate::{Filter, Page, PageOptions};
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    categories: BTreeMap<i32, Category>,
    next_id: i32,
}

pub struct MemCategoryRepo {
    state: RwLock<State>,
}

impl Default for MemCategoryRepo {
    fn default() -> Self {
        MemCategoryRepo::new()
    }
}

impl MemCategoryRepo {
    pub fn new() -> MemCategoryRepo {
        let state = State {
            categories: BTreeMap::new(),
            next_id: 1,
        };
        MemCategoryRepo {
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    /// Looks up each id, keeping the order of `category_ids`. Missing ids map to `None`.
    pub(crate) fn lookup(&self, category_ids: &[i32]) -> Result<Vec<Option<Category>>, anyhow::Error> {
        let read_guard = self.read_lock()?;
        Ok(category_ids
            .iter()
            .map(|id| read_guard.categories.get(id).cloned())
            .collect())
    }
}

fn tag_taken(state: &State, tag: &str, except: Option<i32>) -> bool {
    state
        .categories
        .values()
        .any(|c| c.tag == tag && Some(c.id) != except)
}

#[async_trait]
impl CategoryRepo for MemCategoryRepo {
    async fn create_category(
        &self,
        new_category: NewCategory,
    ) -> Result<Category, CategoryRepoError> {
        let mut write_guard = self.write_lock()?;

        if tag_taken(&write_guard, &new_category.tag, None) {
            return Err(CategoryRepoError::CategoryAlreadyExists(new_category.tag));
        }

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let category = new_category.to_category(id);
        write_guard.categories.insert(id, category.clone());

        Ok(category)
    }

    async fn get_category(&self, category_id: i32) -> Result<Category, CategoryRepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .categories
            .get(&category_id)
            .cloned()
            .ok_or(CategoryRepoError::CategoryNotFound(category_id))
    }

    async fn find_category_by_tag(
        &self,
        tag: &str,
    ) -> Result<Option<Category>, CategoryRepoError> {
        let read_guard = self.read_lock()?;

        let category = read_guard
            .categories
            .values()
            .find(|c| c.tag == tag)
            .cloned();
        Ok(category)
    }

    async fn get_all_categories(
        &self,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Page<Category>, CategoryRepoError> {
        let read_guard = self.read_lock()?;

        let matching: Vec<&Category> = read_guard
            .categories
            .values()
            .filter(|c| match &filter.name {
                Some(name) => &c.tag == name,
                None => true,
            })
            .collect();
        let count = matching.len() as i64;

        let categories = match page_options {
            Some(page_options) => matching
                .into_iter()
                .skip(page_options.offset as usize)
                .take(page_options.limit as usize)
                .cloned()
                .collect(),
            None => matching.into_iter().cloned().collect(),
        };

        Ok(Page::new(categories, count))
    }

    async fn update_category(
        &self,
        category_id: i32,
        updated_category: NewCategory,
    ) -> Result<Category, CategoryRepoError> {
        let mut write_guard = self.write_lock()?;

        if !write_guard.categories.contains_key(&category_id) {
            return Err(CategoryRepoError::CategoryNotFound(category_id));
        }
        if tag_taken(&write_guard, &updated_category.tag, Some(category_id)) {
            return Err(CategoryRepoError::CategoryAlreadyExists(
                updated_category.tag,
            ));
        }

        let category = updated_category.to_category(category_id);
        write_guard.categories.insert(category_id, category.clone());
        Ok(category)
    }

    async fn delete_category(&self, category_id: i32) -> Result<Category, CategoryRepoError> {
        let mut write_guard = self.write_lock()?;

        write_guard
            .categories
            .remove(&category_id)
            .ok_or(CategoryRepoError::CategoryNotFound(category_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn test_default_repo_starts_empty() {
        let repo = MemCategoryRepo::default();

        let page = repo.get_all_categories(Filter::NONE, None).await.unwrap();
        assert_eq!(page, Page::new(vec![], 0));

        let category = repo
            .create_category(NewCategory::new("salary"))
            .await
            .unwrap();
        assert_eq!(category, Category::new(1, "salary".to_string()));
    }
}
