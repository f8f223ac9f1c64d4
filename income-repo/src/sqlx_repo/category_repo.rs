use crate::category_repo::CategoryRepoError::{CategoryAlreadyExists, CategoryNotFound};
use crate::category_repo::{Category, CategoryRepo, CategoryRepoError, NewCategory};
use crate::sqlx_repo::SQLxRepo;
use crate::{Filter, Page, PageOptions};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::{query_as, Postgres, QueryBuilder};
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct CategoryEntry {
    id: i32,
    tag: String,
}

impl From<CategoryEntry> for Category {
    fn from(value: CategoryEntry) -> Self {
        Category::new(value.id, value.tag)
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

fn push_filter(query_builder: &mut QueryBuilder<Postgres>, filter: &Filter) {
    if let Some(name) = &filter.name {
        query_builder.push(" WHERE tag = ").push_bind(name.clone());
    }
}

#[async_trait]
impl CategoryRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn create_category(
        &self,
        new_category: NewCategory,
    ) -> Result<Category, CategoryRepoError> {
        let result = query_as::<_, CategoryEntry>(
            "INSERT INTO categories(tag) VALUES ($1) RETURNING id, tag",
        )
        .bind(&new_category.tag)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(entry) => Ok(entry.into()),
            Err(e) if is_unique_violation(&e) => Err(CategoryAlreadyExists(new_category.tag)),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Unable to insert category {}", new_category.tag))
                .into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_category(&self, category_id: i32) -> Result<Category, CategoryRepoError> {
        query_as::<_, CategoryEntry>("SELECT id, tag FROM categories WHERE id = $1")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Unable to get category {}", category_id))?
            .ok_or(CategoryNotFound(category_id))
            .map(|c| c.into())
    }

    #[instrument(skip(self))]
    async fn find_category_by_tag(
        &self,
        tag: &str,
    ) -> Result<Option<Category>, CategoryRepoError> {
        let entry = query_as::<_, CategoryEntry>("SELECT id, tag FROM categories WHERE tag = $1")
            .bind(tag)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Unable to find category {}", tag))?;
        Ok(entry.map(|c| c.into()))
    }

    #[instrument(skip(self))]
    async fn get_all_categories(
        &self,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Page<Category>, CategoryRepoError> {
        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM categories");
        push_filter(&mut count_builder, &filter);
        let count: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .context("Unable to count categories")?;

        let mut query_builder = QueryBuilder::new("SELECT id, tag FROM categories");
        push_filter(&mut query_builder, &filter);
        query_builder.push(" ORDER BY id");
        if let Some(po) = page_options {
            query_builder
                .push(" OFFSET ")
                .push_bind(po.offset)
                .push(" LIMIT ")
                .push_bind(po.limit);
        }
        let categories = query_builder
            .build_query_as::<CategoryEntry>()
            .fetch_all(&self.pool)
            .await
            .context("Unable to get categories")?
            .into_iter()
            .map(|c| c.into())
            .collect();

        Ok(Page::new(categories, count))
    }

    #[instrument(skip(self))]
    async fn update_category(
        &self,
        category_id: i32,
        updated_category: NewCategory,
    ) -> Result<Category, CategoryRepoError> {
        let result = query_as::<_, CategoryEntry>(
            "UPDATE categories SET tag = $1 WHERE id = $2 RETURNING id, tag",
        )
        .bind(&updated_category.tag)
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(entry)) => Ok(entry.into()),
            Ok(None) => Err(CategoryNotFound(category_id)),
            Err(e) if is_unique_violation(&e) => {
                Err(CategoryAlreadyExists(updated_category.tag))
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Unable to update category {}", category_id))
                .into()),
        }
    }

    #[instrument(skip(self))]
    async fn delete_category(&self, category_id: i32) -> Result<Category, CategoryRepoError> {
        let entry = query_as::<_, CategoryEntry>(
            "DELETE FROM categories WHERE id = $1 RETURNING id, tag",
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to delete category {}", category_id))?
        .ok_or(CategoryNotFound(category_id))?;
        Ok(entry.into())
    }
}
