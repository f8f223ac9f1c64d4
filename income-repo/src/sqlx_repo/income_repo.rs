use crate::category_repo::Category;
use crate::income_repo::IncomeRepoError::IncomeNotFound;
use crate::income_repo::{Income, IncomeRepo, IncomeRepoError, IncomeUpdate, NewIncome};
use crate::sqlx_repo::SQLxRepo;
use crate::{Filter, Page, PageOptions};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{query, query_as, Executor, Postgres, QueryBuilder};
use std::collections::HashMap;
use tracing::instrument;

const INCOME_COLUMNS: &str = "id, name, value, user_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct IncomeEntry {
    id: i32,
    name: String,
    value: Decimal,
    user_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl IncomeEntry {
    fn into_income(self, categories: Vec<Category>) -> Income {
        Income {
            id: self.id,
            name: self.name,
            value: self.value,
            user_id: self.user_id,
            categories,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct IncomeCategoryEntry {
    income_id: i32,
    id: i32,
    tag: String,
}

fn push_filter(query_builder: &mut QueryBuilder<Postgres>, filter: &Filter) {
    if let Some(name) = &filter.name {
        query_builder.push(" WHERE name = ").push_bind(name.clone());
    }
}

impl SQLxRepo {
    #[instrument(skip(db_executor))]
    async fn get_linked_categories<'e, E>(
        db_executor: E,
        income_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<Category>>, IncomeRepoError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entries: Vec<IncomeCategoryEntry> = query_as(
            "SELECT ic.income_id, c.id, c.tag FROM income_categories ic JOIN categories c ON c.id = ic.category_id WHERE ic.income_id = ANY($1) ORDER BY c.id",
        )
        .bind(income_ids)
        .fetch_all(db_executor)
        .await
        .context("Unable to get categories of incomes")?;

        let mut categories: HashMap<i32, Vec<Category>> = HashMap::new();
        for entry in entries {
            categories
                .entry(entry.income_id)
                .or_default()
                .push(Category::new(entry.id, entry.tag));
        }
        Ok(categories)
    }

    #[instrument(skip(db_executor))]
    async fn link_categories<'e, E>(
        db_executor: E,
        income_id: i32,
        category_ids: &[i32],
    ) -> Result<(), IncomeRepoError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = query(
            "INSERT INTO income_categories(income_id, category_id) SELECT $1, UNNEST($2::int4[]) ON CONFLICT DO NOTHING",
        )
        .bind(income_id)
        .bind(category_ids)
        .execute(db_executor)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(IncomeRepoError::UnknownCategory)
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Unable to link categories to income {}", income_id))
                .into()),
        }
    }

    #[instrument(skip(db_executor))]
    async fn get_income_entry<'e, E>(
        db_executor: E,
        income_id: i32,
    ) -> Result<IncomeEntry, IncomeRepoError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        query_as(&format!(
            "SELECT {} FROM incomes WHERE id = $1",
            INCOME_COLUMNS
        ))
        .bind(income_id)
        .fetch_optional(db_executor)
        .await
        .with_context(|| format!("Unable to get income {}", income_id))?
        .ok_or(IncomeNotFound(income_id))
    }
}

#[async_trait]
impl IncomeRepo for SQLxRepo {
    #[instrument(skip(self))]
    async fn create_income(&self, new_income: NewIncome) -> Result<Income, IncomeRepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Unable to start transaction")?;

        let entry: IncomeEntry = query_as(&format!(
            "INSERT INTO incomes(name, value, user_id) VALUES ($1, $2, $3) RETURNING {}",
            INCOME_COLUMNS
        ))
        .bind(&new_income.name)
        .bind(new_income.value)
        .bind(new_income.user_id)
        .fetch_one(&mut *tx)
        .await
        .context("Unable to insert income")?;

        Self::link_categories(&mut *tx, entry.id, &new_income.category_ids).await?;
        let mut categories = Self::get_linked_categories(&mut *tx, &[entry.id]).await?;

        tx.commit().await.context("Unable to commit income")?;

        let linked = categories.remove(&entry.id).unwrap_or_default();
        Ok(entry.into_income(linked))
    }

    #[instrument(skip(self))]
    async fn get_income(&self, income_id: i32) -> Result<Income, IncomeRepoError> {
        let entry = Self::get_income_entry(&self.pool, income_id).await?;
        let mut categories = Self::get_linked_categories(&self.pool, &[income_id]).await?;

        let linked = categories.remove(&income_id).unwrap_or_default();
        Ok(entry.into_income(linked))
    }

    #[instrument(skip(self))]
    async fn get_all_incomes(
        &self,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Page<Income>, IncomeRepoError> {
        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM incomes");
        push_filter(&mut count_builder, &filter);
        let count: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .context("Unable to count incomes")?;

        let mut query_builder =
            QueryBuilder::new(format!("SELECT {} FROM incomes", INCOME_COLUMNS));
        push_filter(&mut query_builder, &filter);
        query_builder.push(" ORDER BY id");
        if let Some(po) = page_options {
            query_builder
                .push(" OFFSET ")
                .push_bind(po.offset)
                .push(" LIMIT ")
                .push_bind(po.limit);
        }
        let entries: Vec<IncomeEntry> = query_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .context("Unable to get incomes")?;

        let income_ids: Vec<i32> = entries.iter().map(|e| e.id).collect();
        let mut categories = Self::get_linked_categories(&self.pool, &income_ids).await?;

        let incomes = entries
            .into_iter()
            .map(|entry| {
                let linked = categories.remove(&entry.id).unwrap_or_default();
                entry.into_income(linked)
            })
            .collect();

        Ok(Page::new(incomes, count))
    }

    #[instrument(skip(self))]
    async fn update_income(
        &self,
        income_id: i32,
        update: IncomeUpdate,
    ) -> Result<Income, IncomeRepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Unable to start transaction")?;

        let entry: IncomeEntry = query_as(&format!(
            "UPDATE incomes SET name = COALESCE($1, name), value = COALESCE($2, value), user_id = COALESCE($3, user_id), updated_at = NOW() WHERE id = $4 RETURNING {}",
            INCOME_COLUMNS
        ))
        .bind(&update.name)
        .bind(update.value)
        .bind(update.user_id)
        .bind(income_id)
        .fetch_optional(&mut *tx)
        .await
        .with_context(|| format!("Unable to update income {}", income_id))?
        .ok_or(IncomeNotFound(income_id))?;

        if let Some(category_ids) = &update.category_ids {
            query("DELETE FROM income_categories WHERE income_id = $1")
                .bind(income_id)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Unable to unlink categories of income {}", income_id))?;
            Self::link_categories(&mut *tx, income_id, category_ids).await?;
        }
        let mut categories = Self::get_linked_categories(&mut *tx, &[income_id]).await?;

        tx.commit().await.context("Unable to commit income update")?;

        let linked = categories.remove(&income_id).unwrap_or_default();
        Ok(entry.into_income(linked))
    }

    #[instrument(skip(self))]
    async fn delete_income(&self, income_id: i32) -> Result<Income, IncomeRepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Unable to start transaction")?;

        let mut categories = Self::get_linked_categories(&mut *tx, &[income_id]).await?;
        let entry: IncomeEntry = query_as(&format!(
            "DELETE FROM incomes WHERE id = $1 RETURNING {}",
            INCOME_COLUMNS
        ))
        .bind(income_id)
        .fetch_optional(&mut *tx)
        .await
        .with_context(|| format!("Unable to delete income {}", income_id))?
        .ok_or(IncomeNotFound(income_id))?;

        tx.commit().await.context("Unable to commit income deletion")?;

        let linked = categories.remove(&income_id).unwrap_or_default();
        Ok(entry.into_income(linked))
    }
}
