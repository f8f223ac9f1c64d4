use crate::category_repo::Category;
use crate::income_repo::IncomeRepoError::IncomeNotFound;
use crate::income_repo::{Income, IncomeRepo, IncomeRepoError, IncomeUpdate, NewIncome};
use crate::mem_repo::category_repo::MemCategoryRepo;
use crate::{Filter, Page, PageOptions};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone)]
struct IncomeEntry {
    id: i32,
    name: String,
    value: Decimal,
    user_id: i32,
    category_ids: Vec<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

struct State {
    incomes: BTreeMap<i32, IncomeEntry>,
    next_id: i32,
}

pub struct MemIncomeRepo {
    state: RwLock<State>,
    category_repo: Arc<MemCategoryRepo>,
}

impl MemIncomeRepo {
    pub fn new(category_repo: Arc<MemCategoryRepo>) -> MemIncomeRepo {
        let state = State {
            incomes: BTreeMap::new(),
            next_id: 1,
        };
        MemIncomeRepo {
            state: RwLock::new(state),
            category_repo,
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

    fn check_categories(&self, category_ids: &[i32]) -> Result<(), IncomeRepoError> {
        let categories = self.category_repo.lookup(category_ids)?;
        if categories.iter().any(|c| c.is_none()) {
            return Err(IncomeRepoError::UnknownCategory);
        }
        Ok(())
    }

    // Categories deleted after linking are dropped, mirroring the cascade on the junction table.
    fn to_income(&self, entry: IncomeEntry) -> Result<Income, IncomeRepoError> {
        let mut categories: Vec<Category> = self
            .category_repo
            .lookup(&entry.category_ids)?
            .into_iter()
            .flatten()
            .collect();
        categories.sort_by_key(|c| c.id);
        Ok(Income {
            id: entry.id,
            name: entry.name,
            value: entry.value,
            user_id: entry.user_id,
            categories,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        })
    }
}

fn dedup(category_ids: Vec<i32>) -> Vec<i32> {
    let mut unique = Vec::with_capacity(category_ids.len());
    for id in category_ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

#[async_trait]
impl IncomeRepo for MemIncomeRepo {
    async fn create_income(&self, new_income: NewIncome) -> Result<Income, IncomeRepoError> {
        self.check_categories(&new_income.category_ids)?;

        let entry = {
            let mut write_guard = self.write_lock()?;

            let id = write_guard.next_id;
            write_guard.next_id += 1;

            let now = Utc::now();
            let entry = IncomeEntry {
                id,
                name: new_income.name,
                value: new_income.value,
                user_id: new_income.user_id,
                category_ids: dedup(new_income.category_ids),
                created_at: now,
                updated_at: now,
            };
            write_guard.incomes.insert(id, entry.clone());
            entry
        };

        self.to_income(entry)
    }

    async fn get_income(&self, income_id: i32) -> Result<Income, IncomeRepoError> {
        let entry = self
            .read_lock()?
            .incomes
            .get(&income_id)
            .cloned()
            .ok_or(IncomeNotFound(income_id))?;
        self.to_income(entry)
    }

    async fn get_all_incomes(
        &self,
        filter: Filter,
        page_options: Option<PageOptions>,
    ) -> Result<Page<Income>, IncomeRepoError> {
        let matching: Vec<IncomeEntry> = self
            .read_lock()?
            .incomes
            .values()
            .filter(|i| match &filter.name {
                Some(name) => &i.name == name,
                None => true,
            })
            .cloned()
            .collect();
        let count = matching.len() as i64;

        let entries: Vec<IncomeEntry> = match page_options {
            Some(page_options) => matching
                .into_iter()
                .skip(page_options.offset as usize)
                .take(page_options.limit as usize)
                .collect(),
            None => matching,
        };

        let incomes = entries
            .into_iter()
            .map(|entry| self.to_income(entry))
            .collect::<Result<Vec<Income>, IncomeRepoError>>()?;
        Ok(Page::new(incomes, count))
    }

    async fn update_income(
        &self,
        income_id: i32,
        update: IncomeUpdate,
    ) -> Result<Income, IncomeRepoError> {
        if let Some(category_ids) = &update.category_ids {
            self.check_categories(category_ids)?;
        }

        let entry = {
            let mut write_guard = self.write_lock()?;

            let Some(entry) = write_guard.incomes.get_mut(&income_id) else {
                return Err(IncomeNotFound(income_id));
            };
            if let Some(name) = update.name {
                entry.name = name;
            }
            if let Some(value) = update.value {
                entry.value = value;
            }
            if let Some(user_id) = update.user_id {
                entry.user_id = user_id;
            }
            if let Some(category_ids) = update.category_ids {
                entry.category_ids = dedup(category_ids);
            }
            entry.updated_at = Utc::now();
            entry.clone()
        };

        self.to_income(entry)
    }

    async fn delete_income(&self, income_id: i32) -> Result<Income, IncomeRepoError> {
        let entry = self
            .write_lock()?
            .incomes
            .remove(&income_id)
            .ok_or(IncomeNotFound(income_id))?;
        self.to_income(entry)
    }
}
