use crate::error::HandlerError;
use crate::validation::Rules;
use income_repo::{Filter, PageOptions};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 50;

/// Query string accepted by the list endpoints.
#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// `page` and `limit` must come from [`ListQuery::page_request`], which rejects pages
    /// whose offset does not fit in an `i64`.
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            offset: (self.page - 1) * self.limit,
            limit: self.limit,
        }
    }
}

impl ListQuery {
    pub fn page_request(&self) -> Result<PageRequest, HandlerError> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        Rules::new()
            .check(page >= 1, "page must be a positive integer")
            .check(
                (1..=MAX_LIMIT).contains(&limit),
                format!("limit must be between 1 and {}", MAX_LIMIT),
            )
            .finish()?;
        Rules::new()
            .check(
                (page - 1).checked_mul(limit).is_some(),
                "page is out of range",
            )
            .finish()?;
        Ok(PageRequest { page, limit })
    }

    /// An empty `name` parameter does not filter.
    pub fn filter(&self) -> Filter {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Filter::by_name(name),
            _ => Filter::NONE,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Pagination {
    pub total_page: i64,
    pub current_page: i64,
    pub next_page: Option<i64>,
}

pub fn paginate(length: i64, limit: i64, page: i64) -> Pagination {
    let total_page = if limit > 0 {
        (length + limit - 1) / limit
    } else {
        0
    };
    let next_page = if page < total_page {
        Some(page + 1)
    } else {
        None
    };
    Pagination {
        total_page,
        current_page: page,
        next_page,
    }
}
