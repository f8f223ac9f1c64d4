use crate::pagination::Pagination;
use income_repo::Page;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> ApiResponse<T> {
        ApiResponse {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> ApiResponse<T> {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Envelope for list endpoints. `next_page` is serialized as `null` on the last page.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub success: bool,
    pub total_data: i64,
    pub total_page: i64,
    pub current_page: i64,
    pub next_page: Option<i64>,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(page: Page<T>, pagination: Pagination) -> ListResponse<T> {
        ListResponse {
            success: true,
            total_data: page.count,
            total_page: pagination.total_page,
            current_page: pagination.current_page,
            next_page: pagination.next_page,
            data: page.rows,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> ErrorBody {
        ErrorBody {
            success: false,
            message: message.into(),
        }
    }
}
