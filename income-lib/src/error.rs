use crate::income::service::IncomeServiceError;
use crate::response::ErrorBody;
use actix_web::body::BoxBody;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::web::{JsonConfig, PathConfig, QueryConfig};
use actix_web::{HttpResponse, ResponseError};
use income_repo::category_repo::CategoryRepoError;
use income_repo::income_repo::IncomeRepoError;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid id")]
    InvalidId,
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<CategoryRepoError> for HandlerError {
    fn from(e: CategoryRepoError) -> Self {
        match e {
            CategoryRepoError::CategoryNotFound(_) => HandlerError::InvalidId,
            CategoryRepoError::CategoryAlreadyExists(tag) => {
                HandlerError::Conflict(format!("category {} already exists", tag))
            }
            CategoryRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl From<IncomeRepoError> for HandlerError {
    fn from(e: IncomeRepoError) -> Self {
        match e {
            IncomeRepoError::IncomeNotFound(_) => HandlerError::InvalidId,
            IncomeRepoError::UnknownCategory => {
                HandlerError::Validation("unknown category".to_string())
            }
            IncomeRepoError::Other(e) => HandlerError::Other(e),
        }
    }
}

impl From<IncomeServiceError> for HandlerError {
    fn from(e: IncomeServiceError) -> Self {
        match e {
            IncomeServiceError::Category(e) => e.into(),
            IncomeServiceError::Income(e) => e.into(),
        }
    }
}

impl ResponseError for HandlerError {
    fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::Validation(_) | HandlerError::InvalidId | HandlerError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            HandlerError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let message = match self {
            HandlerError::Other(e) => {
                error!(error = ?e, "Unhandled error");
                "Server Error".to_string()
            }
            e => e.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody::new(message))
    }
}

/// Malformed JSON bodies are reported in the error envelope with the parser's message.
pub fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, req| {
        error!(req_path = req.path(), %err);
        let message = match &err {
            JsonPayloadError::Deserialize(deserialize_err) => deserialize_err.to_string(),
            _ => err.to_string(),
        };
        HandlerError::Validation(message).into()
    })
}

pub fn query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|err, req| {
        error!(req_path = req.path(), %err);
        HandlerError::Validation(err.to_string()).into()
    })
}

pub fn path_config() -> PathConfig {
    PathConfig::default().error_handler(|err, req| {
        error!(req_path = req.path(), %err);
        HandlerError::Validation("id must be an integer".to_string()).into()
    })
}
