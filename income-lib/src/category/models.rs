use crate::error::HandlerError;
use crate::validation::{Rules, Validate};
use income_repo::category_repo::NewCategory;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CategoryBody {
    pub tag: Option<String>,
}

impl CategoryBody {
    pub fn new(tag: impl Into<String>) -> CategoryBody {
        CategoryBody {
            tag: Some(tag.into()),
        }
    }

    /// Checks the tag under `field`, so nested tags can be reported by their position.
    pub(crate) fn checked_tag(self, field: &str) -> Result<String, HandlerError> {
        Rules::new()
            .required(&self.tag, field)
            .not_blank(self.tag.as_deref(), field)
            .finish()?;
        Ok(self.tag.unwrap_or_default().trim().to_string())
    }
}

impl Validate for CategoryBody {
    type Output = NewCategory;

    fn validate(self) -> Result<NewCategory, HandlerError> {
        self.checked_tag("tag").map(NewCategory::new)
    }
}
