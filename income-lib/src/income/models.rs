use crate::category::models::CategoryBody;
use crate::error::HandlerError;
use crate::validation::{Rules, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income payload as posted by clients. Every field is optional here so that a missing
/// field is reported by validation rather than by the JSON parser.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBody {
    pub name: Option<String>,
    pub value: Option<Decimal>,
    pub user_id: Option<i32>,
    pub categories: Option<Vec<CategoryBody>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewIncomeRequest {
    pub name: String,
    pub value: Decimal,
    pub user_id: i32,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomeChanges {
    pub name: Option<String>,
    pub value: Option<Decimal>,
    pub user_id: Option<i32>,
    pub tags: Option<Vec<String>>,
}

/// Body of `PUT /incomes/{id}`: the same fields as [`IncomeBody`], all of them optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(transparent)]
pub struct IncomeUpdateBody(pub IncomeBody);

impl IncomeBody {
    fn field_rules(&self) -> Rules {
        Rules::new()
            .not_blank(self.name.as_deref(), "name")
            .check(
                self.value.map_or(true, |v| v >= Decimal::ZERO),
                "value must not be negative",
            )
    }

    fn checked_tags(
        categories: Option<Vec<CategoryBody>>,
    ) -> Result<Option<Vec<String>>, HandlerError> {
        categories
            .map(|categories| {
                categories
                    .into_iter()
                    .enumerate()
                    .map(|(i, c)| c.checked_tag(&format!("categories[{}].tag", i)))
                    .collect::<Result<Vec<String>, HandlerError>>()
            })
            .transpose()
    }
}

impl Validate for IncomeBody {
    type Output = NewIncomeRequest;

    fn validate(self) -> Result<NewIncomeRequest, HandlerError> {
        Rules::new()
            .required(&self.name, "name")
            .required(&self.value, "value")
            .required(&self.user_id, "userId")
            .finish()?;
        self.field_rules().finish()?;

        let tags = IncomeBody::checked_tags(self.categories)?.unwrap_or_default();
        Ok(NewIncomeRequest {
            name: self.name.unwrap_or_default().trim().to_string(),
            value: self.value.unwrap_or_default(),
            user_id: self.user_id.unwrap_or_default(),
            tags,
        })
    }
}

impl Validate for IncomeUpdateBody {
    type Output = IncomeChanges;

    fn validate(self) -> Result<IncomeChanges, HandlerError> {
        let body = self.0;
        Rules::new()
            .check(
                body.name.is_some()
                    || body.value.is_some()
                    || body.user_id.is_some()
                    || body.categories.is_some(),
                "at least one field is required",
            )
            .finish()?;
        body.field_rules().finish()?;

        Ok(IncomeChanges {
            name: body.name.map(|n| n.trim().to_string()),
            value: body.value,
            user_id: body.user_id,
            tags: IncomeBody::checked_tags(body.categories)?,
        })
    }
}
