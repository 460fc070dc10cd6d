pub mod events;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Maximum length of a company name, in characters.
pub const MAX_NAME_LENGTH: usize = 15;
/// Maximum length of a company description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 3000;
/// A company must employ at least this many people.
pub const MIN_EMPLOYEES_COUNT: i32 = 1;

/// Legal form of a company.
///
/// Stored as the Postgres enum `company_type`; the database restricts the
/// column to these four literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "company_type")]
pub enum CompanyType {
    Corporations,
    NonProfit,
    Cooperative,
    #[serde(rename = "Sole Proprietorship")]
    #[sqlx(rename = "Sole Proprietorship")]
    SoleProprietorship,
}

/// The persisted company entity.
///
/// `id` is caller-supplied at creation and never reassigned; `created_at`
/// and `updated_at` are assigned by the store, with `updated_at` bumped on
/// every successful update.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub employees_count: i32,
    pub registered: bool,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub company_type: CompanyType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a company. The caller supplies the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCompany {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub employees_count: i32,
    pub registered: bool,
    #[serde(rename = "type")]
    pub company_type: CompanyType,
}

impl NewCompany {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_name(&self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        validate_employees_count(self.employees_count)
    }
}

/// Sparse update for a company, keyed by exactly one of `id`/`name`.
///
/// `name` is only ever a selector; updates never rewrite it. Fields left
/// `None` are not touched by the update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub company_type: Option<CompanyType>,
}

impl CompanyUpdate {
    /// Whether any mutable field is set. The `name` selector does not count.
    pub fn has_changes(&self) -> bool {
        self.description.is_some()
            || self.employees_count.is_some()
            || self.registered.is_some()
            || self.company_type.is_some()
    }

    /// Selector for the row to update: `id` wins over `name`.
    pub fn selector(&self) -> Result<Selector, AppError> {
        Selector::new(self.id, self.name.clone())
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.id.is_some() == self.name.is_some() {
            return Err(AppError::bad_request(
                "exactly one of id or name must be provided",
            ));
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(count) = self.employees_count {
            validate_employees_count(count)?;
        }
        Ok(())
    }
}

/// Addresses a single company for get/update/delete.
///
/// Constructed through [`Selector::new`], which enforces that at least one
/// part is present and that a UUID wins when both are supplied, so the
/// repositories never see an unaddressable request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    ById(Uuid),
    ByName(String),
}

impl Selector {
    pub fn new(id: Option<Uuid>, name: Option<String>) -> Result<Self, AppError> {
        if let Some(id) = id {
            return Ok(Selector::ById(id));
        }
        match name {
            Some(name) if !name.is_empty() => Ok(Selector::ByName(name)),
            _ => Err(AppError::bad_request("either uuid or name must be provided")),
        }
    }

    /// The selector value as the string consumers see in event envelopes.
    pub fn identifier(&self) -> String {
        match self {
            Selector::ById(id) => id.to_string(),
            Selector::ByName(name) => name.clone(),
        }
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::bad_request(format!(
            "name must not exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(AppError::bad_request(format!(
            "description must not exceed {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_employees_count(count: i32) -> Result<(), AppError> {
    if count < MIN_EMPLOYEES_COUNT {
        return Err(AppError::bad_request(format!(
            "employees_count must be at least {MIN_EMPLOYEES_COUNT}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_company() -> NewCompany {
        NewCompany {
            id: Uuid::new_v4(),
            name: "Acme".to_string(),
            description: None,
            employees_count: 5,
            registered: true,
            company_type: CompanyType::Corporations,
        }
    }

    #[test]
    fn valid_company_passes() {
        assert!(new_company().validate().is_ok());
    }

    #[test]
    fn name_at_limit_passes() {
        let mut company = new_company();
        company.name = "a".repeat(MAX_NAME_LENGTH);
        assert!(company.validate().is_ok());
    }

    #[test]
    fn name_over_limit_fails() {
        let mut company = new_company();
        company.name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(company.validate().is_err());
    }

    #[test]
    fn name_limit_counts_characters_not_bytes() {
        let mut company = new_company();
        company.name = "ü".repeat(MAX_NAME_LENGTH);
        assert!(company.validate().is_ok());
    }

    #[test]
    fn description_over_limit_fails() {
        let mut company = new_company();
        company.description = Some("d".repeat(MAX_DESCRIPTION_LENGTH + 1));
        assert!(company.validate().is_err());
    }

    #[test]
    fn zero_employees_fails() {
        let mut company = new_company();
        company.employees_count = 0;
        assert!(company.validate().is_err());
    }

    #[test]
    fn company_type_serializes_to_schema_literals() {
        assert_eq!(
            serde_json::to_value(CompanyType::SoleProprietorship).unwrap(),
            serde_json::json!("Sole Proprietorship")
        );
        assert_eq!(
            serde_json::to_value(CompanyType::NonProfit).unwrap(),
            serde_json::json!("NonProfit")
        );
    }

    #[test]
    fn company_type_rejects_unknown_literal() {
        let parsed: Result<CompanyType, _> = serde_json::from_str("\"LLC\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn selector_prefers_uuid_over_name() {
        let id = Uuid::new_v4();
        let selector = Selector::new(Some(id), Some("Acme".to_string())).unwrap();
        assert_eq!(selector, Selector::ById(id));
    }

    #[test]
    fn selector_falls_back_to_name() {
        let selector = Selector::new(None, Some("Acme".to_string())).unwrap();
        assert_eq!(selector, Selector::ByName("Acme".to_string()));
    }

    #[test]
    fn selector_requires_at_least_one_part() {
        let result = Selector::new(None, None);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn selector_rejects_empty_name() {
        let result = Selector::new(None, Some(String::new()));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn update_with_both_selectors_fails() {
        let update = CompanyUpdate {
            id: Some(Uuid::new_v4()),
            name: Some("Acme".to_string()),
            description: None,
            employees_count: None,
            registered: None,
            company_type: None,
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn update_with_no_selector_fails() {
        let update = CompanyUpdate {
            id: None,
            name: None,
            description: Some("desc".to_string()),
            employees_count: None,
            registered: None,
            company_type: None,
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn name_alone_is_a_selector_not_a_change() {
        let update = CompanyUpdate {
            id: None,
            name: Some("Acme".to_string()),
            description: None,
            employees_count: None,
            registered: None,
            company_type: None,
        };
        assert!(update.validate().is_ok());
        assert!(!update.has_changes());
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = CompanyUpdate {
            id: Some(Uuid::nil()),
            name: None,
            description: None,
            employees_count: Some(6),
            registered: None,
            company_type: None,
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "employees_count": 6
            })
        );
    }
}
