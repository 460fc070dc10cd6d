use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::middleware::AdminClaims;
use crate::api::AppState;
use crate::domain::company::{Company, CompanyType, CompanyUpdate, NewCompany, Selector};
use crate::error::AppError;

/// Request body for creating a company.
///
/// The shape is fixed: unknown fields are rejected, and the field
/// constraints (name length, description length, employees minimum, type
/// enum) are enforced before the service is called.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCompanyRequest {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub employees_count: i32,
    pub registered: bool,
    #[serde(rename = "type")]
    pub company_type: CompanyType,
}

impl CreateCompanyRequest {
    fn try_into_domain(self) -> Result<NewCompany, AppError> {
        let company = NewCompany {
            id: self.id,
            name: self.name,
            description: self.description,
            employees_count: self.employees_count,
            registered: self.registered,
            company_type: self.company_type,
        };
        company.validate()?;
        Ok(company)
    }
}

/// Request body for patching a company: a sparse field set keyed by
/// exactly one of `id`/`name`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchCompanyRequest {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub employees_count: Option<i32>,
    pub registered: Option<bool>,
    #[serde(rename = "type")]
    pub company_type: Option<CompanyType>,
}

impl PatchCompanyRequest {
    fn try_into_domain(self) -> Result<CompanyUpdate, AppError> {
        let update = CompanyUpdate {
            id: self.id,
            name: self.name,
            description: self.description,
            employees_count: self.employees_count,
            registered: self.registered,
            company_type: self.company_type,
        };
        update.validate()?;
        if update.name.is_none() && !update.has_changes() {
            return Err(AppError::bad_request("no fields to update"));
        }
        Ok(update)
    }
}

/// Selector query parameters for GET and DELETE.
#[derive(Debug, Deserialize)]
pub struct SelectorQuery {
    pub uuid: Option<String>,
    pub name: Option<String>,
}

impl SelectorQuery {
    fn try_into_selector(self) -> Result<Selector, AppError> {
        let id = match self.uuid.as_deref().filter(|raw| !raw.is_empty()) {
            Some(raw) => Some(
                Uuid::parse_str(raw).map_err(|_| AppError::bad_request("invalid uuid param"))?,
            ),
            None => None,
        };

        Selector::new(id, self.name)
    }
}

/// Company representation served to clients. Timestamps stay internal.
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub employees_count: i32,
    pub registered: bool,
    #[serde(rename = "type")]
    pub company_type: CompanyType,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            description: company.description,
            employees_count: company.employees_count,
            registered: company.registered,
            company_type: company.company_type,
        }
    }
}

/// Create a new company
///
/// POST /companies (admin)
pub async fn create_company(
    State(state): State<AppState>,
    _admin: AdminClaims,
    payload: Result<Json<CreateCompanyRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload.map_err(|err| AppError::bad_request(err.body_text()))?;
    let company = request.try_into_domain()?;

    state.service.create_company(company).await?;

    Ok(StatusCode::CREATED)
}

/// Fetch a company by uuid or name
///
/// GET /companies?uuid=&name=
pub async fn get_company(
    State(state): State<AppState>,
    Query(params): Query<SelectorQuery>,
) -> Result<Json<CompanyResponse>, AppError> {
    let selector = params.try_into_selector()?;

    let company = state.service.get_company(selector).await?;

    Ok(Json(CompanyResponse::from(company)))
}

/// Delete a company by uuid or name
///
/// DELETE /companies?uuid=&name= (admin)
pub async fn delete_company(
    State(state): State<AppState>,
    _admin: AdminClaims,
    Query(params): Query<SelectorQuery>,
) -> Result<StatusCode, AppError> {
    let selector = params.try_into_selector()?;

    state.service.delete_company(selector).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Patch a company: update only the supplied fields
///
/// PATCH /companies (admin)
pub async fn update_company(
    State(state): State<AppState>,
    _admin: AdminClaims,
    payload: Result<Json<PatchCompanyRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload.map_err(|err| AppError::bad_request(err.body_text()))?;
    let update = request.try_into_domain()?;

    state.service.update_company(update).await?;

    Ok(StatusCode::OK)
}
