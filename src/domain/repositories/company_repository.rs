use async_trait::async_trait;
use sqlx::PgConnection;

use crate::domain::company::{Company, CompanyUpdate, NewCompany, Selector};
use crate::error::AppError;

/// Persistence contract for the company entity.
///
/// Every method runs against an active transaction handle supplied by the
/// caller; implementations never begin or commit transactions themselves.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Insert a full row. A duplicate `name` is a `BadRequest`.
    async fn create(&self, conn: &mut PgConnection, company: &NewCompany) -> Result<(), AppError>;

    /// Fetch one company by selector. Zero rows is a `NotFound`.
    async fn get(&self, conn: &mut PgConnection, selector: &Selector) -> Result<Company, AppError>;

    /// Delete one company by selector. Zero rows affected is a `NotFound`.
    async fn delete(&self, conn: &mut PgConnection, selector: &Selector) -> Result<(), AppError>;

    /// Apply a sparse update, always bumping `updated_at`. An update with
    /// no mutable fields is a `BadRequest`; zero rows affected is a
    /// `NotFound`.
    async fn update(&self, conn: &mut PgConnection, update: &CompanyUpdate) -> Result<(), AppError>;
}
