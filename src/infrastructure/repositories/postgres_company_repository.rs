use async_trait::async_trait;
use sqlx::{PgConnection, Postgres, QueryBuilder};

use crate::domain::company::{Company, CompanyUpdate, NewCompany, Selector};
use crate::domain::repositories::CompanyRepository;
use crate::error::AppError;

/// PostgreSQL implementation of [`CompanyRepository`].
///
/// Holds no connection of its own; every call runs on the transaction
/// handle passed in by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresCompanyRepository;

impl PostgresCompanyRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn create(&self, conn: &mut PgConnection, company: &NewCompany) -> Result<(), AppError> {
        let result = sqlx::query(
            "INSERT INTO companies (id, name, description, employees_count, registered, type, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())",
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.employees_count)
        .bind(company.registered)
        .bind(company.company_type)
        .execute(&mut *conn)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::bad_request("duplicate key violation: unique constraint failed"),
            ),
            Err(err) => Err(AppError::internal("failed to create company", err)),
        }
    }

    async fn get(&self, conn: &mut PgConnection, selector: &Selector) -> Result<Company, AppError> {
        let row = match selector {
            Selector::ById(id) => {
                sqlx::query_as::<_, Company>(
                    "SELECT id, name, description, employees_count, registered, type, created_at, updated_at \
                     FROM companies WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&mut *conn)
                .await
            }
            Selector::ByName(name) => {
                sqlx::query_as::<_, Company>(
                    "SELECT id, name, description, employees_count, registered, type, created_at, updated_at \
                     FROM companies WHERE name = $1",
                )
                .bind(name)
                .fetch_optional(&mut *conn)
                .await
            }
        }
        .map_err(|err| AppError::internal("failed to query company", err))?;

        row.ok_or_else(|| AppError::not_found("company not found"))
    }

    async fn delete(&self, conn: &mut PgConnection, selector: &Selector) -> Result<(), AppError> {
        let result = match selector {
            Selector::ById(id) => {
                sqlx::query("DELETE FROM companies WHERE id = $1")
                    .bind(id)
                    .execute(&mut *conn)
                    .await
            }
            Selector::ByName(name) => {
                sqlx::query("DELETE FROM companies WHERE name = $1")
                    .bind(name)
                    .execute(&mut *conn)
                    .await
            }
        }
        .map_err(|err| AppError::internal("failed to delete company", err))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("company not found"));
        }

        Ok(())
    }

    async fn update(&self, conn: &mut PgConnection, update: &CompanyUpdate) -> Result<(), AppError> {
        if !update.has_changes() {
            return Err(AppError::bad_request("no fields to update"));
        }
        let selector = update.selector()?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE companies SET ");
        let mut fields = builder.separated(", ");
        if let Some(description) = &update.description {
            fields.push("description = ").push_bind_unseparated(description);
        }
        if let Some(employees_count) = update.employees_count {
            fields
                .push("employees_count = ")
                .push_bind_unseparated(employees_count);
        }
        if let Some(registered) = update.registered {
            fields.push("registered = ").push_bind_unseparated(registered);
        }
        if let Some(company_type) = update.company_type {
            fields.push("type = ").push_bind_unseparated(company_type);
        }
        fields.push("updated_at = NOW()");

        match &selector {
            Selector::ById(id) => {
                builder.push(" WHERE id = ").push_bind(*id);
            }
            Selector::ByName(name) => {
                builder.push(" WHERE name = ").push_bind(name.clone());
            }
        }

        let result = builder
            .build()
            .execute(&mut *conn)
            .await
            .map_err(|err| AppError::internal("failed to update company", err))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("company not found"));
        }

        Ok(())
    }
}
