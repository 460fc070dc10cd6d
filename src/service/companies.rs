use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::company::events::CompanyEvent;
use crate::domain::company::{Company, CompanyUpdate, NewCompany, Selector};
use crate::domain::repositories::CompanyRepository;
use crate::error::AppError;
use crate::infrastructure::db::within_transaction;
use crate::service::EventPublisher;

/// Orchestrates company operations: each mutation runs inside a single
/// transaction and, once committed, is mirrored onto the event stream.
///
/// Events are a best-effort side channel. They are published strictly
/// after commit, and a failed publish never reverses the write or reaches
/// the caller; it is logged and dropped.
#[derive(Clone)]
pub struct CompanyService {
    pool: PgPool,
    repo: Arc<dyn CompanyRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl CompanyService {
    pub fn new(
        pool: PgPool,
        repo: Arc<dyn CompanyRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            pool,
            repo,
            publisher,
        }
    }

    pub async fn create_company(&self, company: NewCompany) -> Result<(), AppError> {
        within_transaction(&self.pool, |conn| self.repo.create(conn, &company)).await?;

        match CompanyEvent::created(&company) {
            Ok(event) => self.publish_event(event).await,
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize company event");
            }
        }

        Ok(())
    }

    pub async fn get_company(&self, selector: Selector) -> Result<Company, AppError> {
        within_transaction(&self.pool, |conn| self.repo.get(conn, &selector)).await
    }

    pub async fn delete_company(&self, selector: Selector) -> Result<(), AppError> {
        within_transaction(&self.pool, |conn| self.repo.delete(conn, &selector)).await?;

        self.publish_event(CompanyEvent::deleted(&selector)).await;

        Ok(())
    }

    pub async fn update_company(&self, update: CompanyUpdate) -> Result<(), AppError> {
        within_transaction(&self.pool, |conn| self.repo.update(conn, &update)).await?;

        match update.selector() {
            Ok(selector) => match CompanyEvent::updated(&update, &selector) {
                Ok(event) => self.publish_event(event).await,
                Err(err) => {
                    tracing::error!(error = %err, "failed to serialize company event");
                }
            },
            // Unreachable after a successful update; the repository has
            // already rejected a selector-less request.
            Err(err) => {
                tracing::error!(error = %err, "update committed without a selector");
            }
        }

        Ok(())
    }

    async fn publish_event(&self, event: CompanyEvent) {
        let key = event.action.as_str();
        let payload = match serde_json::to_vec(&event) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(error = %err, action = key, "failed to serialize company event");
                return;
            }
        };

        if let Err(err) = self.publisher.publish(key, payload).await {
            tracing::error!(error = %err, action = key, "failed to publish event to kafka");
        }
    }
}
