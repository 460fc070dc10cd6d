// Service layer: orchestrates transactions, repositories, and the event
// stream for each operation.

pub mod companies;

use async_trait::async_trait;

use crate::error::BoxError;

pub use companies::CompanyService;

/// Sink for mutation events.
///
/// `publish` blocks until the send is acknowledged or fails, and returns
/// the underlying transport error untranslated; callers decide how to
/// treat failures.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, key: &str, payload: Vec<u8>) -> Result<(), BoxError>;
}
