use async_trait::async_trait;
use thiserror::Error;

use guesthouse_core::domain::client::{Client, ClientId, ClientProfile};
use guesthouse_core::domain::draft::QuoteSubmission;
use guesthouse_core::domain::quote::{InvoiceStatus, Quote, QuoteId, QuoteSummary};
use guesthouse_core::errors::ApplicationError;

pub mod http;
pub mod memory;

pub use http::{HttpClientRepository, HttpQuoteRepository};
pub use memory::InMemoryBackend;

use crate::wire::WireError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl From<WireError> for RepositoryError {
    fn from(error: WireError) -> Self {
        Self::Decode(error.to_string())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(what) => Self::NotFound(what),
            other => Self::Backend(other.to_string()),
        }
    }
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Client>, RepositoryError>;
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError>;
    /// Returns the new id when the backend reports one.
    async fn create(&self, profile: &ClientProfile) -> Result<Option<ClientId>, RepositoryError>;
    async fn update(&self, id: ClientId, profile: &ClientProfile) -> Result<(), RepositoryError>;
    async fn delete(&self, id: ClientId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn list(
        &self,
        status: Option<InvoiceStatus>,
    ) -> Result<Vec<QuoteSummary>, RepositoryError>;
    async fn find_by_id(&self, id: QuoteId) -> Result<Option<Quote>, RepositoryError>;
    async fn create(
        &self,
        submission: &QuoteSubmission,
    ) -> Result<Option<QuoteId>, RepositoryError>;
    async fn update(
        &self,
        id: QuoteId,
        submission: &QuoteSubmission,
    ) -> Result<(), RepositoryError>;
    async fn set_invoice_status(
        &self,
        id: QuoteId,
        status: InvoiceStatus,
    ) -> Result<(), RepositoryError>;
    async fn delete(&self, id: QuoteId) -> Result<(), RepositoryError>;
}
