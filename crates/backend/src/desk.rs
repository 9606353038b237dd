//! Front-desk workflows over the booking backend: client and quote
//! maintenance, invoicing, and the searchable list views.
//!
//! Writes go through the core validation gates before any request is made.
//! List reads never fail; a backend outage degrades to an empty list plus a
//! user-facing notice.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use guesthouse_core::domain::client::{Client, ClientId, ClientProfile};
use guesthouse_core::domain::draft::QuoteDraft;
use guesthouse_core::domain::quote::{InvoiceStatus, Quote, QuoteId, QuoteSummary};
use guesthouse_core::errors::ApplicationError;
use guesthouse_core::pricing::{DeterministicQuoteRuntime, QuoteEvaluation, QuoteRuntime};
use guesthouse_core::search::{filter_clients, filter_quotes, invoices};

use crate::connection::HttpBackend;
use crate::repositories::{ClientRepository, InMemoryBackend, QuoteRepository};

pub const BACKEND_UNAVAILABLE_NOTICE: &str =
    "The booking service is temporarily unavailable. Please retry shortly.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListOutcome<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl<T> ListOutcome<T> {
    fn loaded(items: Vec<T>) -> Self {
        Self { items, notice: None }
    }

    fn unavailable() -> Self {
        Self { items: Vec::new(), notice: Some(BACKEND_UNAVAILABLE_NOTICE.to_string()) }
    }

    pub fn is_degraded(&self) -> bool {
        self.notice.is_some()
    }
}

#[derive(Clone)]
pub struct FrontDesk {
    clients: Arc<dyn ClientRepository>,
    quotes: Arc<dyn QuoteRepository>,
    runtime: Arc<dyn QuoteRuntime>,
}

impl FrontDesk {
    pub fn new(clients: Arc<dyn ClientRepository>, quotes: Arc<dyn QuoteRepository>) -> Self {
        Self { clients, quotes, runtime: Arc::new(DeterministicQuoteRuntime::default()) }
    }

    pub fn http(backend: HttpBackend) -> Self {
        Self::new(Arc::new(backend.clients), Arc::new(backend.quotes))
    }

    pub fn in_memory() -> Self {
        let backend = Arc::new(InMemoryBackend::default());
        Self::new(backend.clone(), backend)
    }

    pub async fn list_clients(&self, search: Option<&str>) -> ListOutcome<Client> {
        match self.clients.list().await {
            Ok(clients) => {
                let items = match search {
                    Some(query) => filter_clients(&clients, query).into_iter().cloned().collect(),
                    None => clients,
                };
                info!(event_name = "desk.clients.listed", count = items.len(), "clients listed");
                ListOutcome::loaded(items)
            }
            Err(error) => {
                warn!(
                    event_name = "desk.clients.list_failed",
                    error = %error,
                    "client list unavailable, showing empty list"
                );
                ListOutcome::unavailable()
            }
        }
    }

    pub async fn client(&self, id: ClientId) -> Result<Client, ApplicationError> {
        self.clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("client {id}")))
    }

    pub async fn create_client(
        &self,
        profile: &ClientProfile,
    ) -> Result<Option<ClientId>, ApplicationError> {
        profile.validate()?;
        let id = self.clients.create(profile).await?;
        info!(
            event_name = "desk.clients.created",
            client_id = ?id.map(|id| id.0),
            "client created"
        );
        Ok(id)
    }

    pub async fn update_client(
        &self,
        id: ClientId,
        profile: &ClientProfile,
    ) -> Result<(), ApplicationError> {
        profile.validate()?;
        self.clients.update(id, profile).await?;
        info!(event_name = "desk.clients.updated", client_id = %id, "client updated");
        Ok(())
    }

    pub async fn delete_client(&self, id: ClientId) -> Result<(), ApplicationError> {
        self.clients.delete(id).await?;
        info!(event_name = "desk.clients.deleted", client_id = %id, "client deleted");
        Ok(())
    }

    pub async fn list_quotes(
        &self,
        status: Option<InvoiceStatus>,
        search: Option<&str>,
    ) -> ListOutcome<QuoteSummary> {
        match self.quotes.list(status).await {
            Ok(quotes) => {
                let quotes = match status {
                    Some(status) => {
                        quotes.into_iter().filter(|quote| quote.invoice_status == status).collect()
                    }
                    None => quotes,
                };
                let items = match search {
                    Some(query) => filter_quotes(&quotes, query).into_iter().cloned().collect(),
                    None => quotes,
                };
                info!(event_name = "desk.quotes.listed", count = items.len(), "quotes listed");
                ListOutcome::loaded(items)
            }
            Err(error) => {
                warn!(
                    event_name = "desk.quotes.list_failed",
                    error = %error,
                    "quote list unavailable, showing empty list"
                );
                ListOutcome::unavailable()
            }
        }
    }

    /// Invoices are quotes already advanced to `Invoiced`.
    pub async fn list_invoices(&self, search: Option<&str>) -> ListOutcome<QuoteSummary> {
        let listed = self.list_quotes(Some(InvoiceStatus::Invoiced), search).await;
        if listed.is_degraded() {
            return listed;
        }
        ListOutcome::loaded(invoices(&listed.items).into_iter().cloned().collect())
    }

    pub async fn quote(&self, id: QuoteId) -> Result<Quote, ApplicationError> {
        self.quotes
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("quote {id}")))
    }

    pub fn price(&self, draft: &QuoteDraft) -> QuoteEvaluation {
        self.runtime.evaluate(draft.terms())
    }

    pub async fn create_quote(
        &self,
        draft: QuoteDraft,
    ) -> Result<Option<QuoteId>, ApplicationError> {
        let submission = draft.into_submission()?;
        let id = self.quotes.create(&submission).await?;
        info!(
            event_name = "desk.quotes.saved",
            quote_id = ?id.map(|id| id.0),
            client_id = %submission.client_id(),
            total = %submission.totals().total,
            "quote created"
        );
        Ok(id)
    }

    /// Re-prices and re-validates the edited draft before replacing the stored quote.
    pub async fn update_quote(
        &self,
        id: QuoteId,
        draft: QuoteDraft,
    ) -> Result<(), ApplicationError> {
        self.quote(id).await?;
        let submission = draft.into_submission()?;
        self.quotes.update(id, &submission).await?;
        info!(
            event_name = "desk.quotes.updated",
            quote_id = %id,
            total = %submission.totals().total,
            "quote updated"
        );
        Ok(())
    }

    pub async fn invoice_quote(&self, id: QuoteId) -> Result<Quote, ApplicationError> {
        let mut quote = self.quote(id).await?;
        quote.transition_to(InvoiceStatus::Invoiced)?;
        self.quotes.set_invoice_status(id, InvoiceStatus::Invoiced).await?;
        info!(
            event_name = "desk.quotes.invoiced",
            quote_id = %id,
            quote_number = quote.quote_number.as_deref().unwrap_or("unknown"),
            "quote invoiced"
        );
        Ok(quote)
    }

    pub async fn delete_quote(&self, id: QuoteId) -> Result<(), ApplicationError> {
        self.quotes.delete(id).await?;
        info!(event_name = "desk.quotes.deleted", quote_id = %id, "quote deleted");
        Ok(())
    }
}
