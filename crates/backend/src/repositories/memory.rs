use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use guesthouse_core::domain::client::{Client, ClientId, ClientProfile};
use guesthouse_core::domain::draft::QuoteSubmission;
use guesthouse_core::domain::quote::{InvoiceStatus, Quote, QuoteId, QuoteSummary};

use super::{ClientRepository, QuoteRepository, RepositoryError};

/// Holds clients and quotes side by side so quote listings can join the
/// client's name the way the booking backend does.
pub struct InMemoryBackend {
    clients: RwLock<BTreeMap<ClientId, ClientProfile>>,
    quotes: RwLock<BTreeMap<QuoteId, Quote>>,
    next_client_id: AtomicU64,
    next_quote_id: AtomicU64,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self {
            clients: RwLock::new(BTreeMap::new()),
            quotes: RwLock::new(BTreeMap::new()),
            next_client_id: AtomicU64::new(1),
            next_quote_id: AtomicU64::new(1),
        }
    }
}

impl InMemoryBackend {
    fn stored_quote(id: QuoteId, submission: &QuoteSubmission, status: InvoiceStatus) -> Quote {
        Quote {
            id,
            quote_number: Some(format!("Q-{:05}", id.0)),
            terms: submission.terms().clone(),
            totals: *submission.totals(),
            invoice_status: status,
        }
    }
}

#[async_trait::async_trait]
impl ClientRepository for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Client>, RepositoryError> {
        let clients = self.clients.read().await;
        Ok(clients
            .iter()
            .map(|(id, profile)| Client { id: *id, profile: profile.clone() })
            .collect())
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let clients = self.clients.read().await;
        Ok(clients.get(&id).map(|profile| Client { id, profile: profile.clone() }))
    }

    async fn create(&self, profile: &ClientProfile) -> Result<Option<ClientId>, RepositoryError> {
        let id = ClientId(self.next_client_id.fetch_add(1, Ordering::Relaxed));
        let mut clients = self.clients.write().await;
        clients.insert(id, profile.clone());
        Ok(Some(id))
    }

    async fn update(&self, id: ClientId, profile: &ClientProfile) -> Result<(), RepositoryError> {
        let mut clients = self.clients.write().await;
        match clients.get_mut(&id) {
            Some(stored) => {
                *stored = profile.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(format!("client {id}"))),
        }
    }

    async fn delete(&self, id: ClientId) -> Result<(), RepositoryError> {
        let mut clients = self.clients.write().await;
        clients
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(format!("client {id}")))
    }
}

#[async_trait::async_trait]
impl QuoteRepository for InMemoryBackend {
    async fn list(
        &self,
        status: Option<InvoiceStatus>,
    ) -> Result<Vec<QuoteSummary>, RepositoryError> {
        let quotes = self.quotes.read().await;
        let clients = self.clients.read().await;

        Ok(quotes
            .values()
            .filter(|quote| status.map_or(true, |status| quote.invoice_status == status))
            .map(|quote| {
                let profile = quote.terms.client_id.and_then(|id| clients.get(&id));
                QuoteSummary {
                    id: quote.id,
                    quote_number: quote.quote_number.clone().unwrap_or_default(),
                    first_name: profile.map(|p| p.first_name.clone()).unwrap_or_default(),
                    last_name: profile.and_then(|p| p.last_name.clone()),
                    number_of_guests: quote.terms.number_of_guests,
                    total: Some(quote.totals.total),
                    invoice_status: quote.invoice_status,
                }
            })
            .collect())
    }

    async fn find_by_id(&self, id: QuoteId) -> Result<Option<Quote>, RepositoryError> {
        let quotes = self.quotes.read().await;
        Ok(quotes.get(&id).cloned())
    }

    async fn create(
        &self,
        submission: &QuoteSubmission,
    ) -> Result<Option<QuoteId>, RepositoryError> {
        let id = QuoteId(self.next_quote_id.fetch_add(1, Ordering::Relaxed));
        let mut quotes = self.quotes.write().await;
        quotes.insert(id, Self::stored_quote(id, submission, InvoiceStatus::Unpaid));
        Ok(Some(id))
    }

    async fn update(
        &self,
        id: QuoteId,
        submission: &QuoteSubmission,
    ) -> Result<(), RepositoryError> {
        let mut quotes = self.quotes.write().await;
        let stored =
            quotes.get_mut(&id).ok_or_else(|| RepositoryError::NotFound(format!("quote {id}")))?;
        let mut replacement = Self::stored_quote(id, submission, stored.invoice_status);
        replacement.quote_number = stored.quote_number.take();
        *stored = replacement;
        Ok(())
    }

    async fn set_invoice_status(
        &self,
        id: QuoteId,
        status: InvoiceStatus,
    ) -> Result<(), RepositoryError> {
        let mut quotes = self.quotes.write().await;
        let stored =
            quotes.get_mut(&id).ok_or_else(|| RepositoryError::NotFound(format!("quote {id}")))?;
        stored.invoice_status = status;
        Ok(())
    }

    async fn delete(&self, id: QuoteId) -> Result<(), RepositoryError> {
        let mut quotes = self.quotes.write().await;
        quotes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(format!("quote {id}")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use guesthouse_core::domain::client::{ClientId, ClientProfile};
    use guesthouse_core::domain::draft::QuoteDraft;
    use guesthouse_core::domain::quote::InvoiceStatus;

    use crate::repositories::{
        ClientRepository, InMemoryBackend, QuoteRepository, RepositoryError,
    };

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).expect("valid date")
    }

    fn profile(first: &str, last: &str) -> ClientProfile {
        ClientProfile {
            first_name: first.to_string(),
            last_name: Some(last.to_string()),
            email_address: format!("{}@example.co.za", first.to_lowercase()),
            ..ClientProfile::default()
        }
    }

    #[tokio::test]
    async fn client_round_trip_and_delete() {
        let backend = InMemoryBackend::default();
        let id = ClientRepository::create(&backend, &profile("Zanele", "Dube"))
            .await
            .expect("create client")
            .expect("memory backend assigns ids");

        let found = ClientRepository::find_by_id(&backend, id).await.expect("find client");
        assert_eq!(found.map(|client| client.full_name()), Some("Zanele Dube".to_string()));

        ClientRepository::delete(&backend, id).await.expect("delete client");
        let missing = ClientRepository::delete(&backend, id).await;
        assert!(matches!(missing, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn quote_listing_joins_client_name_and_filters_status() {
        let backend = InMemoryBackend::default();
        let client_id = ClientRepository::create(&backend, &profile("Musa", "Zulu"))
            .await
            .expect("create client")
            .unwrap_or(ClientId(1));

        let submission = QuoteDraft::default()
            .with_client(client_id)
            .with_check_in(Some(date(1)))
            .with_check_out(Some(date(3)))
            .with_beds(1)
            .with_guests(1)
            .with_unit_bed_cost(Decimal::new(600, 0))
            .into_submission()
            .expect("valid submission");

        let first = QuoteRepository::create(&backend, &submission)
            .await
            .expect("create quote")
            .expect("memory backend assigns ids");
        QuoteRepository::create(&backend, &submission).await.expect("create second quote");
        QuoteRepository::set_invoice_status(&backend, first, InvoiceStatus::Invoiced)
            .await
            .expect("invoice quote");

        let all = QuoteRepository::list(&backend, None).await.expect("list quotes");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].client_name(), "Musa Zulu");
        assert_eq!(all[0].quote_number, "Q-00001");
        assert_eq!(all[0].total, Some(Decimal::new(1380, 0)));

        let invoiced = QuoteRepository::list(&backend, Some(InvoiceStatus::Invoiced))
            .await
            .expect("list invoices");
        assert_eq!(invoiced.len(), 1);
        assert_eq!(invoiced[0].id, first);
    }

    #[tokio::test]
    async fn update_keeps_number_and_status() {
        let backend = InMemoryBackend::default();
        let draft = QuoteDraft::default()
            .with_client(ClientId(1))
            .with_check_in(Some(date(1)))
            .with_check_out(Some(date(2)))
            .with_beds(1)
            .with_guests(1)
            .with_unit_bed_cost(Decimal::new(500, 0));
        let id = QuoteRepository::create(&backend, &draft.clone().into_submission().expect("valid"))
            .await
            .expect("create quote")
            .expect("memory backend assigns ids");
        QuoteRepository::set_invoice_status(&backend, id, InvoiceStatus::Invoiced)
            .await
            .expect("invoice quote");

        let edited = draft.with_beds(3).into_submission().expect("valid");
        QuoteRepository::update(&backend, id, &edited).await.expect("update quote");

        let stored = QuoteRepository::find_by_id(&backend, id)
            .await
            .expect("find quote")
            .expect("quote exists");
        assert_eq!(stored.terms.number_of_beds, 3);
        assert_eq!(stored.quote_number.as_deref(), Some("Q-00001"));
        assert_eq!(stored.invoice_status, InvoiceStatus::Invoiced);
    }
}
