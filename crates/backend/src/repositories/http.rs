use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use guesthouse_core::domain::client::{Client, ClientId, ClientProfile};
use guesthouse_core::domain::draft::QuoteSubmission;
use guesthouse_core::domain::quote::{InvoiceStatus, Quote, QuoteId, QuoteSummary};

use super::{ClientRepository, QuoteRepository, RepositoryError};
use crate::wire::{
    created_id, ClientRecord, InvoiceStatusPayload, QuotePayload, QuoteRecord, WireError,
};

#[derive(Clone)]
pub struct HttpClientRepository {
    http: HttpClient,
    endpoint: String,
}

impl HttpClientRepository {
    pub fn new(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self { http, endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Clone)]
pub struct HttpQuoteRepository {
    http: HttpClient,
    endpoint: String,
}

impl HttpQuoteRepository {
    pub fn new(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self { http, endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn record_url(endpoint: &str, id: u64) -> String {
    format!("{endpoint}?id={id}")
}

async fn send(request: RequestBuilder) -> Result<Value, RepositoryError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if status == StatusCode::NOT_FOUND {
        return Err(RepositoryError::NotFound(body));
    }
    if !status.is_success() {
        return Err(RepositoryError::Status { status: status.as_u16(), body });
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|error| RepositoryError::Decode(error.to_string()))
}

async fn send_for_record<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<Option<T>, RepositoryError> {
    let body = match send(request).await {
        Ok(body) => body,
        Err(RepositoryError::NotFound(_)) => return Ok(None),
        Err(error) => return Err(error),
    };

    let record = match body {
        Value::Null | Value::Bool(false) => return Ok(None),
        Value::Array(items) if items.is_empty() => return Ok(None),
        Value::Array(mut items) => items.swap_remove(0),
        other => other,
    };
    serde_json::from_value(record)
        .map(Some)
        .map_err(|error| RepositoryError::Decode(error.to_string()))
}

/// Decodes list rows one at a time; a row that fails to decode is logged
/// and skipped so the rest of the list still reaches the caller.
fn decode_rows<R, T>(
    body: Value,
    event_name: &'static str,
    convert: impl Fn(R) -> Result<T, WireError>,
) -> Result<Vec<T>, RepositoryError>
where
    R: DeserializeOwned,
{
    let rows = match body {
        Value::Null => return Ok(Vec::new()),
        Value::Array(rows) => rows,
        other => {
            return Err(RepositoryError::Decode(format!("expected a list, got `{other}`")));
        }
    };

    let decoded = rows
        .into_iter()
        .enumerate()
        .filter_map(|(row, value)| {
            let item = serde_json::from_value::<R>(value)
                .map_err(|error| error.to_string())
                .and_then(|record| convert(record).map_err(|error| error.to_string()));
            match item {
                Ok(item) => Some(item),
                Err(reason) => {
                    warn!(event_name, row, reason = %reason, "skipping undecodable list row");
                    None
                }
            }
        })
        .collect();
    Ok(decoded)
}

fn not_found_as(what: String) -> impl FnOnce(RepositoryError) -> RepositoryError {
    move |error| match error {
        RepositoryError::NotFound(_) => RepositoryError::NotFound(what),
        other => other,
    }
}

#[async_trait]
impl ClientRepository for HttpClientRepository {
    async fn list(&self) -> Result<Vec<Client>, RepositoryError> {
        let body = send(self.http.get(&self.endpoint)).await?;
        let clients =
            decode_rows(body, "backend.clients.row_skipped", ClientRecord::into_client)?;
        debug!(count = clients.len(), endpoint = %self.endpoint, "decoded client list");
        Ok(clients)
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let request = self.http.get(record_url(&self.endpoint, id.0));
        match send_for_record::<ClientRecord>(request).await? {
            Some(record) => Ok(Some(record.into_client()?)),
            None => Ok(None),
        }
    }

    async fn create(&self, profile: &ClientProfile) -> Result<Option<ClientId>, RepositoryError> {
        let body = send(self.http.post(&self.endpoint).json(profile)).await?;
        Ok(created_id(&body, "client_id").map(ClientId))
    }

    async fn update(&self, id: ClientId, profile: &ClientProfile) -> Result<(), RepositoryError> {
        send(self.http.put(record_url(&self.endpoint, id.0)).json(profile))
            .await
            .map_err(not_found_as(format!("client {id}")))?;
        Ok(())
    }

    async fn delete(&self, id: ClientId) -> Result<(), RepositoryError> {
        send(self.http.delete(record_url(&self.endpoint, id.0)))
            .await
            .map_err(not_found_as(format!("client {id}")))?;
        Ok(())
    }
}

#[async_trait]
impl QuoteRepository for HttpQuoteRepository {
    async fn list(
        &self,
        status: Option<InvoiceStatus>,
    ) -> Result<Vec<QuoteSummary>, RepositoryError> {
        let request = match status {
            Some(status) => self.http.get(format!("{}?status={status}", self.endpoint)),
            None => self.http.get(&self.endpoint),
        };
        let body = send(request).await?;
        let quotes = decode_rows(body, "backend.quotes.row_skipped", QuoteRecord::into_summary)?;
        debug!(count = quotes.len(), endpoint = %self.endpoint, "decoded quote list");
        Ok(quotes)
    }

    async fn find_by_id(&self, id: QuoteId) -> Result<Option<Quote>, RepositoryError> {
        let request = self.http.get(record_url(&self.endpoint, id.0));
        match send_for_record::<QuoteRecord>(request).await? {
            Some(record) => Ok(Some(record.into_quote()?)),
            None => Ok(None),
        }
    }

    async fn create(
        &self,
        submission: &QuoteSubmission,
    ) -> Result<Option<QuoteId>, RepositoryError> {
        let payload = QuotePayload::from_submission(submission, Some(InvoiceStatus::Unpaid));
        let body = send(self.http.post(&self.endpoint).json(&payload)).await?;
        Ok(created_id(&body, "quote_id").map(QuoteId))
    }

    async fn update(
        &self,
        id: QuoteId,
        submission: &QuoteSubmission,
    ) -> Result<(), RepositoryError> {
        let payload = QuotePayload::from_submission(submission, None);
        send(self.http.put(record_url(&self.endpoint, id.0)).json(&payload))
            .await
            .map_err(not_found_as(format!("quote {id}")))?;
        Ok(())
    }

    async fn set_invoice_status(
        &self,
        id: QuoteId,
        status: InvoiceStatus,
    ) -> Result<(), RepositoryError> {
        let payload = InvoiceStatusPayload { invoice_status: status };
        send(self.http.put(record_url(&self.endpoint, id.0)).json(&payload))
            .await
            .map_err(not_found_as(format!("quote {id}")))?;
        Ok(())
    }

    async fn delete(&self, id: QuoteId) -> Result<(), RepositoryError> {
        send(self.http.delete(record_url(&self.endpoint, id.0)))
            .await
            .map_err(not_found_as(format!("quote {id}")))?;
        Ok(())
    }
}
