use std::time::Duration;

use reqwest::Client as HttpClient;

use guesthouse_core::config::BackendConfig;

use crate::repositories::{HttpClientRepository, HttpQuoteRepository, RepositoryError};

/// Repositories bound to one booking backend, sharing a connection pool.
#[derive(Clone)]
pub struct HttpBackend {
    pub clients: HttpClientRepository,
    pub quotes: HttpQuoteRepository,
    http: HttpClient,
}

pub fn connect(config: &BackendConfig) -> Result<HttpBackend, RepositoryError> {
    let http = HttpClient::builder()
        .timeout(Duration::from_secs(config.timeout_secs.max(1)))
        .user_agent(concat!("guesthouse/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(HttpBackend {
        clients: HttpClientRepository::new(http.clone(), config.clients_url()),
        quotes: HttpQuoteRepository::new(http.clone(), config.quotes_url()),
        http,
    })
}

impl HttpBackend {
    /// Issues a client list request and returns the response status code.
    pub async fn probe(&self) -> Result<u16, RepositoryError> {
        let response = self.http.get(self.clients.endpoint()).send().await?;
        Ok(response.status().as_u16())
    }
}
