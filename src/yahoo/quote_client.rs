use async_trait::async_trait;
use reqwest::Client;

use crate::models::Quote;

use super::types::QuoteEnvelope;
use super::{QuoteSource, YahooError};

/// Batched quote lookups against the v7 quote endpoint.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: Client,
    base_url: String,
}

impl QuoteClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for QuoteClient {
    async fn quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, YahooError> {
        let url = format!("{}/v7/finance/quote", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("symbols", symbols.join(","))])
            .send()
            .await?
            .error_for_status()?;

        let envelope: QuoteEnvelope = resp.json().await?;
        Ok(envelope
            .quote_response
            .result
            .into_iter()
            .map(Quote::from)
            .collect())
    }
}
