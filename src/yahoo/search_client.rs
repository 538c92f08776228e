use anyhow::Context;
use reqwest::Client;

use crate::models::SearchResult;

use super::types::SearchEnvelope;

/// Free-text symbol search against the v1 search endpoint.
///
/// Search is user-initiated and synchronous, so failures are propagated
/// with context instead of being swallowed like quote-batch failures.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub async fn search(&self, term: &str) -> anyhow::Result<Vec<SearchResult>> {
        let url = format!("{}/v1/finance/search", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[("q", term)])
            .send()
            .await
            .with_context(|| format!("search request for {term:?} failed"))?
            .error_for_status()
            .with_context(|| format!("search for {term:?} rejected upstream"))?;

        let envelope: SearchEnvelope = resp
            .json()
            .await
            .context("malformed search response")?;

        let results = envelope
            .quotes
            .into_iter()
            .filter_map(|q| {
                let symbol = q.symbol?;
                let name = q.longname.or(q.shortname).unwrap_or_else(|| symbol.clone());
                Some(SearchResult {
                    symbol,
                    name,
                    exchange: q.exch_disp,
                })
            })
            .collect();

        Ok(results)
    }
}
