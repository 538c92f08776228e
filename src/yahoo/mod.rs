pub mod chart_client;
pub mod quote_client;
pub mod search_client;
pub mod types;

pub use chart_client::ChartClient;
pub use quote_client::QuoteClient;
pub use search_client::SearchClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Quote;

#[derive(Debug, Error)]
pub enum YahooError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("missing data in response: {0}")]
    MissingData(String),
}

/// Batched quote lookup. The refresh workflow talks to this trait so tests
/// can substitute a scripted source for the live API.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// One attempt at fetching quotes for a batch of symbols. Retry policy
    /// lives in the caller.
    async fn quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, YahooError>;
}
