use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use metrics::{counter, gauge};
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};

use crate::db::position_repo::{self, QuoteUpdate};
use crate::models::Quote;
use crate::yahoo::QuoteSource;

/// True when the stored quotes are old enough to warrant a refresh.
/// Boundary inclusive: exactly `period_minutes` elapsed counts as due.
pub fn is_refresh_due(
    last_update: DateTime<Utc>,
    now: DateTime<Utc>,
    period_minutes: i64,
) -> bool {
    now - last_update >= Duration::minutes(period_minutes)
}

/// Fetch quotes for a batch of symbols, keyed by symbol.
///
/// An empty batch returns immediately without touching the network. A
/// transient failure retries the whole batch up to `max_retries` more
/// times; when every attempt fails the result is an empty map, never an
/// error. Callers treat a missing symbol as "skip update", so a temporary
/// outage degrades to stale data instead of a failed request.
pub async fn fetch_quotes(
    source: &dyn QuoteSource,
    symbols: &[String],
    max_retries: u32,
) -> HashMap<String, Quote> {
    if symbols.is_empty() {
        return HashMap::new();
    }

    for attempt in 0..=max_retries {
        counter!("quote_fetch_attempts_total").increment(1);

        match source.quotes(symbols).await {
            Ok(quotes) => {
                return quotes
                    .into_iter()
                    .map(|q| (q.symbol.clone(), q))
                    .collect();
            }
            Err(e) => {
                counter!("quote_fetch_failures_total").increment(1);
                tracing::warn!(
                    error = %e,
                    attempt = attempt + 1,
                    max_attempts = max_retries + 1,
                    "Quote fetch failed"
                );
            }
        }
    }

    tracing::warn!(
        symbol_count = symbols.len(),
        "Quote fetch exhausted all attempts, keeping stale data"
    );
    HashMap::new()
}

/// Orchestrates the quote refresh cycle: staleness check, batched fetch,
/// persistence.
pub struct RefreshService {
    pool: PgPool,
    source: Arc<dyn QuoteSource>,
    update_period_minutes: i64,
    max_retries: u32,
    // Single-flight: concurrent view requests must not trigger redundant
    // fetches and writes.
    refresh_lock: Mutex<()>,
}

impl RefreshService {
    pub fn new(
        pool: PgPool,
        source: Arc<dyn QuoteSource>,
        update_period_minutes: i64,
        max_retries: u32,
    ) -> Self {
        Self {
            pool,
            source,
            update_period_minutes,
            max_retries,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Refresh only when the policy says stored quotes are stale.
    /// Returns whether a refresh ran.
    ///
    /// The staleness check runs under the refresh lock: a request that
    /// waited out another refresh re-reads `updated_at` and sees the fresh
    /// data, so it does not repeat the fetch.
    pub async fn refresh_if_due(&self) -> anyhow::Result<bool> {
        let guard = self.refresh_lock.lock().await;

        let last_update = position_repo::get_last_update(&self.pool).await?;
        if !is_refresh_due(last_update, Utc::now(), self.update_period_minutes) {
            return Ok(false);
        }

        self.run_refresh(guard).await?;
        Ok(true)
    }

    /// Fetch fresh quotes for every tracked symbol and persist them in one
    /// batch. Symbols absent from the fetch result keep their previous
    /// data, silently. Returns the number of positions updated.
    pub async fn refresh_all(&self) -> anyhow::Result<u64> {
        let guard = self.refresh_lock.lock().await;
        self.run_refresh(guard).await
    }

    async fn run_refresh(&self, _guard: MutexGuard<'_, ()>) -> anyhow::Result<u64> {
        counter!("refresh_runs_total").increment(1);

        let positions = position_repo::get_all(&self.pool).await?;
        gauge!("tracked_positions").set(positions.len() as f64);

        let symbols: Vec<String> = positions.iter().map(|p| p.symbol.clone()).collect();
        let quotes = fetch_quotes(self.source.as_ref(), &symbols, self.max_retries).await;

        let updates: Vec<QuoteUpdate> = positions
            .iter()
            .filter_map(|position| {
                let quote = quotes.get(&position.symbol)?;
                Some(QuoteUpdate {
                    id: position.id,
                    current_price: quote.current_price(),
                    current_change: quote.current_change(),
                })
            })
            .collect();

        let updated = position_repo::apply_quotes(&self.pool, &updates, Utc::now()).await?;
        counter!("positions_updated_total").increment(updated);

        tracing::info!(
            tracked = positions.len(),
            updated = updated,
            "Refresh cycle complete"
        );
        Ok(updated)
    }

    /// Single-symbol lookup used to pre-fill a new position from the quote
    /// API. Shares the batch fetcher, so it inherits its retry and
    /// fail-soft behavior.
    pub async fn lookup(&self, symbol: &str) -> Option<Quote> {
        let symbols = vec![symbol.to_string()];
        let mut quotes = fetch_quotes(self.source.as_ref(), &symbols, self.max_retries).await;
        quotes.remove(symbol)
    }
}
