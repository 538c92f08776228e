use std::env;

const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    /// Base URL for the Yahoo Finance endpoints (overridable for tests).
    pub yahoo_base_url: String,

    /// Minutes a stored quote stays fresh before a view triggers a refresh.
    pub update_period_minutes: i64,

    /// Extra attempts after a failed batch quote fetch.
    pub quote_fetch_max_retries: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            yahoo_base_url: env::var("YAHOO_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_YAHOO_BASE_URL.into()),

            update_period_minutes: env::var("UPDATE_PERIOD_MINUTES")
                .unwrap_or_else(|_| "5".into())
                .parse()
                .unwrap_or(5),
            quote_fetch_max_retries: env::var("QUOTE_FETCH_MAX_RETRIES")
                .unwrap_or_else(|_| "3".into())
                .parse()
                .unwrap_or(3),
        })
    }
}
