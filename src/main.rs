use std::sync::Arc;

use stockpanel::config::AppConfig;
use stockpanel::services::refresh::RefreshService;
use stockpanel::yahoo::{ChartClient, QuoteClient, SearchClient};
use stockpanel::{api, db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database ready");

    let metrics_handle = metrics::init_metrics();

    let http = reqwest::Client::new();
    let quotes = Arc::new(QuoteClient::new(http.clone(), config.yahoo_base_url.clone()));
    let charts = Arc::new(ChartClient::new(http.clone(), config.yahoo_base_url.clone()));
    let search = Arc::new(SearchClient::new(http, config.yahoo_base_url.clone()));

    let refresh = Arc::new(RefreshService::new(
        pool.clone(),
        quotes,
        config.update_period_minutes,
        config.quote_fetch_max_retries,
    ));

    tracing::info!(
        update_period_minutes = config.update_period_minutes,
        "Stock panel configured"
    );

    let state = AppState {
        db: pool,
        config,
        refresh,
        charts,
        search,
        metrics_handle,
    };
    let router = api::router::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
