pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod services;
pub mod yahoo;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::refresh::RefreshService;
use crate::yahoo::{ChartClient, SearchClient};

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub refresh: Arc<RefreshService>,
    pub charts: Arc<ChartClient>,
    pub search: Arc<SearchClient>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
