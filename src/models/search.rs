use serde::{Deserialize, Serialize};

/// One candidate from a free-text symbol search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub symbol: String,
    pub name: String,
    pub exchange: Option<String>,
}
