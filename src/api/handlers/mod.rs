pub mod charts;
pub mod health;
pub mod metrics;
pub mod positions;
pub mod refresh;
pub mod search;
