pub mod chart;
pub mod position;
pub mod quote;
pub mod search;

pub use chart::{ChartRange, ChartSeries, PricePoint, VolumePoint};
pub use position::Position;
pub use quote::Quote;
pub use search::SearchResult;
