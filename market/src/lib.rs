pub mod errors;
pub mod feed;
pub mod indicator;
pub mod pipeline;
pub mod results;
pub mod rolling_window;
pub mod signal;
pub mod types;

pub use errors::MarketError;
pub use feed::{BarFeed, InstrumentUniverse};
pub use pipeline::{IndicatorFrame, IndicatorRow, compute_indicators};
pub use results::{ScanEntry, ScanResultSet};
pub use signal::{Signal, SignalRules, classify};
