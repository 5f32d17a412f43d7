pub mod clock;
pub mod counters;
pub mod engine;
pub mod types;

pub use clock::{Clock, SystemClock, delay_until_next_boundary, next_boundary};
pub use counters::ScanCounters;
pub use engine::{CycleOutcome, ScanEngine};
pub use types::{ScanConfig, UniverseFilter};
