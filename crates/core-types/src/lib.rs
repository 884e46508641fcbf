pub mod enums;
pub mod error;
pub mod series;
pub mod snapshot;
pub mod table;

// Re-export the core types to provide a clean public API.
pub use enums::{CurrencyPair, MissingValuePolicy, columns};
pub use error::CoreError;
pub use series::TimeSeries;
pub use snapshot::MarketSnapshot;
pub use table::AlignedTable;
