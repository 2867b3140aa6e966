//! Pure domain types.

mod conversion;
mod rate_table;

pub use conversion::{ConversionId, ConversionRecord, NewConversion};
pub use rate_table::RateTable;
