//! Domain types - pure business entities with no IO dependencies.

mod currency;
mod fetch_state;
mod rate_table;

pub use currency::CurrencyCode;
pub use fetch_state::FetchState;
pub use rate_table::RateTable;
