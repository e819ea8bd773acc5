//! Rate source port.
//!
//! This trait defines the interface for anything that can produce a rate table.
//! Implementations can be HTTP clients, static seed tables, mocks, etc.

use crate::domain::{CurrencyCode, RateTable};
use crate::error::FetchError;

/// Port trait for rate table providers.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Loads a complete table with every rate expressed relative to `base`.
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable, FetchError>;
}
