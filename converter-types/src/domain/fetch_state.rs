//! Lifecycle of the asynchronous rate load.

use std::sync::Arc;

use super::RateTable;

/// Status of the most recent rate fetch.
///
/// `Idle -> Loading -> {Ready, Failed}`; a new fetch may start from any state.
#[derive(Debug, Clone, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Ready(Arc<RateTable>),
    Failed(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Human-readable reason of the last failure, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}
