//! Converter Application Service
//!
//! Orchestrates the rate fetch lifecycle, the rate repository and the user
//! selection. Contains NO infrastructure logic - the rate source is injected.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use converter_types::{
    AppError, Conversion, ConvertError, CurrencyCode, DisplayState, FetchError, FetchState,
    PopularConversion, RateSource, RateTable, RatesResponse,
};

use crate::calculator;
use crate::repository::RateRepository;
use crate::selection::{SelectionState, convert_text};

/// Fixed currency pair the selection resets to on every table load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterSettings {
    /// Base currency requested from the rate source
    pub base_currency: CurrencyCode,
    /// Default "to" currency after a load
    pub secondary_currency: CurrencyCode,
}

impl ConverterSettings {
    pub fn new(base_currency: CurrencyCode, secondary_currency: CurrencyCode) -> Self {
        Self {
            base_currency,
            secondary_currency,
        }
    }
}

#[derive(Debug, Default)]
struct FetchTracker {
    state: FetchState,
    latest_id: u64,
}

/// Failure reason recorded when a fetch is dropped before it settles.
pub const CANCELLED: &str = "fetch cancelled";

/// In-flight fetch; settles as cancelled if dropped before `settle`.
struct PendingFetch<'a, S: RateSource> {
    service: &'a ConverterService<S>,
    fetch_id: u64,
    settled: bool,
}

impl<S: RateSource> PendingFetch<'_, S> {
    fn settle(mut self, result: Result<RateTable, FetchError>) -> Result<(), FetchError> {
        self.settled = true;
        self.service.finish_fetch(self.fetch_id, result)
    }
}

impl<S: RateSource> Drop for PendingFetch<'_, S> {
    fn drop(&mut self) {
        if !self.settled {
            self.service.cancel_fetch(self.fetch_id);
        }
    }
}

/// Application service for currency conversion.
///
/// Generic over `S: RateSource` - the adapter is injected at compile time.
/// Lock order is fetch tracker, then selection; neither is held across an
/// `.await`.
pub struct ConverterService<S: RateSource> {
    source: S,
    settings: ConverterSettings,
    repository: RateRepository,
    fetch: Mutex<FetchTracker>,
    selection: Mutex<SelectionState>,
}

impl<S: RateSource> ConverterService<S> {
    /// Creates a new service. No rates are loaded until the first refresh.
    pub fn new(source: S, settings: ConverterSettings) -> Self {
        let selection = SelectionState::new(
            settings.base_currency.clone(),
            settings.secondary_currency.clone(),
        );
        Self {
            source,
            settings,
            repository: RateRepository::new(),
            fetch: Mutex::new(FetchTracker::default()),
            selection: Mutex::new(selection),
        }
    }

    pub fn settings(&self) -> &ConverterSettings {
        &self.settings
    }

    pub fn repository(&self) -> &RateRepository {
        &self.repository
    }

    pub fn fetch_state(&self) -> FetchState {
        self.lock_fetch().state.clone()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Fetch Lifecycle
    // ─────────────────────────────────────────────────────────────────────────────

    /// Loads a fresh table from the rate source.
    ///
    /// On success the repository is replaced and the selection reset to the
    /// default pair; on failure the previous table stays active and the
    /// reason is recorded. If another refresh started meanwhile, this result
    /// is discarded and the newer fetch decides the final state.
    ///
    /// Dropping the returned future mid-fetch settles it as failed, so
    /// `Loading` never outlives its caller.
    #[tracing::instrument(skip(self), fields(source = self.source.name(), base = %self.settings.base_currency))]
    pub async fn request_rate_refresh(&self) -> Result<(), FetchError> {
        let guard = PendingFetch {
            service: self,
            fetch_id: self.begin_fetch(),
            settled: false,
        };
        let result = self.source.fetch_rates(&self.settings.base_currency).await;
        guard.settle(result)
    }

    fn begin_fetch(&self) -> u64 {
        let mut fetch = self.lock_fetch();
        fetch.latest_id += 1;
        fetch.state = FetchState::Loading;
        tracing::debug!(fetch_id = fetch.latest_id, "Rate fetch started");
        fetch.latest_id
    }

    fn finish_fetch(
        &self,
        fetch_id: u64,
        result: Result<RateTable, FetchError>,
    ) -> Result<(), FetchError> {
        let mut fetch = self.lock_fetch();
        if fetch_id != fetch.latest_id {
            tracing::info!(
                fetch_id,
                latest_id = fetch.latest_id,
                "Discarding superseded rate fetch"
            );
            return result.map(|_| ());
        }

        match result {
            Ok(table) => {
                let table = Arc::new(table);
                self.repository.load(table.clone());
                self.lock_selection()
                    .reset_currencies(table.base().clone(), self.default_to(&table));
                tracing::info!(currencies = table.len(), "Rate table loaded");
                fetch.state = FetchState::Ready(table);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rate fetch failed");
                fetch.state = FetchState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn cancel_fetch(&self, fetch_id: u64) {
        let mut fetch = self.lock_fetch();
        if fetch_id == fetch.latest_id && fetch.state.is_loading() {
            tracing::warn!(fetch_id, "Rate fetch cancelled before completion");
            fetch.state = FetchState::Failed(CANCELLED.to_string());
        }
    }

    fn default_to(&self, table: &RateTable) -> CurrencyCode {
        if table.has_currency(self.settings.secondary_currency.as_str()) {
            self.settings.secondary_currency.clone()
        } else {
            tracing::warn!(
                secondary = %self.settings.secondary_currency,
                "Secondary currency missing from table, defaulting to base"
            );
            table.base().clone()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────────

    /// Replaces the amount text (normalized).
    pub fn set_amount(&self, raw: &str) -> Result<DisplayState, AppError> {
        self.ensure_inputs_enabled()?;
        self.lock_selection().set_amount(raw);
        Ok(self.display_state())
    }

    pub fn set_from_currency(&self, code: &str) -> Result<DisplayState, AppError> {
        let code = CurrencyCode::new(code)?;
        self.ensure_inputs_enabled()?;
        self.lock_selection().set_from_currency(code);
        Ok(self.display_state())
    }

    pub fn set_to_currency(&self, code: &str) -> Result<DisplayState, AppError> {
        let code = CurrencyCode::new(code)?;
        self.ensure_inputs_enabled()?;
        self.lock_selection().set_to_currency(code);
        Ok(self.display_state())
    }

    fn ensure_inputs_enabled(&self) -> Result<(), AppError> {
        if self.lock_fetch().state.is_loading() {
            return Err(AppError::Unavailable("Rates are loading".into()));
        }
        if !self.repository.is_loaded() {
            return Err(AppError::Unavailable("No rates loaded".into()));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    /// Snapshot of everything a UI renders.
    pub fn display_state(&self) -> DisplayState {
        let fetch = self.lock_fetch();
        let selection = self.lock_selection().clone();
        let loading = fetch.state.is_loading();
        let error = fetch.state.error().map(String::from);
        let table = self.repository.snapshot();
        drop(fetch);

        let converted_amount = match (&table, loading) {
            (Some(table), false) => selection.converted(table),
            _ => Conversion::Unavailable,
        };

        DisplayState {
            amount: selection.amount().to_string(),
            from_currency: selection.from_currency().clone(),
            to_currency: selection.to_currency().clone(),
            converted_amount,
            loading,
            error,
            base_currency: table.as_ref().map(|t| t.base().clone()),
            currencies: table.as_ref().map(|t| t.codes()).unwrap_or_default(),
            updated_at: table.as_ref().and_then(|t| t.updated_at()),
        }
    }

    /// Current amount converted into each of `targets`.
    ///
    /// Empty while loading or before the first table.
    pub fn popular_conversions(&self, targets: &[&str]) -> Vec<PopularConversion> {
        let (loading, table) = {
            let fetch = self.lock_fetch();
            (fetch.state.is_loading(), self.repository.snapshot())
        };
        let table = match (table, loading) {
            (Some(table), false) => table,
            _ => return Vec::new(),
        };
        let selection = self.lock_selection().clone();

        targets
            .iter()
            .filter_map(|target| CurrencyCode::new(target).ok())
            .map(|currency| PopularConversion {
                symbol: exchange_rates::symbol(currency.as_str())
                    .unwrap_or(currency.as_str())
                    .to_string(),
                converted_amount: convert_text(
                    selection.amount(),
                    selection.from_currency(),
                    &currency,
                    &table,
                ),
                currency,
            })
            .collect()
    }

    /// One-off conversion against the active table; does not touch the selection.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, ConvertError> {
        let table = self
            .repository
            .snapshot()
            .ok_or_else(|| ConvertError::RateNotFound(from.to_string()))?;
        calculator::convert(amount, from, to, &table)
    }

    /// Listing of the active table.
    pub fn rates(&self) -> Result<RatesResponse, AppError> {
        let table = self
            .repository
            .snapshot()
            .ok_or_else(|| AppError::Unavailable("No rates loaded".into()))?;
        Ok(RatesResponse {
            base: table.base().clone(),
            updated_at: table.updated_at(),
            rates: table.rates().clone(),
        })
    }

    fn lock_fetch(&self) -> MutexGuard<'_, FetchTracker> {
        self.fetch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_selection(&self) -> MutexGuard<'_, SelectionState> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
