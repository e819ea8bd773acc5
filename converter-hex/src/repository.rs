//! Owned, replace-only rate table store.

use std::sync::{Arc, PoisonError, RwLock};

use converter_types::{ConvertError, CurrencyCode, RateTable};

/// Holds the single active [`RateTable`].
///
/// The table is swapped as a whole `Arc`; readers clone the `Arc` and keep a
/// consistent snapshot even if a refresh lands while they work. There is no
/// method that edits a table in place.
#[derive(Debug, Default)]
pub struct RateRepository {
    active: RwLock<Option<Arc<RateTable>>>,
}

impl RateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the active table.
    pub fn load(&self, table: Arc<RateTable>) {
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        *active = Some(table);
    }

    /// Current table, or `None` before the first successful load.
    pub fn snapshot(&self) -> Option<Arc<RateTable>> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    pub fn lookup(&self, code: &str) -> Result<f64, ConvertError> {
        self.snapshot()
            .and_then(|table| table.lookup(code))
            .ok_or_else(|| ConvertError::RateNotFound(code.to_string()))
    }

    pub fn has_currency(&self, code: &str) -> bool {
        self.lookup(code).is_ok()
    }

    /// Sorted codes of the active table; empty before the first load.
    pub fn codes(&self) -> Vec<CurrencyCode> {
        self.snapshot()
            .map(|table| table.codes())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn table(inr: f64) -> Arc<RateTable> {
        Arc::new(RateTable::new(code("USD"), [(code("INR"), inr)]).unwrap())
    }

    #[test]
    fn test_empty_repository_has_nothing() {
        let repo = RateRepository::new();
        assert!(!repo.is_loaded());
        assert_eq!(repo.lookup("USD"), Err(ConvertError::RateNotFound("USD".into())));
        assert!(!repo.has_currency("USD"));
        assert!(repo.codes().is_empty());
    }

    #[test]
    fn test_load_and_lookup() {
        let repo = RateRepository::new();
        repo.load(table(83.0));
        assert_eq!(repo.lookup("INR"), Ok(83.0));
        assert_eq!(repo.lookup("USD"), Ok(1.0));
        assert_eq!(repo.codes(), vec![code("INR"), code("USD")]);
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let repo = RateRepository::new();
        repo.load(table(83.0));
        let before = repo.snapshot().unwrap();

        repo.load(table(84.0));

        assert_eq!(before.lookup("INR"), Some(83.0));
        assert_eq!(repo.lookup("INR"), Ok(84.0));
    }
}
