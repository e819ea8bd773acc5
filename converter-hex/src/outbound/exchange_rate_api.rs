//! Remote rate provider adapter (exchangerate-api.com v6 "latest" endpoint).

use std::collections::HashMap;
use std::time::Duration;

use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use converter_types::{CurrencyCode, FetchError, RateSource, RateTable};

pub const DEFAULT_API_URL: &str = "https://v6.exchangerate-api.com";

const SUCCESS: &str = "success";

/// HTTP client for `GET {base_url}/v6/{api_key}/latest/{base}`.
pub struct ExchangeRateApi {
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct LatestRatesPayload {
    result: String,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    base_code: Option<String>,
    time_last_update_unix: Option<i64>,
    conversion_rates: Option<HashMap<String, f64>>,
}

impl ExchangeRateApi {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: None,
            http: Client::new(),
        }
    }

    /// Bounds each fetch; without it the transport's defaults apply.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn latest_url(&self, base: &CurrencyCode) -> String {
        format!("{}/v6/{}/latest/{}", self.base_url, self.api_key, base)
    }
}

#[async_trait::async_trait]
impl RateSource for ExchangeRateApi {
    fn name(&self) -> &'static str {
        "exchangerate-api"
    }

    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable, FetchError> {
        tracing::debug!(url = %self.base_url, base = %base, "Fetching latest rates");

        let mut req = self.http.get(self.latest_url(base));
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        // `without_url` keeps the API key out of error messages.
        let resp = req
            .send()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        parse_latest(status, &body, base)
    }
}

/// Turns a provider response into a table, checking the status field explicitly.
fn parse_latest(
    status: StatusCode,
    body: &str,
    base: &CurrencyCode,
) -> Result<RateTable, FetchError> {
    let payload: LatestRatesPayload = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(_) if !status.is_success() => {
            return Err(FetchError::Api(format!("HTTP {}", status.as_u16())));
        }
        Err(e) => return Err(FetchError::MalformedPayload(e.to_string())),
    };

    if payload.result != SUCCESS {
        let reason = payload.error_type.unwrap_or(payload.result);
        tracing::error!(
            http_status = status.as_u16(),
            reason = %reason,
            "Rate provider reported failure"
        );
        return Err(FetchError::Api(reason));
    }
    if !status.is_success() {
        return Err(FetchError::Api(format!("HTTP {}", status.as_u16())));
    }

    if let Some(code) = &payload.base_code {
        if !code.eq_ignore_ascii_case(base.as_str()) {
            return Err(FetchError::MalformedPayload(format!(
                "expected base {}, got {}",
                base, code
            )));
        }
    }

    let raw_rates = payload
        .conversion_rates
        .ok_or_else(|| FetchError::MalformedPayload("missing conversion_rates".into()))?;

    let mut rates = Vec::with_capacity(raw_rates.len());
    for (code, rate) in raw_rates {
        let code = CurrencyCode::new(&code)
            .map_err(|e| FetchError::MalformedPayload(e.to_string()))?;
        rates.push((code, rate));
    }

    let table = RateTable::new(base.clone(), rates)
        .map_err(|e| FetchError::MalformedPayload(e.to_string()))?;

    let updated_at = payload
        .time_last_update_unix
        .and_then(|ts| DateTime::from_timestamp(ts, 0));
    Ok(match updated_at {
        Some(updated_at) => table.with_updated_at(updated_at),
        None => table,
    })
}
