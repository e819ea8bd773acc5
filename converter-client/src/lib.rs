//! # Converter Client SDK
//!
//! A typed Rust client for the Converter API.

use converter_types::{
    DisplayState, PopularConversion, RatesResponse, SetAmountRequest, SetCurrencyRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Converter API client.
pub struct ConverterClient {
    base_url: String,
    http: Client,
}

impl ConverterClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Gets the current display state.
    pub async fn state(&self) -> Result<DisplayState, ClientError> {
        self.get("/api/state").await
    }

    /// Refreshes rates on the server and returns the settled state.
    pub async fn refresh(&self) -> Result<DisplayState, ClientError> {
        let resp = self
            .http
            .post(format!("{}/api/refresh", self.base_url))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Sets the amount text.
    pub async fn set_amount(&self, amount: &str) -> Result<DisplayState, ClientError> {
        let req = SetAmountRequest {
            amount: amount.to_string(),
        };
        self.put("/api/amount", &req).await
    }

    /// Selects the source currency.
    pub async fn set_from_currency(&self, currency: &str) -> Result<DisplayState, ClientError> {
        let req = SetCurrencyRequest {
            currency: currency.to_string(),
        };
        self.put("/api/from", &req).await
    }

    /// Selects the target currency.
    pub async fn set_to_currency(&self, currency: &str) -> Result<DisplayState, ClientError> {
        let req = SetCurrencyRequest {
            currency: currency.to_string(),
        };
        self.put("/api/to", &req).await
    }

    /// Lists the active rate table.
    pub async fn rates(&self) -> Result<RatesResponse, ClientError> {
        self.get("/api/rates").await
    }

    /// Gets the popular conversions grid.
    pub async fn popular(&self) -> Result<Vec<PopularConversion>, ClientError> {
        self.get("/api/popular").await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .put(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
