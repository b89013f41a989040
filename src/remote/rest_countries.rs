//! REST Countries v3.1 client.
//!
//! Four read-only endpoints, all returning an array of country records:
//! `/all`, `/name/{name}`, `/region/{region}`, `/alpha/{code}`. The alpha
//! endpoint's array holds at most one match; element 0 is taken.

use async_trait::async_trait;
use log::{debug, warn};

use crate::core::country::Country;
use crate::remote::source::{CountrySource, SourceError};

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

pub struct RestCountries {
    base_url: String,
    client: reqwest::Client,
}

impl RestCountries {
    /// Creates a client. `base_url` overrides the public endpoint; tests
    /// point it at a mock server.
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    async fn get_countries(&self, path: &str) -> Result<Vec<Country>, SourceError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("REST Countries error on {}: {} - {}", path, status, message);
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<Country>>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CountrySource for RestCountries {
    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError> {
        self.get_countries("all").await
    }

    async fn fetch_by_name(&self, name: &str) -> Result<Vec<Country>, SourceError> {
        self.get_countries(&format!("name/{name}")).await
    }

    async fn fetch_by_region(&self, region: &str) -> Result<Vec<Country>, SourceError> {
        self.get_countries(&format!("region/{region}")).await
    }

    async fn fetch_by_code(&self, code: &str) -> Result<Option<Country>, SourceError> {
        let mut countries = self.get_countries(&format!("alpha/{code}")).await?;
        if countries.is_empty() {
            Ok(None)
        } else {
            Ok(Some(countries.remove(0)))
        }
    }
}
