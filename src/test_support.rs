//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::core::country::Country;
use crate::remote::{CountrySource, SourceError};

/// Builds a country record with the fields the store and views inspect.
pub fn country(code: &str, name: &str, region: &str, languages: &[&str]) -> Country {
    let languages: serde_json::Map<String, serde_json::Value> = languages
        .iter()
        .enumerate()
        .map(|(i, lang)| (format!("l{i}"), json!(lang)))
        .collect();
    serde_json::from_value(json!({
        "name": { "common": name },
        "cca3": code,
        "region": region,
        "languages": languages,
    }))
    .expect("valid country literal")
}

/// A scripted source: every fetch pops the next queued result, regardless
/// of which endpoint was hit. `fetch_by_code` takes element 0 of the
/// queued list, mirroring the alpha endpoint.
pub struct StaticSource {
    script: Mutex<VecDeque<Result<Vec<Country>, SourceError>>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push_ok(&self, countries: Vec<Country>) {
        self.script.lock().unwrap().push_back(Ok(countries));
    }

    pub fn push_err(&self, error: SourceError) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    fn next(&self) -> Result<Vec<Country>, SourceError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("StaticSource script exhausted")
    }
}

#[async_trait]
impl CountrySource for StaticSource {
    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError> {
        self.next()
    }

    async fn fetch_by_name(&self, _name: &str) -> Result<Vec<Country>, SourceError> {
        self.next()
    }

    async fn fetch_by_region(&self, _region: &str) -> Result<Vec<Country>, SourceError> {
        self.next()
    }

    async fn fetch_by_code(&self, _code: &str) -> Result<Option<Country>, SourceError> {
        self.next().map(|mut countries| {
            if countries.is_empty() {
                None
            } else {
                Some(countries.remove(0))
            }
        })
    }
}
