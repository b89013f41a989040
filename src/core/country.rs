//! # Country Record
//!
//! The REST Countries v3.1 payload is large and changes without notice, so
//! only the two fields the store actually keys on are typed: the `cca3`
//! code and the display name. Everything else rides along in a flattened
//! extension map and is read through accessors by the layers that care
//! (filters look at `region`/`languages`, the CLI at a few more).

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CountryName {
    pub common: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<String>,
}

/// A single country record. Unique by `cca3`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Country {
    pub name: CountryName,
    pub cca3: String,
    /// Every other field of the API payload, kept verbatim so favorites
    /// round-trip through persistence without loss.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Country {
    pub fn display_name(&self) -> &str {
        &self.name.common
    }

    pub fn region(&self) -> Option<&str> {
        self.extra.get("region").and_then(Value::as_str)
    }

    pub fn subregion(&self) -> Option<&str> {
        self.extra.get("subregion").and_then(Value::as_str)
    }

    /// Display names of the country's languages, in payload order.
    pub fn languages(&self) -> Vec<&str> {
        match self.extra.get("languages").and_then(Value::as_object) {
            Some(map) => map.values().filter_map(Value::as_str).collect(),
            None => Vec::new(),
        }
    }

    pub fn speaks(&self, language: &str) -> bool {
        self.languages().iter().any(|l| *l == language)
    }

    /// First entry of the `capital` array (countries can list several).
    pub fn capital(&self) -> Option<&str> {
        self.extra
            .get("capital")
            .and_then(Value::as_array)
            .and_then(|caps| caps.first())
            .and_then(Value::as_str)
    }

    pub fn population(&self) -> Option<u64> {
        self.extra.get("population").and_then(Value::as_u64)
    }

    /// The flag emoji, e.g. "🇯🇵".
    pub fn flag(&self) -> Option<&str> {
        self.extra.get("flag").and_then(Value::as_str)
    }
}
