//! # Application State
//!
//! Core business state for Atlas. This module contains domain data only -
//! no I/O and nothing presentation-specific.
//!
//! ```text
//! CountriesState
//! ├── countries: Vec<Country>        // last fetched list
//! ├── favorites: Vec<Country>        // bookmarked, unique by cca3
//! ├── status: RequestStatus          // fetch lifecycle
//! ├── error: Option<String>          // set only when status == Failed
//! ├── filters: CountryFilter         // client-side view filters
//! ├── last_updated: Option<DateTime> // stamped on favorites mutations
//! └── latest_generation: u64         // newest issued fetch
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use chrono::{DateTime, Utc};

use crate::core::country::Country;
use crate::core::filter::CountryFilter;

/// Lifecycle of the most recent fetch. Exactly one terminal transition
/// (`Succeeded` or `Failed`) follows each `Loading`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

pub struct CountriesState {
    pub countries: Vec<Country>,
    pub favorites: Vec<Country>,
    pub status: RequestStatus,
    pub error: Option<String>,
    pub filters: CountryFilter,
    pub last_updated: Option<DateTime<Utc>>,
    /// Generation of the newest issued fetch. Terminal transitions carrying
    /// an older generation are dropped by the reducer.
    pub latest_generation: u64,
}

impl CountriesState {
    /// Fresh state with favorites preloaded from the persistence adapter.
    pub fn new(favorites: Vec<Country>) -> Self {
        Self {
            countries: Vec::new(),
            favorites,
            status: RequestStatus::Idle,
            error: None,
            filters: CountryFilter::default(),
            last_updated: None,
            latest_generation: 0,
        }
    }

    pub fn is_favorite(&self, code: &str) -> bool {
        self.favorites.iter().any(|c| c.cca3 == code)
    }
}
