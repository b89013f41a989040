//! # Actions
//!
//! Everything that can happen to the country state becomes an `Action`.
//! A fetch starts? That's `Action::FetchStarted`. The response lands?
//! `Action::FetchSucceeded` with its payload.
//!
//! The `update()` function takes the current state and an action and
//! applies the transition. No side effects here. Network and persistence
//! happen in store.rs, and timestamps are taken by the caller and carried
//! in the action payload.
//!
//! ```text
//! State + Action  →  update()  →  New State
//! ```
//!
//! Fetch actions carry a generation number. `FetchStarted` records its
//! generation as the latest; a terminal `FetchSucceeded`/`FetchFailed`
//! whose generation is no longer the latest is dropped, so when two
//! fetches overlap only the most recently issued one lands.

use chrono::{DateTime, Utc};

use crate::core::country::Country;
use crate::core::filter::CountryFilter;
use crate::core::state::{CountriesState, RequestStatus};

/// What a successful fetch does to the country list.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Wholesale replacement: full list, name search, region listing.
    Replace(Vec<Country>),
    /// Single-code lookup: append if the code is absent, first write wins.
    /// `None` is the implicit not-found (empty payload); the list is left
    /// unchanged and callers check for the code themselves.
    Merge(Option<Country>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FetchStarted {
        generation: u64,
    },
    FetchSucceeded {
        generation: u64,
        outcome: FetchOutcome,
    },
    FetchFailed {
        generation: u64,
        message: String,
    },
    FavoriteAdded {
        country: Country,
        at: DateTime<Utc>,
    },
    FavoriteRemoved {
        code: String,
        at: DateTime<Utc>,
    },
    FavoritesCleared {
        at: DateTime<Utc>,
    },
    /// Replaces the in-memory favorites with a freshly loaded persisted
    /// sequence. Does not stamp `last_updated`: nothing was mutated here,
    /// only re-read.
    FavoritesSynced {
        favorites: Vec<Country>,
    },
    FilterChanged(CountryFilter),
}

pub fn update(state: &mut CountriesState, action: Action) {
    match action {
        Action::FetchStarted { generation } => {
            state.latest_generation = generation;
            state.status = RequestStatus::Loading;
            state.error = None;
        }
        Action::FetchSucceeded {
            generation,
            outcome,
        } => {
            if generation != state.latest_generation {
                return; // superseded by a newer fetch
            }
            state.status = RequestStatus::Succeeded;
            match outcome {
                FetchOutcome::Replace(countries) => state.countries = countries,
                FetchOutcome::Merge(Some(country)) => {
                    if !state.countries.iter().any(|c| c.cca3 == country.cca3) {
                        state.countries.push(country);
                    }
                }
                FetchOutcome::Merge(None) => {}
            }
        }
        Action::FetchFailed {
            generation,
            message,
        } => {
            if generation != state.latest_generation {
                return;
            }
            state.status = RequestStatus::Failed;
            state.error = Some(message);
        }
        Action::FavoriteAdded { country, at } => {
            if state.is_favorite(&country.cca3) {
                return;
            }
            state.favorites.push(country);
            state.last_updated = Some(at);
        }
        Action::FavoriteRemoved { code, at } => {
            state.favorites.retain(|c| c.cca3 != code);
            state.last_updated = Some(at);
        }
        Action::FavoritesCleared { at } => {
            state.favorites.clear();
            state.last_updated = Some(at);
        }
        Action::FavoritesSynced { favorites } => state.favorites = favorites,
        Action::FilterChanged(filters) => state.filters = filters,
    }
}
