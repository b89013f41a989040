//! # Country State Store
//!
//! Single source of truth for the fetched country list, the request
//! lifecycle, and the favorites set. Explicitly constructed with its
//! collaborators (remote source + persistence adapter) injected, never a
//! global, so tests build one per case and nothing leaks between them.
//!
//! All mutation flows through the reducer in action.rs; this module adds
//! the side effects around it: the network calls, the write-through
//! persistence of favorites, and subscriber notification. Fetch failures
//! are captured as snapshot data (`status`/`error`), never returned as
//! `Err`, and the store never retries on its own.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};

use crate::core::action::{Action, FetchOutcome, update};
use crate::core::country::Country;
use crate::core::filter::{CountryFilter, filter_countries};
use crate::core::state::CountriesState;
use crate::persist::FavoritesStore;
use crate::remote::{CountrySource, SourceError};

// Snapshot error messages, one per fetch operation. The underlying
// transport/API detail goes to the log, not the snapshot.
const FETCH_ALL_FAILED: &str = "Failed to fetch countries";
const SEARCH_FAILED: &str = "Country not found";
const REGION_FAILED: &str = "Failed to filter by region";
const LOOKUP_FAILED: &str = "Country not found";

type Subscriber = Box<dyn Fn(&CountriesState) + Send>;

pub struct CountryStore {
    state: CountriesState,
    source: Arc<dyn CountrySource>,
    favorites: FavoritesStore,
    subscribers: Vec<Subscriber>,
    fetch_seq: u64,
}

impl CountryStore {
    /// Builds a store with favorites preloaded from the adapter.
    pub fn new(source: Arc<dyn CountrySource>, favorites: FavoritesStore) -> Self {
        let state = CountriesState::new(favorites.load());
        Self {
            state,
            source,
            favorites,
            subscribers: Vec::new(),
            fetch_seq: 0,
        }
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> &CountriesState {
        &self.state
    }

    /// The current country list with the snapshot's filters applied.
    pub fn filtered_countries(&self) -> Vec<Country> {
        filter_countries(&self.state.countries, &self.state.filters)
    }

    /// Registers a callback invoked after every state change.
    pub fn subscribe(&mut self, subscriber: impl Fn(&CountriesState) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn dispatch(&mut self, action: Action) {
        update(&mut self.state, action);
        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
    }

    fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        let generation = self.fetch_seq;
        self.dispatch(Action::FetchStarted { generation });
        generation
    }

    fn finish_fetch(&mut self, generation: u64, outcome: FetchOutcome) {
        if generation != self.state.latest_generation {
            debug!("Dropping stale fetch result (generation {})", generation);
        }
        self.dispatch(Action::FetchSucceeded {
            generation,
            outcome,
        });
    }

    fn fail_fetch(&mut self, generation: u64, message: &str, error: SourceError) {
        warn!("{}: {}", message, error);
        self.dispatch(Action::FetchFailed {
            generation,
            message: message.to_string(),
        });
    }

    /// Requests the full country list and replaces `countries` wholesale.
    pub async fn fetch_all(&mut self) {
        let generation = self.begin_fetch();
        match self.source.fetch_all().await {
            Ok(countries) => self.finish_fetch(generation, FetchOutcome::Replace(countries)),
            Err(e) => self.fail_fetch(generation, FETCH_ALL_FAILED, e),
        }
    }

    /// Server-side name search. The matching subset replaces `countries`
    /// destructively; callers re-run `fetch_all` to get the full list back.
    pub async fn fetch_by_name(&mut self, name: &str) {
        let generation = self.begin_fetch();
        match self.source.fetch_by_name(name).await {
            Ok(countries) => self.finish_fetch(generation, FetchOutcome::Replace(countries)),
            Err(e) => self.fail_fetch(generation, SEARCH_FAILED, e),
        }
    }

    /// Server-side region listing; destructive replacement like
    /// `fetch_by_name`.
    pub async fn fetch_by_region(&mut self, region: &str) {
        let generation = self.begin_fetch();
        match self.source.fetch_by_region(region).await {
            Ok(countries) => self.finish_fetch(generation, FetchOutcome::Replace(countries)),
            Err(e) => self.fail_fetch(generation, REGION_FAILED, e),
        }
    }

    /// Single-code lookup. The record is appended only if its code is not
    /// already present; an empty payload succeeds without changing the
    /// list (callers check for the code themselves).
    pub async fn fetch_one(&mut self, code: &str) {
        let generation = self.begin_fetch();
        match self.source.fetch_by_code(code).await {
            Ok(country) => self.finish_fetch(generation, FetchOutcome::Merge(country)),
            Err(e) => self.fail_fetch(generation, LOOKUP_FAILED, e),
        }
    }

    /// Idempotent insert keyed by `cca3`. A changed favorites list is
    /// written through to the adapter before this returns; a duplicate add
    /// touches neither state nor disk.
    pub fn add_favorite(&mut self, country: Country) {
        if self.state.is_favorite(&country.cca3) {
            debug!("{} already in favorites", country.cca3);
            return;
        }
        self.dispatch(Action::FavoriteAdded {
            country,
            at: Utc::now(),
        });
        self.persist_favorites();
    }

    /// Removes any favorite with the matching code and writes the
    /// sequence through.
    pub fn remove_favorite(&mut self, code: &str) {
        self.dispatch(Action::FavoriteRemoved {
            code: code.to_string(),
            at: Utc::now(),
        });
        self.persist_favorites();
    }

    /// Empties the favorites and deletes the persisted slot.
    pub fn clear_favorites(&mut self) {
        self.dispatch(Action::FavoritesCleared { at: Utc::now() });
        if let Err(e) = self.favorites.clear() {
            warn!("Failed to clear persisted favorites: {}", e);
        }
    }

    /// Re-reads the persisted slot into the snapshot, picking up writes
    /// made by another store over the same data directory. `last_updated`
    /// is left alone: nothing was mutated, only re-read.
    pub fn sync_favorites(&mut self) {
        let favorites = self.favorites.load();
        self.dispatch(Action::FavoritesSynced { favorites });
    }

    /// Replaces the snapshot's client-side filters.
    pub fn set_filter(&mut self, filter: CountryFilter) {
        self.dispatch(Action::FilterChanged(filter));
    }

    fn persist_favorites(&self) {
        if let Err(e) = self.favorites.save(&self.state.favorites) {
            warn!("Failed to persist favorites: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::RequestStatus;
    use crate::test_support::{StaticSource, country};
    use std::sync::Mutex;

    fn store_with(source: Arc<StaticSource>) -> (tempfile::TempDir, CountryStore) {
        let dir = tempfile::tempdir().unwrap();
        let favorites = FavoritesStore::new(dir.path());
        (dir, CountryStore::new(source, favorites))
    }

    #[tokio::test]
    async fn test_fetch_all_success_replaces_countries() {
        let source = Arc::new(StaticSource::new());
        source.push_ok(vec![country("JPN", "Japan", "Asia", &["Japanese"])]);
        let (_dir, mut store) = store_with(source);

        store.fetch_all().await;

        let state = store.snapshot();
        assert_eq!(state.status, RequestStatus::Succeeded);
        assert!(state.error.is_none());
        assert_eq!(state.countries.len(), 1);
        assert_eq!(state.countries[0].cca3, "JPN");
    }

    #[tokio::test]
    async fn test_fetch_all_failure_records_message_and_keeps_list() {
        let source = Arc::new(StaticSource::new());
        source.push_ok(vec![country("JPN", "Japan", "Asia", &[])]);
        source.push_err(SourceError::Network("connection refused".to_string()));
        let (_dir, mut store) = store_with(source);

        store.fetch_all().await;
        store.fetch_all().await;

        let state = store.snapshot();
        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch countries"));
        assert_eq!(state.countries.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_preserves_favorites() {
        let source = Arc::new(StaticSource::new());
        source.push_ok(vec![country("FRA", "France", "Europe", &[])]);
        let (_dir, mut store) = store_with(source);
        store.add_favorite(country("JPN", "Japan", "Asia", &[]));

        store.fetch_all().await;

        assert_eq!(store.snapshot().favorites.len(), 1);
        assert!(store.snapshot().is_favorite("JPN"));
    }

    #[tokio::test]
    async fn test_subscribers_observe_loading_then_terminal() {
        let source = Arc::new(StaticSource::new());
        source.push_ok(vec![]);
        let (_dir, mut store) = store_with(source);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |state| sink.lock().unwrap().push(state.status));

        store.fetch_all().await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec![RequestStatus::Loading, RequestStatus::Succeeded]
        );
    }

    #[tokio::test]
    async fn test_fetch_one_not_found_succeeds_without_append() {
        let source = Arc::new(StaticSource::new());
        source.push_ok(vec![]);
        let (_dir, mut store) = store_with(source);

        store.fetch_one("XYZ").await;

        let state = store.snapshot();
        assert_eq!(state.status, RequestStatus::Succeeded);
        assert!(state.countries.is_empty());
    }

    #[tokio::test]
    async fn test_failed_search_reports_country_not_found() {
        let source = Arc::new(StaticSource::new());
        source.push_err(SourceError::Api {
            status: 404,
            message: "not found".to_string(),
        });
        let (_dir, mut store) = store_with(source);

        store.fetch_by_name("atlantis").await;

        assert_eq!(
            store.snapshot().error.as_deref(),
            Some("Country not found")
        );
    }

    #[test]
    fn test_add_favorite_writes_through_before_returning() {
        let source = Arc::new(StaticSource::new());
        let (dir, mut store) = store_with(source);

        store.add_favorite(country("JPN", "Japan", "Asia", &[]));

        // A fresh adapter over the same dir sees the write.
        let reloaded = FavoritesStore::new(dir.path()).load();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].cca3, "JPN");
    }

    #[test]
    fn test_favorites_survive_store_reconstruction() {
        let source = Arc::new(StaticSource::new());
        let dir = tempfile::tempdir().unwrap();
        {
            let favorites = FavoritesStore::new(dir.path());
            let mut store = CountryStore::new(Arc::clone(&source) as Arc<dyn CountrySource>, favorites);
            store.add_favorite(country("JPN", "Japan", "Asia", &[]));
            store.add_favorite(country("FRA", "France", "Europe", &[]));
            store.remove_favorite("JPN");
        }
        let favorites = FavoritesStore::new(dir.path());
        let store = CountryStore::new(source, favorites);
        let codes: Vec<&str> = store
            .snapshot()
            .favorites
            .iter()
            .map(|c| c.cca3.as_str())
            .collect();
        assert_eq!(codes, vec!["FRA"]);
    }

    #[test]
    fn test_sync_picks_up_external_writes() {
        let source = Arc::new(StaticSource::new());
        let dir = tempfile::tempdir().unwrap();
        let mut store = CountryStore::new(
            Arc::clone(&source) as Arc<dyn CountrySource>,
            FavoritesStore::new(dir.path()),
        );
        assert!(store.snapshot().favorites.is_empty());

        // Another store over the same data dir adds a favorite.
        let mut other = CountryStore::new(source, FavoritesStore::new(dir.path()));
        other.add_favorite(country("JPN", "Japan", "Asia", &[]));

        store.sync_favorites();

        assert!(store.snapshot().is_favorite("JPN"));
        assert!(store.snapshot().last_updated.is_none());
    }

    #[test]
    fn test_clear_favorites_deletes_persisted_slot() {
        let source = Arc::new(StaticSource::new());
        let (dir, mut store) = store_with(source);
        store.add_favorite(country("JPN", "Japan", "Asia", &[]));

        store.clear_favorites();

        assert!(store.snapshot().favorites.is_empty());
        assert!(FavoritesStore::new(dir.path()).load().is_empty());
    }

    #[test]
    fn test_duplicate_add_skips_persistence() {
        let source = Arc::new(StaticSource::new());
        let (dir, mut store) = store_with(source);
        store.add_favorite(country("JPN", "Japan", "Asia", &[]));
        let stamp = store.snapshot().last_updated;

        store.add_favorite(country("JPN", "Japan", "Asia", &[]));

        assert_eq!(store.snapshot().favorites.len(), 1);
        assert_eq!(store.snapshot().last_updated, stamp);
        assert_eq!(FavoritesStore::new(dir.path()).load().len(), 1);
    }

    #[test]
    fn test_set_filter_notifies_and_updates_snapshot() {
        let source = Arc::new(StaticSource::new());
        let (_dir, mut store) = store_with(source);
        let notified = Arc::new(Mutex::new(0u32));
        let sink = Arc::clone(&notified);
        store.subscribe(move |_| *sink.lock().unwrap() += 1);

        let filter = CountryFilter {
            region: Some("Asia".to_string()),
            ..Default::default()
        };
        store.set_filter(filter.clone());

        assert_eq!(store.snapshot().filters, filter);
        assert_eq!(*notified.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_filtered_countries_applies_snapshot_filters() {
        let source = Arc::new(StaticSource::new());
        source.push_ok(vec![
            country("JPN", "Japan", "Asia", &["Japanese"]),
            country("FRA", "France", "Europe", &["French"]),
        ]);
        let (_dir, mut store) = store_with(source);
        store.fetch_all().await;
        store.set_filter(CountryFilter {
            region: Some("Europe".to_string()),
            ..Default::default()
        });

        let filtered = store.filtered_countries();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].cca3, "FRA");
    }
}
