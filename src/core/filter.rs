//! # Derived Views
//!
//! Pure functions over a snapshot's country list. Same input, same output:
//! no clocks, no store identity, no I/O. The presentation layer recomputes
//! these on every render; at ~250 records that is cheap enough that no
//! caching is kept here.

use std::collections::BTreeSet;

use crate::core::country::Country;

/// Conjunctive client-side filters. `None` means "don't filter on this".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryFilter {
    /// Case-insensitive substring match on the display name.
    pub search: Option<String>,
    /// Exact match on the region field.
    pub region: Option<String>,
    /// Membership test against the language display names.
    pub language: Option<String>,
}

impl CountryFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.region.is_none() && self.language.is_none()
    }
}

/// Applies all set predicates, preserving input order. Region and language
/// equality run before the substring scan since they are cheaper per record.
pub fn filter_countries(countries: &[Country], filter: &CountryFilter) -> Vec<Country> {
    // A blank or whitespace-only search term means "no search filter".
    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    countries
        .iter()
        .filter(|c| match filter.region.as_deref() {
            Some(region) => c.region() == Some(region),
            None => true,
        })
        .filter(|c| match filter.language.as_deref() {
            Some(language) => c.speaks(language),
            None => true,
        })
        .filter(|c| match search.as_deref() {
            Some(needle) => c.display_name().to_lowercase().contains(needle),
            None => true,
        })
        .cloned()
        .collect()
}

/// Sorted, de-duplicated display names of every language spoken in any of
/// the given countries.
pub fn distinct_languages(countries: &[Country]) -> Vec<String> {
    let mut languages = BTreeSet::new();
    for country in countries {
        for language in country.languages() {
            languages.insert(language.to_string());
        }
    }
    languages.into_iter().collect()
}
