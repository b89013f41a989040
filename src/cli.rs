//! # CLI Adapter
//!
//! The clap-specific layer. Translates subcommands into store intents and
//! renders the resulting snapshot as text. This is the only module that
//! prints to stdout; it owns no business rules.

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::info;

use crate::core::config::{self, ResolvedConfig};
use crate::core::country::Country;
use crate::core::filter::{CountryFilter, distinct_languages};
use crate::core::state::RequestStatus;
use crate::core::store::CountryStore;
use crate::persist::FavoritesStore;
use crate::remote::RestCountries;

#[derive(Parser, Debug)]
#[command(name = "atlas", about = "Browse, search, and bookmark countries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch every country, with optional client-side filters
    List {
        /// Case-insensitive substring match on the country name
        #[arg(short, long)]
        search: Option<String>,
        /// Exact region, e.g. "Asia" or "Europe"
        #[arg(short, long)]
        region: Option<String>,
        /// Language display name, e.g. "French"
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Search countries by name on the server
    Search { name: String },
    /// List the countries of one region
    Region { region: String },
    /// Show details for a single country by its three-letter code
    Show { code: String },
    /// List every language spoken across all countries
    Languages,
    /// Manage the favorites list
    Fav {
        #[command(subcommand)]
        command: FavCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum FavCommand {
    /// Bookmark a country by its three-letter code
    Add { code: String },
    /// Remove a bookmark
    Rm { code: String },
    /// Print the bookmarked countries
    List,
    /// Remove every bookmark
    Clear,
}

fn build_store(config: &ResolvedConfig) -> CountryStore {
    let source = Arc::new(RestCountries::new(Some(config.base_url.clone())));
    let favorites = FavoritesStore::new(&config.data_dir);
    CountryStore::new(source, favorites)
}

/// Prints the snapshot error and returns failure if the last fetch failed.
fn check_fetch(store: &CountryStore) -> Result<(), ExitCode> {
    let state = store.snapshot();
    if state.status == RequestStatus::Failed {
        let message = state.error.as_deref().unwrap_or("Unknown error");
        eprintln!("Error: {message}");
        return Err(ExitCode::FAILURE);
    }
    Ok(())
}

fn print_country_line(country: &Country) {
    let flag = country.flag().unwrap_or("");
    let region = country.region().unwrap_or("-");
    println!(
        "{:<4} {} {:<32} {}",
        country.cca3,
        flag,
        country.display_name(),
        region
    );
}

fn print_country_details(country: &Country) {
    println!("{} {}", country.display_name(), country.flag().unwrap_or(""));
    if let Some(official) = country.name.official.as_deref() {
        println!("  Official name: {official}");
    }
    println!("  Code:          {}", country.cca3);
    if let Some(capital) = country.capital() {
        println!("  Capital:       {capital}");
    }
    match (country.region(), country.subregion()) {
        (Some(region), Some(sub)) => println!("  Region:        {region} ({sub})"),
        (Some(region), None) => println!("  Region:        {region}"),
        _ => {}
    }
    if let Some(population) = country.population() {
        println!("  Population:    {population}");
    }
    let languages = country.languages();
    if !languages.is_empty() {
        println!("  Languages:     {}", languages.join(", "));
    }
}

pub async fn run(cli: Cli) -> ExitCode {
    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(&config);
    let mut store = build_store(&resolved);

    match cli.command {
        Command::List {
            search,
            region,
            language,
        } => {
            store.fetch_all().await;
            if let Err(code) = check_fetch(&store) {
                return code;
            }
            store.set_filter(CountryFilter {
                search,
                region: region.or_else(|| resolved.default_region.clone()),
                language,
            });
            let countries = store.filtered_countries();
            for country in &countries {
                print_country_line(country);
            }
            println!("{} countries", countries.len());
        }
        Command::Search { name } => {
            store.fetch_by_name(&name).await;
            if let Err(code) = check_fetch(&store) {
                return code;
            }
            let state = store.snapshot();
            if state.countries.is_empty() {
                println!("No countries match \"{name}\"");
            }
            for country in &state.countries {
                print_country_line(country);
            }
        }
        Command::Region { region } => {
            store.fetch_by_region(&region).await;
            if let Err(code) = check_fetch(&store) {
                return code;
            }
            for country in &store.snapshot().countries {
                print_country_line(country);
            }
        }
        Command::Show { code } => {
            store.fetch_one(&code).await;
            if let Err(exit) = check_fetch(&store) {
                return exit;
            }
            let state = store.snapshot();
            match state
                .countries
                .iter()
                .find(|c| c.cca3.eq_ignore_ascii_case(&code))
            {
                Some(country) => print_country_details(country),
                None => {
                    eprintln!("No country found for code \"{code}\"");
                    return ExitCode::FAILURE;
                }
            }
        }
        Command::Languages => {
            store.fetch_all().await;
            if let Err(code) = check_fetch(&store) {
                return code;
            }
            for language in distinct_languages(&store.snapshot().countries) {
                println!("{language}");
            }
        }
        Command::Fav { command } => return run_fav(command, &mut store).await,
    }

    ExitCode::SUCCESS
}

async fn run_fav(command: FavCommand, store: &mut CountryStore) -> ExitCode {
    match command {
        FavCommand::Add { code } => {
            store.fetch_one(&code).await;
            if let Err(exit) = check_fetch(store) {
                return exit;
            }
            let found = store
                .snapshot()
                .countries
                .iter()
                .find(|c| c.cca3.eq_ignore_ascii_case(&code))
                .cloned();
            match found {
                Some(country) => {
                    let name = country.display_name().to_string();
                    store.add_favorite(country);
                    info!("Added favorite {}", code);
                    println!("Added {name} to favorites");
                }
                None => {
                    eprintln!("No country found for code \"{code}\"");
                    return ExitCode::FAILURE;
                }
            }
        }
        FavCommand::Rm { code } => {
            store.remove_favorite(&code.to_uppercase());
            println!("Removed {} from favorites", code.to_uppercase());
        }
        FavCommand::List => {
            let favorites = &store.snapshot().favorites;
            if favorites.is_empty() {
                println!("No favorites yet");
            }
            for country in favorites {
                print_country_line(country);
            }
        }
        FavCommand::Clear => {
            store.clear_favorites();
            println!("Favorites cleared");
        }
    }
    ExitCode::SUCCESS
}
