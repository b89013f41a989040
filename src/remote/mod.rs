//! # Remote Country Source
//!
//! The HTTP collaborator that supplies country records. The seam is the
//! [`source::CountrySource`] trait; [`rest_countries::RestCountries`] is
//! the production implementation against the public REST Countries API.

pub mod rest_countries;
pub mod source;

pub use rest_countries::RestCountries;
pub use source::{CountrySource, SourceError};
