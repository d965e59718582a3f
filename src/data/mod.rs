//! Core data models for npsites
//!
//! This module contains the records scraped from the parks site and the
//! places returned by the places-search API, plus the clients that produce them.

pub mod nps;
pub mod places;

pub use nps::{NpsClient, NpsError};
pub use places::{PlacesClient, PlacesError};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A national site as listed on its park page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalSite {
    /// Category of the site (e.g. "National Park"); some sites have none
    pub category: String,
    /// Name of the site (e.g. "Isle Royale")
    pub name: String,
    /// City and state (e.g. "Houghton, MI")
    pub address: String,
    /// Postal code (e.g. "49931", "82190-0168")
    pub zipcode: String,
    /// Contact phone (e.g. "(906) 482-0984")
    pub phone: String,
}

impl NationalSite {
    /// One-line summary used in site listings
    pub fn info(&self) -> String {
        format!(
            "{} ({}): {} {}",
            self.name, self.category, self.address, self.zipcode
        )
    }
}

/// A place found near a national site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub name: String,
    /// Business category, or "no category"
    pub category: String,
    /// Street address, or "no address"
    pub address: String,
    /// City, or "no city"
    pub city: String,
}

impl fmt::Display for NearbyPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {} ({}): {}, {}",
            self.name, self.category, self.address, self.city
        )
    }
}
