//! MapQuest radius-search client
//!
//! Looks up places within a fixed radius of a national site's postal code.
//! Decoded responses are cached under a key built from every request
//! parameter except the API key, so the credential never lands on disk.

use serde::Deserialize;
use thiserror::Error;

use super::{NationalSite, NearbyPlace};
use crate::cache::build_key;
use crate::fetch::{CachedFetcher, FetchError};

/// Radius-search endpoint of the places API
pub const PLACES_SEARCH_URL: &str = "http://www.mapquestapi.com/search/v2/radius";

/// Search radius in miles
const SEARCH_RADIUS: u32 = 10;

/// Maximum number of places returned per search
const MAX_MATCHES: u32 = 10;

const NO_ADDRESS: &str = "no address";
const NO_CITY: &str = "no city";
const NO_CATEGORY: &str = "no category";

/// Errors that can occur when fetching nearby places
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Fetching the response failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Response JSON didn't have the expected shape
    #[error("Failed to decode places response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Response from the radius-search endpoint
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "searchResults", default)]
    search_results: Vec<SearchResult>,
}

/// A single place in the search results
#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    name: String,
    #[serde(default)]
    fields: PlaceFields,
}

#[derive(Debug, Default, Deserialize)]
struct PlaceFields {
    #[serde(default)]
    address: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    group_sic_code_name: String,
}

/// Client for the places-search API
#[derive(Debug, Clone)]
pub struct PlacesClient {
    /// API credential, sent with every request
    api_key: String,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl PlacesClient {
    /// Creates a client for the MapQuest endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, PLACES_SEARCH_URL)
    }

    /// Creates a client for a custom endpoint
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Query parameters for a search around `origin`, without the API key
    fn search_params(origin: &str) -> Vec<(&'static str, String)> {
        vec![
            ("origin", origin.to_string()),
            ("radius", SEARCH_RADIUS.to_string()),
            ("maxMatches", MAX_MATCHES.to_string()),
            ("ambiguities", "ignore".to_string()),
            ("outFormat", "json".to_string()),
        ]
    }

    /// Cache key for a search around `origin`
    pub fn cache_key(&self, origin: &str) -> String {
        build_key(&self.base_url, Self::search_params(origin))
    }

    /// Fetches places near a national site, by its postal code
    ///
    /// # Returns
    /// * `Ok(Vec<NearbyPlace>)` - Places in API order; empty if the response has no results
    /// * `Err(PlacesError)` - If the request fails or the response can't be decoded
    pub async fn nearby_places(
        &self,
        fetcher: &mut CachedFetcher,
        site: &NationalSite,
    ) -> Result<Vec<NearbyPlace>, PlacesError> {
        let key = self.cache_key(&site.zipcode);

        let mut query = vec![("key", self.api_key.clone())];
        query.extend(Self::search_params(&site.zipcode));

        let value = fetcher
            .fetch_json_with_cache(&key, &self.base_url, &query)
            .await?;
        let response: SearchResponse = serde_json::from_value(value)?;

        Ok(response
            .search_results
            .into_iter()
            .map(into_place)
            .collect())
    }
}

/// Converts a search result, substituting placeholders for empty fields
fn into_place(result: SearchResult) -> NearbyPlace {
    let fields = result.fields;
    NearbyPlace {
        name: result.name,
        category: or_placeholder(fields.group_sic_code_name, NO_CATEGORY),
        address: or_placeholder(fields.address, NO_ADDRESS),
        city: or_placeholder(fields.city, NO_CITY),
    }
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}
