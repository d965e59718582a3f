//! National Park Service site client
//!
//! Scrapes the state index, per-state listings and per-site detail pages from
//! nps.gov. Parsing is kept in free functions over raw HTML so it can be tested
//! against captured markup; the client only decides which page to fetch.

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use super::NationalSite;
use crate::fetch::{CachedFetcher, FetchError};

/// Base URL of the parks site
pub const NPS_BASE_URL: &str = "https://www.nps.gov";

mod selectors {
    use lazy_static::lazy_static;
    use scraper::Selector;

    lazy_static! {
        pub static ref STATE_MENU: Selector =
            Selector::parse(".dropdown-menu.SearchBar-keywordSearch").unwrap();
        pub static ref SITE_ROW: Selector =
            Selector::parse("div.col-md-9.col-sm-9.col-xs-12.table-cell.list_left").unwrap();
        pub static ref HERO: Selector = Selector::parse(".Hero-titleContainer.clearfix").unwrap();
        pub static ref FOOTER: Selector = Selector::parse(".ParkFooter-contact").unwrap();
        pub static ref LOCALITY: Selector = Selector::parse("[itemprop=\"addressLocality\"]").unwrap();
        pub static ref REGION: Selector = Selector::parse("[itemprop=\"addressRegion\"]").unwrap();
        pub static ref POSTAL_CODE: Selector = Selector::parse("[itemprop=\"postalCode\"]").unwrap();
        pub static ref TELEPHONE: Selector = Selector::parse("[itemprop=\"telephone\"]").unwrap();
        pub static ref LINK: Selector = Selector::parse("a").unwrap();
        pub static ref SPAN: Selector = Selector::parse("span").unwrap();
    }
}

/// Errors that can occur when scraping the parks site
#[derive(Debug, Error)]
pub enum NpsError {
    /// Fetching the page failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The page doesn't have the expected structure
    #[error("Missing expected element in page: {0}")]
    MissingElement(&'static str),
}

/// Client for the parks site
#[derive(Debug, Clone)]
pub struct NpsClient {
    /// Site root; every scraped link is relative to it
    base_url: String,
}

impl Default for NpsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NpsClient {
    /// Creates a client for nps.gov
    pub fn new() -> Self {
        Self::with_base_url(NPS_BASE_URL)
    }

    /// Creates a client for a custom site root
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Maps lower-cased state names to their listing page URLs
    ///
    /// e.g. `{"michigan": "https://www.nps.gov/state/mi/index.htm", ...}`
    pub async fn state_urls(
        &self,
        fetcher: &mut CachedFetcher,
    ) -> Result<BTreeMap<String, String>, NpsError> {
        let html = fetcher.fetch_with_cache(&self.base_url).await?;
        parse_state_index(&html, &self.base_url)
    }

    /// Fetches every national site listed on a state page
    ///
    /// Each listed site costs one more page fetch (or cache hit).
    pub async fn sites_for_state(
        &self,
        fetcher: &mut CachedFetcher,
        state_url: &str,
    ) -> Result<Vec<NationalSite>, NpsError> {
        let html = fetcher.fetch_with_cache(state_url).await?;
        let site_urls = parse_state_listing(&html, &self.base_url)?;
        debug!(state_url, sites = site_urls.len(), "parsed state listing");

        let mut sites = Vec::with_capacity(site_urls.len());
        for site_url in &site_urls {
            sites.push(self.site(fetcher, site_url).await?);
        }
        Ok(sites)
    }

    /// Fetches a single national site from its detail page
    pub async fn site(
        &self,
        fetcher: &mut CachedFetcher,
        site_url: &str,
    ) -> Result<NationalSite, NpsError> {
        let html = fetcher.fetch_with_cache(site_url).await?;
        parse_site_page(&html)
    }
}

/// Parses the state dropdown on the site root
pub fn parse_state_index(html: &str, base_url: &str) -> Result<BTreeMap<String, String>, NpsError> {
    use selectors::*;

    let doc = Html::parse_document(html);
    let menu = doc
        .select(&STATE_MENU)
        .next()
        .ok_or(NpsError::MissingElement("state dropdown menu"))?;

    menu.select(&LINK)
        .map(|link| -> Result<(String, String), NpsError> {
            let href = link
                .value()
                .attr("href")
                .ok_or(NpsError::MissingElement("state link href"))?;
            Ok((text_of(link).to_lowercase(), format!("{}{}", base_url, href)))
        })
        .collect()
}

/// Parses the site links on a state listing page
///
/// Listing links point at a site directory, so `index.htm` is appended.
pub fn parse_state_listing(html: &str, base_url: &str) -> Result<Vec<String>, NpsError> {
    use selectors::*;

    let doc = Html::parse_document(html);
    doc.select(&SITE_ROW)
        .map(|row| -> Result<String, NpsError> {
            let href = row
                .select(&LINK)
                .next()
                .and_then(|link| link.value().attr("href"))
                .ok_or(NpsError::MissingElement("site link"))?;
            Ok(format!("{}{}index.htm", base_url, href))
        })
        .collect()
}

/// Parses a site detail page into a [`NationalSite`]
pub fn parse_site_page(html: &str) -> Result<NationalSite, NpsError> {
    use selectors::*;

    let doc = Html::parse_document(html);
    let hero = doc
        .select(&HERO)
        .next()
        .ok_or(NpsError::MissingElement("hero title container"))?;
    let footer = doc
        .select(&FOOTER)
        .next()
        .ok_or(NpsError::MissingElement("park footer contact"))?;

    let name = first_text(hero, &LINK, "site name")?;
    let category = first_text(hero, &SPAN, "site category")?;
    let locality = first_text(footer, &LOCALITY, "address locality")?;
    let region = first_text(footer, &REGION, "address region")?;
    let zipcode = first_text(footer, &POSTAL_CODE, "postal code")?;
    let phone = first_text(footer, &TELEPHONE, "telephone")?;

    Ok(NationalSite {
        category,
        name,
        address: format!("{}, {}", locality, region),
        zipcode,
        phone,
    })
}

fn first_text(
    parent: ElementRef<'_>,
    selector: &Selector,
    what: &'static str,
) -> Result<String, NpsError> {
    parent
        .select(selector)
        .next()
        .map(text_of)
        .ok_or(NpsError::MissingElement(what))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
