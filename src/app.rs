//! Interactive session for npsites
//!
//! This module contains the text menu: pick a state, list its national sites,
//! then pick a site to see places nearby. Input and output are generic so the
//! whole session can be driven from tests.

use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

use crate::data::{NationalSite, NpsClient, NpsError, PlacesClient, PlacesError};
use crate::fetch::CachedFetcher;

const STATE_PROMPT: &str = "Enter a state name (e.g. Michigan, michigan) or \"exit\"\n:";
const SITE_PROMPT: &str = "Choose the number for detail search or \"exit\" or \"back\"\n:";

/// Width of the banner printed around section headers
const BANNER_WIDTH: usize = 34;

/// Errors that end the session
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Scraping the parks site failed
    #[error("Failed to load national sites: {0}")]
    Nps(#[from] NpsError),

    /// The places search failed
    #[error("Failed to load nearby places: {0}")]
    Places(#[from] PlacesError),
}

/// What the user asked for at the site prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteChoice {
    /// Quit the program
    Exit,
    /// Return to state selection
    Back,
    /// Show places near the site at this zero-based index
    Select(usize),
    /// Anything else
    Invalid,
}

/// Interprets input at the site prompt, given how many sites are listed
pub fn parse_site_choice(input: &str, site_count: usize) -> SiteChoice {
    match input.trim().to_lowercase().as_str() {
        "exit" => SiteChoice::Exit,
        "back" => SiteChoice::Back,
        other => match other.parse::<usize>() {
            Ok(n) if (1..=site_count).contains(&n) => SiteChoice::Select(n - 1),
            _ => SiteChoice::Invalid,
        },
    }
}

/// How the site menu ended
enum SiteMenuExit {
    Back,
    Quit,
}

/// Main application struct owning the fetch mediator and both clients
pub struct App {
    fetcher: CachedFetcher,
    nps: NpsClient,
    places: PlacesClient,
}

impl App {
    pub fn new(fetcher: CachedFetcher, nps: NpsClient, places: PlacesClient) -> Self {
        Self {
            fetcher,
            nps,
            places,
        }
    }

    /// Runs the interactive session until "exit" or end of input
    ///
    /// Invalid input is reported and re-prompted. Fetch and parse failures end
    /// the session with an error.
    pub async fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<(), AppError> {
        let mut lines = input.lines();

        let states = self.nps.state_urls(&mut self.fetcher).await?;
        debug!(states = states.len(), "loaded state index");

        loop {
            write!(output, "{}", STATE_PROMPT)?;
            output.flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let state = line?.trim().to_lowercase();

            if state == "exit" {
                break;
            }

            let Some(state_url) = states.get(&state) else {
                writeln!(output, "[Error] Enter proper state name")?;
                continue;
            };

            let sites = self.nps.sites_for_state(&mut self.fetcher, state_url).await?;
            write_site_list(&mut output, &state, &sites)?;

            match self.site_menu(&mut lines, &mut output, &sites).await? {
                SiteMenuExit::Back => continue,
                SiteMenuExit::Quit => break,
            }
        }

        Ok(())
    }

    async fn site_menu<B: BufRead, W: Write>(
        &mut self,
        lines: &mut io::Lines<B>,
        output: &mut W,
        sites: &[NationalSite],
    ) -> Result<SiteMenuExit, AppError> {
        loop {
            write!(output, "{}", SITE_PROMPT)?;
            output.flush()?;

            let Some(line) = lines.next() else {
                return Ok(SiteMenuExit::Quit);
            };

            match parse_site_choice(&line?, sites.len()) {
                SiteChoice::Exit => return Ok(SiteMenuExit::Quit),
                SiteChoice::Back => return Ok(SiteMenuExit::Back),
                SiteChoice::Select(index) => {
                    let site = &sites[index];
                    let places = self.places.nearby_places(&mut self.fetcher, site).await?;

                    write_banner(output)?;
                    writeln!(output, "Places near {}", site.name)?;
                    write_banner(output)?;
                    for place in &places {
                        writeln!(output, "{}", place)?;
                    }
                }
                SiteChoice::Invalid => writeln!(output, "[Error] Invalid input")?,
            }
        }
    }

    /// Read access to the fetch mediator
    pub fn fetcher(&self) -> &CachedFetcher {
        &self.fetcher
    }
}

fn write_banner<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "{}", "-".repeat(BANNER_WIDTH))
}

fn write_site_list<W: Write>(output: &mut W, state: &str, sites: &[NationalSite]) -> io::Result<()> {
    write_banner(output)?;
    writeln!(output, "List of national sites in {}", state)?;
    write_banner(output)?;
    for (i, site) in sites.iter().enumerate() {
        writeln!(output, "[ {} ] {}", i + 1, site.info())?;
    }
    Ok(())
}
