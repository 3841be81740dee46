//! Wikipedia season-page episode scraping.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

use super::{Episode, EpisodeSource};
use crate::errors::{PipelineError, Result};

/// Wikipedia rejects requests without a browser-looking User-Agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

static SEASON_RE: OnceLock<Regex> = OnceLock::new();

fn season_re() -> &'static Regex {
    SEASON_RE.get_or_init(|| Regex::new(r"season_(\d+)").expect("static regex is valid"))
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Scrapes episode tables from Wikipedia season pages.
///
/// Each configured URL covers one season; a URL that fails to fetch or parse
/// is logged and skipped so the remaining seasons still load.
pub struct WikipediaEpisodeSource {
    client: reqwest::Client,
    season_urls: Vec<String>,
}

impl WikipediaEpisodeSource {
    pub fn new(season_urls: Vec<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            season_urls,
        }
    }

    async fn fetch_season(&self, url: &str) -> Result<Vec<Episode>> {
        let season = season_from_url(url)?;
        info!(season, url, "fetching season page");

        let body = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| PipelineError::Source(format!("GET {url}: {e}")))?
            .error_for_status()
            .map_err(|e| PipelineError::Source(format!("GET {url}: {e}")))?
            .text()
            .await
            .map_err(|e| PipelineError::Source(format!("reading {url}: {e}")))?;

        parse_season_page(&body, season)
    }
}

impl EpisodeSource for WikipediaEpisodeSource {
    async fn fetch(&self) -> Result<Vec<Episode>> {
        let mut episodes = Vec::new();
        for url in &self.season_urls {
            match self.fetch_season(url).await {
                Ok(mut found) => {
                    info!(url = %url, episodes = found.len(), "season page parsed");
                    episodes.append(&mut found);
                }
                Err(e) => warn!(url = %url, error = %e, "skipping season page"),
            }
        }
        Ok(episodes)
    }
}

/// Parse the season number out of a season-page URL (`..._season_1`).
fn season_from_url(url: &str) -> Result<u32> {
    season_re()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| PipelineError::Source(format!("no season number in url: {url}")))
}

/// Extract episode rows from a season page.
///
/// Episodes live in the `wikiepisodetable`; each `vevent` row may be
/// followed by an `expand-child` sibling row holding the short synopsis.
/// Episode numbering restarts at 1 for every season page.
pub fn parse_season_page(html: &str, season: u32) -> Result<Vec<Episode>> {
    let document = Html::parse_document(html);
    let table_sel = selector("table.wikitable.plainrowheaders.wikiepisodetable");
    let row_sel = selector("tr.vevent.module-episode-list-row");
    let synopsis_sel = selector("td.description div.shortSummaryText");

    let table = document.select(&table_sel).next().ok_or_else(|| {
        PipelineError::Source(format!("no episode table found for season {season}"))
    })?;

    let mut episodes = Vec::new();
    for (i, row) in table.select(&row_sel).enumerate() {
        let synopsis = row
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().classes().any(|c| c == "expand-child"))
            .and_then(|sibling| sibling.select(&synopsis_sel).next())
            .map(element_text);

        episodes.push(Episode {
            season,
            episode_in_season: (i + 1) as u32,
            synopsis,
        });
    }

    Ok(episodes)
}

/// Join an element's text fragments and trim surrounding whitespace.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
