//! OMDb (Open Movie Database) lookup used to prefill a movie when adding it.

use crate::error::{CatalogError, Result};
use crate::movie::Movie;
use crate::operations::{validate_rating, validate_year};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// OMDb uses this literal for every missing field.
const NOT_AVAILABLE: &str = "N/A";

// -- Wire types -------------------------------------------------------------

/// The subset of an OMDb `?t=` response the catalog uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbResponse {
    /// `"True"` or `"False"`.
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

/// Leading year of an OMDb `Year` value: `"1994"` → 1994, `"2008–2013"` → 2008.
pub fn parse_year(raw: &str) -> Option<i32> {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() != 4 {
        return None;
    }
    digits.parse().ok()
}

pub fn parse_rating(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw == NOT_AVAILABLE {
        return None;
    }
    raw.parse().ok()
}

fn available(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.trim().is_empty() && v != NOT_AVAILABLE)
}

impl OmdbResponse {
    pub fn is_found(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    /// Convert a successful response into a record, enforcing the same
    /// rating and year bounds as manual entry.
    pub fn into_movie(self) -> Result<Movie> {
        if !self.is_found() {
            let reason = self.error.unwrap_or_else(|| "Movie not found!".to_string());
            return Err(CatalogError::Lookup(reason));
        }

        let title = available(self.title)
            .ok_or_else(|| CatalogError::Lookup("response has no title".to_string()))?;
        let year = self
            .year
            .as_deref()
            .and_then(parse_year)
            .ok_or_else(|| CatalogError::Lookup(format!("no usable year for '{}'", title)))?;
        let rating = self
            .imdb_rating
            .as_deref()
            .and_then(parse_rating)
            .ok_or_else(|| CatalogError::Lookup(format!("no rating available for '{}'", title)))?;

        Ok(Movie {
            year: validate_year(year)?,
            rating: validate_rating(rating)?,
            poster: available(self.poster),
            title,
        })
    }
}

// -- Client -----------------------------------------------------------------

pub struct OmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(OmdbClient {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Title lookup URL, with the title and key query-encoded.
    pub fn request_url(&self, title: &str) -> Result<Url> {
        Url::parse_with_params(&self.base_url, &[("apikey", self.api_key.as_str()), ("t", title)])
            .map_err(|e| CatalogError::Config(format!("invalid OMDb base URL '{}': {}", self.base_url, e)))
    }

    /// Fetch `title` and convert it into a [`Movie`].
    pub async fn fetch(&self, title: &str) -> Result<Movie> {
        let url = self.request_url(title)?;
        debug!(title, base_url = %self.base_url, "querying OMDb");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(title, %status, "OMDb request failed");
            return Err(CatalogError::Lookup(format!("OMDb returned HTTP {}", status)));
        }

        let body: OmdbResponse = response.json().await?;
        body.into_movie().inspect_err(|e| {
            warn!(title, error = %e, "OMDb response not usable");
        })
    }
}
