use std::time::Duration;

use gamelister_lib::{CatalogRecord, CatalogSource, FilterSet};
use reqwest::header::{ACCEPT, HeaderValue};

use crate::credentials::Credentials;
use crate::error::IgdbError;

const BASE_URL: &str = "https://api-endpoint.igdb.com";
const COUNT_HEADER: &str = "X-Count";
const KEY_HEADER: &str = "user-key";

/// Blocking HTTP client for the IGDB games endpoint.
pub struct IgdbClient {
    http: reqwest::blocking::Client,
    base_url: String,
    creds: Credentials,
}

impl IgdbClient {
    pub fn new(creds: Credentials) -> Result<Self, IgdbError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
            creds,
        })
    }

    /// Point the client at a different API host (mirrors, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn get(&self, params: &[(String, String)]) -> Result<reqwest::blocking::Response, IgdbError> {
        let resp = self
            .http
            .get(format!("{}/games/", self.base_url))
            .header(KEY_HEADER, &self.creds.api_key)
            .header(ACCEPT, "application/json")
            .query(params)
            .send()?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(IgdbError::InvalidCredentials(
                "API key rejected".to_string(),
            ));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(IgdbError::RateLimit);
        }
        let text = resp.text().unwrap_or_default();
        Err(IgdbError::ServerError {
            status: status.as_u16(),
            message: truncate(&text, 200),
        })
    }
}

impl CatalogSource for IgdbClient {
    type Error = IgdbError;

    fn count(&self, filters: &FilterSet) -> Result<Option<usize>, IgdbError> {
        let mut params = filter_params(filters);
        params.push(("scroll".to_string(), "1".to_string()));

        let resp = self.get(&params)?;
        let total = parse_count(resp.headers().get(COUNT_HEADER));
        if total.is_none() {
            log::debug!("Response had no usable {COUNT_HEADER} header");
        }
        Ok(total)
    }

    fn query(
        &self,
        filters: &FilterSet,
        fields: &[&str],
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CatalogRecord>, IgdbError> {
        let params = page_params(filters, fields, limit, offset);
        let resp = self.get(&params)?;
        let text = resp.text()?;
        log::trace!("IGDB page at offset {offset}: {text}");

        serde_json::from_str(&text).map_err(|e| {
            IgdbError::Api(format!(
                "Failed to parse games page: {e}. Response: {}",
                truncate(&text, 200)
            ))
        })
    }
}

/// Query parameters carrying the filter predicates and search term.
///
/// Each predicate key like `[platforms][any]` becomes `filter[platforms][any]`.
fn filter_params(filters: &FilterSet) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = filters
        .iter()
        .map(|(k, v)| (format!("filter{k}"), v.to_string()))
        .collect();
    if let Some(search) = filters.search() {
        params.push(("search".to_string(), search.to_string()));
    }
    params
}

fn page_params(
    filters: &FilterSet,
    fields: &[&str],
    limit: usize,
    offset: usize,
) -> Vec<(String, String)> {
    let mut params = filter_params(filters);
    params.push(("fields".to_string(), fields.join(",")));
    params.push(("limit".to_string(), limit.to_string()));
    params.push(("offset".to_string(), offset.to_string()));
    params
}

fn parse_count(value: Option<&HeaderValue>) -> Option<usize> {
    value?.to_str().ok()?.trim().parse().ok()
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
