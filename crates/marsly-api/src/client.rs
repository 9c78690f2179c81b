// Mars real-estate API HTTP client
//
// Wraps `reqwest::Client` with base-URL handling, query construction and
// body decoding. Every failure is reported as a typed `Error`; nothing is
// retried here.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{FilterKind, MarsProperty};
use crate::transport::TransportConfig;

/// Public endpoint of the upstream service.
pub const DEFAULT_BASE_URL: &str = "https://mars.udacity.com/";

/// Raw HTTP client for the listings API.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct MarsApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MarsApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// The `base_url` is the API root (e.g. `https://mars.udacity.com/`).
    /// A missing trailing slash is added so relative endpoint paths join
    /// under it instead of replacing its last segment.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base(base_url),
        }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// List properties matching `filter`.
    ///
    /// `GET {base}/realestate?filter={rent|buy|all}`
    pub async fn list_properties(&self, filter: FilterKind) -> Result<Vec<MarsProperty>, Error> {
        let mut url = self.api_url("realestate")?;
        url.query_pairs_mut()
            .append_pair("filter", filter.as_query());

        let properties: Vec<MarsProperty> = self.get(url).await?;
        debug!(%filter, count = properties.len(), "listings received");
        Ok(properties)
    }

    // ── URL builders ─────────────────────────────────────────────────

    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::parse_body(resp).await
    }

    async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_without_trailing_slash_keeps_its_path() {
        let client = MarsApiClient::with_client(
            reqwest::Client::new(),
            Url::parse("http://localhost:8080/api").unwrap(),
        );
        assert_eq!(
            client.api_url("realestate").unwrap().as_str(),
            "http://localhost:8080/api/realestate"
        );
    }

    #[test]
    fn default_base_joins_at_root() {
        let client = MarsApiClient::with_client(
            reqwest::Client::new(),
            Url::parse(DEFAULT_BASE_URL).unwrap(),
        );
        assert_eq!(
            client.api_url("realestate").unwrap().as_str(),
            "https://mars.udacity.com/realestate"
        );
    }
}
