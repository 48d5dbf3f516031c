//! Star catalog HTTP access

use crate::config::ChartConfig;
use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

pub const API_KEY_HEADER: &str = "X-Api-Key";
pub const CONSTELLATION_PARAM: &str = "constellation";

/// Failures below the HTTP layer; nothing was received from the catalog
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to build the HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("Connection error")]
    Connect(#[source] reqwest::Error),
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),
    #[error("Request failed")]
    Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err)
        } else if err.is_connect() {
            TransportError::Connect(err)
        } else {
            TransportError::Request(err)
        }
    }
}

/// Status and raw body of a catalog query, before any interpretation
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CatalogResponse {
    pub status: u16,
    pub body: String,
}

impl CatalogResponse {
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can answer a constellation query
pub trait CatalogSource {
    fn fetch(&self, constellation: &str) -> Result<CatalogResponse, TransportError>;
}

/// Blocking HTTP client for the stars API
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: Url,
    api_key: String,
    client: Client,
}

impl HttpCatalog {
    pub fn new(cfg: &ChartConfig) -> Result<Self, TransportError> {
        // No timeout means block until the server answers; reqwest would otherwise default to 30s
        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(TransportError::Client)?;
        Ok(Self {
            base_url: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
            client,
        })
    }

    /// `<base-url>?constellation=<name>`, keeping any query the base URL already has
    pub fn query_url(&self, constellation: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(CONSTELLATION_PARAM, constellation);
        url
    }
}

impl CatalogSource for HttpCatalog {
    fn fetch(&self, constellation: &str) -> Result<CatalogResponse, TransportError> {
        let url = self.query_url(constellation);
        debug!(url = url.as_str(), "Querying star catalog");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        debug!(status, bytes = body.len(), "Catalog responded");
        Ok(CatalogResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_url() {
        let catalog = HttpCatalog::new(&ChartConfig::new("k")).unwrap();
        assert_eq!(
            catalog.query_url("orion").as_str(),
            "https://api.api-ninjas.com/v1/stars?constellation=orion"
        );

        let mut cfg = ChartConfig::new("k");
        cfg.base_url = Url::parse("http://localhost:8080/stars?limit=30").unwrap();
        let catalog = HttpCatalog::new(&cfg).unwrap();
        assert_eq!(
            catalog.query_url("canis major").as_str(),
            "http://localhost:8080/stars?limit=30&constellation=canis+major"
        );
    }

    #[test]
    fn success_range() {
        assert!(CatalogResponse::new(200, "[]").is_success());
        assert!(CatalogResponse::new(204, "").is_success());
        assert!(!CatalogResponse::new(301, "").is_success());
        assert!(!CatalogResponse::new(401, "").is_success());
        assert!(!CatalogResponse::new(500, "").is_success());
    }
}
