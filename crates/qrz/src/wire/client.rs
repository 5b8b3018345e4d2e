//! Thin HTTP wrapper over the XML endpoint.

use reqwest::StatusCode;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::trace;

use crate::config::ServiceUrl;

/// HTTP client for the QRZ XML interface.
///
/// Every request is a GET against one base endpoint, with query
/// parameters joined by semicolons rather than ampersands. Values are
/// sent exactly as given, with no percent-encoding; the interface
/// predates such niceties.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub(crate) struct XmlClient {
    client: reqwest::Client,
    base: ServiceUrl,
    timeout: Duration,
}

impl XmlClient {
    pub(crate) fn new(base: ServiceUrl, timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .user_agent(concat!("qrz-rs/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base,
            timeout,
        }
    }

    /// Issue a GET with the given query parameters and return the
    /// status code and body text.
    ///
    /// The full URL is never logged: auth requests carry the password
    /// and lookup requests carry the session key.
    pub(crate) async fn get(
        &self,
        query: &[(&str, &str)],
    ) -> Result<(StatusCode, String), reqwest::Error> {
        let url = self.request_url(query);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        trace!(endpoint = %self.base, %status, body_len = body.len(), "GET complete");

        Ok((status, body))
    }

    /// Build the request URL: base endpoint plus semicolon-joined query.
    fn request_url(&self, query: &[(&str, &str)]) -> String {
        let query = query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(";");
        format!("{}?{}", self.base.as_str(), query)
    }
}
