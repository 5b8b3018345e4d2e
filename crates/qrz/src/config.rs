//! Client configuration and the validated endpoint URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::error::Error;

/// Base URL of the production QRZ XML interface.
///
/// The trailing slash matters: requests are formed by appending
/// `?query` directly to this string.
const DEFAULT_BASE_URL: &str = "http://xmldata.qrz.com/xml/1.31/";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on concurrent lookups within one batch.
const DEFAULT_MAX_CONCURRENT: usize = 16;

/// A validated QRZ XML endpoint URL.
///
/// The URL must be absolute with a host and use http or https. Plain
/// http is allowed for any host because the production endpoint itself
/// is served over http.
///
/// # Example
///
/// ```
/// use qrz::ServiceUrl;
///
/// let url = ServiceUrl::new("http://xmldata.qrz.com/xml/1.31/").unwrap();
/// assert_eq!(url.host(), Some("xmldata.qrz.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServiceUrl(Url);

impl ServiceUrl {
    /// Create a new endpoint URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is relative, has no host, or uses a
    /// scheme other than http/https.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| Error::InvalidUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                value: s.to_string(),
                reason: "must be an absolute URL".to_string(),
            });
        }

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(Error::InvalidUrl {
                value: s.to_string(),
                reason: "must use http or https".to_string(),
            });
        }

        if url.host_str().is_none() {
            return Err(Error::InvalidUrl {
                value: s.to_string(),
                reason: "must have a host".to_string(),
            });
        }

        Ok(Self(url))
    }

    /// Returns the URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ServiceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ServiceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ServiceUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ServiceUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Configuration for a [`QrzClient`](crate::QrzClient).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use qrz::QrzConfig;
///
/// let config = QrzConfig::default()
///     .with_timeout(Duration::from_secs(5))
///     .with_max_concurrent(4);
/// ```
#[derive(Debug, Clone)]
pub struct QrzConfig {
    /// Base endpoint of the XML interface.
    pub base_url: ServiceUrl,
    /// Per-request timeout, applied independently to each lookup.
    pub timeout: Duration,
    /// Cap on concurrent lookups within one batch.
    pub max_concurrent: usize,
}

impl QrzConfig {
    /// Set a custom base URL (for testing, or the https mirror).
    pub fn with_base_url(mut self, url: ServiceUrl) -> Self {
        self.base_url = url;
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the cap on concurrent lookups per batch.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }
}

impl Default for QrzConfig {
    fn default() -> Self {
        Self {
            base_url: ServiceUrl::new(DEFAULT_BASE_URL).expect("default endpoint URL is valid"),
            timeout: DEFAULT_TIMEOUT,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }
}
