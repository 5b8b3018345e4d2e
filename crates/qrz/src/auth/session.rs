//! Session state and the session manager.

use serde::Serialize;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, instrument};

use crate::error::AuthError;
use crate::wire::XmlClient;

use super::credentials::Credentials;

/// A session issued by the XML interface.
///
/// All fields are kept as the wire strings; in particular the
/// expiration is never interpreted locally. A session stays in use
/// until it is explicitly replaced by re-authentication, even if the
/// service has since expired it.
#[derive(Clone)]
pub struct Session {
    version: String,
    key: String,
    count: String,
    expiration: String,
}

impl Session {
    /// Returns the interface version reported with the session.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the session key, for embedding in lookup requests.
    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    /// Returns the remaining lookup count, as reported by the service.
    pub fn remaining_count(&self) -> &str {
        &self.count
    }

    /// Returns the subscription expiration, as reported by the service.
    pub fn expiration(&self) -> &str {
        &self.expiration
    }
}

// Custom Debug impl that hides the session key
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("version", &self.version)
            .field("key", &"[REDACTED]")
            .field("count", &self.count)
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Read-only view of the current session for callers.
///
/// Exposes everything except the key, so callers can inspect remaining
/// count and expiration without being handed the credential itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    /// Interface version reported with the session.
    pub version: String,
    /// Remaining lookup count, as reported by the service.
    pub remaining_count: String,
    /// Subscription expiration, as reported by the service.
    pub expiration: String,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        Self {
            version: session.version.clone(),
            remaining_count: session.count.clone(),
            expiration: session.expiration.clone(),
        }
    }
}

/// Owns the current session and the logic to (re-)acquire one.
///
/// The session is stored as an `Arc` snapshot behind an `RwLock`.
/// Replacement is build-then-swap: a new `Session` is constructed in
/// full before the lock is taken, so a concurrent reader observes
/// either the old or the new session, never a torn one.
pub(crate) struct SessionManager {
    client: XmlClient,
    credentials: Credentials,
    current: RwLock<Option<Arc<Session>>>,
}

impl SessionManager {
    pub(crate) fn new(client: XmlClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
            current: RwLock::new(None),
        }
    }

    /// Authenticate against the service and replace the stored session.
    ///
    /// On any failure the previously stored session is left untouched.
    #[instrument(skip(self), fields(username = %self.credentials.username()))]
    pub(crate) async fn authenticate(&self) -> Result<Arc<Session>, AuthError> {
        info!("authenticating");

        let query = [
            ("username", self.credentials.username()),
            ("password", self.credentials.password()),
            ("agent", self.credentials.agent()),
        ];

        let (status, body) = self.client.get(&query).await?;

        if !status.is_success() {
            return Err(AuthError::HttpStatus(status.as_u16()));
        }

        let session = Arc::new(parse_session(&body)?);
        *self.current.write().unwrap() = Some(Arc::clone(&session));

        debug!(
            count = session.remaining_count(),
            expiration = session.expiration(),
            "session established"
        );
        Ok(session)
    }

    /// Return the current session, authenticating if none is present.
    ///
    /// A present session is reused without checking its remaining count
    /// or expiration; staleness only ever surfaces as the service
    /// rejecting a lookup.
    pub(crate) async fn ensure_authenticated(&self) -> Result<Arc<Session>, AuthError> {
        if let Some(session) = self.snapshot() {
            return Ok(session);
        }
        self.authenticate().await
    }

    /// Returns the current session snapshot, if authenticated.
    pub(crate) fn snapshot(&self) -> Option<Arc<Session>> {
        self.current.read().unwrap().clone()
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("credentials", &self.credentials)
            .field("session", &self.snapshot())
            .finish()
    }
}

/// Parse an authentication response into a `Session`.
///
/// The status block is the root element's first element child. Its
/// children are probed by position, fixed by the 1.31 wire format:
/// 0 = key, 2 = remaining count, 3 = expiration (index 1 is the
/// service's optional message slot). An error response instead carries
/// a first child whose tag contains `Error`, with the message as its
/// text.
fn parse_session(body: &str) -> Result<Session, AuthError> {
    let doc = roxmltree::Document::parse(body)
        .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

    let root = doc.root_element();
    let version = root.attribute("version").unwrap_or_default().to_string();

    let status = root
        .children()
        .find(|n| n.is_element())
        .ok_or_else(|| AuthError::MalformedResponse("missing status block".to_string()))?;

    let children: Vec<_> = status.children().filter(|n| n.is_element()).collect();

    let first = children
        .first()
        .ok_or_else(|| AuthError::MalformedResponse("empty status block".to_string()))?;

    if first.tag_name().name().contains("Error") {
        let message = first.text().unwrap_or_default().trim().to_string();
        return Err(AuthError::RemoteRejected(message));
    }

    let text_at = |idx: usize, what: &str| -> Result<String, AuthError> {
        children
            .get(idx)
            .map(|n| n.text().unwrap_or_default().to_string())
            .ok_or_else(|| AuthError::MalformedResponse(format!("missing {what} node")))
    };

    Ok(Session {
        version,
        key: text_at(0, "session key")?,
        count: text_at(2, "count")?,
        expiration: text_at(3, "expiration")?,
    })
}
