//! The QRZ client: construction, single lookups, and batch fan-out.

use futures_util::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use crate::auth::{Credentials, Session, SessionInfo, SessionManager};
use crate::config::QrzConfig;
use crate::error::{AuthError, Error, LookupError};
use crate::record::StationRecord;
use crate::wire::XmlClient;

/// Outcome of a batch resolution.
///
/// Successes and failures are collected separately: consumers that only
/// care about resolved records read `records`, while the failure list
/// keeps the per-callsign errors available instead of destroying them.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully resolved records, in arbitrary order with respect
    /// to the input.
    pub records: Vec<StationRecord>,
    /// Callsigns that failed, with the error for each.
    pub failures: Vec<BatchFailure>,
}

/// One failed callsign within a batch.
#[derive(Debug)]
pub struct BatchFailure {
    /// The callsign that could not be resolved.
    pub callsign: String,
    /// Why the lookup failed.
    pub error: LookupError,
}

/// Async client for the QRZ.com XML callsign database.
///
/// Authenticates once at construction and reuses the session for every
/// lookup. Batches fan out concurrently, all lookups sharing the
/// session snapshot taken when the batch starts.
///
/// # Example
///
/// ```no_run
/// use qrz::{Credentials, QrzClient};
///
/// # async fn example() -> Result<(), qrz::Error> {
/// let client = QrzClient::connect(Credentials::new("kb1aaa", "secret")).await;
/// let record = client.resolve_one("W1AW").await?;
/// println!("{} is {:?}", "W1AW", record.get("fname"));
/// # Ok(())
/// # }
/// ```
pub struct QrzClient {
    wire: XmlClient,
    sessions: SessionManager,
    limiter: Arc<Semaphore>,
}

impl QrzClient {
    /// Connect with the default configuration (production endpoint,
    /// 10 second timeout).
    ///
    /// Attempts to authenticate immediately. An authentication failure
    /// is logged and leaves the client unauthenticated rather than
    /// failing construction; check [`QrzClient::is_authenticated`], or
    /// call [`QrzClient::authenticate`] to see the error itself.
    pub async fn connect(credentials: Credentials) -> Self {
        Self::connect_with(QrzConfig::default(), credentials).await
    }

    /// Connect with an explicit configuration.
    #[instrument(skip_all, fields(endpoint = %config.base_url, username = %credentials.username()))]
    pub async fn connect_with(config: QrzConfig, credentials: Credentials) -> Self {
        let wire = XmlClient::new(config.base_url, config.timeout);
        let sessions = SessionManager::new(wire.clone(), credentials);
        let client = Self {
            wire,
            sessions,
            limiter: Arc::new(Semaphore::new(config.max_concurrent)),
        };

        match client.sessions.authenticate().await {
            Ok(session) => info!(expiration = session.expiration(), "authenticated"),
            Err(error) => warn!(%error, "initial authentication failed"),
        }

        client
    }

    /// Explicitly (re-)authenticate, replacing the current session.
    ///
    /// The stored session is swapped wholesale on success and left
    /// untouched on failure.
    pub async fn authenticate(&self) -> Result<(), AuthError> {
        self.sessions.authenticate().await.map(|_| ())
    }

    /// Returns true if a session is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.sessions.snapshot().is_some()
    }

    /// Returns a read-only view of the current session, if any.
    pub fn session(&self) -> Option<SessionInfo> {
        self.sessions.snapshot().map(|s| SessionInfo::from(&*s))
    }

    /// Resolve a single callsign.
    ///
    /// Authenticates first if no session is held, then performs one
    /// lookup and propagates its error. Bypasses the batch machinery.
    #[instrument(skip(self))]
    pub async fn resolve_one(&self, callsign: &str) -> Result<StationRecord, Error> {
        let session = self.sessions.ensure_authenticated().await?;
        let record = self.lookup(callsign, &session).await?;
        Ok(record)
    }

    /// Resolve a batch of callsigns, returning only the successful
    /// records.
    ///
    /// Convenience over [`QrzClient::resolve_batch`] for callers that
    /// do not care which callsigns failed.
    pub async fn resolve<S: AsRef<str>>(
        &self,
        callsigns: &[S],
    ) -> Result<Vec<StationRecord>, Error> {
        Ok(self.resolve_batch(callsigns).await?.records)
    }

    /// Resolve a batch of callsigns concurrently.
    ///
    /// Every callsign gets its own lookup, bounded by the configured
    /// concurrency cap. All lookups read the session snapshot taken
    /// here, and all run to completion regardless of sibling failures;
    /// one lookup timing out neither cancels nor delays the others.
    ///
    /// A session that goes stale mid-batch is not re-acquired; the
    /// affected callsigns surface in [`BatchOutcome::failures`].
    ///
    /// # Errors
    ///
    /// Fails only when no session is held and authentication fails;
    /// per-callsign failures are reported in the outcome instead.
    #[instrument(skip_all, fields(count = callsigns.len()))]
    pub async fn resolve_batch<S: AsRef<str>>(
        &self,
        callsigns: &[S],
    ) -> Result<BatchOutcome, Error> {
        let session = self.sessions.ensure_authenticated().await?;

        let lookups = callsigns.iter().map(|callsign| {
            let callsign = callsign.as_ref();
            let session = Arc::clone(&session);
            let limiter = Arc::clone(&self.limiter);
            async move {
                let permit = limiter.acquire().await;
                let result = match permit {
                    Ok(_permit) => self.lookup(callsign, &session).await,
                    Err(_) => Err(LookupError::Transport("lookup limiter closed".to_string())),
                };
                (callsign.to_string(), result)
            }
        });

        let mut outcome = BatchOutcome::default();
        for (callsign, result) in join_all(lookups).await {
            match result {
                Ok(record) => outcome.records.push(record),
                Err(error) => {
                    debug!(callsign, %error, "lookup failed");
                    outcome.failures.push(BatchFailure { callsign, error });
                }
            }
        }

        debug!(
            resolved = outcome.records.len(),
            failed = outcome.failures.len(),
            "batch complete"
        );
        Ok(outcome)
    }

    /// One lookup against the given session.
    ///
    /// No retry and no re-authentication: a failed callsign is the
    /// caller's to handle.
    async fn lookup(
        &self,
        callsign: &str,
        session: &Session,
    ) -> Result<StationRecord, LookupError> {
        let (status, body) = self
            .wire
            .get(&[("s", session.key()), ("callsign", callsign)])
            .await?;

        if status != reqwest::StatusCode::OK {
            return Err(LookupError::HttpStatus(status.as_u16()));
        }

        let doc = roxmltree::Document::parse(&body)
            .map_err(|e| LookupError::ParseFailure(e.to_string()))?;

        Ok(StationRecord::decode(&doc))
    }
}

impl std::fmt::Debug for QrzClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrzClient")
            .field("sessions", &self.sessions)
            .finish()
    }
}
