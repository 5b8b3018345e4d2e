//! Error types for the qrz library.
//!
//! This module provides a unified error type with explicit variants for
//! authentication and lookup failures, so callers can tell a rejected
//! login apart from a lookup that merely timed out.

use thiserror::Error;

/// The unified error type for qrz operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Authentication against the XML interface failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A callsign lookup failed.
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// An endpoint URL was not valid.
    #[error("invalid endpoint URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
}

/// Errors from the authentication endpoint.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The service could not be reached (DNS, connection, timeout).
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// The authentication endpoint answered with a non-success status.
    #[error("authentication failed with HTTP status {0}")]
    HttpStatus(u16),

    /// The service answered but rejected the credentials.
    #[error("rejected by service: {0}")]
    RemoteRejected(String),

    /// The response was not the expected session document.
    #[error("malformed authentication response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuthError::Unreachable(format!("request timed out: {err}"))
        } else if err.is_connect() {
            AuthError::Unreachable(format!("connection failed: {err}"))
        } else {
            AuthError::Unreachable(err.to_string())
        }
    }
}

/// Errors from a single callsign lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Network transport failure (connection, timeout, read error).
    #[error("transport error: {0}")]
    Transport(String),

    /// The lookup endpoint answered with a status other than 200.
    #[error("lookup failed with HTTP status {0}")]
    HttpStatus(u16),

    /// The response body was not well-formed XML.
    #[error("unparseable lookup response: {0}")]
    ParseFailure(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Transport(format!("request timed out: {err}"))
        } else if err.is_connect() {
            LookupError::Transport(format!("connection failed: {err}"))
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}
