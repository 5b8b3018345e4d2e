//! qrz - Async client for the QRZ.com XML callsign database.
//!
//! Authenticates once with QRZ.com credentials, then resolves amateur
//! radio callsigns either one at a time or as a concurrent batch
//! sharing one session.
//!
//! # Example
//!
//! ```no_run
//! use qrz::{Credentials, QrzClient};
//!
//! # async fn example() -> Result<(), qrz::Error> {
//! let client = QrzClient::connect(Credentials::new("kb1aaa", "secret")).await;
//!
//! let record = client.resolve_one("W1AW").await?;
//! println!("name: {:?}", record.get("fname"));
//!
//! let outcome = client.resolve_batch(&["W1AW", "K1TTT", "W6OBB"]).await?;
//! for record in &outcome.records {
//!     println!("{:?}: {:?}", record.callsign(), record.get("state"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod record;

mod wire;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Session, SessionInfo};
pub use client::{BatchFailure, BatchOutcome, QrzClient};
pub use config::{QrzConfig, ServiceUrl};
pub use error::{AuthError, Error, LookupError};
pub use record::StationRecord;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
