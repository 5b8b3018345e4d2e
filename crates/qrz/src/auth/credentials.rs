//! Login credentials type.

use std::fmt;

/// Default agent tag reported to the service.
const DEFAULT_AGENT: &str = concat!("qrz-rs-", env!("CARGO_PKG_VERSION"));

/// QRZ.com account credentials.
///
/// Holds the username, password, and the agent tag that identifies the
/// calling program in the authentication request.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental
/// logging.
///
/// # Example
///
/// ```
/// use qrz::Credentials;
///
/// let creds = Credentials::new("kb1aaa", "secret").with_agent("my-logger");
/// assert_eq!(creds.username(), "kb1aaa");
/// assert_eq!(creds.agent(), "my-logger");
/// ```
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
    agent: String,
}

impl Credentials {
    /// Create new credentials with the default agent tag.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            agent: DEFAULT_AGENT.to_string(),
        }
    }

    /// Set the agent tag sent with the authentication request.
    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = agent.into();
        self
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the agent tag.
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing the authentication request.
    /// Never log or display this value.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

// Intentionally hide the password in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("agent", &self.agent)
            .finish()
    }
}
