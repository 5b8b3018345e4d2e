//! Authentication: credentials, session state, and the session manager.

mod credentials;
mod session;

pub use credentials::Credentials;
pub use session::{Session, SessionInfo};

pub(crate) use session::SessionManager;
