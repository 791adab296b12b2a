//! Session authentication: token verification, cookies and the route gate.

pub mod middleware;
pub mod models;
pub mod session;

pub use middleware::session_gate_middleware;
pub use models::{SessionClaims, SessionContext};
pub use session::{SessionKeys, SessionSettings};
