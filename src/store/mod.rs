//! Token store — per-session token records held in process memory.

pub mod cookie;
pub mod session;
pub mod sweep;

pub use cookie::{SessionCookies, SESSION_COOKIE};
pub use session::SessionStore;
pub use sweep::sweep_daemon;
