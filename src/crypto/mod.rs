mod engine;

pub use engine::{CookieSigner, SessionId};
